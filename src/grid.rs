//! Dense 3D voxel grid of typed cells

use glam::{IVec3, UVec3, Vec3};

use crate::cell::{Cell, CellType, Direction};
use crate::error::{DungeonError, Result};

/// The six face-adjacent offsets of a grid cell
pub(crate) const FACE_NEIGHBORS: [IVec3; 6] = [
    IVec3::X,
    IVec3::NEG_X,
    IVec3::Y,
    IVec3::NEG_Y,
    IVec3::Z,
    IVec3::NEG_Z,
];

/// Dense 3-dimensional array of cells
///
/// Every index in `[0, dims.x) x [0, dims.y) x [0, dims.z)` maps to exactly
/// one [`Cell`]. Out-of-bounds queries are rejected, never clamped.
///
/// Storage is x-major, then y, then z: `i = (x * dims.y + y) * dims.z + z`.
///
/// # Example
///
/// ```
/// use voxel_dungeon::*;
///
/// let grid = Grid::new(Vec3::ONE, UVec3::new(4, 2, 4));
/// assert!(grid.is_valid_cell(IVec3::new(3, 1, 3)));
/// assert!(grid.get(IVec3::new(4, 0, 0)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Grid {
    cell_size: Vec3,
    dims: UVec3,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell empty
    pub fn new(cell_size: Vec3, dims: UVec3) -> Self {
        let mut grid = Self {
            cell_size,
            dims,
            cells: Vec::new(),
        };
        grid.init(cell_size, dims);
        grid
    }

    /// Reset storage to `dims` empty cells of the given size
    ///
    /// The existing allocation is reused when the dimensions allow it.
    pub fn init(&mut self, cell_size: Vec3, dims: UVec3) {
        self.cell_size = cell_size;
        self.dims = dims;
        self.cells.clear();
        self.cells.reserve(dims.x as usize * dims.y as usize * dims.z as usize);
        for x in 0..dims.x as i32 {
            for y in 0..dims.y as i32 {
                for z in 0..dims.z as i32 {
                    self.cells.push(Cell::new(IVec3::new(x, y, z), cell_size));
                }
            }
        }
    }

    /// Grid dimensions in cells
    #[inline]
    pub fn dims(&self) -> UVec3 {
        self.dims
    }

    /// World-space size of a cell
    #[inline]
    pub fn cell_size(&self) -> Vec3 {
        self.cell_size
    }

    /// Total number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if an index lies inside the grid
    #[inline]
    pub fn is_valid_cell(&self, index: IVec3) -> bool {
        index.cmpge(IVec3::ZERO).all() && index.cmplt(self.dims.as_ivec3()).all()
    }

    fn linear(&self, index: IVec3) -> Result<usize> {
        if !self.is_valid_cell(index) {
            return Err(DungeonError::OutOfBounds {
                index,
                dims: self.dims,
            });
        }
        let (dy, dz) = (self.dims.y as usize, self.dims.z as usize);
        Ok((index.x as usize * dy + index.y as usize) * dz + index.z as usize)
    }

    /// Get a cell by index
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the index is not a valid cell
    pub fn get(&self, index: IVec3) -> Result<&Cell> {
        let i = self.linear(index)?;
        Ok(&self.cells[i])
    }

    /// Get a mutable cell by index
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` if the index is not a valid cell
    pub fn get_mut(&mut self, index: IVec3) -> Result<&mut Cell> {
        let i = self.linear(index)?;
        Ok(&mut self.cells[i])
    }

    /// Get the type of a cell, or `None` outside the grid
    #[inline]
    pub fn cell_type(&self, index: IVec3) -> Option<CellType> {
        self.get(index).ok().map(|cell| cell.cell_type)
    }

    /// Retype a cell
    pub fn set_type(&mut self, index: IVec3, cell_type: CellType) -> Result<()> {
        self.get_mut(index)?.cell_type = cell_type;
        Ok(())
    }

    /// Retype a staircase cell and record which way it faces
    pub fn set_stairs(&mut self, index: IVec3, cell_type: CellType, face: Direction) -> Result<()> {
        let cell = self.get_mut(index)?;
        cell.cell_type = cell_type;
        cell.face_direction = face;
        Ok(())
    }

    /// Check if a cell is inside the grid and nothing has been carved into it
    #[inline]
    pub fn is_empty(&self, index: IVec3) -> bool {
        matches!(self.cell_type(index), Some(CellType::Empty))
    }

    /// Check if a cell may become part of a room made of `room_cells`
    ///
    /// The cell must be valid and empty, and none of its six neighbours may
    /// belong to a different room. Neighbours listed in `room_cells` are the
    /// room's own cells and do not count, so a room never rejects itself.
    pub fn can_place_room(&self, index: IVec3, room_cells: &[IVec3]) -> bool {
        if !self.is_empty(index) {
            return false;
        }
        FACE_NEIGHBORS.iter().all(|&offset| {
            let neighbor = index + offset;
            self.cell_type(neighbor) != Some(CellType::Room) || room_cells.contains(&neighbor)
        })
    }

    /// World-space center of the cell at `index`
    #[inline]
    pub fn center_by_indices(&self, index: IVec3) -> Vec3 {
        index.as_vec3() * self.cell_size
    }

    /// Index of the cell whose center is nearest to a world position
    ///
    /// A cell spans half a cell size either side of its center, so this is
    /// `floor(world / cell_size + 0.5)`. The result may lie outside the grid.
    #[inline]
    pub fn indices_by_center(&self, world: Vec3) -> IVec3 {
        (world / self.cell_size + Vec3::splat(0.5)).floor().as_ivec3()
    }

    /// World-space centers of the lowest and highest cells
    pub fn world_bounds(&self) -> (Vec3, Vec3) {
        let max = self.dims.as_ivec3() - IVec3::ONE;
        (Vec3::ZERO, self.center_by_indices(max.max(IVec3::ZERO)))
    }

    /// Iterate over every cell in storage order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Count the cells of a given type
    pub fn count(&self, cell_type: CellType) -> usize {
        self.cells.iter().filter(|c| c.cell_type == cell_type).count()
    }
}
