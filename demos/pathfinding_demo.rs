//! Demonstration of a single corridor search
//!
//! Two rooms on different levels with a wall between them: the pathfinder has
//! to climb a staircase and walk around the wall.

use voxel_dungeon::*;

fn main() -> Result<()> {
    env_logger::init();

    let mut grid = Grid::new(Vec3::ONE, UVec3::new(12, 3, 8));

    let lower = Room::cuboid(IVec3::new(0, 0, 2), IVec3::new(2, 1, 3), grid.cell_size());
    let upper = Room::cuboid(IVec3::new(9, 1, 3), IVec3::new(3, 1, 3), grid.cell_size());
    for room in [&lower, &upper] {
        for &cell in room.cells() {
            grid.set_type(cell, CellType::Room)?;
        }
    }
    // Wall across both levels, open only at z = 7
    for y in 0..2 {
        for z in 0..7 {
            grid.set_type(IVec3::new(5, y, z), CellType::Hallway)?;
        }
    }

    let start = lower
        .nearest_cell(upper.center(), grid.cell_size())
        .expect("room has cells");
    println!("Searching from {} into room at {}", start, upper.center());

    let Some(path) = Pathfinder::new(&grid).find_path(start, &upper)? else {
        println!("No path found");
        return Ok(());
    };

    println!("Found a path with {} steps, cost {}", path.steps().len(), path.cost());
    for node in path.steps() {
        let kind = match node.kind {
            NodeKind::Hallway => "hallway",
            NodeKind::Stairs => "stairs",
        };
        println!("  {} {:<8} g={:<5} {:?}", node.index, kind, node.g, node.direction);
    }

    path.carve(&mut grid)?;
    println!(
        "\nCarved {} hallway cells and {} staircases",
        grid.count(CellType::Hallway) - 14,
        grid.count(CellType::Stairs)
    );
    for stair in path.stairs() {
        if let (Some(cells), Some(face)) = (stair.stair_cells(), stair.face_direction()) {
            println!("  steps at {}, headroom at {}, facing {:?}", cells.steps, cells.headroom, face);
        }
    }

    Ok(())
}
