//! Dungeon Configuration and Builder
//!
//! This module provides configuration types for deterministic dungeon generation.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use glam::{UVec3, Vec3};

use crate::error::{DungeonError, Result};

/// Default cost of a single staircase step, relative to a flat hallway step of 1
pub const DEFAULT_STAIR_COST: f32 = 5.0;

/// Configuration for deterministic dungeon generation
///
/// The same configuration will always produce the identical dungeon: every
/// random choice (room sizes and positions, the triangulation jitter and the
/// extra hallway sample) is drawn from a `ChaCha8Rng` seeded with `seed`.
///
/// # Example
///
/// ```rust
/// use voxel_dungeon::*;
///
/// let config = DungeonConfigBuilder::new()
///     .seed(42)
///     .grid_size(UVec3::new(24, 4, 24))
///     .unwrap()
///     .room_count(8)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.grid_size, UVec3::new(24, 4, 24));
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DungeonConfig {
    /// Random seed for deterministic generation
    pub seed: u32,

    /// World-space size of one grid cell on each axis
    pub cell_size: Vec3,

    /// Number of cells along each axis (y is the vertical axis)
    pub grid_size: UVec3,

    /// Number of rooms to attempt to place
    pub room_count: usize,

    /// Smallest room extent per axis, in cells
    pub min_room_size: UVec3,

    /// Largest room extent per axis, in cells
    pub max_room_size: UVec3,

    /// Fraction of the spanning-tree-excluded edges that get re-added as
    /// extra hallways (0.0 = pure tree, 1.0 = every triangulation edge)
    pub extra_hallway_fraction: f32,

    /// Path cost of a staircase step (a flat step costs 1)
    pub stair_cost: f32,

    /// Random placement attempts per room before that room is given up
    pub placement_attempts: usize,

    /// Perturbation applied to room centers before triangulation, as a
    /// fraction of the smallest cell dimension
    ///
    /// Rooms sit on a lattice, so their centers are routinely coplanar and
    /// cospherical. A tiny seeded offset keeps the tetrahedralization
    /// well-conditioned without visibly changing hallway choices.
    pub jitter: f32,
}

impl DungeonConfig {
    /// World-space extent of the whole grid
    #[inline]
    pub fn world_size(&self) -> Vec3 {
        self.grid_size.as_vec3() * self.cell_size
    }

    /// Total number of cells in the grid
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.grid_size.x as usize * self.grid_size.y as usize * self.grid_size.z as usize
    }

    /// Re-run every builder check on this configuration
    ///
    /// Fields are public and may come from deserialization, so generation
    /// validates before using them.
    ///
    /// # Errors
    ///
    /// Returns the same `InvalidConfig` the builder setter for the offending
    /// field would have returned
    pub fn validate(&self) -> Result<()> {
        DungeonConfigBuilder::new()
            .seed(self.seed)
            .cell_size(self.cell_size)?
            .grid_size(self.grid_size)?
            .room_count(self.room_count)?
            .room_size(self.min_room_size, self.max_room_size)?
            .extra_hallway_fraction(self.extra_hallway_fraction)?
            .stair_cost(self.stair_cost)?
            .placement_attempts(self.placement_attempts)?
            .jitter(self.jitter)?
            .build()
            .map(|_| ())
    }
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self::from(DungeonConfigBuilder::new())
    }
}

/// Builder for creating DungeonConfig with validation
///
/// # Example
///
/// ```rust
/// use voxel_dungeon::*;
///
/// let config = DungeonConfigBuilder::new()
///     .seed(7)
///     .room_count(12)
///     .unwrap()
///     .extra_hallway_fraction(0.25)
///     .unwrap()
///     .build()
///     .unwrap();
/// assert_eq!(config.room_count, 12);
/// ```
#[derive(Debug, Clone)]
pub struct DungeonConfigBuilder {
    seed: Option<u32>,
    cell_size: Vec3,
    grid_size: UVec3,
    room_count: usize,
    min_room_size: UVec3,
    max_room_size: UVec3,
    extra_hallway_fraction: f32,
    stair_cost: f32,
    placement_attempts: usize,
    jitter: f32,
}

impl DungeonConfigBuilder {
    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - cell_size: 1 x 1 x 1
    /// - grid_size: 30 x 5 x 30
    /// - room_count: 12
    /// - room size: 1x1x1 up to 5x1x5
    /// - extra_hallway_fraction: 0.125
    /// - stair_cost: 5
    /// - placement_attempts: 100
    /// - jitter: 0.001
    pub fn new() -> Self {
        Self {
            seed: None,
            cell_size: Vec3::ONE,
            grid_size: UVec3::new(30, 5, 30),
            room_count: 12,
            min_room_size: UVec3::ONE,
            max_room_size: UVec3::new(5, 1, 5),
            extra_hallway_fraction: 0.125,
            stair_cost: DEFAULT_STAIR_COST,
            placement_attempts: 100,
            jitter: 0.001,
        }
    }

    /// Set the random seed for generation
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the world-space size of one cell
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` unless every component is finite and positive
    pub fn cell_size(mut self, size: Vec3) -> Result<Self> {
        if !size.is_finite() || size.min_element() <= 0.0 {
            return Err(DungeonError::InvalidConfig(format!(
                "cell size must be positive on every axis (got {})",
                size
            )));
        }
        self.cell_size = size;
        Ok(self)
    }

    /// Set the grid dimensions in cells
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if any dimension is zero or the cell count
    /// would not fit in memory as a dense array
    pub fn grid_size(mut self, size: UVec3) -> Result<Self> {
        if size.min_element() == 0 {
            return Err(DungeonError::InvalidConfig(format!(
                "grid dimensions must be positive (got {})",
                size
            )));
        }
        let cells = (size.x as usize)
            .checked_mul(size.y as usize)
            .and_then(|xy| xy.checked_mul(size.z as usize));
        if cells.is_none() || size.max_element() > i32::MAX as u32 {
            return Err(DungeonError::InvalidConfig(format!(
                "grid {} is too large",
                size
            )));
        }
        self.grid_size = size;
        Ok(self)
    }

    /// Set how many rooms to place
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for fewer than 4 rooms, which cannot form a
    /// tetrahedron and therefore cannot be connected
    pub fn room_count(mut self, count: usize) -> Result<Self> {
        if count < 4 {
            return Err(DungeonError::InvalidConfig(format!(
                "room count must be at least 4 (got {})",
                count
            )));
        }
        self.room_count = count;
        Ok(self)
    }

    /// Set the inclusive room size range, in cells per axis
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if `min` has a zero component or exceeds `max`
    pub fn room_size(mut self, min: UVec3, max: UVec3) -> Result<Self> {
        if min.min_element() == 0 {
            return Err(DungeonError::InvalidConfig(format!(
                "minimum room size must be at least 1 on every axis (got {})",
                min
            )));
        }
        if min.cmpgt(max).any() {
            return Err(DungeonError::InvalidConfig(format!(
                "minimum room size {} exceeds maximum {}",
                min, max
            )));
        }
        self.min_room_size = min;
        self.max_room_size = max;
        Ok(self)
    }

    /// Set the fraction of non-tree edges to re-add as extra hallways
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the fraction is outside `[0, 1]`
    pub fn extra_hallway_fraction(mut self, fraction: f32) -> Result<Self> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(DungeonError::InvalidConfig(format!(
                "extra hallway fraction must be within [0, 1] (got {})",
                fraction
            )));
        }
        self.extra_hallway_fraction = fraction;
        Ok(self)
    }

    /// Set the path cost of a staircase step
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the cost is below the flat step cost of 1
    pub fn stair_cost(mut self, cost: f32) -> Result<Self> {
        if !cost.is_finite() || cost < 1.0 {
            return Err(DungeonError::InvalidConfig(format!(
                "stair cost must be >= 1 (got {})",
                cost
            )));
        }
        self.stair_cost = cost;
        Ok(self)
    }

    /// Set the number of placement attempts per room
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if attempts is zero
    pub fn placement_attempts(mut self, attempts: usize) -> Result<Self> {
        if attempts == 0 {
            return Err(DungeonError::InvalidConfig(
                "placement attempts must be at least 1".to_string(),
            ));
        }
        self.placement_attempts = attempts;
        Ok(self)
    }

    /// Set the triangulation jitter, as a fraction of the smallest cell dimension
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if jitter is outside `[0, 0.1]`
    pub fn jitter(mut self, jitter: f32) -> Result<Self> {
        if !(0.0..=0.1).contains(&jitter) {
            return Err(DungeonError::InvalidConfig(format!(
                "jitter must be within [0, 0.1] (got {})",
                jitter
            )));
        }
        self.jitter = jitter;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the maximum room size does not fit the grid
    pub fn build(self) -> Result<DungeonConfig> {
        if self.max_room_size.cmpgt(self.grid_size).any() {
            return Err(DungeonError::InvalidConfig(format!(
                "maximum room size {} does not fit grid {}",
                self.max_room_size, self.grid_size
            )));
        }
        Ok(DungeonConfig::from(self))
    }
}

impl From<DungeonConfigBuilder> for DungeonConfig {
    fn from(builder: DungeonConfigBuilder) -> Self {
        DungeonConfig {
            seed: builder.seed.unwrap_or_else(rand::random),
            cell_size: builder.cell_size,
            grid_size: builder.grid_size,
            room_count: builder.room_count,
            min_room_size: builder.min_room_size,
            max_room_size: builder.max_room_size,
            extra_hallway_fraction: builder.extra_hallway_fraction,
            stair_cost: builder.stair_cost,
            placement_attempts: builder.placement_attempts,
            jitter: builder.jitter,
        }
    }
}

impl Default for DungeonConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
