//! Random room placement
//!
//! Rooms are axis-aligned boxes dropped at random positions. A candidate is
//! accepted only if all of its cells are free, it does not touch another room
//! through a face, and its centroid differs from every room placed so far
//! (rooms are compared by centroid, so duplicates must never get in).

use glam::IVec3;
use rand::Rng;

use crate::cell::CellType;
use crate::config::DungeonConfig;
use crate::error::Result;
use crate::grid::Grid;
use crate::room::Room;

/// Place up to `config.room_count` rooms into `grid`
///
/// Each room gets `config.placement_attempts` random tries; a room that never
/// fits is skipped, so fewer rooms than requested may be returned. Accepted
/// rooms are written into the grid as `Room` cells.
pub fn place_rooms<R: Rng>(grid: &mut Grid, config: &DungeonConfig, rng: &mut R) -> Result<Vec<Room>> {
    let mut rooms: Vec<Room> = Vec::with_capacity(config.room_count);
    let min = config.min_room_size.as_ivec3();
    let max = config.max_room_size.as_ivec3().min(grid.dims().as_ivec3());
    let mut skipped = 0;

    for _ in 0..config.room_count {
        let placed = (0..config.placement_attempts).find_map(|_| {
            let room = random_room(grid, min, max, rng);
            fits(grid, &rooms, &room).then_some(room)
        });

        match placed {
            Some(room) => {
                for &index in room.cells() {
                    grid.set_type(index, CellType::Room)?;
                }
                rooms.push(room);
            }
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::debug!(
            "[Rooms] {} of {} rooms found no free spot in {} attempts",
            skipped,
            config.room_count,
            config.placement_attempts
        );
    }
    Ok(rooms)
}

fn random_room<R: Rng>(grid: &Grid, min: IVec3, max: IVec3, rng: &mut R) -> Room {
    let size = IVec3::new(
        rng.gen_range(min.x..=max.x),
        rng.gen_range(min.y..=max.y),
        rng.gen_range(min.z..=max.z),
    );
    let slack = grid.dims().as_ivec3() - size;
    let origin = IVec3::new(
        rng.gen_range(0..=slack.x),
        rng.gen_range(0..=slack.y),
        rng.gen_range(0..=slack.z),
    );
    Room::cuboid(origin, size, grid.cell_size())
}

fn fits(grid: &Grid, rooms: &[Room], room: &Room) -> bool {
    room.cells().iter().all(|&index| grid.can_place_room(index, room.cells()))
        && rooms.iter().all(|other| other.center() != room.center())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DungeonConfigBuilder;
    use crate::grid::FACE_NEIGHBORS;
    use glam::UVec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config(rooms: usize) -> DungeonConfig {
        DungeonConfigBuilder::new()
            .seed(3)
            .grid_size(UVec3::new(20, 3, 20))
            .unwrap()
            .room_count(rooms)
            .unwrap()
            .room_size(UVec3::ONE, UVec3::new(4, 1, 4))
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_rooms_are_written_and_separated() {
        let config = config(10);
        let mut grid = Grid::new(config.cell_size, config.grid_size);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let rooms = place_rooms(&mut grid, &config, &mut rng).unwrap();

        assert!(rooms.len() >= 4);
        let total: usize = rooms.iter().map(Room::cell_count).sum();
        assert_eq!(grid.count(CellType::Room), total);

        for (i, room) in rooms.iter().enumerate() {
            for &cell in room.cells() {
                assert_eq!(grid.cell_type(cell), Some(CellType::Room));
                // No face contact with any other room
                for offset in FACE_NEIGHBORS {
                    let neighbor = cell + offset;
                    for (j, other) in rooms.iter().enumerate() {
                        if i != j {
                            assert!(!other.contains(neighbor));
                        }
                    }
                }
            }
            for other in &rooms[i + 1..] {
                assert_ne!(room.center(), other.center());
            }
        }
    }

    #[test]
    fn test_placement_is_deterministic() {
        let config = config(8);
        let run = || {
            let mut grid = Grid::new(config.cell_size, config.grid_size);
            let mut rng = ChaCha8Rng::seed_from_u64(17);
            place_rooms(&mut grid, &config, &mut rng).unwrap()
        };
        let a = run();
        let b = run();
        assert_eq!(a.len(), b.len());
        for (ra, rb) in a.iter().zip(&b) {
            assert_eq!(ra.cells(), rb.cells());
        }
    }

    #[test]
    fn test_crowded_grid_places_fewer_rooms() {
        let config = DungeonConfigBuilder::new()
            .grid_size(UVec3::new(3, 1, 3))
            .unwrap()
            .room_count(20)
            .unwrap()
            .room_size(UVec3::ONE, UVec3::ONE)
            .unwrap()
            .placement_attempts(50)
            .unwrap()
            .build()
            .unwrap();
        let mut grid = Grid::new(config.cell_size, config.grid_size);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let rooms = place_rooms(&mut grid, &config, &mut rng).unwrap();
        // Single cells that may not share faces: at most a checkerboard of 5
        assert!(rooms.len() <= 5);
        assert!(!rooms.is_empty());
    }
}
