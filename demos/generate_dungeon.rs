//! Example: Generate a dungeon
//!
//! Runs the full pipeline and prints a floor-by-floor map of the result.
//! Set `RUST_LOG=debug` to see every stage.

use voxel_dungeon::*;

fn glyph(cell: &Cell) -> char {
    match cell.cell_type {
        CellType::Empty => '.',
        CellType::Room => '#',
        CellType::Hallway => '+',
        CellType::StairSpace => '^',
        CellType::Stairs => match cell.face_direction {
            Direction::North => 'n',
            Direction::East => 'e',
            Direction::South => 's',
            Direction::West => 'w',
        },
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("Voxel Dungeon Generation Example");
    println!("================================\n");

    let config = DungeonConfigBuilder::new()
        .seed(42)
        .grid_size(UVec3::new(30, 5, 30))?
        .room_count(12)?
        .room_size(UVec3::new(2, 1, 2), UVec3::new(5, 1, 5))?
        .build()?;

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  Grid: {}", config.grid_size);
    println!("  Rooms requested: {}", config.room_count);
    println!("  Extra hallway fraction: {}", config.extra_hallway_fraction);
    println!("  Stair cost: {}", config.stair_cost);
    println!();

    let dungeon = Dungeon::generate_with_observer(config, &mut LogObserver)?;
    let grid = dungeon.grid();

    println!("Statistics:");
    println!("  Rooms placed: {}", dungeon.rooms().len());
    println!("  Corridors carved: {}", dungeon.connections().len());
    println!("  Corridors failed: {}", dungeon.failed_connections().len());
    println!("  Hallway cells: {}", grid.count(CellType::Hallway));
    println!("  Staircases: {}", grid.count(CellType::Stairs));
    println!();

    for (id, room) in dungeon.rooms().iter().enumerate() {
        let links: Vec<usize> = dungeon.neighbors(RoomId(id)).iter().map(|r| r.0).collect();
        println!(
            "  Room {:>2}: center=({:.1}, {:.1}, {:.1}), cells={:>2}, linked to {:?}",
            id,
            room.center().x,
            room.center().y,
            room.center().z,
            room.cell_count(),
            links
        );
    }

    let dims = grid.dims().as_ivec3();
    for y in 0..dims.y {
        println!("\nLevel {}:", y);
        for z in (0..dims.z).rev() {
            let row: String = (0..dims.x)
                .map(|x| grid.get(IVec3::new(x, y, z)).map_or('?', glyph))
                .collect();
            println!("  {}", row);
        }
    }

    println!("\nGeneration complete!");
    Ok(())
}
