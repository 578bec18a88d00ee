use mapgen::mapgen::{Tile, validate_layout};
use mapgen::{GeneratedLevel, GeneratorConfig, MapRng, MapgenError, generate_dungeon};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};

fn check_invariants(seed: u64, width: usize, height: usize) -> Result<(), String> {
    let config = GeneratorConfig::default();
    let mut level = GeneratedLevel::new(0, width, height);
    let layout = match generate_dungeon(width, height, 1, &mut MapRng::new(seed), &mut level) {
        Ok(layout) => layout,
        Err(MapgenError::ObstacleCapacityExceeded { .. }) => return Ok(()),
        Err(error) => return Err(format!("generation failed for seed {seed}: {error}")),
    };

    let violations = validate_layout(&layout, &config);
    if let Some(first) = violations.first() {
        return Err(format!("{width}x{height} seed {seed}: {first}"));
    }

    if layout.rooms.len() > 1 {
        for room in layout.rooms.ids() {
            let rect = layout.rooms.rect(room);
            let (long, short) = (rect.w.max(rect.h), rect.w.min(rect.h));
            if f64::from(long) > f64::from(short) * config.worst_room_ratio {
                return Err(format!("{width}x{height} seed {seed}: room {room} is {rect:?}"));
            }
        }
    }

    for (pos, tile, _) in layout.grid.cells() {
        let on_border =
            pos.x == 0 || pos.y == 0 || pos.x == width as i32 - 1 || pos.y == height as i32 - 1;
        if on_border && tile != Tile::Wall {
            return Err(format!("seed {seed}: border cell {pos:?} is {tile:?}"));
        }
    }

    for (id, waypoint) in level.waypoints.iter().enumerate() {
        for &other in &waypoint.links {
            if !level.is_linked(other, id) {
                return Err(format!("seed {seed}: waypoint link {id} -> {other} is one-way"));
            }
        }
    }
    Ok(())
}

#[test]
fn test_fuzz_generated_layouts_hold_invariants() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(48));
    let inputs = (any::<u64>(), 12_usize..120, 12_usize..120);

    runner
        .run(&inputs, |(seed, width, height)| {
            check_invariants(seed, width, height).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("generated layouts should preserve structural invariants");
}

#[test]
fn test_fuzz_undersized_grids_never_panic() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(64));
    let inputs = (any::<u64>(), 0_usize..12, 0_usize..12);

    runner
        .run(&inputs, |(seed, width, height)| {
            let mut level = GeneratedLevel::new(0, width, height);
            match generate_dungeon(width, height, 1, &mut MapRng::new(seed), &mut level) {
                Ok(_) | Err(MapgenError::GridTooSmall { .. }) => Ok(()),
                Err(error) => Err(TestCaseError::fail(format!("unexpected error: {error}"))),
            }
        })
        .expect("small grids should fail cleanly");
}
