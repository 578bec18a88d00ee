//! Grammar-driven dungeon generation split into coherent submodules.

pub mod grid;
pub mod model;
pub mod rooms;
pub mod themes;
pub mod validate;

mod connector;
mod context;
mod convert;
mod furnish;
mod generator;
mod graph;
mod partition;
mod specials;
mod waypoints;

pub use convert::{WALL_E, WALL_N, WALL_S, WALL_W, convert_tiles, wall_mask};
pub use generator::DungeonGenerator;
pub use graph::is_connected;
pub use grid::{Tile, TileGrid};
pub use model::DungeonLayout;
pub use rooms::{Door, Rect, Room, RoomTable};
pub use specials::SpecialRooms;
pub use themes::Theme;
pub use validate::{Violation, validate_layout};

use crate::error::MapgenError;
use crate::level::LevelSink;
use crate::rng::MapRng;

/// Generates a dungeon with the default configuration.
pub fn generate_dungeon<L: LevelSink>(
    width: usize,
    height: usize,
    specials: usize,
    rng: &mut MapRng,
    level: &mut L,
) -> Result<DungeonLayout, MapgenError> {
    DungeonGenerator::default().generate(width, height, specials, rng, level)
}

#[cfg(test)]
mod tests {
    use super::{DungeonGenerator, generate_dungeon};
    use crate::level::GeneratedLevel;
    use crate::rng::MapRng;

    #[test]
    fn generate_dungeon_matches_dungeon_generator_output() {
        let seed = 123_u64;

        let mut helper_level = GeneratedLevel::new(2, 64, 48);
        let from_helper =
            generate_dungeon(64, 48, 2, &mut MapRng::new(seed), &mut helper_level).expect("helper");

        let mut generator_level = GeneratedLevel::new(2, 64, 48);
        let from_generator = DungeonGenerator::default()
            .generate(64, 48, 2, &mut MapRng::new(seed), &mut generator_level)
            .expect("generator");

        assert_eq!(from_helper, from_generator);
        assert_eq!(helper_level, generator_level);
    }
}
