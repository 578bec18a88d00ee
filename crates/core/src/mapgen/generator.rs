//! Generation orchestration: partition, connect, decorate, convert.

use tracing::debug;

use crate::config::GeneratorConfig;
use crate::error::MapgenError;
use crate::level::LevelSink;
use crate::rng::MapRng;

use super::connector::connect_rooms;
use super::context::GenerationContext;
use super::convert::convert_tiles;
use super::furnish::furnish_rooms;
use super::graph::middle_room;
use super::model::DungeonLayout;
use super::partition::partition;
use super::specials::{choose_special_rooms, place_teleports};
use super::themes::assign_themes;
use super::waypoints::{connect_waypoints, place_waypoints};

#[derive(Clone, Debug, Default)]
pub struct DungeonGenerator {
    config: GeneratorConfig,
}

impl DungeonGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Builds a `width` x `height` dungeon with `specials` special rooms
    /// into `level`. The first special room is the entrance, the rest are exits.
    pub fn generate<L: LevelSink>(
        &self,
        width: usize,
        height: usize,
        specials: usize,
        rng: &mut MapRng,
        level: &mut L,
    ) -> Result<DungeonLayout, MapgenError> {
        self.config.validate()?;
        self.check_grid(width, height)?;
        debug!(width, height, specials, seed = rng.seed(), "generating dungeon");

        let mut context = GenerationContext::new(&self.config, rng, level, width, height);
        partition(&mut context);
        connect_rooms(&mut context)?;

        let special_rooms = choose_special_rooms(&mut context, specials)?;
        place_teleports(&mut context, &special_rooms)?;

        assign_themes(&mut context.rooms, context.rng);
        convert_tiles(&context.grid, &context.rooms, &mut context.output)?;
        furnish_rooms(&mut context, &special_rooms)?;

        place_waypoints(&mut context);
        connect_waypoints(&mut context);

        let middle_room = middle_room(&context.rooms);
        debug!(
            rooms = context.rooms.len(),
            doors = context.rooms.door_count(),
            obstacles = context.output.obstacles_placed(),
            waypoints = context.output.waypoints().len(),
            ?middle_room,
            "dungeon generated"
        );

        Ok(DungeonLayout {
            width,
            height,
            grid: context.grid,
            rooms: context.rooms,
            specials: special_rooms,
            middle_room,
        })
    }

    /// The interior left inside the outer wall must fit at least one room.
    fn check_grid(&self, width: usize, height: usize) -> Result<(), MapgenError> {
        let min_side = self.config.min_room_side;
        let min_area = self.config.min_room_area;
        let interior_w = width.saturating_sub(2) as u64;
        let interior_h = height.saturating_sub(2) as u64;
        let fits = interior_w >= u64::from(min_side)
            && interior_h >= u64::from(min_side)
            && interior_w * interior_h >= u64::from(min_area)
            && width <= i32::MAX as usize
            && height <= i32::MAX as usize;
        if fits {
            Ok(())
        } else {
            Err(MapgenError::GridTooSmall { width, height, min_side, min_area })
        }
    }
}
