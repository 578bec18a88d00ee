pub mod config;
pub mod error;
pub mod level;
pub mod mapgen;
pub mod rng;
pub mod types;

pub use config::{GeneratorConfig, TeleportPair};
pub use error::MapgenError;
pub use level::{
    FloorTile, GeneratedLevel, HalfPos, LevelSink, ObstacleKind, Portal, PortalHelper,
    WaypointId, WallGraphic,
};
pub use mapgen::{DungeonGenerator, DungeonLayout, generate_dungeon};
pub use rng::MapRng;
pub use types::*;
