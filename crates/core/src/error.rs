//! Failure modes surfaced by dungeon generation.
//!
//! Running out of cuts or connection candidates is ordinary control flow and
//! never shows up here.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapgenError {
    #[error("invalid generator configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error(
        "grid {width}x{height} cannot hold a room with sides >= {min_side} and area >= {min_area}"
    )]
    GridTooSmall { width: usize, height: usize, min_side: u32, min_area: u32 },

    #[error("requested {requested} special rooms but only {available} rooms were generated")]
    TooManySpecialRooms { requested: usize, available: usize },

    #[error("level obstacle capacity of {capacity} exceeded")]
    ObstacleCapacityExceeded { capacity: usize },

    #[error("{unreachable} rooms could not be connected to room 0")]
    Disconnected { unreachable: usize },
}
