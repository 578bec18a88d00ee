//! Tunable constants of the dungeon grammar.
//!
//! The defaults are the empirically tuned values the generator shipped with;
//! every field can be overridden from a config file.

use serde::{Deserialize, Serialize};

use crate::error::MapgenError;
use crate::level::Portal;

pub const DEFAULT_MIN_ROOM_AREA: u32 = 100;
pub const DEFAULT_MIN_ROOM_SIDE: u32 = 4;
pub const DEFAULT_WORST_ROOM_RATIO: f64 = 2.0;
pub const DEFAULT_DOOR_MARGIN: usize = 3;
pub const DEFAULT_FUSION_CHANCE_PERCENT: u32 = 25;
pub const DEFAULT_WAYPOINT_DIVISOR: u32 = 3;
pub const DEFAULT_MAX_ROOM_WAYPOINTS: usize = 25;
pub const DEFAULT_ARMORY_CHANCE_PERCENT: u32 = 90;

/// Which portal marks the entrance and which marks the exits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeleportPair {
    #[default]
    CloudCloud,
    CloudLadderUp,
    LadderDownCloud,
    LadderDownLadderUp,
}

impl TeleportPair {
    pub const ALL: [TeleportPair; 4] = [
        TeleportPair::CloudCloud,
        TeleportPair::CloudLadderUp,
        TeleportPair::LadderDownCloud,
        TeleportPair::LadderDownLadderUp,
    ];

    pub fn entrance(self) -> Portal {
        match self {
            TeleportPair::CloudCloud | TeleportPair::CloudLadderUp => Portal::Cloud,
            TeleportPair::LadderDownCloud | TeleportPair::LadderDownLadderUp => Portal::LadderDown,
        }
    }

    pub fn exit(self) -> Portal {
        match self {
            TeleportPair::CloudCloud | TeleportPair::LadderDownCloud => Portal::Cloud,
            TeleportPair::CloudLadderUp | TeleportPair::LadderDownLadderUp => Portal::LadderUp,
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            TeleportPair::CloudCloud => "In - cloud; Out - cloud",
            TeleportPair::CloudLadderUp => "In - cloud; Out - ladder up",
            TeleportPair::LadderDownCloud => "In - ladder down; Out - cloud",
            TeleportPair::LadderDownLadderUp => "In - ladder down; Out - ladder up",
        }
    }

    /// Next pair in editor cycling order, wrapping around.
    pub fn cycle(self) -> Self {
        let index = Self::ALL.iter().position(|&pair| pair == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Smallest interior area a room may have.
    pub min_room_area: u32,
    /// Smallest interior side length a room may have.
    pub min_room_side: u32,
    /// Largest accepted long/short ratio of a room's interior.
    pub worst_room_ratio: f64,
    /// Floor cells required on each side of a door candidate along the wall.
    /// Repair falls back to 0 when no room can be linked with this margin.
    pub door_margin: usize,
    pub fusion_chance_percent: u32,
    /// Shortest shared wall run that may be fused away.
    pub fusion_min_run: usize,
    pub waypoint_divisor: u32,
    pub max_room_waypoints: usize,
    pub armory_chance_percent: u32,
    pub teleport_pair: TeleportPair,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            min_room_area: DEFAULT_MIN_ROOM_AREA,
            min_room_side: DEFAULT_MIN_ROOM_SIDE,
            worst_room_ratio: DEFAULT_WORST_ROOM_RATIO,
            door_margin: DEFAULT_DOOR_MARGIN,
            fusion_chance_percent: DEFAULT_FUSION_CHANCE_PERCENT,
            fusion_min_run: 2,
            waypoint_divisor: DEFAULT_WAYPOINT_DIVISOR,
            max_room_waypoints: DEFAULT_MAX_ROOM_WAYPOINTS,
            armory_chance_percent: DEFAULT_ARMORY_CHANCE_PERCENT,
            teleport_pair: TeleportPair::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), MapgenError> {
        let invalid = |reason: &str| Err(MapgenError::InvalidConfig { reason: reason.to_owned() });

        if self.min_room_side < 2 {
            return invalid("min_room_side must be at least 2");
        }
        if self.min_room_area == 0 {
            return invalid("min_room_area must be positive");
        }
        if !self.worst_room_ratio.is_finite() || self.worst_room_ratio < 1.0 {
            return invalid("worst_room_ratio must be a finite value >= 1.0");
        }
        if self.fusion_chance_percent > 100 || self.armory_chance_percent > 100 {
            return invalid("percent chances must not exceed 100");
        }
        if self.fusion_min_run == 0 {
            return invalid("fusion_min_run must be positive");
        }
        if self.waypoint_divisor == 0 {
            return invalid("waypoint_divisor must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(GeneratorConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_ratio_below_one() {
        let config = GeneratorConfig { worst_room_ratio: 0.5, ..GeneratorConfig::default() };
        assert!(matches!(config.validate(), Err(MapgenError::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_nan_ratio_and_oversized_chance() {
        let nan = GeneratorConfig { worst_room_ratio: f64::NAN, ..GeneratorConfig::default() };
        assert!(nan.validate().is_err());
        let chance = GeneratorConfig { fusion_chance_percent: 101, ..GeneratorConfig::default() };
        assert!(chance.validate().is_err());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{ "min_room_area": 64, "teleport_pair": "cloud_ladder_up" }"#)
                .expect("deserialize");
        assert_eq!(config.min_room_area, 64);
        assert_eq!(config.min_room_side, DEFAULT_MIN_ROOM_SIDE);
        assert_eq!(config.door_margin, DEFAULT_DOOR_MARGIN);
        assert_eq!(config.teleport_pair, TeleportPair::CloudLadderUp);
    }

    #[test]
    fn teleport_pairs_cycle_through_every_variant() {
        let mut pair = TeleportPair::CloudCloud;
        for _ in 0..TeleportPair::ALL.len() {
            pair = pair.cycle();
        }
        assert_eq!(pair, TeleportPair::CloudCloud);
        assert_eq!(TeleportPair::LadderDownLadderUp.entrance(), Portal::LadderDown);
        assert_eq!(TeleportPair::LadderDownLadderUp.exit(), Portal::LadderUp);
        assert_eq!(TeleportPair::CloudLadderUp.describe(), "In - cloud; Out - ladder up");
    }
}
