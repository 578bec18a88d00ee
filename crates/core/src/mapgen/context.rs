//! State owned by one generation run.

use std::collections::BTreeSet;

use crate::config::GeneratorConfig;
use crate::error::MapgenError;
use crate::level::{FloorTile, HalfPos, LevelSink, ObstacleKind, WaypointId};
use crate::rng::MapRng;
use crate::types::Pos;

use super::grid::TileGrid;
use super::rooms::RoomTable;

pub(super) struct GenerationContext<'a, L: LevelSink> {
    pub(super) config: &'a GeneratorConfig,
    pub(super) rng: &'a mut MapRng,
    pub(super) grid: TileGrid,
    pub(super) rooms: RoomTable,
    pub(super) output: DungeonOutput<'a, L>,
}

impl<'a, L: LevelSink> GenerationContext<'a, L> {
    pub(super) fn new(
        config: &'a GeneratorConfig,
        rng: &'a mut MapRng,
        level: &'a mut L,
        width: usize,
        height: usize,
    ) -> Self {
        Self {
            config,
            rng,
            grid: TileGrid::new(width, height),
            rooms: RoomTable::new(),
            output: DungeonOutput::new(level),
        }
    }
}

/// Write cursor over the target level.
///
/// Remembers the waypoints this run created and the cells furniture landed
/// on, so later phases never need to query the level back.
pub(super) struct DungeonOutput<'a, L: LevelSink> {
    level: &'a mut L,
    obstacles_placed: usize,
    waypoints: Vec<(WaypointId, Pos)>,
    occupied: BTreeSet<Pos>,
}

impl<'a, L: LevelSink> DungeonOutput<'a, L> {
    pub(super) fn new(level: &'a mut L) -> Self {
        Self { level, obstacles_placed: 0, waypoints: Vec::new(), occupied: BTreeSet::new() }
    }

    pub(super) fn obstacles_placed(&self) -> usize {
        self.obstacles_placed
    }

    pub(super) fn waypoints(&self) -> &[(WaypointId, Pos)] {
        &self.waypoints
    }

    pub(super) fn is_occupied(&self, pos: Pos) -> bool {
        self.occupied.contains(&pos)
    }

    pub(super) fn add_waypoint(&mut self, pos: Pos) -> WaypointId {
        self.create_waypoint(pos.x, pos.y)
    }

    pub(super) fn link_both_ways(&mut self, a: WaypointId, b: WaypointId) {
        self.level.toggle_waypoint_link(a, b);
        self.level.toggle_waypoint_link(b, a);
    }
}

impl<L: LevelSink> LevelSink for DungeonOutput<'_, L> {
    fn level_number(&self) -> u32 {
        self.level.level_number()
    }

    fn add_obstacle(&mut self, pos: HalfPos, kind: ObstacleKind) -> Result<(), MapgenError> {
        self.level.add_obstacle(pos, kind)?;
        self.obstacles_placed += 1;
        let furniture = matches!(
            kind,
            ObstacleKind::Barrel(_) | ObstacleKind::Chest { .. } | ObstacleKind::Helper(_)
        );
        if furniture && pos.x2 % 2 == 1 && pos.y2 % 2 == 1 {
            self.occupied.insert(Pos::new(pos.x2 / 2, pos.y2 / 2));
        }
        Ok(())
    }

    fn set_floor(&mut self, x: i32, y: i32, floor: FloorTile) {
        self.level.set_floor(x, y, floor);
    }

    fn create_waypoint(&mut self, x: i32, y: i32) -> WaypointId {
        let id = self.level.create_waypoint(x, y);
        if !self.waypoints.iter().any(|&(known, _)| known == id) {
            self.waypoints.push((id, Pos::new(x, y)));
        }
        id
    }

    fn toggle_waypoint_link(&mut self, from: WaypointId, to: WaypointId) {
        self.level.toggle_waypoint_link(from, to);
    }

    fn add_map_label(&mut self, x: i32, y: i32, name: String) {
        self.level.add_map_label(x, y, name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::GeneratedLevel;
    use crate::types::Orientation;

    #[test]
    fn output_tracks_waypoints_once_per_id() {
        let mut level = GeneratedLevel::new(0, 10, 10);
        let mut output = DungeonOutput::new(&mut level);
        let a = output.add_waypoint(Pos::new(2, 2));
        let again = output.add_waypoint(Pos::new(2, 2));
        let b = output.add_waypoint(Pos::new(3, 2));
        output.link_both_ways(a, b);

        assert_eq!(a, again);
        assert_eq!(output.waypoints(), &[(a, Pos::new(2, 2)), (b, Pos::new(3, 2))]);
        assert!(level.is_linked(a, b) && level.is_linked(b, a));
    }

    #[test]
    fn furniture_marks_its_cell_occupied() {
        let mut level = GeneratedLevel::new(0, 10, 10);
        let mut output = DungeonOutput::new(&mut level);
        output.add_obstacle(HalfPos::cell_center(4, 5), ObstacleKind::Barrel(1)).expect("barrel");
        let frame = ObstacleKind::DoorFrame(Orientation::Vertical);
        output.add_obstacle(HalfPos::from_halves(8, 11), frame).expect("frame");

        assert!(output.is_occupied(Pos::new(4, 5)));
        assert!(!output.is_occupied(Pos::new(4, 4)));
        assert_eq!(output.obstacles_placed(), 2);
    }
}
