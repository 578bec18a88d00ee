//! The level the generator writes into.
//!
//! Generation only ever talks to a level through [`LevelSink`]; the game's own
//! level store implements it, and [`GeneratedLevel`] is the in-memory version
//! used by the tools and tests.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::error::MapgenError;
use crate::types::{Direction, DoorStyle, Orientation, Pos};

pub const DEFAULT_OBSTACLE_CAPACITY: usize = 4000;

pub type WaypointId = usize;

/// Obstacle coordinate at half-tile resolution, stored doubled so it stays exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HalfPos {
    pub x2: i32,
    pub y2: i32,
}

impl HalfPos {
    pub fn from_halves(x2: i32, y2: i32) -> Self {
        Self { x2, y2 }
    }

    pub fn cell_center(x: i32, y: i32) -> Self {
        Self { x2: 2 * x + 1, y2: 2 * y + 1 }
    }

    pub fn x(self) -> f32 {
        self.x2 as f32 / 2.0
    }

    pub fn y(self) -> f32 {
        self.y2 as f32 / 2.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Portal {
    Cloud,
    LadderDown,
    LadderUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallGraphic {
    MetalH,
    MetalV,
    GrayEndS,
    GrayEndE,
    GlassH,
    GlassV,
    BrokenGlassV,
    RedH,
    RedV,
    GreenH,
    GreenV,
}

/// Decoration dropped on the diagonals around a cloud portal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortalHelper {
    DroidNest,
    EnhancerRightUp,
    EnhancerLeftUp,
    EnhancerRightDown,
    EnhancerLeftDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Wall(WallGraphic),
    Door { orientation: Orientation, style: DoorStyle },
    DoorFrame(Orientation),
    Entrance(Portal),
    Exit(Portal),
    Helper(PortalHelper),
    Chest { facing: Direction },
    Barrel(u8),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloorTile {
    #[default]
    Void,
    Rubble,
    Plain,
    MetalPlate,
    Stone,
    MiniSquare,
    CarpetRed,
    CarpetGreen,
    Marker(u16),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: HalfPos,
    pub kind: ObstacleKind,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    pub pos: Pos,
    pub links: Vec<WaypointId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapLabel {
    pub pos: Pos,
    pub name: String,
}

pub trait LevelSink {
    fn level_number(&self) -> u32;

    fn add_obstacle(&mut self, pos: HalfPos, kind: ObstacleKind) -> Result<(), MapgenError>;

    fn set_floor(&mut self, x: i32, y: i32, floor: FloorTile);

    /// Returns the id of the waypoint already standing at `(x, y)` if there is one.
    fn create_waypoint(&mut self, x: i32, y: i32) -> WaypointId;

    /// Toggles the directed link `from -> to`.
    fn toggle_waypoint_link(&mut self, from: WaypointId, to: WaypointId);

    fn add_map_label(&mut self, x: i32, y: i32, name: String);
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedLevel {
    pub level_number: u32,
    pub width: usize,
    pub height: usize,
    pub obstacle_capacity: usize,
    pub obstacles: Vec<Obstacle>,
    pub floor: Vec<FloorTile>,
    pub waypoints: Vec<Waypoint>,
    pub labels: Vec<MapLabel>,
}

impl GeneratedLevel {
    pub fn new(level_number: u32, width: usize, height: usize) -> Self {
        Self::with_obstacle_capacity(level_number, width, height, DEFAULT_OBSTACLE_CAPACITY)
    }

    pub fn with_obstacle_capacity(
        level_number: u32,
        width: usize,
        height: usize,
        obstacle_capacity: usize,
    ) -> Self {
        Self {
            level_number,
            width,
            height,
            obstacle_capacity,
            obstacles: Vec::new(),
            floor: vec![FloorTile::Void; width * height],
            waypoints: Vec::new(),
            labels: Vec::new(),
        }
    }

    pub fn floor_at(&self, x: i32, y: i32) -> FloorTile {
        self.index(x, y).map_or(FloorTile::Void, |index| self.floor[index])
    }

    pub fn waypoint_at(&self, pos: Pos) -> Option<WaypointId> {
        self.waypoints.iter().position(|waypoint| waypoint.pos == pos)
    }

    pub fn is_linked(&self, from: WaypointId, to: WaypointId) -> bool {
        self.waypoints.get(from).is_some_and(|waypoint| waypoint.links.contains(&to))
    }

    pub fn count_obstacles(&self, predicate: impl Fn(&ObstacleKind) -> bool) -> usize {
        self.obstacles.iter().filter(|obstacle| predicate(&obstacle.kind)).count()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend(self.level_number.to_le_bytes());
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());

        bytes.extend((self.obstacles.len() as u32).to_le_bytes());
        for obstacle in &self.obstacles {
            bytes.extend(obstacle.pos.x2.to_le_bytes());
            bytes.extend(obstacle.pos.y2.to_le_bytes());
            bytes.extend(format!("{:?}", obstacle.kind).bytes());
            bytes.push(0);
        }
        for floor in &self.floor {
            bytes.extend(format!("{floor:?}").bytes());
            bytes.push(0);
        }

        bytes.extend((self.waypoints.len() as u32).to_le_bytes());
        for waypoint in &self.waypoints {
            bytes.extend(waypoint.pos.y.to_le_bytes());
            bytes.extend(waypoint.pos.x.to_le_bytes());
            bytes.extend((waypoint.links.len() as u32).to_le_bytes());
            for &link in &waypoint.links {
                bytes.extend((link as u32).to_le_bytes());
            }
        }

        for label in &self.labels {
            bytes.extend(label.pos.y.to_le_bytes());
            bytes.extend(label.pos.x.to_le_bytes());
            bytes.extend(label.name.bytes());
            bytes.push(0);
        }
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }
}

impl LevelSink for GeneratedLevel {
    fn level_number(&self) -> u32 {
        self.level_number
    }

    fn add_obstacle(&mut self, pos: HalfPos, kind: ObstacleKind) -> Result<(), MapgenError> {
        if self.obstacles.len() >= self.obstacle_capacity {
            return Err(MapgenError::ObstacleCapacityExceeded { capacity: self.obstacle_capacity });
        }
        self.obstacles.push(Obstacle { pos, kind });
        Ok(())
    }

    fn set_floor(&mut self, x: i32, y: i32, floor: FloorTile) {
        if let Some(index) = self.index(x, y) {
            self.floor[index] = floor;
        }
    }

    fn create_waypoint(&mut self, x: i32, y: i32) -> WaypointId {
        let pos = Pos::new(x, y);
        if let Some(existing) = self.waypoint_at(pos) {
            return existing;
        }
        self.waypoints.push(Waypoint { pos, links: Vec::new() });
        self.waypoints.len() - 1
    }

    fn toggle_waypoint_link(&mut self, from: WaypointId, to: WaypointId) {
        if from == to || to >= self.waypoints.len() {
            return;
        }
        let Some(waypoint) = self.waypoints.get_mut(from) else {
            return;
        };
        if let Some(position) = waypoint.links.iter().position(|&link| link == to) {
            waypoint.links.remove(position);
        } else {
            waypoint.links.push(to);
        }
    }

    fn add_map_label(&mut self, x: i32, y: i32, name: String) {
        self.labels.push(MapLabel { pos: Pos::new(x, y), name });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obstacle_capacity_is_enforced() {
        let mut level = GeneratedLevel::with_obstacle_capacity(0, 4, 4, 2);
        let kind = ObstacleKind::Barrel(0);
        level.add_obstacle(HalfPos::cell_center(1, 1), kind).expect("first");
        level.add_obstacle(HalfPos::cell_center(2, 1), kind).expect("second");
        assert_eq!(
            level.add_obstacle(HalfPos::cell_center(3, 1), kind),
            Err(MapgenError::ObstacleCapacityExceeded { capacity: 2 })
        );
        assert_eq!(level.obstacles.len(), 2);
    }

    #[test]
    fn create_waypoint_reuses_existing_position() {
        let mut level = GeneratedLevel::new(0, 8, 8);
        let first = level.create_waypoint(3, 4);
        let second = level.create_waypoint(5, 4);
        assert_ne!(first, second);
        assert_eq!(level.create_waypoint(3, 4), first);
        assert_eq!(level.waypoints.len(), 2);
    }

    #[test]
    fn toggling_twice_removes_the_link() {
        let mut level = GeneratedLevel::new(0, 8, 8);
        let a = level.create_waypoint(1, 1);
        let b = level.create_waypoint(2, 2);
        level.toggle_waypoint_link(a, b);
        assert!(level.is_linked(a, b));
        assert!(!level.is_linked(b, a));
        level.toggle_waypoint_link(a, b);
        assert!(!level.is_linked(a, b));
        level.toggle_waypoint_link(a, a);
        assert!(level.waypoints[a].links.is_empty());
    }

    #[test]
    fn floor_writes_outside_the_level_are_ignored() {
        let mut level = GeneratedLevel::new(0, 3, 3);
        level.set_floor(-1, 0, FloorTile::Plain);
        level.set_floor(3, 0, FloorTile::Plain);
        level.set_floor(1, 1, FloorTile::Stone);
        assert_eq!(level.floor_at(1, 1), FloorTile::Stone);
        assert_eq!(level.floor_at(-1, 0), FloorTile::Void);
        assert_eq!(level.floor.iter().filter(|&&tile| tile != FloorTile::Void).count(), 1);
    }

    #[test]
    fn half_positions_convert_to_tile_units() {
        let pos = HalfPos::cell_center(2, 5);
        assert_eq!((pos.x(), pos.y()), (2.5, 5.5));
        assert_eq!(HalfPos::from_halves(4, 7).y(), 3.5);
    }

    #[test]
    fn fingerprint_tracks_content() {
        let mut a = GeneratedLevel::new(3, 4, 4);
        let b = a.clone();
        assert_eq!(a.fingerprint(), b.fingerprint());
        a.add_map_label(1, 1, "3toX0".to_owned());
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
