//! Room rectangles and the room table built up by partitioning.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::types::{Direction, DoorStyle, Pos, RoomId};

use super::themes::Theme;

/// Interior floor area of a room. The one-tile wall border is implicit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(self) -> i32 {
        self.x + self.w - 1
    }

    pub fn bottom(self) -> i32 {
        self.y + self.h - 1
    }

    pub fn area(self) -> u32 {
        (self.w.max(0) as u32) * (self.h.max(0) as u32)
    }

    pub fn center(self) -> Pos {
        Pos::new(self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= self.x && pos.x <= self.right() && pos.y >= self.y && pos.y <= self.bottom()
    }

    pub fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    pub fn expanded(self, margin: i32) -> Self {
        Self { x: self.x - margin, y: self.y - margin, w: self.w + 2 * margin, h: self.h + 2 * margin }
    }

    /// Long side over short side of the interior.
    pub fn aspect_ratio(self) -> f64 {
        let (a, b) = (f64::from(self.w), f64::from(self.h));
        a.max(b) / a.min(b)
    }

    /// Interior side length running along a wall crossed in `direction`.
    pub fn side_along(self, direction: Direction) -> i32 {
        if direction.is_vertical() { self.w } else { self.h }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Door {
    pub pos: Pos,
    pub direction: Direction,
    pub to: RoomId,
    pub style: DoorStyle,
    /// Set when the door ended up on a fused wall run.
    pub internal: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub rect: Rect,
    /// One entry per punched door, so the same neighbor may repeat.
    pub neighbors: Vec<RoomId>,
    pub doors: Vec<Door>,
    pub theme: Theme,
}

impl Room {
    fn new(rect: Rect) -> Self {
        Self { rect, neighbors: Vec::new(), doors: Vec::new(), theme: Theme::default() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomTable {
    rooms: Vec<Room>,
}

impl RoomTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, rect: Rect) -> RoomId {
        self.rooms.push(Room::new(rect));
        self.rooms.len() - 1
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn get(&self, id: RoomId) -> &Room {
        &self.rooms[id]
    }

    pub fn get_mut(&mut self, id: RoomId) -> &mut Room {
        &mut self.rooms[id]
    }

    pub fn rect(&self, id: RoomId) -> Rect {
        self.rooms[id].rect
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn ids(&self) -> Range<RoomId> {
        0..self.rooms.len()
    }

    /// Records a symmetric adjacency. Repeated links are kept.
    pub fn link(&mut self, a: RoomId, b: RoomId) {
        self.rooms[a].neighbors.push(b);
        self.rooms[b].neighbors.push(a);
    }

    pub fn are_connected(&self, a: RoomId, b: RoomId) -> bool {
        self.rooms[a].neighbors.contains(&b)
    }

    pub fn distinct_neighbors(&self, id: RoomId) -> Vec<RoomId> {
        let mut neighbors = self.rooms[id].neighbors.clone();
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }

    pub fn door_at(&self, pos: Pos) -> Option<&Door> {
        self.rooms.iter().flat_map(|room| room.doors.iter()).find(|door| door.pos == pos)
    }

    pub fn door_at_mut(&mut self, pos: Pos) -> Option<&mut Door> {
        self.rooms.iter_mut().flat_map(|room| room.doors.iter_mut()).find(|door| door.pos == pos)
    }

    pub fn door_count(&self) -> usize {
        self.rooms.iter().map(|room| room.doors.len()).sum()
    }
}
