//! Snapshot of one generation run handed back to the caller.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::RoomId;

use super::grid::TileGrid;
use super::rooms::RoomTable;
use super::specials::SpecialRooms;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DungeonLayout {
    pub width: usize,
    pub height: usize,
    pub grid: TileGrid,
    pub rooms: RoomTable,
    pub specials: SpecialRooms,
    /// Room with the smallest eccentricity in the room graph.
    pub middle_room: Option<RoomId>,
}

impl DungeonLayout {
    pub fn entrance(&self) -> Option<RoomId> {
        self.specials.entrance
    }

    pub fn exits(&self) -> &[RoomId] {
        &self.specials.exits
    }

    pub fn door_count(&self) -> usize {
        self.rooms.door_count()
    }

    pub fn render(&self) -> String {
        self.grid.render()
    }

    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = self.grid.canonical_bytes();

        bytes.extend((self.rooms.len() as u32).to_le_bytes());
        for room in self.rooms.iter() {
            for value in [room.rect.x, room.rect.y, room.rect.w, room.rect.h] {
                bytes.extend(value.to_le_bytes());
            }
            bytes.push(room.theme as u8);
            bytes.extend((room.neighbors.len() as u32).to_le_bytes());
            for &neighbor in &room.neighbors {
                bytes.extend((neighbor as u32).to_le_bytes());
            }
            for door in &room.doors {
                bytes.extend(door.pos.y.to_le_bytes());
                bytes.extend(door.pos.x.to_le_bytes());
                bytes.push(door.direction as u8);
                bytes.push(door.style as u8);
                bytes.push(u8::from(door.internal));
            }
        }

        let encode = |room: Option<RoomId>| room.map_or(u32::MAX, |room| room as u32).to_le_bytes();
        bytes.extend(encode(self.specials.entrance));
        bytes.extend((self.specials.exits.len() as u32).to_le_bytes());
        for &exit in &self.specials.exits {
            bytes.extend(encode(Some(exit)));
        }
        bytes.extend(encode(self.middle_room));
        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}
