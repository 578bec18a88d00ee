//! Knocking out the whole wall run between two freshly connected rooms.

use tracing::trace;

use crate::mapgen::grid::{Tile, TileGrid};
use crate::mapgen::rooms::RoomTable;
use crate::types::{Pos, RoomId};

use super::points::ConnectionPoint;

/// Fusion is only attempted between rooms whose spans along the shared wall differ.
pub(super) fn spans_differ(rooms: &RoomTable, room: RoomId, point: &ConnectionPoint) -> bool {
    let (a, b) = (rooms.rect(room), rooms.rect(point.neighbor));
    if point.direction.is_vertical() {
        a.x != b.x || a.w != b.w
    } else {
        a.y != b.y || a.h != b.h
    }
}

/// Wall cells between `room` and the neighbor behind `point` that still
/// separate the two, door included.
pub(super) fn shared_run(
    rooms: &RoomTable,
    grid: &TileGrid,
    room: RoomId,
    point: &ConnectionPoint,
) -> Vec<Pos> {
    let (a, b) = (rooms.rect(room), rooms.rect(point.neighbor));
    let cells: Vec<Pos> = if point.direction.is_vertical() {
        (a.x.max(b.x)..=a.right().min(b.right())).map(|x| Pos::new(x, point.pos.y)).collect()
    } else {
        (a.y.max(b.y)..=a.bottom().min(b.bottom())).map(|y| Pos::new(point.pos.x, y)).collect()
    };
    cells
        .into_iter()
        .filter(|&pos| matches!(grid.tile_at(pos), Tile::Wall | Tile::DoorH | Tile::DoorV))
        .collect()
}

/// Turns the shared run into partition cells. Returns whether anything changed.
pub(super) fn fuse(
    grid: &mut TileGrid,
    rooms: &mut RoomTable,
    room: RoomId,
    point: &ConnectionPoint,
    min_run: usize,
) -> bool {
    let run = shared_run(rooms, grid, room, point);
    if run.len() < min_run {
        return false;
    }

    // The freed cells go to the room whose whole side was opened up.
    let owner = if run.len() as i32 == rooms.rect(room).side_along(point.direction) {
        room
    } else {
        point.neighbor
    };

    for &pos in &run {
        let tile = grid.tile_at(pos);
        let door_owner = grid.room_at_pos(pos);
        let internal_door = match tile {
            Tile::DoorH => Some(Tile::DoorH2),
            Tile::DoorV => Some(Tile::DoorV2),
            _ => None,
        };
        match internal_door {
            Some(door) => {
                grid.put_tile(pos.x, pos.y, door, door_owner);
                if let Some(record) = rooms.door_at_mut(pos) {
                    record.internal = true;
                }
            }
            None => grid.put_tile(pos.x, pos.y, Tile::Partition, Some(owner)),
        }
    }

    trace!("fused {} wall cells between rooms {room} and {}", run.len(), point.neighbor);
    true
}
