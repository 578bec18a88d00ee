//! Furniture for ordinary rooms: barrel armories in dead ends, one chest
//! everywhere else.

use tracing::debug;

use crate::error::MapgenError;
use crate::level::{HalfPos, LevelSink, ObstacleKind};
use crate::types::{Direction, Pos, RoomId};

use super::context::GenerationContext;
use super::grid::Tile;
use super::rooms::Rect;
use super::specials::SpecialRooms;

pub(super) fn furnish_rooms<L: LevelSink>(
    context: &mut GenerationContext<'_, L>,
    specials: &SpecialRooms,
) -> Result<(), MapgenError> {
    let mut armories = 0;
    for room in context.rooms.ids() {
        if specials.contains(room) {
            continue;
        }
        if context.rooms.distinct_neighbors(room).len() == 1 {
            fill_armory(context, room)?;
            armories += 1;
        } else {
            place_gift(context, room)?;
        }
    }
    debug!(armories, obstacles = context.output.obstacles_placed(), "furnished rooms");
    Ok(())
}

/// Two rows of barrels along both long walls.
fn fill_armory<L: LevelSink>(
    context: &mut GenerationContext<'_, L>,
    room: RoomId,
) -> Result<(), MapgenError> {
    let rect = context.rooms.rect(room);
    let chance = context.config.armory_chance_percent;
    let along_width = rect.w > rect.h;
    let (length, near, far) = if along_width {
        (rect.w, Direction::Up, Direction::Down)
    } else {
        (rect.h, Direction::Left, Direction::Right)
    };

    for row in 0..2 {
        for offset in 1..length - 1 {
            for wall in [near, far] {
                let cell = row_cell(rect, wall, row, offset);
                let behind = wall_cell(rect, wall, offset);
                if context.grid.tile_at(behind) == Tile::Wall && context.rng.percent(chance) {
                    let barrel = ObstacleKind::Barrel(context.rng.below(3) as u8);
                    context.output.add_obstacle(HalfPos::cell_center(cell.x, cell.y), barrel)?;
                }
            }
        }
    }
    Ok(())
}

/// Cell `row` steps in from the wall on `side`, `offset` cells along it.
fn row_cell(rect: Rect, side: Direction, row: i32, offset: i32) -> Pos {
    match side {
        Direction::Up => Pos::new(rect.x + offset, rect.y + row),
        Direction::Down => Pos::new(rect.x + offset, rect.bottom() - row),
        Direction::Left => Pos::new(rect.x + row, rect.y + offset),
        Direction::Right => Pos::new(rect.right() - row, rect.y + offset),
    }
}

fn wall_cell(rect: Rect, side: Direction, offset: i32) -> Pos {
    row_cell(rect, side, 0, offset).step(side)
}

/// One chest against a random wall, facing into the room.
fn place_gift<L: LevelSink>(
    context: &mut GenerationContext<'_, L>,
    room: RoomId,
) -> Result<(), MapgenError> {
    let rect = context.rooms.rect(room);
    let center = rect.center();
    let side = Direction::ALL[context.rng.below(Direction::ALL.len())];
    let cell = match side {
        Direction::Up | Direction::Down => row_cell(rect, side, 0, center.x - rect.x),
        Direction::Left | Direction::Right => row_cell(rect, side, 0, center.y - rect.y),
    };
    if context.grid.tile_at(cell.step(side)) != Tile::Wall {
        return Ok(());
    }
    let kind = ObstacleKind::Chest { facing: side.opposite() };
    context.output.add_obstacle(HalfPos::cell_center(cell.x, cell.y), kind)
}
