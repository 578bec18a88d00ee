//! Door punching and room-graph connectivity.
//!
//! Bulldozers wander from room to room punching doors until they bump into a
//! room that is already adjacent. A repair pass then links every room left
//! outside room 0's component, so the graph always ends up connected.

mod fusion;
mod points;

use tracing::{debug, trace};

use crate::error::MapgenError;
use crate::level::LevelSink;
use crate::types::{DoorStyle, Pos, RoomId};

use super::context::GenerationContext;
use super::graph::reachable_from;
use super::grid::Tile;
use super::rooms::{Door, Rect};

use points::{ConnectionPoint, find_connection_points, group_by_neighbor};

/// Door waypoints sit this many cells along the wall from the doorway.
const DOOR_WAYPOINT_SHIFT: i32 = 2;

pub(super) fn connect_rooms<L: LevelSink>(
    context: &mut GenerationContext<'_, L>,
) -> Result<(), MapgenError> {
    run_bulldozers(context);
    let repaired = repair_connectivity(context)?;
    debug!(
        rooms = context.rooms.len(),
        doors = context.rooms.door_count(),
        repaired,
        "connected room graph"
    );
    Ok(())
}

fn candidates<L: LevelSink>(
    context: &GenerationContext<'_, L>,
    room: RoomId,
    margin: usize,
) -> Vec<ConnectionPoint> {
    find_connection_points(&context.grid, room, context.rooms.rect(room), margin)
}

/// Starts a traversal from every room no earlier traversal passed through.
fn run_bulldozers<L: LevelSink>(context: &mut GenerationContext<'_, L>) {
    let mut visited = vec![false; context.rooms.len()];
    for start in context.rooms.ids() {
        if visited[start] {
            continue;
        }
        let mut current = start;
        loop {
            visited[current] = true;
            let points = candidates(context, current, context.config.door_margin);
            let Some(point) = context.rng.pick(&points) else {
                break;
            };
            if context.rooms.are_connected(current, point.neighbor) {
                break;
            }
            connect(context, current, &point);
            current = point.neighbor;
        }
    }
}

/// Links rooms outside room 0's component until there are none left.
/// Returns how many links it had to add.
fn repair_connectivity<L: LevelSink>(
    context: &mut GenerationContext<'_, L>,
) -> Result<usize, MapgenError> {
    let mut margins = vec![context.config.door_margin];
    if context.config.door_margin > 0 {
        margins.push(0);
    }

    let mut repaired = 0;
    loop {
        let reachable = reachable_from(&context.rooms, 0);
        let unreachable: Vec<RoomId> =
            context.rooms.ids().filter(|&room| !reachable[room]).collect();
        if unreachable.is_empty() {
            return Ok(repaired);
        }

        let linked = margins
            .iter()
            .any(|&margin| link_one_to_component(context, &unreachable, &reachable, margin));
        if !linked {
            return Err(MapgenError::Disconnected { unreachable: unreachable.len() });
        }
        repaired += 1;
    }
}

fn link_one_to_component<L: LevelSink>(
    context: &mut GenerationContext<'_, L>,
    unreachable: &[RoomId],
    reachable: &[bool],
    margin: usize,
) -> bool {
    for &room in unreachable {
        let points = candidates(context, room, margin);
        for (neighbor, group) in group_by_neighbor(&points) {
            if !reachable[neighbor] {
                continue;
            }
            let Some(point) = context.rng.pick(&group) else {
                continue;
            };
            trace!("repair links room {room} to room {neighbor} with margin {margin}");
            connect(context, room, &point);
            return true;
        }
    }
    false
}

fn connect<L: LevelSink>(
    context: &mut GenerationContext<'_, L>,
    room: RoomId,
    point: &ConnectionPoint,
) {
    punch_door(context, room, point);
    if fusion::spans_differ(&context.rooms, room, point)
        && context.rng.percent(context.config.fusion_chance_percent)
    {
        let min_run = context.config.fusion_min_run;
        fusion::fuse(&mut context.grid, &mut context.rooms, room, point, min_run);
    }
}

/// Replaces the wall cell with a door owned by `room`, links both rooms and
/// drops a linked waypoint pair on either side of the door, shifted along the
/// wall so it stays out of the doorway.
fn punch_door<L: LevelSink>(
    context: &mut GenerationContext<'_, L>,
    room: RoomId,
    point: &ConnectionPoint,
) {
    let tile = if point.direction.is_vertical() { Tile::DoorH } else { Tile::DoorV };
    context.grid.put_tile(point.pos.x, point.pos.y, tile, Some(room));
    context.rooms.link(room, point.neighbor);

    let style = if context.rng.coin() { DoorStyle::Sliding } else { DoorStyle::Swing };
    context.rooms.get_mut(room).doors.push(Door {
        pos: point.pos,
        direction: point.direction,
        to: point.neighbor,
        style,
        internal: false,
    });

    let (near, far) = door_waypoints(
        point,
        context.rooms.rect(room),
        context.rooms.rect(point.neighbor),
    );
    let near = context.output.add_waypoint(near);
    let far = context.output.add_waypoint(far);
    context.output.link_both_ways(near, far);
    trace!("door {:?} at {:?} between rooms {room} and {}", style, point.pos, point.neighbor);
}

/// Cells either side of the door, moved back along the wall. A side whose
/// room would not contain the shifted cell keeps its unshifted one.
fn door_waypoints(point: &ConnectionPoint, near_room: Rect, far_room: Rect) -> (Pos, Pos) {
    let (ax, ay) = point.direction.along();
    let shift = |pos: Pos, rect: Rect| {
        let shifted =
            Pos::new(pos.x - DOOR_WAYPOINT_SHIFT * ax, pos.y - DOOR_WAYPOINT_SHIFT * ay);
        if rect.contains(shifted) { shifted } else { pos }
    };
    (
        shift(point.pos.back(point.direction), near_room),
        shift(point.pos.step(point.direction), far_room),
    )
}
