//! Door candidates along a room's border.

use crate::mapgen::grid::{Tile, TileGrid};
use crate::mapgen::rooms::Rect;
use crate::types::{Direction, Pos, RoomId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct ConnectionPoint {
    /// Wall cell the door would replace.
    pub(super) pos: Pos,
    pub(super) direction: Direction,
    pub(super) neighbor: RoomId,
}

/// Scans all four walls of `room`. A wall cell qualifies when it is still a
/// plain wall and the cell beyond it, plus `margin` cells either side along
/// the wall, is floor belonging to another room.
pub(super) fn find_connection_points(
    grid: &TileGrid,
    room: RoomId,
    rect: Rect,
    margin: usize,
) -> Vec<ConnectionPoint> {
    let mut points = Vec::new();
    let margin_i = margin as i32;

    for i in margin_i..(rect.w - margin_i) {
        let x = rect.x + i;
        push_if_suitable(&mut points, grid, room, Pos::new(x, rect.y - 1), Direction::Up, margin_i);
        push_if_suitable(
            &mut points,
            grid,
            room,
            Pos::new(x, rect.y + rect.h),
            Direction::Down,
            margin_i,
        );
    }
    for i in margin_i..(rect.h - margin_i) {
        let y = rect.y + i;
        push_if_suitable(&mut points, grid, room, Pos::new(rect.x - 1, y), Direction::Left, margin_i);
        push_if_suitable(
            &mut points,
            grid,
            room,
            Pos::new(rect.x + rect.w, y),
            Direction::Right,
            margin_i,
        );
    }
    points
}

fn push_if_suitable(
    points: &mut Vec<ConnectionPoint>,
    grid: &TileGrid,
    room: RoomId,
    wall: Pos,
    direction: Direction,
    margin: i32,
) {
    if grid.tile_at(wall) != Tile::Wall {
        return;
    }
    let far = wall.step(direction);
    let Some(neighbor) = grid.room_at_pos(far) else {
        return;
    };
    if neighbor == room {
        return;
    }
    let (ax, ay) = direction.along();
    let clear = (-margin..=margin)
        .all(|k| grid.tile(far.x + k * ax, far.y + k * ay) == Tile::Floor);
    if clear {
        points.push(ConnectionPoint { pos: wall, direction, neighbor });
    }
}

/// Splits candidates into one group per neighbor, in first-seen order.
pub(super) fn group_by_neighbor(
    points: &[ConnectionPoint],
) -> Vec<(RoomId, Vec<ConnectionPoint>)> {
    let mut groups: Vec<(RoomId, Vec<ConnectionPoint>)> = Vec::new();
    for &point in points {
        match groups.iter_mut().find(|(neighbor, _)| *neighbor == point.neighbor) {
            Some((_, group)) => group.push(point),
            None => groups.push((point.neighbor, vec![point])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two rooms stacked vertically, sharing the wall row y = 9.
    fn stacked() -> (TileGrid, Rect, Rect) {
        let mut grid = TileGrid::new(20, 20);
        let top = Rect::new(1, 1, 18, 8);
        let bottom = Rect::new(1, 10, 18, 9);
        grid.draw_room(1, bottom);
        grid.draw_room(0, top);
        (grid, top, bottom)
    }

    #[test]
    fn finds_points_only_on_the_shared_wall() {
        let (grid, top, _) = stacked();
        let points = find_connection_points(&grid, 0, top, 0);
        assert_eq!(points.len(), 18);
        assert!(points.iter().all(|point| point.direction == Direction::Down));
        assert!(points.iter().all(|point| point.pos.y == 9 && point.neighbor == 1));
    }

    #[test]
    fn margin_trims_the_corners_of_the_run() {
        let (grid, top, bottom) = stacked();
        let points = find_connection_points(&grid, 0, top, 1);
        assert_eq!(points.len(), 16);
        assert_eq!(points.first().map(|point| point.pos), Some(Pos::new(2, 9)));

        let from_below = find_connection_points(&grid, 1, bottom, 3);
        assert_eq!(from_below.len(), 12);
        assert!(from_below.iter().all(|point| point.direction == Direction::Up));
    }

    #[test]
    fn punched_walls_stop_being_candidates() {
        let (mut grid, top, _) = stacked();
        grid.put_tile(5, 9, Tile::DoorH, Some(0));
        let points = find_connection_points(&grid, 0, top, 0);
        assert_eq!(points.len(), 17);
        assert!(points.iter().all(|point| point.pos != Pos::new(5, 9)));
    }

    #[test]
    fn grouping_keeps_first_seen_order() {
        let point = |x, neighbor| ConnectionPoint {
            pos: Pos::new(x, 0),
            direction: Direction::Up,
            neighbor,
        };
        let points = [point(1, 4), point(2, 2), point(3, 4)];
        let groups = group_by_neighbor(&points);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, 4);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1], (2, vec![point(2, 2)]));
    }
}
