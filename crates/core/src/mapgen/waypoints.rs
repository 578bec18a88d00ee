//! Random patrol waypoints inside every room, wired into a loose mesh.

use tracing::debug;

use crate::level::{LevelSink, WaypointId};
use crate::types::Pos;

use super::context::GenerationContext;
use super::rooms::Rect;

/// Blocked draws a room may redo before it starts dropping waypoints.
const PLACEMENT_RETRIES: usize = 15;

/// Waypoints a room of this size receives.
pub(super) fn waypoint_count(rect: Rect, divisor: u32) -> usize {
    let root = f64::from(rect.area()).sqrt().floor() as i64;
    let count = root / i64::from(divisor.max(1)) - 1;
    count.max(0) as usize
}

pub(super) fn place_waypoints<L: LevelSink>(context: &mut GenerationContext<'_, L>) {
    let divisor = context.config.waypoint_divisor;
    for room in context.rooms.ids() {
        let rect = context.rooms.rect(room);
        let mut remaining = waypoint_count(rect, divisor);
        let mut retries = PLACEMENT_RETRIES;
        while remaining > 0 {
            let x = rect.x + context.rng.below(rect.w as usize) as i32;
            let y = rect.y + context.rng.below(rect.h as usize) as i32;
            let pos = Pos::new(x, y);
            if context.output.is_occupied(pos) {
                match retries.checked_sub(1) {
                    Some(left) => retries = left,
                    None => remaining -= 1,
                }
                continue;
            }
            context.output.add_waypoint(pos);
            remaining -= 1;
        }
    }
    debug!(waypoints = context.output.waypoints().len(), "placed waypoints");
}

/// Links every waypoint of a room, door waypoints included, to a random
/// other waypoint of the same room in both directions.
pub(super) fn connect_waypoints<L: LevelSink>(context: &mut GenerationContext<'_, L>) {
    let limit = context.config.max_room_waypoints;
    for room in context.rooms.ids() {
        let area = context.rooms.rect(room).expanded(1);
        let members: Vec<WaypointId> = context
            .output
            .waypoints()
            .iter()
            .filter(|&&(_, pos)| area.contains(pos))
            .map(|&(id, _)| id)
            .take(limit)
            .collect();
        if members.len() < 2 {
            continue;
        }
        for i in (0..members.len()).rev() {
            let mut j = context.rng.below(members.len() - 1);
            if j >= i {
                j += 1;
            }
            context.output.link_both_ways(members[i], members[j]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::level::{GeneratedLevel, HalfPos, ObstacleKind};
    use crate::rng::MapRng;

    #[test]
    fn count_follows_the_square_root_rule() {
        assert_eq!(waypoint_count(Rect::new(1, 1, 10, 10), 3), 2);
        assert_eq!(waypoint_count(Rect::new(1, 1, 6, 6), 3), 1);
        assert_eq!(waypoint_count(Rect::new(1, 1, 4, 4), 3), 0);
        assert_eq!(waypoint_count(Rect::new(1, 1, 30, 30), 3), 9);
    }

    #[test]
    fn waypoints_land_inside_their_room_and_avoid_furniture() {
        let config = GeneratorConfig::default();
        let mut rng = MapRng::new(4);
        let mut level = GeneratedLevel::new(0, 34, 34);
        let mut context = GenerationContext::new(&config, &mut rng, &mut level, 34, 34);
        let rect = Rect::new(1, 1, 32, 32);
        context.rooms.add(rect);
        let barrel = ObstacleKind::Barrel(0);
        context.output.add_obstacle(HalfPos::cell_center(5, 5), barrel).expect("barrel");

        place_waypoints(&mut context);
        let placed = context.output.waypoints();
        assert!(!placed.is_empty() && placed.len() <= 9);
        assert!(placed.iter().all(|&(_, pos)| rect.contains(pos) && pos != Pos::new(5, 5)));
    }

    #[test]
    fn room_links_are_symmetric() {
        let config = GeneratorConfig::default();
        let mut rng = MapRng::new(10);
        let mut level = GeneratedLevel::new(0, 34, 34);
        {
            let mut context = GenerationContext::new(&config, &mut rng, &mut level, 34, 34);
            context.rooms.add(Rect::new(1, 1, 32, 32));
            for x in [3, 9, 15, 21, 27] {
                context.output.add_waypoint(Pos::new(x, 4));
            }
            // Door waypoint on the wall line still counts for the room.
            context.output.add_waypoint(Pos::new(0, 10));
            connect_waypoints(&mut context);
        }

        assert_eq!(level.waypoints.len(), 6);
        for (id, waypoint) in level.waypoints.iter().enumerate() {
            assert!(!waypoint.links.contains(&id));
            for &other in &waypoint.links {
                assert!(level.is_linked(other, id), "{id} -> {other} is one-way");
            }
        }
    }

    #[test]
    fn a_lone_waypoint_stays_unlinked() {
        let config = GeneratorConfig::default();
        let mut rng = MapRng::new(10);
        let mut level = GeneratedLevel::new(0, 12, 12);
        {
            let mut context = GenerationContext::new(&config, &mut rng, &mut level, 12, 12);
            context.rooms.add(Rect::new(1, 1, 10, 10));
            context.output.add_waypoint(Pos::new(4, 4));
            connect_waypoints(&mut context);
        }
        assert!(level.waypoints[0].links.is_empty());
    }
}
