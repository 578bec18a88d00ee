//! Structural checks over a finished layout, shared by tests and the fuzz tool.

use std::fmt;

use crate::config::GeneratorConfig;
use crate::types::{Pos, RoomId};

use super::graph::reachable_from;
use super::grid::Tile;
use super::model::DungeonLayout;

#[derive(Clone, Debug, PartialEq)]
pub enum Violation {
    RoomTooSmall { room: RoomId, area: u32 },
    RoomTooNarrow { room: RoomId, side: i32 },
    BadAspect { room: RoomId, ratio: f64 },
    Overlap { a: RoomId, b: RoomId },
    Unreachable { room: RoomId },
    StrayFloor { pos: Pos, owner: Option<RoomId> },
    DuplicateSpecial { room: RoomId },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::RoomTooSmall { room, area } => write!(f, "room {room} has area {area}"),
            Violation::RoomTooNarrow { room, side } => {
                write!(f, "room {room} has a side of {side}")
            }
            Violation::BadAspect { room, ratio } => {
                write!(f, "room {room} has aspect ratio {ratio:.2}")
            }
            Violation::Overlap { a, b } => write!(f, "rooms {a} and {b} overlap"),
            Violation::Unreachable { room } => write!(f, "room {room} is unreachable from room 0"),
            Violation::StrayFloor { pos, owner } => {
                write!(f, "floor at ({}, {}) is outside its owner {owner:?}", pos.x, pos.y)
            }
            Violation::DuplicateSpecial { room } => {
                write!(f, "room {room} is used by more than one special")
            }
        }
    }
}

pub fn validate_layout(layout: &DungeonLayout, config: &GeneratorConfig) -> Vec<Violation> {
    let mut violations = Vec::new();
    let rooms = &layout.rooms;

    for room in rooms.ids() {
        let rect = rooms.rect(room);
        if rect.area() < config.min_room_area {
            violations.push(Violation::RoomTooSmall { room, area: rect.area() });
        }
        let side = rect.w.min(rect.h);
        if side < config.min_room_side as i32 {
            violations.push(Violation::RoomTooNarrow { room, side });
        }
        // A single room is the uncut root: its shape is the map's, not a cut's.
        let ratio = rect.aspect_ratio();
        if rooms.len() > 1 && ratio > config.worst_room_ratio + f64::EPSILON {
            violations.push(Violation::BadAspect { room, ratio });
        }
        for other in (room + 1)..rooms.len() {
            if rect.intersects(&rooms.rect(other)) {
                violations.push(Violation::Overlap { a: room, b: other });
            }
        }
    }

    let reachable = reachable_from(rooms, 0);
    violations.extend(
        rooms.ids().filter(|&room| !reachable[room]).map(|room| Violation::Unreachable { room }),
    );

    for (pos, tile, owner) in layout.grid.cells() {
        if tile != Tile::Floor {
            continue;
        }
        let inside = owner.is_some_and(|room| room < rooms.len() && rooms.rect(room).contains(pos));
        if !inside {
            violations.push(Violation::StrayFloor { pos, owner });
        }
    }

    let mut specials: Vec<RoomId> = layout.specials.entrance.into_iter().collect();
    specials.extend(layout.specials.exits.iter().copied());
    specials.sort_unstable();
    for pair in specials.windows(2) {
        if pair[0] == pair[1] {
            violations.push(Violation::DuplicateSpecial { room: pair[0] });
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::grid::TileGrid;
    use crate::mapgen::rooms::{Rect, RoomTable};
    use crate::mapgen::specials::SpecialRooms;

    fn layout(rects: &[Rect]) -> DungeonLayout {
        let mut grid = TileGrid::new(40, 24);
        let mut rooms = RoomTable::new();
        for &rect in rects {
            let id = rooms.add(rect);
            grid.draw_room(id, rect);
        }
        DungeonLayout {
            width: 40,
            height: 24,
            grid,
            rooms,
            specials: SpecialRooms::default(),
            middle_room: None,
        }
    }

    #[test]
    fn connected_pair_is_clean() {
        let mut layout = layout(&[Rect::new(1, 1, 18, 22), Rect::new(20, 1, 19, 22)]);
        layout.rooms.link(0, 1);
        assert_eq!(validate_layout(&layout, &GeneratorConfig::default()), Vec::new());
    }

    #[test]
    fn reports_each_broken_rule() {
        let mut layout = layout(&[Rect::new(1, 1, 30, 4), Rect::new(10, 3, 8, 8)]);
        layout.specials = SpecialRooms { entrance: Some(1), exits: vec![1] };
        let violations = validate_layout(&layout, &GeneratorConfig::default());

        assert!(violations.contains(&Violation::Overlap { a: 0, b: 1 }));
        assert!(violations.contains(&Violation::Unreachable { room: 1 }));
        assert!(violations.contains(&Violation::RoomTooSmall { room: 1, area: 64 }));
        assert!(violations.contains(&Violation::DuplicateSpecial { room: 1 }));
        let has = |check: fn(&Violation) -> bool| violations.iter().any(check);
        assert!(has(|violation| matches!(violation, Violation::BadAspect { room: 0, .. })));
        // Room 1 was stamped last and took over every cell it covers.
        assert!(!has(|violation| matches!(violation, Violation::StrayFloor { .. })));
    }

    #[test]
    fn interior_ratio_above_the_bound_is_reported() {
        let mut layout = layout(&[Rect::new(1, 1, 18, 8), Rect::new(1, 10, 18, 9)]);
        layout.rooms.link(0, 1);
        let violations = validate_layout(&layout, &GeneratorConfig::default());
        assert_eq!(violations, vec![Violation::BadAspect { room: 0, ratio: 2.25 }]);
    }

    #[test]
    fn uncut_root_is_exempt_from_the_ratio() {
        let layout = layout(&[Rect::new(1, 1, 38, 10)]);
        assert_eq!(validate_layout(&layout, &GeneratorConfig::default()), Vec::new());
    }

    #[test]
    fn violations_render_readably() {
        let text = Violation::StrayFloor { pos: Pos::new(3, 4), owner: None }.to_string();
        assert_eq!(text, "floor at (3, 4) is outside its owner None");
    }
}
