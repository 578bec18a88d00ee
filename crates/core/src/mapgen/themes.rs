//! Per-room visual themes picked at the start of tile conversion.

use serde::{Deserialize, Serialize};

use crate::level::{FloorTile, WallGraphic};
use crate::rng::MapRng;
use crate::types::Direction;

use super::rooms::RoomTable;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Theme {
    #[default]
    Metal,
    Gray,
    Glass,
    Red,
    BrokenGlass,
    Green,
}

impl Theme {
    pub const ALL: [Theme; 6] =
        [Theme::Metal, Theme::Gray, Theme::Glass, Theme::Red, Theme::BrokenGlass, Theme::Green];

    /// Wall graphic for the edge of a floor cell facing `side`.
    pub fn wall(self, side: Direction) -> WallGraphic {
        use WallGraphic::*;

        let (west, north, east, south) = match self {
            Theme::Metal => (MetalV, MetalH, MetalV, MetalH),
            Theme::Gray => (GrayEndE, GrayEndS, GrayEndE, GrayEndS),
            Theme::Glass => (GlassV, GlassH, GlassV, GlassH),
            Theme::Red => (RedV, RedH, MetalV, MetalH),
            Theme::BrokenGlass => (BrokenGlassV, GlassH, GlassV, GlassH),
            Theme::Green => (GreenV, GreenH, MetalV, MetalH),
        };
        match side {
            Direction::Left => west,
            Direction::Up => north,
            Direction::Right => east,
            Direction::Down => south,
        }
    }

    pub fn floor(self) -> FloorTile {
        match self {
            Theme::Metal => FloorTile::MetalPlate,
            Theme::Gray => FloorTile::Stone,
            Theme::Glass | Theme::BrokenGlass => FloorTile::MiniSquare,
            Theme::Red => FloorTile::CarpetRed,
            Theme::Green => FloorTile::CarpetGreen,
        }
    }
}

pub(super) fn assign_themes(rooms: &mut RoomTable, rng: &mut MapRng) {
    for id in rooms.ids() {
        let theme = rng.pick(&Theme::ALL).unwrap_or_default();
        rooms.get_mut(id).theme = theme;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::mapgen::rooms::Rect;

    #[test]
    fn red_and_green_fall_back_to_metal_on_the_far_sides() {
        for theme in [Theme::Red, Theme::Green] {
            assert_eq!(theme.wall(Direction::Right), WallGraphic::MetalV);
            assert_eq!(theme.wall(Direction::Down), WallGraphic::MetalH);
        }
        assert_eq!(Theme::BrokenGlass.wall(Direction::Left), WallGraphic::BrokenGlassV);
        assert_eq!(Theme::BrokenGlass.floor(), Theme::Glass.floor());
    }

    #[test]
    fn assignment_covers_every_room_and_replays_per_seed() {
        let mut a = RoomTable::new();
        for x in 0..12 {
            a.add(Rect::new(x * 12 + 1, 1, 10, 10));
        }
        let mut b = a.clone();

        assign_themes(&mut a, &mut MapRng::new(5));
        assign_themes(&mut b, &mut MapRng::new(5));
        assert_eq!(a, b);

        let distinct: BTreeSet<Theme> = a.iter().map(|room| room.theme).collect();
        assert!(distinct.len() > 1);
    }
}
