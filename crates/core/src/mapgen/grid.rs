//! Abstract tile grid: one cell code plus an owning room per cell.

use serde::{Deserialize, Serialize};

use crate::types::{Direction, Pos, RoomId};

use super::rooms::Rect;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Empty,
    Floor,
    Wall,
    WallN,
    WallS,
    WallE,
    WallW,
    WallNE,
    WallNW,
    WallSE,
    WallSW,
    DoorH,
    DoorV,
    /// Door left standing on a fused wall run.
    DoorH2,
    DoorV2,
    /// Wall cell removed by fusion. Walkable.
    Partition,
    /// Pre-placed decoration code copied to the floor layer untouched.
    Marker(u16),
}

impl Tile {
    pub fn is_door(self) -> bool {
        matches!(self, Tile::DoorH | Tile::DoorV | Tile::DoorH2 | Tile::DoorV2)
    }

    pub fn is_walkable(self) -> bool {
        matches!(self, Tile::Floor | Tile::Partition) || self.is_door()
    }

    /// Edges carrying a wall for the directional wall codes.
    pub fn wall_edges(self) -> &'static [Direction] {
        match self {
            Tile::WallN => &[Direction::Up],
            Tile::WallS => &[Direction::Down],
            Tile::WallE => &[Direction::Right],
            Tile::WallW => &[Direction::Left],
            Tile::WallNE => &[Direction::Up, Direction::Right],
            Tile::WallNW => &[Direction::Up, Direction::Left],
            Tile::WallSE => &[Direction::Down, Direction::Right],
            Tile::WallSW => &[Direction::Down, Direction::Left],
            _ => &[],
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Tile::Empty => ' ',
            Tile::Floor => '.',
            Tile::Wall => '#',
            Tile::DoorH | Tile::DoorH2 => '-',
            Tile::DoorV | Tile::DoorV2 => '|',
            Tile::Partition => ',',
            Tile::Marker(_) => '*',
            Tile::WallN
            | Tile::WallS
            | Tile::WallE
            | Tile::WallW
            | Tile::WallNE
            | Tile::WallNW
            | Tile::WallSE
            | Tile::WallSW => '+',
        }
    }

    pub(super) fn code(self) -> u16 {
        match self {
            Tile::Empty => 0,
            Tile::Floor => 1,
            Tile::Wall => 2,
            Tile::WallN => 3,
            Tile::WallS => 4,
            Tile::WallE => 5,
            Tile::WallW => 6,
            Tile::WallNE => 7,
            Tile::WallNW => 8,
            Tile::WallSE => 9,
            Tile::WallSW => 10,
            Tile::DoorH => 11,
            Tile::DoorV => 12,
            Tile::DoorH2 => 13,
            Tile::DoorV2 => 14,
            Tile::Partition => 15,
            Tile::Marker(code) => 0x100 | code,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    owners: Vec<Option<RoomId>>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![Tile::Empty; width * height],
            owners: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Out-of-range reads see `Empty`, so neighbor scans need no bounds checks.
    pub fn tile(&self, x: i32, y: i32) -> Tile {
        self.index(x, y).map_or(Tile::Empty, |index| self.tiles[index])
    }

    pub fn tile_at(&self, pos: Pos) -> Tile {
        self.tile(pos.x, pos.y)
    }

    pub fn room_at(&self, x: i32, y: i32) -> Option<RoomId> {
        self.index(x, y).and_then(|index| self.owners[index])
    }

    pub fn room_at_pos(&self, pos: Pos) -> Option<RoomId> {
        self.room_at(pos.x, pos.y)
    }

    pub fn put_tile(&mut self, x: i32, y: i32, tile: Tile, room: Option<RoomId>) {
        debug_assert!(self.in_bounds(x, y), "tile write outside the grid at ({x}, {y})");
        let Some(index) = self.index(x, y) else {
            return;
        };
        self.tiles[index] = tile;
        self.owners[index] = room;
    }

    /// Stamps the wall border and the owned floor of `rect`.
    pub fn draw_room(&mut self, room: RoomId, rect: Rect) {
        for y in (rect.y - 1)..=(rect.y + rect.h) {
            for x in (rect.x - 1)..=(rect.x + rect.w) {
                if rect.contains(Pos::new(x, y)) {
                    self.put_tile(x, y, Tile::Floor, Some(room));
                } else {
                    self.put_tile(x, y, Tile::Wall, None);
                }
            }
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = (Pos, Tile, Option<RoomId>)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| {
                let index = y * self.width + x;
                (Pos::new(x as i32, y as i32), self.tiles[index], self.owners[index])
            })
        })
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&cell| cell == tile).count()
    }

    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.tiles.chunks(self.width.max(1)) {
            out.extend(row.iter().map(|tile| tile.glyph()));
            out.push('\n');
        }
        out
    }

    pub(super) fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.tiles.len() * 6 + 8);
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for (tile, owner) in self.tiles.iter().zip(&self.owners) {
            bytes.extend(tile.code().to_le_bytes());
            bytes.extend(owner.map_or(u32::MAX, |room| room as u32).to_le_bytes());
        }
        bytes
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y).then(|| (y as usize) * self.width + (x as usize))
    }
}
