//! Tile grid to level geometry.
//!
//! Conversion reads only the grid and the room table, so converting the same
//! grid twice writes the same obstacles and floors in the same order.

use tracing::debug;

use crate::error::MapgenError;
use crate::level::{FloorTile, HalfPos, LevelSink, ObstacleKind, WallGraphic};
use crate::types::{Direction, DoorStyle, Orientation};

use super::grid::{Tile, TileGrid};
use super::rooms::RoomTable;
use super::themes::Theme;

pub const WALL_N: u8 = 1;
pub const WALL_W: u8 = 2;
pub const WALL_S: u8 = 4;
pub const WALL_E: u8 = 8;

const MASK_SIDES: [(u8, Direction); 4] = [
    (WALL_N, Direction::Up),
    (WALL_W, Direction::Left),
    (WALL_S, Direction::Down),
    (WALL_E, Direction::Right),
];

/// Writes every cell of `grid` into `level`: walls and floors first, doors
/// on top in a second pass.
pub fn convert_tiles<L: LevelSink + ?Sized>(
    grid: &TileGrid,
    rooms: &RoomTable,
    level: &mut L,
) -> Result<(), MapgenError> {
    for (pos, tile, owner) in grid.cells() {
        let (x, y) = (pos.x, pos.y);
        match tile {
            Tile::Floor | Tile::Partition => {
                let theme = owner.map_or(Theme::default(), |room| rooms.get(room).theme);
                let mask = wall_mask(grid, x, y);
                for (bit, side) in MASK_SIDES {
                    if mask & bit != 0 {
                        let wall = ObstacleKind::Wall(theme.wall(side));
                        level.add_obstacle(edge_position(x, y, side), wall)?;
                    }
                }
                level.set_floor(x, y, theme.floor());
            }
            Tile::Wall => level.set_floor(x, y, FloorTile::Rubble),
            Tile::Marker(code) => level.set_floor(x, y, FloorTile::Marker(code)),
            Tile::Empty => {}
            directional if !directional.wall_edges().is_empty() => {
                for &side in directional.wall_edges() {
                    let graphic =
                        if side.is_vertical() { WallGraphic::MetalH } else { WallGraphic::MetalV };
                    level.add_obstacle(edge_position(x, y, side), ObstacleKind::Wall(graphic))?;
                }
                level.set_floor(x, y, FloorTile::Plain);
            }
            _ => {}
        }
    }

    let mut doors = 0;
    for (pos, tile, _) in grid.cells().filter(|(_, tile, _)| tile.is_door()) {
        let style = rooms.door_at(pos).map_or(DoorStyle::Swing, |door| door.style);
        place_door(level, pos.x, pos.y, tile, style)?;
        doors += 1;
    }

    debug!(rooms = rooms.len(), doors, "converted {}x{} tile grid", grid.width(), grid.height());
    Ok(())
}

/// Bitmask of the four neighbors coded as plain walls.
pub fn wall_mask(grid: &TileGrid, x: i32, y: i32) -> u8 {
    MASK_SIDES
        .iter()
        .filter(|(_, side)| {
            let (dx, dy) = side.delta();
            grid.tile(x + dx, y + dy) == Tile::Wall
        })
        .fold(0, |mask, (bit, _)| mask | bit)
}

/// Midpoint of the cell edge facing `side`.
fn edge_position(x: i32, y: i32, side: Direction) -> HalfPos {
    let (dx, dy) = side.delta();
    HalfPos::from_halves(2 * x + 1 + dx, 2 * y + 1 + dy)
}

fn place_door<L: LevelSink + ?Sized>(
    level: &mut L,
    x: i32,
    y: i32,
    tile: Tile,
    style: DoorStyle,
) -> Result<(), MapgenError> {
    let orientation = match tile {
        Tile::DoorH | Tile::DoorH2 => Orientation::Horizontal,
        _ => Orientation::Vertical,
    };
    level.add_obstacle(HalfPos::cell_center(x, y), ObstacleKind::Door { orientation, style })?;
    level.set_floor(x, y, FloorTile::Plain);

    // Doors on fused runs stand alone: no frame, no approach tiles.
    if matches!(tile, Tile::DoorH2 | Tile::DoorV2) {
        return Ok(());
    }

    let frame = ObstacleKind::DoorFrame(orientation);
    let (frame_sides, approach) = match orientation {
        Orientation::Horizontal => ([Direction::Left, Direction::Right], (0, 1)),
        Orientation::Vertical => ([Direction::Up, Direction::Down], (1, 0)),
    };
    for side in frame_sides {
        level.add_obstacle(edge_position(x, y, side), frame)?;
    }
    let (ax, ay) = approach;
    level.set_floor(x - ax, y - ay, FloorTile::Plain);
    level.set_floor(x + ax, y + ay, FloorTile::Plain);
    Ok(())
}
