use serde::{Deserialize, Serialize};

pub type RoomId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self { y: self.y + dy, x: self.x + dx }
    }

    pub fn back(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self { y: self.y - dy, x: self.x - dx }
    }
}

/// Side of a room a connection leaves through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Unit step running along the wall a connection in this direction crosses.
    pub fn along(self) -> (i32, i32) {
        match self {
            Direction::Up | Direction::Down => (1, 0),
            Direction::Left | Direction::Right => (0, 1),
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DoorStyle {
    Sliding,
    Swing,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_and_back_are_inverse_for_every_direction() {
        let origin = Pos::new(5, 7);
        for direction in Direction::ALL {
            assert_eq!(origin.step(direction).back(direction), origin);
            assert_eq!(origin.step(direction), origin.back(direction.opposite()));
        }
    }

    #[test]
    fn along_is_perpendicular_to_delta() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.delta();
            let (ax, ay) = direction.along();
            assert_eq!(dx * ax + dy * ay, 0, "{direction:?}");
        }
    }
}
