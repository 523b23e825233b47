use super::position::Position;
use core::fmt;
use serde::{Deserialize, Serialize};

/// One of the four single-cell movement directions on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    Up = 1,
    Down = 2,
    Left = 3,
    Right = 4,
}

impl Direction {
    /// Resolution order used when classifying a unit delta.
    pub const RESOLUTION_ORDER: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];

    /// Values follow the environment's action numbering (Stop = 0 is not a direction).
    pub const fn from_action_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Direction::Up),
            2 => Some(Direction::Down),
            3 => Some(Direction::Left),
            4 => Some(Direction::Right),
            _ => None,
        }
    }

    pub const fn action_value(self) -> u8 {
        self as u8
    }

    /// Row and column delta of a single step.
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Direction of a single-cell move from `from` to `to`, or `None` when the
    /// two positions are not orthogonal neighbours.
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        Self::RESOLUTION_ORDER
            .into_iter()
            .find(|direction| from.step(*direction) == Some(to))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        f.write_str(label)
    }
}
