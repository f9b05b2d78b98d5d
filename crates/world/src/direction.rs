use serde::{Deserialize, Serialize};
use std::fmt;

/// World axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        })
    }
}

/// Horizontal compass heading.
///
/// North is towards negative Z and east towards positive X.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Heading closest to a yaw in radians. Yaw 0 faces south and grows towards west.
    pub fn from_yaw(yaw: f32) -> Self {
        let degrees = yaw.to_degrees().rem_euclid(360.0);
        let quadrant = ((degrees + 45.0) / 90.0).floor() as i32 % 4;
        match quadrant {
            0 => Direction::South,
            1 => Direction::West,
            2 => Direction::North,
            _ => Direction::East,
        }
    }

    pub const fn axis(self) -> Axis {
        match self {
            Direction::North | Direction::South => Axis::Z,
            Direction::East | Direction::West => Axis::X,
        }
    }

    /// Whether the heading points along the positive direction of its axis.
    pub const fn is_positive(self) -> bool {
        matches!(self, Direction::South | Direction::East)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
        })
    }
}
