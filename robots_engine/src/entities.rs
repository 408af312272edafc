use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The compass direction a robot faces.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Bearing {
    N,
    E,
    S,
    W,
}

/// A 90 degree turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Rotation {
    L,
    R,
}

/// A single step of a robot script.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Instruction {
    Forward,
    Turn(Rotation),
}

/// A robot's coordinates and bearing.
///
/// Coordinates outside of the grid mean the robot is lost; there is no other
/// liveness state. Positions are plain values and every move produces a new one.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Position {
    pub x: i64,
    pub y: i64,
    pub bearing: Bearing,
}

impl Bearing {
    pub fn from_char(value: char) -> Option<Bearing> {
        match value {
            'N' => Some(Bearing::N),
            'E' => Some(Bearing::E),
            'S' => Some(Bearing::S),
            'W' => Some(Bearing::W),
            _ => None,
        }
    }

    /// Rotates the bearing by 90 degrees along the cycle N -> E -> S -> W -> N.
    pub fn rotate(self, rotation: Rotation) -> Bearing {
        use Bearing::*;
        use Rotation::*;

        match (self, rotation) {
            (N, L) => W,
            (E, L) => N,
            (S, L) => E,
            (W, L) => S,
            (N, R) => E,
            (E, R) => S,
            (S, R) => W,
            (W, R) => N,
        }
    }

    pub fn rotate_left(self) -> Bearing {
        self.rotate(Rotation::L)
    }

    pub fn rotate_right(self) -> Bearing {
        self.rotate(Rotation::R)
    }

    fn as_char(self) -> char {
        match self {
            Bearing::N => 'N',
            Bearing::E => 'E',
            Bearing::S => 'S',
            Bearing::W => 'W',
        }
    }
}

impl fmt::Display for Bearing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for Bearing {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Bearing::from_char(c).ok_or_else(|| format!("invalid bearing: {}", value))
            }
            _ => Err(format!("invalid bearing: {}", value)),
        }
    }
}

impl Instruction {
    pub fn from_char(value: char) -> Option<Instruction> {
        match value {
            'F' => Some(Instruction::Forward),
            'L' => Some(Instruction::Turn(Rotation::L)),
            'R' => Some(Instruction::Turn(Rotation::R)),
            _ => None,
        }
    }
}

impl Position {
    pub fn new(x: i64, y: i64, bearing: Bearing) -> Position {
        Position { x, y, bearing }
    }

    /// Advances `steps` cells along the bearing without any bounds checks.
    /// Negative steps move backwards, which is how a lost robot is put back on its last cell.
    pub fn move_unchecked(self, steps: i64) -> Position {
        let (dx, dy) = match self.bearing {
            Bearing::N => (0, steps),
            Bearing::E => (steps, 0),
            Bearing::S => (0, -steps),
            Bearing::W => (-steps, 0),
        };

        Position {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    pub fn turn(self, rotation: Rotation) -> Position {
        Position {
            bearing: self.bearing.rotate(rotation),
            ..self
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.bearing)
    }
}
