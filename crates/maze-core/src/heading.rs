use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Absolute facing of the mouse.
///
/// The discriminants are stable (`N=0, E=1, S=2, W=3`) and define the
/// exploration order used when picking the next unexplored exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Heading {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

impl Heading {
    /// Fixed order for determinism: N, E, S, W.
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    pub fn left(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    pub fn right(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    pub fn reverse(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// Absolute heading of a direction given relative to `self`.
    pub fn turned(self, relative: Relative) -> Self {
        match relative {
            Relative::Left => self.left(),
            Relative::Forward => self,
            Relative::Right => self.right(),
        }
    }

    /// Unit step for one forward move: north is `+y`, east is `+x`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Heading::North => (0, 1),
            Heading::East => (1, 0),
            Heading::South => (0, -1),
            Heading::West => (-1, 0),
        }
    }

    /// Signed quarter turns from `self` to `target` in `-1..=2`.
    ///
    /// A half turn is reported as `+2` so callers resolve it with two right
    /// turns.
    pub fn quarter_turns_to(self, target: Heading) -> i8 {
        match (target.index() + 4 - self.index()) % 4 {
            0 => 0,
            1 => 1,
            2 => 2,
            _ => -1,
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heading::North => "north",
            Heading::East => "east",
            Heading::South => "south",
            Heading::West => "west",
        };
        f.write_str(name)
    }
}

/// Direction relative to the current heading, as the wall sensors see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Relative {
    Left,
    Forward,
    Right,
}

impl Relative {
    /// Corridor wall-following priority.
    pub const PRIORITY: [Relative; 3] = [Relative::Left, Relative::Forward, Relative::Right];
}

/// A single quarter turn in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Turn {
    Left,
    Right,
}

/// Grid cell coordinate. The start cell is `(0, 0)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    pub fn is_origin(self) -> bool {
        self == Self::ORIGIN
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
