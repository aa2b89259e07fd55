//! Edge states and vertex directions.
//!
//! Every internal vertex of the grid has eight incident unit edges, one per
//! [`Direction`], spaced at 45°. Each edge of a partial crease pattern is in
//! one of three [`EdgeState`]s.
use std::fmt;

/// The state of a single edge in a partial crease pattern.
///
/// The derived order (`Undefined < NotUse < Use`) is the order used for
/// lexicographic comparison of whole assignments.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub enum EdgeState {
    /// Not yet fixed by any placed vertex.
    #[default]
    Undefined,
    /// Fixed as a non-crease.
    NotUse,
    /// Fixed as a crease.
    Use,
}

impl EdgeState {
    /// Converts a catalog bit (`0` or `1`) into a fixed edge state.
    pub fn from_bit(bit: u8) -> Option<Self> {
        match bit {
            0 => Some(EdgeState::NotUse),
            1 => Some(EdgeState::Use),
            _ => None,
        }
    }

    pub fn is_defined(self) -> bool {
        self != EdgeState::Undefined
    }

    /// Single-character token used in assignment dumps.
    pub fn symbol(self) -> char {
        match self {
            EdgeState::Undefined => '-',
            EdgeState::NotUse => '0',
            EdgeState::Use => '1',
        }
    }
}

impl fmt::Display for EdgeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One of the eight directions around an internal vertex, in clockwise order
/// starting from `Up`.
///
/// The discriminant is the position of the direction inside a [`Tile`][crate::catalog::Tile]
/// and inside a vertex's incident-edge table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Direction {
    Up = 0,
    UpperRight = 1,
    Right = 2,
    LowerRight = 3,
    Down = 4,
    LowerLeft = 5,
    Left = 6,
    UpperLeft = 7,
}

impl Direction {
    /// All directions in tile order.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::UpperRight,
        Direction::Right,
        Direction::LowerRight,
        Direction::Down,
        Direction::LowerLeft,
        Direction::Left,
        Direction::UpperLeft,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "U",
            Direction::UpperRight => "UR",
            Direction::Right => "R",
            Direction::LowerRight => "LR",
            Direction::Down => "D",
            Direction::LowerLeft => "LL",
            Direction::Left => "L",
            Direction::UpperLeft => "UL",
        };
        write!(f, "{}", name)
    }
}
