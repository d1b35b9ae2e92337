use strum::{Display, EnumString, VariantArray};

use crate::location::Location;

/// One of the four ways the whole table can be tilted.
///
/// [`VARIANTS`](VariantArray::VARIANTS) lists the directions in the order the search tries them.
/// Directions print and parse as their single-letter symbol, e.g. `"N"`.
#[derive(Copy, Clone, VariantArray, Display, EnumString, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum Direction {
    /// Towards `y = 1`.
    #[strum(to_string = "N")]
    North,
    /// Towards `x = 1`.
    #[strum(to_string = "W")]
    West,
    /// Towards `y = size`.
    #[strum(to_string = "S")]
    South,
    /// Towards `x = size`.
    #[strum(to_string = "E")]
    East,
}

impl Direction {
    /// Take one step from `location` in this direction. The result may be off the board.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::North => location.offset_by((0, -1)),
            Self::West => location.offset_by((-1, 0)),
            Self::South => location.offset_by((0, 1)),
            Self::East => location.offset_by((1, 0)),
        }
    }

    /// The opposite direction.
    pub fn invert(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::West => Self::East,
            Self::South => Self::North,
            Self::East => Self::West,
        }
    }

    /// Determine the direction from `a` to `b`, or [`None`] if the two are not orthogonal neighbors.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }

    // position in fixed-size per-direction arrays
    #[inline]
    pub(crate) fn index(&self) -> usize {
        *self as usize
    }

    /// Sort key putting locations nearest the side being tilted towards first.
    pub(crate) fn rank(&self, location: Location) -> isize {
        match self {
            Self::North => location.1 as isize,
            Self::West => location.0 as isize,
            Self::South => -(location.1 as isize),
            Self::East => -(location.0 as isize),
        }
    }
}
