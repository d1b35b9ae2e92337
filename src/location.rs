use std::fmt::{Display, Formatter};
use std::num::NonZero;

use ndarray::Ix;

pub(crate) type Coord = usize;
/// The side length of a (square) board.
pub type Dimension = NonZero<Coord>;

#[derive(Clone, Eq, Hash, Copy, PartialEq, Ord, PartialOrd, Debug)]
/// A location `(x, y)` on a board. The top left (north-west) corner is `Location(1, 1)`; `0` is never a valid coordinate.
pub struct Location(pub Coord, pub Coord);

impl Location {
    // row-major, zero-based
    pub(crate) fn as_index(&self) -> (Coord, Coord) {
        (self.1 - 1, self.0 - 1)
    }

    pub(crate) fn offset_by(self, rhs: (isize, isize)) -> Self {
        Self(self.0.wrapping_add_signed(rhs.0), self.1.wrapping_add_signed(rhs.1))
    }

    /// Whether this location lies on a board of side `size`.
    pub fn is_within(&self, size: Dimension) -> bool {
        (1..=size.get()).contains(&self.0) && (1..=size.get()).contains(&self.1)
    }
}

impl From<(Ix, Ix)> for Location {
    fn from(value: (Ix, Ix)) -> Self {
        Self(value.1 + 1, value.0 + 1)
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}
