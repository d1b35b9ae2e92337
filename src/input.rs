//! The plain-text table format.

use std::fmt::{Display, Formatter};
use std::num::NonZero;

use unordered_pair::UnorderedPair;

use crate::board::Board;
use crate::builder::{BoardBuilder, BuilderInvalidReason};
use crate::location::Location;

/// Reasons a textual table description may be rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputFailure {
    /// A token was not an unsigned integer.
    NotANumber(String),
    /// Fewer numbers than the header promises.
    Incomplete,
    /// More numbers than the header promises.
    TooLong,
    /// The table has no cells.
    ZeroSize,
    /// The numbers were all there but do not describe a valid table.
    Invalid(Vec<BuilderInvalidReason>),
}

impl Display for InputFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotANumber(token) => write!(f, "Input data contains \"{}\", which is not a coordinate.", token),
            Self::Incomplete => write!(f, "Input data is too short. Check if all the coordinates are present."),
            Self::TooLong => write!(f, "Input data is too long. Check if there are no extra coordinates."),
            Self::ZeroSize => write!(f, "Table size must be at least 1."),
            Self::Invalid(reasons) => match reasons.first() {
                Some(BuilderInvalidReason::FeatureOutOfBounds) => write!(f, "Some coordinates are less than 1 or bigger than table size."),
                Some(BuilderInvalidReason::NotAdjacent) => write!(f, "Some walls are not between neighbouring cells."),
                Some(BuilderInvalidReason::Duplicate) => write!(f, "Some objects have duplicates!"),
                Some(BuilderInvalidReason::BallOnHole) => write!(f, "Some balls are already in the holes."),
                Some(BuilderInvalidReason::NoBalls) | None => write!(f, "There are no balls in input data set."),
            }
        }
    }
}

impl std::error::Error for InputFailure {}

// size, ball count, wall count
const HEADER_LEN: usize = 3;

/// Read a table from whitespace-separated unsigned integers:
///
/// ```text
/// N K W
/// x y       (K balls)
/// x y       (K holes, the i-th belonging to the i-th ball)
/// x y x y   (W walls, each between two neighbouring cells)
/// ```
///
/// Coordinates are 1-based with `(1, 1)` in the north-west corner. The border is always walled and is not listed.
pub fn parse(text: &str) -> Result<Board, InputFailure> {
    let numbers = text.split_whitespace()
        .map(|token| token.parse::<usize>().map_err(|_| InputFailure::NotANumber(token.to_string())))
        .collect::<Result<Vec<_>, _>>()?;

    let [size, ball_count, wall_count, data @ ..] = numbers.as_slice() else {
        return Err(InputFailure::Incomplete);
    };

    let expected = ball_count.checked_add(*wall_count)
        .and_then(|count| count.checked_mul(4))
        .ok_or(InputFailure::Incomplete)?;
    if data.len() < expected {
        return Err(InputFailure::Incomplete);
    } else if data.len() > expected {
        return Err(InputFailure::TooLong);
    }

    let size = NonZero::new(*size).ok_or(InputFailure::ZeroSize)?;
    log::debug!("reading a {}x{} table with {} balls and {} walls from {} numbers",
        size, size, ball_count, wall_count, HEADER_LEN + data.len());

    let (balls, rest) = data.split_at(ball_count * 2);
    let (holes, walls) = rest.split_at(ball_count * 2);

    let mut builder = BoardBuilder::with_size(size);
    for (ball, hole) in balls.chunks_exact(2).zip(holes.chunks_exact(2)) {
        builder.add_ball(Location(ball[0], ball[1]), Location(hole[0], hole[1]));
    }
    for wall in walls.chunks_exact(4) {
        builder.disconnect(UnorderedPair(Location(wall[0], wall[1]), Location(wall[2], wall[3])));
    }

    builder.build().map_err(InputFailure::Invalid)
}
