use strum::VariantArray;

use crate::ball::BallID;
use crate::direction::Direction;

/// What a lone ball does when it reaches a cell while rolling in some direction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Contact {
    /// Nothing here; the ball rolls on to the next cell.
    Pass,
    /// A hole with no wall beyond it: the ball drops in if the hole is open, otherwise rolls over it.
    FallOrPass,
    /// A hole against a wall: the ball drops in if the hole is open, otherwise stops on it.
    FallOrStop,
    /// A wall; the ball stops here.
    Stop,
}

impl Contact {
    /// The contact for the cell a ball departs from. The ball already sat on any hole here, so it cannot fall in again.
    pub fn departing(self) -> Self {
        match self {
            Self::FallOrPass => Self::Pass,
            Self::FallOrStop => Self::Stop,
            other => other,
        }
    }
}

/// A single square of the table. Set up once when the board is built.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Cell {
    walls: [bool; 4],
    hole: Option<BallID>,
}

impl Cell {
    pub(crate) fn add_wall(&mut self, at: Direction) {
        self.walls[at.index()] = true;
    }

    pub(crate) fn add_hole(&mut self, ball: BallID) {
        self.hole = Some(ball);
    }

    /// Whether there is a wall on side `at` of this cell.
    pub fn has_wall(&self, at: Direction) -> bool {
        self.walls[at.index()]
    }

    /// The sides of this cell carrying a wall.
    pub fn walls(&self) -> impl Iterator<Item=Direction> + '_ {
        Direction::VARIANTS.iter().copied().filter(|dir| self.has_wall(*dir))
    }

    /// The ball whose hole is in this cell, if any.
    pub fn hole(&self) -> Option<BallID> {
        self.hole
    }

    /// Resolve a lone ball reaching this cell while rolling towards `to`.
    pub fn contact(&self, to: Direction) -> Contact {
        match (self.has_wall(to), self.hole.is_some()) {
            (true, false) => Contact::Stop,
            (true, true) => Contact::FallOrStop,
            (false, true) => Contact::FallOrPass,
            (false, false) => Contact::Pass,
        }
    }
}
