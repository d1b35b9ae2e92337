use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use ndarray::Array2;
use strum::VariantArray;

use crate::ball::{ball_display, BallID};
use crate::cell::Cell;
use crate::direction::Direction;
use crate::graph::RollGraph;
use crate::location::{Dimension, Location};
use crate::movement::Movement;
use crate::solver::{SearchLimits, Solution, Solver, SolverFailure};

/// A square tilting table: walls, holes and the starting position of every ball.
///
/// [`Board`]s should be built using a [`BoardBuilder`](crate::builder::BoardBuilder), which also validates them.
/// A board never changes once built; every search over it works on [`Movement`]s instead.
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) size: Dimension,
    pub(crate) cells: Array2<Cell>,
    // indexed by ball ID - 1
    pub(crate) balls: Vec<Location>,
    pub(crate) holes: Vec<Location>,
}

impl Board {
    /// The number of cells along each side.
    pub fn size(&self) -> Dimension {
        self.size
    }

    /// The cell at `location`, or [`None`] if it is off the board.
    pub fn cell(&self, location: Location) -> Option<&Cell> {
        if !location.is_within(self.size) {
            return None;
        }

        self.cells.get(location.as_index())
    }

    // only for locations known to be on the board
    pub(crate) fn at(&self, location: Location) -> &Cell {
        &self.cells[location.as_index()]
    }

    /// Starting locations of the balls; ball `n` is at index `n - 1`.
    pub fn balls(&self) -> &[Location] {
        &self.balls
    }

    /// Locations of the holes; the hole for ball `n` is at index `n - 1`.
    pub fn holes(&self) -> &[Location] {
        &self.holes
    }

    /// The state of play before any tilt.
    pub fn initial_movement(&self) -> Movement {
        Movement::initial(
            (1..).zip(self.balls.iter()).map(|(ball, location)| (*location, ball)).collect(),
            (1..).zip(self.holes.iter()).map(|(ball, location)| (*location, ball)).collect(),
        )
    }

    /// Precompute where a lone ball ends up from every cell in every direction.
    pub fn roll_graph(&self) -> RollGraph {
        RollGraph::build(self)
    }

    /// Search for every shortest winning sequence of tilts, with no limits on the search.
    ///
    /// An empty [`Solution`] means the table cannot be cleared.
    /// See [`Solver`] to bound the search in length or time.
    pub fn solve(&self) -> Result<Solution, SolverFailure> {
        Solver::new(self, SearchLimits::default()).solve()
    }

    /// Draw the table with balls and open holes as given by `movement`.
    ///
    /// Balls are uppercase letters (`A` is ball 1), their holes the matching lowercase letter, and empty cells are `.`.
    pub fn render(&self, movement: &Movement) -> String {
        print(self.draw(movement.occupied(), movement.open_holes()))
    }

    fn draw(&self, occupied: &BTreeMap<Location, BallID>, open_holes: &BTreeMap<Location, BallID>) -> Array2<char> {
        let size = self.size.get();
        let mut picture = Array2::from_elem((2 * size + 1, 2 * size + 1), ' ');

        for ((row, col), cell) in self.cells.indexed_iter() {
            let location = Location::from((row, col));
            let (y, x) = (2 * row + 1, 2 * col + 1);

            picture[(y, x)] = match (occupied.get(&location), open_holes.get(&location)) {
                (Some(ball), _) => ball_display(*ball),
                (None, Some(ball)) => ball_display(*ball).to_ascii_lowercase(),
                (None, None) => '.',
            };

            for direction in Direction::VARIANTS {
                let (wy, wx, glyph) = match direction {
                    Direction::North => (y - 1, x, '-'),
                    Direction::South => (y + 1, x, '-'),
                    Direction::West => (y, x - 1, '|'),
                    Direction::East => (y, x + 1, '|'),
                };
                if cell.has_wall(*direction) {
                    picture[(wy, wx)] = glyph;
                }
            }

            for (cy, cx) in [(y - 1, x - 1), (y - 1, x + 1), (y + 1, x - 1), (y + 1, x + 1)] {
                picture[(cy, cx)] = '+';
            }
        }

        picture
    }
}

fn print(picture: Array2<char>) -> String {
    let mut out = String::with_capacity(picture.nrows() * (picture.ncols() + 1));

    for row in picture.rows() {
        for col in row {
            out.push(*col);
        }
        out.push('\n');
    }

    out
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(&self.initial_movement()))
    }
}
