//! The roll graph and the tilt resolver built on it.

use std::collections::{BTreeMap, HashSet};
use std::fmt::{Display, Formatter};
use std::ops::Index;

use itertools::Itertools;
use ndarray::Array2;
use strum::VariantArray;

use crate::ball::BallID;
use crate::board::Board;
use crate::cell::Contact;
use crate::direction::Direction;
use crate::location::Location;

/// Where a lone ball leaving one cell ends up, for each of the four directions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RollNode {
    stops: [Location; 4],
    // in the order the ball rolls over them
    holes: [Vec<Location>; 4],
}

impl RollNode {
    /// The cell a lone ball comes to rest on when tilted towards `to`, assuming every hole on the way is already filled.
    pub fn stop(&self, to: Direction) -> Location {
        self.stops[to.index()]
    }

    /// Every hole crossed on the way to [`Self::stop`], nearest first. The stop itself is included if it is a hole.
    pub fn holes(&self, to: Direction) -> &[Location] {
        &self.holes[to.index()]
    }
}

/// The ball `ball` moves from `from` to `to` as part of one tilt.
/// If `sunk`, then `to` is its hole and the ball leaves play.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Roll {
    /// The ball moving.
    pub ball: BallID,
    /// Where it was before the tilt.
    pub from: Location,
    /// Where it settled, or the hole it dropped into.
    pub to: Location,
    /// Whether it dropped into its hole.
    pub sunk: bool,
}

/// A tilt failed because a ball dropped into a hole belonging to a different ball.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct WrongHole {
    /// The ball which fell in.
    pub ball: BallID,
    /// Whose hole it was.
    pub owner: BallID,
    /// Where it happened.
    pub hole: Location,
}

/// The precomputed "roll graph" of a [`Board`]: one [`RollNode`] per cell.
///
/// Holes are treated as filled while building, since which holes are still open is only known during play.
/// [`Self::tilt`] takes the open holes into account.
#[derive(Clone, Debug)]
pub struct RollGraph {
    nodes: Array2<RollNode>,
}

/// Roll a lone ball from `from` towards `to` until it meets something other than open floor.
///
/// The departure cell is resolved with [`Contact::departing`].
/// Returns the contact which ended the roll and the cell it happened in.
pub(crate) fn roll(board: &Board, from: Location, to: Direction) -> (Contact, Location) {
    let mut current = from;

    loop {
        let mut contact = board.at(current).contact(to);
        if current == from {
            contact = contact.departing();
        }

        if contact != Contact::Pass {
            return (contact, current);
        }

        // the border is walled, so this never leaves the board
        current = to.attempt_from(current);
    }
}

impl RollGraph {
    pub(crate) fn build(board: &Board) -> Self {
        let nodes = Array2::from_shape_fn(board.cells.raw_dim(), |index| {
            let location = Location::from(index);
            let mut holes: [Vec<Location>; 4] = Default::default();
            let stops = std::array::from_fn(|i| Self::chain(board, location, Direction::VARIANTS[i], &mut holes[i]));

            RollNode { stops, holes }
        });

        log::debug!("built roll graph for {} cells", nodes.len());
        Self { nodes }
    }

    // keep rolling over holes as if they were filled, collecting them on the way
    fn chain(board: &Board, from: Location, to: Direction, holes: &mut Vec<Location>) -> Location {
        let mut start = from;

        loop {
            let (contact, at) = roll(board, start, to);
            match contact {
                Contact::FallOrPass => {
                    holes.push(at);
                    // departing from the filled hole rolls straight over it
                    start = at;
                }
                Contact::FallOrStop => {
                    holes.push(at);
                    return at;
                }
                Contact::Stop => return at,
                Contact::Pass => unreachable!(),
            }
        }
    }

    /// Tilt the table towards `to`, moving every ball in `occupied` at once.
    ///
    /// Balls are resolved front to back: those nearest the side being tilted towards settle first and the rest pile up behind them.
    /// A ball crossing its own open hole drops in and closes it; crossing any other open hole fails the whole tilt with [`WrongHole`].
    /// Closed holes are rolled over.
    ///
    /// The returned [`Roll`]s are in resolution order, which is also a safe order to apply them in.
    ///
    /// # Panics
    /// If a ball in `occupied` is off the board.
    pub fn tilt(
        &self,
        to: Direction,
        occupied: &BTreeMap<Location, BallID>,
        open_holes: &BTreeMap<Location, BallID>,
    ) -> Result<Vec<Roll>, WrongHole> {
        let mut open_holes = open_holes.clone();
        let mut claimed = HashSet::with_capacity(occupied.len());
        let mut rolls = Vec::with_capacity(occupied.len());

        for (&from, &ball) in occupied.iter().sorted_by_key(|(location, _)| to.rank(**location)) {
            let node = &self[from];

            let mut sunk_at = None;
            for hole in node.holes(to) {
                match open_holes.get(hole) {
                    Some(owner) if *owner == ball => {
                        sunk_at = Some(*hole);
                        break;
                    }
                    Some(owner) => return Err(WrongHole { ball, owner: *owner, hole: *hole }),
                    None => {}
                }
            }

            if let Some(hole) = sunk_at {
                open_holes.remove(&hole);
                rolls.push(Roll { ball, from, to: hole, sunk: true });
                continue;
            }

            // back off behind whatever already settled there
            let mut destination = node.stop(to);
            while claimed.contains(&destination) && destination != from {
                destination = to.invert().attempt_from(destination);
            }

            claimed.insert(destination);
            rolls.push(Roll { ball, from, to: destination, sunk: false });
        }

        Ok(rolls)
    }
}

/// The node for a cell.
///
/// # Panics
/// If the location is off the board.
impl Index<Location> for RollGraph {
    type Output = RollNode;

    fn index(&self, location: Location) -> &Self::Output {
        &self.nodes[location.as_index()]
    }
}

impl Display for RollGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, node) in self.nodes.indexed_iter().sorted_by_key(|(index, _)| Location::from(*index)) {
            write!(f, "{}:", Location::from(index))?;
            for to in Direction::VARIANTS {
                write!(f, " {} {}", to, node.stop(*to))?;
            }
            writeln!(f)?;

            for to in Direction::VARIANTS {
                if !node.holes(*to).is_empty() {
                    writeln!(f, "\tholes {}: {}", to, node.holes(*to).iter().join(" "))?;
                }
            }
        }

        Ok(())
    }
}
