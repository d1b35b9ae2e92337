use std::collections::{BTreeMap, BTreeSet};

use crate::ball::BallID;
use crate::direction::Direction;
use crate::location::Location;

// Every cell a ball has ever rested on, and how many there were when the current tilt began.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct LoopGuard {
    visited: BTreeSet<Location>,
    snapshot: usize,
}

/// Placing a ball broke the one-ball-per-cell rule, or dropped it into a hole it does not own.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Collision {
    /// The ball being placed.
    pub ball: BallID,
    /// The cell it could not be placed on.
    pub location: Location,
}

/// One state of play: where every remaining ball is and which holes are still open.
///
/// Each [`Movement`] owns its maps outright, so sibling branches of a search never see each other's changes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Movement {
    tilt: Option<Direction>,
    occupied: BTreeMap<Location, BallID>,
    open_holes: BTreeMap<Location, BallID>,
    loop_guard: BTreeMap<BallID, LoopGuard>,
}

impl Movement {
    /// The starting position, before any tilt.
    pub fn initial(balls: BTreeMap<Location, BallID>, holes: BTreeMap<Location, BallID>) -> Self {
        let loop_guard = balls.iter()
            .map(|(location, ball)| (*ball, LoopGuard { visited: BTreeSet::from([*location]), snapshot: 1 }))
            .collect();

        Self {
            tilt: None,
            occupied: balls,
            open_holes: holes,
            loop_guard,
        }
    }

    /// Begin the state produced by tilting this one towards `tilt`.
    ///
    /// The balls have not moved yet; apply the tilt with [`Self::advance_ball`], then ask [`Self::is_looped`].
    pub fn after(&self, tilt: Direction) -> Self {
        let mut next = self.clone();
        next.tilt = Some(tilt);
        next.init_loop_guard();
        next
    }

    fn init_loop_guard(&mut self) {
        for guard in self.loop_guard.values_mut() {
            guard.snapshot = guard.visited.len();
        }
    }

    /// Whether this is the starting position.
    pub fn is_initial(&self) -> bool {
        self.tilt.is_none()
    }

    /// The tilt which produced this state, or [`None`] for the starting position.
    pub fn tilt(&self) -> Option<Direction> {
        self.tilt
    }

    /// Balls still in play, by the cell they occupy.
    pub fn occupied(&self) -> &BTreeMap<Location, BallID> {
        &self.occupied
    }

    /// Holes still open, with the ball each one accepts.
    pub fn open_holes(&self) -> &BTreeMap<Location, BallID> {
        &self.open_holes
    }

    /// Whether every ball has dropped into its hole.
    pub fn is_won(&self) -> bool {
        self.occupied.is_empty()
    }

    /// Move `ball` from `from` to `to`.
    ///
    /// If `to` is the ball's own open hole, the ball drops in: it leaves play and the hole closes.
    /// Either way `to` is marked as visited by the ball.
    /// Fails if `to` is occupied by another ball or is somebody else's open hole, leaving this state unchanged.
    pub fn advance_ball(&mut self, ball: BallID, from: Location, to: Location) -> Result<(), Collision> {
        if self.occupied.get(&to).is_some_and(|other| *other != ball || to != from) {
            return Err(Collision { ball, location: to });
        }

        let owner = self.open_holes.get(&to).copied();
        if owner.is_some_and(|owner| owner != ball) {
            return Err(Collision { ball, location: to });
        }

        if self.occupied.get(&from) == Some(&ball) {
            self.occupied.remove(&from);
        }

        if owner.is_some() {
            self.open_holes.remove(&to);
        } else {
            self.occupied.insert(to, ball);
        }

        self.loop_guard.entry(ball).or_default().visited.insert(to);
        Ok(())
    }

    /// Whether the last tilt failed to bring any ball to a cell it had never been on.
    /// A looped state never leads anywhere new and is not searched further.
    pub fn is_looped(&self) -> bool {
        self.loop_guard.values().all(|guard| guard.visited.len() == guard.snapshot)
    }
}
