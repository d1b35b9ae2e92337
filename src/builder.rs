//! Validated construction of [`Board`]s.

use std::collections::HashSet;
use std::num::NonZero;

use itertools::Itertools;
use ndarray::Array2;
use unordered_pair::UnorderedPair;

use crate::board::Board;
use crate::cell::Cell;
use crate::direction::Direction;
use crate::location::{Dimension, Location};

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum BuilderInvalidReason {
    /// A ball, hole or wall was placed outside the bounds specified by `size` on a builder.
    FeatureOutOfBounds,
    /// A wall was placed between two cells which do not share a side.
    NotAdjacent,
    /// Two balls share a cell, two holes share a cell, or the same wall was added twice.
    Duplicate,
    /// A ball starts on top of a hole.
    BallOnHole,
    /// There is nothing to play with.
    NoBalls,
}

/// A builder for tilting tables.
///
/// Builders mutate themselves while building but can be [`Clone`]d to save their state at some point.
/// Once a builder becomes invalid, every further mutation is ignored until it is dropped.
#[derive(Clone, Debug)]
pub struct BoardBuilder {
    size: Dimension,
    // (ball, hole), indexed by ball ID - 1
    pairs: Vec<(Location, Location)>,
    // internal walls only; the border is always walled
    walls: HashSet<UnorderedPair<Location>>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::with_size(NonZero::new(4).unwrap())
    }
}

impl BoardBuilder {
    /// Construct a new builder for a square board `size` cells across.
    pub fn with_size(size: Dimension) -> Self {
        Self {
            size,
            pairs: Default::default(),
            walls: Default::default(),
            invalid_reasons: Default::default(),
        }
    }

    fn invalidate(&mut self, reason: BuilderInvalidReason) -> &mut Self {
        self.invalid_reasons.push(reason);
        self
    }

    /// Add a ball and the hole it must end up in. The ball is given the next free ID, starting at 1.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if either location is out of bounds,
    /// a [`Duplicate`](BuilderInvalidReason::Duplicate) state if another ball (or hole) already occupies that cell,
    /// or a [`BallOnHole`](BuilderInvalidReason::BallOnHole) state if a ball and a hole would share a cell.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn add_ball(&mut self, ball: Location, hole: Location) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if !ball.is_within(self.size) || !hole.is_within(self.size) {
            return self.invalidate(BuilderInvalidReason::FeatureOutOfBounds);
        }

        if self.pairs.iter().any(|(b, h)| *b == ball || *h == hole) {
            return self.invalidate(BuilderInvalidReason::Duplicate);
        }

        if ball == hole || self.pairs.iter().any(|(b, h)| *b == hole || *h == ball) {
            return self.invalidate(BuilderInvalidReason::BallOnHole);
        }

        self.pairs.push((ball, hole));
        self
    }

    /// Remove the most recently added ball and its hole.
    ///
    /// If the builder is in an invalid state or no balls are present, this function does nothing.
    pub fn pop_ball(&mut self) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        self.pairs.pop();
        self
    }

    /// Place a wall between the two `locations`. The order in which they are given does not matter.
    ///
    /// May cause the builder to enter a [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds) invalid state if either location is out of bounds,
    /// a [`NotAdjacent`](BuilderInvalidReason::NotAdjacent) state if they do not share a side,
    /// or a [`Duplicate`](BuilderInvalidReason::Duplicate) state if this wall is already present.
    /// If the builder is already in an invalid state, this function does nothing.
    pub fn disconnect(&mut self, locations: UnorderedPair<Location>) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        for location in [locations.0, locations.1] {
            if !location.is_within(self.size) {
                return self.invalidate(BuilderInvalidReason::FeatureOutOfBounds);
            }
        }

        if Direction::direction_to(locations.0, locations.1).is_none() {
            return self.invalidate(BuilderInvalidReason::NotAdjacent);
        }

        if !self.walls.insert(locations) {
            return self.invalidate(BuilderInvalidReason::Duplicate);
        }

        self
    }

    /// Shorthand for multiple calls to [`Self::disconnect`], with the same conditions.
    ///
    /// Wall off `location` on each side in `directions`. Sides facing the border are already walled and are skipped,
    /// as is any appearance of a direction after the first.
    pub fn disconnect_around(&mut self, location: Location, directions: Vec<Direction>) -> &mut Self {
        for direction in directions.into_iter().unique() {
            let neighbor = direction.attempt_from(location);
            if location.is_within(self.size) && !neighbor.is_within(self.size) {
                continue;
            }

            self.disconnect(UnorderedPair::from((location, neighbor)));
        }

        self
    }

    /// Check the validity of this builder, ensuring no [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)` otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Board`], synthesising the border walls.
    /// If the builder is invalid for any reason, or holds no balls, a [`Vec`] of [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Board, Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(self.invalid_reasons.clone());
        }

        if self.pairs.is_empty() {
            return Err(vec![BuilderInvalidReason::NoBalls]);
        }

        let size = self.size.get();
        let mut cells = Array2::from_shape_simple_fn((size, size), Cell::default);

        for i in 1..=size {
            cells[Location(i, 1).as_index()].add_wall(Direction::North);
            cells[Location(i, size).as_index()].add_wall(Direction::South);
            cells[Location(1, i).as_index()].add_wall(Direction::West);
            cells[Location(size, i).as_index()].add_wall(Direction::East);
        }

        for UnorderedPair(l1, l2) in self.walls.iter() {
            // adjacency was checked on the way in
            if let Some(direction) = Direction::direction_to(*l1, *l2) {
                cells[l1.as_index()].add_wall(direction);
                cells[l2.as_index()].add_wall(direction.invert());
            }
        }

        for (ball, (_, hole)) in (1..).zip(self.pairs.iter()) {
            cells[hole.as_index()].add_hole(ball);
        }

        Ok(Board {
            size: self.size,
            cells,
            balls: self.pairs.iter().map(|(ball, _)| *ball).collect_vec(),
            holes: self.pairs.iter().map(|(_, hole)| *hole).collect_vec(),
        })
    }
}
