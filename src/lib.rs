#![warn(missing_docs)]

//! # `tiltboard`
//!
//! A solver for tilting-table puzzles: balls sit on a square table with walls between some cells, and every ball has a hole of its own.
//! Tilting the table rolls every ball at once until it meets a wall or another ball; a ball crossing its own hole drops in.
//! The goal is to sink every ball with as few tilts as possible, without any ball dropping into a hole which is not its own.
//!
//! Begin by building a board with a [`BoardBuilder`](builder::BoardBuilder), or read one from text with [`input::parse`].
//! Then call [`solve()`](crate::Board::solve), yielding every shortest winning sequence of tilts, or use a [`Solver`] directly to bound the search.
//!
//! # Internals
//! Before searching, the table is condensed into a "roll graph" ([`RollGraph`]) which records, for every cell and direction, where a lone ball would stop and which holes it would roll over on the way.
//! Holes are assumed filled while building it, so it depends only on the table and never changes during a search.
//!
//! A tilt with several balls is then resolved front to back:
//! the ball nearest the side being tilted towards settles first, each next ball either drops into one of its holes along its path or piles up behind those already settled.
//! If any ball would drop into another ball's open hole, the tilt is refused.
//!
//! The search is breadth-first over sequences of tilts, so the first winners found are the shortest.
//! Every ball remembers each cell it has rested on; a tilt after which no ball has reached a new cell is abandoned,
//! which both removes pointless branches and guarantees the search ends even on unsolvable tables.

pub use ball::BallID;
pub use board::Board;
pub use builder::{BoardBuilder, BuilderInvalidReason};
pub use cell::{Cell, Contact};
pub use direction::Direction;
pub use graph::{Roll, RollGraph, RollNode, WrongHole};
pub use location::{Dimension, Location};
pub use movement::{Collision, Movement};
pub use solver::{SearchLimits, SearchStats, Solution, Solver, SolverFailure};

pub(crate) mod ball;
pub(crate) mod board;
pub mod builder;
pub(crate) mod cell;
pub(crate) mod direction;
pub mod graph;
pub mod input;
pub(crate) mod location;
pub(crate) mod movement;
pub(crate) mod solver;
mod tests;
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::solve_table;
