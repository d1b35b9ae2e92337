use std::collections::VecDeque;
use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

use itertools::Itertools;
use strum::VariantArray;

use crate::board::Board;
use crate::direction::Direction;
use crate::graph::RollGraph;
use crate::movement::{Collision, Movement};

/// Reasons a [`Solver`] may fail.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SolverFailure {
    /// Applying a tilt put two balls in one cell, or a ball in a hole it does not own.
    /// This means the tilt resolver is broken and should never happen.
    Collision(Collision),
}

impl From<Collision> for SolverFailure {
    fn from(value: Collision) -> Self {
        Self::Collision(value)
    }
}

/// Optional bounds on a search. The default is unbounded.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchLimits {
    max_moves: Option<usize>,
    time_limit: Option<Duration>,
}

impl SearchLimits {
    /// Never look at sequences longer than `max_moves` tilts.
    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = Some(max_moves);
        self
    }

    /// Stop searching once `time_limit` has elapsed, keeping whatever was found so far.
    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    /// The longest sequence the search will look at, if bounded.
    pub fn max_moves(&self) -> Option<usize> {
        self.max_moves
    }

    /// How long the search may run, if bounded.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }
}

/// Counters collected while searching.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SearchStats {
    /// Sequences which had every direction tried on them.
    pub lines_expanded: u64,
    /// Tilts abandoned because a ball fell into someone else's hole.
    pub wrong_holes: u64,
    /// Tilts abandoned because no ball reached a new cell.
    pub loops: u64,
    /// Sequences dropped for being no shorter than the best winner.
    pub pruned: u64,
    /// Winning sequences recorded, including ones later beaten by a shorter winner.
    pub solutions_found: u64,
    /// The most sequences waiting in the queue at once.
    pub max_queue_len: usize,
    /// Wall-clock time spent searching. Only measured under a time limit, otherwise zero.
    pub time_total: Duration,
}

impl Display for SearchStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "lines expanded:  {}", self.lines_expanded)?;
        writeln!(f, "wrong holes:     {}", self.wrong_holes)?;
        writeln!(f, "loops:           {}", self.loops)?;
        writeln!(f, "pruned:          {}", self.pruned)?;
        writeln!(f, "solutions found: {}", self.solutions_found)?;
        writeln!(f, "peak queue:      {}", self.max_queue_len)?;
        if !self.time_total.is_zero() {
            writeln!(f, "time:            {:?}", self.time_total)?;
        }

        Ok(())
    }
}

/// Every shortest winning sequence of tilts found by a [`Solver`].
#[derive(Clone, Debug)]
pub struct Solution {
    sequences: Vec<Vec<Direction>>,
    exhaustive: bool,
    stats: SearchStats,
}

impl Solution {
    /// The winning sequences, all of the same length, in the order they were found.
    /// Empty if the table cannot be cleared.
    pub fn sequences(&self) -> &[Vec<Direction>] {
        &self.sequences
    }

    /// Whether no winning sequence was found.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// The number of tilts in each winning sequence.
    pub fn moves(&self) -> Option<usize> {
        self.sequences.first().map(Vec::len)
    }

    /// Whether the search ran to completion rather than being cut short by a [`SearchLimits`].
    pub fn is_exhaustive(&self) -> bool {
        self.exhaustive
    }

    /// Counters from the search which produced this solution.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for sequence in &self.sequences {
            writeln!(f, "{}", sequence.iter().join(" "))?;
        }

        Ok(())
    }
}

// one sequence of tilts from the starting position, and where it leads
struct Line {
    tilts: Vec<Direction>,
    state: Movement,
}

/// Breadth-first search for the shortest sequences of tilts which sink every ball.
///
/// # Search
/// Sequences are explored in order of length from a FIFO queue, trying [`Direction::VARIANTS`] in order on each.
/// A tilt is dropped when a ball falls into a hole that is not its own, and when it brings no ball to a cell that ball has never been on (see [`Movement::is_looped`]).
/// The second rule bounds the depth of the search, so it always terminates.
///
/// Once a winner is known, no sequence longer than it is extended.
/// Winners of equal length are all kept; a strictly shorter winner replaces them.
pub struct Solver<'a> {
    board: &'a Board,
    graph: RollGraph,
    limits: SearchLimits,
}

impl<'a> Solver<'a> {
    /// Prepare to search `board`, building its [`RollGraph`].
    pub fn new(board: &'a Board, limits: SearchLimits) -> Self {
        Self {
            board,
            graph: board.roll_graph(),
            limits,
        }
    }

    /// The roll graph this solver tilts with.
    pub fn graph(&self) -> &RollGraph {
        &self.graph
    }

    /// Run the search.
    ///
    /// Returns [`Ok`] with every shortest winning sequence found, possibly none, or [`Err`] with a [`SolverFailure`] reason.
    pub fn solve(&self) -> Result<Solution, SolverFailure> {
        // the clock is only read under a time limit; wasm32-unknown-unknown has none
        let deadline = self.limits.time_limit.map(|limit| (Instant::now(), limit));

        let mut stats = SearchStats::default();
        let mut timed_out = false;
        let mut truncated = false;
        let mut winners: Vec<Vec<Direction>> = Vec::new();
        let mut queue = VecDeque::from([Line { tilts: Vec::new(), state: self.board.initial_movement() }]);

        log::debug!("searching {} balls on a {}x{} table", self.board.balls().len(), self.board.size(), self.board.size());

        while let Some(line) = queue.pop_front() {
            if deadline.is_some_and(|(started, limit)| started.elapsed() >= limit) {
                log::debug!("time limit reached with {} sequences queued", queue.len() + 1);
                timed_out = true;
                break;
            }

            let best = winners.first().map(Vec::len);
            let moves = line.tilts.len();

            if best.is_some_and(|best| moves > best) {
                stats.pruned += 1;
                continue;
            }

            if line.state.is_won() {
                stats.solutions_found += 1;
                match best {
                    Some(best) if best == moves => {}
                    _ => {
                        log::info!("new shortest winner of {} tilts: {}", moves, line.tilts.iter().join(" "));
                        winners.clear();
                    }
                }
                winners.push(line.tilts);
                continue;
            }

            // a longer line can only win in more moves
            if best.is_some_and(|best| moves >= best) {
                stats.pruned += 1;
                continue;
            }

            if self.limits.max_moves.is_some_and(|max_moves| moves >= max_moves) {
                log::trace!("[{}]: too long", line.tilts.iter().join(" "));
                truncated = true;
                continue;
            }

            stats.lines_expanded += 1;
            for to in Direction::VARIANTS {
                if let Some(next) = self.extend(&line, *to, &mut stats)? {
                    queue.push_back(next);
                }
            }
            stats.max_queue_len = stats.max_queue_len.max(queue.len());
        }

        stats.time_total = deadline.map(|(started, _)| started.elapsed()).unwrap_or_default();
        log::debug!("search finished with {} winners after expanding {} lines in {:?}",
            winners.len(), stats.lines_expanded, stats.time_total);

        // any winner is within max_moves, so nothing cut off by it could have been shorter
        let exhaustive = !timed_out && (!truncated || !winners.is_empty());

        Ok(Solution {
            sequences: winners,
            exhaustive,
            stats,
        })
    }

    fn extend(&self, line: &Line, to: Direction, stats: &mut SearchStats) -> Result<Option<Line>, SolverFailure> {
        let rolls = match self.graph.tilt(to, line.state.occupied(), line.state.open_holes()) {
            Ok(rolls) => rolls,
            Err(wrong) => {
                log::trace!("[{}] {}: ball {} fell into the hole of ball {} at {}",
                    line.tilts.iter().join(" "), to, wrong.ball, wrong.owner, wrong.hole);
                stats.wrong_holes += 1;
                return Ok(None);
            }
        };

        let mut state = line.state.after(to);
        for roll in rolls {
            state.advance_ball(roll.ball, roll.from, roll.to)?;
        }

        if state.is_looped() {
            log::trace!("[{}] {}: looped", line.tilts.iter().join(" "), to);
            stats.loops += 1;
            return Ok(None);
        }

        let mut tilts = Vec::with_capacity(line.tilts.len() + 1);
        tilts.extend_from_slice(&line.tilts);
        tilts.push(to);

        Ok(Some(Line { tilts, state }))
    }
}
