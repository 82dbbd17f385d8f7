//! Fixed-depth move selection and static evaluation.
//!
//! The selector expands the full game tree to a fixed depth (no pruning)
//! and scores each root successor by the material balance of the position
//! the recursive search would pick below it. The maximize/minimize rule is
//! keyed to the root mover at every level; scores are not negated or
//! alternated per ply.
//!
//! With the `parallel` feature, root successors are searched on the rayon
//! thread pool. Scores are collected in generation order, so the chosen
//! position is the same as in a sequential search.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::board::Color;
use crate::constants::DEFAULT_DEPTH;
use crate::position::Position;

/// Material balance: White's pieces (on board and in hand) minus Black's.
#[inline]
pub fn evaluate(pos: &Position) -> i32 {
    i32::from(pos.total_pieces(Color::White)) - i32::from(pos.total_pieces(Color::Black))
}

/// Counters collected during one call to [`MoveSelector::select_with_stats`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Successor positions generated
    pub positions: u64,
    /// Positions scored with the static evaluator at the deepest level
    pub leaves: u64,
}

#[derive(Default)]
struct Counters {
    positions: AtomicU64,
    leaves: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> SearchStats {
        SearchStats {
            positions: self.positions.load(Ordering::Relaxed),
            leaves: self.leaves.load(Ordering::Relaxed),
        }
    }
}

/// Fixed-depth selector for the computer-controlled side.
#[derive(Clone, Debug)]
pub struct MoveSelector {
    depth: u32,
    parallel: bool,
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}

impl MoveSelector {
    /// Create a selector. Depth 0 scores the immediate successors only.
    pub fn new(depth: u32) -> Self {
        Self {
            depth,
            parallel: cfg!(feature = "parallel"),
        }
    }

    /// Enable or disable the parallel root fan-out. Has no effect without
    /// the `parallel` feature.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Pick the successor of `start` judged best for its side to move.
    ///
    /// Returns `None` if `start` has no legal successors; callers are
    /// expected to check for a finished game first.
    pub fn select(&self, start: &Position) -> Option<Position> {
        self.select_with_stats(start).0
    }

    pub fn select_with_stats(&self, start: &Position) -> (Option<Position>, SearchStats) {
        let counters = Counters::default();
        let best = select_at(start, self.depth, &counters, self.parallel);
        let stats = counters.snapshot();
        debug!(
            "depth {} search for {}: {} positions, {} leaves",
            self.depth,
            start.current_color(),
            stats.positions,
            stats.leaves
        );
        (best, stats)
    }
}

fn select_at(
    start: &Position,
    depth: u32,
    counters: &Counters,
    parallel: bool,
) -> Option<Position> {
    let successors = start.generate_next_states();
    counters
        .positions
        .fetch_add(successors.len() as u64, Ordering::Relaxed);

    let scores: Vec<i32> = if depth == 0 {
        counters
            .leaves
            .fetch_add(successors.len() as u64, Ordering::Relaxed);
        successors.iter().map(evaluate).collect()
    } else {
        // A successor without moves of its own is scored as it stands.
        let score = |s: &Position| match select_at(s, depth - 1, counters, false) {
            Some(picked) => evaluate(&picked),
            None => evaluate(s),
        };
        score_all(&successors, parallel, score)
    };

    pick_best(start.current_color(), successors, &scores)
}

#[cfg(feature = "parallel")]
fn score_all<F>(states: &[Position], parallel: bool, score: F) -> Vec<i32>
where
    F: Fn(&Position) -> i32 + Send + Sync,
{
    if parallel {
        states.par_iter().map(score).collect()
    } else {
        states.iter().map(score).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn score_all<F>(states: &[Position], _parallel: bool, score: F) -> Vec<i32>
where
    F: Fn(&Position) -> i32,
{
    states.iter().map(score).collect()
}

/// First position with the highest score for White, lowest for Black.
fn pick_best(mover: Color, mut states: Vec<Position>, scores: &[i32]) -> Option<Position> {
    let mut best: Option<(usize, i32)> = None;
    for (i, &score) in scores.iter().enumerate() {
        let better = match best {
            None => true,
            Some((_, current)) => match mover {
                Color::White => score > current,
                Color::Black => score < current,
            },
        };
        if better {
            best = Some((i, score));
        }
    }
    let (index, _) = best?;
    Some(states.swap_remove(index))
}

/// Number of successor positions at one ply of [`count_positions`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PlyCount {
    /// Successors generated from the distinct positions of the previous ply
    pub generated: usize,
    /// Distinct positions among them
    pub distinct: usize,
}

/// Expand the game tree `plies` levels below `start`.
///
/// Transpositions are merged after every ply before expanding further.
pub fn count_positions(start: &Position, plies: usize) -> Vec<PlyCount> {
    let mut frontier = vec![start.clone()];
    let mut counts = Vec::with_capacity(plies);
    for ply in 1..=plies {
        let mut generated = 0;
        let mut seen = HashSet::new();
        for pos in &frontier {
            for next in pos.generate_next_states() {
                generated += 1;
                seen.insert(next);
            }
        }
        debug!("ply {ply}: {generated} generated, {} distinct", seen.len());
        counts.push(PlyCount {
            generated,
            distinct: seen.len(),
        });
        frontier = seen.into_iter().collect();
    }
    counts
}
