// Plumbing shared by the minimax and alpha-beta engines
//
// A SearchContext lives for exactly one `search` call: it owns the time
// budget, the fixed perspective player, the evaluator handle and the counters.

use log::error;

use crate::board::Board;
use crate::config::OpeningConfig;
use crate::eval::{Evaluator, Score};
use crate::timer::{SearchTimeout, TimeBudget};
use crate::types::{Move, Player};

/// Work counters for a single search call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Recursive frames entered (each one polled the time budget)
    pub nodes: u64,
    /// Evaluator invocations at depth or terminal cutoffs
    pub leaf_evals: u64,
    /// Alpha-beta sibling cutoffs
    pub cutoffs: u64,
    /// Deepest search that finished without timing out
    pub completed_depth: u32,
}

/// What a search call decided and how it got there
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchReport {
    pub best_move: Move,
    pub stats: SearchStats,
    /// The deadline interrupted the search and the fallback move was used
    pub timed_out: bool,
    /// Decided without searching (no moves, a single move, or the opening)
    pub shortcut: bool,
}

impl SearchReport {
    pub(crate) fn shortcut(best_move: Move) -> Self {
        SearchReport {
            best_move,
            stats: SearchStats::default(),
            timed_out: false,
            shortcut: true,
        }
    }
}

pub(crate) struct SearchContext<'a> {
    budget: TimeBudget<'a>,
    evaluator: &'a dyn Evaluator,
    perspective: Player,
    pub stats: SearchStats,
}

impl<'a> SearchContext<'a> {
    pub fn new(budget: TimeBudget<'a>, evaluator: &'a dyn Evaluator, perspective: Player) -> Self {
        SearchContext {
            budget,
            evaluator,
            perspective,
            stats: SearchStats::default(),
        }
    }

    /// Must be the first call of every recursive frame
    #[inline]
    pub fn enter(&mut self) -> Result<(), SearchTimeout> {
        self.budget.check()?;
        self.stats.nodes += 1;
        Ok(())
    }

    /// Scores a leaf from the searching player's point of view, never the
    /// locally active player's
    pub fn evaluate(&mut self, state: &Board) -> Score {
        self.stats.leaf_evals += 1;
        self.evaluator.score(state, self.perspective)
    }
}

/// Successor states of the active player's legal moves, in generation order
pub(crate) fn successors(state: &Board) -> impl Iterator<Item = (Move, Board)> + '_ {
    state
        .active_moves()
        .into_iter()
        .filter_map(move |mv| match state.forecast(mv) {
            Ok(next) => Some((mv, next)),
            Err(e) => {
                // Board produced a move it refuses to apply
                error!("Skipping unforecastable generated move: {}", e);
                None
            }
        })
}

/// Cells tried by the opening shortcut: the centre, then its orthogonal
/// neighbours
pub fn opening_candidates(state: &Board) -> [Move; 5] {
    let center = Move::new(state.height() / 2, state.width() / 2);
    [
        center,
        center.offset(-1, 0),
        center.offset(1, 0),
        center.offset(0, -1),
        center.offset(0, 1),
    ]
}

/// Root decisions that need no search: the sentinel when there is no move,
/// the only move when there is exactly one, and a central cell when the root
/// is wide open and the opening shortcut is enabled.
pub(crate) fn root_shortcut(
    state: &Board,
    moves: &[Move],
    opening: Option<&OpeningConfig>,
) -> Option<Move> {
    match moves.len() {
        0 => return Some(Move::NONE),
        1 => return Some(moves[0]),
        _ => {}
    }

    let wide_open = opening.map_or(false, |o| o.enabled && moves.len() > o.trigger_above);
    if !wide_open {
        return None;
    }

    opening_candidates(state)
        .iter()
        .copied()
        .find(|candidate| moves.contains(candidate))
}
