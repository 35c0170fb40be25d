// Fixed-depth minimax agent

use log::debug;
use std::sync::Arc;

use crate::agent::Agent;
use crate::board::Board;
use crate::config::{Config, OpeningConfig};
use crate::eval::{Evaluator, Score, LOSS, WIN};
use crate::search::{root_shortcut, successors, SearchContext, SearchReport};
use crate::timer::{SearchTimeout, TimeBudget};
use crate::types::Move;

/// Exhaustive minimax to a depth fixed at construction
pub struct MinimaxPlayer {
    search_depth: u32,
    evaluator: Arc<dyn Evaluator>,
    timeout_threshold_ms: f64,
    opening: Option<OpeningConfig>,
    name: String,
}

impl MinimaxPlayer {
    /// Creates a minimax agent with the opening shortcut disabled
    ///
    /// # Arguments
    /// * `search_depth` - Plies to explore; 0 is raised to 1, since the root
    ///   always expands its moves. `Config::validate` rejects 0 outright.
    /// * `evaluator` - Leaf scorer
    /// * `timeout_threshold_ms` - Abort once less time than this remains
    pub fn new(search_depth: u32, evaluator: Arc<dyn Evaluator>, timeout_threshold_ms: f64) -> Self {
        let search_depth = search_depth.max(1);
        let name = format!("minimax{}/{}", search_depth, evaluator.name());
        MinimaxPlayer {
            search_depth,
            evaluator,
            timeout_threshold_ms,
            opening: None,
            name,
        }
    }

    /// Builds the agent from `[search]`, `[scores]` and `[opening]`
    pub fn from_config(config: &Config) -> Self {
        let evaluator = config.scores.heuristic.build(&config.scores);
        MinimaxPlayer::new(
            config.search.search_depth,
            evaluator,
            config.search.timeout_threshold_ms,
        )
        .with_opening(config.opening.clone())
    }

    pub fn with_opening(mut self, opening: OpeningConfig) -> Self {
        self.opening = Some(opening);
        self
    }

    pub fn search_depth(&self) -> u32 {
        self.search_depth
    }

    /// Runs one fixed-depth search. On timeout the first legal move is used.
    pub fn search(&self, state: &Board, time_left: &dyn Fn() -> f64) -> SearchReport {
        let moves = state.active_moves();
        if let Some(mv) = root_shortcut(state, &moves, self.opening.as_ref()) {
            return SearchReport::shortcut(mv);
        }
        let fallback = moves[0];

        let budget = TimeBudget::new(time_left, self.timeout_threshold_ms);
        let mut ctx = SearchContext::new(budget, self.evaluator.as_ref(), state.active_player());

        let (best_move, timed_out) = match minimax(&mut ctx, state, self.search_depth) {
            Ok(mv) => {
                ctx.stats.completed_depth = self.search_depth;
                (mv, false)
            }
            Err(SearchTimeout) => {
                debug!(
                    "{}: timed out after {} nodes, falling back to {}",
                    self.name, ctx.stats.nodes, fallback
                );
                (fallback, true)
            }
        };

        debug!(
            "{}: chose {} (nodes: {}, leaves: {})",
            self.name, best_move, ctx.stats.nodes, ctx.stats.leaf_evals
        );

        SearchReport {
            best_move,
            stats: ctx.stats,
            timed_out,
            shortcut: false,
        }
    }
}

impl Agent for MinimaxPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, state: &Board, time_left: &dyn Fn() -> f64) -> Move {
        self.search(state, time_left).best_move
    }
}

/// Root of the minimax recursion. Ties keep the earliest generated move.
fn minimax(
    ctx: &mut SearchContext<'_>,
    state: &Board,
    depth: u32,
) -> Result<Move, SearchTimeout> {
    ctx.enter()?;

    let mut best_move = Move::NONE;
    let mut best_score = LOSS;

    for (mv, child) in successors(state) {
        if best_move.is_none() {
            best_move = mv;
        }
        let score = min_max_value(ctx, &child, depth.saturating_sub(1), false)?;
        if score > best_score {
            best_score = score;
            best_move = mv;
        }
    }

    Ok(best_move)
}

fn min_max_value(
    ctx: &mut SearchContext<'_>,
    state: &Board,
    depth: u32,
    maximizing: bool,
) -> Result<Score, SearchTimeout> {
    ctx.enter()?;

    if depth == 0 || state.is_terminal() {
        return Ok(ctx.evaluate(state));
    }

    let mut value = if maximizing { LOSS } else { WIN };
    for (_, child) in successors(state) {
        let child_value = min_max_value(ctx, &child, depth - 1, !maximizing)?;
        value = if maximizing {
            value.max(child_value)
        } else {
            value.min(child_value)
        };
    }

    Ok(value)
}
