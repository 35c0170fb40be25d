// Alpha-beta agent driven by iterative deepening
//
// Depth 1, 2, 3, ... is searched until the time budget trips. The move from
// the last depth that finished is returned; a partially searched depth is
// discarded. There is no depth ceiling: on a finished tree the loop keeps
// re-searching until the deadline ends it.

use log::{debug, trace};
use std::sync::Arc;

use crate::agent::Agent;
use crate::board::Board;
use crate::config::{Config, OpeningConfig};
use crate::eval::{Evaluator, Score, LOSS, WIN};
use crate::search::{root_shortcut, successors, SearchContext, SearchReport};
use crate::timer::{SearchTimeout, TimeBudget};
use crate::types::Move;

/// Anytime alpha-beta search agent
pub struct AlphaBetaPlayer {
    evaluator: Arc<dyn Evaluator>,
    timeout_threshold_ms: f64,
    opening: Option<OpeningConfig>,
    name: String,
}

impl AlphaBetaPlayer {
    /// Creates an alpha-beta agent with the opening shortcut disabled
    pub fn new(evaluator: Arc<dyn Evaluator>, timeout_threshold_ms: f64) -> Self {
        let name = format!("alphabeta/{}", evaluator.name());
        AlphaBetaPlayer {
            evaluator,
            timeout_threshold_ms,
            opening: None,
            name,
        }
    }

    /// Builds the agent from `[search]`, `[scores]` and `[opening]`
    pub fn from_config(config: &Config) -> Self {
        let evaluator = config.scores.heuristic.build(&config.scores);
        AlphaBetaPlayer::new(evaluator, config.search.timeout_threshold_ms)
            .with_opening(config.opening.clone())
    }

    pub fn with_opening(mut self, opening: OpeningConfig) -> Self {
        self.opening = Some(opening);
        self
    }

    /// Single alpha-beta search to `depth`, without deepening. A `depth` of 0
    /// is searched as 1. Falls back to the first legal move on timeout.
    pub fn search_to_depth(
        &self,
        state: &Board,
        depth: u32,
        time_left: &dyn Fn() -> f64,
    ) -> SearchReport {
        let moves = state.active_moves();
        if let Some(mv) = root_shortcut(state, &moves, self.opening.as_ref()) {
            return SearchReport::shortcut(mv);
        }

        let budget = TimeBudget::new(time_left, self.timeout_threshold_ms);
        let mut ctx = SearchContext::new(budget, self.evaluator.as_ref(), state.active_player());

        let depth = depth.max(1);
        let (best_move, timed_out) = match alphabeta(&mut ctx, state, depth) {
            Ok(mv) => {
                ctx.stats.completed_depth = depth;
                (mv, false)
            }
            Err(SearchTimeout) => (moves[0], true),
        };

        SearchReport {
            best_move,
            stats: ctx.stats,
            timed_out,
            shortcut: false,
        }
    }

    /// Iterative deepening until the time budget trips
    pub fn search(&self, state: &Board, time_left: &dyn Fn() -> f64) -> SearchReport {
        let moves = state.active_moves();
        if let Some(mv) = root_shortcut(state, &moves, self.opening.as_ref()) {
            return SearchReport::shortcut(mv);
        }

        let budget = TimeBudget::new(time_left, self.timeout_threshold_ms);
        let mut ctx = SearchContext::new(budget, self.evaluator.as_ref(), state.active_player());

        let mut best_move = moves[0];
        let mut depth: u32 = 1;

        // Only a timeout ends the loop
        while let Ok(mv) = alphabeta(&mut ctx, state, depth) {
            best_move = mv;
            ctx.stats.completed_depth = depth;
            trace!(
                "{}: depth {} complete, best {} ({} nodes so far)",
                self.name,
                depth,
                mv,
                ctx.stats.nodes
            );
            depth = depth.saturating_add(1);
        }

        debug!(
            "{}: chose {} at depth {} (nodes: {}, leaves: {}, cutoffs: {})",
            self.name,
            best_move,
            ctx.stats.completed_depth,
            ctx.stats.nodes,
            ctx.stats.leaf_evals,
            ctx.stats.cutoffs
        );

        SearchReport {
            best_move,
            stats: ctx.stats,
            timed_out: true,
            shortcut: false,
        }
    }
}

impl Agent for AlphaBetaPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, state: &Board, time_left: &dyn Fn() -> f64) -> Move {
        self.search(state, time_left).best_move
    }
}

/// Root of one alpha-beta pass. Alpha is raised after every root child, so
/// later siblings are searched against the best value found so far.
fn alphabeta(
    ctx: &mut SearchContext<'_>,
    state: &Board,
    depth: u32,
) -> Result<Move, SearchTimeout> {
    ctx.enter()?;

    let mut alpha = LOSS;
    let beta = WIN;
    let mut best_move = Move::NONE;
    let mut best_score = LOSS;

    for (mv, child) in successors(state) {
        if best_move.is_none() {
            best_move = mv;
        }
        let score = alpha_beta_value(ctx, &child, alpha, beta, depth.saturating_sub(1), false)?;
        alpha = alpha.max(score);
        if score > best_score {
            best_score = score;
            best_move = mv;
        }
    }

    Ok(best_move)
}

fn alpha_beta_value(
    ctx: &mut SearchContext<'_>,
    state: &Board,
    mut alpha: Score,
    mut beta: Score,
    depth: u32,
    maximizing: bool,
) -> Result<Score, SearchTimeout> {
    ctx.enter()?;

    if depth == 0 || state.is_terminal() {
        return Ok(ctx.evaluate(state));
    }

    if maximizing {
        let mut value = LOSS;
        for (_, child) in successors(state) {
            value = value.max(alpha_beta_value(ctx, &child, alpha, beta, depth - 1, false)?);
            if value >= beta {
                ctx.stats.cutoffs += 1;
                return Ok(value);
            }
            alpha = alpha.max(value);
        }
        Ok(value)
    } else {
        let mut value = WIN;
        for (_, child) in successors(state) {
            value = value.min(alpha_beta_value(ctx, &child, alpha, beta, depth - 1, true)?);
            if value <= alpha {
                ctx.stats.cutoffs += 1;
                return Ok(value);
            }
            beta = beta.min(value);
        }
        Ok(value)
    }
}
