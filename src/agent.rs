// Agent interface used by the tournament driver, plus two search-free
// baseline opponents

use rand::seq::IndexedRandom;
use std::sync::Arc;

use crate::board::Board;
use crate::eval::{Evaluator, LOSS};
use crate::types::Move;

/// Anything that can pick a move for the active player of a board
pub trait Agent: Send + Sync {
    /// Label used in logs and tournament tables
    fn name(&self) -> &str;

    /// Returns a legal move for `state.active_player()`, or `Move::NONE` when
    /// there is none. `time_left` reports milliseconds remaining this turn.
    fn choose_move(&self, state: &Board, time_left: &dyn Fn() -> f64) -> Move;
}

/// Picks uniformly among legal moves
#[derive(Debug, Default)]
pub struct RandomPlayer;

impl Agent for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&self, state: &Board, _time_left: &dyn Fn() -> f64) -> Move {
        state
            .active_moves()
            .choose(&mut rand::rng())
            .copied()
            .unwrap_or(Move::NONE)
    }
}

/// One-ply lookahead: takes the move whose successor scores best
pub struct GreedyPlayer {
    evaluator: Arc<dyn Evaluator>,
    name: String,
}

impl GreedyPlayer {
    pub fn new(evaluator: Arc<dyn Evaluator>) -> Self {
        let name = format!("greedy/{}", evaluator.name());
        GreedyPlayer { evaluator, name }
    }
}

impl Agent for GreedyPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, state: &Board, _time_left: &dyn Fn() -> f64) -> Move {
        let me = state.active_player();
        let mut best_move = Move::NONE;
        let mut best_score = LOSS;

        for mv in state.active_moves() {
            if best_move.is_none() {
                best_move = mv;
            }
            if let Ok(next) = state.forecast(mv) {
                let score = self.evaluator.score(&next, me);
                if score > best_score {
                    best_score = score;
                    best_move = mv;
                }
            }
        }

        best_move
    }
}
