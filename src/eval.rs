// Static evaluation functions
//
// The search engines only see the `Evaluator` capability; any variant below
// (or a caller-supplied one) can be installed without touching search code.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::board::Board;
use crate::config::ScoresConfig;
use crate::types::Player;

/// Totally ordered evaluation value. Finite for every non-terminal state.
pub type Score = f64;

/// Score of a state the perspective player has already lost
pub const LOSS: Score = f64::NEG_INFINITY;

/// Score of a state the perspective player has already won
pub const WIN: Score = f64::INFINITY;

/// A pure scoring function `(state, perspective) -> Score`.
///
/// Implementations must return `LOSS` when `state.is_loser(player)` and `WIN`
/// when `state.is_winner(player)` before doing any heuristic work, and a finite
/// value otherwise.
pub trait Evaluator: Send + Sync {
    fn score(&self, state: &Board, player: Player) -> Score;

    /// Short label used in logs and tournament tables
    fn name(&self) -> &str;
}

/// Shared terminal check every variant runs first
fn terminal_score(state: &Board, player: Player) -> Option<Score> {
    if state.is_loser(player) {
        Some(LOSS)
    } else if state.is_winner(player) {
        Some(WIN)
    } else {
        None
    }
}

fn mobility(state: &Board, player: Player) -> f64 {
    state.legal_moves(player).len() as f64
}

/// Squared distance of `player` from the centre of the board; 0.0 before placement
fn center_distance(state: &Board, player: Player) -> f64 {
    let half_w = state.width() as f64 / 2.0;
    let half_h = state.height() as f64 / 2.0;

    match state.location_of(player) {
        Some(cell) => (half_h - cell.row as f64).powi(2) + (half_w - cell.col as f64).powi(2),
        None => 0.0,
    }
}

/// Number of moves available to the player
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenMoveScore;

impl Evaluator for OpenMoveScore {
    fn score(&self, state: &Board, player: Player) -> Score {
        if let Some(terminal) = terminal_score(state, player) {
            return terminal;
        }
        mobility(state, player)
    }

    fn name(&self) -> &str {
        "open_move"
    }
}

/// Own mobility minus weighted opponent mobility
#[derive(Debug, Clone, Copy)]
pub struct ImprovedScore {
    pub opponent_weight: f64,
}

impl Evaluator for ImprovedScore {
    fn score(&self, state: &Board, player: Player) -> Score {
        if let Some(terminal) = terminal_score(state, player) {
            return terminal;
        }
        let own = mobility(state, player);
        let opp = mobility(state, state.opponent_of(player));
        own - self.opponent_weight * opp
    }

    fn name(&self) -> &str {
        "improved"
    }
}

/// Squared distance from the board centre
#[derive(Debug, Clone, Copy, Default)]
pub struct CenterScore;

impl Evaluator for CenterScore {
    fn score(&self, state: &Board, player: Player) -> Score {
        if let Some(terminal) = terminal_score(state, player) {
            return terminal;
        }
        center_distance(state, player)
    }

    fn name(&self) -> &str {
        "center"
    }
}

/// Mobility difference blended with the centre-distance difference
#[derive(Debug, Clone, Copy)]
pub struct BlendScore {
    pub opponent_weight: f64,
    pub center_weight: f64,
}

impl Evaluator for BlendScore {
    fn score(&self, state: &Board, player: Player) -> Score {
        if let Some(terminal) = terminal_score(state, player) {
            return terminal;
        }
        let opponent = state.opponent_of(player);
        let moves = mobility(state, player) - self.opponent_weight * mobility(state, opponent);
        let center = center_distance(state, player)
            - self.opponent_weight * center_distance(state, opponent);
        moves + self.center_weight * center
    }

    fn name(&self) -> &str {
        "blend"
    }
}

/// Switches to a harsher opponent-mobility penalty once the player is
/// running short of moves.
#[derive(Debug, Clone, Copy)]
pub struct TieredScore {
    pub tier_threshold: usize,
    pub relaxed_weight: f64,
    pub aggressive_weight: f64,
}

impl Evaluator for TieredScore {
    fn score(&self, state: &Board, player: Player) -> Score {
        if let Some(terminal) = terminal_score(state, player) {
            return terminal;
        }
        let own_moves = state.legal_moves(player).len();
        let opp = mobility(state, state.opponent_of(player));

        let weight = if own_moves <= self.tier_threshold {
            self.aggressive_weight
        } else {
            self.relaxed_weight
        };
        own_moves as f64 - weight * opp
    }

    fn name(&self) -> &str {
        "tiered"
    }
}

/// Selects an evaluator variant by name in `Isolation.toml`
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    OpenMove,
    Improved,
    Center,
    Blend,
    Tiered,
}

impl Heuristic {
    /// Builds the evaluator, pulling weights from the scores configuration
    pub fn build(&self, scores: &ScoresConfig) -> Arc<dyn Evaluator> {
        match self {
            Heuristic::OpenMove => Arc::new(OpenMoveScore),
            Heuristic::Improved => Arc::new(ImprovedScore {
                opponent_weight: scores.opponent_weight,
            }),
            Heuristic::Center => Arc::new(CenterScore),
            Heuristic::Blend => Arc::new(BlendScore {
                opponent_weight: scores.opponent_weight,
                center_weight: scores.center_weight,
            }),
            Heuristic::Tiered => Arc::new(TieredScore {
                tier_threshold: scores.tier_threshold,
                relaxed_weight: scores.relaxed_weight,
                aggressive_weight: scores.aggressive_weight,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::types::Move;

    fn open_board() -> Board {
        Board::with_positions(7, 7, &[], Move::new(3, 3), Move::new(0, 0), Player::One).unwrap()
    }

    #[test]
    fn test_open_move_counts_mobility() {
        let board = open_board();
        assert_eq!(OpenMoveScore.score(&board, Player::One), 8.0);
        assert_eq!(OpenMoveScore.score(&board, Player::Two), 2.0);
    }

    #[test]
    fn test_improved_weights_opponent() {
        let board = open_board();
        let eval = ImprovedScore {
            opponent_weight: 2.0,
        };
        assert_eq!(eval.score(&board, Player::One), 8.0 - 4.0);
    }

    #[test]
    fn test_center_distance_on_odd_board() {
        let board = open_board();
        // Centre of a 7x7 board is (3.5, 3.5)
        assert_eq!(CenterScore.score(&board, Player::One), 0.5);
        assert_eq!(CenterScore.score(&board, Player::Two), 24.5);
    }

    #[test]
    fn test_tiered_switches_weight_when_short_of_moves() {
        let eval = TieredScore {
            tier_threshold: 2,
            relaxed_weight: 1.0,
            aggressive_weight: 3.0,
        };
        let board = open_board();
        // Player Two has 2 moves so the aggressive tier applies: 2 - 3 * 8
        assert_eq!(eval.score(&board, Player::Two), -22.0);
        // Player One has 8 moves: 8 - 1 * 2
        assert_eq!(eval.score(&board, Player::One), 6.0);
    }

    #[test]
    fn test_every_heuristic_builds_from_default_config() {
        let config = Config::default_hardcoded();
        let board = open_board();
        for heuristic in [
            Heuristic::OpenMove,
            Heuristic::Improved,
            Heuristic::Center,
            Heuristic::Blend,
            Heuristic::Tiered,
        ]
        .iter()
        {
            let eval = heuristic.build(&config.scores);
            assert!(eval.score(&board, Player::One).is_finite(), "{}", eval.name());
        }
    }
}
