// Evaluator ordering: terminal states map to the extremal scores and every
// other state scores strictly between them, for every built-in heuristic.

use isolation_agent::board::Board;
use isolation_agent::config::Config;
use isolation_agent::eval::{Evaluator, Heuristic, LOSS, WIN};
use isolation_agent::types::{Move, Player};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use std::sync::Arc;

fn all_evaluators() -> Vec<Arc<dyn Evaluator>> {
    let config = Config::default_hardcoded();
    [
        Heuristic::OpenMove,
        Heuristic::Improved,
        Heuristic::Center,
        Heuristic::Blend,
        Heuristic::Tiered,
    ]
    .iter()
    .map(|h| h.build(&config.scores))
    .collect()
}

fn random_states(seed: u64) -> Vec<Board> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new(5, 5).unwrap();
    let mut states = vec![board.clone()];
    while let Some(&mv) = board.active_moves().choose(&mut rng) {
        board = board.forecast(mv).unwrap();
        states.push(board.clone());
    }
    states
}

#[test]
fn test_scores_respect_terminal_ordering() {
    let evaluators = all_evaluators();

    for seed in 0..25 {
        for state in random_states(seed) {
            for player in Player::all().iter() {
                for eval in &evaluators {
                    let score = eval.score(&state, *player);
                    if state.is_loser(*player) {
                        assert_eq!(score, LOSS, "{} on loser", eval.name());
                    } else if state.is_winner(*player) {
                        assert_eq!(score, WIN, "{} on winner", eval.name());
                    } else {
                        assert!(score.is_finite(), "{} gave {}", eval.name(), score);
                        assert!(LOSS < score && score < WIN);
                    }
                }
            }
        }
    }
}

#[test]
fn test_extremes_bracket_every_finite_score() {
    assert!(LOSS < f64::MIN);
    assert!(WIN > f64::MAX);
    assert!(LOSS.max(-1e300) == -1e300);
    assert!(WIN.min(1e300) == 1e300);
}

#[test]
fn test_terminal_check_runs_before_heuristic() {
    // Player Two is boxed in at (0,0) and must move: every heuristic must
    // report the loss even though Center would otherwise favour the corner.
    let board = Board::with_positions(
        5,
        5,
        &[Move::new(1, 2), Move::new(2, 1)],
        Move::new(2, 2),
        Move::new(0, 0),
        Player::Two,
    )
    .unwrap();

    for eval in all_evaluators() {
        assert_eq!(eval.score(&board, Player::Two), LOSS, "{}", eval.name());
        assert_eq!(eval.score(&board, Player::One), WIN, "{}", eval.name());
    }
}

#[test]
fn test_heuristic_names_are_distinct() {
    let mut names: Vec<String> = all_evaluators()
        .iter()
        .map(|e| e.name().to_string())
        .collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 5);
}
