// Fixed-depth minimax agent behaviour

use isolation_agent::agent::Agent;
use isolation_agent::board::Board;
use isolation_agent::config::Config;
use isolation_agent::eval::{Evaluator, ImprovedScore, OpenMoveScore, Score, LOSS, WIN};
use isolation_agent::minimax::MinimaxPlayer;
use isolation_agent::types::{Move, Player};
use std::cell::Cell;
use std::collections::HashMap;
use std::sync::Arc;

/// Scores a state by where the perspective player stands
struct TableScore(HashMap<Move, Score>);

impl Evaluator for TableScore {
    fn score(&self, state: &Board, player: Player) -> Score {
        if state.is_loser(player) {
            return LOSS;
        }
        if state.is_winner(player) {
            return WIN;
        }
        state
            .location_of(player)
            .and_then(|cell| self.0.get(&cell).copied())
            .unwrap_or(0.0)
    }

    fn name(&self) -> &str {
        "table"
    }
}

fn unlimited() -> f64 {
    f64::INFINITY
}

/// Player One at (0,1) on 7x7 has exactly (1,3), (2,0), (2,2) in that order
fn three_move_board() -> Board {
    Board::with_positions(7, 7, &[], Move::new(0, 1), Move::new(6, 6), Player::One).unwrap()
}

fn table(scores: &[(Move, Score)]) -> Arc<dyn Evaluator> {
    Arc::new(TableScore(scores.iter().copied().collect()))
}

#[test]
fn test_three_move_fixture_order() {
    assert_eq!(
        three_move_board().active_moves(),
        vec![Move::new(1, 3), Move::new(2, 0), Move::new(2, 2)]
    );
}

#[test]
fn test_depth_one_picks_highest_scoring_move() {
    let eval = table(&[
        (Move::new(1, 3), 1.0),
        (Move::new(2, 0), 5.0),
        (Move::new(2, 2), 3.0),
    ]);
    let agent = MinimaxPlayer::new(1, eval, 15.0);
    assert_eq!(agent.choose_move(&three_move_board(), &unlimited), Move::new(2, 0));
}

#[test]
fn test_depth_one_tie_keeps_first_generated_move() {
    let eval = table(&[
        (Move::new(1, 3), 5.0),
        (Move::new(2, 0), 5.0),
        (Move::new(2, 2), 1.0),
    ]);
    let agent = MinimaxPlayer::new(1, eval, 15.0);
    assert_eq!(agent.choose_move(&three_move_board(), &unlimited), Move::new(1, 3));
}

#[test]
fn test_all_losing_moves_fall_back_to_first() {
    let eval = table(&[
        (Move::new(1, 3), LOSS),
        (Move::new(2, 0), LOSS),
        (Move::new(2, 2), LOSS),
    ]);
    let agent = MinimaxPlayer::new(1, eval, 15.0);
    assert_eq!(agent.choose_move(&three_move_board(), &unlimited), Move::new(1, 3));
}

#[test]
fn test_terminal_root_returns_sentinel_without_probing() {
    let board = Board::with_positions(
        3,
        3,
        &[Move::new(1, 2), Move::new(2, 1)],
        Move::new(0, 0),
        Move::new(1, 1),
        Player::One,
    )
    .unwrap();
    let calls = Cell::new(0u32);
    let probe = || {
        calls.set(calls.get() + 1);
        1000.0
    };

    let agent = MinimaxPlayer::new(3, Arc::new(OpenMoveScore), 15.0);
    let report = agent.search(&board, &probe);

    assert_eq!(report.best_move, Move::NONE);
    assert!(report.shortcut);
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_single_legal_move_returned_without_search() {
    // From (0,0) only (2,1) is open
    let board = Board::with_positions(
        5,
        5,
        &[Move::new(1, 2)],
        Move::new(0, 0),
        Move::new(4, 4),
        Player::One,
    )
    .unwrap();
    let calls = Cell::new(0u32);
    let probe = || {
        calls.set(calls.get() + 1);
        1000.0
    };

    let agent = MinimaxPlayer::new(3, Arc::new(OpenMoveScore), 15.0);
    let report = agent.search(&board, &probe);

    assert_eq!(report.best_move, Move::new(2, 1));
    assert_eq!(report.stats.nodes, 0);
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_expired_probe_returns_first_legal_move() {
    let eval = table(&[(Move::new(2, 2), 100.0)]);
    let agent = MinimaxPlayer::new(3, eval, 15.0);
    let expired = || 1.0;

    let report = agent.search(&three_move_board(), &expired);

    assert_eq!(report.best_move, Move::new(1, 3));
    assert!(report.timed_out);
    assert_eq!(report.stats.nodes, 0);
    assert_eq!(report.stats.completed_depth, 0);
}

#[test]
fn test_timeout_mid_search_discards_partial_result() {
    // The budget expires after a handful of frames, well before depth 3 finishes.
    // The preferred move (2,2) is generated last, so a partial result could
    // only be the fallback.
    let eval = table(&[(Move::new(2, 2), 100.0)]);
    let agent = MinimaxPlayer::new(3, eval, 15.0);
    let calls = Cell::new(0u32);
    let probe = || {
        calls.set(calls.get() + 1);
        if calls.get() > 5 {
            0.0
        } else {
            1000.0
        }
    };

    let report = agent.search(&three_move_board(), &probe);

    assert!(report.timed_out);
    assert_eq!(report.best_move, Move::new(1, 3));
    assert_eq!(report.stats.nodes, 5);
}

#[test]
fn test_every_frame_polls_the_budget() {
    let agent = MinimaxPlayer::new(2, Arc::new(OpenMoveScore), 15.0);
    let calls = Cell::new(0u64);
    let probe = || {
        calls.set(calls.get() + 1);
        1000.0
    };

    let report = agent.search(&three_move_board(), &probe);

    assert!(!report.timed_out);
    assert_eq!(report.stats.completed_depth, 2);
    assert_eq!(calls.get(), report.stats.nodes);
}

#[test]
fn test_leaves_use_root_player_perspective() {
    // At depth 2 leaves are reached with Player One to move again, at depth 1
    // with Player Two to move; both must be scored for Player One.
    let board = three_move_board();
    for depth in 1..=2 {
        let agent = MinimaxPlayer::new(depth, Arc::new(ImprovedScore { opponent_weight: 1.0 }), 15.0);
        let chosen = agent.choose_move(&board, &unlimited);
        assert!(board.active_moves().contains(&chosen));
    }

    // (2,2) keeps the most options open for Player One at one ply
    let greedy = MinimaxPlayer::new(1, Arc::new(OpenMoveScore), 15.0);
    assert_eq!(greedy.choose_move(&board, &unlimited), Move::new(2, 2));
}

#[test]
fn test_from_config_uses_configured_depth() {
    let config = Config::default_hardcoded();
    let agent = MinimaxPlayer::from_config(&config);
    assert_eq!(agent.search_depth(), config.search.search_depth);
    assert!(agent.name().starts_with("minimax3"));
}

#[test]
fn test_opening_shortcut_takes_center() {
    let config = Config::default_hardcoded();
    let agent = MinimaxPlayer::from_config(&config);
    let board = Board::new(7, 7).unwrap();

    let report = agent.search(&board, &unlimited);

    assert!(report.shortcut);
    assert_eq!(report.best_move, Move::new(3, 3));
}

#[test]
fn test_zero_depth_is_raised_to_one() {
    let eval = table(&[
        (Move::new(1, 3), 1.0),
        (Move::new(2, 0), 5.0),
        (Move::new(2, 2), 3.0),
    ]);
    let agent = MinimaxPlayer::new(0, eval, 15.0);

    assert_eq!(agent.search_depth(), 1);
    let report = agent.search(&three_move_board(), &unlimited);
    assert_eq!(report.best_move, Move::new(2, 0));
    assert_eq!(report.stats.completed_depth, 1);
}
