// Match driver and round-robin tournament
//
// Each match is played single-threaded with a wall-clock probe handed to the
// agents; independent matches run in parallel on the rayon pool.

use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

use crate::agent::Agent;
use crate::board::{Board, BoardError};
use crate::config::TournamentConfig;
use crate::types::{Move, Player};

/// Why the losing side lost
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LossReason {
    /// No legal move on its turn
    NoLegalMoves,
    /// Returned after the turn's time had run out
    Timeout,
    /// Returned a move that was not legal, including `Move::NONE` while moves existed
    IllegalMove,
}

/// Result of one game
#[derive(Serialize, Debug, Clone)]
pub struct MatchOutcome {
    pub winner: Player,
    pub reason: LossReason,
    /// Every ply applied, openings included
    pub moves: Vec<Move>,
    pub final_board: Board,
}

/// Plays `board` to completion, `agents[0]` moving for Player One
///
/// # Arguments
/// * `board` - Starting position
/// * `agents` - Agents for Player One and Player Two
/// * `time_limit_ms` - Per-move wall clock limit
pub fn play_match(board: Board, agents: [&dyn Agent; 2], time_limit_ms: u64) -> MatchOutcome {
    let mut board = board;
    let mut moves = Vec::new();
    let limit = time_limit_ms as f64;

    loop {
        let active = board.active_player();
        let agent = agents[active.index()];

        let finish = |board: Board, moves: Vec<Move>, reason: LossReason| MatchOutcome {
            winner: active.opponent(),
            reason,
            moves,
            final_board: board,
        };

        if board.is_terminal() {
            return finish(board, moves, LossReason::NoLegalMoves);
        }

        let start = Instant::now();
        let time_left = || limit - start.elapsed().as_secs_f64() * 1000.0;
        let chosen = agent.choose_move(&board, &time_left);

        if time_left() <= 0.0 {
            warn!(
                "{} exceeded the {}ms limit on move {}",
                agent.name(),
                time_limit_ms,
                board.move_count()
            );
            return finish(board, moves, LossReason::Timeout);
        }

        match board.forecast(chosen) {
            Ok(next) => {
                moves.push(chosen);
                board = next;
            }
            Err(e) => {
                warn!("{} forfeits: {}", agent.name(), e);
                return finish(board, moves, LossReason::IllegalMove);
            }
        }
    }
}

/// Places both players on random cells, one ply each
pub fn random_opening(board: &Board, rng: &mut StdRng) -> Result<(Board, Vec<Move>), BoardError> {
    let mut board = board.clone();
    let mut moves = Vec::new();

    for _ in 0..2 {
        let legal = board.active_moves();
        let mv = match legal.choose(rng) {
            Some(&mv) => mv,
            None => break,
        };
        board = board.forecast(mv)?;
        moves.push(mv);
    }

    Ok((board, moves))
}

/// One scheduled game of the round robin
#[derive(Debug, Clone, Copy)]
struct Fixture {
    index: usize,
    first: usize,
    second: usize,
}

/// A finished tournament game with the agent names attached
#[derive(Serialize, Debug, Clone)]
pub struct MatchRecord {
    pub first: String,
    pub second: String,
    pub outcome: MatchOutcome,
}

impl MatchRecord {
    pub fn winner_name(&self) -> &str {
        match self.outcome.winner {
            Player::One => &self.first,
            Player::Two => &self.second,
        }
    }
}

/// Aggregate results of one agent
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Standing {
    pub name: String,
    pub wins: usize,
    pub games: usize,
}

impl Standing {
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.wins as f64 / self.games as f64
        }
    }
}

/// Plays every pair of agents `num_matches` times, alternating who moves
/// first. Returns standings sorted by wins and the individual match records.
pub fn round_robin(
    agents: &[Box<dyn Agent>],
    config: &TournamentConfig,
) -> Result<(Vec<Standing>, Vec<MatchRecord>), BoardError> {
    let empty = Board::new(config.board_width, config.board_height)?;

    let mut fixtures = Vec::new();
    for a in 0..agents.len() {
        for b in (a + 1)..agents.len() {
            for round in 0..config.num_matches {
                let (first, second) = if round % 2 == 0 { (a, b) } else { (b, a) };
                fixtures.push(Fixture {
                    index: fixtures.len(),
                    first,
                    second,
                });
            }
        }
    }

    info!(
        "Round robin: {} agents, {} matches on a {}x{} board",
        agents.len(),
        fixtures.len(),
        config.board_width,
        config.board_height
    );

    let records = fixtures
        .par_iter()
        .map(|fixture| -> Result<MatchRecord, BoardError> {
            let mut rng = StdRng::seed_from_u64(config.seed.wrapping_add(fixture.index as u64));
            let (start, opening) = random_opening(&empty, &mut rng)?;
            let first = agents[fixture.first].as_ref();
            let second = agents[fixture.second].as_ref();

            let mut outcome = play_match(start, [first, second], config.time_limit_ms);
            let mut moves = opening;
            moves.append(&mut outcome.moves);
            outcome.moves = moves;

            Ok(MatchRecord {
                first: first.name().to_string(),
                second: second.name().to_string(),
                outcome,
            })
        })
        .collect::<Result<Vec<_>, BoardError>>()?;

    let mut standings: Vec<Standing> = agents
        .iter()
        .map(|agent| Standing {
            name: agent.name().to_string(),
            wins: 0,
            games: 0,
        })
        .collect();

    for (fixture, record) in fixtures.iter().zip(records.iter()) {
        standings[fixture.first].games += 1;
        standings[fixture.second].games += 1;
        let winner = match record.outcome.winner {
            Player::One => fixture.first,
            Player::Two => fixture.second,
        };
        standings[winner].wins += 1;
    }

    standings.sort_by(|a, b| b.wins.cmp(&a.wins));
    Ok((standings, records))
}
