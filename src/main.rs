use log::{error, info};
use std::env;
use std::process;

use isolation_agent::agent::{Agent, GreedyPlayer, RandomPlayer};
use isolation_agent::alphabeta::AlphaBetaPlayer;
use isolation_agent::config::Config;
use isolation_agent::eval::Heuristic;
use isolation_agent::game_log::GameLogger;
use isolation_agent::minimax::MinimaxPlayer;
use isolation_agent::tournament::round_robin;

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    info!("Starting Isolation tournament...");

    // Optional path to an alternative config file
    let config = match env::args().nth(1) {
        Some(path) => Config::from_file(&path).unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        }),
        None => Config::load_or_default(),
    };

    let threshold = config.search.timeout_threshold_ms;
    let agents: Vec<Box<dyn Agent>> = vec![
        Box::new(RandomPlayer),
        Box::new(GreedyPlayer::new(
            Heuristic::Improved.build(&config.scores),
        )),
        Box::new(MinimaxPlayer::from_config(&config)),
        Box::new(
            AlphaBetaPlayer::new(Heuristic::Improved.build(&config.scores), threshold)
                .with_opening(config.opening.clone()),
        ),
        Box::new(AlphaBetaPlayer::from_config(&config)),
    ];

    let (standings, records) = match round_robin(&agents, &config.tournament) {
        Ok(results) => results,
        Err(e) => {
            error!("Tournament could not start: {}", e);
            process::exit(1);
        }
    };

    let mut logger = GameLogger::new(config.debug.enabled, &config.debug.log_file_path);
    for record in &records {
        logger.log_match(record);
    }

    println!("{:<24} {:>6} {:>6} {:>8}", "agent", "wins", "games", "win %");
    for standing in &standings {
        println!(
            "{:<24} {:>6} {:>6} {:>7.1}%",
            standing.name,
            standing.wins,
            standing.games,
            standing.win_rate() * 100.0
        );
    }
}
