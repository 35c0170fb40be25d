// Diagnoses a single position: lists legal moves with one-ply scores for every
// heuristic, then shows what each search engine picks.
//
// Usage: analyze_position <board.json> [time_ms]
// The board file is a serialized `Board`, e.g. the `final_board` of a match log.

use isolation_agent::alphabeta::AlphaBetaPlayer;
use isolation_agent::board::Board;
use isolation_agent::config::Config;
use isolation_agent::eval::Heuristic;
use isolation_agent::minimax::MinimaxPlayer;
use isolation_agent::search::SearchReport;
use std::env;
use std::fs;
use std::process;
use std::time::Instant;

const HEURISTICS: [Heuristic; 5] = [
    Heuristic::OpenMove,
    Heuristic::Improved,
    Heuristic::Center,
    Heuristic::Blend,
    Heuristic::Tiered,
];

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <board.json> [time_ms]", args[0]);
        process::exit(1);
    }

    let time_ms: f64 = match args.get(2).map(|s| s.parse()) {
        Some(Ok(ms)) => ms,
        Some(Err(e)) => {
            eprintln!("time_ms must be a number: {}", e);
            process::exit(1);
        }
        None => 200.0,
    };

    let board: Board = match fs::read_to_string(&args[1])
        .map_err(|e| e.to_string())
        .and_then(|s| serde_json::from_str(&s).map_err(|e| e.to_string()))
    {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Failed to load board from {}: {}", args[1], e);
            process::exit(1);
        }
    };

    let config = Config::load_or_default();
    let me = board.active_player();

    println!("═══════════════════════════════════════════════════════════");
    println!(
        "Position after {} plies, {}x{} board, player {} to move",
        board.move_count(),
        board.width(),
        board.height(),
        me
    );
    println!("═══════════════════════════════════════════════════════════");
    for player in [me, me.opponent()].iter() {
        match board.location_of(*player) {
            Some(cell) => println!("  Player {} at {}", player, cell),
            None => println!("  Player {} not placed", player),
        }
    }
    println!();

    let moves = board.active_moves();
    if moves.is_empty() {
        println!("No legal moves: player {} has lost", me);
        return;
    }

    println!("One-ply scores:");
    print!("  {:<10}", "move");
    for heuristic in HEURISTICS.iter() {
        print!(" {:>10}", heuristic.build(&config.scores).name());
    }
    println!();
    for mv in &moves {
        print!("  {:<10}", mv.to_string());
        if let Ok(next) = board.forecast(*mv) {
            for heuristic in HEURISTICS.iter() {
                print!(" {:>10.2}", heuristic.build(&config.scores).score(&next, me));
            }
        }
        println!();
    }
    println!();

    let minimax = MinimaxPlayer::from_config(&config);
    let alphabeta = AlphaBetaPlayer::from_config(&config);
    let depth = minimax.search_depth();

    report("minimax", &run(time_ms, |t| minimax.search(&board, t)));
    report(
        "alpha-beta (fixed)",
        &run(time_ms, |t| alphabeta.search_to_depth(&board, depth, t)),
    );
    report(
        "alpha-beta (deepening)",
        &run(time_ms, |t| alphabeta.search(&board, t)),
    );
}

fn run<F>(time_ms: f64, search: F) -> (SearchReport, u128)
where
    F: Fn(&dyn Fn() -> f64) -> SearchReport,
{
    let start = Instant::now();
    let time_left = || time_ms - start.elapsed().as_secs_f64() * 1000.0;
    let report = search(&time_left);
    (report, start.elapsed().as_millis())
}

fn report(label: &str, (result, elapsed_ms): &(SearchReport, u128)) {
    println!("{}:", label);
    println!("  Move: {}", result.best_move);
    if result.shortcut {
        println!("  Decided without search");
    } else {
        println!(
            "  Depth: {}, nodes: {}, leaves: {}, cutoffs: {}, timed out: {}",
            result.stats.completed_depth,
            result.stats.nodes,
            result.stats.leaf_evals,
            result.stats.cutoffs,
            result.timed_out
        );
    }
    println!("  Time: {}ms", elapsed_ms);
}
