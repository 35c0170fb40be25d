// Match record logging
//
// Each finished tournament game is appended as one JSON line. Write failures
// are reported through `log` and never interrupt play.

use log::{error, info};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use crate::tournament::{LossReason, MatchRecord};
use crate::types::{Move, Player};

/// Represents a single match log line
#[derive(Debug, Serialize)]
struct MatchLogEntry<'a> {
    first: &'a str,
    second: &'a str,
    winner: Player,
    winner_name: &'a str,
    reason: LossReason,
    moves: &'a [Move],
    timestamp: String,
}

/// JSONL writer for tournament games; a disabled logger is a no-op
pub struct GameLogger {
    writer: Option<BufWriter<File>>,
}

impl GameLogger {
    /// Creates a new logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return GameLogger::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
        {
            Ok(file) => {
                info!("Match logging enabled: {}", log_file_path);
                GameLogger {
                    writer: Some(BufWriter::new(file)),
                }
            }
            Err(e) => {
                error!("Failed to create match log file '{}': {}", log_file_path, e);
                GameLogger::disabled()
            }
        }
    }

    /// Creates a disabled logger (no-op)
    pub fn disabled() -> Self {
        GameLogger { writer: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    /// Appends one match as a JSON line
    pub fn log_match(&mut self, record: &MatchRecord) {
        let writer = match self.writer.as_mut() {
            Some(writer) => writer,
            None => return,
        };

        let entry = MatchLogEntry {
            first: &record.first,
            second: &record.second,
            winner: record.outcome.winner,
            winner_name: record.winner_name(),
            reason: record.outcome.reason,
            moves: &record.outcome.moves,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        match serde_json::to_string(&entry) {
            Ok(json_line) => {
                if let Err(e) = writeln!(writer, "{}", json_line) {
                    error!("Failed to write match log entry: {}", e);
                } else if let Err(e) = writer.flush() {
                    error!("Failed to flush match log: {}", e);
                }
            }
            Err(e) => {
                error!("Failed to serialize match log entry: {}", e);
            }
        }
    }
}
