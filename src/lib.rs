// Library exports for the Isolation agents
// This allows the tournament runner and the position analyzer to share the search core

pub mod agent;
pub mod alphabeta;
pub mod board;
pub mod config;
pub mod eval;
pub mod game_log;
pub mod minimax;
pub mod search;
pub mod timer;
pub mod tournament;
pub mod types;
