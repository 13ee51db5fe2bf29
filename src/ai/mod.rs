//! Automated players: the window heuristic, minimax search with alpha-beta
//! pruning, and a random baseline.

mod agent;
pub mod heuristic;
pub mod minimax;
mod random;

pub use agent::Agent;
pub use heuristic::{Heuristic, HeuristicWeights, WindowHeuristic};
pub use minimax::{choose_move, MinimaxAgent, MinimaxConfig, SearchResult, SearchStats};
pub use random::RandomAgent;
