//! # Spin Connect
//!
//! Connect-N on a configurable grid with a twist: the board can be turned a
//! quarter or half turn, after which every token falls to its new lowest free
//! cell. Includes a minimax opponent with alpha-beta pruning.
//!
//! ## Modules
//!
//! - [`game`] — Grid, players, run detection, rotation with gravity, game state
//! - [`ai`] — Agent trait, window heuristic, minimax search, random baseline
//! - [`play`] — Running complete games between two agents
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod play;
