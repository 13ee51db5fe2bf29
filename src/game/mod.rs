//! Core game logic: the grid, players, run detection, rotation with gravity,
//! and the live game state.

mod grid;
mod player;
pub mod rotation;
pub mod runs;
mod state;

pub use grid::{Cell, Grid, Move};
pub use player::Player;
pub use rotation::{rotate_and_settle, Relocation, Rotation, RotationResult};
pub use runs::{count_window, has_run, WindowCount};
pub use state::{GameOutcome, GameState};
