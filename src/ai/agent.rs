use crate::game::GameState;

/// Universal interface for automated players.
pub trait Agent {
    /// Select a column for `state.current_player()`, or `None` when the game
    /// is over or no column is playable.
    fn select_action(&mut self, state: &GameState) -> Option<usize>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
