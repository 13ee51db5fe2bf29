use crate::error::{MoveError, RotationError};

use super::rotation::{self, Rotation, RotationResult};
use super::runs::{has_run, run_through};
use super::{Grid, Move, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// The live game: grid, run length, whose turn it is, and the outcome once
/// decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    grid: Grid,
    run_length: usize,
    current_player: Player,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Create an empty game; player one starts
    pub fn new(rows: usize, cols: usize, run_length: usize) -> Self {
        Self::from_grid(Grid::new(rows, cols), run_length, Player::One)
    }

    /// Resume from an existing grid, deriving the outcome from its contents.
    pub fn from_grid(grid: Grid, run_length: usize, current_player: Player) -> Self {
        let mut state = GameState {
            grid,
            run_length,
            current_player,
            outcome: None,
        };
        state.outcome = state.full_outcome();
        state
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn run_length(&self) -> usize {
        self.run_length
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get list of legal columns (not full), ascending
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.grid.valid_columns()
    }

    /// Hand the turn to the other player.
    pub fn next_turn(&mut self) {
        self.current_player = self.current_player.other();
    }

    /// Drop the current player's token, record any outcome, and pass the turn.
    pub fn play(&mut self, column: usize) -> Result<Move, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let mv = self.grid.drop_token(column, self.current_player)?;

        if run_through(&self.grid, mv.row, mv.column, self.run_length) {
            self.finish(GameOutcome::Winner(mv.player));
        } else if self.grid.is_full() {
            self.finish(GameOutcome::Draw);
        }

        self.next_turn();
        Ok(mv)
    }

    /// Rotate the live grid and let tokens settle. Uses the current player's
    /// turn; either player may win from the tokens' new positions.
    pub fn rotate(&mut self, quarter_turns: i32) -> Result<RotationResult, RotationError> {
        if self.is_terminal() {
            return Err(RotationError::GameOver);
        }
        let rotation = Rotation::try_from(quarter_turns)?;

        let result = rotation::apply(&self.grid, rotation);
        self.grid = result.grid.clone();
        if let Some(outcome) = self.full_outcome() {
            self.finish(outcome);
        }

        self.next_turn();
        Ok(result)
    }

    /// Outcome from scanning the whole grid for both players.
    fn full_outcome(&self) -> Option<GameOutcome> {
        let one = has_run(&self.grid, Player::One, self.run_length);
        let two = has_run(&self.grid, Player::Two, self.run_length);
        match (one, two) {
            (true, true) => Some(GameOutcome::Draw),
            (true, false) => Some(GameOutcome::Winner(Player::One)),
            (false, true) => Some(GameOutcome::Winner(Player::Two)),
            (false, false) if self.grid.is_full() => Some(GameOutcome::Draw),
            (false, false) => None,
        }
    }

    fn finish(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Winner(player) => {
                tracing::info!(winner = player.name(), "game won");
            }
            GameOutcome::Draw => tracing::info!("game drawn"),
        }
        self.outcome = Some(outcome);
    }
}
