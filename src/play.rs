//! Running complete games between two agents.

use crate::ai::Agent;
use crate::error::PlayError;
use crate::game::{GameOutcome, GameState, Move, Player};

/// Moves played and the final outcome of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRecord {
    pub moves: Vec<Move>,
    pub outcome: GameOutcome,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            GameOutcome::Winner(player) => Some(player),
            GameOutcome::Draw => None,
        }
    }
}

/// Play `state` to the end. `first` moves for player one, `second` for
/// player two, whoever is to move in `state` goes next.
pub fn play_game(
    state: &mut GameState,
    first: &mut dyn Agent,
    second: &mut dyn Agent,
) -> Result<GameRecord, PlayError> {
    let mut moves = Vec::new();

    loop {
        if let Some(outcome) = state.outcome() {
            return Ok(GameRecord { moves, outcome });
        }

        let agent: &mut dyn Agent = match state.current_player() {
            Player::One => &mut *first,
            Player::Two => &mut *second,
        };
        let action = agent.select_action(state).ok_or_else(|| PlayError::NoAction {
            agent: agent.name().to_string(),
        })?;
        let mv = state.play(action).map_err(|_| PlayError::IllegalAction {
            agent: agent.name().to_string(),
            action,
            legal: state.legal_actions(),
        })?;

        tracing::debug!(
            agent = agent.name(),
            player = mv.player.name(),
            column = mv.column,
            row = mv.row,
            "move played"
        );
        moves.push(mv);
    }
}
