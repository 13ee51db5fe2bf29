use std::path::PathBuf;

/// Errors returned when a token cannot be dropped.
///
/// A failed drop never mutates the grid, so callers can treat any of these as
/// "no effect".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is outside the grid")]
    InvalidColumn(usize),

    #[error("column {0} is full")]
    ColumnFull(usize),

    #[error("the game is already over")]
    GameOver,
}

/// Errors returned when a rotation is requested.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RotationError {
    #[error("invalid quarter turns {0} (expected -1, 1 or 2)")]
    InvalidQuarterTurns(i32),

    #[error("the game is already over")]
    GameOver,
}

/// Errors produced while parsing a grid from its text form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseGridError {
    #[error("grid text contains no rows")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell '{ch}' at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, ch: char },

    #[error("token at row {row}, column {col} has an empty cell below it")]
    Floating { row: usize, col: usize },
}

/// Errors raised while running a game between agents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    #[error("{agent} selected illegal action {action} (legal: {legal:?})")]
    IllegalAction {
        agent: String,
        action: usize,
        legal: Vec<usize>,
    },

    #[error("{agent} returned no action for an unfinished game")]
    NoAction { agent: String },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
