use std::ops::RangeInclusive;
use std::path::Path;

use crate::ai::{HeuristicWeights, MinimaxConfig};
use crate::error::ConfigError;
use crate::game::GameState;

/// Board sizes and run lengths accepted by the settings (two-digit values).
const DIMENSION_RANGE: RangeInclusive<usize> = 1..=99;

/// Board dimensions and the run length needed to win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub connect: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: 7,
            cols: 7,
            connect: 4,
        }
    }
}

impl BoardConfig {
    /// A fresh game with these dimensions.
    pub fn new_game(&self) -> GameState {
        GameState::new(self.rows, self.cols, self.connect)
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub search: MinimaxConfig,
    pub heuristic: HeuristicWeights,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let board = &self.board;
        for (name, value) in [
            ("board.rows", board.rows),
            ("board.cols", board.cols),
            ("board.connect", board.connect),
        ] {
            if !DIMENSION_RANGE.contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be in 1..=99, got {value}"
                )));
            }
        }

        if self.search.depth == 0 {
            return Err(ConfigError::Validation(
                "search.depth must be >= 1".into(),
            ));
        }

        let w = &self.heuristic;
        if w.center < 0.0 {
            return Err(ConfigError::Validation(
                "heuristic.center must be >= 0".into(),
            ));
        }
        if w.open_two <= 0.0 {
            return Err(ConfigError::Validation(
                "heuristic.open_two must be > 0".into(),
            ));
        }
        if w.open_one <= w.open_two {
            return Err(ConfigError::Validation(
                "heuristic.open_one must be > heuristic.open_two".into(),
            ));
        }
        if w.complete <= w.open_one {
            return Err(ConfigError::Validation(
                "heuristic.complete must be > heuristic.open_one".into(),
            ));
        }
        if w.block <= w.open_two {
            return Err(ConfigError::Validation(
                "heuristic.block must be > heuristic.open_two".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        config.validate().expect("default config should be valid");
        assert_eq!(config.board.rows, 7);
        assert_eq!(config.board.cols, 7);
        assert_eq!(config.board.connect, 4);
        assert_eq!(config.search.depth, 5);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
[board]
cols = 9
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.board.cols, 9);
        assert_eq!(config.board.rows, 7);
        assert_eq!(config.search.depth, 5);
        assert!((config.heuristic.complete - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_toml_uses_all_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_validation_rejects_zero_dimensions() {
        for field in 0..3 {
            let mut config = AppConfig::default();
            match field {
                0 => config.board.rows = 0,
                1 => config.board.cols = 0,
                _ => config.board.connect = 0,
            }
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_validation_rejects_three_digit_dimensions() {
        let mut config = AppConfig::default();
        config.board.rows = 100;
        assert!(config.validate().is_err());
        config.board.rows = 99;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let mut config = AppConfig::default();
        config.search.depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_misordered_weights() {
        let mut config = AppConfig::default();
        config.heuristic.open_two = 6.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.heuristic.block = 1.0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.heuristic.complete = 5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = AppConfig::load_or_default(Path::new("nonexistent_config.toml")).unwrap();
        assert_eq!(config.search.depth, 5);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test_config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            r#"
[search]
depth = 3

[board]
connect = 5
"#
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.search.depth, 3);
        assert_eq!(config.board.connect, 5);
        assert_eq!(config.board.rows, 7);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[search]\ndepth = 0\n").unwrap();
        assert!(matches!(
            AppConfig::load(&path),
            Err(ConfigError::Validation(_))
        ));

        std::fs::write(&path, "[board\n").unwrap();
        assert!(matches!(AppConfig::load(&path), Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_default_toml_roundtrips() {
        let toml_str = AppConfig::default_toml().unwrap();
        let config: AppConfig = toml::from_str(&toml_str).unwrap();
        config.validate().expect("roundtripped config should be valid");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_new_game_uses_board_config() {
        let board = BoardConfig {
            rows: 5,
            cols: 8,
            connect: 3,
        };
        let state = board.new_game();
        assert_eq!(state.grid().rows(), 5);
        assert_eq!(state.grid().cols(), 8);
        assert_eq!(state.run_length(), 3);
    }
}
