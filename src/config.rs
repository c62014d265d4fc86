//! Game configuration with layered loading
//!
//! Sources, lowest to highest priority:
//! 1. Compiled defaults
//! 2. A RON file (`catsnake.ron` in the working directory, or an explicit path)
//! 3. Command line flags, applied by the binary

use std::{fmt, fs, io, path::{Path, PathBuf}, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "catsnake.ron";

pub const MIN_GRID_SIZE: u16 = 6;
pub const MAX_GRID_SIZE: u16 = 200;

/// Points awarded per food item
pub const SCORE_PER_FOOD: u32 = 10;

/// Difficulty, fixing the tick interval for a whole run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Easy,
    #[default]
    Normal,
    Hard,
    Insane,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Easy, Level::Normal, Level::Hard, Level::Insane];

    /// Milliseconds between two moves
    pub fn tick_interval_ms(self) -> u32 {
        match self {
            Level::Easy => 300,
            Level::Normal => 120,
            Level::Hard => 80,
            Level::Insane => 30,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Normal => "normal",
            Level::Hard => "hard",
            Level::Insane => "insane",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown level `{0}`, expected easy, normal, hard or insane")]
pub struct ParseLevelError(String);

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseLevelError(s.to_owned()))
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("grid {cols}x{rows} is too small, both sides need at least {min} cells", min = MIN_GRID_SIZE)]
    GridTooSmall { cols: u16, rows: u16 },

    #[error("grid {cols}x{rows} is too large, both sides must be at most {max} cells", max = MAX_GRID_SIZE)]
    GridTooLarge { cols: u16, rows: u16 },

    #[error("at least one food kind is needed")]
    NoFoodKinds,
}

/// Everything needed to set up a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the grid in cells
    pub cols: u16,
    /// Height of the grid in cells
    pub rows: u16,
    /// Level used when a game is started without picking one
    pub level: Level,
    /// Number of food variants (catnip, carrot, spider)
    pub food_kinds: usize,
    /// Seed for food placement; random when unset
    pub seed: Option<u64>,
    /// Ring the terminal bell on eating and dying
    pub sound: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: 20,
            rows: 20,
            level: Level::Normal,
            food_kinds: 3,
            seed: None,
            sound: true,
        }
    }
}

impl GameConfig {
    /// Create a configuration with a custom grid size
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows, ..Default::default() }
    }

    /// Loads `path`, which must exist, or the default config file if there is one.
    /// Falls back to the compiled defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_owned(), source })?;

        let config = Self::from_ron(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_owned(), source })?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_ron(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (cols, rows) = (self.cols, self.rows);

        if cols < MIN_GRID_SIZE || rows < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall { cols, rows });
        }
        if cols > MAX_GRID_SIZE || rows > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge { cols, rows });
        }
        if self.food_kinds == 0 {
            return Err(ConfigError::NoFoodKinds);
        }

        Ok(())
    }
}
