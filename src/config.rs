use crate::consts;
use crate::game::{Board, CatchUp, Difficulty};
use log::LevelFilter;
use serde::Deserialize;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
pub struct Config {
    /// Tunable rules of the simulation
    #[serde(default)]
    pub rules: Rules,

    /// Settings for diagnostic output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Return the default configuration file path
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Most verbose level of log messages to emit
    pub level: LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> LoggingConfig {
        LoggingConfig {
            level: LevelFilter::Warn,
        }
    }
}

/// The tunable parameters of a game: board size, speed curve, and how much
/// catching up a single advance may do
#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawRules")]
pub struct Rules {
    board: Board,
    difficulty: Difficulty,
    catch_up: CatchUp,
}

impl Rules {
    /// # Errors
    ///
    /// Returns `Err` if the board is too small for the starting snake and
    /// first fruit, or if the tick interval could ever be zero or would have
    /// to grow with the score.
    pub fn new(
        grid_size: u16,
        step_ms_start: u64,
        step_ms_min: u64,
        step_decay: u64,
        max_catch_up_ticks: Option<NonZeroU32>,
    ) -> Result<Rules, RulesError> {
        if grid_size < consts::MIN_GRID_SIZE {
            return Err(RulesError::GridTooSmall(grid_size));
        }
        if step_ms_min == 0 {
            return Err(RulesError::ZeroInterval);
        }
        if step_ms_min > step_ms_start {
            return Err(RulesError::MinAboveStart {
                min: step_ms_min,
                start: step_ms_start,
            });
        }
        Ok(Rules {
            board: Board::new(grid_size),
            difficulty: Difficulty::new(step_ms_start, step_ms_min, step_decay),
            catch_up: CatchUp::from(max_catch_up_ticks),
        })
    }

    pub fn board(&self) -> Board {
        self.board
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn catch_up(&self) -> CatchUp {
        self.catch_up
    }
}

impl Default for Rules {
    fn default() -> Rules {
        Rules {
            board: Board::new(consts::GRID_SIZE),
            difficulty: Difficulty::default(),
            catch_up: CatchUp::Unbounded,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawRules {
    grid_size: u16,
    step_ms_start: u64,
    step_ms_min: u64,
    step_decay: u64,
    max_catch_up_ticks: Option<NonZeroU32>,
}

impl Default for RawRules {
    fn default() -> RawRules {
        RawRules {
            grid_size: consts::GRID_SIZE,
            step_ms_start: consts::STEP_MS_START,
            step_ms_min: consts::STEP_MS_MIN,
            step_decay: consts::STEP_DECAY,
            max_catch_up_ticks: None,
        }
    }
}

impl TryFrom<RawRules> for Rules {
    type Error = RulesError;

    fn try_from(value: RawRules) -> Result<Rules, RulesError> {
        Rules::new(
            value.grid_size,
            value.step_ms_start,
            value.step_ms_min,
            value.step_decay,
            value.max_catch_up_ticks,
        )
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum RulesError {
    #[error("grid size {0} is too small; must be at least {min}", min = consts::MIN_GRID_SIZE)]
    GridTooSmall(u16),
    #[error("minimum step interval must be greater than zero")]
    ZeroInterval,
    #[error("minimum step interval ({min} ms) exceeds starting step interval ({start} ms)")]
    MinAboveStart { min: u64, start: u64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
