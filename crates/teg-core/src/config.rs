//! Configuration loading and typed config structures for the TEG bot engine.
//!
//! The canonical configuration lives in `teg-config.yaml` at the project
//! root. Every section and field is optional: missing values fall back to
//! the defaults below, which reproduce the built-in bot tiers.

use std::path::Path;

use serde::Deserialize;
use teg_types::{BotLevel, BotStrategy, PlayerColor};

use crate::bot::params::ByFocus;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
///
/// Mirrors the structure of `teg-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TegConfig {
    /// Table setup: seed, round limit, seats.
    #[serde(default)]
    pub game: GameConfig,

    /// Objective evaluation settings.
    #[serde(default)]
    pub objectives: ObjectivesConfig,

    /// Per-tier overrides of the bot parameter tables.
    #[serde(default)]
    pub bots: BotsConfig,

    /// Per-disposition modulation of the tier tables.
    #[serde(default)]
    pub dispositions: DispositionsConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl TegConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// The `TEG_SEED` environment variable overrides `game.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Self = serde_yml::from_str(&contents)?;
        config.game.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.game.apply_env_overrides();
        Ok(config)
    }
}

/// Table setup for the engine binary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GameConfig {
    /// Join code of the game.
    #[serde(default = "default_game_code")]
    pub code: String,

    /// Random seed for dealing territories, objectives and dice.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Normal-play rounds before the game is called without a winner.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,

    /// Seats in turn order.
    #[serde(default = "default_seats")]
    pub seats: Vec<SeatConfig>,
}

impl GameConfig {
    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("TEG_SEED") {
            match val.parse() {
                Ok(seed) => self.seed = seed,
                Err(e) => tracing::warn!(value = %val, error = %e, "ignoring invalid TEG_SEED"),
            }
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            code: default_game_code(),
            seed: default_seed(),
            max_rounds: default_max_rounds(),
            seats: default_seats(),
        }
    }
}

/// One bot seat.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeatConfig {
    /// Name shown at the table.
    pub name: String,
    /// Seat colour.
    pub color: PlayerColor,
    /// Skill tier.
    pub level: BotLevel,
    /// Disposition.
    #[serde(default = "default_strategy")]
    pub strategy: BotStrategy,
}

/// Objective evaluation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ObjectivesConfig {
    /// Territories needed to fulfil the common objective.
    #[serde(default = "default_common_territory_target")]
    pub common_territory_target: usize,
}

impl Default for ObjectivesConfig {
    fn default() -> Self {
        Self {
            common_territory_target: default_common_territory_target(),
        }
    }
}

/// Per-tier overrides.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BotsConfig {
    /// Novice overrides.
    #[serde(default)]
    pub novice: TierOverrides,
    /// Balanced overrides.
    #[serde(default)]
    pub balanced: TierOverrides,
    /// Expert overrides.
    #[serde(default)]
    pub expert: TierOverrides,
}

impl BotsConfig {
    /// Overrides for a tier.
    pub const fn for_level(&self, level: BotLevel) -> &TierOverrides {
        match level {
            BotLevel::Novice => &self.novice,
            BotLevel::Balanced => &self.balanced,
            BotLevel::Expert => &self.expert,
        }
    }
}

/// Tunable numbers of one tier. Absent values keep the built-in table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TierOverrides {
    /// Attacks per turn, by objective focus.
    #[serde(default)]
    pub max_attacks: Option<ByFocus<u32>>,
    /// Minimum estimated success probability for an attack, by objective focus.
    #[serde(default)]
    pub min_attack_probability: Option<ByFocus<f64>>,
    /// Armies a fortified territory should reach.
    #[serde(default)]
    pub ideal_fortify_strength: Option<u32>,
    /// Armies a fortify source keeps behind.
    #[serde(default)]
    pub min_garrison: Option<u32>,
}

/// Per-disposition modulation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DispositionsConfig {
    /// Aggressive bots.
    #[serde(default = "default_aggressive")]
    pub aggressive: DispositionConfig,
    /// Balanced bots.
    #[serde(default = "default_balanced_disposition")]
    pub balanced: DispositionConfig,
    /// Defensive bots.
    #[serde(default = "default_defensive")]
    pub defensive: DispositionConfig,
}

impl DispositionsConfig {
    /// Modulation for a disposition.
    pub const fn for_strategy(&self, strategy: BotStrategy) -> &DispositionConfig {
        match strategy {
            BotStrategy::Aggressive => &self.aggressive,
            BotStrategy::Balanced => &self.balanced,
            BotStrategy::Defensive => &self.defensive,
        }
    }
}

impl Default for DispositionsConfig {
    fn default() -> Self {
        Self {
            aggressive: default_aggressive(),
            balanced: default_balanced_disposition(),
            defensive: default_defensive(),
        }
    }
}

/// How a disposition shifts its tier's attack parameters.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct DispositionConfig {
    /// Subtracted from the attack ceiling (never below one attack).
    #[serde(default)]
    pub ceiling_reduction: u32,
    /// Added to the minimum attack probability.
    #[serde(default)]
    pub probability_margin: f64,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

fn default_game_code() -> String {
    "TEG-LOCAL".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_max_rounds() -> u32 {
    150
}

const fn default_strategy() -> BotStrategy {
    BotStrategy::Aggressive
}

fn default_seats() -> Vec<SeatConfig> {
    vec![
        SeatConfig {
            name: "Belgrano".to_owned(),
            color: PlayerColor::Red,
            level: BotLevel::Expert,
            strategy: BotStrategy::Aggressive,
        },
        SeatConfig {
            name: "San Martin".to_owned(),
            color: PlayerColor::Blue,
            level: BotLevel::Balanced,
            strategy: BotStrategy::Balanced,
        },
        SeatConfig {
            name: "Guemes".to_owned(),
            color: PlayerColor::Green,
            level: BotLevel::Novice,
            strategy: BotStrategy::Aggressive,
        },
        SeatConfig {
            name: "Moreno".to_owned(),
            color: PlayerColor::Yellow,
            level: BotLevel::Expert,
            strategy: BotStrategy::Defensive,
        },
    ]
}

const fn default_common_territory_target() -> usize {
    30
}

const fn default_aggressive() -> DispositionConfig {
    DispositionConfig {
        ceiling_reduction: 0,
        probability_margin: 0.0,
    }
}

const fn default_balanced_disposition() -> DispositionConfig {
    DispositionConfig {
        ceiling_reduction: 1,
        probability_margin: 0.05,
    }
}

const fn default_defensive() -> DispositionConfig {
    DispositionConfig {
        ceiling_reduction: 2,
        probability_margin: 0.10,
    }
}

fn default_log_level() -> String {
    "info".to_owned()
}
