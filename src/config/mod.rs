//! # Configuration Management Module
//!
//! Game settings loaded from a TOML file, with defaults for every value so a missing
//! file or a missing section still yields a playable game.
//!
//! ## Configuration Structure
//!
//! - [`GameConfig`] - save location, starting stats, rest and healing amounts
//! - [`GridConfig`] - board size and wandering-monster behaviour for grid mode
//! - [`LoggingConfig`] - log level and log file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use questline::config::Config;
//!
//! fn main() -> anyhow::Result<()> {
//!     Config::create_default("questline.toml")?;
//!     let config = Config::load("questline.toml")?;
//!     println!("Saves live in {}", config.game.save_dir);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [game]
//! save_dir = "./saves"
//! starting_gold = 100
//! starting_hp = 30
//! rest_hp = 30
//! heal_amount = 10
//!
//! [grid]
//! size = 10
//! wandering_monsters = 1
//! respawn_count = 2
//! monster_move_every = 2
//!
//! [logging]
//! level = "info"
//! file = "questline.log"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::fs;

use crate::adventure::types::{DEFAULT_GOLD, DEFAULT_HP};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Directory holding one `<name>.json` save per character.
    pub save_dir: String,
    pub starting_gold: u32,
    pub starting_hp: i32,
    /// HP after a full rest (the Sleep menu option).
    pub rest_hp: i32,
    /// HP restored by a healing consumable; capped at `rest_hp`.
    pub heal_amount: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            save_dir: "./saves".to_string(),
            starting_gold: DEFAULT_GOLD,
            starting_hp: DEFAULT_HP,
            rest_hp: DEFAULT_HP,
            heal_amount: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Board is `size` x `size` squares.
    pub size: usize,
    /// Monsters placed when the board is created.
    pub wandering_monsters: usize,
    /// Monsters spawned once the board has been cleared.
    pub respawn_count: usize,
    /// Monsters take one step every this many player moves (0 freezes them).
    pub monster_move_every: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: 10,
            wandering_monsters: 1,
            respawn_count: 2,
            monster_move_every: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Log file; `None` or `""` sends warnings to stderr only.
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some("questline.log".to_string()),
        }
    }
}

impl LoggingConfig {
    /// The configured log file, if any. An empty path disables the file sink.
    pub fn log_file(&self) -> Option<&str> {
        self.file.as_deref().filter(|f| !f.trim().is_empty())
    }

    /// Parse `level`; unknown values fall back to Info.
    pub fn level_filter(&self) -> log::LevelFilter {
        match self.level.to_ascii_lowercase().as_str() {
            "off" => log::LevelFilter::Off,
            "error" => log::LevelFilter::Error,
            "warn" | "warning" => log::LevelFilter::Warn,
            "info" => log::LevelFilter::Info,
            "debug" => log::LevelFilter::Debug,
            "trace" => log::LevelFilter::Trace,
            _ => {
                eprintln!("Invalid log level '{}', defaulting to info", self.level);
                log::LevelFilter::Info
            }
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration file
    pub fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Reject values the game cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.game.starting_hp <= 0 {
            return Err(anyhow!("game.starting_hp must be positive"));
        }
        if self.game.rest_hp <= 0 {
            return Err(anyhow!("game.rest_hp must be positive"));
        }
        if self.grid.size < 2 {
            return Err(anyhow!("grid.size must be at least 2"));
        }
        Ok(())
    }
}
