//! Board configuration
//!
//! Every field has a default, so an empty TOML document (or no file at all)
//! yields the stock board: no lanes, `"Column N"` / `"Task N"` naming,
//! sequential ids.

use crate::domain::drag::LaneDropPolicy;
use crate::domain::id::{IdGenerator, RandomIds, SequentialIds};
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How new lane and item ids are produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum IdStrategy {
    /// Counter starting at 1
    #[default]
    Sequential,
    /// Random draw from `0..=max`, checked against ids already on the board
    Random {
        #[serde(default = "default_random_max")]
        max: u32,
    },
}

impl IdStrategy {
    pub fn generator(&self) -> Box<dyn IdGenerator> {
        match self {
            Self::Sequential => Box::new(SequentialIds::new()),
            Self::Random { max } => Box::new(RandomIds::new(*max)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default = "default_name")]
    pub name: String,

    /// Prefix of auto-numbered lane titles
    #[serde(default = "default_lane_title_prefix")]
    pub lane_title_prefix: String,

    /// Prefix of auto-numbered item contents
    #[serde(default = "default_item_content_prefix")]
    pub item_content_prefix: String,

    /// Lane titles created when the board is built
    #[serde(default)]
    pub initial_lanes: Vec<String>,

    /// Where an item lands when dropped on a lane body rather than an item
    #[serde(default)]
    pub lane_drop: LaneDropPolicy,

    /// Refuse to create items for lanes that are not on the board
    #[serde(default)]
    pub validate_item_lane: bool,

    #[serde(default)]
    pub ids: IdStrategy,
}

fn default_name() -> String {
    "Board".to_string()
}

fn default_lane_title_prefix() -> String {
    "Column".to_string()
}

fn default_item_content_prefix() -> String {
    "Task".to_string()
}

fn default_random_max() -> u32 {
    10_000
}

impl BoardConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads the configuration file at `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` if it exists, otherwise returns the defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| BoardError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    fn validate(&self) -> Result<()> {
        if self.lane_title_prefix.trim().is_empty() {
            return Err(BoardError::ConfigError(
                "lane_title_prefix must not be empty".to_string(),
            ));
        }
        if self.item_content_prefix.trim().is_empty() {
            return Err(BoardError::ConfigError(
                "item_content_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            lane_title_prefix: default_lane_title_prefix(),
            item_content_prefix: default_item_content_prefix(),
            initial_lanes: Vec::new(),
            lane_drop: LaneDropPolicy::default(),
            validate_item_lane: false,
            ids: IdStrategy::default(),
        }
    }
}
