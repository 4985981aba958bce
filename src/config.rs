use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "tweetfeed";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Milliseconds between redraws when no key is pressed.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            log_file: default_log_file(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Raw tab name; unknown names resolve to home.
    #[serde(default = "default_tab")]
    pub default_tab: String,
    /// JSON snapshot holding the feeds and the profile.
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
    #[serde(default)]
    pub position: Position,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            default_tab: default_tab(),
            snapshot: None,
            position: Position::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join(CONFIG_DIR).join("tweetfeed.log"))
        .unwrap_or_else(|| PathBuf::from("tweetfeed.log"))
}

fn default_title() -> String {
    "Tweets".to_string()
}

fn default_tab() -> String {
    "home".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load the file at `path` if one was given, otherwise the default
    /// location. Only a missing default file falls back to built-in values.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }
}
