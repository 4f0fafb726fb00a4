// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::extract::DeadlineRule;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_lazy_command() -> String {
    "lazy".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_urgent_hours() -> i64 {
    24
}
fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// Program used for every invocation (`lazy assignment todo`, ...).
    #[serde(default = "default_lazy_command")]
    pub lazy_command: String,
    #[serde(default = "default_timeout")]
    pub command_timeout_secs: u64,

    /// Where the file picker opens. Falls back to the home directory.
    #[serde(default)]
    pub start_dir: Option<PathBuf>,
    #[serde(default)]
    pub show_hidden_files: bool,

    /// Split a trailing "(...)" countdown off the deadline line.
    #[serde(default)]
    pub split_countdown: bool,
    #[serde(default = "default_urgent_hours")]
    pub urgent_hours: i64,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lazy_command: default_lazy_command(),
            command_timeout_secs: default_timeout(),
            start_dir: None,
            show_hidden_files: false,
            split_countdown: false,
            urgent_hours: default_urgent_hours(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load the configuration from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults.
    /// Unreadable or malformed files are still errors.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(cfg) => Ok(cfg),
            Err(e) if Self::is_missing_config_error(&e) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Helper to detect whether an anyhow::Error indicates that the config file was missing.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        for cause in err.chain() {
            if let Some(io_err) = cause.downcast_ref::<std::io::Error>()
                && io_err.kind() == std::io::ErrorKind::NotFound
            {
                return true;
            }
        }

        false
    }

    /// Save configuration using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        let toml_str = toml::to_string_pretty(self)?;
        atomic_write(&path, toml_str)?;
        Ok(())
    }

    pub fn get_path_string(ctx: &dyn AppContext) -> Result<String> {
        let path = ctx.get_config_file_path()?;
        Ok(path.to_string_lossy().to_string())
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs.max(1))
    }

    pub fn deadline_rule(&self) -> DeadlineRule {
        if self.split_countdown {
            DeadlineRule::WithCountdown
        } else {
            DeadlineRule::Plain
        }
    }

    /// `start_dir` if it is set and still a directory, otherwise the home directory,
    /// otherwise the working directory.
    pub fn resolve_start_dir(&self) -> PathBuf {
        if let Some(dir) = &self.start_dir
            && dir.is_dir()
        {
            return dir.clone();
        }
        directories::BaseDirs::new()
            .map(|b| b.home_dir().to_path_buf())
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, contents)?;
    fs::rename(tmp_path, path)?;
    Ok(())
}
