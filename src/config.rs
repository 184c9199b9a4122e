use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::app_dirs::AppDirs;
use crate::countdown::{MAX_MINUTES, MAX_SECONDS};
use crate::opacity::{MAX_OPACITY, MIN_OPACITY};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to write config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Startup preferences. Session data is never stored here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub opacity: u8,
    pub countdown_minutes: u32,
    pub countdown_seconds: u32,
    pub auto_reset: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            opacity: 80,
            countdown_minutes: 0,
            countdown_seconds: 30,
            auto_reset: true,
        }
    }
}

/// Values given on the command line; `None` keeps the file value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub opacity: Option<u8>,
    pub countdown_minutes: Option<u32>,
    pub countdown_seconds: Option<u32>,
    pub no_auto_reset: bool,
}

impl Config {
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(opacity) = overrides.opacity {
            self.opacity = opacity;
        }
        if let Some(minutes) = overrides.countdown_minutes {
            self.countdown_minutes = minutes;
        }
        if let Some(seconds) = overrides.countdown_seconds {
            self.countdown_seconds = seconds;
        }
        if overrides.no_auto_reset {
            self.auto_reset = false;
        }
        self.clamped()
    }

    /// Pull hand-edited values back into the ranges the controls allow.
    pub fn clamped(mut self) -> Self {
        self.opacity = self.opacity.clamp(MIN_OPACITY, MAX_OPACITY);
        self.countdown_minutes = self.countdown_minutes.min(MAX_MINUTES);
        self.countdown_seconds = self.countdown_seconds.min(MAX_SECONDS);
        self
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path().unwrap_or_else(|| PathBuf::from("xptrack_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::debug!("no config at {}: {e}", self.path.display());
                return Config::default();
            }
        };

        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg.clamped(),
            Err(e) => {
                log::warn!("ignoring unreadable config {}: {e}", self.path.display());
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data).map_err(io_err)
    }
}
