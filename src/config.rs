//! TOML configuration.
//!
//! Stored at `<config dir>/vakit/config.toml`. Every field has a default, so an absent file
//! or an empty one is a valid configuration.

use crate::error::{Result, VakitError};
use crate::render::SurfaceKind;
use crate::schedule::Language;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_DIR: &str = "vakit";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Seconds between refresh ticks
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    #[serde(default)]
    pub language: Language,
    /// Where the schedule store lives; defaults next to this file
    #[serde(default)]
    pub schedule_path: Option<PathBuf>,
    /// Surfaces rendered by `--watch`
    #[serde(default = "default_surfaces")]
    pub surfaces: Vec<SurfaceKind>,
}

fn default_refresh_interval() -> u64 {
    60
}

fn default_surfaces() -> Vec<SurfaceKind> {
    vec![SurfaceKind::Small]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_secs: default_refresh_interval(),
            language: Language::default(),
            schedule_path: None,
            surfaces: default_surfaces(),
        }
    }
}

impl Config {
    /// Load from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() && !path.is_file() {
            return Err(VakitError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(err) => {
                return Err(VakitError::file_error(
                    format!("reading {}", path.display()),
                    err,
                ))
            }
        };

        let config: Config = toml::from_str(&contents)
            .map_err(|e| VakitError::config(format!("{}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default location.
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval_secs == 0 {
            return Err(VakitError::config(
                "refresh_interval_secs must be greater than zero",
            ));
        }
        if self.surfaces.is_empty() {
            return Err(VakitError::config("at least one surface is required"));
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Resolved schedule file location.
    pub fn schedule_path(&self) -> PathBuf {
        self.schedule_path.clone().unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(APP_DIR)
                .join("schedule.toml")
        })
    }
}
