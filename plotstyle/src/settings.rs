//! Library settings.
//!
//! Settings come from an optional `plotstyle.toml`, looked up in the working
//! directory first and then in the user's configuration directory
//! (`~/.config/plotstyle/plotstyle.toml` on Linux). Every key is optional;
//! accessors fall back to built-in defaults. Environment variables are not
//! consulted.
//!
//! ```toml
//! fetch_timeout_secs = 2.5
//! colormap_prefix = "lab_"
//! default_palette = "vibrant"
//! unseen_color = "#cccccc"
//! register_reversed = true
//!
//! [logging]
//! level = "debug"
//! file = "plotstyle.log"
//! ```

use crate::error::{StyleError, StyleResult};
use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const SETTINGS_FILE_NAME: &str = "plotstyle.toml";

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_COLORMAP_PREFIX: &str = "project_";
const DEFAULT_PALETTE_NAME: &str = "default";
const DEFAULT_UNSEEN_COLOR: &str = "#808080";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StyleSettings {
    fetch_timeout_secs: Option<f64>,
    colormap_prefix: Option<String>,
    default_palette: Option<String>,
    unseen_color: Option<String>,
    register_reversed: Option<bool>,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    level: Option<String>,
    file: Option<String>,
}

impl StyleSettings {
    /// Load settings from an explicit TOML file.
    pub fn from_file(path: &Path) -> StyleResult<Self> {
        let config = Config::builder()
            .add_source(File::from(path))
            .build()
            .map_err(|e| StyleError::Settings {
                reason: format!("Failed to load '{}': {e}", path.display()),
            })?;

        config
            .try_deserialize::<StyleSettings>()
            .map_err(|e| StyleError::Settings {
                reason: format!("Failed to deserialize '{}': {e}", path.display()),
            })
    }

    /// Load settings from the first `plotstyle.toml` found, or defaults.
    pub fn discover() -> StyleResult<Self> {
        match Self::candidate_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => {
                log::info!("Loading style settings from: {}", path.display());
                Self::from_file(&path)
            }
            None => {
                log::debug!("No {SETTINGS_FILE_NAME} found, using default settings");
                Ok(Self::default())
            }
        }
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(SETTINGS_FILE_NAME)];
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("plotstyle").join(SETTINGS_FILE_NAME));
        }
        paths
    }

    /// HTTP timeout for remote documents, rounded to whole milliseconds.
    ///
    /// Values that round to zero, negative or non-finite values fall back to
    /// the default.
    pub fn fetch_timeout(&self) -> Duration {
        let Some(secs) = self.fetch_timeout_secs else {
            return DEFAULT_FETCH_TIMEOUT;
        };

        let millis = (secs * 1000.0).round();
        if millis.is_finite() && millis >= 1.0 && millis <= u64::MAX as f64 {
            Duration::from_millis(millis as u64)
        } else {
            log::warn!(
                "Ignoring fetch_timeout_secs = {secs}, using {}s",
                DEFAULT_FETCH_TIMEOUT.as_secs()
            );
            DEFAULT_FETCH_TIMEOUT
        }
    }

    pub fn colormap_prefix(&self) -> &str {
        self.colormap_prefix
            .as_deref()
            .unwrap_or(DEFAULT_COLORMAP_PREFIX)
    }

    pub fn default_palette(&self) -> &str {
        self.default_palette
            .as_deref()
            .unwrap_or(DEFAULT_PALETTE_NAME)
    }

    pub fn unseen_color(&self) -> &str {
        self.unseen_color.as_deref().unwrap_or(DEFAULT_UNSEEN_COLOR)
    }

    pub fn register_reversed(&self) -> bool {
        self.register_reversed.unwrap_or(true)
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout_secs = Some(timeout.as_secs_f64());
        self
    }

    pub fn with_colormap_prefix(mut self, prefix: &str) -> Self {
        self.colormap_prefix = Some(prefix.to_string());
        self
    }

    pub fn with_default_palette(mut self, name: &str) -> Self {
        self.default_palette = Some(name.to_string());
        self
    }

    pub fn with_unseen_color(mut self, color: &str) -> Self {
        self.unseen_color = Some(color.to_string());
        self
    }
}

impl LoggingConfig {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("info")
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn with_level(mut self, level: &str) -> Self {
        self.level = Some(level.to_string());
        self
    }

    pub fn with_file(mut self, path: &str) -> Self {
        self.file = Some(path.to_string());
        self
    }
}
