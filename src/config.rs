//! Coordinator configuration.
//!
//! Every field has a default matching the catalog's presentation contract, so
//! a config file only needs to list the values it overrides. Durations are
//! stored in milliseconds to keep the JSON readable.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Viewport width above which the layout switches to desktop mode.
pub const DEFAULT_BREAKPOINT: f32 = 768.0;

const CONFIG_DIR_NAME: &str = "pawablox";
const CONFIG_FILE_NAME: &str = "config.json";

/// Tunable constants of the UI state coordinator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Layout breakpoint in viewport units
    pub breakpoint: f32,
    /// Delay between toast insertion and the start of its enter transition
    pub toast_enter_delay_ms: u64,
    /// Time from toast insertion until its exit transition starts
    pub toast_display_ms: u64,
    /// Length of the exit transition; the toast is detached when it ends
    pub toast_exit_ms: u64,
    /// How long a copy trigger keeps its acknowledgment
    pub copy_feedback_ms: u64,
    /// Notification shown after a successful copy
    pub copied_message: String,
    /// Field error message for empty mandatory fields
    pub required_message: String,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            breakpoint: DEFAULT_BREAKPOINT,
            toast_enter_delay_ms: 100,
            toast_display_ms: 3000,
            toast_exit_ms: 300,
            copy_feedback_ms: 2000,
            copied_message: "Copied to clipboard!".to_string(),
            required_message: "This field is required".to_string(),
        }
    }
}

impl CoordinatorConfig {
    pub fn toast_enter_delay(&self) -> Duration {
        Duration::from_millis(self.toast_enter_delay_ms)
    }

    pub fn toast_display(&self) -> Duration {
        Duration::from_millis(self.toast_display_ms)
    }

    pub fn toast_exit(&self) -> Duration {
        Duration::from_millis(self.toast_exit_ms)
    }

    pub fn copy_feedback(&self) -> Duration {
        Duration::from_millis(self.copy_feedback_ms)
    }

    /// Notification text for a copied color swatch value.
    pub fn color_copied_message(&self, value: &str) -> String {
        format!("Copied {} to clipboard!", value)
    }

    /// Parses a configuration from a JSON string.
    pub fn from_json(path: &Path, json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &json)
    }

    /// Default per-user config file location, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the explicit file if given, else the per-user file if it exists,
    /// else the built-in defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading user config");
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.breakpoint.is_finite() && self.breakpoint > 0.0) {
            return Err(ConfigError::InvalidBreakpoint(self.breakpoint));
        }
        Ok(())
    }
}
