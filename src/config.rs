//! Editor configuration persistence
//!
//! Stores defaults in `~/.config/caret/config.yaml`

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::editable::EditSettings;
use crate::layout::MonospaceShaper;
use crate::scroll::HorizontalScrollPolicy;

/// Editor configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Input policy applied to new editors
    pub settings: EditSettings,

    /// Caret blink half-period in milliseconds (0 disables blinking)
    pub caret_blink_ms: u64,

    /// How far to scroll when the caret leaves the viewport sideways
    pub horizontal_scroll: HorizontalScrollPolicy,

    /// Advance of the built-in monospace shaper
    pub char_width: f32,
    pub line_height: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            settings: EditSettings::default(),
            caret_blink_ms: 530,
            horizontal_scroll: HorizontalScrollPolicy::Minimal,
            char_width: 8.0,
            line_height: 16.0,
        }
    }
}

impl EditorConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    /// Save config to `path`, creating the parent directory if needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_yaml::to_string(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        let path = crate::config_paths::config_file()
            .context("No config directory available")?;
        self.save_to(&path)
    }

    /// Monospace shaper with the configured metrics
    pub fn shaper(&self) -> MonospaceShaper {
        MonospaceShaper::new(self.char_width, self.line_height)
    }
}
