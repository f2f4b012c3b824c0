#![forbid(unsafe_code)]

//! Editor settings loaded from TOML or JSON.
//!
//! ```toml
//! # gridify.toml
//! min_cell_px = 12.0
//! palette_seed = 7
//! label_prefix = "Box"
//!
//! [grid]
//! columns = 6
//! rows = 4
//! gap = 8
//! ```
//!
//! Every field has a default, so an empty document yields
//! [`EditorSettings::default`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::GridConfiguration;
use crate::geometry::MIN_CELL_PX;

/// Startup parameters for a grid editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Initial grid configuration.
    pub grid: GridConfiguration,
    /// Floor for derived cell sizes, in pixels.
    pub min_cell_px: f64,
    /// Seed for the default item color palette.
    pub palette_seed: u64,
    /// Prefix for default item labels (`"{prefix} {n}"`).
    pub label_prefix: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            grid: GridConfiguration::default(),
            min_cell_px: MIN_CELL_PX,
            palette_seed: 0,
            label_prefix: "Item".into(),
        }
    }
}

impl EditorSettings {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(s).map_err(SettingsError::Toml)?;
        settings.checked()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SettingsError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(s).map_err(SettingsError::Json)?;
        settings.checked()
    }

    /// Validate the fields serde cannot check on its own.
    ///
    /// An empty list means the settings are usable.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if !self.min_cell_px.is_finite() || self.min_cell_px <= 0.0 {
            errors.push(format!(
                "min_cell_px must be a positive number, got {}",
                self.min_cell_px
            ));
        }
        if self.label_prefix.trim().is_empty() {
            errors.push("label_prefix must not be blank".into());
        }
        errors
    }

    fn checked(self) -> Result<Self, SettingsError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(SettingsError::Validation(errors))
        }
    }
}

/// Errors that can occur when loading editor settings.
#[derive(Debug)]
pub enum SettingsError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error (includes out-of-range grid values).
    Toml(toml::de::Error),
    /// JSON parse error (includes out-of-range grid values).
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => write!(f, "validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
