#![forbid(unsafe_code)]

//! Reducer configuration.
//!
//! Captures the tunables of the reducer (history depth, document defaults)
//! as a single [`ReducerConfig`] that can be loaded from TOML or JSON at
//! startup.
//!
//! # Loading
//!
//! ```toml
//! # blueprint.toml
//! [history]
//! max_depth = 50
//!
//! [defaults]
//! project_type = "Next.js"
//! root_component_name = "App"
//! ```
//!
//! ```rust,ignore
//! let config = ReducerConfig::from_toml_file("blueprint.toml")?;
//! let config = ReducerConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! Omitted sections and fields keep their defaults, so an empty file yields
//! `ReducerConfig::default()`.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::project::ProjectType;
use crate::undo::HistoryConfig;

// ---------------------------------------------------------------------------
// Top-level ReducerConfig
// ---------------------------------------------------------------------------

/// Everything the reducer needs besides the state and the action.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ReducerConfig {
    /// Per-component undo/redo limits.
    pub history: HistoryConfig,

    /// Values used for new and reset documents.
    pub defaults: DocumentDefaults,
}

impl ReducerConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.history.max_depth == 0 {
            errors.push("history.max_depth must be > 0".into());
        }

        if self.defaults.root_component_name.trim().is_empty() {
            errors.push("defaults.root_component_name must not be empty".into());
        }

        errors
    }

    #[cfg(feature = "config")]
    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Defaults for new and reset documents.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct DocumentDefaults {
    /// Project display name of a brand-new document.
    pub project_name: String,

    /// Template of a new or reset document.
    pub project_type: ProjectType,

    /// Name of the single root component a document starts with.
    pub root_component_name: String,
}

impl Default for DocumentDefaults {
    fn default() -> Self {
        Self {
            project_name: String::new(),
            project_type: ProjectType::ClassicReact,
            root_component_name: "index".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from loading a [`ReducerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),
    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[source] toml::de::Error),
    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),
    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_validates_clean() {
        let errors = ReducerConfig::default().validate();
        assert!(errors.is_empty(), "default should validate: {errors:?}");
    }

    #[test]
    fn default_matches_component_defaults() {
        let config = ReducerConfig::default();
        assert_eq!(config.history, HistoryConfig::default());
        assert_eq!(config.defaults.project_type, ProjectType::ClassicReact);
        assert_eq!(config.defaults.root_component_name, "index");
        assert!(config.defaults.project_name.is_empty());
    }

    #[test]
    fn validate_catches_zero_depth() {
        let mut config = ReducerConfig::default();
        config.history.max_depth = 0;
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("history.max_depth")));
    }

    #[test]
    fn multiple_validation_errors_collected() {
        let mut config = ReducerConfig::default();
        config.history.max_depth = 0;
        config.defaults.root_component_name = "  ".into();
        let errors = config.validate();
        assert_eq!(errors.len(), 2, "should catch both errors: {errors:?}");
    }

    #[cfg(feature = "config")]
    #[test]
    fn partial_toml_preserves_defaults() {
        let config = ReducerConfig::from_toml_str(
            r#"
            [defaults]
            project_type = "Next.js"
            "#,
        )
        .unwrap();

        assert_eq!(config.defaults.project_type, ProjectType::NextJs);
        assert_eq!(config.defaults.root_component_name, "index");
        assert_eq!(config.history.max_depth, 100);
    }

    #[cfg(feature = "config")]
    #[test]
    fn empty_toml_is_default() {
        assert_eq!(
            ReducerConfig::from_toml_str("").unwrap(),
            ReducerConfig::default()
        );
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_overrides_history() {
        let config = ReducerConfig::from_json_str(r#"{"history": {"max_depth": 5}}"#).unwrap();
        assert_eq!(config.history.max_depth, 5);
    }

    #[cfg(feature = "config")]
    #[test]
    fn invalid_values_are_rejected_on_load() {
        let err = ReducerConfig::from_toml_str("[history]\nmax_depth = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("history.max_depth"));
    }

    #[cfg(feature = "config")]
    #[test]
    fn unknown_project_type_is_a_parse_error() {
        let err = ReducerConfig::from_toml_str("[defaults]\nproject_type = \"Svelte\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[cfg(feature = "config")]
    #[test]
    fn missing_file_is_io_error() {
        let err = ReducerConfig::from_toml_file("/definitely/not/here/blueprint.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
