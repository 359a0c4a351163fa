#![forbid(unsafe_code)]

//! Blueprint error model.
//!
//! Each layer keeps its own typed error (`TreeError` in the core,
//! `ReduceError` and `ConfigError` in the runtime). [`Error`] unifies them
//! for applications and classifies each one by the [`Recovery`] a host
//! should apply: a rejected edit keeps the previous document, a bad
//! configuration stops startup.

use blueprint_core::TreeError;
use blueprint_runtime::{ConfigError, ReduceError};
use thiserror::Error;

/// Top-level error type for Blueprint hosts.
#[derive(Debug, Error)]
pub enum Error {
    /// The reducer rejected an action.
    #[error(transparent)]
    Reduce(#[from] ReduceError),
    /// A direct edit of a children tree failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
    /// Reducer configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The configuration file extension names no known format.
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Standard result type for Blueprint APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// What a host should do when an error surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Discard the edit and keep showing the previous document.
    KeepPreviousState,
    /// Startup cannot continue until the configuration is fixed.
    Abort,
}

impl Error {
    #[must_use]
    pub fn recovery(&self) -> Recovery {
        match self {
            Self::Reduce(_) | Self::Tree(_) => Recovery::KeepPreviousState,
            Self::Config(_) | Self::UnsupportedFormat(_) => Recovery::Abort,
        }
    }

    /// Error type label for metrics and tracing.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Reduce(err) => err.kind(),
            Self::Tree(_) => "tree",
            Self::Config(_) | Self::UnsupportedFormat(_) => "config",
        }
    }

    /// Whether the host can carry on with its current document.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.recovery() != Recovery::Abort
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;

    use super::*;
    use blueprint_core::{ChildId, ComponentId};

    #[test]
    fn reduce_errors_keep_state() {
        let err = Error::from(ReduceError::UnknownComponentId(ComponentId::new(4)));
        assert_eq!(err.recovery(), Recovery::KeepPreviousState);
        assert!(err.is_recoverable());
        assert_eq!(err.error_type(), "unknown_component_id");
        assert!(format!("{err}").contains('4'));
    }

    #[test]
    fn tree_errors_keep_state() {
        let err = Error::from(TreeError::NotAContainer(ChildId::new(2)));
        assert!(err.is_recoverable());
        assert_eq!(err.error_type(), "tree");
    }

    #[test]
    fn config_errors_abort() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::from(ConfigError::Io(io));
        assert_eq!(err.recovery(), Recovery::Abort);
        assert!(!err.is_recoverable());
        assert_eq!(err.error_type(), "config");
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn validation_message_is_preserved() {
        let err = Error::from(ConfigError::Validation(vec![
            "history.max_depth must be > 0".into(),
        ]));
        assert!(format!("{err}").contains("history.max_depth"));
    }

    #[test]
    fn unsupported_format_is_config_error() {
        let err = Error::UnsupportedFormat("yaml".into());
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "unsupported config format: yaml");
    }
}
