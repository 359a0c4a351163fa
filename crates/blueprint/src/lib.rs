#![forbid(unsafe_code)]

//! Blueprint public facade crate.
//!
//! This crate provides the stable surface for editors built on Blueprint.
//! It re-exports the document types from `blueprint-core` and the reducer
//! and store from `blueprint-runtime`, and offers a prelude for day-to-day
//! use.
//!
//! ```rust,ignore
//! use blueprint::prelude::*;
//!
//! let store = Store::default();
//! store.dispatch(Action::add_child(ElementType::Html(HtmlElementId::new(4))))?;
//! ```

pub mod error;

#[cfg(feature = "config")]
use std::path::Path;

pub use error::{Error, Recovery, Result};

// --- Core re-exports -------------------------------------------------------

pub use blueprint_core::{
    ChildElement, ChildId, ChildNode, Children, ComponentId, ElementType, Focus,
    HTML_ELEMENT_KINDS, HtmlElementId, HtmlElementKind, Style, TreeError,
};

// --- Runtime re-exports ----------------------------------------------------

pub use blueprint_runtime::{
    Action, Component, ConfigError, DocumentDefaults, History, HistoryConfig, ProjectType,
    ReduceError, Reducer, ReducerConfig, State, Store, StoreSubscription, reduce,
};

// --- Configuration --------------------------------------------------------

/// Load a [`ReducerConfig`], picking TOML or JSON by file extension.
///
/// # Errors
///
/// [`Error::UnsupportedFormat`] for any other extension, otherwise the
/// loader's [`ConfigError`].
#[cfg(feature = "config")]
pub fn load_config(path: impl AsRef<Path>) -> Result<ReducerConfig> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let config = match extension.as_str() {
        "toml" => ReducerConfig::from_toml_file(path)?,
        "json" => ReducerConfig::from_json_file(path)?,
        other => return Err(Error::UnsupportedFormat(other.to_string())),
    };
    tracing::info!(
        target: "blueprint",
        path = %path.display(),
        max_depth = config.history.max_depth,
        "reducer config loaded"
    );
    Ok(config)
}

/// Open a store on a fresh document configured from `path`.
///
/// # Errors
///
/// See [`load_config`].
#[cfg(feature = "config")]
pub fn open_store(path: impl AsRef<Path>) -> Result<Store> {
    let config = load_config(path)?;
    Ok(Store::with_reducer(Reducer::new(config)))
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Action, ChildId, ComponentId, ElementType, Error, Focus, HtmlElementId, ProjectType,
        Reducer, ReducerConfig, Result, State, Store, Style,
    };

    pub use crate::{core, runtime};
}

pub use blueprint_core as core;
pub use blueprint_runtime as runtime;

#[cfg(all(test, feature = "config"))]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_config_by_extension() {
        let toml = config_file(".toml", "[history]\nmax_depth = 7\n");
        assert_eq!(load_config(toml.path()).unwrap().history.max_depth, 7);

        let json = config_file(".JSON", r#"{"history": {"max_depth": 9}}"#);
        assert_eq!(load_config(json.path()).unwrap().history.max_depth, 9);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let yaml = config_file(".yaml", "history: {}");
        let err = load_config(yaml.path()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(ref ext) if ext == "yaml"));
    }

    #[test]
    fn open_store_uses_configured_defaults() {
        let toml = config_file(".toml", "[defaults]\nroot_component_name = \"Shell\"\n");
        let store = open_store(toml.path()).unwrap();
        assert_eq!(store.state().focused_component().unwrap().name(), "Shell");

        let err = store
            .dispatch(Action::add_child(ElementType::Html(HtmlElementId::new(0))))
            .map_err(Error::from)
            .unwrap_err();
        assert!(err.is_recoverable());
    }
}
