#![forbid(unsafe_code)]

//! Blueprint Runtime
//!
//! The state layer of the Blueprint component designer: a pure reducer over
//! an immutable design document, with per-component undo/redo.
//!
//! # Key Components
//!
//! - [`State`] - The design document (components, roots, focus, metadata)
//! - [`Action`] - The closed set of transitions
//! - [`Reducer`] - Applies actions; never mutates its input
//! - [`History`] - Bounded past/future snapshot stacks
//! - [`Store`] - Single-threaded holder with change subscriptions
//! - [`ReducerConfig`] - History depth and document defaults
//!
//! # Role in Blueprint
//! `blueprint-runtime` sits on top of `blueprint-core`, which provides the
//! children tree and identifiers. Editors drive it by dispatching actions;
//! renderers and exporters read the resulting [`State`].
//!
//! # Observability
//! Every dispatch runs inside a `reducer.dispatch` tracing span and logs on
//! the `blueprint.reducer` target. Install any `tracing` subscriber to see
//! them; see [`telemetry`] for counters.

pub mod action;
pub mod component;
pub mod config;
pub mod error;
pub mod project;
pub mod reducer;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod undo;

pub use action::Action;
pub use component::Component;
pub use config::{ConfigError, DocumentDefaults, ReducerConfig};
pub use error::ReduceError;
pub use project::{ProjectType, UnknownProjectType};
pub use reducer::{Reducer, reduce};
pub use state::State;
pub use store::{Store, StoreSubscription};
pub use undo::{History, HistoryConfig};
