#![forbid(unsafe_code)]

//! Reducer rejections.
//!
//! A rejected action never changes state: the reducer edits a structural
//! clone and only hands it back on success. Benign cases (undo with an empty
//! past, delete with no child selected) are identity transitions, not errors.

use blueprint_core::{ChildId, ComponentId, TreeError};
use thiserror::Error;

/// Why the reducer rejected an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReduceError {
    /// The action (or the focus) names a component that does not exist.
    #[error("unknown component id {0}")]
    UnknownComponentId(ComponentId),
    /// The action (or the focus) names a child absent under its parent.
    #[error("unknown child id {0}")]
    UnknownChildId(ChildId),
    /// The edit would leave two children with the same id in the document.
    #[error("duplicate child id {0}")]
    DuplicateChildId(ChildId),
    /// Nesting was requested under a node that cannot hold children.
    #[error("child {0} cannot contain nested children")]
    NotAContainer(ChildId),
    /// The HTML element kind id is not in the built-in catalogue.
    #[error("unknown HTML element type {0}")]
    UnknownElementType(u32),
    /// Placing `child` inside `parent` would make a component contain itself.
    #[error("component {child} cannot be placed inside {parent}: it would contain itself")]
    CircularReference {
        parent: ComponentId,
        child: ComponentId,
    },
}

impl ReduceError {
    /// Stable label for logs and metrics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnknownComponentId(_) => "unknown_component_id",
            Self::UnknownChildId(_) => "unknown_child_id",
            Self::DuplicateChildId(_) => "duplicate_child_id",
            Self::NotAContainer(_) => "not_a_container",
            Self::UnknownElementType(_) => "unknown_element_type",
            Self::CircularReference { .. } => "circular_reference",
        }
    }
}

impl From<TreeError> for ReduceError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::UnknownChildId(id) => Self::UnknownChildId(id),
            TreeError::DuplicateChildId(id) => Self::DuplicateChildId(id),
            TreeError::NotAContainer(id) => Self::NotAContainer(id),
        }
    }
}
