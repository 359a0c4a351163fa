#![forbid(unsafe_code)]

//! Errors raised by the tree primitives.
//!
//! Every primitive is atomic: when one of these is returned the tree is
//! exactly as it was before the call.

use thiserror::Error;

use crate::id::ChildId;

/// Tree-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// No content node with this id exists in the addressed tree.
    #[error("unknown child id {0}")]
    UnknownChildId(ChildId),
    /// Inserting would introduce a second node with this id.
    #[error("duplicate child id {0}")]
    DuplicateChildId(ChildId),
    /// The addressed node cannot hold nested children.
    #[error("child {0} cannot contain nested children")]
    NotAContainer(ChildId),
}
