#![forbid(unsafe_code)]

//! The focus cursor.

use crate::id::{ChildId, ComponentId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The `(component, child)` pair identifying what the user is editing.
///
/// `child_id == None` means the component itself is selected with no child;
/// implicit insertions then append at the end of its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Focus {
    pub component_id: ComponentId,
    pub child_id: Option<ChildId>,
}

impl Focus {
    #[must_use]
    pub const fn new(component_id: ComponentId, child_id: Option<ChildId>) -> Self {
        Self {
            component_id,
            child_id,
        }
    }

    /// Focus a component with no child selected.
    #[must_use]
    pub const fn component(component_id: ComponentId) -> Self {
        Self::new(component_id, None)
    }

    /// Same component, selecting `child_id`.
    #[must_use]
    pub const fn with_child(self, child_id: ChildId) -> Self {
        Self::new(self.component_id, Some(child_id))
    }

    /// Same component, no child selected.
    #[must_use]
    pub const fn without_child(self) -> Self {
        Self::new(self.component_id, None)
    }
}
