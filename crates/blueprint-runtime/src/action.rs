#![forbid(unsafe_code)]

//! The closed set of actions the reducer accepts.

use blueprint_core::{ChildId, ElementType, Focus, Style};

use crate::project::ProjectType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A state transition request.
///
/// Actions without an explicit target act on the current focus.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "payload"))]
pub enum Action {
    /// Create a component definition, optionally designating it as root.
    #[cfg_attr(feature = "serde", serde(rename = "ADD COMPONENT"))]
    AddComponent { name: String, root: bool },

    /// Place a new instance in the focused component.
    ///
    /// With `parent == None` it goes before the focused child (or at the end
    /// when none is focused); otherwise it is nested inside `parent`.
    #[cfg_attr(feature = "serde", serde(rename = "ADD CHILD"))]
    AddChild {
        element_type: ElementType,
        parent: Option<ChildId>,
    },

    /// Move an existing instance into the focused component, before
    /// `new_parent_child_id` or at the end.
    #[cfg_attr(feature = "serde", serde(rename = "CHANGE POSITION"))]
    ChangePosition {
        current_child_id: ChildId,
        new_parent_child_id: Option<ChildId>,
    },

    /// Remove the focused child.
    #[cfg_attr(feature = "serde", serde(rename = "DELETE CHILD"))]
    DeleteChild,

    #[cfg_attr(feature = "serde", serde(rename = "CHANGE FOCUS"))]
    ChangeFocus(Focus),

    /// Shallow-merge into the focused component's style.
    #[cfg_attr(feature = "serde", serde(rename = "UPDATE CSS"))]
    UpdateCss { style: Style },

    #[cfg_attr(feature = "serde", serde(rename = "UPDATE PROJECT NAME"))]
    UpdateProjectName(String),

    #[cfg_attr(feature = "serde", serde(rename = "CHANGE PROJECT TYPE"))]
    ChangeProjectType(ProjectType),

    #[cfg_attr(feature = "serde", serde(rename = "UNDO"))]
    Undo,

    #[cfg_attr(feature = "serde", serde(rename = "REDO"))]
    Redo,

    /// Back to a fresh document; the project name survives.
    #[cfg_attr(feature = "serde", serde(rename = "RESET STATE"))]
    ResetState,
}

impl Action {
    /// Convenience constructor for appending or dropping before the focus.
    #[must_use]
    pub fn add_child(element_type: ElementType) -> Self {
        Self::AddChild {
            element_type,
            parent: None,
        }
    }

    /// Wire tag, e.g. `"ADD CHILD"`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AddComponent { .. } => "ADD COMPONENT",
            Self::AddChild { .. } => "ADD CHILD",
            Self::ChangePosition { .. } => "CHANGE POSITION",
            Self::DeleteChild => "DELETE CHILD",
            Self::ChangeFocus(_) => "CHANGE FOCUS",
            Self::UpdateCss { .. } => "UPDATE CSS",
            Self::UpdateProjectName(_) => "UPDATE PROJECT NAME",
            Self::ChangeProjectType(_) => "CHANGE PROJECT TYPE",
            Self::Undo => "UNDO",
            Self::Redo => "REDO",
            Self::ResetState => "RESET STATE",
        }
    }

    /// Whether the action edits a children tree and so records history.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::AddChild { .. } | Self::ChangePosition { .. } | Self::DeleteChild
        )
    }
}
