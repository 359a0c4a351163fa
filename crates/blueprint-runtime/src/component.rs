#![forbid(unsafe_code)]

//! Reusable component definitions.

use blueprint_core::{Children, ComponentId, Style};

use crate::undo::{History, HistoryConfig};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A nameable unit owning its children tree, style, and undo history.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Component {
    id: ComponentId,
    name: String,
    style: Style,
    children: Children,
    history: History<Children>,
}

impl Component {
    /// Create an empty component.
    #[must_use]
    pub fn new(id: ComponentId, name: impl Into<String>, history: HistoryConfig) -> Self {
        Self {
            id,
            name: name.into(),
            style: Style::new(),
            children: Children::new(),
            history: History::new(history),
        }
    }

    #[must_use]
    pub const fn id(&self) -> ComponentId {
        self.id
    }

    /// Display name. Not a key: several components may share one.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn style(&self) -> &Style {
        &self.style
    }

    #[must_use]
    pub const fn children(&self) -> &Children {
        &self.children
    }

    #[must_use]
    pub const fn history(&self) -> &History<Children> {
        &self.history
    }

    /// Shallow-merge `update` into this component's style.
    pub fn merge_style(&mut self, update: &Style) {
        self.style.merge(update);
    }

    /// Apply a structural edit to the children, recording the pre-edit
    /// snapshot only if the edit succeeds.
    pub(crate) fn edit_children<R, E>(
        &mut self,
        edit: impl FnOnce(&mut Children) -> Result<R, E>,
    ) -> Result<R, E> {
        let before = self.children.clone();
        let result = edit(&mut self.children)?;
        self.history.push(before);
        Ok(result)
    }

    /// Record a snapshot without editing (for collaborators that capture
    /// history themselves). Clears the redo stack.
    pub fn push_snapshot(&mut self, snapshot: Children) {
        self.history.push(snapshot);
    }

    /// Replace children with the previous snapshot. Returns `false` when
    /// there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.children.clone()) {
            Some(previous) => {
                self.children = previous;
                true
            }
            None => false,
        }
    }

    /// Replace children with the most recently undone snapshot. Returns
    /// `false` when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.children.clone()) {
            Some(next) => {
                self.children = next;
                true
            }
            None => false,
        }
    }
}
