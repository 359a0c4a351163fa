#![forbid(unsafe_code)]

//! Identifier newtypes and the allocator that issues them.
//!
//! Ids are plain integers wrapped in distinct types so a component id can
//! never be passed where a child id is expected. Fresh ids come from an
//! [`IdAllocator`] that lives inside the document state instead of a global
//! counter, which keeps the reducer a pure function.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifies a component definition. Stable for the component's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ComponentId(u64);

impl ComponentId {
    /// Wrap a raw id.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies one placed instance in a children tree.
///
/// Unique across the whole document, not only within its parent: focus and
/// move operations address children globally by this id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ChildId(u64);

impl ChildId {
    /// Wrap a raw id.
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw numeric value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a built-in HTML element kind. See [`crate::HTML_ELEMENT_KINDS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct HtmlElementId(u32);

impl HtmlElementId {
    /// Wrap a raw id.
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw numeric value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for HtmlElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic source of fresh component and child ids.
///
/// # Invariants
///
/// 1. Every id returned by `next_*` is strictly greater than all ids
///    previously returned by the same method.
/// 2. [`observe_child_id`](Self::observe_child_id) never moves the counter
///    backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IdAllocator {
    next_component: u64,
    next_child: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self {
            next_component: 1,
            next_child: 1,
        }
    }
}

impl IdAllocator {
    /// Create an allocator whose first ids are `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next component id.
    pub fn next_component_id(&mut self) -> ComponentId {
        let id = ComponentId(self.next_component);
        self.next_component += 1;
        id
    }

    /// Issue the next child id.
    pub fn next_child_id(&mut self) -> ChildId {
        let id = ChildId(self.next_child);
        self.next_child += 1;
        id
    }

    /// The id the next call to [`next_component_id`](Self::next_component_id)
    /// will return.
    #[must_use]
    pub const fn peek_component_id(&self) -> ComponentId {
        ComponentId(self.next_component)
    }

    /// The id the next call to [`next_child_id`](Self::next_child_id) will
    /// return.
    #[must_use]
    pub const fn peek_child_id(&self) -> ChildId {
        ChildId(self.next_child)
    }

    /// Record an externally chosen child id so the counter never reissues it.
    pub fn observe_child_id(&mut self, id: ChildId) {
        self.next_child = self.next_child.max(id.0.saturating_add(1));
    }
}
