#![forbid(unsafe_code)]

//! Per-component past/future snapshot stacks.
//!
//! [`History`] keeps the snapshots a single component can step back and
//! forth through. The caller owns the *current* value; the history only
//! holds what came before (`past`) and what was undone (`future`):
//!
//! ```text
//! push(s2)
//! ┌────────────────────────────────────────────┐
//! │ Past:    [s0, s1, s2]      Current: c      │
//! │ Future:  []                                │
//! └────────────────────────────────────────────┘
//!
//! undo(c) -> s2
//! ┌────────────────────────────────────────────┐
//! │ Past:    [s0, s1]          Current: s2     │
//! │ Future:  [c]                               │
//! └────────────────────────────────────────────┘
//!
//! push(s3)  <-- new edit, clears future
//! ┌────────────────────────────────────────────┐
//! │ Past:    [s0, s1, s3]      Current: c'     │
//! │ Future:  []                                │
//! └────────────────────────────────────────────┘
//! ```
//!
//! # Memory Model
//!
//! Both stacks are [`im::Vector`]s, and the snapshots stored in them are
//! expected to be persistent collections too, so cloning a `History` (which
//! happens on every reducer transition) shares all storage with the original.

use im::Vector;

#[cfg(any(feature = "serde", feature = "config"))]
use serde::{Deserialize, Serialize};

/// Configuration for a [`History`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(any(feature = "serde", feature = "config"), derive(Serialize, Deserialize))]
#[cfg_attr(any(feature = "serde", feature = "config"), serde(default))]
pub struct HistoryConfig {
    /// Maximum number of entries kept on each stack.
    /// Oldest entries are evicted when this limit is exceeded.
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_depth: 100 }
    }
}

impl HistoryConfig {
    /// Create a new configuration with the given depth limit.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Create an unlimited configuration (for testing).
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }
}

/// Past and future stacks of snapshots, most recent last.
///
/// # Invariants
///
/// 1. `past.len() <= config.max_depth` and `future.len() <= config.max_depth`
///    after any operation.
/// 2. `future` is cleared on every [`push`](Self::push).
/// 3. `future` only grows through [`undo`](Self::undo).
/// 4. `redo(undo(x)) == x` and `undo(redo(x)) == x` whenever the popped
///    stack was non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound(
    serialize = "T: Clone + Serialize",
    deserialize = "T: Clone + Deserialize<'de>"
)))]
pub struct History<T: Clone> {
    past: Vector<T>,
    future: Vector<T>,
    config: HistoryConfig,
}

impl<T: Clone> Default for History<T> {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl<T: Clone> History<T> {
    /// Create empty stacks with the given configuration.
    #[must_use]
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            past: Vector::new(),
            future: Vector::new(),
            config,
        }
    }

    // ====================================================================
    // Core Operations
    // ====================================================================

    /// Record a snapshot taken before a new edit, clearing the future.
    ///
    /// If the past exceeds `max_depth`, the oldest snapshot is evicted.
    pub fn push(&mut self, snapshot: T) {
        self.future.clear();
        self.past.push_back(snapshot);
        Self::enforce_depth(&mut self.past, self.config.max_depth);
    }

    /// Step back: returns the most recent past snapshot and stores `current`
    /// on the future stack.
    ///
    /// Returns `None` (and keeps `current` out of the history) when there is
    /// nothing to undo.
    pub fn undo(&mut self, current: T) -> Option<T> {
        let previous = self.past.pop_back()?;
        self.future.push_back(current);
        Self::enforce_depth(&mut self.future, self.config.max_depth);
        Some(previous)
    }

    /// Step forward: returns the most recently undone snapshot and stores
    /// `current` on the past stack.
    ///
    /// Returns `None` when there is nothing to redo.
    pub fn redo(&mut self, current: T) -> Option<T> {
        let next = self.future.pop_back()?;
        self.past.push_back(current);
        Self::enforce_depth(&mut self.past, self.config.max_depth);
        Some(next)
    }

    // ====================================================================
    // Query
    // ====================================================================

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    #[must_use]
    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    #[must_use]
    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    /// Past snapshots, oldest first.
    #[must_use]
    pub fn past(&self) -> &Vector<T> {
        &self.past
    }

    /// Undone snapshots, oldest undo last.
    #[must_use]
    pub fn future(&self) -> &Vector<T> {
        &self.future
    }

    #[must_use]
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    // ====================================================================
    // Maintenance
    // ====================================================================

    /// Drop every snapshot on both stacks.
    pub fn clear(&mut self) {
        self.past.clear();
        self.future.clear();
    }

    fn enforce_depth(stack: &mut Vector<T>, max_depth: usize) {
        while stack.len() > max_depth {
            stack.pop_front();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
