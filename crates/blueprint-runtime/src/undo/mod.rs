#![forbid(unsafe_code)]

//! Undo/redo history.
//!
//! Every component keeps its own [`History`] of children snapshots. Undo and
//! redo never reach across components: stepping back in one component leaves
//! every other component's stacks alone.
//!
//! # Capture contract
//!
//! The reducer pushes a snapshot of a component's children *before* each
//! structural edit (add, delete, move) inside the same transition, and that
//! push clears the redo stack. Style, focus, and project metadata changes are
//! not recorded.
//!
//! ```text
//! AddChild        past: [..., before]   future: []
//! Undo            past: [...]           future: [after]   children = before
//! Redo            past: [..., before]   future: []        children = after
//! ```

pub mod history;

pub use history::{History, HistoryConfig};
