#![forbid(unsafe_code)]

//! Core: the component tree and the identifiers that address it.
//!
//! # Role in Blueprint
//! `blueprint-core` is the data layer. It owns the identifier types, the
//! per-component children list with its separator invariant, the catalogue of
//! built-in HTML element kinds, and the focus cursor. It has no notion of
//! actions or history; those live in `blueprint-runtime`.
//!
//! # Primary responsibilities
//! - **Ids**: [`ComponentId`], [`ChildId`], [`HtmlElementId`] and the explicit
//!   [`IdAllocator`] that hands out fresh ones.
//! - **Children**: [`Children`] keeps `[separator, content]` pairs and offers
//!   atomic insert, nest, and remove primitives.
//! - **Focus**: [`Focus`] is the `(component, child)` cursor that implicit
//!   edits target.
//!
//! # How it fits in the system
//! The runtime (`blueprint-runtime`) wraps these primitives in `Component`
//! and `State`, adds per-component history, and drives them from the reducer.
//! Every collection here is an `im` persistent structure, so cloning a tree to
//! keep an old snapshot is O(1).

pub mod children;
pub mod element;
pub mod error;
pub mod focus;
pub mod id;
pub mod node;
pub mod style;

pub use children::Children;
pub use element::{HTML_ELEMENT_KINDS, HtmlElementKind};
pub use error::TreeError;
pub use focus::Focus;
pub use id::{ChildId, ComponentId, HtmlElementId, IdAllocator};
pub use node::{ChildElement, ChildNode, ElementType};
pub use style::Style;
