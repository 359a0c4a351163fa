#![forbid(unsafe_code)]

//! Catalogue of built-in HTML element kinds.
//!
//! A child whose type is `HTML Element` refers to one of these entries by
//! [`HtmlElementId`]. Container kinds may hold nested children; the rest are
//! leaves.

use crate::id::HtmlElementId;

/// A built-in HTML element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlElementKind {
    /// Stable numeric id used by `typeId`.
    pub id: HtmlElementId,
    /// Display name shown in the palette.
    pub name: &'static str,
    /// Markup tag emitted by exporters.
    pub tag: &'static str,
    /// Whether instances may nest children.
    pub container: bool,
}

const fn kind(id: u32, name: &'static str, tag: &'static str, container: bool) -> HtmlElementKind {
    HtmlElementKind {
        id: HtmlElementId::new(id),
        name,
        tag,
        container,
    }
}

/// Every built-in element kind, ordered by id.
pub const HTML_ELEMENT_KINDS: &[HtmlElementKind] = &[
    kind(1, "Image", "img", false),
    kind(2, "Form", "form", true),
    kind(3, "Button", "button", false),
    kind(4, "Div", "div", true),
    kind(5, "Link", "a", false),
    kind(6, "List", "ul", true),
    kind(7, "Paragraph", "p", false),
    kind(8, "List Item", "li", true),
    kind(9, "Span", "span", true),
    kind(10, "Input", "input", false),
    kind(11, "Label", "label", false),
];

impl HtmlElementKind {
    /// Find a kind by id.
    #[must_use]
    pub fn lookup(id: HtmlElementId) -> Option<&'static HtmlElementKind> {
        HTML_ELEMENT_KINDS.iter().find(|kind| kind.id == id)
    }

    /// Find a kind by its markup tag.
    #[must_use]
    pub fn by_tag(tag: &str) -> Option<&'static HtmlElementKind> {
        HTML_ELEMENT_KINDS.iter().find(|kind| kind.tag == tag)
    }
}
