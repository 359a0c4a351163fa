#![forbid(unsafe_code)]

//! Entries of a children list: separators and content nodes.

use crate::children::Children;
use crate::element::HtmlElementKind;
use crate::id::{ChildId, ComponentId, HtmlElementId};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a content node instantiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", content = "typeId"))]
pub enum ElementType {
    /// An instance of another component definition.
    #[cfg_attr(feature = "serde", serde(rename = "Component"))]
    Component(ComponentId),
    /// A built-in element kind.
    #[cfg_attr(feature = "serde", serde(rename = "HTML Element"))]
    Html(HtmlElementId),
}

impl ElementType {
    /// Human label of the type, as shown in the palette.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Component(_) => "Component",
            Self::Html(_) => "HTML Element",
        }
    }

    /// Numeric id of the referenced definition or element kind.
    #[must_use]
    pub const fn type_id(&self) -> u64 {
        match self {
            Self::Component(id) => id.get(),
            Self::Html(id) => id.get() as u64,
        }
    }

    /// Whether instances of this type may hold nested children.
    ///
    /// Component references never do: their content is the referenced
    /// definition. Unknown element kinds are treated as leaves.
    #[must_use]
    pub fn is_container(&self) -> bool {
        match self {
            Self::Component(_) => false,
            Self::Html(id) => HtmlElementKind::lookup(*id).is_some_and(|kind| kind.container),
        }
    }
}

/// A placed instance inside a children tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChildElement {
    element_type: ElementType,
    child_id: ChildId,
    #[cfg_attr(feature = "serde", serde(default))]
    children: Children,
}

impl ChildElement {
    /// Create a content node with no nested children.
    #[must_use]
    pub fn new(child_id: ChildId, element_type: ElementType) -> Self {
        Self {
            element_type,
            child_id,
            children: Children::new(),
        }
    }

    /// Attach nested children (only meaningful for container kinds).
    #[must_use]
    pub fn with_children(mut self, children: Children) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        self.element_type
    }

    #[must_use]
    pub const fn child_id(&self) -> ChildId {
        self.child_id
    }

    /// Nested children of this node.
    #[must_use]
    pub const fn children(&self) -> &Children {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Children {
        &mut self.children
    }

    /// This node's id followed by every nested id, in document order.
    #[must_use]
    pub fn subtree_ids(&self) -> Vec<ChildId> {
        let mut ids = vec![self.child_id];
        ids.extend(self.children.child_ids());
        ids
    }
}

/// One entry of a children list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ChildNode {
    /// Structural marker preceding each content node; the drop target for
    /// "insert before the content that follows".
    Separator,
    /// A content node.
    Element(ChildElement),
}

impl ChildNode {
    /// Name reported by separator nodes.
    pub const SEPARATOR_NAME: &'static str = "separator";

    /// `"separator"` for separators, the type label for content nodes.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Separator => Self::SEPARATOR_NAME,
            Self::Element(element) => element.element_type().label(),
        }
    }

    #[must_use]
    pub const fn is_separator(&self) -> bool {
        matches!(self, Self::Separator)
    }

    #[must_use]
    pub const fn as_element(&self) -> Option<&ChildElement> {
        match self {
            Self::Element(element) => Some(element),
            Self::Separator => None,
        }
    }

    #[must_use]
    pub fn child_id(&self) -> Option<ChildId> {
        self.as_element().map(ChildElement::child_id)
    }

    #[must_use]
    pub fn element_type(&self) -> Option<ElementType> {
        self.as_element().map(ChildElement::element_type)
    }
}

impl From<ChildElement> for ChildNode {
    fn from(element: ChildElement) -> Self {
        Self::Element(element)
    }
}
