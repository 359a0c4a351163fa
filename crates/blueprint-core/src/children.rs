#![forbid(unsafe_code)]

//! Ordered children list with the separator invariant.
//!
//! A [`Children`] list alternates separator and content nodes so that every
//! content node is immediately preceded by exactly one separator:
//!
//! ```text
//! index:   0          1            2          3
//!        [separator, Element(#1), separator, Element(#2)]
//! ```
//!
//! The separator before a content node is the drop target "before that
//! node"; appending needs no target. Content nodes of container kinds carry
//! their own nested [`Children`] obeying the same invariant.
//!
//! # Invariants
//!
//! 1. `len()` is even.
//! 2. Even indices hold separators, odd indices hold content nodes.
//! 3. Child ids are unique across the list and all nested lists.
//! 4. Only container element kinds hold nested children.
//!
//! Every mutating primitive either preserves all four or returns a
//! [`TreeError`] and leaves the list untouched.
//!
//! # Memory Model
//!
//! Nodes live in an [`im::Vector`], so cloning a list (for example to keep a
//! history snapshot) shares structure with the original and costs O(1).

use std::collections::HashSet;

use im::Vector;

use crate::error::TreeError;
use crate::id::ChildId;
use crate::node::{ChildElement, ChildNode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Ordered `[separator, content]` pairs. See the [module docs](self).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Children {
    nodes: Vector<ChildNode>,
}

/// Where a content node lives: indices of the enclosing elements from the
/// root list downwards, plus the node's index in its own list.
struct Location {
    path: Vec<usize>,
    index: usize,
}

impl Children {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes in this list, separators included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ChildNode> {
        self.nodes.get(index)
    }

    #[must_use]
    pub fn last(&self) -> Option<&ChildNode> {
        self.nodes.last()
    }

    /// Iterate this list's nodes, separators included.
    pub fn iter(&self) -> impl Iterator<Item = &ChildNode> {
        self.nodes.iter()
    }

    /// Iterate this list's content nodes (not nested ones).
    pub fn elements(&self) -> impl Iterator<Item = &ChildElement> {
        self.nodes.iter().filter_map(ChildNode::as_element)
    }

    /// Number of content nodes in this list and every nested list.
    #[must_use]
    pub fn content_count(&self) -> usize {
        self.elements()
            .map(|element| 1 + element.children().content_count())
            .sum()
    }

    /// Every child id in the tree, in document order.
    #[must_use]
    pub fn child_ids(&self) -> Vec<ChildId> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, out: &mut Vec<ChildId>) {
        for element in self.elements() {
            out.push(element.child_id());
            element.children().collect_ids(out);
        }
    }

    /// Whether a content node with `child_id` exists anywhere in the tree.
    #[must_use]
    pub fn contains(&self, child_id: ChildId) -> bool {
        self.find(child_id).is_some()
    }

    /// Find a content node anywhere in the tree.
    #[must_use]
    pub fn find(&self, child_id: ChildId) -> Option<&ChildElement> {
        for element in self.elements() {
            if element.child_id() == child_id {
                return Some(element);
            }
            if let Some(found) = element.children().find(child_id) {
                return Some(found);
            }
        }
        None
    }

    /// Insert `element` preceded by a fresh separator.
    ///
    /// With `before == None` the pair is appended to this list. Otherwise it
    /// is placed at the separator preceding content node `before`, in
    /// whichever nested list holds it, so `before` ends up right after the
    /// new pair.
    ///
    /// # Errors
    ///
    /// - [`TreeError::DuplicateChildId`] if any id in `element`'s subtree is
    ///   already used in this tree (or repeated within the subtree).
    /// - [`TreeError::UnknownChildId`] if `before` is not in this tree.
    pub fn insert(
        &mut self,
        element: ChildElement,
        before: Option<ChildId>,
    ) -> Result<(), TreeError> {
        self.ensure_fresh(&element)?;
        match before {
            None => {
                self.push_pair(element);
                Ok(())
            }
            Some(target) => {
                let location = self.locate(target).ok_or(TreeError::UnknownChildId(target))?;
                let list = self
                    .list_mut(&location.path)
                    .ok_or(TreeError::UnknownChildId(target))?;
                let separator = location.index.saturating_sub(1);
                list.nodes.insert(separator, ChildNode::Element(element));
                list.nodes.insert(separator, ChildNode::Separator);
                Ok(())
            }
        }
    }

    /// Append `element` (with a fresh separator) to the nested children of
    /// content node `parent`.
    ///
    /// # Errors
    ///
    /// - [`TreeError::DuplicateChildId`] as for [`insert`](Self::insert).
    /// - [`TreeError::UnknownChildId`] if `parent` is not in this tree.
    /// - [`TreeError::NotAContainer`] if `parent`'s kind cannot nest.
    pub fn insert_into(&mut self, parent: ChildId, element: ChildElement) -> Result<(), TreeError> {
        let target = self.find(parent).ok_or(TreeError::UnknownChildId(parent))?;
        if !target.element_type().is_container() {
            return Err(TreeError::NotAContainer(parent));
        }
        self.ensure_fresh(&element)?;

        let location = self.locate(parent).ok_or(TreeError::UnknownChildId(parent))?;
        let list = self
            .list_mut(&location.path)
            .ok_or(TreeError::UnknownChildId(parent))?;
        match list.nodes.get_mut(location.index) {
            Some(ChildNode::Element(host)) => {
                host.children_mut().push_pair(element);
                Ok(())
            }
            _ => Err(TreeError::UnknownChildId(parent)),
        }
    }

    /// Remove content node `child_id` and the separator preceding it,
    /// wherever it is nested. Returns the removed node with its subtree.
    ///
    /// # Errors
    ///
    /// [`TreeError::UnknownChildId`] if `child_id` is not in this tree.
    pub fn remove(&mut self, child_id: ChildId) -> Result<ChildElement, TreeError> {
        let location = self
            .locate(child_id)
            .ok_or(TreeError::UnknownChildId(child_id))?;
        let list = self
            .list_mut(&location.path)
            .ok_or(TreeError::UnknownChildId(child_id))?;
        match list.nodes.remove(location.index) {
            ChildNode::Element(element) => {
                if location.index > 0 {
                    list.nodes.remove(location.index - 1);
                }
                Ok(element)
            }
            separator => {
                // `locate` only reports content nodes.
                list.nodes.insert(location.index, separator);
                Err(TreeError::UnknownChildId(child_id))
            }
        }
    }

    /// Check every invariant, returning one message per violation.
    ///
    /// An empty result means the tree is well-formed.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut seen = HashSet::new();
        self.validate_into("children", &mut seen, &mut errors);
        errors
    }

    fn validate_into(&self, at: &str, seen: &mut HashSet<ChildId>, errors: &mut Vec<String>) {
        if self.nodes.len() % 2 != 0 {
            errors.push(format!("{at} has odd length {}", self.nodes.len()));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            match (index % 2 == 0, node) {
                (true, ChildNode::Separator) => {}
                (true, ChildNode::Element(element)) => errors.push(format!(
                    "{at}[{index}] is child {} where a separator is required",
                    element.child_id()
                )),
                (false, ChildNode::Separator) => {
                    errors.push(format!("{at}[{index}] is a separator without content"));
                }
                (false, ChildNode::Element(element)) => {
                    let id = element.child_id();
                    if !seen.insert(id) {
                        errors.push(format!("{at}[{index}] repeats child id {id}"));
                    }
                    if !element.children().is_empty() && !element.element_type().is_container() {
                        errors.push(format!("child {id} is not a container but has children"));
                    }
                    element
                        .children()
                        .validate_into(&format!("child {id}"), seen, errors);
                }
            }
        }
    }

    // ====================================================================
    // Internals
    // ====================================================================

    fn push_pair(&mut self, element: ChildElement) {
        self.nodes.push_back(ChildNode::Separator);
        self.nodes.push_back(ChildNode::Element(element));
    }

    fn ensure_fresh(&self, element: &ChildElement) -> Result<(), TreeError> {
        let mut incoming = HashSet::new();
        for id in element.subtree_ids() {
            if !incoming.insert(id) || self.contains(id) {
                return Err(TreeError::DuplicateChildId(id));
            }
        }
        Ok(())
    }

    fn locate(&self, child_id: ChildId) -> Option<Location> {
        for (index, node) in self.nodes.iter().enumerate() {
            let ChildNode::Element(element) = node else {
                continue;
            };
            if element.child_id() == child_id {
                return Some(Location {
                    path: Vec::new(),
                    index,
                });
            }
            if let Some(mut nested) = element.children().locate(child_id) {
                nested.path.insert(0, index);
                return Some(nested);
            }
        }
        None
    }

    fn list_mut(&mut self, path: &[usize]) -> Option<&mut Children> {
        match path.split_first() {
            None => Some(self),
            Some((&head, rest)) => match self.nodes.get_mut(head)? {
                ChildNode::Element(element) => element.children_mut().list_mut(rest),
                ChildNode::Separator => None,
            },
        }
    }
}

impl FromIterator<ChildElement> for Children {
    /// Build a well-formed list by pairing each element with a separator.
    fn from_iter<I: IntoIterator<Item = ChildElement>>(iter: I) -> Self {
        let mut children = Self::new();
        for element in iter {
            children.push_pair(element);
        }
        children
    }
}

impl<'a> IntoIterator for &'a Children {
    type Item = &'a ChildNode;
    type IntoIter = im::vector::Iter<'a, ChildNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
