#![forbid(unsafe_code)]

//! The design document.
//!
//! [`State`] owns every component (an arena keyed by [`ComponentId`]), the
//! list of root components, the focus cursor, project metadata, and the id
//! allocator. All collections are `im` persistent structures: cloning a
//! `State` is cheap and leaves the original untouched, which is what lets the
//! reducer return a new state while callers keep the old one.
//!
//! # Invariants
//!
//! 1. Component keys match `Component::id`; iteration order is creation order.
//! 2. `root_components` has no duplicates and only names existing components.
//! 3. `focus.component_id` names an existing component.
//! 4. Every child id is unique across the whole document.
//! 5. Every `Component` element references an existing component.
//! 6. The allocator is ahead of every id in use.
//!
//! [`validate`](State::validate) reports any violation.

use std::collections::HashSet;

use blueprint_core::{
    ChildElement, ChildId, Children, ComponentId, ElementType, Focus, HtmlElementKind,
    IdAllocator, TreeError,
};
use im::{OrdMap, Vector};

use crate::component::Component;
use crate::config::ReducerConfig;
use crate::error::ReduceError;
use crate::project::ProjectType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The whole design document. See the [module docs](self).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State {
    components: OrdMap<ComponentId, Component>,
    root_components: Vector<ComponentId>,
    focus: Focus,
    name: String,
    project_type: ProjectType,
    ids: IdAllocator,
}

impl Default for State {
    fn default() -> Self {
        Self::initial(&ReducerConfig::default())
    }
}

impl State {
    /// The initial document: one empty root component, focused, with the
    /// configured defaults.
    #[must_use]
    pub fn initial(config: &ReducerConfig) -> Self {
        let mut ids = IdAllocator::new();
        let root = ids.next_component_id();
        let component = Component::new(root, &config.defaults.root_component_name, config.history);

        Self {
            components: OrdMap::unit(root, component),
            root_components: Vector::unit(root),
            focus: Focus::component(root),
            name: config.defaults.project_name.clone(),
            project_type: config.defaults.project_type,
            ids,
        }
    }

    // ====================================================================
    // Query
    // ====================================================================

    /// Components in creation order.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    #[must_use]
    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(&id)
    }

    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Root components in designation order.
    #[must_use]
    pub fn root_components(&self) -> &Vector<ComponentId> {
        &self.root_components
    }

    #[must_use]
    pub fn is_root(&self, id: ComponentId) -> bool {
        self.root_components.contains(&id)
    }

    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    /// The component the focus points at.
    #[must_use]
    pub fn focused_component(&self) -> Option<&Component> {
        self.component(self.focus.component_id)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn project_type(&self) -> ProjectType {
        self.project_type
    }

    #[must_use]
    pub const fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    /// Find a content node anywhere in the document, with its owning
    /// component.
    #[must_use]
    pub fn find_child(&self, child_id: ChildId) -> Option<(ComponentId, &ChildElement)> {
        self.components.values().find_map(|component| {
            component
                .children()
                .find(child_id)
                .map(|element| (component.id(), element))
        })
    }

    /// Total content nodes across every component.
    #[must_use]
    pub fn content_count(&self) -> usize {
        self.components
            .values()
            .map(|component| component.children().content_count())
            .sum()
    }

    /// Whether `outer` is `inner` or (transitively) places an instance of it.
    #[must_use]
    pub fn contains_component(&self, outer: ComponentId, inner: ComponentId) -> bool {
        let mut pending = vec![outer];
        let mut visited = HashSet::new();
        while let Some(current) = pending.pop() {
            if current == inner {
                return true;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(component) = self.component(current) {
                collect_component_refs(component.children(), &mut pending);
            }
        }
        false
    }

    /// Check every document invariant, returning one message per violation.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.components.contains_key(&self.focus.component_id) {
            errors.push(format!(
                "focus names unknown component {}",
                self.focus.component_id
            ));
        } else if let Some(child_id) = self.focus.child_id
            && self
                .focused_component()
                .is_some_and(|component| !component.children().contains(child_id))
        {
            errors.push(format!(
                "focus child {child_id} is not under component {}",
                self.focus.component_id
            ));
        }

        let mut roots = HashSet::new();
        for root in &self.root_components {
            if !roots.insert(*root) {
                errors.push(format!("root component {root} listed twice"));
            }
            if !self.components.contains_key(root) {
                errors.push(format!("root component {root} does not exist"));
            }
        }

        let mut seen = HashSet::new();
        for (key, component) in &self.components {
            if *key != component.id() {
                errors.push(format!("component stored under {key} has id {}", component.id()));
            }
            if *key >= self.ids.peek_component_id() {
                errors.push(format!("component id {key} is ahead of the allocator"));
            }
            for message in component.children().validate() {
                errors.push(format!("component {key}: {message}"));
            }
            let mut refs = Vec::new();
            collect_component_refs(component.children(), &mut refs);
            for referenced in refs {
                if !self.components.contains_key(&referenced) {
                    errors.push(format!(
                        "component {key} places unknown component {referenced}"
                    ));
                } else if self.contains_component(referenced, *key) {
                    errors.push(format!(
                        "component {key} places {referenced}, which contains it"
                    ));
                }
            }
            for child_id in component.children().child_ids() {
                if !seen.insert(child_id) {
                    errors.push(format!("child id {child_id} used more than once"));
                }
                if child_id >= self.ids.peek_child_id() {
                    errors.push(format!("child id {child_id} is ahead of the allocator"));
                }
            }
        }

        errors
    }

    // ====================================================================
    // Transitions (used by the reducer; each is atomic)
    // ====================================================================

    /// Point the focus at `focus`.
    ///
    /// Only the component is validated; the child id is taken as given.
    ///
    /// # Errors
    ///
    /// [`ReduceError::UnknownComponentId`] if the component does not exist.
    pub fn set_focus(&mut self, focus: Focus) -> Result<(), ReduceError> {
        if !self.components.contains_key(&focus.component_id) {
            return Err(ReduceError::UnknownComponentId(focus.component_id));
        }
        self.focus = focus;
        Ok(())
    }

    /// Clear a focus child that no longer resolves under the focused
    /// component. Returns whether the focus changed.
    pub fn reconcile_focus(&mut self) -> bool {
        let Some(child_id) = self.focus.child_id else {
            return false;
        };
        let resolves = self
            .focused_component()
            .is_some_and(|component| component.children().contains(child_id));
        if !resolves {
            self.focus = self.focus.without_child();
        }
        !resolves
    }

    /// Record `snapshot` as the most recent undo entry of component `id`
    /// without editing its children. Clears that component's redo stack.
    ///
    /// For collaborators that capture history themselves. Child ids in the
    /// snapshot are reserved with the allocator so later edits never reissue
    /// them.
    ///
    /// # Errors
    ///
    /// - [`ReduceError::UnknownComponentId`] if `id` or a component the
    ///   snapshot places does not exist.
    /// - [`ReduceError::DuplicateChildId`] if the snapshot holds a child id
    ///   owned by another component.
    /// - [`ReduceError::CircularReference`] if the snapshot places a
    ///   component that contains `id`.
    pub fn push_snapshot(&mut self, id: ComponentId, snapshot: Children) -> Result<(), ReduceError> {
        if !self.components.contains_key(&id) {
            return Err(ReduceError::UnknownComponentId(id));
        }
        let child_ids = snapshot.child_ids();
        for &child_id in &child_ids {
            if let Some((owner, _)) = self.find_child(child_id)
                && owner != id
            {
                return Err(ReduceError::DuplicateChildId(child_id));
            }
        }
        let mut refs = Vec::new();
        collect_component_refs(&snapshot, &mut refs);
        for child in refs {
            if !self.components.contains_key(&child) {
                return Err(ReduceError::UnknownComponentId(child));
            }
            if self.contains_component(child, id) {
                return Err(ReduceError::CircularReference { parent: id, child });
            }
        }

        self.component_mut(id)?.push_snapshot(snapshot);
        for child_id in child_ids {
            self.ids.observe_child_id(child_id);
        }
        Ok(())
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_project_type(&mut self, project_type: ProjectType) {
        self.project_type = project_type;
    }

    pub(crate) fn component_mut(&mut self, id: ComponentId) -> Result<&mut Component, ReduceError> {
        self.components
            .get_mut(&id)
            .ok_or(ReduceError::UnknownComponentId(id))
    }

    /// Create a component, designating it as root if asked.
    pub(crate) fn add_component(&mut self, name: String, root: bool, config: &ReducerConfig) -> ComponentId {
        let id = self.ids.next_component_id();
        self.components
            .insert(id, Component::new(id, name, config.history));
        if root && !self.root_components.contains(&id) {
            self.root_components.push_back(id);
        }
        id
    }

    /// Place a new instance of `element_type` in the focused component.
    ///
    /// Without `parent` the instance lands before the focused child (or at
    /// the end when no child is focused); with `parent` it is appended inside
    /// that container. The focus moves to the new instance.
    pub(crate) fn add_child(
        &mut self,
        element_type: ElementType,
        parent: Option<ChildId>,
    ) -> Result<ChildId, ReduceError> {
        let target = self.focus.component_id;
        if !self.components.contains_key(&target) {
            return Err(ReduceError::UnknownComponentId(target));
        }
        self.check_element_type(element_type, target)?;

        let child_id = self.ids.next_child_id();
        if self.find_child(child_id).is_some() {
            return Err(ReduceError::DuplicateChildId(child_id));
        }

        let before = self.focus.child_id;
        let element = ChildElement::new(child_id, element_type);
        self.component_mut(target)?
            .edit_children(|children| match parent {
                Some(parent) => children.insert_into(parent, element),
                None => children.insert(element, before),
            })?;
        self.focus = self.focus.with_child(child_id);
        Ok(child_id)
    }

    /// Remove the focused child from the focused component and clear the
    /// focus child. Returns `None` when no child is focused.
    pub(crate) fn delete_focused_child(&mut self) -> Result<Option<ChildElement>, ReduceError> {
        let Some(child_id) = self.focus.child_id else {
            return Ok(None);
        };
        let removed = self
            .component_mut(self.focus.component_id)?
            .edit_children(|children| children.remove(child_id))?;
        self.focus = self.focus.without_child();
        Ok(Some(removed))
    }

    /// Move content node `current` (found anywhere in the document) into the
    /// focused component, before `before` or at the end.
    ///
    /// The node keeps its type and nested children. Returns `false` when the
    /// move is a no-op (`before == Some(current)` within the focused
    /// component). From another component `current` is not a valid drop
    /// target and the move fails with `UnknownChildId`.
    pub(crate) fn move_child(
        &mut self,
        current: ChildId,
        before: Option<ChildId>,
    ) -> Result<bool, ReduceError> {
        let (source, element, mut nested) = self
            .find_child(current)
            .map(|(owner, element)| {
                let mut refs = Vec::new();
                collect_component_refs(element.children(), &mut refs);
                (owner, element.element_type(), refs)
            })
            .ok_or(ReduceError::UnknownChildId(current))?;
        let destination = self.focus.component_id;
        if !self.components.contains_key(&destination) {
            return Err(ReduceError::UnknownComponentId(destination));
        }
        if source == destination && before == Some(current) {
            return Ok(false);
        }
        if source != destination {
            self.check_element_type(element, destination)?;
            nested.dedup();
            for child in nested {
                if self.contains_component(child, destination) {
                    return Err(ReduceError::CircularReference {
                        parent: destination,
                        child,
                    });
                }
            }
        }

        let mut from = self.component_mut(source)?.clone();
        if source == destination {
            from.edit_children(|children| -> Result<(), TreeError> {
                let moved = children.remove(current)?;
                children.insert(moved, before)
            })?;
            self.components.insert(source, from);
        } else {
            let mut to = self.component_mut(destination)?.clone();
            let moved = from.edit_children(|children| children.remove(current))?;
            to.edit_children(|children| children.insert(moved, before))?;
            self.components.insert(source, from);
            self.components.insert(destination, to);
        }
        self.reconcile_focus();
        Ok(true)
    }

    /// Step the focused component's history back. `Ok(false)` when there is
    /// nothing to undo.
    pub(crate) fn undo_focused(&mut self) -> Result<bool, ReduceError> {
        self.step_focused(Component::undo)
    }

    /// Step the focused component's history forward. `Ok(false)` when there
    /// is nothing to redo.
    pub(crate) fn redo_focused(&mut self) -> Result<bool, ReduceError> {
        self.step_focused(Component::redo)
    }

    fn step_focused(&mut self, step: fn(&mut Component) -> bool) -> Result<bool, ReduceError> {
        let id = self.focus.component_id;
        let mut component = self.component_mut(id)?.clone();
        if !step(&mut component) {
            return Ok(false);
        }
        // A restored snapshot may still hold a node that has since moved to
        // another component.
        for child_id in component.children().child_ids() {
            if let Some((owner, _)) = self.find_child(child_id)
                && owner != id
            {
                return Err(ReduceError::DuplicateChildId(child_id));
            }
        }
        // Or place a component that has since come to contain this one.
        let mut refs = Vec::new();
        collect_component_refs(component.children(), &mut refs);
        for child in refs {
            if self.contains_component(child, id) {
                return Err(ReduceError::CircularReference { parent: id, child });
            }
        }
        self.components.insert(id, component);
        self.reconcile_focus();
        Ok(true)
    }

    fn check_element_type(
        &self,
        element_type: ElementType,
        parent: ComponentId,
    ) -> Result<(), ReduceError> {
        match element_type {
            ElementType::Component(child) => {
                if !self.components.contains_key(&child) {
                    return Err(ReduceError::UnknownComponentId(child));
                }
                if self.contains_component(child, parent) {
                    return Err(ReduceError::CircularReference { parent, child });
                }
                Ok(())
            }
            ElementType::Html(kind) => match HtmlElementKind::lookup(kind) {
                Some(_) => Ok(()),
                None => Err(ReduceError::UnknownElementType(kind.get())),
            },
        }
    }

    /// The initial document, keeping the project name.
    pub(crate) fn reset(&self, config: &ReducerConfig) -> Self {
        let mut fresh = Self::initial(config);
        fresh.name = self.name.clone();
        fresh
    }
}

fn collect_component_refs(children: &Children, out: &mut Vec<ComponentId>) {
    for element in children.elements() {
        if let ElementType::Component(id) = element.element_type() {
            out.push(id);
        }
        collect_component_refs(element.children(), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::HtmlElementId;

    const DIV: ElementType = ElementType::Html(HtmlElementId::new(4));
    const IMG: ElementType = ElementType::Html(HtmlElementId::new(1));

    fn root() -> ComponentId {
        ComponentId::new(1)
    }

    #[test]
    fn initial_state_has_one_focused_root() {
        let state = State::default();
        assert_eq!(state.component_count(), 1);
        assert_eq!(state.root_components().len(), 1);
        assert_eq!(state.focus(), Focus::component(root()));
        assert_eq!(state.focused_component().unwrap().name(), "index");
        assert!(state.validate().is_empty());
    }

    #[test]
    fn add_child_moves_focus_to_new_child() {
        let mut state = State::default();
        let id = state.add_child(DIV, None).unwrap();
        assert_eq!(state.focus().child_id, Some(id));
        assert_eq!(state.find_child(id).unwrap().0, root());
    }

    #[test]
    fn add_child_before_focused_child() {
        let mut state = State::default();
        let first = state.add_child(DIV, None).unwrap();
        let second = state.add_child(IMG, None).unwrap();

        let order = state.component(root()).unwrap().children().child_ids();
        assert_eq!(order, [second, first]);
    }

    #[test]
    fn circular_placement_is_rejected() {
        let config = ReducerConfig::default();
        let mut state = State::default();
        let card = state.add_component("Card".into(), false, &config);

        state.set_focus(Focus::component(card)).unwrap();
        assert_eq!(
            state.add_child(ElementType::Component(card), None),
            Err(ReduceError::CircularReference {
                parent: card,
                child: card
            })
        );

        // root places Card; Card may not then place root.
        state.set_focus(Focus::component(root())).unwrap();
        state.add_child(ElementType::Component(card), None).unwrap();
        state.set_focus(Focus::component(card)).unwrap();
        assert!(matches!(
            state.add_child(ElementType::Component(root()), None),
            Err(ReduceError::CircularReference { .. })
        ));
    }

    #[test]
    fn unknown_html_kind_is_rejected() {
        let mut state = State::default();
        assert_eq!(
            state.add_child(ElementType::Html(HtmlElementId::new(77)), None),
            Err(ReduceError::UnknownElementType(77))
        );
    }

    #[test]
    fn reconcile_clears_dangling_child() {
        let mut state = State::default();
        state
            .set_focus(Focus::new(root(), Some(ChildId::new(99))))
            .unwrap();
        assert!(state.reconcile_focus());
        assert_eq!(state.focus().child_id, None);
        assert!(!state.reconcile_focus());
    }

    #[test]
    fn set_focus_rejects_unknown_component() {
        let mut state = State::default();
        assert_eq!(
            state.set_focus(Focus::component(ComponentId::new(5))),
            Err(ReduceError::UnknownComponentId(ComponentId::new(5)))
        );
    }

    #[test]
    fn move_across_components_keeps_subtree() {
        let config = ReducerConfig::default();
        let mut state = State::default();
        let other = state.add_component("Other".into(), false, &config);
        let div = state.add_child(DIV, None).unwrap();
        let img = state.add_child(IMG, Some(div)).unwrap();

        state.set_focus(Focus::component(other)).unwrap();
        assert!(state.move_child(div, None).unwrap());

        let (owner, moved) = state.find_child(div).unwrap();
        assert_eq!(owner, other);
        assert_eq!(moved.children().child_ids(), [img]);
        assert!(state.component(root()).unwrap().children().is_empty());
        assert!(state.validate().is_empty());
    }

    #[test]
    fn validate_reports_dangling_focus_child() {
        let mut state = State::default();
        state
            .set_focus(Focus::new(root(), Some(ChildId::new(3))))
            .unwrap();
        let errors = state.validate();
        assert!(errors.iter().any(|e| e.contains("focus child 3")));
    }

    #[test]
    fn reset_keeps_name_only() {
        let config = ReducerConfig::default();
        let mut state = State::default();
        state.set_name("Shop".into());
        state.set_project_type(ProjectType::NextJs);
        state.add_component("Card".into(), true, &config);

        let fresh = state.reset(&config);
        assert_eq!(fresh.name(), "Shop");
        assert_eq!(fresh.project_type(), ProjectType::ClassicReact);
        assert_eq!(fresh.component_count(), 1);
    }
}
