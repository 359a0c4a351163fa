#![forbid(unsafe_code)]

//! The pure reducer.
//!
//! [`Reducer::reduce`] maps `(&State, Action)` to a new [`State`] or a
//! [`ReduceError`]. The input state is never modified: the reducer edits a
//! clone (cheap, since every collection in [`State`] is persistent) and
//! returns it only when the whole transition succeeded. A rejected action
//! therefore leaves the caller with exactly the state it passed in.
//!
//! Some actions are benign identity transitions rather than errors:
//! `UNDO`/`REDO` with an empty stack, `DELETE CHILD` with no focused child,
//! and a move onto the node itself. These return `Ok` with an unchanged
//! state and are logged at `debug`.

use crate::action::Action;
use crate::config::ReducerConfig;
use crate::error::ReduceError;
use crate::state::State;
use crate::telemetry::{self, TARGET};

/// Applies [`Action`]s to [`State`]s under a fixed configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reducer {
    config: ReducerConfig,
}

impl Reducer {
    #[must_use]
    pub fn new(config: ReducerConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ReducerConfig {
        &self.config
    }

    /// A fresh document built from this reducer's defaults.
    #[must_use]
    pub fn initial_state(&self) -> State {
        State::initial(&self.config)
    }

    /// Apply `action` to `state`.
    ///
    /// # Errors
    ///
    /// Returns a [`ReduceError`] when the action references something that
    /// does not exist or would break a document invariant. `state` is
    /// untouched in every case.
    pub fn reduce(&self, state: &State, action: Action) -> Result<State, ReduceError> {
        let kind = action.kind();
        telemetry::trace_dispatch(kind, || {
            let mut next = state.clone();
            self.apply(&mut next, action, kind)?;
            Ok(next)
        })
    }

    fn apply(&self, state: &mut State, action: Action, kind: &'static str) -> Result<(), ReduceError> {
        match action {
            Action::AddComponent { name, root } => {
                let id = state.add_component(name, root, &self.config);
                tracing::debug!(target: TARGET, component_id = id.get(), root, "component added");
            }
            Action::AddChild {
                element_type,
                parent,
            } => {
                let child_id = state.add_child(element_type, parent)?;
                tracing::debug!(
                    target: TARGET,
                    child_id = child_id.get(),
                    element_type = element_type.label(),
                    type_id = element_type.type_id(),
                    "child added"
                );
                log_history(state);
            }
            Action::ChangePosition {
                current_child_id,
                new_parent_child_id,
            } => {
                if state.move_child(current_child_id, new_parent_child_id)? {
                    tracing::debug!(
                        target: TARGET,
                        child_id = current_child_id.get(),
                        before = ?new_parent_child_id.map(|id| id.get()),
                        "child moved"
                    );
                    log_history(state);
                } else {
                    telemetry::record_noop(kind, "moved onto itself");
                }
            }
            Action::DeleteChild => match state.delete_focused_child()? {
                Some(removed) => {
                    tracing::debug!(
                        target: TARGET,
                        child_id = removed.child_id().get(),
                        "child deleted"
                    );
                    log_history(state);
                }
                None => telemetry::record_noop(kind, "no focused child"),
            },
            Action::ChangeFocus(focus) => state.set_focus(focus)?,
            Action::UpdateCss { style } => {
                let focused = state.focus().component_id;
                state.component_mut(focused)?.merge_style(&style);
            }
            Action::UpdateProjectName(name) => state.set_name(name),
            Action::ChangeProjectType(project_type) => state.set_project_type(project_type),
            Action::Undo => {
                if state.undo_focused()? {
                    log_history(state);
                } else {
                    telemetry::record_noop(kind, "nothing to undo");
                }
            }
            Action::Redo => {
                if state.redo_focused()? {
                    log_history(state);
                } else {
                    telemetry::record_noop(kind, "nothing to redo");
                }
            }
            Action::ResetState => *state = state.reset(&self.config),
        }
        Ok(())
    }
}

fn log_history(state: &State) {
    if let Some(component) = state.focused_component() {
        tracing::debug!(
            target: TARGET,
            component_id = component.id().get(),
            past_len = component.history().past_len(),
            future_len = component.history().future_len(),
            "history updated"
        );
    }
}

/// Apply `action` with the default configuration.
///
/// # Errors
///
/// See [`Reducer::reduce`].
pub fn reduce(state: &State, action: Action) -> Result<State, ReduceError> {
    Reducer::default().reduce(state, action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectType;
    use blueprint_core::{ChildId, ComponentId, ElementType, Focus, HtmlElementId, Style};

    const DIV: ElementType = ElementType::Html(HtmlElementId::new(4));
    const SPAN: ElementType = ElementType::Html(HtmlElementId::new(9));

    fn root() -> ComponentId {
        ComponentId::new(1)
    }

    fn run(state: &State, actions: impl IntoIterator<Item = Action>) -> State {
        actions
            .into_iter()
            .fold(state.clone(), |s, a| reduce(&s, a).unwrap())
    }

    #[test]
    fn reduce_leaves_input_untouched() {
        let state = State::default();
        let next = reduce(&state, Action::add_child(DIV)).unwrap();
        assert_eq!(state, State::default());
        assert_eq!(next.focused_component().unwrap().children().len(), 2);
    }

    #[test]
    fn rejected_action_returns_error() {
        let state = State::default();
        let err = reduce(
            &state,
            Action::ChangePosition {
                current_child_id: ChildId::new(42),
                new_parent_child_id: None,
            },
        )
        .unwrap_err();
        assert_eq!(err, ReduceError::UnknownChildId(ChildId::new(42)));
    }

    #[test]
    fn unknown_html_kind_is_rejected() {
        let err = reduce(
            &State::default(),
            Action::add_child(ElementType::Html(HtmlElementId::new(99))),
        )
        .unwrap_err();
        assert_eq!(err, ReduceError::UnknownElementType(99));
    }

    #[test]
    fn empty_undo_is_identity() {
        let state = State::default();
        assert_eq!(reduce(&state, Action::Undo).unwrap(), state);
        assert_eq!(reduce(&state, Action::Redo).unwrap(), state);
    }

    #[test]
    fn delete_without_focused_child_is_identity() {
        let state = State::default();
        assert_eq!(reduce(&state, Action::DeleteChild).unwrap(), state);
    }

    #[test]
    fn undo_redo_round_trip() {
        let state = run(&State::default(), [Action::add_child(DIV)]);
        let undone = reduce(&state, Action::Undo).unwrap();
        assert!(undone.focused_component().unwrap().children().is_empty());

        let redone = reduce(&undone, Action::Redo).unwrap();
        assert_eq!(
            redone.focused_component().unwrap().children(),
            state.focused_component().unwrap().children()
        );
    }

    #[test]
    fn undo_clears_dangling_focus_child() {
        let state = run(&State::default(), [Action::add_child(DIV)]);
        assert!(state.focus().child_id.is_some());
        let undone = reduce(&state, Action::Undo).unwrap();
        assert_eq!(undone.focus().child_id, None);
    }

    #[test]
    fn update_css_merges_into_focused_component() {
        let state = run(
            &State::default(),
            [
                Action::UpdateCss {
                    style: Style::new().with("color", "red").with("margin", "0"),
                },
                Action::UpdateCss {
                    style: Style::new().with("color", "blue"),
                },
            ],
        );
        let style = state.focused_component().unwrap().style();
        assert_eq!(style.get("color"), Some("blue"));
        assert_eq!(style.get("margin"), Some("0"));
    }

    #[test]
    fn change_focus_rejects_unknown_component() {
        let err = reduce(
            &State::default(),
            Action::ChangeFocus(Focus::component(ComponentId::new(7))),
        )
        .unwrap_err();
        assert_eq!(err, ReduceError::UnknownComponentId(ComponentId::new(7)));
    }

    #[test]
    fn nesting_into_non_container_is_rejected() {
        let img = ElementType::Html(HtmlElementId::new(1));
        let state = run(&State::default(), [Action::add_child(img)]);
        let img_id = state.focus().child_id.unwrap();
        let err = reduce(
            &state,
            Action::AddChild {
                element_type: SPAN,
                parent: Some(img_id),
            },
        )
        .unwrap_err();
        assert_eq!(err, ReduceError::NotAContainer(img_id));
    }

    #[test]
    fn reset_keeps_name_only() {
        let state = run(
            &State::default(),
            [
                Action::UpdateProjectName("Shop".into()),
                Action::ChangeProjectType(ProjectType::Gatsby),
                Action::AddComponent {
                    name: "Card".into(),
                    root: true,
                },
                Action::add_child(DIV),
                Action::ResetState,
            ],
        );
        assert_eq!(state.name(), "Shop");
        assert_eq!(state.project_type(), ProjectType::ClassicReact);
        assert_eq!(state.component_count(), 1);
        assert_eq!(state.focus(), Focus::component(root()));
    }

    #[test]
    fn reducer_uses_configured_history_depth() {
        let mut config = ReducerConfig::default();
        config.history.max_depth = 2;
        let reducer = Reducer::new(config);

        let mut state = reducer.initial_state();
        for _ in 0..5 {
            state = reducer.reduce(&state, Action::add_child(DIV)).unwrap();
        }
        assert_eq!(state.focused_component().unwrap().history().past_len(), 2);
    }
}
