#![forbid(unsafe_code)]

//! A single-threaded store holding the current document.
//!
//! [`Store`] owns the latest [`State`] behind an `Arc`, runs actions
//! through a [`Reducer`], and notifies subscribers after every dispatch that
//! changed the document. Rejected actions and identity transitions do not
//! notify and do not bump the version.
//!
//! # Subscriptions
//!
//! [`Store::subscribe`] returns a [`StoreSubscription`] guard. The store only
//! keeps a `Weak` to each callback, so dropping the guard unsubscribes;
//! dead entries are pruned on the next notification.
//!
//! Callbacks run after the internal borrow is released, so a callback may
//! read the store or dispatch again.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use tracing::info_span;
use web_time::Instant;

use crate::action::Action;
use crate::config::ReducerConfig;
use crate::error::ReduceError;
use crate::reducer::Reducer;
use crate::state::State;
use crate::telemetry::TARGET;

type CallbackRc = Rc<dyn Fn(&Arc<State>)>;
type CallbackWeak = Weak<dyn Fn(&Arc<State>)>;

struct StoreInner {
    state: Arc<State>,
    version: u64,
    subscribers: Vec<CallbackWeak>,
}

/// Shared handle to the current document. Clones share the same state.
#[derive(Clone)]
pub struct Store {
    inner: Rc<RefCell<StoreInner>>,
    reducer: Reducer,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Store")
            .field("version", &inner.version)
            .field("subscribers", &inner.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::with_reducer(Reducer::default())
    }
}

impl Store {
    /// Wrap an existing document, reducing with the default configuration.
    #[must_use]
    pub fn new(state: State) -> Self {
        Self::from_parts(state, Reducer::default())
    }

    /// Wrap an existing document, reducing under `config`.
    #[must_use]
    pub fn with_config(state: State, config: ReducerConfig) -> Self {
        Self::from_parts(state, Reducer::new(config))
    }

    /// Start from the reducer's initial document.
    #[must_use]
    pub fn with_reducer(reducer: Reducer) -> Self {
        let state = reducer.initial_state();
        Self::from_parts(state, reducer)
    }

    #[must_use]
    pub fn from_parts(state: State, reducer: Reducer) -> Self {
        Self {
            inner: Rc::new(RefCell::new(StoreInner {
                state: Arc::new(state),
                version: 0,
                subscribers: Vec::new(),
            })),
            reducer,
        }
    }

    /// The current document.
    #[must_use]
    pub fn state(&self) -> Arc<State> {
        Arc::clone(&self.inner.borrow().state)
    }

    /// Increments once per dispatch that changed the document.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    #[must_use]
    pub const fn reducer(&self) -> &Reducer {
        &self.reducer
    }

    /// Reduce `action` against the current document and publish the result.
    ///
    /// Returns the state now held by the store.
    ///
    /// # Errors
    ///
    /// Propagates the reducer's [`ReduceError`]; the stored state is
    /// unchanged and no subscriber runs.
    pub fn dispatch(&self, action: Action) -> Result<Arc<State>, ReduceError> {
        let current = self.state();
        let next = self.reducer.reduce(&current, action)?;
        if next == *current {
            return Ok(current);
        }

        let next = Arc::new(next);
        {
            let mut inner = self.inner.borrow_mut();
            inner.state = Arc::clone(&next);
            inner.version += 1;
        }
        self.notify(&next);
        Ok(next)
    }

    /// Replace the document wholesale (e.g. after loading a saved project).
    /// Always notifies.
    pub fn replace(&self, state: State) {
        let state = Arc::new(state);
        {
            let mut inner = self.inner.borrow_mut();
            inner.state = Arc::clone(&state);
            inner.version += 1;
        }
        self.notify(&state);
    }

    /// Register `callback` to run with each new document. Callbacks run in
    /// registration order.
    ///
    /// Dropping the returned guard unsubscribes.
    pub fn subscribe(&self, callback: impl Fn(&Arc<State>) + 'static) -> StoreSubscription {
        let strong: CallbackRc = Rc::new(callback);
        self.inner
            .borrow_mut()
            .subscribers
            .push(Rc::downgrade(&strong));
        StoreSubscription {
            _guard: Box::new(strong),
        }
    }

    /// Registered subscribers, including dropped ones not yet pruned.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn notify(&self, state: &Arc<State>) {
        let callbacks: Vec<CallbackRc> = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|w| w.strong_count() > 0);
            inner.subscribers.iter().filter_map(Weak::upgrade).collect()
        };
        if callbacks.is_empty() {
            return;
        }

        let subscribers = callbacks.len() as u64;
        let start = Instant::now();
        let _span = info_span!(
            "store.notify",
            subscribers,
            duration_us = tracing::field::Empty
        )
        .entered();

        for callback in &callbacks {
            callback(state);
        }

        let duration_us = start.elapsed().as_micros() as u64;
        tracing::Span::current().record("duration_us", duration_us);
        tracing::trace!(target: TARGET, subscribers, duration_us, "subscribers notified");
    }
}

/// RAII guard for a store subscriber.
pub struct StoreSubscription {
    _guard: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for StoreSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreSubscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::{ElementType, HtmlElementId};
    use std::cell::Cell;

    const DIV: ElementType = ElementType::Html(HtmlElementId::new(4));

    #[test]
    fn dispatch_updates_state_and_version() {
        let store = Store::default();
        let state = store.dispatch(Action::add_child(DIV)).unwrap();
        assert_eq!(store.version(), 1);
        assert!(Arc::ptr_eq(&state, &store.state()));
        assert_eq!(state.content_count(), 1);
    }

    #[test]
    fn subscriber_sees_new_state() {
        let store = Store::default();
        let seen = Rc::new(Cell::new(0usize));
        let seen_clone = Rc::clone(&seen);
        let _sub = store.subscribe(move |state| seen_clone.set(state.content_count()));

        store.dispatch(Action::add_child(DIV)).unwrap();
        store.dispatch(Action::add_child(DIV)).unwrap();
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn rejected_dispatch_does_not_notify() {
        let store = Store::default();
        let calls = Rc::new(Cell::new(0u32));
        let calls_clone = Rc::clone(&calls);
        let _sub = store.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));

        let before = store.state();
        assert!(
            store
                .dispatch(Action::add_child(ElementType::Html(HtmlElementId::new(50))))
                .is_err()
        );
        assert_eq!(calls.get(), 0);
        assert_eq!(store.version(), 0);
        assert!(Arc::ptr_eq(&before, &store.state()));
    }

    #[test]
    fn identity_dispatch_does_not_notify() {
        let store = Store::default();
        let calls = Rc::new(Cell::new(0u32));
        let calls_clone = Rc::clone(&calls);
        let _sub = store.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));

        store.dispatch(Action::Undo).unwrap();
        assert_eq!(calls.get(), 0);
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn dropped_subscription_is_pruned() {
        let store = Store::default();
        let calls = Rc::new(Cell::new(0u32));
        let calls_clone = Rc::clone(&calls);
        let sub = store.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));
        assert_eq!(store.subscriber_count(), 1);

        drop(sub);
        store.dispatch(Action::add_child(DIV)).unwrap();
        assert_eq!(calls.get(), 0);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn clones_share_state() {
        let store = Store::default();
        let other = store.clone();
        store.dispatch(Action::add_child(DIV)).unwrap();
        assert_eq!(other.version(), 1);
        assert_eq!(other.state().content_count(), 1);
    }

    #[test]
    fn replace_always_notifies() {
        let store = Store::default();
        let calls = Rc::new(Cell::new(0u32));
        let calls_clone = Rc::clone(&calls);
        let _sub = store.subscribe(move |_| calls_clone.set(calls_clone.get() + 1));

        store.replace(State::default());
        assert_eq!(calls.get(), 1);
        assert_eq!(store.version(), 1);
    }
}
