//! Store dispatch and subscriber behavior.

use std::cell::RefCell;
use std::rc::Rc;

use blueprint_core::{ElementType, HtmlElementId};
use blueprint_runtime::{Action, HistoryConfig, ReducerConfig, State, Store};

const DIV: ElementType = ElementType::Html(HtmlElementId::new(4));

#[test]
fn subscribers_run_in_registration_order() {
    let store = Store::default();
    let log = Rc::new(RefCell::new(Vec::new()));

    let first_log = Rc::clone(&log);
    let _first = store.subscribe(move |_| first_log.borrow_mut().push("first"));
    let second_log = Rc::clone(&log);
    let _second = store.subscribe(move |_| second_log.borrow_mut().push("second"));

    store.dispatch(Action::add_child(DIV)).unwrap();
    assert_eq!(*log.borrow(), ["first", "second"]);
}

#[test]
fn one_notification_per_changing_dispatch() {
    let store = Store::default();
    let versions = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&versions);
    let reader = store.clone();
    let _sub = store.subscribe(move |_| seen.borrow_mut().push(reader.version()));

    store.dispatch(Action::add_child(DIV)).unwrap();
    store.dispatch(Action::Redo).unwrap(); // nothing to redo
    store
        .dispatch(Action::add_child(ElementType::Html(HtmlElementId::new(0))))
        .unwrap_err();
    store.dispatch(Action::Undo).unwrap();

    assert_eq!(*versions.borrow(), [1, 2]);
    assert_eq!(store.version(), 2);
}

#[test]
fn subscriber_may_dispatch_again() {
    let store = Store::default();
    let inner = store.clone();
    let fired = Rc::new(RefCell::new(false));
    let fired_flag = Rc::clone(&fired);
    let _sub = store.subscribe(move |state| {
        // Rename once, after the first structural edit.
        if !*fired_flag.borrow() && state.content_count() == 1 {
            *fired_flag.borrow_mut() = true;
            inner
                .dispatch(Action::UpdateProjectName("Nested".into()))
                .unwrap();
        }
    });

    store.dispatch(Action::add_child(DIV)).unwrap();
    assert_eq!(store.state().name(), "Nested");
    assert_eq!(store.version(), 2);
}

#[test]
fn with_config_applies_history_bound() {
    let config = ReducerConfig {
        history: HistoryConfig::new(1),
        ..ReducerConfig::default()
    };
    let store = Store::with_config(State::initial(&config), config);
    for _ in 0..4 {
        store.dispatch(Action::add_child(DIV)).unwrap();
    }
    let state = store.state();
    assert_eq!(state.focused_component().unwrap().history().past_len(), 1);
    assert_eq!(state.content_count(), 4);
}

#[test]
fn earlier_snapshots_stay_valid() {
    let store = Store::default();
    let before = store.state();
    store.dispatch(Action::add_child(DIV)).unwrap();

    assert_eq!(before.content_count(), 0);
    assert_eq!(store.state().content_count(), 1);
}
