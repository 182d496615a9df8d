//! Property-based tests for the list load controller.
//!
//! These tests use proptest to drive a controller through random event
//! sequences and check the load-state invariants after every step.

use listload::builder::ListLoadBuilder;
use listload::controller::{
    CancelHandle, ListLoadController, PendingOperation, RecordingView, StartDecision, ViewCall,
};
use listload::core::{DisplayState, ErrorClass, LoadState, State};
use proptest::prelude::*;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug)]
struct TestError(ErrorClass);

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} failure", self.0)
    }
}

#[derive(Clone, Debug)]
enum Event {
    Start { refresh: bool },
    Success { page: usize, refresh: bool },
    Failure { class: ErrorClass },
}

struct Flag(Arc<AtomicBool>);

impl CancelHandle for Flag {
    fn cancel(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

type Controller = ListLoadController<Vec<usize>, Vec<usize>, TestError, RecordingView>;

const PAGE_SIZE: usize = 3;

fn controller(initial: usize) -> Controller {
    ListLoadBuilder::new()
        .items((0..initial).collect())
        .view(RecordingView::new())
        .merge(|items: &mut Vec<usize>, page: Vec<usize>, _| items.extend(page))
        .has_more(|page: &Vec<usize>| page.len() == PAGE_SIZE)
        .classify(|e: &TestError| e.0)
        .report(|_: &TestError| {})
        .build()
        .unwrap()
}

prop_compose! {
    fn arbitrary_class()(network in any::<bool>()) -> ErrorClass {
        if network { ErrorClass::Network } else { ErrorClass::Other }
    }
}

fn arbitrary_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        3 => any::<bool>().prop_map(|refresh| Event::Start { refresh }),
        2 => (0..=PAGE_SIZE, any::<bool>())
            .prop_map(|(page, refresh)| Event::Success { page, refresh }),
        2 => arbitrary_class().prop_map(|class| Event::Failure { class }),
    ]
}

fn shows(calls: &[ViewCall]) -> usize {
    calls.iter().filter(|c| matches!(c, ViewCall::Show(_))).count()
}

fn statuses(calls: &[ViewCall]) -> usize {
    calls.iter().filter(|c| matches!(c, ViewCall::Status(_))).count()
}

proptest! {
    #[test]
    fn invariants_hold_for_any_event_sequence(
        initial in 0..3usize,
        events in prop::collection::vec(arbitrary_event(), 1..40)
    ) {
        let mut c = controller(initial);
        let mut outstanding = false;

        for event in events {
            let had_items = c.has_items();
            let before_state = c.state();
            let before_display = c.display_state();
            c.view_mut().take();

            match event {
                Event::Start { refresh } => {
                    let cancelled = Arc::new(AtomicBool::new(false));
                    let op = PendingOperation::new(refresh, Flag(Arc::clone(&cancelled)));
                    let decision = c.begin(op);

                    if outstanding {
                        prop_assert_eq!(decision, StartDecision::Rejected);
                        prop_assert!(cancelled.load(Ordering::SeqCst));
                        prop_assert_eq!(c.state(), before_state);
                        prop_assert!(c.view().calls().is_empty());
                    } else {
                        prop_assert!(decision.is_accepted());
                        prop_assert!(!cancelled.load(Ordering::SeqCst));
                        let calls = c.view().calls();
                        prop_assert_eq!(shows(calls) + statuses(calls), 1);
                        if had_items {
                            prop_assert_eq!(statuses(calls), 1);
                        } else {
                            prop_assert_eq!(c.view().last_shown(), Some(DisplayState::Progress));
                        }
                        outstanding = true;
                    }
                }
                Event::Success { page, refresh } => {
                    c.on_success((100..100 + page).collect(), refresh);
                    outstanding = false;

                    let calls = c.view().calls();
                    prop_assert_eq!(shows(calls), 1);
                    let expected_status = usize::from(had_items || c.has_items());
                    prop_assert_eq!(statuses(calls), expected_status);
                    prop_assert_eq!(c.has_more(), page == PAGE_SIZE);
                }
                Event::Failure { class } => {
                    c.on_failure(TestError(class));
                    outstanding = false;

                    prop_assert!(c.is_error());
                    prop_assert_eq!(c.view().errors().len(), 1);
                    let calls = c.view().calls();
                    if had_items {
                        prop_assert_eq!(shows(calls), 0);
                        prop_assert_eq!(statuses(calls), 1);
                        prop_assert_eq!(c.display_state(), before_display);
                    } else {
                        prop_assert_eq!(statuses(calls), 0);
                        prop_assert_eq!(
                            c.view().last_shown(),
                            Some(DisplayState::for_failure(class))
                        );
                    }
                }
            }

            prop_assert_eq!(c.is_loading(), outstanding);
            prop_assert_eq!(c.active_operation().is_some(), outstanding);
            prop_assert_eq!(c.display_state() == DisplayState::Content, c.has_items());
        }
    }

    #[test]
    fn load_state_roundtrip_serialization(
        has_more in any::<bool>(),
        class in arbitrary_class(),
        envelope_ok in any::<bool>()
    ) {
        let states = [
            LoadState::new(has_more),
            LoadState::new(has_more).loading(),
            LoadState::new(has_more).loading().succeeded(envelope_ok, has_more),
            LoadState::new(has_more).loading().failed(class),
        ];

        for state in states {
            let json = serde_json::to_string(&state).unwrap();
            let deserialized: LoadState = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(state, deserialized);
            prop_assert_eq!(state.name(), deserialized.name());
        }
    }

    #[test]
    fn display_resolution_is_deterministic(
        has_items in any::<bool>(),
        class in arbitrary_class()
    ) {
        let state = LoadState::default().loading().failed(class);
        let first = DisplayState::resolve(has_items, &state);
        let second = DisplayState::resolve(has_items, &state);
        prop_assert_eq!(first, second);
        prop_assert_eq!(first == DisplayState::Content, has_items);
    }
}
