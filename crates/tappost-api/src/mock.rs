//! Scripted backend for tests and offline emulation.

use crate::{
    client::Backend,
    types::{CheckInOutcome, EventFetch, SubmitOutcome},
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tappost_core::{ActiveEvent, CardUid};

/// A recorded backend invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    FetchActiveEvent,
    CheckIn { uid: String, event_id: String },
    SubmitCard { uid: String },
}

#[derive(Debug, Default)]
struct MockState {
    active_event: Option<ActiveEvent>,
    check_ins: VecDeque<CheckInOutcome>,
    submits: VecDeque<SubmitOutcome>,
    calls: Vec<BackendCall>,
}

/// Mock backend with scripted responses and a call log.
///
/// Check-in and submit outcomes are queued FIFO; when a queue runs dry the
/// operation reports a transport-level failure, which keeps unscripted calls
/// loud in tests instead of silently succeeding.
///
/// Clones share one state, so a test can hand a clone to the station and
/// keep scripting responses through its own copy.
///
/// # Examples
///
/// ```
/// use tappost_api::mock::MockBackend;
/// use tappost_api::{Backend, EventFetch};
/// use tappost_core::ActiveEvent;
///
/// #[tokio::main]
/// async fn main() {
///     let backend = MockBackend::new();
///     backend.set_active_event(Some(ActiveEvent::new("E1", "Spring Gala")));
///
///     match backend.fetch_active_event().await {
///         EventFetch::Active(event) => assert_eq!(event.id, "E1"),
///         EventFetch::NoEvent => panic!("event was configured"),
///     }
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockBackend {
    /// Create a backend with no active event and empty outcome queues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or clear the active event reported by `fetch_active_event`.
    pub fn set_active_event(&self, event: Option<ActiveEvent>) {
        self.state.lock().expect("mock state poisoned").active_event = event;
    }

    /// Queue the outcome of the next `check_in` call.
    pub fn queue_check_in(&self, outcome: CheckInOutcome) {
        self.state
            .lock()
            .expect("mock state poisoned")
            .check_ins
            .push_back(outcome);
    }

    /// Queue the outcome of the next `submit_card` call.
    pub fn queue_submit(&self, outcome: SubmitOutcome) {
        self.state
            .lock()
            .expect("mock state poisoned")
            .submits
            .push_back(outcome);
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.state.lock().expect("mock state poisoned").calls.clone()
    }
}

impl Backend for MockBackend {
    async fn fetch_active_event(&self) -> EventFetch {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.calls.push(BackendCall::FetchActiveEvent);
        match &state.active_event {
            Some(event) => EventFetch::Active(event.clone()),
            None => EventFetch::NoEvent,
        }
    }

    async fn check_in(&self, uid: &CardUid, event_id: &str) -> CheckInOutcome {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.calls.push(BackendCall::CheckIn {
            uid: uid.as_str().to_string(),
            event_id: event_id.to_string(),
        });
        state
            .check_ins
            .pop_front()
            .unwrap_or(CheckInOutcome::Failed { status: None })
    }

    async fn submit_card(&self, uid: &CardUid) -> SubmitOutcome {
        let mut state = self.state.lock().expect("mock state poisoned");
        state.calls.push(BackendCall::SubmitCard {
            uid: uid.as_str().to_string(),
        });
        state
            .submits
            .pop_front()
            .unwrap_or(SubmitOutcome::Failed { status: None })
    }
}
