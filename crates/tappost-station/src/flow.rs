//! Attendance mode state machine.
//!
//! # States
//!
//! - `NoEvent`: nothing loaded; a short fetch press asks the backend for the
//!   active event.
//! - `FetchingEvent`: lookup in flight.
//! - `Ready`: event loaded; cards tapped on the reader are checked in, the
//!   clear button discards the event.
//! - `CheckingIn`: check-in call in flight.
//!
//! # Valid Transitions
//!
//! - NoEvent → FetchingEvent
//! - FetchingEvent → Ready (event found) | NoEvent (none / failed)
//! - Ready → CheckingIn (card read) | NoEvent (cleared)
//! - CheckingIn → Ready (always, whatever the call outcome)
//!
//! The machine is cyclic with no terminal state. Illegal transitions are
//! rejected with an error; callers log and ignore them rather than fall
//! through into undefined behavior.
//!
//! The active event rides along with the state: it is `Some` exactly in
//! `Ready` and `CheckingIn`, enforced by the transition helpers here.

use std::fmt;

use serde::{Deserialize, Serialize};
use tappost_core::{ActiveEvent, Error, Result};

/// Attendance flow states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceState {
    /// No event in memory; waiting for a fetch press.
    NoEvent,

    /// Fetching the active event from the backend.
    FetchingEvent,

    /// Event loaded; ready to check cards in.
    Ready,

    /// Check-in call in flight for a tapped card.
    CheckingIn,
}

impl AttendanceState {
    /// Check whether a transition to `target` is legal from this state.
    ///
    /// # Examples
    ///
    /// ```
    /// use tappost_station::flow::AttendanceState;
    ///
    /// assert!(AttendanceState::NoEvent.can_transition_to(&AttendanceState::FetchingEvent));
    /// assert!(!AttendanceState::NoEvent.can_transition_to(&AttendanceState::Ready));
    /// ```
    pub fn can_transition_to(&self, target: &AttendanceState) -> bool {
        matches!(
            (self, target),
            (AttendanceState::NoEvent, AttendanceState::FetchingEvent)
                | (
                    AttendanceState::FetchingEvent,
                    AttendanceState::Ready | AttendanceState::NoEvent
                )
                | (
                    AttendanceState::Ready,
                    AttendanceState::CheckingIn | AttendanceState::NoEvent
                )
                | (AttendanceState::CheckingIn, AttendanceState::Ready)
        )
    }
}

impl fmt::Display for AttendanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state_str = match self {
            AttendanceState::NoEvent => "NoEvent",
            AttendanceState::FetchingEvent => "FetchingEvent",
            AttendanceState::Ready => "Ready",
            AttendanceState::CheckingIn => "CheckingIn",
        };
        write!(f, "{}", state_str)
    }
}

/// Attendance flow: current state plus the event it operates on.
#[derive(Debug)]
pub struct AttendanceFlow {
    state: AttendanceState,
    active_event: Option<ActiveEvent>,
}

impl AttendanceFlow {
    /// Create a flow in `NoEvent` with nothing loaded.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: AttendanceState::NoEvent,
            active_event: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> AttendanceState {
        self.state
    }

    /// The loaded event, if any.
    pub fn active_event(&self) -> Option<&ActiveEvent> {
        self.active_event.as_ref()
    }

    /// Transition to a new state, validating the edge.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidStateTransition` if the edge is not in the
    /// transition table. The state is left unchanged in that case.
    pub fn transition_to(&mut self, target: AttendanceState) -> Result<()> {
        if !self.state.can_transition_to(&target) {
            return Err(Error::InvalidStateTransition {
                from: self.state.to_string(),
                to: target.to_string(),
            });
        }

        tracing::debug!(from = %self.state, to = %target, "attendance transition");
        self.state = target;
        Ok(())
    }

    /// Store a fetched event and become `Ready`.
    ///
    /// # Errors
    ///
    /// Returns an error unless the flow is currently `FetchingEvent`.
    pub fn load_event(&mut self, event: ActiveEvent) -> Result<()> {
        self.transition_to(AttendanceState::Ready)?;
        tracing::info!(event_id = %event.id, event_name = %event.name, "event loaded");
        self.active_event = Some(event);
        Ok(())
    }

    /// Discard the loaded event and become `NoEvent`.
    ///
    /// # Errors
    ///
    /// Returns an error unless the flow is currently `Ready`.
    pub fn clear_event(&mut self) -> Result<()> {
        self.transition_to(AttendanceState::NoEvent)?;
        tracing::info!("event cleared");
        self.active_event = None;
        Ok(())
    }

    /// Forcefully reset to `NoEvent` with nothing loaded.
    ///
    /// Used on every entry into attendance mode; bypasses edge validation
    /// the way a mode switch must.
    pub fn reset(&mut self) {
        self.state = AttendanceState::NoEvent;
        self.active_event = None;
    }
}

impl Default for AttendanceFlow {
    fn default() -> Self {
        Self::new()
    }
}
