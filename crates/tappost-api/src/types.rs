//! Wire types and per-operation outcomes.
//!
//! The request/response shapes here are a fixed contract with the backend;
//! field names must serialize exactly as written (`uid`, `deviceId`,
//! `eventId`, `event.id`, `event.name`, `studentName`).

use serde::{Deserialize, Serialize};
use tappost_core::{ActiveEvent, CheckInReceipt};

/// Body of `POST /api/cards/detected`.
#[derive(Debug, Serialize)]
pub struct CardDetectedRequest<'a> {
    pub uid: &'a str,
    #[serde(rename = "deviceId")]
    pub device_id: &'a str,
}

/// Body of `POST /api/check-in`.
#[derive(Debug, Serialize)]
pub struct CheckInRequest<'a> {
    pub uid: &'a str,
    #[serde(rename = "eventId")]
    pub event_id: &'a str,
}

/// Response body of `GET /api/events/active`.
#[derive(Debug, Deserialize)]
pub struct ActiveEventEnvelope {
    pub event: ActiveEvent,
}

/// Outcome of fetching the active event.
///
/// Any non-200 status, unparsable body or transport failure means "no active
/// event" as far as the station is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventFetch {
    /// An event is active and loaded.
    Active(ActiveEvent),
    /// No active event (or the lookup failed).
    NoEvent,
}

/// Outcome of checking a card in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInOutcome {
    /// Check-in accepted; the receipt names the student.
    CheckedIn(CheckInReceipt),
    /// The card was already checked in for this event (HTTP 409).
    AlreadyCheckedIn,
    /// Any other failure. `status` is the HTTP status when the request got
    /// that far, `None` for transport-level failures.
    Failed { status: Option<u16> },
}

/// Outcome of submitting a detected card for registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Card accepted; an administrator activates it out-of-band.
    Accepted,
    /// The card is already activated (HTTP 409).
    AlreadyActivated,
    /// Any other failure. `status` is the HTTP status when the request got
    /// that far, `None` for transport-level failures.
    Failed { status: Option<u16> },
}
