//! Timing, display and wire constants shared across the badge station.
//!
//! Everything time-related is expressed in milliseconds unless the name says
//! otherwise. The station is a single cooperative loop, so the hold values
//! below are realized as in-loop delays during which no input is serviced.

// ============================================================================
// Card Reading
// ============================================================================

/// Minimum delay before the same card UID is accepted again (milliseconds).
///
/// A card resting on the reader antenna re-reports every few loop iterations;
/// anything inside this window that matches the previously accepted UID is
/// discarded without dispatch.
pub const CARD_COOLDOWN_MS: u64 = 2000;

/// Settle delay after a card has been handled, before the next poll (milliseconds).
pub const CARD_SETTLE_MS: u64 = 100;

/// Minimum UID length in bytes (per ISO 14443 specification).
pub const MIN_UID_LENGTH: usize = 4;

/// Maximum UID length in bytes (per ISO 14443 specification).
pub const MAX_UID_LENGTH: usize = 10;

/// Buzzer beep duration on an accepted card read (milliseconds).
pub const BUZZER_BEEP_MS: u64 = 200;

// ============================================================================
// Buttons
// ============================================================================

/// Hold duration at or above which a release classifies as a long press (milliseconds).
///
/// A long press of the fetch button switches the device mode; the short-press
/// action is suppressed for that release.
pub const BUTTON_LONG_PRESS_MS: u64 = 5000;

/// Delay after a button release before polling resumes (milliseconds).
pub const BUTTON_DEBOUNCE_MS: u64 = 50;

// ============================================================================
// Backend API
// ============================================================================

/// Timeout applied to every backend request (milliseconds).
pub const API_TIMEOUT_MS: u64 = 10_000;

/// Card registration endpoint.
pub const ENDPOINT_CARDS_DETECTED: &str = "/api/cards/detected";

/// Active event lookup endpoint.
pub const ENDPOINT_EVENTS_ACTIVE: &str = "/api/events/active";

/// Attendance check-in endpoint.
pub const ENDPOINT_CHECK_IN: &str = "/api/check-in";

/// Header carrying the static device API key on every request.
pub const HEADER_DEVICE_API_KEY: &str = "x-device-api-key";

// ============================================================================
// Result Screen Holds
// ============================================================================

/// Hold after a card was submitted for registration (milliseconds).
///
/// Gives the operator time to read the "activate in browser" instruction
/// before the station returns to the ready screen.
pub const CARD_SENT_WAIT_MS: u64 = 5000;

/// Hold for registration-mode error screens (milliseconds).
pub const REGISTRATION_ERROR_HOLD_MS: u64 = 3000;

/// Hold for the welcome screen after a successful check-in (milliseconds).
pub const CHECKIN_WELCOME_HOLD_MS: u64 = 1000;

/// Hold for check-in error screens, duplicate included (milliseconds).
pub const CHECKIN_ERROR_HOLD_MS: u64 = 2000;

// ============================================================================
// Display Budgets
// ============================================================================

/// Maximum event name characters shown on the attendance ready screen.
///
/// Longer names are truncated and suffixed with an ellipsis.
pub const EVENT_NAME_DISPLAY_CHARS: usize = 10;

/// Maximum UID characters shown while a card is being processed.
pub const UID_DISPLAY_CHARS: usize = 17;

/// Maximum student name characters shown on the welcome screen.
pub const STUDENT_NAME_DISPLAY_CHARS: usize = 10;

// ============================================================================
// Network Provisioning
// ============================================================================

/// How long the provisioning portal stays open waiting for credentials (seconds).
pub const PORTAL_TIMEOUT_SECS: u64 = 180;

/// How long a single connect attempt may take (seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Hold on the provisioning-failure screen before the restart is requested (milliseconds).
pub const PROVISION_FAILED_HOLD_MS: u64 = 3000;

/// Hold on the network-connected screen before the ready screen (milliseconds).
pub const NETWORK_OK_HOLD_MS: u64 = 2000;

// ============================================================================
// Control Loop
// ============================================================================

/// Idle delay between loop iterations (milliseconds).
pub const LOOP_POLL_MS: u64 = 10;
