//! End-to-end flows through the station control loop, driven entirely
//! through mock peripherals and the scripted backend.
//!
//! Tests run with the tokio clock paused, so the station's display holds and
//! debounce delays advance instantly while press durations and cooldown
//! windows are controlled with explicit `advance` calls.

use std::time::Duration;
use tappost_api::mock::{BackendCall, MockBackend};
use tappost_api::{
    CheckInOutcome, Connectivity, MockProvisioner, NetworkLink, ProvisionConfig, SubmitOutcome,
};
use tappost_core::{ActiveEvent, CardUid, CheckInReceipt, DeviceMode};
use tappost_hardware::mock::{
    MockButton, MockButtonHandle, MockBuzzer, MockBuzzerHandle, MockCardReader,
    MockCardReaderHandle, MockDisplay, MockDisplayHandle,
};
use tappost_hardware::{AnyButton, AnyBuzzer, AnyCardReader, AnyDisplay};
use tappost_station::{AttendanceState, BootError, Peripherals, Station, StationConfig};
use tokio::time::advance;

const LONG_PRESS: Duration = Duration::from_millis(5000);
const SHORT_PRESS: Duration = Duration::from_millis(200);

struct Harness {
    station: Station<MockBackend>,
    backend: MockBackend,
    reader: MockCardReaderHandle,
    fetch: MockButtonHandle,
    clear: MockButtonHandle,
    buzzer: MockBuzzerHandle,
    display: MockDisplayHandle,
    link: NetworkLink,
}

fn harness() -> Harness {
    let (reader, reader_handle) = MockCardReader::new();
    let (fetch_button, fetch_handle) = MockButton::new();
    let (clear_button, clear_handle) = MockButton::new();
    let (buzzer, buzzer_handle) = MockBuzzer::new();
    let (display, display_handle) = MockDisplay::new();

    let backend = MockBackend::new();
    let link = NetworkLink::new();
    link.attach();

    let station = Station::new(
        StationConfig::new("https://example.test", "test-key"),
        Peripherals {
            reader: AnyCardReader::Mock(reader),
            fetch_button: AnyButton::Mock(fetch_button),
            clear_button: AnyButton::Mock(clear_button),
            buzzer: AnyBuzzer::Mock(buzzer),
            display: AnyDisplay::Mock(display),
        },
        backend.clone(),
    );

    Harness {
        station,
        backend,
        reader: reader_handle,
        fetch: fetch_handle,
        clear: clear_handle,
        buzzer: buzzer_handle,
        display: display_handle,
        link,
    }
}

fn uid() -> CardUid {
    CardUid::from_bytes(&[0xAA, 0xBB, 0xCC, 0xDD]).unwrap()
}

impl Harness {
    /// Press and release a button, holding it for `hold`.
    async fn press(&mut self, button: Button, hold: Duration) {
        let handle = match button {
            Button::Fetch => &self.fetch,
            Button::Clear => &self.clear,
        };
        handle.press();
        self.station.tick().await.unwrap();
        advance(hold).await;
        let handle = match button {
            Button::Fetch => &self.fetch,
            Button::Clear => &self.clear,
        };
        handle.release();
        self.station.tick().await.unwrap();
    }

    /// Tap a card on the reader and run the iteration that handles it.
    async fn tap(&mut self, uid: CardUid) {
        self.reader.present(uid).await.unwrap();
        self.station.tick().await.unwrap();
    }

    /// Put the station into attendance mode with `event` loaded.
    async fn enter_attendance_with_event(&mut self, event: ActiveEvent) {
        self.backend.set_active_event(Some(event));
        self.press(Button::Fetch, LONG_PRESS).await;
        self.press(Button::Fetch, SHORT_PRESS).await;
        assert_eq!(self.station.attendance_state(), AttendanceState::Ready);
    }
}

#[derive(Clone, Copy)]
enum Button {
    Fetch,
    Clear,
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn bootstrap_provisions_and_shows_ready() {
    let mut h = harness();
    let link = NetworkLink::new();
    let mut provisioner = MockProvisioner::new(ProvisionConfig::default(), link.clone());

    h.station.bootstrap(&mut provisioner, &link).await.unwrap();

    assert!(link.is_attached());
    assert!(h.display.saw_line("TAPPOST-SETUP"));
    assert!(h.display.saw_line("Network OK!"));
    let last = h.display.last_frame().unwrap();
    assert!(last.has_line("Ready"));
    assert_eq!(h.station.mode(), DeviceMode::Registration);
}

#[tokio::test(start_paused = true)]
async fn bootstrap_skips_portal_when_already_attached() {
    let mut h = harness();
    let link = NetworkLink::new();
    link.attach();
    let mut provisioner = MockProvisioner::new(ProvisionConfig::default(), link.clone());

    h.station.bootstrap(&mut provisioner, &link).await.unwrap();

    assert!(!h.display.saw_line("Network Setup Mode"));
    assert!(h.display.last_frame().unwrap().has_line("Ready"));
}

#[tokio::test(start_paused = true)]
async fn bootstrap_provisioning_failure_requests_restart() {
    let mut h = harness();
    let link = NetworkLink::new();
    let mut provisioner =
        MockProvisioner::new(ProvisionConfig::default(), link.clone()).fail_connect();

    let result = h.station.bootstrap(&mut provisioner, &link).await;

    assert!(matches!(result, Err(BootError::RestartRequired)));
    assert!(h.display.saw_line("Network failed"));
    assert!(h.display.saw_line("Restarting..."));
}

#[tokio::test(start_paused = true)]
async fn bootstrap_reader_failure_is_fatal() {
    let mut h = harness();
    h.reader.fail_init();
    let link = NetworkLink::new();
    let mut provisioner = MockProvisioner::new(ProvisionConfig::default(), link.clone());

    let result = h.station.bootstrap(&mut provisioner, &link).await;

    assert!(matches!(result, Err(BootError::Hardware(_))));
}

// ---------------------------------------------------------------------------
// Registration mode
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn registration_submits_card_and_returns_to_ready() {
    let mut h = harness();
    h.backend.queue_submit(SubmitOutcome::Accepted);

    h.tap(uid()).await;

    assert_eq!(
        h.backend.calls(),
        vec![BackendCall::SubmitCard {
            uid: "AA:BB:CC:DD".into()
        }]
    );
    assert!(h.display.saw_line("Card Detected!"));
    assert!(h.display.saw_line("Card sent!"));
    assert!(h.display.saw_line("in browser"));
    assert!(h.display.last_frame().unwrap().has_line("Ready"));
    assert_eq!(h.buzzer.beeps(), vec![200]);
    assert_eq!(h.reader.halt_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn registration_duplicate_card_shows_already_activated() {
    let mut h = harness();
    h.backend.queue_submit(SubmitOutcome::AlreadyActivated);

    h.tap(uid()).await;

    assert!(h.display.saw_line("Card already"));
    assert!(h.display.saw_line("activated"));
    assert!(h.display.last_frame().unwrap().has_line("Ready"));
}

#[tokio::test(start_paused = true)]
async fn registration_api_failure_shows_generic_error() {
    let mut h = harness();
    h.backend.queue_submit(SubmitOutcome::Failed { status: Some(500) });

    h.tap(uid()).await;

    assert!(h.display.saw_line("API Error"));
    assert!(h.display.saw_line("Check connection"));
    assert!(h.display.last_frame().unwrap().has_line("Ready"));
}

#[tokio::test(start_paused = true)]
async fn registration_keeps_no_card_state_beyond_cooldown() {
    let mut h = harness();
    h.backend.queue_submit(SubmitOutcome::Accepted);
    h.backend.queue_submit(SubmitOutcome::Accepted);

    h.tap(uid()).await;
    advance(Duration::from_millis(2000)).await;
    h.tap(uid()).await;

    // Same card again is a fresh submission once the cooldown has passed
    assert_eq!(h.backend.calls().len(), 2);
}

// ---------------------------------------------------------------------------
// Cooldown
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn cooldown_suppresses_repeated_reads() {
    let mut h = harness();
    // Attendance mode without an event: card dispatch is a no-op, so the
    // iteration adds no display holds and the cooldown window stays live.
    h.press(Button::Fetch, LONG_PRESS).await;
    assert_eq!(h.station.mode(), DeviceMode::Attendance);

    h.tap(uid()).await;
    assert_eq!(h.buzzer.beep_count(), 1);

    // ~100ms settle later the same card is still on the reader
    h.tap(uid()).await;
    assert_eq!(h.buzzer.beep_count(), 1, "suppressed read must not beep");
    assert_eq!(h.reader.halt_count(), 2, "suppressed read still halts");

    advance(Duration::from_millis(2000)).await;
    h.tap(uid()).await;
    assert_eq!(h.buzzer.beep_count(), 2, "cooldown expired, read admitted");
}

#[tokio::test(start_paused = true)]
async fn cooldown_admits_a_different_card_immediately() {
    let mut h = harness();
    h.press(Button::Fetch, LONG_PRESS).await;

    h.tap(uid()).await;
    h.tap(CardUid::from_bytes(&[0x01, 0x02, 0x03, 0x04]).unwrap())
        .await;

    assert_eq!(h.buzzer.beep_count(), 2);
}

// ---------------------------------------------------------------------------
// Mode switching
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn long_press_toggles_mode_both_ways() {
    let mut h = harness();
    assert_eq!(h.station.mode(), DeviceMode::Registration);

    h.press(Button::Fetch, LONG_PRESS).await;
    assert_eq!(h.station.mode(), DeviceMode::Attendance);
    assert_eq!(h.station.attendance_state(), AttendanceState::NoEvent);
    assert!(h.display.last_frame().unwrap().has_line("No event found"));

    h.press(Button::Fetch, LONG_PRESS).await;
    assert_eq!(h.station.mode(), DeviceMode::Registration);
    assert!(h.display.last_frame().unwrap().has_line("Ready"));
}

#[tokio::test(start_paused = true)]
async fn long_press_suppresses_short_press_action() {
    let mut h = harness();
    h.press(Button::Fetch, LONG_PRESS).await; // into attendance

    // A long press from attendance mode must only switch modes, never fetch
    h.backend
        .set_active_event(Some(ActiveEvent::new("E1", "Spring Gala")));
    h.press(Button::Fetch, LONG_PRESS).await;

    assert_eq!(h.station.mode(), DeviceMode::Registration);
    assert!(h.backend.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn attendance_entry_always_resets_to_no_event() {
    let mut h = harness();
    h.enter_attendance_with_event(ActiveEvent::new("E1", "Spring Gala"))
        .await;

    // Leave and re-enter attendance mode: the loaded event must be gone
    h.press(Button::Fetch, LONG_PRESS).await;
    h.press(Button::Fetch, LONG_PRESS).await;

    assert_eq!(h.station.attendance_state(), AttendanceState::NoEvent);
    assert!(h.station.active_event().is_none());
}

#[tokio::test(start_paused = true)]
async fn press_just_below_threshold_is_short() {
    let mut h = harness();
    h.press(Button::Fetch, Duration::from_millis(4999)).await;

    // Short press in registration mode is a no-op: same mode, no calls
    assert_eq!(h.station.mode(), DeviceMode::Registration);
    assert!(h.backend.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Event fetch
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn fetch_press_loads_active_event() {
    let mut h = harness();
    h.backend
        .set_active_event(Some(ActiveEvent::new("E1", "Spring Gala")));
    h.press(Button::Fetch, LONG_PRESS).await;

    h.press(Button::Fetch, SHORT_PRESS).await;

    assert_eq!(h.station.attendance_state(), AttendanceState::Ready);
    assert_eq!(
        h.station.active_event(),
        Some(&ActiveEvent::new("E1", "Spring Gala"))
    );
    assert!(h.display.saw_line("Fetching event"));
    let last = h.display.last_frame().unwrap();
    assert!(last.has_line("Spring Gal..."), "event name is truncated");
    assert!(last.has_line("Tap card to check in"));
}

#[tokio::test(start_paused = true)]
async fn fetch_press_without_active_event_returns_to_no_event() {
    let mut h = harness();
    h.press(Button::Fetch, LONG_PRESS).await;

    h.press(Button::Fetch, SHORT_PRESS).await;

    assert_eq!(h.station.attendance_state(), AttendanceState::NoEvent);
    assert!(h.station.active_event().is_none());
    assert!(h.display.last_frame().unwrap().has_line("No event found"));
}

#[tokio::test(start_paused = true)]
async fn fetch_press_ignored_when_event_loaded() {
    let mut h = harness();
    h.enter_attendance_with_event(ActiveEvent::new("E1", "Spring Gala"))
        .await;

    h.press(Button::Fetch, SHORT_PRESS).await;

    let fetches = h
        .backend
        .calls()
        .iter()
        .filter(|c| **c == BackendCall::FetchActiveEvent)
        .count();
    assert_eq!(fetches, 1, "second press must not fetch again");
    assert_eq!(h.station.attendance_state(), AttendanceState::Ready);
}

// ---------------------------------------------------------------------------
// Check-in
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn check_in_success_shows_welcome_and_returns_to_ready() {
    let mut h = harness();
    h.enter_attendance_with_event(ActiveEvent::new("E1", "Spring Gala"))
        .await;
    h.backend.queue_check_in(CheckInOutcome::CheckedIn(CheckInReceipt {
        student_name: "Alice Mokoena".into(),
    }));

    h.tap(uid()).await;

    assert!(h.backend.calls().contains(&BackendCall::CheckIn {
        uid: "AA:BB:CC:DD".into(),
        event_id: "E1".into()
    }));
    assert!(h.display.saw_line("Checking in..."));
    assert!(h.display.saw_line("Welcome!"));
    assert!(h.display.saw_line("Alice Moke"), "student name truncated");
    assert_eq!(h.station.attendance_state(), AttendanceState::Ready);
    let last = h.display.last_frame().unwrap();
    assert!(last.has_line("Spring Gal..."));
}

#[tokio::test(start_paused = true)]
async fn check_in_duplicate_shows_already_checked_in() {
    let mut h = harness();
    h.enter_attendance_with_event(ActiveEvent::new("E1", "Spring Gala"))
        .await;
    h.backend.queue_check_in(CheckInOutcome::AlreadyCheckedIn);

    h.tap(uid()).await;

    assert!(h.display.saw_line("Already checked in"));
    assert_eq!(h.station.attendance_state(), AttendanceState::Ready);
    assert_eq!(
        h.station.active_event(),
        Some(&ActiveEvent::new("E1", "Spring Gala")),
        "duplicate check-in leaves the event loaded"
    );
}

#[tokio::test(start_paused = true)]
async fn check_in_failure_shows_error_and_returns_to_ready() {
    let mut h = harness();
    h.enter_attendance_with_event(ActiveEvent::new("E1", "Spring Gala"))
        .await;
    h.backend
        .queue_check_in(CheckInOutcome::Failed { status: Some(500) });

    h.tap(uid()).await;

    assert!(h.display.saw_line("Check-in failed"));
    assert_eq!(h.station.attendance_state(), AttendanceState::Ready);
}

#[tokio::test(start_paused = true)]
async fn card_ignored_while_no_event_loaded() {
    let mut h = harness();
    h.press(Button::Fetch, LONG_PRESS).await;

    h.tap(uid()).await;

    assert!(h.backend.calls().is_empty());
    assert_eq!(h.station.attendance_state(), AttendanceState::NoEvent);
}

// ---------------------------------------------------------------------------
// Clear button
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn clear_press_discards_loaded_event() {
    let mut h = harness();
    h.enter_attendance_with_event(ActiveEvent::new("E1", "Spring Gala"))
        .await;

    h.press(Button::Clear, SHORT_PRESS).await;

    assert_eq!(h.station.attendance_state(), AttendanceState::NoEvent);
    assert!(h.station.active_event().is_none());
    assert!(h.display.last_frame().unwrap().has_line("No event found"));
}

#[tokio::test(start_paused = true)]
async fn clear_press_in_no_event_is_idempotent() {
    let mut h = harness();
    h.press(Button::Fetch, LONG_PRESS).await;
    let frames_before = h.display.frame_count();

    h.press(Button::Clear, SHORT_PRESS).await;
    h.press(Button::Clear, SHORT_PRESS).await;

    assert_eq!(h.station.attendance_state(), AttendanceState::NoEvent);
    assert!(h.station.active_event().is_none());
    assert_eq!(
        h.display.frame_count(),
        frames_before,
        "ignored presses repaint nothing"
    );
}

#[tokio::test(start_paused = true)]
async fn clear_press_ignored_in_registration_mode() {
    let mut h = harness();

    h.press(Button::Clear, SHORT_PRESS).await;

    assert_eq!(h.station.mode(), DeviceMode::Registration);
    assert!(h.backend.calls().is_empty());
}

// A clear press works regardless of hold duration; only the fetch button
// distinguishes long from short.
#[tokio::test(start_paused = true)]
async fn long_clear_press_still_clears() {
    let mut h = harness();
    h.enter_attendance_with_event(ActiveEvent::new("E1", "Spring Gala"))
        .await;

    h.press(Button::Clear, LONG_PRESS).await;

    assert_eq!(h.station.attendance_state(), AttendanceState::NoEvent);
}

// ---------------------------------------------------------------------------
// Network loss
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn detached_link_is_reported_by_mock_harness_link() {
    // The harness link is attached by default; the backend mock does not
    // consult it, but the real client's short-circuit path is covered in
    // tappost-api. Here we just pin the link wiring used by the harness.
    let h = harness();
    assert!(h.link.is_attached());
    h.link.detach();
    assert!(!h.link.is_attached());
}
