//! The station control loop.
//!
//! One cooperative loop owns every peripheral and all mutable state. Each
//! iteration services the two buttons, polls the card reader, gates repeated
//! reads, and dispatches an accepted card to the handler for the active
//! mode. Result screens are held with plain delays; by design no input is
//! serviced during a hold.

use crate::{
    boot::BootError,
    config::StationConfig,
    flow::{AttendanceFlow, AttendanceState},
    gate::CardGate,
    input::{Press, PressTracker},
    screen,
};
use std::time::Duration;
use tappost_api::{
    Backend, CheckInOutcome, Connectivity, EventFetch, NetworkLink, Provisioner, SubmitOutcome,
};
use tappost_core::{
    CardUid, DeviceMode,
    constants::{
        BUTTON_DEBOUNCE_MS, BUTTON_LONG_PRESS_MS, BUZZER_BEEP_MS, CARD_COOLDOWN_MS,
        CARD_SENT_WAIT_MS, CARD_SETTLE_MS, CHECKIN_ERROR_HOLD_MS, CHECKIN_WELCOME_HOLD_MS,
        LOOP_POLL_MS, NETWORK_OK_HOLD_MS, PROVISION_FAILED_HOLD_MS, REGISTRATION_ERROR_HOLD_MS,
    },
};
use tappost_hardware::{
    AnyButton, AnyBuzzer, AnyCardReader, AnyDisplay, Button, Buzzer, CardReader, HardwareError,
};
use tokio::time::{Instant, sleep};
use tracing::{debug, error, info, warn};

/// The peripherals one station owns.
pub struct Peripherals {
    pub reader: AnyCardReader,
    pub fetch_button: AnyButton,
    pub clear_button: AnyButton,
    pub buzzer: AnyBuzzer,
    pub display: AnyDisplay,
}

/// Badge station: peripherals, backend client and all mutable state.
///
/// Generic over the backend so tests and the emulator can run against the
/// scripted [`MockBackend`](tappost_api::mock::MockBackend) while the real
/// binary uses [`HttpBackend`](tappost_api::HttpBackend).
pub struct Station<B: Backend> {
    config: StationConfig,
    reader: AnyCardReader,
    fetch_button: AnyButton,
    clear_button: AnyButton,
    buzzer: AnyBuzzer,
    display: AnyDisplay,
    backend: B,
    mode: DeviceMode,
    flow: AttendanceFlow,
    gate: CardGate,
    fetch_press: PressTracker,
    clear_press: PressTracker,
}

impl<B: Backend> Station<B> {
    /// Assemble a station in registration mode.
    pub fn new(config: StationConfig, peripherals: Peripherals, backend: B) -> Self {
        let long_press = Duration::from_millis(BUTTON_LONG_PRESS_MS);
        Self {
            config,
            reader: peripherals.reader,
            fetch_button: peripherals.fetch_button,
            clear_button: peripherals.clear_button,
            buzzer: peripherals.buzzer,
            display: peripherals.display,
            backend,
            mode: DeviceMode::Registration,
            flow: AttendanceFlow::new(),
            gate: CardGate::new(Duration::from_millis(CARD_COOLDOWN_MS)),
            fetch_press: PressTracker::new(long_press),
            clear_press: PressTracker::new(long_press),
        }
    }

    /// Active device mode.
    pub fn mode(&self) -> DeviceMode {
        self.mode
    }

    /// Attendance flow state (meaningful while in attendance mode).
    pub fn attendance_state(&self) -> AttendanceState {
        self.flow.state()
    }

    /// The loaded attendance event, if any.
    pub fn active_event(&self) -> Option<&tappost_core::ActiveEvent> {
        self.flow.active_event()
    }

    /// One-shot startup sequence: probe the reader, provision the uplink,
    /// show the ready screen.
    ///
    /// # Errors
    ///
    /// - [`BootError::Hardware`] when the reader does not respond; the
    ///   caller should park the device.
    /// - [`BootError::RestartRequired`] when provisioning times out; the
    ///   caller should restart the device.
    pub async fn bootstrap<P: Provisioner>(
        &mut self,
        provisioner: &mut P,
        link: &NetworkLink,
    ) -> Result<(), BootError> {
        info!(
            version = tappost_core::VERSION,
            device_id = %self.config.device_id,
            "badge station starting"
        );

        self.reader.init().await?;
        info!("card reader initialized");

        if link.is_attached() {
            info!("uplink already attached");
        } else {
            screen::show_portal(&mut self.display, &self.config.ap_name);
            if !provisioner.auto_connect(&self.config.ap_name).await {
                error!("network provisioning failed");
                screen::show_provision_failed(&mut self.display);
                sleep(Duration::from_millis(PROVISION_FAILED_HOLD_MS)).await;
                return Err(BootError::RestartRequired);
            }
        }

        screen::show_connected(&mut self.display);
        sleep(Duration::from_millis(NETWORK_OK_HOLD_MS)).await;

        info!(mode = %self.mode, "station ready");
        screen::show_ready(&mut self.display);
        Ok(())
    }

    /// Run the control loop until a peripheral fails.
    ///
    /// # Errors
    ///
    /// Returns the peripheral error that stopped the loop; there is no
    /// in-loop recovery from a disconnected device.
    pub async fn run(&mut self) -> Result<(), HardwareError> {
        loop {
            self.tick().await?;
            sleep(Duration::from_millis(LOOP_POLL_MS)).await;
        }
    }

    /// One loop iteration: buttons first, then the card reader.
    ///
    /// # Errors
    ///
    /// Returns an error if a peripheral fails mid-poll.
    pub async fn tick(&mut self) -> Result<(), HardwareError> {
        self.service_buttons().await?;

        let Some(read) = self.reader.poll_card().await? else {
            return Ok(());
        };

        if !self.gate.admit(&read.uid, Instant::now()) {
            debug!(uid = %read.uid, "card suppressed by cooldown");
            self.reader.halt().await?;
            return Ok(());
        }

        info!(uid = %read.uid, read_at = %read.read_at, "card detected");
        self.buzzer.beep(BUZZER_BEEP_MS).await?;

        match self.mode {
            DeviceMode::Registration => self.register_card(&read.uid).await,
            DeviceMode::Attendance => self.attend_card(&read.uid).await,
        }

        self.reader.halt().await?;
        sleep(Duration::from_millis(CARD_SETTLE_MS)).await;
        Ok(())
    }

    /// Sample both buttons and act on completed presses.
    async fn service_buttons(&mut self) -> Result<(), HardwareError> {
        let fetch_level = self.fetch_button.is_pressed().await?;
        if let Some(press) = self.fetch_press.sample(fetch_level, Instant::now()) {
            debug!(held = ?press.duration(), "fetch button released");
            match press {
                Press::Long(_) => self.switch_mode(),
                Press::Short(_) => self.handle_fetch_short_press().await,
            }
            sleep(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        }

        let clear_level = self.clear_button.is_pressed().await?;
        if let Some(press) = self.clear_press.sample(clear_level, Instant::now()) {
            debug!(held = ?press.duration(), "clear button released");
            self.handle_clear_press();
            sleep(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        }

        Ok(())
    }

    /// Toggle the device mode and render the new mode's idle screen.
    fn switch_mode(&mut self) {
        self.mode = self.mode.toggled();
        info!(mode = %self.mode, "mode switched");

        match self.mode {
            DeviceMode::Attendance => {
                // Every attendance entry starts from a clean slate.
                self.flow.reset();
                screen::show_no_event(&mut self.display);
            }
            DeviceMode::Registration => screen::show_ready(&mut self.display),
        }
    }

    /// Short fetch press: fetch the active event, but only from `NoEvent`.
    async fn handle_fetch_short_press(&mut self) {
        match self.mode {
            DeviceMode::Registration => {
                debug!("fetch press ignored in registration mode");
            }
            DeviceMode::Attendance => {
                if self.flow.state() != AttendanceState::NoEvent {
                    debug!(state = %self.flow.state(), "fetch press ignored, event already loaded");
                    return;
                }
                self.fetch_event().await;
            }
        }
    }

    /// Ask the backend for the active event and settle into the result state.
    async fn fetch_event(&mut self) {
        if let Err(error) = self.flow.transition_to(AttendanceState::FetchingEvent) {
            warn!(%error, "rejected transition");
            return;
        }
        screen::show_fetching_event(&mut self.display);

        match self.backend.fetch_active_event().await {
            EventFetch::Active(event) => {
                let name = event.name.clone();
                if let Err(error) = self.flow.load_event(event) {
                    warn!(%error, "rejected transition");
                    return;
                }
                screen::show_attendance_ready(&mut self.display, &name);
            }
            EventFetch::NoEvent => {
                info!("no active event");
                if let Err(error) = self.flow.transition_to(AttendanceState::NoEvent) {
                    warn!(%error, "rejected transition");
                }
                screen::show_no_event(&mut self.display);
            }
        }
    }

    /// Clear press: discard the loaded event, but only from `Ready`.
    fn handle_clear_press(&mut self) {
        if self.mode != DeviceMode::Attendance {
            debug!("clear press ignored in registration mode");
            return;
        }
        if self.flow.state() != AttendanceState::Ready {
            debug!(state = %self.flow.state(), "clear press ignored, nothing to clear");
            return;
        }
        if let Err(error) = self.flow.clear_event() {
            warn!(%error, "rejected transition");
            return;
        }
        screen::show_no_event(&mut self.display);
    }

    /// Registration mode: submit the card and hold the outcome screen.
    async fn register_card(&mut self, uid: &CardUid) {
        screen::show_sending(&mut self.display, uid);

        match self.backend.submit_card(uid).await {
            SubmitOutcome::Accepted => {
                info!(%uid, "card submitted for registration");
                screen::show_waiting(&mut self.display);
                sleep(Duration::from_millis(CARD_SENT_WAIT_MS)).await;
            }
            SubmitOutcome::AlreadyActivated => {
                info!(%uid, "card already activated");
                screen::show_error(&mut self.display, "Card already", "activated");
                sleep(Duration::from_millis(REGISTRATION_ERROR_HOLD_MS)).await;
            }
            SubmitOutcome::Failed { status } => {
                warn!(%uid, ?status, "card submit failed");
                screen::show_error(&mut self.display, "API Error", "Check connection");
                sleep(Duration::from_millis(REGISTRATION_ERROR_HOLD_MS)).await;
            }
        }

        screen::show_ready(&mut self.display);
    }

    /// Attendance mode: check the card in and hold the outcome screen.
    ///
    /// Cards are only acted on in `Ready`; anything else is logged and
    /// dropped (the cooldown entry already happened, so a card spamming the
    /// reader during a fetch does not queue up work).
    async fn attend_card(&mut self, uid: &CardUid) {
        if self.flow.state() != AttendanceState::Ready {
            debug!(state = %self.flow.state(), %uid, "card ignored outside ready state");
            return;
        }

        let Some(event) = self.flow.active_event().cloned() else {
            // Ready without an event violates the flow invariant; recover
            // instead of checking in against nothing.
            warn!("ready state without an event, resetting flow");
            self.flow.reset();
            screen::show_no_event(&mut self.display);
            return;
        };

        if let Err(error) = self.flow.transition_to(AttendanceState::CheckingIn) {
            warn!(%error, "rejected transition");
            return;
        }
        screen::show_checking_in(&mut self.display, uid);

        match self.backend.check_in(uid, &event.id).await {
            CheckInOutcome::CheckedIn(receipt) => {
                info!(%uid, student = %receipt.student_name, "check-in success");
                screen::show_welcome(&mut self.display, &receipt.student_name);
                sleep(Duration::from_millis(CHECKIN_WELCOME_HOLD_MS)).await;
            }
            CheckInOutcome::AlreadyCheckedIn => {
                info!(%uid, "already checked in");
                screen::show_attendance_error(&mut self.display, "Already checked in");
                sleep(Duration::from_millis(CHECKIN_ERROR_HOLD_MS)).await;
            }
            CheckInOutcome::Failed { status } => {
                warn!(%uid, ?status, "check-in failed");
                screen::show_attendance_error(&mut self.display, "Check-in failed");
                sleep(Duration::from_millis(CHECKIN_ERROR_HOLD_MS)).await;
            }
        }

        if let Err(error) = self.flow.transition_to(AttendanceState::Ready) {
            warn!(%error, "rejected transition");
        }
        screen::show_attendance_ready(&mut self.display, &event.name);
    }
}
