//! Peripheral trait definitions.
//!
//! These traits establish the contract between the station control loop and
//! its peripherals, enabling substitution between mock and real hardware
//! implementations.
//!
//! All async traits use native `async fn` methods (Edition 2024 RPITIT), so
//! they are not object-safe; use generic type parameters, or the enum
//! wrappers from the [`devices`](crate::devices) module for dispatch.

#![allow(async_fn_in_trait)]

use crate::error::Result;
use tappost_core::CardUid;

/// A single card observation reported by the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRead {
    /// Normalized card identifier.
    pub uid: CardUid,

    /// Wall-clock time the card was read, for logging.
    pub read_at: chrono::DateTime<chrono::Utc>,
}

impl CardRead {
    /// Create a card read stamped with the current time.
    #[must_use]
    pub fn new(uid: CardUid) -> Self {
        Self {
            uid,
            read_at: chrono::Utc::now(),
        }
    }
}

/// Contactless card reader abstraction.
///
/// The reader is polled once per loop iteration; a poll never blocks waiting
/// for a card. After a card has been handled (or suppressed by the cooldown
/// gate) the caller must [`halt`](CardReader::halt) the reader so the card in
/// the field stops being reported.
pub trait CardReader: Send + Sync {
    /// Probe the reader hardware once at startup.
    ///
    /// # Errors
    ///
    /// Returns `HardwareError::InitializationFailed` if the peripheral does
    /// not respond. The station treats this as fatal.
    async fn init(&mut self) -> Result<()>;

    /// Check the field for a card and read its UID if one is present.
    ///
    /// Returns `Ok(None)` when no card is present; this is the common case
    /// and not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the peripheral reports a card but its serial
    /// cannot be read, or if the device is disconnected.
    async fn poll_card(&mut self) -> Result<Option<CardRead>>;

    /// Release the card currently in the field.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected.
    async fn halt(&mut self) -> Result<()>;
}

/// Momentary push button abstraction.
///
/// Models a raw input pin: the loop samples the level every iteration and
/// derives press/release edges itself. Active state is already normalized
/// (`true` = held down), so pull-up wiring is a backend concern.
pub trait Button: Send + Sync {
    /// Sample the current level of the button.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected.
    async fn is_pressed(&mut self) -> Result<bool>;
}

/// Buzzer abstraction for audible card feedback.
pub trait Buzzer: Send + Sync {
    /// Sound the buzzer for the given duration.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected.
    async fn beep(&mut self, duration_ms: u64) -> Result<()>;
}

/// Fixed-layout text display abstraction.
///
/// Mirrors the small OLED panel call sequence: callers clear the buffer,
/// position the cursor, write text blocks at a chosen size, then flush the
/// whole frame to the panel. The display retains nothing between frames.
pub trait Display: Send + Sync {
    /// Clear the frame buffer.
    fn clear(&mut self);

    /// Move the text cursor to a pixel position.
    fn set_cursor(&mut self, x: u8, y: u8);

    /// Set the text scale for subsequent writes (1 = 6x8 px glyphs).
    fn set_text_size(&mut self, size: u8);

    /// Write one line of text at the cursor and advance to the next line.
    fn write_line(&mut self, text: &str);

    /// Push the frame buffer to the panel.
    fn flush(&mut self);
}
