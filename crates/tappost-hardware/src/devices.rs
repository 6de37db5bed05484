//! Enum wrappers for peripheral dispatch.
//!
//! Native `async fn` in traits (Edition 2024 RPITIT) are not object-safe, so
//! `Box<dyn CardReader>` is not an option. These enums provide concrete type
//! dispatch instead: zero-cost, type-safe, and open to real hardware variants
//! behind feature flags later.

use crate::mock::{MockButton, MockBuzzer, MockCardReader, MockDisplay};
use crate::traits::{Button, Buzzer, CardRead, CardReader, Display};
use crate::Result;

/// Enum wrapper for card reader dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyCardReader {
    /// Mock reader for development and testing.
    Mock(MockCardReader),
    // Planned variants once real backends land:
    // - Spi(SpiCardReader) - RC522-style SPI readers
}

impl CardReader for AnyCardReader {
    async fn init(&mut self) -> Result<()> {
        match self {
            Self::Mock(device) => device.init().await,
        }
    }

    async fn poll_card(&mut self) -> Result<Option<CardRead>> {
        match self {
            Self::Mock(device) => device.poll_card().await,
        }
    }

    async fn halt(&mut self) -> Result<()> {
        match self {
            Self::Mock(device) => device.halt().await,
        }
    }
}

/// Enum wrapper for button dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyButton {
    /// Mock button for development and testing.
    Mock(MockButton),
}

impl Button for AnyButton {
    async fn is_pressed(&mut self) -> Result<bool> {
        match self {
            Self::Mock(device) => device.is_pressed().await,
        }
    }
}

/// Enum wrapper for buzzer dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyBuzzer {
    /// Mock buzzer for development and testing.
    Mock(MockBuzzer),
}

impl Buzzer for AnyBuzzer {
    async fn beep(&mut self, duration_ms: u64) -> Result<()> {
        match self {
            Self::Mock(device) => device.beep(duration_ms).await,
        }
    }
}

/// Enum wrapper for display dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyDisplay {
    /// Mock display for development and testing.
    Mock(MockDisplay),
}

impl Display for AnyDisplay {
    fn clear(&mut self) {
        match self {
            Self::Mock(device) => device.clear(),
        }
    }

    fn set_cursor(&mut self, x: u8, y: u8) {
        match self {
            Self::Mock(device) => device.set_cursor(x, y),
        }
    }

    fn set_text_size(&mut self, size: u8) {
        match self {
            Self::Mock(device) => device.set_text_size(size),
        }
    }

    fn write_line(&mut self, text: &str) {
        match self {
            Self::Mock(device) => device.write_line(text),
        }
    }

    fn flush(&mut self) {
        match self {
            Self::Mock(device) => device.flush(),
        }
    }
}
