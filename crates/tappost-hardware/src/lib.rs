//! Peripheral abstraction for the badge station.
//!
//! This crate defines the trait seams between the station control loop and
//! its peripherals (contactless card reader, momentary buttons, buzzer, OLED
//! display), along with mock implementations that can be driven
//! programmatically for development and testing without physical hardware.

pub mod devices;
pub mod error;
pub mod mock;
pub mod traits;

pub use devices::{AnyButton, AnyBuzzer, AnyCardReader, AnyDisplay};
pub use error::{HardwareError, Result};
pub use traits::{Button, Buzzer, CardRead, CardReader, Display};
