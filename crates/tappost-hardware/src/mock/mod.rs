//! Mock peripheral implementations for testing and development.
//!
//! Each mock comes as a `(device, handle)` pair: the device half implements
//! the peripheral trait and is owned by the station, while the handle half
//! stays with the test (or the emulator console) and drives the device —
//! presenting cards, pressing buttons, inspecting rendered frames.

mod button;
mod buzzer;
mod display;
mod reader;

pub use button::{MockButton, MockButtonHandle};
pub use buzzer::{MockBuzzer, MockBuzzerHandle};
pub use display::{Frame, MockDisplay, MockDisplayHandle};
pub use reader::{MockCardReader, MockCardReaderHandle};
