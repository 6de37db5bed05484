//! Badge station firmware core.
//!
//! Wires the peripherals, the backend client and the mode state machine into
//! one cooperative control loop: poll buttons, poll the card reader, gate
//! repeated reads, dispatch the card to the active mode's handler, render the
//! result. Everything runs on a single task; waits are sequential delays
//! during which no input is serviced.

pub mod boot;
pub mod config;
pub mod flow;
pub mod gate;
pub mod input;
pub mod screen;
pub mod station;

pub use boot::{BootError, RESTART_EXIT_CODE};
pub use config::StationConfig;
pub use flow::{AttendanceFlow, AttendanceState};
pub use station::{Peripherals, Station};
