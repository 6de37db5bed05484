//! Startup failure handling.
//!
//! The station distinguishes two fatal startup outcomes: a peripheral that
//! does not respond (operator must intervene, the device parks forever) and
//! a provisioning timeout (the device restarts itself and tries again). On a
//! hosted target the restart is delegated to the process supervisor via a
//! distinguished exit code.

use std::time::Duration;
use tracing::error;

/// Exit code signalling the supervisor to restart the device process.
pub const RESTART_EXIT_CODE: i32 = 10;

/// Fatal startup errors.
#[derive(Debug, thiserror::Error)]
pub enum BootError {
    /// A peripheral failed to initialize; there is no recovery.
    #[error("hardware initialization failed: {0}")]
    Hardware(#[from] tappost_hardware::HardwareError),

    /// Network provisioning timed out; the device must restart.
    #[error("network provisioning failed, restart required")]
    RestartRequired,
}

/// Park the device forever after an unrecoverable hardware failure.
///
/// Mirrors the firmware's low-power halt loop: nothing short of operator
/// intervention (power cycle) gets the device out of this state.
pub async fn park_forever() -> ! {
    error!("hardware unrecoverable, parking");
    loop {
        tokio::time::sleep(Duration::from_secs(60)).await;
    }
}
