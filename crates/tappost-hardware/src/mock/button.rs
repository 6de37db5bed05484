//! Mock momentary push button.

use crate::{Result, traits::Button};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Mock button whose level is set through its handle.
///
/// The handle and the device share one level flag, so a `press()` is visible
/// to the very next [`is_pressed`](Button::is_pressed) sample — the same
/// semantics as a GPIO pin read.
///
/// # Examples
///
/// ```
/// use tappost_hardware::mock::MockButton;
/// use tappost_hardware::traits::Button;
///
/// #[tokio::main]
/// async fn main() -> tappost_hardware::Result<()> {
///     let (mut button, handle) = MockButton::new();
///     assert!(!button.is_pressed().await?);
///
///     handle.press();
///     assert!(button.is_pressed().await?);
///
///     handle.release();
///     assert!(!button.is_pressed().await?);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockButton {
    level: Arc<AtomicBool>,
}

impl MockButton {
    /// Create a new released button and its controlling handle.
    pub fn new() -> (Self, MockButtonHandle) {
        let level = Arc::new(AtomicBool::new(false));
        let button = Self {
            level: Arc::clone(&level),
        };
        (button, MockButtonHandle { level })
    }
}

impl Button for MockButton {
    async fn is_pressed(&mut self) -> Result<bool> {
        Ok(self.level.load(Ordering::SeqCst))
    }
}

/// Handle for driving a [`MockButton`].
#[derive(Debug, Clone)]
pub struct MockButtonHandle {
    level: Arc<AtomicBool>,
}

impl MockButtonHandle {
    /// Hold the button down.
    pub fn press(&self) {
        self.level.store(true, Ordering::SeqCst);
    }

    /// Let the button go.
    pub fn release(&self) {
        self.level.store(false, Ordering::SeqCst);
    }

    /// Current level, as the station would sample it.
    pub fn is_pressed(&self) -> bool {
        self.level.load(Ordering::SeqCst)
    }
}
