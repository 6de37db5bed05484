//! Mock buzzer recording every beep for inspection.

use crate::{Result, traits::Buzzer};
use std::sync::{Arc, Mutex};

/// Mock buzzer that records beep durations instead of making noise.
///
/// Unlike the real peripheral, beeping does not block; the point of the mock
/// is to assert that feedback happened, not to reproduce its timing.
#[derive(Debug)]
pub struct MockBuzzer {
    beeps: Arc<Mutex<Vec<u64>>>,
}

impl MockBuzzer {
    /// Create a new silent buzzer and its inspection handle.
    pub fn new() -> (Self, MockBuzzerHandle) {
        let beeps = Arc::new(Mutex::new(Vec::new()));
        let buzzer = Self {
            beeps: Arc::clone(&beeps),
        };
        (buzzer, MockBuzzerHandle { beeps })
    }
}

impl Buzzer for MockBuzzer {
    async fn beep(&mut self, duration_ms: u64) -> Result<()> {
        self.beeps
            .lock()
            .expect("buzzer log poisoned")
            .push(duration_ms);
        Ok(())
    }
}

/// Handle for inspecting a [`MockBuzzer`].
#[derive(Debug, Clone)]
pub struct MockBuzzerHandle {
    beeps: Arc<Mutex<Vec<u64>>>,
}

impl MockBuzzerHandle {
    /// All beep durations, oldest first.
    pub fn beeps(&self) -> Vec<u64> {
        self.beeps.lock().expect("buzzer log poisoned").clone()
    }

    /// Number of beeps sounded so far.
    pub fn beep_count(&self) -> usize {
        self.beeps.lock().expect("buzzer log poisoned").len()
    }
}
