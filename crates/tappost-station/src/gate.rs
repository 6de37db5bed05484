//! Repeated-read suppression for the card reader.
//!
//! A card resting on the antenna is re-reported every few loop iterations.
//! The gate remembers the last accepted UID and its acceptance time; an
//! identical UID inside the cooldown window is discarded without dispatch.

use std::time::Duration;
use tappost_core::CardUid;
use tokio::time::Instant;

/// Cooldown gate over consecutive card reads.
#[derive(Debug)]
pub struct CardGate {
    cooldown: Duration,
    last: Option<(CardUid, Instant)>,
}

impl CardGate {
    /// Create a gate with the given cooldown window.
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last: None,
        }
    }

    /// Decide whether a read should be dispatched.
    ///
    /// Returns `false` when `uid` matches the previously accepted UID and
    /// less than the cooldown has elapsed since that acceptance. Otherwise
    /// the read is admitted and becomes the new last-accepted entry — a
    /// different card is always admitted immediately.
    pub fn admit(&mut self, uid: &CardUid, now: Instant) -> bool {
        if let Some((last_uid, accepted_at)) = &self.last
            && last_uid == uid
            && now.saturating_duration_since(*accepted_at) < self.cooldown
        {
            return false;
        }

        self.last = Some((uid.clone(), now));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_millis(2000);

    fn uid(bytes: &[u8]) -> CardUid {
        CardUid::from_bytes(bytes).unwrap()
    }

    #[test]
    fn test_first_read_admitted() {
        let mut gate = CardGate::new(COOLDOWN);
        assert!(gate.admit(&uid(&[1, 2, 3, 4]), Instant::now()));
    }

    #[test]
    fn test_same_uid_inside_window_suppressed() {
        let mut gate = CardGate::new(COOLDOWN);
        let t0 = Instant::now();

        assert!(gate.admit(&uid(&[1, 2, 3, 4]), t0));
        assert!(!gate.admit(&uid(&[1, 2, 3, 4]), t0 + Duration::from_millis(1999)));
    }

    #[test]
    fn test_same_uid_at_window_boundary_admitted() {
        let mut gate = CardGate::new(COOLDOWN);
        let t0 = Instant::now();

        assert!(gate.admit(&uid(&[1, 2, 3, 4]), t0));
        assert!(gate.admit(&uid(&[1, 2, 3, 4]), t0 + Duration::from_millis(2000)));
    }

    #[test]
    fn test_different_uid_admitted_immediately() {
        let mut gate = CardGate::new(COOLDOWN);
        let t0 = Instant::now();

        assert!(gate.admit(&uid(&[1, 2, 3, 4]), t0));
        assert!(gate.admit(&uid(&[5, 6, 7, 8]), t0 + Duration::from_millis(10)));
    }

    #[test]
    fn test_admission_refreshes_window() {
        let mut gate = CardGate::new(COOLDOWN);
        let t0 = Instant::now();

        assert!(gate.admit(&uid(&[1, 2, 3, 4]), t0));
        // Admitted again after the window...
        assert!(gate.admit(&uid(&[1, 2, 3, 4]), t0 + Duration::from_millis(2500)));
        // ...which restarts the cooldown from the second acceptance
        assert!(!gate.admit(&uid(&[1, 2, 3, 4]), t0 + Duration::from_millis(4000)));
    }

    #[test]
    fn test_suppressed_read_does_not_refresh_window() {
        let mut gate = CardGate::new(COOLDOWN);
        let t0 = Instant::now();

        assert!(gate.admit(&uid(&[1, 2, 3, 4]), t0));
        assert!(!gate.admit(&uid(&[1, 2, 3, 4]), t0 + Duration::from_millis(1500)));
        // Window still keys off the original acceptance at t0
        assert!(gate.admit(&uid(&[1, 2, 3, 4]), t0 + Duration::from_millis(2100)));
    }
}
