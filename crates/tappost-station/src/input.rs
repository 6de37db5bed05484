//! Button press detection and classification.
//!
//! The control loop samples each button's raw level once per iteration and
//! feeds it through a [`PressTracker`], which derives press/release edges and
//! classifies the hold duration on release. Classification happens only at
//! release, so an arbitrarily long hold is fine.

use std::time::Duration;
use tokio::time::Instant;

/// A completed press, classified by hold duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    /// Held shorter than the long-press threshold.
    Short(Duration),
    /// Held at least the long-press threshold. Suppresses the short action.
    Long(Duration),
}

impl Press {
    /// The measured hold duration.
    #[must_use]
    pub fn duration(&self) -> Duration {
        match self {
            Press::Short(d) | Press::Long(d) => *d,
        }
    }
}

/// Two-state press tracker for one momentary button.
///
/// State is just "pressed since when"; a release edge computes the hold
/// duration and emits the classified [`Press`].
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use tokio::time::Instant;
/// use tappost_station::input::{Press, PressTracker};
///
/// let mut tracker = PressTracker::new(Duration::from_secs(5));
/// let t0 = Instant::now();
///
/// assert_eq!(tracker.sample(true, t0), None); // press edge
/// let press = tracker.sample(false, t0 + Duration::from_millis(300)).unwrap();
/// assert!(matches!(press, Press::Short(_)));
/// ```
#[derive(Debug)]
pub struct PressTracker {
    long_press: Duration,
    pressed_since: Option<Instant>,
}

impl PressTracker {
    /// Create a tracker with the given long-press threshold.
    #[must_use]
    pub fn new(long_press: Duration) -> Self {
        Self {
            long_press,
            pressed_since: None,
        }
    }

    /// Whether the button is currently held.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.pressed_since.is_some()
    }

    /// Feed one sampled level into the tracker.
    ///
    /// Returns a classified [`Press`] on the release edge, `None` otherwise.
    /// Repeated samples at the same level are no-ops.
    pub fn sample(&mut self, pressed: bool, now: Instant) -> Option<Press> {
        match (self.pressed_since, pressed) {
            (None, true) => {
                self.pressed_since = Some(now);
                None
            }
            (Some(since), false) => {
                self.pressed_since = None;
                let held = now.saturating_duration_since(since);
                if held >= self.long_press {
                    Some(Press::Long(held))
                } else {
                    Some(Press::Short(held))
                }
            }
            _ => None,
        }
    }
}
