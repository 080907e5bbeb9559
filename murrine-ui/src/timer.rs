//! One-shot cancellable timers.
//!
//! The minimum-interaction timer behind slider value indicators needs three
//! guarantees: it fires at most once, cancellation always wins over a pending
//! fire, and scheduled durations stretch under the global time dilation used
//! for debug slow-motion.

use std::{sync::OnceLock, time::Duration};

use parking_lot::RwLock;

static TIME_DILATION: OnceLock<RwLock<f32>> = OnceLock::new();

fn dilation_lock() -> &'static RwLock<f32> {
    TIME_DILATION.get_or_init(|| RwLock::new(1.0))
}

/// The current global time dilation factor. 1.0 means real time.
pub fn time_dilation() -> f32 {
    *dilation_lock().read()
}

/// Sets the global time dilation factor. Values above 1.0 slow every
/// scheduled timer down proportionally. Non-positive values are ignored.
pub fn set_time_dilation(factor: f32) {
    if factor > 0.0 {
        *dilation_lock().write() = factor;
    }
}

/// A one-shot timer advanced by the owner's frame clock.
#[derive(Debug, Default, Clone)]
pub struct InteractionTimer {
    remaining: Option<Duration>,
    fired: bool,
}

impl InteractionTimer {
    /// Creates an unarmed timer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer for `duration`, scaled by the global time dilation.
    /// Re-scheduling an armed timer restarts it.
    pub fn schedule(&mut self, duration: Duration) {
        self.remaining = Some(duration.mul_f64(time_dilation() as f64));
        self.fired = false;
    }

    /// Disarms the timer. A cancelled timer never reports a fire.
    pub fn cancel(&mut self) {
        self.remaining = None;
        self.fired = false;
    }

    /// Whether the timer is armed and has not fired yet.
    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// Whether the timer has fired since it was last scheduled.
    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Advances the timer by `dt`. Returns `true` exactly once, on the
    /// advance that crosses the deadline.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(remaining) = self.remaining else {
            return false;
        };
        if dt >= remaining {
            self.remaining = None;
            self.fired = true;
            true
        } else {
            self.remaining = Some(remaining - dt);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once() {
        let mut timer = InteractionTimer::new();
        timer.schedule(Duration::from_millis(500));
        assert!(!timer.advance(Duration::from_millis(499)));
        assert!(timer.advance(Duration::from_millis(1)));
        assert!(!timer.advance(Duration::from_millis(100)));
        assert!(timer.has_fired());
    }

    #[test]
    fn test_cancel_wins() {
        let mut timer = InteractionTimer::new();
        timer.schedule(Duration::from_millis(10));
        timer.cancel();
        assert!(!timer.advance(Duration::from_millis(100)));
        assert!(!timer.has_fired());
    }

    #[test]
    fn test_reschedule_restarts() {
        let mut timer = InteractionTimer::new();
        timer.schedule(Duration::from_millis(100));
        timer.advance(Duration::from_millis(90));
        timer.schedule(Duration::from_millis(100));
        assert!(!timer.advance(Duration::from_millis(90)));
        assert!(timer.advance(Duration::from_millis(10)));
    }
}
