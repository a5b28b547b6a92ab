//! Transient scroll energy for the speed indicator.
//!
//! Each wheel event sets the energy to that event's scroll speed and
//! (re)schedules a decay deadline. Once the deadline passes without a new
//! wheel event, the energy drops to zero. Rescheduling replaces the
//! previous deadline, so a burst of wheel events keeps the indicator lit
//! until the burst ends. The value never gates motion.

use web_time::{Duration, Instant};

use crate::options::MotionOptions;

/// Decaying scroll speed with a debounce deadline.
#[derive(Debug, Clone)]
pub struct ScrollEnergy {
    speed: f32,
    max_speed: f32,
    decay_after: Duration,
    deadline: Option<Instant>,
}

impl ScrollEnergy {
    /// Create an idle energy tracker.
    #[must_use]
    pub fn new(max_speed: f32, decay_after: Duration) -> Self {
        Self {
            speed: 0.0,
            max_speed,
            decay_after,
            deadline: None,
        }
    }

    /// Create from motion options (`max_scroll_speed`, `energy_decay_ms`).
    #[must_use]
    pub fn from_options(motion: &MotionOptions) -> Self {
        Self::new(
            motion.max_scroll_speed,
            Duration::from_millis(motion.energy_decay_ms),
        )
    }

    /// Record a wheel event: set the energy and reschedule the decay.
    pub fn excite(&mut self, speed: f32, now: Instant) {
        self.speed = speed.max(0.0);
        self.deadline = Some(now + self.decay_after);
    }

    /// Drop the energy to zero if the decay deadline has passed. Returns
    /// `true` when the energy changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    /// Drop the energy immediately and cancel any pending decay.
    pub fn clear(&mut self) {
        self.speed = 0.0;
        self.deadline = None;
    }

    /// Current scroll speed.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Indicator fill on a 0–100 scale.
    #[must_use]
    pub fn percentage(&self) -> f32 {
        indicator_percentage(self.speed, self.max_speed)
    }

    /// Indicator value rounded for an ARIA `valuenow` attribute.
    #[must_use]
    pub fn aria_value(&self) -> u8 {
        self.percentage().round() as u8
    }
}

/// `min(100, speed / max_speed * 100)`, zero when `max_speed` is not
/// positive.
#[must_use]
pub fn indicator_percentage(speed: f32, max_speed: f32) -> f32 {
    if max_speed <= 0.0 {
        return 0.0;
    }
    (speed / max_speed * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn energy() -> ScrollEnergy {
        ScrollEnergy::from_options(&MotionOptions::default())
    }

    #[test]
    fn decays_after_deadline() {
        let mut e = energy();
        let t0 = Instant::now();
        e.excite(2.5, t0);
        assert_eq!(e.percentage(), 50.0);
        assert_eq!(e.aria_value(), 50);
        assert!(!e.poll(t0 + Duration::from_millis(149)));
        assert_eq!(e.speed(), 2.5);
        assert!(e.poll(t0 + Duration::from_millis(150)));
        assert_eq!(e.speed(), 0.0);
        assert!(!e.poll(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn new_event_reschedules_decay() {
        let mut e = energy();
        let t0 = Instant::now();
        e.excite(1.0, t0);
        e.excite(4.0, t0 + Duration::from_millis(100));
        // The first deadline (t0 + 150ms) no longer applies
        assert!(!e.poll(t0 + Duration::from_millis(200)));
        assert_eq!(e.speed(), 4.0);
        assert!(e.poll(t0 + Duration::from_millis(250)));
        assert_eq!(e.speed(), 0.0);
    }

    #[test]
    fn idle_poll_is_a_no_op() {
        let mut e = energy();
        assert!(!e.poll(Instant::now()));
        assert_eq!(e.aria_value(), 0);
    }

    #[test]
    fn percentage_is_capped() {
        assert_eq!(indicator_percentage(5.0, 5.0), 100.0);
        assert_eq!(indicator_percentage(9.0, 5.0), 100.0);
        assert_eq!(indicator_percentage(1.0, 5.0), 20.0);
        assert_eq!(indicator_percentage(1.0, 0.0), 0.0);
    }
}
