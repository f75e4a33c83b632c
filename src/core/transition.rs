//! Transition timing: the interpolation clock between an outgoing and an
//! incoming slide.
//!
//! One controller serves both visual strategies (crossfade tint, carousel
//! translation); the strategy only changes how the widget layer maps
//! `progress()` onto paint state. Wrap transitions (last slide back to the
//! first) carry zero duration so the reset is a single instant reposition
//! with no visual sweep.

use std::time::{Duration, Instant};

/// Ease-in-out cubic: `t<0.5 ? 4t^3 : 1-(-2t+2)^3/2`.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// One in-flight transition between two slide indices.
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    started: Instant,
    duration: Duration,
}

impl Transition {
    /// Start an animated transition.
    pub fn animated(from: usize, to: usize, duration: Duration, now: Instant) -> Self {
        Self {
            from,
            to,
            started: now,
            duration,
        }
    }

    /// Start an instant transition (wrap). Complete on first observation.
    pub fn instant(from: usize, to: usize, now: Instant) -> Self {
        Self {
            from,
            to,
            started: now,
            duration: Duration::ZERO,
        }
    }

    pub fn is_instant(&self) -> bool {
        self.duration.is_zero()
    }

    /// Raw wall-clock progress in `[0,1]`.
    pub fn raw_progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Eased progress in `[0,1]`, what the widget layer paints from.
    pub fn progress(&self, now: Instant) -> f32 {
        ease_in_out_cubic(self.raw_progress(now))
    }

    /// Whether the transition has run its full duration. The scheduler
    /// commits `current = to` exactly once, when this first returns true.
    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-6);
        // Out-of-range inputs are clamped, not extrapolated.
        assert_eq!(ease_in_out_cubic(-1.0), 0.0);
        assert_eq!(ease_in_out_cubic(2.0), 1.0);
    }

    #[test]
    fn test_easing_is_slow_at_edges() {
        assert!(ease_in_out_cubic(0.1) < 0.1);
        assert!(ease_in_out_cubic(0.9) > 0.9);
        assert!((ease_in_out_cubic(0.25) - 0.0625).abs() < 1e-6);
    }

    #[test]
    fn test_animated_progress_over_time() {
        let t0 = Instant::now();
        let t = Transition::animated(0, 1, Duration::from_millis(700), t0);
        assert_eq!(t.raw_progress(t0), 0.0);
        assert!(!t.is_complete(t0));

        let mid = t0 + Duration::from_millis(350);
        assert!((t.raw_progress(mid) - 0.5).abs() < 1e-3);
        assert!(!t.is_complete(mid));

        let end = t0 + Duration::from_millis(700);
        assert_eq!(t.raw_progress(end), 1.0);
        assert!(t.is_complete(end));
    }

    #[test]
    fn test_instant_transition_completes_immediately() {
        let t0 = Instant::now();
        let t = Transition::instant(2, 0, t0);
        assert!(t.is_instant());
        assert!(t.is_complete(t0));
        assert_eq!(t.progress(t0), 1.0);
    }
}
