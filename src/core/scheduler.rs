//! Rotation scheduler - the single serialization point for slide advancement.
//!
//! Owns the current index, the pause flag, the in-flight transition and the
//! one armed advance deadline. Automatic advance, manual navigation and
//! pause/resume all route through here, so at most one "advance in progress"
//! can exist and a navigation issued mid-transition is dropped, not queued.
//!
//! Timing model: `tick(now)` is called once per repaint (like a player
//! `update()` at 60 Hz); timers are deadline fields checked against `now`,
//! not OS timers. A slide occupies exactly `slide` of wall time including its
//! outgoing transition, so the advance deadline is armed at
//! `slide - transition` after the slide becomes current.
//!
//! The epoch counter increments on every deck replacement; anything holding
//! per-session state (preloads, failed images) keys off it to drop stale work.

use log::{debug, info, trace};
use std::time::{Duration, Instant};

use crate::core::transition::Transition;

/// Slide rotation state machine.
#[derive(Debug)]
pub struct RotationScheduler {
    len: usize,
    current: usize,
    paused: bool,
    slide: Duration,
    transition_len: Duration,
    /// Remainder-preserving resume is opt-in; the default reproduces the
    /// historical behavior of restarting a full slide timer on resume.
    resume_with_remainder: bool,
    /// Leftover slide time captured at pause (remainder mode only).
    remaining: Option<Duration>,
    /// When the next automatic transition begins. `None` while paused,
    /// transitioning, or when there is nothing to rotate.
    deadline: Option<Instant>,
    transition: Option<Transition>,
    epoch: u64,
}

impl RotationScheduler {
    pub fn new(
        len: usize,
        slide: Duration,
        transition_len: Duration,
        resume_with_remainder: bool,
        now: Instant,
    ) -> Self {
        let mut scheduler = Self {
            len,
            current: 0,
            paused: false,
            slide,
            transition_len,
            resume_with_remainder,
            remaining: None,
            deadline: None,
            transition: None,
            epoch: 0,
        };
        scheduler.arm(now);
        scheduler
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Session epoch, bumped on every deck replacement.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Next automatic transition start, if one is armed. Diagnostic surface.
    pub fn next_advance(&self) -> Option<Instant> {
        self.deadline
    }

    /// Advance the state machine. Returns true when the current index
    /// committed to a new value during this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        if let Some(t) = self.transition {
            if t.is_complete(now) {
                self.current = t.to;
                self.transition = None;
                debug!("transition committed: slide {} -> {}", t.from, t.to);
                self.arm(now);
                return true;
            }
            return false;
        }

        if self.paused {
            return false;
        }

        if let Some(deadline) = self.deadline {
            if now >= deadline {
                let to = (self.current + 1) % self.len;
                return self.start_transition(to, now);
            }
        }
        false
    }

    /// Manual navigation to an arbitrary slide. No-op while a transition is
    /// in flight, when already on `target`, or when `target` is out of range.
    pub fn go_to_slide(&mut self, target: usize, now: Instant) -> bool {
        if self.len == 0 || self.transition.is_some() {
            trace!("navigation to {} dropped (transitioning or empty)", target);
            return false;
        }
        if target == self.current || target >= self.len {
            return false;
        }
        self.deadline = None;
        self.start_transition(target, now);
        true
    }

    pub fn go_to_next(&mut self, now: Instant) -> bool {
        if self.len == 0 {
            return false;
        }
        self.go_to_slide((self.current + 1) % self.len, now)
    }

    pub fn go_to_previous(&mut self, now: Instant) -> bool {
        if self.len == 0 {
            return false;
        }
        self.go_to_slide((self.current + self.len - 1) % self.len, now)
    }

    /// Pause or resume automatic rotation. Pausing suspends scheduling of the
    /// next advance; an in-flight transition still completes. Resuming arms a
    /// fresh full-duration timer unless remainder mode is on.
    pub fn set_paused(&mut self, paused: bool, now: Instant) {
        if paused == self.paused {
            return;
        }
        if paused {
            self.paused = true;
            if self.resume_with_remainder {
                self.remaining = self.deadline.map(|d| d.saturating_duration_since(now));
            }
            self.deadline = None;
            debug!("paused on slide {}", self.current);
        } else {
            self.paused = false;
            if self.transition.is_none() {
                match self.remaining.take() {
                    Some(rest) if self.resume_with_remainder => {
                        self.deadline = (self.len >= 2).then(|| now + rest);
                    }
                    _ => self.arm(now),
                }
            }
            debug!("resumed on slide {}", self.current);
        }
    }

    /// Replace the rotation list. Resets every piece of scheduler state and
    /// bumps the epoch so stale per-session work can be dropped.
    pub fn reset(&mut self, len: usize, now: Instant) {
        self.epoch += 1;
        self.len = len;
        self.current = 0;
        self.paused = false;
        self.transition = None;
        self.remaining = None;
        self.deadline = None;
        self.arm(now);
        info!("scheduler reset: {} slides, epoch {}", len, self.epoch);
    }

    /// Wrap rule: the transition from the last slide back to the first is
    /// instantaneous. Everything else animates.
    fn transition_duration(&self, from: usize, to: usize) -> Duration {
        if self.len > 1 && from == self.len - 1 && to == 0 {
            Duration::ZERO
        } else {
            self.transition_len
        }
    }

    /// Begin a transition to `to`. Instant transitions commit immediately;
    /// animated ones commit in a later `tick`. Returns whether the index
    /// committed during this call.
    fn start_transition(&mut self, to: usize, now: Instant) -> bool {
        self.remaining = None;
        let duration = self.transition_duration(self.current, to);
        if duration.is_zero() {
            debug!("instant transition: slide {} -> {} (wrap)", self.current, to);
            self.current = to;
            self.transition = None;
            self.arm(now);
            true
        } else {
            trace!(
                "transition started: slide {} -> {} over {:?}",
                self.current,
                to,
                duration
            );
            self.transition = Some(Transition::animated(self.current, to, duration, now));
            self.deadline = None;
            false
        }
    }

    /// Arm the automatic advance deadline for the slide that just became
    /// current. The deadline lands at `slide - outgoing transition` so the
    /// slide's total wall time, transition included, equals `slide`.
    fn arm(&mut self, now: Instant) {
        if self.paused || self.len < 2 {
            self.deadline = None;
            return;
        }
        let next = (self.current + 1) % self.len;
        let outgoing = self.transition_duration(self.current, next);
        self.deadline = Some(now + self.slide.saturating_sub(outgoing));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDE: Duration = Duration::from_millis(10_000);
    const TRANSITION: Duration = Duration::from_millis(700);

    fn scheduler(len: usize, t0: Instant) -> RotationScheduler {
        RotationScheduler::new(len, SLIDE, TRANSITION, false, t0)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_auto_advance_timeline() {
        // 3 slides, 10000/700: transition to slide 1 begins at t=9300 and
        // slide 1 is fully current at t=10000 with its own timer armed.
        let t0 = Instant::now();
        let mut s = scheduler(3, t0);
        assert_eq!(s.current_index(), 0);

        assert!(!s.tick(t0 + ms(9_299)));
        assert!(!s.is_transitioning());

        assert!(!s.tick(t0 + ms(9_300)));
        assert!(s.is_transitioning());
        assert_eq!(s.current_index(), 0, "index commits only on completion");

        assert!(!s.tick(t0 + ms(9_999)));
        assert!(s.is_transitioning());

        assert!(s.tick(t0 + ms(10_000)));
        assert_eq!(s.current_index(), 1);
        assert!(!s.is_transitioning());
        assert_eq!(s.next_advance(), Some(t0 + ms(19_300)));
    }

    #[test]
    fn test_index_stays_in_range_over_many_advances() {
        let t0 = Instant::now();
        let mut s = scheduler(4, t0);
        let mut now = t0;
        let mut advances = 0;
        while advances < 11 {
            now += ms(100);
            if s.tick(now) {
                advances += 1;
            }
            assert!(s.current_index() < 4);
        }
        assert_eq!(s.current_index(), 11 % 4);
    }

    #[test]
    fn test_wrap_is_instant() {
        let t0 = Instant::now();
        let mut s = scheduler(2, t0);

        // 0 -> 1 animates.
        assert!(!s.tick(t0 + ms(9_300)));
        assert!(s.is_transitioning());
        assert!(s.tick(t0 + ms(10_000)));
        assert_eq!(s.current_index(), 1);

        // 1 -> 0 is the wrap: no animated phase, the deadline sits at the
        // full slide duration and the commit happens in one tick.
        assert_eq!(s.next_advance(), Some(t0 + ms(20_000)));
        assert!(!s.tick(t0 + ms(19_999)));
        assert!(!s.is_transitioning());
        assert!(s.tick(t0 + ms(20_000)));
        assert_eq!(s.current_index(), 0);
        assert!(!s.is_transitioning());
    }

    #[test]
    fn test_pause_freezes_indefinitely() {
        let t0 = Instant::now();
        let mut s = scheduler(3, t0);
        s.set_paused(true, t0 + ms(1_000));

        assert!(!s.tick(t0 + ms(500_000)));
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.next_advance(), None);
    }

    #[test]
    fn test_resume_restarts_full_timer() {
        let t0 = Instant::now();
        let mut s = scheduler(3, t0);
        s.set_paused(true, t0 + ms(9_000));
        s.set_paused(false, t0 + ms(60_000));

        // No partial credit: fresh slide-minus-transition deadline from the
        // resume point, not the 300ms that remained at pause time.
        assert_eq!(s.next_advance(), Some(t0 + ms(60_000) + ms(9_300)));
    }

    #[test]
    fn test_resume_with_remainder_opt_in() {
        let t0 = Instant::now();
        let mut s = RotationScheduler::new(3, SLIDE, TRANSITION, true, t0);
        s.set_paused(true, t0 + ms(9_000));
        s.set_paused(false, t0 + ms(60_000));

        // 300ms of the original 9300ms deadline remained at pause time.
        assert_eq!(s.next_advance(), Some(t0 + ms(60_300)));
    }

    #[test]
    fn test_navigation_dropped_mid_transition() {
        let t0 = Instant::now();
        let mut s = scheduler(3, t0);
        s.tick(t0 + ms(9_300));
        assert!(s.is_transitioning());

        assert!(!s.go_to_next(t0 + ms(9_400)));
        assert!(!s.go_to_previous(t0 + ms(9_400)));
        assert!(!s.go_to_slide(2, t0 + ms(9_400)));

        assert!(s.tick(t0 + ms(10_000)));
        assert_eq!(s.current_index(), 1, "in-flight transition unchanged");
    }

    #[test]
    fn test_go_to_current_is_noop() {
        let t0 = Instant::now();
        let mut s = scheduler(3, t0);
        let armed = s.next_advance();
        assert!(!s.go_to_slide(0, t0 + ms(1_000)));
        assert_eq!(s.next_advance(), armed, "timer not reset");
        assert!(!s.is_transitioning());
    }

    #[test]
    fn test_manual_navigation_rearms_after_commit() {
        let t0 = Instant::now();
        let mut s = scheduler(3, t0);
        assert!(s.go_to_next(t0 + ms(1_000)));
        assert!(s.is_transitioning());
        assert_eq!(s.next_advance(), None, "auto timer cancelled during nav");

        assert!(s.tick(t0 + ms(1_700)));
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.next_advance(), Some(t0 + ms(1_700) + ms(9_300)));
    }

    #[test]
    fn test_manual_previous_from_zero() {
        let t0 = Instant::now();
        let mut s = scheduler(3, t0);
        assert!(s.go_to_previous(t0));
        assert!(s.is_transitioning(), "0 -> 2 is not the wrap, it animates");
        s.tick(t0 + ms(700));
        assert_eq!(s.current_index(), 2);
    }

    #[test]
    fn test_manual_wrap_is_instant() {
        let t0 = Instant::now();
        let mut s = scheduler(3, t0);
        s.go_to_slide(2, t0);
        s.tick(t0 + ms(700));
        assert_eq!(s.current_index(), 2);

        // Manual next from the last slide takes the instant wrap path too.
        assert!(s.go_to_next(t0 + ms(1_000)));
        assert_eq!(s.current_index(), 0);
        assert!(!s.is_transitioning());
    }

    #[test]
    fn test_empty_and_single_slide_arm_nothing() {
        let t0 = Instant::now();
        let mut empty = scheduler(0, t0);
        assert_eq!(empty.next_advance(), None);
        assert!(!empty.tick(t0 + ms(100_000)));
        assert!(!empty.go_to_next(t0));

        let mut single = scheduler(1, t0);
        assert_eq!(single.next_advance(), None);
        assert!(!single.tick(t0 + ms(100_000)));
        assert!(!single.go_to_next(t0), "target equals current");
        assert_eq!(single.current_index(), 0);
    }

    #[test]
    fn test_reset_bumps_epoch_and_rewinds() {
        let t0 = Instant::now();
        let mut s = scheduler(3, t0);
        s.go_to_slide(2, t0);
        s.tick(t0 + ms(700));
        s.set_paused(true, t0 + ms(800));
        assert_eq!(s.current_index(), 2);

        s.reset(5, t0 + ms(1_000));
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.epoch(), 1);
        assert!(!s.is_paused());
        assert!(!s.is_transitioning());
        assert_eq!(s.next_advance(), Some(t0 + ms(1_000) + ms(9_300)));
    }

    #[test]
    fn test_pause_during_transition_completes_then_holds() {
        let t0 = Instant::now();
        let mut s = scheduler(3, t0);
        s.tick(t0 + ms(9_300));
        assert!(s.is_transitioning());

        s.set_paused(true, t0 + ms(9_400));
        assert!(s.tick(t0 + ms(10_000)), "in-flight transition still commits");
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.next_advance(), None, "but nothing re-arms while paused");
    }
}
