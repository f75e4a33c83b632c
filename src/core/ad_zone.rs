//! Ad overlay rotation - an independent, lower-frequency cycle of ad
//! creatives shown on top of qualifying slides.
//!
//! Runs its own timer, decoupled from slide rotation. The step interval is
//! re-randomized inside a 12-15s window on every change unless a fixed
//! interval is configured. While the engine sits on an ad slide or a content
//! slide the zone is ineligible: nothing is shown and the timer is suspended,
//! so the visible creative never changes mid-ineligibility.
//!
//! The RNG is injected (seedable) so tests can pin the interval sequence.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

use crate::deck::{AdCreative, SlideContent};

/// Randomized interval window: `floor(random()*3000) + 12000` ms.
const INTERVAL_BASE_MS: u64 = 12_000;
const INTERVAL_JITTER_MS: u64 = 3_000;

/// Independent overlay rotation of ad creatives.
#[derive(Debug)]
pub struct AdZone {
    ads: Vec<AdCreative>,
    enabled: bool,
    /// Fixed step interval; `None` re-randomizes every step.
    fixed_interval: Option<Duration>,
    index: usize,
    /// Next creative change. `None` while suspended (ineligible slide,
    /// single-ad list, or disabled).
    next_change: Option<Instant>,
    rng: StdRng,
}

impl AdZone {
    /// Build the zone from the deck's creative list. Inactive creatives are
    /// dropped up front; the rotation only ever sees live ones.
    pub fn new(
        ads: &[AdCreative],
        enabled: bool,
        fixed_interval_ms: Option<u64>,
        seed: Option<u64>,
    ) -> Self {
        let live: Vec<AdCreative> = ads.iter().filter(|a| a.active).cloned().collect();
        if live.len() != ads.len() {
            info!("ad zone: {} of {} creatives active", live.len(), ads.len());
        }
        Self {
            ads: live,
            enabled,
            fixed_interval: fixed_interval_ms.map(Duration::from_millis),
            index: 0,
            next_change: None,
            rng: seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64),
        }
    }

    /// Whether the overlay shows on this slide at all.
    pub fn eligible(&self, slide: &SlideContent) -> bool {
        self.enabled && !self.ads.is_empty() && !slide.is_ad && !slide.is_content_slide
    }

    /// The creative currently on display (when eligible).
    pub fn current(&self) -> Option<&AdCreative> {
        self.ads.get(self.index)
    }

    /// Drive the rotation. `eligible` is the current slide's verdict from
    /// [`AdZone::eligible`]. Returns true when the visible creative changed.
    pub fn tick(&mut self, eligible: bool, now: Instant) -> bool {
        if !eligible {
            // Suspend rather than letting a deadline fire on an ad slide.
            self.next_change = None;
            return false;
        }
        if self.ads.len() <= 1 {
            // Single creative renders statically, no timer armed.
            return false;
        }
        match self.next_change {
            None => {
                self.next_change = Some(now + self.roll_interval());
                false
            }
            Some(deadline) if now >= deadline => {
                self.index = (self.index + 1) % self.ads.len();
                self.next_change = Some(now + self.roll_interval());
                debug!("ad zone advanced to creative {}", self.index);
                true
            }
            Some(_) => false,
        }
    }

    /// Replace the creative list (deck replacement). Keeps the RNG; rewinds
    /// the rotation and drops any armed timer.
    pub fn reset(&mut self, ads: &[AdCreative]) {
        let live: Vec<AdCreative> = ads.iter().filter(|a| a.active).cloned().collect();
        if live.len() != ads.len() {
            info!("ad zone: {} of {} creatives active", live.len(), ads.len());
        }
        self.ads = live;
        self.index = 0;
        self.next_change = None;
    }

    fn roll_interval(&mut self) -> Duration {
        match self.fixed_interval {
            Some(fixed) => fixed,
            None => {
                let jitter = self.rng.random_range(0..INTERVAL_JITTER_MS);
                Duration::from_millis(INTERVAL_BASE_MS + jitter)
            }
        }
    }

    /// Next creative change, if a timer is armed. Diagnostic surface.
    pub fn next_change(&self) -> Option<Instant> {
        self.next_change
    }
}
