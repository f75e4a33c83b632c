//! Engine configuration: timing defaults, transition strategy, clamping rules.
//!
//! All timing invariants live here so the scheduler can assume a sane config.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default time a slide stays current, including its outgoing transition.
pub const DEFAULT_SLIDE_MS: u64 = 10_000;
/// Default animated transition length.
pub const DEFAULT_TRANSITION_MS: u64 = 700;
/// Minimum gap that must remain between transition and slide duration.
const TRANSITION_HEADROOM_MS: u64 = 200;

/// Visual transition strategy. One strategy per deployment, never per slide.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "camelCase")]
pub enum TransitionStrategy {
    /// Outgoing and incoming slides stacked, opacity-interpolated.
    Crossfade,
    /// All slides in a row, the row translates. Canonical default: one moving
    /// layer, and the wrap-to-start reset is a plain instant reposition.
    #[default]
    Carousel,
}

/// Resolved engine configuration, derived from CLI args.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub slide_ms: u64,
    /// Already clamped; always `< slide_ms - 200` headroom (or the quarter
    /// fallback for pathological slide durations).
    pub transition_ms: u64,
    pub strategy: TransitionStrategy,
    pub ads_enabled: bool,
    /// Fixed ad rotation interval; `None` means the randomized 12-15s window.
    pub ad_interval_ms: Option<u64>,
    /// Resume policy for pause: the observed upstream behavior restarts a
    /// full slide timer on resume. Opt in to remainder-preserving resume.
    pub resume_with_remainder: bool,
    pub debug: bool,
    /// Base directory for relative asset storage keys.
    pub asset_root: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            slide_ms: DEFAULT_SLIDE_MS,
            transition_ms: DEFAULT_TRANSITION_MS,
            strategy: TransitionStrategy::default(),
            ads_enabled: true,
            ad_interval_ms: None,
            resume_with_remainder: false,
            debug: false,
            asset_root: PathBuf::from("."),
        }
    }
}

impl EngineConfig {
    pub fn slide_duration(&self) -> Duration {
        Duration::from_millis(self.slide_ms)
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }
}

/// Clamp a caller-supplied transition duration so a transition always ends
/// well before the slide it belongs to. Never clamps to zero: a config that
/// leaves no headroom falls back to a quarter of the slide duration.
pub fn clamp_transition_ms(slide_ms: u64, transition_ms: u64) -> u64 {
    let cap = slide_ms.saturating_sub(TRANSITION_HEADROOM_MS);
    if cap == 0 {
        return (slide_ms / 4).max(1);
    }
    let clamped = transition_ms.min(cap).max(1);
    if clamped != transition_ms {
        log::warn!(
            "transition {}ms invalid for slide {}ms, clamped to {}ms",
            transition_ms,
            slide_ms,
            clamped
        );
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(
            clamp_transition_ms(DEFAULT_SLIDE_MS, DEFAULT_TRANSITION_MS),
            DEFAULT_TRANSITION_MS
        );
    }

    #[test]
    fn test_clamp_oversized_transition() {
        // transition >= slide duration gets pulled under the headroom cap
        assert_eq!(clamp_transition_ms(1000, 1000), 800);
        assert_eq!(clamp_transition_ms(1000, 5000), 800);
        assert_eq!(clamp_transition_ms(1000, 900), 800);
    }

    #[test]
    fn test_clamp_never_zero() {
        // slide shorter than the headroom: quarter fallback, floor of 1ms
        assert_eq!(clamp_transition_ms(200, 700), 50);
        assert_eq!(clamp_transition_ms(100, 50), 25);
        assert_eq!(clamp_transition_ms(3, 1), 1);
        assert!(clamp_transition_ms(1, 0) >= 1);
    }

    #[test]
    fn test_clamp_passthrough() {
        assert_eq!(clamp_transition_ms(10_000, 300), 300);
    }
}
