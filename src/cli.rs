use clap::Parser;
use std::path::PathBuf;

use crate::config::{clamp_transition_ms, EngineConfig, TransitionStrategy};

/// Venue signage player
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the deck JSON file (slides + ad creatives)
    #[arg(value_name = "DECK")]
    pub deck_path: PathBuf,

    /// Time each slide is current, in milliseconds (includes its outgoing transition)
    #[arg(long = "slide-ms", value_name = "MS", default_value_t = crate::config::DEFAULT_SLIDE_MS)]
    pub slide_ms: u64,

    /// Animated transition length in milliseconds (clamped below the slide duration)
    #[arg(long = "transition-ms", value_name = "MS", default_value_t = crate::config::DEFAULT_TRANSITION_MS)]
    pub transition_ms: u64,

    /// Transition strategy
    #[arg(long = "transition", value_enum, default_value = "carousel")]
    pub transition: TransitionStrategy,

    /// Disable the ad overlay entirely
    #[arg(long = "no-ads")]
    pub no_ads: bool,

    /// Fixed ad rotation interval in milliseconds (default: randomized 12-15s)
    #[arg(long = "ad-interval-ms", value_name = "MS")]
    pub ad_interval_ms: Option<u64>,

    /// Preserve the remaining slide time across pause/resume (default: resume
    /// restarts a full slide timer, matching the historical behavior)
    #[arg(long = "resume-remainder")]
    pub resume_remainder: bool,

    /// Base directory for relative asset storage keys (default: deck file directory)
    #[arg(long = "asset-root", value_name = "DIR")]
    pub asset_root: Option<PathBuf>,

    /// Start in fullscreen mode
    #[arg(short = 'F', long = "fullscreen")]
    pub fullscreen: bool,

    /// Per-frame diagnostic output of index/state/timers (no behavioral effect)
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

impl Args {
    /// Fold CLI flags into a validated engine configuration.
    pub fn engine_config(&self) -> EngineConfig {
        let asset_root = self.asset_root.clone().unwrap_or_else(|| {
            self.deck_path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."))
        });
        EngineConfig {
            slide_ms: self.slide_ms,
            transition_ms: clamp_transition_ms(self.slide_ms, self.transition_ms),
            strategy: self.transition,
            ads_enabled: !self.no_ads,
            ad_interval_ms: self.ad_interval_ms,
            resume_with_remainder: self.resume_remainder,
            debug: self.debug,
            asset_root,
        }
    }
}
