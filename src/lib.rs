//! VITRINE - Venue signage rotation engine
//!
//! Re-exports all modules for use by binary targets.

// Core engine (scheduler, transitions, ads, assets)
pub mod core;

// App modules
pub mod app;
pub mod cli;
pub mod config;
pub mod deck;
pub mod widgets;

// Re-export commonly used types from core
pub use core::{AdZone, AssetStore, ImagePreloader, RotationScheduler};

// Re-export the data model
pub use config::{EngineConfig, TransitionStrategy};
pub use deck::{AdCreative, Deck, SlideContent, SlideItem, SlideSource};
