//! Core engine modules - scheduler, transitions, ad rotation, preloading.
//!
//! These modules own all timing and session state, independent of the UI.

pub mod ad_zone;
pub mod assets;
pub mod preloader;
pub mod scheduler;
pub mod transition;

// Re-exports for convenience
pub use ad_zone::AdZone;
pub use assets::AssetStore;
pub use preloader::ImagePreloader;
pub use scheduler::RotationScheduler;
pub use transition::{ease_in_out_cubic, Transition};
