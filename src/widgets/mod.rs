//! Presentation layer: layout resolution and egui painting.

pub mod ad_zone;
pub mod controls;
pub mod layout;
pub mod markdown;
pub mod slide;

pub use controls::{ControlsAction, ControlsOverlay};
pub use layout::{resolve_layout, SlideLayout};
