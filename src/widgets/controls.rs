//! Transport controls overlay - ephemeral prev/pause/next affordances.
//!
//! Revealed by pointer activity and by every navigation press, auto-hidden
//! 3.2s after the last reveal. Purely presentational: clicks come back as
//! [`ControlsAction`] values for the app to route into the scheduler, the
//! overlay itself never touches slide state.

use eframe::egui::{self, Align2, Color32, Vec2};
use std::time::{Duration, Instant};

/// How long the controls stay up after the last pointer activity.
const HIDE_AFTER: Duration = Duration::from_millis(3_200);

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlsAction {
    Previous,
    Next,
    TogglePause,
}

/// Visibility state: a single hide deadline, pushed forward on every reveal.
#[derive(Debug, Default)]
pub struct ControlsOverlay {
    visible_until: Option<Instant>,
}

impl ControlsOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the controls and restart the hide timer.
    pub fn reveal(&mut self, now: Instant) {
        self.visible_until = Some(now + HIDE_AFTER);
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        self.visible_until.is_some_and(|until| now < until)
    }

    /// Paint the overlay if visible. Button presses re-reveal and surface as
    /// actions.
    pub fn ui(
        &mut self,
        ctx: &egui::Context,
        paused: bool,
        now: Instant,
    ) -> Option<ControlsAction> {
        if !self.is_visible(now) {
            return None;
        }

        let mut action = None;
        egui::Area::new(egui::Id::new("controls_overlay"))
            .anchor(Align2::CENTER_BOTTOM, Vec2::new(0.0, -32.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(Color32::from_black_alpha(180))
                    .corner_radius(egui::CornerRadius::same(24))
                    .inner_margin(egui::Margin::symmetric(18, 10))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            if ui.button("\u{23ee}").on_hover_text("Previous").clicked() {
                                action = Some(ControlsAction::Previous);
                            }
                            let pause_icon = if paused { "\u{25b6}" } else { "\u{23f8}" };
                            let pause_hint = if paused { "Resume" } else { "Pause" };
                            if ui.button(pause_icon).on_hover_text(pause_hint).clicked() {
                                action = Some(ControlsAction::TogglePause);
                            }
                            if ui.button("\u{23ed}").on_hover_text("Next").clicked() {
                                action = Some(ControlsAction::Next);
                            }
                        });
                    });
            });

        if action.is_some() {
            self.reveal(now);
        }
        action
    }
}
