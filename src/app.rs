//! Application shell - composes the engine on eframe's repaint loop.
//!
//! Every frame: drain finished asset loads, route input, tick the scheduler
//! and ad zone, warm the preloader, then paint the current (and incoming)
//! slide through the configured transition strategy.

use eframe::egui::{self, Key, Rect, Vec2};
use log::{debug, error};
use std::path::PathBuf;
use std::time::Instant;

use crate::config::{EngineConfig, TransitionStrategy};
use crate::core::{AdZone, AssetStore, ImagePreloader, RotationScheduler};
use crate::deck::Deck;
use crate::widgets::controls::{ControlsAction, ControlsOverlay};
use crate::widgets::{ad_zone, slide};

pub struct VitrineApp {
    config: EngineConfig,
    deck: Deck,
    deck_path: PathBuf,
    scheduler: RotationScheduler,
    ad_zone: AdZone,
    preloader: ImagePreloader,
    assets: AssetStore,
    controls: ControlsOverlay,
}

impl VitrineApp {
    pub fn new(config: EngineConfig, deck: Deck, deck_path: PathBuf) -> Self {
        let now = Instant::now();
        let scheduler = RotationScheduler::new(
            deck.slides.len(),
            config.slide_duration(),
            config.transition_duration(),
            config.resume_with_remainder,
            now,
        );
        let ad_zone = AdZone::new(&deck.ads, config.ads_enabled, config.ad_interval_ms, None);
        let assets = AssetStore::new(config.asset_root.clone());
        Self {
            config,
            deck,
            deck_path,
            scheduler,
            ad_zone,
            preloader: ImagePreloader::new(),
            assets,
            controls: ControlsOverlay::new(),
        }
    }

    /// Swap in a new deck. A same-identity deck is a content refresh and
    /// keeps engine state; anything else tears every timer down and starts
    /// the session over.
    fn replace_deck(&mut self, deck: Deck, now: Instant) {
        if deck.same_identity(&self.deck) {
            debug!("deck refreshed in place ({} slides)", deck.slides.len());
            self.deck = deck;
            return;
        }
        self.scheduler.reset(deck.slides.len(), now);
        self.ad_zone.reset(&deck.ads);
        self.assets.reset();
        self.preloader = ImagePreloader::new();
        self.deck = deck;
    }

    fn reload_deck(&mut self, now: Instant) {
        match Deck::load(&self.deck_path) {
            Ok(deck) => self.replace_deck(deck, now),
            Err(e) => error!("deck reload failed: {e:#}"),
        }
    }

    fn apply_action(&mut self, action: ControlsAction, now: Instant) {
        match action {
            ControlsAction::Previous => {
                self.scheduler.go_to_previous(now);
            }
            ControlsAction::Next => {
                self.scheduler.go_to_next(now);
            }
            ControlsAction::TogglePause => {
                let paused = self.scheduler.is_paused();
                self.scheduler.set_paused(!paused, now);
            }
        }
    }

    fn paint_slide(&mut self, ui: &mut egui::Ui, rect: Rect, index: usize, opacity: f32) {
        let Some(slide_content) = self.deck.slides.get(index) else {
            return;
        };
        let assets = &mut self.assets;
        ui.scope_builder(egui::UiBuilder::new().max_rect(rect), |ui| {
            ui.set_opacity(opacity);
            slide::render_slide(ui, slide_content, assets);
        });
    }

    fn paint_rotation(&mut self, ui: &mut egui::Ui, now: Instant) {
        let rect = ui.max_rect();
        match self.config.strategy {
            TransitionStrategy::Carousel => {
                // The whole row translates; only slides intersecting the
                // viewport are worth painting.
                let position = rotation_position(&self.scheduler, now);
                for index in 0..self.deck.slides.len() {
                    let offset = (index as f32 - position) * rect.width();
                    if offset.abs() >= rect.width() {
                        continue;
                    }
                    self.paint_slide(ui, rect.translate(Vec2::new(offset, 0.0)), index, 1.0);
                }
            }
            TransitionStrategy::Crossfade => match self.scheduler.transition().copied() {
                Some(t) => {
                    let p = t.progress(now);
                    // Outgoing under incoming, both mounted for the overlap.
                    self.paint_slide(ui, rect, t.from, 1.0 - p);
                    self.paint_slide(ui, rect, t.to, p);
                }
                None => self.paint_slide(ui, rect, self.scheduler.current_index(), 1.0),
            },
        }
    }

    fn diagnostics(&self, ctx: &egui::Context, now: Instant) {
        debug!(
            "diag index={} transitioning={} paused={} advance_in={:?} ad_in={:?}",
            self.scheduler.current_index(),
            self.scheduler.is_transitioning(),
            self.scheduler.is_paused(),
            self.scheduler.next_advance().map(|d| d.saturating_duration_since(now)),
            self.ad_zone.next_change().map(|d| d.saturating_duration_since(now)),
        );
        egui::Window::new("engine diagnostics")
            .default_open(true)
            .show(ctx, |ui| {
                ui.monospace(format!(
                    "slide    {}/{}",
                    self.scheduler.current_index(),
                    self.deck.slides.len()
                ));
                ui.monospace(format!("epoch    {}", self.scheduler.epoch()));
                ui.monospace(format!("paused   {}", self.scheduler.is_paused()));
                ui.monospace(format!(
                    "trans    {}",
                    self.scheduler.is_transitioning()
                ));
                ui.monospace(format!(
                    "advance  {:?}",
                    self.scheduler.next_advance().map(|d| d.saturating_duration_since(now))
                ));
                ui.monospace(format!(
                    "ad step  {:?}",
                    self.ad_zone.next_change().map(|d| d.saturating_duration_since(now))
                ));
            });
    }
}

/// Fractional rotation position: the carousel row sits at `-position`
/// slide-widths. Equals the current index outside transitions.
fn rotation_position(scheduler: &RotationScheduler, now: Instant) -> f32 {
    match scheduler.transition() {
        Some(t) => {
            let p = t.progress(now);
            t.from as f32 + (t.to as f32 - t.from as f32) * p
        }
        None => scheduler.current_index() as f32,
    }
}

impl eframe::App for VitrineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.assets.drain(ctx);

        let (pointer_moved, prev_key, next_key, pause_key, reload_key, dropped) =
            ctx.input(|i| {
                (
                    i.pointer.delta() != Vec2::ZERO,
                    i.key_pressed(Key::ArrowLeft),
                    i.key_pressed(Key::ArrowRight),
                    i.key_pressed(Key::Space),
                    i.key_pressed(Key::R),
                    i.raw.dropped_files.first().and_then(|f| f.path.clone()),
                )
            });

        if pointer_moved {
            self.controls.reveal(now);
        }
        if prev_key {
            self.controls.reveal(now);
            self.apply_action(ControlsAction::Previous, now);
        }
        if next_key {
            self.controls.reveal(now);
            self.apply_action(ControlsAction::Next, now);
        }
        if pause_key {
            self.controls.reveal(now);
            self.apply_action(ControlsAction::TogglePause, now);
        }
        if reload_key {
            self.reload_deck(now);
        }
        if let Some(path) = dropped {
            self.deck_path = path;
            self.reload_deck(now);
        }

        self.scheduler.tick(now);
        self.preloader.on_frame(
            self.scheduler.epoch(),
            self.scheduler.current_index(),
            &self.deck,
            &mut self.assets,
        );

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                if self.deck.slides.is_empty() {
                    slide::render_empty_deck(ui);
                } else {
                    self.paint_rotation(ui, now);
                }
            });

        // Ad overlay: independent timer, gated by the slide on screen.
        if let Some(current) = self.deck.slides.get(self.scheduler.current_index()) {
            let eligible = self.ad_zone.eligible(current);
            self.ad_zone.tick(eligible, now);
            if eligible {
                if let Some(creative) = self.ad_zone.current() {
                    let creative = creative.clone();
                    ad_zone::render_ad_overlay(ctx, &creative, &mut self.assets);
                }
            }
        }

        if let Some(action) = self.controls.ui(ctx, self.scheduler.is_paused(), now) {
            self.apply_action(action, now);
        }

        if self.config.debug {
            self.diagnostics(ctx, now);
        }

        // Timers and transitions are wall-clock driven; keep repainting.
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_rotation_position_tracks_transition() {
        let t0 = Instant::now();
        let mut s = RotationScheduler::new(
            3,
            Duration::from_millis(10_000),
            Duration::from_millis(700),
            false,
            t0,
        );
        assert_eq!(rotation_position(&s, t0), 0.0);

        s.tick(t0 + Duration::from_millis(9_300));
        let mid = rotation_position(&s, t0 + Duration::from_millis(9_650));
        assert!(mid > 0.0 && mid < 1.0, "mid-transition position: {mid}");

        s.tick(t0 + Duration::from_millis(10_000));
        assert_eq!(rotation_position(&s, t0 + Duration::from_millis(10_000)), 1.0);
    }
}
