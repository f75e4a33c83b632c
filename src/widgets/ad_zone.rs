//! Ad overlay painting - one creative in a corner panel over the slide.
//!
//! Timing and eligibility live in [`crate::core::ad_zone`]; this file only
//! draws the creative picked by the core, plus the click-through and QR
//! affordances when the creative carries a destination.

use eframe::egui::{self, Align2, Color32, RichText, Vec2};

use crate::core::assets::AssetStore;
use crate::deck::AdCreative;

const PANEL_MARGIN: f32 = 24.0;
const CREATIVE_MAX: Vec2 = Vec2::new(320.0, 220.0);

/// Paint the current creative anchored bottom-right.
pub fn render_ad_overlay(ctx: &egui::Context, creative: &AdCreative, store: &mut AssetStore) {
    store.request(&creative.asset.storage_key);
    let tex = store.get(&creative.asset.storage_key).cloned();

    egui::Area::new(egui::Id::new("ad_zone"))
        .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-PANEL_MARGIN, -PANEL_MARGIN))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(Color32::from_black_alpha(200))
                .corner_radius(egui::CornerRadius::same(10))
                .inner_margin(egui::Margin::same(10))
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        match tex {
                            Some(tex) => {
                                let size = contain(tex.size_vec2(), CREATIVE_MAX);
                                let response = ui
                                    .image((tex.id(), size))
                                    .interact(egui::Sense::click());
                                if let Some(url) = &creative.destination_url {
                                    if response.clicked() {
                                        ui.ctx().open_url(egui::OpenUrl::new_tab(url));
                                    }
                                }
                            }
                            None => {
                                // Creative not decoded yet (or failed): keep
                                // the panel footprint stable.
                                ui.allocate_space(CREATIVE_MAX * 0.5);
                            }
                        }
                        if creative.qr_enabled && creative.destination_url.is_some() {
                            qr_affordance(ui);
                        }
                    });
                });
        });
}

/// QR affordance: a reserved square plus hint text. Generating the actual
/// QR image is presentation handled elsewhere.
fn qr_affordance(ui: &mut egui::Ui) {
    ui.add_space(6.0);
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(56.0), egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, egui::CornerRadius::same(4), Color32::WHITE);
    ui.label(RichText::new("Scan for more").size(13.0).color(Color32::LIGHT_GRAY));
}

fn contain(tex: Vec2, max: Vec2) -> Vec2 {
    if tex.x <= 0.0 || tex.y <= 0.0 {
        return max;
    }
    let scale = (max.x / tex.x).min(max.y / tex.y).min(1.0);
    tex * scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contain_never_upscales() {
        assert_eq!(contain(Vec2::new(100.0, 50.0), CREATIVE_MAX), Vec2::new(100.0, 50.0));
        let shrunk = contain(Vec2::new(640.0, 440.0), CREATIVE_MAX);
        assert!(shrunk.x <= CREATIVE_MAX.x && shrunk.y <= CREATIVE_MAX.y);
    }
}
