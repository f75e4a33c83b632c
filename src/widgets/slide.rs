//! Slide painting - maps a resolved [`SlideLayout`] onto egui draw calls.
//!
//! Stateless given its inputs: the only shared state it touches is the asset
//! store, to lazily request textures and read the failed set. All layout
//! decisions live in [`crate::widgets::layout`]; this file only paints.

use eframe::egui::{self, Align, Align2, Color32, Layout, Rect, RichText, Vec2};

use crate::core::assets::AssetStore;
use crate::deck::{SlideContent, SlideItem};
use crate::widgets::layout::{
    accent_colors, resolve_layout, shows_label_badge, AccentColors, GridPlan, SlideLayout,
};
use crate::widgets::markdown::{parse_blocks, Block};

const TITLE_SIZE: f32 = 56.0;
const SUBTITLE_SIZE: f32 = 28.0;
const BODY_SIZE: f32 = 24.0;
const ITEM_TITLE_SIZE: f32 = 30.0;
const BORDER_WIDTH: f32 = 6.0;

/// Paint one slide into the current ui (already clipped and opacity-scoped
/// by the caller).
pub fn render_slide(ui: &mut egui::Ui, slide: &SlideContent, store: &mut AssetStore) {
    let layout = resolve_layout(slide, store.failed());
    match layout {
        SlideLayout::Events { slide, grid } => render_events(ui, slide, &grid, store),
        SlideLayout::HappyHour { slide, divided } | SlideLayout::Drink { slide, divided } => {
            render_dual(ui, slide, divided)
        }
        SlideLayout::Food { slide, image } => render_food(ui, slide, image, store),
        SlideLayout::Custom {
            slide,
            image,
            bordered,
        } => render_full_bleed(ui, slide, image, bordered, store),
        SlideLayout::Welcome { slide, image } | SlideLayout::Ad { slide, image } => {
            render_full_bleed(ui, slide, image, false, store)
        }
    }
}

/// Request-then-read: textures load in the background, so this returns None
/// until the decode lands (or forever, once the URL is in the failed set).
fn texture(store: &mut AssetStore, url: &str) -> Option<egui::TextureHandle> {
    store.request(url);
    store.get(url).cloned()
}

fn header(ui: &mut egui::Ui, slide: &SlideContent, colors: &AccentColors) {
    ui.vertical_centered(|ui| {
        ui.add_space(24.0);
        if shows_label_badge(slide.source) {
            if let Some(label) = &slide.label {
                let badge = RichText::new(label)
                    .size(18.0)
                    .color(colors.solid)
                    .background_color(colors.surface_strong);
                ui.label(badge);
            }
        }
        if let Some(title) = &slide.title {
            ui.label(RichText::new(title).size(TITLE_SIZE).strong().color(colors.solid));
        }
        if let Some(subtitle) = &slide.subtitle {
            ui.label(
                RichText::new(subtitle)
                    .size(SUBTITLE_SIZE)
                    .color(Color32::LIGHT_GRAY),
            );
        }
        ui.add_space(12.0);
    });
}

fn render_body_blocks(ui: &mut egui::Ui, body: &str) {
    for block in parse_blocks(body) {
        match block {
            Block::Paragraph(text) => {
                ui.label(RichText::new(text).size(BODY_SIZE).color(Color32::WHITE));
                ui.add_space(8.0);
            }
            Block::Bullets(items) => {
                for item in items {
                    ui.label(
                        RichText::new(format!("\u{2022} {item}"))
                            .size(BODY_SIZE)
                            .color(Color32::WHITE),
                    );
                }
                ui.add_space(8.0);
            }
            Block::Ordered(items) => {
                for (n, item) in items.iter().enumerate() {
                    ui.label(
                        RichText::new(format!("{}. {item}", n + 1))
                            .size(BODY_SIZE)
                            .color(Color32::WHITE),
                    );
                }
                ui.add_space(8.0);
            }
        }
    }
}

fn render_item(ui: &mut egui::Ui, item: &SlideItem, colors: &AccentColors, store: &mut AssetStore) {
    if let Some(url) = item.image.as_deref() {
        if !store.has_failed(url) {
            if let Some(tex) = texture(store, url) {
                let avail = ui.available_width().min(220.0);
                let size = scaled_size(tex.size_vec2(), Vec2::new(avail, 140.0));
                ui.image((tex.id(), size));
            }
        }
    }
    if let Some(title) = &item.title {
        ui.label(
            RichText::new(title)
                .size(ITEM_TITLE_SIZE)
                .strong()
                .color(Color32::WHITE),
        );
    }
    if let Some(time) = &item.time {
        ui.label(RichText::new(time).size(BODY_SIZE).color(colors.solid));
    }
    if let Some(note) = &item.note {
        ui.label(RichText::new(note).size(BODY_SIZE).color(Color32::LIGHT_GRAY));
    }
    if let Some(detail) = &item.detail {
        ui.label(RichText::new(detail).size(18.0).color(Color32::GRAY));
    }
    ui.add_space(16.0);
}

fn render_events(ui: &mut egui::Ui, slide: &SlideContent, grid: &GridPlan, store: &mut AssetStore) {
    let colors = accent_colors(slide.accent);
    header(ui, slide, &colors);
    for row in &grid.rows {
        // A short last row gets its own column split, so its cells stretch
        // to fill the full width instead of leaving a sparse gap.
        ui.columns(row.count, |cells| {
            for (offset, cell) in cells.iter_mut().enumerate() {
                if let Some(item) = slide.items.get(row.start + offset) {
                    cell.vertical_centered(|ui| render_item(ui, item, &colors, store));
                }
            }
        });
    }
    footer_line(ui, slide, &colors);
}

fn render_dual(ui: &mut egui::Ui, slide: &SlideContent, divided: bool) {
    let colors = accent_colors(slide.accent);
    header(ui, slide, &colors);

    if divided {
        let divider_x = ui.max_rect().center().x;
        ui.columns(2, |cols| {
            cols[0].vertical_centered(|ui| {
                if let Some(body) = &slide.body {
                    render_body_blocks(ui, body);
                }
            });
            cols[1].vertical_centered(|ui| {
                for item in &slide.items {
                    render_item_text_only(ui, item, &colors);
                }
            });
        });
        let rect = ui.min_rect();
        ui.painter().vline(
            divider_x,
            rect.y_range(),
            egui::Stroke::new(2.0, colors.glow),
        );
    } else {
        // Only one half has content: center it.
        ui.vertical_centered(|ui| {
            if let Some(body) = &slide.body {
                render_body_blocks(ui, body);
            }
            for item in &slide.items {
                render_item_text_only(ui, item, &colors);
            }
        });
    }
    footer_line(ui, slide, &colors);
}

fn render_item_text_only(ui: &mut egui::Ui, item: &SlideItem, colors: &AccentColors) {
    if let Some(title) = &item.title {
        ui.label(
            RichText::new(title)
                .size(ITEM_TITLE_SIZE)
                .strong()
                .color(Color32::WHITE),
        );
    }
    if let Some(time) = &item.time {
        ui.label(RichText::new(time).size(BODY_SIZE).color(colors.solid));
    }
    if let Some(note) = &item.note {
        ui.label(RichText::new(note).size(BODY_SIZE).color(Color32::LIGHT_GRAY));
    }
    ui.add_space(12.0);
}

fn render_food(
    ui: &mut egui::Ui,
    slide: &SlideContent,
    image: Option<&str>,
    store: &mut AssetStore,
) {
    let colors = accent_colors(slide.accent);
    header(ui, slide, &colors);

    match image.and_then(|url| texture(store, url)) {
        Some(tex) => {
            ui.columns(2, |cols| {
                cols[0].vertical_centered(|ui| {
                    if let Some(body) = &slide.body {
                        render_body_blocks(ui, body);
                    }
                    for item in &slide.items {
                        render_item_text_only(ui, item, &colors);
                    }
                });
                cols[1].vertical_centered(|ui| {
                    let avail = ui.available_size();
                    let size = scaled_size(tex.size_vec2(), avail);
                    ui.image((tex.id(), size));
                });
            });
        }
        None => {
            // No image (absent, failed, or still loading): text-only variant.
            ui.vertical_centered(|ui| {
                if let Some(body) = &slide.body {
                    render_body_blocks(ui, body);
                }
                for item in &slide.items {
                    render_item_text_only(ui, item, &colors);
                }
            });
        }
    }
    footer_line(ui, slide, &colors);
}

/// Custom/welcome/ad slides: the image fills the area, title and footer
/// overlay it. Falls back to centered text when no image survives.
fn render_full_bleed(
    ui: &mut egui::Ui,
    slide: &SlideContent,
    image: Option<&str>,
    bordered: bool,
    store: &mut AssetStore,
) {
    let colors = accent_colors(slide.accent);
    let area = ui.max_rect();

    let tex = image.and_then(|url| texture(store, url));
    match tex {
        Some(tex) => {
            let rect = fit_rect(area, tex.size_vec2());
            ui.painter().image(
                tex.id(),
                rect,
                Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                Color32::WHITE,
            );
            if bordered {
                ui.painter().rect_stroke(
                    rect,
                    egui::CornerRadius::same(8),
                    egui::Stroke::new(BORDER_WIDTH, colors.solid),
                    egui::StrokeKind::Inside,
                );
            }
            if let Some(title) = &slide.title {
                overlay_text(ui, area, Align2::CENTER_TOP, title, TITLE_SIZE, &colors);
            }
            if let Some(footer) = &slide.footer {
                overlay_text(ui, area, Align2::CENTER_BOTTOM, footer, SUBTITLE_SIZE, &colors);
            }
        }
        None => {
            ui.scope_builder(
                egui::UiBuilder::new()
                    .max_rect(area)
                    .layout(Layout::top_down(Align::Center)),
                |ui| {
                    ui.add_space(area.height() * 0.3);
                    header(ui, slide, &colors);
                    if let Some(body) = &slide.body {
                        render_body_blocks(ui, body);
                    }
                    footer_line(ui, slide, &colors);
                },
            );
        }
    }
}

/// Title/footer strip over a full-bleed image, on a translucent backing so
/// the text stays readable on any creative.
fn overlay_text(
    ui: &egui::Ui,
    area: Rect,
    anchor: Align2,
    text: &str,
    size: f32,
    colors: &AccentColors,
) {
    let painter = ui.painter();
    let pos = if anchor == Align2::CENTER_TOP {
        area.center_top() + Vec2::new(0.0, 32.0)
    } else {
        area.center_bottom() - Vec2::new(0.0, 32.0)
    };
    let galley_rect = painter
        .text(
            pos,
            anchor,
            text,
            egui::FontId::proportional(size),
            Color32::WHITE,
        )
        .expand(12.0);
    painter.rect_filled(galley_rect, egui::CornerRadius::same(6), colors.surface_strong);
    // Paint the text again on top of its backing.
    painter.text(
        pos,
        anchor,
        text,
        egui::FontId::proportional(size),
        Color32::WHITE,
    );
}

fn footer_line(ui: &mut egui::Ui, slide: &SlideContent, colors: &AccentColors) {
    if let Some(footer) = &slide.footer {
        ui.with_layout(Layout::bottom_up(Align::Center), |ui| {
            ui.add_space(24.0);
            ui.label(RichText::new(footer).size(SUBTITLE_SIZE).color(colors.solid));
        });
    }
}

/// Contain-fit: largest centered rect with the texture's aspect inside `area`.
fn fit_rect(area: Rect, tex_size: Vec2) -> Rect {
    Rect::from_center_size(area.center(), scaled_size(tex_size, area.size()))
}

fn scaled_size(tex: Vec2, avail: Vec2) -> Vec2 {
    if tex.x <= 0.0 || tex.y <= 0.0 {
        return avail;
    }
    let scale = (avail.x / tex.x).min(avail.y / tex.y);
    tex * scale
}

/// Static placeholder for an empty deck. No timers, nothing rotates.
pub fn render_empty_deck(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            RichText::new("No slides to display")
                .size(SUBTITLE_SIZE)
                .color(Color32::GRAY),
        );
    });
}
