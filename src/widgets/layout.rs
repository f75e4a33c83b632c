//! Layout resolution - the pure mapping from slide content to a concrete
//! render variant.
//!
//! One tagged union per slide family, dispatched in a single place. Each
//! variant carries only the fields its renderer can use, so contradictory
//! flag combinations (an ad that is also a happy-hour split, a border on a
//! text slide) cannot be represented. Resolution is idempotent for a fixed
//! failed-image set; the paint layer re-runs it freely without side effects.

use eframe::egui::Color32;
use std::collections::HashSet;

use crate::deck::{Accent, SlideContent, SlideSource};

/// Accent quadruple derived from the named palette color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccentColors {
    pub solid: Color32,
    pub glow: Color32,
    pub surface: Color32,
    pub surface_strong: Color32,
}

/// Fixed palette. Values are presentation only; nothing in the engine
/// branches on them.
pub fn accent_colors(accent: Accent) -> AccentColors {
    let solid = match accent {
        Accent::Amber => Color32::from_rgb(0xf5, 0xa6, 0x23),
        Accent::Crimson => Color32::from_rgb(0xe5, 0x3e, 0x51),
        Accent::Mint => Color32::from_rgb(0x3e, 0xd5, 0x98),
        Accent::Ocean => Color32::from_rgb(0x2e, 0x9b, 0xe0),
        Accent::Violet => Color32::from_rgb(0x9b, 0x6b, 0xf2),
        Accent::Slate => Color32::from_rgb(0x8a, 0x95, 0xa5),
    };
    let [r, g, b, _] = solid.to_array();
    AccentColors {
        solid,
        glow: Color32::from_rgba_unmultiplied(r, g, b, 0x60),
        surface: Color32::from_rgba_unmultiplied(r, g, b, 0x14),
        surface_strong: Color32::from_rgba_unmultiplied(r, g, b, 0x30),
    }
}

/// Row plan for list-style content: `count` cells starting at item `start`.
/// A short last row keeps its smaller count; cells stretch to fill the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRow {
    pub start: usize,
    pub count: usize,
}

/// Column/row plan for the events grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridPlan {
    pub columns: usize,
    pub rows: Vec<GridRow>,
}

/// 1-3 columns depending on item count.
pub fn events_grid(item_count: usize) -> GridPlan {
    let columns = match item_count {
        0..=4 => 1,
        5..=10 => 2,
        _ => 3,
    };
    let mut rows = Vec::new();
    let mut start = 0;
    while start < item_count {
        let count = columns.min(item_count - start);
        rows.push(GridRow { start, count });
        start += count;
    }
    GridPlan { columns, rows }
}

/// Concrete render variant for one slide.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideLayout<'a> {
    Events {
        slide: &'a SlideContent,
        grid: GridPlan,
    },
    HappyHour {
        slide: &'a SlideContent,
        /// Vertical divider between body and items; false renders the
        /// populated half centered.
        divided: bool,
    },
    Drink {
        slide: &'a SlideContent,
        divided: bool,
    },
    Food {
        slide: &'a SlideContent,
        /// Two-column text+image when present; text-only when absent/failed.
        image: Option<&'a str>,
    },
    Custom {
        slide: &'a SlideContent,
        image: Option<&'a str>,
        /// Decorative border, explicit opt-in and only meaningful with an
        /// image present.
        bordered: bool,
    },
    Welcome {
        slide: &'a SlideContent,
        image: Option<&'a str>,
    },
    Ad {
        slide: &'a SlideContent,
        image: Option<&'a str>,
    },
}

impl<'a> SlideLayout<'a> {
    pub fn slide(&self) -> &'a SlideContent {
        match self {
            SlideLayout::Events { slide, .. }
            | SlideLayout::HappyHour { slide, .. }
            | SlideLayout::Drink { slide, .. }
            | SlideLayout::Food { slide, .. }
            | SlideLayout::Custom { slide, .. }
            | SlideLayout::Welcome { slide, .. }
            | SlideLayout::Ad { slide, .. } => slide,
        }
    }
}

/// Full-bleed image for a slide: the slide asset, unless it has failed.
fn surviving_asset<'a>(slide: &'a SlideContent, failed: &HashSet<String>) -> Option<&'a str> {
    slide
        .asset
        .as_ref()
        .map(|a| a.storage_key.as_str())
        .filter(|url| !failed.contains(*url))
}

/// Image for the food split: slide asset first, else the first surviving
/// item image.
fn food_image<'a>(slide: &'a SlideContent, failed: &HashSet<String>) -> Option<&'a str> {
    surviving_asset(slide, failed).or_else(|| {
        slide
            .items
            .iter()
            .filter_map(|i| i.image.as_deref())
            .find(|url| !failed.contains(*url))
    })
}

fn has_body(slide: &SlideContent) -> bool {
    slide.body.as_deref().is_some_and(|b| !b.trim().is_empty())
}

/// Resolve a slide to its render variant. Pure: same slide and failure set,
/// same layout.
pub fn resolve_layout<'a>(
    slide: &'a SlideContent,
    failed: &HashSet<String>,
) -> SlideLayout<'a> {
    if slide.is_ad {
        return SlideLayout::Ad {
            slide,
            image: surviving_asset(slide, failed),
        };
    }
    match slide.source {
        SlideSource::Events => SlideLayout::Events {
            slide,
            grid: events_grid(slide.items.len()),
        },
        SlideSource::HappyHour => SlideLayout::HappyHour {
            slide,
            divided: has_body(slide) && !slide.items.is_empty(),
        },
        SlideSource::Drink => SlideLayout::Drink {
            slide,
            divided: has_body(slide) && !slide.items.is_empty(),
        },
        SlideSource::Food => SlideLayout::Food {
            slide,
            image: food_image(slide, failed),
        },
        SlideSource::Custom => {
            let image = surviving_asset(slide, failed);
            SlideLayout::Custom {
                slide,
                image,
                bordered: slide.show_border == Some(true) && image.is_some(),
            }
        }
        SlideSource::Welcome => SlideLayout::Welcome {
            slide,
            image: surviving_asset(slide, failed),
        },
    }
}

/// Whether the label badge renders for this slide family. Custom and welcome
/// slides never badge; their label field is ignored.
pub fn shows_label_badge(source: SlideSource) -> bool {
    matches!(
        source,
        SlideSource::Events | SlideSource::HappyHour | SlideSource::Drink | SlideSource::Food
    )
}
