//! Image preloader - warms the texture cache for the slides adjacent to the
//! current one, so a transition never lands on a blank image.
//!
//! Pure latency-hiding heuristic, not a correctness requirement: requests are
//! fire-and-forget (the asset store dedups and never cancels in-flight
//! loads), and nothing waits on completion.

use log::trace;

use crate::core::assets::AssetStore;
use crate::deck::Deck;

/// Indices of the slides adjacent to `index`: next first, then previous,
/// both mod `len`, deduplicated.
pub fn neighbor_indices(len: usize, index: usize) -> Vec<usize> {
    if len < 2 {
        return Vec::new();
    }
    let next = (index + 1) % len;
    let prev = (index + len - 1) % len;
    if next == prev {
        vec![next]
    } else {
        vec![next, prev]
    }
}

/// Tracks the last (epoch, index) pair so the warm-up side effect runs once
/// per index change, not once per repaint.
#[derive(Debug, Default)]
pub struct ImagePreloader {
    last: Option<(u64, usize)>,
}

impl ImagePreloader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call every frame. On an index (or session) change, requests the full
    /// image set of both neighbor slides: the slide asset plus every item
    /// image.
    pub fn on_frame(&mut self, epoch: u64, index: usize, deck: &Deck, store: &mut AssetStore) {
        if self.last == Some((epoch, index)) {
            return;
        }
        self.last = Some((epoch, index));

        for neighbor in neighbor_indices(deck.slides.len(), index) {
            let Some(slide) = deck.slides.get(neighbor) else {
                continue;
            };
            for url in slide.image_urls() {
                store.request(url);
            }
            trace!("preloading assets of slide {} ({})", neighbor, slide.id);
        }
    }
}
