//! Deck model - the ordered slide list and ad creatives driving one playback session.
//!
//! The deck is assembled upstream (content service, admin tooling) and handed to
//! the engine as a finished JSON document; vitrine never edits it, it only plays
//! it. A deck is immutable for the duration of a session: replacing it (reload,
//! drag-and-drop) resets every piece of engine state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Layout family of a slide. Closed set; selects the render variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlideSource {
    Events,
    HappyHour,
    Drink,
    Food,
    Custom,
    Welcome,
}

/// Named accent color. Behaviorally inert; the renderer derives its
/// glow/surface quadruple from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Accent {
    #[default]
    Amber,
    Crimson,
    Mint,
    Ocean,
    Violet,
    Slate,
}

/// Reference to a single image asset. Storage keys are opaque strings
/// resolved by the host (see `AssetStore::resolve`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideAsset {
    pub storage_key: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// One entry inside a list-style slide (an event, a special, a menu line).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlideItem {
    pub title: Option<String>,
    pub note: Option<String>,
    pub time: Option<String>,
    pub detail: Option<String>,
    /// Opaque image URL/key, preloaded alongside the slide's own asset.
    pub image: Option<String>,
}

/// Explicit slide type override. Only `image` exists today; absence means
/// "infer from asset/item images".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlideType {
    Image,
}

/// One unit of rotation content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SlideContent {
    /// Stable identifier: render key, preload dedup, deck identity.
    pub id: String,
    pub source: SlideSource,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    /// Restricted markdown: paragraphs, bullet lists, ordered lists.
    pub body: Option<String>,
    pub footer: Option<String>,
    pub label: Option<String>,
    pub accent: Accent,
    pub items: Vec<SlideItem>,
    pub asset: Option<SlideAsset>,
    /// True only for slides synthesized from an `AdCreative` baked into the
    /// rotation upstream. Distinct from the AdZone overlay.
    pub is_ad: bool,
    /// Full-bleed image slide with overlaid title/footer.
    pub is_content_slide: bool,
    pub slide_type: Option<SlideType>,
    /// Tri-state on the wire: absent means "no border", not "default border".
    pub show_border: Option<bool>,
}

impl Default for SlideContent {
    fn default() -> Self {
        Self {
            id: String::new(),
            source: SlideSource::Custom,
            title: None,
            subtitle: None,
            body: None,
            footer: None,
            label: None,
            accent: Accent::default(),
            items: Vec::new(),
            asset: None,
            is_ad: false,
            is_content_slide: false,
            slide_type: None,
            show_border: None,
        }
    }
}

impl SlideContent {
    /// Whether this slide renders as an image slide. Explicit `slideType`
    /// wins; otherwise inferred from the presence of any image reference.
    pub fn is_image_slide(&self) -> bool {
        match self.slide_type {
            Some(SlideType::Image) => true,
            None => self.asset.is_some() || self.items.iter().any(|i| i.image.is_some()),
        }
    }

    /// Every image URL this slide can show (slide asset first, then items).
    pub fn image_urls(&self) -> Vec<&str> {
        let mut urls: Vec<&str> = Vec::new();
        if let Some(asset) = &self.asset {
            urls.push(asset.storage_key.as_str());
        }
        urls.extend(self.items.iter().filter_map(|i| i.image.as_deref()));
        urls
    }
}

/// Asset attached to an ad creative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdAsset {
    pub id: String,
    pub storage_key: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// One advertisement creative. Consumed two ways: pre-baked into the deck as
/// an `is_ad` slide upstream, or rotated live by the AdZone overlay. The
/// engine never needs to know which path produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdCreative {
    pub id: String,
    pub campaign_id: String,
    pub asset_id: String,
    #[serde(default)]
    pub destination_url: Option<String>,
    #[serde(default)]
    pub qr_enabled: bool,
    #[serde(default = "default_true")]
    pub active: bool,
    pub asset: AdAsset,
}

fn default_true() -> bool {
    true
}

/// A full playback session input: ordered slides plus overlay creatives.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Deck {
    pub slides: Vec<SlideContent>,
    pub ads: Vec<AdCreative>,
}

impl Deck {
    /// Load a deck from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading deck file {}", path.display()))?;
        let deck: Deck = serde_json::from_str(&data)
            .with_context(|| format!("parsing deck file {}", path.display()))?;
        log::info!(
            "Deck loaded: {} slides, {} ads from {}",
            deck.slides.len(),
            deck.ads.len(),
            path.display()
        );
        Ok(deck)
    }

    /// Deck identity check: same length and same slide ids in the same order.
    /// Anything else counts as a replacement and resets the engine.
    pub fn same_identity(&self, other: &Deck) -> bool {
        self.slides.len() == other.slides.len()
            && self
                .slides
                .iter()
                .zip(other.slides.iter())
                .all(|(a, b)| a.id == b.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slide(id: &str) -> SlideContent {
        SlideContent {
            id: id.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_minimal_deck() {
        let json = r#"{
            "slides": [
                {"id": "s1", "source": "happyHour", "title": "Happy Hour"},
                {"id": "s2", "source": "events", "items": [{"title": "Trivia", "time": "8pm"}]}
            ],
            "ads": [
                {"id": "a1", "campaignId": "c1", "assetId": "x",
                 "qrEnabled": true, "destinationUrl": "https://example.com/promo",
                 "asset": {"id": "x", "storageKey": "ads/promo.png"}}
            ]
        }"#;
        let deck: Deck = serde_json::from_str(json).unwrap();
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[0].source, SlideSource::HappyHour);
        assert_eq!(deck.slides[1].items[0].time.as_deref(), Some("8pm"));
        assert!(deck.ads[0].active, "active defaults to true");
        assert!(deck.ads[0].qr_enabled);
    }

    #[test]
    fn test_image_slide_inference() {
        let mut s = slide("s");
        assert!(!s.is_image_slide());

        s.items.push(SlideItem {
            image: Some("img/a.png".into()),
            ..Default::default()
        });
        assert!(s.is_image_slide());

        // Explicit slideType wins even without any image reference.
        let mut t = slide("t");
        t.slide_type = Some(SlideType::Image);
        assert!(t.is_image_slide());
    }

    #[test]
    fn test_show_border_tristate() {
        let absent: SlideContent = serde_json::from_str(r#"{"id":"a","source":"custom"}"#).unwrap();
        assert_eq!(absent.show_border, None);

        let off: SlideContent =
            serde_json::from_str(r#"{"id":"a","source":"custom","showBorder":false}"#).unwrap();
        assert_eq!(off.show_border, Some(false));
    }

    #[test]
    fn test_image_urls_order() {
        let mut s = slide("s");
        s.asset = Some(SlideAsset {
            storage_key: "full.png".into(),
            width: None,
            height: None,
        });
        s.items.push(SlideItem {
            image: Some("item.png".into()),
            ..Default::default()
        });
        assert_eq!(s.image_urls(), vec!["full.png", "item.png"]);
    }

    #[test]
    fn test_deck_identity() {
        let a = Deck {
            slides: vec![slide("1"), slide("2")],
            ads: vec![],
        };
        let mut b = a.clone();
        assert!(a.same_identity(&b));

        b.slides[1].title = Some("edited".into());
        assert!(a.same_identity(&b), "content edits keep identity");

        b.slides[1].id = "3".into();
        assert!(!a.same_identity(&b));

        b.slides.pop();
        assert!(!a.same_identity(&b));
    }
}
