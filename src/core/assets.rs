//! Asset store - background image loading and the failed-image record.
//!
//! Storage keys are opaque strings resolved against the asset root. Loads are
//! fire-and-forget: requests dedup by URL, decode happens on named loader
//! threads, and finished images drain into egui textures on the UI thread.
//! There is no retry path. A URL that fails once lands in the failed set and
//! stays there for the whole session; layout resolution reads that set to
//! permanently simplify the affected slide. Only a deck replacement (epoch
//! bump) clears it, and results from a previous epoch are dropped on drain.

use crossbeam_channel::{unbounded, Receiver, Sender};
use eframe::egui;
use log::{debug, error, trace, warn};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::thread;

/// Decode threads. Slide imagery is small; two keep ahead of the rotation.
const LOADER_THREADS: usize = 2;

struct LoadRequest {
    url: String,
    path: PathBuf,
    epoch: u64,
}

struct LoadResult {
    url: String,
    epoch: u64,
    image: Option<egui::ColorImage>,
}

/// Shared image state for the whole engine: textures, in-flight requests and
/// the append-only failed set.
pub struct AssetStore {
    asset_root: PathBuf,
    requests: Sender<LoadRequest>,
    results: Receiver<LoadResult>,
    textures: HashMap<String, egui::TextureHandle>,
    requested: HashSet<String>,
    failed: HashSet<String>,
    epoch: u64,
}

impl AssetStore {
    pub fn new(asset_root: PathBuf) -> Self {
        let (req_tx, req_rx) = unbounded::<LoadRequest>();
        let (res_tx, res_rx) = unbounded::<LoadResult>();

        for worker_id in 0..LOADER_THREADS {
            let rx = req_rx.clone();
            let tx = res_tx.clone();
            thread::Builder::new()
                .name(format!("vitrine-loader-{}", worker_id))
                .spawn(move || {
                    // Exits when the store (request sender) is dropped.
                    for req in rx.iter() {
                        let image = decode_file(&req.path);
                        if tx
                            .send(LoadResult {
                                url: req.url,
                                epoch: req.epoch,
                                image,
                            })
                            .is_err()
                        {
                            break;
                        }
                    }
                    trace!("loader {} stopped", worker_id);
                })
                .expect("failed to spawn loader thread");
        }

        Self {
            asset_root,
            requests: req_tx,
            results: res_rx,
            textures: HashMap::new(),
            requested: HashSet::new(),
            failed: HashSet::new(),
            epoch: 0,
        }
    }

    /// Resolve an opaque storage key to a filesystem path.
    pub fn resolve(&self, url: &str) -> PathBuf {
        let path = Path::new(url);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.asset_root.join(path)
        }
    }

    /// Request a load. Idempotent per URL per session; failed URLs are never
    /// retried.
    pub fn request(&mut self, url: &str) {
        if url.is_empty() || !self.requested.insert(url.to_string()) {
            return;
        }
        let req = LoadRequest {
            url: url.to_string(),
            path: self.resolve(url),
            epoch: self.epoch,
        };
        trace!("asset requested: {}", url);
        if self.requests.send(req).is_err() {
            error!("asset loader threads are gone, dropping request for {}", url);
        }
    }

    /// Drain finished loads into textures. Returns true if anything arrived
    /// (a repaint is warranted). Stale-epoch results are discarded.
    pub fn drain(&mut self, ctx: &egui::Context) -> bool {
        let mut changed = false;
        while let Ok(res) = self.results.try_recv() {
            if res.epoch != self.epoch {
                trace!("dropping stale asset result for {}", res.url);
                continue;
            }
            match res.image {
                Some(image) => {
                    debug!("asset ready: {}", res.url);
                    let handle =
                        ctx.load_texture(res.url.clone(), image, egui::TextureOptions::LINEAR);
                    self.textures.insert(res.url, handle);
                }
                None => self.mark_failed(&res.url),
            }
            changed = true;
        }
        changed
    }

    pub fn get(&self, url: &str) -> Option<&egui::TextureHandle> {
        self.textures.get(url)
    }

    pub fn has_failed(&self, url: &str) -> bool {
        self.failed.contains(url)
    }

    /// The session's failed-image set, read by layout resolution.
    pub fn failed(&self) -> &HashSet<String> {
        &self.failed
    }

    /// Record a load failure. One-shot degrade: the URL stays failed for the
    /// rest of the session.
    fn mark_failed(&mut self, url: &str) {
        warn!("asset failed, degrading layout for {}", url);
        self.failed.insert(url.to_string());
    }

    /// Deck replacement: drop every per-session record and invalidate
    /// whatever is still in flight.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.textures.clear();
        self.requested.clear();
        self.failed.clear();
        debug!("asset store reset, epoch {}", self.epoch);
    }
}

/// Read and decode an image file. `None` feeds the failed set.
fn decode_file(path: &Path) -> Option<egui::ColorImage> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("failed to read {}: {}", path.display(), e);
            return None;
        }
    };
    match image::load_from_memory(&bytes) {
        Ok(img) => {
            let rgba = img.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            Some(egui::ColorImage::from_rgba_unmultiplied(
                size,
                rgba.as_raw(),
            ))
        }
        Err(e) => {
            warn!("failed to decode {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> AssetStore {
        AssetStore::new(PathBuf::from("/srv/signage/assets"))
    }

    #[test]
    fn test_request_dedup() {
        let mut s = store();
        s.request("img/a.png");
        s.request("img/a.png");
        s.request("img/b.png");
        assert_eq!(s.requested.len(), 2);
    }

    #[test]
    fn test_empty_url_ignored() {
        let mut s = store();
        s.request("");
        assert!(s.requested.is_empty());
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let s = store();
        assert_eq!(
            s.resolve("img/a.png"),
            PathBuf::from("/srv/signage/assets/img/a.png")
        );
        assert_eq!(s.resolve("/tmp/x.png"), PathBuf::from("/tmp/x.png"));
    }

    #[test]
    fn test_failed_set_is_monotone() {
        let mut s = store();
        s.request("img/bad.png");
        s.mark_failed("img/bad.png");
        assert!(s.has_failed("img/bad.png"));

        // A failed URL stays in the requested set, so it is never re-sent.
        s.request("img/bad.png");
        assert_eq!(s.requested.len(), 1);
        assert_eq!(s.failed().len(), 1);
    }

    #[test]
    fn test_reset_clears_session_state() {
        let mut s = store();
        s.request("img/a.png");
        s.mark_failed("img/bad.png");

        s.reset();
        assert_eq!(s.epoch, 1);
        assert!(s.requested.is_empty());
        assert!(s.failed().is_empty());
        // Previously failed URL is loadable again in the new session.
        s.request("img/bad.png");
        assert_eq!(s.requested.len(), 1);
    }
}
