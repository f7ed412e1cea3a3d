//! Path-keyed image cache with a settle-then-redraw notification.
//!
//! Scene objects hold only a resource path; the decoded pixels live here,
//! one entry per path no matter how many objects reference it. Loads are
//! fire-and-forget: the host performs the I/O and calls [`ImageStore::settle`]
//! on completion, which flips the entry to ready (or to the placeholder on
//! failure) and fires the redraw hook. There is no retry, timeout, or
//! cancellation; a settle for a path nothing references anymore is a
//! harmless no-op.

use std::collections::HashMap;

use tiny_skia::{Color, Paint, Pixmap, Rect, Transform};
use tracing::{debug, warn};

use levelkit_core::types::Callback;
use levelkit_core::AssetError;

/// Load state of one image resource.
#[derive(Clone)]
pub enum ImageState {
    /// Requested, not yet settled.
    Pending,
    /// Decoded and ready to draw.
    Ready(Pixmap),
    /// Load failed; the placeholder bitmap is drawn instead.
    Failed,
}

/// Cache of decoded bitmaps keyed by resource path.
pub struct ImageStore {
    entries: HashMap<String, ImageState>,
    placeholder: Pixmap,
    redraw_hook: Option<Callback>,
}

impl ImageStore {
    /// Creates an empty store with a generated placeholder bitmap.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            placeholder: make_placeholder(),
            redraw_hook: None,
        }
    }

    /// Hook invoked whenever a load settles; the embedding loop uses it to
    /// request a repaint.
    pub fn set_redraw_hook<F>(&mut self, hook: F)
    where
        F: Fn() + 'static,
    {
        self.redraw_hook = Some(Box::new(hook));
    }

    /// Registers a pending load for the path. Idempotent: paths already
    /// known (pending or settled) are left untouched.
    pub fn request(&mut self, path: &str) {
        if !self.entries.contains_key(path) {
            debug!(path, "image load requested");
            self.entries.insert(path.to_string(), ImageState::Pending);
        }
    }

    /// Completes a load for the path.
    ///
    /// Settling a path that was never requested is ignored: a late
    /// completion for an object that was removed or a scene that was
    /// replaced fires harmlessly.
    pub fn settle(&mut self, path: &str, result: Result<Pixmap, AssetError>) {
        let Some(entry) = self.entries.get_mut(path) else {
            debug!(path, "late image settle ignored");
            return;
        };

        *entry = match result {
            Ok(pixmap) => ImageState::Ready(pixmap),
            Err(err) => {
                warn!(path, error = %err, "image load failed, using placeholder");
                ImageState::Failed
            }
        };

        if let Some(hook) = &self.redraw_hook {
            hook();
        }
    }

    /// Reads and decodes the file at `path`, then settles it.
    ///
    /// Synchronous convenience for the headless binary and tests; the
    /// completion policy is identical to an asynchronous settle.
    pub fn load_from_disk(&mut self, path: &str) {
        self.request(path);
        let result = std::fs::read(path)
            .map_err(|e| AssetError::ReadFailed {
                path: path.to_string(),
                reason: e.to_string(),
            })
            .and_then(|bytes| decode_image(path, &bytes));
        self.settle(path, result);
    }

    /// The drawable bitmap for the path, if its load has settled.
    ///
    /// `Failed` entries resolve to the placeholder; `Pending` and unknown
    /// paths resolve to `None` (the renderer falls back to a colored or
    /// neutral rectangle).
    pub fn bitmap_for(&self, path: &str) -> Option<&Pixmap> {
        match self.entries.get(path) {
            Some(ImageState::Ready(pixmap)) => Some(pixmap),
            Some(ImageState::Failed) => Some(&self.placeholder),
            Some(ImageState::Pending) | None => None,
        }
    }

    /// The load state for a path, if requested.
    pub fn state(&self, path: &str) -> Option<&ImageState> {
        self.entries.get(path)
    }

    /// The generated placeholder bitmap.
    pub fn placeholder(&self) -> &Pixmap {
        &self.placeholder
    }

    /// Drops all entries (scene reset). Pending loads may still settle
    /// later; those settles are ignored.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for ImageStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ImageState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageState::Pending => write!(f, "Pending"),
            ImageState::Ready(p) => write!(f, "Ready({}x{})", p.width(), p.height()),
            ImageState::Failed => write!(f, "Failed"),
        }
    }
}

impl std::fmt::Debug for ImageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageStore")
            .field("entries", &self.entries.len())
            .finish()
    }
}

/// Decodes image bytes into a premultiplied tiny-skia pixmap.
pub fn decode_image(path: &str, bytes: &[u8]) -> Result<Pixmap, AssetError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| AssetError::DecodeFailed {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| AssetError::DecodeFailed {
        path: path.to_string(),
        reason: format!("unsupported dimensions {}x{}", width, height),
    })?;

    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    Ok(pixmap)
}

/// Neutral gray square with a lighter border, built once per store.
fn make_placeholder() -> Pixmap {
    let size = 64u32;
    let mut pixmap = Pixmap::new(size, size).expect("placeholder dimensions are valid");
    pixmap.fill(Color::from_rgba8(68, 68, 68, 255));

    let mut paint = Paint::default();
    paint.set_color(Color::from_rgba8(160, 160, 160, 255));
    paint.anti_alias = false;

    let border = 2.0;
    let s = size as f32;
    let edges = [
        Rect::from_xywh(0.0, 0.0, s, border),
        Rect::from_xywh(0.0, s - border, s, border),
        Rect::from_xywh(0.0, 0.0, border, s),
        Rect::from_xywh(s - border, 0.0, border, s),
    ];
    for rect in edges.into_iter().flatten() {
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    pixmap
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn failed_load_resolves_to_placeholder() {
        let mut store = ImageStore::new();
        store.request("assets/missing.png");
        store.settle(
            "assets/missing.png",
            Err(AssetError::ReadFailed {
                path: "assets/missing.png".to_string(),
                reason: "no such file".to_string(),
            }),
        );

        let bitmap = store.bitmap_for("assets/missing.png").unwrap();
        assert_eq!(bitmap.width(), store.placeholder().width());
    }

    #[test]
    fn pending_path_has_no_bitmap() {
        let mut store = ImageStore::new();
        store.request("assets/hero.png");
        assert!(store.bitmap_for("assets/hero.png").is_none());
        assert!(store.bitmap_for("assets/never-requested.png").is_none());
    }

    #[test]
    fn settle_fires_redraw_hook() {
        let mut store = ImageStore::new();
        let fired = Rc::new(Cell::new(0));
        let fired2 = Rc::clone(&fired);
        store.set_redraw_hook(move || fired2.set(fired2.get() + 1));

        store.request("a.png");
        store.settle("a.png", Ok(Pixmap::new(4, 4).unwrap()));
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn late_settle_is_ignored() {
        let mut store = ImageStore::new();
        let fired = Rc::new(Cell::new(0));
        let fired2 = Rc::clone(&fired);
        store.set_redraw_hook(move || fired2.set(fired2.get() + 1));

        // Scene was reset before the callback arrived.
        store.request("a.png");
        store.clear();
        store.settle("a.png", Ok(Pixmap::new(4, 4).unwrap()));

        assert_eq!(fired.get(), 0);
        assert!(store.bitmap_for("a.png").is_none());
    }
}
