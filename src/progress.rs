//! Progress-callback trait for per-record rendering events.
//!
//! Inject an [`Arc<dyn RenderProgress>`] via
//! [`crate::config::CatalogConfigBuilder::progress`] to receive events as
//! the renderer works through a bucket — the CLI forwards them to a
//! terminal progress bar; an embedding UI can forward them to a status
//! widget without the library knowing how the host communicates.
//!
//! Rendering is strictly sequential, so events always arrive in record
//! order from a single thread; the `Send + Sync` bound only exists so the
//! callback can be shared as an `Arc` across config clones.

use std::path::Path;
use std::sync::Arc;

/// Called by the renderer as it processes each record of a bucket.
///
/// All methods have default no-op implementations so callers only override
/// what they care about.
pub trait RenderProgress: Send + Sync {
    /// Called once before any record is processed.
    fn on_render_start(&self, total_records: usize) {
        let _ = total_records;
    }

    /// Called just before a record's image is fetched.
    ///
    /// `index` is 0-based; `name` is the record's display name.
    fn on_record_start(&self, index: usize, total: usize, name: &str) {
        let _ = (index, total, name);
    }

    /// Called when a record has been drawn onto its page.
    fn on_record_complete(&self, index: usize, total: usize) {
        let _ = (index, total);
    }

    /// Called when a record is skipped after an image failure.
    fn on_record_error(&self, index: usize, total: usize, error: &str) {
        let _ = (index, total, error);
    }

    /// Called once after the PDF has been written.
    fn on_render_complete(&self, total: usize, rendered: usize, pdf_path: &Path) {
        let _ = (total, rendered, pdf_path);
    }
}

/// A no-op implementation for callers that don't need progress events.
pub struct NoopProgress;

impl RenderProgress for NoopProgress {}

/// Convenience alias matching the type stored in [`crate::config::CatalogConfig`].
pub type ProgressCallback = Arc<dyn RenderProgress>;
