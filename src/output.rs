//! Render results: the report a catalog generation returns.
//!
//! Per-record image failures are aggregated here as data rather than left
//! as interleaved log lines: the caller decides whether to print them,
//! retry a fresh run, or ignore them. A report with failures is still a
//! successful render — the PDF exists and contains every record whose
//! image survived.

use crate::error::RecordError;
use serde::Serialize;
use std::path::PathBuf;

/// Result of rendering one (category, size) bucket to a PDF.
#[derive(Debug, Clone, Serialize)]
pub struct RenderReport {
    /// The generated file, `{category}_{size}.pdf` under the output directory.
    pub pdf_path: PathBuf,
    /// Records whose image could not be fetched or processed; each was
    /// skipped entirely (no partial text-only entry is drawn).
    pub failures: Vec<RecordFailure>,
    /// Run counters.
    pub stats: RenderStats,
}

impl RenderReport {
    /// True when every record was drawn.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One skipped record and why.
#[derive(Debug, Clone, Serialize)]
pub struct RecordFailure {
    /// 0-based index within the rendered bucket.
    pub index: usize,
    /// The record's display name (the part of `name` before the first `-`).
    pub name: String,
    pub sku: String,
    pub error: RecordError,
}

/// Counters for one render run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderStats {
    /// Records in the selected bucket.
    pub total_records: usize,
    /// Records drawn onto a page.
    pub rendered_records: usize,
    /// Records skipped after an image failure.
    pub failed_records: usize,
    /// Pages in the produced PDF.
    pub pages: usize,
    /// Wall-clock duration of the whole render.
    pub duration_ms: u64,
}
