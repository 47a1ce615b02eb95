//! Error types for the catalogo library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`CatalogError`] — **Fatal**: the run cannot proceed (unsupported file
//!   format, undecodable input, unknown category/size selection). Returned
//!   as `Err(CatalogError)` from the top-level entry points. No partial
//!   catalog is ever produced without data.
//!
//! * [`RecordError`] — **Non-fatal**: a single product's image failed to
//!   download, decode, or re-encode. Stored inside
//!   [`crate::output::RecordFailure`] so callers can inspect partial
//!   success; one bad image never aborts the whole catalog.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the catalogo library.
///
/// Per-record image failures use [`RecordError`] and are collected into the
/// [`crate::output::RenderReport`] rather than propagated here.
#[derive(Debug, Error)]
pub enum CatalogError {
    // ── Load errors ───────────────────────────────────────────────────────
    /// File extension is neither `.json` nor `.csv`.
    #[error("Unsupported file format: '{extension}'\nSupported inputs: .json (array of flat objects) and .csv (header row).")]
    UnsupportedFormat { extension: String },

    /// None of the fallback encodings could decode the file.
    #[error("Could not decode {path:?} with any of the candidate encodings: {attempted:?}")]
    DecodeFailure {
        path: PathBuf,
        attempted: Vec<&'static str>,
    },

    /// Input file was not found at the given path.
    #[error("Input file not found: {path:?}\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file decoded but is not a JSON array of flat objects.
    #[error("Invalid JSON in {path:?}: {detail}")]
    JsonParse { path: PathBuf, detail: String },

    /// The file decoded but a CSV row could not be parsed.
    #[error("Invalid CSV in {path:?}: {detail}")]
    CsvParse { path: PathBuf, detail: String },

    // ── Selection errors ──────────────────────────────────────────────────
    /// The chosen (category, size) pair has no bucket in the index.
    #[error("No hay productos disponibles en la categoría '{category}' y talla '{size}'.")]
    SelectionNotFound { category: String, size: String },

    // ── Render errors ─────────────────────────────────────────────────────
    /// The PDF library rejected a document-level operation (font, save).
    #[error("PDF generation failed: {detail}")]
    PdfRender { detail: String },

    /// Could not create or write the output PDF file.
    #[error("Failed to write output file {path:?}: {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal error for a single product record during rendering.
///
/// Logged with the record's display name and collected into the
/// [`crate::output::RenderReport`]; rendering continues with the next record.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum RecordError {
    /// The image download failed (connection, timeout, bad URL).
    #[error("image download failed for '{name}': {detail}")]
    Fetch { name: String, detail: String },

    /// The server answered with a non-success status.
    #[error("image download for '{name}' returned HTTP {status}")]
    HttpStatus { name: String, status: u16 },

    /// The downloaded bytes were not a decodable image.
    #[error("image decode failed for '{name}': {detail}")]
    Decode { name: String, detail: String },

    /// Re-encoding or embedding the processed image failed.
    #[error("image encode failed for '{name}': {detail}")]
    Encode { name: String, detail: String },
}

impl RecordError {
    /// The display name of the record this failure belongs to.
    pub fn record_name(&self) -> &str {
        match self {
            RecordError::Fetch { name, .. }
            | RecordError::HttpStatus { name, .. }
            | RecordError::Decode { name, .. }
            | RecordError::Encode { name, .. } => name,
        }
    }
}
