//! Record loading: JSON or CSV file → normalized [`ProductRecord`] list.
//!
//! ## Why an explicit encoding-fallback list?
//!
//! Stock exports come from spreadsheet tools on Windows machines and arrive
//! in three flavours: UTF-8 with a BOM, plain UTF-8, and a single-byte
//! Western-European encoding. Rather than sniffing, we try a fixed ordered
//! candidate list and take the first clean decode; if every candidate fails
//! the error names all of them so the user knows exactly what was tried.
//!
//! Decoding and parsing are separate phases: an encoding is only retried on
//! a *decode* failure. A file that decodes as UTF-8 but contains invalid
//! JSON fails the load with a parse error, not a fallback to Latin-1.

use crate::error::CatalogError;
use crate::record::ProductRecord;
use encoding_rs::WINDOWS_1252;
use serde_json::Value;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info};

/// Candidate text encodings, tried in order. First success wins.
const ENCODING_CANDIDATES: &[TextEncoding] =
    &[TextEncoding::Utf8Sig, TextEncoding::Utf8, TextEncoding::Latin1];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextEncoding {
    /// UTF-8, stripping a leading byte-order mark if present.
    Utf8Sig,
    /// Plain strict UTF-8.
    Utf8,
    /// Single-byte Western-European fallback (windows-1252).
    Latin1,
}

impl TextEncoding {
    fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8Sig => "utf-8-sig",
            TextEncoding::Utf8 => "utf-8",
            TextEncoding::Latin1 => "latin-1",
        }
    }

    /// Attempt a strict decode; `None` means "try the next candidate".
    fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8Sig => {
                let stripped = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
                std::str::from_utf8(stripped).ok().map(str::to_string)
            }
            TextEncoding::Utf8 => std::str::from_utf8(bytes).ok().map(str::to_string),
            TextEncoding::Latin1 => {
                let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
                if had_errors {
                    None
                } else {
                    Some(text.into_owned())
                }
            }
        }
    }
}

/// Load a product list from a `.json` or `.csv` file.
///
/// Every key of every record is normalized (lowercase, trim, spaces to
/// underscores) exactly once here; values are kept verbatim.
///
/// # Errors
/// * [`CatalogError::UnsupportedFormat`] for any other extension
/// * [`CatalogError::DecodeFailure`] when no candidate encoding decodes the file
/// * [`CatalogError::JsonParse`] / [`CatalogError::CsvParse`] for malformed content
pub fn load(path: &Path) -> Result<Vec<ProductRecord>, CatalogError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let records = match extension.as_str() {
        "json" => {
            let text = read_text(path)?;
            parse_json(&text, path)?
        }
        "csv" => {
            let text = read_text(path)?;
            parse_csv(&text, path)?
        }
        _ => {
            return Err(CatalogError::UnsupportedFormat {
                extension: if extension.is_empty() {
                    String::new()
                } else {
                    format!(".{extension}")
                },
            })
        }
    };

    info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Read the file and decode it with the first succeeding candidate encoding.
fn read_text(path: &Path) -> Result<String, CatalogError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => CatalogError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => CatalogError::FileNotFound {
            path: path.to_path_buf(),
        },
    })?;

    for candidate in ENCODING_CANDIDATES {
        if let Some(text) = candidate.decode(&bytes) {
            debug!("Decoded {} as {}", path.display(), candidate.name());
            return Ok(text);
        }
    }

    Err(CatalogError::DecodeFailure {
        path: path.to_path_buf(),
        attempted: ENCODING_CANDIDATES.iter().map(|c| c.name()).collect(),
    })
}

/// Parse a JSON array of flat objects into records.
///
/// Scalar values are stringified (`5` → `"5"`, `null` → `""`) so the rest of
/// the pipeline sees the same string-typed fields a CSV load produces.
fn parse_json(text: &str, path: &Path) -> Result<Vec<ProductRecord>, CatalogError> {
    let value: Value = serde_json::from_str(text).map_err(|e| CatalogError::JsonParse {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let items = value.as_array().ok_or_else(|| CatalogError::JsonParse {
        path: path.to_path_buf(),
        detail: "expected a top-level array of objects".to_string(),
    })?;

    let mut records = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let object = item.as_object().ok_or_else(|| CatalogError::JsonParse {
            path: path.to_path_buf(),
            detail: format!("element {i} is not an object"),
        })?;
        records.push(ProductRecord::from_fields(
            object
                .iter()
                .map(|(key, value)| (key.clone(), scalar_to_string(value).into_owned())),
        ));
    }
    Ok(records)
}

fn scalar_to_string(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s),
        Value::Null => Cow::Borrowed(""),
        other => Cow::Owned(other.to_string()),
    }
}

/// Parse CSV with a header row; fields are taken positionally from the header.
fn parse_csv(text: &str, path: &Path) -> Result<Vec<ProductRecord>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| CatalogError::CsvParse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?
        .clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| CatalogError::CsvParse {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        records.push(ProductRecord::from_fields(
            headers
                .iter()
                .zip(row.iter())
                .map(|(key, value)| (key.to_string(), value.to_string())),
        ));
    }
    Ok(records)
}
