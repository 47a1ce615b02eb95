//! # catalogo
//!
//! Generate paginated PDF product catalogs from JSON/CSV stock exports.
//!
//! ## Why this crate?
//!
//! Store stock lives in spreadsheet exports with inconsistent column
//! naming, mixed encodings, and no notion of product category. This crate
//! turns such an export into a printable catalog: it normalizes the
//! records, classifies each product by keyword rules on its name, groups
//! the in-stock items by (category, size), and renders a chosen group
//! into a 2×3-grid PDF with the product images downloaded, recompressed,
//! and framed alongside the name, colour, size, and availability.
//!
//! ## Pipeline Overview
//!
//! ```text
//! stock.json / stock.csv
//!  │
//!  ├─ 1. Load      decode (utf-8-sig → utf-8 → latin-1), normalize keys
//!  ├─ 2. Classify  ordered keyword rules, first full match wins
//!  ├─ 3. Index     in-stock records bucketed by (category, size)
//!  ├─ 4. Select    interactive menu or --category/--size flags
//!  └─ 5. Render    fetch + recompress images, 2×3 grid, auto-paginate
//!                  → {category}_{size}.pdf
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use catalogo::{generate, CatalogConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CatalogConfig::default();
//!     let report = generate("stock.json", "Jogger", "M", &config)?;
//!     println!("wrote {}", report.pdf_path.display());
//!     for failure in &report.failures {
//!         eprintln!("skipped {}: {}", failure.name, failure.error);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Failure model
//!
//! Load-time errors (unsupported format, undecodable file) are fatal.
//! Per-record image failures during rendering never abort the catalog:
//! the record is skipped, the failure lands in the
//! [`RenderReport`](output::RenderReport), and rendering continues.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `catalogo` binary (clap + anyhow + indicatif) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! catalogo = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod record;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{CatalogConfig, CatalogConfigBuilder};
pub use error::{CatalogError, RecordError};
pub use generate::{build_index, generate, load_catalog, render_bucket};
pub use output::{RecordFailure, RenderReport, RenderStats};
pub use pipeline::classify::{CategoryRule, Classifier, UNCATEGORIZED_LABEL};
pub use pipeline::index::CatalogIndex;
pub use progress::{NoopProgress, ProgressCallback, RenderProgress};
pub use record::{normalize_key, ProductRecord};
