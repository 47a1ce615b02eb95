//! Top-level entry points: load, index, and render in one call.
//!
//! These are the three seams an embedding application drives — a desktop
//! form or the bundled CLI both go through load → index → render and add
//! only their own selection UI in between. Everything is synchronous; the
//! pipeline processes one record to completion before the next begins.

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::output::RenderReport;
use crate::pipeline::classify::Classifier;
use crate::pipeline::index::CatalogIndex;
use crate::pipeline::loader;
use crate::pipeline::render::CatalogRenderer;
use crate::record::ProductRecord;
use std::path::Path;
use tracing::info;

/// Load a product list from a `.json` or `.csv` file.
///
/// # Errors
/// Fatal load errors only — see [`crate::pipeline::loader::load`]. A load
/// failure always aborts the run; no catalog is generated without data.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Vec<ProductRecord>, CatalogError> {
    loader::load(path.as_ref())
}

/// Classify and group `records` into the (category, size) index using the
/// config's rule table. Out-of-stock records are excluded here.
pub fn build_index(records: Vec<ProductRecord>, config: &CatalogConfig) -> CatalogIndex {
    let classifier = Classifier::new(config.rules.clone(), config.fallback_label.clone());
    CatalogIndex::build(records, &classifier)
}

/// Render one already-selected bucket to `{category}_{size}.pdf`.
///
/// Returns `Ok` with a [`RenderReport`] even when some records' images
/// failed; those records are listed in the report and skipped in the PDF.
pub fn render_bucket(
    records: &[ProductRecord],
    category: &str,
    size: &str,
    config: &CatalogConfig,
) -> Result<RenderReport, CatalogError> {
    CatalogRenderer::new(config).render(records, category, size)
}

/// One-call convenience: load `input`, index it, select `(category, size)`,
/// and render the bucket.
///
/// # Errors
/// * any fatal load error
/// * [`CatalogError::SelectionNotFound`] when the pair has no bucket
pub fn generate(
    input: impl AsRef<Path>,
    category: &str,
    size: &str,
    config: &CatalogConfig,
) -> Result<RenderReport, CatalogError> {
    let input = input.as_ref();
    info!(
        "Generating catalog for '{}' / '{}' from {}",
        category,
        size,
        input.display()
    );
    let records = load_catalog(input)?;
    let index = build_index(records, config);
    let bucket = index.select(category, size)?;
    render_bucket(bucket, category, size, config)
}
