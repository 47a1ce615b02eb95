//! Configuration for catalog generation.
//!
//! All behaviour is controlled through [`CatalogConfig`], built via its
//! [`CatalogConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share a config between the CLI and an embedding UI, and to
//! diff two runs to understand why their catalogs differ.
//!
//! The classification rule table lives here as an explicit ordered value —
//! callers that need different categories pass their own table instead of
//! editing a process-wide one.

use crate::error::CatalogError;
use crate::pipeline::classify::{CategoryRule, UNCATEGORIZED_LABEL};
use crate::progress::ProgressCallback;
use std::fmt;
use std::path::PathBuf;

/// Configuration for one catalog generation run.
///
/// Built via [`CatalogConfig::builder()`] or [`CatalogConfig::default()`].
///
/// # Example
/// ```rust
/// use catalogo::CatalogConfig;
///
/// let config = CatalogConfig::builder()
///     .show_price(true)
///     .output_dir("catalogs")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct CatalogConfig {
    /// Ordered classification rules; first full match wins. Default: the six
    /// production categories.
    pub rules: Vec<CategoryRule>,

    /// Label for products no rule matches. Default: `"Sin categoría"`.
    pub fallback_label: String,

    /// Draw the `Precio:` line under each product. Default: false.
    ///
    /// Both variants shipped historically; neither is canonical, so the
    /// choice is a config flag rather than a constant.
    pub show_price: bool,

    /// Maximum image dimension (width or height) after the shrink pass.
    /// Shrink-only: smaller images are never upscaled. Default: 1300.
    pub max_image_px: u32,

    /// JPEG quality for the intermediate optimization pass. Default: 99.
    pub optimize_quality: u8,

    /// JPEG quality for the bytes embedded in the page. Default: 85.
    pub embed_quality: u8,

    /// Fixed display width of each product image, inches. Height follows the
    /// source aspect ratio. Default: 2.0.
    pub display_width_in: f32,

    /// Maximum characters per wrapped name line. Default: 15.
    pub wrap_width: usize,

    /// Directory the `{category}_{size}.pdf` file is written to. Default: `.`.
    pub output_dir: PathBuf,

    /// Per-request image download timeout in seconds. Default: 30 (the HTTP
    /// client default; no retry policy exists at any timeout).
    pub download_timeout_secs: u64,

    /// Optional per-record progress callback (drives the CLI progress bar).
    pub progress: Option<ProgressCallback>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            rules: CategoryRule::default_rules(),
            fallback_label: UNCATEGORIZED_LABEL.to_string(),
            show_price: false,
            max_image_px: 1300,
            optimize_quality: 99,
            embed_quality: 85,
            display_width_in: 2.0,
            wrap_width: 15,
            output_dir: PathBuf::from("."),
            download_timeout_secs: 30,
            progress: None,
        }
    }
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("rules", &self.rules.len())
            .field("fallback_label", &self.fallback_label)
            .field("show_price", &self.show_price)
            .field("max_image_px", &self.max_image_px)
            .field("optimize_quality", &self.optimize_quality)
            .field("embed_quality", &self.embed_quality)
            .field("display_width_in", &self.display_width_in)
            .field("wrap_width", &self.wrap_width)
            .field("output_dir", &self.output_dir)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .field("progress", &self.progress.as_ref().map(|_| "<dyn RenderProgress>"))
            .finish()
    }
}

impl CatalogConfig {
    /// Create a new builder for `CatalogConfig`.
    pub fn builder() -> CatalogConfigBuilder {
        CatalogConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`CatalogConfig`].
#[derive(Debug)]
pub struct CatalogConfigBuilder {
    config: CatalogConfig,
}

impl CatalogConfigBuilder {
    pub fn rules(mut self, rules: Vec<CategoryRule>) -> Self {
        self.config.rules = rules;
        self
    }

    pub fn fallback_label(mut self, label: impl Into<String>) -> Self {
        self.config.fallback_label = label.into();
        self
    }

    pub fn show_price(mut self, v: bool) -> Self {
        self.config.show_price = v;
        self
    }

    pub fn max_image_px(mut self, px: u32) -> Self {
        self.config.max_image_px = px.max(1);
        self
    }

    pub fn optimize_quality(mut self, q: u8) -> Self {
        self.config.optimize_quality = q;
        self
    }

    pub fn embed_quality(mut self, q: u8) -> Self {
        self.config.embed_quality = q;
        self
    }

    pub fn display_width_in(mut self, inches: f32) -> Self {
        self.config.display_width_in = inches;
        self
    }

    pub fn wrap_width(mut self, chars: usize) -> Self {
        self.config.wrap_width = chars;
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    pub fn progress(mut self, callback: ProgressCallback) -> Self {
        self.config.progress = Some(callback);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<CatalogConfig, CatalogError> {
        let c = &self.config;
        if c.rules.is_empty() {
            return Err(CatalogError::InvalidConfig(
                "at least one category rule is required".into(),
            ));
        }
        for quality in [c.optimize_quality, c.embed_quality] {
            if !(1..=100).contains(&quality) {
                return Err(CatalogError::InvalidConfig(format!(
                    "JPEG quality must be 1–100, got {quality}"
                )));
            }
        }
        if c.wrap_width == 0 {
            return Err(CatalogError::InvalidConfig(
                "wrap width must be ≥ 1".into(),
            ));
        }
        if !(c.display_width_in > 0.0) {
            return Err(CatalogError::InvalidConfig(
                "display width must be positive".into(),
            ));
        }
        Ok(self.config)
    }
}
