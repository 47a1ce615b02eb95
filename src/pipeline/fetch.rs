//! Product-image acquisition: blocking download, shrink, recompress.
//!
//! The pipeline is fully sequential, so a blocking `reqwest` client is the
//! whole concurrency story: one image is fetched, processed, and drawn to
//! completion before the next record begins. There are no retries — a
//! failed fetch becomes a [`RecordError`] and the record is skipped.
//!
//! ## The two-pass recompression
//!
//! Each image goes through two JPEG passes: first a shrink-to-1300px +
//! quality-99 "optimization" pass, then a quality-85 pass producing the
//! bytes actually embedded in the page. The intermediate pass is decoded
//! back before the second encode, so the embedded image carries both
//! generations of compression.

use crate::config::CatalogConfig;
use crate::error::RecordError;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use std::io::Cursor;
use std::time::Duration;
use tracing::{debug, warn};

/// A downloaded, optimized image ready to embed: final JPEG bytes plus the
/// pixel dimensions the display size is derived from.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub width_px: u32,
    pub height_px: u32,
    /// Quality-85 JPEG, the bytes drawn into the PDF page.
    pub jpeg: Vec<u8>,
}

impl PreparedImage {
    /// Height / width, used to scale the fixed 2-inch display width.
    pub fn aspect(&self) -> f32 {
        self.height_px as f32 / self.width_px as f32
    }
}

/// Downloads product images over a shared blocking HTTP client.
pub struct ImageFetcher {
    client: reqwest::blocking::Client,
}

impl ImageFetcher {
    /// Build a fetcher with the configured request timeout.
    ///
    /// If the client cannot be built with the timeout (a TLS backend problem,
    /// in practice) the failure is logged and a default client is used, so a
    /// render run still proceeds — its fetches just use the client defaults.
    pub fn new(timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                warn!(
                    "HTTP client build failed ({e}); using default client without the {timeout_secs}s timeout"
                );
                reqwest::blocking::Client::new()
            });
        Self { client }
    }

    /// `GET url` → raw body bytes. `name` tags the failure with the record.
    pub fn fetch(&self, url: &str, name: &str) -> Result<Vec<u8>, RecordError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| RecordError::Fetch {
                name: name.to_string(),
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecordError::HttpStatus {
                name: name.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().map_err(|e| RecordError::Fetch {
            name: name.to_string(),
            detail: e.to_string(),
        })?;
        debug!("Fetched {} bytes for '{}'", bytes.len(), name);
        Ok(bytes.to_vec())
    }
}

/// Decode, shrink, and recompress raw image bytes per the config.
///
/// Shrink is aspect-preserving and shrink-only: an image already within
/// `max_image_px` on both dimensions is never upscaled.
pub fn prepare(bytes: &[u8], config: &CatalogConfig, name: &str) -> Result<PreparedImage, RecordError> {
    let mut img = image::load_from_memory(bytes).map_err(|e| RecordError::Decode {
        name: name.to_string(),
        detail: e.to_string(),
    })?;

    let max = config.max_image_px;
    if img.width() > max || img.height() > max {
        let (w, h) = (img.width(), img.height());
        img = img.thumbnail(max, max);
        debug!(
            "Resized '{}' {}x{} → {}x{}",
            name,
            w,
            h,
            img.width(),
            img.height()
        );
    }

    // Optimization pass: JPEG at high quality, decoded back so the second
    // pass compresses the already-recompressed pixels.
    let optimized = encode_jpeg(&img, config.optimize_quality, name)?;
    let img = image::load_from_memory(&optimized).map_err(|e| RecordError::Decode {
        name: name.to_string(),
        detail: e.to_string(),
    })?;

    let jpeg = encode_jpeg(&img, config.embed_quality, name)?;
    Ok(PreparedImage {
        width_px: img.width(),
        height_px: img.height(),
        jpeg,
    })
}

fn encode_jpeg(img: &DynamicImage, quality: u8, name: &str) -> Result<Vec<u8>, RecordError> {
    // JPEG has no alpha channel; flatten unconditionally.
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut buf), quality);
    rgb.write_with_encoder(encoder)
        .map_err(|e| RecordError::Encode {
            name: name.to_string(),
            detail: e.to_string(),
        })?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbImage;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb([200, 30, 30])));
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .expect("png encode");
        buf
    }

    #[test]
    fn prepare_produces_jpeg_and_keeps_small_images_unscaled() {
        let config = CatalogConfig::default();
        let prepared = prepare(&png_bytes(80, 120), &config, "test").expect("prepare");
        assert_eq!((prepared.width_px, prepared.height_px), (80, 120));
        // JPEG magic bytes.
        assert_eq!(&prepared.jpeg[..2], &[0xFF, 0xD8]);
        assert!((prepared.aspect() - 1.5).abs() < f32::EPSILON);
    }

    #[test]
    fn prepare_shrinks_oversized_images_preserving_aspect() {
        let config = CatalogConfig::default();
        let prepared = prepare(&png_bytes(2600, 1300), &config, "test").expect("prepare");
        assert_eq!(prepared.width_px, 1300);
        assert_eq!(prepared.height_px, 650);
    }

    #[test]
    fn prepare_rejects_non_image_bytes() {
        let config = CatalogConfig::default();
        let err = prepare(b"definitely not an image", &config, "Jogger Negro").unwrap_err();
        assert!(matches!(err, RecordError::Decode { .. }));
        assert_eq!(err.record_name(), "Jogger Negro");
    }

    #[test]
    fn fetcher_builds_for_any_timeout() {
        // Construction is infallible; a bad build falls back to the default
        // client instead of panicking.
        for secs in [0, 1, 30, 86_400] {
            let _ = ImageFetcher::new(secs);
        }
    }

    #[test]
    fn unreachable_url_fails_with_fetch_error() {
        let fetcher = ImageFetcher::new(2);
        // Port 1 is unassigned on loopback; connection is refused immediately.
        let err = fetcher
            .fetch("http://127.0.0.1:1/img.jpg", "Hoodie")
            .unwrap_err();
        assert!(matches!(err, RecordError::Fetch { .. }));
        assert_eq!(err.record_name(), "Hoodie");
    }
}
