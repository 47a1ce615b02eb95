//! Catalog rendering: one (category, size) bucket → a paginated PDF.
//!
//! ## Drawing model
//!
//! Records are processed strictly in input order. Each record's grid slot
//! follows from its index alone (see [`crate::pipeline::layout`]); a new
//! page is opened right before each group of six, except before the very
//! first record. Per slot the renderer draws a filled black drop-shadow
//! rectangle, the product image, a stroked outline rectangle, the wrapped
//! display name, and the colour / size / stock (optionally price) labels
//! at fixed offsets.
//!
//! ## Failure policy
//!
//! Any image failure (network, decode, re-encode, embed) is logged with
//! the record's display name, recorded in the report, and the record is
//! skipped entirely — no partial text-only entry, and never an aborted
//! catalog. Images are embedded from in-memory JPEG buffers, so a failed
//! record leaves nothing behind on disk.

use crate::config::CatalogConfig;
use crate::error::{CatalogError, RecordError};
use crate::output::{RecordFailure, RenderReport, RenderStats};
use crate::pipeline::fetch::{self, ImageFetcher, PreparedImage};
use crate::pipeline::layout::{
    self, anchor_pt, slot_for, wrap_label, BODY_FONT_SIZE, COLOR_Y_OFFSET_PT, IMAGE_DX_PT,
    LABEL_X_OFFSET_PT, LINE_PITCH_PT, NAME_Y_OFFSET_PT, PRICE_Y_OFFSET_PT, RECORDS_PER_PAGE,
    SHADOW_DX_PT, SHADOW_DY_PT, SIZE_FONT_SIZE, SIZE_Y_OFFSET_PT, STOCK_Y_OFFSET_PT,
};
use crate::record::ProductRecord;
use printpdf::image_crate::codecs::jpeg::JpegDecoder;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument,
    PdfLayerReference, Rect, Rgb,
};
use std::fs::File;
use std::io::{BufWriter, Cursor};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Points → printpdf millimetres.
fn mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

/// Renders product buckets into PDF catalogs.
///
/// Owns the HTTP client for image downloads; the open PDF document is local
/// to each [`CatalogRenderer::render`] call and shared with nothing else.
pub struct CatalogRenderer<'a> {
    config: &'a CatalogConfig,
    fetcher: ImageFetcher,
}

impl<'a> CatalogRenderer<'a> {
    pub fn new(config: &'a CatalogConfig) -> Self {
        Self {
            fetcher: ImageFetcher::new(config.download_timeout_secs),
            config,
        }
    }

    /// Render `records` (one bucket, input order) to
    /// `{category}_{size}.pdf` under the configured output directory.
    ///
    /// Returns the report even when some records failed; fails only on
    /// document-level errors (font registration, file write).
    pub fn render(
        &self,
        records: &[ProductRecord],
        category: &str,
        size: &str,
    ) -> Result<RenderReport, CatalogError> {
        let start = Instant::now();
        let pdf_path = self.config.output_dir.join(format!("{category}_{size}.pdf"));
        info!(
            "Rendering {} records for '{}' / '{}' → {}",
            records.len(),
            category,
            size,
            pdf_path.display()
        );

        let (doc, first_page, first_layer) = PdfDocument::new(
            format!("{category} {size}"),
            mm(layout::PAGE_WIDTH_PT),
            mm(layout::PAGE_HEIGHT_PT),
            "Layer 1",
        );
        let body_font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| CatalogError::PdfRender { detail: e.to_string() })?;
        let bold_font = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| CatalogError::PdfRender { detail: e.to_string() })?;

        let mut layer = doc.get_page(first_page).get_layer(first_layer);
        let mut pages = 1usize;
        let mut failures: Vec<RecordFailure> = Vec::new();

        if let Some(ref cb) = self.config.progress {
            cb.on_render_start(records.len());
        }

        for (i, record) in records.iter().enumerate() {
            let slot = slot_for(i);
            // Page break right before each new group of six, except the first.
            if slot.page >= pages {
                let (page, layer_idx) = doc.add_page(
                    mm(layout::PAGE_WIDTH_PT),
                    mm(layout::PAGE_HEIGHT_PT),
                    "Layer 1",
                );
                layer = doc.get_page(page).get_layer(layer_idx);
                pages += 1;
            }

            let name = record.display_name().to_string();
            if let Some(ref cb) = self.config.progress {
                cb.on_record_start(i, records.len(), &name);
            }

            let prepared = self
                .prepare_record(record, &name)
                .and_then(|p| embed_image(&p, &name).map(|img| (p, img)));
            match prepared {
                Ok((prepared, image)) => {
                    let (x, y) = anchor_pt(slot);
                    self.draw_record(&layer, &body_font, &bold_font, record, &prepared, image, x, y);
                    debug!("Drew '{}' at page {} slot ({}, {})", name, slot.page, slot.row, slot.col);
                    if let Some(ref cb) = self.config.progress {
                        cb.on_record_complete(i, records.len());
                    }
                }
                Err(error) => {
                    warn!("Skipping '{}': {}", name, error);
                    if let Some(ref cb) = self.config.progress {
                        cb.on_record_error(i, records.len(), &error.to_string());
                    }
                    failures.push(RecordFailure {
                        index: i,
                        name,
                        sku: record.sku.clone(),
                        error,
                    });
                }
            }
        }

        let file = File::create(&pdf_path).map_err(|e| CatalogError::OutputWriteFailed {
            path: pdf_path.clone(),
            source: e,
        })?;
        doc.save(&mut BufWriter::new(file))
            .map_err(|e| CatalogError::PdfRender { detail: e.to_string() })?;

        let expected_pages = records.len().saturating_sub(1) / RECORDS_PER_PAGE + 1;
        debug_assert_eq!(pages, expected_pages.max(1));

        let stats = RenderStats {
            total_records: records.len(),
            rendered_records: records.len() - failures.len(),
            failed_records: failures.len(),
            pages,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            "PDF creado: {} ({}/{} records, {} pages, {}ms)",
            pdf_path.display(),
            stats.rendered_records,
            stats.total_records,
            stats.pages,
            stats.duration_ms
        );
        if let Some(ref cb) = self.config.progress {
            cb.on_render_complete(stats.total_records, stats.rendered_records, &pdf_path);
        }

        Ok(RenderReport {
            pdf_path,
            failures,
            stats,
        })
    }

    /// Download and recompress one record's image.
    fn prepare_record(
        &self,
        record: &ProductRecord,
        name: &str,
    ) -> Result<PreparedImage, RecordError> {
        let bytes = self.fetcher.fetch(&record.thumbnail_id, name)?;
        fetch::prepare(&bytes, self.config, name)
    }

    /// Draw one record into its slot: shadow, image, outline, labels.
    ///
    /// `(x, y)` is the slot anchor — x at the slot's left edge, y at its top,
    /// both in points from the page's bottom-left.
    #[allow(clippy::too_many_arguments)]
    fn draw_record(
        &self,
        layer: &PdfLayerReference,
        body_font: &IndirectFontRef,
        bold_font: &IndirectFontRef,
        record: &ProductRecord,
        prepared: &PreparedImage,
        image: Image,
        x: f32,
        y: f32,
    ) {
        let display_width_pt = self.config.display_width_in * 72.0;
        let display_height_pt = display_width_pt * prepared.aspect();

        layer.set_fill_color(black());
        layer.set_outline_color(black());
        layer.set_outline_thickness(1.0);

        // Drop shadow: a filled rect offset from the image bounds.
        let shadow = Rect::new(
            mm(x + SHADOW_DX_PT),
            mm(y - display_height_pt + SHADOW_DY_PT),
            mm(x + SHADOW_DX_PT + display_width_pt),
            mm(y + SHADOW_DY_PT),
        )
        .with_mode(PaintMode::Fill);
        layer.add_rect(shadow);

        // printpdf sizes images from dpi: width_in = px / dpi.
        let dpi = prepared.width_px as f32 / self.config.display_width_in;
        image.add_to_layer(
            layer.clone(),
            ImageTransform {
                translate_x: Some(mm(x + IMAGE_DX_PT)),
                translate_y: Some(mm(y - display_height_pt)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );

        // Outline on the image bounds.
        let outline = Rect::new(
            mm(x + IMAGE_DX_PT),
            mm(y - display_height_pt),
            mm(x + IMAGE_DX_PT + display_width_pt),
            mm(y),
        )
        .with_mode(PaintMode::Stroke);
        layer.add_rect(outline);

        // Wrapped display name.
        let label_x = x + LABEL_X_OFFSET_PT;
        let mut text_y = y - NAME_Y_OFFSET_PT;
        for line in wrap_label(record.display_name(), self.config.wrap_width) {
            layer.use_text(line, BODY_FONT_SIZE, mm(label_x), mm(text_y), body_font);
            text_y -= LINE_PITCH_PT;
        }

        layer.use_text(
            format!("Color {}", record.color),
            BODY_FONT_SIZE,
            mm(label_x),
            mm(y - COLOR_Y_OFFSET_PT),
            body_font,
        );
        layer.use_text(
            record.size.clone(),
            SIZE_FONT_SIZE,
            mm(label_x),
            mm(y - SIZE_Y_OFFSET_PT),
            bold_font,
        );
        if self.config.show_price {
            layer.use_text(
                format!("Precio: {}", record.regular_price),
                BODY_FONT_SIZE,
                mm(label_x),
                mm(y - PRICE_Y_OFFSET_PT),
                body_font,
            );
        }
        layer.use_text(
            format!("Disponible: {}", record.stock),
            BODY_FONT_SIZE,
            mm(label_x),
            mm(y - STOCK_Y_OFFSET_PT),
            body_font,
        );
    }
}

/// Re-decode the prepared JPEG into the PDF library's image object.
///
/// Happens before anything is drawn for the record, so an embed failure
/// skips the record as cleanly as a download failure would.
fn embed_image(prepared: &PreparedImage, name: &str) -> Result<Image, RecordError> {
    let decoder =
        JpegDecoder::new(Cursor::new(prepared.jpeg.as_slice())).map_err(|e| RecordError::Encode {
            name: name.to_string(),
            detail: e.to_string(),
        })?;
    Image::try_from(decoder).map_err(|e| RecordError::Encode {
        name: name.to_string(),
        detail: e.to_string(),
    })
}
