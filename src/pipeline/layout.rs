//! Fixed page geometry and grid placement for the catalog.
//!
//! All positions are in PDF points (1 pt = 1/72 in), measured from the
//! bottom-left of a US-Letter page the way the PDF coordinate space does.
//! The grid is 2 columns × 3 rows, six records per page, and every offset
//! below is a fixed layout constant — label positions are *not* derived
//! from content height, so a tall image can overlap its labels exactly as
//! the production layout does.

/// Records per page: 2 columns × 3 rows.
pub const RECORDS_PER_PAGE: usize = 6;
/// Columns per page.
pub const COLUMNS: usize = 2;

/// US-Letter page, points.
pub const PAGE_WIDTH_PT: f32 = 612.0;
pub const PAGE_HEIGHT_PT: f32 = 792.0;

/// Page margin: 0.5 in.
pub const MARGIN_PT: f32 = 36.0;
/// Horizontal pitch between columns: 4 in.
pub const COLUMN_PITCH_PT: f32 = 288.0;
/// Vertical pitch between rows: 3.5 in.
pub const ROW_PITCH_PT: f32 = 252.0;

/// Drop-shadow offset from the image origin.
pub const SHADOW_DX_PT: f32 = -3.0;
pub const SHADOW_DY_PT: f32 = -5.0;
/// The image itself sits slightly right of the slot anchor.
pub const IMAGE_DX_PT: f32 = 2.0;

/// Label column x-offset from the slot anchor: 2.35 in.
pub const LABEL_X_OFFSET_PT: f32 = 169.2;
/// First wrapped name line sits this far below the slot's top y.
pub const NAME_Y_OFFSET_PT: f32 = 50.0;
/// Each further wrapped line drops by this pitch.
pub const LINE_PITCH_PT: f32 = 14.0;
/// Fixed y-offsets (below the slot's top y) for the remaining labels.
pub const COLOR_Y_OFFSET_PT: f32 = 99.0;
pub const SIZE_Y_OFFSET_PT: f32 = 120.0;
pub const PRICE_Y_OFFSET_PT: f32 = 144.0;
pub const STOCK_Y_OFFSET_PT: f32 = 168.0;

/// Font sizes.
pub const BODY_FONT_SIZE: f32 = 12.0;
pub const SIZE_FONT_SIZE: f32 = 15.0;

/// Grid position of one record within the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSlot {
    /// 0-based page number.
    pub page: usize,
    /// 0-based row (top to bottom).
    pub row: usize,
    /// 0-based column (left to right).
    pub col: usize,
}

/// Position of record `index` within its bucket:
/// page `i / 6`, row `(i % 6) / 2`, column `(i % 6) % 2`.
pub fn slot_for(index: usize) -> GridSlot {
    let position = index % RECORDS_PER_PAGE;
    GridSlot {
        page: index / RECORDS_PER_PAGE,
        row: position / COLUMNS,
        col: position % COLUMNS,
    }
}

/// The slot's anchor point `(x, y)` in points: x grows rightward from the
/// left margin, y is the slot's *top* edge measured from the page bottom.
pub fn anchor_pt(slot: GridSlot) -> (f32, f32) {
    let x = MARGIN_PT + slot.col as f32 * COLUMN_PITCH_PT;
    let y = PAGE_HEIGHT_PT - (MARGIN_PT + slot.row as f32 * ROW_PITCH_PT);
    (x, y)
}

/// Greedy word-wrap at `width` characters per line.
///
/// Words longer than the width are hard-broken; runs of whitespace collapse.
/// Mirrors the wrapping the catalog labels were designed around.
pub fn wrap_label(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut rest = word;
        loop {
            let rest_len = rest.chars().count();
            if current_len == 0 {
                if rest_len <= width {
                    current.push_str(rest);
                    current_len = rest_len;
                    break;
                }
                // Hard-break an over-long word at the width boundary.
                let cut = rest
                    .char_indices()
                    .nth(width)
                    .map(|(i, _)| i)
                    .unwrap_or(rest.len());
                lines.push(rest[..cut].to_string());
                rest = &rest[cut..];
            } else if current_len + 1 + rest_len <= width {
                current.push(' ');
                current.push_str(rest);
                current_len += 1 + rest_len;
                break;
            } else {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_records_span_two_pages() {
        // Records 0–5 fill page 0; record 6 opens page 1 alone.
        for i in 0..6 {
            assert_eq!(slot_for(i).page, 0, "record {i}");
        }
        assert_eq!(
            slot_for(6),
            GridSlot {
                page: 1,
                row: 0,
                col: 0
            }
        );
    }

    #[test]
    fn grid_walks_columns_then_rows() {
        assert_eq!(slot_for(0), GridSlot { page: 0, row: 0, col: 0 });
        assert_eq!(slot_for(1), GridSlot { page: 0, row: 0, col: 1 });
        assert_eq!(slot_for(2), GridSlot { page: 0, row: 1, col: 0 });
        assert_eq!(slot_for(5), GridSlot { page: 0, row: 2, col: 1 });
        assert_eq!(slot_for(11), GridSlot { page: 1, row: 2, col: 1 });
    }

    #[test]
    fn anchor_positions_match_the_fixed_geometry() {
        let (x, y) = anchor_pt(slot_for(0));
        assert_eq!((x, y), (36.0, 756.0));

        let (x, y) = anchor_pt(slot_for(1));
        assert_eq!((x, y), (324.0, 756.0));

        let (x, y) = anchor_pt(slot_for(4));
        assert_eq!((x, y), (36.0, 252.0));
    }

    #[test]
    fn wrap_fills_greedily_to_width() {
        assert_eq!(
            wrap_label("Hoodie Oversize Fit", 15),
            vec!["Hoodie Oversize", "Fit"]
        );
        assert_eq!(wrap_label("Jogger", 15), vec!["Jogger"]);
        assert_eq!(wrap_label("", 15), Vec::<String>::new());
    }

    #[test]
    fn wrap_hard_breaks_over_long_words() {
        assert_eq!(
            wrap_label("Superextralargometraje", 10),
            vec!["Superextra", "largometra", "je"]
        );
    }
}
