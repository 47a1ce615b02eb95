//! The product record: one row of the loaded stock export.
//!
//! Stock exports arrive with wildly inconsistent column naming
//! (`"Regular Price"`, `"regular_price"`, `" Stock "`), so every key goes
//! through [`normalize_key`] exactly once at load time. The fields the
//! pipeline consumes downstream are promoted to typed members; everything
//! else is preserved verbatim in [`ProductRecord::extra`] so unknown
//! columns survive a load → inspect round-trip.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalize a field key: lowercase, trim surrounding whitespace, replace
/// internal spaces with underscores.
///
/// Idempotent: normalizing an already-normalized key returns it unchanged.
pub fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace(' ', "_")
}

/// One product row, keyed by normalized field names.
///
/// All values are kept as the literal strings found in the source file —
/// no trimming, no numeric parsing. In particular [`ProductRecord::is_in_stock`]
/// is a string-equality check, so `"0.0"` and `" 0"` count as in stock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product display name, e.g. `"Hoodie Oversize Fit - Negro"`.
    pub name: String,
    /// Stock-keeping unit.
    pub sku: String,
    /// Units available, as the literal source string.
    pub stock: String,
    /// List price, as the literal source string.
    pub regular_price: String,
    /// Product image URL (the export stores it under `thumbnail_id`).
    pub thumbnail_id: String,
    /// Colour attribute (`attribute_pa_color`).
    pub color: String,
    /// Size attribute (`attribute_pa_talla`).
    pub size: String,
    /// Unrecognized columns, passed through untouched.
    pub extra: BTreeMap<String, String>,
}

impl ProductRecord {
    /// Build a record from raw `(key, value)` pairs, normalizing every key.
    ///
    /// Known keys land in the typed fields; the rest go to `extra`. When a
    /// source file repeats a column, the last occurrence wins (matching how
    /// a dict-insert loop over the row would behave).
    pub fn from_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut record = ProductRecord::default();
        for (key, value) in fields {
            match normalize_key(&key).as_str() {
                "name" => record.name = value,
                "sku" => record.sku = value,
                "stock" => record.stock = value,
                "regular_price" => record.regular_price = value,
                "thumbnail_id" => record.thumbnail_id = value,
                "attribute_pa_color" => record.color = value,
                "attribute_pa_talla" => record.size = value,
                normalized => {
                    record.extra.insert(normalized.to_string(), value);
                }
            }
        }
        record
    }

    /// The label drawn on the catalog page: everything before the first `-`,
    /// trimmed. `"Hoodie Oversize Fit - Negro"` → `"Hoodie Oversize Fit"`.
    pub fn display_name(&self) -> &str {
        match self.name.split_once('-') {
            Some((head, _)) => head.trim(),
            None => self.name.trim(),
        }
    }

    /// Literal stock gate: present and not `""` and not exactly `"0"`.
    pub fn is_in_stock(&self) -> bool {
        !self.stock.is_empty() && self.stock != "0"
    }
}
