//! The catalog index: in-stock records grouped by (category, size).
//!
//! Two-level mapping with insertion order preserved at both levels, because
//! the interactive flow presents categories as a numbered menu — the order
//! users see must match the order products appeared in the source file.
//! Implemented as vectors of buckets rather than hash maps; catalogs are a
//! few hundred records and lookups happen once per user selection.

use crate::error::CatalogError;
use crate::pipeline::classify::Classifier;
use crate::record::ProductRecord;
use tracing::debug;

/// Records sharing one size within a category, in input order.
#[derive(Debug, Clone, Default)]
struct SizeBucket {
    label: String,
    records: Vec<ProductRecord>,
}

/// All size buckets of one category, in first-seen order.
#[derive(Debug, Clone, Default)]
struct CategoryBucket {
    label: String,
    sizes: Vec<SizeBucket>,
}

/// In-stock records grouped by category, then size.
///
/// Built once per loaded file and discarded with it; never mutated after
/// build. A record appears in at most one (category, size) bucket, and only
/// if its `stock` field passes the literal gate in
/// [`ProductRecord::is_in_stock`].
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    categories: Vec<CategoryBucket>,
}

impl CatalogIndex {
    /// Group `records` by (classified category, size attribute).
    ///
    /// Out-of-stock records (`stock` empty or the literal `"0"`) are skipped.
    /// A missing size groups under the empty-string size key; an
    /// unclassifiable name groups under the classifier's fallback label.
    /// No in-stock record is ever dropped.
    pub fn build(records: Vec<ProductRecord>, classifier: &Classifier) -> Self {
        let mut index = CatalogIndex::default();
        let mut skipped = 0usize;

        for record in records {
            if !record.is_in_stock() {
                skipped += 1;
                continue;
            }
            let category = classifier.classify(&record.name).to_string();
            let size = record.size.clone();
            index.push(category, size, record);
        }

        debug!(
            "Index built: {} categories, {} records skipped for zero stock",
            index.categories.len(),
            skipped
        );
        index
    }

    fn push(&mut self, category: String, size: String, record: ProductRecord) {
        let bucket = match self.categories.iter_mut().find(|c| c.label == category) {
            Some(bucket) => bucket,
            None => {
                self.categories.push(CategoryBucket {
                    label: category,
                    sizes: Vec::new(),
                });
                self.categories.last_mut().unwrap()
            }
        };
        match bucket.sizes.iter_mut().find(|s| s.label == size) {
            Some(size_bucket) => size_bucket.records.push(record),
            None => bucket.sizes.push(SizeBucket {
                label: size,
                records: vec![record],
            }),
        }
    }

    /// Category labels in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.label.as_str()).collect()
    }

    /// Size labels available for `category`, in first-seen order.
    /// `None` when the category does not exist.
    pub fn sizes(&self, category: &str) -> Option<Vec<&str>> {
        self.categories
            .iter()
            .find(|c| c.label == category)
            .map(|c| c.sizes.iter().map(|s| s.label.as_str()).collect())
    }

    /// The records bucketed under `(category, size)`, in input order.
    pub fn bucket(&self, category: &str, size: &str) -> Option<&[ProductRecord]> {
        self.categories
            .iter()
            .find(|c| c.label == category)?
            .sizes
            .iter()
            .find(|s| s.label == size)
            .map(|s| s.records.as_slice())
    }

    /// Like [`CatalogIndex::bucket`] but surfaces the user-facing
    /// [`CatalogError::SelectionNotFound`] for a missing pair.
    pub fn select(&self, category: &str, size: &str) -> Result<&[ProductRecord], CatalogError> {
        self.bucket(category, size)
            .ok_or_else(|| CatalogError::SelectionNotFound {
                category: category.to_string(),
                size: size.to_string(),
            })
    }

    /// True when no record passed the stock gate.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Total number of indexed records.
    pub fn len(&self) -> usize {
        self.categories
            .iter()
            .flat_map(|c| c.sizes.iter())
            .map(|s| s.records.len())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, stock: &str, size: &str) -> ProductRecord {
        ProductRecord {
            name: name.to_string(),
            stock: stock.to_string(),
            size: size.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn zero_stock_records_are_excluded() {
        let records = vec![
            record("Jogger Gris", "3", "M"),
            record("Jogger Negro", "0", "M"),
            record("Jogger Azul", "", "M"),
            record("Jogger Verde", "0.0", "M"), // literal check: in stock
        ];
        let index = CatalogIndex::build(records, &Classifier::default());
        let bucket = index.bucket("Jogger", "M").expect("bucket exists");
        assert_eq!(bucket.len(), 2);
        assert_eq!(bucket[0].name, "Jogger Gris");
        assert_eq!(bucket[1].name, "Jogger Verde");
    }

    #[test]
    fn missing_size_groups_under_empty_key_and_unmatched_under_fallback() {
        let records = vec![record("Bufanda Roja", "1", "")];
        let index = CatalogIndex::build(records, &Classifier::default());
        assert_eq!(index.categories(), vec!["Sin categoría"]);
        assert_eq!(index.sizes("Sin categoría"), Some(vec![""]));
        assert_eq!(index.bucket("Sin categoría", "").unwrap().len(), 1);
    }

    #[test]
    fn insertion_order_is_preserved_at_both_levels() {
        let records = vec![
            record("Pantaloneta Azul", "1", "L"),
            record("Camiseta Blanca", "2", "S"),
            record("Pantaloneta Roja", "1", "M"),
            record("Pantaloneta Verde", "4", "L"),
        ];
        let index = CatalogIndex::build(records, &Classifier::default());
        assert_eq!(index.categories(), vec!["Pantaloneta", "Camiseta Oversize"]);
        assert_eq!(index.sizes("Pantaloneta"), Some(vec!["L", "M"]));
        let bucket = index.bucket("Pantaloneta", "L").unwrap();
        assert_eq!(bucket[0].name, "Pantaloneta Azul");
        assert_eq!(bucket[1].name, "Pantaloneta Verde");
    }

    #[test]
    fn select_reports_missing_pair() {
        let index = CatalogIndex::build(vec![record("Jogger", "1", "M")], &Classifier::default());
        assert!(index.select("Jogger", "M").is_ok());
        let err = index.select("Jogger", "XL").unwrap_err();
        assert!(matches!(err, CatalogError::SelectionNotFound { .. }));
        let err = index.select("Camiseta Oversize", "M").unwrap_err();
        assert!(matches!(err, CatalogError::SelectionNotFound { .. }));
    }

    #[test]
    fn len_and_is_empty() {
        let empty = CatalogIndex::build(vec![record("Jogger", "0", "M")], &Classifier::default());
        assert!(empty.is_empty());
        assert_eq!(empty.len(), 0);

        let index = CatalogIndex::build(
            vec![record("Jogger", "1", "M"), record("Jogger", "2", "L")],
            &Classifier::default(),
        );
        assert!(!index.is_empty());
        assert_eq!(index.len(), 2);
    }
}
