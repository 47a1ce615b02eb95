//! Keyword classification of product names into category labels.
//!
//! A rule matches when *every one* of its keywords occurs (case-insensitively)
//! as a substring of the product name. Rules are evaluated strictly in
//! declaration order and the first full match wins, so a name satisfying both
//! a specific and a general rule resolves to whichever is declared first.
//! Rule ordering is load-bearing configuration, not an implementation detail.
//!
//! The rule table is an explicit value handed to [`Classifier::new`] — there
//! is no process-wide category table.

use serde::{Deserialize, Serialize};

/// Fallback label for names no rule matches.
pub const UNCATEGORIZED_LABEL: &str = "Sin categoría";

/// One classification rule: a category label and the keywords that must all
/// be present in the product name for the rule to match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRule {
    /// Category label assigned on match.
    pub label: String,
    /// Required keywords, all of which must occur as substrings.
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(label: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            label: label.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// The rule table observed in production, in its original order.
    ///
    /// Note the deliberate overlap: "Hoodie Oversize" (Hoodie + Oversize Fit)
    /// precedes "Hoodie Oversize con Cierre" and "Hoodie Relaxed Fit", and
    /// wins any tie by coming first.
    pub fn default_rules() -> Vec<CategoryRule> {
        vec![
            CategoryRule::new("Camiseta Oversize", &["Camiseta"]),
            CategoryRule::new("Jogger", &["Jogger"]),
            CategoryRule::new("Hoodie Oversize", &["Hoodie", "Oversize Fit"]),
            CategoryRule::new("Hoodie Oversize con Cierre", &["Hoodie Oversize", "con Cierre"]),
            CategoryRule::new("Pantaloneta", &["Pantaloneta"]),
            CategoryRule::new("Hoodie Relaxed Fit", &["Hoodie", "Relaxed"]),
        ]
    }
}

/// Maps a free-text product name to a category label via the rule table.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<CategoryRule>,
    fallback: String,
}

impl Classifier {
    /// Build a classifier over an explicit, ordered rule table.
    pub fn new(rules: Vec<CategoryRule>, fallback: impl Into<String>) -> Self {
        Self {
            rules,
            fallback: fallback.into(),
        }
    }

    /// Classify `name`: first rule whose every keyword is a substring of the
    /// lowercased name wins; otherwise the fallback label.
    pub fn classify(&self, name: &str) -> &str {
        let name_lower = name.to_lowercase();
        for rule in &self.rules {
            let all_match = rule
                .keywords
                .iter()
                .all(|keyword| name_lower.contains(&keyword.to_lowercase()));
            if all_match {
                return &rule.label;
            }
        }
        &self.fallback
    }

    /// The fallback (sentinel) label assigned when no rule matches.
    pub fn fallback_label(&self) -> &str {
        &self.fallback
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(CategoryRule::default_rules(), UNCATEGORIZED_LABEL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_is_case_insensitive() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify("CAMISETA negra"), "Camiseta Oversize");
        assert_eq!(classifier.classify("jogger gris"), "Jogger");
    }

    #[test]
    fn all_keywords_must_match() {
        let classifier = Classifier::default();
        // "Hoodie" alone matches neither hoodie rule (both need a second keyword).
        assert_eq!(classifier.classify("Hoodie Clásico"), UNCATEGORIZED_LABEL);
        assert_eq!(
            classifier.classify("Hoodie Relaxed - Verde"),
            "Hoodie Relaxed Fit"
        );
    }

    #[test]
    fn first_match_in_table_order_wins() {
        // Two overlapping rules: the general one declared first must win.
        let rules = vec![
            CategoryRule::new("Hoodie", &["Hoodie"]),
            CategoryRule::new("Hoodie Oversize", &["Hoodie", "Oversize Fit"]),
        ];
        let classifier = Classifier::new(rules, UNCATEGORIZED_LABEL);
        assert_eq!(classifier.classify("Hoodie Oversize Fit Talla M"), "Hoodie");

        // Reversed declaration order flips the result for the same name.
        let rules = vec![
            CategoryRule::new("Hoodie Oversize", &["Hoodie", "Oversize Fit"]),
            CategoryRule::new("Hoodie", &["Hoodie"]),
        ];
        let classifier = Classifier::new(rules, UNCATEGORIZED_LABEL);
        assert_eq!(
            classifier.classify("Hoodie Oversize Fit Talla M"),
            "Hoodie Oversize"
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let classifier = Classifier::default();
        let name = "Hoodie Oversize Fit - Negro";
        let first = classifier.classify(name).to_string();
        for _ in 0..10 {
            assert_eq!(classifier.classify(name), first);
        }
        assert_eq!(first, "Hoodie Oversize");
    }

    #[test]
    fn unmatched_name_gets_fallback() {
        let classifier = Classifier::default();
        assert_eq!(classifier.classify("Gorra Trucker"), UNCATEGORIZED_LABEL);
        assert_eq!(classifier.classify(""), UNCATEGORIZED_LABEL);
    }
}
