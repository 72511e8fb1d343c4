//! Expense row model
//!
//! One purchase line read from a spreadsheet, stamped with the file it came
//! from and an optional category label.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Money;

/// Surrogate key for an expense row
///
/// Assigned sequentially at ingestion over the merged store, so it is unique
/// within one store even when two rows carry identical data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RowId(usize);

impl RowId {
    /// Create a row ID from a zero-based position
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the zero-based position
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0 + 1)
    }
}

/// Row identity by content: (description, price, source)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompositeKey<'a> {
    pub description: &'a str,
    pub price: Money,
    pub source: &'a str,
}

/// A single expense record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRow {
    /// Position in the merged store
    pub id: RowId,

    /// Free-text description; `None` when the cell was blank
    pub description: Option<String>,

    /// Price of the purchase
    pub price: Money,

    /// Base name of the file this row was read from
    pub source: String,

    /// Category label, `None` until labeled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ExpenseRow {
    /// Create a new unlabeled row
    pub fn new(
        id: RowId,
        description: Option<String>,
        price: Money,
        source: impl Into<String>,
    ) -> Self {
        Self {
            id,
            description,
            price,
            source: source.into(),
            label: None,
        }
    }

    /// Composite identity of the row
    ///
    /// Rows without a description have no key: a blank description never
    /// equals anything, not even another blank one.
    pub fn composite_key(&self) -> Option<CompositeKey<'_>> {
        self.description.as_deref().map(|description| CompositeKey {
            description,
            price: self.price,
            source: &self.source,
        })
    }

    /// Set or clear the label; an empty or whitespace label clears it
    pub fn set_label(&mut self, label: &str) {
        let label = label.trim();
        self.label = if label.is_empty() {
            None
        } else {
            Some(label.to_string())
        };
    }

    /// Check whether the row carries a label
    pub fn is_labeled(&self) -> bool {
        self.label.is_some()
    }

    /// Case-insensitive substring match on the description
    ///
    /// `needle` must already be lower-cased.
    pub fn description_contains(&self, needle: &str) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(description: Option<&str>, cents: i64, source: &str) -> ExpenseRow {
        ExpenseRow::new(
            RowId::new(0),
            description.map(str::to_string),
            Money::from_cents(cents),
            source,
        )
    }

    #[test]
    fn test_new_row_is_unlabeled() {
        let r = row(Some("Coffee"), 450, "a.csv");
        assert!(!r.is_labeled());
        assert_eq!(r.source, "a.csv");
    }

    #[test]
    fn test_set_label_normalizes_empty() {
        let mut r = row(Some("Coffee"), 450, "a.csv");
        r.set_label(" Outing ");
        assert_eq!(r.label.as_deref(), Some("Outing"));
        r.set_label("   ");
        assert_eq!(r.label, None);
    }

    #[test]
    fn test_composite_key() {
        let a = row(Some("Coffee"), 450, "a.csv");
        let mut b = row(Some("Coffee"), 450, "a.csv");
        b.id = RowId::new(7);
        assert_eq!(a.composite_key(), b.composite_key());

        let other_source = row(Some("Coffee"), 450, "b.csv");
        assert_ne!(a.composite_key(), other_source.composite_key());

        assert!(row(None, 450, "a.csv").composite_key().is_none());
    }

    #[test]
    fn test_description_contains() {
        let r = row(Some("Monthly NETFLIX"), 1599, "a.csv");
        assert!(r.description_contains("netflix"));
        assert!(r.description_contains(""));
        assert!(!r.description_contains("spotify"));
        assert!(!row(None, 0, "a.csv").description_contains(""));
    }

    #[test]
    fn test_row_id_display() {
        assert_eq!(RowId::new(0).to_string(), "#1");
        assert_eq!(RowId::new(41).index(), 41);
    }
}
