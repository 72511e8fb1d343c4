//! Description search
//!
//! Filters the record store by a case-insensitive substring of the
//! description and totals the matching prices. Searching never modifies the
//! store.

use tracing::debug;

use crate::models::{ExpenseRow, Money, RecordStore, RowId};

/// Message returned when there is nothing to search yet
pub const NO_FILES_MESSAGE: &str = "Please upload Excel files first.";

/// Rows matching a search term, with their subtotal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The term that produced this result
    pub term: String,
    /// Matching rows, in store order
    pub rows: Vec<ExpenseRow>,
    /// Sum of the matching prices
    pub subtotal: Money,
    /// Status line for the caller to display
    pub message: String,
}

impl SearchOutcome {
    /// Result for a session without data
    pub fn no_data(term: &str) -> Self {
        Self {
            term: term.to_string(),
            rows: Vec::new(),
            subtotal: Money::zero(),
            message: NO_FILES_MESSAGE.to_string(),
        }
    }

    /// Number of matching rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if nothing matched
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// IDs of the matching rows
    pub fn row_ids(&self) -> impl Iterator<Item = RowId> + '_ {
        self.rows.iter().map(|row| row.id)
    }
}

/// Search the store for rows whose description contains `term`
///
/// Matching ignores case. Rows without a description never match, and an
/// empty term matches every row that has one.
pub fn search(store: Option<&RecordStore>, term: &str) -> SearchOutcome {
    let store = match store {
        Some(store) if !store.is_empty() => store,
        _ => return SearchOutcome::no_data(term),
    };

    let needle = term.to_lowercase();
    let rows: Vec<ExpenseRow> = store
        .iter()
        .filter(|row| row.description_contains(&needle))
        .cloned()
        .collect();
    let subtotal: Money = rows.iter().map(|row| row.price).sum();

    debug!(term, matches = rows.len(), subtotal = %subtotal, "searched descriptions");

    SearchOutcome {
        term: term.to_string(),
        message: format!("Total: ${}", subtotal.to_decimal_string()),
        rows,
        subtotal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RecordStore {
        let row = |desc: Option<&str>, cents: i64, source: &str| {
            ExpenseRow::new(
                RowId::new(0),
                desc.map(str::to_string),
                Money::from_cents(cents),
                source,
            )
        };
        RecordStore::from_rows(vec![
            row(Some("Coffee"), 450, "a.csv"),
            row(Some("Bus ticket"), 275, "b.csv"),
            row(Some("Iced COFFEE"), 525, "b.csv"),
            row(None, 1000, "b.csv"),
        ])
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let store = store();
        let result = search(Some(&store), "coffee");

        let descriptions: Vec<_> = result
            .rows
            .iter()
            .map(|r| r.description.as_deref().unwrap())
            .collect();
        assert_eq!(descriptions, vec!["Coffee", "Iced COFFEE"]);
        assert_eq!(result.subtotal.cents(), 975);
        assert_eq!(result.message, "Total: $9.75");
    }

    #[test]
    fn test_empty_term_matches_rows_with_description() {
        let store = store();
        let result = search(Some(&store), "");
        assert_eq!(result.len(), 3);
        assert_eq!(result.message, "Total: $12.50");
    }

    #[test]
    fn test_no_match() {
        let store = store();
        let result = search(Some(&store), "rent");
        assert!(result.is_empty());
        assert_eq!(result.message, "Total: $0.00");
    }

    #[test]
    fn test_search_without_data() {
        let result = search(None, "coffee");
        assert!(result.is_empty());
        assert_eq!(result.message, NO_FILES_MESSAGE);

        let empty = RecordStore::new();
        assert_eq!(search(Some(&empty), "").message, NO_FILES_MESSAGE);
    }

    #[test]
    fn test_search_is_idempotent() {
        let store = store();
        assert_eq!(search(Some(&store), "ti"), search(Some(&store), "ti"));
    }

    #[test]
    fn test_search_keeps_row_ids() {
        let store = store();
        let ids: Vec<_> = search(Some(&store), "bus").row_ids().collect();
        assert_eq!(ids, vec![RowId::new(1)]);
    }
}
