//! Per-label summary
//!
//! Groups the labeled rows of the store by label and totals their prices.
//! Recomputed from the store on every call.

use crate::models::{ExpenseRow, Money, RecordStore};

/// Message shown when there is no store to summarize
pub const NO_DATA_MESSAGE: &str = "No data available.";

/// Total for one label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTotal {
    /// The label
    pub label: String,
    /// Sum of prices of rows with this label
    pub total: Money,
    /// The rows carrying this label, in store order
    pub rows: Vec<ExpenseRow>,
}

/// Per-label totals, in order of first appearance in the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// One entry per distinct label
    pub entries: Vec<LabelTotal>,
    /// Whether there was a non-empty store to summarize
    pub has_data: bool,
}

impl Summary {
    /// Check if no label is present
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all label totals
    pub fn labeled_total(&self) -> Money {
        self.entries.iter().map(|entry| entry.total).sum()
    }

    /// Look up the entry for a label
    pub fn get(&self, label: &str) -> Option<&LabelTotal> {
        self.entries.iter().find(|entry| entry.label == label)
    }

    /// (label, total) pairs
    pub fn totals(&self) -> impl Iterator<Item = (&str, Money)> + '_ {
        self.entries
            .iter()
            .map(|entry| (entry.label.as_str(), entry.total))
    }
}

/// Summarize labeled rows; unlabeled rows are ignored
pub fn summarize(store: Option<&RecordStore>) -> Summary {
    let store = match store {
        Some(store) if !store.is_empty() => store,
        _ => return Summary::default(),
    };

    let mut entries: Vec<LabelTotal> = Vec::new();
    for row in store {
        let Some(label) = row.label.as_deref() else {
            continue;
        };

        match entries.iter_mut().find(|entry| entry.label == label) {
            Some(entry) => {
                entry.total += row.price;
                entry.rows.push(row.clone());
            }
            None => entries.push(LabelTotal {
                label: label.to_string(),
                total: row.price,
                rows: vec![row.clone()],
            }),
        }
    }

    Summary {
        entries,
        has_data: true,
    }
}
