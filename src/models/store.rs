//! In-memory record store
//!
//! The merged table of expense rows for one session. It is built once per
//! ingestion and only mutated by labeling.

use serde::{Deserialize, Serialize};

use super::{ExpenseRow, Money, RowId};

/// Ordered collection of expense rows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordStore {
    rows: Vec<ExpenseRow>,
}

impl RecordStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from rows, reassigning row IDs by position
    pub fn from_rows(rows: Vec<ExpenseRow>) -> Self {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(idx, mut row)| {
                row.id = RowId::new(idx);
                row
            })
            .collect();
        Self { rows }
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the store holds no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in store order
    pub fn rows(&self) -> &[ExpenseRow] {
        &self.rows
    }

    /// Iterate over rows in store order
    pub fn iter(&self) -> std::slice::Iter<'_, ExpenseRow> {
        self.rows.iter()
    }

    /// Look up a row by ID
    pub fn get(&self, id: RowId) -> Option<&ExpenseRow> {
        self.rows.get(id.index()).filter(|row| row.id == id)
    }

    /// Mutable access to a row by ID
    pub fn get_mut(&mut self, id: RowId) -> Option<&mut ExpenseRow> {
        self.rows.get_mut(id.index()).filter(|row| row.id == id)
    }

    /// Mutable access to all rows, for in-crate bulk updates
    pub(crate) fn rows_mut(&mut self) -> &mut [ExpenseRow] {
        &mut self.rows
    }

    /// Sum of all prices
    pub fn total(&self) -> Money {
        self.rows.iter().map(|row| row.price).sum()
    }

    /// Number of rows carrying a label
    pub fn labeled_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_labeled()).count()
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a ExpenseRow;
    type IntoIter = std::slice::Iter<'a, ExpenseRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
