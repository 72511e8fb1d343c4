//! Label assignment
//!
//! Applies a category label to the rows of a search result. The store is
//! taken by value and handed back in the outcome so every change flows
//! through the caller.

use std::collections::HashSet;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{CompositeKey, RecordStore, RowId};
use crate::services::search::SearchOutcome;

/// Message returned when there is nothing to label
pub const NO_DATA_MESSAGE: &str = "No data to label.";

/// How selected rows are found again in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LabelMatching {
    /// Match by the row ID assigned at ingestion; duplicates stay independent
    #[default]
    RowId,
    /// Match every row sharing (description, price, source) with a selected row
    CompositeKey,
}

/// Result of a labeling call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelOutcome {
    /// The store after labeling
    pub store: RecordStore,
    /// Number of store rows that were assigned the label
    pub updated: usize,
    /// Status line for the caller to display
    pub message: String,
}

/// Label every store row matched by the selection
///
/// The reported item count is the size of the selection. With
/// [`LabelMatching::CompositeKey`] that can differ from `updated` when
/// several store rows share a key.
pub fn apply_label(
    mut store: RecordStore,
    selection: Option<&SearchOutcome>,
    label: &str,
    matching: LabelMatching,
) -> LabelOutcome {
    let label = label.trim();
    let selection = match selection {
        Some(selection) if !store.is_empty() && !selection.is_empty() => selection,
        _ => {
            return LabelOutcome {
                store,
                updated: 0,
                message: NO_DATA_MESSAGE.to_string(),
            }
        }
    };

    let updated = match matching {
        LabelMatching::RowId => label_by_id(&mut store, selection, label),
        LabelMatching::CompositeKey => label_by_composite_key(&mut store, selection, label),
    };

    info!(label, selected = selection.len(), updated, ?matching, "applied label");

    LabelOutcome {
        store,
        updated,
        message: format!("Added label '{}' to {} items.", label, selection.len()),
    }
}

fn label_by_id(store: &mut RecordStore, selection: &SearchOutcome, label: &str) -> usize {
    let ids: HashSet<RowId> = selection.row_ids().collect();
    let mut updated = 0;
    for id in ids {
        if let Some(row) = store.get_mut(id) {
            row.set_label(label);
            updated += 1;
        }
    }
    updated
}

fn label_by_composite_key(store: &mut RecordStore, selection: &SearchOutcome, label: &str) -> usize {
    let keys: HashSet<CompositeKey<'_>> = selection
        .rows
        .iter()
        .filter_map(|row| row.composite_key())
        .collect();

    let mut updated = 0;
    for row in store.rows_mut() {
        if row.composite_key().is_some_and(|key| keys.contains(&key)) {
            row.set_label(label);
            updated += 1;
        }
    }
    updated
}
