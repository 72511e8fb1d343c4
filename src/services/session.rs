//! Session state
//!
//! Owns the record store and the latest search for one user session and
//! threads them through the core operations.

use std::path::Path;

use tracing::warn;

use crate::error::ExpenseResult;
use crate::models::{Money, RecordStore};
use crate::services::ingest::{self, Ingestion};
use crate::services::label::{self, LabelMatching, LabelOutcome};
use crate::services::search::{self, SearchOutcome};
use crate::services::summary::{self, Summary};

/// State of one interactive session
#[derive(Debug, Clone, Default)]
pub struct Session {
    store: Option<RecordStore>,
    last_search: Option<SearchOutcome>,
    matching: LabelMatching,
}

impl Session {
    /// Create an empty session
    pub fn new(matching: LabelMatching) -> Self {
        Self {
            store: None,
            last_search: None,
            matching,
        }
    }

    /// The current store, if files have been loaded
    pub fn store(&self) -> Option<&RecordStore> {
        self.store.as_ref()
    }

    /// The most recent search result
    pub fn last_search(&self) -> Option<&SearchOutcome> {
        self.last_search.as_ref()
    }

    /// How labels are matched back onto the store
    pub fn matching(&self) -> LabelMatching {
        self.matching
    }

    /// Change the label matching mode
    pub fn set_matching(&mut self, matching: LabelMatching) {
        self.matching = matching;
    }

    /// Replace the store with the given files
    ///
    /// On failure the previous store and search are kept.
    pub fn load_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> ExpenseResult<String> {
        let ingestion: Ingestion = ingest::load_files(paths).inspect_err(|err| {
            warn!(error = %err, "ingestion failed; keeping previous data");
        })?;

        let status = ingestion.status();
        self.store = Some(ingestion.store);
        self.last_search = None;
        Ok(status)
    }

    /// Search the store and remember the result for labeling
    pub fn search(&mut self, term: &str) -> &SearchOutcome {
        let outcome = search::search(self.store.as_ref(), term);
        self.last_search.insert(outcome)
    }

    /// Label the rows of the latest search
    pub fn add_label(&mut self, label: &str) -> String {
        let Some(store) = self.store.take() else {
            return label::NO_DATA_MESSAGE.to_string();
        };

        let LabelOutcome { store, message, .. } =
            label::apply_label(store, self.last_search.as_ref(), label, self.matching);
        self.store = Some(store);
        message
    }

    /// Summarize the current store
    pub fn summary(&self) -> Summary {
        summary::summarize(self.store.as_ref())
    }

    /// Total of every row in the store
    pub fn total(&self) -> Money {
        self.store.as_ref().map(RecordStore::total).unwrap_or_default()
    }
}
