//! Service layer for expense-tagger
//!
//! The four operations on the record store (ingest, search, label,
//! summarize) plus the session that strings them together.

pub mod ingest;
pub mod label;
pub mod search;
pub mod session;
pub mod summary;

pub use ingest::{load_files, Ingestion};
pub use label::{apply_label, LabelMatching, LabelOutcome};
pub use search::{search, SearchOutcome};
pub use session::Session;
pub use summary::{summarize, LabelTotal, Summary};
