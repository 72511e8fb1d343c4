//! Export functionality
//!
//! Writes session data out as CSV so labeled expenses can be taken to a
//! spreadsheet.

pub mod csv;

pub use self::csv::{export_rows_csv, export_summary_csv};
