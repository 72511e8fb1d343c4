//! Display formatting for terminal output
//!
//! Tables for expense rows and label summaries.

pub mod report;
pub mod rows;
pub mod summary;

pub use rows::format_rows;
pub use summary::{format_summary_details, format_summary_table};
