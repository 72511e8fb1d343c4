//! Custom error types for expense-tagger
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. Only ingestion and the ambient layers
//! (config, export) fail; searching, labeling and summarizing an empty
//! session report a message instead.

use thiserror::Error;

/// The main error type for expense-tagger operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// A spreadsheet could not be opened or decoded as tabular data
    #[error("Cannot read '{file}': {reason}")]
    FileRead { file: String, reason: String },

    /// A required column is missing from a spreadsheet header
    #[error("Missing required column '{column}' in '{file}'")]
    Schema { file: String, column: &'static str },

    /// A price cell holds something that is not a number
    #[error("Invalid price '{value}' in '{file}' at row {row}")]
    InvalidPrice {
        file: String,
        row: usize,
        value: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl ExpenseError {
    /// Create a file read error
    pub fn file_read(file: impl Into<String>, reason: impl ToString) -> Self {
        Self::FileRead {
            file: file.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a schema error for a missing column
    pub fn missing_column(file: impl Into<String>, column: &'static str) -> Self {
        Self::Schema {
            file: file.into(),
            column,
        }
    }

    /// Check if this is a schema error
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }

    /// Check if this is a file read error
    pub fn is_file_read(&self) -> bool {
        matches!(self, Self::FileRead { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for ExpenseError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for expense-tagger operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExpenseError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_schema_error() {
        let err = ExpenseError::missing_column("jan.csv", "Price");
        assert_eq!(
            err.to_string(),
            "Missing required column 'Price' in 'jan.csv'"
        );
        assert!(err.is_schema());
        assert!(!err.is_file_read());
    }

    #[test]
    fn test_invalid_price_error() {
        let err = ExpenseError::InvalidPrice {
            file: "feb.csv".into(),
            row: 3,
            value: "abc".into(),
        };
        assert_eq!(err.to_string(), "Invalid price 'abc' in 'feb.csv' at row 3");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExpenseError = io_err.into();
        assert!(matches!(err, ExpenseError::Io(_)));
    }
}
