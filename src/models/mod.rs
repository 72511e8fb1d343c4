//! Core data models for expense-tagger
//!
//! Expense rows, the record store that holds them, and the money type used
//! for prices.

pub mod money;
pub mod row;
pub mod store;

pub use money::{Money, MoneyParseError};
pub use row::{CompositeKey, ExpenseRow, RowId};
pub use store::RecordStore;
