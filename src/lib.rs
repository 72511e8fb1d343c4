//! expense-tagger - merge expense spreadsheets and total them by label
//!
//! Expense rows are read from one or more spreadsheets into an in-memory
//! record store. The store can be searched by description, the rows of a
//! search can be labeled, and labeled rows are totalled per label.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Expense rows, the record store and money
//! - `services`: Ingestion, search, labeling, summaries and the session
//! - `display`: Terminal tables
//! - `export`: CSV export
//! - `cli`: Command handlers and the interactive shell
//!
//! # Example
//!
//! ```rust,ignore
//! use expenses::services::Session;
//!
//! let mut session = Session::default();
//! println!("{}", session.load_files(&["jan.xlsx", "feb.xlsx"])?);
//! println!("{}", session.search("coffee").message);
//! println!("{}", session.add_label("Outing"));
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;

pub use error::{ExpenseError, ExpenseResult};
