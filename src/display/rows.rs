//! Expense row display formatting
//!
//! Renders the store or a search result as a terminal table.

use tabled::settings::{object::Columns, Alignment, Style};
use tabled::{Table, Tabled};

use super::report::truncate;
use crate::models::ExpenseRow;

const DESCRIPTION_WIDTH: usize = 40;

#[derive(Tabled)]
struct RowView {
    #[tabled(rename = "#")]
    id: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Label")]
    label: String,
}

impl RowView {
    fn new(row: &ExpenseRow, symbol: &str) -> Self {
        Self {
            id: row.id.to_string(),
            description: row
                .description
                .as_deref()
                .map(|d| truncate(d, DESCRIPTION_WIDTH))
                .unwrap_or_else(|| "(blank)".to_string()),
            price: row.price.format_with_symbol(symbol),
            source: row.source.clone(),
            label: row.label.clone().unwrap_or_default(),
        }
    }
}

/// Format rows as a table, or a placeholder line when there are none
pub fn format_rows(rows: &[ExpenseRow], symbol: &str) -> String {
    if rows.is_empty() {
        return "No rows.\n".to_string();
    }

    let mut table = Table::new(rows.iter().map(|row| RowView::new(row, symbol)));
    table
        .with(Style::rounded())
        .modify(Columns::single(2), Alignment::right());
    format!("{}\n", table)
}
