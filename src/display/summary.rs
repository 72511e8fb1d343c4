//! Summary display formatting
//!
//! Two renderings of a [`Summary`]: a compact label/total table and the
//! detailed per-label listing.

use tabled::settings::{object::Columns, Alignment, Style};
use tabled::{Table, Tabled};

use super::report::format_header;
use super::rows::format_rows;
use crate::services::summary::{Summary, NO_DATA_MESSAGE};

#[derive(Tabled)]
struct TotalView {
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Total")]
    total: String,
}

/// Format the label/total table
pub fn format_summary_table(summary: &Summary, symbol: &str) -> String {
    if !summary.has_data {
        return format!("{}\n", NO_DATA_MESSAGE);
    }
    if summary.is_empty() {
        return "No labeled rows yet.\n".to_string();
    }

    let mut table = Table::new(summary.totals().map(|(label, total)| TotalView {
        label: label.to_string(),
        total: total.format_with_symbol(symbol),
    }));
    table
        .with(Style::rounded())
        .modify(Columns::single(1), Alignment::right());
    format!("{}\n", table)
}

/// Format every label with its rows and total
pub fn format_summary_details(summary: &Summary, symbol: &str) -> String {
    if !summary.has_data {
        return format!("{}\n", NO_DATA_MESSAGE);
    }

    let mut output = String::new();
    for entry in &summary.entries {
        output.push('\n');
        output.push_str(&format_header(&format!("Label: {}", entry.label)));
        output.push_str(&format_rows(&entry.rows, symbol));
        output.push_str(&format!(
            "Total for {}: {}\n",
            entry.label,
            entry.total.format_with_symbol(symbol)
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseRow, Money, RecordStore, RowId};
    use crate::services::summary::summarize;

    fn store() -> RecordStore {
        let mut coffee = ExpenseRow::new(
            RowId::new(0),
            Some("Coffee".into()),
            Money::from_cents(450),
            "a.csv",
        );
        coffee.set_label("Outing");
        let bus = ExpenseRow::new(
            RowId::new(1),
            Some("Bus ticket".into()),
            Money::from_cents(275),
            "b.csv",
        );
        RecordStore::from_rows(vec![coffee, bus])
    }

    #[test]
    fn test_summary_table() {
        let store = store();
        let output = format_summary_table(&summarize(Some(&store)), "$");
        assert!(output.contains("Label"));
        assert!(output.contains("Outing"));
        assert!(output.contains("$4.50"));
        assert!(!output.contains("Bus ticket"));
    }

    #[test]
    fn test_summary_details() {
        let store = store();
        let output = format_summary_details(&summarize(Some(&store)), "€");
        assert!(output.contains("Label: Outing"));
        assert!(output.contains("Coffee"));
        assert!(output.contains("Total for Outing: €4.50"));
    }

    #[test]
    fn test_summary_without_data() {
        let summary = summarize(None);
        assert_eq!(format_summary_table(&summary, "$"), "No data available.\n");
        assert_eq!(format_summary_details(&summary, "$"), "No data available.\n");
    }

    #[test]
    fn test_summary_without_labels() {
        let store = RecordStore::from_rows(vec![ExpenseRow::new(
            RowId::new(0),
            Some("Bus".into()),
            Money::from_cents(275),
            "b.csv",
        )]);
        let summary = summarize(Some(&store));
        assert_eq!(format_summary_table(&summary, "$"), "No labeled rows yet.\n");
    }
}
