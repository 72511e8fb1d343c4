//! CSV export
//!
//! Writes the labeled store and the per-label totals as CSV.

use std::io::Write;

use serde::Serialize;

use crate::error::ExpenseResult;
use crate::models::RecordStore;
use crate::services::summary::Summary;

#[derive(Serialize)]
struct RowRecord<'a> {
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Source")]
    source: &'a str,
    #[serde(rename = "Label")]
    label: &'a str,
}

#[derive(Serialize)]
struct TotalRecord<'a> {
    #[serde(rename = "Label")]
    label: &'a str,
    #[serde(rename = "Total")]
    total: String,
}

/// Export every row of the store with its label
pub fn export_rows_csv<W: Write>(store: &RecordStore, writer: W) -> ExpenseResult<()> {
    let mut writer = csv::Writer::from_writer(writer);

    if store.is_empty() {
        writer.write_record(["Description", "Price", "Source", "Label"])?;
    }

    for row in store {
        writer.serialize(RowRecord {
            description: row.description.as_deref().unwrap_or(""),
            price: row.price.to_decimal_string(),
            source: &row.source,
            label: row.label.as_deref().unwrap_or(""),
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Export the per-label totals
pub fn export_summary_csv<W: Write>(summary: &Summary, writer: W) -> ExpenseResult<()> {
    let mut writer = csv::Writer::from_writer(writer);

    if summary.is_empty() {
        writer.write_record(["Label", "Total"])?;
    }

    for (label, total) in summary.totals() {
        writer.serialize(TotalRecord {
            label,
            total: total.to_decimal_string(),
        })?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseRow, Money, RowId};
    use crate::services::summary::summarize;

    fn store() -> RecordStore {
        let mut coffee = ExpenseRow::new(
            RowId::new(0),
            Some("Coffee, large".into()),
            Money::from_cents(450),
            "a.csv",
        );
        coffee.set_label("Outing");
        let blank = ExpenseRow::new(RowId::new(1), None, Money::from_cents(275), "b.csv");
        RecordStore::from_rows(vec![coffee, blank])
    }

    #[test]
    fn test_export_rows() {
        let mut buffer = Vec::new();
        export_rows_csv(&store(), &mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(
            output,
            "Description,Price,Source,Label\n\"Coffee, large\",4.50,a.csv,Outing\n,2.75,b.csv,\n"
        );
    }

    #[test]
    fn test_export_empty_store_writes_header() {
        let mut buffer = Vec::new();
        export_rows_csv(&RecordStore::new(), &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Description,Price,Source,Label\n"
        );
    }

    #[test]
    fn test_export_summary() {
        let store = store();
        let mut buffer = Vec::new();
        export_summary_csv(&summarize(Some(&store)), &mut buffer).unwrap();

        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, "Label,Total\nOuting,4.50\n");
    }

    #[test]
    fn test_exported_rows_load_back() {
        let mut buffer = Vec::new();
        export_rows_csv(&store(), &mut buffer).unwrap();

        let rows = crate::services::ingest::read_csv(buffer.as_slice(), "export.csv").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].description.as_deref(), Some("Coffee, large"));
        assert_eq!(rows[1].price.cents(), 275);
    }
}
