//! One-shot CLI commands
//!
//! Each command loads its files into a fresh session, runs one or more
//! operations and prints the result.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Args;

use crate::config::Settings;
use crate::display::{format_rows, format_summary_details, format_summary_table};
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_rows_csv, export_summary_csv};
use crate::services::{LabelMatching, Session};

/// A `TERM=LABEL` tagging rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRule {
    /// Search term
    pub term: String,
    /// Label applied to the matches
    pub label: String,
}

impl FromStr for TagRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (term, label) = s
            .rsplit_once('=')
            .ok_or_else(|| format!("expected TERM=LABEL, got '{}'", s))?;
        if label.trim().is_empty() {
            return Err(format!("missing label in '{}'", s));
        }
        Ok(Self {
            term: term.to_string(),
            label: label.trim().to_string(),
        })
    }
}

/// Arguments for `expenses tag`
#[derive(Args, Debug)]
pub struct TagArgs {
    /// Spreadsheets to merge (.csv, .xlsx, .xls, .ods)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Tagging rule TERM=LABEL; repeatable, applied in order
    #[arg(short, long = "rule", value_name = "TERM=LABEL", required = true)]
    pub rules: Vec<TagRule>,

    /// How matches are applied back onto the merged rows
    #[arg(long = "match", value_enum)]
    pub matching: Option<LabelMatching>,

    /// Write the labeled rows to a CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the per-label totals to a CSV file
    #[arg(long)]
    pub summary_output: Option<PathBuf>,

    /// List the rows under each label
    #[arg(short, long)]
    pub detailed: bool,
}

/// Handle `expenses total`
pub fn handle_total_command<W: Write>(
    out: &mut W,
    settings: &Settings,
    files: &[PathBuf],
    show_rows: bool,
) -> ExpenseResult<()> {
    let mut session = Session::new(settings.label_matching);
    let status = session.load_files(files)?;

    if show_rows {
        if let Some(store) = session.store() {
            write!(out, "{}", format_rows(store.rows(), &settings.currency_symbol))?;
        }
    }
    writeln!(out, "{}", status)?;
    Ok(())
}

/// Handle `expenses search`
pub fn handle_search_command<W: Write>(
    out: &mut W,
    settings: &Settings,
    files: &[PathBuf],
    term: &str,
) -> ExpenseResult<()> {
    let mut session = Session::new(settings.label_matching);
    session.load_files(files)?;

    let result = session.search(term);
    if !result.is_empty() {
        write!(out, "{}", format_rows(&result.rows, &settings.currency_symbol))?;
    }
    writeln!(out, "{}", result.message)?;
    Ok(())
}

/// Handle `expenses tag`
pub fn handle_tag_command<W: Write>(
    out: &mut W,
    settings: &Settings,
    args: &TagArgs,
) -> ExpenseResult<()> {
    // Resolve every label before touching any file
    let rules = args
        .rules
        .iter()
        .map(|rule| -> ExpenseResult<TagRule> {
            Ok(TagRule {
                term: rule.term.clone(),
                label: settings.resolve_label(&rule.label)?,
            })
        })
        .collect::<ExpenseResult<Vec<_>>>()?;

    let mut session = Session::new(args.matching.unwrap_or(settings.label_matching));
    writeln!(out, "{}", session.load_files(&args.files)?)?;

    for rule in &rules {
        let found = session.search(&rule.term);
        writeln!(out, "Search '{}': {} rows. {}", rule.term, found.len(), found.message)?;
        writeln!(out, "{}", session.add_label(&rule.label))?;
    }

    writeln!(out)?;
    let summary = session.summary();
    if args.detailed {
        write!(out, "{}", format_summary_details(&summary, &settings.currency_symbol))?;
        writeln!(out)?;
    }
    write!(out, "{}", format_summary_table(&summary, &settings.currency_symbol))?;

    if let (Some(path), Some(store)) = (&args.output, session.store()) {
        export_rows_csv(store, create_file(path)?)?;
        writeln!(out, "Wrote {} rows to {}", store.len(), path.display())?;
    }
    if let Some(path) = &args.summary_output {
        export_summary_csv(&summary, create_file(path)?)?;
        writeln!(out, "Wrote summary to {}", path.display())?;
    }

    Ok(())
}

/// Create an output file for export
pub fn create_file(path: &Path) -> ExpenseResult<BufWriter<File>> {
    File::create(path).map(BufWriter::new).map_err(|e| {
        ExpenseError::Export(format!("Failed to create '{}': {}", path.display(), e))
    })
}
