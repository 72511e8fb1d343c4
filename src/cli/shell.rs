//! Interactive shell
//!
//! A line-oriented front end over one [`Session`]: load files, search,
//! label the last search and look at the summary, in any order.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::ValueEnum;
use tracing::debug;

use super::commands::create_file;
use crate::config::Settings;
use crate::display::{format_rows, format_summary_details, format_summary_table};
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_rows_csv, export_summary_csv};
use crate::services::{LabelMatching, Session};

const PROMPT: &str = "expenses> ";

const HELP: &str = "\
Commands:
  load <file>...         Replace the data with these spreadsheets
                         (quote paths that contain spaces)
  search [term]          Find rows whose description contains the term
  results                Show the last search result again
  label <label>          Label every row of the last search
  labels                 List the available labels
  show                   Show all rows
  summary [details]      Totals per label
  match <mode>           Label matching: row-id or composite-key
  export <file>          Write all rows to CSV
  export-summary <file>  Write the per-label totals to CSV
  help                   Show this help
  quit                   Leave the shell
";

/// Whether the shell keeps reading after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellFlow {
    Continue,
    Quit,
}

/// Interactive shell state
pub struct Shell<'a> {
    session: Session,
    settings: &'a Settings,
}

impl<'a> Shell<'a> {
    /// Create a shell with an empty session
    pub fn new(settings: &'a Settings) -> Self {
        Self {
            session: Session::new(settings.label_matching),
            settings,
        }
    }

    /// The session driven by this shell
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Change how labels are matched back onto the store
    pub fn set_matching(&mut self, matching: LabelMatching) {
        self.session.set_matching(matching);
    }

    /// Replace the session data with these files and print the total
    pub fn load<W: Write>(&mut self, files: &[PathBuf], out: &mut W) -> ExpenseResult<()> {
        let status = self.session.load_files(files)?;
        writeln!(out, "{}", status)?;
        Ok(())
    }

    /// Read commands until `quit` or end of input
    ///
    /// Command failures are reported and the loop goes on; only failures to
    /// read input or write output end it.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> ExpenseResult<()> {
        let mut lines = input.lines();
        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                break;
            };
            let line = line?;

            match self.execute(&line, out) {
                Ok(ShellFlow::Quit) => break,
                Ok(ShellFlow::Continue) => {}
                Err(err @ ExpenseError::Io(_)) => return Err(err),
                Err(err) => writeln!(out, "Error: {}", err)?,
            }
        }
        Ok(())
    }

    /// Run a single command line
    pub fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> ExpenseResult<ShellFlow> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        debug!(command, "shell command");

        let settings = self.settings;
        let symbol = &settings.currency_symbol;
        match command {
            "" => {}
            "load" => {
                let files: Vec<PathBuf> = split_args(rest)?.into_iter().map(PathBuf::from).collect();
                self.load(&files, out)?;
            }
            "search" => {
                let result = self.session.search(rest);
                if !result.is_empty() {
                    write!(out, "{}", format_rows(&result.rows, symbol))?;
                }
                writeln!(out, "{}", result.message)?;
            }
            "results" => match self.session.last_search() {
                Some(result) => {
                    write!(out, "{}", format_rows(&result.rows, symbol))?;
                    writeln!(out, "{}", result.message)?;
                }
                None => writeln!(out, "No search yet.")?,
            },
            "label" => {
                let label = settings.resolve_label(rest)?;
                writeln!(out, "{}", self.session.add_label(&label))?;
                write!(out, "{}", format_summary_table(&self.session.summary(), symbol))?;
            }
            "labels" => {
                for choice in &settings.label_choices {
                    writeln!(out, "  {}", choice)?;
                }
                if settings.allow_custom_labels {
                    writeln!(out, "  (custom labels allowed)")?;
                }
            }
            "show" => match self.session.store() {
                Some(store) if !store.is_empty() => {
                    write!(out, "{}", format_rows(store.rows(), symbol))?;
                    writeln!(out, "Total Price: ${}", store.total().to_decimal_string())?;
                }
                _ => writeln!(out, "{}", crate::services::search::NO_FILES_MESSAGE)?,
            },
            "summary" => {
                let summary = self.session.summary();
                if rest == "details" {
                    write!(out, "{}", format_summary_details(&summary, symbol))?;
                } else {
                    write!(out, "{}", format_summary_table(&summary, symbol))?;
                }
            }
            "match" => {
                let matching = LabelMatching::from_str(rest, true).map_err(|_| {
                    ExpenseError::Validation(format!(
                        "Unknown match mode '{}'. Use row-id or composite-key",
                        rest
                    ))
                })?;
                self.set_matching(matching);
                writeln!(out, "Label matching: {}", rest.to_ascii_lowercase())?;
            }
            "export" | "export-summary" => {
                let path = match split_args(rest)?.as_slice() {
                    [path] => PathBuf::from(path),
                    _ => {
                        return Err(ExpenseError::Validation(format!("Usage: {} <file>", command)))
                    }
                };
                if command == "export" {
                    let Some(store) = self.session.store() else {
                        writeln!(out, "{}", crate::services::search::NO_FILES_MESSAGE)?;
                        return Ok(ShellFlow::Continue);
                    };
                    export_rows_csv(store, create_file(&path)?)?;
                } else {
                    export_summary_csv(&self.session.summary(), create_file(&path)?)?;
                }
                writeln!(out, "Wrote {}", path.display())?;
            }
            "help" | "?" => write!(out, "{}", HELP)?,
            "quit" | "exit" => return Ok(ShellFlow::Quit),
            other => {
                writeln!(out, "Unknown command '{}'. Type 'help' for commands.", other)?;
            }
        }

        Ok(ShellFlow::Continue)
    }
}

/// Split command arguments the way a POSIX shell would, honoring quotes
fn split_args(rest: &str) -> ExpenseResult<Vec<String>> {
    shlex::split(rest)
        .ok_or_else(|| ExpenseError::Validation(format!("Unbalanced quotes in '{}'", rest)))
}
