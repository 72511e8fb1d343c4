use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expenses::cli::{
    handle_config_command, handle_search_command, handle_tag_command, handle_total_command,
    ConfigCommands, Shell, TagArgs,
};
use expenses::config::{ExpensePaths, Settings};
use expenses::services::LabelMatching;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Merge expense spreadsheets, tag rows by description and total them per label",
    long_about = "Loads the Description and Price columns of one or more spreadsheets \
                  (.csv, .xlsx, .xls, .ods) into memory, lets you search them by \
                  description, label the matches and see totals per label."
)]
struct Cli {
    /// Log more detail to stderr (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge spreadsheets and print the grand total
    Total {
        /// Spreadsheets to merge
        files: Vec<PathBuf>,
        /// Also print every merged row
        #[arg(short, long)]
        rows: bool,
    },

    /// Print the rows whose description contains a term, with their subtotal
    Search {
        /// Spreadsheets to merge
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Case-insensitive search term
        #[arg(short, long, default_value = "")]
        term: String,
    },

    /// Label rows by search rules and print the per-label totals
    Tag(TagArgs),

    /// Start the interactive shell
    #[command(alias = "repl")]
    Shell {
        /// Spreadsheets to load at start (defaults to the configured files)
        files: Vec<PathBuf>,
        /// How labels are applied back onto the merged rows
        #[arg(long = "match", value_enum)]
        matching: Option<LabelMatching>,
    },

    /// Show or initialize configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("expenses={}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let paths = ExpensePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Some(Commands::Total { files, rows }) => {
            handle_total_command(&mut out, &settings, &files, rows)?;
        }
        Some(Commands::Search { files, term }) => {
            handle_search_command(&mut out, &settings, &files, &term)?;
        }
        Some(Commands::Tag(args)) => {
            handle_tag_command(&mut out, &settings, &args)?;
        }
        Some(Commands::Shell { files, matching }) => {
            run_shell(&mut out, &settings, files, matching)?;
        }
        Some(Commands::Config(cmd)) => {
            handle_config_command(&mut out, &paths, &settings, cmd)?;
        }
        None => {
            println!("expense-tagger - merge, search and label expense spreadsheets");
            println!();
            println!("Run 'expenses --help' for usage information.");
            println!("Run 'expenses shell <files>' to start the interactive shell.");
        }
    }

    Ok(())
}

fn run_shell(
    out: &mut impl Write,
    settings: &Settings,
    files: Vec<PathBuf>,
    matching: Option<LabelMatching>,
) -> Result<()> {
    let mut shell = Shell::new(settings);

    if let Some(matching) = matching {
        shell.set_matching(matching);
    }

    let files = if files.is_empty() {
        settings.default_files.clone()
    } else {
        files
    };
    if !files.is_empty() {
        if let Err(err) = shell.load(&files, out) {
            writeln!(out, "Error: {}", err)?;
        }
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        writeln!(out, "Type 'help' for commands.")?;
    }
    shell.run(stdin.lock(), out)?;
    Ok(())
}
