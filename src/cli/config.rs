//! Config CLI commands

use std::io::Write;

use clap::Subcommand;

use crate::config::{ExpensePaths, Settings};
use crate::error::ExpenseResult;

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the config location and current settings
    Show,
    /// Write the current settings (defaults if none) to the config file
    Init,
}

/// Handle config commands
pub fn handle_config_command<W: Write>(
    out: &mut W,
    paths: &ExpensePaths,
    settings: &Settings,
    cmd: ConfigCommands,
) -> ExpenseResult<()> {
    match cmd {
        ConfigCommands::Show => {
            writeln!(out, "expense-tagger configuration")?;
            writeln!(out, "============================")?;
            writeln!(out, "Settings file: {}", paths.settings_file().display())?;
            if !paths.is_initialized() {
                writeln!(out, "(not written yet; showing defaults)")?;
            }
            writeln!(out)?;
            writeln!(out, "{}", serde_json::to_string_pretty(settings)?)?;
        }
        ConfigCommands::Init => {
            settings.save(paths)?;
            writeln!(out, "Wrote {}", paths.settings_file().display())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_then_show() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();

        let mut out = Vec::new();
        handle_config_command(&mut out, &paths, &settings, ConfigCommands::Init).unwrap();
        assert!(paths.is_initialized());

        let mut out = Vec::new();
        handle_config_command(&mut out, &paths, &settings, ConfigCommands::Show).unwrap();
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("\"label_matching\": \"row-id\""));
        assert!(!output.contains("not written yet"));
    }
}
