//! User settings for expense-tagger
//!
//! Manages the label choices offered by the front ends, how labels are
//! matched back onto the store, and the files loaded when none are given.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::services::LabelMatching;

/// Labels offered when no settings file exists
pub const DEFAULT_LABELS: [&str; 4] = ["Grocery", "Subscriptions", "Transportation", "Outing"];

/// User settings for expense-tagger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Labels the front ends offer
    #[serde(default = "default_label_choices")]
    pub label_choices: Vec<String>,

    /// Whether labels outside `label_choices` are accepted
    #[serde(default)]
    pub allow_custom_labels: bool,

    /// How a search selection is matched back onto the store
    #[serde(default)]
    pub label_matching: LabelMatching,

    /// Spreadsheets loaded by the shell when started without files
    #[serde(default)]
    pub default_files: Vec<PathBuf>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_label_choices() -> Vec<String> {
    DEFAULT_LABELS.iter().map(|s| s.to_string()).collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            label_choices: default_label_choices(),
            allow_custom_labels: false,
            label_matching: LabelMatching::default(),
            default_files: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| ExpenseError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExpenseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ExpenseError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Resolve user input to a label
    ///
    /// Input matching a configured choice case-insensitively yields that
    /// choice's spelling. Anything else is rejected unless custom labels are
    /// allowed.
    pub fn resolve_label(&self, input: &str) -> Result<String, ExpenseError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ExpenseError::Validation("Label cannot be empty".into()));
        }

        if let Some(choice) = self
            .label_choices
            .iter()
            .find(|choice| choice.eq_ignore_ascii_case(input))
        {
            return Ok(choice.clone());
        }

        if self.allow_custom_labels {
            Ok(input.to_string())
        } else {
            Err(ExpenseError::Validation(format!(
                "Unknown label '{}'. Choose one of: {}",
                input,
                self.label_choices.join(", ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(
            settings.label_choices,
            vec!["Grocery", "Subscriptions", "Transportation", "Outing"]
        );
        assert!(!settings.allow_custom_labels);
        assert_eq!(settings.label_matching, LabelMatching::RowId);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.label_matching = LabelMatching::CompositeKey;
        settings.allow_custom_labels = true;
        settings.default_files = vec![PathBuf::from("jan.xlsx")];

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"label_matching":"composite-key"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.label_matching, LabelMatching::CompositeKey);
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.label_choices.len(), 4);
    }

    #[test]
    fn test_corrupt_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "{ not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, ExpenseError::Config(_)));
    }

    #[test]
    fn test_resolve_label() {
        let mut settings = Settings::default();
        assert_eq!(settings.resolve_label("outing").unwrap(), "Outing");
        assert_eq!(settings.resolve_label(" GROCERY ").unwrap(), "Grocery");
        assert!(settings.resolve_label("Rent").unwrap_err().is_validation());
        assert!(settings.resolve_label("  ").is_err());

        settings.allow_custom_labels = true;
        assert_eq!(settings.resolve_label("Rent").unwrap(), "Rent");
    }
}
