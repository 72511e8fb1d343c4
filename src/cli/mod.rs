//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod commands;
pub mod config;
pub mod shell;

pub use commands::{
    handle_search_command, handle_tag_command, handle_total_command, TagArgs, TagRule,
};
pub use config::{handle_config_command, ConfigCommands};
pub use shell::{Shell, ShellFlow};
