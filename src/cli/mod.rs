//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the export engine.

pub mod config;
pub mod export;
pub mod schema;

pub use config::{handle_config_command, ConfigCommands};
pub use export::{handle_run_command, RunArgs};
pub use schema::{handle_attributes_command, handle_types_command};
