//! Command-line interface definitions and helpers.
//!
//! This module contains all CLI argument parsing, enums, and subcommand handlers.

mod args;
mod commands;
mod enums;

pub use args::{Args, Command, ConfigAction, ConvertArgs};
pub use commands::{build_converter, convert_options, handle_config_action, run_convert};
pub use enums::Format;
