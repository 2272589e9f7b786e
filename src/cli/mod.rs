//! CLI module - Command-line interface for the settings assembler.
//!
//! Provides commands for:
//! - `check` - Assemble settings and report success
//! - `show` - Print the assembled settings as JSON

pub mod args;

pub use args::{Cli, Commands};
