//! Command-line interface
//!
//! Thin wrapper over the library: every subcommand loads its inputs, calls
//! the matching entry point, and serializes the result.

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
