//! Tooling Layer
//!
//! The command-line surface and its text/JSON output formatting.

pub mod cli;
pub mod format;

pub use cli::{Cli, CliContext, Commands};
