//! Command-line interface for nbmend.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`files`] - Wildcard expansion of notebook arguments
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;
pub mod files;

pub use args::{Cli, Mode};
pub use commands::{Command, CommandDispatcher, CommandResult, NotebooksCommand, RunSummary};
pub use files::{expand_arguments, expand_pattern, wildcard_match};
