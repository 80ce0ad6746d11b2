//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! [`CommandDispatcher`] validates usage (files given, exactly one mode,
//! settings file readable) and then hands the run to [`NotebooksCommand`].

pub mod dispatcher;
pub mod notebooks;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
pub use notebooks::{NotebooksCommand, RunSummary};
