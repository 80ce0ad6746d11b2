//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for validating usage and routing to a command

use std::path::PathBuf;

use clap::CommandFactory;

use crate::cli::args::Cli;
use crate::config::load_config;
use crate::error::{NbmendError, Result};
use crate::notebook::RepairOptions;
use crate::ui::{OutputMode, UserInterface};

use super::notebooks::NotebooksCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Validates CLI usage and dispatches to the notebook command.
pub struct CommandDispatcher {
    working_dir: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given working directory.
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Dispatch and execute a command.
    ///
    /// Usage errors (no files, missing or conflicting modes, a bad settings
    /// file) are reported here and yield exit code 1 before any notebook is
    /// touched.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        if cli.files.is_empty() {
            ui.message(&Cli::command().render_help().to_string());
            return Ok(CommandResult::failure(1));
        }

        let mode = match cli.mode() {
            Ok(mode) => mode,
            Err(NbmendError::Usage { message }) => {
                ui.error(&message);
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };

        let config = match load_config(&self.working_dir, cli.config.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
        };

        // Apply settings default_output when no CLI flag was explicitly set
        if ui.output_mode() == OutputMode::Normal {
            ui.set_output_mode(config.settings.default_output.into());
        }

        let options = RepairOptions {
            backup: config.settings.backup && !cli.no_backup,
        };

        let cmd = NotebooksCommand::new(mode, cli.files.clone(), options);
        cmd.execute(ui)
    }
}
