//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

use crate::error::{NbmendError, Result};

const EXAMPLES: &str = "\
Examples:
  Check a notebook for issues:
    nbmend --check notebook.ipynb

  Fix issues in a notebook:
    nbmend --fix notebook.ipynb

  Fix multiple notebooks:
    nbmend --fix '*.ipynb'

  Fix without creating backups:
    nbmend --fix --no-backup notebook.ipynb";

/// nbmend - Fix invalid Jupyter notebook widget metadata.
#[derive(Debug, Parser)]
#[command(name = "nbmend")]
#[command(author, version, about, long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Notebook files or glob patterns to process
    #[arg(value_name = "FILES")]
    pub files: Vec<String>,

    /// Check for issues without fixing
    #[arg(long)]
    pub check: bool,

    /// Fix issues in the notebooks
    #[arg(long)]
    pub fix: bool,

    /// Don't create backup files when fixing
    #[arg(long, env = "NBMEND_NO_BACKUP")]
    pub no_backup: bool,

    /// Path to settings file (overrides default .nbmend.yml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// What to do with each notebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Inspect only.
    Check,
    /// Inspect, then repair notebooks with issues.
    Fix,
}

impl Cli {
    /// Resolve `--check`/`--fix` into a single mode.
    ///
    /// Exactly one of the two flags must be given.
    pub fn mode(&self) -> Result<Mode> {
        match (self.check, self.fix) {
            (true, false) => Ok(Mode::Check),
            (false, true) => Ok(Mode::Fix),
            (false, false) => Err(NbmendError::Usage {
                message: "Please specify either --check or --fix".to_string(),
            }),
            (true, true) => Err(NbmendError::Usage {
                message: "Please specify either --check OR --fix, not both".to_string(),
            }),
        }
    }
}
