//! Optional settings file.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use nbmend::config::load_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".nbmend.yml"), "settings:\n  backup: false\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert!(!config.settings.backup);
//! ```
//!
//! # Settings File Location
//!
//! `--config <path>` names the file explicitly; otherwise `.nbmend.yml`
//! in the current directory is used when it exists.

pub mod loader;
pub mod schema;

pub use loader::{find_config, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::{NbmendConfig, OutputMode, Settings};
