//! nbmend - Detect and repair missing widget state in Jupyter notebooks.
//!
//! Notebooks saved with interactive widgets carry a widget-state block in
//! `metadata.widgets`. Renderers expect every entry of that block to have a
//! `state` key; nbmend reports entries without one and, in fix mode,
//! synthesizes a minimal state from the entry's `model_*` fields.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Optional `.nbmend.yml` settings file
//! - [`error`] - Error types and result aliases
//! - [`notebook`] - Notebook loading, inspection and repair
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use nbmend::notebook::synthesize_state;
//! use serde_json::json;
//!
//! let entry = json!({"model_module": "@jupyter-widgets/controls", "model_name": "IntSliderModel"});
//! let state = synthesize_state(entry.as_object().unwrap());
//! assert_eq!(state["_view_module"], "@jupyter-widgets/base");
//! assert_eq!(state["_view_name"], "IntSliderView");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod notebook;
pub mod ui;

pub use error::{NbmendError, Result};
