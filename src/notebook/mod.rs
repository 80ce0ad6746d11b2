//! Notebook documents and widget metadata.
//!
//! A notebook is kept as an untyped [`serde_json::Value`] so that every key
//! the tool does not understand survives a load/write cycle untouched, in its
//! original order. The only structure this module cares about is the
//! widget-state block:
//!
//! ```text
//! metadata.widgets["application/vnd.jupyter.widget-state+json"]
//! ```
//!
//! - [`inspect`] - Report widget entries that lack a `state` key
//! - [`repair`] - Synthesize the missing `state` keys and rewrite the file
//!
//! # Example
//!
//! ```
//! use nbmend::notebook::{locate_widget_state, WidgetState};
//! use serde_json::json;
//!
//! let doc = json!({"metadata": {}, "cells": []});
//! assert!(matches!(locate_widget_state(&doc), WidgetState::NoWidgetMetadata));
//! ```

pub mod inspect;
pub mod repair;

pub use inspect::{inspect_notebook, Inspection};
pub use repair::{
    repair_notebook, synthesize_state, view_module_for, view_name_for, BackupStatus,
    RepairOptions, RepairOutcome,
};

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::{NbmendError, Result};

/// Key of the per-widget state block inside `metadata.widgets`.
pub const WIDGET_STATE_KEY: &str = "application/vnd.jupyter.widget-state+json";

/// File extension of notebook documents.
pub const NOTEBOOK_EXTENSION: &str = ".ipynb";

/// Suffix appended to a notebook path to form its backup path.
pub const BACKUP_SUFFIX: &str = ".bak";

/// Where the widget-state block was (or was not) found in a document.
#[derive(Debug)]
pub enum WidgetState<T> {
    /// `metadata.widgets` is absent or empty.
    NoWidgetMetadata,
    /// `metadata.widgets` exists but has no usable widget-state block.
    NoWidgetState,
    /// The widget-state block, keyed by widget id.
    Block(T),
}

/// Read and parse a notebook from disk.
pub fn load_notebook(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).map_err(|source| NbmendError::NotebookRead {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|e| NbmendError::NotebookParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Serialize a notebook with 2-space indentation.
pub fn render_notebook(doc: &Value) -> serde_json::Result<String> {
    serde_json::to_string_pretty(doc)
}

/// Write a notebook to disk, replacing any existing content.
///
/// Serialization failures surface as [`std::io::ErrorKind::InvalidData`].
pub fn write_notebook(path: &Path, doc: &Value) -> std::io::Result<()> {
    let content = render_notebook(doc)?;
    fs::write(path, content)
}

/// Backup location for a notebook: `<path>.bak`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Whether a path names a notebook document.
pub fn is_notebook_path(path: &Path) -> bool {
    path.to_string_lossy().ends_with(NOTEBOOK_EXTENSION)
}

/// Truthiness of a JSON value: null, `false`, zero and empty containers are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Locate the widget-state block of a document.
pub fn locate_widget_state(doc: &Value) -> WidgetState<&Map<String, Value>> {
    let widgets = match doc.get("metadata").and_then(|m| m.get("widgets")) {
        Some(w) if is_truthy(w) => w,
        _ => return WidgetState::NoWidgetMetadata,
    };

    match widgets.get(WIDGET_STATE_KEY) {
        Some(Value::Object(block)) if !block.is_empty() => WidgetState::Block(block),
        _ => WidgetState::NoWidgetState,
    }
}

/// Mutable counterpart of [`locate_widget_state`].
pub fn locate_widget_state_mut(doc: &mut Value) -> WidgetState<&mut Map<String, Value>> {
    let widgets = match doc.get_mut("metadata").and_then(|m| m.get_mut("widgets")) {
        Some(w) if is_truthy(w) => w,
        _ => return WidgetState::NoWidgetMetadata,
    };

    match widgets.get_mut(WIDGET_STATE_KEY) {
        Some(Value::Object(block)) if !block.is_empty() => WidgetState::Block(block),
        _ => WidgetState::NoWidgetState,
    }
}
