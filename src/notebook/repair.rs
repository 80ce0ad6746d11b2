//! Widget state repair.
//!
//! Entries that are objects without a `state` key get a minimal synthetic
//! state derived from their `model_*` fields. Entries that are not objects
//! are reported by the inspector but left alone here: there is nothing to
//! derive a state from.

use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};

use crate::error::{NbmendError, Result};

use super::{backup_path, load_notebook, locate_widget_state_mut, write_notebook, WidgetState};

/// Options controlling a repair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepairOptions {
    /// Write `<path>.bak` before overwriting the notebook.
    pub backup: bool,
}

impl Default for RepairOptions {
    fn default() -> Self {
        Self { backup: true }
    }
}

/// What happened to the backup copy during a repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupStatus {
    /// Backups were turned off.
    Disabled,
    /// Backup written to this path.
    Created(PathBuf),
    /// Backup could not be written; the repair went ahead anyway.
    Failed { path: PathBuf, message: String },
}

/// Result of repairing one notebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairOutcome {
    /// No widget metadata; nothing was written.
    NoWidgetMetadata,
    /// No widget-state block; nothing was written.
    NoWidgetState,
    /// Every object entry already had a `state`; nothing was written.
    NothingToFix,
    /// The notebook was rewritten.
    Repaired {
        /// Ids of the entries that received a synthetic state, in document order.
        fixed_widgets: Vec<String>,
        backup: BackupStatus,
    },
}

impl RepairOutcome {
    /// Whether the notebook on disk was modified.
    pub fn was_repaired(&self) -> bool {
        matches!(self, Self::Repaired { .. })
    }

    /// Number of entries that received a synthetic state.
    pub fn fixed_count(&self) -> usize {
        match self {
            Self::Repaired { fixed_widgets, .. } => fixed_widgets.len(),
            _ => 0,
        }
    }
}

/// Derive the view module from a model module (`controls` becomes `base`).
///
/// ```
/// use nbmend::notebook::view_module_for;
///
/// assert_eq!(view_module_for("jupyter-controls-widgets"), "jupyter-base-widgets");
/// assert_eq!(view_module_for("plainwidgets"), "plainwidgets");
/// ```
pub fn view_module_for(model_module: &str) -> String {
    model_module.replace("controls", "base")
}

/// Derive the view name from a model name.
///
/// A trailing `Model` is replaced with `View`; any other name gets `View` appended.
///
/// ```
/// use nbmend::notebook::view_name_for;
///
/// assert_eq!(view_name_for("SliderModel"), "SliderView");
/// assert_eq!(view_name_for("Slider"), "SliderView");
/// ```
pub fn view_name_for(model_name: &str) -> String {
    format!("{}View", model_name.strip_suffix("Model").unwrap_or(model_name))
}

/// Build a minimal `state` object for a widget entry.
pub fn synthesize_state(entry: &Map<String, Value>) -> Value {
    json!({
        "_model_module": field_or_empty(entry, "model_module"),
        "_model_module_version": field_or_empty(entry, "model_module_version"),
        "_model_name": field_or_empty(entry, "model_name"),
        "_view_count": null,
        "_view_module": view_module_for(text_or_empty(entry, "model_module")),
        "_view_module_version": field_or_empty(entry, "model_module_version"),
        "_view_name": view_name_for(text_or_empty(entry, "model_name")),
    })
}

fn field_or_empty(entry: &Map<String, Value>, key: &str) -> Value {
    entry.get(key).cloned().unwrap_or_else(|| json!(""))
}

fn text_or_empty<'a>(entry: &'a Map<String, Value>, key: &str) -> &'a str {
    entry.get(key).and_then(Value::as_str).unwrap_or("")
}

/// Add a synthetic `state` to every object entry that lacks one.
///
/// Returns the ids of the patched entries.
pub fn patch_widget_states(block: &mut Map<String, Value>) -> Vec<String> {
    let mut fixed = Vec::new();

    for (id, entry) in block.iter_mut() {
        let Value::Object(fields) = entry else {
            tracing::debug!("Skipping non-object widget entry {}", id);
            continue;
        };
        if fields.contains_key("state") {
            continue;
        }

        let state = synthesize_state(fields);
        fields.insert("state".to_string(), state);
        fixed.push(id.clone());
    }

    fixed
}

/// Repair a notebook in place.
///
/// The file is re-read on every call. When at least one entry is patched the
/// notebook is rewritten with 2-space indentation, preceded by a backup copy
/// of the patched document if `options.backup` is set. A failed backup does
/// not stop the rewrite; a failed rewrite returns [`NbmendError::NotebookWrite`].
pub fn repair_notebook(path: &Path, options: &RepairOptions) -> Result<RepairOutcome> {
    let mut doc = load_notebook(path)?;

    let fixed_widgets = match locate_widget_state_mut(&mut doc) {
        WidgetState::NoWidgetMetadata => return Ok(RepairOutcome::NoWidgetMetadata),
        WidgetState::NoWidgetState => return Ok(RepairOutcome::NoWidgetState),
        WidgetState::Block(block) => patch_widget_states(block),
    };

    if fixed_widgets.is_empty() {
        return Ok(RepairOutcome::NothingToFix);
    }

    let backup = if options.backup {
        let bak = backup_path(path);
        match write_notebook(&bak, &doc) {
            Ok(()) => {
                tracing::info!("Wrote backup {}", bak.display());
                BackupStatus::Created(bak)
            }
            Err(e) => {
                tracing::warn!("Backup {} failed: {}", bak.display(), e);
                BackupStatus::Failed {
                    path: bak,
                    message: e.to_string(),
                }
            }
        }
    } else {
        BackupStatus::Disabled
    };

    write_notebook(path, &doc).map_err(|source| NbmendError::NotebookWrite {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        "Patched {} widgets in {}",
        fixed_widgets.len(),
        path.display()
    );

    Ok(RepairOutcome::Repaired {
        fixed_widgets,
        backup,
    })
}
