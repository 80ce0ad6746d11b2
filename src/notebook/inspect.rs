//! Read-only widget metadata inspection.

use std::path::Path;

use serde_json::Value;

use super::{load_notebook, locate_widget_state, WidgetState, WIDGET_STATE_KEY};

/// Result of inspecting one notebook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inspection {
    /// The notebook could not be read or parsed.
    Error { message: String },
    /// The notebook carries no widget metadata at all.
    NoWidgetMetadata,
    /// `metadata.widgets` exists but the widget-state block is absent or empty.
    MissingWidgetState,
    /// Every widget entry was scanned.
    Scanned {
        total_widgets: usize,
        /// Offending widget ids, in document order.
        missing_state_widgets: Vec<String>,
    },
}

impl Inspection {
    /// Whether the notebook needs attention.
    ///
    /// Unreadable notebooks count as having issues.
    pub fn has_issues(&self) -> bool {
        match self {
            Self::Error { .. } | Self::MissingWidgetState => true,
            Self::NoWidgetMetadata => false,
            Self::Scanned {
                missing_state_widgets,
                ..
            } => !missing_state_widgets.is_empty(),
        }
    }

    /// The read/parse error, if inspection failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error { message } => Some(message),
            _ => None,
        }
    }

    /// Human-readable description of the issue, if any.
    pub fn issue(&self) -> Option<String> {
        match self {
            Self::MissingWidgetState => Some(format!("Missing {} key", WIDGET_STATE_KEY)),
            Self::Scanned {
                missing_state_widgets,
                ..
            } if !missing_state_widgets.is_empty() => Some(format!(
                "{} widgets missing \"state\" key",
                missing_state_widgets.len()
            )),
            _ => None,
        }
    }

    /// Human-readable status for a notebook without issues.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::NoWidgetMetadata => Some("No widget metadata found"),
            Self::Scanned {
                missing_state_widgets,
                ..
            } if missing_state_widgets.is_empty() => Some("All widgets have required \"state\" keys"),
            _ => None,
        }
    }

    /// Number of entries in the widget-state block.
    pub fn total_widgets(&self) -> usize {
        match self {
            Self::Scanned { total_widgets, .. } => *total_widgets,
            _ => 0,
        }
    }

    /// Number of entries lacking a `state` key.
    pub fn missing_state_count(&self) -> usize {
        self.missing_state_widgets().len()
    }

    /// Ids of the entries lacking a `state` key.
    pub fn missing_state_widgets(&self) -> &[String] {
        match self {
            Self::Scanned {
                missing_state_widgets,
                ..
            } => missing_state_widgets,
            _ => &[],
        }
    }
}

/// Whether a widget entry lacks its `state`.
///
/// Entries that are not objects count as missing.
pub fn entry_missing_state(entry: &Value) -> bool {
    match entry {
        Value::Object(fields) => !fields.contains_key("state"),
        _ => true,
    }
}

/// Inspect a notebook for widget entries without a `state` key.
///
/// Never fails: an unreadable or malformed file yields [`Inspection::Error`].
pub fn inspect_notebook(path: &Path) -> Inspection {
    let doc = match load_notebook(path) {
        Ok(doc) => doc,
        Err(e) => {
            tracing::debug!("Inspection of {} failed: {}", path.display(), e);
            return Inspection::Error {
                message: e.to_string(),
            };
        }
    };

    inspect_document(&doc)
}

/// Inspect an already parsed notebook document.
pub fn inspect_document(doc: &Value) -> Inspection {
    let block = match locate_widget_state(doc) {
        WidgetState::NoWidgetMetadata => return Inspection::NoWidgetMetadata,
        WidgetState::NoWidgetState => return Inspection::MissingWidgetState,
        WidgetState::Block(block) => block,
    };

    let missing_state_widgets: Vec<String> = block
        .iter()
        .filter(|(_, entry)| entry_missing_state(entry))
        .map(|(id, _)| id.clone())
        .collect();

    tracing::debug!(
        "Scanned {} widgets, {} missing state",
        block.len(),
        missing_state_widgets.len()
    );

    Inspection::Scanned {
        total_widgets: block.len(),
        missing_state_widgets,
    }
}
