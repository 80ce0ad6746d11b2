//! Notebook check/fix command.
//!
//! Processes every notebook named on the command line, one at a time:
//! inspect, report, and in fix mode repair the ones with issues.

use std::path::Path;

use crate::cli::args::Mode;
use crate::cli::files::expand_arguments;
use crate::error::Result;
use crate::notebook::{
    inspect_notebook, is_notebook_path, repair_notebook, BackupStatus, Inspection,
    RepairOptions, RepairOutcome,
};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// Tallies for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Notebooks that were inspected.
    pub processed: usize,
    /// Notebooks whose inspection found issues.
    pub with_issues: usize,
    /// Notebooks that were rewritten by a repair.
    pub fixed: usize,
}

/// The check/fix command implementation.
pub struct NotebooksCommand {
    mode: Mode,
    files: Vec<String>,
    options: RepairOptions,
}

impl NotebooksCommand {
    /// Create a new notebook command.
    pub fn new(mode: Mode, files: Vec<String>, options: RepairOptions) -> Self {
        Self {
            mode,
            files,
            options,
        }
    }

    /// Process every notebook and return the tallies.
    pub fn run(&self, ui: &mut dyn UserInterface) -> RunSummary {
        let mut summary = RunSummary::default();

        for path in expand_arguments(&self.files) {
            if !path.exists() {
                ui.warning(&format!("File not found: {}", path.display()));
                continue;
            }
            if !is_notebook_path(&path) {
                ui.warning(&format!("Skipping non-notebook file: {}", path.display()));
                continue;
            }

            summary.processed += 1;
            self.process(&path, ui, &mut summary);
        }

        summary
    }

    fn process(&self, path: &Path, ui: &mut dyn UserInterface, summary: &mut RunSummary) {
        let inspection = inspect_notebook(path);
        let mode = ui.output_mode();

        if mode.shows_progress() || inspection.has_issues() {
            ui.message(&format!("\nProcessing: {}", path.display()));
        }

        if let Some(error) = inspection.error() {
            ui.error(&format!("Error: {}", error));
            return;
        }

        if mode.shows_verbose() {
            if let Inspection::Scanned { total_widgets, .. } = &inspection {
                ui.message(&format!(
                    "  Widgets: {} total, {} missing state",
                    total_widgets,
                    inspection.missing_state_count()
                ));
            }
        }

        if !inspection.has_issues() {
            if mode.shows_progress() {
                let message = inspection.message().unwrap_or("No issues found");
                ui.success(message);
            }
            return;
        }

        summary.with_issues += 1;
        let issue = inspection
            .issue()
            .unwrap_or_else(|| "Unknown issue".to_string());
        ui.message(&format!("  Issues found: {}", issue));

        let affected = inspection.missing_state_widgets();
        if !affected.is_empty() {
            ui.message(&format!("  Affected widgets: {}", affected.join(", ")));
        }

        if self.mode == Mode::Fix && self.repair(path, ui) {
            summary.fixed += 1;
        }
    }

    /// Repair one notebook, reporting the outcome. Returns whether it was rewritten.
    fn repair(&self, path: &Path, ui: &mut dyn UserInterface) -> bool {
        let outcome = match repair_notebook(path, &self.options) {
            Ok(outcome) => outcome,
            Err(e) => {
                ui.error(&e.to_string());
                return false;
            }
        };

        match &outcome {
            RepairOutcome::NoWidgetMetadata => {
                ui.message(&format!("  No widget metadata found in {}", path.display()));
            }
            RepairOutcome::NoWidgetState => {
                ui.message(&format!("  No widget state data found in {}", path.display()));
            }
            RepairOutcome::NothingToFix => {
                ui.message(&format!("  No fixes needed for {}", path.display()));
            }
            RepairOutcome::Repaired {
                fixed_widgets,
                backup,
            } => {
                if ui.output_mode().shows_progress() {
                    for id in fixed_widgets {
                        ui.message(&format!("  Fixed widget {}", id));
                    }
                }
                report_backup(backup, ui);
                ui.success(&format!(
                    "Fixed {} widgets in {}",
                    fixed_widgets.len(),
                    path.display()
                ));
            }
        }

        outcome.was_repaired()
    }
}

fn report_backup(backup: &BackupStatus, ui: &mut dyn UserInterface) {
    match backup {
        BackupStatus::Disabled => {}
        BackupStatus::Created(path) => {
            ui.message(&format!("  Created backup: {}", path.display()));
        }
        BackupStatus::Failed { path, message } => {
            ui.warning(&format!(
                "Failed to create backup {}: {}",
                path.display(),
                message
            ));
        }
    }
}

impl Command for NotebooksCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let summary = self.run(ui);

        ui.show_header("Summary");
        ui.message(&format!("Files processed: {}", summary.processed));
        ui.message(&format!("Files with issues: {}", summary.with_issues));
        if self.mode == Mode::Fix {
            ui.message(&format!("Files fixed: {}", summary.fixed));
        }

        if summary.with_issues == 0 {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notebook::{backup_path, WIDGET_STATE_KEY};
    use crate::ui::{MockUI, OutputMode};
    use serde_json::{json, Value};
    use std::fs;
    use tempfile::TempDir;

    fn write(temp: &TempDir, name: &str, doc: &Value) -> String {
        let path = temp.path().join(name);
        fs::write(&path, serde_json::to_string_pretty(doc).unwrap()).unwrap();
        path.to_string_lossy().into_owned()
    }

    fn clean_notebook() -> Value {
        json!({"metadata": {"widgets": {WIDGET_STATE_KEY: {"a": {"state": {}}}}}, "cells": []})
    }

    fn broken_notebook() -> Value {
        json!({"metadata": {"widgets": {WIDGET_STATE_KEY: {
            "w1": {"model_module": "@jupyter-widgets/controls", "model_name": "IntSliderModel"},
            "w2": {"model_name": "Button"},
            "w3": {"state": {}}
        }}}, "cells": []})
    }

    fn check(files: Vec<String>) -> NotebooksCommand {
        NotebooksCommand::new(Mode::Check, files, RepairOptions::default())
    }

    #[test]
    fn check_reports_issues_and_fails() {
        let temp = TempDir::new().unwrap();
        let clean = write(&temp, "clean.ipynb", &clean_notebook());
        let broken = write(&temp, "broken.ipynb", &broken_notebook());
        let mut ui = MockUI::new();

        let result = check(vec![clean, broken.clone()]).execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_message("Issues found: 2 widgets missing \"state\" key"));
        assert!(ui.has_message("Affected widgets: w1, w2"));
        assert!(ui.has_success("All widgets have required \"state\" keys"));
        assert!(ui.has_message("Files processed: 2"));
        assert!(ui.has_message("Files with issues: 1"));
        assert!(!ui.has_message("Files fixed"));
        assert_eq!(ui.headers(), ["Summary"]);

        // Check mode never writes
        let doc: Value = serde_json::from_str(&fs::read_to_string(&broken).unwrap()).unwrap();
        assert_eq!(doc, broken_notebook());
    }

    #[test]
    fn check_without_issues_succeeds() {
        let temp = TempDir::new().unwrap();
        let plain = write(&temp, "plain.ipynb", &json!({"metadata": {}, "cells": []}));
        let mut ui = MockUI::new();

        let result = check(vec![plain]).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_success("No widget metadata found"));
        assert!(ui.has_message("Files with issues: 0"));
    }

    #[test]
    fn fix_repairs_and_counts() {
        let temp = TempDir::new().unwrap();
        let broken = write(&temp, "broken.ipynb", &broken_notebook());
        let mut ui = MockUI::new();
        let cmd = NotebooksCommand::new(Mode::Fix, vec![broken.clone()], RepairOptions::default());

        let result = cmd.execute(&mut ui).unwrap();

        // Issues were found, so the run still fails even though they were fixed
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_message("Fixed widget w1"));
        assert!(ui.has_message("Fixed widget w2"));
        assert!(ui.has_message("Created backup"));
        assert!(ui.has_success("Fixed 2 widgets in"));
        assert!(ui.has_message("Files fixed: 1"));
        assert!(backup_path(Path::new(&broken)).exists());

        let doc: Value = serde_json::from_str(&fs::read_to_string(&broken).unwrap()).unwrap();
        let block = &doc["metadata"]["widgets"][WIDGET_STATE_KEY];
        assert_eq!(block["w1"]["state"]["_view_module"], "@jupyter-widgets/base");
        assert_eq!(block["w2"]["state"]["_view_name"], "ButtonView");
    }

    #[test]
    fn second_fix_run_finds_nothing() {
        let temp = TempDir::new().unwrap();
        let broken = write(&temp, "broken.ipynb", &broken_notebook());
        let options = RepairOptions { backup: false };

        let mut ui = MockUI::new();
        NotebooksCommand::new(Mode::Fix, vec![broken.clone()], options)
            .execute(&mut ui)
            .unwrap();
        let first = fs::read_to_string(&broken).unwrap();

        let mut ui = MockUI::new();
        let result = NotebooksCommand::new(Mode::Fix, vec![broken.clone()], options)
            .execute(&mut ui)
            .unwrap();

        assert!(result.success);
        assert_eq!(fs::read_to_string(&broken).unwrap(), first);
        assert!(ui.has_message("Files fixed: 0"));
    }

    #[test]
    fn fix_of_non_object_entries_is_reported_not_fixed() {
        let temp = TempDir::new().unwrap();
        let doc = json!({"metadata": {"widgets": {WIDGET_STATE_KEY: {"w": 7}}}});
        let path = write(&temp, "odd.ipynb", &doc);
        let mut ui = MockUI::new();
        let cmd = NotebooksCommand::new(Mode::Fix, vec![path], RepairOptions::default());

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_message("No fixes needed for"));
        assert!(ui.has_message("Files fixed: 0"));
    }

    #[test]
    fn fix_of_missing_widget_state_key() {
        let temp = TempDir::new().unwrap();
        let doc = json!({"metadata": {"widgets": {"other": {}}}});
        let path = write(&temp, "nokey.ipynb", &doc);
        let mut ui = MockUI::new();
        let cmd = NotebooksCommand::new(Mode::Fix, vec![path], RepairOptions::default());

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("Issues found: Missing application/vnd.jupyter.widget-state+json key"));
        assert!(ui.has_message("No widget state data found in"));
    }

    #[cfg(unix)]
    #[test]
    fn failed_rewrite_is_reported_and_next_file_processed() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let locked = write(&temp, "a_locked.ipynb", &broken_notebook());
        let next = write(&temp, "b_next.ipynb", &broken_notebook());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o444)).unwrap();

        // Root ignores file permissions
        if fs::OpenOptions::new().write(true).open(&locked).is_ok() {
            return;
        }

        let mut ui = MockUI::new();
        let cmd = NotebooksCommand::new(
            Mode::Fix,
            vec![locked.clone(), next.clone()],
            RepairOptions { backup: false },
        );

        let summary = cmd.run(&mut ui);

        assert!(ui.has_error(&format!("Failed to write notebook {}", locked)));
        assert!(ui.has_success(&format!("Fixed 2 widgets in {}", next)));
        assert_eq!(
            summary,
            RunSummary {
                processed: 2,
                with_issues: 2,
                fixed: 1
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn failed_rewrite_is_not_counted_as_fixed() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let locked = write(&temp, "locked.ipynb", &broken_notebook());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o444)).unwrap();

        if fs::OpenOptions::new().write(true).open(&locked).is_ok() {
            return;
        }

        let mut ui = MockUI::new();
        let cmd = NotebooksCommand::new(Mode::Fix, vec![locked], RepairOptions { backup: false });

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Failed to write notebook"));
        assert!(ui.has_message("Files fixed: 0"));
    }

    #[test]
    fn unreadable_notebook_is_reported_and_skipped() {
        let temp = TempDir::new().unwrap();
        let bad = temp.path().join("bad.ipynb");
        fs::write(&bad, "{ nope").unwrap();
        let clean = write(&temp, "clean.ipynb", &clean_notebook());
        let mut ui = MockUI::new();

        let summary = check(vec![bad.to_string_lossy().into_owned(), clean]).run(&mut ui);

        assert!(ui.has_error("Error: Failed to parse notebook"));
        assert_eq!(
            summary,
            RunSummary {
                processed: 2,
                with_issues: 0,
                fixed: 0
            }
        );
    }

    #[test]
    fn missing_and_foreign_files_are_skipped_with_warning() {
        let temp = TempDir::new().unwrap();
        let txt = temp.path().join("notes.txt");
        fs::write(&txt, "hello").unwrap();
        let missing = temp.path().join("missing.ipynb");
        let mut ui = MockUI::new();

        let summary = check(vec![
            missing.to_string_lossy().into_owned(),
            txt.to_string_lossy().into_owned(),
        ])
        .run(&mut ui);

        assert!(ui.has_warning("File not found"));
        assert!(ui.has_warning("Skipping non-notebook file"));
        assert_eq!(summary.processed, 0);
    }

    #[test]
    fn glob_arguments_are_expanded() {
        let temp = TempDir::new().unwrap();
        write(&temp, "a.ipynb", &clean_notebook());
        write(&temp, "b.ipynb", &broken_notebook());
        let pattern = format!("{}/*.ipynb", temp.path().display());
        let mut ui = MockUI::new();

        let summary = check(vec![pattern]).run(&mut ui);

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.with_issues, 1);
    }

    #[test]
    fn unmatched_glob_contributes_nothing() {
        let temp = TempDir::new().unwrap();
        let pattern = format!("{}/*.ipynb", temp.path().display());
        let mut ui = MockUI::new();

        let result = check(vec![pattern]).execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.warnings().is_empty());
        assert!(ui.has_message("Files processed: 0"));
    }

    #[test]
    fn quiet_mode_hides_clean_files() {
        let temp = TempDir::new().unwrap();
        let clean = write(&temp, "clean.ipynb", &clean_notebook());
        let broken = write(&temp, "broken.ipynb", &broken_notebook());
        let mut ui = MockUI::with_mode(OutputMode::Quiet);

        check(vec![clean.clone(), broken.clone()]).run(&mut ui);

        assert!(!ui.has_message(&format!("Processing: {}", clean)));
        assert!(ui.has_message(&format!("Processing: {}", broken)));
        assert!(ui.successes().is_empty());
    }

    #[test]
    fn verbose_mode_shows_widget_counts() {
        let temp = TempDir::new().unwrap();
        let broken = write(&temp, "broken.ipynb", &broken_notebook());
        let mut ui = MockUI::with_mode(OutputMode::Verbose);

        check(vec![broken]).run(&mut ui);

        assert!(ui.has_message("Widgets: 3 total, 2 missing state"));
    }
}
