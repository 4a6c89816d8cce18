//! Import report returned by the spreadsheet import.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Result of reconciling one merged candidate against storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Inserted,
    Updated,
    Skipped(String),
}

/// Aggregate result of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub success: bool,
    pub message: String,
    /// Data rows read from the sheet
    pub total_rows: usize,
    /// Rows that passed sanitization
    pub valid_rows: usize,
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

impl ImportReport {
    /// Report for an import that could not start
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            ..Default::default()
        }
    }

    /// Report for an import over `total_rows` data rows
    pub fn started(total_rows: usize) -> Self {
        Self {
            total_rows,
            ..Default::default()
        }
    }

    /// Record a row excluded before merging
    pub fn reject_row(&mut self, line: usize, reason: &str) {
        self.skipped += 1;
        self.errors.push(format!("Row {}: {}", line, reason));
    }

    /// Record the outcome for a merged candidate
    pub fn record(&mut self, title: &str, outcome: ImportOutcome) {
        match outcome {
            ImportOutcome::Inserted => self.inserted += 1,
            ImportOutcome::Updated => self.updated += 1,
            ImportOutcome::Skipped(reason) => {
                self.skipped += 1;
                self.errors.push(format!("\"{}\": {}", title, reason));
            }
        }
    }

    /// Set the terminal success flag and message
    pub fn finish(mut self) -> Self {
        if self.inserted == 0 && self.updated == 0 {
            self.success = false;
            self.message = "No books were imported".to_string();
        } else {
            self.success = true;
            self.message = format!(
                "Import completed: {} inserted, {} updated, {} skipped",
                self.inserted, self.updated, self.skipped
            );
        }
        self
    }

    /// Partial success: something was written, but some rows failed
    pub fn has_warnings(&self) -> bool {
        self.success && !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nothing_imported_is_failure() {
        let mut report = ImportReport::started(2);
        report.record("A", ImportOutcome::Skipped("conflicting ISBN".to_string()));
        report.reject_row(3, "missing title");
        let report = report.finish();

        assert!(!report.success);
        assert_eq!(report.message, "No books were imported");
        assert_eq!(report.skipped, 2);
        assert_eq!(
            report.errors,
            vec![
                "\"A\": conflicting ISBN".to_string(),
                "Row 3: missing title".to_string()
            ]
        );
    }

    #[test]
    fn test_partial_success_has_warnings() {
        let mut report = ImportReport::started(2);
        report.record("A", ImportOutcome::Inserted);
        report.record("B", ImportOutcome::Skipped("boom".to_string()));
        let report = report.finish();

        assert!(report.success);
        assert!(report.has_warnings());
        assert_eq!(report.message, "Import completed: 1 inserted, 0 updated, 1 skipped");
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(ImportReport::started(4)).unwrap();
        assert_eq!(value["totalRows"], 4);
        assert_eq!(value["validRows"], 0);
        assert!(value["errors"].is_array());
    }
}
