//! Spreadsheet bulk import
//!
//! Rows flow through the stages in order: decode (`sheet`), resolve headers
//! (`fields`), normalize departments (`department`), clean and validate
//! (`sanitize`), merge rows of the same title (`merge`), then insert or
//! update storage (`reconcile`). The `ImportReport` is threaded through
//! every stage.
//!
//! Reconciliation is strictly sequential: a later candidate must observe
//! the writes of earlier ones.

pub mod department;
pub mod fields;
pub mod merge;
pub mod reconcile;
pub mod sanitize;
pub mod sheet;

pub use merge::BookCandidate;
pub use sheet::{parse_workbook, CellValue, SheetError, SheetRow};

use crate::{
    models::import_report::{ImportOutcome, ImportReport},
    repository::{BookStore, TitleLookup},
};

/// Runs imports against a book store
pub struct SheetImporter<'a> {
    store: &'a dyn BookStore,
    title_lookup: TitleLookup,
}

impl<'a> SheetImporter<'a> {
    pub fn new(store: &'a dyn BookStore, title_lookup: TitleLookup) -> Self {
        Self { store, title_lookup }
    }

    /// Decode and import an uploaded spreadsheet.
    ///
    /// Only structural problems (unreadable file, no sheet, no data rows)
    /// are returned as errors; everything else ends up in the report.
    pub async fn import_workbook(
        &self,
        bytes: &[u8],
        file_name: Option<&str>,
    ) -> Result<ImportReport, SheetError> {
        let rows = parse_workbook(bytes, file_name)?;
        Ok(self.import_rows(&rows).await)
    }

    /// Import already-decoded rows
    pub async fn import_rows(&self, rows: &[SheetRow]) -> ImportReport {
        if rows.is_empty() {
            return ImportReport::failed(SheetError::Empty.to_string());
        }

        tracing::info!("Import started: {} data rows", rows.len());

        let allowed = self.store.allowed_departments();
        let mut report = ImportReport::started(rows.len());
        let mut candidates = Vec::with_capacity(rows.len());

        for row in rows {
            match sanitize::sanitize_row(row, &allowed) {
                Ok(candidate) => {
                    report.valid_rows += 1;
                    candidates.push(candidate);
                }
                Err(reason) => {
                    tracing::warn!("Rejected row {}: {}", row.line, reason);
                    report.reject_row(row.line, &reason);
                }
            }
        }

        let merged = merge::merge_candidates(candidates);
        tracing::debug!(
            "{} valid rows merged into {} candidates",
            report.valid_rows,
            merged.len()
        );

        for (_, candidate) in merged {
            let title = candidate.title.clone();
            let outcome = reconcile::reconcile(self.store, candidate, self.title_lookup).await;
            if let ImportOutcome::Skipped(ref reason) = outcome {
                tracing::warn!("Skipped \"{}\": {}", title, reason);
            }
            report.record(&title, outcome);
        }

        let report = report.finish();
        tracing::info!(
            "Import finished: {} inserted, {} updated, {} skipped",
            report.inserted,
            report.updated,
            report.skipped
        );
        report
    }
}
