//! Spreadsheet import service

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    import::{SheetError, SheetImporter},
    models::import_report::ImportReport,
    repository::{BookStore, TitleLookup},
};

#[derive(Clone)]
pub struct ImportService {
    store: Arc<dyn BookStore>,
    title_lookup: TitleLookup,
    /// Imports assume a single writer; concurrent uploads wait their turn
    running: Arc<Mutex<()>>,
}

impl ImportService {
    pub fn new(store: Arc<dyn BookStore>, title_lookup: TitleLookup) -> Self {
        Self {
            store,
            title_lookup,
            running: Arc::new(Mutex::new(())),
        }
    }

    /// Import an uploaded spreadsheet
    pub async fn import_spreadsheet(
        &self,
        bytes: &[u8],
        file_name: Option<&str>,
    ) -> Result<ImportReport, SheetError> {
        let _guard = self.running.lock().await;
        tracing::info!(
            "Importing spreadsheet {} ({} bytes)",
            file_name.unwrap_or("<unnamed>"),
            bytes.len()
        );

        SheetImporter::new(self.store.as_ref(), self.title_lookup)
            .import_workbook(bytes, file_name)
            .await
    }
}
