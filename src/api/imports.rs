//! Spreadsheet import endpoint

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::Multipart;
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::import_report::ImportReport,
};

/// Multipart body of an import request
#[derive(ToSchema)]
pub struct ImportUpload {
    /// Spreadsheet (xlsx, xls, ods or csv); only the first sheet is read
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Bulk import books from a spreadsheet
#[utoipa::path(
    post,
    path = "/books/import",
    tag = "imports",
    request_body(content = ImportUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Import processed; see success and errors", body = ImportReport),
        (status = 400, description = "Missing or unreadable spreadsheet", body = ImportReport)
    )
)]
pub async fn import_books(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<ImportReport>)> {
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(String::from);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    match state
        .services
        .imports
        .import_spreadsheet(&bytes, file_name.as_deref())
        .await
    {
        Ok(report) => {
            if report.has_warnings() {
                tracing::warn!(
                    "Import completed with {} row warnings ({} inserted, {} updated)",
                    report.errors.len(),
                    report.inserted,
                    report.updated
                );
            }
            Ok((StatusCode::OK, Json(report)))
        }
        Err(e) => {
            tracing::warn!("Rejected upload: {}", e);
            Ok((StatusCode::BAD_REQUEST, Json(ImportReport::failed(e.to_string()))))
        }
    }
}
