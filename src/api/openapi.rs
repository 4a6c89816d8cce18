//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, imports};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Campus Catalog API",
        version = "1.0.0",
        description = "University library catalog REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        health::health_check,
        books::list_books,
        books::get_book,
        books::list_departments,
        imports::import_books,
    ),
    components(
        schemas(
            crate::models::book::Book,
            crate::models::book::BookPage,
            crate::models::book::BookQuery,
            crate::models::department::Department,
            crate::models::import_report::ImportReport,
            imports::ImportUpload,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Catalog browsing"),
        (name = "imports", description = "Spreadsheet bulk import")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
