//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{book_instances, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LocalLibrary API",
        version = "0.3.0",
        description = "Catalog server for book copies",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Book instances
        book_instances::list,
        book_instances::detail,
        book_instances::create_form,
        book_instances::create_submit,
        book_instances::delete_form,
        book_instances::delete_submit,
        book_instances::update_form,
        book_instances::update_submit,
    ),
    components(
        schemas(
            crate::models::Book,
            crate::models::BookInstance,
            crate::models::BookInstanceDetail,
            crate::models::BookInstanceStatus,
            crate::models::BookInstanceFormValues,
            crate::models::BookInstanceForm,
            crate::models::DeleteBookInstanceForm,
            crate::models::FieldError,
            crate::views::BookInstanceListView,
            crate::views::BookInstanceDetailView,
            crate::views::BookInstanceFormView,
            crate::views::BookInstanceDeleteView,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "bookinstances", description = "Book copy management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
