//! HTTP handlers and routing

pub mod book_instances;
pub mod health;
pub mod openapi;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{models::book_instance::CATALOG_ROOT, AppState};

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let catalog = Router::new()
        .route("/bookinstances", get(book_instances::list))
        .route("/bookinstance/create", get(book_instances::create_form))
        .route("/bookinstance/create", post(book_instances::create_submit))
        .route("/bookinstance/:id", get(book_instances::detail))
        .route("/bookinstance/:id/delete", get(book_instances::delete_form))
        .route("/bookinstance/:id/delete", post(book_instances::delete_submit))
        .route("/bookinstance/:id/update", get(book_instances::update_form))
        .route("/bookinstance/:id/update", post(book_instances::update_submit));

    let app = Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest(CATALOG_ROOT, catalog)
        .with_state(state);

    app.merge(openapi::create_openapi_router()).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(cors),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{header::LOCATION, StatusCode};
    use axum_test::TestServer;
    use serde_json::Value;

    use super::*;
    use crate::{
        config::AppConfig,
        error::AppError,
        models::{Book, BookInstance, BookInstanceDetail, BookInstanceStatus},
        repository::MockCatalogStore,
        services::Services,
    };

    fn book() -> Book {
        Book {
            id: "B1".into(),
            title: "Kindred".into(),
        }
    }

    fn detail(id: &str) -> BookInstanceDetail {
        BookInstanceDetail {
            id: id.into(),
            book: book(),
            imprint: "Doubleday, 1979".into(),
            status: BookInstanceStatus::Loaned,
            due_back: chrono::NaiveDate::from_ymd_opt(2026, 11, 2),
            url: format!("/catalog/bookinstance/{}", id),
        }
    }

    fn server(store: MockCatalogStore) -> TestServer {
        let state = AppState {
            config: Arc::new(AppConfig::default()),
            services: Arc::new(Services::new(Arc::new(store))),
        };
        TestServer::new(create_router(state)).expect("Failed to create test server")
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = server(MockCatalogStore::new());

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_ready_reports_database_failure() {
        let mut store = MockCatalogStore::new();
        store
            .expect_ping()
            .returning(|| Err(AppError::Database(sqlx::Error::PoolTimedOut)));
        let server = server(store);

        let response = server.get("/ready").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["message"], "Database error");
    }

    #[tokio::test]
    async fn test_list_route() {
        let mut store = MockCatalogStore::new();
        store
            .expect_list_book_instances()
            .returning(|| Ok(vec![detail("bi1")]));
        let server = server(store);

        let response = server.get("/catalog/bookinstances").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["view"], "bookinstance_list");
        assert_eq!(body["bookinstance_list"][0]["book"]["title"], "Kindred");
        assert_eq!(body["bookinstance_list"][0]["status"], "Loaned");
    }

    #[tokio::test]
    async fn test_detail_route_not_found() {
        let mut store = MockCatalogStore::new();
        store.expect_find_book_instance().returning(|_| Ok(None));
        let server = server(store);

        let response = server.get("/catalog/bookinstance/missing").await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["message"], "Book copy not found");
    }

    #[tokio::test]
    async fn test_create_path_is_not_taken_as_an_id() {
        let mut store = MockCatalogStore::new();
        store.expect_find_book_instance().never();
        store.expect_list_books().returning(|| Ok(vec![book()]));
        let server = server(store);

        let response = server.get("/catalog/bookinstance/create").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["view"], "bookinstance_form");
        assert_eq!(body["title"], "Create BookInstance");
    }

    #[tokio::test]
    async fn test_create_submit_redirects_to_new_copy() {
        let mut store = MockCatalogStore::new();
        store
            .expect_create_book_instance()
            .times(1)
            .returning(|data| Ok(BookInstance::from(data.clone())));
        let server = server(store);

        let response = server
            .post("/catalog/bookinstance/create")
            .form(&[("book", "B1"), ("imprint", "First Ed."), ("due_back", "")])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        let location = response.header(LOCATION);
        assert!(location
            .to_str()
            .unwrap()
            .starts_with("/catalog/bookinstance/"));
    }

    #[tokio::test]
    async fn test_create_submit_invalid_rerenders_form() {
        let mut store = MockCatalogStore::new();
        store.expect_create_book_instance().never();
        store.expect_list_books().returning(|| Ok(vec![book()]));
        let server = server(store);

        let response = server
            .post("/catalog/bookinstance/create")
            .form(&[("book", "B1"), ("imprint", "")])
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["errors"][0]["message"], "Imprint must be specified");
        assert_eq!(body["selected_book"], "B1");
    }

    #[tokio::test]
    async fn test_delete_submit_uses_body_id() {
        let mut store = MockCatalogStore::new();
        store
            .expect_find_book_instance()
            .withf(|id| id == "from-body")
            .returning(|id| Ok(Some(detail(id))));
        store
            .expect_delete_book_instance()
            .times(1)
            .withf(|id| id == "from-body")
            .returning(|_| Ok(()));
        let server = server(store);

        let response = server
            .post("/catalog/bookinstance/from-url/delete")
            .form(&[("bookinstanceid", "from-body")])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header(LOCATION), "/catalog/bookinstances");
    }

    #[tokio::test]
    async fn test_update_submit_invalid_book() {
        let mut store = MockCatalogStore::new();
        store
            .expect_find_book_instance()
            .returning(|id| Ok(Some(detail(id))));
        store.expect_find_book().returning(|_| Ok(None));
        let server = server(store);

        let response = server
            .post("/catalog/bookinstance/bi1/update")
            .form(&[
                ("book", "nope"),
                ("imprint", "x"),
                ("status", "Available"),
                ("due_back", "2026-11-01"),
            ])
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = response.json();
        assert_eq!(body["message"], "Invalid Book Specified");
    }

    #[tokio::test]
    async fn test_update_form_not_found() {
        let mut store = MockCatalogStore::new();
        store.expect_find_book_instance().returning(|_| Ok(None));
        store.expect_list_books().returning(|| Ok(vec![]));
        let server = server(store);

        let response = server.get("/catalog/bookinstance/missing/update").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_form_missing_copy_still_renders() {
        let mut store = MockCatalogStore::new();
        store.expect_find_book_instance().returning(|_| Ok(None));
        let server = server(store);

        let response = server.get("/catalog/bookinstance/missing/delete").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert!(body["book_instance"].is_null());
    }
}
