//! Book instance (copy) endpoints

use axum::{
    extract::{Path, State},
    Form,
};

use crate::{
    error::AppResult,
    models::{BookInstanceForm, DeleteBookInstanceForm},
    views::{
        BookInstanceDeleteView, BookInstanceDetailView, BookInstanceFormView,
        BookInstanceListView, Submission, View,
    },
    AppState,
};

/// List every copy with its book
#[utoipa::path(
    get,
    path = "/catalog/bookinstances",
    tag = "bookinstances",
    responses(
        (status = 200, description = "bookinstance_list view", body = BookInstanceListView)
    )
)]
pub async fn list(State(state): State<AppState>) -> AppResult<View<BookInstanceListView>> {
    state.services.book_instances.list().await
}

/// Show one copy
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}",
    tag = "bookinstances",
    params(("id" = String, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "bookinstance_detail view", body = BookInstanceDetailView),
        (status = 404, description = "Book copy not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<View<BookInstanceDetailView>> {
    state.services.book_instances.detail(&id).await
}

/// Empty creation form
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    responses(
        (status = 200, description = "bookinstance_form view", body = BookInstanceFormView)
    )
)]
pub async fn create_form(State(state): State<AppState>) -> AppResult<View<BookInstanceFormView>> {
    state.services.book_instances.create_form().await
}

/// Create a copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/create",
    tag = "bookinstances",
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created; redirects to the new copy"),
        (status = 200, description = "Validation failed; bookinstance_form view", body = BookInstanceFormView)
    )
)]
pub async fn create_submit(
    State(state): State<AppState>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Submission> {
    state.services.book_instances.create_submit(form).await
}

/// Deletion confirmation page
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = String, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "bookinstance_delete view", body = BookInstanceDeleteView)
    )
)]
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<View<BookInstanceDeleteView>> {
    state.services.book_instances.delete_form(&id).await
}

/// Delete the copy named by `bookinstanceid` in the body
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/delete",
    tag = "bookinstances",
    params(("id" = String, Path, description = "Ignored; the body names the copy")),
    request_body(content = DeleteBookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Deleted; redirects to the list")
    )
)]
pub async fn delete_submit(
    State(state): State<AppState>,
    Path(_id): Path<String>,
    Form(form): Form<DeleteBookInstanceForm>,
) -> AppResult<Submission> {
    state
        .services
        .book_instances
        .delete_submit(&form.bookinstanceid)
        .await
}

/// Update form prefilled with the stored copy
#[utoipa::path(
    get,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = String, Path, description = "Book instance ID")),
    responses(
        (status = 200, description = "bookinstance_form view", body = BookInstanceFormView),
        (status = 404, description = "Book Instance not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<View<BookInstanceFormView>> {
    state.services.book_instances.update_form(&id).await
}

/// Replace a copy
#[utoipa::path(
    post,
    path = "/catalog/bookinstance/{id}/update",
    tag = "bookinstances",
    params(("id" = String, Path, description = "Book instance ID")),
    request_body(content = BookInstanceForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated; redirects to the copy"),
        (status = 200, description = "Validation failed; bookinstance_form view", body = BookInstanceFormView),
        (status = 404, description = "Book Instance not found", body = crate::error::ErrorResponse),
        (status = 422, description = "Invalid Book Specified", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<BookInstanceForm>,
) -> AppResult<Submission> {
    state.services.book_instances.update_submit(&id, form).await
}
