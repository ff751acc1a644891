//! Named view payloads rendered by the catalog handlers
//!
//! Templating happens outside this server: a view is serialized as its
//! template name plus the data the template needs.

use axum::{
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Book, BookInstanceDetail, BookInstanceFormValues, FieldError};

pub const LIST_TEMPLATE: &str = "bookinstance_list";
pub const DETAIL_TEMPLATE: &str = "bookinstance_detail";
pub const FORM_TEMPLATE: &str = "bookinstance_form";
pub const DELETE_TEMPLATE: &str = "bookinstance_delete";

/// A template name together with its data
#[derive(Debug, Clone, Serialize)]
pub struct View<T> {
    pub view: &'static str,
    #[serde(flatten)]
    pub data: T,
}

impl<T> View<T> {
    pub fn new(view: &'static str, data: T) -> Self {
        Self { view, data }
    }
}

impl<T: Serialize> IntoResponse for View<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstanceListView {
    pub title: String,
    pub bookinstance_list: Vec<BookInstanceDetail>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstanceDetailView {
    pub title: String,
    pub bookinstance: BookInstanceDetail,
    pub due_back_formatted: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstanceFormView {
    pub title: String,
    pub book_list: Vec<Book>,
    /// Book preselected in the selection list
    pub selected_book: Option<String>,
    pub bookinstance: Option<BookInstanceFormValues>,
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookInstanceDeleteView {
    pub title: String,
    /// Absent when the copy does not exist
    pub book_instance: Option<BookInstanceDetail>,
}

/// Result of a form submission
#[derive(Debug, Clone)]
pub enum Submission {
    /// Accepted; continue at this URL
    Redirect(String),
    /// Rejected by validation; show the form again
    Rerender(View<BookInstanceFormView>),
}

impl IntoResponse for Submission {
    fn into_response(self) -> Response {
        match self {
            Submission::Redirect(url) => Redirect::to(&url).into_response(),
            Submission::Rerender(view) => view.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header::LOCATION, StatusCode};

    #[test]
    fn test_view_flattens_payload() {
        let view = View::new(
            DELETE_TEMPLATE,
            BookInstanceDeleteView {
                title: "Delete Book Instance".into(),
                book_instance: None,
            },
        );
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["view"], "bookinstance_delete");
        assert_eq!(json["title"], "Delete Book Instance");
        assert!(json["book_instance"].is_null());
    }

    #[test]
    fn test_redirect_submission_is_see_other() {
        let response = Submission::Redirect("/catalog/bookinstances".into()).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[LOCATION], "/catalog/bookinstances");
    }
}
