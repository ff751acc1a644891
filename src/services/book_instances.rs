//! Book instance request pipelines

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::list_url, BookInstanceDetail, BookInstanceForm, BookInstanceFormValues,
        FieldError,
    },
    repository::CatalogStore,
    views::{
        BookInstanceDeleteView, BookInstanceDetailView, BookInstanceFormView,
        BookInstanceListView, Submission, View, DELETE_TEMPLATE, DETAIL_TEMPLATE, FORM_TEMPLATE,
        LIST_TEMPLATE,
    },
};

const CREATE_TITLE: &str = "Create BookInstance";
const UPDATE_TITLE: &str = "Update Book Instance";

#[derive(Clone)]
pub struct BookInstanceService {
    store: Arc<dyn CatalogStore>,
}

impl BookInstanceService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<View<BookInstanceListView>> {
        let bookinstance_list = self.store.list_book_instances().await?;
        Ok(View::new(
            LIST_TEMPLATE,
            BookInstanceListView {
                title: "Book Instance List".to_string(),
                bookinstance_list,
            },
        ))
    }

    pub async fn detail(&self, id: &str) -> AppResult<View<BookInstanceDetailView>> {
        let bookinstance = self
            .store
            .find_book_instance(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;

        Ok(View::new(
            DETAIL_TEMPLATE,
            BookInstanceDetailView {
                title: format!("Copy: {}", bookinstance.book.title),
                due_back_formatted: bookinstance.due_back_formatted(),
                bookinstance,
            },
        ))
    }

    pub async fn create_form(&self) -> AppResult<View<BookInstanceFormView>> {
        let book_list = self.store.list_books().await?;
        Ok(View::new(
            FORM_TEMPLATE,
            BookInstanceFormView {
                title: CREATE_TITLE.to_string(),
                book_list,
                selected_book: None,
                bookinstance: None,
                errors: Vec::new(),
            },
        ))
    }

    /// Validate, sanitize and store a new copy.
    ///
    /// The referenced book is not checked here; a dangling id surfaces as
    /// a persistence error.
    pub async fn create_submit(&self, form: BookInstanceForm) -> AppResult<Submission> {
        let form = form.trimmed();
        let report = form.validate_create();
        let sanitized = form.sanitize();
        let id = uuid::Uuid::new_v4().to_string();

        if !report.is_valid() {
            tracing::debug!("Rejected book instance form: {:?}", report.messages());
            let book_list = self.store.list_books().await?;
            return Ok(Submission::Rerender(View::new(
                FORM_TEMPLATE,
                BookInstanceFormView {
                    title: CREATE_TITLE.to_string(),
                    book_list,
                    selected_book: Some(sanitized.book.clone()),
                    bookinstance: Some(sanitized.form_values(Some(id))),
                    errors: report.errors,
                },
            )));
        }

        let record = sanitized.into_record(id)?;
        let created = self.store.create_book_instance(&record).await?;
        tracing::info!("Created book instance {} of book {}", created.id, created.book);
        Ok(Submission::Redirect(created.url()))
    }

    pub async fn delete_form(&self, id: &str) -> AppResult<View<BookInstanceDeleteView>> {
        let book_instance = self.store.find_book_instance(id).await?;
        Ok(View::new(
            DELETE_TEMPLATE,
            BookInstanceDeleteView {
                title: "Delete Book Instance".to_string(),
                book_instance,
            },
        ))
    }

    /// Delete the copy named in the request body, whether or not it exists
    pub async fn delete_submit(&self, bookinstanceid: &str) -> AppResult<Submission> {
        if self.store.find_book_instance(bookinstanceid).await?.is_none() {
            tracing::warn!("Deleting book instance {} which does not exist", bookinstanceid);
        }

        self.store.delete_book_instance(bookinstanceid).await?;
        tracing::info!("Deleted book instance {}", bookinstanceid);
        Ok(Submission::Redirect(list_url()))
    }

    pub async fn update_form(&self, id: &str) -> AppResult<View<BookInstanceFormView>> {
        let (bookinstance, book_list) = tokio::try_join!(
            self.store.find_book_instance(id),
            self.store.list_books(),
        )?;
        let bookinstance = bookinstance
            .ok_or_else(|| AppError::NotFound("Book Instance not found".to_string()))?;

        Ok(update_form_view(&bookinstance, book_list, Vec::new()))
    }

    /// Replace a copy wholesale.
    ///
    /// The submitted book must exist before any other field is looked at.
    pub async fn update_submit(&self, id: &str, form: BookInstanceForm) -> AppResult<Submission> {
        let form = form.trimmed();

        let (existing, book) = tokio::try_join!(
            self.store.find_book_instance(id),
            self.store.find_book(&form.book),
        )?;
        if book.is_none() {
            return Err(AppError::InvalidReference("Invalid Book Specified".to_string()));
        }
        if existing.is_none() {
            tracing::debug!("Update submitted for unknown book instance {}", id);
        }

        let report = form.validate_update();
        if !report.is_valid() {
            let (bookinstance, book_list) = tokio::try_join!(
                self.store.find_book_instance(id),
                self.store.list_books(),
            )?;
            let bookinstance = bookinstance
                .ok_or_else(|| AppError::NotFound("Book Instance not found".to_string()))?;
            return Ok(Submission::Rerender(update_form_view(
                &bookinstance,
                book_list,
                report.errors,
            )));
        }

        let record = form.sanitize_update().into_record(id.to_string())?;
        let updated = self
            .store
            .replace_book_instance(id, &record)
            .await?
            .ok_or_else(|| AppError::NotFound("Book Instance not found".to_string()))?;
        tracing::info!("Updated book instance {}", updated.id);
        Ok(Submission::Redirect(record.url()))
    }
}

fn update_form_view(
    bookinstance: &BookInstanceDetail,
    book_list: Vec<crate::models::Book>,
    errors: Vec<FieldError>,
) -> View<BookInstanceFormView> {
    View::new(
        FORM_TEMPLATE,
        BookInstanceFormView {
            title: UPDATE_TITLE.to_string(),
            book_list,
            selected_book: Some(bookinstance.book.id.clone()),
            bookinstance: Some(BookInstanceFormValues::from(bookinstance)),
            errors,
        },
    )
}
