//! Repository layer for database operations

pub mod book_instances;
pub mod books;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{Book, BookInstance, BookInstanceDetail, NewBookInstance},
};

/// Persistence operations the catalog handlers depend on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Check that the backing store answers
    async fn ping(&self) -> AppResult<()>;

    async fn list_books(&self) -> AppResult<Vec<Book>>;

    async fn find_book(&self, id: &str) -> AppResult<Option<Book>>;

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstanceDetail>>;

    async fn find_book_instance(&self, id: &str) -> AppResult<Option<BookInstanceDetail>>;

    async fn create_book_instance(&self, data: &NewBookInstance) -> AppResult<BookInstance>;

    /// Overwrite every field of the copy at `id`. `None` when no such copy exists.
    async fn replace_book_instance(
        &self,
        id: &str,
        data: &NewBookInstance,
    ) -> AppResult<Option<BookInstance>>;

    /// Remove the copy at `id`. Removing a missing copy is not an error.
    async fn delete_book_instance(&self, id: &str) -> AppResult<()>;
}

/// Postgres-backed repository
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for Repository {
    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.books_list().await
    }

    async fn find_book(&self, id: &str) -> AppResult<Option<Book>> {
        self.books_find(id).await
    }

    async fn list_book_instances(&self) -> AppResult<Vec<BookInstanceDetail>> {
        self.book_instances_list().await
    }

    async fn find_book_instance(&self, id: &str) -> AppResult<Option<BookInstanceDetail>> {
        self.book_instances_find(id).await
    }

    async fn create_book_instance(&self, data: &NewBookInstance) -> AppResult<BookInstance> {
        self.book_instances_create(data).await
    }

    async fn replace_book_instance(
        &self,
        id: &str,
        data: &NewBookInstance,
    ) -> AppResult<Option<BookInstance>> {
        self.book_instances_replace(id, data).await
    }

    async fn delete_book_instance(&self, id: &str) -> AppResult<()> {
        self.book_instances_delete(id).await
    }
}
