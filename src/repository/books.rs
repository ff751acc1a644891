//! Book lookups on Repository

use super::Repository;
use crate::{error::AppResult, models::Book};

impl Repository {
    /// List all books (id and title) for selection lists
    pub async fn books_list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT id, title FROM book ORDER BY title")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get book by ID
    pub async fn books_find(&self, id: &str) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, Book>("SELECT id, title FROM book WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}
