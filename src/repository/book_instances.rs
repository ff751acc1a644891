//! Book instance persistence on Repository

use sqlx::FromRow;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{
        book_instance::BookInstanceRow, BookInstance, BookInstanceDetail, BookInstanceStatus,
        NewBookInstance,
    },
};

const SELECT_DETAIL: &str = r#"
    SELECT bi.id, bi.book_id, b.title AS book_title, bi.imprint, bi.status, bi.due_back
    FROM book_instance bi
    JOIN book b ON b.id = bi.book_id
"#;

/// Row as stored, without the joined book
#[derive(Debug, FromRow)]
struct StoredRow {
    id: String,
    book_id: String,
    imprint: String,
    status: String,
    due_back: Option<chrono::NaiveDate>,
}

impl TryFrom<StoredRow> for BookInstance {
    type Error = AppError;

    fn try_from(row: StoredRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<BookInstanceStatus>()
            .map_err(|_| AppError::Internal(format!("Stored status '{}' is not recognised", row.status)))?;
        Ok(Self {
            id: row.id,
            book: row.book_id,
            imprint: row.imprint,
            status,
            due_back: row.due_back,
        })
    }
}

impl Repository {
    /// List all copies with their book resolved
    pub async fn book_instances_list(&self) -> AppResult<Vec<BookInstanceDetail>> {
        let query = format!("{} ORDER BY b.title, bi.id", SELECT_DETAIL);
        let rows = sqlx::query_as::<_, BookInstanceRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(BookInstanceDetail::try_from).collect()
    }

    /// Get a copy by ID with its book resolved
    pub async fn book_instances_find(&self, id: &str) -> AppResult<Option<BookInstanceDetail>> {
        let query = format!("{} WHERE bi.id = $1", SELECT_DETAIL);
        sqlx::query_as::<_, BookInstanceRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(BookInstanceDetail::try_from)
            .transpose()
    }

    /// Insert a new copy
    pub async fn book_instances_create(&self, data: &NewBookInstance) -> AppResult<BookInstance> {
        let row = sqlx::query_as::<_, StoredRow>(
            r#"
            INSERT INTO book_instance (id, book_id, imprint, status, due_back)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(&data.id)
        .bind(&data.book)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .fetch_one(&self.pool)
        .await?;
        row.try_into()
    }

    /// Overwrite every column of an existing copy
    pub async fn book_instances_replace(
        &self,
        id: &str,
        data: &NewBookInstance,
    ) -> AppResult<Option<BookInstance>> {
        sqlx::query_as::<_, StoredRow>(
            r#"
            UPDATE book_instance
            SET book_id = $2, imprint = $3, status = $4, due_back = $5, modif_date = NOW()
            WHERE id = $1
            RETURNING id, book_id, imprint, status, due_back
            "#,
        )
        .bind(id)
        .bind(&data.book)
        .bind(&data.imprint)
        .bind(data.status.as_str())
        .bind(data.due_back)
        .fetch_optional(&self.pool)
        .await?
        .map(BookInstance::try_from)
        .transpose()
    }

    /// Delete a copy; a missing copy is left as is
    pub async fn book_instances_delete(&self, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_instance WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            tracing::debug!("No book instance {} to delete", id);
        }
        Ok(())
    }
}
