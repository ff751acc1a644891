//! Book instance (physical copy) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::book::Book;
use crate::error::AppError;

/// Root of every canonical catalog URL
pub const CATALOG_ROOT: &str = "/catalog";

/// Canonical URL of the book instance list
pub fn list_url() -> String {
    format!("{}/bookinstances", CATALOG_ROOT)
}

/// Canonical detail URL of a book instance
pub fn detail_url(id: &str) -> String {
    format!("{}/bookinstance/{}", CATALOG_ROOT, id)
}

/// Availability of a copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum BookInstanceStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookInstanceStatus {
    pub const ALL: [BookInstanceStatus; 4] = [
        BookInstanceStatus::Maintenance,
        BookInstanceStatus::Available,
        BookInstanceStatus::Loaned,
        BookInstanceStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookInstanceStatus::Available => "Available",
            BookInstanceStatus::Maintenance => "Maintenance",
            BookInstanceStatus::Loaned => "Loaned",
            BookInstanceStatus::Reserved => "Reserved",
        }
    }
}

impl std::str::FromStr for BookInstanceStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("Unknown book instance status '{}'", s)))
    }
}

impl std::fmt::Display for BookInstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored book instance, with the book referenced by id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookInstance {
    pub id: String,
    /// Id of the owning book
    pub book: String,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn url(&self) -> String {
        detail_url(&self.id)
    }
}

/// Book instance with its book resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookInstanceDetail {
    pub id: String,
    pub book: Book,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
    /// Canonical detail URL
    pub url: String,
}

impl BookInstanceDetail {
    /// Due-back date as shown to readers, e.g. "Mar 4th, 2026"
    pub fn due_back_formatted(&self) -> Option<String> {
        self.due_back.map(format_due_back)
    }
}

fn format_due_back(date: NaiveDate) -> String {
    use chrono::Datelike;

    let day = date.day();
    let suffix = match (day % 10, day % 100) {
        (1, n) if n != 11 => "st",
        (2, n) if n != 12 => "nd",
        (3, n) if n != 13 => "rd",
        _ => "th",
    };
    format!("{} {}{}, {}", date.format("%b"), day, suffix, date.year())
}

/// Joined row as read from the database
#[derive(Debug, FromRow)]
pub struct BookInstanceRow {
    pub id: String,
    pub book_id: String,
    pub book_title: String,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
}

impl TryFrom<BookInstanceRow> for BookInstanceDetail {
    type Error = AppError;

    fn try_from(row: BookInstanceRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<BookInstanceStatus>()
            .map_err(|_| AppError::Internal(format!("Stored status '{}' is not recognised", row.status)))?;
        Ok(Self {
            url: detail_url(&row.id),
            id: row.id,
            book: Book {
                id: row.book_id,
                title: row.book_title,
            },
            imprint: row.imprint,
            status,
            due_back: row.due_back,
        })
    }
}

/// Sanitized record handed to persistence on create and on full replacement
#[derive(Debug, Clone, PartialEq)]
pub struct NewBookInstance {
    pub id: String,
    pub book: String,
    pub imprint: String,
    pub status: BookInstanceStatus,
    pub due_back: Option<NaiveDate>,
}

impl NewBookInstance {
    pub fn url(&self) -> String {
        detail_url(&self.id)
    }
}

impl From<NewBookInstance> for BookInstance {
    fn from(data: NewBookInstance) -> Self {
        Self {
            id: data.id,
            book: data.book,
            imprint: data.imprint,
            status: data.status,
            due_back: data.due_back,
        }
    }
}

/// Values shown in the create/update form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookInstanceFormValues {
    pub id: Option<String>,
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
}

impl From<&BookInstanceDetail> for BookInstanceFormValues {
    fn from(detail: &BookInstanceDetail) -> Self {
        Self {
            id: Some(detail.id.clone()),
            book: detail.book.id.clone(),
            imprint: detail.imprint.clone(),
            status: detail.status.to_string(),
            due_back: detail.due_back,
        }
    }
}
