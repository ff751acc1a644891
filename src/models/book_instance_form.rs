//! Book instance form input: validation rules and sanitization

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use super::book_instance::{BookInstanceFormValues, BookInstanceStatus, NewBookInstance};
use crate::error::AppResult;

/// Field order used when reporting validation failures
const FIELD_ORDER: [&str; 4] = ["book", "imprint", "status", "due_back"];

/// Raw create/update form body (`application/x-www-form-urlencoded`)
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BookInstanceForm {
    /// Id of the owning book
    #[serde(default)]
    pub book: String,
    #[serde(default)]
    pub imprint: String,
    /// One of Available, Maintenance, Loaned, Reserved
    #[serde(default)]
    pub status: String,
    /// ISO-8601 date; an empty value counts as absent
    #[serde(default)]
    pub due_back: Option<String>,
}

/// Delete confirmation body
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DeleteBookInstanceForm {
    pub bookinstanceid: String,
}

/// A single failed rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub rule: String,
    pub message: String,
}

/// Outcome of running a rule set over a form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }
}

impl From<ValidationErrors> for ValidationReport {
    fn from(errors: ValidationErrors) -> Self {
        let mut out: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |e| FieldError {
                    field: field.clone(),
                    rule: e.code.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                })
            })
            .collect();
        out.sort_by_key(|e| {
            FIELD_ORDER
                .iter()
                .position(|f| *f == e.field)
                .unwrap_or(FIELD_ORDER.len())
        });
        Self { errors: out }
    }
}

/// Rules applied when creating a copy
#[derive(Debug, Validate)]
struct CreateRules {
    #[validate(length(min = 1, message = "Book must be specified"))]
    book: String,
    #[validate(length(min = 1, message = "Imprint must be specified"))]
    imprint: String,
    #[validate(custom(function = "iso8601_date"))]
    due_back: Option<String>,
}

/// Rules applied when replacing a copy
#[derive(Debug, Validate)]
struct UpdateRules {
    #[validate(length(min = 1, message = "Please specify an imprint"))]
    imprint: String,
    #[validate(custom(function = "iso8601_value"))]
    due_back: String,
    #[validate(custom(function = "known_status"))]
    status: String,
}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

fn iso8601_date(value: &str) -> Result<(), ValidationError> {
    parse_iso8601(value)
        .map(|_| ())
        .ok_or_else(|| rule_error("isISO8601", "Invalid date"))
}

fn iso8601_value(value: &str) -> Result<(), ValidationError> {
    parse_iso8601(value)
        .map(|_| ())
        .ok_or_else(|| rule_error("isISO8601", "Invalid value"))
}

fn known_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<BookInstanceStatus>()
        .map(|_| ())
        .map_err(|_| rule_error("isIn", "Invalid value"))
}

/// Parse an ISO-8601 date or timestamp down to its calendar date.
///
/// Reduced-precision dates resolve to their first day: `2026` is Jan 1st,
/// `2026-10` is Oct 1st and `2026-W42` is the Monday of week 42.
pub fn parse_iso8601(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Some(date) = parse_iso_date(value) {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|ts| ts.date())
}

/// Calendar, week and ordinal dates in extended or basic form
fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let shape: String = value
        .chars()
        .map(|c| if c.is_ascii_digit() { '9' } else { c })
        .collect();

    let (input, fmt) = match shape.as_str() {
        "9999" => (format!("{}-01-01", value), "%Y-%m-%d"),
        "9999-99" => (format!("{}-01", value), "%Y-%m-%d"),
        "9999-99-99" => (value.to_string(), "%Y-%m-%d"),
        "99999999" => (value.to_string(), "%Y%m%d"),
        "9999-999" => (value.to_string(), "%Y-%j"),
        "9999999" => (value.to_string(), "%Y%j"),
        "9999-W99" => (format!("{}-1", value), "%G-W%V-%u"),
        "9999-W99-9" => (value.to_string(), "%G-W%V-%u"),
        "9999W99" => (format!("{}1", value), "%GW%V%u"),
        "9999W999" => (value.to_string(), "%GW%V%u"),
        _ => return None,
    };
    NaiveDate::parse_from_str(&input, fmt).ok()
}

/// HTML-escape user input before it is stored or echoed back
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '/' => out.push_str("&#x2F;"),
            '`' => out.push_str("&#96;"),
            _ => out.push(c),
        }
    }
    out
}

/// Form values after escaping and date coercion
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedBookInstance {
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: Option<NaiveDate>,
}

impl SanitizedBookInstance {
    /// Values to echo back into the form
    pub fn form_values(&self, id: Option<String>) -> BookInstanceFormValues {
        BookInstanceFormValues {
            id,
            book: self.book.clone(),
            imprint: self.imprint.clone(),
            status: self.status.clone(),
            due_back: self.due_back,
        }
    }

    /// Build the record to persist. An empty status takes the default.
    pub fn into_record(self, id: String) -> AppResult<NewBookInstance> {
        let status = if self.status.is_empty() {
            BookInstanceStatus::default()
        } else {
            self.status.parse()?
        };
        Ok(NewBookInstance {
            id,
            book: self.book,
            imprint: self.imprint,
            status,
            due_back: self.due_back,
        })
    }
}

impl BookInstanceForm {
    /// Trim surrounding whitespace from every field
    pub fn trimmed(self) -> Self {
        Self {
            book: self.book.trim().to_string(),
            imprint: self.imprint.trim().to_string(),
            status: self.status.trim().to_string(),
            due_back: self
                .due_back
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        }
    }

    pub fn validate_create(&self) -> ValidationReport {
        let rules = CreateRules {
            book: self.book.clone(),
            imprint: self.imprint.clone(),
            due_back: self.due_back.clone(),
        };
        match rules.validate() {
            Ok(()) => ValidationReport::default(),
            Err(errors) => errors.into(),
        }
    }

    pub fn validate_update(&self) -> ValidationReport {
        let rules = UpdateRules {
            imprint: self.imprint.clone(),
            due_back: self.due_back.clone().unwrap_or_default(),
            status: self.status.clone(),
        };
        match rules.validate() {
            Ok(()) => ValidationReport::default(),
            Err(errors) => errors.into(),
        }
    }

    pub fn sanitize(&self) -> SanitizedBookInstance {
        SanitizedBookInstance {
            book: escape(&self.book),
            imprint: escape(&self.imprint),
            status: escape(&self.status),
            due_back: self.due_back.as_deref().and_then(parse_iso8601),
        }
    }

    /// Sanitize for replacement. The book id was already looked up as
    /// submitted, so it is kept verbatim.
    pub fn sanitize_update(&self) -> SanitizedBookInstance {
        SanitizedBookInstance {
            book: self.book.clone(),
            ..self.sanitize()
        }
    }
}
