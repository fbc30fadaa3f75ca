//! Course application intake records and their validation.
//!
//! Applications are append-only: once accepted they are never mutated or
//! deleted. Validation collects the complete field→message map using the
//! canonical Ukrainian texts the catalogue front end displays.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::FieldErrors;

/// Longest accepted note, in characters.
pub const NOTE_MAX_CHARS: usize = 1000;

const MSG_FULL_NAME: &str = "ПІБ є обов'язковим (мін. 2 символи)";
const MSG_EMAIL: &str = "Введіть коректний email";
const MSG_COURSE: &str = "Необхідно обрати курс";
const MSG_NOTE: &str = "Коментар не може перевищувати 1000 символів";

/// Persisted application record.
///
/// ## Invariants
/// - `id` is unique within the applications collection.
/// - Records are appended, never rewritten in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Unique stable identifier.
    pub id: i64,
    /// Server-side acceptance timestamp.
    pub timestamp: DateTime<Utc>,
    /// Applicant's full name.
    pub full_name: String,
    /// Contact email.
    pub email: String,
    /// Optional contact phone; empty when not provided.
    #[serde(default)]
    pub phone: String,
    /// Course the applicant selected.
    pub course_id: i64,
    /// Optional free-form note; empty when not provided.
    #[serde(default)]
    pub note: String,
}

/// Course reference as submitted by the intake form.
///
/// The original form posts `<select>` values, so the id arrives as a JSON
/// string; API clients send numbers. Both decode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CourseRef {
    /// Numeric id.
    Id(i64),
    /// Numeric id in string form (possibly empty for "no selection").
    Raw(String),
}

impl CourseRef {
    fn resolve(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Raw(raw) => raw.trim().parse().ok(),
        }
    }
}

/// Raw intake payload as the wire provides it.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    /// Applicant's full name.
    pub full_name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Selected course reference.
    pub course_id: Option<CourseRef>,
    /// Optional free-form note.
    pub note: Option<String>,
}

/// Validated intake payload awaiting an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDraft {
    full_name: String,
    email: String,
    phone: String,
    course_id: i64,
    note: String,
}

impl ApplicationDraft {
    /// Validate an intake payload, collecting every invalid field.
    ///
    /// `course_exists` answers whether a course id is currently in the
    /// catalogue; a reference to a vanished course reads as "no course
    /// selected" to the applicant.
    ///
    /// # Errors
    /// Returns the complete field→message map when any field is invalid.
    pub fn validate(
        form: ApplicationForm,
        course_exists: impl Fn(i64) -> bool,
    ) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let full_name = form.full_name.as_deref().unwrap_or_default().trim();
        if full_name.chars().count() < 2 {
            errors.insert("fullName".to_owned(), MSG_FULL_NAME.to_owned());
        }

        let email = form.email.as_deref().unwrap_or_default().trim();
        if !is_valid_email(email) {
            errors.insert("email".to_owned(), MSG_EMAIL.to_owned());
        }

        let course_id = match form.course_id.as_ref().and_then(CourseRef::resolve) {
            Some(id) if course_exists(id) => Some(id),
            _ => {
                errors.insert("courseId".to_owned(), MSG_COURSE.to_owned());
                None
            }
        };

        let note = form.note.unwrap_or_default();
        if note.chars().count() > NOTE_MAX_CHARS {
            errors.insert("note".to_owned(), MSG_NOTE.to_owned());
        }

        match (errors.is_empty(), course_id) {
            (true, Some(course_id)) => Ok(Self {
                full_name: full_name.to_owned(),
                email: email.to_owned(),
                phone: form.phone.unwrap_or_default().trim().to_owned(),
                course_id,
                note,
            }),
            _ => Err(errors),
        }
    }

    /// Materialise the draft into an append-ready record.
    pub fn into_application(self, id: i64, timestamp: DateTime<Utc>) -> Application {
        Application {
            id,
            timestamp,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            course_id: self.course_id,
            note: self.note,
        }
    }
}

/// Email shape check: one `@`, no whitespace, and a dot strictly inside the
/// domain part. Mirrors the front end's acceptance rule so the server never
/// rejects what the form already accepted.
fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .bytes()
        .enumerate()
        .any(|(index, byte)| byte == b'.' && index > 0 && index + 1 < domain.len())
}
