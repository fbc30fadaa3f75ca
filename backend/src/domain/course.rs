//! Course catalogue entities and mutation payload validation.
//!
//! Mutating endpoints hand their raw payloads to [`CourseDraft::validate`]
//! or [`CoursePatch::validate`]; both collect the complete field→message
//! map instead of stopping at the first invalid field.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::FieldErrors;

/// Highest popularity score a course can carry.
pub const POPULARITY_MAX: u8 = 100;

const DEFAULT_CATEGORY: &str = "web";
const DEFAULT_POPULARITY: u8 = 50;

const MSG_TITLE_REQUIRED: &str = "Назва є обов'язковою";
const MSG_CATEGORY_BLANK: &str = "Категорія не може бути порожньою";
const MSG_PRICE_REQUIRED: &str = "Ціна є обов'язковою";
const MSG_PRICE_INVALID: &str = "Ціна має бути невід'ємним числом";
const MSG_POPULARITY_RANGE: &str = "Популярність має бути в межах від 0 до 100";

/// Persisted course record.
///
/// ## Invariants
/// - `id` is unique within the courses collection at every snapshot and is
///   never reused after deletion.
/// - `price >= 0` and finite; `popularity <= 100`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Unique stable identifier, assigned at creation.
    pub id: i64,
    /// Title in the catalogue's display language.
    pub title: String,
    /// Category slug; `all` is reserved for the filter wildcard.
    pub category: String,
    /// Price in hryvnias.
    pub price: f64,
    /// Popularity score from 0 to 100.
    pub popularity: u8,
    /// Ordered free-form tags matched by the text filter.
    pub tags: Vec<String>,
    /// Short description shown on the course card.
    pub description: String,
}

/// Raw course mutation payload as the wire provides it.
///
/// All fields are optional so the same shape serves both create (which then
/// requires `title` and `price`) and partial update.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseForm {
    /// Course title.
    pub title: Option<String>,
    /// Category slug.
    pub category: Option<String>,
    /// Price in hryvnias.
    pub price: Option<f64>,
    /// Popularity score.
    pub popularity: Option<i64>,
    /// Free-form tags.
    pub tags: Option<Vec<String>>,
    /// Card description.
    pub description: Option<String>,
}

/// Validated payload for creating a course.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseDraft {
    title: String,
    category: String,
    price: f64,
    popularity: u8,
    tags: Vec<String>,
    description: String,
}

impl CourseDraft {
    /// Validate a create payload, collecting every invalid field.
    ///
    /// `title` and `price` are required; `category` defaults to `web`,
    /// `popularity` to 50, `tags` and `description` to empty.
    ///
    /// # Errors
    /// Returns the complete field→message map when any field is invalid.
    pub fn validate(form: CourseForm) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = match normalize_required(form.title.as_deref()) {
            Some(title) => title,
            None => {
                errors.insert("title".to_owned(), MSG_TITLE_REQUIRED.to_owned());
                String::new()
            }
        };

        let category = match form.category.as_deref() {
            None => DEFAULT_CATEGORY.to_owned(),
            Some(raw) => match normalize_required(Some(raw)) {
                Some(category) => category,
                None => {
                    errors.insert("category".to_owned(), MSG_CATEGORY_BLANK.to_owned());
                    String::new()
                }
            },
        };

        let price = match form.price {
            Some(price) if is_valid_price(price) => price,
            Some(_) => {
                errors.insert("price".to_owned(), MSG_PRICE_INVALID.to_owned());
                0.0
            }
            None => {
                errors.insert("price".to_owned(), MSG_PRICE_REQUIRED.to_owned());
                0.0
            }
        };

        let popularity = match form.popularity {
            None => DEFAULT_POPULARITY,
            Some(raw) => match validate_popularity(raw) {
                Some(popularity) => popularity,
                None => {
                    errors.insert("popularity".to_owned(), MSG_POPULARITY_RANGE.to_owned());
                    0
                }
            },
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            title,
            category,
            price,
            popularity,
            tags: normalize_tags(form.tags.unwrap_or_default()),
            description: form.description.unwrap_or_default().trim().to_owned(),
        })
    }

    /// Materialise the draft into a record under a freshly assigned id.
    pub fn into_course(self, id: i64) -> Course {
        Course {
            id,
            title: self.title,
            category: self.category,
            price: self.price,
            popularity: self.popularity,
            tags: self.tags,
            description: self.description,
        }
    }
}

/// Validated partial update for an existing course.
///
/// Absent fields leave the record untouched; present fields replace the
/// stored value wholesale (including `tags`, which is an ordered list, not
/// a set to merge into).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePatch {
    title: Option<String>,
    category: Option<String>,
    price: Option<f64>,
    popularity: Option<u8>,
    tags: Option<Vec<String>>,
    description: Option<String>,
}

impl CoursePatch {
    /// Validate a partial-update payload, collecting every invalid field.
    ///
    /// # Errors
    /// Returns the complete field→message map when any present field is
    /// invalid.
    pub fn validate(form: CourseForm) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let title = match form.title.as_deref() {
            None => None,
            Some(raw) => match normalize_required(Some(raw)) {
                Some(title) => Some(title),
                None => {
                    errors.insert("title".to_owned(), MSG_TITLE_REQUIRED.to_owned());
                    None
                }
            },
        };

        let category = match form.category.as_deref() {
            None => None,
            Some(raw) => match normalize_required(Some(raw)) {
                Some(category) => Some(category),
                None => {
                    errors.insert("category".to_owned(), MSG_CATEGORY_BLANK.to_owned());
                    None
                }
            },
        };

        let price = match form.price {
            None => None,
            Some(price) if is_valid_price(price) => Some(price),
            Some(_) => {
                errors.insert("price".to_owned(), MSG_PRICE_INVALID.to_owned());
                None
            }
        };

        let popularity = match form.popularity {
            None => None,
            Some(raw) => match validate_popularity(raw) {
                Some(popularity) => Some(popularity),
                None => {
                    errors.insert("popularity".to_owned(), MSG_POPULARITY_RANGE.to_owned());
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            title,
            category,
            price,
            popularity,
            tags: form.tags.map(normalize_tags),
            description: form.description.map(|text| text.trim().to_owned()),
        })
    }

    /// True when the patch would not change any field.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply the patch to a stored record.
    pub fn apply_to(&self, course: &mut Course) {
        if let Some(title) = &self.title {
            course.title = title.clone();
        }
        if let Some(category) = &self.category {
            course.category = category.clone();
        }
        if let Some(price) = self.price {
            course.price = price;
        }
        if let Some(popularity) = self.popularity {
            course.popularity = popularity;
        }
        if let Some(tags) = &self.tags {
            course.tags = tags.clone();
        }
        if let Some(description) = &self.description {
            course.description = description.clone();
        }
    }
}

fn normalize_required(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

fn validate_popularity(raw: i64) -> Option<u8> {
    if (0..=i64::from(POPULARITY_MAX)).contains(&raw) {
        u8::try_from(raw).ok()
    } else {
        None
    }
}

fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_owned())
        .filter(|tag| !tag.is_empty())
        .collect()
}
