//! Pure catalogue query engine: filter and stable sort.
//!
//! Operates on an in-memory snapshot and performs no I/O. Pagination is the
//! `pagination` crate's job; this module narrows and orders the collection
//! the envelope is later cut from.

use icu_collator::{Collator, CollatorOptions, Strength};
use icu_locid::locale;
use serde::Deserialize;
use utoipa::ToSchema;

use super::course::Course;
use super::error::Error;

/// Sortable course fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Numeric price order.
    Price,
    /// Numeric popularity order.
    Popularity,
    /// Locale-collated title order.
    Title,
    /// Locale-collated category order.
    Category,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending (the default).
    #[default]
    Asc,
    /// Descending.
    Desc,
}

/// Filter and ordering parameters for one catalogue view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogueQuery {
    /// Free-text query; empty matches everything.
    pub text: String,
    /// Exact category to keep; `None` means all categories.
    pub category: Option<String>,
    /// Field to order by; `None` keeps snapshot order.
    pub sort: Option<SortField>,
    /// Direction applied when `sort` is present.
    pub order: SortOrder,
}

/// Compute the filtered, ordered view of a catalogue snapshot.
///
/// A record matches when the category condition holds AND the text query is
/// empty or is a case-insensitive substring of the title or of any tag.
/// Sorting is stable: records comparing equal keep their snapshot order.
///
/// # Errors
/// Fails only when the locale collation data cannot be loaded, which maps
/// to an internal error.
pub fn select(courses: Vec<Course>, query: &CatalogueQuery) -> Result<Vec<Course>, Error> {
    let needle = query.text.trim().to_lowercase();
    let mut view: Vec<Course> = courses
        .into_iter()
        .filter(|course| matches(course, &needle, query.category.as_deref()))
        .collect();

    if let Some(field) = query.sort {
        sort(&mut view, field, query.order)?;
    }

    Ok(view)
}

fn matches(course: &Course, needle: &str, category: Option<&str>) -> bool {
    if let Some(category) = category {
        if course.category != category {
            return false;
        }
    }
    if needle.is_empty() {
        return true;
    }
    course.title.to_lowercase().contains(needle)
        || course
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

fn sort(view: &mut [Course], field: SortField, order: SortOrder) -> Result<(), Error> {
    match field {
        SortField::Price => {
            view.sort_by(|a, b| directed(a.price.total_cmp(&b.price), order));
        }
        SortField::Popularity => {
            view.sort_by(|a, b| directed(a.popularity.cmp(&b.popularity), order));
        }
        SortField::Title => {
            let collator = catalogue_collator()?;
            view.sort_by(|a, b| directed(collator.compare(&a.title, &b.title), order));
        }
        SortField::Category => {
            let collator = catalogue_collator()?;
            view.sort_by(|a, b| directed(collator.compare(&a.category, &b.category), order));
        }
    }
    Ok(())
}

fn directed(ordering: std::cmp::Ordering, order: SortOrder) -> std::cmp::Ordering {
    match order {
        SortOrder::Asc => ordering,
        SortOrder::Desc => ordering.reverse(),
    }
}

/// Collator for the catalogue's display language (Ukrainian), strength
/// secondary so letter case never splits equal titles.
fn catalogue_collator() -> Result<Collator, Error> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Secondary);
    Collator::try_new(&locale!("uk").into(), options)
        .map_err(|err| Error::internal(format!("collation data unavailable: {err}")))
}
