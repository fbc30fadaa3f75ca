//! Flat-file adapter for the course catalogue port.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;

use crate::domain::ports::CourseCatalogue;
use crate::domain::{Course, CourseDraft, CoursePatch, Error};

use super::store::Collection;

const NOT_FOUND: &str = "Курс не знайдено";

/// Course catalogue backed by the flat-file store.
#[derive(Clone)]
pub struct FlatFileCourseCatalogue {
    courses: Collection<Course>,
    clock: Arc<dyn Clock>,
}

impl FlatFileCourseCatalogue {
    /// Adapter over a bound courses collection.
    pub fn new(courses: Collection<Course>, clock: Arc<dyn Clock>) -> Self {
        Self { courses, clock }
    }
}

#[async_trait]
impl CourseCatalogue for FlatFileCourseCatalogue {
    async fn list(&self) -> Result<Vec<Course>, Error> {
        Ok(self.courses.snapshot().await?)
    }

    async fn find(&self, id: i64) -> Result<Option<Course>, Error> {
        let records = self.courses.snapshot().await?;
        Ok(records.into_iter().find(|course| course.id == id))
    }

    async fn create(&self, draft: CourseDraft) -> Result<Course, Error> {
        let now = self.clock.utc();
        self.courses
            .mutate(move |mut records| {
                let max_id = records.iter().map(|course| course.id).max();
                let course = draft.into_course(allocate_id(now, max_id));
                records.push(course.clone());
                Ok((records, course))
            })
            .await
    }

    async fn update(&self, id: i64, patch: CoursePatch) -> Result<Course, Error> {
        self.courses
            .mutate(move |mut records| {
                let Some(course) = records.iter_mut().find(|course| course.id == id) else {
                    return Err(Error::not_found(NOT_FOUND));
                };
                patch.apply_to(course);
                let updated = course.clone();
                Ok((records, updated))
            })
            .await
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        self.courses
            .mutate(move |mut records| {
                let before = records.len();
                records.retain(|course| course.id != id);
                if records.len() == before {
                    return Err(Error::not_found(NOT_FOUND));
                }
                Ok((records, ()))
            })
            .await
    }
}

/// Assign a fresh course id: clock-derived milliseconds, bumped above the
/// current maximum. Monotonic, and never reused even when the newest course
/// was just deleted.
fn allocate_id(now: DateTime<Utc>, max_id: Option<i64>) -> i64 {
    let candidate = now.timestamp_millis();
    match max_id {
        Some(max) if candidate <= max => max + 1,
        _ => candidate,
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{CourseForm, ErrorCode};
    use crate::outbound::store::{FlatFileStore, WriteCoordinator};
    use chrono::TimeZone;
    use mockable::DefaultClock;

    fn catalogue(dir: &std::path::Path) -> FlatFileCourseCatalogue {
        FlatFileCourseCatalogue::new(
            Collection::new(
                Arc::new(FlatFileStore::new(dir)),
                Arc::new(WriteCoordinator::new()),
            ),
            Arc::new(DefaultClock),
        )
    }

    fn draft(title: &str, price: f64) -> CourseDraft {
        CourseDraft::validate(CourseForm {
            title: Some(title.to_owned()),
            price: Some(price),
            ..CourseForm::default()
        })
        .expect("valid draft")
    }

    #[test]
    fn allocated_ids_are_monotonic_and_never_reused() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0).single().expect("valid");
        let first = allocate_id(now, None);
        assert_eq!(first, now.timestamp_millis());
        // A later record with a higher id than the clock forces a bump
        // instead of reuse.
        assert_eq!(allocate_id(now, Some(first + 10)), first + 11);
        assert_eq!(allocate_id(now, Some(first - 10)), first);
    }

    #[tokio::test]
    async fn create_then_find_round_trips() {
        let dir = tempfile::tempdir().expect("temp dir");
        let catalogue = catalogue(dir.path());

        let created = catalogue
            .create(draft("Python з нуля", 7900.0))
            .await
            .expect("create succeeds");
        let found = catalogue
            .find(created.id)
            .await
            .expect("find succeeds")
            .expect("course present");
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn delete_of_unknown_id_leaves_the_collection_unchanged() {
        let dir = tempfile::tempdir().expect("temp dir");
        let catalogue = catalogue(dir.path());
        catalogue
            .create(draft("Єдиний курс", 100.0))
            .await
            .expect("create succeeds");

        let err = catalogue.delete(424_242).await.expect_err("unknown id");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(catalogue.list().await.expect("list succeeds").len(), 1);
    }

    #[tokio::test]
    async fn update_patches_only_the_target_record() {
        let dir = tempfile::tempdir().expect("temp dir");
        let catalogue = catalogue(dir.path());
        let first = catalogue
            .create(draft("Перший", 100.0))
            .await
            .expect("create succeeds");
        let second = catalogue
            .create(draft("Другий", 200.0))
            .await
            .expect("create succeeds");

        let patch = CoursePatch::validate(CourseForm {
            price: Some(150.0),
            ..CourseForm::default()
        })
        .expect("valid patch");
        let updated = catalogue
            .update(first.id, patch)
            .await
            .expect("update succeeds");
        assert_eq!(updated.price, 150.0);

        let untouched = catalogue
            .find(second.id)
            .await
            .expect("find succeeds")
            .expect("course present");
        assert_eq!(untouched.price, 200.0);
    }
}
