//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the flat-file record store and the asset store). Implementations map
//! their own failures into [`Error`] at the edge so handlers never see
//! storage-specific types.

use async_trait::async_trait;

use super::application::{Application, ApplicationDraft};
use super::course::{Course, CourseDraft, CoursePatch};
use super::error::Error;
use super::user::User;

/// Course collection operations.
///
/// Reads return the latest fully-committed snapshot without blocking;
/// mutations are serialized per collection by the adapter so concurrent
/// read-modify-write cycles cannot lose updates.
#[async_trait]
pub trait CourseCatalogue: Send + Sync {
    /// Full snapshot of the courses collection, in stored order.
    async fn list(&self) -> Result<Vec<Course>, Error>;

    /// Single course by id.
    async fn find(&self, id: i64) -> Result<Option<Course>, Error>;

    /// Persist a new course under a freshly assigned id.
    async fn create(&self, draft: CourseDraft) -> Result<Course, Error>;

    /// Apply a partial update to an existing course.
    async fn update(&self, id: i64, patch: CoursePatch) -> Result<Course, Error>;

    /// Remove a course. The collection is untouched when the id is unknown.
    async fn delete(&self, id: i64) -> Result<(), Error>;
}

/// User collection operations.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look a user up by login email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error>;

    /// Look a user up by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, Error>;

    /// Bind a validated avatar asset to a user record.
    ///
    /// Goes through the same per-collection exclusive section as any other
    /// user mutation so it cannot race a concurrent profile update.
    async fn bind_avatar(&self, user_id: i64, asset: &str) -> Result<User, Error>;
}

/// Append-only application intake.
#[async_trait]
pub trait ApplicationIntake: Send + Sync {
    /// Append an accepted application and return the stored record.
    async fn append(&self, draft: ApplicationDraft) -> Result<Application, Error>;
}

/// Durable storage for uploaded avatar assets.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store accepted bytes under a collision-resistant name derived from
    /// the owner's identity; returns the asset file name.
    async fn save(&self, subject_id: i64, extension: &str, bytes: Vec<u8>)
    -> Result<String, Error>;

    /// Read a stored asset back, or `None` when no such asset exists.
    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>, Error>;
}
