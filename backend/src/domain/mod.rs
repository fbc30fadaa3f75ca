//! Domain primitives and aggregates.
//!
//! Purpose: define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`Course`] and its validated mutation payloads.
//! - [`User`], [`Role`], [`Credential`]: accounts and credentials.
//! - [`Application`]: append-only intake records.
//! - [`SessionClaims`] / [`AuthGate`]: the token authorization gate.
//! - [`catalogue`]: the pure filter/sort query engine.
//! - [`ports`]: traits implemented by driven adapters.

pub mod application;
pub mod catalogue;
pub mod course;
pub mod error;
pub mod ports;
pub mod session;
pub mod upload;
pub mod user;

pub use self::application::{Application, ApplicationDraft, ApplicationForm};
pub use self::catalogue::{CatalogueQuery, SortField, SortOrder};
pub use self::course::{Course, CourseDraft, CourseForm, CoursePatch};
pub use self::error::{Error, ErrorCode, ErrorValidationError, FieldErrors};
pub use self::session::{AuthGate, SessionClaims};
pub use self::user::{Credential, Role, User};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
