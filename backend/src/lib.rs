//! Course catalogue backend library.
//!
//! Hexagonal layout: `domain` holds entities, the query engine, and the
//! auth gate; `inbound::http` exposes the REST surface; `outbound` owns the
//! flat-file record store, the per-collection write coordinator, and the
//! asset store.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
#[cfg(feature = "seed-data")]
pub mod seed;
#[cfg(feature = "test-support")]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
