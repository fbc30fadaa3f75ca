//! Outbound adapters: the flat-file record store and the asset store.
//!
//! Each adapter implements one domain port and maps storage failures into
//! `domain::Error` at the edge, so inbound code never sees I/O types.

pub mod applications;
pub mod assets;
pub mod catalogue;
pub mod store;
pub mod users;

pub use applications::FlatFileApplicationIntake;
pub use assets::FsAssetStore;
pub use catalogue::FlatFileCourseCatalogue;
pub use users::FlatFileUserDirectory;
