//! Flat-file record store, write coordinator, and collection codecs.
//!
//! One durable artifact per collection, rewritten wholesale on every
//! mutation. Readers never lock; writers serialize per collection through
//! [`WriteCoordinator`] so read-modify-write cycles cannot interleave.

mod coordinator;
mod flat_file;
pub mod tabular;

pub use coordinator::{Collection, WriteCoordinator};
pub use flat_file::FlatFileStore;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error as ThisError;

use crate::domain::{Application, Course, Error, User};

/// A persistable record type bound to a named collection.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Stable collection name; doubles as the storage file stem.
    const COLLECTION: &'static str;

    /// Unique record identifier within the collection.
    fn id(&self) -> i64;
}

impl Record for Course {
    const COLLECTION: &'static str = "courses";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Application {
    const COLLECTION: &'static str = "applications";

    fn id(&self) -> i64 {
        self.id
    }
}

/// Storage encoding for the applications collection.
///
/// Deployment-time switch: both encodings round-trip the same logical
/// record set, so a deployment can flip between them between restarts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageMode {
    /// JSON array of records (the default, same as every other collection).
    #[default]
    Json,
    /// Flat comma-separated table.
    Csv,
}

impl std::str::FromStr for StorageMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!("unknown storage mode: {other}")),
        }
    }
}

/// Failures surfaced by the record store.
#[derive(Debug, ThisError)]
pub enum StoreError {
    /// The collection file exists but cannot be decoded. Surfaced loudly
    /// instead of degrading to an empty collection.
    #[error("collection {collection} is corrupt: {message}")]
    Corrupt {
        /// Collection the file belongs to.
        collection: &'static str,
        /// Decoder diagnostic.
        message: String,
    },
    /// The atomic rewrite failed; the prior file remains authoritative.
    #[error("failed to persist collection {collection}: {message}")]
    Write {
        /// Collection the rewrite targeted.
        collection: &'static str,
        /// I/O diagnostic.
        message: String,
    },
    /// The collection file could not be read at all (permissions, I/O).
    #[error("failed to read collection {collection}: {message}")]
    Read {
        /// Collection the read targeted.
        collection: &'static str,
        /// I/O diagnostic.
        message: String,
    },
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        match &err {
            StoreError::Corrupt { .. } => Self::store_corruption(err.to_string()),
            StoreError::Write { .. } => Self::store_write(err.to_string()),
            StoreError::Read { .. } => Self::internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("json", StorageMode::Json)]
    #[case("CSV", StorageMode::Csv)]
    fn storage_modes_parse_case_insensitively(#[case] raw: &str, #[case] expected: StorageMode) {
        assert_eq!(raw.parse::<StorageMode>().expect("known mode"), expected);
    }

    #[rstest]
    fn unknown_storage_mode_is_rejected() {
        assert!("xml".parse::<StorageMode>().is_err());
    }

    #[rstest]
    fn corruption_maps_to_its_own_error_code() {
        let err: Error = StoreError::Corrupt {
            collection: "courses",
            message: "bad json".to_owned(),
        }
        .into();
        assert_eq!(err.code(), ErrorCode::StoreCorruption);
    }

    #[rstest]
    fn write_failure_maps_to_store_write() {
        let err: Error = StoreError::Write {
            collection: "courses",
            message: "rename failed".to_owned(),
        }
        .into();
        assert_eq!(err.code(), ErrorCode::StoreWrite);
    }
}
