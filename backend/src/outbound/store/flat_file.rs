//! Flat-file persistence with atomic whole-collection rewrites.
//!
//! Every save serialises the full collection to a hidden sibling temp file,
//! fsyncs it, and renames it into place. A concurrent load therefore sees
//! either the fully-old or fully-new content, never a mix, even if the
//! process dies mid-write. Leftover temp files from a crash are never read
//! back; their names do not match any collection file.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use tokio::io::AsyncWriteExt;

use super::{Record, StoreError};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Store rooted at one data directory, one file per collection.
#[derive(Debug, Clone)]
pub struct FlatFileStore {
    dir: PathBuf,
}

impl FlatFileStore {
    /// Store over the given data directory; created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root data directory.
    pub fn dir(&self) -> &Path {
        self.dir.as_path()
    }

    /// Load the full collection snapshot.
    ///
    /// A missing file is an empty collection (first boot); an unparseable
    /// file is corruption and fails loudly.
    ///
    /// # Errors
    /// [`StoreError::Corrupt`] on decode failure, [`StoreError::Read`] on
    /// any I/O failure other than the file being absent.
    pub async fn load<R: Record>(&self) -> Result<Vec<R>, StoreError> {
        match self.read_raw(&json_file::<R>(), R::COLLECTION).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(|err| StoreError::Corrupt {
                collection: R::COLLECTION,
                message: err.to_string(),
            }),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the collection with the given records, atomically.
    ///
    /// # Errors
    /// [`StoreError::Write`] when serialisation, the temp write, or the
    /// rename fails; the prior file remains authoritative in every case.
    pub async fn atomic_save<R: Record>(&self, records: &[R]) -> Result<(), StoreError> {
        let payload =
            serde_json::to_vec_pretty(records).map_err(|err| StoreError::Write {
                collection: R::COLLECTION,
                message: err.to_string(),
            })?;
        self.write_atomic(&json_file::<R>(), &payload, R::COLLECTION)
            .await
    }

    /// Read a raw collection artifact, `None` when absent.
    ///
    /// # Errors
    /// [`StoreError::Read`] on any I/O failure other than absence.
    pub(crate) async fn read_raw(
        &self,
        file_name: &str,
        collection: &'static str,
    ) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.dir.join(file_name)).await {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Read {
                collection,
                message: err.to_string(),
            }),
        }
    }

    /// Write a raw artifact through the temp-then-rename protocol.
    ///
    /// # Errors
    /// [`StoreError::Write`] when any step fails; a temp file left by a
    /// failed rename is removed best-effort.
    pub(crate) async fn write_atomic(
        &self,
        file_name: &str,
        payload: &[u8],
        collection: &'static str,
    ) -> Result<(), StoreError> {
        let write_err = |message: String| StoreError::Write {
            collection,
            message,
        };

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| write_err(err.to_string()))?;

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let tmp_name = format!(
            ".{file_name}.tmp.{}.{nanos}.{counter}",
            std::process::id()
        );
        let tmp_path = self.dir.join(&tmp_name);
        let target = self.dir.join(file_name);

        let written: Result<(), std::io::Error> = async {
            let mut file = tokio::fs::File::create(&tmp_path).await?;
            file.write_all(payload).await?;
            file.sync_all().await?;
            Ok(())
        }
        .await;
        if let Err(err) = written {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(write_err(err.to_string()));
        }

        if let Err(err) = tokio::fs::rename(&tmp_path, &target).await {
            // The temp artifact is discarded; the prior file stays authoritative.
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(write_err(err.to_string()));
        }

        // Best-effort directory sync so the rename itself is durable.
        if let Ok(dir) = tokio::fs::File::open(&self.dir).await {
            let _ = dir.sync_all().await;
        }

        Ok(())
    }
}

fn json_file<R: Record>() -> String {
    format!("{}.json", R::COLLECTION)
}
