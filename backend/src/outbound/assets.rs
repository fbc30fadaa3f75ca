//! Filesystem store for uploaded avatar assets.
//!
//! Each accepted upload gets a collision-resistant name derived from the
//! owner's identity plus a random suffix, so writes never target an
//! existing file and reads never race a write.

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Error;
use crate::domain::ports::AssetStore;

/// Asset store rooted at one media directory.
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    dir: PathBuf,
}

impl FsAssetStore {
    /// Store over the given media directory; created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl AssetStore for FsAssetStore {
    async fn save(
        &self,
        subject_id: i64,
        extension: &str,
        bytes: Vec<u8>,
    ) -> Result<String, Error> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|err| Error::internal(format!("media dir unavailable: {err}")))?;
        let name = format!(
            "avatar-{subject_id}-{}.{extension}",
            Uuid::new_v4().simple()
        );
        tokio::fs::write(self.dir.join(&name), bytes)
            .await
            .map_err(|err| Error::internal(format!("asset write failed: {err}")))?;
        Ok(name)
    }

    async fn read(&self, name: &str) -> Result<Option<Vec<u8>>, Error> {
        if !is_safe_name(name) {
            return Ok(None);
        }
        match tokio::fs::read(self.dir.join(name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(Error::internal(format!("asset read failed: {err}"))),
        }
    }
}

/// Only plain file names are served back; anything that could traverse out
/// of the media directory reads as absent.
fn is_safe_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && !name.contains("..")
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[tokio::test]
    async fn saved_assets_read_back_and_names_never_collide() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FsAssetStore::new(dir.path());

        let first = store
            .save(7, "png", vec![1, 2, 3])
            .await
            .expect("save succeeds");
        let second = store
            .save(7, "png", vec![4, 5, 6])
            .await
            .expect("save succeeds");

        assert_ne!(first, second);
        assert!(first.starts_with("avatar-7-"));
        assert!(first.ends_with(".png"));
        let bytes = store
            .read(&first)
            .await
            .expect("read succeeds")
            .expect("asset present");
        assert_eq!(bytes, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn unknown_asset_reads_as_absent() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FsAssetStore::new(dir.path());
        let result = store.read("avatar-1-missing.png").await.expect("read succeeds");
        assert!(result.is_none());
    }

    #[rstest]
    #[case("../etc/passwd")]
    #[case("nested/name.png")]
    #[case(".hidden")]
    #[case("")]
    #[tokio::test]
    async fn traversal_shaped_names_read_as_absent(#[case] name: &str) {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FsAssetStore::new(dir.path());
        let result = store.read(name).await.expect("read succeeds");
        assert!(result.is_none());
    }
}
