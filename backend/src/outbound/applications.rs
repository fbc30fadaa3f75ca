//! Flat-file adapter for the append-only application intake.
//!
//! Unlike the other collections, the applications artifact can be encoded
//! either as JSON or as a flat CSV table, selected at deployment time. The
//! append path goes through the same write-coordinator discipline in both
//! modes.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::ApplicationIntake;
use crate::domain::{Application, ApplicationDraft, Error};

use super::store::{FlatFileStore, Record, StorageMode, StoreError, WriteCoordinator, tabular};

const CSV_FILE: &str = "applications.csv";

/// Application intake backed by the flat-file store.
#[derive(Clone)]
pub struct FlatFileApplicationIntake {
    store: Arc<FlatFileStore>,
    coordinator: Arc<WriteCoordinator>,
    clock: Arc<dyn Clock>,
    mode: StorageMode,
}

impl FlatFileApplicationIntake {
    /// Adapter over the applications artifact in the chosen encoding.
    pub fn new(
        store: Arc<FlatFileStore>,
        coordinator: Arc<WriteCoordinator>,
        clock: Arc<dyn Clock>,
        mode: StorageMode,
    ) -> Self {
        Self {
            store,
            coordinator,
            clock,
            mode,
        }
    }

    async fn load_all(&self) -> Result<Vec<Application>, StoreError> {
        match self.mode {
            StorageMode::Json => self.store.load::<Application>().await,
            StorageMode::Csv => match self
                .store
                .read_raw(CSV_FILE, Application::COLLECTION)
                .await?
            {
                Some(raw) => tabular::decode(&raw).map_err(|message| StoreError::Corrupt {
                    collection: Application::COLLECTION,
                    message,
                }),
                None => Ok(Vec::new()),
            },
        }
    }

    async fn save_all(&self, records: &[Application]) -> Result<(), StoreError> {
        match self.mode {
            StorageMode::Json => self.store.atomic_save(records).await,
            StorageMode::Csv => {
                let encoded = tabular::encode(records);
                self.store
                    .write_atomic(CSV_FILE, encoded.as_bytes(), Application::COLLECTION)
                    .await
            }
        }
    }
}

#[async_trait]
impl ApplicationIntake for FlatFileApplicationIntake {
    async fn append(&self, draft: ApplicationDraft) -> Result<Application, Error> {
        let lock = self.coordinator.collection_lock(Application::COLLECTION);
        let _guard = lock.lock().await;

        let mut records = self.load_all().await.map_err(Error::from)?;
        let next_id = records.iter().map(|record| record.id).max().unwrap_or(0) + 1;
        let record = draft.into_application(next_id, self.clock.utc());
        records.push(record.clone());
        self.save_all(&records).await.map_err(Error::from)?;
        Ok(record)
    }
}
