//! Construction of the handler state from server configuration.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use backend::domain::AuthGate;
use backend::domain::ports::{ApplicationIntake, AssetStore, CourseCatalogue, UserDirectory};
use backend::inbound::http::state::HttpState;
use backend::outbound::store::{Collection, FlatFileStore, WriteCoordinator};
use backend::outbound::{
    FlatFileApplicationIntake, FlatFileCourseCatalogue, FlatFileUserDirectory, FsAssetStore,
};

use super::ServerConfig;

/// Handler state plus the store handles startup tasks (seeding) need.
pub struct BuiltState {
    /// Dependency bundle mounted into the app.
    pub state: HttpState,
    /// Shared flat-file store.
    pub store: Arc<FlatFileStore>,
    /// Shared write coordinator.
    pub coordinator: Arc<WriteCoordinator>,
}

/// Wire the flat-file adapters into an [`HttpState`].
pub fn build_http_state(config: &ServerConfig) -> BuiltState {
    let store = Arc::new(FlatFileStore::new(config.data_dir.clone()));
    let coordinator = Arc::new(WriteCoordinator::new());
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let catalogue: Arc<dyn CourseCatalogue> = Arc::new(FlatFileCourseCatalogue::new(
        Collection::new(Arc::clone(&store), Arc::clone(&coordinator)),
        Arc::clone(&clock),
    ));
    let users: Arc<dyn UserDirectory> = Arc::new(FlatFileUserDirectory::new(Collection::new(
        Arc::clone(&store),
        Arc::clone(&coordinator),
    )));
    let applications: Arc<dyn ApplicationIntake> = Arc::new(FlatFileApplicationIntake::new(
        Arc::clone(&store),
        Arc::clone(&coordinator),
        Arc::clone(&clock),
        config.applications_mode,
    ));
    let assets: Arc<dyn AssetStore> = Arc::new(FsAssetStore::new(config.media_dir.clone()));

    BuiltState {
        state: HttpState {
            catalogue,
            users,
            applications,
            assets,
            auth: AuthGate::new(clock),
        },
        store,
        coordinator,
    }
}
