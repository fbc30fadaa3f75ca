//! Shared fixtures for integration tests (behind `test-support`).
//!
//! Builds a complete handler state over a temp-directory store, with a
//! mutable clock so token expiry is steerable from tests.

use std::sync::{Arc, Mutex};

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

use crate::domain::ports::{ApplicationIntake, AssetStore, CourseCatalogue, UserDirectory};
use crate::domain::{AuthGate, Credential, Role, User};
use crate::inbound::http::state::HttpState;
use crate::outbound::store::{Collection, FlatFileStore, StorageMode, StoreError, WriteCoordinator};
use crate::outbound::{
    FlatFileApplicationIntake, FlatFileCourseCatalogue, FlatFileUserDirectory, FsAssetStore,
};

/// Clock fixture that only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Clock frozen at the given instant.
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward.
    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex poisoned"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Complete backend wired over a temp directory.
pub struct TestBackend {
    /// Handler state to mount into a test app.
    pub state: HttpState,
    /// Steerable clock shared by the auth gate and the store adapters.
    pub clock: Arc<MutableClock>,
    /// Store root, kept alive for the test's duration.
    pub data_dir: tempfile::TempDir,
    store: Arc<FlatFileStore>,
    coordinator: Arc<WriteCoordinator>,
}

impl TestBackend {
    /// Backend with JSON-encoded applications (the default mode).
    pub fn new() -> Self {
        Self::with_mode(StorageMode::Json)
    }

    /// Backend with the chosen applications encoding.
    pub fn with_mode(mode: StorageMode) -> Self {
        let data_dir = tempfile::tempdir().unwrap_or_else(|err| panic!("temp dir: {err}"));
        let store = Arc::new(FlatFileStore::new(data_dir.path()));
        let coordinator = Arc::new(WriteCoordinator::new());
        let clock = Arc::new(MutableClock::starting_at(Utc::now()));

        let catalogue: Arc<dyn CourseCatalogue> = Arc::new(FlatFileCourseCatalogue::new(
            Collection::new(Arc::clone(&store), Arc::clone(&coordinator)),
            Arc::clone(&clock) as Arc<dyn Clock>,
        ));
        let users: Arc<dyn UserDirectory> = Arc::new(FlatFileUserDirectory::new(Collection::new(
            Arc::clone(&store),
            Arc::clone(&coordinator),
        )));
        let applications: Arc<dyn ApplicationIntake> = Arc::new(FlatFileApplicationIntake::new(
            Arc::clone(&store),
            Arc::clone(&coordinator),
            Arc::clone(&clock) as Arc<dyn Clock>,
            mode,
        ));
        let assets: Arc<dyn AssetStore> =
            Arc::new(FsAssetStore::new(data_dir.path().join("media")));

        let state = HttpState {
            catalogue,
            users,
            applications,
            assets,
            auth: AuthGate::new(Arc::clone(&clock) as Arc<dyn Clock>),
        };

        Self {
            state,
            clock,
            data_dir,
            store,
            coordinator,
        }
    }

    /// Replace the users collection with the given records.
    pub async fn seed_users(&self, records: Vec<User>) {
        let users: Collection<User> =
            Collection::new(Arc::clone(&self.store), Arc::clone(&self.coordinator));
        users
            .mutate::<_, StoreError, _>(move |_| Ok((records, ())))
            .await
            .unwrap_or_else(|err| panic!("seed users: {err}"));
    }

    /// Replace the courses collection with the given records.
    pub async fn seed_courses(&self, records: Vec<crate::domain::Course>) {
        let courses: Collection<crate::domain::Course> =
            Collection::new(Arc::clone(&self.store), Arc::clone(&self.coordinator));
        courses
            .mutate::<_, StoreError, _>(move |_| Ok((records, ())))
            .await
            .unwrap_or_else(|err| panic!("seed courses: {err}"));
    }
}

impl Default for TestBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Demo administrator with password `admin12345`.
pub fn demo_admin() -> User {
    User {
        id: 1,
        name: "Олена Адміністратор".to_owned(),
        email: "admin@courses.ua".to_owned(),
        credential: Credential::derive("admin12345", "test-salt"),
        role: Role::Admin,
        avatar: None,
    }
}

/// Demo regular user with password `password123`.
pub fn demo_user() -> User {
    User {
        id: 2,
        name: "Тарас Студент".to_owned(),
        email: "taras@courses.ua".to_owned(),
        credential: Credential::derive("password123", "test-salt"),
        role: Role::User,
        avatar: None,
    }
}

/// Session middleware for test apps: fresh key, `Secure` flag off.
pub fn session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}
