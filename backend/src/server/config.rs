//! HTTP server configuration object.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};

use backend::outbound::store::StorageMode;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) data_dir: PathBuf,
    pub(crate) media_dir: PathBuf,
    pub(crate) applications_mode: StorageMode,
}

impl ServerConfig {
    /// Construct a server configuration using application preferences.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            data_dir: PathBuf::from("data"),
            media_dir: PathBuf::from("data/uploads"),
            applications_mode: StorageMode::Json,
        }
    }

    /// Directory holding the collection files.
    #[must_use]
    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.data_dir = dir;
        self
    }

    /// Directory holding uploaded avatar assets.
    #[must_use]
    pub fn with_media_dir(mut self, dir: PathBuf) -> Self {
        self.media_dir = dir;
        self
    }

    /// Encoding of the applications collection artifact.
    #[must_use]
    pub fn with_applications_mode(mut self, mode: StorageMode) -> Self {
        self.applications_mode = mode;
        self
    }
}
