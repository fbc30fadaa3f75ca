//! Backend entry-point: wires the REST endpoints and bootstraps the store.

mod server;

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::outbound::store::StorageMode;
use server::{BuiltState, ServerConfig, build_http_state, run};

/// Command-line options; secrets stay in the environment.
#[derive(Debug, Parser)]
#[command(name = "backend", about = "Course catalogue backend")]
struct Cli {
    /// Directory holding the collection files.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Directory holding uploaded avatar assets.
    #[arg(long, default_value = "data/uploads")]
    media_dir: PathBuf,

    /// Socket address to listen on.
    #[arg(long, default_value = "127.0.0.1:3000")]
    bind: SocketAddr,

    /// Encoding of the applications collection: `json` or `csv`.
    #[arg(long, default_value = "json")]
    applications_format: String,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let applications_mode: StorageMode = cli
        .applications_format
        .parse()
        .map_err(std::io::Error::other)?;

    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )));
            }
        }
    };

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let config = ServerConfig::new(key, cookie_secure, SameSite::Lax, cli.bind)
        .with_data_dir(cli.data_dir)
        .with_media_dir(cli.media_dir)
        .with_applications_mode(applications_mode);

    let BuiltState {
        state,
        store,
        coordinator,
    } = build_http_state(&config);

    #[cfg(feature = "seed-data")]
    backend::seed::seed_if_empty(store, coordinator)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    #[cfg(not(feature = "seed-data"))]
    let _ = (store, coordinator);

    tracing::info!(addr = %config.bind_addr, "starting course catalogue backend");
    run(&config, state)?.await
}
