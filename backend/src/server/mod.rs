//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::{BuiltState, build_http_state};

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};

use backend::inbound::http::{self, state::HttpState};

#[cfg(debug_assertions)]
use backend::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Session cookie lifetime; matches the claim expiry window so the browser
/// drops the cookie around the time the claims die anyway.
const SESSION_TTL: CookieDuration = CookieDuration::hours(1);

fn session_middleware(
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
) -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".to_owned())
        .cookie_secure(cookie_secure)
        .cookie_same_site(same_site)
        .cookie_content_security(CookieContentSecurity::Private)
        .session_lifecycle(PersistentSession::default().session_ttl(SESSION_TTL))
        .build()
}

/// Build and start the HTTP server.
///
/// # Errors
/// Fails when the listen address cannot be bound.
pub fn run(config: &ServerConfig, state: HttpState) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    let key = config.key.clone();
    let cookie_secure = config.cookie_secure;
    let same_site = config.same_site;

    let server = HttpServer::new(move || {
        let app = App::new()
            .wrap(session_middleware(key.clone(), cookie_secure, same_site))
            .configure(http::configure(state.clone()));
        #[cfg(debug_assertions)]
        let app = app.service(
            SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
        app
    })
    .bind(config.bind_addr)?
    .run();

    Ok(server)
}
