//! HTTP inbound adapter exposing REST endpoints.

pub mod applications;
pub mod auth;
pub mod courses;
pub mod error;
pub mod health;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod uploads;

pub use error::ApiResult;

use actix_web::web;

use self::state::HttpState;

/// Register every REST endpoint plus the shared handler state.
///
/// Used by both the server binary and the integration-test app builder so
/// the two cannot drift apart.
pub fn configure(state: web::Data<HttpState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(state)
            .service(
                web::scope("/api")
                    .service(health::healthz)
                    .service(courses::list_courses)
                    .service(courses::get_course)
                    .service(courses::create_course)
                    .service(courses::update_course)
                    .service(courses::delete_course)
                    .service(auth::login)
                    .service(auth::me)
                    .service(auth::logout)
                    .service(applications::submit_application)
                    .service(uploads::upload_avatar),
            )
            .service(uploads::serve_upload);
    }
}
