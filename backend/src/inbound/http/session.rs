//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers only deal with the domain claim set.
//! Cookie integrity (signing + encryption) is the session middleware's job;
//! expiry and role checks belong to the auth gate.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, SessionClaims};

pub(crate) const CLAIMS_KEY: &str = "claims";

/// Newtype wrapper that exposes claim-set session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist freshly issued claims in the session cookie.
    ///
    /// # Errors
    /// Internal error when the claim set cannot be serialised into the
    /// cookie.
    pub fn persist(&self, claims: &SessionClaims) -> Result<(), Error> {
        self.0
            .insert(CLAIMS_KEY, claims)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the claim set from the session, if present and decodable.
    ///
    /// An undecodable claim set (stale schema, tampering survivors) is
    /// purged and reads as absent rather than failing the request.
    pub fn claims(&self) -> Option<SessionClaims> {
        match self.0.get::<SessionClaims>(CLAIMS_KEY) {
            Ok(claims) => claims,
            Err(error) => {
                tracing::warn!(%error, "undecodable claim set in session cookie");
                self.purge();
                None
            }
        }
    }

    /// Drop the session, instructing the client to discard its cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Error as DomainError, Role};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use chrono::{TimeDelta, Utc};

    fn fixture_claims() -> SessionClaims {
        let now = Utc::now();
        SessionClaims {
            subject_id: 7,
            name: "Олена".to_owned(),
            role: Role::Admin,
            issued_at: now,
            expires_at: now + TimeDelta::hours(1),
        }
    }

    fn session_test_app() -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .route(
                "/set",
                web::get().to(|session: SessionContext| async move {
                    session.persist(&fixture_claims())?;
                    Ok::<_, DomainError>(HttpResponse::Ok().finish())
                }),
            )
            .route(
                "/set-garbage",
                web::get().to(|session: Session| async move {
                    session
                        .insert(CLAIMS_KEY, 42)
                        .map_err(|err| DomainError::internal(err.to_string()))?;
                    Ok::<_, DomainError>(HttpResponse::Ok().finish())
                }),
            )
            .route(
                "/get",
                web::get().to(|session: SessionContext| async move {
                    session.claims().map_or_else(
                        || HttpResponse::Unauthorized().finish(),
                        |claims| HttpResponse::Ok().body(claims.name),
                    )
                }),
            )
    }

    #[actix_web::test]
    async fn round_trips_the_claim_set() {
        let app = test::init_service(session_test_app()).await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let get_res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(get_res.status(), StatusCode::OK);
        let body = test::read_body(get_res).await;
        assert_eq!(body, "Олена".as_bytes());
    }

    #[actix_web::test]
    async fn missing_session_reads_as_no_claims() {
        let app = test::init_service(session_test_app()).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/get").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn undecodable_claim_set_is_purged_not_fatal() {
        let app = test::init_service(session_test_app()).await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-garbage").to_request(),
        )
        .await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set");

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/get")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
