//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend
//! only on domain ports and the auth gate, and remain testable against
//! temp-directory stores.

use std::sync::Arc;

use crate::domain::ports::{ApplicationIntake, AssetStore, CourseCatalogue, UserDirectory};
use crate::domain::session::SESSION_INVALID;
use crate::domain::{AuthGate, Error, Role, SessionClaims};

use super::session::SessionContext;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Course collection operations.
    pub catalogue: Arc<dyn CourseCatalogue>,
    /// User collection operations.
    pub users: Arc<dyn UserDirectory>,
    /// Append-only application intake.
    pub applications: Arc<dyn ApplicationIntake>,
    /// Uploaded avatar asset storage.
    pub assets: Arc<dyn AssetStore>,
    /// Session claim issuing and checking.
    pub auth: AuthGate,
}

impl HttpState {
    /// Require a present, unexpired claim set.
    ///
    /// Any failure purges the session so the client discards its cookie.
    ///
    /// # Errors
    /// 401-mapped error when the session is missing, undecodable, or
    /// expired.
    pub fn authenticated(&self, session: &SessionContext) -> Result<SessionClaims, Error> {
        let Some(claims) = session.claims() else {
            session.purge();
            return Err(Error::unauthorized(SESSION_INVALID));
        };
        match self.auth.verify(&claims) {
            Ok(()) => Ok(claims),
            Err(error) => {
                session.purge();
                Err(error)
            }
        }
    }

    /// Require an authenticated claim set holding exactly `role`.
    ///
    /// # Errors
    /// 401-mapped error for session failures, 403 for a role mismatch.
    pub fn authorized(
        &self,
        session: &SessionContext,
        role: Role,
    ) -> Result<SessionClaims, Error> {
        let claims = self.authenticated(session)?;
        self.auth.authorize(&claims, role)?;
        Ok(claims)
    }
}
