//! Session claims and the authorization gate.
//!
//! The gate models the per-request state machine: unauthenticated requests
//! may obtain a claim set through [`AuthGate::authenticate`]; later requests
//! present the claim set for [`AuthGate::verify`] (signature integrity is
//! the session cookie's job, expiry is checked here) and, on privileged
//! routes, [`AuthGate::authorize`].
//!
//! Claims are never persisted server-side, so a token cannot be revoked
//! before its natural expiry. Accepted limitation of this tier; a stronger
//! design would pair a short-lived token with a revocable refresh record.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use super::error::Error;
use super::user::{Credential, Role, User};

/// Generic login failure text; identical whether the email is unknown or
/// the password is wrong, so accounts cannot be enumerated.
pub const LOGIN_FAILED: &str = "Невірний email або пароль";

/// Failure text for a missing, tampered, or expired session.
pub const SESSION_INVALID: &str = "Сесія недійсна або закінчилася";

/// Failure text for a role mismatch on a privileged route.
pub const FORBIDDEN: &str = "Недостатньо прав для цієї дії";

/// Signed claim set carried by the session cookie.
///
/// Integrity and confidentiality come from the cookie layer; the gate only
/// reasons about the decoded claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    /// Id of the authenticated user.
    pub subject_id: i64,
    /// Display name at issue time.
    pub name: String,
    /// Role at issue time.
    pub role: Role,
    /// Issue instant.
    pub issued_at: DateTime<Utc>,
    /// Hard expiry; the claim set is dead afterwards.
    pub expires_at: DateTime<Utc>,
}

/// Issues, verifies, and scopes session claims.
#[derive(Clone)]
pub struct AuthGate {
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
}

impl AuthGate {
    /// Gate with the production expiry window of one hour.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(clock, TimeDelta::hours(1))
    }

    /// Gate with an explicit expiry window.
    pub fn with_ttl(clock: Arc<dyn Clock>, ttl: TimeDelta) -> Self {
        Self { clock, ttl }
    }

    /// Check a login attempt and issue fresh claims on success.
    ///
    /// The lookup result is passed in as an `Option` so unknown emails and
    /// wrong passwords share one code path, one timing profile (a digest is
    /// computed either way), and one generic failure message.
    ///
    /// # Errors
    /// Returns a 401-mapped error with [`LOGIN_FAILED`] on any mismatch.
    pub fn authenticate(&self, user: Option<&User>, password: &str) -> Result<SessionClaims, Error> {
        match user {
            Some(user) if user.credential.verify(password) => Ok(self.issue(user)),
            other => {
                if other.is_none() {
                    // Burn a digest so the miss is not distinguishable by timing.
                    let _ = Credential::derive(password, "missing-user").verify(password);
                }
                Err(Error::unauthorized(LOGIN_FAILED))
            }
        }
    }

    /// Issue claims for an authenticated user.
    pub fn issue(&self, user: &User) -> SessionClaims {
        let issued_at = self.clock.utc();
        SessionClaims {
            subject_id: user.id,
            name: user.name.clone(),
            role: user.role,
            issued_at,
            expires_at: issued_at + self.ttl,
        }
    }

    /// Confirm the claim set has not expired.
    ///
    /// # Errors
    /// Returns a 401-mapped error with [`SESSION_INVALID`] once
    /// `expires_at` has passed; callers must then discard the client-held
    /// cookie.
    pub fn verify(&self, claims: &SessionClaims) -> Result<(), Error> {
        if self.clock.utc() < claims.expires_at {
            Ok(())
        } else {
            Err(Error::unauthorized(SESSION_INVALID))
        }
    }

    /// Enforce an exact role requirement.
    ///
    /// The match is exhaustive over the closed [`Role`] enum: introducing a
    /// role forces this boundary to be revisited at compile time.
    ///
    /// # Errors
    /// Returns a 403-mapped error on any mismatch; `Admin` does not imply
    /// `User`.
    pub fn authorize(&self, claims: &SessionClaims, required: Role) -> Result<(), Error> {
        match (claims.role, required) {
            (Role::Admin, Role::Admin) | (Role::User, Role::User) => Ok(()),
            (Role::User, Role::Admin) | (Role::Admin, Role::User) => {
                Err(Error::forbidden(FORBIDDEN))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use mockable::DefaultClock;
    use rstest::rstest;
    use std::sync::Mutex;

    struct FrozenClock(Mutex<DateTime<Utc>>);

    impl FrozenClock {
        fn at(instant: DateTime<Utc>) -> Self {
            Self(Mutex::new(instant))
        }

        fn advance(&self, delta: TimeDelta) {
            match self.0.lock() {
                Ok(mut guard) => *guard += delta,
                Err(_) => panic!("clock mutex poisoned"),
            }
        }
    }

    impl Clock for FrozenClock {
        fn local(&self) -> DateTime<chrono::Local> {
            self.utc().with_timezone(&chrono::Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            match self.0.lock() {
                Ok(guard) => *guard,
                Err(_) => panic!("clock mutex poisoned"),
            }
        }
    }

    fn demo_user(role: Role) -> User {
        User {
            id: 7,
            name: "Олена".to_owned(),
            email: "olena@courses.ua".to_owned(),
            credential: Credential::derive("admin12345", "demo"),
            role,
            avatar: None,
        }
    }

    #[rstest]
    fn issued_claims_expire_one_hour_after_issue() {
        let gate = AuthGate::new(Arc::new(DefaultClock));
        let claims = gate.issue(&demo_user(Role::Admin));
        assert_eq!(claims.expires_at - claims.issued_at, TimeDelta::hours(1));
        assert_eq!(claims.subject_id, 7);
    }

    #[rstest]
    fn wrong_password_and_unknown_email_fail_identically() {
        let gate = AuthGate::new(Arc::new(DefaultClock));
        let user = demo_user(Role::User);

        let wrong_password = gate
            .authenticate(Some(&user), "not-the-password")
            .expect_err("wrong password must fail");
        let unknown_email = gate
            .authenticate(None, "admin12345")
            .expect_err("unknown email must fail");

        assert_eq!(wrong_password, unknown_email);
        assert_eq!(wrong_password.message(), LOGIN_FAILED);
        assert_eq!(wrong_password.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn claims_verify_until_expiry_and_not_after() {
        let clock = Arc::new(FrozenClock::at(Utc::now()));
        let gate = AuthGate::new(Arc::clone(&clock) as Arc<dyn Clock>);
        let claims = gate.issue(&demo_user(Role::User));

        assert!(gate.verify(&claims).is_ok());
        clock.advance(TimeDelta::minutes(59));
        assert!(gate.verify(&claims).is_ok());
        clock.advance(TimeDelta::minutes(2));
        let err = gate.verify(&claims).expect_err("expired claims must fail");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[case(Role::Admin, Role::Admin, true)]
    #[case(Role::User, Role::User, true)]
    #[case(Role::User, Role::Admin, false)]
    #[case(Role::Admin, Role::User, false)]
    fn authorization_requires_an_exact_role_match(
        #[case] held: Role,
        #[case] required: Role,
        #[case] allowed: bool,
    ) {
        let gate = AuthGate::new(Arc::new(DefaultClock));
        let claims = gate.issue(&demo_user(held));
        assert_eq!(gate.authorize(&claims, required).is_ok(), allowed);
    }
}
