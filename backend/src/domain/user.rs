//! User accounts, roles, and the opaque password credential.
//!
//! The credential is a salted SHA-256 fingerprint in the form
//! `salt$hex(sha256(salt ‖ password))`. Plaintext passwords exist only in
//! flight during login and are never persisted.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use utoipa::ToSchema;

/// Closed set of account roles.
///
/// Authorization matches roles exactly: `Admin` is not a superset of
/// `User`. Adding a role is a compile-time-checked change at every
/// authorization boundary because matches are exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account: owns a profile and an avatar.
    User,
    /// Privileged account: may mutate the course catalogue.
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRoleError {
                value: other.to_owned(),
            }),
        }
    }
}

/// Raised when a role slug does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {value}")]
pub struct UnknownRoleError {
    /// The unrecognised slug.
    pub value: String,
}

/// Opaque salted password fingerprint.
///
/// Stored and serialised as a single `salt$digest` string so the record
/// store never needs to understand its structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Derive a credential from a plaintext password and a salt.
    pub fn derive(password: &str, salt: &str) -> Self {
        Self(format!("{salt}${}", Self::digest(password, salt)))
    }

    /// Compare a plaintext password against this credential.
    ///
    /// The digest comparison is branch-free over the full length so a
    /// mismatch position is not observable through timing.
    pub fn verify(&self, password: &str) -> bool {
        let Some((salt, stored)) = self.0.split_once('$') else {
            return false;
        };
        let computed = Self::digest(password, salt);
        if stored.len() != computed.len() {
            return false;
        }
        stored
            .bytes()
            .zip(computed.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }

    fn digest(password: &str, salt: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(password.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Persisted user record.
///
/// ## Invariants
/// - `id` is unique within the users collection at every snapshot.
/// - `email` is unique; lookups compare case-insensitively.
/// - `avatar`, once set, names an asset that passed the upload policy; it
///   is mutated only through the upload binding flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique stable identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Unique login email.
    pub email: String,
    /// Opaque salted password fingerprint.
    pub credential: Credential,
    /// Account role.
    pub role: Role,
    /// File name of the bound avatar asset, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Case-insensitive email match used by login lookups.
    pub fn matches_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn derived_credential_verifies_the_original_password() {
        let credential = Credential::derive("correct horse battery staple", "s3ed");
        assert!(credential.verify("correct horse battery staple"));
        assert!(!credential.verify("correct horse battery stable"));
    }

    #[rstest]
    fn same_password_with_different_salts_produces_different_credentials() {
        let first = Credential::derive("password123", "salt-a");
        let second = Credential::derive("password123", "salt-b");
        assert_ne!(first, second);
        assert!(first.verify("password123"));
        assert!(second.verify("password123"));
    }

    #[rstest]
    fn malformed_stored_credential_never_verifies() {
        let credential: Credential =
            serde_json::from_str("\"no-dollar-separator\"").expect("transparent string");
        assert!(!credential.verify("anything"));
    }

    #[rstest]
    #[case("admin", Role::Admin)]
    #[case("user", Role::User)]
    fn role_slugs_round_trip(#[case] slug: &str, #[case] role: Role) {
        assert_eq!(slug.parse::<Role>().expect("known slug"), role);
        assert_eq!(role.to_string(), slug);
    }

    #[rstest]
    fn unknown_role_slug_is_rejected() {
        assert!("root".parse::<Role>().is_err());
    }

    #[rstest]
    fn email_match_ignores_case_and_padding() {
        let user = User {
            id: 1,
            name: "Олена".to_owned(),
            email: "Admin@Courses.ua".to_owned(),
            credential: Credential::derive("x", "y"),
            role: Role::Admin,
            avatar: None,
        };
        assert!(user.matches_email("  admin@courses.ua "));
        assert!(!user.matches_email("other@courses.ua"));
    }

    #[rstest]
    fn credential_is_serialised_as_one_opaque_string() {
        let user = User {
            id: 1,
            name: "Олена".to_owned(),
            email: "admin@courses.ua".to_owned(),
            credential: Credential::derive("admin12345", "demo"),
            role: Role::Admin,
            avatar: None,
        };
        let value = serde_json::to_value(&user).expect("serializable user");
        let raw = value["credential"].as_str().expect("credential string");
        assert!(raw.starts_with("demo$"));
        assert!(value.get("avatar").is_none());
    }
}
