//! Authentication endpoints.
//!
//! ```text
//! POST /api/auth/login  {"email":"admin@courses.ua","password":"..."}
//! GET  /api/me
//! POST /api/auth/logout
//! ```
//!
//! Login failures use one generic message whether the email is unknown or
//! the password is wrong; session failures always purge the cookie.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::session::SESSION_INVALID;
use crate::domain::{Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Plaintext password; never persisted, zeroized after use.
    pub password: String,
}

/// Identity payload returned by login and `/api/me`.
///
/// The credential never appears here; `avatarUrl` is the serving path of
/// the bound asset, when one exists.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    /// User id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Role slug.
    pub role: String,
    /// Serving path of the avatar asset, if bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl From<&User> for IdentityResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.to_string(),
            avatar_url: user
                .avatar
                .as_deref()
                .map(|asset| format!("/uploads/{asset}")),
        }
    }
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (
            status = 200,
            description = "Login success",
            body = IdentityResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))
        ),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<IdentityResponse>> {
    let LoginRequest { email, password } = payload.into_inner();
    let password = Zeroizing::new(password);

    let user = state.users.find_by_email(&email).await?;
    let claims = state.auth.authenticate(user.as_ref(), &password)?;
    let Some(user) = user else {
        return Err(Error::internal("authenticated user vanished mid-login"));
    };
    session.persist(&claims)?;
    Ok(web::Json(IdentityResponse::from(&user)))
}

/// Current identity for the presented session.
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Current identity", body = IdentityResponse),
        (status = 401, description = "No valid session", body = Error)
    ),
    tags = ["auth"],
    operation_id = "me"
)]
#[get("/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<IdentityResponse>> {
    let claims = state.authenticated(&session)?;
    let Some(user) = state.users.find_by_id(claims.subject_id).await? else {
        session.purge();
        return Err(Error::unauthorized(SESSION_INVALID));
    };
    Ok(web::Json(IdentityResponse::from(&user)))
}

/// Drop the session cookie.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 204, description = "Session cleared"),
        (status = 401, description = "No valid session", body = Error)
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    state.authenticated(&session)?;
    session.purge();
    Ok(HttpResponse::NoContent().finish())
}
