//! Avatar upload binding and asset serving.
//!
//! ```text
//! POST /api/uploads/avatar    multipart field "avatar"   (session)
//! GET  /uploads/{name}
//! ```
//!
//! The declared MIME type and size are checked before anything is stored;
//! the streamed body is additionally capped so a lying `Content-Length`
//! cannot push past the limit. Accepted assets are bound to the caller's
//! user record through the same exclusive section as any other user
//! mutation.

use actix_multipart::Multipart;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use futures_util::TryStreamExt;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::upload::{self, AVATAR_MAX_BYTES, UploadRejection};
use crate::domain::{Error, FieldErrors};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const MSG_NO_FILE: &str = "Оберіть файл для завантаження";

/// Response for a bound avatar.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvatarUploaded {
    /// Serving path of the stored asset.
    pub url: String,
}

/// Bind an uploaded avatar to the calling user.
#[utoipa::path(
    post,
    path = "/api/uploads/avatar",
    responses(
        (status = 200, description = "Avatar bound", body = AvatarUploaded),
        (status = 400, description = "Upload rejected", body = Error),
        (status = 401, description = "No valid session", body = Error)
    ),
    tags = ["uploads"],
    operation_id = "uploadAvatar"
)]
#[post("/uploads/avatar")]
pub async fn upload_avatar(
    state: web::Data<HttpState>,
    session: SessionContext,
    request: HttpRequest,
    payload: Multipart,
) -> ApiResult<web::Json<AvatarUploaded>> {
    let claims = state.authenticated(&session)?;

    // Declared size: the transport-level Content-Length covers the whole
    // multipart body and is the earliest rejection point available.
    let declared_size = content_length(&request);
    let (mime, bytes) = read_avatar_field(payload, declared_size).await?;

    let name = state
        .assets
        .save(claims.subject_id, upload::extension_for(&mime), bytes)
        .await?;
    state.users.bind_avatar(claims.subject_id, &name).await?;

    Ok(web::Json(AvatarUploaded {
        url: format!("/uploads/{name}"),
    }))
}

/// Serve a stored avatar asset.
#[utoipa::path(
    get,
    path = "/uploads/{name}",
    responses(
        (status = 200, description = "Asset bytes"),
        (status = 404, description = "No such asset", body = Error)
    ),
    tags = ["uploads"],
    operation_id = "getUpload"
)]
#[get("/uploads/{name}")]
pub async fn serve_upload(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let name = path.into_inner();
    let bytes = state
        .assets
        .read(&name)
        .await?
        .ok_or_else(|| Error::not_found("Файл не знайдено"))?;
    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, content_type_for(&name)))
        .body(bytes))
}

async fn read_avatar_field(
    mut payload: Multipart,
    declared_size: usize,
) -> Result<(String, Vec<u8>), Error> {
    while let Some(mut field) = payload.try_next().await.map_err(map_multipart_error)? {
        if field.name() != Some("avatar") {
            continue;
        }

        let mime = field
            .content_type()
            .map_or_else(|| "application/octet-stream".to_owned(), ToString::to_string);
        upload::check_avatar(&mime, declared_size).map_err(Error::from)?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(map_multipart_error)? {
            if bytes.len() + chunk.len() > AVATAR_MAX_BYTES {
                return Err(UploadRejection::TooLarge {
                    declared: bytes.len() + chunk.len(),
                }
                .into());
            }
            bytes.extend_from_slice(&chunk);
        }
        if bytes.is_empty() {
            break;
        }
        return Ok((mime, bytes));
    }

    let mut fields = FieldErrors::new();
    fields.insert("avatar".to_owned(), MSG_NO_FILE.to_owned());
    Err(Error::validation(fields))
}

fn content_length(request: &HttpRequest) -> usize {
    request
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

fn map_multipart_error(error: actix_multipart::MultipartError) -> Error {
    tracing::warn!(%error, "malformed multipart upload");
    Error::invalid_request("Некоректний запит завантаження")
}

fn content_type_for(name: &str) -> &'static str {
    match name.rsplit_once('.').map(|(_, ext)| ext) {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("avatar-1-abc.png", "image/png")]
    #[case("avatar-1-abc.jpg", "image/jpeg")]
    #[case("weird-name", "application/octet-stream")]
    fn content_types_follow_the_stored_extension(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(content_type_for(name), expected);
    }
}
