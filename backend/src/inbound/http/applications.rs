//! Course application intake endpoint.
//!
//! ```text
//! POST /api/applications {"fullName":"...","email":"...","courseId":"1004"}
//! ```
//!
//! Public, append-only. Validation failures return HTTP 400 with the
//! complete `errors` map keyed by field name.

use std::collections::HashSet;

use actix_web::{HttpResponse, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ApplicationDraft, ApplicationForm, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Acceptance payload for a stored application.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationAccepted {
    /// Confirmation text shown by the form.
    pub message: String,
    /// Id of the stored intake record.
    pub id: i64,
}

/// Accept a course application.
#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = ApplicationForm,
    responses(
        (status = 201, description = "Application stored", body = ApplicationAccepted),
        (status = 400, description = "Validation failed; complete field map", body = Error)
    ),
    tags = ["applications"],
    operation_id = "submitApplication"
)]
#[post("/applications")]
pub async fn submit_application(
    state: web::Data<HttpState>,
    payload: web::Json<ApplicationForm>,
) -> ApiResult<HttpResponse> {
    let known_courses: HashSet<i64> = state
        .catalogue
        .list()
        .await?
        .into_iter()
        .map(|course| course.id)
        .collect();

    let draft = ApplicationDraft::validate(payload.into_inner(), |id| known_courses.contains(&id))
        .map_err(Error::validation)?;
    let record = state.applications.append(draft).await?;

    Ok(HttpResponse::Created().json(ApplicationAccepted {
        message: "Заявку успішно надіслано!".to_owned(),
        id: record.id,
    }))
}
