//! Liveness probe.
//!
//! Single-process tier: no readiness orchestration, just a cheap signal
//! that the process is serving.

use actix_web::{HttpResponse, get, http::header};
use serde_json::json;

/// Report the process as alive.
#[utoipa::path(
    get,
    path = "/api/healthz",
    responses((status = 200, description = "Process is serving")),
    tags = ["health"],
    operation_id = "healthz"
)]
#[get("/healthz")]
pub async fn healthz() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(json!({ "status": "ok" }))
}
