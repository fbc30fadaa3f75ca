//! Course catalogue endpoints.
//!
//! ```text
//! GET    /api/courses?query=python&category=data&sort=price&order=desc&page=1&limit=9
//! GET    /api/courses/{id}
//! POST   /api/courses            (admin)
//! PATCH  /api/courses/{id}       (admin)
//! DELETE /api/courses/{id}       (admin)
//! ```
//!
//! Reads are public and lock-free; mutations require an admin session and
//! run inside the collection's exclusive section.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use pagination::{PageEnvelope, PageRequest};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::catalogue::{self, CatalogueQuery, SortField, SortOrder};
use crate::domain::{Course, CourseDraft, CourseForm, CoursePatch, Error, FieldErrors, Role};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const MSG_PAGE_PARAM: &str = "Значення має бути щонайменше 1";

/// Query parameters accepted by the course listing.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct CourseListParams {
    /// Free-text filter over title and tags.
    pub query: Option<String>,
    /// One-based page number; defaults to 1.
    pub page: Option<usize>,
    /// Page size; defaults to 9.
    pub limit: Option<usize>,
    /// Field to sort by.
    pub sort: Option<SortField>,
    /// Sort direction; defaults to ascending.
    pub order: Option<SortOrder>,
    /// Category filter; `all` (or absent) keeps every category.
    pub category: Option<String>,
}

impl CourseListParams {
    fn page_request(&self) -> Result<PageRequest, Error> {
        let mut fields = FieldErrors::new();
        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(PageRequest::DEFAULT_LIMIT);
        if page == 0 {
            fields.insert("page".to_owned(), MSG_PAGE_PARAM.to_owned());
        }
        if limit == 0 {
            fields.insert("limit".to_owned(), MSG_PAGE_PARAM.to_owned());
        }
        PageRequest::new(page, limit).map_err(|_| Error::validation(fields))
    }

    fn catalogue_query(&self) -> CatalogueQuery {
        CatalogueQuery {
            text: self.query.clone().unwrap_or_default(),
            category: self
                .category
                .clone()
                .filter(|category| category != "all" && !category.trim().is_empty()),
            sort: self.sort,
            order: self.order.unwrap_or_default(),
        }
    }
}

/// Filtered, sorted, paginated course listing.
#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseListParams),
    responses(
        (status = 200, description = "One page of the filtered catalogue"),
        (status = 400, description = "Invalid paging parameters", body = Error),
        (status = 503, description = "Catalogue file corrupt", body = Error)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/courses")]
pub async fn list_courses(
    state: web::Data<HttpState>,
    params: web::Query<CourseListParams>,
) -> ApiResult<web::Json<PageEnvelope<Course>>> {
    let request = params.page_request()?;
    let snapshot = state.catalogue.list().await?;
    let view = catalogue::select(snapshot, &params.catalogue_query())?;
    Ok(web::Json(PageEnvelope::slice(view, &request)))
}

/// Single course by id.
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    responses(
        (status = 200, description = "Course", body = Course),
        (status = 404, description = "No such course", body = Error)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Course>> {
    let id = path.into_inner();
    let course = state
        .catalogue
        .find(id)
        .await?
        .ok_or_else(|| Error::not_found("Курс не знайдено"))?;
    Ok(web::Json(course))
}

/// Create a course (admin only).
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CourseForm,
    responses(
        (status = 201, description = "Created course", body = Course),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "No valid session", body = Error),
        (status = 403, description = "Not an administrator", body = Error)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CourseForm>,
) -> ApiResult<HttpResponse> {
    state.authorized(&session, Role::Admin)?;
    let draft = CourseDraft::validate(payload.into_inner()).map_err(Error::validation)?;
    let course = state.catalogue.create(draft).await?;
    Ok(HttpResponse::Created().json(course))
}

/// Partially update a course (admin only).
#[utoipa::path(
    patch,
    path = "/api/courses/{id}",
    request_body = CourseForm,
    responses(
        (status = 200, description = "Updated course", body = Course),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "No valid session", body = Error),
        (status = 403, description = "Not an administrator", body = Error),
        (status = 404, description = "No such course", body = Error)
    ),
    tags = ["courses"],
    operation_id = "updateCourse"
)]
#[patch("/courses/{id}")]
pub async fn update_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<CourseForm>,
) -> ApiResult<web::Json<Course>> {
    state.authorized(&session, Role::Admin)?;
    let patch = CoursePatch::validate(payload.into_inner()).map_err(Error::validation)?;
    let course = state.catalogue.update(path.into_inner(), patch).await?;
    Ok(web::Json(course))
}

/// Delete a course (admin only).
#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "No valid session", body = Error),
        (status = 403, description = "Not an administrator", body = Error),
        (status = 404, description = "No such course", body = Error)
    ),
    tags = ["courses"],
    operation_id = "deleteCourse"
)]
#[delete("/courses/{id}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state.authorized(&session, Role::Admin)?;
    state.catalogue.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
