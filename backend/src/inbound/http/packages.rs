//! Package catalogue and submission handlers.
//!
//! ```text
//! GET  /api/v1/index
//! GET  /api/v1/packages
//! GET  /api/v1/packages/new
//! POST /api/v1/packages {"name":"bash","summary":"...","csrfToken":"..."}
//! GET  /api/v1/packages/{name}
//! ```
//!
//! Register [`new_package_form`] before [`get_package`] so `new` is not
//! captured as a package name.

use actix_web::{HttpResponse, get, http::header, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{IndexView, PackagesView, SubmissionOutcome, SubmitPackageRequest};
use crate::domain::{Error, NewPackageForm, NewPackageFormView, PackageDetail, PackageName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Blank new-package form plus the token the submission must echo.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewPackageFormResponse {
    #[serde(flatten)]
    pub form: NewPackageFormView,
    pub csrf_token: String,
}

/// Request body for `POST /api/v1/packages`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitPackageBody {
    #[serde(flatten)]
    pub form: NewPackageForm,
    pub csrf_token: String,
}

/// Front page listings.
#[utoipa::path(
    get,
    path = "/api/v1/index",
    responses(
        (status = 200, description = "Front page sections", body = IndexView),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["packages"],
    operation_id = "index",
    security([])
)]
#[get("/index")]
pub async fn index(state: web::Data<HttpState>) -> ApiResult<web::Json<IndexView>> {
    Ok(web::Json(state.catalogue.index().await?))
}

/// All active packages, least recently reviewed first.
#[utoipa::path(
    get,
    path = "/api/v1/packages",
    responses(
        (status = 200, description = "Active packages", body = PackagesView),
        (status = 503, description = "Database unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["packages"],
    operation_id = "listPackages",
    security([])
)]
#[get("/packages")]
pub async fn list_packages(state: web::Data<HttpState>) -> ApiResult<web::Json<PackagesView>> {
    Ok(web::Json(state.catalogue.packages().await?))
}

/// Blank submission form for the logged-in user.
#[utoipa::path(
    get,
    path = "/api/v1/packages/new",
    responses(
        (status = 200, description = "Form choices and CSRF token", body = NewPackageFormResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["packages"],
    operation_id = "newPackageForm"
)]
#[get("/packages/new")]
pub async fn new_package_form(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<NewPackageFormResponse>> {
    session.require_user()?;
    let form = state.submission.new_package_form().await?;
    let csrf_token = session.csrf_token()?;
    Ok(web::Json(NewPackageFormResponse { form, csrf_token }))
}

/// Submit a new package owned by the logged-in user.
///
/// A stored package answers `201 Created` with a `Location` header. When
/// storage fails the submitted form comes back with `200 OK` and a `danger`
/// flash.
#[utoipa::path(
    post,
    path = "/api/v1/packages",
    request_body = SubmitPackageBody,
    responses(
        (status = 201, description = "Package created", body = SubmissionOutcome,
            headers(("Location" = String, description = "Package detail endpoint"))),
        (status = 200, description = "Package could not be stored", body = SubmissionOutcome),
        (status = 400, description = "Invalid form", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "CSRF token mismatch", body = Error)
    ),
    tags = ["packages"],
    operation_id = "submitPackage"
)]
#[post("/packages")]
pub async fn submit_package(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubmitPackageBody>,
) -> ApiResult<HttpResponse> {
    let owner = session.require_user()?;
    let SubmitPackageBody { form, csrf_token } = payload.into_inner();
    session.verify_csrf_token(&csrf_token)?;

    let outcome = state
        .submission
        .submit(SubmitPackageRequest { owner, form })
        .await?;
    let response = match outcome.redirect() {
        Some(target) => HttpResponse::Created()
            .insert_header((header::LOCATION, target.path()))
            .json(&outcome),
        None => HttpResponse::Ok().json(&outcome),
    };
    Ok(response)
}

/// One package with its distributions and reviews.
#[utoipa::path(
    get,
    path = "/api/v1/packages/{name}",
    params(("name" = String, Path, description = "Package name")),
    responses(
        (status = 200, description = "Package detail", body = PackageDetail),
        (status = 404, description = "Unknown package", body = Error)
    ),
    tags = ["packages"],
    operation_id = "getPackage",
    security([])
)]
#[get("/packages/{name}")]
pub async fn get_package(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PackageDetail>> {
    let raw = path.into_inner();
    let name =
        PackageName::new(raw.as_str()).map_err(|_| Error::not_found(format!("Unknown package: {raw}")))?;
    Ok(web::Json(state.catalogue.package(&name).await?))
}

#[cfg(test)]
#[path = "packages_tests.rs"]
mod tests;
