//! Login, logout and per-user listing handlers.
//!
//! ```text
//! POST /api/v1/login {"username":"admin","password":"password"}
//! POST /api/v1/logout
//! GET  /api/v1/users/{username}/packages
//! GET  /api/v1/users/{username}/reviews
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::{UserPackagesView, UserReviewsView};
use crate::domain::{Error, LoginCredentials, LoginValidationError, Username, UsernameValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::Username(inner) => Error::invalid_request(inner.to_string())
            .with_details(json!({ "field": "username", "code": username_error_code(&inner) })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

fn username_error_code(err: &UsernameValidationError) -> &'static str {
    match err {
        UsernameValidationError::Empty => "empty_username",
        UsernameValidationError::Untrimmed => "untrimmed_username",
        UsernameValidationError::TooLong { .. } => "username_too_long",
        UsernameValidationError::InvalidCharacters => "invalid_username",
    }
}

fn parse_username(raw: String) -> Result<Username, Error> {
    Username::new(raw).map_err(|err| {
        Error::invalid_request(err.to_string())
            .with_details(json!({ "field": "username", "code": username_error_code(&err) }))
    })
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let username = state.login.authenticate(&credentials).await?;
    session.persist_user(&username)?;
    tracing::info!(user = %username, "user logged in");
    Ok(HttpResponse::Ok().finish())
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["users"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Packages owned by a user, split into active and retired.
#[utoipa::path(
    get,
    path = "/api/v1/users/{username}/packages",
    params(("username" = String, Path, description = "Package owner")),
    responses(
        (status = 200, description = "Owned packages", body = UserPackagesView),
        (status = 400, description = "Malformed username", body = Error)
    ),
    tags = ["users"],
    operation_id = "userPackages",
    security([])
)]
#[get("/users/{username}/packages")]
pub async fn user_packages(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserPackagesView>> {
    let username = parse_username(path.into_inner())?;
    Ok(web::Json(state.activity.user_packages(&username).await?))
}

/// Reviews a user takes part in.
#[utoipa::path(
    get,
    path = "/api/v1/users/{username}/reviews",
    params(("username" = String, Path, description = "Reviewer")),
    responses(
        (status = 200, description = "Assigned reviews", body = UserReviewsView),
        (status = 400, description = "Malformed username", body = Error)
    ),
    tags = ["users"],
    operation_id = "userReviews",
    security([])
)]
#[get("/users/{username}/reviews")]
pub async fn user_reviews(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserReviewsView>> {
    let username = parse_username(path.into_inner())?;
    Ok(web::Json(state.activity.user_reviews(&username).await?))
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
