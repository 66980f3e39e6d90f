//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint of the package review API and the
//! session cookie security scheme. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{
    IndexView, PackagesView, SubmissionOutcome, UserPackagesView, UserReviewsView,
};
use crate::domain::{
    Comment, Distribution, Error, ErrorCode, FlashCategory, FlashMessage, NewPackageForm,
    NewPackageFormView, Package, PackageDetail, RedirectTarget, Review, ReviewThread,
};
use crate::inbound::http::packages::{NewPackageFormResponse, SubmitPackageBody};
use crate::inbound::http::users::LoginRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Fresque package review API",
        description = "Package submission, review listings and per-user activity.",
        license(name = "GPL-2.0-or-later", url = "https://www.gnu.org/licenses/old-licenses/gpl-2.0.html")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::packages::index,
        crate::inbound::http::packages::list_packages,
        crate::inbound::http::packages::new_package_form,
        crate::inbound::http::packages::submit_package,
        crate::inbound::http::packages::get_package,
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::user_packages,
        crate::inbound::http::users::user_reviews,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        IndexView,
        PackagesView,
        Package,
        PackageDetail,
        Distribution,
        Review,
        ReviewThread,
        Comment,
        NewPackageForm,
        NewPackageFormView,
        NewPackageFormResponse,
        SubmitPackageBody,
        SubmissionOutcome,
        FlashMessage,
        FlashCategory,
        RedirectTarget,
        UserPackagesView,
        UserReviewsView,
        LoginRequest,
    )),
    tags(
        (name = "packages", description = "Package listings and submission"),
        (name = "users", description = "Login and per-user activity"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
