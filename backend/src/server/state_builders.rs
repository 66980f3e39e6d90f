//! Builders wiring repositories into the HTTP state ports.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use fresque::domain::ports::FixtureLoginService;
use fresque::domain::{PackageCatalogueService, PackageSubmissionService, UserActivityService};
use fresque::inbound::http::state::HttpState;
use fresque::outbound::persistence::{
    DbPool, DieselDistributionRepository, DieselPackageRepository, DieselReviewRepository,
};

use super::ServerConfig;

/// Services backed by PostgreSQL repositories sharing one pool.
fn database_state(pool: &DbPool, clock: Arc<dyn Clock>) -> HttpState {
    let packages = Arc::new(DieselPackageRepository::new(pool.clone()));
    let reviews = Arc::new(DieselReviewRepository::new(pool.clone()));
    let distributions = Arc::new(DieselDistributionRepository::new(pool.clone()));

    HttpState::new(
        Arc::new(PackageCatalogueService::new(packages.clone(), reviews.clone())),
        Arc::new(PackageSubmissionService::new(packages.clone(), distributions, clock)),
        Arc::new(UserActivityService::new(packages, reviews)),
        Arc::new(FixtureLoginService),
    )
}

/// Build the HTTP state, falling back to fixtures when no pool is configured.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => database_state(pool, Arc::new(DefaultClock)),
        None => HttpState::fixtures(),
    };
    web::Data::new(state)
}
