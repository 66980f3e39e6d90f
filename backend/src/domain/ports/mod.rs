//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports (`*Query`, `*Command`, `LoginService`) are called by inbound
//! adapters and implemented by the domain services.

mod macros;
pub(crate) use macros::define_port_error;

mod distribution_repository;
mod login_service;
mod package_catalogue_query;
mod package_repository;
mod package_submission_command;
mod review_repository;
mod user_activity_query;

#[cfg(test)]
pub use distribution_repository::MockDistributionRepository;
pub use distribution_repository::{DistributionRepository, DistributionRepositoryError};
pub use login_service::{FixtureLoginService, LoginService};
pub use package_catalogue_query::{
    FixturePackageCatalogueQuery, IndexView, PackageCatalogueQuery, PackagesView,
};
#[cfg(test)]
pub use package_repository::MockPackageRepository;
pub use package_repository::{PackageRepository, PackageRepositoryError};
pub use package_submission_command::{
    FixturePackageSubmissionCommand, PackageSubmissionCommand, SubmissionOutcome,
    SubmitPackageRequest,
};
#[cfg(test)]
pub use review_repository::MockReviewRepository;
pub use review_repository::{ReviewRepository, ReviewRepositoryError};
pub use user_activity_query::{
    FixtureUserActivityQuery, UserActivityQuery, UserPackagesView, UserReviewsView,
};
