//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` so they depend only on driving
//! ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureLoginService, FixturePackageCatalogueQuery, FixturePackageSubmissionCommand,
    FixtureUserActivityQuery, LoginService, PackageCatalogueQuery, PackageSubmissionCommand,
    UserActivityQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub catalogue: Arc<dyn PackageCatalogueQuery>,
    pub submission: Arc<dyn PackageSubmissionCommand>,
    pub activity: Arc<dyn UserActivityQuery>,
    pub login: Arc<dyn LoginService>,
}

impl HttpState {
    /// Construct state from port implementations.
    pub fn new(
        catalogue: Arc<dyn PackageCatalogueQuery>,
        submission: Arc<dyn PackageSubmissionCommand>,
        activity: Arc<dyn UserActivityQuery>,
        login: Arc<dyn LoginService>,
    ) -> Self {
        Self {
            catalogue,
            submission,
            activity,
            login,
        }
    }

    /// State backed entirely by fixture ports, used when no database is
    /// configured.
    ///
    /// # Examples
    /// ```
    /// use fresque::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::fixtures();
    /// let _catalogue = state.catalogue.clone();
    /// ```
    pub fn fixtures() -> Self {
        Self::new(
            Arc::new(FixturePackageCatalogueQuery),
            Arc::new(FixturePackageSubmissionCommand),
            Arc::new(FixtureUserActivityQuery),
            Arc::new(FixtureLoginService),
        )
    }
}
