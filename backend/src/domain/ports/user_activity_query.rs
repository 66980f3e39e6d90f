//! Driving port for a user's own packages and reviews.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Package, Review, Username};

/// Packages owned by one user, least recently reviewed first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPackagesView {
    /// Active packages.
    pub packages: Vec<Package>,
    /// Retired packages.
    pub old_packages: Vec<Package>,
}

/// Reviews one user takes part in, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct UserReviewsView {
    pub reviews: Vec<Review>,
}

/// Domain use-case port for per-user listings.
#[async_trait]
pub trait UserActivityQuery: Send + Sync {
    /// Packages owned by `username`, split into active and retired.
    async fn user_packages(&self, username: &Username) -> Result<UserPackagesView, Error>;

    /// Reviews `username` is assigned to.
    async fn user_reviews(&self, username: &Username) -> Result<UserReviewsView, Error>;
}

/// Empty listings used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserActivityQuery;

#[async_trait]
impl UserActivityQuery for FixtureUserActivityQuery {
    async fn user_packages(&self, _username: &Username) -> Result<UserPackagesView, Error> {
        Ok(UserPackagesView::default())
    }

    async fn user_reviews(&self, _username: &Username) -> Result<UserReviewsView, Error> {
        Ok(UserReviewsView::default())
    }
}
