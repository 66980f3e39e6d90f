//! Per-user listing service implementing [`UserActivityQuery`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::catalogue_service::{map_package_error, map_review_error};
use crate::domain::ports::{
    PackageRepository, ReviewRepository, UserActivityQuery, UserPackagesView, UserReviewsView,
};
use crate::domain::{Error, Username, sort_by_review_activity};

/// Per-user listing service backed by package and review repositories.
#[derive(Clone)]
pub struct UserActivityService<P, R> {
    packages: Arc<P>,
    reviews: Arc<R>,
}

impl<P, R> UserActivityService<P, R> {
    /// Create a new service with the given repositories.
    pub fn new(packages: Arc<P>, reviews: Arc<R>) -> Self {
        Self { packages, reviews }
    }
}

#[async_trait]
impl<P, R> UserActivityQuery for UserActivityService<P, R>
where
    P: PackageRepository,
    R: ReviewRepository,
{
    async fn user_packages(&self, username: &Username) -> Result<UserPackagesView, Error> {
        let mut owned = self
            .packages
            .list_by_owner(username)
            .await
            .map_err(map_package_error)?;
        sort_by_review_activity(&mut owned);
        let (packages, old_packages) = owned.into_iter().partition(|package| package.active);
        Ok(UserPackagesView {
            packages,
            old_packages,
        })
    }

    async fn user_reviews(&self, username: &Username) -> Result<UserReviewsView, Error> {
        let reviews = self
            .reviews
            .list_by_reviewer(username)
            .await
            .map_err(map_review_error)?;
        Ok(UserReviewsView { reviews })
    }
}
