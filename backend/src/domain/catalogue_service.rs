//! Package listing service implementing [`PackageCatalogueQuery`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    IndexView, PackageCatalogueQuery, PackageRepository, PackageRepositoryError, PackagesView,
    ReviewRepository, ReviewRepositoryError,
};
use crate::domain::{Error, PackageDetail, PackageName, sort_by_review_activity};

/// Number of entries in each front page section.
pub const INDEX_SECTION_LIMIT: usize = 10;

/// Package listing service backed by package and review repositories.
#[derive(Clone)]
pub struct PackageCatalogueService<P, R> {
    packages: Arc<P>,
    reviews: Arc<R>,
}

impl<P, R> PackageCatalogueService<P, R> {
    /// Create a new service with the given repositories.
    pub fn new(packages: Arc<P>, reviews: Arc<R>) -> Self {
        Self { packages, reviews }
    }
}

pub(crate) fn map_package_error(error: PackageRepositoryError) -> Error {
    match error {
        PackageRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("package repository unavailable: {message}"))
        }
        PackageRepositoryError::Query { message } => {
            Error::internal(format!("package repository error: {message}"))
        }
        PackageRepositoryError::DuplicateName { name } => {
            Error::conflict(format!("package name already taken: {name}"))
        }
    }
}

pub(crate) fn map_review_error(error: ReviewRepositoryError) -> Error {
    match error {
        ReviewRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("review repository unavailable: {message}"))
        }
        ReviewRepositoryError::Query { message } => {
            Error::internal(format!("review repository error: {message}"))
        }
    }
}

#[async_trait]
impl<P, R> PackageCatalogueQuery for PackageCatalogueService<P, R>
where
    P: PackageRepository,
    R: ReviewRepository,
{
    async fn index(&self) -> Result<IndexView, Error> {
        let recent_packages = self
            .packages
            .recent_active(INDEX_SECTION_LIMIT)
            .await
            .map_err(map_package_error)?;
        let updated_reviews = self
            .reviews
            .recently_commented(INDEX_SECTION_LIMIT)
            .await
            .map_err(map_review_error)?;
        let packages_without_review = self
            .packages
            .active_without_reviews(INDEX_SECTION_LIMIT)
            .await
            .map_err(map_package_error)?;

        Ok(IndexView {
            recent_packages,
            updated_reviews,
            packages_without_review,
        })
    }

    async fn packages(&self) -> Result<PackagesView, Error> {
        let mut packages = self
            .packages
            .list_active()
            .await
            .map_err(map_package_error)?;
        sort_by_review_activity(&mut packages);
        Ok(PackagesView { packages })
    }

    async fn package(&self, name: &PackageName) -> Result<PackageDetail, Error> {
        self.packages
            .find_by_name(name)
            .await
            .map_err(map_package_error)?
            .ok_or_else(|| Error::not_found(format!("Unknown package: {name}")))
    }
}
