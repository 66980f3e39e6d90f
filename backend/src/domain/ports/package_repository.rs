//! Port abstraction for package persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{
    DistributionId, NewPackage, Package, PackageDetail, PackageName, Username,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by package repository adapters.
    pub enum PackageRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "package repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "package repository query failed: {message}",
        /// Another package already uses the name.
        DuplicateName { name: String } => "package name already taken: {name}",
    }
}

/// Port for reading and creating packages.
///
/// Every returned [`Package`] carries its resolved `last_review_activity`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PackageRepository: Send + Sync {
    /// Active packages, newest submission first, at most `limit`.
    async fn recent_active(&self, limit: usize) -> Result<Vec<Package>, PackageRepositoryError>;

    /// Active packages nobody has opened a review for, newest submission
    /// first, at most `limit`.
    async fn active_without_reviews(
        &self,
        limit: usize,
    ) -> Result<Vec<Package>, PackageRepositoryError>;

    /// Every active package, in no particular order.
    async fn list_active(&self) -> Result<Vec<Package>, PackageRepositoryError>;

    /// Look a package up by its unique name.
    async fn find_by_name(
        &self,
        name: &PackageName,
    ) -> Result<Option<PackageDetail>, PackageRepositoryError>;

    /// Every package owned by `owner`, active or not.
    async fn list_by_owner(&self, owner: &Username) -> Result<Vec<Package>, PackageRepositoryError>;

    /// Insert a package and link it to the given distributions in one
    /// transaction. Unknown distribution ids are ignored.
    async fn create(
        &self,
        package: &NewPackage,
        distributions: &[DistributionId],
    ) -> Result<Package, PackageRepositoryError>;
}
