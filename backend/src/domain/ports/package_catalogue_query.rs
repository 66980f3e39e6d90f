//! Driving port for the public package listings.
//!
//! HTTP handlers call this port for the front page, the package list, and
//! the package detail page without knowing how the data is stored.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Package, PackageDetail, PackageName, Review};

/// Front page summary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IndexView {
    /// Newest active packages.
    pub recent_packages: Vec<Package>,
    /// Reviews with the most recent comments.
    pub updated_reviews: Vec<Review>,
    /// Newest active packages still waiting for a reviewer.
    pub packages_without_review: Vec<Package>,
}

/// All active packages, least recently reviewed first.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct PackagesView {
    pub packages: Vec<Package>,
}

/// Domain use-case port for package listings.
#[async_trait]
pub trait PackageCatalogueQuery: Send + Sync {
    /// Front page summary.
    async fn index(&self) -> Result<IndexView, Error>;

    /// Active packages sorted by last review activity.
    async fn packages(&self) -> Result<PackagesView, Error>;

    /// Detail of one package; `not_found` when the name is unknown.
    async fn package(&self, name: &PackageName) -> Result<PackageDetail, Error>;
}

/// Empty catalogue used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePackageCatalogueQuery;

#[async_trait]
impl PackageCatalogueQuery for FixturePackageCatalogueQuery {
    async fn index(&self) -> Result<IndexView, Error> {
        Ok(IndexView::default())
    }

    async fn packages(&self) -> Result<PackagesView, Error> {
        Ok(PackagesView::default())
    }

    async fn package(&self, name: &PackageName) -> Result<PackageDetail, Error> {
        Err(Error::not_found(format!("Unknown package: {name}")))
    }
}
