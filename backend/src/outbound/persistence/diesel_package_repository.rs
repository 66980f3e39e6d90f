//! PostgreSQL-backed package adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{PackageRepository, PackageRepositoryError};
use crate::domain::{
    Distribution, DistributionId, NewPackage, Package, PackageDetail, PackageName,
    ReviewActivity, Username,
};

use super::diesel_helpers::{
    StoreFailure, package_from_row, packages_from_rows, review_activity, review_threads,
    reviews_from_rows, sql_limit,
};
use super::models::{
    DistributionRow, NewPackageDistributionRow, NewPackageRow, PackageRow, ReviewRow,
};
use super::pool::DbPool;
use super::schema::{distributions, package_distributions, packages, reviews};

/// Diesel-backed implementation of [`PackageRepository`].
#[derive(Clone)]
pub struct DieselPackageRepository {
    pool: DbPool,
}

impl DieselPackageRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// ```rust,ignore
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/fresque")).await?;
    /// let packages = DieselPackageRepository::new(pool);
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: StoreFailure, name: Option<&PackageName>) -> PackageRepositoryError {
    match failure {
        StoreFailure::Connection(message) => PackageRepositoryError::connection(message),
        StoreFailure::Query(message) => PackageRepositoryError::query(message),
        StoreFailure::UniqueViolation { constraint } => match name {
            Some(name) => PackageRepositoryError::duplicate_name(name.as_ref()),
            None => PackageRepositoryError::query(format!(
                "unexpected unique violation on {}",
                constraint.as_deref().unwrap_or("unknown constraint")
            )),
        },
    }
}

async fn load_detail(
    conn: &mut AsyncPgConnection,
    name: &PackageName,
) -> Result<Option<PackageDetail>, StoreFailure> {
    let Some(row) = packages::table
        .filter(packages::name.eq(name.as_ref()))
        .select(PackageRow::as_select())
        .first(conn)
        .await
        .optional()?
    else {
        return Ok(None);
    };

    let distribution_rows: Vec<DistributionRow> = distributions::table
        .inner_join(package_distributions::table)
        .filter(package_distributions::package_id.eq(row.id))
        .order(distributions::id.asc())
        .select(DistributionRow::as_select())
        .load(conn)
        .await?;
    let review_rows: Vec<ReviewRow> = reviews::table
        .filter(reviews::package_id.eq(row.id))
        .order((reviews::date_start.asc(), reviews::id.asc()))
        .select(ReviewRow::as_select())
        .load(conn)
        .await?;

    let activity = review_activity(conn, &[row.id])
        .await?
        .remove(&row.id)
        .unwrap_or_default();
    let reviews = reviews_from_rows(conn, review_rows).await?;
    let reviews = review_threads(conn, reviews).await?;
    let package = package_from_row(row, activity)?;

    Ok(Some(PackageDetail {
        package,
        distributions: distribution_rows
            .into_iter()
            .map(|row| Distribution {
                id: DistributionId::new(row.id),
                name: row.name,
            })
            .collect(),
        reviews,
    }))
}

fn fail(error: impl Into<StoreFailure>) -> PackageRepositoryError {
    map_failure(error.into(), None)
}

#[async_trait]
impl PackageRepository for DieselPackageRepository {
    async fn recent_active(&self, limit: usize) -> Result<Vec<Package>, PackageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(fail)?;
        let rows: Vec<PackageRow> = packages::table
            .filter(packages::active.eq(true))
            .order((packages::submitted.desc(), packages::id.desc()))
            .limit(sql_limit(limit))
            .select(PackageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(fail)?;
        packages_from_rows(&mut conn, rows).await.map_err(fail)
    }

    async fn active_without_reviews(
        &self,
        limit: usize,
    ) -> Result<Vec<Package>, PackageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(fail)?;
        let rows: Vec<PackageRow> = packages::table
            .filter(packages::active.eq(true))
            .filter(packages::id.ne_all(reviews::table.select(reviews::package_id)))
            .order((packages::submitted.desc(), packages::id.desc()))
            .limit(sql_limit(limit))
            .select(PackageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(fail)?;
        packages_from_rows(&mut conn, rows).await.map_err(fail)
    }

    async fn list_active(&self) -> Result<Vec<Package>, PackageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(fail)?;
        let rows: Vec<PackageRow> = packages::table
            .filter(packages::active.eq(true))
            .order(packages::id.asc())
            .select(PackageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(fail)?;
        packages_from_rows(&mut conn, rows).await.map_err(fail)
    }

    async fn find_by_name(
        &self,
        name: &PackageName,
    ) -> Result<Option<PackageDetail>, PackageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(fail)?;
        conn.transaction::<_, StoreFailure, _>(|conn| load_detail(conn, name).scope_boxed())
            .await
            .map_err(fail)
    }

    async fn list_by_owner(&self, owner: &Username) -> Result<Vec<Package>, PackageRepositoryError> {
        let mut conn = self.pool.get().await.map_err(fail)?;
        let rows: Vec<PackageRow> = packages::table
            .filter(packages::owner.eq(owner.as_ref()))
            .order(packages::id.asc())
            .select(PackageRow::as_select())
            .load(&mut conn)
            .await
            .map_err(fail)?;
        packages_from_rows(&mut conn, rows).await.map_err(fail)
    }

    async fn create(
        &self,
        package: &NewPackage,
        distribution_ids: &[DistributionId],
    ) -> Result<Package, PackageRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_failure(err.into(), Some(&package.name)))?;
        let requested: Vec<i32> = distribution_ids.iter().map(|id| id.get()).collect();
        let new_row = NewPackageRow {
            name: package.name.as_ref(),
            summary: &package.summary,
            description: &package.description,
            owner: package.owner.as_ref(),
            submitted: package.submitted,
            active: true,
        };

        let row = conn
            .transaction::<_, StoreFailure, _>(|conn| {
                async move {
                    let row: PackageRow = diesel::insert_into(packages::table)
                        .values(&new_row)
                        .returning(PackageRow::as_returning())
                        .get_result(conn)
                        .await?;

                    let known: Vec<i32> = distributions::table
                        .filter(distributions::id.eq_any(&requested))
                        .order(distributions::id.asc())
                        .select(distributions::id)
                        .load(conn)
                        .await?;
                    let links: Vec<NewPackageDistributionRow> = known
                        .into_iter()
                        .map(|distribution_id| NewPackageDistributionRow {
                            package_id: row.id,
                            distribution_id,
                        })
                        .collect();
                    if !links.is_empty() {
                        diesel::insert_into(package_distributions::table)
                            .values(&links)
                            .execute(conn)
                            .await?;
                    }
                    Ok(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_failure(err, Some(&package.name)))?;

        package_from_row(row, ReviewActivity::default())
            .map_err(|err| map_failure(err, Some(&package.name)))
    }
}
