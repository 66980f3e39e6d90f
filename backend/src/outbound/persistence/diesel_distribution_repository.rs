//! PostgreSQL-backed distribution adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DistributionRepository, DistributionRepositoryError};
use crate::domain::{Distribution, DistributionId};

use super::diesel_helpers::StoreFailure;
use super::models::DistributionRow;
use super::pool::DbPool;
use super::schema::distributions;

/// Diesel-backed implementation of [`DistributionRepository`].
#[derive(Clone)]
pub struct DieselDistributionRepository {
    pool: DbPool,
}

impl DieselDistributionRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn fail(error: impl Into<StoreFailure>) -> DistributionRepositoryError {
    match error.into() {
        StoreFailure::Connection(message) => DistributionRepositoryError::connection(message),
        StoreFailure::Query(message) => DistributionRepositoryError::query(message),
        StoreFailure::UniqueViolation { .. } => {
            DistributionRepositoryError::query("unexpected unique violation")
        }
    }
}

fn distribution_from_row(row: DistributionRow) -> Distribution {
    Distribution {
        id: DistributionId::new(row.id),
        name: row.name,
    }
}

#[async_trait]
impl DistributionRepository for DieselDistributionRepository {
    async fn list_all(&self) -> Result<Vec<Distribution>, DistributionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(fail)?;
        let rows: Vec<DistributionRow> = distributions::table
            .order(distributions::id.asc())
            .select(DistributionRow::as_select())
            .load(&mut conn)
            .await
            .map_err(fail)?;
        Ok(rows.into_iter().map(distribution_from_row).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn rows_convert_to_domain_distributions() {
        let distribution = distribution_from_row(DistributionRow {
            id: 3,
            name: "EPEL 7".to_owned(),
        });
        assert_eq!(distribution.id, DistributionId::new(3));
        assert_eq!(distribution.name, "EPEL 7");
    }

    #[rstest]
    fn diesel_failures_are_query_errors() {
        let err = fail(diesel::result::Error::NotFound);
        assert!(matches!(err, DistributionRepositoryError::Query { .. }));
    }
}
