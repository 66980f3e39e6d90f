//! PostgreSQL-backed review adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::max;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ReviewRepository, ReviewRepositoryError};
use crate::domain::{Review, Username};

use super::diesel_helpers::{StoreFailure, reviews_from_rows, sql_limit};
use super::models::ReviewRow;
use super::pool::DbPool;
use super::schema::{comments, reviewers, reviews};

/// Diesel-backed implementation of [`ReviewRepository`].
#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn fail(error: impl Into<StoreFailure>) -> ReviewRepositoryError {
    match error.into() {
        StoreFailure::Connection(message) => ReviewRepositoryError::connection(message),
        StoreFailure::Query(message) => ReviewRepositoryError::query(message),
        StoreFailure::UniqueViolation { constraint } => ReviewRepositoryError::query(format!(
            "unexpected unique violation on {}",
            constraint.as_deref().unwrap_or("unknown constraint")
        )),
    }
}

/// Reorder `rows` to follow `ranked_ids`, dropping rows not ranked.
fn in_rank_order(rows: Vec<ReviewRow>, ranked_ids: &[i32]) -> Vec<ReviewRow> {
    let mut by_id: HashMap<i32, ReviewRow> = rows.into_iter().map(|row| (row.id, row)).collect();
    ranked_ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

#[async_trait]
impl ReviewRepository for DieselReviewRepository {
    async fn recently_commented(&self, limit: usize) -> Result<Vec<Review>, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(fail)?;

        // Grouping by review keeps a review with many comments from
        // appearing more than once.
        let ranked: Vec<(i32, Option<DateTime<Utc>>)> = comments::table
            .group_by(comments::review_id)
            .select((comments::review_id, max(comments::date)))
            .order((max(comments::date).desc(), comments::review_id.desc()))
            .limit(sql_limit(limit))
            .load(&mut conn)
            .await
            .map_err(fail)?;
        let ranked_ids: Vec<i32> = ranked.into_iter().map(|(id, _)| id).collect();

        let rows: Vec<ReviewRow> = reviews::table
            .filter(reviews::id.eq_any(&ranked_ids))
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(fail)?;

        reviews_from_rows(&mut conn, in_rank_order(rows, &ranked_ids))
            .await
            .map_err(fail)
    }

    async fn list_by_reviewer(
        &self,
        reviewer: &Username,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        let mut conn = self.pool.get().await.map_err(fail)?;
        let rows: Vec<ReviewRow> = reviews::table
            .inner_join(reviewers::table)
            .filter(reviewers::reviewer_name.eq(reviewer.as_ref()))
            .order((reviews::date_start.asc(), reviews::id.asc()))
            .select(ReviewRow::as_select())
            .load(&mut conn)
            .await
            .map_err(fail)?;
        reviews_from_rows(&mut conn, rows).await.map_err(fail)
    }
}
