//! Shared error classification and row assembly for Diesel repositories.
//!
//! Repositories funnel pool and Diesel failures through [`StoreFailure`] and
//! then map it onto their own port error. The loaders here attach review
//! aggregates to package and review rows so every adapter resolves them the
//! same way.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use diesel::dsl::max;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::{
    Comment, Package, PackageId, PackageName, Review, ReviewActivity, ReviewId, ReviewThread,
    Username,
};

use super::models::{CommentRow, PackageRow, ReviewRow};
use super::pool::PoolError;
use super::schema::{comments, packages, reviewers, reviews};

/// Persistence failure reduced to the cases repositories distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    Connection(String),
    Query(String),
    UniqueViolation { constraint: Option<String> },
}

impl From<PoolError> for StoreFailure {
    fn from(error: PoolError) -> Self {
        match error {
            PoolError::Checkout { message } | PoolError::Build { message } => {
                Self::Connection(message)
            }
        }
    }
}

impl From<DieselError> for StoreFailure {
    fn from(error: DieselError) -> Self {
        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), "diesel operation failed");
            }
            other => debug!(error = %other, "diesel operation failed"),
        }

        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation {
                    constraint: info.constraint_name().map(str::to_owned),
                }
            }
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                Self::Connection("database connection error".to_owned())
            }
            DieselError::NotFound => Self::Query("record not found".to_owned()),
            DieselError::QueryBuilderError(_) => Self::Query("database query error".to_owned()),
            _ => Self::Query("database error".to_owned()),
        }
    }
}

/// Convert a row limit into the SQL `LIMIT` type.
pub(crate) fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn stored_package_name(raw: String) -> Result<PackageName, StoreFailure> {
    PackageName::new(raw.as_str())
        .map_err(|err| StoreFailure::Query(format!("stored package name {raw:?} is invalid: {err}")))
}

fn stored_username(raw: String) -> Result<Username, StoreFailure> {
    Username::new(raw.as_str())
        .map_err(|err| StoreFailure::Query(format!("stored username {raw:?} is invalid: {err}")))
}

/// Convert a package row once its review activity is known.
pub(crate) fn package_from_row(
    row: PackageRow,
    activity: ReviewActivity,
) -> Result<Package, StoreFailure> {
    Ok(Package {
        id: PackageId::new(row.id),
        name: stored_package_name(row.name)?,
        summary: row.summary,
        description: row.description,
        owner: stored_username(row.owner)?,
        submitted: row.submitted,
        active: row.active,
        last_review_activity: activity.resolve(row.submitted),
    })
}

/// Latest review start and latest comment per package.
pub(crate) async fn review_activity(
    conn: &mut AsyncPgConnection,
    package_ids: &[i32],
) -> Result<HashMap<i32, ReviewActivity>, StoreFailure> {
    if package_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let started: Vec<(i32, Option<DateTime<Utc>>)> = reviews::table
        .filter(reviews::package_id.eq_any(package_ids))
        .group_by(reviews::package_id)
        .select((reviews::package_id, max(reviews::date_start)))
        .load(conn)
        .await?;
    let commented: Vec<(i32, Option<DateTime<Utc>>)> = comments::table
        .inner_join(reviews::table)
        .filter(reviews::package_id.eq_any(package_ids))
        .group_by(reviews::package_id)
        .select((reviews::package_id, max(comments::date)))
        .load(conn)
        .await?;

    let mut activity: HashMap<i32, ReviewActivity> = HashMap::new();
    for (package_id, at) in started {
        activity.entry(package_id).or_default().last_review_started_at = at;
    }
    for (package_id, at) in commented {
        activity.entry(package_id).or_default().last_comment_at = at;
    }
    Ok(activity)
}

/// Convert package rows, resolving each package's review activity.
pub(crate) async fn packages_from_rows(
    conn: &mut AsyncPgConnection,
    rows: Vec<PackageRow>,
) -> Result<Vec<Package>, StoreFailure> {
    let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
    let activity = review_activity(conn, &ids).await?;
    rows.into_iter()
        .map(|row| {
            let resolved = activity.get(&row.id).copied().unwrap_or_default();
            package_from_row(row, resolved)
        })
        .collect()
}

/// Convert review rows, attaching package names, reviewers and the latest
/// comment date. Input order is preserved.
pub(crate) async fn reviews_from_rows(
    conn: &mut AsyncPgConnection,
    rows: Vec<ReviewRow>,
) -> Result<Vec<Review>, StoreFailure> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let review_ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
    let package_ids: Vec<i32> = rows.iter().map(|row| row.package_id).collect();

    let names: HashMap<i32, String> = packages::table
        .filter(packages::id.eq_any(&package_ids))
        .select((packages::id, packages::name))
        .load::<(i32, String)>(conn)
        .await?
        .into_iter()
        .collect();
    let assignments: Vec<(i32, String)> = reviewers::table
        .filter(reviewers::review_id.eq_any(&review_ids))
        .order((reviewers::review_id, reviewers::reviewer_name))
        .select((reviewers::review_id, reviewers::reviewer_name))
        .load(conn)
        .await?;
    let last_comments: HashMap<i32, Option<DateTime<Utc>>> = comments::table
        .filter(comments::review_id.eq_any(&review_ids))
        .group_by(comments::review_id)
        .select((comments::review_id, max(comments::date)))
        .load::<(i32, Option<DateTime<Utc>>)>(conn)
        .await?
        .into_iter()
        .collect();

    let mut reviewers_by_review: HashMap<i32, Vec<Username>> = HashMap::new();
    for (review_id, name) in assignments {
        reviewers_by_review
            .entry(review_id)
            .or_default()
            .push(stored_username(name)?);
    }

    rows.into_iter()
        .map(|row| {
            let package_name = names.get(&row.package_id).cloned().ok_or_else(|| {
                StoreFailure::Query(format!("review {} references a missing package", row.id))
            })?;
            Ok(Review {
                id: ReviewId::new(row.id),
                package_id: PackageId::new(row.package_id),
                package_name: stored_package_name(package_name)?,
                commit_id: row.commit_id,
                date_start: row.date_start,
                date_end: row.date_end,
                reviewers: reviewers_by_review.remove(&row.id).unwrap_or_default(),
                last_comment_at: last_comments.get(&row.id).copied().flatten(),
            })
        })
        .collect()
}

/// Attach each review's comments, oldest first.
pub(crate) async fn review_threads(
    conn: &mut AsyncPgConnection,
    reviews: Vec<Review>,
) -> Result<Vec<ReviewThread>, StoreFailure> {
    if reviews.is_empty() {
        return Ok(Vec::new());
    }
    let review_ids: Vec<i32> = reviews.iter().map(|review| review.id.get()).collect();
    let rows: Vec<CommentRow> = comments::table
        .filter(comments::review_id.eq_any(&review_ids))
        .order((comments::date.asc(), comments::id.asc()))
        .select(CommentRow::as_select())
        .load(conn)
        .await?;

    let mut by_review: HashMap<i32, Vec<Comment>> = HashMap::new();
    for row in rows {
        by_review.entry(row.review_id).or_default().push(comment_from_row(row)?);
    }
    Ok(reviews
        .into_iter()
        .map(|review| ReviewThread {
            comments: by_review.remove(&review.id.get()).unwrap_or_default(),
            review,
        })
        .collect())
}

fn comment_from_row(row: CommentRow) -> Result<Comment, StoreFailure> {
    Ok(Comment {
        author: stored_username(row.author)?,
        body: row.body,
        date: row.date,
    })
}
