//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and never
//! leave it; adapters convert them into domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{comments, distributions, package_distributions, packages, reviews};

/// Row struct for reading from the packages table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = packages)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PackageRow {
    pub id: i32,
    pub name: String,
    pub summary: String,
    pub description: String,
    pub owner: String,
    pub submitted: DateTime<Utc>,
    pub active: bool,
}

/// Insertable struct for creating package records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = packages)]
pub(crate) struct NewPackageRow<'a> {
    pub name: &'a str,
    pub summary: &'a str,
    pub description: &'a str,
    pub owner: &'a str,
    pub submitted: DateTime<Utc>,
    pub active: bool,
}

/// Row struct for reading from the distributions table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = distributions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DistributionRow {
    pub id: i32,
    pub name: String,
}

/// Insertable link between a package and a distribution.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = package_distributions)]
pub(crate) struct NewPackageDistributionRow {
    pub package_id: i32,
    pub distribution_id: i32,
}

/// Row struct for reading from the reviews table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReviewRow {
    pub id: i32,
    pub package_id: i32,
    pub commit_id: Option<String>,
    pub date_start: DateTime<Utc>,
    pub date_end: Option<DateTime<Utc>>,
}

/// Row struct for reading from the comments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CommentRow {
    pub review_id: i32,
    pub author: String,
    pub body: String,
    pub date: DateTime<Utc>,
}
