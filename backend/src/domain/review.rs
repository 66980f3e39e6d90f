//! Reviews of submitted packages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{PackageId, PackageName, Username};

/// Database surrogate key for a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = i32)]
pub struct ReviewId(i32);

impl ReviewId {
    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// One review round of a package.
///
/// `reviewers` lists everyone assigned to the review; `last_comment_at` is
/// the date of the newest comment, `None` until somebody comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub package_id: PackageId,
    pub package_name: PackageName,
    /// Source control revision under review.
    pub commit_id: Option<String>,
    pub date_start: DateTime<Utc>,
    pub date_end: Option<DateTime<Utc>>,
    pub reviewers: Vec<Username>,
    pub last_comment_at: Option<DateTime<Utc>>,
}

/// A comment left on a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub author: Username,
    pub body: String,
    pub date: DateTime<Utc>,
}

/// A review together with its comments, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReviewThread {
    #[serde(flatten)]
    pub review: Review,
    pub comments: Vec<Comment>,
}
