//! Packages submitted for review.
//!
//! A package is owned by the user who submitted it and targets one or more
//! distributions. Its `last_review_activity` is derived from the reviews
//! attached to it; see [`ReviewActivity::resolve`].

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Distribution, ReviewThread, Username};

/// Maximum allowed length for a package name.
pub const PACKAGE_NAME_MAX: usize = 255;

/// Database surrogate key for a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = i32)]
pub struct PackageId(i32);

impl PackageId {
    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Validation errors returned by [`PackageName::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackageNameValidationError {
    #[error("package name must not be empty")]
    Empty,
    #[error("package name must be at most {max} characters")]
    TooLong { max: usize },
    #[error(
        "package name must start with a letter or digit and contain only letters, digits, '.', '_', '+' or '-'"
    )]
    InvalidCharacters,
}

static PACKAGE_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn package_name_regex() -> &'static Regex {
    PACKAGE_NAME_RE.get_or_init(|| match Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._+-]*$") {
        Ok(re) => re,
        Err(err) => panic!("package name regex failed to compile: {err}"),
    })
}

/// Validated, unique package name.
///
/// # Examples
/// ```
/// use fresque::domain::PackageName;
///
/// assert!(PackageName::new("python-requests").is_ok());
/// assert!(PackageName::new("-leading-dash").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "python-requests")]
pub struct PackageName(String);

impl PackageName {
    /// Validate and construct a [`PackageName`].
    pub fn new(value: impl Into<String>) -> Result<Self, PackageNameValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(PackageNameValidationError::Empty);
        }
        if value.chars().count() > PACKAGE_NAME_MAX {
            return Err(PackageNameValidationError::TooLong {
                max: PACKAGE_NAME_MAX,
            });
        }
        if !package_name_regex().is_match(&value) {
            return Err(PackageNameValidationError::InvalidCharacters);
        }
        Ok(Self(value))
    }
}

impl AsRef<str> for PackageName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PackageName> for String {
    fn from(value: PackageName) -> Self {
        value.0
    }
}

impl TryFrom<String> for PackageName {
    type Error = PackageNameValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Review timestamps aggregated per package by persistence adapters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewActivity {
    /// Most recent comment on any of the package's reviews.
    pub last_comment_at: Option<DateTime<Utc>>,
    /// Most recent review start date.
    pub last_review_started_at: Option<DateTime<Utc>>,
}

impl ReviewActivity {
    /// Resolve the package's last review activity.
    ///
    /// Comments win over review start dates, which win over the submission
    /// time of a package nobody has reviewed yet.
    ///
    /// # Examples
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use fresque::domain::ReviewActivity;
    ///
    /// let submitted = Utc.with_ymd_and_hms(2015, 1, 1, 0, 0, 0).unwrap();
    /// assert_eq!(ReviewActivity::default().resolve(submitted), submitted);
    /// ```
    pub fn resolve(self, submitted: DateTime<Utc>) -> DateTime<Utc> {
        self.last_comment_at
            .or(self.last_review_started_at)
            .unwrap_or(submitted)
    }
}

/// A package submitted for review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: PackageId,
    pub name: PackageName,
    pub summary: String,
    pub description: String,
    pub owner: Username,
    pub submitted: DateTime<Utc>,
    /// Inactive packages are retired or abandoned and hidden from listings.
    pub active: bool,
    pub last_review_activity: DateTime<Utc>,
}

/// Sort packages by last review activity, oldest first.
///
/// The sort is stable, so packages with identical activity keep the order
/// the repository returned them in.
pub fn sort_by_review_activity(packages: &mut [Package]) {
    packages.sort_by_key(|package| package.last_review_activity);
}

/// A package together with its distributions and reviews.
///
/// Reviews are ordered by start date and carry their comment threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetail {
    pub package: Package,
    pub distributions: Vec<Distribution>,
    pub reviews: Vec<ReviewThread>,
}

/// Validated package ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPackage {
    pub name: PackageName,
    pub summary: String,
    pub description: String,
    pub owner: Username,
    pub submitted: DateTime<Utc>,
}
