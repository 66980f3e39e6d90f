//! In-memory repository adapters mirroring the PostgreSQL ones.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use mockable::Clock;

use fresque::domain::ports::{
    DistributionRepository, DistributionRepositoryError, PackageRepository,
    PackageRepositoryError, ReviewRepository, ReviewRepositoryError,
};
use fresque::domain::{
    Comment, Distribution, DistributionId, NewPackage, Package, PackageDetail, PackageId,
    PackageName, Review, ReviewActivity, ReviewId, ReviewThread, Username,
};

#[derive(Debug, Clone)]
struct StoredPackage {
    id: i32,
    name: PackageName,
    summary: String,
    description: String,
    owner: Username,
    submitted: DateTime<Utc>,
    active: bool,
    distributions: Vec<DistributionId>,
}

#[derive(Debug, Clone)]
struct StoredReview {
    id: i32,
    package_id: i32,
    date_start: DateTime<Utc>,
    reviewers: Vec<Username>,
    comments: Vec<Comment>,
}

#[derive(Debug, Default)]
struct Tables {
    distributions: Vec<Distribution>,
    packages: Vec<StoredPackage>,
    reviews: Vec<StoredReview>,
}

/// Shared tables behind every in-memory repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    /// Store seeded with the three distributions the migrations insert.
    pub fn seeded() -> Self {
        let store = Self::default();
        store.lock().distributions = ["Fedora Rawhide", "Fedora 22", "EPEL 7"]
            .into_iter()
            .zip(1..)
            .map(|(name, id)| Distribution {
                id: DistributionId::new(id),
                name: name.to_owned(),
            })
            .collect();
        store
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("in-memory store lock")
    }

    /// Insert a package directly, bypassing the submission flow.
    pub fn insert_package(&self, name: &str, owner: &str, submitted: DateTime<Utc>, active: bool) -> i32 {
        let mut tables = self.lock();
        let id = next_id(tables.packages.iter().map(|p| p.id));
        tables.packages.push(StoredPackage {
            id,
            name: PackageName::new(name).expect("valid package name"),
            summary: format!("{name} summary"),
            description: String::new(),
            owner: Username::new(owner).expect("valid owner"),
            submitted,
            active,
            distributions: Vec::new(),
        });
        id
    }

    /// Open a review on a package with the given reviewers.
    pub fn insert_review(&self, package_id: i32, date_start: DateTime<Utc>, reviewers: &[&str]) -> i32 {
        let mut tables = self.lock();
        let id = next_id(tables.reviews.iter().map(|r| r.id));
        tables.reviews.push(StoredReview {
            id,
            package_id,
            date_start,
            reviewers: reviewers
                .iter()
                .map(|name| Username::new(*name).expect("valid reviewer"))
                .collect(),
            comments: Vec::new(),
        });
        id
    }

    /// Record a comment on a review.
    pub fn comment(&self, review_id: i32, author: &str, body: &str, at: DateTime<Utc>) {
        let mut tables = self.lock();
        let review = tables
            .reviews
            .iter_mut()
            .find(|r| r.id == review_id)
            .expect("review exists");
        review.comments.push(Comment {
            author: Username::new(author).expect("valid comment author"),
            body: body.to_owned(),
            date: at,
        });
    }
}

impl StoredReview {
    fn last_comment_at(&self) -> Option<DateTime<Utc>> {
        self.comments.iter().map(|c| c.date).max()
    }
}

fn next_id(ids: impl Iterator<Item = i32>) -> i32 {
    ids.max().unwrap_or(0) + 1
}

impl Tables {
    fn activity(&self, package_id: i32) -> ReviewActivity {
        let reviews = self.reviews.iter().filter(|r| r.package_id == package_id);
        ReviewActivity {
            last_comment_at: reviews.clone().filter_map(StoredReview::last_comment_at).max(),
            last_review_started_at: reviews.map(|r| r.date_start).max(),
        }
    }

    fn to_package(&self, stored: &StoredPackage) -> Package {
        Package {
            id: PackageId::new(stored.id),
            name: stored.name.clone(),
            summary: stored.summary.clone(),
            description: stored.description.clone(),
            owner: stored.owner.clone(),
            submitted: stored.submitted,
            active: stored.active,
            last_review_activity: self.activity(stored.id).resolve(stored.submitted),
        }
    }

    fn to_review(&self, stored: &StoredReview) -> Review {
        let package_name = self
            .packages
            .iter()
            .find(|p| p.id == stored.package_id)
            .map(|p| p.name.clone())
            .expect("review package exists");
        let mut reviewers = stored.reviewers.clone();
        reviewers.sort();
        Review {
            id: ReviewId::new(stored.id),
            package_id: PackageId::new(stored.package_id),
            package_name,
            commit_id: None,
            date_start: stored.date_start,
            date_end: None,
            reviewers,
            last_comment_at: stored.last_comment_at(),
        }
    }

    fn newest_active(&self, keep: impl Fn(&StoredPackage) -> bool, limit: usize) -> Vec<Package> {
        let mut selected: Vec<&StoredPackage> =
            self.packages.iter().filter(|p| p.active && keep(p)).collect();
        selected.sort_by(|a, b| b.submitted.cmp(&a.submitted).then(b.id.cmp(&a.id)));
        selected
            .into_iter()
            .take(limit)
            .map(|p| self.to_package(p))
            .collect()
    }
}

#[async_trait]
impl PackageRepository for InMemoryStore {
    async fn recent_active(&self, limit: usize) -> Result<Vec<Package>, PackageRepositoryError> {
        Ok(self.lock().newest_active(|_| true, limit))
    }

    async fn active_without_reviews(
        &self,
        limit: usize,
    ) -> Result<Vec<Package>, PackageRepositoryError> {
        let tables = self.lock();
        let reviewed: BTreeSet<i32> = tables.reviews.iter().map(|r| r.package_id).collect();
        Ok(tables.newest_active(|p| !reviewed.contains(&p.id), limit))
    }

    async fn list_active(&self) -> Result<Vec<Package>, PackageRepositoryError> {
        let tables = self.lock();
        Ok(tables
            .packages
            .iter()
            .filter(|p| p.active)
            .map(|p| tables.to_package(p))
            .collect())
    }

    async fn find_by_name(
        &self,
        name: &PackageName,
    ) -> Result<Option<PackageDetail>, PackageRepositoryError> {
        let tables = self.lock();
        let Some(stored) = tables.packages.iter().find(|p| &p.name == name) else {
            return Ok(None);
        };
        let mut reviews: Vec<&StoredReview> = tables
            .reviews
            .iter()
            .filter(|r| r.package_id == stored.id)
            .collect();
        reviews.sort_by_key(|r| (r.date_start, r.id));
        Ok(Some(PackageDetail {
            package: tables.to_package(stored),
            distributions: tables
                .distributions
                .iter()
                .filter(|d| stored.distributions.contains(&d.id))
                .cloned()
                .collect(),
            reviews: reviews
                .into_iter()
                .map(|r| {
                    let mut comments = r.comments.clone();
                    comments.sort_by_key(|c| c.date);
                    ReviewThread {
                        review: tables.to_review(r),
                        comments,
                    }
                })
                .collect(),
        }))
    }

    async fn list_by_owner(&self, owner: &Username) -> Result<Vec<Package>, PackageRepositoryError> {
        let tables = self.lock();
        Ok(tables
            .packages
            .iter()
            .filter(|p| &p.owner == owner)
            .map(|p| tables.to_package(p))
            .collect())
    }

    async fn create(
        &self,
        package: &NewPackage,
        distributions: &[DistributionId],
    ) -> Result<Package, PackageRepositoryError> {
        let mut tables = self.lock();
        if tables.packages.iter().any(|p| p.name == package.name) {
            return Err(PackageRepositoryError::duplicate_name(package.name.as_ref()));
        }
        let known: Vec<DistributionId> = distributions
            .iter()
            .copied()
            .filter(|id| tables.distributions.iter().any(|d| d.id == *id))
            .collect();
        let stored = StoredPackage {
            id: next_id(tables.packages.iter().map(|p| p.id)),
            name: package.name.clone(),
            summary: package.summary.clone(),
            description: package.description.clone(),
            owner: package.owner.clone(),
            submitted: package.submitted,
            active: true,
            distributions: known,
        };
        let created = tables.to_package(&stored);
        tables.packages.push(stored);
        Ok(created)
    }
}

#[async_trait]
impl ReviewRepository for InMemoryStore {
    async fn recently_commented(&self, limit: usize) -> Result<Vec<Review>, ReviewRepositoryError> {
        let tables = self.lock();
        let mut commented: Vec<(DateTime<Utc>, &StoredReview)> = tables
            .reviews
            .iter()
            .filter_map(|r| r.last_comment_at().map(|at| (at, r)))
            .collect();
        commented.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.id.cmp(&a.1.id)));
        Ok(commented
            .into_iter()
            .take(limit)
            .map(|(_, r)| tables.to_review(r))
            .collect())
    }

    async fn list_by_reviewer(
        &self,
        reviewer: &Username,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        let tables = self.lock();
        let mut reviews: Vec<&StoredReview> = tables
            .reviews
            .iter()
            .filter(|r| r.reviewers.contains(reviewer))
            .collect();
        reviews.sort_by_key(|r| (r.date_start, r.id));
        Ok(reviews.into_iter().map(|r| tables.to_review(r)).collect())
    }
}

#[async_trait]
impl DistributionRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Distribution>, DistributionRepositoryError> {
        Ok(self.lock().distributions.clone())
    }
}

/// Clock frozen at a fixed instant.
pub struct FrozenClock(pub DateTime<Utc>);

impl Clock for FrozenClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}
