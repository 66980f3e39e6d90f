//! Shared builders for domain unit tests.

use chrono::{DateTime, TimeZone, Utc};

use super::{
    Distribution, DistributionId, Package, PackageId, PackageName, Review, ReviewId,
    ReviewThread, Username,
};

pub(crate) fn timestamp(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 6, day, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub(crate) fn username(raw: &str) -> Username {
    Username::new(raw).expect("valid fixture username")
}

pub(crate) fn package(id: i32, name: &str, last_review_activity: DateTime<Utc>) -> Package {
    Package {
        id: PackageId::new(id),
        name: PackageName::new(name).expect("valid fixture package name"),
        summary: format!("{name} summary"),
        description: String::new(),
        owner: username("pingou"),
        submitted: timestamp(1),
        active: true,
        last_review_activity,
    }
}

pub(crate) fn review(id: i32, package_id: i32, package_name: &str, date_start: DateTime<Utc>) -> Review {
    Review {
        id: ReviewId::new(id),
        package_id: PackageId::new(package_id),
        package_name: PackageName::new(package_name).expect("valid fixture package name"),
        commit_id: None,
        date_start,
        date_end: None,
        reviewers: vec![username("ralph")],
        last_comment_at: None,
    }
}

/// A review with no comments yet.
pub(crate) fn thread(review: Review) -> ReviewThread {
    ReviewThread {
        review,
        comments: Vec::new(),
    }
}

pub(crate) fn distributions() -> Vec<Distribution> {
    vec![
        Distribution {
            id: DistributionId::new(1),
            name: "Fedora Rawhide".to_owned(),
        },
        Distribution {
            id: DistributionId::new(2),
            name: "EPEL 7".to_owned(),
        },
    ]
}
