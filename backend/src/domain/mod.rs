//! Domain primitives, aggregates and services.
//!
//! Types here are transport agnostic. Validation lives in constructors so
//! adapters only ever handle well-formed values; serialisation contracts are
//! documented on each type.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: API error payload and stable code.
//! - [`Package`], [`Review`], [`Distribution`]: catalogue aggregates.
//! - [`NewPackageForm`]: submission input and its validation.
//! - Services implementing the driving [`ports`].

pub mod auth;
pub mod catalogue_service;
pub mod distribution;
pub mod error;
pub mod flash;
pub mod new_package;
pub mod package;
pub mod ports;
pub mod review;
pub mod submission_service;
pub mod trace_id;
pub mod user_activity_service;
pub mod username;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::catalogue_service::{INDEX_SECTION_LIMIT, PackageCatalogueService};
pub use self::distribution::{Distribution, DistributionId};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::flash::{FlashCategory, FlashMessage, RedirectTarget};
pub use self::new_package::{
    FormErrors, NewPackageForm, NewPackageFormView, SUMMARY_MAX, ValidNewPackageForm,
};
pub use self::package::{
    NewPackage, PACKAGE_NAME_MAX, Package, PackageDetail, PackageId, PackageName,
    PackageNameValidationError, ReviewActivity, sort_by_review_activity,
};
pub use self::review::{Comment, Review, ReviewId, ReviewThread};
pub use self::submission_service::{
    PACKAGE_CREATED_MESSAGE, PACKAGE_NOT_STORED_MESSAGE, PackageSubmissionService,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user_activity_service::UserActivityService;
pub use self::username::{USERNAME_MAX, Username, UsernameValidationError};
