//! Driving port for submitting new packages.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    Error, FlashMessage, NewPackageForm, NewPackageFormView, Package, RedirectTarget, Username,
};

/// Submission by an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPackageRequest {
    pub owner: Username,
    pub form: NewPackageForm,
}

/// Result of a submission whose form validated.
///
/// A failed commit is not an [`Error`]: the submitter gets their form back,
/// together with the distribution choices, under a `danger` flash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// The package was stored.
    Created {
        package: Package,
        flash: FlashMessage,
        redirect: RedirectTarget,
    },
    /// Storing the package failed.
    Failed {
        form: NewPackageForm,
        choices: NewPackageFormView,
        flash: FlashMessage,
    },
}

impl SubmissionOutcome {
    /// Flash message to show the submitter.
    pub fn flash(&self) -> &FlashMessage {
        match self {
            Self::Created { flash, .. } | Self::Failed { flash, .. } => flash,
        }
    }

    /// Where the client should navigate next, if anywhere.
    pub fn redirect(&self) -> Option<&RedirectTarget> {
        match self {
            Self::Created { redirect, .. } => Some(redirect),
            Self::Failed { .. } => None,
        }
    }
}

/// Domain use-case port for package submission.
#[async_trait]
pub trait PackageSubmissionCommand: Send + Sync {
    /// Blank form with distribution choices and defaults.
    async fn new_package_form(&self) -> Result<NewPackageFormView, Error>;

    /// Validate and store a new package.
    ///
    /// Validation failures return `invalid_request` errors with per-field
    /// details.
    async fn submit(&self, request: SubmitPackageRequest) -> Result<SubmissionOutcome, Error>;
}

/// Submission port used when no database is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePackageSubmissionCommand;

#[async_trait]
impl PackageSubmissionCommand for FixturePackageSubmissionCommand {
    async fn new_package_form(&self) -> Result<NewPackageFormView, Error> {
        Ok(NewPackageFormView::new(Vec::new()))
    }

    async fn submit(&self, _request: SubmitPackageRequest) -> Result<SubmissionOutcome, Error> {
        Err(Error::service_unavailable(
            "package submission requires a configured database",
        ))
    }
}
