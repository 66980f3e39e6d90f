//! New package submission service implementing [`PackageSubmissionCommand`].
//!
//! Form validation failures surface as `invalid_request` errors. Once the
//! form is valid, storage failures of any kind are reported to the submitter
//! through a `danger` flash instead of an error response. A taken name is
//! logged as a warning; store outages are logged as errors.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{error, info, warn};

use crate::domain::ports::{
    DistributionRepository, DistributionRepositoryError, PackageRepository,
    PackageRepositoryError, PackageSubmissionCommand, SubmissionOutcome, SubmitPackageRequest,
};
use crate::domain::{
    Distribution, Error, FlashMessage, NewPackage, NewPackageFormView, RedirectTarget,
};

/// Flash shown after a package is stored.
pub const PACKAGE_CREATED_MESSAGE: &str = "Package successfully created!";
/// Flash shown when storing a package fails.
pub const PACKAGE_NOT_STORED_MESSAGE: &str =
    "An error occurred while adding your package, please contact an administrator.";

/// Submission service backed by package and distribution repositories.
#[derive(Clone)]
pub struct PackageSubmissionService<P, D> {
    packages: Arc<P>,
    distributions: Arc<D>,
    clock: Arc<dyn Clock>,
}

impl<P, D> PackageSubmissionService<P, D> {
    /// Create a new service; `clock` stamps the submission time.
    pub fn new(packages: Arc<P>, distributions: Arc<D>, clock: Arc<dyn Clock>) -> Self {
        Self {
            packages,
            distributions,
            clock,
        }
    }
}

fn map_distribution_error(error: DistributionRepositoryError) -> Error {
    match error {
        DistributionRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("distribution repository unavailable: {message}"))
        }
        DistributionRepositoryError::Query { message } => {
            Error::internal(format!("distribution repository error: {message}"))
        }
    }
}

impl<P, D> PackageSubmissionService<P, D>
where
    D: DistributionRepository,
{
    async fn distribution_choices(&self) -> Result<Vec<Distribution>, Error> {
        self.distributions
            .list_all()
            .await
            .map_err(map_distribution_error)
    }
}

fn log_store_failure(err: &PackageRepositoryError, new_package: &NewPackage) {
    match err {
        PackageRepositoryError::DuplicateName { .. } => warn!(
            error = %err,
            package = %new_package.name,
            owner = %new_package.owner,
            "package name already taken"
        ),
        PackageRepositoryError::Connection { .. } | PackageRepositoryError::Query { .. } => {
            error!(
                error = %err,
                package = %new_package.name,
                owner = %new_package.owner,
                "failed to store new package"
            );
        }
    }
}

#[async_trait]
impl<P, D> PackageSubmissionCommand for PackageSubmissionService<P, D>
where
    P: PackageRepository,
    D: DistributionRepository,
{
    async fn new_package_form(&self) -> Result<NewPackageFormView, Error> {
        Ok(NewPackageFormView::new(self.distribution_choices().await?))
    }

    async fn submit(&self, request: SubmitPackageRequest) -> Result<SubmissionOutcome, Error> {
        let SubmitPackageRequest { owner, form } = request;
        let choices = self.distribution_choices().await?;
        let valid = form.validate(&choices)?;

        let new_package = NewPackage {
            name: valid.name,
            summary: valid.summary,
            description: valid.description,
            owner,
            submitted: self.clock.utc(),
        };

        match self.packages.create(&new_package, &valid.distributions).await {
            Ok(package) => {
                info!(package = %package.name, owner = %package.owner, "package submitted");
                Ok(SubmissionOutcome::Created {
                    redirect: RedirectTarget::Package {
                        name: package.name.clone(),
                    },
                    flash: FlashMessage::success(PACKAGE_CREATED_MESSAGE),
                    package,
                })
            }
            Err(err) => {
                log_store_failure(&err, &new_package);
                Ok(SubmissionOutcome::Failed {
                    form,
                    choices: NewPackageFormView::new(choices),
                    flash: FlashMessage::danger(PACKAGE_NOT_STORED_MESSAGE),
                })
            }
        }
    }
}
