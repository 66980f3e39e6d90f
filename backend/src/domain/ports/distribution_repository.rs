//! Port abstraction for distribution persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::Distribution;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by distribution repository adapters.
    pub enum DistributionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "distribution repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "distribution repository query failed: {message}",
    }
}

/// Port for reading the distribution catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DistributionRepository: Send + Sync {
    /// Every distribution ordered by id.
    async fn list_all(&self) -> Result<Vec<Distribution>, DistributionRepositoryError>;
}
