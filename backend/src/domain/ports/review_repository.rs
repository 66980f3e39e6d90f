//! Port abstraction for review persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Review, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by review repository adapters.
    pub enum ReviewRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "review repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } => "review repository query failed: {message}",
    }
}

/// Port for reading reviews.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Distinct reviews with at least one comment, most recently commented
    /// first, at most `limit`.
    async fn recently_commented(&self, limit: usize) -> Result<Vec<Review>, ReviewRepositoryError>;

    /// Reviews `reviewer` takes part in, oldest start date first.
    async fn list_by_reviewer(
        &self,
        reviewer: &Username,
    ) -> Result<Vec<Review>, ReviewRepositoryError>;
}
