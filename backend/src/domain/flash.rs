//! User-facing status messages and redirect hints returned by commands.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::PackageName;

/// Presentation category of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlashCategory {
    Success,
    Danger,
}

/// Transient status message shown once after a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FlashMessage {
    #[schema(example = "Package successfully created!")]
    pub message: String,
    pub category: FlashCategory,
}

impl FlashMessage {
    /// Build a `success` message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            category: FlashCategory::Success,
        }
    }

    /// Build a `danger` message.
    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            category: FlashCategory::Danger,
        }
    }
}

/// Named view the client should navigate to next.
///
/// # Examples
/// ```
/// use fresque::domain::{PackageName, RedirectTarget};
///
/// let target = RedirectTarget::Package {
///     name: PackageName::new("bash").expect("valid name"),
/// };
/// assert_eq!(target.path(), "/api/v1/packages/bash");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "endpoint", rename_all = "snake_case")]
pub enum RedirectTarget {
    /// Package detail view.
    Package { name: PackageName },
}

impl RedirectTarget {
    /// API path of the target view.
    pub fn path(&self) -> String {
        match self {
            Self::Package { name } => format!("/api/v1/packages/{name}"),
        }
    }
}
