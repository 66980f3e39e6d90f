//! Target distributions a package can be reviewed for.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Database surrogate key for a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = i32)]
pub struct DistributionId(i32);

impl DistributionId {
    /// Wrap a raw identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// A distribution such as "Fedora Rawhide" or "EPEL 7".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Distribution {
    pub id: DistributionId,
    #[schema(example = "Fedora Rawhide")]
    pub name: String,
}
