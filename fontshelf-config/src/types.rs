//! Enum settings shared by the config sections.

use serde::{Deserialize, Serialize};

/// What a lazily loaded font does after its typeface loader fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Keep the loader and invoke it again on the next access.
    #[default]
    Retry,
    /// Remember the first failure and report it on every later access.
    Cache,
}

impl FailurePolicy {
    pub fn display_name(&self) -> &'static str {
        match self {
            FailurePolicy::Retry => "retry",
            FailurePolicy::Cache => "cache",
        }
    }
}
