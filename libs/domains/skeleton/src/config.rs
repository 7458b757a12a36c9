use serde::{Deserialize, Serialize};

use crate::error::{SkeletonError, SkeletonResult};

pub const DEFAULT_MAX_ITEMS: i64 = 100;

/// Upper bound accepted for `max_items`.
pub const MAX_ITEMS_LIMIT: i64 = 1000;

/// Runtime settings of the skeleton module.
///
/// Deserializes with defaults for missing fields and rejects unknown ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkeletonConfig {
    /// Register the HTTP endpoints at all
    pub enabled: bool,
    /// Largest page a list request may return
    pub max_items: i64,
}

impl Default for SkeletonConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_items: DEFAULT_MAX_ITEMS,
        }
    }
}

impl SkeletonConfig {
    pub fn validate(&self) -> SkeletonResult<()> {
        if self.max_items < 1 {
            return Err(SkeletonError::InvalidConfig(
                "max_items must be at least 1".to_string(),
            ));
        }
        if self.max_items > MAX_ITEMS_LIMIT {
            return Err(SkeletonError::InvalidConfig(format!(
                "max_items cannot exceed {}",
                MAX_ITEMS_LIMIT
            )));
        }
        Ok(())
    }
}
