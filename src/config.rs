//! Engine-wide defaults

use serde::{Deserialize, Serialize};

/// Defaults applied when a call does not say otherwise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Create missing edge endpoints instead of failing with NotFound
    pub create_missing: bool,
    /// Let `add_node` replace the scores of an existing node
    pub overwrite_existing: bool,
    /// Check every child reference before collecting descendants
    pub validate_children: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            create_missing: true,
            overwrite_existing: true,
            validate_children: true,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject edges whose endpoints do not exist yet
    pub fn strict() -> Self {
        Self {
            create_missing: false,
            ..Self::default()
        }
    }

    pub fn with_create_missing(mut self, enable: bool) -> Self {
        self.create_missing = enable;
        self
    }

    pub fn with_overwrite_existing(mut self, enable: bool) -> Self {
        self.overwrite_existing = enable;
        self
    }

    pub fn with_validate_children(mut self, enable: bool) -> Self {
        self.validate_children = enable;
        self
    }
}
