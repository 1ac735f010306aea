//! Builder configuration
//!
//! ```toml
//! reorder_policy = "clamp"
//! validate_edits = true
//! fallback_route = "/projects"
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::store::ReorderPolicy;

/// Route the builder redirects to when opened without a template
pub const DEFAULT_FALLBACK_ROUTE: &str = "/projects";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    /// Out-of-range handling for block moves
    pub reorder_policy: ReorderPolicy,
    /// Reject edits that would make the flow fail validation
    pub validate_edits: bool,
    pub fallback_route: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            reorder_policy: ReorderPolicy::Ignore,
            validate_edits: false,
            fallback_route: DEFAULT_FALLBACK_ROUTE.to_string(),
        }
    }
}

impl BuilderConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(source)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read builder config {}", path.display()))?;
        let config = Self::from_toml_str(&source)
            .with_context(|| format!("Failed to parse builder config {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "Loaded builder config");
        Ok(config)
    }
}
