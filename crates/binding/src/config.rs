//! Shape registry configuration
//!
//! Loaded from TOML the same way a database reads its config file:
//!
//! ```toml
//! # Upper bound on cached shapes; omit for no bound
//! max_cached_shapes = 256
//! ```

use crate::error::{CapabilityError, Result};
use serde::{Deserialize, Serialize};

/// Settings for a [`ShapeRegistry`](crate::ShapeRegistry)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Maximum number of resolved shapes kept. `None` keeps every shape.
    ///
    /// When full, an arbitrary entry is evicted before a new one is added.
    /// `Some(0)` disables caching altogether.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cached_shapes: Option<usize>,
}

impl RegistryConfig {
    /// Config with a bound on cached shapes
    pub fn bounded(max_cached_shapes: usize) -> Self {
        RegistryConfig {
            max_cached_shapes: Some(max_cached_shapes),
        }
    }

    /// Parse from TOML text
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| CapabilityError::InvalidConfig {
            detail: e.to_string(),
        })
    }

    /// Default config file content, with comments
    pub fn default_toml() -> &'static str {
        r#"# Capability shape registry configuration
#
# Upper bound on cached shapes (default: unbounded).
# Evicted shapes are re-resolved on next use.
# max_cached_shapes = 256
"#
    }
}
