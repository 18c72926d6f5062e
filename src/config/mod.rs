//! Configuration
//!
//! Layered settings for scanning, searching, and logging, merged by the
//! `config` crate from defaults, a global TOML file, an explicit file, and
//! `DEPTREE__*` environment variables.

mod facade;
pub mod merge;
pub mod paths;
mod sections;
pub mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;
pub use sections::{ScanConfig, SearchConfig};

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Fully merged configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeptreeConfig {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DeptreeConfig {
    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, crate::error::ApiError> {
        toml::to_string_pretty(self).map_err(|e| {
            crate::error::ApiError::ConfigError(format!("Failed to render config: {}", e))
        })
    }
}
