//! MergeService: orchestrates sources, applies merge policy, deserializes to DeptreeConfig.

use crate::config::sources::{environment, explicit_file, global_file};
use crate::config::DeptreeConfig;
use config::ConfigError;
use std::path::Path;

use super::policy;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Load config from standard sources.
    /// Precedence: defaults (lowest) -> global file -> explicit file -> environment (highest).
    pub fn load(explicit: Option<&Path>) -> Result<DeptreeConfig, ConfigError> {
        let builder = policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = explicit_file::add_to_builder(builder, explicit)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load config from a single file with environment overlay, skipping the global file.
    pub fn load_from_file(path: &Path) -> Result<DeptreeConfig, ConfigError> {
        let builder = policy::builder_with_defaults()?;
        let builder = explicit_file::add_to_builder(builder, Some(path))?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
