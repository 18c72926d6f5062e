//! Environment variable source: DEPTREE__ prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `DEPTREE__SEARCH__WORKERS=4` sets `search.workers`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("DEPTREE")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
