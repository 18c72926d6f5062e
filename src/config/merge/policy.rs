//! Built-in defaults, the lowest-precedence layer.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("scan.save_permanent", true)?
        .set_default("scan.dotnet", "dotnet")?
        .set_default("search.workers", 0)?
        .set_default("search.short_paths", true)?
        .set_default("search.starts_with", false)
}
