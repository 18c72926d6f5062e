//! Scan and search configuration sections.

use crate::config::xdg;
use crate::error::ApiError;
use crate::search::MatchMode;
use crate::session::SessionOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_true() -> bool {
    true
}

fn default_dotnet() -> String {
    "dotnet".to_string()
}

/// Scan configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Snapshot directory; None means `$XDG_DATA_HOME/deptree/scans`
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Also keep a timestamped copy of every scan
    #[serde(default = "default_true")]
    pub save_permanent: bool,

    /// Program used to generate dependency graphs
    #[serde(default = "default_dotnet")]
    pub dotnet: String,
}

impl ScanConfig {
    /// Resolve the snapshot directory to an actual filesystem location.
    pub fn resolve_output_dir(&self) -> Result<PathBuf, ApiError> {
        match &self.output_dir {
            Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.clone()),
            _ => xdg::default_snapshot_dir(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            save_permanent: default_true(),
            dotnet: default_dotnet(),
        }
    }
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Concurrent search workers; 0 means available parallelism
    #[serde(default)]
    pub workers: usize,

    /// Start sessions with shortened paths
    #[serde(default = "default_true")]
    pub short_paths: bool,

    /// Start sessions in prefix-match mode
    #[serde(default)]
    pub starts_with: bool,
}

impl SearchConfig {
    pub fn match_mode(&self) -> MatchMode {
        if self.starts_with {
            MatchMode::StartsWith
        } else {
            MatchMode::Contains
        }
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            short_paths: self.short_paths,
            match_mode: self.match_mode(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            short_paths: default_true(),
            starts_with: false,
        }
    }
}
