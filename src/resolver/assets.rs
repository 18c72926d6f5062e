//! `project.assets.json` lock data loader.

use super::contract::LockDataLoader;
use crate::error::{ApiError, ResolveError};
use crate::graph::framework::split_runtime;
use crate::graph::{LockData, LockLibrary, LockTarget};
use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// File name NuGet restore writes into a project's output path
pub const ASSETS_FILE_NAME: &str = "project.assets.json";

#[derive(Debug, Deserialize)]
struct AssetsDocument {
    #[serde(default)]
    targets: IndexMap<String, IndexMap<String, AssetsLibrary>>,
}

#[derive(Debug, Deserialize)]
struct AssetsLibrary {
    #[serde(default)]
    dependencies: IndexMap<String, IgnoredAny>,
}

/// Split a `Name/Version` library key; a key without `/` has no version.
fn split_library_key(key: &str) -> (&str, &str) {
    key.rsplit_once('/').unwrap_or((key, ""))
}

/// Parse assets-file text into lock data
pub fn parse_assets(text: &str, source: &Path) -> Result<LockData, ResolveError> {
    let document: AssetsDocument =
        serde_json::from_str(text).map_err(|e| ResolveError::Parse {
            kind: "assets",
            path: source.to_path_buf(),
            source: e,
        })?;

    let targets = document
        .targets
        .into_iter()
        .map(|(key, libraries)| {
            let (framework, runtime) = split_runtime(&key);
            LockTarget {
                framework: framework.to_string(),
                runtime: runtime.map(str::to_string),
                libraries: libraries
                    .into_iter()
                    .map(|(key, library)| {
                        let (name, version) = split_library_key(&key);
                        LockLibrary {
                            name: name.to_string(),
                            version: version.to_string(),
                            dependencies: library.dependencies.into_keys().collect(),
                        }
                    })
                    .collect(),
            }
        })
        .collect();

    Ok(LockData { targets })
}

/// Loads `<output_path>/project.assets.json`
///
/// A project that was never restored has no assets file; that yields empty
/// lock data rather than an error.
pub struct AssetsFileLoader;

impl LockDataLoader for AssetsFileLoader {
    fn load_lock_data(
        &self,
        project_file: &Path,
        output_path: &Path,
    ) -> Result<LockData, ApiError> {
        let path = output_path.join(ASSETS_FILE_NAME);
        if !path.exists() {
            warn!(
                project = %project_file.display(),
                path = %path.display(),
                "No assets file found; has the project been built?"
            );
            return Ok(LockData::default());
        }
        let text = std::fs::read_to_string(&path).map_err(|e| ResolveError::Read {
            path: path.clone(),
            source: e,
        })?;
        let lock = parse_assets(&text, &path)?;
        debug!(
            project = %project_file.display(),
            targets = lock.targets.len(),
            "Loaded lock data"
        );
        Ok(lock)
    }
}
