use crate::error::ApiError;
use crate::graph::{DependencyGraph, LockData};
use std::path::Path;

/// Produces the dependency graph for a project or solution file.
///
/// Implementations may be slow; the scanned project must already have been
/// built for the graph to be complete.
pub trait GraphResolver: Send + Sync {
    fn resolve_graph(&self, path: &Path) -> Result<DependencyGraph, ApiError>;
}

/// Loads the resolved lock data written by a project's last restore.
pub trait LockDataLoader: Send + Sync {
    fn load_lock_data(&self, project_file: &Path, output_path: &Path)
        -> Result<LockData, ApiError>;
}
