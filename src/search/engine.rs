//! Path Search Engine
//!
//! Case-insensitive substring or prefix search over a `TreeNode`. When a key
//! matches, its path is recorded and its subtree is not searched further, so a
//! broad query (a project name, say) hides deeper matches beneath it. The
//! root's children are searched in parallel on a bounded pool; deeper levels
//! are searched sequentially inside each worker.

use super::path::NodePath;
use crate::concurrency::BoundedPool;
use crate::error::ApiError;
use crate::tree::node::TreeNode;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// How a key is compared against the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    #[default]
    Contains,
    StartsWith,
}

impl MatchMode {
    pub fn toggled(self) -> Self {
        match self {
            MatchMode::Contains => MatchMode::StartsWith,
            MatchMode::StartsWith => MatchMode::Contains,
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Contains => f.write_str("contains"),
            MatchMode::StartsWith => f.write_str("starts_with"),
        }
    }
}

/// A lower-cased query and its match mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
    mode: MatchMode,
}

impl SearchQuery {
    pub fn new(text: &str, mode: MatchMode) -> Self {
        Self {
            needle: text.to_lowercase(),
            mode,
        }
    }

    /// The lower-cased query text
    pub fn text(&self) -> &str {
        &self.needle
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether `key`, lower-cased, satisfies the query. Empty queries match everything.
    pub fn matches(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        match self.mode {
            MatchMode::Contains => key.contains(&self.needle),
            MatchMode::StartsWith => key.starts_with(&self.needle),
        }
    }
}

/// Search the children of `node`, whose own path is `prefix`, appending hits to `found`.
fn search_children<'t>(
    node: &'t TreeNode,
    query: &SearchQuery,
    prefix: &mut Vec<&'t str>,
    found: &mut Vec<NodePath>,
) {
    for (key, child) in node.iter() {
        search_entry(key, child, query, prefix, found);
    }
}

fn search_entry<'t>(
    key: &'t str,
    child: &'t TreeNode,
    query: &SearchQuery,
    prefix: &mut Vec<&'t str>,
    found: &mut Vec<NodePath>,
) {
    prefix.push(key);
    if query.matches(key) {
        found.push(prefix.iter().copied().collect());
    } else {
        search_children(child, query, prefix, found);
    }
    prefix.pop();
}

/// Single-threaded search over the whole tree
pub fn search_sequential(root: &TreeNode, query: &SearchQuery) -> Vec<NodePath> {
    let mut found = Vec::new();
    search_children(root, query, &mut Vec::new(), &mut found);
    found
}

/// Search one top-level entry of `root` and everything under it
fn search_top_level(root: &TreeNode, index: usize, query: &SearchQuery) -> Vec<NodePath> {
    let mut found = Vec::new();
    if let Some((key, child)) = root.get_index(index) {
        search_entry(key, child, query, &mut Vec::new(), &mut found);
    }
    found
}

/// Parallel search engine over a shared, immutable tree
pub struct PathSearchEngine {
    pool: BoundedPool,
}

impl PathSearchEngine {
    /// Create an engine with `workers` concurrent workers; zero means available parallelism
    pub fn new(workers: usize) -> Self {
        Self {
            pool: BoundedPool::new(workers),
        }
    }

    pub fn workers(&self) -> usize {
        self.pool.size()
    }

    /// Return every path whose terminal key matches `query`.
    ///
    /// Each top-level child is one job with its own result buffer; buffers are
    /// concatenated in child order, so output order is stable across runs.
    /// Duplicate keys under different parents yield separate paths.
    pub async fn search(
        &self,
        root: &Arc<TreeNode>,
        query: &SearchQuery,
    ) -> Result<Vec<NodePath>, ApiError> {
        if root.is_empty() {
            return Ok(Vec::new());
        }

        let jobs: Vec<_> = (0..root.len())
            .map(|index| {
                let root = Arc::clone(root);
                let query = query.clone();
                move || search_top_level(&root, index, &query)
            })
            .collect();

        let buffers = self.pool.run_ordered(jobs).await?;
        let found: Vec<NodePath> = buffers.into_iter().flatten().collect();
        debug!(
            query = %query.text(),
            mode = %query.mode(),
            matches = found.len(),
            "Search complete"
        );
        Ok(found)
    }
}

impl Default for PathSearchEngine {
    fn default() -> Self {
        Self::new(0)
    }
}
