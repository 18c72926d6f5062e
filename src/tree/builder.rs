//! Tree Builder
//!
//! Flattens a dependency graph plus per-project lock data into a nested
//! `TreeNode`: project → `[framework]` → `name, vVersion` → transitive packages.
//!
//! Lookup misses are not errors: a framework without lock data is emitted
//! empty, and an unresolved reference emits nothing. Shared dependencies
//! (diamonds) are expanded again under every parent. A library that reappears
//! among its own ancestors is reported as `BuildError::CycleDetected`, and a
//! chain reaching below `MAX_DEPTH` as `BuildError::TooDeep`.

use crate::error::{ApiError, BuildError};
use crate::graph::{DependencyGraph, LockLibrary, LockTarget, ProjectSpec, TargetFramework};
use crate::resolver::LockDataLoader;
use crate::tree::node::{TreeNode, MAX_DEPTH};
use crate::types::{framework_key, package_key, project_key};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Builds snapshot trees using a lock data loader
pub struct TreeBuilder<'a> {
    loader: &'a dyn LockDataLoader,
}

/// Key levels above the first package: project and framework
const PACKAGE_BASE_DEPTH: usize = 2;

/// Ancestor chain of the library currently being expanded
pub struct ExpansionPath<'a> {
    project: &'a str,
    framework: &'a str,
    chain: Vec<&'a LockLibrary>,
    names: HashSet<&'a str>,
}

impl<'a> ExpansionPath<'a> {
    pub fn new(project: &'a str, framework: &'a str) -> Self {
        Self {
            project,
            framework,
            chain: Vec::new(),
            names: HashSet::new(),
        }
    }

    fn push(&mut self, library: &'a LockLibrary) -> Result<(), BuildError> {
        if !self.names.insert(library.name.as_str()) {
            let mut chain: Vec<String> = self
                .chain
                .iter()
                .map(|l| package_key(&l.name, &l.version))
                .collect();
            chain.push(package_key(&library.name, &library.version));
            return Err(BuildError::CycleDetected {
                project: self.project.to_string(),
                framework: self.framework.to_string(),
                chain,
            });
        }
        if PACKAGE_BASE_DEPTH + self.chain.len() + 1 > MAX_DEPTH {
            self.names.remove(library.name.as_str());
            return Err(BuildError::TooDeep {
                project: self.project.to_string(),
                framework: self.framework.to_string(),
                limit: MAX_DEPTH,
            });
        }
        self.chain.push(library);
        Ok(())
    }

    fn pop(&mut self) {
        if let Some(library) = self.chain.pop() {
            self.names.remove(library.name.as_str());
        }
    }
}

/// Insert `child` unless the key already exists at this level; first wins.
fn insert_first_wins(parent: &mut TreeNode, key: String, child: TreeNode) {
    if parent.contains_key(&key) {
        warn!(key = %key, "Duplicate key at one level; keeping first occurrence");
        return;
    }
    let _ = parent.insert(key, child);
}

/// Emit the node for `library` and, recursively, its resolved dependencies.
///
/// Returns the node's key and subtree. Dependency references that do not
/// resolve in `target` are skipped.
pub fn report_dependency<'a>(
    library: &'a LockLibrary,
    target: &'a LockTarget,
    path: &mut ExpansionPath<'a>,
) -> Result<(String, TreeNode), BuildError> {
    path.push(library)?;
    let mut node = TreeNode::new();
    for dependency in &library.dependencies {
        match target.library(dependency) {
            Some(child) => {
                let (key, subtree) = report_dependency(child, target, path)?;
                insert_first_wins(&mut node, key, subtree);
            }
            None => {
                debug!(
                    library = %library.name,
                    dependency = %dependency,
                    "Unresolved dependency reference skipped"
                );
            }
        }
    }
    path.pop();
    Ok((package_key(&library.name, &library.version), node))
}

/// Build the `[framework]` subtree from its direct references
pub fn build_framework(
    project: &ProjectSpec,
    framework: &TargetFramework,
    target: Option<&LockTarget>,
) -> Result<TreeNode, BuildError> {
    let mut node = TreeNode::new();
    let Some(target) = target else {
        debug!(
            project = %project.name,
            framework = %framework.name,
            "No lock data for framework; emitting empty node"
        );
        return Ok(node);
    };

    for reference in &framework.dependencies {
        let Some(library) = target.library(reference) else {
            debug!(
                project = %project.name,
                framework = %framework.name,
                dependency = %reference,
                "Unresolved direct reference skipped"
            );
            continue;
        };
        let mut path = ExpansionPath::new(&project.name, &framework.name);
        let (key, subtree) = report_dependency(library, target, &mut path)?;
        insert_first_wins(&mut node, key, subtree);
    }
    Ok(node)
}

impl<'a> TreeBuilder<'a> {
    pub fn new(loader: &'a dyn LockDataLoader) -> Self {
        Self { loader }
    }

    /// Build the snapshot tree for every package-reference project in `graph`
    pub fn build(&self, graph: &DependencyGraph) -> Result<TreeNode, ApiError> {
        info!(projects = graph.projects.len(), "Parsing dependency graph");
        let mut root = TreeNode::new();

        for project in graph
            .projects
            .iter()
            .filter(|p| p.restore_style.is_package_reference())
        {
            let project_node = self.build_project(project)?;
            insert_first_wins(&mut root, project_key(&project.name), project_node);
        }

        info!(
            projects = root.len(),
            nodes = root.descendant_count(),
            "Done parsing dependency graph"
        );
        Ok(root)
    }

    fn build_project(&self, project: &ProjectSpec) -> Result<TreeNode, ApiError> {
        let lock = self
            .loader
            .load_lock_data(&project.file_path, &project.output_path)?;
        debug!(project = %project.name, targets = lock.targets.len(), "Building project");

        let mut node = TreeNode::new();
        for framework in &project.target_frameworks {
            let framework_node = build_framework(project, framework, lock.target(&framework.name))?;
            insert_first_wins(&mut node, framework_key(&framework.name), framework_node);
        }
        Ok(node)
    }
}
