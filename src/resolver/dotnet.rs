//! Dependency graph generation through `dotnet msbuild`.

use super::contract::GraphResolver;
use super::dgspec::DgSpecFileResolver;
use crate::error::{ApiError, ResolveError};
use crate::graph::DependencyGraph;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

const OUTPUT_TAIL_LINES: usize = 20;

/// Runs the `GenerateRestoreGraphFile` target and parses its output.
pub struct DotnetGraphResolver {
    program: String,
}

impl DotnetGraphResolver {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for DotnetGraphResolver {
    fn default() -> Self {
        Self::new("dotnet")
    }
}

/// Last lines of combined process output, for error reports
fn output_tail(stdout: &[u8], stderr: &[u8]) -> String {
    let combined = format!(
        "{}{}",
        String::from_utf8_lossy(stdout),
        String::from_utf8_lossy(stderr)
    );
    let lines: Vec<&str> = combined.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(OUTPUT_TAIL_LINES);
    lines[start..].join("\n")
}

impl GraphResolver for DotnetGraphResolver {
    fn resolve_graph(&self, path: &Path) -> Result<DependencyGraph, ApiError> {
        let scratch = tempfile::tempdir()?;
        let graph_file = scratch.path().join("graph.dg.json");

        info!(target_path = %path.display(), "Generating dependency graph");
        let output = Command::new(&self.program)
            .arg("msbuild")
            .arg(path)
            .arg("-nologo")
            .arg("-t:GenerateRestoreGraphFile")
            .arg(format!("-p:RestoreGraphOutputPath={}", graph_file.display()))
            .output()
            .map_err(|e| ResolveError::Spawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(ResolveError::CommandFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                output: output_tail(&output.stdout, &output.stderr),
            }
            .into());
        }
        debug!(graph_file = %graph_file.display(), "Dependency graph file written");

        let graph = DgSpecFileResolver::read(&graph_file)?;
        info!(projects = graph.projects.len(), "Done generating dependency graph");
        Ok(graph)
    }
}
