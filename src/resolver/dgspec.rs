//! Dependency-graph spec (`*.dg.json`) reader.

use super::contract::GraphResolver;
use crate::error::{ApiError, ResolveError};
use crate::graph::{DependencyGraph, ProjectSpec, RestoreStyle, TargetFramework};
use indexmap::IndexMap;
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct DgSpecDocument {
    #[serde(default)]
    projects: IndexMap<String, DgSpecProject>,
}

#[derive(Debug, Deserialize)]
struct DgSpecProject {
    #[serde(default)]
    restore: DgSpecRestore,
    #[serde(default)]
    frameworks: IndexMap<String, DgSpecFramework>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DgSpecRestore {
    project_name: Option<String>,
    project_path: Option<String>,
    output_path: Option<String>,
    project_style: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DgSpecFramework {
    #[serde(default)]
    dependencies: IndexMap<String, IgnoredAny>,
}

/// Parse dg-spec text. Project and framework order follow the document.
pub fn parse_dg_spec(text: &str, source: &Path) -> Result<DependencyGraph, ResolveError> {
    let document: DgSpecDocument =
        serde_json::from_str(text).map_err(|e| ResolveError::Parse {
            kind: "dependency graph",
            path: source.to_path_buf(),
            source: e,
        })?;

    let projects = document
        .projects
        .into_iter()
        .map(|(unique_name, project)| {
            let restore = project.restore;
            let file_path = PathBuf::from(restore.project_path.unwrap_or(unique_name));
            let name = restore.project_name.unwrap_or_else(|| {
                file_path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default()
            });
            let restore_style = restore
                .project_style
                .as_deref()
                .map(RestoreStyle::from_name)
                .unwrap_or(RestoreStyle::Unknown);
            let target_frameworks = project
                .frameworks
                .into_iter()
                .map(|(framework, spec)| TargetFramework {
                    name: framework,
                    dependencies: spec.dependencies.into_keys().collect(),
                })
                .collect();

            ProjectSpec {
                name,
                restore_style,
                file_path,
                output_path: PathBuf::from(restore.output_path.unwrap_or_default()),
                target_frameworks,
            }
        })
        .collect();

    Ok(DependencyGraph { projects })
}

/// Reads an already generated dependency-graph spec file
pub struct DgSpecFileResolver;

impl DgSpecFileResolver {
    pub fn read(path: &Path) -> Result<DependencyGraph, ResolveError> {
        let text = std::fs::read_to_string(path).map_err(|e| ResolveError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let graph = parse_dg_spec(&text, path)?;
        debug!(
            path = %path.display(),
            projects = graph.projects.len(),
            "Parsed dependency graph spec"
        );
        Ok(graph)
    }
}

impl GraphResolver for DgSpecFileResolver {
    fn resolve_graph(&self, path: &Path) -> Result<DependencyGraph, ApiError> {
        Ok(Self::read(path)?)
    }
}
