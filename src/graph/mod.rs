//! Dependency graph and resolved lock data
//!
//! Read-only inputs to the tree builder. The graph lists projects and their
//! declared direct references per target framework; the lock data holds the
//! resolved, versioned libraries for one project.

pub mod framework;

pub use framework::FrameworkId;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a project restores its packages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestoreStyle {
    Unknown,
    ProjectJson,
    PackageReference,
    DotnetCliTool,
    Standalone,
    DotnetToolReference,
    PackagesConfig,
}

impl RestoreStyle {
    /// Parse a restore style name; unrecognised names map to `Unknown`
    pub fn from_name(name: &str) -> Self {
        match name {
            "ProjectJson" => RestoreStyle::ProjectJson,
            "PackageReference" => RestoreStyle::PackageReference,
            "DotnetCliTool" => RestoreStyle::DotnetCliTool,
            "Standalone" => RestoreStyle::Standalone,
            "DotnetToolReference" => RestoreStyle::DotnetToolReference,
            "PackagesConfig" => RestoreStyle::PackagesConfig,
            _ => RestoreStyle::Unknown,
        }
    }

    /// Only package-reference projects participate in the snapshot
    pub fn is_package_reference(self) -> bool {
        self == RestoreStyle::PackageReference
    }
}

/// A target framework and its declared direct references (names only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetFramework {
    pub name: String,
    pub dependencies: Vec<String>,
}

/// A project as seen by the build system's resolver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSpec {
    pub name: String,
    pub restore_style: RestoreStyle,
    pub file_path: PathBuf,
    pub output_path: PathBuf,
    pub target_frameworks: Vec<TargetFramework>,
}

/// All projects reachable from a scanned project or solution
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGraph {
    pub projects: Vec<ProjectSpec>,
}

/// A resolved library and the names of the libraries it depends on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockLibrary {
    pub name: String,
    pub version: String,
    pub dependencies: Vec<String>,
}

/// Resolved libraries for one target framework, optionally runtime-specific
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockTarget {
    pub framework: String,
    #[serde(default)]
    pub runtime: Option<String>,
    pub libraries: Vec<LockLibrary>,
}

impl LockTarget {
    /// Runtime-agnostic target for `framework`
    pub fn new(framework: impl Into<String>, libraries: Vec<LockLibrary>) -> Self {
        Self {
            framework: framework.into(),
            runtime: None,
            libraries,
        }
    }

    /// First library with exactly this name
    pub fn library(&self, name: &str) -> Option<&LockLibrary> {
        self.libraries.iter().find(|library| library.name == name)
    }
}

/// Resolved lock data for one project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockData {
    pub targets: Vec<LockTarget>,
}

impl LockData {
    /// First runtime-agnostic target for `framework`.
    ///
    /// Short aliases and full names match when they denote the same
    /// framework (`net8.0` and `.NETCoreApp,Version=v8.0`).
    pub fn target(&self, framework: &str) -> Option<&LockTarget> {
        self.targets.iter().find(|target| {
            target.runtime.is_none() && framework::same_framework(&target.framework, framework)
        })
    }
}
