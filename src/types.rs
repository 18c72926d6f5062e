//! Core types and key encodings for the dependency snapshot.
//!
//! Keys carry all of a node's payload, so their format is part of the
//! snapshot's output contract.

/// Separator used when rendering a node path as a single string.
pub const PATH_SEPARATOR: &str = "/";

/// Marker placed between the first and last segment of a shortened path.
pub const ELLIPSIS: &str = " ... ";

/// Key for a project node: the raw project name.
pub fn project_key(name: &str) -> String {
    name.to_string()
}

/// Key for a target framework node: `[<framework>]`.
pub fn framework_key(framework: &str) -> String {
    format!("[{}]", framework)
}

/// Key for a package node: `<name>, v<version>`.
pub fn package_key(name: &str, version: &str) -> String {
    format!("{}, v{}", name, version)
}
