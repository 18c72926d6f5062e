//! Deptree: Dependency Snapshot Search
//!
//! Flattens a project's resolved package graph into a nested keyed tree
//! (project → target framework → package → transitive packages), persists it
//! as JSON, and searches it by name with full paths for every hit.

pub mod concurrency;
pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod resolver;
pub mod search;
pub mod session;
pub mod snapshot;
pub mod tooling;
pub mod tree;
pub mod types;
