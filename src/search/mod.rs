//! Search over a dependency snapshot.

pub mod engine;
pub mod path;

pub use engine::{search_sequential, MatchMode, PathSearchEngine, SearchQuery};
pub use path::NodePath;
