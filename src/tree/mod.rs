//! Dependency snapshot tree: node model, JSON codec, and builder.

pub mod builder;
pub mod codec;
pub mod node;

pub use builder::TreeBuilder;
pub use node::TreeNode;
