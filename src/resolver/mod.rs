//! Acquisition of dependency data from the .NET build system.
//!
//! The tree builder only sees the `GraphResolver` and `LockDataLoader`
//! contracts; the implementations here read the files NuGet restore produces.

pub mod assets;
pub mod contract;
pub mod dgspec;
pub mod dotnet;

pub use assets::{AssetsFileLoader, ASSETS_FILE_NAME};
pub use contract::{GraphResolver, LockDataLoader};
pub use dgspec::DgSpecFileResolver;
pub use dotnet::DotnetGraphResolver;
