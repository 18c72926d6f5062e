//! CLI Tooling
//!
//! Command-line interface for scanning projects into snapshots and searching
//! them, one-shot or interactively.

use crate::config::{ConfigLoader, DeptreeConfig};
use crate::error::ApiError;
use crate::resolver::{
    AssetsFileLoader, DgSpecFileResolver, DotnetGraphResolver, GraphResolver,
};
use crate::search::{MatchMode, PathSearchEngine, SearchQuery};
use crate::session::Session;
use crate::snapshot::SnapshotStore;
use crate::tooling::format::{
    format_scan_summary_text, format_search_text, ScanSummary, SearchOutput,
};
use crate::tree::{TreeBuilder, TreeNode};
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Deptree CLI - snapshot and search resolved dependency trees
#[derive(Parser)]
#[command(name = "deptree")]
#[command(about = "Snapshot and search resolved NuGet dependency trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Concurrent search workers (0 = available parallelism)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Load configuration and apply command-line overrides
    pub fn load_config(&self) -> Result<DeptreeConfig, ApiError> {
        let mut config = ConfigLoader::load(self.config.as_deref())?;
        if let Some(workers) = self.workers {
            config.search.workers = workers;
        }
        if let Some(ref level) = self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(ref format) = self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(ref output) = self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(ref file) = self.log_file {
            config.logging.file = Some(file.clone());
        }
        Ok(config)
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve a project or solution and write a snapshot of its dependency tree
    Scan {
        /// Project or solution file to scan
        target: PathBuf,
        /// Read a pre-generated dependency graph file instead of running dotnet
        #[arg(long)]
        graph_file: Option<PathBuf>,
        /// Snapshot directory (overrides scan.output_dir)
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Keep a timestamped copy of this scan
        #[arg(long, conflicts_with = "no_save")]
        save: bool,
        /// Only write latestscan.json
        #[arg(long)]
        no_save: bool,
        /// Start an interactive session on the new snapshot
        #[arg(long)]
        explore: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Search a snapshot interactively
    Explore {
        /// Snapshot file (default: latest scan)
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Initial query
        #[arg(long, default_value = "")]
        query: String,
    },
    /// Run one search against a snapshot
    Search {
        /// Package name or fragment to look for
        query: String,
        /// Match keys starting with the query instead of containing it
        #[arg(long)]
        starts_with: bool,
        /// Show only the first and last path segment
        #[arg(long, conflicts_with = "full_paths")]
        short: bool,
        /// Show whole paths even when search.short_paths is set
        #[arg(long)]
        full_paths: bool,
        /// Snapshot file (default: latest scan)
        #[arg(long)]
        snapshot: Option<PathBuf>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration
    Config,
}

/// Executes commands against a loaded configuration
pub struct CliContext {
    config: DeptreeConfig,
    runtime: tokio::runtime::Runtime,
    color: bool,
}

impl CliContext {
    pub fn new(config: DeptreeConfig) -> Result<Self, ApiError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::Runtime(format!("Failed to start runtime: {}", e)))?;
        Ok(Self {
            config,
            runtime,
            color: false,
        })
    }

    /// Enable bold headings in text output
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn config(&self) -> &DeptreeConfig {
        &self.config
    }

    fn engine(&self) -> PathSearchEngine {
        PathSearchEngine::new(self.config.search.workers)
    }

    fn snapshot_store(&self, output_dir: Option<&Path>) -> Result<SnapshotStore, ApiError> {
        let dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => self.config.scan.resolve_output_dir()?,
        };
        Ok(SnapshotStore::new(dir))
    }

    fn load_snapshot(&self, snapshot: Option<&Path>) -> Result<TreeNode, ApiError> {
        let started = Instant::now();
        let tree = match snapshot {
            Some(path) => SnapshotStore::load(path)?,
            None => self.snapshot_store(None)?.load_latest()?,
        };
        info!(elapsed_ms = started.elapsed().as_millis() as u64, "Snapshot load time");
        Ok(tree)
    }

    /// Execute a command, reading session input from `input` and writing to `out`
    pub fn execute<R: BufRead, W: Write>(
        &self,
        command: &Commands,
        input: R,
        out: &mut W,
    ) -> Result<(), ApiError> {
        match command {
            Commands::Scan {
                target,
                graph_file,
                output_dir,
                save,
                no_save,
                explore,
                format,
            } => {
                let save_permanent = if *save {
                    true
                } else if *no_save {
                    false
                } else {
                    self.config.scan.save_permanent
                };
                let (tree, summary) = self.scan(
                    target,
                    graph_file.as_deref(),
                    output_dir.as_deref(),
                    save_permanent,
                )?;
                write_formatted(out, format, &summary, |s| {
                    format_scan_summary_text(s, self.color)
                })?;
                if *explore {
                    self.run_session(Arc::new(tree), "", input, out)?;
                }
                Ok(())
            }
            Commands::Explore { snapshot, query } => {
                let tree = self.load_snapshot(snapshot.as_deref())?;
                self.run_session(Arc::new(tree), query, input, out)
            }
            Commands::Search {
                query,
                starts_with,
                short,
                full_paths,
                snapshot,
                format,
            } => {
                let tree = Arc::new(self.load_snapshot(snapshot.as_deref())?);
                let mode = if *starts_with {
                    MatchMode::StartsWith
                } else {
                    self.config.search.match_mode()
                };
                let query = SearchQuery::new(query, mode);
                let paths = self.runtime.block_on(self.engine().search(&tree, &query))?;
                let short = !*full_paths && (*short || self.config.search.short_paths);
                let output = SearchOutput {
                    query: query.text().to_string(),
                    mode,
                    count: paths.len(),
                    paths: paths.iter().map(|p| p.render(short)).collect(),
                };
                write_formatted(out, format, &output, |_| format_search_text(&paths, short))
            }
            Commands::Config => {
                out.write_all(self.config.to_toml()?.as_bytes())?;
                Ok(())
            }
        }
    }

    /// Resolve, build, and persist a snapshot for `target`
    pub fn scan(
        &self,
        target: &Path,
        graph_file: Option<&Path>,
        output_dir: Option<&Path>,
        save_permanent: bool,
    ) -> Result<(TreeNode, ScanSummary), ApiError> {
        let graph = match graph_file {
            Some(file) => DgSpecFileResolver.resolve_graph(file)?,
            None => {
                DotnetGraphResolver::new(self.config.scan.dotnet.clone()).resolve_graph(target)?
            }
        };
        let tree = TreeBuilder::new(&AssetsFileLoader).build(&graph)?;

        let scan_name = target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scan".to_string());
        let report = self
            .snapshot_store(output_dir)?
            .write(&tree, &scan_name, save_permanent)?;
        let summary = ScanSummary::new(&tree, &report);
        Ok((tree, summary))
    }

    /// Run an interactive session over `tree`
    pub fn run_session<R: BufRead, W: Write>(
        &self,
        tree: Arc<TreeNode>,
        initial_query: &str,
        input: R,
        out: &mut W,
    ) -> Result<(), ApiError> {
        let mut session = Session::new(
            tree,
            self.engine(),
            self.runtime.handle().clone(),
            self.config.search.session_options(),
        );
        session.run(initial_query, input, out)
    }
}

/// Write `value` as pretty JSON or via `text`, depending on `format`
fn write_formatted<T, W, F>(out: &mut W, format: &str, value: &T, text: F) -> Result<(), ApiError>
where
    T: serde::Serialize,
    W: Write,
    F: FnOnce(&T) -> String,
{
    match format {
        "json" => {
            let json = serde_json::to_string_pretty(value)
                .map_err(|e| ApiError::Runtime(format!("Failed to render JSON: {}", e)))?;
            writeln!(out, "{}", json)?;
        }
        "text" => out.write_all(text(value).as_bytes())?,
        other => {
            return Err(ApiError::ConfigError(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                other
            )))
        }
    }
    Ok(())
}
