//! Interactive search session over a fixed snapshot.
//!
//! Reads one command per line: a query, `!short`, `!starts`, or `exit`.
//! End of input ends the session like `exit`.

use crate::error::ApiError;
use crate::search::{MatchMode, NodePath, PathSearchEngine, SearchQuery};
use crate::tree::node::TreeNode;
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tracing::debug;

pub const EXIT_COMMAND: &str = "exit";
pub const SHORT_COMMAND: &str = "!short";
pub const STARTS_COMMAND: &str = "!starts";
pub const PROMPT: &str = "New query (or exit or !short or !starts): ";

/// One parsed line of session input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Exit,
    ToggleShortPaths,
    ToggleStartsWith,
    Query(String),
}

impl SessionCommand {
    /// Parse a line; only the line terminator is stripped, so `" json"` is a query.
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(&['\n', '\r'][..]);
        match line {
            EXIT_COMMAND => SessionCommand::Exit,
            SHORT_COMMAND => SessionCommand::ToggleShortPaths,
            STARTS_COMMAND => SessionCommand::ToggleStartsWith,
            query => SessionCommand::Query(query.to_string()),
        }
    }
}

/// Display and matching options toggled during a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub short_paths: bool,
    pub match_mode: MatchMode,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            short_paths: true,
            match_mode: MatchMode::Contains,
        }
    }
}

/// Search session state: the snapshot, current query, and last results
pub struct Session {
    tree: Arc<TreeNode>,
    engine: PathSearchEngine,
    runtime: Handle,
    options: SessionOptions,
    query: String,
    results: Vec<NodePath>,
    elapsed: Duration,
}

impl Session {
    pub fn new(
        tree: Arc<TreeNode>,
        engine: PathSearchEngine,
        runtime: Handle,
        options: SessionOptions,
    ) -> Self {
        Self {
            tree,
            engine,
            runtime,
            options,
            query: String::new(),
            results: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[NodePath] {
        &self.results
    }

    /// Run `text` against the snapshot with the current match mode
    pub fn search(&mut self, text: &str) -> Result<&[NodePath], ApiError> {
        let query = SearchQuery::new(text, self.options.match_mode);
        let started = Instant::now();
        self.results = self.runtime.block_on(self.engine.search(&self.tree, &query))?;
        self.elapsed = started.elapsed();
        self.query = text.to_string();
        debug!(
            query = %text,
            matches = self.results.len(),
            elapsed_ms = self.elapsed.as_millis() as u64,
            "Session search"
        );
        Ok(&self.results)
    }

    /// Write the result count, each path, and the search time
    pub fn render_results<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", self.results.len())?;
        for path in &self.results {
            writeln!(out, "{}", path.render(self.options.short_paths))?;
        }
        writeln!(out, "Elapsed time: {:?}", self.elapsed)
    }

    /// Drive the read-eval loop until `exit` or end of input
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        initial_query: &str,
        mut input: R,
        mut out: W,
    ) -> Result<(), ApiError> {
        writeln!(out, "Searching for: {}...", initial_query)?;
        self.search(initial_query)?;

        loop {
            self.render_results(&mut out)?;
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(());
            }

            match SessionCommand::parse(&line) {
                SessionCommand::Exit => return Ok(()),
                SessionCommand::ToggleShortPaths => {
                    self.options.short_paths = !self.options.short_paths;
                    writeln!(out, "Shorten paths? -> {}", self.options.short_paths)?;
                }
                SessionCommand::ToggleStartsWith => {
                    self.options.match_mode = self.options.match_mode.toggled();
                    writeln!(
                        out,
                        "Must start with string? -> {}",
                        self.options.match_mode == MatchMode::StartsWith
                    )?;
                    let query = self.query.clone();
                    writeln!(out, "Searching for: {}...", query)?;
                    self.search(&query)?;
                }
                SessionCommand::Query(query) => {
                    writeln!(out, "Searching for: {}...", query)?;
                    self.search(&query)?;
                }
            }
        }
    }
}
