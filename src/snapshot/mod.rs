//! Snapshot Store
//!
//! Persists built trees as JSON. Every scan overwrites `latestscan.json`; a
//! scan may also keep a permanent copy named `<yyyyMMddHHmmss>.<scan>.json`.
//! Both files receive the same serialized bytes.

use crate::error::SnapshotError;
use crate::tree::codec;
use crate::tree::node::TreeNode;
use chrono::Local;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the snapshot overwritten by every scan
pub const LATEST_FILE_NAME: &str = "latestscan.json";

/// Where a scan was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotWriteReport {
    pub latest: PathBuf,
    pub permanent: Option<PathBuf>,
    pub bytes: usize,
}

/// Directory-backed snapshot store
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn latest_path(&self) -> PathBuf {
        self.dir.join(LATEST_FILE_NAME)
    }

    /// Path of the permanent copy for `scan_name` stamped with `stamp`
    pub fn permanent_path(&self, scan_name: &str, stamp: &str) -> PathBuf {
        self.dir.join(format!("{}.{}.json", stamp, scan_name))
    }

    /// Write `tree` as the latest scan, plus a timestamped copy when `save_permanent`
    pub fn write(
        &self,
        tree: &TreeNode,
        scan_name: &str,
        save_permanent: bool,
    ) -> Result<SnapshotWriteReport, SnapshotError> {
        let stamp = Local::now().format("%Y%m%d%H%M%S").to_string();
        self.write_stamped(tree, scan_name, save_permanent, &stamp)
    }

    fn write_stamped(
        &self,
        tree: &TreeNode,
        scan_name: &str,
        save_permanent: bool,
        stamp: &str,
    ) -> Result<SnapshotWriteReport, SnapshotError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| SnapshotError::Write {
            path: self.dir.clone(),
            source: e,
        })?;

        let text = codec::encode(tree)?;
        let latest = self.latest_path();
        write_file(&latest, &text)?;
        info!(path = %latest.display(), "Wrote latest scan");

        let permanent = if save_permanent {
            let path = self.permanent_path(scan_name, stamp);
            write_file(&path, &text)?;
            info!(path = %path.display(), "Wrote permanent scan");
            Some(path)
        } else {
            None
        };

        Ok(SnapshotWriteReport {
            latest,
            permanent,
            bytes: text.len(),
        })
    }

    /// Load the latest scan in this store
    pub fn load_latest(&self) -> Result<TreeNode, SnapshotError> {
        Self::load(&self.latest_path())
    }

    /// Load a snapshot file. Fails without returning a partial tree.
    pub fn load(path: &Path) -> Result<TreeNode, SnapshotError> {
        if !path.exists() {
            return Err(SnapshotError::NotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|e| SnapshotError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let tree = codec::decode(&text)?;
        info!(
            path = %path.display(),
            projects = tree.len(),
            "Loaded snapshot"
        );
        Ok(tree)
    }
}

fn write_file(path: &Path, text: &str) -> Result<(), SnapshotError> {
    std::fs::write(path, text).map_err(|e| SnapshotError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
