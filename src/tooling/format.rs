//! Format scan summaries and search results as text.

use crate::search::{MatchMode, NodePath};
use crate::snapshot::SnapshotWriteReport;
use crate::tree::node::TreeNode;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde::Serialize;

/// Per-project counts for the scan summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub project: String,
    pub frameworks: usize,
    pub direct_packages: usize,
    pub package_nodes: usize,
}

/// Result of a scan: where it was written and what it contains
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub latest: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permanent: Option<String>,
    pub projects: Vec<ProjectSummary>,
}

impl ScanSummary {
    pub fn new(tree: &TreeNode, report: &SnapshotWriteReport) -> Self {
        let projects = tree
            .iter()
            .map(|(project, frameworks)| ProjectSummary {
                project: project.to_string(),
                frameworks: frameworks.len(),
                direct_packages: frameworks.iter().map(|(_, fw)| fw.len()).sum(),
                package_nodes: frameworks.iter().map(|(_, fw)| fw.descendant_count()).sum(),
            })
            .collect();
        Self {
            latest: report.latest.display().to_string(),
            permanent: report.permanent.as_ref().map(|p| p.display().to_string()),
            projects,
        }
    }
}

/// JSON shape of a one-shot search
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutput {
    pub query: String,
    pub mode: MatchMode,
    pub count: usize,
    pub paths: Vec<String>,
}

/// Format a section heading; bold/underline only when `color` is set.
pub fn format_section_heading(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold().underline())
    } else {
        title.to_string()
    }
}

/// Format a scan summary as human-readable text.
pub fn format_scan_summary_text(summary: &ScanSummary, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Scan", color)));
    if summary.projects.is_empty() {
        out.push_str("No package-reference projects found.\n\n");
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        table.set_header(vec!["Project", "Frameworks", "Direct", "Package nodes"]);
        for row in &summary.projects {
            table.add_row(vec![
                row.project.clone(),
                row.frameworks.to_string(),
                row.direct_packages.to_string(),
                row.package_nodes.to_string(),
            ]);
        }
        out.push_str(&format!("{}\n\n", table));
    }
    out.push_str(&format!("Wrote latest results in file: {}\n", summary.latest));
    if let Some(ref permanent) = summary.permanent {
        out.push_str(&format!("And: {}\n", permanent));
    }
    out
}

/// Format search results: the count, then one path per line.
pub fn format_search_text(paths: &[NodePath], short: bool) -> String {
    let mut out = format!("{}\n", paths.len());
    for path in paths {
        out.push_str(&path.render(short));
        out.push('\n');
    }
    out
}
