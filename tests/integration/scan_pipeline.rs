//! Scan a fixture graph, persist it, reload it, and search it.

use super::support::{cli_with_scans_dir, write_fixture};
use deptree::resolver::{AssetsFileLoader, DgSpecFileResolver, GraphResolver};
use deptree::search::{search_sequential, MatchMode, PathSearchEngine, SearchQuery};
use deptree::snapshot::{SnapshotStore, LATEST_FILE_NAME};
use deptree::tree::TreeBuilder;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_build_tree_from_fixture() {
    let temp = TempDir::new().unwrap();
    let fixture = write_fixture(temp.path());

    let graph = DgSpecFileResolver.resolve_graph(&fixture.graph_file).unwrap();
    assert_eq!(graph.projects.len(), 3);

    let tree = TreeBuilder::new(&AssetsFileLoader).build(&graph).unwrap();

    // Legacy restores with packages.config and is left out.
    assert_eq!(tree.len(), 2);
    assert!(tree.get("Legacy").is_none());

    // Frameworks are matched by identity: `net472` is `.NETFramework,Version=v4.7.2`.
    let app = tree.get("App").unwrap();
    let net472 = app.get("[net472]").unwrap();
    let keys: Vec<&str> = net472.keys().collect();
    assert_eq!(keys, vec!["Newtonsoft.Json, v13.0.1"]);
    let net8 = app.get("[net8.0]").unwrap();
    assert_eq!(net8.len(), 2);
    assert!(net8.get("Newtonsoft.Json, v13.0.1").unwrap().is_leaf());
    let console = net8.get("Serilog.Sinks.Console, v5.0.0").unwrap();
    // The win-x64 target adds a native dependency to Serilog; it must not leak in.
    assert!(console.get("Serilog, v3.1.1").unwrap().is_leaf());

    // Api has never been restored: its framework node exists but is empty.
    let api = tree.get("Api").unwrap();
    assert!(api.get("[net8.0]").unwrap().is_empty());
}

#[test]
fn test_scan_writes_identical_latest_and_permanent_snapshots() {
    let temp = TempDir::new().unwrap();
    let fixture = write_fixture(temp.path());
    let scans = temp.path().join("scans");
    let cli = cli_with_scans_dir(&scans);

    let (tree, summary) = cli
        .scan(&fixture.solution, Some(&fixture.graph_file), None, true)
        .unwrap();

    let latest = scans.join(LATEST_FILE_NAME);
    assert_eq!(summary.latest, latest.display().to_string());
    let permanent = summary.permanent.clone().expect("permanent copy requested");
    assert!(permanent.ends_with(".Sample.sln.json"));

    let latest_bytes = fs::read(&latest).unwrap();
    let permanent_bytes = fs::read(&permanent).unwrap();
    assert_eq!(latest_bytes, permanent_bytes);

    let reloaded = SnapshotStore::new(&scans).load_latest().unwrap();
    assert_eq!(reloaded, tree);
}

#[test]
fn test_scan_without_permanent_copy() {
    let temp = TempDir::new().unwrap();
    let fixture = write_fixture(temp.path());
    let scans = temp.path().join("scans");
    let cli = cli_with_scans_dir(&scans);

    let (_, summary) = cli
        .scan(&fixture.solution, Some(&fixture.graph_file), None, false)
        .unwrap();
    assert!(summary.permanent.is_none());
    assert_eq!(fs::read_dir(&scans).unwrap().count(), 1);
}

#[test]
fn test_search_reloaded_snapshot() {
    let temp = TempDir::new().unwrap();
    let fixture = write_fixture(temp.path());
    let scans = temp.path().join("scans");
    let cli = cli_with_scans_dir(&scans);
    cli.scan(&fixture.solution, Some(&fixture.graph_file), None, false)
        .unwrap();

    let tree = Arc::new(SnapshotStore::new(&scans).load_latest().unwrap());
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let engine = PathSearchEngine::new(2);

    let query = SearchQuery::new("SERILOG", MatchMode::Contains);
    let paths = runtime.block_on(engine.search(&tree, &query)).unwrap();
    let rendered: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
    // The console sink matches first, so its own Serilog child is not reported.
    assert_eq!(rendered, vec!["App/[net8.0]/Serilog.Sinks.Console, v5.0.0"]);
    assert_eq!(paths[0].short(), "App ... Serilog.Sinks.Console, v5.0.0");

    let query = SearchQuery::new("sinks", MatchMode::StartsWith);
    assert!(runtime.block_on(engine.search(&tree, &query)).unwrap().is_empty());

    let query = SearchQuery::new("runtime.win-x64", MatchMode::Contains);
    assert!(runtime.block_on(engine.search(&tree, &query)).unwrap().is_empty());

    let query = SearchQuery::new("[net", MatchMode::StartsWith);
    let paths = runtime.block_on(engine.search(&tree, &query)).unwrap();
    assert_eq!(paths.len(), 3);
    assert!(paths.iter().all(|p| p.depth() == 2));
    assert_eq!(paths, search_sequential(&tree, &query));
}
