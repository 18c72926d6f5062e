//! Output contracts of the CLI commands.

use super::support::{cli_with_scans_dir, write_fixture, Fixture};
use deptree::error::{ApiError, SnapshotError};
use deptree::tooling::cli::{CliContext, Commands};
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

fn scan_command(fixture: &Fixture, save: bool, format: &str) -> Commands {
    Commands::Scan {
        target: fixture.solution.clone(),
        graph_file: Some(fixture.graph_file.clone()),
        output_dir: None,
        save,
        no_save: !save,
        explore: false,
        format: format.to_string(),
    }
}

fn run(cli: &CliContext, command: &Commands, input: &str) -> Result<String, ApiError> {
    let mut out = Vec::new();
    cli.execute(command, Cursor::new(input.to_string()), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

fn scanned(root: &Path) -> CliContext {
    let fixture = write_fixture(root);
    let cli = cli_with_scans_dir(&root.join("scans"));
    run(&cli, &scan_command(&fixture, false, "json"), "").unwrap();
    cli
}

#[test]
fn test_scan_json_contract() {
    let temp = TempDir::new().unwrap();
    let fixture = write_fixture(temp.path());
    let cli = cli_with_scans_dir(&temp.path().join("scans"));

    let stdout = run(&cli, &scan_command(&fixture, true, "json"), "").unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert!(json
        .get("latest")
        .and_then(|v| v.as_str())
        .unwrap()
        .ends_with("latestscan.json"));
    assert!(json.get("permanent").and_then(|v| v.as_str()).is_some());

    let projects = json.get("projects").and_then(|v| v.as_array()).unwrap();
    assert_eq!(projects.len(), 2);
    let app = projects
        .iter()
        .find(|p| p.get("project").and_then(|v| v.as_str()) == Some("App"))
        .unwrap();
    assert_eq!(app.get("frameworks").and_then(|v| v.as_u64()), Some(2));
    assert_eq!(app.get("direct_packages").and_then(|v| v.as_u64()), Some(3));
    assert_eq!(app.get("package_nodes").and_then(|v| v.as_u64()), Some(4));
}

#[test]
fn test_scan_text_omits_permanent_line_without_save() {
    let temp = TempDir::new().unwrap();
    let fixture = write_fixture(temp.path());
    let cli = cli_with_scans_dir(&temp.path().join("scans"));

    let stdout = run(&cli, &scan_command(&fixture, false, "text"), "").unwrap();
    assert!(stdout.contains("Wrote latest results in file: "));
    assert!(!stdout.contains("And: "));
}

#[test]
fn test_search_json_contract() {
    let temp = TempDir::new().unwrap();
    let cli = scanned(temp.path());

    let command = Commands::Search {
        query: "Json".to_string(),
        starts_with: false,
        short: false,
        full_paths: true,
        snapshot: None,
        format: "json".to_string(),
    };
    let stdout = run(&cli, &command, "").unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(json.get("query").and_then(|v| v.as_str()), Some("json"));
    assert_eq!(json.get("mode").and_then(|v| v.as_str()), Some("contains"));
    assert_eq!(json.get("count").and_then(|v| v.as_u64()), Some(2));
    assert_eq!(
        json.get("paths").unwrap(),
        &serde_json::json!([
            "App/[net472]/Newtonsoft.Json, v13.0.1",
            "App/[net8.0]/Newtonsoft.Json, v13.0.1"
        ])
    );
}

#[test]
fn test_search_text_short_paths() {
    let temp = TempDir::new().unwrap();
    let cli = scanned(temp.path());

    let command = Commands::Search {
        query: "serilog".to_string(),
        starts_with: true,
        short: true,
        full_paths: false,
        snapshot: None,
        format: "text".to_string(),
    };
    let stdout = run(&cli, &command, "").unwrap();
    assert_eq!(stdout, "1\nApp ... Serilog.Sinks.Console, v5.0.0\n");
}

#[test]
fn test_search_path_style_follows_config() {
    let temp = TempDir::new().unwrap();
    let fixture = write_fixture(temp.path());
    let command = |full_paths| Commands::Search {
        query: "sinks".to_string(),
        starts_with: false,
        short: false,
        full_paths,
        snapshot: None,
        format: "text".to_string(),
    };

    // search.short_paths defaults to true
    let cli = cli_with_scans_dir(&temp.path().join("scans"));
    run(&cli, &scan_command(&fixture, false, "json"), "").unwrap();
    assert_eq!(
        run(&cli, &command(false), "").unwrap(),
        "1\nApp ... Serilog.Sinks.Console, v5.0.0\n"
    );
    assert_eq!(
        run(&cli, &command(true), "").unwrap(),
        "1\nApp/[net8.0]/Serilog.Sinks.Console, v5.0.0\n"
    );

    let mut config = cli.config().clone();
    config.search.short_paths = false;
    let cli = CliContext::new(config).unwrap();
    assert_eq!(
        run(&cli, &command(false), "").unwrap(),
        "1\nApp/[net8.0]/Serilog.Sinks.Console, v5.0.0\n"
    );
}

#[test]
fn test_explore_session_transcript() {
    let temp = TempDir::new().unwrap();
    let cli = scanned(temp.path());

    let command = Commands::Explore {
        snapshot: None,
        query: "newtonsoft".to_string(),
    };
    let stdout = run(&cli, &command, "!short\nexit\n").unwrap();

    let short = "App ... Newtonsoft.Json, v13.0.1\n";
    assert!(stdout.starts_with(&format!("Searching for: newtonsoft...\n2\n{}{}", short, short)));
    assert!(stdout.contains("Shorten paths? -> false"));
    assert!(stdout.contains(
        "App/[net472]/Newtonsoft.Json, v13.0.1\nApp/[net8.0]/Newtonsoft.Json, v13.0.1\n"
    ));
    assert_eq!(stdout.matches("Elapsed time: ").count(), 2);
}

#[test]
fn test_config_renders_toml() {
    let temp = TempDir::new().unwrap();
    let cli = cli_with_scans_dir(temp.path());

    let stdout = run(&cli, &Commands::Config, "").unwrap();
    let parsed: toml::Value = toml::from_str(&stdout).unwrap();
    assert_eq!(
        parsed
            .get("search")
            .and_then(|s| s.get("workers"))
            .and_then(|v| v.as_integer()),
        Some(2)
    );
    assert!(parsed.get("logging").is_some());
}

#[test]
fn test_invalid_format_is_rejected() {
    let temp = TempDir::new().unwrap();
    let cli = scanned(temp.path());

    let command = Commands::Search {
        query: "json".to_string(),
        starts_with: false,
        short: false,
        full_paths: false,
        snapshot: None,
        format: "yaml".to_string(),
    };
    let err = run(&cli, &command, "").unwrap_err();
    assert!(matches!(err, ApiError::ConfigError(_)));
}

#[test]
fn test_missing_snapshot_is_reported() {
    let temp = TempDir::new().unwrap();
    let cli = cli_with_scans_dir(&temp.path().join("empty"));

    let command = Commands::Search {
        query: "json".to_string(),
        starts_with: false,
        short: false,
        full_paths: false,
        snapshot: None,
        format: "text".to_string(),
    };
    let err = run(&cli, &command, "").unwrap_err();
    assert!(matches!(err, ApiError::Snapshot(SnapshotError::NotFound(_))));
}
