use deptree::config::DeptreeConfig;
use deptree::tooling::cli::CliContext;
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Files written by `write_fixture`
pub struct Fixture {
    pub graph_file: PathBuf,
    pub solution: PathBuf,
}

/// One `projects` entry of a dg-spec as `dotnet msbuild -t:GenerateRestoreGraphFile` writes it
fn project_entry(root: &Path, name: &str, style: &str, frameworks: Value) -> (String, Value) {
    let dir = root.join(name);
    let file = dir
        .join(format!("{}.csproj", name))
        .to_string_lossy()
        .into_owned();
    let aliases: Vec<String> = frameworks
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default();
    let restore_frameworks: Map<String, Value> = aliases
        .iter()
        .map(|alias| {
            let entry = json!({ "targetAlias": alias, "projectReferences": {} });
            (alias.clone(), entry)
        })
        .collect();
    let entry = json!({
        "version": "1.0.0",
        "restore": {
            "projectUniqueName": file.as_str(),
            "projectName": name,
            "projectPath": file.as_str(),
            "packagesPath": "/home/dev/.nuget/packages/",
            "outputPath": format!("{}/", dir.join("obj").to_string_lossy()),
            "projectStyle": style,
            "originalTargetFrameworks": aliases,
            "sources": { "https://api.nuget.org/v3/index.json": {} },
            "frameworks": restore_frameworks
        },
        "frameworks": frameworks
    });
    (file, entry)
}

fn package(version: &str) -> Value {
    json!({ "target": "Package", "version": format!("[{}, )", version) })
}

fn framework(alias: &str, dependencies: Value) -> Value {
    json!({
        "targetAlias": alias,
        "imports": ["net461", "net462", "net47", "net471", "net472", "net48", "net481"],
        "assetTargetFallback": true,
        "warn": true,
        "dependencies": dependencies,
        "frameworkReferences": { "Microsoft.NETCore.App": { "privateAssets": "all" } },
        "runtimeIdentifierGraphPath": "/usr/share/dotnet/sdk/8.0.100/RuntimeIdentifierGraph.json"
    })
}

fn graph_json(root: &Path) -> String {
    // Written in sorted order so the document reads the same with or without
    // serde_json's preserve_order feature.
    let projects: Map<String, Value> = vec![
        project_entry(
            root,
            "Api",
            "PackageReference",
            json!({ "net8.0": framework("net8.0", json!({ "Serilog": package("3.1.1") })) }),
        ),
        project_entry(
            root,
            "App",
            "PackageReference",
            json!({
                "net472": framework("net472", json!({ "Newtonsoft.Json": package("13.0.1") })),
                "net8.0": framework("net8.0", json!({
                    "Newtonsoft.Json": package("13.0.1"),
                    "Not.Restored": package("1.0.0"),
                    "Serilog.Sinks.Console": package("5.0.0")
                }))
            }),
        ),
        project_entry(
            root,
            "Legacy",
            "PackagesConfig",
            json!({ "net48": framework("net48", json!({ "Newtonsoft.Json": package("13.0.1") })) }),
        ),
    ]
    .into_iter()
    .collect();

    let solution_projects: Map<String, Value> = projects
        .keys()
        .map(|key| (key.clone(), json!({})))
        .collect();
    json!({
        "format": 1,
        "restore": solution_projects,
        "projects": projects
    })
    .to_string()
}

/// `obj/project.assets.json` for App after `dotnet restore -r win-x64`.
///
/// The runtime-specific target comes first and pulls in a native package
/// that the runtime-agnostic target does not have.
const APP_ASSETS: &str = r##"{
  "version": 3,
  "targets": {
    ".NETCoreApp,Version=v8.0/win-x64": {
      "Newtonsoft.Json/13.0.1": {
        "type": "package",
        "compile": { "lib/net6.0/Newtonsoft.Json.dll": { "related": ".xml" } },
        "runtime": { "lib/net6.0/Newtonsoft.Json.dll": { "related": ".xml" } }
      },
      "Serilog/3.1.1": {
        "type": "package",
        "dependencies": { "runtime.win-x64.Serilog.Native": "1.0.0" },
        "compile": { "lib/net7.0/Serilog.dll": {} },
        "runtime": { "lib/net7.0/Serilog.dll": {} }
      },
      "Serilog.Sinks.Console/5.0.0": {
        "type": "package",
        "dependencies": { "Serilog": "3.1.1" },
        "compile": { "lib/net7.0/Serilog.Sinks.Console.dll": {} },
        "runtime": { "lib/net7.0/Serilog.Sinks.Console.dll": {} }
      },
      "runtime.win-x64.Serilog.Native/1.0.0": {
        "type": "package",
        "runtimeTargets": {
          "runtimes/win-x64/native/serilog.dll": { "assetType": "native", "rid": "win-x64" }
        }
      }
    },
    ".NETCoreApp,Version=v8.0": {
      "Newtonsoft.Json/13.0.1": {
        "type": "package",
        "compile": { "lib/net6.0/Newtonsoft.Json.dll": { "related": ".xml" } },
        "runtime": { "lib/net6.0/Newtonsoft.Json.dll": { "related": ".xml" } }
      },
      "Serilog/3.1.1": {
        "type": "package",
        "compile": { "lib/net7.0/Serilog.dll": {} },
        "runtime": { "lib/net7.0/Serilog.dll": {} }
      },
      "Serilog.Sinks.Console/5.0.0": {
        "type": "package",
        "dependencies": { "Serilog": "3.1.1" },
        "compile": { "lib/net7.0/Serilog.Sinks.Console.dll": {} },
        "runtime": { "lib/net7.0/Serilog.Sinks.Console.dll": {} }
      }
    },
    ".NETFramework,Version=v4.7.2": {
      "Newtonsoft.Json/13.0.1": {
        "type": "package",
        "compile": { "lib/net45/Newtonsoft.Json.dll": { "related": ".xml" } },
        "runtime": { "lib/net45/Newtonsoft.Json.dll": { "related": ".xml" } }
      }
    }
  },
  "libraries": {
    "Newtonsoft.Json/13.0.1": {
      "sha512": "ppPFpBcvxdsfUonNcvITKqLl3bqxWbDCZIzDWHzjpdAHRFfZe0Dw9HmA0+za13IdyrgJ==",
      "type": "package",
      "path": "newtonsoft.json/13.0.1",
      "files": ["lib/net45/Newtonsoft.Json.dll", "lib/net6.0/Newtonsoft.Json.dll"]
    },
    "Serilog/3.1.1": { "type": "package", "path": "serilog/3.1.1" },
    "Serilog.Sinks.Console/5.0.0": { "type": "package", "path": "serilog.sinks.console/5.0.0" },
    "runtime.win-x64.Serilog.Native/1.0.0": {
      "type": "package",
      "path": "runtime.win-x64.serilog.native/1.0.0"
    }
  },
  "projectFileDependencyGroups": {
    ".NETCoreApp,Version=v8.0": [
      "Newtonsoft.Json >= 13.0.1",
      "Not.Restored >= 1.0.0",
      "Serilog.Sinks.Console >= 5.0.0"
    ],
    ".NETFramework,Version=v4.7.2": ["Newtonsoft.Json >= 13.0.1"]
  },
  "packageFolders": { "/home/dev/.nuget/packages/": {} },
  "project": {
    "version": "1.0.0",
    "restore": { "projectName": "App", "projectStyle": "PackageReference" },
    "frameworks": {
      "net472": { "targetAlias": "net472" },
      "net8.0": { "targetAlias": "net8.0" }
    },
    "runtimes": { "win-x64": { "#import": [] } }
  }
}"##;

/// Write a three-project graph: App (restored for net8.0, net472, and
/// win-x64), Api (never restored), and Legacy (packages.config, excluded).
pub fn write_fixture(root: &Path) -> Fixture {
    let app_obj = root.join("App").join("obj");
    fs::create_dir_all(&app_obj).unwrap();
    fs::create_dir_all(root.join("Api")).unwrap();
    fs::write(app_obj.join("project.assets.json"), APP_ASSETS).unwrap();

    let graph_file = root.join("graph.dg.json");
    fs::write(&graph_file, graph_json(root)).unwrap();
    Fixture {
        graph_file,
        solution: root.join("Sample.sln"),
    }
}

/// CLI context writing snapshots into `scans_dir`
pub fn cli_with_scans_dir(scans_dir: &Path) -> CliContext {
    let mut config = DeptreeConfig::default();
    config.scan.output_dir = Some(scans_dir.to_path_buf());
    config.search.workers = 2;
    CliContext::new(config).unwrap()
}
