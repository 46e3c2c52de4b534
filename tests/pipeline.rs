//! End-to-end load pipeline tests on replayed `go list` output.

use std::fs;

use showdeps::analysis::load_dependencies;
use showdeps::config::{Config, ConfigOverrides};
use showdeps::export::{export_to_string, ExportData, ExportFormat};
use showdeps::graph::{resolve_path, GraphError};
use showdeps::source::ReplaySource;

const MODULE_RECORDS: &str = "\
example.com/app example.com/app example.com/app/internal/db github.com/pkg/errors fmt
example.com/app/internal/db example.com/app github.com/lib/pq golang.org/x/text/unicode database/sql
github.com/pkg/errors github.com/pkg/errors fmt
github.com/lib/pq github.com/lib/pq database/sql net
golang.org/x/text/unicode golang.org/x/text
fmt _
database/sql _
net _
";

#[test]
fn test_minimal_scenario() {
    let mut source = ReplaySource::from_text("a _ b c\nb modX \nc _ \n", "a", Vec::<&str>::new());
    let loaded = load_dependencies(&mut source, Vec::new(), None).unwrap();

    let names: Vec<_> = loaded.entries.iter().map(|e| e.package.as_str()).collect();
    assert_eq!(names, vec!["c", "modX"]);
    assert_eq!(resolve_path(&loaded.inverted, "c").unwrap(), vec!["c", "a"]);
}

#[test]
fn test_module_with_config_rules() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join(".showdeps.yml");
    fs::write(
        &config_path,
        r##"
strip-path: true
path-prefix: github.com/
rules:
  - regex: "^golang.org/x/"
    label: Extended std
    color: "#3498db"
    priority: 2
  - regex: "pkg/errors"
    label: Approved
    color: green
    priority: 5
"##,
    )
    .unwrap();

    let config = Config::load(Some(&config_path), &ConfigOverrides::default()).unwrap();
    let rules = config.compile_rules().unwrap();

    let mut source = ReplaySource::from_text(
        MODULE_RECORDS,
        "example.com/app example.com/app",
        ["fmt", "database/sql", "net"],
    );
    let loaded = load_dependencies(&mut source, rules, None).unwrap();
    assert_eq!(loaded.root(), "example.com/app");

    let listing: Vec<_> = loaded
        .entries
        .iter()
        .map(|e| (e.package.as_str(), e.category.priority))
        .collect();
    assert_eq!(
        listing,
        vec![
            ("github.com/pkg/errors", 5),
            ("golang.org/x/text", 2),
            ("github.com/lib/pq", 1),
            ("database/sql", 0),
            ("fmt", 0),
            ("net", 0),
        ]
    );

    // module members are listed under their module
    assert_eq!(
        loaded.modules.children_of("golang.org/x/text"),
        vec!["golang.org/x/text/unicode"]
    );
    assert_eq!(
        resolve_path(&loaded.inverted, "golang.org/x/text/unicode").unwrap(),
        vec![
            "golang.org/x/text/unicode",
            "example.com/app/internal/db",
            "example.com/app",
        ]
    );

    let options = config.display_options();
    assert_eq!(options.display_name("github.com/lib/pq"), "lib/pq");
}

#[test]
fn test_json_export_of_loaded_module() {
    let mut source = ReplaySource::from_text(
        MODULE_RECORDS,
        "example.com/app example.com/app",
        ["fmt", "database/sql", "net"],
    );
    let loaded = load_dependencies(&mut source, Vec::new(), None).unwrap();

    let json = export_to_string(ExportFormat::Json, &ExportData::new(&loaded)).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["root"], "example.com/app");
    assert_eq!(parsed["total_dependencies"], 6);
    assert_eq!(parsed["categories"][0]["label"], "Vendor package");
    assert_eq!(parsed["categories"][0]["count"], 3);
}

#[test]
fn test_cyclic_records_truncate_path() {
    let mut source = ReplaySource::from_text("z _ b\nb _ c\nc _ b\n", "z", Vec::<&str>::new());
    let loaded = load_dependencies(&mut source, Vec::new(), None).unwrap();
    assert_eq!(loaded.cycles.len(), 1);

    let err = resolve_path(&loaded.inverted, "c").unwrap_err();
    let GraphError::CycleDetected { path } = err;
    assert_eq!(path, vec!["c", "b", "c"]);
}

#[test]
fn test_replay_files() {
    let dir = tempfile::tempdir().unwrap();
    let records = dir.path().join("records.txt");
    let std_list = dir.path().join("std.txt");
    fs::write(&records, "app _ fmt github.com/x/y\n").unwrap();
    fs::write(&std_list, "fmt\nos\n").unwrap();

    let mut source = ReplaySource::open(&records, Some("app"), Some(&std_list)).unwrap();
    let loaded = load_dependencies(&mut source, Vec::new(), None).unwrap();

    assert_eq!(loaded.entries.category_of("fmt").unwrap().label, "Standard library");
    assert_eq!(
        loaded.entries.category_of("github.com/x/y").unwrap().label,
        "Vendor package"
    );
}
