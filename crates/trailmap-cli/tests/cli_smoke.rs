use assert_cmd::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join("roadmap").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn run_json(args: &[&str]) -> Value {
    let exe = assert_cmd::cargo_bin!("trailmap-cli");
    let out = Command::new(exe)
        .current_dir(repo_root())
        .args(args)
        .output()
        .expect("spawn trailmap-cli");
    assert!(
        out.status.success(),
        "trailmap-cli failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    serde_json::from_slice(&out.stdout).expect("stdout is JSON")
}

#[test]
fn cli_lays_out_json_fixture() {
    let path = fixture("platform.json");
    let layout = run_json(&[path.to_string_lossy().as_ref()]);

    let nodes = layout["nodes"].as_array().expect("nodes");
    assert_eq!(nodes[0]["name"], "Platform 2026");
    assert_eq!(layout["edges"].as_array().map(Vec::len), Some(nodes.len() - 1));
    assert!(layout["categories"].get("Security").is_some());
    assert!(layout["viewport"]["scale"].as_f64().expect("scale") <= 1.0);

    let diagnostics = layout["diagnostics"].as_array().expect("diagnostics");
    assert!(
        diagnostics
            .iter()
            .any(|d| d["kind"] == "missingName" && d["path"] == "$.items[2].items[2]"),
        "{diagnostics:?}"
    );
}

#[test]
fn cli_normalizes_yaml_fixture() {
    let path = fixture("platform.yaml");
    let out = run_json(&["normalize", "--pretty", path.to_string_lossy().as_ref()]);

    assert_eq!(out["root"]["name"], "Root");
    let names: Vec<&str> = out["root"]["children"]
        .as_array()
        .expect("children")
        .iter()
        .filter_map(|c| c["name"].as_str())
        .collect();
    assert_eq!(names, vec!["Mobile", "Web"]);
}

#[test]
fn cli_applies_config_file_and_flag_overrides() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = tmp.path().join("roadmap.yaml");
    fs::write(&config, "nodeSpacingHorizontal: 300\ncolorMode: status\n").expect("write config");

    let path = fixture("platform.json");
    let layout = run_json(&[
        "layout",
        "--config",
        config.to_string_lossy().as_ref(),
        "--color-mode",
        "visibility",
        "--hide-leaves",
        "--text-measurer",
        "deterministic",
        path.to_string_lossy().as_ref(),
    ]);

    let nodes = layout["nodes"].as_array().expect("nodes");
    assert_eq!(nodes[0]["color"], "#1565c0");
    assert!(layout["visible"].is_object());
}

#[test]
fn cli_reads_stdin() {
    let exe = assert_cmd::cargo_bin!("trailmap-cli");
    assert_cmd::Command::new(exe)
        .arg("normalize")
        .write_stdin(r#"{"name":"Solo","items":[{"name":"Only"}]}"#)
        .assert()
        .success();
}

#[test]
fn cli_rejects_empty_roadmap() {
    let exe = assert_cmd::cargo_bin!("trailmap-cli");
    assert_cmd::Command::new(exe).write_stdin("[]").assert().code(1);
}

#[test]
fn cli_rejects_unknown_flag_with_usage_code() {
    let exe = assert_cmd::cargo_bin!("trailmap-cli");
    Command::new(exe).arg("--nope").assert().code(2);
}
