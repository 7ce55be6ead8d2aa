use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const VALID: &str = "\
AGENT_DEVOPS_PROJECT=shop
PROVIDER_oci_TYPE=oci
SERVER_web1_PROVIDER=oci
SERVER_web1_KIND=vm
SERVER_web1_NAME=Web One
SERVER_web1_CONNECT_VIA=ssh
SERVER_web1_HOST=10.0.0.5
SERVER_web1_ENV=prod
SERVER_web1_TAGS=prod,web
SERVER_db1_PROVIDER=oci
SERVER_db1_KIND=vm
SERVER_db1_NAME=Database
SERVER_db1_CONNECT_VIA=ssh
SERVER_db1_ENV=staging
SERVER_db1_TAGS=db
";

/// Return a `Command` for the `devops-inventory` binary built by Cargo.
fn inventory_cmd() -> Command {
    cargo_bin_cmd!("devops-inventory")
}

/// Create a temp dir containing `.agent-devops.env` with the given content.
/// Returns the TempDir (for lifetime) and the path to the file.
fn make_inventory(content: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempdir().unwrap();
    let file = dir.path().join(".agent-devops.env");
    fs::write(&file, content).unwrap();
    (dir, file)
}

// ── Global flags ────────────────────────────────────────────────────

#[test]
fn help_flag() {
    inventory_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("inventory parser and validator"));
}

#[test]
fn version_flag() {
    inventory_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn about_flag() {
    inventory_cmd()
        .arg("--about")
        .assert()
        .success()
        .stdout(predicate::str::contains("devops-inventory:"))
        .stdout(predicate::str::contains("licence:"));
}

#[test]
fn no_args_shows_usage() {
    inventory_cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// ── validate ────────────────────────────────────────────────────────

#[test]
fn validate_valid_inventory() {
    let (_dir, file) = make_inventory(VALID);
    inventory_cmd()
        .args(["validate", file.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("ok"));
}

#[test]
fn validate_directory_uses_default_file_name() {
    let (dir, _) = make_inventory(VALID);
    inventory_cmd()
        .args(["validate", dir.path().to_str().unwrap()])
        .assert()
        .success();
}

#[test]
fn validate_missing_fields_fails() {
    let (_dir, file) = make_inventory("PROVIDER_hz_LABEL=Hetzner\nSERVER_web1_HOST=h\n");
    inventory_cmd()
        .args(["validate", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("[provider hz] Provider hz is missing TYPE"))
        .stderr(predicate::str::contains("Server web1 is missing CONNECT_VIA"));
}

#[test]
fn validate_invalid_port_fails() {
    let (_dir, file) = make_inventory(&format!("{VALID}SERVER_web1_PORT=notanumber\n"));
    inventory_cmd()
        .args(["validate", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid PORT for server web1"));
}

#[test]
fn validate_malformed_key_only_fails_in_strict_mode() {
    let (_dir, file) = make_inventory(&format!("{VALID}SERVER_orphan=1\n"));
    inventory_cmd()
        .args(["validate", file.to_str().unwrap()])
        .assert()
        .success();
    inventory_cmd()
        .args(["validate", "--strict", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("SERVER_orphan"));
}

#[test]
fn validate_json_output() {
    let (_dir, file) = make_inventory("SERVER_web1_PORT=x\n");
    let output = inventory_cmd()
        .args(["validate", "--format", "json", file.to_str().unwrap()])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let diags = json[0]["diagnostics"].as_array().unwrap();
    assert_eq!(diags.len(), 5);
    assert_eq!(diags[0]["scope"], "server");
    assert_eq!(diags[0]["id"], "web1");
    assert_eq!(diags[0]["code"], "E010");
}

#[test]
fn validate_multiple_paths_summary() {
    let (_a, good) = make_inventory(VALID);
    let (_b, bad) = make_inventory("PROVIDER_x_LABEL=y\n");
    inventory_cmd()
        .args(["validate", good.to_str().unwrap(), bad.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 inventories: 1 ok, 1 with errors"));
}

#[test]
fn validate_missing_file() {
    let dir = tempdir().unwrap();
    inventory_cmd()
        .args(["validate", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no inventory file found"));
}

// ── show ────────────────────────────────────────────────────────────

#[test]
fn show_prints_inventory_json() {
    let (_dir, file) = make_inventory(VALID);
    let output = inventory_cmd()
        .args(["show", file.to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["metadata"]["project"], "shop");
    assert_eq!(json["providers"]["oci"]["type"], "oci");
    assert_eq!(json["servers"]["web1"]["tags"][1], "web");
}

// ── servers ─────────────────────────────────────────────────────────

#[test]
fn servers_lists_all() {
    let (_dir, file) = make_inventory(VALID);
    inventory_cmd()
        .args(["servers", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("web1\tWeb One\t10.0.0.5"))
        .stdout(predicate::str::contains("db1\tDatabase\t-"));
}

#[test]
fn servers_filter_by_tag() {
    let (_dir, file) = make_inventory(VALID);
    inventory_cmd()
        .args(["servers", file.to_str().unwrap(), "--tag", "prod"])
        .assert()
        .success()
        .stdout(predicate::str::contains("web1"))
        .stdout(predicate::str::contains("db1").not());
}

#[test]
fn servers_filter_by_env_json() {
    let (_dir, file) = make_inventory(VALID);
    let output = inventory_cmd()
        .args([
            "servers",
            file.to_str().unwrap(),
            "--env",
            "staging",
            "--format",
            "json",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let servers = json.as_array().unwrap();
    assert_eq!(servers.len(), 1);
    assert_eq!(servers[0]["id"], "db1");
}

#[test]
fn servers_no_match() {
    let (_dir, file) = make_inventory(VALID);
    inventory_cmd()
        .args(["servers", file.to_str().unwrap(), "--role", "nope"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No matching servers"));
}

// ── format ──────────────────────────────────────────────────────────

#[test]
fn format_rewrites_file() {
    let (_dir, file) = make_inventory(VALID);
    inventory_cmd()
        .args(["format", file.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Formatted"));
    let content = fs::read_to_string(&file).unwrap();
    assert!(content.starts_with("# =========================\n# METADATA\n"));
    assert!(content.contains("# SERVERS / NODES"));

    // Second run is a no-op.
    inventory_cmd()
        .args(["format", file.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("ok"));
}

#[test]
fn format_check_does_not_modify() {
    let (_dir, file) = make_inventory(VALID);
    inventory_cmd()
        .args(["format", "--check", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Would reformat"))
        .stderr(predicate::str::contains("+# METADATA"));
    assert_eq!(fs::read_to_string(&file).unwrap(), VALID);
}

#[test]
fn format_refuses_to_drop_unrecognized_fields() {
    let content = format!(
        "{VALID}AGENT_DEVOPS_TEAM=platform\nPROVIDER_oci_TENANCY=abc\nSERVER_web1_RACK=r1\n"
    );
    let (dir, file) = make_inventory(&content);
    inventory_cmd()
        .args(["format", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to rewrite"))
        .stderr(predicate::str::contains("dropped: AGENT_DEVOPS_TEAM"))
        .stderr(predicate::str::contains("dropped: PROVIDER_oci_TENANCY"))
        .stderr(predicate::str::contains("dropped: SERVER_web1_RACK"))
        .stderr(predicate::str::contains("--allow-lossy"));
    assert_eq!(fs::read_to_string(&file).unwrap(), content);
}

#[test]
fn format_refuses_to_fill_in_invalid_records() {
    let content = "PROVIDER_hz_LABEL=Hetzner\n";
    let (_dir, file) = make_inventory(content);
    inventory_cmd()
        .args(["format", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Provider hz is missing TYPE"));
    assert_eq!(fs::read_to_string(&file).unwrap(), content);
}

#[test]
fn format_allow_lossy_rewrites_and_lists_losses() {
    let (_dir, file) = make_inventory(&format!("{VALID}SERVER_web1_RACK=r1\n"));
    inventory_cmd()
        .args(["format", "--allow-lossy", file.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("dropped: SERVER_web1_RACK"))
        .stderr(predicate::str::contains("Formatted"));
    let rewritten = fs::read_to_string(&file).unwrap();
    assert!(!rewritten.contains("RACK"));
    assert!(rewritten.contains("SERVER_web1_NAME=Web One"));
}
