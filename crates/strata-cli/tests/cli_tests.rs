//! End-to-end tests for the `strata` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `strata` invocation isolated from the user's config and environment.
fn strata(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("strata").unwrap();
    cmd.current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env("HOME", dir)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

// ── basics ────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_generators() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("feature"))
        .stdout(predicate::str::contains("repository"));
}

#[test]
fn version_flag() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn bad_flag_exits_with_usage_error() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["feature", "task", "--state", "mobx"])
        .assert()
        .code(2);
}

#[test]
fn completions_for_bash() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strata"));
}

// ── list ──────────────────────────────────────────────────────────────────────

#[test]
fn list_methods_as_json() {
    let temp = TempDir::new().unwrap();
    let output = strata(temp.path())
        .args(["list", "methods", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert!(rows.iter().any(|r| r["name"] == "getById"));
    let defaults = rows.iter().filter(|r| r["default"] == true).count();
    assert_eq!(defaults, 5);
}

#[test]
fn list_table_groups_topics() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Repository methods:"))
        .stdout(predicate::str::contains("State management:"))
        .stdout(predicate::str::contains("riverpod"));
}

// ── feature ───────────────────────────────────────────────────────────────────

#[test]
fn feature_dry_run_writes_nothing() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["feature", "task", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"))
        .stdout(predicate::str::contains(
            "lib/features/task/domain/entities/task_entity.dart",
        ));
    assert!(!temp.path().join("lib").exists());
}

#[test]
fn feature_is_written_with_fields() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["feature", "task", "--field", "title:String", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated feature 'task'"));

    let entity = fs::read_to_string(
        temp.path()
            .join("lib/features/task/domain/entities/task_entity.dart"),
    )
    .unwrap();
    assert!(entity.contains("final String title;"));
}

#[test]
fn second_feature_run_conflicts_until_forced() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["feature", "task", "--yes"])
        .assert()
        .success();

    strata(temp.path())
        .args(["feature", "task", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exist"))
        .stderr(predicate::str::contains("--force"));

    strata(temp.path())
        .args(["feature", "task", "--yes", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("overwritten"));
}

#[test]
fn malformed_field_fails_before_writing() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["feature", "task", "--field", "badspec", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("badspec"));
    assert!(!temp.path().join("lib").exists());
}

#[test]
fn feature_without_local_source() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["feature", "task", "--no-local", "--yes"])
        .assert()
        .success();

    let data = temp.path().join("lib/features/task/data");
    assert!(data.join("datasources/task_remote_data_source.dart").exists());
    assert!(!data.join("datasources/task_local_data_source.dart").exists());
}

#[test]
fn integer_id_field_is_a_user_error() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["feature", "task", "--field", "id:int", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("'id'"));
    assert!(!temp.path().join("lib").exists());
}

#[test]
fn feature_json_report() {
    let temp = TempDir::new().unwrap();
    let output = strata(temp.path())
        .args(["--output-format", "json", "feature", "task", "--yes"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["kind"], "feature");
    let written = report["written"].as_array().unwrap();
    assert!(written.iter().any(|p| p
        == "lib/features/task/presentation/pages/task_list_page.dart"));
    assert_eq!(report["overwritten"], 0);
}

// ── entity / model / repository ───────────────────────────────────────────────

#[test]
fn repository_warns_about_unknown_methods() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["repository", "order", "-m", "getAll", "-m", "archiveOld", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("archiveOld"))
        .stdout(predicate::str::contains("not a catalog method"));

    let implementation = fs::read_to_string(
        temp.path()
            .join("data/repositories/order_repository_impl.dart"),
    )
    .unwrap();
    assert!(implementation.contains("UnimplementedError"));
}

#[test]
fn model_into_missing_directory_is_rejected() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["model", "user", "--output", "nowhere", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn entity_is_written() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["entity", "user", "--field", "name:String", "--yes"])
        .assert()
        .success();
    assert!(
        temp.path()
            .join("domain/entities/user_entity.dart")
            .is_file()
    );
}

// ── new ───────────────────────────────────────────────────────────────────────

#[test]
fn new_project_with_feature() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["new", "shop", "-F", "product", "--org", "com.acme", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("flutter pub get"));

    let root = temp.path().join("shop");
    let pubspec = fs::read_to_string(root.join("pubspec.yaml")).unwrap();
    assert!(pubspec.starts_with("name: shop\n"));
    assert!(
        root.join("lib/features/product/domain/entities/product_entity.dart")
            .is_file()
    );
}

#[test]
fn new_refuses_existing_directory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("shop")).unwrap();

    strata(temp.path())
        .args(["new", "shop", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn new_rejects_invalid_name() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["new", "../escape", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid name"));
    assert!(!temp.path().join("escape").exists());
}

// ── config ────────────────────────────────────────────────────────────────────

#[test]
fn config_set_then_get() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("strata.toml");
    let file = file.to_str().unwrap();

    strata(temp.path())
        .args(["config", "set", "defaults.organization", "com.acme", "--config", file])
        .assert()
        .success();

    strata(temp.path())
        .args(["config", "get", "defaults.organization", "--config", file])
        .assert()
        .success()
        .stdout("com.acme\n");
}

#[test]
fn config_unknown_key_is_not_found() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["config", "get", "defaults.lang"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("defaults.organization"));
}

#[test]
fn environment_overrides_files() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .env("STRATA__DEFAULTS__ORGANIZATION", "io.env")
        .args(["config", "get", "defaults.organization"])
        .assert()
        .success()
        .stdout("io.env\n");
}

#[test]
fn local_config_file_is_picked_up() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".strata.toml"),
        "[defaults]\nstate_management = \"bloc\"\n",
    )
    .unwrap();

    strata(temp.path())
        .args(["config", "get", "defaults.state_management"])
        .assert()
        .success()
        .stdout("bloc\n");
}

#[test]
fn missing_explicit_config_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["list", "--config", "absent.toml"])
        .assert()
        .code(4);
}

#[test]
fn init_local_then_refuse_without_force() {
    let temp = TempDir::new().unwrap();
    strata(temp.path())
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration created"));
    assert!(temp.path().join(".strata.toml").is_file());

    strata(temp.path())
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
}
