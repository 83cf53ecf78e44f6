use std::fs;
use std::path::Path;

use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

fn kuzzle_release(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("kuzzle-release");
    cmd.env_clear()
        .args(["-C", dir.to_str().expect("utf-8 path")]);
    cmd
}

fn create_package() -> TempDir {
    let dir = TempDir::new().expect("create temp dir");
    fs::write(
        dir.path().join("package.json"),
        r#"{"name": "kuzzle-sdk", "version": "1.0.0"}"#,
    )
    .expect("write package.json");
    dir
}

#[test]
fn verify_reports_invalid_npm_publish_and_missing_token() {
    let dir = create_package();

    kuzzle_release(dir.path())
        .args(["verify-conditions", "--plugin-config", r#"{"npmPublish": "yes"}"#])
        .assert()
        .failure()
        .stderr(contains("EINVALIDNPMPUBLISH").and(contains("ENONPMTOKEN")))
        .stderr(contains("verification failed with 2 error(s)"));
}

#[test]
fn verify_with_publish_disabled_needs_no_manifest() {
    let dir = TempDir::new().expect("create temp dir");

    kuzzle_release(dir.path())
        .args(["verify-conditions", "--npm-publish", "false"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn verify_reports_missing_package_json() {
    let dir = TempDir::new().expect("create temp dir");

    kuzzle_release(dir.path())
        .args(["verify-conditions", "--npm-publish", "true"])
        .assert()
        .failure()
        .stderr(contains("ENOPKG"));
}

#[test]
fn verify_checks_plugin_order_from_context() {
    let dir = create_package();
    fs::write(
        dir.path().join("context.json"),
        r#"{
            "cwd": ".",
            "env": {},
            "options": {"plugins": [
                ["@semantic-release/git", {"assets": ["CHANGELOG.md"]}],
                ["semantic-release-config-kuzzle/plugin", {"npmPublish": false}]
            ]}
        }"#,
    )
    .expect("write context");

    kuzzle_release(dir.path())
        .args(["verify-conditions", "--context", "context.json"])
        .assert()
        .failure()
        .stderr(contains("EINVALIDSETUP"))
        .stderr(contains("ENONPMTOKEN").not());
}

#[test]
fn publish_disabled_prints_null() {
    let dir = create_package();

    kuzzle_release(dir.path())
        .args(["publish", "--npm-publish", "false", "--version", "1.1.0"])
        .assert()
        .success()
        .stdout(contains("null"));
}

#[test]
fn add_channel_disabled_prints_null() {
    let dir = create_package();

    kuzzle_release(dir.path())
        .args(["add-channel", "--npm-publish", "false", "--version", "1.1.0"])
        .assert()
        .success()
        .stdout(contains("null"));
}

#[test]
fn publish_needs_a_version() {
    let dir = create_package();

    kuzzle_release(dir.path())
        .args(["publish", "--npm-publish", "true"])
        .assert()
        .failure()
        .stderr(contains("needs a next release"));
}

#[test]
fn invalid_context_file_is_reported() {
    let dir = create_package();
    fs::write(dir.path().join("context.json"), "{ not json").expect("write context");

    kuzzle_release(dir.path())
        .args(["prepare", "--context", "context.json"])
        .assert()
        .failure()
        .stderr(contains("invalid release context"));
}

#[test]
fn context_conflicts_with_version_flag() {
    let dir = create_package();

    kuzzle_release(dir.path())
        .args(["publish", "--context", "context.json", "--version", "1.0.0"])
        .assert()
        .failure()
        .stderr(contains("cannot be used with"));
}

#[test]
fn release_with_publish_disabled_runs_every_step() {
    let dir = create_package();

    kuzzle_release(dir.path())
        .args(["release", "--npm-publish", "false", "--version", "1.1.0"])
        .assert()
        .success()
        .stdout("null\n")
        .stderr(contains("Skip publishing to npm registry as npmPublish is false"));

    let manifest = fs::read_to_string(dir.path().join("package.json")).expect("read package.json");
    assert!(manifest.contains(r#""version": "1.0.0""#));
}

#[test]
fn release_reports_verification_failures_before_preparing() {
    let dir = create_package();

    kuzzle_release(dir.path())
        .args(["release", "--npm-publish", "true", "--version", "1.1.0"])
        .assert()
        .failure()
        .stderr(contains("ENONPMTOKEN"))
        .stdout("");
}

#[test]
fn relative_project_directory_is_resolved() {
    let dir = create_package();

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("kuzzle-release");
    cmd.env_clear()
        .current_dir(dir.path())
        .args(["-C", ".", "verify-conditions", "--npm-publish", "true"])
        .assert()
        .failure()
        .stderr(contains("ENONPMTOKEN"))
        .stderr(contains("ENOPKG").not());
}

#[test]
fn missing_project_directory_is_reported() {
    let dir = TempDir::new().expect("create temp dir");

    kuzzle_release(&dir.path().join("gone"))
        .args(["verify-conditions"])
        .assert()
        .failure()
        .stderr(contains("is not accessible"));
}
