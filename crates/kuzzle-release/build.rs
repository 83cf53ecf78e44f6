use std::process::Command;

use chrono::Utc;

const VERSION_ENV: &str = "KUZZLE_RELEASE_VERSION";

fn main() {
    for watched in ["HEAD", "refs/heads", "refs/tags"] {
        println!("cargo:rerun-if-changed=../../.git/{watched}");
    }

    let version = env!("CARGO_PKG_VERSION");
    let release_tag = format!("kuzzle-release@v{version}");

    // Release builds report the bare version; anything else carries the commit
    // and build time as semver build metadata.
    let tagged = || git(&["describe", "--tags", "--exact-match", "--match", &release_tag]).is_some();
    let full_version = match git(&["rev-parse", "--short", "HEAD"]) {
        Some(_) if tagged() => version.to_owned(),
        Some(commit) => format!("{version}+{commit}.{}", Utc::now().format("%Y%m%d%H%M%S")),
        None => format!("{version}+unknown"),
    };

    println!("cargo:rustc-env={VERSION_ENV}={full_version}");
}

/// Runs `git` and returns its trimmed stdout, or `None` on any failure.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8(output.stdout).ok()?;
    Some(stdout.trim().to_owned()).filter(|value| !value.is_empty())
}
