//! Build identification for the startup log
//!
//! Exposes `GIT_HASH`, `BUILD_TIMESTAMP` and `BUILD_PROFILE` to `env!`.

use std::process::Command;

fn main() {
    let git_hash = short_commit().unwrap_or_else(|| "unknown".to_owned());
    let built_at = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "unknown".to_owned());

    for (key, value) in [
        ("GIT_HASH", git_hash),
        ("BUILD_TIMESTAMP", built_at.to_string()),
        ("BUILD_PROFILE", profile),
    ] {
        println!("cargo:rustc-env={}={}", key, value);
    }
}

/// Abbreviated HEAD commit, if built from a git checkout
fn short_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=8", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    Some(hash.trim().to_owned())
}
