//! Build script that stamps the `--version` string from git.

use std::process::Command;

fn main() {
    // The crate lives below the repository root, so ask git where its
    // metadata is instead of assuming `.git` next to this file.
    if let Some(git_dir) = git(&["rev-parse", "--git-dir"]) {
        println!("cargo:rerun-if-changed={}/HEAD", git_dir);
        println!("cargo:rerun-if-changed={}/refs/", git_dir);
    }

    // Release tarballs have no git metadata; fall back to the manifest version.
    let version = describe().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=STOREFRONT_VERSION={}", version);
}

/// `v0.3.1-4-gabc1234-dirty` becomes `0.3.1-4-gabc1234-dirty`.
fn describe() -> Option<String> {
    let version = git(&["describe", "--tags", "--always", "--dirty"])?;
    Some(match version.strip_prefix('v') {
        Some(stripped) => stripped.to_string(),
        None => version,
    })
}

/// Run git and return its trimmed stdout, or `None` on any failure.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }

    let stdout = String::from_utf8(output.stdout).ok()?;
    let stdout = stdout.trim();
    (!stdout.is_empty()).then(|| stdout.to_string())
}
