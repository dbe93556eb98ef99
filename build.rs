//! Embeds the metadata printed by `tresorerie_cli --version`.

use std::{env, process::Command};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");

    let hash = run("git", &["rev-parse", "--short", "HEAD"]).filter(|hash| !hash.is_empty());
    let status = run("git", &["status", "--porcelain"])
        .map(|changes| if changes.is_empty() { "clean" } else { "dirty" });
    let built_at = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    stamp("HASH", hash.as_deref());
    stamp("STATUS", status);
    stamp("TIMESTAMP", Some(&built_at));
    stamp("TARGET", env::var("TARGET").ok().as_deref());
    stamp("PROFILE", env::var("PROFILE").ok().as_deref());
    stamp("RUSTC", run("rustc", &["--version"]).as_deref());
}

/// Exposes `value` to the crate as `TRESORERIE_BUILD_<key>`. Missing values are left
/// unset so `build_info::current()` falls back to "unknown".
fn stamp(key: &str, value: Option<&str>) {
    if let Some(value) = value {
        println!("cargo:rustc-env=TRESORERIE_BUILD_{key}={value}");
    }
}

fn run(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
