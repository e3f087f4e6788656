//! Build script for termglow.
//!
//! Emits `version.rs` into `OUT_DIR` holding the package version, suffixed
//! with the short git commit when the crate is built from a checkout:
//! MAJOR.MINOR.PATCH or MAJOR.MINOR.PATCH+g<sha>

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

fn main() {
    let version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());

    let commit = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|sha| !sha.is_empty());

    let full_version = match commit {
        Some(sha) => format!("{version}+g{sha}"),
        None => version,
    };

    let Ok(out_dir) = env::var("OUT_DIR") else {
        panic!("OUT_DIR is always set by cargo for build scripts");
    };
    let dest_path = Path::new(&out_dir).join("version.rs");
    if let Err(e) = fs::write(
        &dest_path,
        format!(
            r#"/// Package version, with the git commit when built from a checkout.
pub const VERSION: &str = "{full_version}";
"#
        ),
    ) {
        panic!("failed to write {}: {e}", dest_path.display());
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=Cargo.toml");
}
