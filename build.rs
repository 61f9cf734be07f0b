//! Embeds the commit hash and build date shown by `cutejump --version`.

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::process::Command;

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (!hash.is_empty()).then(|| hash.to_string())
}

fn main() -> io::Result<()> {
    // CI sets these; local builds ask git and the clock.
    let commit = env::var("BUILD_COMMIT")
        .ok()
        .or_else(git_short_hash)
        .unwrap_or_else(|| "unknown".to_string());
    let date = env::var("BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string());

    let out_dir = env::var("OUT_DIR").map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
    fs::write(
        Path::new(&out_dir).join("build_info.rs"),
        format!(
            "pub const BUILD_COMMIT: &str = {:?};\npub const BUILD_DATE: &str = {:?};\n",
            commit, date
        ),
    )?;

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=BUILD_COMMIT");
    println!("cargo:rerun-if-env-changed=BUILD_DATE");
    Ok(())
}
