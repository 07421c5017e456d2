use chrono::Utc;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// Plugin API version declared under `[package.metadata]` in Cargo.toml
fn plugin_api_version(cargo_toml: &Path) -> String {
    fs::read_to_string(cargo_toml)
        .ok()
        .and_then(|content| content.parse::<toml::Table>().ok())
        .and_then(|manifest| {
            manifest
                .get("package")?
                .get("metadata")?
                .get("plugin_api_version")?
                .as_integer()
        })
        .map(|v| v.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn short_git_hash() -> String {
    Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    let out_dir = env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo");
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR is set by cargo");
    let cargo_toml = Path::new(&manifest_dir).join("Cargo.toml");

    let contents = format!(
        "pub const PLUGIN_API_VERSION: &str = \"{}\";\n\
         pub const BUILD_TIME: &str = \"{}\";\n\
         pub const GIT_HASH: &str = \"{}\";\n",
        plugin_api_version(&cargo_toml),
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        short_git_hash()
    );
    fs::write(Path::new(&out_dir).join("version.rs"), contents)
        .expect("failed to write version.rs");

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=.git/HEAD");
}
