//! Build metadata generated by the build script.

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Plugin API version of this build; built-in plugins must match it.
pub fn get_api_version() -> u32 {
    PLUGIN_API_VERSION.parse().unwrap_or(20250727)
}

pub fn build_time() -> &'static str {
    BUILD_TIME
}

pub fn git_hash() -> &'static str {
    GIT_HASH
}

/// Long version string for `--version`
pub fn long_version() -> String {
    format!(
        "{} (api {}, built {}, git {})",
        env!("CARGO_PKG_VERSION"),
        get_api_version(),
        build_time(),
        git_hash()
    )
}
