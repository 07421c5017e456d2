//! Common test utilities and helpers
//!
//! Configuration fixtures written to temporary directories.

#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

/// A blog setup: an audit dump, the blog itself and a guard on deletions
pub const BLOG_CONFIG: &str = r#"
[dispatch]
policy = "notify-all"

[[event]]
name = "blog_new_entry"
type = "write"
on-success = "blog_read"
on-error = "blog_edit"
[[event.user]]
role = "editor"
level = 30

[[event]]
name = "blog_delete"
type = "write"
on-error = "blog_read"

[[plugin]]
id = "audit"
class = "dump"
priority = "highest"
subscribe = ["blog_new_entry", "blog_delete", "user_login"]
[plugin.settings]
format = "json"

[[plugin]]
id = "blog"
class = "dump"
priority = "normal"
subscribe = ["blog_new_entry"]

[[plugin]]
id = "guard"
class = "veto"
priority = "high"
subscribe = ["blog_new_entry", "blog_delete"]
[plugin.settings]
events = ["blog_delete"]
reason = "deletions are disabled"

[[plugin]]
id = "spam"
class = "veto"
active = "inactive"
subscribe = "blog_new_entry"
"#;

/// Write `contents` to `plugdispatch.toml` in a fresh temporary directory
///
/// Keep the returned `TempDir` alive for as long as the file is needed.
pub fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("plugdispatch.toml");
    std::fs::write(&path, contents).expect("write config");
    (dir, path)
}
