//! Tests running the `plugdispatch` executable

use crate::common::{write_config, BLOG_CONFIG};
use serial_test::serial;
use std::process::{Command, Output};

fn plugdispatch(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_plugdispatch"))
        .args(args)
        .env("NO_COLOR", "1")
        .output()
        .expect("run plugdispatch")
}

#[test]
#[serial]
fn test_accepted_event_exits_zero() {
    let (_dir, path) = write_config(BLOG_CONFIG);
    let output = plugdispatch(&[
        "-c",
        path.to_str().unwrap(),
        "-l",
        "off",
        "-a",
        "title=Hello",
        "blog_new_entry",
    ]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"plugin\":\"audit\""));
    assert!(stdout.contains("blog: blog_new_entry title=Hello"));
    assert!(stdout.contains("blog_new_entry: accepted (3 subscribers) -> blog_read"));
}

#[test]
#[serial]
fn test_vetoed_event_exits_two() {
    let (_dir, path) = write_config(BLOG_CONFIG);
    let output = plugdispatch(&["-c", path.to_str().unwrap(), "-l", "off", "blog_delete"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stdout).contains("blog_delete: vetoed"));
}

#[test]
#[serial]
fn test_errors_exit_one() {
    let output = plugdispatch(&["-c", "/nonexistent/plugdispatch.toml", "user_login"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));

    let (_dir, path) = write_config(BLOG_CONFIG);
    let output = plugdispatch(&[
        "-c",
        path.to_str().unwrap(),
        "-l",
        "off",
        "-u",
        "1",
        "blog_new_entry",
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Access denied"));
}

#[test]
#[serial]
fn test_list() {
    let (_dir, path) = write_config(BLOG_CONFIG);
    let output = plugdispatch(&["-c", path.to_str().unwrap(), "-l", "off", "--list"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Plugins"));
    assert!(stdout.contains("audit > guard > blog"));
    assert!(stdout.contains("Builtin classes"));
}
