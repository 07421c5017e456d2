//! Logging setup on top of flexi_logger
//!
//! Three output formats are supported: `text` (timestamp, level, message),
//! `ext` (adds the source location) and `json` (one object per line).

use colored::Colorize;
use flexi_logger::{DeferredNow, FileSpec, Logger, LoggerHandle};
use std::io::Write;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};
use strum_macros::{Display, EnumString};

static LOGGER_HANDLE: OnceLock<Mutex<LoggerHandle>> = OnceLock::new();

/// Log line layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    #[default]
    Text,
    Ext,
    Json,
}

/// Start the global logger
///
/// Fails if the level spec or file path is invalid, or if a logger is
/// already installed for this process. The handle is kept for
/// [`set_log_level`].
pub fn init_logging(
    log_level: Option<&str>,
    log_format: Option<&str>,
    log_file: Option<&str>,
    color_enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = match log_format {
        Some(name) => LogFormat::from_str(name)
            .map_err(|_| format!("Unknown log format '{}'", name))?,
        None => LogFormat::Text,
    };

    let mut logger = Logger::try_with_str(log_level.unwrap_or("info"))?;
    logger = match (format, color_enabled) {
        (LogFormat::Json, _) => logger.format(json_format),
        (LogFormat::Ext, true) => logger.format(ext_color_format),
        (LogFormat::Ext, false) => logger.format(ext_format),
        (LogFormat::Text, true) => logger.format(text_color_format),
        (LogFormat::Text, false) => logger.format(text_format),
    };

    if let Some(path) = log_file.filter(|p| !p.eq_ignore_ascii_case("none")) {
        logger = logger.log_to_file(FileSpec::try_from(std::path::Path::new(path))?);
    }

    let handle = logger.start()?;
    LOGGER_HANDLE
        .set(Mutex::new(handle))
        .map_err(|_| "Logger handle already stored")?;
    Ok(())
}

/// Change the active log level of a running logger
///
/// Format, colour and file output are fixed when the logger starts.
pub fn set_log_level(log_level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let handle = LOGGER_HANDLE
        .get()
        .ok_or("Logger handle not initialised. Call init_logging first.")?;
    let mut handle = handle
        .lock()
        .map_err(|_| "Could not acquire logger handle lock")?;
    handle.parse_and_push_temp_spec(log_level)?;
    Ok(())
}

fn level_tag(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERR",
        log::Level::Warn => "WRN",
        log::Level::Info => "INF",
        log::Level::Debug => "DBG",
        log::Level::Trace => "TRC",
    }
}

fn colored_level_tag(level: log::Level) -> colored::ColoredString {
    let tag = level_tag(level);
    match level {
        log::Level::Error => tag.red().bold(),
        log::Level::Warn => tag.yellow(),
        log::Level::Info => tag.green(),
        log::Level::Debug => tag.blue(),
        log::Level::Trace => tag.magenta(),
    }
}

fn timestamp(now: &mut DeferredNow) -> String {
    now.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

// "2025-01-01 12:00:00.000 INF message"
fn text_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        timestamp(now),
        level_tag(record.level()),
        record.args()
    )
}

fn text_color_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {}",
        timestamp(now).dimmed(),
        colored_level_tag(record.level()),
        record.args()
    )
}

// "2025-01-01 12:00:00.000 INF message (plugin/dispatcher.rs:42)"
fn ext_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} ({})",
        timestamp(now),
        level_tag(record.level()),
        record.args(),
        source_location(record.target(), record.line())
    )
}

fn ext_color_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "{} {} {} ({})",
        timestamp(now).dimmed(),
        colored_level_tag(record.level()),
        record.args(),
        source_location(record.target(), record.line()).dimmed()
    )
}

fn json_format(
    w: &mut dyn Write,
    now: &mut DeferredNow,
    record: &log::Record,
) -> Result<(), std::io::Error> {
    let line = serde_json::json!({
        "timestamp": now.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        "level": level_tag(record.level()),
        "message": record.args().to_string(),
        "target": source_location(record.target(), record.line()),
    });
    match serde_json::to_string(&line) {
        Ok(json) => w.write_all(json.as_bytes()),
        Err(_) => w.write_all(b"{\"error\":\"Failed to serialize log message\"}"),
    }
}

// plugdispatch::plugin::dispatcher -> plugin/dispatcher.rs:42
fn source_location(target: &str, line: Option<u32>) -> String {
    let path = match target.strip_prefix("plugdispatch::") {
        Some(module) => module.replace("::", "/") + ".rs",
        None => target.replace("::", "/"),
    };
    match line {
        Some(line) => format!("{}:{}", path, line),
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(
        format: fn(&mut dyn Write, &mut DeferredNow, &log::Record) -> Result<(), std::io::Error>,
        target: &str,
    ) -> String {
        let mut buffer = Vec::new();
        let mut now = DeferredNow::new();
        format(
            &mut buffer,
            &mut now,
            &log::Record::builder()
                .level(log::Level::Info)
                .target(target)
                .line(Some(42))
                .args(format_args!("Dispatching blog_new_entry"))
                .build(),
        )
        .unwrap();
        String::from_utf8(buffer).expect("log output is UTF-8")
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert_eq!(LogFormat::from_str("EXT").unwrap(), LogFormat::Ext);
        assert_eq!(LogFormat::default(), LogFormat::Text);
        assert!(LogFormat::from_str("xml").is_err());
        assert_eq!(LogFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_text_format_layout() {
        let output = render(text_format, "plugdispatch::plugin::dispatcher");
        assert!(output.contains("INF Dispatching blog_new_entry"), "got: {}", output);
        assert!(!output.contains("dispatcher.rs"));
    }

    #[test]
    fn test_ext_format_includes_source_location() {
        let output = render(ext_format, "plugdispatch::plugin::dispatcher");
        assert!(
            output.ends_with("INF Dispatching blog_new_entry (plugin/dispatcher.rs:42)"),
            "got: {}",
            output
        );
    }

    #[test]
    fn test_json_format_fields() {
        let output = render(json_format, "other_crate::module");
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["level"], "INF");
        assert_eq!(value["message"], "Dispatching blog_new_entry");
        assert_eq!(value["target"], "other_crate/module:42");
    }

    #[test]
    fn test_source_location_without_line() {
        assert_eq!(
            source_location("plugdispatch::queue::subscribers", None),
            "queue/subscribers.rs"
        );
    }

    #[test]
    fn test_set_level_requires_running_logger() {
        let err = set_log_level("debug").unwrap_err();
        assert!(err.to_string().contains("init_logging"));
    }

    #[test]
    fn test_init_rejects_unknown_format() {
        let result = init_logging(Some("info"), Some("yaml"), None, false);
        assert!(result.is_err());
    }
}
