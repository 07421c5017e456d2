//! Dump Plugin
//!
//! Prints every event it receives to stdout and accepts it. Useful as a
//! subscriber of last resort while wiring up a configuration.
//!
//! Settings:
//! - `format`: `text` (default) or `json`
//! - `color`: colour text output (default false)

mod format;

pub use format::DumpFormat;

use crate::builtin;
use crate::core::version::get_api_version;
use crate::plugin::builtin::api::{setting_bool, setting_str, BuiltinPluginInfo};
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::traits::EventHandler;
use crate::plugin::types::{EventArgs, PluginConfiguration};
use chrono::{DateTime, Utc};
use std::str::FromStr;

const CLASS_NAME: &str = "dump";

builtin!(dump_info, create_dump);

fn dump_info() -> BuiltinPluginInfo {
    BuiltinPluginInfo {
        class_name: CLASS_NAME,
        description: "Print events and their arguments to stdout",
        api_version: get_api_version(),
    }
}

fn create_dump(plugin: &PluginConfiguration) -> PluginResult<Box<dyn EventHandler>> {
    Ok(Box::new(DumpPlugin::from_config(plugin)?))
}

#[derive(Debug, Clone)]
pub struct DumpPlugin {
    plugin_id: String,
    format: DumpFormat,
    color: bool,
    dumped: usize,
}

impl DumpPlugin {
    pub fn new(plugin_id: &str, format: DumpFormat, color: bool) -> Self {
        Self {
            plugin_id: plugin_id.to_string(),
            format,
            color,
            dumped: 0,
        }
    }

    pub fn from_config(plugin: &PluginConfiguration) -> PluginResult<Self> {
        let format = match setting_str(&plugin.settings, CLASS_NAME, "format")? {
            Some(value) => DumpFormat::from_str(value).map_err(|_| PluginError::InvalidArgument {
                message: format!(
                    "plugin '{}': unknown dump format '{}' (expected text or json)",
                    plugin.id, value
                ),
            })?,
            None => DumpFormat::default(),
        };
        let color = setting_bool(&plugin.settings, CLASS_NAME, "color")?.unwrap_or(false);
        Ok(Self::new(&plugin.id, format, color))
    }

    pub fn format(&self) -> DumpFormat {
        self.format
    }

    /// Number of events printed so far
    pub fn dumped(&self) -> usize {
        self.dumped
    }

    pub fn render(&self, timestamp: DateTime<Utc>, event_name: &str, args: &EventArgs) -> String {
        format::format_event(
            self.format,
            timestamp,
            &self.plugin_id,
            event_name,
            args,
            self.color,
        )
    }
}

impl EventHandler for DumpPlugin {
    fn handle(&mut self, event_name: &str, args: &EventArgs) -> PluginResult<bool> {
        println!("{}", self.render(Utc::now(), event_name, args));
        self.dumped += 1;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::{json, Value};

    fn args() -> EventArgs {
        let mut args = EventArgs::new();
        args.insert("title".to_string(), json!("Hello"));
        args.insert("author".to_string(), json!("alice"));
        args.insert("draft".to_string(), json!(false));
        args
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    fn configured(settings: &str) -> PluginResult<DumpPlugin> {
        let plugin = PluginConfiguration::new("audit", "dump")
            .with_settings(settings.parse::<toml::Table>().unwrap());
        DumpPlugin::from_config(&plugin)
    }

    #[test]
    fn test_defaults() {
        let plugin = configured("").unwrap();
        assert_eq!(plugin.format(), DumpFormat::Text);
        assert_eq!(plugin.dumped(), 0);
    }

    #[test]
    fn test_text_line_sorts_keys() {
        let plugin = DumpPlugin::new("audit", DumpFormat::Text, false);
        assert_eq!(
            plugin.render(noon(), "blog_new_entry", &args()),
            "[2025-01-01T12:00:00.000Z] audit: blog_new_entry author=alice draft=false title=Hello"
        );
    }

    #[test]
    fn test_text_line_without_args() {
        let plugin = DumpPlugin::new("audit", DumpFormat::Text, false);
        assert_eq!(
            plugin.render(noon(), "user_logout", &EventArgs::new()),
            "[2025-01-01T12:00:00.000Z] audit: user_logout"
        );
    }

    #[test]
    fn test_json_line() {
        let plugin = configured("format = \"JSON\"").unwrap();
        let line = plugin.render(noon(), "blog_new_entry", &args());
        let parsed: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(parsed["timestamp"], "2025-01-01T12:00:00.000Z");
        assert_eq!(parsed["plugin"], "audit");
        assert_eq!(parsed["event"], "blog_new_entry");
        assert_eq!(parsed["args"]["author"], "alice");
        assert_eq!(parsed["args"]["draft"], false);
    }

    #[test]
    fn test_colored_text_contains_escapes() {
        let plugin = configured("color = true").unwrap();
        let line = plugin.render(noon(), "blog_new_entry", &args());
        assert!(line.contains("\x1b["));
        assert!(line.contains("blog_new_entry"));
    }

    #[test]
    fn test_invalid_settings() {
        let err = configured("format = \"xml\"").unwrap_err();
        assert!(err.to_string().contains("unknown dump format 'xml'"));

        assert!(configured("color = \"yes\"").is_err());
    }

    #[test]
    fn test_handle_accepts_and_counts() {
        let mut plugin = DumpPlugin::new("audit", DumpFormat::Json, false);
        assert!(plugin.handle("blog_new_entry", &args()).unwrap());
        assert!(plugin.supports("anything"));
        assert_eq!(plugin.dumped(), 1);
    }
}
