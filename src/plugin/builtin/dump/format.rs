//! Formatting utilities for DumpPlugin
use crate::core::styles::StyleRole;
use crate::plugin::types::EventArgs;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DumpFormat {
    #[default]
    Text,
    Json,
}

pub fn format_event(
    format: DumpFormat,
    timestamp: DateTime<Utc>,
    plugin_id: &str,
    event_name: &str,
    args: &EventArgs,
    color_enabled: bool,
) -> String {
    match format {
        DumpFormat::Json => format_json(timestamp, plugin_id, event_name, args),
        DumpFormat::Text => format_text(timestamp, plugin_id, event_name, args, color_enabled),
    }
}

fn format_json(timestamp: DateTime<Utc>, plugin_id: &str, event_name: &str, args: &EventArgs) -> String {
    json!({
        "timestamp": timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        "plugin": plugin_id,
        "event": event_name,
        "args": Value::Object(args.clone()),
    })
    .to_string()
}

// [2025-01-01T12:00:00.000Z] audit: blog_new_entry author=alice title=Hello
fn format_text(
    timestamp: DateTime<Utc>,
    plugin_id: &str,
    event_name: &str,
    args: &EventArgs,
    color_enabled: bool,
) -> String {
    let paint = |role: StyleRole, text: &str| role.paint(text, color_enabled);

    let mut line = format!(
        "[{}] {}: {}",
        paint(
            StyleRole::Dim,
            &timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
        ),
        paint(StyleRole::Plugin, plugin_id),
        paint(StyleRole::Event, event_name)
    );

    let mut keys: Vec<&String> = args.keys().collect();
    keys.sort();
    for key in keys {
        let value = match &args[key.as_str()] {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        line.push(' ');
        line.push_str(&paint(StyleRole::Key, key));
        line.push('=');
        line.push_str(&paint(StyleRole::Value, &value));
    }
    line
}
