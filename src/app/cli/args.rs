//! Command line arguments
//!
//! Options given here override the corresponding configuration file values.

use crate::core::validation::{normalize_identifier, parse_key_value, ValidationError};
use crate::plugin::api::EventArgs;
use clap::{ArgAction, Parser};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "plugdispatch")]
#[command(about = "Dispatch events to prioritised plugin subscribers")]
#[command(version)]
#[command(after_help = "Exit status: 0 accepted, 2 vetoed, 1 error")]
pub struct Args {
    /// Event to dispatch
    #[arg(value_name = "EVENT")]
    pub event: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Event argument, can be repeated
    #[arg(short = 'a', long = "arg", value_name = "KEY=VALUE", action = ArgAction::Append)]
    pub args: Vec<String>,

    /// Access level of the user raising the event
    #[arg(short = 'u', long = "user-level", value_name = "LEVEL")]
    pub user_level: Option<u32>,

    /// Behaviour after a veto
    #[arg(long = "policy", value_name = "POLICY", value_parser = ["notify-all", "stop-on-veto"])]
    pub policy: Option<String>,

    /// List plugins, events and subscriptions, then exit
    #[arg(long = "list", action = ArgAction::SetTrue)]
    pub list: bool,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Force coloured output
    #[arg(long = "color", action = ArgAction::SetTrue, overrides_with = "no_color")]
    pub color: bool,

    /// Disable coloured output
    #[arg(long = "no-color", action = ArgAction::SetTrue, overrides_with = "color")]
    pub no_color: bool,
}

impl Args {
    /// `Some` when colour was forced on or off on the command line
    pub fn color_override(&self) -> Option<bool> {
        match (self.color, self.no_color) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    /// The event name, normalised
    pub fn event_name(&self) -> Result<Option<String>, ValidationError> {
        self.event
            .as_deref()
            .map(|name| normalize_identifier("event name", name))
            .transpose()
    }

    /// Collect `--arg KEY=VALUE` pairs; a later key replaces an earlier one
    ///
    /// Values that read as JSON numbers or booleans keep that type, anything
    /// else is passed as a string.
    pub fn event_args(&self) -> Result<EventArgs, ValidationError> {
        let mut event_args = EventArgs::new();
        for arg in &self.args {
            let (key, value) = parse_key_value(arg)?;
            event_args.insert(key, typed_value(value));
        }
        Ok(event_args)
    }
}

fn typed_value(value: String) -> Value {
    match serde_json::from_str::<Value>(&value) {
        Ok(parsed @ (Value::Bool(_) | Value::Number(_))) => parsed,
        _ => Value::String(value),
    }
}
