//! API for builtin plugin registration and instantiation
//!
//! Builtin plugins register themselves with the `builtin!` macro and are
//! selected by their class name in configuration files.

use crate::core::version::get_api_version;
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::traits::EventHandler;
use crate::plugin::types::PluginConfiguration;

/// Static description of a builtin plugin class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltinPluginInfo {
    pub class_name: &'static str,
    pub description: &'static str,
    pub api_version: u32,
}

/// Creates a handler for a configured plugin
pub type HandlerFactory = fn(&PluginConfiguration) -> PluginResult<Box<dyn EventHandler>>;

/// Entry for a builtin plugin in the link-time registry
pub struct BuiltinPluginEntry {
    pub info: fn() -> BuiltinPluginInfo,
    pub factory: HandlerFactory,
}

inventory::collect!(BuiltinPluginEntry);

/// Register a builtin plugin class
#[macro_export]
macro_rules! builtin {
    ($info:expr, $factory:expr) => {
        inventory::submit!($crate::plugin::builtin::api::BuiltinPluginEntry {
            info: $info,
            factory: $factory,
        });
    };
}

/// All registered builtin plugin classes, sorted by class name
pub fn builtin_plugins() -> Vec<BuiltinPluginInfo> {
    let mut plugins: Vec<BuiltinPluginInfo> = inventory::iter::<BuiltinPluginEntry>()
        .map(|entry| (entry.info)())
        .collect();
    plugins.sort_by(|a, b| a.class_name.cmp(b.class_name));
    plugins
}

/// Same API year as this build
pub fn is_api_compatible(plugin_api_version: u32) -> bool {
    plugin_api_version / 10000 == get_api_version() / 10000
}

/// Create the handler for a plugin from its builtin class
pub fn instantiate(plugin: &PluginConfiguration) -> PluginResult<Box<dyn EventHandler>> {
    let class_name = plugin.class_name.as_str();
    let entry = inventory::iter::<BuiltinPluginEntry>()
        .find(|entry| (entry.info)().class_name.eq_ignore_ascii_case(class_name))
        .ok_or_else(|| PluginError::PluginNotFound {
            plugin_name: class_name.to_string(),
        })?;

    let info = (entry.info)();
    if !is_api_compatible(info.api_version) {
        return Err(PluginError::VersionIncompatible {
            message: format!(
                "Plugin class '{}' has API version {} (expected major version {})",
                info.class_name,
                info.api_version,
                get_api_version() / 10000
            ),
        });
    }

    log::debug!(
        "Builtin: instantiating '{}' as '{}'",
        plugin.id,
        info.class_name
    );
    (entry.factory)(plugin)
}

/// Optional string setting
pub fn setting_str<'a>(
    settings: &'a toml::Table,
    class_name: &str,
    key: &str,
) -> PluginResult<Option<&'a str>> {
    match settings.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or_else(|| wrong_type(class_name, key, "a string")),
    }
}

/// Optional boolean setting
pub fn setting_bool(settings: &toml::Table, class_name: &str, key: &str) -> PluginResult<Option<bool>> {
    match settings.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| wrong_type(class_name, key, "a boolean")),
    }
}

/// String list setting; a single string counts as a one-element list
pub fn setting_str_list(
    settings: &toml::Table,
    class_name: &str,
    key: &str,
) -> PluginResult<Vec<String>> {
    match settings.get(key) {
        None => Ok(Vec::new()),
        Some(toml::Value::String(value)) => Ok(vec![value.clone()]),
        Some(toml::Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| wrong_type(class_name, key, "a list of strings"))
            })
            .collect(),
        Some(_) => Err(wrong_type(class_name, key, "a list of strings")),
    }
}

fn wrong_type(class_name: &str, key: &str, expected: &str) -> PluginError {
    PluginError::InvalidArgument {
        message: format!(
            "setting '{}' of plugin class '{}' must be {}",
            key, class_name, expected
        ),
    }
}
