//! TOML configuration file parsing and loading
//!
//! The file declares events, plugins and the dispatch policy, plus defaults
//! for the logging options that the command line can override.

use crate::core::error_handling::ContextualError;
use crate::plugin::api::{
    ActiveState, DispatchPolicy, DispatchSettings, EventType, MethodConfiguration,
    PluginConfiguration, PluginPriority, PluginType, UserRequirement,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const APP_DIR: &str = "Plugdispatch";
const CONFIG_FILE_NAME: &str = "plugdispatch.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("The specified configuration file does not exist: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading configuration file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{message}")]
    Parse { message: String },

    #[error("{message}")]
    Invalid { message: String },
}

impl ConfigError {
    fn invalid(message: impl Into<String>) -> Self {
        ConfigError::Invalid {
            message: message.into(),
        }
    }
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        self.user_message().is_some()
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            ConfigError::Parse { message } | ConfigError::Invalid { message } => Some(message),
            ConfigError::NotFound { .. } | ConfigError::Io { .. } => None,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Contents of a configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub log_level: Option<String>,
    pub log_format: Option<String>,
    pub log_file: Option<String>,
    pub color: Option<bool>,
    #[serde(default)]
    pub dispatch: DispatchSection,
    #[serde(default, rename = "event")]
    pub events: Vec<EventSection>,
    #[serde(default, rename = "plugin")]
    pub plugins: Vec<PluginSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct DispatchSection {
    pub policy: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct EventSection {
    pub name: String,
    #[serde(rename = "type")]
    pub event_type: Option<String>,
    pub template: Option<String>,
    pub title: Option<String>,
    pub on_success: Option<String>,
    pub on_error: Option<String>,
    #[serde(default)]
    pub safe_mode: bool,
    #[serde(default, rename = "user")]
    pub users: Vec<UserSection>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserSection {
    pub role: Option<String>,
    pub group: Option<String>,
    #[serde(default)]
    pub level: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PluginSection {
    pub id: String,
    pub class: String,
    pub priority: Option<PrioritySpec>,
    pub active: Option<String>,
    #[serde(rename = "type")]
    pub plugin_type: Option<String>,
    #[serde(default)]
    pub subscribe: OneOrMany,
    #[serde(default)]
    pub settings: toml::Table,
}

/// `priority = 3` or `priority = "high"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PrioritySpec {
    Value(i32),
    Named(String),
}

/// A single string or a list of strings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl Default for OneOrMany {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

impl OneOrMany {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            OneOrMany::One(value) => vec![value],
            OneOrMany::Many(values) => values,
        }
    }
}

/// `<config dir>/Plugdispatch/plugdispatch.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE_NAME))
}

impl Config {
    /// Parse configuration text; `origin` names the source in messages
    pub fn parse(contents: &str, origin: &str) -> ConfigResult<Self> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse {
            message: format!("Error parsing configuration file {}: {}", origin, e),
        })
    }

    /// Load a configuration file
    ///
    /// A file given explicitly must exist. Without one, the default location
    /// is used if a file exists there, otherwise the configuration is empty.
    pub async fn load(config_file: Option<&Path>) -> ConfigResult<(Self, Option<PathBuf>)> {
        let path = match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound {
                        path: path.to_path_buf(),
                    });
                }
                path.to_path_buf()
            }
            None => match default_config_path() {
                Some(path) if path.exists() => path,
                _ => {
                    log::debug!("Config: no configuration file, using defaults");
                    return Ok((Self::default(), None));
                }
            },
        };

        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| ConfigError::Io {
                path: path.clone(),
                source,
            })?;
        let config = Self::parse(&contents, &path.display().to_string())?;
        log::debug!(
            "Config: loaded {} event(s) and {} plugin(s) from {}",
            config.events.len(),
            config.plugins.len(),
            path.display()
        );
        Ok((config, Some(path)))
    }

    /// Convert into dispatch settings, validating every enumerated value
    pub fn to_settings(&self) -> ConfigResult<DispatchSettings> {
        let mut settings = DispatchSettings::new();
        if let Some(policy) = &self.dispatch.policy {
            settings.policy = parse_enum::<DispatchPolicy>("dispatch policy", policy)?;
        }
        for event in &self.events {
            settings.events.push(event.to_configuration()?);
        }
        for plugin in &self.plugins {
            settings.plugins.push(plugin.to_configuration()?);
        }
        Ok(settings)
    }
}

impl EventSection {
    fn to_configuration(&self) -> ConfigResult<MethodConfiguration> {
        let mut event = MethodConfiguration::new(&self.name).with_follow_up(
            self.on_success.as_deref(),
            self.on_error.as_deref(),
        );
        if let Some(event_type) = &self.event_type {
            event = event.with_type(parse_enum::<EventType>("event type", event_type)?);
        }
        if let Some(template) = &self.template {
            event = event.with_template(template);
        }
        event.title = self.title.clone();
        event.safe_mode = self.safe_mode;
        for user in &self.users {
            event = event.with_requirement(UserRequirement {
                role: user.role.clone(),
                group: user.group.clone(),
                level: user.level,
            });
        }
        Ok(event)
    }
}

impl PluginSection {
    fn to_configuration(&self) -> ConfigResult<PluginConfiguration> {
        let mut plugin = PluginConfiguration::new(&self.id, &self.class)
            .with_subscriptions(self.subscribe.clone().into_vec())
            .with_settings(self.settings.clone());
        match &self.priority {
            Some(PrioritySpec::Value(value)) => plugin = plugin.with_priority(*value),
            Some(PrioritySpec::Named(name)) => {
                plugin = plugin
                    .with_priority(parse_enum::<PluginPriority>("plugin priority", name)?.value())
            }
            None => {}
        }
        if let Some(active) = &self.active {
            plugin = plugin.with_active(parse_enum::<ActiveState>("plugin state", active)?);
        }
        if let Some(plugin_type) = &self.plugin_type {
            plugin = plugin.with_type(parse_enum::<PluginType>("plugin type", plugin_type)?);
        }
        Ok(plugin)
    }
}

fn parse_enum<T: FromStr>(kind: &str, value: &str) -> ConfigResult<T> {
    T::from_str(value.trim()).map_err(|_| ConfigError::invalid(format!("Unknown {} '{}'", kind, value)))
}
