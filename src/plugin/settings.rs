//! Dispatch Settings
//!
//! The validated, source-independent form of a dispatch configuration:
//! which events exist, which plugins subscribe to them, and the veto policy.
//! The CLI layer builds one from a TOML file; tests build them directly.

use crate::core::validation::normalize_identifier;
use crate::plugin::dispatcher::DispatchPolicy;
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::types::{MethodConfiguration, PluginConfiguration};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DispatchSettings {
    pub policy: DispatchPolicy,
    pub events: Vec<MethodConfiguration>,
    pub plugins: Vec<PluginConfiguration>,
}

impl DispatchSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, policy: DispatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_event(mut self, event: MethodConfiguration) -> Self {
        self.events.push(event);
        self
    }

    pub fn with_plugin(mut self, plugin: PluginConfiguration) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Normalise every identifier and reject duplicates
    ///
    /// Event names, plugin ids, subscriptions and follow-up actions are
    /// lower-cased; a plugin subscribing twice to the same event keeps one
    /// subscription.
    pub fn validate(mut self) -> PluginResult<Self> {
        let mut seen = HashSet::new();
        for event in &mut self.events {
            event.name = normalize_identifier("event name", &event.name)?;
            if !seen.insert(event.name.clone()) {
                return Err(duplicate("event", &event.name));
            }
            event.on_success = normalize_optional("on-success action", event.on_success.take())?;
            event.on_error = normalize_optional("on-error action", event.on_error.take())?;
        }

        let mut seen = HashSet::new();
        for plugin in &mut self.plugins {
            plugin.id = normalize_identifier("plugin id", &plugin.id)?;
            if !seen.insert(plugin.id.clone()) {
                return Err(duplicate("plugin", &plugin.id));
            }
            plugin.class_name = normalize_identifier("plugin class", &plugin.class_name)?;

            let mut subscribed = HashSet::new();
            let mut subscriptions = Vec::with_capacity(plugin.subscriptions.len());
            for name in &plugin.subscriptions {
                let name = normalize_identifier("subscribed event", name)?;
                if subscribed.insert(name.clone()) {
                    subscriptions.push(name);
                }
            }
            plugin.subscriptions = subscriptions;
        }

        Ok(self)
    }

    /// Names of events some plugin subscribes to without declaring them
    pub fn undeclared_events(&self) -> Vec<String> {
        let declared: HashSet<&str> = self.events.iter().map(|e| e.method_name()).collect();
        let mut undeclared: Vec<String> = self
            .plugins
            .iter()
            .flat_map(|plugin| plugin.subscriptions.iter())
            .filter(|name| !declared.contains(name.as_str()))
            .cloned()
            .collect();
        undeclared.sort();
        undeclared.dedup();
        undeclared
    }
}

fn normalize_optional(kind: &str, value: Option<String>) -> PluginResult<Option<String>> {
    value
        .map(|value| normalize_identifier(kind, &value))
        .transpose()
        .map_err(PluginError::from)
}

fn duplicate(kind: &str, name: &str) -> PluginError {
    PluginError::InvalidArgument {
        message: format!("{} '{}' is configured more than once", kind, name),
    }
}
