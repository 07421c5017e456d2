//! Plugin Manager
//!
//! Owns the repository, the instantiated plugins and the dispatcher, and
//! turns an event name plus arguments into a dispatch outcome.

use crate::core::validation::normalize_identifier;
use crate::plugin::builtin::api::instantiate;
use crate::plugin::collection::PluginCollection;
use crate::plugin::dispatcher::{DispatchPolicy, Dispatcher};
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::repository::Repository;
use crate::plugin::settings::DispatchSettings;
use crate::plugin::traits::EventHandler;
use crate::plugin::types::{EventArgs, MethodConfiguration, PluginConfiguration};
use log::{debug, info};

/// Result of handling one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub event: String,
    /// `false` when a subscriber vetoed
    pub result: bool,
    /// Follow-up event configured for this result
    pub next_action: Option<String>,
    /// Number of subscribers queued for the event
    pub subscribers: usize,
}

#[derive(Debug, Default)]
pub struct PluginManager {
    repository: Repository,
    plugins: PluginCollection,
    dispatcher: Dispatcher,
}

impl PluginManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a manager from validated settings
    ///
    /// Every event is registered, then every plugin. Inactive plugins are
    /// recorded but neither instantiated nor subscribed. Events that are
    /// subscribed to without being declared get a default configuration.
    pub fn from_settings(settings: DispatchSettings) -> PluginResult<Self> {
        let settings = settings.validate()?;
        let mut manager = Self::new();
        manager.dispatcher.set_policy(settings.policy);

        for event in settings.events {
            manager.repository.add_event(event);
        }

        for plugin in settings.plugins {
            if plugin.is_active() {
                let handler = instantiate(&plugin)?;
                manager.register_handler(plugin, handler)?;
            } else {
                manager.record_inactive(plugin)?;
            }
        }

        info!(
            "PluginManager: {} plugin(s), {} event(s), policy {}",
            manager.plugins.len(),
            manager.repository.event_count(),
            manager.dispatcher.policy()
        );
        Ok(manager)
    }

    /// Add a plugin with an explicit handler and subscribe it to its events
    ///
    /// The id and event names are normalised and checked before anything
    /// changes, so a rejected plugin leaves the manager untouched. A plugin
    /// with the same id is replaced, including its subscriptions. Inactive
    /// plugins are recorded without subscriptions and the handler is dropped.
    pub fn register_handler(
        &mut self,
        mut plugin: PluginConfiguration,
        handler: Box<dyn EventHandler>,
    ) -> PluginResult<()> {
        if !plugin.is_active() {
            return self.record_inactive(plugin);
        }

        plugin.id = normalize_identifier("plugin id", &plugin.id)?;
        plugin.subscriptions = normalize_subscriptions(&plugin.subscriptions)?;

        if self.remove_plugin(&plugin.id) {
            debug!("PluginManager: replacing plugin '{}'", plugin.id);
        }

        for name in &plugin.subscriptions {
            let event = match self.repository.event(name) {
                Some(event) => event.clone(),
                None => {
                    debug!("PluginManager: event '{}' created on subscription", name);
                    let event = MethodConfiguration::new(name);
                    self.repository.add_event(event.clone());
                    event
                }
            };
            self.repository.subscribe(&event, &plugin)?;
        }

        self.plugins.insert(&plugin.id, handler);
        self.repository.add_plugin(plugin);
        Ok(())
    }

    /// Remove a plugin, its handler and its subscriptions
    pub fn remove_plugin(&mut self, id: &str) -> bool {
        let had_handler = self.plugins.remove(id).is_some();
        self.repository.remove_plugin(id).is_some() || had_handler
    }

    fn record_inactive(&mut self, mut plugin: PluginConfiguration) -> PluginResult<()> {
        plugin.id = normalize_identifier("plugin id", &plugin.id)?;
        plugin.subscriptions = normalize_subscriptions(&plugin.subscriptions)?;
        debug!("PluginManager: plugin '{}' is inactive", plugin.id);
        self.remove_plugin(&plugin.id);
        self.repository.add_plugin(plugin);
        Ok(())
    }

    /// Dispatch an event to its subscribers
    ///
    /// Unknown events have no subscribers and are accepted. When a user level
    /// is given it must satisfy one of the event's requirements.
    pub fn handle_event(
        &mut self,
        event_name: &str,
        args: &EventArgs,
        user_level: Option<u32>,
    ) -> PluginResult<DispatchOutcome> {
        let name = normalize_identifier("event name", event_name)?;
        let event = match self.repository.event(&name) {
            Some(event) => event.clone(),
            None => {
                debug!("PluginManager: '{}' is not a configured event", name);
                MethodConfiguration::new(&name)
            }
        };

        if let Some(level) = user_level {
            if !event.is_permitted(level) {
                return Err(PluginError::AccessDenied {
                    event_name: name,
                    required_level: event.required_level(),
                    user_level: level,
                });
            }
        }

        let order = self.repository.subscribers(&name);
        let subscribers = self.plugins.ordered_mut(&order);
        let result = self.dispatcher.send_event(subscribers, &event, args)?;

        Ok(DispatchOutcome {
            next_action: event.next_action(result).map(str::to_string),
            event: name,
            result,
            subscribers: order.len(),
        })
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn plugins(&self) -> &PluginCollection {
        &self.plugins
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn set_policy(&mut self, policy: DispatchPolicy) {
        self.dispatcher.set_policy(policy);
    }

    pub fn first_event(&self) -> Option<&str> {
        self.dispatcher.first_event()
    }

    pub fn last_event(&self) -> Option<&str> {
        self.dispatcher.last_event()
    }

    pub fn last_result(&self) -> Option<bool> {
        self.dispatcher.last_result()
    }
}

/// Normalised event names in first-seen order, without repeats
fn normalize_subscriptions(names: &[String]) -> PluginResult<Vec<String>> {
    let mut normalized: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = normalize_identifier("event name", name)?;
        if !normalized.contains(&name) {
            normalized.push(name);
        }
    }
    Ok(normalized)
}
