//! Plugin Repository
//!
//! Holds plugin and event configurations and the subscriber queue of every
//! event. Queues are created on first subscription.

use crate::plugin::error::PluginResult;
use crate::plugin::types::{MethodConfiguration, PluginConfiguration};
use crate::queue::api::{Queue, QueueCollection};
use std::collections::HashMap;

/// Plugin and event metadata plus the resulting subscriptions
#[derive(Default)]
pub struct Repository {
    /// Plugin id -> plugin configuration
    plugins: HashMap<String, PluginConfiguration>,

    /// Event name -> event configuration
    events: HashMap<String, MethodConfiguration>,

    /// Subscriber queues, materialised on first use
    queues: Option<QueueCollection>,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("plugins", &self.plugin_ids())
            .field("events", &self.event_names())
            .field("queues", &self.queues)
            .finish()
    }
}

impl Repository {
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
            events: HashMap::new(),
            queues: None,
        }
    }

    /// Register a plugin, replacing any configuration with the same id
    pub fn add_plugin(&mut self, plugin: PluginConfiguration) -> Option<PluginConfiguration> {
        let replaced = self.plugins.insert(plugin.id.clone(), plugin);
        if let Some(old) = &replaced {
            log::debug!("Repository: plugin '{}' configuration replaced", old.id);
        }
        replaced
    }

    /// Register an event, replacing any configuration with the same name
    pub fn add_event(&mut self, event: MethodConfiguration) -> Option<MethodConfiguration> {
        let replaced = self.events.insert(event.name.clone(), event);
        if let Some(old) = &replaced {
            log::debug!("Repository: event '{}' configuration replaced", old.name);
        }
        replaced
    }

    /// Remove a plugin and all of its subscriptions
    ///
    /// Subscriptions are dropped even when no configuration is recorded for
    /// the id.
    pub fn remove_plugin(&mut self, id: &str) -> Option<PluginConfiguration> {
        if let Some(queues) = self.queues.as_mut() {
            for name in queues.event_names() {
                if let Some(queue) = queues.get_mut(&name) {
                    queue.unsubscribe(id);
                }
            }
        }
        self.plugins.remove(id)
    }

    /// Subscribe a plugin to an event at the plugin's priority
    pub fn subscribe(
        &mut self,
        event: &MethodConfiguration,
        subscriber: &PluginConfiguration,
    ) -> PluginResult<()> {
        self.queue_mut(event.method_name())?
            .subscribe(&subscriber.id, subscriber.priority)?;
        log::debug!(
            "Repository: '{}' subscribed to '{}' at priority {}",
            subscriber.id,
            event.method_name(),
            subscriber.priority
        );
        Ok(())
    }

    /// Remove a subscription; unknown events or subscribers are ignored
    pub fn unsubscribe(&mut self, event: &MethodConfiguration, subscriber_id: &str) -> bool {
        self.queues
            .as_mut()
            .and_then(|queues| queues.get_mut(event.method_name()))
            .map(|queue| queue.unsubscribe(subscriber_id))
            .unwrap_or(false)
    }

    /// Subscriber ids of an event, highest priority first
    ///
    /// Unknown events have no subscribers.
    pub fn subscribers(&self, event_name: &str) -> Vec<String> {
        self.queue(event_name)
            .map(Queue::subscribers)
            .unwrap_or_default()
    }

    /// Events a plugin is subscribed to, sorted
    pub fn subscriptions_of(&self, plugin_id: &str) -> Vec<String> {
        let Some(queues) = self.queues.as_ref() else {
            return Vec::new();
        };
        queues
            .event_names()
            .into_iter()
            .filter(|name| {
                queues
                    .get(name)
                    .is_some_and(|queue| queue.contains(plugin_id))
            })
            .collect()
    }

    pub fn queue(&self, event_name: &str) -> Option<&Queue> {
        self.queues.as_ref()?.get(event_name)
    }

    pub fn is_plugin(&self, id: &str) -> bool {
        self.plugins.contains_key(id)
    }

    pub fn is_event(&self, name: &str) -> bool {
        self.events.contains_key(name)
    }

    pub fn plugin(&self, id: &str) -> Option<&PluginConfiguration> {
        self.plugins.get(id)
    }

    pub fn event(&self, name: &str) -> Option<&MethodConfiguration> {
        self.events.get(name)
    }

    /// Plugin ids, sorted
    pub fn plugin_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.plugins.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Event names, sorted
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.events.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    fn queues_mut(&mut self) -> &mut QueueCollection {
        self.queues.get_or_insert_with(QueueCollection::new)
    }

    fn queue_mut(&mut self, event_name: &str) -> PluginResult<&mut Queue> {
        Ok(self.queues_mut().get_or_create(event_name)?)
    }
}
