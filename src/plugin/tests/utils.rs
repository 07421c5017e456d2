//! Plugin Test Utilities
//!
//! Mock handlers that record what they receive into a shared journal so a
//! test can check call order across plugins.

use crate::plugin::collection::PluginCollection;
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::traits::EventHandler;
use crate::plugin::types::EventArgs;
use std::sync::{Arc, Mutex};

/// Shared record of `plugin:event` calls
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Plugin ids in call order
    pub fn callers(&self) -> Vec<String> {
        self.entries()
            .iter()
            .map(|entry| entry.split(':').next().unwrap_or_default().to_string())
            .collect()
    }
}

/// Configurable mock plugin
#[derive(Debug)]
pub struct MockPlugin {
    pub id: String,
    pub answer: bool,
    pub should_fail: bool,
    /// Empty means every event
    pub supported: Vec<String>,
    pub journal: Journal,
}

impl MockPlugin {
    pub fn new(id: &str, journal: &Journal) -> Self {
        Self {
            id: id.to_string(),
            answer: true,
            should_fail: false,
            supported: Vec::new(),
            journal: journal.clone(),
        }
    }

    pub fn vetoing(mut self) -> Self {
        self.answer = false;
        self
    }

    pub fn failing(mut self) -> Self {
        self.should_fail = true;
        self
    }

    pub fn supporting(mut self, events: &[&str]) -> Self {
        self.supported = events.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn boxed(self) -> Box<dyn EventHandler> {
        Box::new(self)
    }
}

impl EventHandler for MockPlugin {
    fn supports(&self, event_name: &str) -> bool {
        self.supported.is_empty() || self.supported.iter().any(|e| e == event_name)
    }

    fn handle(&mut self, event_name: &str, _args: &EventArgs) -> PluginResult<bool> {
        self.journal.record(format!("{}:{}", self.id, event_name));
        if self.should_fail {
            return Err(PluginError::ExecutionError {
                plugin_name: self.id.clone(),
                operation: event_name.to_string(),
                cause: "mock failure".to_string(),
            });
        }
        Ok(self.answer)
    }
}

/// Collection holding the given mocks
pub fn collection_of(plugins: Vec<MockPlugin>) -> PluginCollection {
    let mut collection = PluginCollection::new();
    for plugin in plugins {
        let id = plugin.id.clone();
        collection.insert(&id, plugin.boxed());
    }
    collection
}

/// Argument map from string pairs
pub fn args(pairs: &[(&str, &str)]) -> EventArgs {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
        .collect()
}

pub fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}
