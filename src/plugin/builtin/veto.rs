//! Veto Plugin
//!
//! Rejects events, either all of them or the ones listed in `events`.
//! Combined with a high priority and the `stop-on-veto` dispatch policy it
//! keeps lower priority plugins from ever seeing an event.
//!
//! Settings:
//! - `events`: event name or list of names to reject (default: all)
//! - `reason`: text included in the log message

use crate::builtin;
use crate::core::validation::normalize_identifier;
use crate::core::version::get_api_version;
use crate::plugin::builtin::api::{setting_str, setting_str_list, BuiltinPluginInfo};
use crate::plugin::error::PluginResult;
use crate::plugin::traits::EventHandler;
use crate::plugin::types::{EventArgs, PluginConfiguration};

const CLASS_NAME: &str = "veto";

builtin!(veto_info, create_veto);

fn veto_info() -> BuiltinPluginInfo {
    BuiltinPluginInfo {
        class_name: CLASS_NAME,
        description: "Reject all or selected events",
        api_version: get_api_version(),
    }
}

fn create_veto(plugin: &PluginConfiguration) -> PluginResult<Box<dyn EventHandler>> {
    Ok(Box::new(VetoPlugin::from_config(plugin)?))
}

#[derive(Debug, Clone, Default)]
pub struct VetoPlugin {
    plugin_id: String,
    /// Empty means every event
    events: Vec<String>,
    reason: Option<String>,
    vetoed: usize,
}

impl VetoPlugin {
    pub fn new(plugin_id: &str) -> Self {
        Self {
            plugin_id: plugin_id.to_string(),
            ..Self::default()
        }
    }

    pub fn with_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.events = events.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_reason(mut self, reason: &str) -> Self {
        self.reason = Some(reason.to_string());
        self
    }

    pub fn from_config(plugin: &PluginConfiguration) -> PluginResult<Self> {
        let events = setting_str_list(&plugin.settings, CLASS_NAME, "events")?
            .iter()
            .map(|name| normalize_identifier("event", name))
            .collect::<Result<Vec<_>, _>>()?;
        let mut veto = Self::new(&plugin.id).with_events(events);
        if let Some(reason) = setting_str(&plugin.settings, CLASS_NAME, "reason")? {
            veto = veto.with_reason(reason);
        }
        Ok(veto)
    }

    /// Number of events rejected so far
    pub fn vetoed(&self) -> usize {
        self.vetoed
    }
}

impl EventHandler for VetoPlugin {
    fn supports(&self, event_name: &str) -> bool {
        self.events.is_empty() || self.events.iter().any(|name| name == event_name)
    }

    fn handle(&mut self, event_name: &str, _args: &EventArgs) -> PluginResult<bool> {
        self.vetoed += 1;
        match &self.reason {
            Some(reason) => log::info!(
                "Veto: '{}' rejected '{}': {}",
                self.plugin_id,
                event_name,
                reason
            ),
            None => log::info!("Veto: '{}' rejected '{}'", self.plugin_id, event_name),
        }
        Ok(false)
    }
}
