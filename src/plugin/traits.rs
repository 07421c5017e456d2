//! Plugin Trait System
//!
//! Every plugin instance implements [`EventHandler`]. The dispatcher never
//! looks handlers up by method name: a plugin declares which events it
//! supports and receives them through `handle`.

use crate::plugin::error::PluginResult;
use crate::plugin::types::EventArgs;

/// Capability interface implemented by every plugin instance
pub trait EventHandler: Send {
    /// Whether this handler implements the given event
    ///
    /// Unsupported events are skipped by the dispatcher and count as
    /// accepted. The default accepts every event.
    fn supports(&self, _event_name: &str) -> bool {
        true
    }

    /// Handle an event; `Ok(false)` vetoes it
    fn handle(&mut self, event_name: &str, args: &EventArgs) -> PluginResult<bool>;
}

impl<F> EventHandler for F
where
    F: FnMut(&str, &EventArgs) -> PluginResult<bool> + Send,
{
    fn handle(&mut self, event_name: &str, args: &EventArgs) -> PluginResult<bool> {
        self(event_name, args)
    }
}
