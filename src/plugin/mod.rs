//! Plugin System Module
//!
//! Plugins subscribe to named events at a priority. When an event is
//! handled, every subscriber is called in descending priority order and any
//! of them can veto it.
//!
//! ```text
//!  DispatchSettings ──▶ PluginManager
//!                        ├── Repository        plugins, events, queues
//!                        ├── PluginCollection  id → Box<dyn EventHandler>
//!                        └── Dispatcher        AND over subscriber results
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use plugdispatch::plugin::api::{
//!     EventArgs, PluginConfiguration, PluginManager, PluginResult,
//! };
//!
//! let mut manager = PluginManager::new();
//! let guard = PluginConfiguration::new("guard", "custom").with_subscriptions(["blog_delete"]);
//! manager
//!     .register_handler(
//!         guard,
//!         Box::new(|_: &str, _: &EventArgs| -> PluginResult<bool> { Ok(false) }),
//!     )
//!     .unwrap();
//!
//! let outcome = manager.handle_event("blog_delete", &EventArgs::new(), None).unwrap();
//! assert!(!outcome.result);
//! ```

// Internal modules - all access should go through api module
pub(crate) mod builtin;
pub(crate) mod collection;
pub(crate) mod dispatcher;
pub(crate) mod error;
pub(crate) mod manager;
pub(crate) mod repository;
pub(crate) mod settings;
pub(crate) mod traits;
pub(crate) mod types;

// Public API module - the only public interface for the plugin system
pub mod api;

#[cfg(test)]
mod tests;
