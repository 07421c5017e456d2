//! Public API for the plugin system
//!
//! External modules should import from here rather than directly from
//! internal modules.

// Plugin management
pub use crate::plugin::manager::{DispatchOutcome, PluginManager};
pub use crate::plugin::settings::DispatchSettings;

// Dispatch
pub use crate::plugin::collection::{PluginCollection, Subscriber};
pub use crate::plugin::dispatcher::{
    DispatchPolicy, Dispatcher, EventSender, HandlerSender, NullSender,
};
pub use crate::plugin::repository::Repository;
pub use crate::plugin::traits::EventHandler;

// Error handling
pub use crate::plugin::error::{PluginError, PluginResult};

// Configuration types
pub use crate::plugin::types::{
    ActiveState, EventArgs, EventType, MethodConfiguration, PluginConfiguration,
    PluginPriority, PluginType, UserRequirement,
};

// Builtin plugins
pub use crate::plugin::builtin::api::{builtin_plugins, is_api_compatible, BuiltinPluginInfo};
pub use crate::plugin::builtin::dump::{DumpFormat, DumpPlugin};
pub use crate::plugin::builtin::veto::VetoPlugin;
