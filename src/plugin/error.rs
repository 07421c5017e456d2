//! Plugin Error Handling
//!
//! Error types for plugin configuration, instantiation and event dispatch.

use crate::core::error_handling::ContextualError;
use crate::core::validation::ValidationError;
use crate::queue::api::QueueError;
use std::fmt;

/// Result type alias for plugin operations
pub type PluginResult<T> = std::result::Result<T, PluginError>;

#[derive(Debug, Clone, PartialEq)]
pub enum PluginError {
    /// No plugin (or plugin class) with this name is known
    PluginNotFound { plugin_name: String },

    /// A configuration value or identifier was rejected
    InvalidArgument { message: String },

    /// Built-in plugin API version does not match this build
    VersionIncompatible { message: String },

    /// The caller's user level does not satisfy the event's requirements
    AccessDenied {
        event_name: String,
        required_level: u32,
        user_level: u32,
    },

    /// A handler failed while processing an event
    ExecutionError {
        plugin_name: String,
        operation: String,
        cause: String,
    },

    /// Subscriber queue rejected an operation
    Queue(QueueError),

    Generic { message: String },
}

impl fmt::Display for PluginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PluginError::PluginNotFound { plugin_name } => {
                write!(f, "Plugin not found: {}", plugin_name)
            }
            PluginError::InvalidArgument { message } => {
                write!(f, "Invalid argument: {}", message)
            }
            PluginError::VersionIncompatible { message } => {
                write!(f, "Version incompatible: {}", message)
            }
            PluginError::AccessDenied {
                event_name,
                required_level,
                user_level,
            } => {
                write!(
                    f,
                    "Access denied to '{}': requires level {}, user has {}",
                    event_name, required_level, user_level
                )
            }
            PluginError::ExecutionError {
                plugin_name,
                operation,
                cause,
            } => {
                write!(
                    f,
                    "Plugin '{}' failed during '{}': {}",
                    plugin_name, operation, cause
                )
            }
            PluginError::Queue(err) => write!(f, "{}", err),
            PluginError::Generic { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for PluginError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PluginError::Queue(err) => Some(err),
            _ => None,
        }
    }
}

impl From<QueueError> for PluginError {
    fn from(err: QueueError) -> Self {
        PluginError::Queue(err)
    }
}

impl From<ValidationError> for PluginError {
    fn from(err: ValidationError) -> Self {
        PluginError::InvalidArgument {
            message: err.message().to_string(),
        }
    }
}

impl ContextualError for PluginError {
    fn is_user_actionable(&self) -> bool {
        self.user_message().is_some()
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            PluginError::InvalidArgument { message }
            | PluginError::VersionIncompatible { message } => Some(message),
            PluginError::Queue(err) => err.user_message(),
            _ => None,
        }
    }
}
