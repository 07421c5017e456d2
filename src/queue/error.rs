//! Queue Error Types

use crate::core::error_handling::ContextualError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueueError {
    /// A value that does not conform to the collection's element type, or an
    /// empty key, was offered to a queue or queue collection
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl QueueError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        QueueError::InvalidArgument {
            message: message.into(),
        }
    }
}

impl ContextualError for QueueError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            QueueError::InvalidArgument { message } => Some(message),
        }
    }
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
