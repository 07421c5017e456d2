//! Generic error handling utilities
//!
//! Lets the binary report plugin, queue and configuration errors through one
//! code path while keeping the detail level appropriate to each error.

/// Errors that know whether their message is meant for the user
///
/// When `is_user_actionable()` returns `true`, `user_message()` returns
/// `Some(message)`; otherwise it returns `None`.
///
/// User-actionable examples: malformed configuration, unknown plugin class,
/// insufficient access level. System examples: IO failures, handler crashes.
pub trait ContextualError: std::error::Error {
    /// True if the error carries a message the user can act on directly
    fn is_user_actionable(&self) -> bool;

    /// The message to show when the error is user-actionable
    fn user_message(&self) -> Option<&str>;
}

/// Log a fatal error, preferring the user message over the operation context
///
/// ```rust,no_run
/// # use plugdispatch::core::error_handling::log_error_with_context;
/// # use plugdispatch::core::validation::ValidationError;
/// let err = ValidationError::new("event name 'blog new' contains a space");
/// log_error_with_context(&err, "Loading configuration");
/// // Logs: "FATAL: event name 'blog new' contains a space"
/// ```
pub fn log_error_with_context<E: ContextualError + std::fmt::Display + std::fmt::Debug>(
    error: &E,
    operation_context: &str,
) {
    log::error!("FATAL: {}", headline(error, operation_context));
    log::debug!("DETAIL: {}", error);
    log::debug!("DEBUG_DETAILS: {:?}", error);
}

/// The single line shown to the user for an error
pub fn headline<'a, E: ContextualError + ?Sized>(error: &'a E, operation_context: &'a str) -> &'a str {
    if error.is_user_actionable() {
        error.user_message().unwrap_or(operation_context)
    } else {
        operation_context
    }
}
