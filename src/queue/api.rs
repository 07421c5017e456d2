//! Public API for the subscriber queues
//!
//! External modules should import from here rather than directly from internal modules.

pub use crate::queue::collection::QueueCollection;
pub use crate::queue::error::{QueueError, QueueResult};
pub use crate::queue::subscribers::Queue;
