//! Subscriber Queues
//!
//! Each event keeps a [`Queue`] of the plugins subscribed to it, ordered by
//! descending priority. The queues of a repository live in a
//! [`QueueCollection`] keyed by event name.
//!
//! ```text
//!  QueueCollection
//!  ┌──────────────────┬───────────────────────────────┐
//!  │ "blog_new_entry" │ audit(4) → blog(2) → spam(0)  │
//!  │ "user_login"     │ security(4) → user(2)         │
//!  └──────────────────┴───────────────────────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use plugdispatch::queue::api::{Queue, QueueCollection};
//!
//! let mut queue = Queue::new();
//! queue.subscribe("blog", 2).unwrap();
//! queue.subscribe("audit", 4).unwrap();
//! assert_eq!(queue.subscribers(), vec!["audit", "blog"]);
//!
//! let mut queues = QueueCollection::new();
//! queues.set("blog_new_entry", queue).unwrap();
//! assert!(queues.contains("blog_new_entry"));
//! ```

pub(crate) mod collection;
pub(crate) mod error;
pub(crate) mod subscribers;

pub mod api;
