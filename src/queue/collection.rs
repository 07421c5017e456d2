//! Event name to subscriber queue mapping

use crate::queue::error::{QueueError, QueueResult};
use crate::queue::subscribers::Queue;
use std::any::Any;
use std::collections::HashMap;

/// Mapping from event name to the [`Queue`] of its subscribers
#[derive(Debug, Clone, Default)]
pub struct QueueCollection {
    queues: HashMap<String, Queue>,
}

impl QueueCollection {
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
        }
    }

    /// Store a queue under an event name, returning the queue it replaced
    pub fn set(&mut self, event_name: &str, queue: Queue) -> QueueResult<Option<Queue>> {
        Self::check_event_name(event_name)?;
        Ok(self.queues.insert(event_name.to_string(), queue))
    }

    /// Store a dynamically typed value, which must be a [`Queue`]
    ///
    /// Anything else is rejected with [`QueueError::InvalidArgument`] and the
    /// collection is left untouched.
    pub fn set_value(
        &mut self,
        event_name: &str,
        value: Box<dyn Any>,
    ) -> QueueResult<Option<Queue>> {
        let queue = value.downcast::<Queue>().map_err(|_| {
            QueueError::invalid(format!(
                "value stored for event '{}' is not a subscriber queue",
                event_name
            ))
        })?;
        self.set(event_name, *queue)
    }

    pub fn get(&self, event_name: &str) -> Option<&Queue> {
        self.queues.get(event_name)
    }

    pub fn get_mut(&mut self, event_name: &str) -> Option<&mut Queue> {
        self.queues.get_mut(event_name)
    }

    /// Queue for an event, created empty on first access
    pub fn get_or_create(&mut self, event_name: &str) -> QueueResult<&mut Queue> {
        Self::check_event_name(event_name)?;
        Ok(self.queues.entry(event_name.to_string()).or_default())
    }

    pub fn contains(&self, event_name: &str) -> bool {
        self.queues.contains_key(event_name)
    }

    pub fn remove(&mut self, event_name: &str) -> Option<Queue> {
        self.queues.remove(event_name)
    }

    pub fn len(&self) -> usize {
        self.queues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queues.is_empty()
    }

    /// Event names with a queue, sorted
    pub fn event_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.queues.keys().cloned().collect();
        names.sort();
        names
    }

    fn check_event_name(event_name: &str) -> QueueResult<()> {
        if event_name.trim().is_empty() {
            return Err(QueueError::invalid("event name must not be empty"));
        }
        Ok(())
    }
}
