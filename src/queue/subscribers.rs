//! Priority-ordered subscriber list for a single event

use crate::queue::error::{QueueError, QueueResult};

#[derive(Debug, Clone, PartialEq, Eq)]
struct QueueEntry {
    subscriber_id: String,
    priority: i32,
}

/// Subscribers of one event, highest priority first
///
/// A subscriber id is held at most once: subscribing it again replaces the
/// stored priority. Entries are re-sorted with an unstable sort after every
/// subscription, so subscribers sharing a priority have no guaranteed
/// relative order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Queue {
    entries: Vec<QueueEntry>,
}

impl Queue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a subscriber or update its priority
    pub fn subscribe(&mut self, subscriber_id: &str, priority: i32) -> QueueResult<()> {
        if subscriber_id.trim().is_empty() {
            return Err(QueueError::invalid("subscriber id must not be empty"));
        }

        match self
            .entries
            .iter_mut()
            .find(|entry| entry.subscriber_id == subscriber_id)
        {
            Some(entry) => {
                log::trace!(
                    "Queue: priority of '{}' changed {} -> {}",
                    subscriber_id,
                    entry.priority,
                    priority
                );
                entry.priority = priority;
            }
            None => self.entries.push(QueueEntry {
                subscriber_id: subscriber_id.to_string(),
                priority,
            }),
        }

        self.entries
            .sort_unstable_by(|a, b| b.priority.cmp(&a.priority));
        Ok(())
    }

    /// Remove a subscriber, returning whether it was present
    pub fn unsubscribe(&mut self, subscriber_id: &str) -> bool {
        let before = self.entries.len();
        self.entries
            .retain(|entry| entry.subscriber_id != subscriber_id);
        before != self.entries.len()
    }

    /// Subscriber ids, highest priority first
    pub fn subscribers(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.subscriber_id.clone())
            .collect()
    }

    /// Iterate `(subscriber_id, priority)` pairs in dispatch order
    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.entries
            .iter()
            .map(|entry| (entry.subscriber_id.as_str(), entry.priority))
    }

    pub fn priority_of(&self, subscriber_id: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|entry| entry.subscriber_id == subscriber_id)
            .map(|entry| entry.priority)
    }

    pub fn contains(&self, subscriber_id: &str) -> bool {
        self.priority_of(subscriber_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
