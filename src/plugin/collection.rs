//! Plugin Collection
//!
//! Owns the instantiated plugin handlers, keyed by plugin id.

use crate::plugin::traits::EventHandler;
use std::collections::HashMap;

/// A plugin handler paired with its id, as handed to the dispatcher
pub struct Subscriber<'a> {
    pub id: &'a str,
    pub handler: &'a mut dyn EventHandler,
}

impl std::fmt::Debug for Subscriber<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscriber").field("id", &self.id).finish()
    }
}

/// Instantiated plugins, keyed by plugin id
#[derive(Default)]
pub struct PluginCollection {
    plugins: HashMap<String, Box<dyn EventHandler>>,
}

impl std::fmt::Debug for PluginCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginCollection")
            .field("plugins", &self.ids())
            .finish()
    }
}

impl PluginCollection {
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    /// Add a handler, returning the one previously stored under the id
    pub fn insert(
        &mut self,
        id: &str,
        handler: Box<dyn EventHandler>,
    ) -> Option<Box<dyn EventHandler>> {
        self.plugins.insert(id.to_string(), handler)
    }

    pub fn remove(&mut self, id: &str) -> Option<Box<dyn EventHandler>> {
        self.plugins.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.plugins.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Plugin ids, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.plugins.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Handlers for the given ids, in the given order
    ///
    /// Ids without a handler in this collection are skipped, as are repeated ids.
    pub fn ordered_mut(&mut self, order: &[String]) -> Vec<Subscriber<'_>> {
        let mut by_id: HashMap<&str, &mut Box<dyn EventHandler>> = self
            .plugins
            .iter_mut()
            .map(|(id, handler)| (id.as_str(), handler))
            .collect();

        order
            .iter()
            .filter_map(|id| by_id.remove_entry(id.as_str()))
            .map(|(id, handler)| Subscriber {
                id,
                handler: handler.as_mut(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::error::PluginResult;
    use crate::plugin::types::EventArgs;

    fn accept() -> Box<dyn EventHandler> {
        Box::new(|_: &str, _: &EventArgs| -> PluginResult<bool> { Ok(true) })
    }

    #[test]
    fn test_insert_and_remove() {
        let mut plugins = PluginCollection::new();
        assert!(plugins.is_empty());

        assert!(plugins.insert("blog", accept()).is_none());
        assert!(plugins.insert("audit", accept()).is_none());
        assert!(plugins.insert("blog", accept()).is_some());

        assert_eq!(plugins.len(), 2);
        assert_eq!(plugins.ids(), vec!["audit", "blog"]);
        assert!(plugins.contains("blog"));

        assert!(plugins.remove("blog").is_some());
        assert!(plugins.remove("blog").is_none());
        assert!(!plugins.contains("blog"));
    }

    #[test]
    fn test_ordered_mut_follows_given_order() {
        let mut plugins = PluginCollection::new();
        plugins.insert("a", accept());
        plugins.insert("b", accept());
        plugins.insert("c", accept());

        let order = vec![
            "c".to_string(),
            "missing".to_string(),
            "a".to_string(),
            "c".to_string(),
        ];
        let ids: Vec<&str> = plugins
            .ordered_mut(&order)
            .iter()
            .map(|subscriber| subscriber.id)
            .collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn test_ordered_mut_handlers_are_callable() {
        let mut plugins = PluginCollection::new();
        plugins.insert(
            "veto",
            Box::new(|_: &str, _: &EventArgs| -> PluginResult<bool> { Ok(false) }),
        );

        let order = vec!["veto".to_string()];
        let mut subscribers = plugins.ordered_mut(&order);
        let result = subscribers[0]
            .handler
            .handle("blog_new_entry", &EventArgs::new())
            .unwrap();
        assert!(!result);
    }
}
