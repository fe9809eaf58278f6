//! Per-field hook pairs and the ordered listener registry

use super::traits::{ChangeHook, FieldListener};
use crate::state::FieldName;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Optional before/after hooks of one field
#[derive(Clone, Default)]
pub struct ChangeHookPair {
    pub before_change: Option<Arc<dyn ChangeHook>>,
    pub after_change: Option<Arc<dyn ChangeHook>>,
}

impl ChangeHookPair {
    pub fn is_empty(&self) -> bool {
        self.before_change.is_none() && self.after_change.is_none()
    }
}

impl fmt::Debug for ChangeHookPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeHookPair")
            .field("before_change", &self.before_change.is_some())
            .field("after_change", &self.after_change.is_some())
            .finish()
    }
}

/// Hooks keyed by field name, fixed once the form is built
#[derive(Debug, Clone, Default)]
pub struct HookRegistry {
    hooks: HashMap<FieldName, ChangeHookPair>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the hook run before a field commits
    pub fn before_change(mut self, name: &str, hook: Arc<dyn ChangeHook>) -> Self {
        self.hooks.entry(name.to_string()).or_default().before_change = Some(hook);
        self
    }

    /// Register the hook run after a field commits
    pub fn after_change(mut self, name: &str, hook: Arc<dyn ChangeHook>) -> Self {
        self.hooks.entry(name.to_string()).or_default().after_change = Some(hook);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ChangeHookPair> {
        self.hooks.get(name).filter(|pair| !pair.is_empty())
    }
}

/// Ordered mapping from field name to its listener callback
///
/// Iteration follows insertion order. Registering a name twice replaces the
/// callback but keeps the original position.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    entries: Vec<(FieldName, Arc<dyn FieldListener>)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(mut self, name: &str, listener: Arc<dyn FieldListener>) -> Self {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = listener,
            None => self.entries.push((name.to_string(), listener)),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Watched field names, in dispatch order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Arc<dyn FieldListener>)> {
        self.entries.iter().map(|(n, l)| (n.as_str(), l))
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{hook_fn, listener_fn};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_registry_keeps_insertion_order() {
        let noop = listener_fn(|_, _| async { Ok(()) });
        let registry = ListenerRegistry::new()
            .on("b", noop.clone())
            .on("a", noop.clone())
            .on("c", noop.clone())
            .on("b", noop);

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_hook_pair_slots_are_independent() {
        let hooks = HookRegistry::new()
            .before_change("a", hook_fn(|_| async { Ok(()) }))
            .after_change("b", hook_fn(|_| async { Ok(()) }));

        let a = hooks.get("a").unwrap();
        assert!(a.before_change.is_some());
        assert!(a.after_change.is_none());

        let b = hooks.get("b").unwrap();
        assert!(b.before_change.is_none());
        assert!(b.after_change.is_some());

        assert!(hooks.get("c").is_none());
    }
}
