use std::collections::BTreeMap;

use crate::foundation::core::SectionId;

/// Host signal a listener subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ListenerKind {
    /// Scroll offset changes.
    Scroll,
    /// Viewport size changes.
    Resize,
}

/// Handle returned by [`ListenerRegistry::register`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Live signal subscriptions, grouped by the section scope that owns them.
///
/// Signals are only delivered to scopes holding a live listener of the matching kind, so a
/// disposed scope stops receiving progress as soon as its listeners are removed.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    next: u64,
    live: BTreeMap<ListenerId, (SectionId, ListenerKind)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, scope: &SectionId, kind: ListenerKind) -> ListenerId {
        let id = ListenerId(self.next);
        self.next += 1;
        self.live.insert(id, (scope.clone(), kind));
        id
    }

    /// Remove one listener; returns `false` if it was already gone.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.live.remove(&id).is_some()
    }

    /// Remove every listener owned by `scope`; returns how many were removed.
    pub fn remove_scope(&mut self, scope: &SectionId) -> usize {
        let before = self.live.len();
        self.live.retain(|_, (s, _)| s != scope);
        before - self.live.len()
    }

    /// Return `true` if `scope` listens for `kind`.
    pub fn subscribed(&self, scope: &SectionId, kind: ListenerKind) -> bool {
        self.live.values().any(|(s, k)| s == scope && *k == kind)
    }

    /// Live listeners across all scopes.
    pub fn count(&self) -> usize {
        self.live.len()
    }

    pub fn count_for(&self, scope: &SectionId) -> usize {
        self.live.values().filter(|(s, _)| s == scope).count()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/listeners.rs"]
mod tests;
