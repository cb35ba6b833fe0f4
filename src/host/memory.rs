use std::collections::{BTreeMap, BTreeSet};

use crate::animation::state::{Property, VisualState};
use crate::foundation::core::TargetId;
use crate::host::sink::{ApplyOutcome, TargetProbe, TargetSink};

/// In-memory element store for tests, the CLI and headless previews.
///
/// Elements must be attached before they accept writes; writes to detached elements report
/// [`ApplyOutcome::Detached`] and are counted.
#[derive(Debug, Default)]
pub struct MemoryHost {
    attached: BTreeSet<TargetId>,
    states: BTreeMap<TargetId, VisualState>,
    writes: u64,
    detached_writes: u64,
}

impl MemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a host with `targets` already attached.
    pub fn with_targets<I, T>(targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetId>,
    {
        let mut host = Self::new();
        for t in targets {
            host.attach(t.into());
        }
        host
    }

    /// Attach an element so it accepts writes.
    pub fn attach(&mut self, target: TargetId) {
        self.attached.insert(target);
    }

    /// Detach an element; its last written state is kept for inspection.
    pub fn detach(&mut self, target: &TargetId) {
        self.attached.remove(target);
    }

    /// Last state written to `target`.
    pub fn state(&self, target: &TargetId) -> Option<&VisualState> {
        self.states.get(target)
    }

    /// Displayed value of `prop` on `target` (resting when never written).
    pub fn value(&self, target: &TargetId, prop: Property) -> f64 {
        self.states
            .get(target)
            .map(|s| s.value_or_resting(prop))
            .unwrap_or_else(|| prop.resting())
    }

    /// Overwrite the displayed state directly, bypassing the engine.
    pub fn force(&mut self, target: &TargetId, state: VisualState) {
        self.states.insert(target.clone(), state);
    }

    /// Number of successful writes.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    /// Number of writes rejected because the element was detached.
    pub fn detached_writes(&self) -> u64 {
        self.detached_writes
    }

    /// Snapshot of every written state.
    pub fn snapshot(&self) -> &BTreeMap<TargetId, VisualState> {
        &self.states
    }
}

impl TargetSink for MemoryHost {
    fn apply(&mut self, target: &TargetId, state: &VisualState) -> ApplyOutcome {
        if !self.attached.contains(target) {
            self.detached_writes += 1;
            return ApplyOutcome::Detached;
        }
        self.states
            .entry(target.clone())
            .or_default()
            .merge(state);
        self.writes += 1;
        ApplyOutcome::Applied
    }
}

impl TargetProbe for MemoryHost {
    fn measured_opacity(&self, target: &TargetId) -> Option<f64> {
        if !self.attached.contains(target) {
            return None;
        }
        Some(self.value(target, Property::Opacity))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/memory.rs"]
mod tests;
