use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::animation::segment::Segment;
use crate::animation::state::StateDef;
use crate::animation::track::Track;
use crate::foundation::core::TargetId;
use crate::foundation::error::{ChoreoError, ChoreoResult};
use crate::timeline::scheduler::Scheduler;

/// Authoring surface for a progress-driven timeline.
///
/// Tweens are placed on the shared `[0, 1]` axis. Tweens that address the same target are merged
/// into one [`Track`], so the resulting [`Scheduler`] never has two writers per target.
#[derive(Debug, Default)]
pub struct TimelineBuilder {
    order: Vec<TargetId>,
    segments: BTreeMap<TargetId, Vec<Segment>>,
}

impl TimelineBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tween `target` from `from` to `to` over `[start, end]`.
    pub fn from_to(
        mut self,
        target: impl Into<TargetId>,
        start: f64,
        end: f64,
        from: StateDef,
        to: StateDef,
        ease: Ease,
    ) -> ChoreoResult<Self> {
        let seg = Segment::new(start, end, from, to, ease)?;
        self.push(target.into(), seg);
        Ok(self)
    }

    /// Tween `target` to `to`, starting from whatever the track resolved so far.
    pub fn to(
        self,
        target: impl Into<TargetId>,
        start: f64,
        end: f64,
        to: StateDef,
        ease: Ease,
    ) -> ChoreoResult<Self> {
        self.from_to(target, start, end, StateDef::new(), to, ease)
    }

    /// Instantaneous set at `at`.
    pub fn set(
        mut self,
        target: impl Into<TargetId>,
        at: f64,
        state: StateDef,
    ) -> ChoreoResult<Self> {
        let seg = Segment::set(at, state)?;
        self.push(target.into(), seg);
        Ok(self)
    }

    /// One tween per target, the i-th shifted by `i * each`.
    ///
    /// Shifted segments keep their length; a shift past the end of the axis is clamped so the
    /// last items finish exactly at 1.
    #[allow(clippy::too_many_arguments)]
    pub fn stagger<I, T>(
        mut self,
        targets: I,
        start: f64,
        end: f64,
        from: StateDef,
        to: StateDef,
        ease: Ease,
        each: f64,
    ) -> ChoreoResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<TargetId>,
    {
        if !each.is_finite() || each < 0.0 {
            return Err(ChoreoError::animation("stagger step must be finite and >= 0"));
        }
        let base = Segment::new(start, end, from, to, ease)?;
        for (i, target) in targets.into_iter().enumerate() {
            self.push(target.into(), base.shifted(i as f64 * each));
        }
        Ok(self)
    }

    /// Add an already-built segment.
    pub fn segment(mut self, target: impl Into<TargetId>, seg: Segment) -> Self {
        self.push(target.into(), seg);
        self
    }

    /// Targets in the order they were first addressed.
    pub fn targets(&self) -> &[TargetId] {
        &self.order
    }

    /// Merge per-target segments into tracks, in first-addressed order.
    pub fn into_tracks(mut self) -> ChoreoResult<Vec<Track>> {
        let mut out = Vec::with_capacity(self.order.len());
        for target in self.order {
            let segments = self.segments.remove(&target).unwrap_or_default();
            out.push(Track::new(target, segments)?);
        }
        Ok(out)
    }

    /// Merge tracks and wrap them in a validated [`Scheduler`].
    pub fn build(self) -> ChoreoResult<Scheduler> {
        Scheduler::new(self.into_tracks()?)
    }

    fn push(&mut self, target: TargetId, seg: Segment) {
        let entry = self.segments.entry(target.clone()).or_default();
        if entry.is_empty() {
            self.order.push(target);
        }
        entry.push(seg);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/dsl.rs"]
mod tests;
