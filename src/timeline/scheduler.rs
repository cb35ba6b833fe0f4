use std::collections::BTreeSet;

use crate::animation::state::{Property, VisualState};
use crate::animation::track::Track;
use crate::foundation::core::{TargetId, Viewport};
use crate::foundation::error::{ChoreoError, ChoreoResult};
use crate::host::sink::{ApplyOutcome, TargetSink};

/// Per-call summary of an [`Scheduler::advance`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    /// Tracks whose state reached the host.
    pub applied: usize,
    /// Tracks skipped because their target was detached.
    pub skipped: usize,
}

/// Ordered set of tracks advanced together from one progress value.
///
/// Advancing is a pure function of progress: no timers, no reads from the host, and repeating a
/// progress value reproduces exactly the same writes.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    tracks: Vec<Track>,
    current: Vec<Option<VisualState>>, // last resolved state per track
    progress: Option<f64>,
}

impl Scheduler {
    /// Create a scheduler; each target may be owned by only one track.
    pub fn new(tracks: Vec<Track>) -> ChoreoResult<Self> {
        let mut seen = BTreeSet::new();
        for track in &tracks {
            track.validate()?;
            if !seen.insert(track.target().clone()) {
                return Err(ChoreoError::animation(format!(
                    "target '{}' is animated by more than one track",
                    track.target()
                )));
            }
        }
        let current = vec![None; tracks.len()];
        Ok(Self {
            tracks,
            current,
            progress: None,
        })
    }

    /// Tracks in authoring order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Targets written by this scheduler.
    pub fn targets(&self) -> impl Iterator<Item = &TargetId> + '_ {
        self.tracks.iter().map(Track::target)
    }

    /// Every property the scheduler may write on `target`.
    pub fn properties_of(&self, target: &TargetId) -> BTreeSet<Property> {
        self.tracks
            .iter()
            .find(|t| t.target() == target)
            .map(Track::properties)
            .unwrap_or_default()
    }

    /// Progress of the last [`Scheduler::advance`], if any.
    pub fn progress(&self) -> Option<f64> {
        self.progress
    }

    /// Last resolved state of `target`'s track.
    pub fn current(&self, target: &TargetId) -> Option<&VisualState> {
        self.tracks
            .iter()
            .position(|t| t.target() == target)
            .and_then(|i| self.current[i].as_ref())
    }

    /// Resolve `target`'s state at `progress` without touching anything.
    pub fn resolve_target(
        &self,
        target: &TargetId,
        progress: f64,
        viewport: Viewport,
    ) -> Option<VisualState> {
        self.tracks
            .iter()
            .find(|t| t.target() == target)
            .map(|t| t.resolve(progress, viewport))
    }

    /// Resolve every track at `progress` and write through `sink`.
    pub fn advance(
        &mut self,
        progress: f64,
        viewport: Viewport,
        sink: &mut dyn TargetSink,
    ) -> AdvanceReport {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };

        let mut report = AdvanceReport::default();
        for (track, slot) in self.tracks.iter().zip(self.current.iter_mut()) {
            let state = track.resolve(progress, viewport);
            match sink.apply(track.target(), &state) {
                ApplyOutcome::Applied => report.applied += 1,
                ApplyOutcome::Detached => {
                    tracing::trace!(target_id = %track.target(), "skipping detached target");
                    report.skipped += 1;
                }
            }
            *slot = Some(state);
        }
        self.progress = Some(progress);
        report
    }

    /// Forget resolved state so the next advance starts clean.
    pub(crate) fn clear(&mut self) {
        self.current.iter_mut().for_each(|s| *s = None);
        self.progress = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/scheduler.rs"]
mod tests;
