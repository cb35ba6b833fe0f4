use std::collections::BTreeSet;

use crate::animation::segment::Segment;
use crate::animation::state::{Lerp, Property, VisualState};
use crate::foundation::core::{TargetId, Viewport};
use crate::foundation::error::{ChoreoError, ChoreoResult};

/// Property stream on one target: segments ordered by start offset.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Track {
    target: TargetId,
    segments: Vec<Segment>, // sorted by start
}

impl Track {
    /// Create a validated track. Segments are stably sorted by start offset.
    pub fn new(target: TargetId, mut segments: Vec<Segment>) -> ChoreoResult<Self> {
        segments.sort_by(|a, b| a.start().total_cmp(&b.start()));
        let track = Self { target, segments };
        track.validate()?;
        Ok(track)
    }

    /// Validate segment bounds and ordering.
    pub fn validate(&self) -> ChoreoResult<()> {
        if self.segments.is_empty() {
            return Err(ChoreoError::animation(format!(
                "track '{}' has no segments",
                self.target
            )));
        }
        for seg in &self.segments {
            seg.validate()?;
        }
        if !self
            .segments
            .windows(2)
            .all(|w| w[0].start() <= w[1].start())
        {
            return Err(ChoreoError::animation(format!(
                "track '{}' segments must be sorted by start offset",
                self.target
            )));
        }
        Ok(())
    }

    /// Target written by this track.
    pub fn target(&self) -> &TargetId {
        &self.target
    }

    /// Segments in start order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Append a segment, keeping start order.
    pub(crate) fn push(&mut self, seg: Segment) {
        let idx = self
            .segments
            .partition_point(|s| s.start() <= seg.start());
        self.segments.insert(idx, seg);
    }

    /// Every property any segment mentions.
    pub fn properties(&self) -> BTreeSet<Property> {
        let mut out = BTreeSet::new();
        for seg in &self.segments {
            out.extend(seg.from_state().iter().map(|(p, _)| p));
            out.extend(seg.to_state().iter().map(|(p, _)| p));
        }
        out
    }

    /// Latest end offset across segments.
    pub fn end(&self) -> f64 {
        self.segments.iter().map(Segment::end).fold(0.0, f64::max)
    }

    /// Resolve the track's state at `progress` as a pure function.
    ///
    /// Started segments interpolate (completed ones sit at their `to` state). A segment that has
    /// not started yet only contributes its `from` values for properties no earlier segment has
    /// touched, which yields the pre-entrance state before the first segment and holds the last
    /// resolved value in gaps between segments.
    pub fn resolve(&self, progress: f64, viewport: Viewport) -> VisualState {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };

        let mut out = VisualState::new();
        for seg in &self.segments {
            if !seg.has_started(progress) {
                for (prop, value) in seg.from_state().iter() {
                    if out.get(prop).is_none() {
                        out.set(prop, value.resolve(viewport));
                    }
                }
                // `to`-only properties of an unstarted segment hold whatever came before; if
                // nothing came before they sit at rest.
                for (prop, _) in seg.to_state().iter() {
                    if out.get(prop).is_none() {
                        out.set(prop, prop.resting());
                    }
                }
                continue;
            }

            let t = seg.eased_local(progress);
            for (prop, to) in seg.to_state().iter() {
                let from = match seg.from_state().get(prop) {
                    Some(v) => v.resolve(viewport),
                    None => out.value_or_resting(prop),
                };
                let to = to.resolve(viewport);
                out.set(prop, <f64 as Lerp>::lerp(&from, &to, t));
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/track.rs"]
mod tests;
