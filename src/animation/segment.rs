use crate::animation::ease::Ease;
use crate::animation::state::StateDef;
use crate::foundation::error::{ChoreoError, ChoreoResult};

/// One keyframe segment anchored to progress offsets in `[0, 1]`.
///
/// `start == end` is an instantaneous set: the `to` state applies as soon as progress reaches
/// `start`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Segment {
    start: f64,
    end: f64,
    from: StateDef,
    to: StateDef,
    ease: Ease,
}

impl Segment {
    /// Create a validated segment.
    pub fn new(
        start: f64,
        end: f64,
        from: StateDef,
        to: StateDef,
        ease: Ease,
    ) -> ChoreoResult<Self> {
        let seg = Self {
            start,
            end,
            from,
            to,
            ease,
        };
        seg.validate()?;
        Ok(seg)
    }

    /// Instantaneous jump to `state` at offset `at`.
    pub fn set(at: f64, state: StateDef) -> ChoreoResult<Self> {
        Self::new(at, at, StateDef::new(), state, Ease::Linear)
    }

    /// Check `0 <= start <= end <= 1` and finite values.
    pub fn validate(&self) -> ChoreoResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(ChoreoError::animation("segment offsets must be finite"));
        }
        if !(0.0 <= self.start && self.start <= self.end && self.end <= 1.0) {
            return Err(ChoreoError::animation(format!(
                "segment offsets must satisfy 0 <= start <= end <= 1 (got {}..{})",
                self.start, self.end
            )));
        }
        if self.to.is_empty() {
            return Err(ChoreoError::animation("segment must animate at least one property"));
        }
        self.from.validate()?;
        self.to.validate()
    }

    /// Start offset.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// End offset.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Explicit starting values.
    pub fn from_state(&self) -> &StateDef {
        &self.from
    }

    /// Target values.
    pub fn to_state(&self) -> &StateDef {
        &self.to
    }

    /// Easing curve.
    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// Return `true` for a zero-length set.
    pub fn is_instant(&self) -> bool {
        self.start == self.end
    }

    /// Return `true` once `progress` has reached the segment.
    pub fn has_started(&self, progress: f64) -> bool {
        progress >= self.start
    }

    /// Eased local progress in `[0, 1]`.
    pub fn eased_local(&self, progress: f64) -> f64 {
        if self.is_instant() {
            return if progress >= self.start { 1.0 } else { 0.0 };
        }
        let t = ((progress - self.start) / (self.end - self.start)).clamp(0.0, 1.0);
        self.ease.apply(t)
    }

    /// Copy of this segment shifted by `delta`, clamped so it still fits in `[0, 1]`.
    pub(crate) fn shifted(&self, delta: f64) -> Self {
        let len = self.end - self.start;
        let start = (self.start + delta).clamp(0.0, 1.0 - len);
        Self {
            start,
            end: (start + len).min(1.0),
            ..self.clone()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/segment.rs"]
mod tests;
