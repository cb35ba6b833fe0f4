use crate::foundation::core::TimeMs;

/// Distance under which the smoothed value snaps onto its target.
pub const SNAP_EPSILON: f64 = 1e-4;

/// Exponential follower that lags reported progress behind raw scroll progress.
///
/// The value covers ~98% of the gap in `lag_ms` (time constant `lag_ms / 4`) and then snaps, so a
/// still scroll position converges to exactly the raw value. A lag of 0 follows immediately.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrubSmoother {
    lag_ms: f64,
    value: f64,
    target: f64,
    last: Option<TimeMs>,
}

impl ScrubSmoother {
    /// Create a smoother resting at 0. Non-finite or negative lags are treated as 0.
    pub fn new(lag_ms: f64) -> Self {
        Self {
            lag_ms: if lag_ms.is_finite() { lag_ms.max(0.0) } else { 0.0 },
            value: 0.0,
            target: 0.0,
            last: None,
        }
    }

    pub fn lag_ms(&self) -> f64 {
        self.lag_ms
    }

    /// Current smoothed progress.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Raw progress being followed.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Set the raw progress to follow.
    pub fn set_target(&mut self, raw: f64) {
        self.target = if raw.is_finite() {
            raw.clamp(0.0, 1.0)
        } else {
            0.0
        };
        if self.lag_ms == 0.0 {
            self.value = self.target;
        }
    }

    /// Jump straight to `raw` with no lag (initial binding).
    pub fn jump(&mut self, raw: f64) {
        self.set_target(raw);
        self.value = self.target;
    }

    /// Step the follower to `now` and return the smoothed value.
    pub fn update(&mut self, now: TimeMs) -> f64 {
        let dt = self.last.map(|last| now.since(last)).unwrap_or(0.0);
        self.last = Some(now);

        if self.lag_ms == 0.0 {
            self.value = self.target;
            return self.value;
        }

        let tau = self.lag_ms / 4.0;
        let k = 1.0 - (-dt / tau).exp();
        self.value += (self.target - self.value) * k;
        if (self.target - self.value).abs() < SNAP_EPSILON {
            self.value = self.target;
        }
        self.value
    }

    /// Return `true` once the value sits exactly on the target.
    pub fn settled(&self) -> bool {
        self.value == self.target
    }

    /// Drop timing history; the next update starts a fresh interval.
    pub fn cancel(&mut self) {
        self.last = None;
        self.target = self.value;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/scrub.rs"]
mod tests;
