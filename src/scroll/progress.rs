use crate::foundation::core::{SectionGeometry, Viewport};
use crate::foundation::error::{ChoreoError, ChoreoResult};

/// How a section maps scroll offset to timeline progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum Trigger {
    /// Starts when the section top reaches the viewport top and pins the section for `travel`
    /// viewport heights of scrolling (`1.3` pins for 130% of the viewport).
    Pinned {
        /// Scroll distance in viewport heights.
        travel: f64,
    },
    /// Runs while the section top moves from `start_line` to `end_line`, both expressed as
    /// fractions of the viewport height measured from its top (`0.8` is "top 80%").
    Range {
        /// Viewport line where progress is 0.
        start_line: f64,
        /// Viewport line where progress is 1.
        end_line: f64,
    },
}

/// Pin side effect for a pinned trigger at one scroll offset.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct PinState {
    /// The section is currently held at the viewport top.
    pub pinned: bool,
    /// Translation that keeps the section fixed while pinned.
    pub offset_px: f64,
    /// Extra document height reserved after the section.
    pub spacer_px: f64,
}

impl Trigger {
    /// The desktop default: pinned for 130% of the viewport height.
    pub const DEFAULT_PINNED: Trigger = Trigger::Pinned { travel: 1.3 };

    /// The reveal default: `top 80%` to `top 50%`.
    pub const DEFAULT_RANGE: Trigger = Trigger::Range {
        start_line: 0.8,
        end_line: 0.5,
    };

    pub fn validate(&self) -> ChoreoResult<()> {
        match *self {
            Trigger::Pinned { travel } => {
                if !travel.is_finite() || travel < 0.0 {
                    return Err(ChoreoError::validation(format!(
                        "pinned travel must be finite and >= 0, got {travel}"
                    )));
                }
            }
            Trigger::Range {
                start_line,
                end_line,
            } => {
                if !start_line.is_finite() || !end_line.is_finite() {
                    return Err(ChoreoError::validation("range lines must be finite"));
                }
            }
        }
        Ok(())
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self, Trigger::Pinned { .. })
    }

    /// Scroll offsets where progress is 0 and 1. `None` for degenerate geometry.
    pub fn scroll_span(&self, geometry: SectionGeometry, viewport: Viewport) -> Option<(f64, f64)> {
        if viewport.is_degenerate() || !geometry.top.is_finite() {
            return None;
        }
        let vh = viewport.height;
        let (start, end) = match *self {
            Trigger::Pinned { travel } => (geometry.top, geometry.top + travel * vh),
            Trigger::Range {
                start_line,
                end_line,
            } => (geometry.top - start_line * vh, geometry.top - end_line * vh),
        };
        (end > start && end.is_finite()).then_some((start, end))
    }

    /// Clamped progress in `[0, 1]` for `scroll_y`; monotone in scroll and exactly reversible.
    pub fn raw_progress(
        &self,
        scroll_y: f64,
        geometry: SectionGeometry,
        viewport: Viewport,
    ) -> f64 {
        let Some((start, end)) = self.scroll_span(geometry, viewport) else {
            return 0.0;
        };
        if !scroll_y.is_finite() {
            return 0.0;
        }
        ((scroll_y - start) / (end - start)).clamp(0.0, 1.0)
    }

    /// Return `true` once `scroll_y` has crossed the start line.
    pub fn has_entered(
        &self,
        scroll_y: f64,
        geometry: SectionGeometry,
        viewport: Viewport,
    ) -> bool {
        self.scroll_span(geometry, viewport)
            .is_some_and(|(start, _)| scroll_y >= start)
    }

    /// Pin translation and spacer; `None` for non-pinned triggers.
    pub fn pin_state(
        &self,
        scroll_y: f64,
        geometry: SectionGeometry,
        viewport: Viewport,
    ) -> Option<PinState> {
        let Trigger::Pinned { travel } = *self else {
            return None;
        };
        let travel_px = if viewport.is_degenerate() {
            0.0
        } else {
            travel * viewport.height
        };
        let scroll_y = if scroll_y.is_finite() { scroll_y } else { 0.0 };
        let into = scroll_y - geometry.top;
        Some(PinState {
            pinned: travel_px > 0.0 && into > 0.0 && into < travel_px,
            offset_px: into.clamp(0.0, travel_px),
            spacer_px: travel_px,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/progress.rs"]
mod tests;
