use std::collections::BTreeSet;

use crate::animation::track::Track;
use crate::foundation::core::{TargetId, Viewport};
use crate::foundation::error::{ChoreoError, ChoreoResult};
use crate::scroll::progress::Trigger;

/// Default min-width (px) of the wide layout.
pub const DEFAULT_BREAKPOINT_PX: f64 = 1024.0;

/// Viewport class that selects a section's animation graph.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DeviceClass {
    /// Below the breakpoint.
    Compact,
    /// At or above the breakpoint.
    Wide,
}

/// Width threshold between [`DeviceClass::Compact`] and [`DeviceClass::Wide`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Breakpoint(pub f64);

impl Default for Breakpoint {
    fn default() -> Self {
        Self(DEFAULT_BREAKPOINT_PX)
    }
}

impl Breakpoint {
    /// `Wide` iff `width >= breakpoint`.
    pub fn classify(self, viewport: Viewport) -> DeviceClass {
        if viewport.width >= self.0 {
            DeviceClass::Wide
        } else {
            DeviceClass::Compact
        }
    }
}

/// How an animated variant turns trigger progress into timeline progress.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case", deny_unknown_fields)]
pub enum Drive {
    /// Follow scroll progress, lagged by `lag_ms`.
    Scrub {
        /// Smoothing lag in milliseconds (0 follows immediately).
        lag_ms: f64,
    },
    /// Play once over `duration_ms` when the trigger start is crossed.
    PlayOnEnter {
        /// Wall-clock length of the timeline.
        duration_ms: f64,
    },
}

impl Drive {
    pub fn validate(&self) -> ChoreoResult<()> {
        let (name, v) = match *self {
            Drive::Scrub { lag_ms } => ("scrub lag", lag_ms),
            Drive::PlayOnEnter { duration_ms } => ("play duration", duration_ms),
        };
        if !v.is_finite() || v < 0.0 {
            return Err(ChoreoError::validation(format!(
                "{name} must be finite and >= 0, got {v}"
            )));
        }
        if matches!(self, Drive::PlayOnEnter { .. }) && v == 0.0 {
            return Err(ChoreoError::validation("play duration must be > 0"));
        }
        Ok(())
    }
}

/// One device class's animation graph for a section.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum VariantGraph {
    /// Tracks bound to a trigger.
    Animated {
        /// Scroll mapping.
        trigger: Trigger,
        /// Scrubbed or played on enter.
        drive: Drive,
        /// Tracks, one per target.
        tracks: Vec<Track>,
    },
    /// Every target held at resting values.
    #[default]
    Rest,
}

impl VariantGraph {
    pub fn is_rest(&self) -> bool {
        matches!(self, VariantGraph::Rest)
    }

    pub fn tracks(&self) -> &[Track] {
        match self {
            VariantGraph::Animated { tracks, .. } => tracks,
            VariantGraph::Rest => &[],
        }
    }

    /// Targets animated by this graph.
    pub fn targets(&self) -> BTreeSet<TargetId> {
        self.tracks().iter().map(|t| t.target().clone()).collect()
    }

    pub fn validate(&self) -> ChoreoResult<()> {
        let VariantGraph::Animated {
            trigger,
            drive,
            tracks,
        } = self
        else {
            return Ok(());
        };
        trigger.validate()?;
        drive.validate()?;
        let mut seen = BTreeSet::new();
        for t in tracks {
            t.validate()?;
            if !seen.insert(t.target()) {
                return Err(ChoreoError::animation(format!(
                    "target '{}' is animated by more than one track",
                    t.target()
                )));
            }
        }
        Ok(())
    }
}

/// Per-class graphs for a section; exactly one is active at a time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Variants {
    /// Graph used at or above the breakpoint.
    pub wide: VariantGraph,
    /// Graph used below the breakpoint.
    pub compact: VariantGraph,
}

impl Variants {
    pub fn select(&self, class: DeviceClass) -> &VariantGraph {
        match class {
            DeviceClass::Wide => &self.wide,
            DeviceClass::Compact => &self.compact,
        }
    }

    /// Targets animated by either graph.
    pub fn targets(&self) -> BTreeSet<TargetId> {
        let mut out = self.wide.targets();
        out.extend(self.compact.targets());
        out
    }

    pub fn validate(&self) -> ChoreoResult<()> {
        self.wide.validate()?;
        self.compact.validate()
    }
}

/// A device-class transition observed on resize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassChange {
    /// Class before the resize (`None` on the first observation).
    pub from: Option<DeviceClass>,
    /// Class after the resize.
    pub to: DeviceClass,
}

/// Tracks the active device class across resizes.
#[derive(Clone, Debug, Default)]
pub struct VariantResolver {
    breakpoint: Breakpoint,
    current: Option<DeviceClass>,
}

impl VariantResolver {
    pub fn new(breakpoint: Breakpoint) -> Self {
        Self {
            breakpoint,
            current: None,
        }
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    pub fn current(&self) -> Option<DeviceClass> {
        self.current
    }

    /// Classify `viewport`; returns the transition when the class changed.
    pub fn observe(&mut self, viewport: Viewport) -> Option<ClassChange> {
        let to = self.breakpoint.classify(viewport);
        if self.current == Some(to) {
            return None;
        }
        let change = ClassChange {
            from: self.current,
            to,
        };
        self.current = Some(to);
        Some(change)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/responsive/variant.rs"]
mod tests;
