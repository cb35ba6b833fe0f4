use std::collections::BTreeSet;

use crate::animation::state::{Property, VisualState};
use crate::animation::track::Track;
use crate::foundation::core::{SectionGeometry, SectionId, TargetId, TimeMs, Viewport};
use crate::foundation::error::{ChoreoError, ChoreoResult};
use crate::host::sink::TargetSink;
use crate::responsive::variant::{DeviceClass, Drive, VariantGraph, Variants};
use crate::scroll::progress::Trigger;
use crate::scroll::scrub::ScrubSmoother;
use crate::timeline::player::EntrancePlayer;
use crate::timeline::scheduler::{AdvanceReport, Scheduler};

/// Static content shown by a section (skills, achievements, ...). Never mutated.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayItem {
    /// Visible label.
    pub label: String,
    /// Optional icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Optional proficiency in `[0, 1]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<f64>,
    /// Optional year or period.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

/// Wall-clock timeline played once on mount, independent of device class.
#[derive(Clone, Debug, PartialEq)]
pub struct Entrance {
    /// Tracks placed on the `[0, 1]` axis.
    pub tracks: Vec<Track>,
    /// Total length of the timeline.
    pub duration_ms: f64,
}

/// A page section: layout, static content and its animation graphs.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    id: SectionId,
    geometry: SectionGeometry,
    items: Vec<DisplayItem>,
    entrance: Option<Entrance>,
    variants: Variants,
}

impl Section {
    /// Create a section with no content and `Rest` graphs for both classes.
    pub fn new(id: impl Into<SectionId>, geometry: SectionGeometry) -> Self {
        Self {
            id: id.into(),
            geometry,
            items: Vec::new(),
            entrance: None,
            variants: Variants::default(),
        }
    }

    pub fn with_items(mut self, items: Vec<DisplayItem>) -> Self {
        self.items = items;
        self
    }

    pub fn with_entrance(mut self, entrance: Entrance) -> Self {
        self.entrance = Some(entrance);
        self
    }

    pub fn with_variant(mut self, class: DeviceClass, graph: VariantGraph) -> Self {
        match class {
            DeviceClass::Wide => self.variants.wide = graph,
            DeviceClass::Compact => self.variants.compact = graph,
        }
        self
    }

    pub fn id(&self) -> &SectionId {
        &self.id
    }

    pub fn geometry(&self) -> SectionGeometry {
        self.geometry
    }

    pub(crate) fn set_geometry(&mut self, geometry: SectionGeometry) {
        self.geometry = geometry;
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    pub fn entrance(&self) -> Option<&Entrance> {
        self.entrance.as_ref()
    }

    pub fn variants(&self) -> &Variants {
        &self.variants
    }

    /// Every target any of the section's timelines writes.
    pub fn targets(&self) -> BTreeSet<TargetId> {
        let mut out = self.variants.targets();
        if let Some(e) = &self.entrance {
            out.extend(e.tracks.iter().map(|t| t.target().clone()));
        }
        out
    }

    /// Longest wall-clock entrance this section may play.
    pub fn longest_entrance_ms(&self) -> f64 {
        let mut longest = self.entrance.as_ref().map_or(0.0, |e| e.duration_ms);
        for graph in [&self.variants.wide, &self.variants.compact] {
            if let VariantGraph::Animated {
                drive: Drive::PlayOnEnter { duration_ms },
                ..
            } = graph
            {
                longest = longest.max(*duration_ms);
            }
        }
        longest
    }

    pub fn validate(&self) -> ChoreoResult<()> {
        if self.id.as_str().trim().is_empty() {
            return Err(ChoreoError::scene("section id must be non-empty"));
        }
        let g = self.geometry;
        if !g.top.is_finite() || !g.height.is_finite() || g.height < 0.0 {
            return Err(ChoreoError::scene(format!(
                "section '{}' has invalid geometry (top={}, height={})",
                self.id, g.top, g.height
            )));
        }
        if let Some(e) = &self.entrance {
            if !e.duration_ms.is_finite() || e.duration_ms <= 0.0 {
                return Err(ChoreoError::scene(format!(
                    "section '{}' entrance duration must be > 0",
                    self.id
                )));
            }
            Scheduler::new(e.tracks.clone())?;
        }
        self.variants
            .validate()
            .map_err(|e| ChoreoError::scene(format!("section '{}': {e}", self.id)))
    }
}

/// Runtime binding of one variant graph. Dropping it drops all of its timed state.
#[derive(Debug)]
pub(crate) enum Binding {
    Scrub {
        trigger: Trigger,
        scheduler: Scheduler,
        smoother: ScrubSmoother,
        dirty: bool,
    },
    OnEnter {
        trigger: Trigger,
        player: EntrancePlayer,
        primed: bool,
    },
    Rest,
}

impl Binding {
    /// Bind `graph` at the current scroll position. Nothing is written until the next frame.
    pub(crate) fn bind(
        graph: &VariantGraph,
        scroll_y: f64,
        geometry: SectionGeometry,
        viewport: Viewport,
        now: TimeMs,
    ) -> ChoreoResult<Self> {
        let VariantGraph::Animated {
            trigger,
            drive,
            tracks,
        } = graph
        else {
            return Ok(Binding::Rest);
        };
        let scheduler = Scheduler::new(tracks.clone())?;
        Ok(match *drive {
            Drive::Scrub { lag_ms } => {
                let mut smoother = ScrubSmoother::new(lag_ms);
                smoother.jump(trigger.raw_progress(scroll_y, geometry, viewport));
                Binding::Scrub {
                    trigger: *trigger,
                    scheduler,
                    smoother,
                    dirty: true,
                }
            }
            Drive::PlayOnEnter { duration_ms } => {
                let mut player = EntrancePlayer::new(scheduler, duration_ms)?;
                if trigger.has_entered(scroll_y, geometry, viewport) {
                    player.play(now);
                }
                Binding::OnEnter {
                    trigger: *trigger,
                    player,
                    primed: false,
                }
            }
        })
    }

    pub(crate) fn trigger(&self) -> Option<&Trigger> {
        match self {
            Binding::Scrub { trigger, .. } | Binding::OnEnter { trigger, .. } => Some(trigger),
            Binding::Rest => None,
        }
    }

    /// Feed a new scroll offset or layout.
    pub(crate) fn on_scroll(
        &mut self,
        scroll_y: f64,
        geometry: SectionGeometry,
        viewport: Viewport,
        now: TimeMs,
    ) {
        match self {
            Binding::Scrub {
                trigger, smoother, ..
            } => smoother.set_target(trigger.raw_progress(scroll_y, geometry, viewport)),
            Binding::OnEnter {
                trigger, player, ..
            } => {
                if !player.is_playing()
                    && !player.is_finished()
                    && trigger.has_entered(scroll_y, geometry, viewport)
                {
                    player.play(now);
                }
            }
            Binding::Rest => {}
        }
    }

    /// Force the next frame to rewrite state (viewport-relative values changed).
    pub(crate) fn invalidate(&mut self) {
        match self {
            Binding::Scrub { dirty, .. } => *dirty = true,
            Binding::OnEnter { primed, player, .. } => {
                if !player.is_playing() {
                    *primed = false;
                }
            }
            Binding::Rest => {}
        }
    }

    /// Drive the bound timeline to `now`.
    pub(crate) fn frame(
        &mut self,
        now: TimeMs,
        viewport: Viewport,
        sink: &mut dyn TargetSink,
    ) -> AdvanceReport {
        match self {
            Binding::Scrub {
                scheduler,
                smoother,
                dirty,
                ..
            } => {
                let p = smoother.update(now);
                if !*dirty && scheduler.progress() == Some(p) {
                    return AdvanceReport::default();
                }
                let report = scheduler.advance(p, viewport, sink);
                // Detached targets retry on the next frame.
                *dirty = report.skipped > 0;
                report
            }
            Binding::OnEnter {
                player, primed, ..
            } => {
                if let Some(report) = player.tick(now, viewport, sink) {
                    *primed = true;
                    return report;
                }
                if !*primed {
                    *primed = true;
                    return player.render(now, viewport, sink);
                }
                AdvanceReport::default()
            }
            Binding::Rest => AdvanceReport::default(),
        }
    }

    /// Cancel in-flight interpolation without writing.
    pub(crate) fn cancel(&mut self) {
        match self {
            Binding::Scrub { smoother, .. } => smoother.cancel(),
            Binding::OnEnter { player, .. } => player.cancel(),
            Binding::Rest => {}
        }
    }

    /// An interpolation is still moving towards its target.
    pub(crate) fn busy(&self) -> bool {
        match self {
            Binding::Scrub { smoother, .. } => !smoother.settled(),
            Binding::OnEnter { player, .. } => player.is_playing(),
            Binding::Rest => false,
        }
    }

    /// Timeline progress currently displayed.
    pub(crate) fn progress(&self, now: TimeMs) -> Option<f64> {
        match self {
            Binding::Scrub { smoother, .. } => Some(smoother.value()),
            Binding::OnEnter { player, .. } => Some(player.progress_at(now)),
            Binding::Rest => None,
        }
    }

    /// State the binding expects `target` to display.
    pub(crate) fn expected(
        &self,
        target: &TargetId,
        now: TimeMs,
        viewport: Viewport,
    ) -> Option<VisualState> {
        match self {
            Binding::Scrub {
                scheduler,
                smoother,
                ..
            } => scheduler.resolve_target(target, smoother.value(), viewport),
            Binding::OnEnter { player, .. } => player.expected(target, now, viewport),
            Binding::Rest => None,
        }
    }
}

/// Expected opacity of `target` given every timeline that may write it; the most hidden wins.
pub(crate) fn expected_opacity(
    binding: &Binding,
    entrance: Option<&EntrancePlayer>,
    target: &TargetId,
    now: TimeMs,
    viewport: Viewport,
) -> f64 {
    let from_binding = binding
        .expected(target, now, viewport)
        .and_then(|s| s.get(Property::Opacity));
    let from_entrance = entrance
        .and_then(|p| p.expected(target, now, viewport))
        .and_then(|s| s.get(Property::Opacity));
    match (from_binding, from_entrance) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) | (None, Some(a)) => a,
        (None, None) => Property::Opacity.resting(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/section.rs"]
mod tests;
