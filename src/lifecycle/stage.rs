use crate::animation::ease::Ease;
use crate::animation::state::{StateDef, VisualState};
use crate::config::EngineConfig;
use crate::foundation::core::{Point, SectionGeometry, SectionId, TargetId, TimeMs, Viewport};
use crate::foundation::error::{ChoreoError, ChoreoResult};
use crate::glyph::raster::GlyphRasterizer;
use crate::host::sink::{Host, TargetSink};
use crate::lifecycle::listeners::{ListenerKind, ListenerRegistry};
use crate::lifecycle::section::{Binding, DisplayItem, Section, expected_opacity};
use crate::lifecycle::watchdog::{Watchdog, WatchdogPoll};
use crate::responsive::variant::{DeviceClass, VariantResolver};
use crate::scroll::progress::PinState;
use crate::swarm::controller::{GlyphSource, SwarmController};
use crate::timeline::dsl::TimelineBuilder;
use crate::timeline::player::EntrancePlayer;
use crate::timeline::scheduler::Scheduler;

/// What happens to a section's targets when it is disposed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Teardown {
    /// Leave targets as last written (the section is being re-mounted).
    Keep,
    /// Reset every target to its resting state (the section is going away).
    Remove,
}

/// Handle returned by [`Stage::mount`]. Disposing twice is a no-op.
#[must_use = "a dropped Disposer can no longer tear down its section"]
#[derive(Debug)]
pub struct Disposer {
    section: SectionId,
    token: u64,
    disposed: bool,
}

impl Disposer {
    pub fn section(&self) -> &SectionId {
        &self.section
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Tear the section down: detach listeners, cancel interpolation, then reset targets when
    /// `teardown` is [`Teardown::Remove`]. Returns `false` if there was nothing left to do.
    pub fn dispose(
        &mut self,
        stage: &mut Stage,
        teardown: Teardown,
        sink: &mut dyn TargetSink,
    ) -> bool {
        if self.disposed {
            return false;
        }
        self.disposed = true;
        stage.dispose_mount(&self.section, self.token, teardown, sink)
    }
}

/// Per-frame summary.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Target writes that reached the host.
    pub applied: usize,
    /// Writes skipped because the target was detached.
    pub skipped: usize,
    /// Targets the watchdog forced back to resting.
    pub healed: Vec<TargetId>,
}

struct Mounted {
    section: Section,
    token: u64,
    binding: Binding,
    entrance: Option<EntrancePlayer>,
    watchdog: Watchdog,
    scrolled: bool,
}

/// Host-driven runtime: mounted sections, the theme spin and the particle swarm.
///
/// The host forwards scroll, resize and layout signals as they happen and calls
/// [`Stage::frame`] once per display frame; every write happens inside `frame` except the
/// resting resets performed synchronously by variant switches and teardown.
pub struct Stage {
    config: EngineConfig,
    viewport: Viewport,
    scroll_y: f64,
    last_frame: TimeMs,
    resolver: VariantResolver,
    listeners: ListenerRegistry,
    mounted: Vec<Mounted>,
    theme: EntrancePlayer,
    swarm: SwarmController<Box<dyn GlyphSource>>,
    next_token: u64,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("viewport", &self.viewport)
            .field("scroll_y", &self.scroll_y)
            .field("class", &self.resolver.current())
            .field("mounted", &self.mounted.len())
            .field("listeners", &self.listeners.count())
            .finish()
    }
}

impl Stage {
    /// Create a stage whose swarm rasterizes with the system fonts.
    pub fn new(config: EngineConfig, viewport: Viewport) -> ChoreoResult<Self> {
        let source = GlyphRasterizer::new(config.raster);
        Self::with_glyph_source(config, viewport, Box::new(source))
    }

    /// Create a stage with a custom glyph source for the swarm.
    pub fn with_glyph_source(
        config: EngineConfig,
        viewport: Viewport,
        source: Box<dyn GlyphSource>,
    ) -> ChoreoResult<Self> {
        config.validate()?;

        let spin = TimelineBuilder::new()
            .from_to(
                config.theme.target.clone(),
                0.0,
                1.0,
                StateDef::new().rotate(0.0),
                StateDef::new().rotate(360.0 * config.theme.turns),
                Ease::InOutCubic,
            )?
            .build()?;
        let theme = EntrancePlayer::new(spin, config.theme.duration_ms)?;

        let mut resolver = VariantResolver::new(config.breakpoint());
        resolver.observe(viewport);
        let swarm = SwarmController::new(source, config.swarm.clone());

        Ok(Self {
            config,
            viewport,
            scroll_y: 0.0,
            last_frame: TimeMs(0.0),
            resolver,
            listeners: ListenerRegistry::new(),
            mounted: Vec::new(),
            theme,
            swarm,
            next_token: 0,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    /// Device class currently in effect.
    pub fn device_class(&self) -> DeviceClass {
        self.resolver
            .current()
            .unwrap_or_else(|| self.resolver.breakpoint().classify(self.viewport))
    }

    /// Mount `section`, binding the variant graph for the current device class.
    ///
    /// Fails if the section is invalid, already mounted, or animates a target another mounted
    /// section owns. Nothing is written for animated graphs until the next [`Stage::frame`];
    /// a `Rest` graph resets its section's targets immediately.
    #[tracing::instrument(skip(self, section, sink), fields(section = %section.id()))]
    pub fn mount(
        &mut self,
        section: Section,
        now: TimeMs,
        sink: &mut dyn TargetSink,
    ) -> ChoreoResult<Disposer> {
        section.validate()?;
        if self.is_mounted(section.id()) {
            return Err(ChoreoError::scene(format!(
                "section '{}' is already mounted",
                section.id()
            )));
        }
        let targets = section.targets();
        for other in &self.mounted {
            if let Some(shared) = other.section.targets().intersection(&targets).next() {
                return Err(ChoreoError::validation(format!(
                    "target '{shared}' of section '{}' is already owned by section '{}'",
                    section.id(),
                    other.section.id()
                )));
            }
        }

        let class = self.device_class();
        let graph = section.variants().select(class);
        let binding = Binding::bind(
            graph,
            self.scroll_y,
            section.geometry(),
            self.viewport,
            now,
        )?;
        if graph.is_rest() {
            reset_to_rest(section.variants().targets().iter(), sink);
        }

        let entrance = match section.entrance() {
            Some(e) => {
                let mut player =
                    EntrancePlayer::new(Scheduler::new(e.tracks.clone())?, e.duration_ms)?;
                player.play(now);
                Some(player)
            }
            None => None,
        };

        self.listeners.register(section.id(), ListenerKind::Scroll);
        self.listeners.register(section.id(), ListenerKind::Resize);

        let watchdog = Watchdog::arm(now, &self.config.watchdog, section.longest_entrance_ms());
        let token = self.next_token;
        self.next_token += 1;

        tracing::debug!(?class, targets = targets.len(), "section mounted");
        let disposer = Disposer {
            section: section.id().clone(),
            token,
            disposed: false,
        };
        self.mounted.push(Mounted {
            section,
            token,
            binding,
            entrance,
            watchdog,
            scrolled: false,
        });
        Ok(disposer)
    }

    /// Unmount `id` without a [`Disposer`]. Returns `false` if it was not mounted.
    pub fn unmount(
        &mut self,
        id: &SectionId,
        teardown: Teardown,
        sink: &mut dyn TargetSink,
    ) -> bool {
        let Some(token) = self
            .mounted
            .iter()
            .find(|m| m.section.id() == id)
            .map(|m| m.token)
        else {
            return false;
        };
        self.dispose_mount(id, token, teardown, sink)
    }

    fn dispose_mount(
        &mut self,
        id: &SectionId,
        token: u64,
        teardown: Teardown,
        sink: &mut dyn TargetSink,
    ) -> bool {
        let Some(idx) = self
            .mounted
            .iter()
            .position(|m| m.token == token && m.section.id() == id)
        else {
            return false;
        };

        let detached = self.listeners.remove_scope(id);

        let mut m = self.mounted.remove(idx);
        m.binding.cancel();
        if let Some(e) = &mut m.entrance {
            e.cancel();
        }
        m.watchdog.cancel();

        if teardown == Teardown::Remove {
            reset_to_rest(m.section.targets().iter(), sink);
        }
        tracing::debug!(section = %id, detached, ?teardown, "section disposed");
        true
    }

    /// Forward a scroll offset to every section listening for scroll.
    pub fn on_scroll(&mut self, scroll_y: f64, now: TimeMs) {
        if !scroll_y.is_finite() {
            return;
        }
        self.scroll_y = scroll_y;
        let viewport = self.viewport;
        for m in &mut self.mounted {
            if self.listeners.subscribed(m.section.id(), ListenerKind::Scroll) {
                m.binding
                    .on_scroll(scroll_y, m.section.geometry(), viewport, now);
                m.scrolled = true;
            }
        }
    }

    /// Handle a viewport resize. A device-class change resets every listening section's targets
    /// to resting and rebinds it to the new class's graph before this returns.
    pub fn on_resize(&mut self, viewport: Viewport, now: TimeMs, sink: &mut dyn TargetSink) {
        self.viewport = viewport;
        let change = self.resolver.observe(viewport);
        let scroll_y = self.scroll_y;

        for m in &mut self.mounted {
            if !self.listeners.subscribed(m.section.id(), ListenerKind::Resize) {
                continue;
            }
            let geometry = m.section.geometry();
            match change {
                Some(change) => {
                    reset_to_rest(m.section.variants().targets().iter(), sink);
                    m.binding.cancel();
                    let graph = m.section.variants().select(change.to);
                    m.binding = match Binding::bind(graph, scroll_y, geometry, viewport, now) {
                        Ok(b) => b,
                        Err(err) => {
                            tracing::warn!(
                                section = %m.section.id(),
                                %err,
                                "rebind failed, holding at rest"
                            );
                            Binding::Rest
                        }
                    };
                    tracing::debug!(
                        section = %m.section.id(),
                        from = ?change.from,
                        to = ?change.to,
                        "variant switch"
                    );
                }
                None => {
                    m.binding.on_scroll(scroll_y, geometry, viewport, now);
                    m.binding.invalidate();
                }
            }
        }
    }

    /// Update a section's document geometry (content reflow, image load).
    pub fn on_layout(&mut self, id: &SectionId, geometry: SectionGeometry, now: TimeMs) -> bool {
        let (scroll_y, viewport) = (self.scroll_y, self.viewport);
        let Some(m) = self.mounted.iter_mut().find(|m| m.section.id() == id) else {
            return false;
        };
        m.section.set_geometry(geometry);
        m.binding.on_scroll(scroll_y, geometry, viewport, now);
        true
    }

    /// Start (or restart) the theme-change spin.
    pub fn on_theme_change(&mut self, now: TimeMs) {
        tracing::debug!(target_id = %self.config.theme.target, "theme spin");
        self.theme.play(now);
    }

    /// Advance every timed thing to `now` and write the results through `host`.
    pub fn frame<H: Host>(&mut self, now: TimeMs, host: &mut H) -> FrameReport {
        self.last_frame = now;
        let viewport = self.viewport;
        let mut report = FrameReport::default();

        if let Some(r) = self.theme.tick(now, viewport, host) {
            report.applied += r.applied;
            report.skipped += r.skipped;
        }

        for m in &mut self.mounted {
            let r = m.binding.frame(now, viewport, host);
            report.applied += r.applied;
            report.skipped += r.skipped;
            if let Some(e) = &mut m.entrance {
                if let Some(r) = e.tick(now, viewport, host) {
                    report.applied += r.applied;
                    report.skipped += r.skipped;
                    if e.is_finished() {
                        // Shared targets go back to the bound graph's pose.
                        m.binding.invalidate();
                        let r = m.binding.frame(now, viewport, host);
                        report.applied += r.applied;
                        report.skipped += r.skipped;
                    }
                }
            }

            let busy = m.binding.busy() || m.entrance.as_ref().is_some_and(|e| e.is_playing());
            match m.watchdog.poll(now, busy) {
                WatchdogPoll::Idle => {}
                WatchdogPoll::Postponed => {
                    tracing::debug!(
                        section = %m.section.id(),
                        "watchdog postponed, entrance still running"
                    );
                }
                WatchdogPoll::Inspect => {
                    for target in m.section.targets() {
                        let measured = host.measured_opacity(&target);
                        let entrance = m.entrance.as_ref();
                        let expected =
                            expected_opacity(&m.binding, entrance, &target, now, viewport);
                        if m.watchdog.is_stuck(measured, expected, m.scrolled) {
                            tracing::warn!(
                                section = %m.section.id(),
                                target_id = %target,
                                ?measured,
                                expected,
                                scrolled = m.scrolled,
                                "healing stuck target"
                            );
                            host.apply(&target, &VisualState::resting());
                            report.healed.push(target);
                        }
                    }
                }
            }
        }

        self.swarm.tick(now);
        report
    }

    /// Start a text formation from `origin`, replacing any live one.
    pub fn trigger_formation(&mut self, origin: Point, text: &str, now: TimeMs) -> usize {
        self.swarm
            .trigger_formation(origin, text, self.viewport, now)
    }

    pub fn swarm(&self) -> &SwarmController<Box<dyn GlyphSource>> {
        &self.swarm
    }

    pub fn is_mounted(&self, id: &SectionId) -> bool {
        self.mounted.iter().any(|m| m.section.id() == id)
    }

    /// Mounted section ids in mount order.
    pub fn mounted_sections(&self) -> impl Iterator<Item = &SectionId> + '_ {
        self.mounted.iter().map(|m| m.section.id())
    }

    /// Live scroll/resize listeners across all sections.
    pub fn listener_count(&self) -> usize {
        self.listeners.count()
    }

    pub fn section_items(&self, id: &SectionId) -> Option<&[DisplayItem]> {
        self.find(id).map(|m| m.section.items())
    }

    /// Timeline progress currently displayed by `id`'s variant (`None` for `Rest`).
    pub fn progress(&self, id: &SectionId) -> Option<f64> {
        self.find(id)
            .and_then(|m| m.binding.progress(self.last_frame))
    }

    /// Pin translation and spacer for a pinned section at the current scroll offset.
    pub fn pin_state(&self, id: &SectionId) -> Option<PinState> {
        let m = self.find(id)?;
        m.binding
            .trigger()?
            .pin_state(self.scroll_y, m.section.geometry(), self.viewport)
    }

    fn find(&self, id: &SectionId) -> Option<&Mounted> {
        self.mounted.iter().find(|m| m.section.id() == id)
    }
}

fn reset_to_rest<'a>(targets: impl Iterator<Item = &'a TargetId>, sink: &mut dyn TargetSink) {
    let rest = VisualState::resting();
    for t in targets {
        sink.apply(t, &rest);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/stage.rs"]
mod tests;
