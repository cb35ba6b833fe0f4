use crate::animation::state::VisualState;
use crate::foundation::core::{TargetId, TimeMs, Viewport};
use crate::foundation::error::{ChoreoError, ChoreoResult};
use crate::host::sink::TargetSink;
use crate::timeline::scheduler::{AdvanceReport, Scheduler};

/// Playback state of an [`EntrancePlayer`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerState {
    /// Not started (or cancelled); resolves at progress 0.
    Idle,
    /// Running since `started`.
    Playing {
        /// Wall-clock start.
        started: TimeMs,
    },
    /// Ran to completion; resolves at progress 1.
    Finished,
}

/// Plays a scheduler once over wall-clock time instead of scroll progress.
///
/// Used for load-in entrances, play-on-enter reveals on compact screens and one-shot effects such
/// as the theme rotation. Time maps linearly to progress; easing lives in the segments.
#[derive(Clone, Debug)]
pub struct EntrancePlayer {
    scheduler: Scheduler,
    duration_ms: f64,
    state: PlayerState,
}

impl EntrancePlayer {
    /// Create an idle player; `duration_ms` must be finite and > 0.
    pub fn new(scheduler: Scheduler, duration_ms: f64) -> ChoreoResult<Self> {
        if !duration_ms.is_finite() || duration_ms <= 0.0 {
            return Err(ChoreoError::animation(format!(
                "player duration must be finite and > 0, got {duration_ms}"
            )));
        }
        Ok(Self {
            scheduler,
            duration_ms,
            state: PlayerState::Idle,
        })
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Start (or restart) playback at `now`.
    pub fn play(&mut self, now: TimeMs) {
        self.state = PlayerState::Playing { started: now };
    }

    /// Stop without writing anything; the player returns to `Idle`.
    pub fn cancel(&mut self) {
        self.state = PlayerState::Idle;
        self.scheduler.clear();
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlayerState::Playing { .. })
    }

    pub fn is_finished(&self) -> bool {
        self.state == PlayerState::Finished
    }

    /// Wall-clock time at which playback completes, if playing.
    pub fn finishes_at(&self) -> Option<TimeMs> {
        match self.state {
            PlayerState::Playing { started } => Some(started.after(self.duration_ms)),
            _ => None,
        }
    }

    /// Timeline progress at `now`.
    pub fn progress_at(&self, now: TimeMs) -> f64 {
        match self.state {
            PlayerState::Idle => 0.0,
            PlayerState::Finished => 1.0,
            PlayerState::Playing { started } => {
                (now.since(started) / self.duration_ms).clamp(0.0, 1.0)
            }
        }
    }

    /// Write the state for `now` without changing playback: the pre-entrance pose while idle,
    /// the final pose once finished.
    pub fn render(
        &mut self,
        now: TimeMs,
        viewport: Viewport,
        sink: &mut dyn TargetSink,
    ) -> AdvanceReport {
        let p = self.progress_at(now);
        self.scheduler.advance(p, viewport, sink)
    }

    /// Advance a playing timeline to `now`. Returns `None` when nothing is playing.
    pub fn tick(
        &mut self,
        now: TimeMs,
        viewport: Viewport,
        sink: &mut dyn TargetSink,
    ) -> Option<AdvanceReport> {
        if !self.is_playing() {
            return None;
        }
        let p = self.progress_at(now);
        let report = self.scheduler.advance(p, viewport, sink);
        if p >= 1.0 {
            self.state = PlayerState::Finished;
        }
        Some(report)
    }

    /// State the player is expected to display for `target` right now.
    pub fn expected(
        &self,
        target: &TargetId,
        now: TimeMs,
        viewport: Viewport,
    ) -> Option<VisualState> {
        self.scheduler
            .resolve_target(target, self.progress_at(now), viewport)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/player.rs"]
mod tests;
