use crate::animation::ease::Ease;
use crate::animation::state::Lerp;
use crate::config::SwarmTimings;
use crate::foundation::core::{Point, TimeMs};

/// Phase of a swarm batch. Strictly ordered; a batch never moves backwards.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SwarmPhase {
    /// No batch.
    Idle,
    /// Flying from the trigger origin to scatter waypoints.
    Scattering,
    /// Flying from waypoints onto the glyph points, then holding the formed text.
    Converging,
    /// Fading out in place.
    Fading,
    /// Finished; the batch is dropped.
    Disposed,
}

/// Absolute phase deadlines shared by every particle of a batch.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BatchSchedule {
    /// Scatter start.
    pub started_at: TimeMs,
    /// Scatter end, convergence start.
    pub converge_at: TimeMs,
    /// Hold end, fade start.
    pub fade_at: TimeMs,
    /// Fade end.
    pub dispose_at: TimeMs,
    timings: SwarmTimings,
}

impl BatchSchedule {
    pub fn new(now: TimeMs, timings: SwarmTimings) -> Self {
        let converge_at = now.after(timings.scatter_ms);
        let fade_at = converge_at.after(timings.converge_ms + timings.hold_ms);
        Self {
            started_at: now,
            converge_at,
            fade_at,
            dispose_at: fade_at.after(timings.fade_ms),
            timings,
        }
    }

    pub fn phase_at(&self, now: TimeMs) -> SwarmPhase {
        if now < self.started_at {
            SwarmPhase::Idle
        } else if now < self.converge_at {
            SwarmPhase::Scattering
        } else if now < self.fade_at {
            SwarmPhase::Converging
        } else if now < self.dispose_at {
            SwarmPhase::Fading
        } else {
            SwarmPhase::Disposed
        }
    }

    fn local(now: TimeMs, start: TimeMs, len_ms: f64) -> f64 {
        if len_ms <= 0.0 {
            return 1.0;
        }
        (now.since(start) / len_ms).clamp(0.0, 1.0)
    }
}

/// One particle: randomized geometry, shared schedule.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SwarmParticle {
    /// Index within the batch.
    pub id: u32,
    /// Trigger origin.
    pub origin: Point,
    /// Scatter waypoint.
    pub scatter: Point,
    /// Glyph point to converge on.
    pub target: Point,
    /// Scale while scattering.
    pub scale: f64,
    /// Rotation while scattering, in degrees.
    pub rotation_deg: f64,
}

/// Render state of one particle at one instant.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ParticleSample {
    /// Particle index.
    pub id: u32,
    /// Screen position.
    pub position: Point,
    /// Uniform scale.
    pub scale: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

impl SwarmParticle {
    /// Sample at `now`; `None` outside the batch lifetime.
    pub fn sample(
        &self,
        schedule: &BatchSchedule,
        converge_scale: f64,
        now: TimeMs,
    ) -> Option<ParticleSample> {
        let t = &schedule.timings;
        let end_scale = self.scale * converge_scale;
        let (position, scale, rotation_deg, opacity) = match schedule.phase_at(now) {
            SwarmPhase::Idle | SwarmPhase::Disposed => return None,
            SwarmPhase::Scattering => {
                let u = BatchSchedule::local(now, schedule.started_at, t.scatter_ms);
                let e = Ease::OutCubic.apply(u);
                (
                    <Point as Lerp>::lerp(&self.origin, &self.scatter, e),
                    self.scale,
                    self.rotation_deg,
                    u,
                )
            }
            SwarmPhase::Converging => {
                let u = BatchSchedule::local(now, schedule.converge_at, t.converge_ms);
                let e = Ease::InOutCubic.apply(u);
                (
                    <Point as Lerp>::lerp(&self.scatter, &self.target, e),
                    <f64 as Lerp>::lerp(&self.scale, &end_scale, e),
                    <f64 as Lerp>::lerp(&self.rotation_deg, &0.0, e),
                    1.0,
                )
            }
            SwarmPhase::Fading => {
                let u = BatchSchedule::local(now, schedule.fade_at, t.fade_ms);
                (self.target, end_scale, 0.0, 1.0 - u)
            }
        };
        Some(ParticleSample {
            id: self.id,
            position,
            scale,
            rotation_deg,
            opacity,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/swarm/particle.rs"]
mod tests;
