use crate::config::SwarmConfig;
use crate::foundation::core::{Point, TimeMs, Viewport};
use crate::foundation::rng::{Rng64, shuffled_subset};
use crate::glyph::raster::{GlyphPoint, GlyphRasterizer};
use crate::swarm::particle::{BatchSchedule, ParticleSample, SwarmParticle, SwarmPhase};

/// Anything that turns text into a point cloud.
pub trait GlyphSource {
    /// Sample `text` in a `width` x `height` raster.
    fn points(&self, text: &str, width: f64, height: f64, rng: &mut Rng64) -> Vec<GlyphPoint>;
}

impl GlyphSource for GlyphRasterizer {
    fn points(&self, text: &str, width: f64, height: f64, rng: &mut Rng64) -> Vec<GlyphPoint> {
        self.rasterize(text, width, height, rng)
    }
}

impl<T: GlyphSource + ?Sized> GlyphSource for Box<T> {
    fn points(&self, text: &str, width: f64, height: f64, rng: &mut Rng64) -> Vec<GlyphPoint> {
        (**self).points(text, width, height, rng)
    }
}

/// One formation: particles plus the deadlines they share.
#[derive(Clone, Debug, serde::Serialize)]
pub struct SwarmBatch {
    /// Monotonic batch counter.
    pub id: u64,
    /// Text being formed.
    pub text: String,
    /// Shared deadlines.
    pub schedule: BatchSchedule,
    /// Particles with their randomized geometry.
    pub particles: Vec<SwarmParticle>,
}

/// Owns at most one live [`SwarmBatch`].
#[derive(Debug)]
pub struct SwarmController<S = GlyphRasterizer> {
    source: S,
    config: SwarmConfig,
    rng: Rng64,
    batch: Option<SwarmBatch>,
    next_batch: u64,
}

impl<S: GlyphSource> SwarmController<S> {
    pub fn new(source: S, config: SwarmConfig) -> Self {
        let rng = Rng64::new(config.seed);
        Self {
            source,
            config,
            rng,
            batch: None,
            next_batch: 0,
        }
    }

    pub fn config(&self) -> &SwarmConfig {
        &self.config
    }

    /// Start a formation of `text` from `origin`, replacing any live batch.
    ///
    /// Returns the number of particles spawned; zero when the viewport is degenerate or the text
    /// has no foreground.
    #[tracing::instrument(skip(self, viewport))]
    pub fn trigger_formation(
        &mut self,
        origin: Point,
        text: &str,
        viewport: Viewport,
        now: TimeMs,
    ) -> usize {
        if let Some(old) = self.batch.take() {
            tracing::debug!(batch = old.id, "replacing live swarm batch");
        }

        let points = self
            .source
            .points(text, viewport.width, viewport.height, &mut self.rng);
        let selected = shuffled_subset(points, self.config.max_particles, &mut self.rng);
        if selected.is_empty() {
            tracing::debug!("nothing to form");
            return 0;
        }

        let [scale_lo, scale_hi] = self.config.scale_range;
        let [rot_lo, rot_hi] = self.config.rotation_range_deg;
        let particles: Vec<SwarmParticle> = selected
            .into_iter()
            .enumerate()
            .map(|(i, p)| SwarmParticle {
                id: i as u32,
                origin,
                scatter: Point::new(
                    self.rng.range_f64(0.0, viewport.width),
                    self.rng.range_f64(0.0, viewport.height),
                ),
                target: p.to_point(),
                scale: self.rng.range_f64(scale_lo, scale_hi),
                rotation_deg: self.rng.range_f64(rot_lo, rot_hi),
            })
            .collect();

        let count = particles.len();
        let id = self.next_batch;
        self.next_batch += 1;
        self.batch = Some(SwarmBatch {
            id,
            text: text.to_owned(),
            schedule: BatchSchedule::new(now, self.config.timings),
            particles,
        });
        tracing::debug!(batch = id, count, "swarm formation started");
        count
    }

    /// Phase of the live batch at `now`.
    pub fn phase(&self, now: TimeMs) -> SwarmPhase {
        self.batch
            .as_ref()
            .map_or(SwarmPhase::Idle, |b| b.schedule.phase_at(now))
    }

    /// Drop the batch once its last deadline passed. Returns the phase after the tick.
    pub fn tick(&mut self, now: TimeMs) -> SwarmPhase {
        let phase = self.phase(now);
        if phase == SwarmPhase::Disposed {
            if let Some(b) = self.batch.take() {
                tracing::debug!(batch = b.id, "swarm batch disposed");
            }
        }
        phase
    }

    /// Render samples of every live particle at `now`.
    pub fn sample(&self, now: TimeMs) -> Vec<ParticleSample> {
        let Some(batch) = &self.batch else {
            return Vec::new();
        };
        batch
            .particles
            .iter()
            .filter_map(|p| p.sample(&batch.schedule, self.config.converge_scale, now))
            .collect()
    }

    pub fn batch(&self) -> Option<&SwarmBatch> {
        self.batch.as_ref()
    }

    /// Number of live batches (0 or 1).
    pub fn active_batches(&self) -> usize {
        usize::from(self.batch.is_some())
    }

    /// Clear every pending deadline by dropping the batch.
    pub fn cancel(&mut self) {
        self.batch = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/swarm/controller.rs"]
mod tests;
