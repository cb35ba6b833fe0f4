use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::TargetId;
use crate::foundation::error::{ChoreoError, ChoreoResult};
use crate::responsive::variant::{Breakpoint, DEFAULT_BREAKPOINT_PX};

/// Engine-wide tuning. Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Min viewport width (px) of the wide layout.
    pub breakpoint_px: f64,
    /// Scrub lag used when a page omits one.
    pub default_scrub_lag_ms: f64,
    /// Stuck-opacity watchdog.
    pub watchdog: WatchdogConfig,
    /// Theme-change rotation.
    pub theme: ThemeConfig,
    /// Text-to-particle swarm.
    pub swarm: SwarmConfig,
    /// Glyph sampling.
    pub raster: RasterParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: DEFAULT_BREAKPOINT_PX,
            default_scrub_lag_ms: 500.0,
            watchdog: WatchdogConfig::default(),
            theme: ThemeConfig::default(),
            swarm: SwarmConfig::default(),
            raster: RasterParams::default(),
        }
    }
}

/// Watchdog timing. The effective delay is never shorter than the longest entrance.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatchdogConfig {
    /// Minimum delay after mount before the first check.
    pub delay_ms: f64,
    /// Re-check interval while an entrance is still running.
    pub retry_ms: f64,
    /// Measured opacity below this counts as hidden.
    pub opacity_threshold: f64,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            delay_ms: 2000.0,
            retry_ms: 500.0,
            opacity_threshold: 0.05,
        }
    }
}

/// One-shot rotation played on theme changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Element that spins.
    pub target: TargetId,
    /// Length of the spin.
    pub duration_ms: f64,
    /// Full turns per spin.
    pub turns: f64,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            target: TargetId::from("nav.logo"),
            duration_ms: 600.0,
            turns: 1.0,
        }
    }
}

/// Phase lengths of a swarm batch, all in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwarmTimings {
    /// Origin to scatter waypoint.
    pub scatter_ms: f64,
    /// Waypoint to glyph point.
    pub converge_ms: f64,
    /// Time the formed text stays visible.
    pub hold_ms: f64,
    /// Fade to transparent.
    pub fade_ms: f64,
}

impl Default for SwarmTimings {
    fn default() -> Self {
        Self {
            scatter_ms: 600.0,
            converge_ms: 1200.0,
            hold_ms: 1800.0,
            fade_ms: 800.0,
        }
    }
}

impl SwarmTimings {
    /// Total batch lifetime.
    pub fn total_ms(&self) -> f64 {
        self.scatter_ms + self.converge_ms + self.hold_ms + self.fade_ms
    }
}

/// Swarm sizing and randomization.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwarmConfig {
    /// Hard cap on particles per batch.
    pub max_particles: usize,
    /// Phase lengths.
    pub timings: SwarmTimings,
    /// Uniform range of the per-particle scale.
    pub scale_range: [f64; 2],
    /// Uniform range of the per-particle rotation, in degrees.
    pub rotation_range_deg: [f64; 2],
    /// Scale factor reached at the end of convergence.
    pub converge_scale: f64,
    /// Seed of the controller's generator.
    pub seed: u64,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            max_particles: 320,
            timings: SwarmTimings::default(),
            scale_range: [0.6, 1.4],
            rotation_range_deg: [-180.0, 180.0],
            converge_scale: 0.45,
            seed: 0x5eed_c0de,
        }
    }
}

/// Glyph raster sampling parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RasterParams {
    /// Alpha above which a grid cell is foreground.
    pub alpha_threshold: u8,
    /// Max jitter applied to each kept point, in pixels.
    pub jitter_px: f64,
    /// Grid step for short (large) text.
    pub step_short: u32,
    /// Grid step for long (small) text.
    pub step_long: u32,
    /// Non-space length up to which text counts as short.
    pub short_text_max_chars: usize,
}

impl Default for RasterParams {
    fn default() -> Self {
        Self {
            alpha_threshold: 128,
            jitter_px: 1.5,
            step_short: 4,
            step_long: 6,
            short_text_max_chars: 6,
        }
    }
}

impl EngineConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ChoreoResult<Self> {
        let cfg: EngineConfig = serde_json::from_reader(r)
            .map_err(|e| ChoreoError::serde(format!("parse engine config JSON: {e}")))?;
        Ok(cfg)
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ChoreoResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ChoreoError::validation(format!("open engine config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint(self.breakpoint_px)
    }

    pub fn validate(&self) -> ChoreoResult<()> {
        fn non_negative(name: &str, v: f64) -> ChoreoResult<()> {
            if !v.is_finite() || v < 0.0 {
                return Err(ChoreoError::validation(format!(
                    "{name} must be finite and >= 0, got {v}"
                )));
            }
            Ok(())
        }

        non_negative("breakpoint_px", self.breakpoint_px)?;
        non_negative("default_scrub_lag_ms", self.default_scrub_lag_ms)?;
        non_negative("watchdog.delay_ms", self.watchdog.delay_ms)?;
        non_negative("watchdog.retry_ms", self.watchdog.retry_ms)?;
        if self.watchdog.retry_ms == 0.0 {
            return Err(ChoreoError::validation("watchdog.retry_ms must be > 0"));
        }
        if !(0.0..=1.0).contains(&self.watchdog.opacity_threshold) {
            return Err(ChoreoError::validation(
                "watchdog.opacity_threshold must be in [0, 1]",
            ));
        }

        if self.theme.target.as_str().trim().is_empty() {
            return Err(ChoreoError::validation("theme.target must be non-empty"));
        }
        non_negative("theme.duration_ms", self.theme.duration_ms)?;
        if self.theme.duration_ms == 0.0 {
            return Err(ChoreoError::validation("theme.duration_ms must be > 0"));
        }
        non_negative("theme.turns", self.theme.turns)?;

        let t = &self.swarm.timings;
        non_negative("swarm.timings.scatter_ms", t.scatter_ms)?;
        non_negative("swarm.timings.converge_ms", t.converge_ms)?;
        non_negative("swarm.timings.hold_ms", t.hold_ms)?;
        non_negative("swarm.timings.fade_ms", t.fade_ms)?;
        let [lo, hi] = self.swarm.scale_range;
        non_negative("swarm.scale_range[0]", lo)?;
        if !hi.is_finite() || hi < lo {
            return Err(ChoreoError::validation("swarm.scale_range must be ordered"));
        }
        let [lo, hi] = self.swarm.rotation_range_deg;
        if !lo.is_finite() || !hi.is_finite() || hi < lo {
            return Err(ChoreoError::validation(
                "swarm.rotation_range_deg must be finite and ordered",
            ));
        }
        non_negative("swarm.converge_scale", self.swarm.converge_scale)?;

        non_negative("raster.jitter_px", self.raster.jitter_px)?;
        if self.raster.step_short == 0 || self.raster.step_long == 0 {
            return Err(ChoreoError::validation("raster steps must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
