//! choreo is a headless scroll choreography and text-to-particle formation engine.
//!
//! A host (web shell, native UI or the bundled CLI) feeds the engine scroll offsets, viewport
//! sizes, frame timestamps and user actions; the engine writes resolved visual state through a
//! [`TargetSink`]. The main entry points:
//!
//! - Author timelines with [`TimelineBuilder`] or load a [`Page`] from JSON
//! - Mount [`Section`]s on a [`Stage`] and drive it with [`Stage::on_scroll`],
//!   [`Stage::on_resize`] and [`Stage::frame`]
//! - Form text out of particles with [`Stage::trigger_formation`] or a standalone
//!   [`SwarmController`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod glyph;
pub(crate) mod host;
pub(crate) mod lifecycle;
pub(crate) mod responsive;
pub(crate) mod scene;
pub(crate) mod scroll;
pub(crate) mod swarm;
pub(crate) mod timeline;

pub use crate::foundation::core::{Point, SectionGeometry, SectionId, TargetId, TimeMs, Viewport};
pub use crate::foundation::error::{ChoreoError, ChoreoResult};
pub use crate::foundation::rng::{Rng64, shuffled_subset};

pub use crate::animation::ease::Ease;
pub use crate::animation::segment::Segment;
pub use crate::animation::state::{Lerp, Property, StateDef, Value, VisualState};
pub use crate::animation::track::Track;

pub use crate::host::memory::MemoryHost;
pub use crate::host::sink::{ApplyOutcome, Host, TargetProbe, TargetSink};

pub use crate::timeline::dsl::TimelineBuilder;
pub use crate::timeline::player::{EntrancePlayer, PlayerState};
pub use crate::timeline::scheduler::{AdvanceReport, Scheduler};

pub use crate::scroll::progress::{PinState, Trigger};
pub use crate::scroll::scrub::{SNAP_EPSILON, ScrubSmoother};

pub use crate::responsive::variant::{
    Breakpoint, ClassChange, DEFAULT_BREAKPOINT_PX, DeviceClass, Drive, VariantGraph,
    VariantResolver, Variants,
};

pub use crate::lifecycle::listeners::{ListenerId, ListenerKind, ListenerRegistry};
pub use crate::lifecycle::section::{DisplayItem, Entrance, Section};
pub use crate::lifecycle::stage::{Disposer, FrameReport, Stage, Teardown};
pub use crate::lifecycle::watchdog::{ENTRANCE_MARGIN_MS, Watchdog, WatchdogPoll};

pub use crate::glyph::raster::{GlyphPoint, GlyphRasterizer};

pub use crate::swarm::controller::{GlyphSource, SwarmBatch, SwarmController};
pub use crate::swarm::particle::{BatchSchedule, ParticleSample, SwarmParticle, SwarmPhase};

pub use crate::config::{
    EngineConfig, RasterParams, SwarmConfig, SwarmTimings, ThemeConfig, WatchdogConfig,
};
pub use crate::scene::page::Page;
