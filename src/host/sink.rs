use crate::animation::state::VisualState;
use crate::foundation::core::TargetId;

/// Result of writing resolved state to a host element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The element exists and received the state.
    Applied,
    /// The element reference is unset (not attached yet, or removed). Nothing was written.
    Detached,
}

/// Write side of the host's element tree.
///
/// The engine only ever writes through this handle; resolved state is never read back from it
/// while advancing timelines.
pub trait TargetSink {
    /// Write the properties present in `state` onto `target`. Properties absent from `state` are
    /// left untouched.
    fn apply(&mut self, target: &TargetId, state: &VisualState) -> ApplyOutcome;
}

/// Read side used only by the stuck-state watchdog.
pub trait TargetProbe {
    /// Currently displayed opacity of `target`, or `None` when detached.
    fn measured_opacity(&self, target: &TargetId) -> Option<f64>;
}

/// Convenience bound for hosts that implement both sides.
pub trait Host: TargetSink + TargetProbe {}

impl<T: TargetSink + TargetProbe> Host for T {}
