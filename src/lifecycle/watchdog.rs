use crate::config::WatchdogConfig;
use crate::foundation::core::TimeMs;

/// Slack added on top of the longest entrance before the watchdog may look.
pub const ENTRANCE_MARGIN_MS: f64 = 250.0;

/// Result of polling a [`Watchdog`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WatchdogPoll {
    /// Not armed or not due yet.
    Idle,
    /// Due, but an entrance was still running; re-armed.
    Postponed,
    /// Due now: inspect targets. The watchdog has fired and will not fire again.
    Inspect,
}

/// Single-shot check that heals targets stuck at (near) zero opacity.
#[derive(Clone, Debug, PartialEq)]
pub struct Watchdog {
    deadline: Option<TimeMs>,
    retry_ms: f64,
    threshold: f64,
}

impl Watchdog {
    /// Delay actually used: the configured delay, but never before the longest entrance ends.
    pub fn delay_for(config: &WatchdogConfig, longest_entrance_ms: f64) -> f64 {
        config
            .delay_ms
            .max(longest_entrance_ms + ENTRANCE_MARGIN_MS)
    }

    /// Arm at `now` for a section whose entrances last up to `longest_entrance_ms`.
    pub fn arm(now: TimeMs, config: &WatchdogConfig, longest_entrance_ms: f64) -> Self {
        Self {
            deadline: Some(now.after(Self::delay_for(config, longest_entrance_ms))),
            retry_ms: config.retry_ms,
            threshold: config.opacity_threshold,
        }
    }

    pub fn deadline(&self) -> Option<TimeMs> {
        self.deadline
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Clear the pending deadline.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Check the deadline. `busy` means an entrance is legitimately still running.
    pub fn poll(&mut self, now: TimeMs, busy: bool) -> WatchdogPoll {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                if busy {
                    self.deadline = Some(now.after(self.retry_ms));
                    WatchdogPoll::Postponed
                } else {
                    self.deadline = None;
                    WatchdogPoll::Inspect
                }
            }
            _ => WatchdogPoll::Idle,
        }
    }

    /// A target is stuck when the host shows it hidden and either the engine expects it visible
    /// or its section has not received a single scroll event since mount.
    pub fn is_stuck(&self, measured: Option<f64>, expected_opacity: f64, scrolled: bool) -> bool {
        measured.is_some_and(|m| m < self.threshold)
            && (!scrolled || expected_opacity >= self.threshold)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lifecycle/watchdog.rs"]
mod tests;
