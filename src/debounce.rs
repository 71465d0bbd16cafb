//! Per-input noise filter.
//!
//! [`DebounceGate`] turns a stream of raw samples into committed press and
//! release edges. A change of level is only committed once the debounce
//! window has elapsed since the previous committed edge; anything faster is
//! treated as contact chatter and dropped without a trace.

use crate::time::TimeInstant;
use crate::types::Edge;

/// Time-window debouncer for a single input channel.
pub struct DebounceGate<I: TimeInstant> {
    raw_state: bool,
    debounced_state: bool,
    last_edge_time: I,
    window: I::Duration,
}

impl<I: TimeInstant> DebounceGate<I> {
    /// Creates a released gate.
    ///
    /// `now` counts as the last committed edge, so nothing is reported until
    /// `window` has elapsed from construction.
    pub fn new(window: I::Duration, now: I) -> Self {
        Self {
            raw_state: false,
            debounced_state: false,
            last_edge_time: now,
            window,
        }
    }

    /// Feeds one raw sample and returns the committed edge, if any.
    ///
    /// A level change is committed when it differs from the debounced state
    /// and at least `window` has passed since the last committed edge.
    pub fn observe(&mut self, raw: bool, now: I) -> Option<Edge> {
        self.raw_state = raw;

        if raw == self.debounced_state {
            return None;
        }

        let since_edge = now.duration_since(self.last_edge_time);
        if since_edge < self.window {
            return None;
        }

        self.debounced_state = raw;
        self.last_edge_time = now;
        Some(Edge::from_level(raw))
    }

    /// Last raw level passed to [`observe`](Self::observe).
    pub fn raw_state(&self) -> bool {
        self.raw_state
    }

    /// Current debounced level.
    pub fn debounced_state(&self) -> bool {
        self.debounced_state
    }

    /// Returns true while the debounced level is "pressed".
    pub fn is_pressed(&self) -> bool {
        self.debounced_state
    }

    /// Instant of the last committed edge (or construction).
    pub fn last_edge_time(&self) -> I {
        self.last_edge_time
    }

    /// Configured debounce window.
    pub fn window(&self) -> I::Duration {
        self.window
    }
}
