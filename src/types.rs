//! Core types shared by the debounce, dispatch and scheduling layers.

/// Number of physical inputs on the reference keypad.
pub const KEY_COUNT: usize = 3;

/// Default debounce window in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 20;

/// Default cooldown after an action fires, in milliseconds.
///
/// Matches the delay after which the reference UI resets its status line.
pub const DEFAULT_COOLDOWN_MS: u64 = 1000;

/// Hue advance per animation tick (one full rotation per 100 ticks).
pub const DEFAULT_HUE_STEP: f32 = 0.01;

/// Animation tick period in milliseconds.
///
/// Paired with [`DEFAULT_HUE_STEP`] this gives a five second rainbow rotation.
pub const DEFAULT_ANIMATION_PERIOD_MS: u64 = 50;

/// How long a presentation layer keeps its "action performed" popup open.
///
/// The core never waits on this; it is published for collaborators that
/// render feedback.
pub const FEEDBACK_DISPLAY_MS: u64 = 3000;

/// A committed transition of a debounced input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Input went from released to pressed.
    Rising,

    /// Input went from pressed to released.
    Falling,
}

impl Edge {
    /// Returns the edge that leads into the given debounced level.
    #[inline]
    pub fn from_level(pressed: bool) -> Self {
        if pressed { Edge::Rising } else { Edge::Falling }
    }

    /// Returns true for a press.
    #[inline]
    pub fn is_press(self) -> bool {
        self == Edge::Rising
    }
}

/// Index of an input channel on the keypad.
///
/// Channels are numbered `0..N` and processed in that order on every
/// sampling tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelId(pub usize);

impl From<usize> for ChannelId {
    fn from(index: usize) -> Self {
        ChannelId(index)
    }
}

impl From<ChannelId> for usize {
    fn from(id: ChannelId) -> Self {
        id.0
    }
}

impl core::fmt::Display for ChannelId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "channel {}", self.0)
    }
}
