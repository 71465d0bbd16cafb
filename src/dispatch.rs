//! Press-to-action mapping with per-channel cooldown.
//!
//! [`ActionDispatcher`] owns the action bound to each channel and the
//! timestamp until which that channel stays locked after firing. A press on
//! a locked channel is swallowed; release edges never fire anything.

use crate::time::TimeInstant;
use crate::types::{ChannelId, Edge};
use heapless::Vec;

/// Cooldown bookkeeping for one channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CooldownState<I> {
    /// Instant from which the channel may fire again. `None` when unlocked.
    pub locked_until: Option<I>,
}

impl<I> Default for CooldownState<I> {
    fn default() -> Self {
        Self { locked_until: None }
    }
}

/// Maps committed presses to bound actions.
///
/// # Type Parameters
/// * `A` - Action descriptor, opaque to the core
/// * `I` - Time instant type
/// * `N` - Number of input channels
pub struct ActionDispatcher<A, I: TimeInstant, const N: usize> {
    bindings: Vec<A, N>,
    cooldowns: [CooldownState<I>; N],
    cooldown: I::Duration,
}

impl<A, I: TimeInstant, const N: usize> ActionDispatcher<A, I, N> {
    /// Creates a dispatcher with every channel unlocked.
    ///
    /// Channel `i` is bound to `bindings[i]`; channels past the end of
    /// `bindings` never fire.
    pub fn new(bindings: Vec<A, N>, cooldown: I::Duration) -> Self {
        Self {
            bindings,
            cooldowns: [CooldownState::default(); N],
            cooldown,
        }
    }

    /// Attempts to fire the action bound to `channel`.
    ///
    /// Fires only on [`Edge::Rising`] and only when the channel is not in
    /// cooldown. A successful fire locks the channel until `now + cooldown`.
    ///
    /// # Returns
    /// * `Some(action)` - The bound action; the caller forwards it and starts feedback
    /// * `None` - Release edge, channel in cooldown, or unknown channel
    pub fn try_fire(&mut self, channel: ChannelId, edge: Edge, now: I) -> Option<&A> {
        if !edge.is_press() {
            return None;
        }

        let idx = channel.0;
        let action = self.bindings.get(idx)?;
        let state = &mut self.cooldowns[idx];

        if let Some(locked_until) = state.locked_until {
            if now < locked_until {
                #[cfg(feature = "defmt")]
                defmt::trace!("{} pressed during cooldown, ignored", channel);
                return None;
            }
        }

        // On instant overflow the lock collapses to `now`; the channel
        // re-arms immediately rather than staying locked forever.
        state.locked_until = Some(now.checked_add(self.cooldown).unwrap_or(now));
        Some(action)
    }

    /// Clears an elapsed cooldown.
    ///
    /// Returns true exactly once per fire, on the first call at or after the
    /// lock expires. This is how feedback layers learn that a channel is
    /// ready again.
    pub fn expire(&mut self, channel: ChannelId, now: I) -> bool {
        let Some(state) = self.cooldowns.get_mut(channel.0) else {
            return false;
        };

        match state.locked_until {
            Some(locked_until) if now >= locked_until => {
                state.locked_until = None;
                true
            }
            _ => false,
        }
    }

    /// Returns true while `channel` would swallow a press at `now`.
    pub fn is_locked(&self, channel: ChannelId, now: I) -> bool {
        matches!(self.locked_until(channel), Some(until) if now < until)
    }

    /// Instant the channel's current lock ends, if it holds one.
    pub fn locked_until(&self, channel: ChannelId) -> Option<I> {
        self.cooldowns.get(channel.0).and_then(|state| state.locked_until)
    }

    /// Time left on the channel's lock at `now`.
    pub fn cooldown_remaining(&self, channel: ChannelId, now: I) -> Option<I::Duration> {
        match self.locked_until(channel) {
            Some(until) if now < until => Some(until.duration_since(now)),
            _ => None,
        }
    }

    /// Action bound to `channel`.
    pub fn binding(&self, channel: ChannelId) -> Option<&A> {
        self.bindings.get(channel.0)
    }

    /// Configured cooldown duration.
    pub fn cooldown(&self) -> I::Duration {
        self.cooldown
    }

    /// Number of bound channels.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Returns true if no channel is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Returns true if any channel currently holds a lock.
    pub fn any_locked(&self) -> bool {
        self.cooldowns.iter().any(|state| state.locked_until.is_some())
    }
}
