#![no_std]
#![no_main]

use core::convert::Infallible;
use cortex_m_rt::entry;
use macropad_core::{
    ActionSink, ChannelId, InputSource, KeypadConfig, MacroAction, RgbLed, Scheduler, Srgb,
    TimeDuration, TimeInstant, TimeSource, reference_keymap,
};
use panic_halt as _;

// ============================================================================
// Minimal Time Types
// ============================================================================

/// Minimal 32-bit millisecond duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration32(u32);

impl TimeDuration for Duration32 {
    const ZERO: Self = Duration32(0);

    fn as_millis(&self) -> u64 {
        self.0 as u64
    }

    fn from_millis(millis: u64) -> Self {
        Duration32(millis as u32)
    }

    fn saturating_sub(self, other: Self) -> Self {
        Duration32(self.0.saturating_sub(other.0))
    }
}

/// Minimal 32-bit millisecond instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Instant32(u32);

impl TimeInstant for Instant32 {
    type Duration = Duration32;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        Duration32(self.0.saturating_sub(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(Instant32)
    }
}

// ============================================================================
// Minimal Collaborators
// ============================================================================

pub struct MinimalTimeSource;

impl TimeSource<Instant32> for MinimalTimeSource {
    fn now(&self) -> Instant32 {
        Instant32(0)
    }
}

/// Switches that read through `black_box` so sampling is not optimized out
pub struct MinimalSwitches;

impl InputSource for MinimalSwitches {
    type Error = Infallible;

    fn sample(&mut self, channel: ChannelId) -> Result<bool, Infallible> {
        Ok(core::hint::black_box(channel.0) == 0)
    }
}

pub struct MinimalHid;

impl ActionSink<MacroAction> for MinimalHid {
    fn on_action(&mut self, _channel: ChannelId, action: &MacroAction) {
        core::hint::black_box(action);
    }
}

/// Zero-size LED implementation for measuring library overhead
pub struct MinimalLed;

impl RgbLed for MinimalLed {
    fn set_color(&mut self, color: Srgb) {
        core::hint::black_box(color);
    }
}

// ============================================================================
// Keypad Core
// ============================================================================

// This function uses the library to prevent optimizer from removing code
#[inline(never)]
fn run_keypad() {
    let time_source = MinimalTimeSource;

    let config = KeypadConfig::<_, Duration32, 3>::builder()
        .bindings(reference_keymap())
        .build();

    if let Ok(config) = config {
        let mut keypad: Scheduler<'_, _, Instant32, _, _, _, _, 3> =
            Scheduler::new(config, MinimalSwitches, MinimalHid, MinimalLed, &time_source);
        let _ = keypad.start();
        let _ = keypad.sample_tick();
        let _ = keypad.animation_tick();
        let _ = keypad.service();
        keypad.stop();
        core::hint::black_box(keypad);
    }
}

#[entry]
fn main() -> ! {
    // Call test function to ensure all code is included
    run_keypad();

    // Halt - this is a size analysis binary, not meant to run
    loop {
        cortex_m::asm::nop();
    }
}
