#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`DebounceGate`**: Turns raw samples of one input into committed press/release edges
//! - **`ActionDispatcher`**: Maps a press to its bound action, with a per-channel cooldown
//! - **`ColorCycle`**: Endless hue rotation for the indicator LED
//! - **`Scheduler`**: Owns all of the above and drives them from host ticks
//! - **`KeypadConfig`**: Validated one-time setup (bindings and timing constants)
//! - **`InputSource`** / **`ActionSink`** / **`RgbLed`**: Traits the host implements
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! Action descriptors are opaque to the core. [`keymap`] ships the bindings
//! of the reference three-key pad.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod color;
pub mod config;
pub mod debounce;
pub mod dispatch;
pub mod keymap;
pub mod scheduler;
pub mod time;
pub mod types;

pub use color::ColorCycle;
pub use config::{ConfigError, KeypadConfig, KeypadConfigBuilder};
pub use debounce::DebounceGate;
pub use dispatch::{ActionDispatcher, CooldownState};
pub use keymap::{Key, MacroAction, reference_keymap};
pub use scheduler::{
    ActionSink, InputSource, RgbLed, Scheduler, SchedulerError, SchedulerState, ServiceTiming,
};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use types::{
    ChannelId, DEFAULT_ANIMATION_PERIOD_MS, DEFAULT_COOLDOWN_MS, DEFAULT_DEBOUNCE_MS,
    DEFAULT_HUE_STEP, Edge, FEEDBACK_DISPLAY_MS, KEY_COUNT,
};

pub const COLOR_OFF: Srgb = Srgb::new(0.0, 0.0, 0.0);
