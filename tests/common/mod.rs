//! Shared test infrastructure for macropad-core integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use macropad_core::{
    ActionSink, ChannelId, KeypadConfig, RgbLed, Scheduler, Srgb, TimeDuration, TimeInstant,
    TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0 - earlier.0)
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given number of milliseconds
    pub fn advance(&self, millis: u64) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + millis));
    }

    pub fn set_time(&self, millis: u64) {
        self.current_time.set(TestInstant(millis));
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock LED
// ============================================================================

/// Mock LED that records all color changes for testing
pub struct MockLed {
    color_history: Vec<Srgb>,
}

impl MockLed {
    pub fn new() -> Self {
        Self {
            color_history: Vec::new(),
        }
    }

    pub fn color_history(&self) -> &[Srgb] {
        &self.color_history
    }
}

impl RgbLed for MockLed {
    fn set_color(&mut self, color: Srgb) {
        self.color_history.push(color);
    }
}

// ============================================================================
// Mock Inputs
// ============================================================================

/// Read failure reported by [`MockInputs`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadError;

/// Scripted raw input levels with per-channel failure injection
pub struct MockInputs {
    levels: [bool; 3],
    failing: [bool; 3],
    reads: Vec<ChannelId>,
}

impl MockInputs {
    pub fn new() -> Self {
        Self {
            levels: [false; 3],
            failing: [false; 3],
            reads: Vec::new(),
        }
    }

    pub fn set(&mut self, channel: usize, pressed: bool) {
        self.levels[channel] = pressed;
    }

    pub fn fail(&mut self, channel: usize, failing: bool) {
        self.failing[channel] = failing;
    }

    /// Channels in the order they were read
    pub fn reads(&self) -> &[ChannelId] {
        &self.reads
    }
}

impl macropad_core::InputSource for MockInputs {
    type Error = ReadError;

    fn sample(&mut self, channel: ChannelId) -> Result<bool, ReadError> {
        self.reads.push(channel);
        if self.failing[channel.0] {
            return Err(ReadError);
        }
        Ok(self.levels[channel.0])
    }
}

// ============================================================================
// Mock Sink
// ============================================================================

/// Event observed by [`MockSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    Action(ChannelId, &'static str),
    FeedbackEnd(ChannelId),
}

/// Action sink that records everything it receives
pub struct MockSink {
    events: Vec<SinkEvent>,
}

impl MockSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Only the fired actions, in order
    pub fn actions(&self) -> Vec<&'static str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                SinkEvent::Action(_, action) => Some(*action),
                SinkEvent::FeedbackEnd(_) => None,
            })
            .collect()
    }
}

impl ActionSink<&'static str> for MockSink {
    fn on_action(&mut self, channel: ChannelId, action: &&'static str) {
        self.events.push(SinkEvent::Action(channel, *action));
    }

    fn on_feedback_end(&mut self, channel: ChannelId) {
        self.events.push(SinkEvent::FeedbackEnd(channel));
    }
}

// ============================================================================
// Scheduler helpers
// ============================================================================

pub type TestScheduler<'t> =
    Scheduler<'t, &'static str, TestInstant, MockTimeSource, MockInputs, MockSink, MockLed, 3>;

pub const ACTIONS: [&str; 3] = ["close", "launch", "refresh"];

/// Config with the given debounce window and cooldown, default animation
pub fn test_config(
    debounce_ms: u64,
    cooldown_ms: u64,
) -> KeypadConfig<&'static str, TestDuration, 3> {
    KeypadConfig::builder()
        .bindings(ACTIONS)
        .debounce_window(TestDuration(debounce_ms))
        .cooldown(TestDuration(cooldown_ms))
        .build()
        .unwrap()
}

pub fn test_scheduler(
    timer: &MockTimeSource,
    debounce_ms: u64,
    cooldown_ms: u64,
) -> TestScheduler<'_> {
    Scheduler::new(
        test_config(debounce_ms, cooldown_ms),
        MockInputs::new(),
        MockSink::new(),
        MockLed::new(),
        timer,
    )
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Compare two colors with floating-point tolerance
pub fn colors_equal(a: Srgb, b: Srgb) -> bool {
    const EPSILON: f32 = 0.001;
    (a.red - b.red).abs() < EPSILON
        && (a.green - b.green).abs() < EPSILON
        && (a.blue - b.blue).abs() < EPSILON
}
