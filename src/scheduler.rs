//! Cooperative driver for the keypad core.
//!
//! Provides [`Scheduler`], which owns every input channel, the action
//! bindings with their cooldowns, and the indicator animation. The host
//! delivers sampling and animation ticks from its own loop; the scheduler
//! never blocks or sleeps. Also defines the collaborator traits the host
//! implements: [`InputSource`], [`ActionSink`] and [`RgbLed`].

use crate::color::ColorCycle;
use crate::config::KeypadConfig;
use crate::debounce::DebounceGate;
use crate::dispatch::ActionDispatcher;
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::types::ChannelId;
use crate::COLOR_OFF;
use palette::Srgb;

/// Trait for abstracting RGB LED hardware.
///
/// Implement this for your LED hardware (GPIO, PWM, SPI, etc.) or for a
/// simulated indicator in a GUI.
pub trait RgbLed {
    /// Sets the LED to the specified RGB color.
    ///
    /// Color components are in the range 0.0-1.0. Handle any hardware errors
    /// internally - this method cannot fail.
    fn set_color(&mut self, color: Srgb);
}

/// Trait for reading the raw level of each input.
pub trait InputSource {
    /// Error produced when a channel cannot be read.
    type Error;

    /// Returns the raw level of `channel`, `true` meaning pressed.
    ///
    /// An error only affects this channel for this tick; it is read again on
    /// the next sampling tick.
    fn sample(&mut self, channel: ChannelId) -> Result<bool, Self::Error>;
}

/// Receives fired actions.
///
/// This is where a HID report writer or a GUI popup hooks in.
pub trait ActionSink<A> {
    /// An action fired. Feedback for `channel` should begin now.
    fn on_action(&mut self, channel: ChannelId, action: &A);

    /// The cooldown of `channel` elapsed; transient feedback can return to idle.
    fn on_feedback_end(&mut self, _channel: ChannelId) {}
}

/// The lifecycle state of a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerState {
    /// Configured, not yet started. No ticks accepted.
    Idle,
    /// Accepting sampling and animation ticks.
    Running,
    /// Shut down. Ticks are ignored and the state never changes again.
    Stopped,
}

/// Timing information returned by [`Scheduler::service`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceTiming<D> {
    /// Time until the next animation tick is due.
    ///
    /// This is the longest the host may wait. Hosts that sample inputs faster
    /// simply call `service` again sooner.
    Delay(D),

    /// The scheduler is stopped. No further servicing is needed.
    Stopped,
}

/// Errors that can occur during scheduler operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SchedulerError {
    /// Operation called from an invalid state.
    InvalidState {
        /// Human-readable description of the expected state(s)
        expected: &'static str,
        /// The actual current state
        actual: SchedulerState,
    },
}

impl core::fmt::Display for SchedulerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SchedulerError::InvalidState { expected, actual } => {
                write!(
                    f,
                    "invalid state: expected {}, but scheduler is in {:?}",
                    expected, actual
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SchedulerError {}

/// Drives debounced input dispatch and the indicator animation.
///
/// Both event streams share one thread of control. Each tick runs to
/// completion before control returns to the host, and the two cadences are
/// independent: the host decides how often to sample and how often to
/// animate.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `A` - Action descriptor type
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `S` - Input source implementation type
/// * `H` - Action sink implementation type
/// * `L` - LED implementation type
/// * `N` - Number of input channels
pub struct Scheduler<'t, A, I, T, S, H, L, const N: usize>
where
    I: TimeInstant,
    T: TimeSource<I>,
    S: InputSource,
    H: ActionSink<A>,
    L: RgbLed,
{
    time_source: &'t T,
    inputs: S,
    sink: H,
    led: L,
    state: SchedulerState,
    gates: [DebounceGate<I>; N],
    debounce_window: I::Duration,
    dispatcher: ActionDispatcher<A, I, N>,
    animation: ColorCycle,
    animation_period: I::Duration,
    last_animation: Option<I>,
    current_color: Srgb,
    sample_failures: [u32; N],
}

impl<'t, A, I, T, S, H, L, const N: usize> Scheduler<'t, A, I, T, S, H, L, N>
where
    I: TimeInstant,
    T: TimeSource<I>,
    S: InputSource,
    H: ActionSink<A>,
    L: RgbLed,
{
    /// Creates an idle scheduler from a validated configuration.
    pub fn new(
        config: KeypadConfig<A, I::Duration, N>,
        inputs: S,
        sink: H,
        led: L,
        time_source: &'t T,
    ) -> Self {
        let (bindings, debounce_window, cooldown, animation, animation_period) =
            config.into_parts();
        let now = time_source.now();

        Self {
            time_source,
            inputs,
            sink,
            led,
            state: SchedulerState::Idle,
            gates: core::array::from_fn(|_| DebounceGate::new(debounce_window, now)),
            debounce_window,
            dispatcher: ActionDispatcher::new(bindings, cooldown),
            animation,
            animation_period,
            last_animation: None,
            current_color: COLOR_OFF,
            sample_failures: [0; N],
        }
    }

    /// Starts ticking and shows the first animation color.
    ///
    /// Must be called from `Idle` state. Debounce windows are measured from
    /// this instant.
    pub fn start(&mut self) -> Result<(), SchedulerError> {
        if self.state != SchedulerState::Idle {
            return Err(SchedulerError::InvalidState {
                expected: "Idle",
                actual: self.state,
            });
        }

        let now = self.time_source.now();
        let window = self.debounce_window;
        self.gates = core::array::from_fn(|_| DebounceGate::new(window, now));
        self.state = SchedulerState::Running;

        #[cfg(feature = "defmt")]
        defmt::debug!("keypad scheduler started with {} channels", N);

        self.animation_tick()
    }

    /// Stops the scheduler for good.
    ///
    /// Can be called from any state; calling it again has no effect. After
    /// this no action or color is ever emitted by this instance.
    pub fn stop(&mut self) {
        if self.state != SchedulerState::Stopped {
            #[cfg(feature = "defmt")]
            defmt::debug!("keypad scheduler stopped");
        }
        self.state = SchedulerState::Stopped;
    }

    /// Samples every input once and dispatches committed presses.
    ///
    /// Channels are processed in index order. Before a channel is sampled,
    /// an elapsed cooldown on it is reported through
    /// [`ActionSink::on_feedback_end`]. A failed read counts as "no change"
    /// for that channel only.
    ///
    /// # Returns
    /// * `Ok(())` - Tick processed, or silently ignored because the scheduler is stopped
    /// * `Err` - The scheduler has not been started
    pub fn sample_tick(&mut self) -> Result<(), SchedulerError> {
        if !self.accepts_ticks()? {
            return Ok(());
        }

        let now = self.time_source.now();

        for idx in 0..N {
            let channel = ChannelId(idx);

            if self.dispatcher.expire(channel, now) {
                self.sink.on_feedback_end(channel);
            }

            let raw = match self.inputs.sample(channel) {
                Ok(raw) => raw,
                Err(_) => {
                    self.sample_failures[idx] = self.sample_failures[idx].saturating_add(1);
                    #[cfg(feature = "defmt")]
                    defmt::warn!("{} could not be sampled", channel);
                    continue;
                }
            };

            let Some(edge) = self.gates[idx].observe(raw, now) else {
                continue;
            };

            #[cfg(feature = "defmt")]
            defmt::trace!("{} committed {}", channel, edge);

            if let Some(action) = self.dispatcher.try_fire(channel, edge, now) {
                #[cfg(feature = "defmt")]
                defmt::debug!("{} fired", channel);
                self.sink.on_action(channel, action);
            }
        }

        Ok(())
    }

    /// Advances the indicator animation by one step and pushes the color.
    ///
    /// The tick is remembered, so [`service`](Self::service) waits a full
    /// period after a manual animation tick.
    ///
    /// # Returns
    /// * `Ok(())` - Tick processed, or silently ignored because the scheduler is stopped
    /// * `Err` - The scheduler has not been started
    pub fn animation_tick(&mut self) -> Result<(), SchedulerError> {
        if !self.accepts_ticks()? {
            return Ok(());
        }

        let color = self.animation.advance();
        self.led.set_color(color);
        self.current_color = color;
        self.last_animation = Some(self.time_source.now());
        Ok(())
    }

    /// Convenience driver for a host poll loop.
    ///
    /// Runs one sampling tick, then one animation tick if the animation
    /// period has elapsed since the previous one.
    ///
    /// # Returns
    /// - `Ok(ServiceTiming::Delay(duration))` - Time until the next animation tick
    /// - `Ok(ServiceTiming::Stopped)` - Scheduler is stopped
    /// - `Err` - The scheduler has not been started
    pub fn service(&mut self) -> Result<ServiceTiming<I::Duration>, SchedulerError> {
        if !self.accepts_ticks()? {
            return Ok(ServiceTiming::Stopped);
        }

        self.sample_tick()?;

        let now = self.time_source.now();
        let elapsed = self
            .last_animation
            .map(|last| now.duration_since(last));

        match elapsed {
            Some(elapsed) if elapsed < self.animation_period => Ok(ServiceTiming::Delay(
                self.animation_period.saturating_sub(elapsed),
            )),
            _ => {
                self.animation_tick()?;
                Ok(ServiceTiming::Delay(self.animation_period))
            }
        }
    }

    /// Returns `Ok(true)` when running, `Ok(false)` when stopped.
    fn accepts_ticks(&self) -> Result<bool, SchedulerError> {
        match self.state {
            SchedulerState::Running => Ok(true),
            SchedulerState::Stopped => Ok(false),
            SchedulerState::Idle => Err(SchedulerError::InvalidState {
                expected: "Running",
                actual: self.state,
            }),
        }
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Returns true if the scheduler is accepting ticks.
    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Returns the color last pushed to the LED.
    pub fn current_color(&self) -> Srgb {
        self.current_color
    }

    /// Hue the next animation tick will show.
    pub fn hue(&self) -> f32 {
        self.animation.hue()
    }

    /// Returns the debounced level of `channel`.
    pub fn is_pressed(&self, channel: ChannelId) -> bool {
        self.gates.get(channel.0).is_some_and(|gate| gate.is_pressed())
    }

    /// Time left before `channel` may fire again.
    pub fn cooldown_remaining(&self, channel: ChannelId) -> Option<I::Duration> {
        self.dispatcher
            .cooldown_remaining(channel, self.time_source.now())
    }

    /// Number of failed reads on `channel` since construction.
    pub fn sample_failures(&self, channel: ChannelId) -> u32 {
        self.sample_failures.get(channel.0).copied().unwrap_or(0)
    }

    /// Bindings and cooldown state.
    pub fn dispatcher(&self) -> &ActionDispatcher<A, I, N> {
        &self.dispatcher
    }

    /// Animation tick period from the configuration.
    pub fn animation_period(&self) -> I::Duration {
        self.animation_period
    }

    /// Returns a reference to the input source.
    pub fn inputs(&self) -> &S {
        &self.inputs
    }

    /// Returns a mutable reference to the input source.
    pub fn inputs_mut(&mut self) -> &mut S {
        &mut self.inputs
    }

    /// Returns a reference to the action sink.
    pub fn sink(&self) -> &H {
        &self.sink
    }

    /// Returns a reference to the LED.
    pub fn led(&self) -> &L {
        &self.led
    }

    /// Consumes the scheduler and hands the collaborators back.
    pub fn into_parts(self) -> (S, H, L) {
        (self.inputs, self.sink, self.led)
    }
}
