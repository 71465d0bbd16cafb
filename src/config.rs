//! One-time keypad configuration.
//!
//! A [`KeypadConfig`] is validated once, before a [`Scheduler`](crate::Scheduler)
//! can exist. Invalid timing constants or a wrong number of bindings are
//! rejected here so the running core never has to degrade.

use crate::color::ColorCycle;
use crate::time::TimeDuration;
use crate::types::{
    DEFAULT_ANIMATION_PERIOD_MS, DEFAULT_COOLDOWN_MS, DEFAULT_DEBOUNCE_MS, DEFAULT_HUE_STEP,
};
use heapless::Vec;

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Number of bound actions differs from the number of input channels.
    BindingCountMismatch {
        /// Channels on the keypad.
        expected: usize,
        /// Actions supplied.
        actual: usize,
    },

    /// Cooldown must be longer than zero.
    ZeroCooldown,

    /// Animation tick period must be longer than zero.
    ZeroAnimationPeriod,

    /// Hue step is not finite, outside `(0, 1]`, or too fine to represent.
    InvalidHueStep,

    /// Saturation or value outside `[0, 1]`.
    InvalidColorComponent,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::BindingCountMismatch { expected, actual } => {
                write!(
                    f,
                    "binding count mismatch: keypad has {} inputs but {} actions were bound",
                    expected, actual
                )
            }
            ConfigError::ZeroCooldown => {
                write!(f, "cooldown duration must be non-zero")
            }
            ConfigError::ZeroAnimationPeriod => {
                write!(f, "animation tick period must be non-zero")
            }
            ConfigError::InvalidHueStep => {
                write!(f, "hue step must be a finite value in (0, 1]")
            }
            ConfigError::InvalidColorComponent => {
                write!(f, "saturation and value must be in [0, 1]")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Validated keypad configuration.
///
/// # Type Parameters
/// * `A` - Action descriptor bound to each input
/// * `D` - Duration type
/// * `N` - Number of input channels
#[derive(Debug, Clone)]
pub struct KeypadConfig<A, D: TimeDuration, const N: usize> {
    bindings: Vec<A, N>,
    debounce_window: D,
    cooldown: D,
    animation: ColorCycle,
    animation_period: D,
}

impl<A, D: TimeDuration, const N: usize> KeypadConfig<A, D, N> {
    /// Creates a configuration builder with the reference defaults.
    pub fn builder() -> KeypadConfigBuilder<A, D, N> {
        KeypadConfigBuilder::new()
    }

    /// Validates a complete configuration in one call.
    ///
    /// Saturation and value are fixed at 1.0.
    pub fn new(
        bindings: [A; N],
        debounce_window: D,
        cooldown: D,
        hue_step: f32,
        animation_period: D,
    ) -> Result<Self, ConfigError> {
        Self::builder()
            .bindings(bindings)
            .debounce_window(debounce_window)
            .cooldown(cooldown)
            .hue_step(hue_step)
            .animation_period(animation_period)
            .build()
    }

    /// Debounce window applied to every input.
    pub fn debounce_window(&self) -> D {
        self.debounce_window
    }

    /// Cooldown applied after an action fires.
    pub fn cooldown(&self) -> D {
        self.cooldown
    }

    /// Animation tick period.
    pub fn animation_period(&self) -> D {
        self.animation_period
    }

    /// Hue rotation the indicator starts from.
    pub fn animation(&self) -> &ColorCycle {
        &self.animation
    }

    /// Bound actions in channel order.
    pub fn bindings(&self) -> &[A] {
        &self.bindings
    }

    pub(crate) fn into_parts(self) -> (Vec<A, N>, D, D, ColorCycle, D) {
        (
            self.bindings,
            self.debounce_window,
            self.cooldown,
            self.animation,
            self.animation_period,
        )
    }
}

/// Builder for constructing validated keypad configurations.
#[derive(Debug)]
pub struct KeypadConfigBuilder<A, D: TimeDuration, const N: usize> {
    bindings: Vec<A, N>,
    overflow: usize,
    debounce_window: D,
    cooldown: D,
    hue_step: f32,
    saturation: f32,
    value: f32,
    animation_period: D,
}

impl<A, D: TimeDuration, const N: usize> KeypadConfigBuilder<A, D, N> {
    /// Creates a builder with no bindings and the reference timings.
    pub fn new() -> Self {
        Self {
            bindings: Vec::new(),
            overflow: 0,
            debounce_window: D::from_millis(DEFAULT_DEBOUNCE_MS),
            cooldown: D::from_millis(DEFAULT_COOLDOWN_MS),
            hue_step: DEFAULT_HUE_STEP,
            saturation: 1.0,
            value: 1.0,
            animation_period: D::from_millis(DEFAULT_ANIMATION_PERIOD_MS),
        }
    }

    /// Binds the next channel to `action`.
    ///
    /// Channels are bound in index order. Binding more than `N` actions is
    /// reported by [`build`](Self::build).
    pub fn bind(mut self, action: A) -> Self {
        if self.bindings.push(action).is_err() {
            self.overflow += 1;
        }
        self
    }

    /// Binds several channels in index order.
    pub fn bindings<It: IntoIterator<Item = A>>(mut self, actions: It) -> Self {
        for action in actions {
            self = self.bind(action);
        }
        self
    }

    /// Sets the debounce window. Zero disables debouncing.
    pub fn debounce_window(mut self, window: D) -> Self {
        self.debounce_window = window;
        self
    }

    /// Sets the cooldown after an action fires.
    pub fn cooldown(mut self, cooldown: D) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Sets the hue advance per animation tick.
    pub fn hue_step(mut self, step: f32) -> Self {
        self.hue_step = step;
        self
    }

    /// Sets the fixed saturation of the indicator.
    pub fn saturation(mut self, saturation: f32) -> Self {
        self.saturation = saturation;
        self
    }

    /// Sets the fixed value (brightness) of the indicator.
    pub fn value(mut self, value: f32) -> Self {
        self.value = value;
        self
    }

    /// Sets the animation tick period.
    pub fn animation_period(mut self, period: D) -> Self {
        self.animation_period = period;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    /// * `BindingCountMismatch` - Fewer or more than `N` actions were bound
    /// * `ZeroCooldown` - Cooldown is zero
    /// * `ZeroAnimationPeriod` - Animation period is zero
    /// * `InvalidHueStep` / `InvalidColorComponent` - Animation constants out of range
    pub fn build(self) -> Result<KeypadConfig<A, D, N>, ConfigError> {
        let actual = self.bindings.len() + self.overflow;
        if actual != N {
            return Err(ConfigError::BindingCountMismatch {
                expected: N,
                actual,
            });
        }

        if self.cooldown <= D::ZERO {
            return Err(ConfigError::ZeroCooldown);
        }

        if self.animation_period <= D::ZERO {
            return Err(ConfigError::ZeroAnimationPeriod);
        }

        let animation = ColorCycle::new(self.hue_step, self.saturation, self.value)?;

        Ok(KeypadConfig {
            bindings: self.bindings,
            debounce_window: self.debounce_window,
            cooldown: self.cooldown,
            animation,
            animation_period: self.animation_period,
        })
    }
}

impl<A, D: TimeDuration, const N: usize> Default for KeypadConfigBuilder<A, D, N> {
    fn default() -> Self {
        Self::new()
    }
}
