//! Hue-rotation animation for the indicator LED.
//!
//! Provides [`ColorCycle`], the endless rainbow that drives the keypad's
//! indicator, plus small HSV and output-format helpers. All colors are
//! `palette::Srgb<f32>` in the 0.0-1.0 range; use [`to_rgb8`] or [`to_hex`]
//! when a collaborator needs 8-bit channels.

use crate::config::ConfigError;
use core::fmt::Write;
use heapless::String;
use palette::{FromColor, Hsv, Srgb};

/// Creates an RGB color from HSV components.
///
/// `hue` is a fraction of a full turn (`0.0..1.0`), unlike `palette::Hsv`
/// which takes degrees.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Srgb {
    let hsv = Hsv::new(hue * 360.0, saturation, value);
    Srgb::from_color(hsv)
}

/// Creates an RGB color from hue only (full saturation and value).
#[inline]
pub fn hue(hue: f32) -> Srgb {
    hsv(hue, 1.0, 1.0)
}

/// Converts a normalized color to 8-bit channels.
///
/// Channels are rounded to the nearest step, so `0.5` becomes `0x80`. Hex
/// strings can therefore differ by one from tools that truncate.
#[inline]
pub fn to_rgb8(color: Srgb) -> Srgb<u8> {
    color.into_format()
}

/// Formats a color as `#rrggbb`.
pub fn to_hex(color: Srgb) -> String<7> {
    let rgb = to_rgb8(color);
    let mut hex = String::new();
    // Seven bytes always fit.
    let _ = write!(hex, "#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue);
    hex
}

/// Longest rotation whose positions are all exact in `f32`.
///
/// Beyond this, `position / rotation_ticks` can round up to 1.0.
pub const MAX_ROTATION_TICKS: u32 = 1 << 24;

/// Endless hue rotation at fixed saturation and value.
///
/// The hue is kept as an integer position within one rotation of
/// `round(1 / hue_step)` ticks, so a full rotation lands back on the exact
/// starting hue no matter how many times it wraps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorCycle {
    position: u32,
    rotation_ticks: u32,
    saturation: f32,
    value: f32,
}

impl ColorCycle {
    /// Creates a cycle starting at hue 0.0 (red).
    ///
    /// # Errors
    /// * `InvalidHueStep` - `hue_step` is not finite, outside `(0, 1]`, or so
    ///   small that a rotation exceeds [`MAX_ROTATION_TICKS`]
    /// * `InvalidColorComponent` - saturation or value outside `[0, 1]`
    pub fn new(hue_step: f32, saturation: f32, value: f32) -> Result<Self, ConfigError> {
        if !hue_step.is_finite() || hue_step <= 0.0 || hue_step > 1.0 {
            return Err(ConfigError::InvalidHueStep);
        }
        if !(0.0..=1.0).contains(&saturation) || !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::InvalidColorComponent);
        }

        // Round half up; the operand is always >= 1.0.
        let ticks = (1.0 / hue_step) + 0.5;
        if ticks > MAX_ROTATION_TICKS as f32 {
            return Err(ConfigError::InvalidHueStep);
        }
        let rotation_ticks = ticks as u32;

        Ok(Self {
            position: 0,
            rotation_ticks: rotation_ticks.max(1),
            saturation,
            value,
        })
    }

    /// Returns the color for the current hue, then advances the hue one step.
    pub fn advance(&mut self) -> Srgb {
        let color = self.peek();
        self.position = (self.position + 1) % self.rotation_ticks;
        color
    }

    /// Returns the color for the current hue without advancing.
    pub fn peek(&self) -> Srgb {
        hsv(self.hue(), self.saturation, self.value)
    }

    /// Current hue in `[0.0, 1.0)`.
    pub fn hue(&self) -> f32 {
        self.position as f32 / self.rotation_ticks as f32
    }

    /// Number of `advance` calls in one full rotation.
    pub fn rotation_ticks(&self) -> u32 {
        self.rotation_ticks
    }

    /// Moves the hue back to 0.0.
    pub fn reset(&mut self) {
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.001
    }

    #[test]
    fn reference_step_rotates_in_one_hundred_ticks() {
        let cycle = ColorCycle::new(0.01, 1.0, 1.0).unwrap();
        assert_eq!(cycle.rotation_ticks(), 100);
    }

    #[test]
    fn step_is_rounded_to_whole_ticks() {
        assert_eq!(ColorCycle::new(0.3, 1.0, 1.0).unwrap().rotation_ticks(), 3);
        assert_eq!(ColorCycle::new(0.4, 1.0, 1.0).unwrap().rotation_ticks(), 3);
        assert_eq!(ColorCycle::new(1.0, 1.0, 1.0).unwrap().rotation_ticks(), 1);
    }

    #[test]
    fn rejects_out_of_range_step() {
        assert_eq!(ColorCycle::new(0.0, 1.0, 1.0), Err(ConfigError::InvalidHueStep));
        assert_eq!(ColorCycle::new(-0.1, 1.0, 1.0), Err(ConfigError::InvalidHueStep));
        assert_eq!(ColorCycle::new(1.5, 1.0, 1.0), Err(ConfigError::InvalidHueStep));
        assert_eq!(ColorCycle::new(f32::NAN, 1.0, 1.0), Err(ConfigError::InvalidHueStep));
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert_eq!(
            ColorCycle::new(0.01, 1.1, 1.0),
            Err(ConfigError::InvalidColorComponent)
        );
        assert_eq!(
            ColorCycle::new(0.01, 1.0, -0.5),
            Err(ConfigError::InvalidColorComponent)
        );
    }

    #[test]
    fn advance_returns_color_before_stepping() {
        let mut cycle = ColorCycle::new(0.25, 1.0, 1.0).unwrap();
        let first = cycle.advance();
        assert!(close(first.red, 1.0) && close(first.green, 0.0) && close(first.blue, 0.0));
        assert!(close(cycle.hue(), 0.25));
    }

    #[test]
    fn reset_returns_to_red() {
        let mut cycle = ColorCycle::new(0.1, 1.0, 1.0).unwrap();
        cycle.advance();
        cycle.advance();
        cycle.reset();
        assert_eq!(cycle.hue(), 0.0);
    }

    #[test]
    fn hex_formats_primary_colors() {
        assert_eq!(to_hex(Srgb::new(1.0, 0.0, 0.0)).as_str(), "#ff0000");
        assert_eq!(to_hex(Srgb::new(0.0, 1.0, 0.0)).as_str(), "#00ff00");
        assert_eq!(to_hex(Srgb::new(0.0, 0.0, 1.0)).as_str(), "#0000ff");
    }
}
