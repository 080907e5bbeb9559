//! Pointer-to-value mapping for sliders and range sliders.
//!
//! A slider's value lives in normalized `[0, 1]` space; the controller maps
//! pointer positions on a track rectangle to values, snaps them to discrete
//! divisions when configured, and runs the overlay/indicator/enable
//! animation lifecycle across an interaction.
//!
//! ## Usage
//!
//! ```
//! use murrine_components::slider::{SliderCallbacks, SliderConfig, SliderController, TrackRect};
//!
//! let config = SliderConfig::default();
//! let callbacks = SliderCallbacks::default().on_changed(|v| println!("{v}"));
//! let track = TrackRect::new(0.0, 200.0);
//!
//! let mut controller = SliderController::new(0.25, &config, true);
//! controller.begin_interaction(100.0, track, &config, &callbacks);
//! controller.end_interaction(&config, &callbacks);
//! ```

use derive_setters::Setters;
use murrine_ui::{CallbackWith, Color, Dp, TextDirection};

use crate::theme::MaterialPalette;

pub use interaction::{
    RangeSliderController, SliderController, Thumb, default_range_thumb_selector,
};

mod interaction;

/// Minimum touch target width around a thumb.
pub const MIN_TOUCH_TARGET: Dp = Dp(48.0);
/// Default minimum separation between range thumbs on continuous sliders.
pub const DEFAULT_MIN_THUMB_SEPARATION: Dp = Dp(8.0);
/// Default thumb radius.
pub const DEFAULT_THUMB_RADIUS: Dp = Dp(10.0);

/// When the value indicator bubble is shown during interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShowValueIndicator {
    /// Only when the slider has divisions.
    #[default]
    OnlyForDiscrete,
    /// Only when the slider is continuous.
    OnlyForContinuous,
    /// For every slider.
    Always,
    /// Never.
    Never,
}

impl ShowValueIndicator {
    /// Whether the indicator shows for a slider with the given discreteness.
    pub fn shown(self, discrete: bool) -> bool {
        match self {
            ShowValueIndicator::OnlyForDiscrete => discrete,
            ShowValueIndicator::OnlyForContinuous => !discrete,
            ShowValueIndicator::Always => true,
            ShowValueIndicator::Never => false,
        }
    }
}

/// The color set a slider paints with, enabled and disabled variants both.
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
pub struct SliderColors {
    /// Active (filled) part of the track.
    pub active_track: Color,
    /// Inactive part of the track.
    pub inactive_track: Color,
    /// The thumb.
    pub thumb: Color,
    /// The pressed overlay halo around the thumb.
    pub overlay: Color,
    /// The value indicator bubble.
    pub value_indicator: Color,
    /// Active track while disabled.
    pub disabled_active_track: Color,
    /// Inactive track while disabled.
    pub disabled_inactive_track: Color,
    /// Thumb while disabled.
    pub disabled_thumb: Color,
}

impl SliderColors {
    /// Derives slider colors from a resolved palette.
    pub fn from_palette(palette: &MaterialPalette) -> Self {
        Self {
            active_track: palette.primary,
            inactive_track: palette.primary.with_alpha(0.24),
            thumb: palette.primary,
            overlay: palette.primary.with_alpha(0.12),
            value_indicator: palette.primary,
            disabled_active_track: palette.disabled,
            disabled_inactive_track: palette.disabled.with_alpha(0.12),
            disabled_thumb: palette.disabled,
        }
    }

    /// Active track color at the given enable animation fraction.
    pub fn active_track_at(&self, enable_fraction: f32) -> Color {
        Color::lerp(self.disabled_active_track, self.active_track, enable_fraction)
    }

    /// Inactive track color at the given enable animation fraction.
    pub fn inactive_track_at(&self, enable_fraction: f32) -> Color {
        Color::lerp(
            self.disabled_inactive_track,
            self.inactive_track,
            enable_fraction,
        )
    }

    /// Thumb color at the given enable animation fraction.
    pub fn thumb_at(&self, enable_fraction: f32) -> Color {
        Color::lerp(self.disabled_thumb, self.thumb, enable_fraction)
    }
}

impl Default for SliderColors {
    fn default() -> Self {
        Self::from_palette(&MaterialPalette::default())
    }
}

/// Resolved configuration for a single-thumb slider.
///
/// Assembled by the caller once per build pass and threaded through every
/// controller call; nothing is looked up ambiently.
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct SliderConfig {
    /// Number of discrete divisions; `None` is a continuous slider.
    #[setters(strip_option)]
    pub divisions: Option<usize>,
    /// Text direction the track is laid out in.
    pub text_direction: TextDirection,
    /// Value indicator visibility policy.
    pub show_value_indicator: ShowValueIndicator,
    /// Thumb radius.
    pub thumb_radius: Dp,
    /// Minimum touch target width around a thumb.
    pub min_touch_target: Dp,
    /// Display scale factor for dp-to-px conversion.
    pub scale: f32,
    /// Colors the slider paints with.
    pub colors: SliderColors,
}

impl SliderConfig {
    /// Whether the slider snaps to divisions.
    pub fn is_discrete(&self) -> bool {
        self.divisions.is_some_and(|d| d > 0)
    }

    /// Whether the value indicator shows for this configuration.
    pub fn shows_value_indicator(&self) -> bool {
        self.show_value_indicator.shown(self.is_discrete())
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            divisions: None,
            text_direction: TextDirection::Ltr,
            show_value_indicator: ShowValueIndicator::default(),
            thumb_radius: DEFAULT_THUMB_RADIUS,
            min_touch_target: MIN_TOUCH_TARGET,
            scale: 1.0,
            colors: SliderColors::default(),
        }
    }
}

/// Resolved configuration for a range slider.
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct RangeSliderConfig {
    /// The shared slider configuration.
    #[setters(skip)]
    pub slider: SliderConfig,
    /// Minimum separation kept between the two thumbs while dragging a
    /// continuous range. Ignored for discrete ranges.
    pub min_thumb_separation: Dp,
}

impl RangeSliderConfig {
    /// Wraps a slider configuration with the default thumb separation.
    pub fn new(slider: SliderConfig) -> Self {
        Self {
            slider,
            min_thumb_separation: DEFAULT_MIN_THUMB_SEPARATION,
        }
    }
}

impl Default for RangeSliderConfig {
    fn default() -> Self {
        Self::new(SliderConfig::default())
    }
}

/// Value-change callbacks for a single-thumb slider.
///
/// A slider with no `on_changed` handler is disabled: gesture handling is
/// suppressed entirely and the enable animation fades the colors out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SliderCallbacks {
    /// Called with each new value during an interaction.
    pub on_changed: Option<CallbackWith<f32>>,
    /// Called once when an interaction begins, before the first `on_changed`.
    pub on_change_start: Option<CallbackWith<f32>>,
    /// Called once when an interaction ends, after the last `on_changed`.
    pub on_change_end: Option<CallbackWith<f32>>,
}

impl SliderCallbacks {
    /// Sets the on_changed handler.
    pub fn on_changed<F>(mut self, handler: F) -> Self
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        self.on_changed = Some(CallbackWith::new(handler));
        self
    }

    /// Sets the on_change_start handler.
    pub fn on_change_start<F>(mut self, handler: F) -> Self
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        self.on_change_start = Some(CallbackWith::new(handler));
        self
    }

    /// Sets the on_change_end handler.
    pub fn on_change_end<F>(mut self, handler: F) -> Self
    where
        F: Fn(f32) + Send + Sync + 'static,
    {
        self.on_change_end = Some(CallbackWith::new(handler));
        self
    }

    /// Whether the slider reacts to gestures.
    pub fn is_enabled(&self) -> bool {
        self.on_changed.is_some()
    }
}

/// Value-change callbacks for a range slider, reporting `(start, end)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangeSliderCallbacks {
    /// Called with each new range during an interaction.
    pub on_changed: Option<CallbackWith<(f32, f32)>>,
    /// Called once when an interaction begins.
    pub on_change_start: Option<CallbackWith<(f32, f32)>>,
    /// Called once when an interaction ends.
    pub on_change_end: Option<CallbackWith<(f32, f32)>>,
}

impl RangeSliderCallbacks {
    /// Sets the on_changed handler.
    pub fn on_changed<F>(mut self, handler: F) -> Self
    where
        F: Fn((f32, f32)) + Send + Sync + 'static,
    {
        self.on_changed = Some(CallbackWith::new(handler));
        self
    }

    /// Sets the on_change_start handler.
    pub fn on_change_start<F>(mut self, handler: F) -> Self
    where
        F: Fn((f32, f32)) + Send + Sync + 'static,
    {
        self.on_change_start = Some(CallbackWith::new(handler));
        self
    }

    /// Sets the on_change_end handler.
    pub fn on_change_end<F>(mut self, handler: F) -> Self
    where
        F: Fn((f32, f32)) + Send + Sync + 'static,
    {
        self.on_change_end = Some(CallbackWith::new(handler));
        self
    }

    /// Whether the range slider reacts to gestures.
    pub fn is_enabled(&self) -> bool {
        self.on_changed.is_some()
    }
}

/// The horizontal extent of a slider track, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackRect {
    /// Left edge of the track in local coordinates.
    pub left: f32,
    /// Track width. Must be positive.
    pub width: f32,
}

impl TrackRect {
    /// Creates a track extent.
    pub fn new(left: f32, width: f32) -> Self {
        debug_assert!(width > 0.0, "track width must be positive");
        Self { left, width }
    }

    /// Maps a local x coordinate to a normalized value, mirrored under RTL
    /// and clamped to `[0, 1]`.
    pub fn value_from_local_x(&self, local_x: f32, direction: TextDirection) -> f32 {
        let visual = (local_x - self.left) / self.width;
        let value = if direction.is_rtl() { 1.0 - visual } else { visual };
        value.clamp(0.0, 1.0)
    }
}

/// Snaps a normalized value to the nearest of `divisions + 1` evenly spaced
/// steps. Clamps first; passes continuous values through unchanged.
pub fn discretize(value: f32, divisions: Option<usize>) -> f32 {
    let value = value.clamp(0.0, 1.0);
    match divisions {
        Some(d) if d > 0 => (value * d as f32).round() / d as f32,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discretize_idempotent() {
        for d in 1..=12usize {
            for i in 0..=100 {
                let v = i as f32 / 100.0;
                let once = discretize(v, Some(d));
                assert_eq!(discretize(once, Some(d)), once, "d={d} v={v}");
            }
        }
    }

    #[test]
    fn test_discretize_continuous_passthrough() {
        assert_eq!(discretize(0.37, None), 0.37);
        assert_eq!(discretize(0.37, Some(0)), 0.37);
        assert_eq!(discretize(1.7, None), 1.0);
    }

    #[test]
    fn test_value_clamped_outside_track() {
        let track = TrackRect::new(100.0, 200.0);
        assert_eq!(track.value_from_local_x(50.0, TextDirection::Ltr), 0.0);
        assert_eq!(track.value_from_local_x(400.0, TextDirection::Ltr), 1.0);
        assert_eq!(track.value_from_local_x(200.0, TextDirection::Ltr), 0.5);
    }

    #[test]
    fn test_rtl_mirrors_position() {
        let track = TrackRect::new(0.0, 100.0);
        assert_eq!(track.value_from_local_x(25.0, TextDirection::Rtl), 0.75);
        assert_eq!(track.value_from_local_x(-10.0, TextDirection::Rtl), 1.0);
    }

    #[test]
    fn test_indicator_policy() {
        assert!(ShowValueIndicator::OnlyForDiscrete.shown(true));
        assert!(!ShowValueIndicator::OnlyForDiscrete.shown(false));
        assert!(ShowValueIndicator::Always.shown(false));
        assert!(!ShowValueIndicator::Never.shown(true));
    }

    #[test]
    fn test_config_discreteness() {
        assert!(!SliderConfig::default().is_discrete());
        assert!(SliderConfig::default().divisions(4).is_discrete());
        assert!(!SliderConfig::default().divisions(0).is_discrete());
    }
}
