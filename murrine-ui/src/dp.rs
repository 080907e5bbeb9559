//! Density-independent pixels.
//!
//! A dp value describes a length that should look the same physical size on
//! every display. Conversion to physical pixels takes an explicit scale
//! factor; there is no ambient global, callers thread the factor through
//! their resolved configuration.

use crate::px::Px;

/// A density-independent pixel value.
///
/// ## Usage
///
/// ```
/// use murrine_ui::{Dp, Px};
///
/// const PADDING: Dp = Dp(16.0);
/// let px = PADDING.to_px(2.0);
/// assert_eq!(px, Px(32));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f32);

impl Dp {
    /// Zero dp.
    pub const ZERO: Self = Self(0.0);

    /// Creates a new `Dp` value. Const so defaults tables can use it.
    pub const fn new(value: f32) -> Self {
        Dp(value)
    }

    /// Converts to physical pixels as f32 at the given scale factor.
    pub fn to_pixels(self, scale: f32) -> f32 {
        self.0 * scale
    }

    /// Converts to a [`Px`] value at the given scale factor.
    pub fn to_px(self, scale: f32) -> Px {
        Px::from_f32(self.to_pixels(scale))
    }
}

impl From<f32> for Dp {
    fn from(value: f32) -> Self {
        Dp(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dp_to_px() {
        assert_eq!(Dp(16.0).to_px(1.0), Px(16));
        assert_eq!(Dp(16.0).to_px(1.5), Px(24));
        assert_eq!(Dp::ZERO.to_px(3.0), Px(0));
    }
}
