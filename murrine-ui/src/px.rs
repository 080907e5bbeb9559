//! Physical pixel coordinate types.
//!
//! [`Px`] is a single physical pixel coordinate. It supports negative values
//! (scrolling, off-screen placement) and saturating arithmetic. [`PxPosition`],
//! [`PxSize`] and [`PxRect`] build 2D positions, sizes and rectangles from it.
//!
//! The coordinate system has its origin at the top-left corner, x growing to
//! the right and y growing downward.

use std::ops::{AddAssign, Neg, SubAssign};

use crate::dp::Dp;

/// A physical pixel coordinate value.
///
/// Wraps an `i32` so layout math stays exact; fractional results from
/// animations or density scaling go through [`Px::from_f32`] or
/// [`Px::saturating_from_f32`] at the edges.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Px(pub i32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0);

    /// The maximum representable pixel value.
    pub const MAX: Self = Self(i32::MAX);

    /// Creates a new `Px` from an i32 value. Negative values are allowed.
    pub const fn new(value: i32) -> Self {
        Px(value)
    }

    /// Returns the raw i32 value.
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Converts from density-independent pixels using the given scale factor.
    pub fn from_dp(dp: Dp, scale: f32) -> Self {
        Px::from_f32(dp.to_pixels(scale))
    }

    /// Returns the absolute value as a u32.
    pub fn abs(self) -> u32 {
        self.0.unsigned_abs()
    }

    /// Returns the value clamped to be non-negative, as a u32.
    pub fn positive(self) -> u32 {
        if self.0 < 0 { 0 } else { self.0 as u32 }
    }

    /// Converts the pixel value to f32.
    pub fn to_f32(self) -> f32 {
        self.0 as f32
    }

    /// Creates a `Px` from an f32 value, truncating the fraction.
    pub fn from_f32(value: f32) -> Self {
        Px(value as i32)
    }

    /// Creates a `Px` from an f32 value, saturating at the i32 bounds.
    pub fn saturating_from_f32(value: f32) -> Self {
        Px(value.clamp(i32::MIN as f32, i32::MAX as f32) as i32)
    }

    /// Saturating addition.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Px(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Px(self.0.saturating_sub(rhs.0))
    }

    /// Multiplies by a scalar f32, truncating the result.
    pub fn mul_f32(self, rhs: f32) -> Self {
        Px((self.0 as f32 * rhs) as i32)
    }

    /// Divides by a scalar f32, truncating the result.
    pub fn div_f32(self, rhs: f32) -> Self {
        Px::from_f32(self.to_f32() / rhs)
    }

    /// Returns the larger of the two values.
    pub fn max(self, other: Self) -> Self {
        Px(self.0.max(other.0))
    }

    /// Returns the smaller of the two values.
    pub fn min(self, other: Self) -> Self {
        Px(self.0.min(other.0))
    }

    /// Clamps the value into `[lo, hi]`.
    pub fn clamp(self, lo: Self, hi: Self) -> Self {
        Px(self.0.clamp(lo.0, hi.0))
    }
}

/// A 2D position in physical pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PxPosition {
    /// The x-coordinate in physical pixels.
    pub x: Px,
    /// The y-coordinate in physical pixels.
    pub y: Px,
}

impl PxPosition {
    /// The origin position (0, 0).
    pub const ZERO: Self = Self { x: Px(0), y: Px(0) };

    /// Creates a new position from x and y coordinates.
    pub const fn new(x: Px, y: Px) -> Self {
        Self { x, y }
    }

    /// Offsets the position by the given deltas.
    pub fn offset(self, dx: Px, dy: Px) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Euclidean distance to another position.
    pub fn distance_to(self, other: Self) -> f32 {
        let dx = (self.x.0 - other.x.0) as f32;
        let dy = (self.y.0 - other.y.0) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Linear interpolation between two positions.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            x: Px::from_f32(self.x.to_f32() + (other.x.to_f32() - self.x.to_f32()) * t),
            y: Px::from_f32(self.y.to_f32() + (other.y.to_f32() - self.y.to_f32()) * t),
        }
    }
}

/// A 2D size in physical pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PxSize {
    /// The width in physical pixels.
    pub width: Px,
    /// The height in physical pixels.
    pub height: Px,
}

impl PxSize {
    /// Zero size (0 by 0).
    pub const ZERO: Self = Self {
        width: Px(0),
        height: Px(0),
    };

    /// Creates a new size from width and height.
    pub const fn new(width: Px, height: Px) -> Self {
        Self { width, height }
    }

    /// The center point of a box of this size anchored at the origin.
    pub fn center(self) -> PxPosition {
        PxPosition::new(self.width / 2, self.height / 2)
    }
}

/// A 2D rectangle in physical pixel space, stored as top-left corner plus
/// dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PxRect {
    /// The x-coordinate of the top-left corner.
    pub x: Px,
    /// The y-coordinate of the top-left corner.
    pub y: Px,
    /// The width of the rectangle.
    pub width: Px,
    /// The height of the rectangle.
    pub height: Px,
}

impl PxRect {
    /// A zero rectangle at the origin.
    pub const ZERO: Self = Self {
        x: Px::ZERO,
        y: Px::ZERO,
        width: Px::ZERO,
        height: Px::ZERO,
    };

    /// Creates a new rectangle from position and size components.
    pub const fn new(x: Px, y: Px, width: Px, height: Px) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a new rectangle from a position and a size.
    pub fn from_position_size(position: PxPosition, size: PxSize) -> Self {
        Self {
            x: position.x,
            y: position.y,
            width: size.width,
            height: size.height,
        }
    }

    /// The x-coordinate just past the right edge.
    pub fn right(&self) -> Px {
        self.x + self.width
    }

    /// The y-coordinate just past the bottom edge.
    pub fn bottom(&self) -> Px {
        self.y + self.height
    }

    /// The center point of the rectangle.
    pub fn center(&self) -> PxPosition {
        PxPosition::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Whether the point lies inside the rectangle (right/bottom exclusive).
    pub fn contains(&self, point: PxPosition) -> bool {
        point.x.0 >= self.x.0
            && point.x.0 < self.x.0 + self.width.0
            && point.y.0 >= self.y.0
            && point.y.0 < self.y.0 + self.height.0
    }
}

impl std::ops::Add for Px {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Px(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Px {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Px(self.0 - rhs.0)
    }
}

impl Neg for Px {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Px(-self.0)
    }
}

impl std::ops::Mul<i32> for Px {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self::Output {
        Px(self.0 * rhs)
    }
}

impl std::ops::Div<i32> for Px {
    type Output = Self;

    fn div(self, rhs: i32) -> Self::Output {
        Px(self.0 / rhs)
    }
}

impl AddAssign for Px {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Px {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl From<i32> for Px {
    fn from(value: i32) -> Self {
        Px(value)
    }
}

impl std::ops::Add for PxPosition {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        PxPosition {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl std::ops::Sub for PxPosition {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        PxPosition {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_px_arithmetic() {
        let a = Px(10);
        let b = Px(4);

        assert_eq!(a + b, Px(14));
        assert_eq!(a - b, Px(6));
        assert_eq!(a * 3, Px(30));
        assert_eq!(a / 2, Px(5));
        assert_eq!(-a, Px(-10));
    }

    #[test]
    fn test_px_saturating() {
        let max = Px(i32::MAX);
        let min = Px(i32::MIN);
        assert_eq!(max.saturating_add(Px(1)), max);
        assert_eq!(min.saturating_sub(Px(1)), min);
        assert_eq!(Px::saturating_from_f32(f32::MAX), Px(i32::MAX));
    }

    #[test]
    fn test_px_clamp_minmax() {
        assert_eq!(Px(5).clamp(Px(0), Px(3)), Px(3));
        assert_eq!(Px(-1).max(Px(0)), Px(0));
        assert_eq!(Px(7).min(Px(3)), Px(3));
    }

    #[test]
    fn test_position_distance() {
        let a = PxPosition::new(Px(0), Px(0));
        let b = PxPosition::new(Px(3), Px(4));
        assert_eq!(a.distance_to(b), 5.0);
    }

    #[test]
    fn test_position_lerp() {
        let a = PxPosition::new(Px(0), Px(0));
        let b = PxPosition::new(Px(10), Px(20));
        assert_eq!(a.lerp(b, 0.5), PxPosition::new(Px(5), Px(10)));
    }

    #[test]
    fn test_rect_contains() {
        let rect = PxRect::new(Px(10), Px(10), Px(20), Px(20));
        assert!(rect.contains(PxPosition::new(Px(10), Px(10))));
        assert!(rect.contains(PxPosition::new(Px(29), Px(29))));
        assert!(!rect.contains(PxPosition::new(Px(30), Px(10))));
        assert_eq!(rect.right(), Px(30));
        assert_eq!(rect.center(), PxPosition::new(Px(20), Px(20)));
    }
}
