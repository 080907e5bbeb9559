//! Layout constraints.
//!
//! A [`Constraint`] pairs a width and a height [`DimensionValue`]. Components
//! receive a constraint from their parent, merge in their own sizing intent
//! and measure children with the result.

use crate::px::Px;

/// How a single dimension (width or height) should be sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DimensionValue {
    /// Exactly this many pixels, regardless of available space.
    Fixed(Px),
    /// Size to content, optionally bounded.
    Wrap {
        /// Never smaller than this.
        min: Option<Px>,
        /// Never larger than this.
        max: Option<Px>,
    },
    /// Expand into available space, optionally bounded.
    Fill {
        /// Never smaller than this.
        min: Option<Px>,
        /// Never larger than this.
        max: Option<Px>,
    },
}

impl DimensionValue {
    /// Zero-sized dimension.
    pub const ZERO: Self = DimensionValue::Fixed(Px(0));

    /// Fill with no bounds.
    pub const FILLED: Self = DimensionValue::Fill {
        min: None,
        max: None,
    };

    /// Wrap with no bounds.
    pub const WRAP: Self = DimensionValue::Wrap {
        min: None,
        max: None,
    };

    /// The largest pixel extent this dimension may take, falling back to
    /// `default` when unbounded.
    pub fn to_max_px(&self, default: Px) -> Px {
        match self {
            DimensionValue::Fixed(value) => *value,
            DimensionValue::Wrap { max, .. } | DimensionValue::Fill { max, .. } => {
                max.unwrap_or(default)
            }
        }
    }

    /// The maximum bound, if one exists.
    pub fn get_max(&self) -> Option<Px> {
        match self {
            DimensionValue::Fixed(value) => Some(*value),
            DimensionValue::Wrap { max, .. } | DimensionValue::Fill { max, .. } => *max,
        }
    }

    /// The minimum bound, if one exists.
    pub fn get_min(&self) -> Option<Px> {
        match self {
            DimensionValue::Fixed(value) => Some(*value),
            DimensionValue::Wrap { min, .. } | DimensionValue::Fill { min, .. } => *min,
        }
    }

    /// Clamps a measured content size into this dimension's bounds.
    pub fn resolve(&self, content: Px) -> Px {
        match self {
            DimensionValue::Fixed(value) => *value,
            DimensionValue::Wrap { min, max } | DimensionValue::Fill { min, max } => {
                let mut v = content;
                if let Some(min) = min {
                    v = v.max(*min);
                }
                if let Some(max) = max {
                    v = v.min(*max);
                }
                v
            }
        }
    }
}

impl Default for DimensionValue {
    fn default() -> Self {
        DimensionValue::WRAP
    }
}

/// A width and height constraint pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Constraint {
    /// Width sizing rule.
    pub width: DimensionValue,
    /// Height sizing rule.
    pub height: DimensionValue,
}

impl Constraint {
    /// Creates a constraint from width and height rules.
    pub const fn new(width: DimensionValue, height: DimensionValue) -> Self {
        Self { width, height }
    }

    /// A constraint fixing both dimensions.
    pub const fn fixed(width: Px, height: Px) -> Self {
        Self {
            width: DimensionValue::Fixed(width),
            height: DimensionValue::Fixed(height),
        }
    }

    /// A loose constraint bounded above by the given size. Children measured
    /// with this may be any size up to the bound.
    pub const fn loose(max_width: Px, max_height: Px) -> Self {
        Self {
            width: DimensionValue::Wrap {
                min: None,
                max: Some(max_width),
            },
            height: DimensionValue::Wrap {
                min: None,
                max: Some(max_height),
            },
        }
    }
}
