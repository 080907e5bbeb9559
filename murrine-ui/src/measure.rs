//! The measure protocol.
//!
//! Custom layouts in murrine consume children through the [`Measurable`]
//! trait: a `measure` pass that resolves a [`Constraint`] into a concrete
//! size, intrinsic-size queries for the sizes a child would prefer, and an
//! optional text baseline. This mirrors the host framework's render-object
//! contract closely enough that the layout algorithms can be tested against
//! plain stubs.

use thiserror::Error;

use crate::{
    constraint::Constraint,
    px::{Px, PxSize},
};

/// Which baseline a baseline query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaselineKind {
    /// The alphabetic baseline, used by Latin-like scripts.
    Alphabetic,
    /// The ideographic baseline, used by CJK scripts.
    Ideographic,
}

/// Errors produced by a measure pass.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeasureError {
    /// The constraint cannot be satisfied, e.g. a fixed dimension below the
    /// child's minimum.
    #[error("constraint unsatisfiable: {0}")]
    Unsatisfiable(String),
    /// A child was measured twice in one pass.
    #[error("child {0} already measured this pass")]
    AlreadyMeasured(usize),
}

/// A child that can be measured and queried for intrinsic sizes.
pub trait Measurable {
    /// Resolves the constraint into a concrete size.
    fn measure(&mut self, constraint: &Constraint) -> Result<PxSize, MeasureError>;

    /// The smallest width at which the content is still fully presentable,
    /// given unlimited or fixed height.
    fn min_intrinsic_width(&self, height: Px) -> Px;

    /// The width the content would take if given unlimited space.
    fn max_intrinsic_width(&self, height: Px) -> Px;

    /// The smallest height at which the content fits the given width.
    fn min_intrinsic_height(&self, width: Px) -> Px;

    /// The height the content would take at the given width.
    fn max_intrinsic_height(&self, width: Px) -> Px;

    /// Distance from the top of the box to the requested baseline, measured
    /// after layout. `None` when the content has no text.
    fn baseline(&self, kind: BaselineKind) -> Option<Px>;
}

/// A fixed-size [`Measurable`] with an optional baseline.
///
/// The layout algorithms are exercised in tests against this stub; hosts wrap
/// their real render children instead.
#[derive(Debug, Clone, Copy)]
pub struct SizedMeasurable {
    size: PxSize,
    baseline: Option<Px>,
}

impl SizedMeasurable {
    /// Creates a stub with the given preferred size and no baseline.
    pub fn new(width: Px, height: Px) -> Self {
        Self {
            size: PxSize::new(width, height),
            baseline: None,
        }
    }

    /// Creates a stub with a baseline at the given distance from its top.
    pub fn with_baseline(width: Px, height: Px, baseline: Px) -> Self {
        Self {
            size: PxSize::new(width, height),
            baseline: Some(baseline),
        }
    }
}

impl Measurable for SizedMeasurable {
    fn measure(&mut self, constraint: &Constraint) -> Result<PxSize, MeasureError> {
        Ok(PxSize::new(
            constraint.width.resolve(self.size.width),
            constraint.height.resolve(self.size.height),
        ))
    }

    fn min_intrinsic_width(&self, _height: Px) -> Px {
        self.size.width
    }

    fn max_intrinsic_width(&self, _height: Px) -> Px {
        self.size.width
    }

    fn min_intrinsic_height(&self, _width: Px) -> Px {
        self.size.height
    }

    fn max_intrinsic_height(&self, _width: Px) -> Px {
        self.size.height
    }

    fn baseline(&self, _kind: BaselineKind) -> Option<Px> {
        self.baseline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::DimensionValue;

    #[test]
    fn test_sized_measurable_respects_constraint() {
        let mut child = SizedMeasurable::new(Px(100), Px(40));
        let size = child
            .measure(&Constraint::loose(Px(60), Px(60)))
            .expect("measure");
        assert_eq!(size, PxSize::new(Px(60), Px(40)));

        let size = child
            .measure(&Constraint::new(
                DimensionValue::Fixed(Px(10)),
                DimensionValue::WRAP,
            ))
            .expect("measure");
        assert_eq!(size, PxSize::new(Px(10), Px(40)));
    }

    #[test]
    fn test_baseline_stub() {
        let child = SizedMeasurable::with_baseline(Px(10), Px(20), Px(16));
        assert_eq!(child.baseline(BaselineKind::Alphabetic), Some(Px(16)));
    }
}
