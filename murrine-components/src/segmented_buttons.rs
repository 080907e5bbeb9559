//! Per-segment border compositing for segmented button rows.
//!
//! A segmented row draws one continuous rounded outline across N adjacent
//! segments. Each segment owns three border sides (leading, horizontal
//! top/bottom, trailing); the trailing side exists only on the last segment
//! so shared interior edges are drawn exactly once. Corner rounding is
//! applied only to the first segment's leading corners and the last
//! segment's trailing corners, mirrored under right-to-left direction.
//!
//! ## Usage
//!
//! ```
//! use murrine_components::segmented_buttons::{
//!     SegmentedBorderConfig, paint_segment_border, segment_sides,
//! };
//! use murrine_ui::{Canvas, Px, PxRect};
//!
//! let config = SegmentedBorderConfig::default();
//! let selected = [true, false, false];
//! let mut canvas = Canvas::new();
//! for index in 0..selected.len() {
//!     let sides = segment_sides(&config, &selected, index);
//!     let bounds = PxRect::new(Px(index as i32 * 100), Px(0), Px(100), Px(48));
//!     paint_segment_border(&mut canvas, bounds, &config, &sides, index, selected.len());
//! }
//! ```

use std::f32::consts::{FRAC_PI_2, PI};

use derive_setters::Setters;
use murrine_ui::{
    BaselineKind, Canvas, Color, Constraint, DimensionValue, Dp, Measurable, MeasureError, Paint,
    PathSegment, Px, PxPosition, PxRect, PxSize, TextDirection,
};
use tracing::trace;

use crate::theme::MaterialPalette;

/// Default border width for segment outlines.
const DEFAULT_BORDER_WIDTH: Dp = Dp(1.0);

/// One stroked edge of a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderSide {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

impl BorderSide {
    fn to_paint(self) -> Paint {
        Paint::stroke(self.color, self.width)
    }

    fn width_px(self) -> Px {
        Px(self.width.round() as i32)
    }
}

/// Resolved configuration for a segmented border row.
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
pub struct SegmentedBorderConfig {
    /// Border color for selected segments.
    pub selected_color: Color,
    /// Border color for unselected segments.
    pub unselected_color: Color,
    /// Border color used for every side when the row is disabled.
    pub disabled_color: Color,
    /// Border stroke width.
    pub border_width: Dp,
    /// Corner radius applied to the row's outer corners.
    pub border_radius: Dp,
    /// Reading direction; decides which physical edge is leading.
    pub text_direction: TextDirection,
    /// Display scale factor for dp-to-px conversion.
    pub scale: f32,
    /// Whether the row responds to selection at all.
    pub enabled: bool,
}

impl Default for SegmentedBorderConfig {
    fn default() -> Self {
        Self::from_palette(&MaterialPalette::default())
    }
}

impl SegmentedBorderConfig {
    /// Builds a configuration from a palette: primary for selected edges,
    /// outline for the rest.
    pub fn from_palette(palette: &MaterialPalette) -> Self {
        Self {
            selected_color: palette.primary,
            unselected_color: palette.outline,
            disabled_color: palette.outline,
            border_width: DEFAULT_BORDER_WIDTH,
            border_radius: Dp(0.0),
            text_direction: TextDirection::Ltr,
            scale: 1.0,
            enabled: true,
        }
    }

    fn side(&self, selected: bool) -> BorderSide {
        let color = if !self.enabled {
            self.disabled_color
        } else if selected {
            self.selected_color
        } else {
            self.unselected_color
        };
        BorderSide {
            color,
            width: self.border_width.to_pixels(self.scale),
        }
    }
}

/// The border sides one segment draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentSides {
    /// The edge shared with the previous segment, or the row's outer edge
    /// for the first segment.
    pub leading: BorderSide,
    /// Top and bottom edges.
    pub horizontal: BorderSide,
    /// The row's outer trailing edge. Present only on the last segment;
    /// interior trailing edges are the next segment's leading edge.
    pub trailing: Option<BorderSide>,
}

/// Resolves the three border sides for the segment at `index`.
///
/// A leading edge counts as selected when either segment sharing it is
/// selected, so a selected segment's accent color wraps both of its
/// vertical edges.
pub fn segment_sides(
    config: &SegmentedBorderConfig,
    selected: &[bool],
    index: usize,
) -> SegmentSides {
    debug_assert!(index < selected.len());
    let leading_selected = selected[index] || (index > 0 && selected[index - 1]);
    SegmentSides {
        leading: config.side(leading_selected),
        horizontal: config.side(selected[index]),
        trailing: (index + 1 == selected.len()).then(|| config.side(selected[index])),
    }
}

/// Where a segment's child lands after border inflation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentLayout {
    /// The segment's size including its border sides.
    pub size: PxSize,
    /// Offset of the child within the segment.
    pub child_offset: PxPosition,
}

fn deflate_dimension(dimension: DimensionValue, by: Px) -> DimensionValue {
    let shrink = |v: Px| (v - by).max(Px::ZERO);
    match dimension {
        DimensionValue::Fixed(v) => DimensionValue::Fixed(shrink(v)),
        DimensionValue::Wrap { min, max } => DimensionValue::Wrap {
            min: min.map(shrink),
            max: max.map(shrink),
        },
        DimensionValue::Fill { min, max } => DimensionValue::Fill {
            min: min.map(shrink),
            max: max.map(shrink),
        },
    }
}

/// Lays out one segment: the child is measured inside the space left over
/// by the border sides and offset past the leading and top edges.
pub fn layout_segment(
    child: &mut dyn Measurable,
    constraint: &Constraint,
    sides: &SegmentSides,
    text_direction: TextDirection,
) -> Result<SegmentLayout, MeasureError> {
    let leading = sides.leading.width_px();
    let horizontal = sides.horizontal.width_px();
    let trailing = sides.trailing.map(BorderSide::width_px).unwrap_or(Px::ZERO);

    let (left_inset, right_inset) = match text_direction {
        TextDirection::Ltr => (leading, trailing),
        TextDirection::Rtl => (trailing, leading),
    };

    let inner = Constraint::new(
        deflate_dimension(constraint.width, left_inset + right_inset),
        deflate_dimension(constraint.height, horizontal * 2),
    );
    let child_size = child.measure(&inner)?;

    let child_offset = match text_direction {
        TextDirection::Ltr => PxPosition::new(leading, leading),
        TextDirection::Rtl => {
            if sides.trailing.is_some() {
                PxPosition::new(trailing, trailing)
            } else {
                PxPosition::new(Px::ZERO, horizontal)
            }
        }
    };

    let layout = SegmentLayout {
        size: PxSize::new(
            constraint
                .width
                .resolve(left_inset + child_size.width + right_inset),
            constraint.height.resolve(horizontal * 2 + child_size.height),
        ),
        child_offset,
    };
    trace!(size = ?layout.size, "segment laid out");
    Ok(layout)
}

/// The narrowest width at which the segment's content fits, border included.
pub fn min_intrinsic_width(child: &dyn Measurable, height: Px, sides: &SegmentSides) -> Px {
    let trailing = sides.trailing.map(BorderSide::width_px).unwrap_or(Px::ZERO);
    sides.leading.width_px() + child.min_intrinsic_width(height) + trailing
}

/// The width the segment would take given unlimited space.
pub fn max_intrinsic_width(child: &dyn Measurable, height: Px, sides: &SegmentSides) -> Px {
    let trailing = sides.trailing.map(BorderSide::width_px).unwrap_or(Px::ZERO);
    sides.leading.width_px() + child.max_intrinsic_width(height) + trailing
}

/// The segment's intrinsic height at the given width. Minimum and maximum
/// coincide: top and bottom borders plus the child.
pub fn intrinsic_height(child: &dyn Measurable, width: Px, sides: &SegmentSides) -> Px {
    sides.horizontal.width_px() * 2 + child.max_intrinsic_height(width)
}

/// The segment's baseline: the child's, pushed down by the top border.
pub fn segment_baseline(child: &dyn Measurable, kind: BaselineKind, sides: &SegmentSides) -> Option<Px> {
    child.baseline(kind).map(|b| b + sides.horizontal.width_px())
}

fn pt(x: f32, y: f32) -> PxPosition {
    PxPosition::new(Px(x.round() as i32), Px(y.round() as i32))
}

fn oval(left: f32, top: f32, width: f32, height: f32) -> PxRect {
    PxRect::new(
        Px(left.round() as i32),
        Px(top.round() as i32),
        Px(width.round() as i32),
        Px(height.round() as i32),
    )
}

/// Per-corner radii for the segment at `index` in a row of `count`.
///
/// Only the first segment's leading corners and the last segment's trailing
/// corners carry the configured radius; all interior corners are square.
fn edge_corner_radii(
    index: usize,
    count: usize,
    text_direction: TextDirection,
    radius: f32,
) -> [f32; 4] {
    let is_first = index == 0;
    let is_last = index + 1 == count;
    let (leading_round, trailing_round) = (
        if is_first { radius } else { 0.0 },
        if is_last { radius } else { 0.0 },
    );
    // [top-left, top-right, bottom-left, bottom-right]
    match text_direction {
        TextDirection::Ltr => [leading_round, trailing_round, leading_round, trailing_round],
        TextDirection::Rtl => [trailing_round, leading_round, trailing_round, leading_round],
    }
}

/// Paints the segment's border sides into `canvas`.
///
/// `bounds` is the segment's rect in canvas coordinates. Straight edges are
/// stroked on the half-width center line; rounded corners use quarter arcs
/// whose sweep direction mirrors under right-to-left direction. The first
/// and last segments draw their outer outlines; interior segments draw only
/// their leading edge and top/bottom lines, so adjacent segments never
/// double-stroke a shared edge.
pub fn paint_segment_border(
    canvas: &mut Canvas,
    bounds: PxRect,
    config: &SegmentedBorderConfig,
    sides: &SegmentSides,
    index: usize,
    count: usize,
) {
    let outer_left = bounds.x.0 as f32;
    let outer_top = bounds.y.0 as f32;
    let outer_right = bounds.right().0 as f32;
    let outer_bottom = bounds.bottom().0 as f32;

    let hw = sides.horizontal.width;
    let lw = sides.leading.width;
    let left = outer_left + hw / 2.0;
    let top = outer_top + hw / 2.0;
    let right = outer_right - hw / 2.0;
    let bottom = outer_bottom - hw / 2.0;

    let max_radius = ((right - left) / 2.0).min((bottom - top) / 2.0).max(0.0);
    let radius = config
        .border_radius
        .to_pixels(config.scale)
        .clamp(0.0, max_radius);
    let [tl, tr, bl, br] = edge_corner_radii(index, count, config.text_direction, radius);

    let tl_corner = oval(left, top, tl * 2.0, tl * 2.0);
    let tr_corner = oval(right - tr * 2.0, top, tr * 2.0, tr * 2.0);
    let bl_corner = oval(left, bottom - bl * 2.0, bl * 2.0, bl * 2.0);
    let br_corner = oval(right - br * 2.0, bottom - br * 2.0, br * 2.0, br * 2.0);

    let sweep = FRAC_PI_2;
    let is_first = index == 0;
    let is_last = index + 1 == count;

    match config.text_direction {
        TextDirection::Ltr => {
            if is_last {
                canvas.draw_path(
                    vec![
                        PathSegment::MoveTo(pt(left, bottom + lw / 2.0)),
                        PathSegment::LineTo(pt(left, top - lw / 2.0)),
                    ],
                    sides.leading.to_paint(),
                );
                if let Some(trailing) = sides.trailing {
                    canvas.draw_path(
                        vec![
                            PathSegment::MoveTo(pt(left + hw / 2.0, top)),
                            PathSegment::LineTo(pt(right - tr, top)),
                            PathSegment::ArcTo {
                                rect: tr_corner,
                                start_angle: PI * 1.5,
                                sweep,
                            },
                            PathSegment::LineTo(pt(right, bottom - br)),
                            PathSegment::ArcTo {
                                rect: br_corner,
                                start_angle: 0.0,
                                sweep,
                            },
                            PathSegment::LineTo(pt(left + hw / 2.0, bottom)),
                        ],
                        trailing.to_paint(),
                    );
                }
            } else if is_first {
                canvas.draw_path(
                    vec![
                        PathSegment::MoveTo(pt(outer_right, bottom)),
                        PathSegment::LineTo(pt(left + bl, bottom)),
                        PathSegment::ArcTo {
                            rect: bl_corner,
                            start_angle: FRAC_PI_2,
                            sweep,
                        },
                        PathSegment::LineTo(pt(left, top + tl)),
                        PathSegment::ArcTo {
                            rect: tl_corner,
                            start_angle: PI,
                            sweep,
                        },
                        PathSegment::LineTo(pt(outer_right, top)),
                    ],
                    sides.leading.to_paint(),
                );
            } else {
                canvas.draw_path(
                    vec![
                        PathSegment::MoveTo(pt(left, bottom + lw / 2.0)),
                        PathSegment::LineTo(pt(left, top - lw / 2.0)),
                    ],
                    sides.leading.to_paint(),
                );
                canvas.draw_path(
                    vec![
                        PathSegment::MoveTo(pt(left + hw / 2.0, top)),
                        PathSegment::LineTo(pt(outer_right - tr, top)),
                        PathSegment::MoveTo(pt(left + hw / 2.0 + tl, bottom)),
                        PathSegment::LineTo(pt(outer_right - tr, bottom)),
                    ],
                    sides.horizontal.to_paint(),
                );
            }
        }
        TextDirection::Rtl => {
            if is_last {
                canvas.draw_path(
                    vec![
                        PathSegment::MoveTo(pt(right, bottom + lw / 2.0)),
                        PathSegment::LineTo(pt(right, top - lw / 2.0)),
                    ],
                    sides.leading.to_paint(),
                );
                if let Some(trailing) = sides.trailing {
                    canvas.draw_path(
                        vec![
                            PathSegment::MoveTo(pt(right - hw / 2.0, top)),
                            PathSegment::LineTo(pt(left + tl, top)),
                            PathSegment::ArcTo {
                                rect: tl_corner,
                                start_angle: PI * 1.5,
                                sweep: -sweep,
                            },
                            PathSegment::LineTo(pt(left, bottom - bl)),
                            PathSegment::ArcTo {
                                rect: bl_corner,
                                start_angle: PI,
                                sweep: -sweep,
                            },
                            PathSegment::LineTo(pt(right - hw / 2.0, bottom)),
                        ],
                        trailing.to_paint(),
                    );
                }
            } else if is_first {
                canvas.draw_path(
                    vec![
                        PathSegment::MoveTo(pt(outer_left, bottom)),
                        PathSegment::LineTo(pt(right - br, bottom)),
                        PathSegment::ArcTo {
                            rect: br_corner,
                            start_angle: FRAC_PI_2,
                            sweep: -sweep,
                        },
                        PathSegment::LineTo(pt(right, top + tr)),
                        PathSegment::ArcTo {
                            rect: tr_corner,
                            start_angle: 0.0,
                            sweep: -sweep,
                        },
                        PathSegment::LineTo(pt(outer_left, top)),
                    ],
                    sides.leading.to_paint(),
                );
            } else {
                canvas.draw_path(
                    vec![
                        PathSegment::MoveTo(pt(right, bottom + lw / 2.0)),
                        PathSegment::LineTo(pt(right, top - lw / 2.0)),
                    ],
                    sides.leading.to_paint(),
                );
                canvas.draw_path(
                    vec![
                        PathSegment::MoveTo(pt(right - hw / 2.0, top)),
                        PathSegment::LineTo(pt(outer_left + tl, top)),
                        PathSegment::MoveTo(pt(right - hw / 2.0 - tr, bottom)),
                        PathSegment::LineTo(pt(outer_left + tl, bottom)),
                    ],
                    sides.horizontal.to_paint(),
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use murrine_ui::{DrawCommand, SizedMeasurable};

    fn config() -> SegmentedBorderConfig {
        SegmentedBorderConfig::default()
            .border_radius(Dp(8.0))
            .border_width(Dp(1.0))
    }

    fn arcs_of(command: &DrawCommand) -> Vec<(PxRect, f32)> {
        match command {
            DrawCommand::Path { segments, .. } => segments
                .iter()
                .filter_map(|s| match s {
                    PathSegment::ArcTo { rect, sweep, .. } => Some((*rect, *sweep)),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn paint_row(config: &SegmentedBorderConfig, selected: &[bool]) -> Vec<Vec<(PxRect, f32)>> {
        let mut per_segment = Vec::new();
        for index in 0..selected.len() {
            let sides = segment_sides(config, selected, index);
            let mut canvas = Canvas::new();
            paint_segment_border(
                &mut canvas,
                PxRect::new(Px(0), Px(0), Px(100), Px(48)),
                config,
                &sides,
                index,
                selected.len(),
            );
            per_segment.push(canvas.commands().iter().flat_map(|c| arcs_of(c)).collect());
        }
        per_segment
    }

    #[test]
    fn test_sides_follow_selection() {
        let config = config();
        let selected = [true, false, false];

        let first = segment_sides(&config, &selected, 0);
        assert_eq!(first.leading.color, config.selected_color);
        assert_eq!(first.horizontal.color, config.selected_color);
        assert!(first.trailing.is_none());

        // The edge shared with a selected neighbor is accent-colored.
        let second = segment_sides(&config, &selected, 1);
        assert_eq!(second.leading.color, config.selected_color);
        assert_eq!(second.horizontal.color, config.unselected_color);
        assert!(second.trailing.is_none());

        let third = segment_sides(&config, &selected, 2);
        assert_eq!(third.leading.color, config.unselected_color);
        assert_eq!(
            third.trailing.map(|t| t.color),
            Some(config.unselected_color)
        );
    }

    #[test]
    fn test_disabled_row_uses_disabled_color() {
        let config = config().enabled(false);
        let sides = segment_sides(&config, &[true, true], 0);
        assert_eq!(sides.leading.color, config.disabled_color);
        assert_eq!(sides.horizontal.color, config.disabled_color);
    }

    #[test]
    fn test_radius_only_at_outer_corners() {
        let arcs = paint_row(&config(), &[true, true, true]);

        // First segment rounds only its leading (left) corners.
        assert_eq!(arcs[0].len(), 2);
        for (rect, sweep) in &arcs[0] {
            assert!(rect.x < Px(50), "first-segment arc not on the left: {rect:?}");
            assert!(*sweep > 0.0);
        }
        // Interior corners are square.
        assert!(arcs[1].is_empty(), "interior segment painted arcs");
        // Last segment rounds only its trailing (right) corners.
        assert_eq!(arcs[2].len(), 2);
        for (rect, _) in &arcs[2] {
            assert!(
                rect.right() > Px(50),
                "last-segment arc not on the right: {rect:?}"
            );
        }
    }

    #[test]
    fn test_rtl_mirrors_rounding() {
        let config = config().text_direction(TextDirection::Rtl);
        let arcs = paint_row(&config, &[false, false, false]);

        // Leading edge is the right edge under RTL.
        assert_eq!(arcs[0].len(), 2);
        for (rect, sweep) in &arcs[0] {
            assert!(rect.right() > Px(50), "first-segment arc not on the right: {rect:?}");
            assert!(*sweep < 0.0, "rtl arcs sweep counter-clockwise");
        }
        assert!(arcs[1].is_empty());
        assert_eq!(arcs[2].len(), 2);
        for (rect, _) in &arcs[2] {
            assert!(rect.x < Px(50), "last-segment arc not on the left: {rect:?}");
        }
    }

    #[test]
    fn test_single_segment_rounds_trailing_corners() {
        let arcs = paint_row(&config(), &[true]);
        assert_eq!(arcs[0].len(), 2);
        for (rect, _) in &arcs[0] {
            assert!(rect.right() > Px(50));
        }
    }

    #[test]
    fn test_interior_segment_draws_leading_and_horizontal_only() {
        let config = config();
        let sides = segment_sides(&config, &[false, false, false], 1);
        let mut canvas = Canvas::new();
        paint_segment_border(
            &mut canvas,
            PxRect::new(Px(0), Px(0), Px(100), Px(48)),
            &config,
            &sides,
            1,
            3,
        );
        // One vertical leading path and one horizontal top/bottom path.
        assert_eq!(canvas.commands().len(), 2);
    }

    #[test]
    fn test_layout_inflates_child_by_border_sides() {
        let config = config();
        let sides = segment_sides(&config, &[false, false], 1);
        let mut child = SizedMeasurable::new(Px(100), Px(40));
        let layout = layout_segment(
            &mut child,
            &Constraint::new(DimensionValue::WRAP, DimensionValue::WRAP),
            &sides,
            TextDirection::Ltr,
        )
        .expect("layout");
        // Leading 1 + child 100 + trailing 1, top and bottom 1 each.
        assert_eq!(layout.size, PxSize::new(Px(102), Px(42)));
        assert_eq!(layout.child_offset, PxPosition::new(Px(1), Px(1)));
    }

    #[test]
    fn test_interior_layout_has_no_trailing_inset() {
        let config = config();
        let sides = segment_sides(&config, &[false, false], 0);
        let mut child = SizedMeasurable::new(Px(100), Px(40));
        let layout = layout_segment(
            &mut child,
            &Constraint::new(DimensionValue::WRAP, DimensionValue::WRAP),
            &sides,
            TextDirection::Ltr,
        )
        .expect("layout");
        assert_eq!(layout.size, PxSize::new(Px(101), Px(42)));
    }

    #[test]
    fn test_intrinsics_add_border_widths() {
        let config = config();
        let sides = segment_sides(&config, &[true], 0);
        let child = SizedMeasurable::new(Px(80), Px(36));
        assert_eq!(min_intrinsic_width(&child, Px(48), &sides), Px(82));
        assert_eq!(max_intrinsic_width(&child, Px(48), &sides), Px(82));
        assert_eq!(intrinsic_height(&child, Px(100), &sides), Px(38));
    }

    #[test]
    fn test_baseline_shifts_by_top_border() {
        let config = config();
        let sides = segment_sides(&config, &[true], 0);
        let child = SizedMeasurable::with_baseline(Px(80), Px(36), Px(30));
        assert_eq!(
            segment_baseline(&child, BaselineKind::Alphabetic, &sides),
            Some(Px(31))
        );
    }
}
