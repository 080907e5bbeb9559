//! Baseline-driven multi-slot row layout for list items.
//!
//! A list item positions up to four optional children (leading, title,
//! subtitle, trailing) in one row. Title and subtitle are anchored to
//! Material baseline targets that depend on the line count and density;
//! measured content that overlaps or overflows the default tile height is
//! reconciled by splitting the overlap and regrowing the tile.
//!
//! ## Usage
//!
//! ```
//! use murrine_components::list_item::{ListItemChildren, ListItemConfig, layout_list_item};
//! use murrine_ui::{Constraint, DimensionValue, Px, SizedMeasurable};
//!
//! let mut title = SizedMeasurable::with_baseline(Px(120), Px(20), Px(16));
//! let children = ListItemChildren::with_title(&mut title);
//! let constraint = Constraint::new(
//!     DimensionValue::Wrap { min: None, max: Some(Px(360)) },
//!     DimensionValue::WRAP,
//! );
//! let layout = layout_list_item(children, &constraint, &ListItemConfig::default()).unwrap();
//! assert_eq!(layout.size.height, Px(56));
//! ```

use derive_setters::Setters;
use murrine_ui::{
    BaselineKind, Constraint, DimensionValue, Dp, Measurable, MeasureError, Px, PxPosition, PxRect,
    PxSize,
};
use tracing::trace;

/// Minimum width reserved for the leading slot.
const MIN_LEADING_WIDTH: Dp = Dp(40.0);
/// Gap between the leading/trailing slots and the text column.
const HORIZONTAL_TITLE_GAP: Dp = Dp(16.0);
/// Minimum vertical padding above and below the text column.
const MIN_VERTICAL_PADDING: Dp = Dp(4.0);
/// Tiles taller than this pin leading/trailing to the top.
const TALL_TILE_THRESHOLD: Dp = Dp(72.0);
/// Top offset for pinned leading/trailing slots.
const PINNED_SLOT_Y: Dp = Dp(16.0);

/// How many text lines the item presents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCount {
    /// Title only.
    One,
    /// Title and subtitle.
    Two,
    /// Explicit three-line item; requires a subtitle.
    Three,
}

/// Resolved configuration for a list item layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
pub struct ListItemConfig {
    /// Compact density variant.
    pub dense: bool,
    /// Force the three-line shape. Requires a subtitle child.
    pub three_line: bool,
    /// Display scale factor for dp-to-px conversion.
    pub scale: f32,
    /// Baseline kind the title anchors with.
    pub title_baseline: BaselineKind,
    /// Baseline kind the subtitle anchors with.
    pub subtitle_baseline: BaselineKind,
}

impl Default for ListItemConfig {
    fn default() -> Self {
        Self {
            dense: false,
            three_line: false,
            scale: 1.0,
            title_baseline: BaselineKind::Alphabetic,
            subtitle_baseline: BaselineKind::Alphabetic,
        }
    }
}

impl ListItemConfig {
    /// Classifies the item shape from the configuration and child presence.
    pub fn line_count(&self, has_subtitle: bool) -> LineCount {
        if self.three_line {
            LineCount::Three
        } else if has_subtitle {
            LineCount::Two
        } else {
            LineCount::One
        }
    }

    /// The default tile height for the shape, before content reconciliation.
    pub fn default_tile_height(&self, has_subtitle: bool) -> Px {
        let dp = match (self.line_count(has_subtitle), self.dense) {
            (LineCount::One, false) => 56.0,
            (LineCount::One, true) => 48.0,
            (LineCount::Two, false) => 72.0,
            (LineCount::Two, true) => 64.0,
            (LineCount::Three, false) => 88.0,
            (LineCount::Three, true) => 76.0,
        };
        Dp(dp).to_px(self.scale)
    }

    /// Baseline targets `(title, subtitle)` for multi-line shapes.
    fn baseline_targets(&self, has_subtitle: bool) -> Option<(Px, Px)> {
        let (title, subtitle) = match (self.line_count(has_subtitle), self.dense) {
            (LineCount::One, _) => return None,
            (LineCount::Two, false) => (32.0, 52.0),
            (LineCount::Two, true) => (28.0, 48.0),
            (LineCount::Three, false) => (28.0, 48.0),
            (LineCount::Three, true) => (22.0, 42.0),
        };
        Some((Dp(title).to_px(self.scale), Dp(subtitle).to_px(self.scale)))
    }

    /// Height cap for the leading and trailing slots.
    fn icon_height_cap(&self) -> Px {
        Dp(if self.dense { 48.0 } else { 56.0 }).to_px(self.scale)
    }
}

/// The children handed to one layout pass.
pub struct ListItemChildren<'a> {
    /// Optional slot before the text column.
    pub leading: Option<&'a mut dyn Measurable>,
    /// The title. Always present.
    pub title: &'a mut dyn Measurable,
    /// Optional line(s) below the title.
    pub subtitle: Option<&'a mut dyn Measurable>,
    /// Optional slot after the text column.
    pub trailing: Option<&'a mut dyn Measurable>,
}

impl<'a> ListItemChildren<'a> {
    /// Children with only a title.
    pub fn with_title(title: &'a mut dyn Measurable) -> Self {
        Self {
            leading: None,
            title,
            subtitle: None,
            trailing: None,
        }
    }
}

/// Where one child ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPlacement {
    /// Offset of the child's top-left corner within the tile.
    pub offset: PxPosition,
    /// The child's measured size.
    pub size: PxSize,
}

impl SlotPlacement {
    /// The child's bounds within the tile.
    pub fn rect(&self) -> PxRect {
        PxRect::from_position_size(self.offset, self.size)
    }
}

/// The result of a list item layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListItemLayout {
    /// The tile's size.
    pub size: PxSize,
    /// Leading placement, if a leading child was given.
    pub leading: Option<SlotPlacement>,
    /// Title placement.
    pub title: SlotPlacement,
    /// Subtitle placement, if a subtitle child was given.
    pub subtitle: Option<SlotPlacement>,
    /// Trailing placement, if a trailing child was given.
    pub trailing: Option<SlotPlacement>,
    /// Distance from the tile top to the title's baseline, when the title
    /// child reported one. The tile's own baseline query forwards this.
    pub baseline: Option<Px>,
}

/// Which part of a list item a hit landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListItemSlot {
    /// The leading child.
    Leading,
    /// The title child.
    Title,
    /// The subtitle child.
    Subtitle,
    /// The trailing child.
    Trailing,
    /// The tile background. The tile always hits within its bounds so an
    /// enclosing ink surface receives the gesture.
    Tile,
}

fn measure_optional(
    child: &mut Option<&mut dyn Measurable>,
    constraint: &Constraint,
) -> Result<PxSize, MeasureError> {
    match child {
        Some(child) => child.measure(constraint),
        None => Ok(PxSize::ZERO),
    }
}

fn child_baseline(child: &dyn Measurable, kind: BaselineKind) -> Px {
    child.baseline(kind).unwrap_or(Px::ZERO)
}

/// Lays out a list item's children within `constraint`.
///
/// The constraint's width must carry an upper bound; text children receive
/// the width left over after the leading and trailing slots. Returns the
/// tile size plus every child's placement.
pub fn layout_list_item(
    mut children: ListItemChildren<'_>,
    constraint: &Constraint,
    config: &ListItemConfig,
) -> Result<ListItemLayout, MeasureError> {
    let has_subtitle = children.subtitle.is_some();
    debug_assert!(
        !config.three_line || has_subtitle,
        "a three-line list item requires a subtitle"
    );

    let tile_width = constraint.width.get_max().ok_or_else(|| {
        MeasureError::Unsatisfiable("list item layout needs a bounded width".into())
    })?;
    let icon_constraint = Constraint::loose(tile_width, config.icon_height_cap());

    let leading_size = measure_optional(&mut children.leading, &icon_constraint)?;
    let trailing_size = measure_optional(&mut children.trailing, &icon_constraint)?;
    debug_assert!(
        children.leading.is_none() || leading_size.width != tile_width,
        "leading widget consumes the entire tile width; give it a bounded size"
    );
    debug_assert!(
        children.trailing.is_none() || trailing_size.width != tile_width,
        "trailing widget consumes the entire tile width; give it a bounded size"
    );

    let gap = HORIZONTAL_TITLE_GAP.to_px(config.scale);
    let title_start = if children.leading.is_some() {
        MIN_LEADING_WIDTH.to_px(config.scale).max(leading_size.width) + gap
    } else {
        Px::ZERO
    };
    let trailing_reserved = if children.trailing.is_some() {
        trailing_size.width + gap
    } else {
        Px::ZERO
    };
    let text_width = (tile_width - title_start - trailing_reserved).max(Px::ZERO);
    let text_constraint = Constraint::new(DimensionValue::Fixed(text_width), DimensionValue::WRAP);

    let title_size = children.title.measure(&text_constraint)?;
    let subtitle_size = measure_optional(&mut children.subtitle, &text_constraint)?;

    let min_padding = MIN_VERTICAL_PADDING.to_px(config.scale);
    let default_tile_height = config.default_tile_height(has_subtitle);

    let tile_height;
    let mut title_y;
    let mut subtitle_y = Px::ZERO;
    if !has_subtitle {
        tile_height = default_tile_height.max(title_size.height + min_padding * 2);
        title_y = (tile_height - title_size.height) / 2;
    } else {
        let (title_target, subtitle_target) = config
            .baseline_targets(has_subtitle)
            .unwrap_or((Px::ZERO, Px::ZERO));
        title_y = title_target - child_baseline(children.title, config.title_baseline);
        subtitle_y = subtitle_target
            - children
                .subtitle
                .as_deref()
                .map(|s| child_baseline(s, config.subtitle_baseline))
                .unwrap_or(Px::ZERO);
        let mut height = default_tile_height;

        let title_overlap = title_y + title_size.height - subtitle_y;
        if title_overlap > Px::ZERO {
            title_y = title_y - title_overlap / 2;
            subtitle_y = subtitle_y + title_overlap - title_overlap / 2;
        }

        // Content that escapes the padding band regrows the tile and
        // re-anchors both lines at minimum padding.
        if title_y < min_padding || subtitle_y + subtitle_size.height + min_padding > height {
            height = default_tile_height
                .max(title_size.height + subtitle_size.height + min_padding * 2);
            title_y = min_padding;
            subtitle_y = title_size.height + min_padding;
        }
        tile_height = height;
    }

    let (leading_y, trailing_y) = if tile_height > TALL_TILE_THRESHOLD.to_px(config.scale) {
        let pinned = PINNED_SLOT_Y.to_px(config.scale);
        (pinned, pinned)
    } else {
        (
            ((tile_height - leading_size.height) / 2).min(PINNED_SLOT_Y.to_px(config.scale)),
            (tile_height - trailing_size.height) / 2,
        )
    };

    let title_placement = SlotPlacement {
        offset: PxPosition::new(title_start, title_y),
        size: title_size,
    };
    let layout = ListItemLayout {
        size: PxSize::new(
            constraint.width.resolve(tile_width),
            constraint.height.resolve(tile_height),
        ),
        leading: children.leading.as_ref().map(|_| SlotPlacement {
            offset: PxPosition::new(Px::ZERO, leading_y),
            size: leading_size,
        }),
        title: title_placement,
        subtitle: children.subtitle.as_ref().map(|_| SlotPlacement {
            offset: PxPosition::new(title_start, subtitle_y),
            size: subtitle_size,
        }),
        trailing: children.trailing.as_ref().map(|_| SlotPlacement {
            offset: PxPosition::new(tile_width - trailing_size.width, trailing_y),
            size: trailing_size,
        }),
        baseline: children
            .title
            .baseline(config.title_baseline)
            .map(|b| title_y + b),
    };
    trace!(size = ?layout.size, "list item laid out");
    Ok(layout)
}

/// The smallest width at which the item's content is fully presentable.
pub fn min_intrinsic_width(children: &ListItemChildren<'_>, height: Px, config: &ListItemConfig) -> Px {
    let gap = HORIZONTAL_TITLE_GAP.to_px(config.scale);
    let leading_width = children
        .leading
        .as_deref()
        .map(|l| l.min_intrinsic_width(height).max(MIN_LEADING_WIDTH.to_px(config.scale)) + gap)
        .unwrap_or(Px::ZERO);
    let text_width = children.title.min_intrinsic_width(height).max(
        children
            .subtitle
            .as_deref()
            .map(|s| s.min_intrinsic_width(height))
            .unwrap_or(Px::ZERO),
    );
    let trailing_width = children
        .trailing
        .as_deref()
        .map(|t| t.max_intrinsic_width(height))
        .unwrap_or(Px::ZERO);
    leading_width + text_width + trailing_width
}

/// The width the item would take given unlimited space.
pub fn max_intrinsic_width(children: &ListItemChildren<'_>, height: Px, config: &ListItemConfig) -> Px {
    let gap = HORIZONTAL_TITLE_GAP.to_px(config.scale);
    let leading_width = children
        .leading
        .as_deref()
        .map(|l| l.max_intrinsic_width(height).max(MIN_LEADING_WIDTH.to_px(config.scale)) + gap)
        .unwrap_or(Px::ZERO);
    let text_width = children.title.max_intrinsic_width(height).max(
        children
            .subtitle
            .as_deref()
            .map(|s| s.max_intrinsic_width(height))
            .unwrap_or(Px::ZERO),
    );
    let trailing_width = children
        .trailing
        .as_deref()
        .map(|t| t.max_intrinsic_width(height))
        .unwrap_or(Px::ZERO);
    leading_width + text_width + trailing_width
}

/// The item's intrinsic height at the given width. Minimum and maximum
/// intrinsic heights coincide for list items.
pub fn intrinsic_height(children: &ListItemChildren<'_>, width: Px, config: &ListItemConfig) -> Px {
    let text_height = children.title.min_intrinsic_height(width)
        + children
            .subtitle
            .as_deref()
            .map(|s| s.min_intrinsic_height(width))
            .unwrap_or(Px::ZERO);
    config
        .default_tile_height(children.subtitle.is_some())
        .max(text_height)
}

/// Hit-tests a laid-out item. Children are consulted in paint order at
/// their stored offsets; any position within the tile bounds that misses
/// every child still hits the tile itself.
pub fn hit_test(layout: &ListItemLayout, position: PxPosition) -> Option<ListItemSlot> {
    let bounds = PxRect::from_position_size(PxPosition::ZERO, layout.size);
    if !bounds.contains(position) {
        return None;
    }
    let slots = [
        (layout.leading, ListItemSlot::Leading),
        (Some(layout.title), ListItemSlot::Title),
        (layout.subtitle, ListItemSlot::Subtitle),
        (layout.trailing, ListItemSlot::Trailing),
    ];
    for (placement, slot) in slots {
        if let Some(placement) = placement
            && placement.rect().contains(position)
        {
            return Some(slot);
        }
    }
    Some(ListItemSlot::Tile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use murrine_ui::SizedMeasurable;

    fn bounded_width(width: i32) -> Constraint {
        Constraint::new(
            DimensionValue::Wrap {
                min: None,
                max: Some(Px(width)),
            },
            DimensionValue::WRAP,
        )
    }

    #[test]
    fn test_one_line_defaults() {
        let mut title = SizedMeasurable::with_baseline(Px(120), Px(20), Px(16));
        let layout = layout_list_item(
            ListItemChildren::with_title(&mut title),
            &bounded_width(360),
            &ListItemConfig::default(),
        )
        .expect("layout");
        assert_eq!(layout.size, PxSize::new(Px(360), Px(56)));
        // Centered title.
        assert_eq!(layout.title.offset, PxPosition::new(Px(0), Px(18)));
        assert_eq!(layout.baseline, Some(Px(34)));
    }

    #[test]
    fn test_one_line_dense() {
        let mut title = SizedMeasurable::new(Px(120), Px(20));
        let layout = layout_list_item(
            ListItemChildren::with_title(&mut title),
            &bounded_width(360),
            &ListItemConfig::default().dense(true),
        )
        .expect("layout");
        assert_eq!(layout.size.height, Px(48));
    }

    #[test]
    fn test_one_line_tall_title_regrows() {
        let mut title = SizedMeasurable::new(Px(120), Px(60));
        let layout = layout_list_item(
            ListItemChildren::with_title(&mut title),
            &bounded_width(360),
            &ListItemConfig::default(),
        )
        .expect("layout");
        assert_eq!(layout.size.height, Px(68));
    }

    #[test]
    fn test_two_line_baseline_anchoring() {
        let mut title = SizedMeasurable::with_baseline(Px(120), Px(20), Px(16));
        let mut subtitle = SizedMeasurable::with_baseline(Px(120), Px(18), Px(14));
        let children = ListItemChildren {
            subtitle: Some(&mut subtitle),
            ..ListItemChildren::with_title(&mut title)
        };
        let layout = layout_list_item(children, &bounded_width(360), &ListItemConfig::default())
            .expect("layout");
        assert_eq!(layout.size.height, Px(72));
        // title baseline target 32, subtitle 52.
        assert_eq!(layout.title.offset.y, Px(16));
        assert_eq!(layout.subtitle.map(|s| s.offset.y), Some(Px(38)));
    }

    #[test]
    fn test_two_line_overlap_split_evenly() {
        let mut title = SizedMeasurable::with_baseline(Px(120), Px(30), Px(16));
        let mut subtitle = SizedMeasurable::with_baseline(Px(120), Px(20), Px(10));
        let children = ListItemChildren {
            subtitle: Some(&mut subtitle),
            ..ListItemChildren::with_title(&mut title)
        };
        let layout = layout_list_item(children, &bounded_width(360), &ListItemConfig::default())
            .expect("layout");
        // Unreconciled: title 16..46 against subtitle at 42; overlap 4 is
        // split so the lines abut exactly.
        assert_eq!(layout.title.offset.y, Px(14));
        assert_eq!(layout.subtitle.map(|s| s.offset.y), Some(Px(44)));
        assert_eq!(layout.size.height, Px(72));
    }

    #[test]
    fn test_two_line_overflow_regrows_tile() {
        let mut title = SizedMeasurable::with_baseline(Px(120), Px(30), Px(16));
        let mut subtitle = SizedMeasurable::with_baseline(Px(120), Px(40), Px(10));
        let children = ListItemChildren {
            subtitle: Some(&mut subtitle),
            ..ListItemChildren::with_title(&mut title)
        };
        let layout = layout_list_item(children, &bounded_width(360), &ListItemConfig::default())
            .expect("layout");
        // 30 + 40 + 2*4 padding.
        assert_eq!(layout.size.height, Px(78));
        assert_eq!(layout.title.offset.y, Px(4));
        assert_eq!(layout.subtitle.map(|s| s.offset.y), Some(Px(34)));
    }

    #[test]
    fn test_height_monotonic_and_no_overlap() {
        for subtitle_height in (10..=80).step_by(2) {
            let mut title = SizedMeasurable::with_baseline(Px(120), Px(20), Px(16));
            let mut subtitle =
                SizedMeasurable::with_baseline(Px(120), Px(subtitle_height), Px(10));
            let children = ListItemChildren {
                subtitle: Some(&mut subtitle),
                ..ListItemChildren::with_title(&mut title)
            };
            let layout =
                layout_list_item(children, &bounded_width(360), &ListItemConfig::default())
                    .expect("layout");
            assert!(layout.size.height >= Px(72), "below table default");
            let title_bottom = layout.title.offset.y + layout.title.size.height;
            let subtitle_top = layout.subtitle.map(|s| s.offset.y).unwrap_or(Px::ZERO);
            assert!(
                title_bottom <= subtitle_top,
                "overlap at subtitle_height={subtitle_height}: {title_bottom:?} > {subtitle_top:?}"
            );
        }
    }

    #[test]
    fn test_three_line_uses_three_line_table() {
        let mut title = SizedMeasurable::with_baseline(Px(120), Px(20), Px(16));
        let mut subtitle = SizedMeasurable::with_baseline(Px(120), Px(36), Px(14));
        let children = ListItemChildren {
            subtitle: Some(&mut subtitle),
            ..ListItemChildren::with_title(&mut title)
        };
        let layout = layout_list_item(
            children,
            &bounded_width(360),
            &ListItemConfig::default().three_line(true),
        )
        .expect("layout");
        assert_eq!(layout.size.height, Px(88));
        // title baseline target 28.
        assert_eq!(layout.title.offset.y, Px(12));
    }

    #[test]
    fn test_leading_trailing_pinned_on_tall_tiles() {
        let mut title = SizedMeasurable::with_baseline(Px(120), Px(20), Px(16));
        let mut subtitle = SizedMeasurable::with_baseline(Px(120), Px(36), Px(14));
        let mut leading = SizedMeasurable::new(Px(40), Px(40));
        let mut trailing = SizedMeasurable::new(Px(24), Px(24));
        let children = ListItemChildren {
            leading: Some(&mut leading),
            subtitle: Some(&mut subtitle),
            trailing: Some(&mut trailing),
            ..ListItemChildren::with_title(&mut title)
        };
        let layout = layout_list_item(
            children,
            &bounded_width(360),
            &ListItemConfig::default().three_line(true),
        )
        .expect("layout");
        assert_eq!(layout.leading.map(|l| l.offset.y), Some(Px(16)));
        assert_eq!(layout.trailing.map(|t| t.offset.y), Some(Px(16)));
    }

    #[test]
    fn test_leading_centered_but_capped() {
        let mut title = SizedMeasurable::with_baseline(Px(120), Px(20), Px(16));
        let mut leading = SizedMeasurable::new(Px(24), Px(24));
        let mut trailing = SizedMeasurable::new(Px(24), Px(24));
        let mut subtitle = SizedMeasurable::with_baseline(Px(120), Px(18), Px(14));
        let children = ListItemChildren {
            leading: Some(&mut leading),
            subtitle: Some(&mut subtitle),
            trailing: Some(&mut trailing),
            ..ListItemChildren::with_title(&mut title)
        };
        let layout = layout_list_item(children, &bounded_width(360), &ListItemConfig::default())
            .expect("layout");
        // 72-tall tile: trailing centers at 24; leading would too but is
        // capped at 16.
        assert_eq!(layout.leading.map(|l| l.offset.y), Some(Px(16)));
        assert_eq!(layout.trailing.map(|t| t.offset.y), Some(Px(24)));
        // Leading reserves at least the minimum slot width plus the gap.
        assert_eq!(layout.title.offset.x, Px(56));
    }

    #[test]
    fn test_intrinsics() {
        let mut title = SizedMeasurable::new(Px(100), Px(20));
        let mut subtitle = SizedMeasurable::new(Px(140), Px(18));
        let mut leading = SizedMeasurable::new(Px(24), Px(24));
        let children = ListItemChildren {
            leading: Some(&mut leading),
            subtitle: Some(&mut subtitle),
            ..ListItemChildren::with_title(&mut title)
        };
        let config = ListItemConfig::default();
        // leading slot 40 + gap 16 + widest text 140.
        assert_eq!(min_intrinsic_width(&children, Px(72), &config), Px(196));
        assert_eq!(max_intrinsic_width(&children, Px(72), &config), Px(196));
        // Content 38 is below the two-line default of 72.
        assert_eq!(intrinsic_height(&children, Px(360), &config), Px(72));
    }

    #[test]
    fn test_hit_test_children_then_tile() {
        let mut title = SizedMeasurable::with_baseline(Px(120), Px(20), Px(16));
        let mut leading = SizedMeasurable::new(Px(24), Px(24));
        let children = ListItemChildren {
            leading: Some(&mut leading),
            ..ListItemChildren::with_title(&mut title)
        };
        let layout = layout_list_item(children, &bounded_width(360), &ListItemConfig::default())
            .expect("layout");

        assert_eq!(
            hit_test(&layout, PxPosition::new(Px(10), Px(20))),
            Some(ListItemSlot::Leading)
        );
        assert_eq!(
            hit_test(&layout, PxPosition::new(Px(60), Px(25))),
            Some(ListItemSlot::Title)
        );
        // Empty area still hits the tile.
        assert_eq!(
            hit_test(&layout, PxPosition::new(Px(300), Px(5))),
            Some(ListItemSlot::Tile)
        );
        assert_eq!(hit_test(&layout, PxPosition::new(Px(400), Px(5))), None);
    }
}
