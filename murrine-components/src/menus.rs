//! Overlay placement for dropdown and popup menus.
//!
//! Both menu kinds are routed into an overlay covering the screen and must
//! position themselves relative to the widget that opened them. A dropdown
//! centers the selected item over its anchor and scrolls internally when
//! the item list is taller than the allowed menu height; a popup menu
//! anchors to an edge-relative position and clamps to screen padding. All
//! arithmetic here is in physical pixels as `f32`, matching the overlay's
//! float coordinate space.

use derive_setters::Setters;
use murrine_ui::{Dp, PxRect, PxSize, TextDirection};
use tracing::debug;

/// Height of one dropdown menu item, also the margin kept clear at the top
/// and bottom of the screen.
const MENU_ITEM_HEIGHT: Dp = Dp(48.0);
/// Vertical padding above and below a dropdown's item list.
const MENU_LIST_PADDING: Dp = Dp(8.0);
/// Minimum distance kept between a menu and every screen edge.
const MENU_SCREEN_PADDING: Dp = Dp(8.0);
/// Vertical padding inside a popup menu.
const MENU_VERTICAL_PADDING: Dp = Dp(8.0);
/// Popup menu widths are rounded up to a multiple of this step.
const MENU_WIDTH_STEP: Dp = Dp(56.0);
const MENU_MIN_WIDTH_STEPS: f32 = 2.0;
const MENU_MAX_WIDTH_STEPS: f32 = 5.0;

fn left(rect: PxRect) -> f32 {
    rect.x.0 as f32
}

fn top(rect: PxRect) -> f32 {
    rect.y.0 as f32
}

fn width(rect: PxRect) -> f32 {
    rect.width.0 as f32
}

/// Resolved vertical extent of a dropdown menu within the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuLimits {
    /// Top edge of the menu in overlay coordinates.
    pub top: f32,
    /// Bottom edge of the menu; always `top + height`.
    pub bottom: f32,
    /// The menu's height, capped at the allowed maximum.
    pub height: f32,
    /// Initial scroll offset of the internal list. Zero when the whole
    /// list fits; otherwise positioned so the selected item stays visible.
    pub scroll_offset: f32,
}

/// A position in the overlay, in overlay coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuPlacement {
    /// Left edge of the menu.
    pub x: f32,
    /// Top edge of the menu.
    pub y: f32,
}

/// Geometry inputs for positioning one dropdown menu.
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct DropdownMenuConfig {
    /// Height of each menu item, in pixels, in list order.
    #[setters(skip)]
    pub item_heights: Vec<f32>,
    /// Index of the currently selected item.
    pub selected_index: usize,
    /// Reading direction for horizontal anchoring.
    pub text_direction: TextDirection,
    /// Display scale factor for dp-to-px conversion.
    pub scale: f32,
}

impl DropdownMenuConfig {
    /// A configuration with explicit per-item heights.
    pub fn new(item_heights: Vec<f32>) -> Self {
        Self {
            item_heights,
            selected_index: 0,
            text_direction: TextDirection::Ltr,
            scale: 1.0,
        }
    }

    /// A configuration where every item has the default item height.
    pub fn uniform(count: usize, scale: f32) -> Self {
        Self::new(vec![MENU_ITEM_HEIGHT.to_pixels(scale); count]).scale(scale)
    }

    fn item_height(&self) -> f32 {
        MENU_ITEM_HEIGHT.to_pixels(self.scale)
    }

    /// Offset of an item's top edge within the menu's scrollable content.
    pub fn item_offset(&self, index: usize) -> f32 {
        debug_assert!(index < self.item_heights.len() || self.item_heights.is_empty());
        MENU_LIST_PADDING.to_pixels(self.scale)
            + self.item_heights.iter().take(index).sum::<f32>()
    }

    fn preferred_height(&self) -> f32 {
        MENU_LIST_PADDING.to_pixels(self.scale) * 2.0 + self.item_heights.iter().sum::<f32>()
    }

    /// The tallest the menu may be: the available height minus one item
    /// height reserved at both the top and the bottom.
    pub fn max_menu_height(&self, available_height: f32) -> f32 {
        (available_height - 2.0 * self.item_height()).max(0.0)
    }

    /// Dropdown menus never grow wider than their anchor.
    pub fn menu_width(&self, max_width: f32, anchor: PxRect) -> f32 {
        max_width.min(width(anchor))
    }

    /// Computes the menu's vertical extent and initial scroll offset.
    ///
    /// The selected item starts centered over the anchor. When that pushes
    /// the menu past the reserved top or bottom margin, the offending edge
    /// is pulled back to the nearer of the anchor edge and the margin, and
    /// the list scrolls internally instead.
    pub fn menu_limits(&self, anchor: PxRect, available_height: f32) -> MenuLimits {
        let item_height = self.item_height();
        let max_menu_height = self.max_menu_height(available_height);
        let button_top = top(anchor);
        let button_bottom = (anchor.bottom().0 as f32).min(available_height);
        let selected_height = self
            .item_heights
            .get(self.selected_index)
            .copied()
            .unwrap_or(0.0);
        let selected_item_offset = self.item_offset(self.selected_index);

        let top_limit = item_height.min(button_top);
        let bottom_limit = (available_height - item_height).max(button_bottom);

        let menu_height = max_menu_height.min(self.preferred_height());
        let mut menu_top = (button_top - selected_item_offset)
            - (selected_height - (anchor.height.0 as f32)) / 2.0;

        if menu_top < top_limit {
            menu_top = button_top.min(top_limit);
        }
        if menu_top + menu_height > bottom_limit {
            let menu_bottom = button_bottom.max(bottom_limit);
            menu_top = menu_bottom - menu_height;
        }

        let scroll_offset = if self.preferred_height() <= max_menu_height {
            0.0
        } else {
            (selected_item_offset - (button_top - menu_top)).max(0.0)
        };

        let limits = MenuLimits {
            top: menu_top,
            bottom: menu_top + menu_height,
            height: menu_height,
            scroll_offset,
        };
        debug!(?limits, "dropdown menu limits");
        limits
    }

    /// Positions the menu: horizontally along the anchor's leading edge
    /// (direction-aware), vertically per [`Self::menu_limits`].
    pub fn placement(&self, overlay: PxSize, anchor: PxRect, menu_width: f32) -> MenuPlacement {
        let overlay_width = overlay.width.0 as f32;
        let x = match self.text_direction {
            TextDirection::Ltr => {
                left(anchor).clamp(0.0, (overlay_width - menu_width).max(0.0))
            }
            TextDirection::Rtl => {
                (anchor.right().0 as f32).clamp(0.0, overlay_width) - menu_width
            }
        };
        let limits = self.menu_limits(anchor, overlay.height.0 as f32);
        MenuPlacement { x, y: limits.top }
    }
}

/// An anchor expressed as distances from each edge of its container.
///
/// Left and right (and top and bottom) are independent, so a caller can
/// anchor to one side explicitly by making the pair unequal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativePosition {
    /// Distance from the container's left edge.
    pub left: f32,
    /// Distance from the container's top edge.
    pub top: f32,
    /// Distance from the container's right edge.
    pub right: f32,
    /// Distance from the container's bottom edge.
    pub bottom: f32,
}

impl RelativePosition {
    /// The relative position of `rect` within a container of `size`.
    pub fn from_rect(rect: PxRect, size: PxSize) -> Self {
        Self {
            left: left(rect),
            top: top(rect),
            right: (size.width - rect.right()).0 as f32,
            bottom: (size.height - rect.bottom()).0 as f32,
        }
    }
}

/// Geometry inputs for positioning one popup menu.
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct PopupMenuConfig {
    /// Height of each menu entry in list order, dividers included.
    #[setters(skip)]
    pub item_heights: Vec<f32>,
    /// Entry to center over the anchor, if any. `None` drops the menu
    /// below the anchor's top edge instead.
    #[setters(strip_option)]
    pub selected_index: Option<usize>,
    /// Reading direction for the horizontal fallback anchoring.
    pub text_direction: TextDirection,
    /// Display scale factor for dp-to-px conversion.
    pub scale: f32,
}

impl Default for PopupMenuConfig {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl PopupMenuConfig {
    /// A configuration with explicit per-entry heights.
    pub fn new(item_heights: Vec<f32>) -> Self {
        Self {
            item_heights,
            selected_index: None,
            text_direction: TextDirection::Ltr,
            scale: 1.0,
        }
    }

    /// The largest size the menu child may take inside the overlay.
    pub fn max_child_size(&self, overlay: PxSize) -> (f32, f32) {
        let padding = MENU_SCREEN_PADDING.to_pixels(self.scale) * 2.0;
        (
            ((overlay.width.0 as f32) - padding).max(0.0),
            ((overlay.height.0 as f32) - padding).max(0.0),
        )
    }

    /// Rounds a preferred width up to the menu width step, bounded to the
    /// allowed step range.
    pub fn quantized_width(&self, preferred: f32) -> f32 {
        let step = MENU_WIDTH_STEP.to_pixels(self.scale);
        let min = step * MENU_MIN_WIDTH_STEPS;
        let max = step * MENU_MAX_WIDTH_STEPS;
        ((preferred / step).ceil() * step).clamp(min, max)
    }

    /// Positions the menu child inside the overlay.
    ///
    /// Vertically, a selected entry (divider heights included in the
    /// running offset) is centered over the anchor band; without one the
    /// menu top sits at the anchor's top distance. Horizontally, an
    /// unequal left/right pair anchors to the nearer-specified side, an
    /// equal pair falls back to the reading direction. Both axes are then
    /// clamped to the screen padding.
    pub fn placement(
        &self,
        overlay: PxSize,
        position: RelativePosition,
        child_width: f32,
        child_height: f32,
    ) -> MenuPlacement {
        let overlay_width = overlay.width.0 as f32;
        let overlay_height = overlay.height.0 as f32;
        let padding = MENU_SCREEN_PADDING.to_pixels(self.scale);

        let mut y = position.top;
        if let Some(selected) = self.selected_index {
            debug_assert!(selected < self.item_heights.len());
            let mut selected_offset = MENU_VERTICAL_PADDING.to_pixels(self.scale);
            selected_offset += self.item_heights.iter().take(selected).sum::<f32>();
            selected_offset += self
                .item_heights
                .get(selected)
                .copied()
                .unwrap_or(0.0)
                / 2.0;
            y = position.top + (overlay_height - position.top - position.bottom) / 2.0
                - selected_offset;
        }

        let mut x = if position.left > position.right {
            // Explicitly anchored to the right edge.
            overlay_width - position.right - child_width
        } else if position.left < position.right {
            // Explicitly anchored to the left edge.
            position.left
        } else {
            match self.text_direction {
                TextDirection::Rtl => overlay_width - position.right - child_width,
                TextDirection::Ltr => position.left,
            }
        };

        if x < padding {
            x = padding;
        } else if x + child_width > overlay_width - padding {
            x = overlay_width - child_width - padding;
        }
        if y < padding {
            y = padding;
        } else if y + child_height > overlay_height - padding {
            y = overlay_height - child_height - padding;
        }

        let placement = MenuPlacement { x, y };
        debug!(?placement, "popup menu placed");
        placement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use murrine_ui::Px;

    fn anchor(x: i32, y: i32, w: i32, h: i32) -> PxRect {
        PxRect::new(Px(x), Px(y), Px(w), Px(h))
    }

    fn overlay(w: i32, h: i32) -> PxSize {
        PxSize::new(Px(w), Px(h))
    }

    #[test]
    fn test_dropdown_centers_selected_item_over_anchor() {
        let config = DropdownMenuConfig::uniform(3, 1.0).selected_index(1);
        let limits = config.menu_limits(anchor(0, 276, 100, 48), 600.0);
        // Selected item offset 8 + 48; anchor and item heights coincide so
        // the item lands exactly on the anchor.
        assert_eq!(limits.top, 220.0);
        assert_eq!(limits.height, 160.0);
        assert_eq!(limits.scroll_offset, 0.0);
        assert_eq!(limits.top + config.item_offset(1), 276.0);
    }

    #[test]
    fn test_dropdown_bottom_clamp_enables_scrolling() {
        let config = DropdownMenuConfig::uniform(12, 1.0).selected_index(11);
        let limits = config.menu_limits(anchor(0, 500, 100, 40), 600.0);
        // Preferred height 592 exceeds the 504 allowance, and the initial
        // top would cross the reserved margin.
        assert_eq!(limits.height, 504.0);
        assert_eq!(limits.top, 48.0);
        assert_eq!(limits.bottom, 552.0);
        // Selected offset 536 minus the headroom above the anchor.
        assert_eq!(limits.scroll_offset, 84.0);
    }

    #[test]
    fn test_dropdown_top_clamp_stops_at_anchor() {
        let config = DropdownMenuConfig::uniform(3, 1.0).selected_index(2);
        let limits = config.menu_limits(anchor(0, 10, 100, 48), 600.0);
        // The margin is 48 but the anchor is above it; the menu may reach
        // down to the anchor's own top.
        assert_eq!(limits.top, 10.0);
        assert_eq!(limits.scroll_offset, 0.0);
    }

    #[test]
    fn test_dropdown_width_clamps_to_anchor() {
        let config = DropdownMenuConfig::uniform(3, 1.0);
        assert_eq!(config.menu_width(300.0, anchor(0, 0, 100, 48)), 100.0);
        assert_eq!(config.menu_width(80.0, anchor(0, 0, 100, 48)), 80.0);
    }

    #[test]
    fn test_dropdown_horizontal_placement_by_direction() {
        let config = DropdownMenuConfig::uniform(1, 1.0);
        let placement = config.placement(overlay(400, 600), anchor(50, 100, 100, 48), 100.0);
        assert_eq!(placement.x, 50.0);

        let config = config.text_direction(TextDirection::Rtl);
        let placement = config.placement(overlay(400, 600), anchor(50, 100, 100, 48), 100.0);
        // Right edge of the anchor minus the menu width.
        assert_eq!(placement.x, 50.0);

        // An anchor hanging off the right edge keeps the menu on screen.
        let placement = config.placement(overlay(400, 600), anchor(350, 100, 100, 48), 100.0);
        assert_eq!(placement.x, 300.0);
    }

    #[test]
    fn test_popup_explicit_side_anchoring() {
        let config = PopupMenuConfig::new(vec![48.0]);
        let position = RelativePosition {
            left: 100.0,
            top: 50.0,
            right: 300.0,
            bottom: 400.0,
        };
        let placement = config.placement(overlay(600, 600), position, 112.0, 64.0);
        assert_eq!(placement.x, 100.0);

        let position = RelativePosition {
            left: 300.0,
            top: 50.0,
            right: 100.0,
            bottom: 400.0,
        };
        let placement = config.placement(overlay(600, 600), position, 112.0, 64.0);
        // Anchored to the right edge: overlay width - right - child width.
        assert_eq!(placement.x, 388.0);
    }

    #[test]
    fn test_popup_direction_fallback_when_sides_equal() {
        let position = RelativePosition {
            left: 200.0,
            top: 50.0,
            right: 200.0,
            bottom: 400.0,
        };
        let ltr = PopupMenuConfig::new(vec![48.0]);
        assert_eq!(ltr.placement(overlay(600, 600), position, 112.0, 64.0).x, 200.0);

        let rtl = PopupMenuConfig::new(vec![48.0]).text_direction(TextDirection::Rtl);
        assert_eq!(rtl.placement(overlay(600, 600), position, 112.0, 64.0).x, 288.0);
    }

    #[test]
    fn test_popup_clamps_to_screen_padding() {
        let config = PopupMenuConfig::new(vec![48.0]);
        let position = RelativePosition {
            left: 0.0,
            top: 590.0,
            right: 600.0,
            bottom: 0.0,
        };
        let placement = config.placement(overlay(600, 600), position, 112.0, 64.0);
        assert_eq!(placement.x, 8.0);
        assert_eq!(placement.y, 600.0 - 64.0 - 8.0);
    }

    #[test]
    fn test_popup_centers_selected_entry_across_dividers() {
        // Item, divider, item; the divider's height counts toward the
        // selected entry's offset.
        let config = PopupMenuConfig::new(vec![48.0, 16.0, 48.0]).selected_index(2);
        let position = RelativePosition {
            left: 100.0,
            top: 200.0,
            right: 400.0,
            bottom: 300.0,
        };
        let placement = config.placement(overlay(600, 600), position, 112.0, 128.0);
        // Offset 8 + 48 + 16 + 24 = 96; band center (600 - 200 - 300) / 2.
        assert_eq!(placement.y, 200.0 + 50.0 - 96.0);
    }

    #[test]
    fn test_popup_width_quantization() {
        let config = PopupMenuConfig::default();
        assert_eq!(config.quantized_width(150.0), 168.0);
        assert_eq!(config.quantized_width(50.0), 112.0);
        assert_eq!(config.quantized_width(400.0), 280.0);
        assert_eq!(config.quantized_width(112.0), 112.0);
    }

    #[test]
    fn test_popup_child_size_leaves_screen_padding() {
        let config = PopupMenuConfig::default();
        assert_eq!(config.max_child_size(overlay(600, 400)), (584.0, 384.0));
    }

    #[test]
    fn test_relative_position_from_rect() {
        let position = RelativePosition::from_rect(anchor(100, 50, 200, 100), overlay(600, 600));
        assert_eq!(position.left, 100.0);
        assert_eq!(position.top, 50.0);
        assert_eq!(position.right, 300.0);
        assert_eq!(position.bottom, 450.0);
    }
}
