//! Shared palette and button-kind resolution.
//!
//! Components in this crate never look a theme up from ambient context;
//! callers resolve one [`MaterialPalette`] (or a per-component config built
//! from it) per build pass and pass it down explicitly.

use derive_setters::Setters;
use murrine_ui::Color;

/// The resolved color palette components draw from.
///
/// Defaults follow the Material baseline light scheme.
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
pub struct MaterialPalette {
    /// Primary accent color.
    pub primary: Color,
    /// Content color on primary surfaces.
    pub on_primary: Color,
    /// Background surface color.
    pub surface: Color,
    /// Content color on surfaces.
    pub on_surface: Color,
    /// Outline and divider color.
    pub outline: Color,
    /// Color for disabled content.
    pub disabled: Color,
    /// Fill color for raised buttons.
    pub button_fill: Color,
    /// Fill color for disabled raised buttons.
    pub disabled_button_fill: Color,
}

impl Default for MaterialPalette {
    fn default() -> Self {
        Self {
            primary: Color::new(0.129, 0.588, 0.953, 1.0),
            on_primary: Color::WHITE,
            surface: Color::WHITE,
            on_surface: Color::new(0.0, 0.0, 0.0, 0.87),
            outline: Color::new(0.0, 0.0, 0.0, 0.12),
            disabled: Color::new(0.0, 0.0, 0.0, 0.38),
            button_fill: Color::new(0.898, 0.898, 0.898, 1.0),
            disabled_button_fill: Color::new(0.0, 0.0, 0.0, 0.12),
        }
    }
}

/// The closed set of button shapes that decide fill behavior.
///
/// Replaces runtime type inspection of concrete button widgets: whether a
/// button gets a fill color is a property of its kind, stated up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// Text-only button, never filled.
    Flat,
    /// Elevated button, filled from the palette.
    Raised,
    /// Outlined button, never filled.
    Outline,
}

impl ButtonKind {
    /// The fill color for a button of this kind, or `None` when the kind
    /// does not paint a fill.
    pub fn fill_color(self, palette: &MaterialPalette, enabled: bool) -> Option<Color> {
        match self {
            ButtonKind::Raised => Some(if enabled {
                palette.button_fill
            } else {
                palette.disabled_button_fill
            }),
            ButtonKind::Flat | ButtonKind::Outline => None,
        }
    }
}
