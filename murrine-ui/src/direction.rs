//! Text direction.

/// The reading direction layout and gestures are resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextDirection {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left. Horizontal roles (leading/trailing) mirror.
    Rtl,
}

impl TextDirection {
    /// Whether this is the right-to-left direction.
    pub fn is_rtl(self) -> bool {
        matches!(self, TextDirection::Rtl)
    }
}
