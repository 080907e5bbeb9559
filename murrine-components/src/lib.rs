//! Murrine components: the interaction and layout cores of a Material
//! widget set, written against the host-interface primitives in
//! `murrine-ui`.
//!
//! Each module is one self-contained subsystem:
//!
//! - [`slider`]: pointer-to-value mapping with discretization, thumb
//!   selection and the overlay/indicator animation lifecycle.
//! - [`list_item`]: the baseline-driven multi-slot row layout.
//! - [`ink`]: pressed/hover/focus highlights and splash features on a
//!   shared ink surface.
//! - [`segmented_buttons`]: continuous rounded borders across adjacent
//!   button segments.
//! - [`menus`]: dropdown and popup menu positioning against an anchor
//!   and screen bounds.
//! - [`mergeable`]: keyed slice/gap list reconciliation with animated
//!   gap transitions.
//!
//! Configuration is explicit throughout: callers assemble resolved config
//! structs (colors, metrics, text direction) and thread them through each
//! call. Nothing here reads ambient theme state.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod ink;
pub mod list_item;
pub mod menus;
pub mod mergeable;
pub mod segmented_buttons;
pub mod slider;
pub mod theme;

pub use theme::{ButtonKind, MaterialPalette};
