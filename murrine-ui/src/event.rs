//! Pointer event types.
//!
//! Gestures reach components as a stream of pointer events. Cancel is a
//! first-class terminal event: the gesture arena may take a sequence away
//! from a component at any time, and every interaction state machine must
//! treat `Cancel` as reaching the idle state.

use crate::px::PxPosition;

/// A single pointer event in component-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Pointer contact began.
    Down {
        /// Contact position.
        position: PxPosition,
    },
    /// Pointer moved while down.
    Move {
        /// Current position.
        position: PxPosition,
        /// Movement since the previous event.
        delta: PxPosition,
    },
    /// Pointer contact ended normally.
    Up {
        /// Release position.
        position: PxPosition,
    },
    /// The gesture was taken away; no further events follow.
    Cancel,
}

/// Details of one drag update, as reported by a drag recognizer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragUpdate {
    /// Current pointer position.
    pub position: PxPosition,
    /// Movement along the drag's primary axis since the last update, in
    /// pixels. Positive is rightward for horizontal drags.
    pub primary_delta: f32,
}
