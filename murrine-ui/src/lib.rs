//! murrine-ui provides the host-interface primitives the murrine component
//! library is written against: pixel and density-independent units, layout
//! constraints, the measure protocol, pointer events, animation controllers
//! driven by an explicit frame clock, one-shot timers, and a recording canvas.
//!
//! The widget algorithms themselves live in the `murrine-components` crate;
//! everything here stands in for contracts a host framework normally owns
//! (frame scheduling, input dispatch, painting), expressed as plain types so
//! the algorithms can be exercised deterministically.
#![deny(missing_docs, clippy::unwrap_used)]

pub mod animation;
pub mod callback;
pub mod canvas;
pub mod color;
pub mod constraint;
pub mod direction;
pub mod dp;
pub mod event;
pub mod measure;
pub mod px;
pub mod state;
pub mod timer;

pub use animation::{AnimationController, AnimationStatus, Curve, Ticker, TickerSubscription};
pub use callback::{Callback, CallbackWith};
pub use canvas::{Canvas, Clip, DrawCommand, Paint, PathSegment};
pub use color::Color;
pub use constraint::{Constraint, DimensionValue};
pub use direction::TextDirection;
pub use dp::Dp;
pub use event::{DragUpdate, PointerEvent};
pub use measure::{BaselineKind, MeasureError, Measurable, SizedMeasurable};
pub use px::{Px, PxPosition, PxRect, PxSize};
pub use state::State;
pub use timer::{InteractionTimer, set_time_dilation, time_dilation};

/// Installs a `tracing` subscriber reading the `RUST_LOG` environment filter.
///
/// Call once at startup (or from a test that wants log output). Subsequent
/// calls are no-ops.
pub fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}
