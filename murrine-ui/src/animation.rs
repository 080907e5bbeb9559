//! Animation controllers driven by an explicit frame clock.
//!
//! The host framework owns the real vsync loop; here a [`Ticker`] stands in
//! for it. Controllers register with a ticker and are advanced once per
//! frame; after advancing, each subscription's listener is notified **in
//! registration order**, so repaint hooks fire deterministically instead of
//! depending on ad hoc listener registration.
//!
//! A controller's value always lives in `[0, 1]`. `forward`/`reverse` run at
//! constant velocity (the configured duration spans the full unit interval),
//! `animate_to` runs to an arbitrary target over an explicit duration, and
//! consumers map the value through a [`Curve`] where an eased shape is
//! needed.
//!
//! ## Usage
//!
//! ```
//! use std::time::Duration;
//! use murrine_ui::{AnimationController, AnimationStatus, State, Ticker};
//!
//! let mut ticker = Ticker::new();
//! let overlay = State::new(AnimationController::new(Duration::from_millis(100)));
//! let _sub = ticker.subscribe(overlay.clone());
//!
//! overlay.with_mut(|c| c.forward());
//! ticker.tick(Duration::from_millis(100));
//! assert_eq!(overlay.with(|c| c.status()), AnimationStatus::Completed);
//! ```

use std::time::Duration;

use smallvec::SmallVec;
use tracing::trace;

use crate::{callback::Callback, state::State};

/// Easing curves, evaluated as cubic beziers over `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Curve {
    /// No easing.
    #[default]
    Linear,
    /// The classic CSS `ease` curve.
    Ease,
    /// Symmetric acceleration and deceleration.
    EaseInOut,
    /// The Material standard curve.
    FastOutSlowIn,
    /// Linear within `[start, end]`, clamped flat outside. Used to run one
    /// animation over a sub-span of another's timeline.
    Interval {
        /// Where the interval begins, in `[0, 1)`.
        start: f32,
        /// Where the interval ends, in `(start, 1]`.
        end: f32,
    },
}

impl Curve {
    /// Maps linear progress `t` in `[0, 1]` through the curve.
    pub fn transform(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Linear => t,
            Curve::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Curve::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Curve::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, t),
            Curve::Interval { start, end } => {
                if end <= start {
                    return if t < start { 0.0 } else { 1.0 };
                }
                ((t - start) / (end - start)).clamp(0.0, 1.0)
            }
        }
    }
}

/// Evaluates the y of a cubic bezier with control points (x1, y1), (x2, y2)
/// at the curve parameter where x equals `t`, by bisection on x.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, t: f32) -> f32 {
    fn axis(a: f32, b: f32, m: f32) -> f32 {
        // Bernstein form with endpoints 0 and 1.
        3.0 * a * (1.0 - m) * (1.0 - m) * m + 3.0 * b * (1.0 - m) * m * m + m * m * m
    }

    // The curve passes exactly through (0, 0) and (1, 1); skip the
    // bisection at the endpoints so it returns them without residue.
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let (mut lo, mut hi) = (0.0f32, 1.0f32);
    for _ in 0..32 {
        let mid = (lo + hi) / 2.0;
        if axis(x1, x2, mid) < t {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    axis(y1, y2, (lo + hi) / 2.0)
}

/// The lifecycle phase of an [`AnimationController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    /// Stopped at the beginning (value 0).
    Dismissed,
    /// Running toward the end.
    Forward,
    /// Running toward the beginning.
    Reverse,
    /// Stopped at the end of a run.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunDirection {
    Forward,
    Reverse,
}

#[derive(Debug, Clone, Copy)]
struct Run {
    from: f32,
    to: f32,
    duration: Duration,
    elapsed: Duration,
    direction: RunDirection,
    curve: Curve,
}

/// A scalar animation over `[0, 1]`, advanced by an external clock.
#[derive(Debug, Clone)]
pub struct AnimationController {
    value: f32,
    duration: Duration,
    status: AnimationStatus,
    run: Option<Run>,
}

impl AnimationController {
    /// Creates a controller at value 0 with the given full-span duration.
    pub fn new(duration: Duration) -> Self {
        Self {
            value: 0.0,
            duration,
            status: AnimationStatus::Dismissed,
            run: None,
        }
    }

    /// The current animation value in `[0, 1]`.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// The current lifecycle status.
    pub fn status(&self) -> AnimationStatus {
        self.status
    }

    /// Whether a run is in progress.
    pub fn is_animating(&self) -> bool {
        self.run.is_some()
    }

    /// Replaces the full-span duration used by subsequent `forward`/`reverse`
    /// calls. An active run keeps its own duration.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Runs toward 1.0 at constant velocity. The configured duration covers
    /// the full unit span, so starting mid-way takes proportionally less
    /// time. No-op if already completed at 1.0.
    pub fn forward(&mut self) {
        self.start_run(1.0, None, RunDirection::Forward, Curve::Linear);
    }

    /// Runs toward 0.0 at constant velocity.
    pub fn reverse(&mut self) {
        self.start_run(0.0, None, RunDirection::Reverse, Curve::Linear);
    }

    /// Runs from the current value to `target` over exactly `duration`.
    pub fn animate_to(&mut self, target: f32, duration: Duration) {
        self.animate_to_with_curve(target, duration, Curve::Linear);
    }

    /// Runs from the current value to `target` over `duration`, shaping the
    /// run's progress with `curve`.
    pub fn animate_to_with_curve(&mut self, target: f32, duration: Duration, curve: Curve) {
        self.start_run(target, Some(duration), RunDirection::Forward, curve);
    }

    /// Stops any run and jumps to `value`.
    pub fn set_value(&mut self, value: f32) {
        self.run = None;
        self.value = value.clamp(0.0, 1.0);
        self.status = if self.value <= 0.0 {
            AnimationStatus::Dismissed
        } else if self.value >= 1.0 {
            AnimationStatus::Completed
        } else {
            AnimationStatus::Forward
        };
    }

    /// Stops any run in place without changing the value.
    pub fn stop(&mut self) {
        self.run = None;
    }

    fn start_run(
        &mut self,
        target: f32,
        explicit_duration: Option<Duration>,
        direction: RunDirection,
        curve: Curve,
    ) {
        let target = target.clamp(0.0, 1.0);
        let span = (target - self.value).abs();
        if span == 0.0 {
            self.run = None;
            self.status = match direction {
                RunDirection::Forward => AnimationStatus::Completed,
                RunDirection::Reverse => AnimationStatus::Dismissed,
            };
            return;
        }

        let duration = explicit_duration.unwrap_or_else(|| self.duration.mul_f64(span as f64));
        self.run = Some(Run {
            from: self.value,
            to: target,
            duration,
            elapsed: Duration::ZERO,
            direction,
            curve,
        });
        self.status = match direction {
            RunDirection::Forward => AnimationStatus::Forward,
            RunDirection::Reverse => AnimationStatus::Reverse,
        };
    }

    /// Advances the active run by `dt`. Returns `true` if the value changed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(mut run) = self.run.take() else {
            return false;
        };

        run.elapsed += dt;
        if run.elapsed >= run.duration || run.duration.is_zero() {
            self.value = run.to;
            self.status = match run.direction {
                RunDirection::Forward => AnimationStatus::Completed,
                RunDirection::Reverse => AnimationStatus::Dismissed,
            };
        } else {
            let t = run.elapsed.as_secs_f32() / run.duration.as_secs_f32();
            let eased = run.curve.transform(t);
            self.value = run.from + (run.to - run.from) * eased;
            self.run = Some(run);
        }
        true
    }
}

/// Handle returned by [`Ticker::subscribe`]; pass it back to
/// [`Ticker::unsubscribe`] during teardown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerSubscription(u64);

struct TickerEntry {
    id: u64,
    controller: State<AnimationController>,
    listener: Option<Callback>,
}

/// The per-frame drive for animation controllers.
///
/// Subscriptions are kept in registration order and both the advance and the
/// listener notification walk that order, so a frame's side effects are
/// reproducible.
#[derive(Default)]
pub struct Ticker {
    entries: SmallVec<[TickerEntry; 8]>,
    next_id: u64,
}

impl Ticker {
    /// Creates an empty ticker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a controller to be advanced each tick.
    pub fn subscribe(&mut self, controller: State<AnimationController>) -> TickerSubscription {
        self.subscribe_with_listener_slot(controller, None)
    }

    /// Registers a controller plus a listener invoked after each tick in
    /// which the controller's value changed. Listeners must be idempotent
    /// and cheap; they run every animating frame.
    pub fn subscribe_with_listener(
        &mut self,
        controller: State<AnimationController>,
        listener: Callback,
    ) -> TickerSubscription {
        self.subscribe_with_listener_slot(controller, Some(listener))
    }

    fn subscribe_with_listener_slot(
        &mut self,
        controller: State<AnimationController>,
        listener: Option<Callback>,
    ) -> TickerSubscription {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(TickerEntry {
            id,
            controller,
            listener,
        });
        trace!(id, subscribers = self.entries.len(), "ticker subscribed");
        TickerSubscription(id)
    }

    /// Removes a subscription. Safe to call with an already-removed handle.
    pub fn unsubscribe(&mut self, sub: TickerSubscription) {
        self.entries.retain(|entry| entry.id != sub.0);
        trace!(id = sub.0, subscribers = self.entries.len(), "ticker unsubscribed");
    }

    /// Whether any subscribed controller has a run in progress.
    pub fn any_animating(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.controller.with(|c| c.is_animating()))
    }

    /// Advances every subscribed controller by `dt`, then notifies the
    /// listeners of those that changed, in registration order.
    pub fn tick(&mut self, dt: Duration) {
        let mut changed: SmallVec<[bool; 8]> = SmallVec::with_capacity(self.entries.len());
        for entry in &self.entries {
            changed.push(entry.controller.with_mut(|c| c.advance(dt)));
        }
        for (entry, changed) in self.entries.iter().zip(changed) {
            if changed && let Some(listener) = &entry.listener {
                listener.call();
            }
        }
    }
}
