//! Highlight and splash ink features on a shared paint surface.
//!
//! An interactive surface shows three independent highlight overlays
//! (pressed, hover, focus) plus transient splash features spawned by taps.
//! All of them paint onto one shared [`InkSurface`] and drive its repaint
//! hook while animating; the [`InkStateMachine`] owns their lifecycles and
//! is the only place a feature is ever removed from.
//!
//! ## Usage
//!
//! ```
//! use std::time::Duration;
//! use murrine_components::ink::{InkConfig, InkStateMachine, InkSurface};
//! use murrine_ui::{Px, PxPosition, PxRect, State};
//!
//! let surface = State::new(InkSurface::new());
//! let mut ink = InkStateMachine::new(surface);
//! let bounds = PxRect::new(Px(0), Px(0), Px(100), Px(40));
//! let config = InkConfig::default();
//!
//! ink.handle_tap_down(PxPosition::new(Px(50), Px(20)), bounds, &config);
//! ink.handle_tap(&config);
//! assert!(ink.want_keep_alive());
//! ink.advance(Duration::from_secs(2));
//! assert!(!ink.want_keep_alive());
//! ```

use std::time::Duration;

use derive_setters::Setters;
use murrine_ui::{
    AnimationController, AnimationStatus, Callback, Canvas, Color, Curve, Paint, PxPosition,
    PxRect, State,
};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Default splash radius for uncontained splashes, in logical pixels.
pub const DEFAULT_SPLASH_RADIUS: f32 = 35.0;

const HIGHLIGHT_FADE_DURATION: Duration = Duration::from_millis(200);

const SPLASH_UNCONFIRMED_DURATION: Duration = Duration::from_secs(1);
const SPLASH_FADE_DURATION: Duration = Duration::from_millis(200);
/// Confirmed splash growth velocity, pixels per millisecond.
const SPLASH_CONFIRMED_VELOCITY: f32 = 1.0;

const RIPPLE_FADE_IN_DURATION: Duration = Duration::from_millis(75);
const RIPPLE_RADIUS_DURATION: Duration = Duration::from_millis(225);
const RIPPLE_FADE_OUT_DURATION: Duration = Duration::from_millis(375);
const RIPPLE_CANCEL_DURATION: Duration = Duration::from_millis(75);
const RIPPLE_FADE_OUT_INTERVAL_START: f32 = 225.0 / 375.0;

/// The shared ink paint surface a subtree of interactive widgets draws on.
///
/// Features never paint directly; they bump the repaint counter and the host
/// schedules a paint pass that replays every live feature.
#[derive(Debug, Default)]
pub struct InkSurface {
    paint_marks: u64,
}

impl InkSurface {
    /// Creates a surface with no pending repaints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals that the surface needs repainting.
    pub fn mark_needs_paint(&mut self) {
        self.paint_marks += 1;
    }

    /// Number of repaint requests issued so far.
    pub fn paint_marks(&self) -> u64 {
        self.paint_marks
    }
}

/// The three independently toggled highlight overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    /// Shown while a pointer is down.
    Pressed,
    /// Shown while a pointer hovers.
    Hover,
    /// Shown while focused via keyboard navigation.
    Focus,
}

/// Which splash rendition taps spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplashStyle {
    /// A circle growing from the tap point, fading on confirm.
    #[default]
    Splash,
    /// The Material ripple: eased growth from a fraction of the target
    /// radius with separate fade-in and fade-out phases.
    Ripple,
}

/// How focus events translate into the focus highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusHighlightMode {
    /// Touch-first interaction; focus highlights are suppressed.
    #[default]
    Touch,
    /// Keyboard-driven interaction; focus highlights show.
    Traditional,
}

/// Resolved configuration for an ink-reactive surface.
#[derive(Debug, Clone, Copy, PartialEq, Setters)]
pub struct InkConfig {
    /// Whether the surface reacts to gestures at all.
    pub enabled: bool,
    /// Splash rendition.
    pub splash_style: SplashStyle,
    /// Whether splashes clip to the reference box.
    pub contained: bool,
    /// Corner radius of the clip, when contained.
    pub border_radius: f32,
    /// Splash color, alpha included.
    pub splash_color: Color,
    /// Pressed highlight color.
    pub pressed_color: Color,
    /// Hover highlight color.
    pub hover_color: Color,
    /// Focus highlight color.
    pub focus_color: Color,
    /// Explicit splash radius in pixels; `None` derives it from geometry.
    #[setters(strip_option)]
    pub splash_radius: Option<f32>,
    /// Display scale factor.
    pub scale: f32,
}

impl Default for InkConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            splash_style: SplashStyle::default(),
            contained: true,
            border_radius: 0.0,
            splash_color: Color::BLACK.with_alpha(0.25),
            pressed_color: Color::BLACK.with_alpha(0.12),
            hover_color: Color::BLACK.with_alpha(0.04),
            focus_color: Color::BLACK.with_alpha(0.12),
            splash_radius: None,
            scale: 1.0,
        }
    }
}

impl InkConfig {
    fn highlight_color(&self, kind: HighlightKind) -> Color {
        match kind {
            HighlightKind::Pressed => self.pressed_color,
            HighlightKind::Hover => self.hover_color,
            HighlightKind::Focus => self.focus_color,
        }
    }
}

/// A toggleable highlight overlay covering the reference box.
///
/// Fades in on creation or activation and out on deactivation; it reports
/// its own removal through `on_removed` once the fade-out completes, and
/// only its creator removes it.
pub struct InkHighlight {
    color: Color,
    bounds: PxRect,
    border_radius: f32,
    fade: AnimationController,
    active: bool,
    on_removed: Option<Callback>,
    surface: State<InkSurface>,
}

impl InkHighlight {
    /// Creates an active highlight and starts its fade-in.
    pub fn new(color: Color, bounds: PxRect, border_radius: f32, surface: State<InkSurface>) -> Self {
        let mut fade = AnimationController::new(HIGHLIGHT_FADE_DURATION);
        fade.forward();
        surface.with_mut(InkSurface::mark_needs_paint);
        Self {
            color,
            bounds,
            border_radius,
            fade,
            active: true,
            on_removed: None,
            surface,
        }
    }

    /// Sets the removal callback.
    pub fn on_removed(mut self, callback: Callback) -> Self {
        self.on_removed = Some(callback);
        self
    }

    /// Whether the highlight is logically on (may still be fading either way).
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Fades the highlight back in.
    pub fn activate(&mut self) {
        self.active = true;
        self.fade.forward();
    }

    /// Starts the fade-out. The feature stays alive until it completes.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.fade.reverse();
    }

    /// Advances the fade. Returns `true` when the fade-out has completed
    /// and the owner should remove the feature; `on_removed` has fired by
    /// then.
    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.fade.advance(dt) {
            self.surface.with_mut(InkSurface::mark_needs_paint);
        }
        let finished = !self.active && self.fade.status() == AnimationStatus::Dismissed;
        if finished && let Some(on_removed) = self.on_removed.take() {
            on_removed.call();
        }
        finished
    }

    /// Paints the highlight at its current fade value.
    pub fn paint(&self, canvas: &mut Canvas) {
        let color = self.color.with_alpha(self.color.a * self.fade.value());
        if self.border_radius > 0.0 {
            canvas.draw_rrect(self.bounds, self.border_radius, Paint::fill(color));
        } else {
            canvas.draw_rect(self.bounds, Paint::fill(color));
        }
    }
}

/// The radius a splash grows to: the distance from the tap point to the
/// farthest corner of the reference box, rounded up.
pub fn contained_target_radius(position: PxPosition, bounds: PxRect) -> f32 {
    let corners = [
        PxPosition::new(bounds.x, bounds.y),
        PxPosition::new(bounds.right(), bounds.y),
        PxPosition::new(bounds.x, bounds.bottom()),
        PxPosition::new(bounds.right(), bounds.bottom()),
    ];
    corners
        .into_iter()
        .map(|corner| position.distance_to(corner))
        .fold(0.0f32, f32::max)
        .ceil()
}

/// A transient splash feature spawned by a tap.
pub struct InkSplash {
    id: u64,
    style: SplashStyle,
    position: PxPosition,
    bounds: PxRect,
    contained: bool,
    border_radius: f32,
    target_radius: f32,
    color: Color,
    confirmed: bool,
    // Splash style uses `radius` + `fade_out` only; ripple uses all three.
    fade_in: AnimationController,
    radius: AnimationController,
    fade_out: AnimationController,
    surface: State<InkSurface>,
}

impl InkSplash {
    fn new(
        id: u64,
        position: PxPosition,
        bounds: PxRect,
        config: &InkConfig,
        surface: State<InkSurface>,
    ) -> Self {
        let target_radius = config.splash_radius.unwrap_or_else(|| {
            if config.contained {
                contained_target_radius(position, bounds)
            } else {
                DEFAULT_SPLASH_RADIUS * config.scale
            }
        });

        let mut fade_in = AnimationController::new(RIPPLE_FADE_IN_DURATION);
        let mut radius = AnimationController::new(SPLASH_UNCONFIRMED_DURATION);
        let fade_out = match config.splash_style {
            SplashStyle::Splash => {
                radius.forward();
                AnimationController::new(SPLASH_FADE_DURATION)
            }
            SplashStyle::Ripple => {
                fade_in.forward();
                radius.forward();
                AnimationController::new(RIPPLE_FADE_OUT_DURATION)
            }
        };
        surface.with_mut(InkSurface::mark_needs_paint);

        Self {
            id,
            style: config.splash_style,
            position,
            bounds,
            contained: config.contained,
            border_radius: config.border_radius,
            target_radius,
            color: config.splash_color,
            confirmed: false,
            fade_in,
            radius,
            fade_out,
            surface,
        }
    }

    /// The grow-to radius.
    pub fn target_radius(&self) -> f32 {
        self.target_radius
    }

    /// Accelerates the splash to its target and starts the fade-out.
    pub fn confirm(&mut self) {
        self.confirmed = true;
        match self.style {
            SplashStyle::Splash => {
                // Finish growing at a fixed velocity, then fade.
                let millis = self.target_radius / SPLASH_CONFIRMED_VELOCITY;
                self.radius
                    .set_duration(Duration::from_secs_f32(millis / 1000.0));
                self.radius.forward();
                self.fade_out.forward();
            }
            SplashStyle::Ripple => {
                self.radius.set_duration(RIPPLE_RADIUS_DURATION);
                self.radius.forward();
                self.fade_in.forward();
                self.fade_out.animate_to(1.0, RIPPLE_FADE_OUT_DURATION);
            }
        }
    }

    /// Fades the splash out from wherever it got to.
    pub fn cancel(&mut self) {
        match self.style {
            SplashStyle::Splash => self.fade_out.forward(),
            SplashStyle::Ripple => {
                // The cancel fade picks up where the fade-in left off so the
                // opacity is continuous.
                self.fade_in.stop();
                let fade_out_value = 1.0 - self.fade_in.value();
                self.fade_out.set_value(fade_out_value);
                if fade_out_value < 1.0 {
                    self.fade_out.animate_to(1.0, RIPPLE_CANCEL_DURATION);
                }
            }
        }
    }

    /// Advances the splash animations. Returns `true` once fully faded,
    /// at which point the owner removes the feature.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let mut changed = self.radius.advance(dt);
        changed |= self.fade_in.advance(dt);
        changed |= self.fade_out.advance(dt);
        if changed {
            self.surface.with_mut(InkSurface::mark_needs_paint);
        }
        self.fade_out.status() == AnimationStatus::Completed
    }

    fn current_radius(&self) -> f32 {
        match self.style {
            SplashStyle::Splash => self.target_radius * self.radius.value(),
            SplashStyle::Ripple => {
                let eased = Curve::Ease.transform(self.radius.value());
                let start = self.target_radius * 0.30;
                start + (self.target_radius - start) * eased
            }
        }
    }

    fn current_alpha(&self) -> f32 {
        match self.style {
            SplashStyle::Splash => self.color.a * (1.0 - self.fade_out.value()),
            SplashStyle::Ripple => {
                if self.fade_in.is_animating() {
                    self.color.a * self.fade_in.value()
                } else {
                    let interval = Curve::Interval {
                        start: RIPPLE_FADE_OUT_INTERVAL_START,
                        end: 1.0,
                    };
                    self.color.a * (1.0 - interval.transform(self.fade_out.value()))
                }
            }
        }
    }

    fn current_center(&self) -> PxPosition {
        let drift = match self.style {
            // Uncontained splashes drift toward the box center as they grow.
            SplashStyle::Splash if !self.contained => self.radius.value(),
            SplashStyle::Ripple => Curve::Ease.transform(self.radius.value()),
            _ => return self.position,
        };
        self.position.lerp(self.bounds.center(), drift)
    }

    /// Paints the splash, clipped to the reference box when contained.
    pub fn paint(&self, canvas: &mut Canvas) {
        let color = self.color.with_alpha(self.current_alpha());
        canvas.save();
        if self.contained {
            if self.border_radius > 0.0 {
                canvas.clip_rrect(self.bounds, self.border_radius);
            } else {
                canvas.clip_rect(self.bounds);
            }
        }
        canvas.draw_circle(self.current_center(), self.current_radius(), Paint::fill(color));
        canvas.restore();
    }
}

/// Interaction state for one ink-reactive widget.
///
/// Owns the highlight slots and splash set; gestures feed in through the
/// `handle_*` methods and the host's frame clock drives [`advance`].
///
/// [`advance`]: InkStateMachine::advance
pub struct InkStateMachine {
    surface: State<InkSurface>,
    pressed: Option<InkHighlight>,
    hover: Option<InkHighlight>,
    focus: Option<InkHighlight>,
    splashes: SmallVec<[InkSplash; 2]>,
    current_splash: Option<u64>,
    next_splash_id: u64,
}

impl InkStateMachine {
    /// Creates a state machine painting onto `surface`.
    pub fn new(surface: State<InkSurface>) -> Self {
        Self {
            surface,
            pressed: None,
            hover: None,
            focus: None,
            splashes: SmallVec::new(),
            current_splash: None,
            next_splash_id: 0,
        }
    }

    fn slot_mut(&mut self, kind: HighlightKind) -> &mut Option<InkHighlight> {
        match kind {
            HighlightKind::Pressed => &mut self.pressed,
            HighlightKind::Hover => &mut self.hover,
            HighlightKind::Focus => &mut self.focus,
        }
    }

    /// Whether the given highlight is currently on.
    pub fn highlight_active(&self, kind: HighlightKind) -> bool {
        let slot = match kind {
            HighlightKind::Pressed => &self.pressed,
            HighlightKind::Hover => &self.hover,
            HighlightKind::Focus => &self.focus,
        };
        slot.as_ref().is_some_and(InkHighlight::is_active)
    }

    /// Number of live splash features, confirmed or not.
    pub fn splash_count(&self) -> usize {
        self.splashes.len()
    }

    /// Toggles a highlight. Idempotent: requesting the state the highlight
    /// is already in does nothing. Turning on creates the feature lazily or
    /// reactivates a fading one; turning off starts the fade-out, removal
    /// happens when the fade completes.
    pub fn update_highlight(
        &mut self,
        kind: HighlightKind,
        value: bool,
        bounds: PxRect,
        config: &InkConfig,
    ) {
        if value == self.highlight_active(kind) {
            return;
        }
        trace!(?kind, value, "highlight toggled");
        let color = config.highlight_color(kind);
        let border_radius = config.border_radius;
        let surface = self.surface.clone();
        let slot = self.slot_mut(kind);
        if value {
            match slot {
                Some(highlight) => highlight.activate(),
                None => *slot = Some(InkHighlight::new(color, bounds, border_radius, surface)),
            }
        } else if let Some(highlight) = slot {
            highlight.deactivate();
        }
    }

    /// Pointer down: spawns a splash and turns the pressed highlight on.
    pub fn handle_tap_down(&mut self, position: PxPosition, bounds: PxRect, config: &InkConfig) {
        if !config.enabled {
            return;
        }
        debug!(?position, "ink tap down");
        let id = self.next_splash_id;
        self.next_splash_id += 1;
        self.splashes
            .push(InkSplash::new(id, position, bounds, config, self.surface.clone()));
        self.current_splash = Some(id);
        self.update_highlight(HighlightKind::Pressed, true, bounds, config);
    }

    /// Tap completed: confirms the current splash and releases the pressed
    /// highlight.
    pub fn handle_tap(&mut self, config: &InkConfig) {
        self.confirm_current();
        // Bounds are irrelevant for turning a highlight off.
        self.update_highlight(HighlightKind::Pressed, false, PxRect::ZERO, config);
    }

    /// Tap cancelled: fades the current splash without confirming it.
    pub fn handle_tap_cancel(&mut self, config: &InkConfig) {
        if let Some(splash) = self.current_splash_mut() {
            splash.cancel();
        }
        self.current_splash = None;
        self.update_highlight(HighlightKind::Pressed, false, PxRect::ZERO, config);
    }

    /// Double tap: confirms the current splash; no highlight toggle.
    pub fn handle_double_tap(&mut self) {
        self.confirm_current();
    }

    /// Long press: confirms the current splash; no highlight toggle.
    pub fn handle_long_press(&mut self) {
        self.confirm_current();
    }

    /// Hover enter/exit, honored only while enabled.
    pub fn handle_hover(&mut self, hovered: bool, bounds: PxRect, config: &InkConfig) {
        if config.enabled {
            self.update_highlight(HighlightKind::Hover, hovered, bounds, config);
        }
    }

    /// Focus change, gated by the host's focus highlight mode: suppressed
    /// entirely in touch mode.
    pub fn handle_focus(
        &mut self,
        focused: bool,
        mode: FocusHighlightMode,
        bounds: PxRect,
        config: &InkConfig,
    ) {
        let show = focused && mode == FocusHighlightMode::Traditional && config.enabled;
        self.update_highlight(HighlightKind::Focus, show, bounds, config);
    }

    /// Immediate teardown on tree removal: every splash and highlight is
    /// dropped without waiting for animations.
    pub fn deactivate(&mut self) {
        debug!(splashes = self.splashes.len(), "ink deactivated");
        self.splashes.clear();
        self.current_splash = None;
        self.pressed = None;
        self.hover = None;
        self.focus = None;
        self.surface.with_mut(InkSurface::mark_needs_paint);
    }

    /// Whether the widget must be kept alive: true exactly while any
    /// highlight feature exists or any splash is live.
    pub fn want_keep_alive(&self) -> bool {
        self.pressed.is_some()
            || self.hover.is_some()
            || self.focus.is_some()
            || !self.splashes.is_empty()
    }

    /// Advances every feature by one frame delta, removing the ones whose
    /// fade-outs completed.
    pub fn advance(&mut self, dt: Duration) {
        for slot in [&mut self.pressed, &mut self.hover, &mut self.focus] {
            if let Some(highlight) = slot
                && highlight.advance(dt)
            {
                *slot = None;
            }
        }
        let current = &mut self.current_splash;
        self.splashes.retain(|splash| {
            let finished = splash.advance(dt);
            if finished && *current == Some(splash.id) {
                *current = None;
            }
            !finished
        });
    }

    /// Paints all live features: highlights below, splashes above.
    pub fn paint(&self, canvas: &mut Canvas) {
        for slot in [&self.pressed, &self.hover, &self.focus] {
            if let Some(highlight) = slot {
                highlight.paint(canvas);
            }
        }
        for splash in &self.splashes {
            splash.paint(canvas);
        }
    }

    fn confirm_current(&mut self) {
        if let Some(splash) = self.current_splash_mut() {
            splash.confirm();
        }
        self.current_splash = None;
    }

    fn current_splash_mut(&mut self) -> Option<&mut InkSplash> {
        let id = self.current_splash?;
        self.splashes.iter_mut().find(|splash| splash.id == id)
    }
}
