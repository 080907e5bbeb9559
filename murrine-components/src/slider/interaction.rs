//! Drag and tap lifecycle state for sliders.
//!
//! Controllers here own the animation state of one slider (overlay halo,
//! value indicator, enable fade, animated thumb position) and the transient
//! interaction flags. They are advanced by the host's frame clock through
//! [`SliderController::advance`] / [`RangeSliderController::advance`]; all
//! value reporting happens synchronously inside the gesture calls.

use std::time::Duration;

use murrine_ui::{
    AnimationController, AnimationStatus, Curve, DragUpdate, InteractionTimer, PointerEvent,
    TextDirection,
};
use tracing::{debug, trace};

use super::{
    RangeSliderCallbacks, RangeSliderConfig, SliderCallbacks, SliderConfig, TrackRect, discretize,
};

const OVERLAY_DURATION: Duration = Duration::from_millis(100);
const VALUE_INDICATOR_DURATION: Duration = Duration::from_millis(100);
const ENABLE_DURATION: Duration = Duration::from_millis(75);
const POSITION_BASE_DURATION_MS: f32 = 75.0;
const MINIMUM_INTERACTION_TIME: Duration = Duration::from_millis(500);

/// Interaction state for a single-thumb slider.
pub struct SliderController {
    value: f32,
    active: bool,
    current_drag_value: f32,
    last_reported: Option<f32>,
    overlay: AnimationController,
    value_indicator: AnimationController,
    enable: AnimationController,
    position: AnimationController,
    interaction_timer: InteractionTimer,
}

impl SliderController {
    /// Creates a controller at `value`, clamped and snapped per `config`.
    pub fn new(value: f32, config: &SliderConfig, enabled: bool) -> Self {
        let value = discretize(value, config.divisions);
        let mut enable = AnimationController::new(ENABLE_DURATION);
        enable.set_value(if enabled { 1.0 } else { 0.0 });
        // The position controller gets its run duration per animation.
        let mut position = AnimationController::new(Duration::ZERO);
        position.set_value(value);
        Self {
            value,
            active: false,
            current_drag_value: 0.0,
            last_reported: None,
            overlay: AnimationController::new(OVERLAY_DURATION),
            value_indicator: AnimationController::new(VALUE_INDICATOR_DURATION),
            enable,
            position,
            interaction_timer: InteractionTimer::new(),
        }
    }

    /// The committed value, normalized and snapped.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Whether an interaction is in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The thumb's animated position, for painting.
    pub fn position_fraction(&self) -> f32 {
        self.position.value()
    }

    /// Overlay halo animation value.
    pub fn overlay_fraction(&self) -> f32 {
        self.overlay.value()
    }

    /// Value indicator animation value.
    pub fn indicator_fraction(&self) -> f32 {
        self.value_indicator.value()
    }

    /// Value indicator animation status.
    pub fn indicator_status(&self) -> AnimationStatus {
        self.value_indicator.status()
    }

    /// Enable fade animation value; 1.0 fully enabled.
    pub fn enable_fraction(&self) -> f32 {
        self.enable.value()
    }

    /// Animates the enable fade when interactivity changes.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.enable.forward();
        } else {
            self.enable.reverse();
        }
    }

    /// Applies an externally supplied value, animating the thumb position
    /// toward it when the slider is discrete and jumping otherwise.
    ///
    /// The animation runs at constant velocity: the duration scales with
    /// the reciprocal of the distance so each division step takes the base
    /// duration regardless of how far the thumb travels.
    pub fn set_value(&mut self, value: f32, config: &SliderConfig) {
        let target = discretize(value, config.divisions);
        self.value = target;
        let distance = (target - self.position.value()).abs();
        if distance == 0.0 {
            return;
        }
        if config.is_discrete() {
            let duration =
                Duration::from_secs_f32(POSITION_BASE_DURATION_MS / 1000.0 * (1.0 / distance));
            self.position
                .animate_to_with_curve(target, duration, Curve::EaseInOut);
        } else {
            self.position.set_value(target);
        }
    }

    /// Starts an interaction at a local x coordinate. Handles both the tap
    /// and drag-start paths; a second down while already active is ignored.
    pub fn begin_interaction(
        &mut self,
        local_x: f32,
        track: TrackRect,
        config: &SliderConfig,
        callbacks: &SliderCallbacks,
    ) {
        if !callbacks.is_enabled() || self.active {
            return;
        }
        self.active = true;
        self.last_reported = None;
        debug!(local_x, "slider interaction started");

        if let Some(on_change_start) = &callbacks.on_change_start {
            on_change_start.call(discretize(self.position.value(), config.divisions));
        }
        self.current_drag_value = track.value_from_local_x(local_x, config.text_direction);
        self.report(discretize(self.current_drag_value, config.divisions), config, callbacks);

        self.overlay.forward();
        if config.shows_value_indicator() {
            self.value_indicator.forward();
            self.interaction_timer.schedule(MINIMUM_INTERACTION_TIME);
        }
    }

    /// Accumulates a horizontal drag delta into the current value. The
    /// delta's sign is flipped under RTL so dragging toward the track start
    /// always lowers the value.
    pub fn update_drag(
        &mut self,
        primary_delta: f32,
        track: TrackRect,
        config: &SliderConfig,
        callbacks: &SliderCallbacks,
    ) {
        if !callbacks.is_enabled() || !self.active {
            return;
        }
        let value_delta = primary_delta / track.width;
        self.current_drag_value += match config.text_direction {
            TextDirection::Rtl => -value_delta,
            TextDirection::Ltr => value_delta,
        };
        trace!(drag_value = self.current_drag_value, "slider drag update");
        self.report(discretize(self.current_drag_value, config.divisions), config, callbacks);
    }

    /// Ends the interaction. Release, tap-up and cancel all route here and
    /// behave identically: `on_change_end` reports the last dragged value.
    pub fn end_interaction(&mut self, config: &SliderConfig, callbacks: &SliderCallbacks) {
        if !self.active {
            return;
        }
        debug!(value = self.value, "slider interaction ended");
        if let Some(on_change_end) = &callbacks.on_change_end {
            on_change_end.call(discretize(self.current_drag_value, config.divisions));
        }
        self.active = false;
        self.current_drag_value = 0.0;
        self.overlay.reverse();
        // While the minimum-interaction timer is armed the indicator stays
        // up; the timer's expiry reverses it instead.
        if config.shows_value_indicator() && !self.interaction_timer.is_armed() {
            self.value_indicator.reverse();
        }
    }

    /// Advances all owned animations and the minimum-interaction timer by
    /// one frame delta.
    pub fn advance(&mut self, dt: Duration) {
        self.overlay.advance(dt);
        self.value_indicator.advance(dt);
        self.enable.advance(dt);
        self.position.advance(dt);
        if self.interaction_timer.advance(dt)
            && !self.active
            && self.value_indicator.status() == AnimationStatus::Completed
        {
            self.value_indicator.reverse();
        }
    }

    /// Routes a raw pointer event into the interaction lifecycle. `Up` and
    /// `Cancel` both end the interaction; the gesture arena may take the
    /// sequence away at any time.
    pub fn handle_pointer_event(
        &mut self,
        event: PointerEvent,
        track: TrackRect,
        config: &SliderConfig,
        callbacks: &SliderCallbacks,
    ) {
        match event {
            PointerEvent::Down { position } => {
                self.begin_interaction(position.x.to_f32(), track, config, callbacks);
            }
            PointerEvent::Move { delta, .. } => {
                self.update_drag(delta.x.to_f32(), track, config, callbacks);
            }
            PointerEvent::Up { .. } | PointerEvent::Cancel => {
                self.end_interaction(config, callbacks);
            }
        }
    }

    /// Tears down transient state; timers must not outlive the controller.
    pub fn dispose(&mut self) {
        self.interaction_timer.cancel();
        self.position.stop();
        self.enable.stop();
        self.value_indicator.stop();
        self.overlay.stop();
    }

    fn report(&mut self, value: f32, config: &SliderConfig, callbacks: &SliderCallbacks) {
        // Repeat values within one interaction are suppressed; absence of a
        // call is the no-op signal.
        if self.last_reported.is_some_and(|last| (value - last).abs() <= f32::EPSILON) {
            return;
        }
        self.last_reported = Some(value);
        if let Some(on_changed) = &callbacks.on_changed {
            on_changed.call(value);
        }
        self.value = value;
        if config.is_discrete() {
            self.set_value(value, config);
        } else {
            self.position.set_value(value);
        }
    }
}

/// A range slider's draggable handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thumb {
    /// The lower-valued handle.
    Start,
    /// The higher-valued handle.
    End,
}

/// Picks which thumb a press engages.
///
/// Each thumb gets a touch target of half-width
/// `max(thumb_width, min_touch_target) / 2` pixels. When the tap lands in
/// both targets the drag direction breaks the tie relative to the text
/// direction; otherwise the thumb whose value is exceeded or whose target
/// contains the tap wins. Returns `None` when no thumb is engaged.
pub fn default_range_thumb_selector(
    text_direction: TextDirection,
    values: (f32, f32),
    tap_value: f32,
    thumb_width: f32,
    min_touch_target: f32,
    track_width: f32,
    dx: f32,
) -> Option<Thumb> {
    let touch_radius = thumb_width.max(min_touch_target) / 2.0;
    let (start, end) = values;
    let in_start_target = (tap_value - start).abs() * track_width < touch_radius;
    let in_end_target = (tap_value - end).abs() * track_width < touch_radius;

    if in_start_target && in_end_target {
        let (towards_start, towards_end) = match text_direction {
            TextDirection::Ltr => (dx < 0.0, dx > 0.0),
            TextDirection::Rtl => (dx > 0.0, dx < 0.0),
        };
        if towards_start {
            return Some(Thumb::Start);
        }
        if towards_end {
            return Some(Thumb::End);
        }
    } else {
        if tap_value < start || in_start_target {
            return Some(Thumb::Start);
        }
        if tap_value > end || in_end_target {
            return Some(Thumb::End);
        }
    }
    None
}

/// Interaction state for a two-thumb range slider.
pub struct RangeSliderController {
    values: (f32, f32),
    new_values: (f32, f32),
    active: bool,
    selected: Option<Thumb>,
    last_reported: Option<(f32, f32)>,
    overlay: AnimationController,
    value_indicator: AnimationController,
    enable: AnimationController,
    interaction_timer: InteractionTimer,
}

impl RangeSliderController {
    /// Creates a controller holding `values`, clamped, snapped and ordered.
    pub fn new(values: (f32, f32), config: &RangeSliderConfig, enabled: bool) -> Self {
        debug_assert!(
            values.0 <= values.1,
            "range start must not exceed end: {values:?}"
        );
        let divisions = config.slider.divisions;
        let start = discretize(values.0, divisions);
        let end = discretize(values.1, divisions);
        let values = (start.min(end), end.max(start));
        let mut enable = AnimationController::new(ENABLE_DURATION);
        enable.set_value(if enabled { 1.0 } else { 0.0 });
        Self {
            values,
            new_values: values,
            active: false,
            selected: None,
            last_reported: None,
            overlay: AnimationController::new(OVERLAY_DURATION),
            value_indicator: AnimationController::new(VALUE_INDICATOR_DURATION),
            enable,
            interaction_timer: InteractionTimer::new(),
        }
    }

    /// The committed `(start, end)` values.
    pub fn values(&self) -> (f32, f32) {
        self.values
    }

    /// The thumb engaged by the current or most recent interaction.
    pub fn selected_thumb(&self) -> Option<Thumb> {
        self.selected
    }

    /// Whether an interaction is in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Overlay halo animation value.
    pub fn overlay_fraction(&self) -> f32 {
        self.overlay.value()
    }

    /// Value indicator animation status.
    pub fn indicator_status(&self) -> AnimationStatus {
        self.value_indicator.status()
    }

    /// Enable fade animation value; 1.0 fully enabled.
    pub fn enable_fraction(&self) -> f32 {
        self.enable.value()
    }

    /// Animates the enable fade when interactivity changes.
    pub fn set_enabled(&mut self, enabled: bool) {
        if enabled {
            self.enable.forward();
        } else {
            self.enable.reverse();
        }
    }

    /// Replaces the committed values from external configuration.
    pub fn set_values(&mut self, values: (f32, f32), config: &RangeSliderConfig) {
        debug_assert!(values.0 <= values.1);
        let divisions = config.slider.divisions;
        let start = discretize(values.0, divisions);
        let end = discretize(values.1, divisions);
        self.values = (start.min(end), start.max(end));
        self.new_values = self.values;
    }

    /// Starts an interaction at a local x coordinate, selecting a thumb.
    /// Presses that engage neither thumb are ignored.
    pub fn begin_interaction(
        &mut self,
        local_x: f32,
        track: TrackRect,
        config: &RangeSliderConfig,
        callbacks: &RangeSliderCallbacks,
    ) {
        if !callbacks.is_enabled() || self.active {
            return;
        }
        let slider = &config.slider;
        let tap_value = track.value_from_local_x(local_x, slider.text_direction);
        self.selected = default_range_thumb_selector(
            slider.text_direction,
            self.values,
            tap_value,
            slider.thumb_radius.to_pixels(slider.scale) * 2.0,
            slider.min_touch_target.to_pixels(slider.scale),
            track.width,
            0.0,
        );
        let Some(thumb) = self.selected else {
            return;
        };
        self.active = true;
        self.last_reported = None;
        debug!(?thumb, tap_value, "range slider interaction started");

        let current = self.discretized(config);
        self.new_values = match thumb {
            Thumb::Start => (tap_value.min(current.1), current.1),
            Thumb::End => (current.0, tap_value.max(current.0)),
        };
        if let Some(on_change_start) = &callbacks.on_change_start {
            on_change_start.call(current);
        }
        let reported = self.discretized_new(config);
        self.report(reported, callbacks);

        self.overlay.forward();
        if slider.shows_value_indicator() {
            self.value_indicator.forward();
            self.interaction_timer.schedule(MINIMUM_INTERACTION_TIME);
        }
    }

    /// Handles a drag update at a local x coordinate with horizontal delta
    /// `dx`. A drag that started without engaging a thumb may engage one
    /// late, once the direction disambiguates the selection.
    pub fn update_drag(
        &mut self,
        local_x: f32,
        dx: f32,
        track: TrackRect,
        config: &RangeSliderConfig,
        callbacks: &RangeSliderCallbacks,
    ) {
        let slider = &config.slider;
        let drag_value = track.value_from_local_x(local_x, slider.text_direction);

        let mut should_call_start = false;
        if self.selected.is_none() {
            self.selected = default_range_thumb_selector(
                slider.text_direction,
                self.values,
                drag_value,
                slider.thumb_radius.to_pixels(slider.scale) * 2.0,
                slider.min_touch_target.to_pixels(slider.scale),
                track.width,
                dx,
            );
            if self.selected.is_some() {
                should_call_start = true;
                self.active = true;
                self.last_reported = None;
                self.overlay.forward();
                if slider.shows_value_indicator() {
                    self.value_indicator.forward();
                }
            }
        }

        let (Some(thumb), true) = (self.selected, callbacks.is_enabled()) else {
            return;
        };
        let current = self.discretized(config);
        if should_call_start && let Some(on_change_start) = &callbacks.on_change_start {
            on_change_start.call(current);
        }

        let current_drag_value = discretize(drag_value, slider.divisions);
        let min_separation = if slider.is_discrete() {
            0.0
        } else {
            config.min_thumb_separation.to_pixels(slider.scale) / track.width
        };
        self.new_values = match thumb {
            Thumb::Start => (
                current_drag_value.min(current.1 - min_separation),
                current.1,
            ),
            Thumb::End => (
                current.0,
                current_drag_value.max(current.0 + min_separation),
            ),
        };
        trace!(values = ?self.new_values, "range slider drag update");
        let reported = self.new_values;
        self.report(reported, callbacks);
    }

    /// Routes a drag recognizer update into the interaction.
    pub fn handle_drag(
        &mut self,
        update: DragUpdate,
        track: TrackRect,
        config: &RangeSliderConfig,
        callbacks: &RangeSliderCallbacks,
    ) {
        self.update_drag(
            update.position.x.to_f32(),
            update.primary_delta,
            track,
            config,
            callbacks,
        );
    }

    /// Ends the interaction; release and cancel behave identically.
    pub fn end_interaction(&mut self, config: &RangeSliderConfig, callbacks: &RangeSliderCallbacks) {
        self.overlay.reverse();
        if config.slider.shows_value_indicator() && !self.interaction_timer.is_armed() {
            self.value_indicator.reverse();
        }
        if self.active && self.selected.is_some() {
            debug!(values = ?self.values, "range slider interaction ended");
            if let Some(on_change_end) = &callbacks.on_change_end {
                on_change_end.call(self.discretized_new(config));
            }
            self.active = false;
        }
    }

    /// Advances all owned animations and the minimum-interaction timer.
    pub fn advance(&mut self, dt: Duration) {
        self.overlay.advance(dt);
        self.value_indicator.advance(dt);
        self.enable.advance(dt);
        if self.interaction_timer.advance(dt)
            && !self.active
            && self.value_indicator.status() == AnimationStatus::Completed
        {
            self.value_indicator.reverse();
        }
    }

    /// Tears down transient state.
    pub fn dispose(&mut self) {
        self.interaction_timer.cancel();
        self.enable.stop();
        self.value_indicator.stop();
        self.overlay.stop();
    }

    fn discretized(&self, config: &RangeSliderConfig) -> (f32, f32) {
        let d = config.slider.divisions;
        (discretize(self.values.0, d), discretize(self.values.1, d))
    }

    fn discretized_new(&self, config: &RangeSliderConfig) -> (f32, f32) {
        let d = config.slider.divisions;
        (
            discretize(self.new_values.0, d),
            discretize(self.new_values.1, d),
        )
    }

    fn report(&mut self, values: (f32, f32), callbacks: &RangeSliderCallbacks) {
        debug_assert!(values.0 <= values.1, "range ordering violated: {values:?}");
        if self.last_reported.is_some_and(|last| {
            (values.0 - last.0).abs() <= f32::EPSILON && (values.1 - last.1).abs() <= f32::EPSILON
        }) {
            return;
        }
        self.last_reported = Some(values);
        if let Some(on_changed) = &callbacks.on_changed {
            on_changed.call(values);
        }
        self.values = values;
    }
}
