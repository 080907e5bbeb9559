//! A draw-command recording canvas.
//!
//! Paint code in murrine emits commands instead of talking to a GPU; the
//! host replays them against its real surface, and tests assert on the
//! recorded list. Clip and translation state is captured per command so a
//! recorded frame is self-describing.

use smallvec::SmallVec;

use crate::{
    color::Color,
    px::{PxPosition, PxRect},
};

/// One segment of a recorded path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Starts a new subpath at the point.
    MoveTo(PxPosition),
    /// Straight line to the point.
    LineTo(PxPosition),
    /// Arc inside the oval bounded by `rect`, from `start_angle` sweeping
    /// `sweep` radians clockwise.
    ArcTo {
        /// Bounding oval of the arc.
        rect: PxRect,
        /// Start angle in radians, 0 pointing right.
        start_angle: f32,
        /// Sweep in radians, positive clockwise.
        sweep: f32,
    },
    /// Closes the current subpath.
    Close,
}

/// How a shape is filled or stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    /// The color drawn with.
    pub color: Color,
    /// Stroke width; `None` fills.
    pub stroke_width: Option<f32>,
}

impl Paint {
    /// A filling paint.
    pub fn fill(color: Color) -> Self {
        Self {
            color,
            stroke_width: None,
        }
    }

    /// A stroking paint.
    pub fn stroke(color: Color, width: f32) -> Self {
        Self {
            color,
            stroke_width: Some(width),
        }
    }
}

/// Clip applied to a recorded command.
#[derive(Debug, Clone, PartialEq)]
pub enum Clip {
    /// No clip in effect.
    None,
    /// Clipped to a rectangle.
    Rect(PxRect),
    /// Clipped to a rounded rectangle with a uniform corner radius.
    RRect {
        /// The clip bounds.
        rect: PxRect,
        /// The corner radius.
        radius: f32,
    },
}

/// A recorded draw command, with the translation and clip that were in
/// effect when it was issued.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// An axis-aligned rectangle.
    Rect {
        /// The rectangle in canvas coordinates.
        rect: PxRect,
        /// Fill or stroke.
        paint: Paint,
        /// Clip in effect.
        clip: Clip,
    },
    /// A rounded rectangle with a uniform corner radius.
    RRect {
        /// The rectangle in canvas coordinates.
        rect: PxRect,
        /// The corner radius.
        radius: f32,
        /// Fill or stroke.
        paint: Paint,
        /// Clip in effect.
        clip: Clip,
    },
    /// A circle.
    Circle {
        /// Center in canvas coordinates.
        center: PxPosition,
        /// Radius in pixels.
        radius: f32,
        /// Fill or stroke.
        paint: Paint,
        /// Clip in effect.
        clip: Clip,
    },
    /// An arbitrary path.
    Path {
        /// The segments, already in canvas coordinates.
        segments: Vec<PathSegment>,
        /// Fill or stroke.
        paint: Paint,
        /// Clip in effect.
        clip: Clip,
    },
}

#[derive(Debug, Clone)]
struct CanvasState {
    offset: PxPosition,
    clip: Clip,
}

/// Records draw commands with save/restore translation and clip state.
#[derive(Debug)]
pub struct Canvas {
    commands: Vec<DrawCommand>,
    state: CanvasState,
    saved: SmallVec<[CanvasState; 4]>,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Creates an empty canvas at the origin with no clip.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            state: CanvasState {
                offset: PxPosition::ZERO,
                clip: Clip::None,
            },
            saved: SmallVec::new(),
        }
    }

    /// The commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Pushes the current translation and clip.
    pub fn save(&mut self) {
        self.saved.push(self.state.clone());
    }

    /// Pops to the most recently saved translation and clip. Unbalanced
    /// restores are ignored.
    pub fn restore(&mut self) {
        if let Some(state) = self.saved.pop() {
            self.state = state;
        }
    }

    /// Translates subsequent commands by the given offset.
    pub fn translate(&mut self, offset: PxPosition) {
        self.state.offset = self.state.offset + offset;
    }

    /// Clips subsequent commands to a rectangle (in local coordinates).
    pub fn clip_rect(&mut self, rect: PxRect) {
        self.state.clip = Clip::Rect(self.shift(rect));
    }

    /// Clips subsequent commands to a rounded rectangle.
    pub fn clip_rrect(&mut self, rect: PxRect, radius: f32) {
        self.state.clip = Clip::RRect {
            rect: self.shift(rect),
            radius,
        };
    }

    fn shift(&self, rect: PxRect) -> PxRect {
        PxRect::new(
            rect.x + self.state.offset.x,
            rect.y + self.state.offset.y,
            rect.width,
            rect.height,
        )
    }

    fn shift_point(&self, point: PxPosition) -> PxPosition {
        point + self.state.offset
    }

    /// Records a rectangle.
    pub fn draw_rect(&mut self, rect: PxRect, paint: Paint) {
        let rect = self.shift(rect);
        self.commands.push(DrawCommand::Rect {
            rect,
            paint,
            clip: self.state.clip.clone(),
        });
    }

    /// Records a rounded rectangle.
    pub fn draw_rrect(&mut self, rect: PxRect, radius: f32, paint: Paint) {
        let rect = self.shift(rect);
        self.commands.push(DrawCommand::RRect {
            rect,
            radius,
            paint,
            clip: self.state.clip.clone(),
        });
    }

    /// Records a circle.
    pub fn draw_circle(&mut self, center: PxPosition, radius: f32, paint: Paint) {
        let center = self.shift_point(center);
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            paint,
            clip: self.state.clip.clone(),
        });
    }

    /// Records a path. Segment coordinates are shifted by the current
    /// translation.
    pub fn draw_path(&mut self, segments: Vec<PathSegment>, paint: Paint) {
        let segments = segments
            .into_iter()
            .map(|segment| match segment {
                PathSegment::MoveTo(p) => PathSegment::MoveTo(self.shift_point(p)),
                PathSegment::LineTo(p) => PathSegment::LineTo(self.shift_point(p)),
                PathSegment::ArcTo {
                    rect,
                    start_angle,
                    sweep,
                } => PathSegment::ArcTo {
                    rect: self.shift(rect),
                    start_angle,
                    sweep,
                },
                PathSegment::Close => PathSegment::Close,
            })
            .collect();
        self.commands.push(DrawCommand::Path {
            segments,
            paint,
            clip: self.state.clip.clone(),
        });
    }
}
