//! Canvas abstraction and a recording implementation.

use crate::draw::{BoxStyle, DrawCommand, StrokeStyle, TextStyle};
use crate::{Color, CornerRadius, Point, Rect};

/// Immediate-mode drawing target that a scene paints into.
pub trait Canvas {
    /// Draw a rectangle.
    fn draw_rect(&mut self, rect: Rect, radius: CornerRadius, style: &BoxStyle);

    /// Draw a circle.
    fn draw_circle(&mut self, center: Point, radius: f32, style: &BoxStyle);

    /// Draw a polyline or polygon.
    fn draw_path(
        &mut self,
        points: &[Point],
        closed: bool,
        fill: Option<Color>,
        stroke: Option<&StrokeStyle>,
    );

    /// Draw text.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Push a clip region. Everything drawn until the matching pop is clipped.
    fn push_clip(&mut self, rect: Rect);

    /// Pop the clip region.
    fn pop_clip(&mut self);

    /// Push a group opacity.
    fn push_opacity(&mut self, alpha: f32);

    /// Pop the group opacity.
    fn pop_opacity(&mut self);
}

#[derive(Debug)]
enum Frame {
    Clip(Rect),
    Opacity(f32),
}

/// A Canvas that records draw operations as a nested `DrawCommand` list.
///
/// Used for tests and as the display list the browser backend replays.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    stack: Vec<(Frame, Vec<DrawCommand>)>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded top-level commands. Groups still open are not included.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take ownership of the recorded commands, closing any open groups.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        while !self.stack.is_empty() {
            self.close_frame();
        }
        std::mem::take(&mut self.commands)
    }

    /// Get the number of recorded top-level commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Depth of open clip/opacity groups.
    #[must_use]
    pub fn group_depth(&self) -> usize {
        self.stack.len()
    }

    fn push(&mut self, command: DrawCommand) {
        match self.stack.last_mut() {
            Some((_, children)) => children.push(command),
            None => self.commands.push(command),
        }
    }

    fn close_frame(&mut self) {
        if let Some((frame, children)) = self.stack.pop() {
            if children.is_empty() {
                return;
            }
            let command = match frame {
                Frame::Clip(bounds) => DrawCommand::Clip { bounds, children },
                Frame::Opacity(alpha) => DrawCommand::Opacity { alpha, children },
            };
            self.push(command);
        }
    }
}

impl Canvas for RecordingCanvas {
    fn draw_rect(&mut self, rect: Rect, radius: CornerRadius, style: &BoxStyle) {
        self.push(DrawCommand::Rect {
            bounds: rect,
            radius: radius.fit(&rect),
            style: style.clone(),
        });
    }

    fn draw_circle(&mut self, center: Point, radius: f32, style: &BoxStyle) {
        self.push(DrawCommand::Circle {
            center,
            radius,
            style: style.clone(),
        });
    }

    fn draw_path(
        &mut self,
        points: &[Point],
        closed: bool,
        fill: Option<Color>,
        stroke: Option<&StrokeStyle>,
    ) {
        if points.len() < 2 {
            return;
        }
        self.push(DrawCommand::Path {
            points: points.to_vec(),
            closed,
            fill,
            stroke: stroke.cloned(),
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.push(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.stack.push((Frame::Clip(rect), Vec::new()));
    }

    fn pop_clip(&mut self) {
        if matches!(self.stack.last(), Some((Frame::Clip(_), _))) {
            self.close_frame();
        }
    }

    fn push_opacity(&mut self, alpha: f32) {
        self.stack
            .push((Frame::Opacity(alpha.clamp(0.0, 1.0)), Vec::new()));
    }

    fn pop_opacity(&mut self) {
        if matches!(self.stack.last(), Some((Frame::Opacity(_), _))) {
            self.close_frame();
        }
    }
}
