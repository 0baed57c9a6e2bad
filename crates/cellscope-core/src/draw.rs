//! Draw commands: the display list a painted scene reduces to.
//!
//! A [`crate::Scene`] flattens into a `Vec<DrawCommand>` that a backend
//! (the recording canvas in tests, Canvas2D in the browser) replays in order.

use crate::{Color, CornerRadius, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke style for path rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
    /// Line cap style
    pub cap: LineCap,
    /// Line join style
    pub join: LineJoin,
    /// Dash pattern (empty = solid)
    pub dash: Vec<f32>,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            dash: Vec::new(),
        }
    }
}

impl StrokeStyle {
    /// Solid stroke of the given color and width.
    #[must_use]
    pub fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    /// Round caps and joins, used for data lines.
    #[must_use]
    pub fn rounded(mut self) -> Self {
        self.cap = LineCap::Round;
        self.join = LineJoin::Round;
        self
    }
}

/// Line cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCap {
    /// Flat cap at endpoint
    #[default]
    Butt,
    /// Rounded cap
    Round,
    /// Square cap extending beyond endpoint
    Square,
}

/// Line join style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineJoin {
    /// Sharp corner
    #[default]
    Miter,
    /// Rounded corner
    Round,
    /// Beveled corner
    Bevel,
}

/// Fill and stroke for rectangles and circles.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
    /// Stroke style (None = no stroke)
    pub stroke: Option<StrokeStyle>,
}

impl BoxStyle {
    /// Create a box with only fill color.
    #[must_use]
    pub fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
        }
    }

    /// Create a box with only stroke.
    #[must_use]
    pub fn stroke(style: StrokeStyle) -> Self {
        Self {
            fill: None,
            stroke: Some(style),
        }
    }

    /// Add an outline to a filled box.
    #[must_use]
    pub fn with_stroke(mut self, style: StrokeStyle) -> Self {
        self.stroke = Some(style);
        self
    }
}

/// Horizontal anchoring of a text run relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAnchor {
    /// Text starts at the position
    #[default]
    Start,
    /// Text is centered on the position
    Middle,
    /// Text ends at the position
    End,
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    /// Normal (400)
    #[default]
    Normal,
    /// Semibold (600)
    Semibold,
    /// Bold (700)
    Bold,
}

impl FontWeight {
    /// Numeric CSS weight.
    #[must_use]
    pub const fn css(self) -> u16 {
        match self {
            Self::Normal => 400,
            Self::Semibold => 600,
            Self::Bold => 700,
        }
    }
}

/// Text style for labels, ticks and tooltips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font weight
    pub weight: FontWeight,
    /// Horizontal anchor
    pub anchor: TextAnchor,
    /// Rotation around the anchor point, in degrees
    pub rotation: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 12.0,
            color: Color::BLACK,
            weight: FontWeight::Normal,
            anchor: TextAnchor::Start,
            rotation: 0.0,
        }
    }
}

impl TextStyle {
    /// Style with a size and color, normal weight, start-anchored.
    #[must_use]
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            ..Self::default()
        }
    }

    /// Set the font weight.
    #[must_use]
    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Set the anchor.
    #[must_use]
    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the rotation in degrees.
    #[must_use]
    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }
}

/// Drawing primitive. Everything a chart paints reduces to these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw a path (polyline or polygon)
    Path {
        /// Points defining the path
        points: Vec<Point>,
        /// Whether the path is closed
        closed: bool,
        /// Interior fill
        fill: Option<Color>,
        /// Outline
        stroke: Option<StrokeStyle>,
    },

    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radius
        radius: CornerRadius,
        /// Box style
        style: BoxStyle,
    },

    /// Draw a circle
    Circle {
        /// Center point
        center: Point,
        /// Radius
        radius: f32,
        /// Box style
        style: BoxStyle,
    },

    /// Draw text
    Text {
        /// Text content
        content: String,
        /// Position
        position: Point,
        /// Text style
        style: TextStyle,
    },

    /// Clip children to bounds
    Clip {
        /// Clip bounds
        bounds: Rect,
        /// Child commands
        children: Vec<DrawCommand>,
    },

    /// Apply opacity to children
    Opacity {
        /// Alpha value (0.0 - 1.0)
        alpha: f32,
        /// Child commands
        children: Vec<DrawCommand>,
    },
}

impl DrawCommand {
    /// Create a filled rectangle.
    #[must_use]
    pub fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::ZERO,
            style: BoxStyle::fill(color),
        }
    }

    /// Create a filled circle.
    #[must_use]
    pub fn filled_circle(center: Point, radius: f32, color: Color) -> Self {
        Self::Circle {
            center,
            radius,
            style: BoxStyle::fill(color),
        }
    }

    /// Create a line between two points.
    #[must_use]
    pub fn line(from: Point, to: Point, style: StrokeStyle) -> Self {
        Self::Path {
            points: vec![from, to],
            closed: false,
            fill: None,
            stroke: Some(style),
        }
    }

    /// Create an open stroked polyline.
    #[must_use]
    pub fn polyline(points: Vec<Point>, style: StrokeStyle) -> Self {
        Self::Path {
            points,
            closed: false,
            fill: None,
            stroke: Some(style),
        }
    }

    /// Create a closed filled polygon.
    #[must_use]
    pub fn polygon(points: Vec<Point>, color: Color) -> Self {
        Self::Path {
            points,
            closed: true,
            fill: Some(color),
            stroke: None,
        }
    }

    /// Number of leaf commands, counting through clip and opacity groups.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Clip { children, .. } | Self::Opacity { children, .. } => {
                children.iter().map(Self::leaf_count).sum()
            }
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Style Tests
    // =========================================================================

    #[test]
    fn test_stroke_style_default() {
        let style = StrokeStyle::default();
        assert_eq!(style.color, Color::BLACK);
        assert_eq!(style.width, 1.0);
        assert_eq!(style.cap, LineCap::Butt);
        assert!(style.dash.is_empty());
    }

    #[test]
    fn test_stroke_style_rounded() {
        let style = StrokeStyle::solid(Color::WHITE, 3.0).rounded();
        assert_eq!(style.cap, LineCap::Round);
        assert_eq!(style.join, LineJoin::Round);
        assert_eq!(style.width, 3.0);
    }

    #[test]
    fn test_box_style_fill_with_stroke() {
        let style = BoxStyle::fill(Color::BLACK).with_stroke(StrokeStyle::solid(Color::WHITE, 2.0));
        assert_eq!(style.fill, Some(Color::BLACK));
        assert_eq!(style.stroke.map(|s| s.width), Some(2.0));
    }

    #[test]
    fn test_text_style_builder() {
        let style = TextStyle::new(14.0, Color::WHITE)
            .weight(FontWeight::Semibold)
            .anchor(TextAnchor::Middle)
            .rotated(-90.0);
        assert_eq!(style.weight.css(), 600);
        assert_eq!(style.anchor, TextAnchor::Middle);
        assert_eq!(style.rotation, -90.0);
    }

    // =========================================================================
    // DrawCommand Tests
    // =========================================================================

    #[test]
    fn test_polygon_is_closed_fill() {
        let cmd = DrawCommand::polygon(vec![Point::ORIGIN, Point::new(1.0, 0.0)], Color::WHITE);
        match cmd {
            DrawCommand::Path {
                closed,
                fill,
                stroke,
                ..
            } => {
                assert!(closed);
                assert_eq!(fill, Some(Color::WHITE));
                assert!(stroke.is_none());
            }
            _ => panic!("Expected Path command"),
        }
    }

    #[test]
    fn test_leaf_count_through_groups() {
        let cmd = DrawCommand::Clip {
            bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
            children: vec![
                DrawCommand::filled_circle(Point::ORIGIN, 1.0, Color::BLACK),
                DrawCommand::Opacity {
                    alpha: 0.5,
                    children: vec![
                        DrawCommand::filled_rect(Rect::default(), Color::BLACK),
                        DrawCommand::filled_rect(Rect::default(), Color::WHITE),
                    ],
                },
            ],
        };
        assert_eq!(cmd.leaf_count(), 3);
    }

    #[test]
    fn test_draw_command_json_shape() {
        let cmd = DrawCommand::filled_circle(Point::new(1.0, 2.0), 3.0, Color::WHITE);
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"Circle\""));
        let back: DrawCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cmd);
    }
}
