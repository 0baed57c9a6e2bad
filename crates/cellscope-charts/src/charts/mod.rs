//! Chart renderers.
//!
//! Each chart is a [`Render`](cellscope_core::Render) implementation driven
//! by a [`ChartHost`](cellscope_core::ChartHost). A render pass draws the
//! grid, the series, the markers, the axes and the legend into named layers
//! of a freshly cleared surface.

mod health;
mod performance;
mod temperature;
mod trends;

pub use health::{HealthChart, HEALTH_X_LABELS};
pub use performance::PerformanceChart;
pub use temperature::TemperatureChart;
pub use trends::{soh_color, trend_points, TrendChart, TrendPoint, BRUSH_LAYER, OVERVIEW_LAYER};

use cellscope_core::{
    palette, BoxStyle, Color, Curve, Easing, FontWeight, HoverSpec, Node, NodeId, Point, Property,
    Rect, Shape, StrokeStyle, Surface, TextAnchor, TextStyle, Transition,
};

/// Horizontal grid lines.
pub const GRID_LAYER: &str = "grid";
/// Area fills under a series.
pub const AREA_LAYER: &str = "area";
/// Series lines and bars.
pub const SERIES_LAYER: &str = "series";
/// Data markers.
pub const MARKER_LAYER: &str = "markers";
/// Value labels drawn over bars.
pub const VALUE_LAYER: &str = "values";
/// Horizontal axis.
pub const X_AXIS_LAYER: &str = "x-axis";
/// Vertical axes.
pub const Y_AXIS_LAYER: &str = "y-axis";
/// Axis titles.
pub const TITLE_LAYER: &str = "titles";
/// Legend swatches and labels.
pub const LEGEND_LAYER: &str = "legend";
/// Placeholder message shown without data.
pub const PLACEHOLDER_LAYER: &str = "placeholder";

/// Center a placeholder message on the surface.
pub(crate) fn placeholder(surface: &mut Surface, message: &str) {
    let size = surface.size();
    let style = TextStyle::new(14.0, palette::GRAY_500).anchor(TextAnchor::Middle);
    surface.insert(Node::new(
        PLACEHOLDER_LAYER,
        Shape::text(message, Point::new(size.width / 2.0, size.height / 2.0), style),
    ));
}

/// Largest finite value, or zero if there is none.
pub(crate) fn finite_max(values: impl IntoIterator<Item = f64>) -> f64 {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
        .unwrap_or(0.0)
}

/// Smallest finite value, or zero if there is none.
pub(crate) fn finite_min(values: impl IntoIterator<Item = f64>) -> f64 {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v))))
        .unwrap_or(0.0)
}

/// Draw `points` as a line that reveals itself linearly over `reveal_ms`.
///
/// A zero `reveal_ms` draws the whole line at once.
pub(crate) fn add_line(
    surface: &mut Surface,
    points: &[Point],
    curve: Curve,
    stroke: StrokeStyle,
    reveal_ms: f64,
    clip: Option<Rect>,
) -> NodeId {
    let mut node = Node::new(SERIES_LAYER, Shape::line(curve.build(points), stroke));
    if let Some(clip) = clip {
        node = node.with_clip(clip);
    }
    let id = surface.insert(node);
    if reveal_ms > 0.0 {
        surface.animate(
            Transition::new(id, Property::Reveal, 0.0, 1.0, reveal_ms).easing(Easing::Linear),
        );
    }
    id
}

/// A data marker waiting to be placed.
#[derive(Debug, Clone)]
pub(crate) struct Marker {
    pub(crate) center: Point,
    pub(crate) color: Color,
    pub(crate) rest_radius: f32,
    pub(crate) hover_radius: f32,
    pub(crate) label: String,
    pub(crate) label_style: TextStyle,
    pub(crate) delay_ms: f64,
    pub(crate) duration_ms: f64,
}

impl Marker {
    /// Tooltip style shared by the markers.
    pub(crate) fn label_style(size: f32, color: Color) -> TextStyle {
        TextStyle::new(size, color)
            .weight(FontWeight::Semibold)
            .anchor(TextAnchor::Middle)
    }

    /// Insert the marker, growing from radius zero. Hover stays disabled
    /// until the growth settles.
    ///
    /// With no delay and no duration the marker appears at full size and
    /// is hoverable at once.
    pub(crate) fn place(self, surface: &mut Surface, clip: Option<Rect>) -> NodeId {
        let style = BoxStyle::fill(self.color).with_stroke(StrokeStyle::solid(Color::WHITE, 2.0));
        let mut node = Node::new(
            MARKER_LAYER,
            Shape::Circle {
                center: self.center,
                radius: self.rest_radius,
                style,
            },
        )
        .with_hover(HoverSpec::Marker {
            rest_radius: self.rest_radius,
            hover_radius: self.hover_radius,
            label: self.label,
            label_style: self.label_style,
        });
        if let Some(clip) = clip {
            node = node.with_clip(clip);
        }
        let id = surface.insert(node);
        if self.duration_ms <= 0.0 && self.delay_ms <= 0.0 {
            return id;
        }
        let settles = surface.animate(
            Transition::new(id, Property::Radius, 0.0, self.rest_radius, self.duration_ms)
                .delay(self.delay_ms),
        );
        if let Some(node) = surface.scene_mut().get_mut(id) {
            node.interactive_after_ms = settles;
        }
        id
    }
}

/// Legend entry drawn as a short line swatch.
pub(crate) fn legend_line(
    surface: &mut Surface,
    origin: Point,
    width: f32,
    color: Color,
    label: &str,
    label_at: Point,
) {
    surface.insert(Node::new(
        LEGEND_LAYER,
        Shape::line(vec![origin, origin.offset(width, 0.0)], StrokeStyle::solid(color, 3.0)),
    ));
    legend_text(surface, label, label_at);
}

/// Legend label.
pub(crate) fn legend_text(surface: &mut Surface, label: &str, position: Point) {
    surface.insert(Node::new(
        LEGEND_LAYER,
        Shape::text(label, position, TextStyle::new(12.0, palette::GRAY_700)),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellscope_core::Size;

    #[test]
    fn test_finite_max() {
        assert_eq!(finite_max([1.0, f64::NAN, 3.0, 2.0]), 3.0);
        assert_eq!(finite_max([-2.0, -1.0]), -1.0);
        assert_eq!(finite_max([f64::NAN]), 0.0);
        assert_eq!(finite_max(Vec::<f64>::new()), 0.0);
        assert_eq!(finite_min([4.0, f64::NAN, 2.5]), 2.5);
        assert_eq!(finite_min([f64::INFINITY]), 0.0);
    }

    #[test]
    fn test_placeholder_centered() {
        let mut surface = Surface::new(Size::new(700.0, 400.0));
        placeholder(&mut surface, "nothing here");
        let (_, node) = surface.scene().layer(PLACEHOLDER_LAYER).next().unwrap();
        match &node.shape {
            Shape::Text { position, style, .. } => {
                assert_eq!(*position, Point::new(350.0, 200.0));
                assert_eq!(style.anchor, TextAnchor::Middle);
            }
            _ => panic!("Expected Text shape"),
        }
    }

    #[test]
    fn test_marker_not_interactive_until_grown() {
        let mut surface = Surface::new(Size::new(100.0, 100.0));
        let id = Marker {
            center: Point::new(50.0, 50.0),
            color: palette::GREEN,
            rest_radius: 5.0,
            hover_radius: 7.0,
            label: "42.0%".into(),
            label_style: Marker::label_style(12.0, palette::GREEN),
            delay_ms: 100.0,
            duration_ms: 300.0,
        }
        .place(&mut surface, None);

        assert_eq!(surface.scene().get(id).unwrap().interactive_after_ms, 400.0);
        assert!(!surface.hover_at(Point::new(50.0, 50.0)));
        surface.tick(400.0);
        assert!(surface.hover_at(Point::new(50.0, 50.0)));
        assert_eq!(surface.scene().texts(cellscope_core::hover::TOOLTIP_LAYER), vec!["42.0%"]);
    }
}
