//! Cumulative distance and speed on twin vertical axes.

use super::{
    add_line, finite_max, legend_line, legend_text, placeholder, Marker, AREA_LAYER, GRID_LAYER,
    LEGEND_LAYER, TITLE_LAYER, X_AXIS_LAYER, Y_AXIS_LAYER,
};
use crate::config::RenderConfig;
use crate::synthetic::PerformancePoint;
use cellscope_core::axis::{horizontal_grid, title};
use cellscope_core::curve::area_to_baseline;
use cellscope_core::{
    palette, Axis, BoxStyle, CornerRadius, Curve, LinearScale, Node, Orientation, Point, Property,
    Rect, Render, Shape, StrokeStyle, Surface, Transition,
};

/// Headroom above the largest value on both vertical axes.
const HEADROOM: f64 = 1.1;
const AREA_ALPHA: f32 = 0.35;
const MARKER_EVERY: usize = 4;

/// Area of cumulative distance under a speed line.
#[derive(Debug, Clone)]
pub struct PerformanceChart {
    config: RenderConfig,
}

impl PerformanceChart {
    /// Create with a layout.
    #[must_use]
    pub const fn new(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl Render for PerformanceChart {
    type Deps = Option<Vec<PerformancePoint>>;

    fn name(&self) -> &'static str {
        "performance"
    }

    fn render(&mut self, surface: &mut Surface, deps: &Self::Deps) {
        let Some(points) = deps else {
            placeholder(surface, "Select a cycle to view performance data.");
            return;
        };
        let plot = self.config.plot_rect();
        let origin = plot.origin();
        let (width, height) = (f64::from(plot.width), f64::from(plot.height));

        let x = LinearScale::new((0.0, finite_max(points.iter().map(|p| p.time))), (0.0, width));
        let y_distance = LinearScale::new(
            (0.0, finite_max(points.iter().map(|p| p.distance)) * HEADROOM),
            (height, 0.0),
        );
        let y_speed = LinearScale::new(
            (0.0, finite_max(points.iter().map(|p| p.speed)) * HEADROOM),
            (height, 0.0),
        );
        let at = |scale: &LinearScale, time: f64, value: f64| {
            origin.offset(x.map(time) as f32, scale.map(value) as f32)
        };

        horizontal_grid(surface.scene_mut(), GRID_LAYER, &y_distance, 6, origin, plot.width);

        let distance: Vec<Point> = points
            .iter()
            .map(|p| at(&y_distance, p.time, p.distance))
            .collect();
        let outline = Curve::MonotoneX.build(&distance);
        let area = surface.insert(Node::new(
            AREA_LAYER,
            Shape::Path {
                points: area_to_baseline(&outline, plot.bottom()),
                closed: true,
                fill: Some(palette::VIOLET.with_alpha(AREA_ALPHA)),
                stroke: None,
            },
        ));
        surface.animate(Transition::new(area, Property::Opacity, 0.0, 1.0, 1000.0));

        let speed: Vec<Point> = points.iter().map(|p| at(&y_speed, p.time, p.speed)).collect();
        add_line(
            surface,
            &speed,
            Curve::MonotoneX,
            StrokeStyle::solid(palette::BLUE, 3.0),
            1500.0,
            None,
        );

        let sampled = points.iter().zip(&speed).step_by(MARKER_EVERY);
        for (i, (point, center)) in sampled.enumerate() {
            if !center.is_finite() {
                continue;
            }
            Marker {
                center: *center,
                color: palette::BLUE,
                rest_radius: 4.0,
                hover_radius: 6.0,
                label: format!("{:.1} km/h", point.speed),
                label_style: Marker::label_style(12.0, palette::BLUE),
                delay_ms: (i as f64).mul_add(200.0, 1500.0),
                duration_ms: 300.0,
            }
            .place(surface, None);
        }

        let scene = surface.scene_mut();
        Axis::linear(Orientation::Bottom, &x, 10).build(
            scene,
            X_AXIS_LAYER,
            origin.offset(0.0, plot.height),
        );
        Axis::linear(Orientation::Left, &y_distance, 6)
            .label_color(palette::VIOLET)
            .build(scene, Y_AXIS_LAYER, origin);
        Axis::linear(Orientation::Right, &y_speed, 6)
            .label_color(palette::BLUE)
            .build(scene, Y_AXIS_LAYER, origin.offset(plot.width, 0.0));

        let middle = plot.height / 2.0;
        title(
            scene,
            TITLE_LAYER,
            "Distance (km)",
            origin.offset(-45.0, middle),
            true,
            palette::VIOLET,
        );
        title(
            scene,
            TITLE_LAYER,
            "Speed (km/h)",
            origin.offset(plot.width + 70.0, middle),
            true,
            palette::BLUE,
        );
        title(
            scene,
            TITLE_LAYER,
            "Time (hours)",
            origin.offset(plot.width / 2.0, plot.height + 50.0),
            false,
            palette::GRAY_700,
        );

        let legend = origin.offset(10.0, 10.0);
        surface.insert(Node::new(
            LEGEND_LAYER,
            Shape::Rect {
                bounds: Rect::new(legend.x, legend.y, 20.0, 12.0),
                radius: CornerRadius::default(),
                style: BoxStyle::fill(palette::VIOLET.with_alpha(AREA_ALPHA)),
            },
        ));
        legend_text(surface, "Distance", legend.offset(25.0, 10.0));
        legend_line(
            surface,
            legend.offset(0.0, 26.0),
            20.0,
            palette::BLUE,
            "Speed",
            legend.offset(25.0, 30.0),
        );
    }
}
