//! Long-term SOH trend with zoom, pan and an overview brush.
//!
//! The detail view and its x axis are drawn from the controller's current
//! detail scale. Any view change clears and rebuilds just those layers, in
//! their settled state, so pending entry tweens on the old nodes are dropped.

use super::{
    add_line, finite_max, finite_min, placeholder, Marker, GRID_LAYER, MARKER_LAYER, SERIES_LAYER,
    TITLE_LAYER, X_AXIS_LAYER, Y_AXIS_LAYER,
};
use crate::config::RenderConfig;
use crate::interaction::ZoomController;
use crate::record::CycleList;
use cellscope_core::axis::{horizontal_grid, title};
use cellscope_core::{
    palette, same_value, Axis, BoxStyle, Color, CornerRadius, Curve, Event, LinearScale,
    MouseButton, Node, Orientation, Point, Rect, Render, Shape, StrokeStyle, Surface,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Overview strip background and line.
pub const OVERVIEW_LAYER: &str = "overview";
/// Brush selection drawn over the overview.
pub const BRUSH_LAYER: &str = "brush";

/// Gap between the detail plot's bottom margin and the overview strip.
const OVERVIEW_GAP: f32 = 60.0;
const REVEAL_MS: f64 = 2000.0;

/// One cycle on the trend line.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Cycle number
    pub cycle_number: u32,
    /// Average SOH of the cycle, %
    pub soh: f64,
}

impl PartialEq for TrendPoint {
    fn eq(&self, other: &Self) -> bool {
        self.cycle_number == other.cycle_number && same_value(self.soh, other.soh)
    }
}

/// Trend points of `cycles` in ascending cycle order.
#[must_use]
pub fn trend_points(cycles: &CycleList) -> Vec<TrendPoint> {
    cycles
        .sorted_by_cycle()
        .into_iter()
        .map(|r| TrendPoint {
            cycle_number: r.cycle_number,
            soh: r.average_soh,
        })
        .collect()
}

/// Marker color for an SOH value.
#[must_use]
pub fn soh_color(soh: f64) -> Color {
    if soh >= 95.0 {
        palette::GREEN
    } else if soh >= 90.0 {
        palette::AMBER
    } else {
        palette::RED
    }
}

/// Where the plot and the overview strip sit on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frame {
    plot: Rect,
    overview: Rect,
}

/// SOH across cycles, with a zoomable detail view above an overview strip.
#[derive(Debug, Clone)]
pub struct TrendChart {
    config: RenderConfig,
    points: Vec<TrendPoint>,
    y: LinearScale,
    controller: Option<ZoomController>,
}

impl TrendChart {
    /// Create with a layout.
    #[must_use]
    pub const fn new(config: RenderConfig) -> Self {
        Self {
            config,
            points: Vec::new(),
            y: LinearScale::new((0.0, 1.0), (0.0, 1.0)),
            controller: None,
        }
    }

    /// Zoom state of the current render, if any data is drawn.
    #[must_use]
    pub const fn controller(&self) -> Option<&ZoomController> {
        self.controller.as_ref()
    }

    fn frame(&self) -> Frame {
        let plot = self.config.plot_rect();
        let top = self.config.size.height - self.config.margin.bottom + OVERVIEW_GAP;
        Frame {
            plot,
            overview: Rect::new(plot.x, top, plot.width, self.config.overview_height),
        }
    }

    /// Brush the cycle interval `[a, b]` as if dragged in the overview.
    ///
    /// Returns false if nothing is drawn or the interval is empty.
    pub fn brush(&mut self, surface: &mut Surface, a: f64, b: f64) -> bool {
        let Some(controller) = self.controller.as_mut() else {
            return false;
        };
        if let Err(err) = controller.brush_domain(a, b) {
            debug!(a, b, %err, "brush ignored");
            return false;
        }
        self.redraw_view(surface);
        true
    }

    /// Return to the full cycle range.
    pub fn reset_zoom(&mut self, surface: &mut Surface) {
        if let Some(controller) = self.controller.as_mut() {
            controller.reset();
            self.redraw_view(surface);
        }
    }

    fn draw_detail(&self, surface: &mut Surface, scale: &LinearScale, animate: bool) {
        let frame = self.frame();
        let origin = frame.plot.origin();
        let pixels: Vec<Point> = self
            .points
            .iter()
            .map(|p| {
                origin.offset(
                    scale.map(f64::from(p.cycle_number)) as f32,
                    self.y.map(p.soh) as f32,
                )
            })
            .collect();

        let reveal_ms = if animate { REVEAL_MS } else { 0.0 };
        add_line(
            surface,
            &pixels,
            Curve::MonotoneX,
            StrokeStyle::solid(palette::AMBER, 3.0),
            reveal_ms,
            Some(frame.plot),
        );

        for (i, (point, center)) in self.points.iter().zip(&pixels).enumerate() {
            if !center.is_finite() {
                continue;
            }
            let (delay_ms, duration_ms) = if animate {
                ((i as f64).mul_add(10.0, REVEAL_MS), 300.0)
            } else {
                (0.0, 0.0)
            };
            Marker {
                center: *center,
                color: soh_color(point.soh),
                rest_radius: 3.0,
                hover_radius: 6.0,
                label: format!("Cycle {}: {:.2}%", point.cycle_number, point.soh),
                label_style: Marker::label_style(11.0, palette::GRAY_800),
                delay_ms,
                duration_ms,
            }
            .place(surface, Some(frame.plot));
        }

        Axis::linear(Orientation::Bottom, scale, 10).build(
            surface.scene_mut(),
            X_AXIS_LAYER,
            origin.offset(0.0, frame.plot.height),
        );
    }

    fn draw_brush(&self, surface: &mut Surface) {
        let pixels = self.controller.as_ref().and_then(ZoomController::brush_pixels);
        let Some((px0, px1)) = pixels else {
            return;
        };
        let overview = self.frame().overview;
        surface.insert(Node::new(
            BRUSH_LAYER,
            Shape::Rect {
                bounds: Rect::new(
                    overview.x + px0 as f32,
                    overview.y,
                    (px1 - px0) as f32,
                    overview.height,
                ),
                radius: CornerRadius::default(),
                style: BoxStyle::fill(palette::GRAY_500.with_alpha(0.3))
                    .with_stroke(StrokeStyle::solid(Color::WHITE, 1.0)),
            },
        ));
    }

    fn redraw_view(&self, surface: &mut Surface) {
        let Some(scale) = self.controller.as_ref().map(ZoomController::detail_scale) else {
            return;
        };
        for layer in [SERIES_LAYER, MARKER_LAYER, X_AXIS_LAYER, BRUSH_LAYER] {
            surface.clear_layer(layer);
        }
        self.draw_detail(surface, &scale, false);
        self.draw_brush(surface);
    }

    fn draw_overview(&self, surface: &mut Surface, scale: &LinearScale) {
        let overview = self.frame().overview;
        let y = LinearScale::new(self.y.domain(), (f64::from(overview.height), 0.0));
        surface.insert(Node::new(
            OVERVIEW_LAYER,
            Shape::Rect {
                bounds: overview,
                radius: CornerRadius::uniform(4.0),
                style: BoxStyle::fill(palette::GRAY_100),
            },
        ));
        let pixels: Vec<Point> = self
            .points
            .iter()
            .map(|p| {
                overview
                    .origin()
                    .offset(scale.map(f64::from(p.cycle_number)) as f32, y.map(p.soh) as f32)
            })
            .collect();
        surface.insert(Node::new(
            OVERVIEW_LAYER,
            Shape::line(Curve::MonotoneX.build(&pixels), StrokeStyle::solid(palette::INDIGO, 2.0)),
        ));
    }
}

impl Render for TrendChart {
    type Deps = Option<Vec<TrendPoint>>;

    fn name(&self) -> &'static str {
        "long-term-trend"
    }

    fn render(&mut self, surface: &mut Surface, deps: &Self::Deps) {
        let Some(points) = deps else {
            placeholder(surface, "Select a battery to view long-term SOH trends.");
            return;
        };
        if points.is_empty() {
            placeholder(surface, "No cycle data available for long-term analysis.");
            return;
        }
        self.points.clone_from(points);
        self.points.sort_by_key(|p| p.cycle_number);

        let frame = self.frame();
        let origin = frame.plot.origin();
        let width = f64::from(frame.plot.width);
        let max_cycle = self.points.last().map_or(0.0, |p| f64::from(p.cycle_number));
        let x = LinearScale::new((0.0, max_cycle), (0.0, width));
        let lo = finite_min(self.points.iter().map(|p| p.soh));
        let hi = finite_max(self.points.iter().map(|p| p.soh));
        self.y = LinearScale::new((lo - 1.0, hi + 1.0), (f64::from(frame.plot.height), 0.0));

        let controller = ZoomController::new(x, x);
        let scale = controller.detail_scale();
        self.controller = Some(controller);

        horizontal_grid(surface.scene_mut(), GRID_LAYER, &self.y, 10, origin, frame.plot.width);
        self.draw_detail(surface, &scale, true);

        let scene = surface.scene_mut();
        Axis::linear(Orientation::Left, &self.y, 10).build(scene, Y_AXIS_LAYER, origin);
        title(
            scene,
            TITLE_LAYER,
            "Cycle Number",
            origin.offset(frame.plot.width / 2.0, frame.plot.height + 50.0),
            false,
            palette::GRAY_700,
        );
        title(
            scene,
            TITLE_LAYER,
            "State of Health (%)",
            origin.offset(-45.0, frame.plot.height / 2.0),
            true,
            palette::GRAY_700,
        );

        self.draw_overview(surface, &x);
    }

    fn teardown(&mut self) {
        self.controller = None;
        self.points.clear();
    }

    fn handle_event(&mut self, surface: &mut Surface, event: &Event) -> bool {
        let frame = self.frame();
        let Some(controller) = self.controller.as_mut() else {
            return false;
        };
        let changed = match *event {
            Event::Scroll { position, delta_y } => {
                let before = controller.transform();
                controller.wheel(f64::from(delta_y), f64::from(position.x - frame.plot.x));
                before != controller.transform()
            }
            Event::MouseDown {
                position,
                button: MouseButton::Left,
            } => {
                if frame.overview.contains_point(&position) {
                    controller.begin_overview_drag(f64::from(position.x - frame.overview.x));
                } else if frame.plot.contains_point(&position) {
                    controller.begin_pan(f64::from(position.x));
                }
                false
            }
            Event::MouseMove { position } if controller.is_dragging() => {
                let x = drag_x(controller, &frame, position);
                controller.drag_to(x)
            }
            Event::MouseUp {
                position,
                button: MouseButton::Left,
            } if controller.is_dragging() => {
                let x = drag_x(controller, &frame, position);
                controller.end_drag(x)
            }
            Event::MouseMove { position } => return surface.hover_at(position),
            Event::MouseLeave => return surface.hover_leave(),
            _ => false,
        };
        if changed {
            self.redraw_view(surface);
        }
        changed
    }
}

/// Pointer x in the coordinates of the drag in progress: overview pixels
/// while brushing, surface pixels while panning.
fn drag_x(controller: &ZoomController, frame: &Frame, position: Point) -> f64 {
    if controller.is_brushing() {
        f64::from(position.x - frame.overview.x)
    } else {
        f64::from(position.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::PLACEHOLDER_LAYER;
    use cellscope_core::hover::TOOLTIP_LAYER;
    use cellscope_core::{ChartHost, HoverSpec};

    fn points(n: u32) -> Vec<TrendPoint> {
        (1..=n)
            .map(|c| TrendPoint {
                cycle_number: c,
                soh: 100.0 - f64::from(c) * 0.2,
            })
            .collect()
    }

    fn host() -> ChartHost<TrendChart> {
        let config = RenderConfig::trend();
        ChartHost::new(TrendChart::new(config), config.surface_size())
    }

    #[test]
    fn test_soh_color_bands() {
        assert_eq!(soh_color(97.0), palette::GREEN);
        assert_eq!(soh_color(95.0), palette::GREEN);
        assert_eq!(soh_color(92.0), palette::AMBER);
        assert_eq!(soh_color(80.0), palette::RED);
    }

    #[test]
    fn test_placeholders() {
        let mut host = host();
        host.update(None);
        assert_eq!(
            host.surface().scene().texts(PLACEHOLDER_LAYER),
            vec!["Select a battery to view long-term SOH trends."]
        );
        host.update(Some(Vec::new()));
        assert_eq!(
            host.surface().scene().texts(PLACEHOLDER_LAYER),
            vec!["No cycle data available for long-term analysis."]
        );
        assert!(host.renderer().controller().is_none());
    }

    #[test]
    fn test_points_sorted_for_drawing() {
        let mut shuffled = points(5);
        shuffled.reverse();
        let mut host = host();
        host.update(Some(shuffled));
        let labels: Vec<String> = host
            .surface()
            .scene()
            .layer(MARKER_LAYER)
            .filter_map(|(_, n)| match &n.hover {
                Some(HoverSpec::Marker { label, .. }) => Some(label.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels[0], "Cycle 1: 99.80%");
        assert_eq!(labels[4], "Cycle 5: 99.00%");
    }

    #[test]
    fn test_overview_strip_below_plot() {
        let mut host = host();
        host.update(Some(points(50)));
        let (_, background) = host.surface().scene().layer(OVERVIEW_LAYER).next().unwrap();
        match background.shape {
            Shape::Rect { bounds, .. } => assert_eq!(bounds, Rect::new(60.0, 460.0, 810.0, 50.0)),
            _ => panic!("Expected Rect shape"),
        }
    }

    #[test]
    fn test_programmatic_brush_zooms_detail() {
        let mut host = host();
        host.update(Some(points(50)));
        let applied = host.with_renderer(|chart, surface| chart.brush(surface, 10.0, 20.0));
        assert!(applied);

        let controller = host.renderer().controller().unwrap();
        let (d0, d1) = controller.visible_domain();
        assert!((d0 - 10.0).abs() < 1e-9);
        assert!((d1 - 20.0).abs() < 1e-9);
        assert_eq!(host.surface().scene().count_layer(BRUSH_LAYER), 1);
        let labels = host.surface().scene().texts(X_AXIS_LAYER);
        assert_eq!(labels.first().map(String::as_str), Some("10"));
    }

    #[test]
    fn test_empty_brush_ignored() {
        let mut host = host();
        host.update(Some(points(50)));
        assert!(!host.with_renderer(|chart, surface| chart.brush(surface, 20.0, 20.0)));
        assert_eq!(host.surface().scene().count_layer(BRUSH_LAYER), 0);
    }

    #[test]
    fn test_wheel_zooms_and_rerender_resets() {
        let mut host = host();
        host.update(Some(points(50)));
        let wheel = Event::Scroll {
            position: Point::new(465.0, 200.0),
            delta_y: -500.0,
        };
        assert!(host.handle_event(&wheel));
        let k = host.renderer().controller().unwrap().transform().k;
        assert!(k > 1.0);

        host.update(Some(points(51)));
        assert!(host.renderer().controller().unwrap().transform().is_identity());
    }

    #[test]
    fn test_overview_drag_brushes() {
        let mut host = host();
        host.update(Some(points(50)));
        // Cycle 10 and 20 in overview pixels: 162 and 324.
        let y = 485.0;
        let down = Event::MouseDown {
            position: Point::new(60.0 + 162.0, y),
            button: MouseButton::Left,
        };
        let moved = Event::MouseMove {
            position: Point::new(60.0 + 324.0, y),
        };
        let up = Event::MouseUp {
            position: Point::new(60.0 + 324.0, y),
            button: MouseButton::Left,
        };
        assert!(!host.handle_event(&down));
        assert!(host.handle_event(&moved));
        assert!(host.handle_event(&up));

        let (d0, d1) = host.renderer().controller().unwrap().visible_domain();
        assert!((d0 - 10.0).abs() < 1e-6);
        assert!((d1 - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_drops_tooltip() {
        let mut host = host();
        host.update(Some(points(50)));
        host.tick(5000.0);
        let center = host
            .surface()
            .scene()
            .layer(MARKER_LAYER)
            .find_map(|(_, n)| match (&n.hover, &n.shape) {
                (Some(HoverSpec::Marker { label, .. }), Shape::Circle { center, .. })
                    if label.starts_with("Cycle 25:") =>
                {
                    Some(*center)
                }
                _ => None,
            })
            .unwrap();
        assert!(host.handle_event(&Event::MouseMove { position: center }));
        assert_eq!(host.surface().scene().count_layer(TOOLTIP_LAYER), 1);

        assert!(host.with_renderer(|chart, surface| chart.brush(surface, 30.0, 40.0)));
        assert_eq!(host.surface().scene().count_layer(TOOLTIP_LAYER), 0);
        assert!(host.surface().hover().active().is_none());
    }
}
