//! SOC and SOH progression across one cycle.

use super::{
    add_line, legend_line, placeholder, Marker, GRID_LAYER, TITLE_LAYER, X_AXIS_LAYER,
    Y_AXIS_LAYER,
};
use crate::config::RenderConfig;
use crate::synthetic::{HealthSeries, SeriesPoint, HEALTH_POINTS};
use cellscope_core::axis::{horizontal_grid, title};
use cellscope_core::{
    palette, Axis, Color, Curve, LinearScale, Orientation, Point, Render, StrokeStyle, Surface,
};

/// Labels of the five progression stages.
pub const HEALTH_X_LABELS: [&str; HEALTH_POINTS] = ["Start", "25%", "50%", "75%", "End"];

const REVEAL_MS: f64 = 1500.0;
const MARKER_STAGGER_MS: f64 = 300.0;

/// Two-line chart of state of charge and state of health.
#[derive(Debug, Clone)]
pub struct HealthChart {
    config: RenderConfig,
}

impl HealthChart {
    /// Create with a layout.
    #[must_use]
    pub const fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    fn draw_series(
        surface: &mut Surface,
        points: &[SeriesPoint],
        color: Color,
        (x, y): (&LinearScale, &LinearScale),
        origin: Point,
    ) {
        let pixels: Vec<Point> = points
            .iter()
            .map(|p| origin.offset(x.map(p.x) as f32, y.map(p.y) as f32))
            .collect();
        add_line(surface, &pixels, Curve::Linear, StrokeStyle::solid(color, 3.0), REVEAL_MS, None);

        for (i, (point, center)) in points.iter().zip(&pixels).enumerate() {
            if !center.is_finite() {
                continue;
            }
            Marker {
                center: *center,
                color,
                rest_radius: 5.0,
                hover_radius: 7.0,
                label: format!("{:.1}%", point.y),
                label_style: Marker::label_style(12.0, color),
                delay_ms: (i as f64).mul_add(MARKER_STAGGER_MS, REVEAL_MS),
                duration_ms: 300.0,
            }
            .place(surface, None);
        }
    }
}

impl Render for HealthChart {
    type Deps = Option<HealthSeries>;

    fn name(&self) -> &'static str {
        "battery-health"
    }

    fn render(&mut self, surface: &mut Surface, deps: &Self::Deps) {
        let Some(series) = deps else {
            placeholder(surface, "Select a cycle to view battery health trends.");
            return;
        };
        let plot = self.config.plot_rect();
        let origin = plot.origin();
        let (width, height) = (f64::from(plot.width), f64::from(plot.height));
        let x = LinearScale::new((0.0, (HEALTH_POINTS - 1) as f64), (0.0, width));
        let y = LinearScale::new((0.0, 100.0), (height, 0.0));

        horizontal_grid(surface.scene_mut(), GRID_LAYER, &y, 10, origin, plot.width);

        Self::draw_series(surface, &series.soc, palette::GREEN, (&x, &y), origin);
        Self::draw_series(surface, &series.soh, palette::AMBER, (&x, &y), origin);

        let scene = surface.scene_mut();
        Axis::linear_with(Orientation::Bottom, &x, HEALTH_POINTS, |tick| {
            if tick.value.fract() != 0.0 || tick.value < 0.0 {
                return None;
            }
            HEALTH_X_LABELS.get(tick.value as usize).map(ToString::to_string)
        })
        .build(scene, X_AXIS_LAYER, origin.offset(0.0, plot.height));
        Axis::linear(Orientation::Left, &y, 10).build(scene, Y_AXIS_LAYER, origin);

        title(
            scene,
            TITLE_LAYER,
            "Percentage (%)",
            origin.offset(-45.0, plot.height / 2.0),
            true,
            palette::GRAY_700,
        );
        title(
            scene,
            TITLE_LAYER,
            "Cycle Progress",
            origin.offset(plot.width / 2.0, plot.height + 50.0),
            false,
            palette::GRAY_700,
        );

        let legend = origin.offset(plot.width - 120.0, 0.0);
        legend_line(surface, legend, 30.0, palette::GREEN, "SOC", legend.offset(35.0, 5.0));
        legend_line(
            surface,
            legend.offset(0.0, 20.0),
            30.0,
            palette::AMBER,
            "SOH",
            legend.offset(35.0, 25.0),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{LEGEND_LAYER, MARKER_LAYER, PLACEHOLDER_LAYER, SERIES_LAYER};
    use crate::record::CycleRecord;
    use crate::synthetic::health_series;
    use cellscope_core::hover::TOOLTIP_LAYER;
    use cellscope_core::{ChartHost, Shape};

    fn series() -> HealthSeries {
        health_series(&CycleRecord {
            average_soc: 70.0,
            min_soc: 20.0,
            max_soc: 95.0,
            average_soh: 97.0,
            min_soh: 96.5,
            max_soh: 97.6,
            soh_drop: 0.4,
            ..CycleRecord::default()
        })
    }

    fn host() -> ChartHost<HealthChart> {
        let config = RenderConfig::health();
        ChartHost::new(HealthChart::new(config), config.surface_size())
    }

    #[test]
    fn test_placeholder_without_record() {
        let mut host = host();
        host.update(None);
        assert_eq!(
            host.surface().scene().texts(PLACEHOLDER_LAYER),
            vec!["Select a cycle to view battery health trends."]
        );
        assert_eq!(host.surface().scene().count_layer(SERIES_LAYER), 0);
    }

    #[test]
    fn test_two_lines_ten_markers() {
        let mut host = host();
        host.update(Some(series()));
        let scene = host.surface().scene();
        assert_eq!(scene.count_layer(SERIES_LAYER), 2);
        assert_eq!(scene.count_layer(MARKER_LAYER), 10);
        assert_eq!(scene.texts(LEGEND_LAYER), vec!["SOC", "SOH"]);
        assert_eq!(scene.texts(TITLE_LAYER), vec!["Percentage (%)", "Cycle Progress"]);
        let x_labels: Vec<String> = scene.texts(X_AXIS_LAYER);
        assert_eq!(x_labels, HEALTH_X_LABELS.map(String::from).to_vec());
    }

    #[test]
    fn test_marker_positions() {
        let mut host = host();
        host.update(Some(series()));
        let centers: Vec<Point> = host
            .surface()
            .scene()
            .layer(MARKER_LAYER)
            .filter_map(|(_, n)| match n.shape {
                Shape::Circle { center, .. } => Some(center),
                _ => None,
            })
            .collect();
        // Plot is 560 x 310 starting at (60, 30).
        assert_eq!(centers[0], Point::new(60.0, 278.0));
        assert_eq!(centers[4].x, 620.0);
    }

    #[test]
    fn test_hover_after_entry() {
        let mut host = host();
        host.update(Some(series()));
        // First SOC marker sits at (60, 278).
        let at = Point::new(60.0, 278.0);
        assert!(!host.surface_mut().hover_at(at));
        host.tick(1800.0);
        assert!(host.surface_mut().hover_at(at));
        assert_eq!(host.surface().scene().texts(TOOLTIP_LAYER), vec!["20.0%"]);
    }

    #[test]
    fn test_nan_point_skipped() {
        let mut series = series();
        series.soc[2].y = f64::NAN;
        let mut host = host();
        host.update(Some(series));
        assert_eq!(host.surface().scene().count_layer(MARKER_LAYER), 9);
    }
}
