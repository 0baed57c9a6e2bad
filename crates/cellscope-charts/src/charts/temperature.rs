//! Minutes spent in each temperature range.

use super::{
    finite_max, placeholder, SERIES_LAYER, TITLE_LAYER, VALUE_LAYER, X_AXIS_LAYER, Y_AXIS_LAYER,
};
use crate::binning::{temperature_color, TemperatureBin};
use crate::config::RenderConfig;
use cellscope_core::axis::title;
use cellscope_core::{
    palette, Axis, BandScale, BoxStyle, CornerRadius, FontWeight, HoverSpec, LinearScale, Node,
    Orientation, Property, Rect, Render, Shape, Surface, TextAnchor, TextStyle, Transition,
};

const BAND_PADDING: f64 = 0.2;
const GROW_MS: f64 = 750.0;

/// Histogram of time spent per temperature bin.
#[derive(Debug, Clone)]
pub struct TemperatureChart {
    config: RenderConfig,
}

impl TemperatureChart {
    /// Create with a layout.
    #[must_use]
    pub const fn new(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl Render for TemperatureChart {
    type Deps = Option<Vec<TemperatureBin>>;

    fn name(&self) -> &'static str {
        "temperature"
    }

    fn render(&mut self, surface: &mut Surface, deps: &Self::Deps) {
        let Some(bins) = deps else {
            placeholder(surface, "Select a cycle to view temperature distribution.");
            return;
        };
        let plot = self.config.plot_rect();
        let origin = plot.origin();
        let (width, height) = (f64::from(plot.width), f64::from(plot.height));

        let x = BandScale::new(bins.iter().map(|b| b.range.as_str()), (0.0, width), BAND_PADDING);
        let y = LinearScale::new((0.0, finite_max(bins.iter().map(|b| b.minutes))), (height, 0.0))
            .nice(10);
        let bandwidth = x.bandwidth() as f32;

        for (i, bin) in bins.iter().enumerate() {
            let top = y.map(bin.minutes) as f32;
            let bar_height = (plot.height - top).max(0.0);
            let left = origin.x + x.band_start(i) as f32;
            let bar = surface.insert(
                Node::new(
                    SERIES_LAYER,
                    Shape::Rect {
                        bounds: Rect::new(left, origin.y + top, bandwidth, bar_height),
                        radius: CornerRadius::uniform(4.0),
                        style: BoxStyle::fill(temperature_color(bin.range_start)),
                    },
                )
                .with_hover(HoverSpec::Highlight {
                    rest_opacity: 1.0,
                    hover_opacity: 0.8,
                }),
            );
            let settles =
                surface.animate(Transition::new(bar, Property::Height, 0.0, bar_height, GROW_MS));
            if let Some(node) = surface.scene_mut().get_mut(bar) {
                node.interactive_after_ms = settles;
            }

            let style = TextStyle::new(11.0, palette::GRAY_800)
                .weight(FontWeight::Semibold)
                .anchor(TextAnchor::Middle);
            let label = surface.insert(Node::new(
                VALUE_LAYER,
                Shape::text(
                    format!("{:.1}", bin.minutes),
                    origin.offset(x.band_center(i) as f32, top - 5.0),
                    style,
                ),
            ));
            surface.animate(Transition::new(label, Property::Opacity, 0.0, 1.0, GROW_MS));
        }

        let scene = surface.scene_mut();
        Axis::band(Orientation::Bottom, &x, (0.0, width))
            .rotate_labels(-45.0)
            .build(scene, X_AXIS_LAYER, origin.offset(0.0, plot.height));
        Axis::linear(Orientation::Left, &y, 6).build(scene, Y_AXIS_LAYER, origin);

        title(
            scene,
            TITLE_LAYER,
            "Temperature Range (°C)",
            origin.offset(plot.width / 2.0, plot.height + 55.0),
            false,
            palette::GRAY_700,
        );
        title(
            scene,
            TITLE_LAYER,
            "Time (minutes)",
            origin.offset(-45.0, plot.height / 2.0),
            true,
            palette::GRAY_700,
        );
    }
}
