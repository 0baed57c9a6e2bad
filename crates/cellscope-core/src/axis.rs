//! Axis and grid construction from scales.
//!
//! Axes are built into a scene layer so a zoom can drop and rebuild exactly
//! the axis whose scale changed.

use crate::color::palette;
use crate::draw::{FontWeight, StrokeStyle, TextAnchor, TextStyle};
use crate::scale::{BandScale, LinearScale, Tick};
use crate::scene::{Node, Scene, Shape};
use crate::{Color, Point};

/// Tick mark length in pixels.
pub const TICK_SIZE: f32 = 6.0;
/// Gap between a tick mark and its label.
const LABEL_GAP: f32 = 3.0;

/// Which side of the plot an axis sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Horizontal, ticks pointing down
    Bottom,
    /// Vertical, ticks pointing left
    Left,
    /// Vertical, ticks pointing right
    Right,
}

/// A tick placed along an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    /// Offset along the axis in pixels, relative to the axis origin
    pub offset: f32,
    /// Label text
    pub label: String,
}

/// An axis ready to be built into a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    orientation: Orientation,
    span: (f32, f32),
    ticks: Vec<AxisTick>,
    label_style: TextStyle,
    rotation: f32,
}

impl Axis {
    /// Axis for a linear scale with about `count` ticks.
    #[must_use]
    pub fn linear(orientation: Orientation, scale: &LinearScale, count: usize) -> Self {
        Self::linear_with(orientation, scale, count, |tick| Some(tick.label.clone()))
    }

    /// Axis for a linear scale with custom tick labels.
    ///
    /// Ticks for which `format` returns `None` are omitted.
    #[must_use]
    pub fn linear_with<F>(
        orientation: Orientation,
        scale: &LinearScale,
        count: usize,
        format: F,
    ) -> Self
    where
        F: Fn(&Tick) -> Option<String>,
    {
        let ticks = scale
            .tick_labels(count)
            .iter()
            .filter_map(|tick| {
                format(tick).map(|label| AxisTick {
                    offset: scale.map(tick.value) as f32,
                    label,
                })
            })
            .collect();
        Self::from_parts(orientation, scale.range(), ticks)
    }

    /// Axis with one tick centered on each band.
    #[must_use]
    pub fn band(orientation: Orientation, scale: &BandScale, range: (f64, f64)) -> Self {
        let ticks = scale
            .labels()
            .iter()
            .enumerate()
            .map(|(i, label)| AxisTick {
                offset: scale.band_center(i) as f32,
                label: label.clone(),
            })
            .collect();
        Self::from_parts(orientation, range, ticks)
    }

    fn from_parts(orientation: Orientation, range: (f64, f64), ticks: Vec<AxisTick>) -> Self {
        let anchor = match orientation {
            Orientation::Bottom => TextAnchor::Middle,
            Orientation::Left => TextAnchor::End,
            Orientation::Right => TextAnchor::Start,
        };
        Self {
            orientation,
            span: (range.0.min(range.1) as f32, range.0.max(range.1) as f32),
            ticks,
            label_style: TextStyle::new(12.0, palette::GRAY_600).anchor(anchor),
            rotation: 0.0,
        }
    }

    /// Override the tick label color.
    #[must_use]
    pub fn label_color(mut self, color: Color) -> Self {
        self.label_style.color = color;
        self
    }

    /// Rotate tick labels, anchoring them at their end.
    #[must_use]
    pub fn rotate_labels(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self.label_style = self.label_style.anchor(TextAnchor::End).rotated(degrees);
        self
    }

    /// Placed ticks.
    #[must_use]
    pub fn ticks(&self) -> &[AxisTick] {
        &self.ticks
    }

    /// Tick labels in order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.ticks.iter().map(|t| t.label.as_str()).collect()
    }

    /// Insert the domain line, tick marks and labels on `layer`.
    ///
    /// `origin` is where offset zero of the axis sits on the surface.
    pub fn build(&self, scene: &mut Scene, layer: &str, origin: Point) {
        let stroke = StrokeStyle::solid(Color::BLACK, 1.0);
        let (lo, hi) = self.span;
        let across = match self.orientation {
            Orientation::Left => -TICK_SIZE,
            Orientation::Bottom | Orientation::Right => TICK_SIZE,
        };

        scene.insert(Node::new(
            layer,
            Shape::line(
                vec![
                    self.outward(self.along(origin, lo), across),
                    self.along(origin, lo),
                    self.along(origin, hi),
                    self.outward(self.along(origin, hi), across),
                ],
                stroke.clone(),
            ),
        ));

        for tick in &self.ticks {
            let base = self.along(origin, tick.offset);
            scene.insert(Node::new(
                layer,
                Shape::line(vec![base, self.outward(base, across)], stroke.clone()),
            ));
            let gap = across + across.signum() * LABEL_GAP;
            let position = match self.orientation {
                Orientation::Bottom if self.rotation != 0.0 => base.offset(-8.0, gap + 2.0),
                Orientation::Bottom => base.offset(0.0, gap + self.label_style.size * 0.71),
                Orientation::Left | Orientation::Right => {
                    base.offset(gap, self.label_style.size * 0.32)
                }
            };
            scene.insert(Node::new(
                layer,
                Shape::text(tick.label.clone(), position, self.label_style.clone()),
            ));
        }
    }

    fn along(&self, origin: Point, offset: f32) -> Point {
        match self.orientation {
            Orientation::Bottom => origin.offset(offset, 0.0),
            Orientation::Left | Orientation::Right => origin.offset(0.0, offset),
        }
    }

    fn outward(&self, point: Point, distance: f32) -> Point {
        match self.orientation {
            Orientation::Bottom => point.offset(0.0, distance),
            Orientation::Left | Orientation::Right => point.offset(distance, 0.0),
        }
    }
}

/// Horizontal grid lines at the ticks of a vertical scale.
///
/// Lines are drawn in black at 10% opacity across `width` pixels.
pub fn horizontal_grid(
    scene: &mut Scene,
    layer: &str,
    scale: &LinearScale,
    count: usize,
    origin: Point,
    width: f32,
) {
    for value in scale.ticks(count) {
        let y = scale.map(value) as f32;
        scene.insert(
            Node::new(
                layer,
                Shape::line(
                    vec![origin.offset(0.0, y), origin.offset(width, y)],
                    StrokeStyle::solid(Color::BLACK, 1.0),
                ),
            )
            .with_opacity(0.1),
        );
    }
}

/// Axis title text, optionally rotated to run bottom-to-top.
pub fn title(
    scene: &mut Scene,
    layer: &str,
    text: &str,
    position: Point,
    vertical: bool,
    color: Color,
) {
    let mut style = TextStyle::new(14.0, color)
        .weight(FontWeight::Semibold)
        .anchor(TextAnchor::Middle);
    if vertical {
        style = style.rotated(-90.0);
    }
    scene.insert(Node::new(layer, Shape::text(text, position, style)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_axis_ticks() {
        let scale = LinearScale::new((0.0, 100.0), (310.0, 0.0));
        let axis = Axis::linear(Orientation::Left, &scale, 10);
        assert_eq!(axis.ticks().len(), 11);
        assert_eq!(axis.ticks()[0].offset, 310.0);
        assert_eq!(axis.labels()[10], "100");
    }

    #[test]
    fn test_linear_with_custom_labels() {
        const NAMES: [&str; 5] = ["Start", "25%", "50%", "75%", "End"];
        let scale = LinearScale::new((0.0, 4.0), (0.0, 560.0));
        let axis = Axis::linear_with(Orientation::Bottom, &scale, 5, |t| {
            let i = t.value as usize;
            (t.value.fract() == 0.0).then(|| NAMES.get(i).map(ToString::to_string)).flatten()
        });
        assert_eq!(axis.labels(), NAMES.to_vec());
    }

    #[test]
    fn test_band_axis_centers() {
        let scale = BandScale::new(["10-20", "20-30"], (0.0, 200.0), 0.2);
        let axis = Axis::band(Orientation::Bottom, &scale, (0.0, 200.0)).rotate_labels(-45.0);
        assert_eq!(axis.labels(), vec!["10-20", "20-30"]);
        assert!((axis.ticks()[0].offset - scale.band_center(0) as f32).abs() < 1e-4);
    }

    #[test]
    fn test_build_inserts_domain_ticks_and_labels() {
        let scale = LinearScale::new((0.0, 10.0), (0.0, 100.0));
        let axis = Axis::linear(Orientation::Bottom, &scale, 2);
        let mut scene = Scene::new();
        axis.build(&mut scene, "x-axis", Point::new(60.0, 330.0));
        // domain + (tick line + label) per tick
        assert_eq!(scene.count_layer("x-axis"), 1 + 2 * axis.ticks().len());
        assert_eq!(scene.texts("x-axis"), vec!["0", "5", "10"]);
    }

    #[test]
    fn test_vertical_title_rotated() {
        let mut scene = Scene::new();
        title(
            &mut scene,
            "titles",
            "Percentage (%)",
            Point::new(15.0, 185.0),
            true,
            palette::GRAY_700,
        );
        let (_, node) = scene.layer("titles").next().unwrap();
        match &node.shape {
            Shape::Text { style, .. } => {
                assert_eq!(style.rotation, -90.0);
                assert_eq!(style.weight, FontWeight::Semibold);
            }
            _ => panic!("Expected Text shape"),
        }
    }

    #[test]
    fn test_grid_is_faint() {
        let scale = LinearScale::new((0.0, 100.0), (310.0, 0.0));
        let mut scene = Scene::new();
        horizontal_grid(&mut scene, "grid", &scale, 10, Point::ORIGIN, 580.0);
        assert_eq!(scene.count_layer("grid"), 11);
        assert!(scene.layer("grid").all(|(_, n)| (n.opacity - 0.1).abs() < 1e-6));
    }
}
