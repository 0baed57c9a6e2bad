//! Retained scene: the node list a chart renderer rebuilds on every pass.
//!
//! Nodes are grouped by layer name (`"grid"`, `"x-axis"`, `"markers"`, ...)
//! so interaction code can drop and redraw one layer without touching the
//! rest. [`NodeId`]s are invalidated by removal and by [`Scene::clear`]; a
//! stale id simply resolves to `None`.

use crate::canvas::{Canvas, RecordingCanvas};
use crate::curve;
use crate::draw::{BoxStyle, DrawCommand, StrokeStyle, TextStyle};
use crate::hover::HoverSpec;
use crate::{Color, CornerRadius, Point, Rect};
use serde::{Deserialize, Serialize};

/// Handle to a node in a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    epoch: u32,
    serial: u64,
}

/// Geometry and paint of a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Rectangle
    Rect {
        /// Bounds
        bounds: Rect,
        /// Corner radius
        radius: CornerRadius,
        /// Fill and stroke
        style: BoxStyle,
    },
    /// Circle
    Circle {
        /// Center
        center: Point,
        /// Radius
        radius: f32,
        /// Fill and stroke
        style: BoxStyle,
    },
    /// Polyline or polygon
    Path {
        /// Vertices
        points: Vec<Point>,
        /// Close back to the first vertex
        closed: bool,
        /// Interior fill
        fill: Option<Color>,
        /// Outline
        stroke: Option<StrokeStyle>,
    },
    /// Text run
    Text {
        /// Content
        content: String,
        /// Anchor position
        position: Point,
        /// Style
        style: TextStyle,
    },
}

impl Shape {
    /// Stroked open polyline.
    #[must_use]
    pub fn line(points: Vec<Point>, stroke: StrokeStyle) -> Self {
        Self::Path {
            points,
            closed: false,
            fill: None,
            stroke: Some(stroke),
        }
    }

    /// Text at a position.
    #[must_use]
    pub fn text(content: impl Into<String>, position: Point, style: TextStyle) -> Self {
        Self::Text {
            content: content.into(),
            position,
            style,
        }
    }

    fn contains(&self, point: &Point) -> bool {
        match self {
            Self::Rect { bounds, .. } => bounds.contains_point(point),
            Self::Circle {
                center,
                radius,
                style,
            } => {
                let half_stroke = style.stroke.as_ref().map_or(0.0, |s| s.width / 2.0);
                *radius > 0.0 && center.distance(point) <= radius + half_stroke
            }
            Self::Path { .. } | Self::Text { .. } => false,
        }
    }
}

/// Animatable node properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Property {
    /// Node opacity, 0..1
    Opacity,
    /// Drawn fraction of a path's length, 0..1
    Reveal,
    /// Circle radius
    Radius,
    /// Rect height, grown upward from a fixed bottom edge
    Height,
}

/// A scene node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Layer name used for bulk removal
    pub layer: String,
    /// Geometry and paint
    pub shape: Shape,
    /// Opacity, 0..1
    pub opacity: f32,
    /// Drawn fraction of a path, 0..1
    pub reveal: f32,
    /// Optional clip rectangle
    pub clip: Option<Rect>,
    /// Hover behavior, if the node reacts to the pointer
    pub hover: Option<HoverSpec>,
    /// Surface time in ms before which the node ignores the pointer
    pub interactive_after_ms: f64,
}

impl Node {
    /// Fully opaque, fully revealed node on `layer`.
    #[must_use]
    pub fn new(layer: impl Into<String>, shape: Shape) -> Self {
        Self {
            layer: layer.into(),
            shape,
            opacity: 1.0,
            reveal: 1.0,
            clip: None,
            hover: None,
            interactive_after_ms: 0.0,
        }
    }

    /// Set opacity.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Set the clip rectangle.
    #[must_use]
    pub fn with_clip(mut self, clip: Rect) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Attach hover behavior.
    #[must_use]
    pub fn with_hover(mut self, hover: HoverSpec) -> Self {
        self.hover = Some(hover);
        self
    }

    /// Ignore the pointer until the given surface time.
    #[must_use]
    pub fn interactive_after(mut self, ms: f64) -> Self {
        self.interactive_after_ms = ms;
        self
    }

    /// Current value of an animatable property, if the shape has it.
    #[must_use]
    pub fn property(&self, property: Property) -> Option<f32> {
        match (property, &self.shape) {
            (Property::Opacity, _) => Some(self.opacity),
            (Property::Reveal, Shape::Path { .. }) => Some(self.reveal),
            (Property::Radius, Shape::Circle { radius, .. }) => Some(*radius),
            (Property::Height, Shape::Rect { bounds, .. }) => Some(bounds.height),
            _ => None,
        }
    }

    /// Set an animatable property. Returns false if the shape lacks it.
    pub fn set_property(&mut self, property: Property, value: f32) -> bool {
        match (property, &mut self.shape) {
            (Property::Opacity, _) => self.opacity = value.clamp(0.0, 1.0),
            (Property::Reveal, Shape::Path { .. }) => self.reveal = value.clamp(0.0, 1.0),
            (Property::Radius, Shape::Circle { radius, .. }) => *radius = value.max(0.0),
            (Property::Height, Shape::Rect { bounds, .. }) => {
                let bottom = bounds.bottom();
                bounds.height = value.max(0.0);
                bounds.y = bottom - bounds.height;
            }
            _ => return false,
        }
        true
    }

    fn hit(&self, point: &Point, now_ms: f64) -> bool {
        self.hover.is_some()
            && now_ms >= self.interactive_after_ms
            && self.clip.is_none_or(|c| c.contains_point(point))
            && self.shape.contains(point)
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if self.opacity <= 0.0 {
            return;
        }
        if let Some(clip) = self.clip {
            canvas.push_clip(clip);
        }
        let faded = self.opacity < 1.0;
        if faded {
            canvas.push_opacity(self.opacity);
        }

        match &self.shape {
            Shape::Rect {
                bounds,
                radius,
                style,
            } => {
                if bounds.width > 0.0 && bounds.height > 0.0 {
                    canvas.draw_rect(*bounds, *radius, style);
                }
            }
            Shape::Circle {
                center,
                radius,
                style,
            } => {
                if *radius > 0.0 {
                    canvas.draw_circle(*center, *radius, style);
                }
            }
            Shape::Path {
                points,
                closed,
                fill,
                stroke,
            } => {
                if self.reveal >= 1.0 {
                    canvas.draw_path(points, *closed, *fill, stroke.as_ref());
                } else if self.reveal > 0.0 {
                    let partial = curve::reveal(points, self.reveal);
                    canvas.draw_path(&partial, false, None, stroke.as_ref());
                }
            }
            Shape::Text {
                content,
                position,
                style,
            } => canvas.draw_text(content, *position, style),
        }

        if faded {
            canvas.pop_opacity();
        }
        if self.clip.is_some() {
            canvas.pop_clip();
        }
    }
}

/// Ordered collection of nodes, painted in insertion order.
///
/// Nodes are kept sorted by serial so removal drops them outright while
/// the ids of the survivors stay valid.
#[derive(Debug, Default)]
pub struct Scene {
    epoch: u32,
    next_serial: u64,
    nodes: Vec<(u64, Node)>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every node and invalidate every outstanding id.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.next_serial = 0;
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Append a node on top of everything drawn so far.
    pub fn insert(&mut self, node: Node) -> NodeId {
        let serial = self.next_serial;
        self.next_serial += 1;
        self.nodes.push((serial, node));
        self.id(serial)
    }

    const fn id(&self, serial: u64) -> NodeId {
        NodeId {
            epoch: self.epoch,
            serial,
        }
    }

    fn position(&self, id: NodeId) -> Option<usize> {
        if id.epoch != self.epoch {
            return None;
        }
        self.nodes.binary_search_by_key(&id.serial, |(s, _)| *s).ok()
    }

    /// Look up a live node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.position(id).map(|i| &self.nodes[i].1)
    }

    /// Look up a live node mutably.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.position(id).map(|i| &mut self.nodes[i].1)
    }

    /// Whether `id` still refers to a live node.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.position(id).is_some()
    }

    /// Remove one node. Returns false if it was already gone.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(i) = self.position(id) else {
            return false;
        };
        self.nodes.remove(i);
        true
    }

    /// Remove every node on `layer`. Returns how many were removed.
    pub fn remove_layer(&mut self, layer: &str) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|(_, n)| n.layer != layer);
        before - self.nodes.len()
    }

    /// Number of live nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no live nodes remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Live nodes in paint order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().map(|(serial, node)| (self.id(*serial), node))
    }

    /// Live nodes on one layer, in paint order.
    pub fn layer<'a>(&'a self, layer: &'a str) -> impl Iterator<Item = (NodeId, &'a Node)> + 'a {
        self.iter().filter(move |(_, n)| n.layer == layer)
    }

    /// Number of live nodes on `layer`.
    #[must_use]
    pub fn count_layer(&self, layer: &str) -> usize {
        self.layer(layer).count()
    }

    /// Topmost hoverable node under `point` at surface time `now_ms`.
    #[must_use]
    pub fn hit_test(&self, point: Point, now_ms: f64) -> Option<NodeId> {
        self.nodes
            .iter()
            .rev()
            .find(|(_, n)| n.hit(&point, now_ms))
            .map(|(serial, _)| self.id(*serial))
    }

    /// Paint every live node into `canvas`.
    pub fn paint(&self, canvas: &mut dyn Canvas) {
        for (_, node) in &self.nodes {
            node.paint(canvas);
        }
    }

    /// Paint into a fresh display list.
    #[must_use]
    pub fn display_list(&self) -> Vec<DrawCommand> {
        let mut canvas = RecordingCanvas::new();
        self.paint(&mut canvas);
        canvas.take_commands()
    }

    /// Text content of every live text node on `layer`.
    #[must_use]
    pub fn texts(&self, layer: &str) -> Vec<String> {
        self.layer(layer)
            .filter_map(|(_, n)| match &n.shape {
                Shape::Text { content, .. } => Some(content.clone()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot(layer: &str, x: f32, r: f32) -> Node {
        Node::new(
            layer,
            Shape::Circle {
                center: Point::new(x, 10.0),
                radius: r,
                style: BoxStyle::fill(Color::BLACK),
            },
        )
        .with_hover(HoverSpec::Highlight {
            rest_opacity: 1.0,
            hover_opacity: 0.8,
        })
    }

    // =========================================================================
    // Ids and removal
    // =========================================================================

    #[test]
    fn test_clear_invalidates_ids() {
        let mut scene = Scene::new();
        let id = scene.insert(dot("markers", 0.0, 3.0));
        assert!(scene.contains(id));
        scene.clear();
        assert!(!scene.contains(id));
        assert!(scene.get_mut(id).is_none());
        let fresh = scene.insert(dot("markers", 0.0, 3.0));
        assert_ne!(fresh, id);
        assert!(!scene.contains(id));
    }

    #[test]
    fn test_remove_layer() {
        let mut scene = Scene::new();
        let a = scene.insert(dot("markers", 0.0, 3.0));
        scene.insert(dot("markers", 5.0, 3.0));
        let grid = scene.insert(Node::new("grid", Shape::line(vec![], StrokeStyle::default())));
        assert_eq!(scene.remove_layer("markers"), 2);
        assert!(!scene.contains(a));
        assert!(scene.contains(grid));
        assert_eq!(scene.len(), 1);
        assert!(!scene.remove(a));
    }

    #[test]
    fn test_redrawn_layer_does_not_accumulate() {
        let mut scene = Scene::new();
        let grid = scene.insert(Node::new("grid", Shape::line(vec![], StrokeStyle::default())));
        for round in 0..1000 {
            scene.remove_layer("markers");
            for i in 0..100 {
                scene.insert(dot("markers", (round + i) as f32, 3.0));
            }
        }
        assert_eq!(scene.len(), 101);
        assert_eq!(scene.nodes.len(), 101);
        assert!(scene.contains(grid));
        assert_eq!(scene.iter().next().map(|(id, _)| id), Some(grid));
    }

    #[test]
    fn test_ids_survive_removal_of_others() {
        let mut scene = Scene::new();
        let a = scene.insert(dot("markers", 0.0, 3.0));
        let b = scene.insert(dot("markers", 5.0, 3.0));
        let c = scene.insert(dot("brush", 10.0, 3.0));
        assert!(scene.remove(b));
        scene.remove_layer("brush");
        let d = scene.insert(dot("brush", 15.0, 3.0));
        assert!(scene.contains(a));
        assert!(!scene.contains(b) && !scene.contains(c));
        assert_ne!(d, c);
        let order: Vec<NodeId> = scene.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![a, d]);
        assert_eq!(scene.hit_test(Point::new(15.0, 10.0), 0.0), Some(d));
    }

    #[test]
    fn test_count_layer_and_texts() {
        let mut scene = Scene::new();
        scene.insert(Node::new(
            "tooltip",
            Shape::text("95.0%", Point::ORIGIN, TextStyle::default()),
        ));
        assert_eq!(scene.count_layer("tooltip"), 1);
        assert_eq!(scene.texts("tooltip"), vec!["95.0%".to_string()]);
    }

    // =========================================================================
    // Properties
    // =========================================================================

    #[test]
    fn test_height_grows_from_bottom() {
        let mut node = Node::new(
            "bars",
            Shape::Rect {
                bounds: Rect::new(0.0, 300.0, 20.0, 0.0),
                radius: CornerRadius::ZERO,
                style: BoxStyle::default(),
            },
        );
        assert!(node.set_property(Property::Height, 120.0));
        match node.shape {
            Shape::Rect { bounds, .. } => {
                assert_eq!(bounds.y, 180.0);
                assert_eq!(bounds.bottom(), 300.0);
            }
            _ => panic!("Expected Rect shape"),
        }
    }

    #[test]
    fn test_property_mismatch() {
        let mut node = dot("markers", 0.0, 3.0);
        assert!(!node.set_property(Property::Height, 1.0));
        assert_eq!(node.property(Property::Reveal), None);
        assert_eq!(node.property(Property::Radius), Some(3.0));
    }

    // =========================================================================
    // Hit testing
    // =========================================================================

    #[test]
    fn test_hit_test_topmost() {
        let mut scene = Scene::new();
        scene.insert(dot("a", 10.0, 5.0));
        let top = scene.insert(dot("b", 12.0, 5.0));
        assert_eq!(scene.hit_test(Point::new(11.0, 10.0), 0.0), Some(top));
        assert_eq!(scene.hit_test(Point::new(100.0, 10.0), 0.0), None);
    }

    #[test]
    fn test_hit_test_waits_for_entry() {
        let mut scene = Scene::new();
        let id = scene.insert(dot("a", 10.0, 5.0).interactive_after(1800.0));
        assert_eq!(scene.hit_test(Point::new(10.0, 10.0), 1000.0), None);
        assert_eq!(scene.hit_test(Point::new(10.0, 10.0), 1800.0), Some(id));
    }

    #[test]
    fn test_hit_test_respects_clip_and_zero_radius() {
        let mut scene = Scene::new();
        scene.insert(dot("a", 10.0, 5.0).with_clip(Rect::new(20.0, 0.0, 10.0, 10.0)));
        scene.insert(dot("b", 50.0, 0.0));
        assert_eq!(scene.hit_test(Point::new(10.0, 10.0), 0.0), None);
        assert_eq!(scene.hit_test(Point::new(50.0, 10.0), 0.0), None);
    }

    // =========================================================================
    // Painting
    // =========================================================================

    #[test]
    fn test_paint_skips_invisible() {
        let mut scene = Scene::new();
        scene.insert(dot("a", 0.0, 0.0));
        scene.insert(dot("b", 0.0, 3.0).with_opacity(0.0));
        assert!(scene.display_list().is_empty());
    }

    #[test]
    fn test_paint_partial_reveal() {
        let mut scene = Scene::new();
        let mut node = Node::new(
            "line",
            Shape::line(
                vec![Point::ORIGIN, Point::new(100.0, 0.0)],
                StrokeStyle::default(),
            ),
        );
        node.set_property(Property::Reveal, 0.25);
        scene.insert(node);
        match &scene.display_list()[0] {
            DrawCommand::Path { points, .. } => assert_eq!(points[1], Point::new(25.0, 0.0)),
            _ => panic!("Expected Path command"),
        }
    }

    #[test]
    fn test_paint_clip_and_opacity_wrap() {
        let mut scene = Scene::new();
        scene.insert(
            dot("a", 0.0, 3.0)
                .with_opacity(0.5)
                .with_clip(Rect::new(0.0, 0.0, 10.0, 10.0)),
        );
        let list = scene.display_list();
        assert_eq!(list.len(), 1);
        assert!(matches!(list[0], DrawCommand::Clip { .. }));
        assert_eq!(list[0].leaf_count(), 1);
    }
}
