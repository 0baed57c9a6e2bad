//! Pointer hover over data markers.
//!
//! A surface has at most one hovered node. Entering a new node always restores
//! the previous one and removes every tooltip first, so two tooltips can never
//! be visible at once.

use crate::draw::TextStyle;
use crate::scene::{Node, NodeId, Property, Scene, Shape};
use crate::Point;
use serde::{Deserialize, Serialize};

/// Layer holding the floating tooltip label.
pub const TOOLTIP_LAYER: &str = "tooltip";

/// Vertical distance from a marker's center to its tooltip baseline.
pub const TOOLTIP_OFFSET: f32 = 15.0;

/// How a node reacts to the pointer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HoverSpec {
    /// Circle marker: grows and shows a label above itself
    Marker {
        /// Radius when not hovered
        rest_radius: f32,
        /// Radius while hovered
        hover_radius: f32,
        /// Tooltip text
        label: String,
        /// Tooltip style
        label_style: TextStyle,
    },
    /// Any node: changes opacity while hovered
    Highlight {
        /// Opacity when not hovered
        rest_opacity: f32,
        /// Opacity while hovered
        hover_opacity: f32,
    },
}

/// The currently hovered node of one surface.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct HoverState {
    active: Option<NodeId>,
}

impl HoverState {
    /// Create with nothing hovered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently hovered node.
    #[must_use]
    pub const fn active(&self) -> Option<NodeId> {
        self.active
    }

    /// Update hover for a pointer at `point`. Returns true if anything changed.
    pub fn pointer_moved(&mut self, scene: &mut Scene, point: Point, now_ms: f64) -> bool {
        match scene.hit_test(point, now_ms) {
            Some(id) => self.enter(scene, id),
            None => self.leave(scene),
        }
    }

    /// Hover `id`, leaving whatever was hovered before.
    ///
    /// Returns false if `id` is already hovered or has no hover behavior.
    pub fn enter(&mut self, scene: &mut Scene, id: NodeId) -> bool {
        if self.active == Some(id) {
            return false;
        }
        let Some(spec) = scene.get(id).and_then(|n| n.hover.clone()) else {
            return false;
        };
        self.leave(scene);

        match spec {
            HoverSpec::Marker {
                hover_radius,
                label,
                label_style,
                ..
            } => {
                let center = scene.get_mut(id).and_then(|node| {
                    node.set_property(Property::Radius, hover_radius);
                    match node.shape {
                        Shape::Circle { center, .. } => Some(center),
                        _ => None,
                    }
                });
                if let Some(center) = center {
                    scene.insert(Node::new(
                        TOOLTIP_LAYER,
                        Shape::text(label, center.offset(0.0, -TOOLTIP_OFFSET), label_style),
                    ));
                }
            }
            HoverSpec::Highlight { hover_opacity, .. } => {
                if let Some(node) = scene.get_mut(id) {
                    node.set_property(Property::Opacity, hover_opacity);
                }
            }
        }
        self.active = Some(id);
        true
    }

    /// Restore the hovered node and remove all tooltips.
    ///
    /// Returns false if nothing was hovered.
    pub fn leave(&mut self, scene: &mut Scene) -> bool {
        let Some(id) = self.active.take() else {
            return false;
        };
        if let Some(node) = scene.get_mut(id) {
            match node.hover.clone() {
                Some(HoverSpec::Marker { rest_radius, .. }) => {
                    node.set_property(Property::Radius, rest_radius);
                }
                Some(HoverSpec::Highlight { rest_opacity, .. }) => {
                    node.set_property(Property::Opacity, rest_opacity);
                }
                None => {}
            }
        }
        scene.remove_layer(TOOLTIP_LAYER);
        true
    }

    /// Forget the hovered node if it no longer exists, removing its tooltip.
    pub fn reconcile(&mut self, scene: &mut Scene) {
        if let Some(id) = self.active {
            if !scene.contains(id) {
                self.active = None;
                scene.remove_layer(TOOLTIP_LAYER);
            }
        }
    }

    /// Forget the hovered node without touching the scene.
    pub fn clear(&mut self) {
        self.active = None;
    }
}
