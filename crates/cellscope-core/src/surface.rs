//! A chart's drawing surface: scene, animation clock and hover state.

use crate::animation::{Timeline, Transition};
use crate::draw::DrawCommand;
use crate::hover::HoverState;
use crate::scene::{Node, NodeId, Scene};
use crate::{Point, Size};

/// Everything one chart instance draws into and reacts with.
///
/// Owned exclusively by one chart host; nothing is shared between charts.
#[derive(Debug, Default)]
pub struct Surface {
    size: Size,
    scene: Scene,
    timeline: Timeline,
    hover: HoverState,
}

impl Surface {
    /// Create an empty surface of the given size.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Turn entry animations on or off for future renders.
    #[must_use]
    pub fn with_animations(mut self, enabled: bool) -> Self {
        self.timeline.set_enabled(enabled);
        self
    }

    /// Surface size in pixels.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Resize. Takes effect on the next render.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// The retained scene.
    #[must_use]
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The retained scene, mutably.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Animation clock.
    #[must_use]
    pub const fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Hover state.
    #[must_use]
    pub const fn hover(&self) -> &HoverState {
        &self.hover
    }

    /// Current surface time in ms.
    #[must_use]
    pub const fn now_ms(&self) -> f64 {
        self.timeline.now_ms()
    }

    /// Add a node on top of the scene.
    pub fn insert(&mut self, node: Node) -> NodeId {
        self.scene.insert(node)
    }

    /// Queue a transition. Returns the time it settles.
    pub fn animate(&mut self, transition: Transition) -> f64 {
        let settles = self.timeline.settle_time(&transition);
        self.timeline.schedule(&mut self.scene, transition);
        settles
    }

    /// Remove one layer and drop hover if its target went with it.
    pub fn clear_layer(&mut self, layer: &str) -> usize {
        let removed = self.scene.remove_layer(layer);
        self.hover.reconcile(&mut self.scene);
        removed
    }

    /// Dispose of everything drawn: nodes, pending animations, hover.
    pub fn reset(&mut self) {
        self.scene.clear();
        self.timeline.reset();
        self.hover.clear();
    }

    /// Advance animations by `dt_ms`.
    pub fn tick(&mut self, dt_ms: f64) {
        self.timeline.advance(&mut self.scene, dt_ms);
    }

    /// Jump all pending animations to their end.
    pub fn finish_animations(&mut self) {
        self.timeline.finish(&mut self.scene);
    }

    /// Update hover for a pointer at `point`.
    pub fn hover_at(&mut self, point: Point) -> bool {
        let now = self.timeline.now_ms();
        self.hover.pointer_moved(&mut self.scene, point, now)
    }

    /// Pointer left: clear hover.
    pub fn hover_leave(&mut self) -> bool {
        self.hover.leave(&mut self.scene)
    }

    /// Paint the scene into a display list.
    #[must_use]
    pub fn display_list(&self) -> Vec<DrawCommand> {
        self.scene.display_list()
    }
}
