//! Entry animations as a deterministic timer queue.
//!
//! A [`Timeline`] owns the surface clock. Renderers schedule
//! [`Transition`]s with a fixed delay and duration; the host drives the clock
//! with [`Timeline::advance`]. A transition whose target node has been torn
//! down is dropped on the next tick, never reported as an error.

use crate::scene::{NodeId, Property, Scene};
use tracing::trace;

// =============================================================================
// Easing
// =============================================================================

/// Monotonic easing curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (no easing)
    Linear,
    /// Quadratic ease out (slow end)
    EaseOut,
    /// Cubic ease in and out, the default for entry transitions
    #[default]
    CubicInOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => (1.0 - t).mul_add(-(1.0 - t), 1.0),
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0f64).mul_add(t, 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

// =============================================================================
// Transition
// =============================================================================

/// One property tween on one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// Node to animate
    pub target: NodeId,
    /// Property to animate
    pub property: Property,
    /// Starting value, applied when scheduled
    pub from: f32,
    /// Final value
    pub to: f32,
    /// Wait before starting, in ms
    pub delay_ms: f64,
    /// Tween length, in ms
    pub duration_ms: f64,
    /// Easing curve
    pub easing: Easing,
}

impl Transition {
    /// Tween `property` of `target` from `from` to `to` over `duration_ms`.
    #[must_use]
    pub fn new(target: NodeId, property: Property, from: f32, to: f32, duration_ms: f64) -> Self {
        Self {
            target,
            property,
            from,
            to,
            delay_ms: 0.0,
            duration_ms,
            easing: Easing::default(),
        }
    }

    /// Set the start delay.
    #[must_use]
    pub fn delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    /// Set the easing curve.
    #[must_use]
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Surface time at which the tween reaches its final value.
    #[must_use]
    pub fn end_offset_ms(&self) -> f64 {
        self.delay_ms + self.duration_ms.max(0.0)
    }

    fn value_at(&self, elapsed_ms: f64) -> f32 {
        let t = if self.duration_ms <= 0.0 {
            1.0
        } else {
            elapsed_ms / self.duration_ms
        };
        let eased = self.easing.apply(t) as f32;
        (self.to - self.from).mul_add(eased, self.from)
    }
}

#[derive(Debug, Clone)]
struct Scheduled {
    transition: Transition,
    start_ms: f64,
}

// =============================================================================
// Timeline
// =============================================================================

/// Clock plus pending transitions for one surface.
#[derive(Debug, Clone)]
pub struct Timeline {
    now_ms: f64,
    pending: Vec<Scheduled>,
    enabled: bool,
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl Timeline {
    /// Create an enabled timeline at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            pending: Vec::new(),
            enabled: true,
        }
    }

    /// A timeline that lands every transition on its final value immediately.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new()
        }
    }

    /// Whether transitions animate.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable animation for future transitions.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Current surface time in ms.
    #[must_use]
    pub const fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Number of transitions not yet finished.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is left to animate.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Surface time at which a transition scheduled now would finish.
    ///
    /// Renderers use this to gate hover until a marker's entry completes.
    #[must_use]
    pub fn settle_time(&self, transition: &Transition) -> f64 {
        if self.enabled {
            self.now_ms + transition.end_offset_ms()
        } else {
            self.now_ms
        }
    }

    /// Apply the starting value now and queue the tween.
    ///
    /// With animation disabled the final value is applied instead.
    pub fn schedule(&mut self, scene: &mut Scene, transition: Transition) {
        let Some(node) = scene.get_mut(transition.target) else {
            trace!(
                property = ?transition.property,
                "transition target missing at schedule, dropped"
            );
            return;
        };
        if !self.enabled {
            node.set_property(transition.property, transition.to);
            return;
        }
        node.set_property(transition.property, transition.from);
        self.pending.push(Scheduled {
            transition,
            start_ms: self.now_ms,
        });
    }

    /// Move the clock forward by `dt_ms` and apply every active tween.
    pub fn advance(&mut self, scene: &mut Scene, dt_ms: f64) {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.now_ms += dt_ms;
        }
        let now = self.now_ms;
        self.pending.retain(|scheduled| {
            let t = &scheduled.transition;
            let Some(node) = scene.get_mut(t.target) else {
                trace!(property = ?t.property, "transition target torn down, dropped");
                return false;
            };
            let elapsed = now - scheduled.start_ms - t.delay_ms;
            if elapsed < 0.0 {
                return true;
            }
            node.set_property(t.property, t.value_at(elapsed));
            elapsed < t.duration_ms
        });
    }

    /// Jump every pending tween to its final value.
    pub fn finish(&mut self, scene: &mut Scene) {
        for scheduled in self.pending.drain(..) {
            let t = scheduled.transition;
            if let Some(node) = scene.get_mut(t.target) {
                node.set_property(t.property, t.to);
            }
        }
    }

    /// Drop all pending tweens and rewind the clock.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.now_ms = 0.0;
    }
}
