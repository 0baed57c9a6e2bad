//! Mount/update/unmount bridge between a declarative host and an imperative
//! renderer.
//!
//! Works like an effect hook with a dependency list: [`ChartHost::update`]
//! compares the new dependencies with the last rendered ones by value and,
//! only when they differ, tears the surface down completely and renders once.
//! Missing readings arrive as NaN, so float fields of dependency types
//! compare with [`same_value`] rather than `==`.

use crate::event::Event;
use crate::surface::Surface;
use crate::Size;
use tracing::debug;

/// Dependency equality for a float: NaN matches NaN.
#[must_use]
pub fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// An imperative chart renderer driven by a [`ChartHost`].
pub trait Render {
    /// Values that determine what is drawn.
    type Deps: PartialEq + Clone;

    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Draw `deps` into a freshly cleared surface.
    fn render(&mut self, surface: &mut Surface, deps: &Self::Deps);

    /// Release renderer-side state tied to the previous render.
    ///
    /// The surface itself is always reset by the host.
    fn teardown(&mut self) {}

    /// React to pointer input. Returns true if the surface changed.
    ///
    /// The default gives plain hover over markers.
    fn handle_event(&mut self, surface: &mut Surface, event: &Event) -> bool {
        match event {
            Event::MouseMove { position } => surface.hover_at(*position),
            Event::MouseLeave => surface.hover_leave(),
            _ => false,
        }
    }
}

/// Lifecycle phase of a hosted chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Created, nothing rendered yet
    Idle,
    /// Rendered with the current dependencies
    Mounted,
    /// Torn down; the next update renders again
    Unmounted,
}

/// Owns one renderer, its surface and the last rendered dependencies.
#[derive(Debug)]
pub struct ChartHost<R: Render> {
    renderer: R,
    surface: Surface,
    deps: Option<R::Deps>,
    phase: LifecyclePhase,
    render_count: u64,
}

impl<R: Render> ChartHost<R> {
    /// Create a host with an empty surface.
    #[must_use]
    pub fn new(renderer: R, size: Size) -> Self {
        Self::with_surface(renderer, Surface::new(size))
    }

    /// Create a host around a preconfigured surface.
    #[must_use]
    pub fn with_surface(renderer: R, surface: Surface) -> Self {
        Self {
            renderer,
            surface,
            deps: None,
            phase: LifecyclePhase::Idle,
            render_count: 0,
        }
    }

    /// Render if `deps` differs from what was last rendered.
    ///
    /// Returns true if a render pass ran.
    pub fn update(&mut self, deps: R::Deps) -> bool {
        if self.phase == LifecyclePhase::Mounted && self.deps.as_ref() == Some(&deps) {
            return false;
        }
        self.dispose();
        self.renderer.render(&mut self.surface, &deps);
        self.deps = Some(deps);
        self.phase = LifecyclePhase::Mounted;
        self.render_count += 1;
        debug!(
            chart = self.renderer.name(),
            pass = self.render_count,
            nodes = self.surface.scene().len(),
            "render pass"
        );
        true
    }

    /// Tear down everything drawn. The next update always renders.
    pub fn unmount(&mut self) {
        self.dispose();
        self.deps = None;
        self.phase = LifecyclePhase::Unmounted;
    }

    fn dispose(&mut self) {
        self.renderer.teardown();
        self.surface.reset();
    }

    /// Advance animations.
    pub fn tick(&mut self, dt_ms: f64) {
        if self.phase == LifecyclePhase::Mounted {
            self.surface.tick(dt_ms);
        }
    }

    /// Forward pointer input to the renderer. Ignored unless mounted.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        if self.phase != LifecyclePhase::Mounted {
            return false;
        }
        self.renderer.handle_event(&mut self.surface, event)
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Number of render passes so far.
    #[must_use]
    pub const fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Last rendered dependencies.
    #[must_use]
    pub const fn deps(&self) -> Option<&R::Deps> {
        self.deps.as_ref()
    }

    /// The hosted renderer.
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The surface.
    #[must_use]
    pub const fn surface(&self) -> &Surface {
        &self.surface
    }

    /// The surface, mutably.
    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    /// Run `f` with the renderer and its surface, for imperative updates
    /// between render passes.
    pub fn with_renderer<T>(&mut self, f: impl FnOnce(&mut R, &mut Surface) -> T) -> T {
        f(&mut self.renderer, &mut self.surface)
    }
}
