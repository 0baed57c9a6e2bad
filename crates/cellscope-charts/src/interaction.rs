//! Zoom and brush state for the long-term trend chart.
//!
//! The detail view and the overview strip share one x domain. The detail
//! scale is always the base scale rescaled by the current [`ZoomTransform`],
//! so axis ticks are recomputed from the effective domain on every change.
//!
//! Synchronization is one-directional: a brush sets the zoom, but a direct
//! wheel or drag zoom leaves the brush handles where they were.

use crate::error::{ChartError, Result};
use cellscope_core::LinearScale;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Smallest zoom factor.
pub const MIN_ZOOM: f64 = 1.0;
/// Largest zoom factor.
pub const MAX_ZOOM: f64 = 10.0;
/// Wheel delta to log2 zoom factor.
pub const WHEEL_SENSITIVITY: f64 = 0.002;
/// Overview pixels either side of a brush edge that grab the edge.
pub const BRUSH_HANDLE_PX: f64 = 6.0;

// =============================================================================
// ZoomTransform
// =============================================================================

/// Horizontal scale-then-translate transform in plot pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomTransform {
    /// Scale factor
    pub k: f64,
    /// Translation in pixels
    pub x: f64,
}

impl Default for ZoomTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ZoomTransform {
    /// No zoom.
    pub const IDENTITY: Self = Self { k: 1.0, x: 0.0 };

    /// Create a transform.
    #[must_use]
    pub const fn new(k: f64, x: f64) -> Self {
        Self { k, x }
    }

    /// Transform a base pixel into a view pixel.
    #[must_use]
    pub fn apply_x(&self, px: f64) -> f64 {
        self.k.mul_add(px, self.x)
    }

    /// Transform a view pixel back into a base pixel.
    #[must_use]
    pub fn invert_x(&self, px: f64) -> f64 {
        (px - self.x) / self.k
    }

    /// `scale` with its domain narrowed to what is visible under this transform.
    #[must_use]
    pub fn rescale(&self, scale: &LinearScale) -> LinearScale {
        let (r0, r1) = scale.range();
        let d0 = scale.invert(self.invert_x(r0));
        let d1 = scale.invert(self.invert_x(r1));
        scale.with_domain((d0, d1))
    }

    /// Whether this is the identity transform.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.k == 1.0 && self.x == 0.0
    }
}

// =============================================================================
// ViewState
// =============================================================================

/// What last set the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ViewState {
    /// Full extent, no brush
    Idle,
    /// Set by wheel or drag
    Zoomed {
        /// Scale factor
        k: f64,
        /// Translation in pixels
        x: f64,
    },
    /// Set by a brush over `selection`, in domain units
    Brushed {
        /// Brushed domain interval
        selection: (f64, f64),
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    Pan { last_x: f64 },
    /// New brush, or an edge resize with the opposite edge as origin.
    Brush { origin_x: f64 },
    Move { grab_offset: f64, width: f64 },
}

// =============================================================================
// ZoomController
// =============================================================================

/// Owns the zoom transform and brush selection of one trend chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoomController {
    base: LinearScale,
    overview: LinearScale,
    transform: ZoomTransform,
    brush: Option<(f64, f64)>,
    state: ViewState,
    drag: Option<Drag>,
}

impl ZoomController {
    /// Create a controller for a detail scale and its overview scale.
    ///
    /// Both scales are expected to share a domain and start their range at 0.
    #[must_use]
    pub fn new(base: LinearScale, overview: LinearScale) -> Self {
        Self {
            base,
            overview,
            transform: ZoomTransform::IDENTITY,
            brush: None,
            state: ViewState::Idle,
            drag: None,
        }
    }

    /// Current transform.
    #[must_use]
    pub const fn transform(&self) -> ZoomTransform {
        self.transform
    }

    /// What last set the view.
    #[must_use]
    pub const fn state(&self) -> ViewState {
        self.state
    }

    /// Brush handles in domain units, if a brush is drawn.
    #[must_use]
    pub const fn brush_selection(&self) -> Option<(f64, f64)> {
        self.brush
    }

    /// Brush handles in overview pixels.
    #[must_use]
    pub fn brush_pixels(&self) -> Option<(f64, f64)> {
        self.brush.map(|(a, b)| (self.overview.map(a), self.overview.map(b)))
    }

    /// Unzoomed detail scale.
    #[must_use]
    pub const fn base_scale(&self) -> &LinearScale {
        &self.base
    }

    /// Overview scale.
    #[must_use]
    pub const fn overview_scale(&self) -> &LinearScale {
        &self.overview
    }

    /// Detail scale under the current transform.
    #[must_use]
    pub fn detail_scale(&self) -> LinearScale {
        self.transform.rescale(&self.base)
    }

    /// Domain interval visible in the detail view.
    #[must_use]
    pub fn visible_domain(&self) -> (f64, f64) {
        self.detail_scale().domain()
    }

    fn width(&self) -> f64 {
        let (r0, r1) = self.base.range();
        (r1 - r0).abs()
    }

    /// Clamp scale to the zoom extent and translation to the data extent.
    fn constrain(&self, t: ZoomTransform) -> ZoomTransform {
        let k = if t.k.is_finite() {
            t.k.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            MAX_ZOOM
        };
        let w = self.width();
        let x = if t.x.is_finite() { t.x } else { 0.0 };
        ZoomTransform::new(k, x.clamp(w - k * w, 0.0))
    }

    fn set_zoomed(&mut self, t: ZoomTransform) {
        self.transform = self.constrain(t);
        self.state = if self.transform.is_identity() && self.brush.is_none() {
            ViewState::Idle
        } else {
            ViewState::Zoomed {
                k: self.transform.k,
                x: self.transform.x,
            }
        };
        trace!(k = self.transform.k, x = self.transform.x, "zoom updated");
    }

    /// Zoom by `factor` keeping the detail pixel `anchor_x` fixed.
    pub fn zoom_by(&mut self, factor: f64, anchor_x: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let t = self.transform;
        let k = (t.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        let base_anchor = t.invert_x(anchor_x);
        self.set_zoomed(ZoomTransform::new(k, k.mul_add(-base_anchor, anchor_x)));
    }

    /// Wheel zoom; negative `delta_y` zooms in.
    pub fn wheel(&mut self, delta_y: f64, anchor_x: f64) {
        self.zoom_by((-delta_y * WHEEL_SENSITIVITY).exp2(), anchor_x);
    }

    /// Pan by `dx` detail pixels.
    pub fn pan_by(&mut self, dx: f64) {
        let t = self.transform;
        self.set_zoomed(ZoomTransform::new(t.k, t.x + dx));
    }

    /// Brush the domain interval `[a, b]`, making it fill the detail width.
    ///
    /// The scale factor is clamped to the zoom extent, so a very narrow brush
    /// shows a window starting at `a` one tenth of the full width wide.
    pub fn brush_domain(&mut self, a: f64, b: f64) -> Result<ZoomTransform> {
        let (x0, x1) = (self.base.map(a), self.base.map(b));
        if !(x0.is_finite() && x1.is_finite()) || x1 - x0 <= 0.0 {
            return Err(ChartError::EmptyBrush);
        }
        let k = (self.width() / (x1 - x0)).clamp(MIN_ZOOM, MAX_ZOOM);
        self.transform = self.constrain(ZoomTransform::new(k, -k * x0));
        self.brush = Some((a, b));
        self.state = ViewState::Brushed { selection: (a, b) };
        trace!(a, b, k = self.transform.k, x = self.transform.x, "brush applied");
        Ok(self.transform)
    }

    /// Brush an interval given in overview pixels.
    pub fn brush_pixels_to(&mut self, px0: f64, px1: f64) -> Result<ZoomTransform> {
        let (lo, hi) = self.overview_extent();
        let (p0, p1) = (px0.min(px1).clamp(lo, hi), px0.max(px1).clamp(lo, hi));
        self.brush_domain(self.overview.invert(p0), self.overview.invert(p1))
    }

    fn overview_extent(&self) -> (f64, f64) {
        let (lo, hi) = self.overview.range();
        (lo.min(hi), lo.max(hi))
    }

    /// Remove the brush handles, keeping the zoom they produced.
    pub fn clear_brush(&mut self) {
        self.brush = None;
        let t = self.transform;
        self.set_zoomed(t);
    }

    /// Back to the full extent.
    pub fn reset(&mut self) {
        self.transform = ZoomTransform::IDENTITY;
        self.brush = None;
        self.state = ViewState::Idle;
        self.drag = None;
    }

    // -------------------------------------------------------------------------
    // Pointer drags
    // -------------------------------------------------------------------------

    /// Start panning the detail view at pixel `x`.
    pub fn begin_pan(&mut self, x: f64) {
        self.drag = Some(Drag::Pan { last_x: x });
    }

    /// Start drawing a brush in the overview at pixel `x`.
    pub fn begin_brush(&mut self, x: f64) {
        self.drag = Some(Drag::Brush { origin_x: x });
    }

    /// Start a drag in the overview at pixel `x`.
    ///
    /// Near a brush edge the edge follows the pointer, inside the brush the
    /// whole selection moves, anywhere else a new brush is drawn.
    pub fn begin_overview_drag(&mut self, x: f64) {
        let drag = match self.brush_pixels() {
            Some((p0, p1)) => {
                let (to_start, to_end) = ((x - p0).abs(), (x - p1).abs());
                if to_start.min(to_end) <= BRUSH_HANDLE_PX {
                    let origin_x = if to_start <= to_end { p1 } else { p0 };
                    trace!(origin_x, "brush edge grabbed");
                    Drag::Brush { origin_x }
                } else if x > p0 && x < p1 {
                    Drag::Move {
                        grab_offset: x - p0,
                        width: p1 - p0,
                    }
                } else {
                    Drag::Brush { origin_x: x }
                }
            }
            None => Drag::Brush { origin_x: x },
        };
        self.drag = Some(drag);
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether the drag in progress is in the overview strip.
    #[must_use]
    pub const fn is_brushing(&self) -> bool {
        matches!(self.drag, Some(Drag::Brush { .. } | Drag::Move { .. }))
    }

    /// Pointer moved to pixel `x` during a drag. Returns true if the view
    /// changed.
    pub fn drag_to(&mut self, x: f64) -> bool {
        match self.drag {
            Some(Drag::Pan { last_x }) => {
                let before = self.transform;
                self.pan_by(x - last_x);
                self.drag = Some(Drag::Pan { last_x: x });
                before != self.transform
            }
            Some(Drag::Brush { origin_x }) => self.brush_pixels_to(origin_x, x).is_ok(),
            Some(Drag::Move { grab_offset, width }) => self.move_brush(x - grab_offset, width),
            None => false,
        }
    }

    fn move_brush(&mut self, start: f64, width: f64) -> bool {
        let (lo, hi) = self.overview_extent();
        let start = start.min(hi - width).max(lo);
        if self.brush_pixels().is_some_and(|(p0, _)| (p0 - start).abs() < 1e-9) {
            return false;
        }
        self.brush_pixels_to(start, start + width).is_ok()
    }

    /// Drag released at pixel `x`. Returns true if the view changed.
    ///
    /// Releasing a brush without width clears the handles and leaves the
    /// zoom untouched.
    pub fn end_drag(&mut self, x: f64) -> bool {
        let changed = match self.drag {
            Some(Drag::Brush { origin_x }) => {
                if self.brush_pixels_to(origin_x, x).is_err() {
                    trace!("empty brush released");
                    let had_brush = self.brush.is_some();
                    self.clear_brush();
                    had_brush
                } else {
                    true
                }
            }
            Some(Drag::Pan { .. } | Drag::Move { .. }) => self.drag_to(x),
            None => false,
        };
        self.drag = None;
        changed
    }
}
