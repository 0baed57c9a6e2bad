//! Core rendering types for Cellscope charts.
//!
//! This crate provides the pieces every chart is assembled from:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`], [`Margin`]
//! - Color representation: [`Color`] and the dashboard [`palette`]
//! - Scales and ticks: [`LinearScale`], [`BandScale`], [`Axis`]
//! - A retained scene with timer-queue animation and hover: [`Surface`]
//! - The mount/update/unmount adapter: [`ChartHost`] driving a [`Render`]
//!
//! Rendering is a full rebuild into a [`Scene`]; the scene is then painted
//! into a [`DrawCommand`] display list that a platform blitter replays.

pub mod animation;
pub mod axis;
pub mod canvas;
mod color;
pub mod curve;
pub mod draw;
mod event;
mod geometry;
pub mod hover;
pub mod lifecycle;
pub mod scale;
pub mod scene;
pub mod surface;

pub use animation::{Easing, Timeline, Transition};
pub use axis::{Axis, AxisTick, Orientation};
pub use canvas::{Canvas, RecordingCanvas};
pub use color::{palette, Color, ColorParseError};
pub use curve::Curve;
pub use draw::{
    BoxStyle, DrawCommand, FontWeight, LineCap, LineJoin, StrokeStyle, TextAnchor, TextStyle,
};
pub use event::{Event, MouseButton};
pub use geometry::{CornerRadius, Margin, Point, Rect, Size};
pub use hover::{HoverSpec, HoverState};
pub use lifecycle::{same_value, ChartHost, LifecyclePhase, Render};
pub use scale::{BandScale, LinearScale, Tick};
pub use scene::{Node, NodeId, Property, Scene, Shape};
pub use surface::Surface;
