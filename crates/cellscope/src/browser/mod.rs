//! Browser runtime for the cellscope dashboard.
//!
//! Bridges the chart surfaces to the page: display lists are replayed on
//! Canvas2D and DOM pointer events are routed to the chart they hit.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod canvas2d;
#[cfg(target_arch = "wasm32")]
pub mod events;

// Cross-platform modules
pub mod bridge;
pub mod css;

#[cfg(target_arch = "wasm32")]
pub use app::WasmDashboard;
pub use bridge::{
    chart_name, parse_chart_kind, temperature_legend, wheel_pixels, DashboardReport, LegendEntry,
};
#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2DRenderer;
