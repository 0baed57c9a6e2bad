//! `CellScope`: battery-cycle telemetry charts for the browser.
//!
//! Re-exports the rendering core and the chart crate, and adds the browser
//! runtime that blits chart display lists onto HTML canvases.
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { WasmDashboard } from './cellscope.js';
//!
//! async function main() {
//!     await init();
//!     const dashboard = new WasmDashboard(null);
//!     dashboard.attach('temperature', 'temperature-canvas');
//!     dashboard.load_cycles_json(cyclesJson);
//!     dashboard.set_bin_width(5);
//! }
//! ```

pub use cellscope_charts as charts;
pub use cellscope_core::*;

pub mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::{Canvas2DRenderer, WasmDashboard};

pub use browser::{DashboardReport, LegendEntry};
