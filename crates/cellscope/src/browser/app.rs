//! Browser dashboard entry point exported to JavaScript.

use super::bridge::{chart_name, parse_chart_kind, temperature_legend, DashboardReport};
use super::canvas2d::Canvas2DRenderer;
use super::events::{mouse_event_to_cellscope, wheel_event_to_cellscope};
use cellscope_charts::{BinWidth, ChartKind, CycleList, Dashboard, DashboardConfig};
use cellscope_core::Event;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn chart_kind(name: &str) -> Result<ChartKind, JsValue> {
    parse_chart_kind(name).ok_or_else(|| JsValue::from_str(&format!("Unknown chart: {name}")))
}

/// The four telemetry charts bound to canvases on the page.
///
/// ```javascript
/// import init, { WasmDashboard } from './cellscope.js';
///
/// await init();
/// const dashboard = new WasmDashboard(null);
/// dashboard.attach('trend', 'trend-canvas');
/// dashboard.load_snapshots_json(await (await fetch(url)).text());
/// requestAnimationFrame(function frame(t) {
///     dashboard.frame(t);
///     requestAnimationFrame(frame);
/// });
/// ```
#[wasm_bindgen]
pub struct WasmDashboard {
    dashboard: Dashboard,
    renderers: Vec<(ChartKind, Canvas2DRenderer)>,
    last_frame_ms: Option<f64>,
}

#[wasm_bindgen]
impl WasmDashboard {
    /// Create a dashboard, optionally from a `cellscope.toml` document.
    #[wasm_bindgen(constructor)]
    pub fn new(config_toml: Option<String>) -> Result<WasmDashboard, JsValue> {
        console_error_panic_hook::set_once();

        let config = match config_toml {
            Some(toml) => DashboardConfig::from_toml(&toml).map_err(|e| {
                web_sys::console::error_1(&JsValue::from_str(&format!("Invalid config: {e}")));
                js_error(e)
            })?,
            None => DashboardConfig::default(),
        };

        Ok(Self {
            dashboard: Dashboard::new(config),
            renderers: Vec::new(),
            last_frame_ms: None,
        })
    }

    /// Bind a chart to the canvas element with id `canvas_id`.
    pub fn attach(&mut self, chart: &str, canvas_id: &str) -> Result<(), JsValue> {
        let kind = chart_kind(chart)?;
        let window = web_sys::window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| format!("Canvas '{canvas_id}' not found"))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| "Element is not a canvas")?;

        let renderer = Canvas2DRenderer::new(canvas).map_err(|e| {
            web_sys::console::error_1(&JsValue::from_str(&e));
            JsValue::from_str(&e)
        })?;
        let size = self.dashboard.surface(kind).size();
        renderer.resize(size.width, size.height);

        self.renderers.retain(|(k, _)| *k != kind);
        self.renderers.push((kind, renderer));
        self.paint();
        Ok(())
    }

    /// Load a snapshot service response (`{ success, data, count }`).
    pub fn load_snapshots_json(&mut self, json: &str) -> Result<(), JsValue> {
        self.dashboard.load_snapshots_json(json).map_err(js_error)?;
        self.paint();
        Ok(())
    }

    /// Load a bare JSON array of cycle records.
    pub fn load_cycles_json(&mut self, json: &str) -> Result<(), JsValue> {
        let cycles = CycleList::from_json(json).map_err(js_error)?;
        self.dashboard.load_cycles(cycles);
        self.paint();
        Ok(())
    }

    /// Select a device; returns false when it is not authorized.
    pub fn select_device(&mut self, imei: &str) -> bool {
        let selected = self.dashboard.select_device(imei);
        self.paint();
        selected
    }

    /// Selected device id.
    pub fn device(&self) -> Option<String> {
        self.dashboard.device().map(str::to_owned)
    }

    /// Select a cycle by number.
    pub fn select_cycle(&mut self, cycle_number: u32) {
        self.dashboard.select_cycle(cycle_number);
        self.paint();
    }

    /// Selected cycle number.
    pub fn cycle_number(&self) -> Option<u32> {
        self.dashboard.cycle_number()
    }

    /// Step to the previous cycle.
    pub fn previous_cycle(&mut self) -> bool {
        let moved = self.dashboard.previous_cycle();
        self.paint();
        moved
    }

    /// Step to the next cycle.
    pub fn next_cycle(&mut self) -> bool {
        let moved = self.dashboard.next_cycle();
        self.paint();
        moved
    }

    /// Jump to the lowest cycle number.
    pub fn first_cycle(&mut self) {
        self.dashboard.first_cycle();
        self.paint();
    }

    /// Jump to the highest cycle number.
    pub fn latest_cycle(&mut self) {
        self.dashboard.latest_cycle();
        self.paint();
    }

    /// Switch the temperature bin width (5, 10, 15 or 20 degrees).
    pub fn set_bin_width(&mut self, degrees: u32) -> Result<(), JsValue> {
        let width = BinWidth::try_from(degrees).map_err(js_error)?;
        self.dashboard.set_bin_width(width);
        self.paint();
        Ok(())
    }

    /// Zoom the trend chart to the cycle interval `[from, to]`.
    pub fn brush_trend(&mut self, from_cycle: f64, to_cycle: f64) -> bool {
        let changed = self.dashboard.brush_trend(from_cycle, to_cycle);
        self.paint();
        changed
    }

    /// Return the trend chart to the full cycle range.
    pub fn reset_trend_zoom(&mut self) {
        self.dashboard.reset_trend_zoom();
        self.paint();
    }

    /// Advance animations by `dt_ms` and repaint.
    pub fn tick(&mut self, dt_ms: f64) {
        self.dashboard.tick(dt_ms);
        self.paint();
    }

    /// Animation-frame callback; takes the `requestAnimationFrame` timestamp.
    pub fn frame(&mut self, timestamp_ms: f64) {
        let dt = self
            .last_frame_ms
            .map_or(0.0, |last| (timestamp_ms - last).max(0.0));
        self.last_frame_ms = Some(timestamp_ms);
        self.tick(dt);
    }

    /// Forward a mouse event (`mousemove`, `mousedown`, `mouseup`, `mouseleave`).
    pub fn on_mouse(&mut self, chart: &str, event: &MouseEvent, event_type: &str) -> bool {
        let Ok(kind) = chart_kind(chart) else {
            return false;
        };
        mouse_event_to_cellscope(event, event_type)
            .is_some_and(|event| self.dispatch(kind, &event))
    }

    /// Forward a wheel event. Scrolling is captured on the trend chart only.
    pub fn on_wheel(&mut self, chart: &str, event: &WheelEvent) -> bool {
        let Ok(kind) = chart_kind(chart) else {
            return false;
        };
        if kind == ChartKind::Trend {
            event.prevent_default();
        }
        self.dispatch(kind, &wheel_event_to_cellscope(event))
    }

    /// Summary cards of the current selection as JSON.
    pub fn stats_json(&self) -> Result<String, JsValue> {
        DashboardReport::collect(&self.dashboard)
            .to_json()
            .map_err(js_error)
    }

    /// Display list of one chart as JSON, for snapshot tooling.
    pub fn display_list_json(&self, chart: &str) -> Result<String, JsValue> {
        let kind = chart_kind(chart)?;
        serde_json::to_string(&self.dashboard.display_list(kind)).map_err(js_error)
    }

    /// Temperature colour legend as JSON.
    pub fn temperature_legend_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&temperature_legend()).map_err(js_error)
    }

    fn dispatch(&mut self, kind: ChartKind, event: &Event) -> bool {
        let changed = self.dashboard.handle_event(kind, event);
        if changed {
            self.paint_chart(kind);
        }
        changed
    }

    fn paint_chart(&self, kind: ChartKind) {
        for (_, renderer) in self.renderers.iter().filter(|(k, _)| *k == kind) {
            renderer.render(&self.dashboard.display_list(kind));
        }
    }

    fn paint(&self) {
        for (kind, renderer) in &self.renderers {
            renderer.render(&self.dashboard.display_list(*kind));
        }
    }
}

/// Names accepted by `attach`, `on_mouse` and `on_wheel`.
#[wasm_bindgen]
pub fn chart_names() -> Vec<JsValue> {
    ChartKind::ALL
        .into_iter()
        .map(|kind| JsValue::from_str(chart_name(kind)))
        .collect()
}

/// Initialize panic hook for better error messages.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
