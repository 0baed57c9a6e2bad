//! Host-page data contract: chart names, wheel deltas and the JSON summary.

use cellscope_charts::{
    AlertSummary, BinWidth, ChargingInsights, ChartKind, Dashboard, HealthStats,
    PerformanceStats, TemperatureStats, TrendStats, TEMPERATURE_LEGEND,
};
use serde::Serialize;

/// `WheelEvent.deltaMode` for line units.
pub const DELTA_LINE: u32 = 1;
/// `WheelEvent.deltaMode` for page units.
pub const DELTA_PAGE: u32 = 2;

/// Parse a chart name as the host page spells it (`"trend"`, `"health"`, ...).
#[must_use]
pub fn parse_chart_kind(name: &str) -> Option<ChartKind> {
    ChartKind::ALL.into_iter().find(|kind| chart_name(*kind) == name)
}

/// Name of a chart as used in element ids and event routing.
#[must_use]
pub const fn chart_name(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Temperature => "temperature",
        ChartKind::Health => "health",
        ChartKind::Performance => "performance",
        ChartKind::Trend => "trend",
    }
}

/// Convert a wheel delta to pixel units.
///
/// Line and page deltas are scaled so one notch zooms about as much as a
/// trackpad swipe of the same length.
#[must_use]
pub fn wheel_pixels(delta_y: f64, delta_mode: u32) -> f32 {
    let scale = match delta_mode {
        DELTA_LINE => 25.0,
        DELTA_PAGE => 500.0,
        _ => 1.0,
    };
    (delta_y * scale) as f32
}

/// One legend entry of the temperature colour scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    /// Band label, e.g. `"< 10°C (Cold)"`
    pub label: &'static str,
    /// Hex colour
    pub color: String,
}

/// Legend entries for the temperature chart.
#[must_use]
pub fn temperature_legend() -> Vec<LegendEntry> {
    TEMPERATURE_LEGEND
        .iter()
        .map(|(label, color)| LegendEntry {
            label: *label,
            color: color.to_hex(),
        })
        .collect()
}

/// Everything the summary cards beside the charts display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    /// Selected device
    pub device: Option<String>,
    /// Selected cycle number
    pub cycle_number: Option<u32>,
    /// Lowest and highest cycle numbers available
    pub cycle_bounds: Option<(u32, u32)>,
    /// Active temperature bin width in degrees
    pub bin_width: BinWidth,
    /// Battery health card
    pub health: Option<HealthStats>,
    /// Performance card
    pub performance: Option<PerformanceStats>,
    /// Temperature card
    pub temperature: Option<TemperatureStats>,
    /// Charging card
    pub charging: Option<ChargingInsights>,
    /// Warning and protection counts
    pub alerts: Option<AlertSummary>,
    /// Long-term trend card
    pub trend: Option<TrendStats>,
}

impl DashboardReport {
    /// Snapshot the summaries of the current selection.
    #[must_use]
    pub fn collect(dashboard: &Dashboard) -> Self {
        Self {
            device: dashboard.device().map(str::to_owned),
            cycle_number: dashboard.cycle_number(),
            cycle_bounds: dashboard.cycle_bounds(),
            bin_width: dashboard.bin_width(),
            health: dashboard.health_stats(),
            performance: dashboard.performance_stats(),
            temperature: dashboard.temperature_stats(),
            charging: dashboard.charging_insights(),
            alerts: dashboard.alerts(),
            trend: dashboard.trend_stats(),
        }
    }

    /// Serialize for the host page.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
