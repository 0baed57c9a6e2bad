//! Dashboard state wiring the four charts to a device's cycle list.
//!
//! Selections only change dependency values; each [`ChartHost`] decides for
//! itself whether its chart needs a new render pass.

use crate::binning::{temperature_bins, BinWidth, TemperatureBin};
use crate::charts::{trend_points, HealthChart, PerformanceChart, TemperatureChart, TrendChart};
use crate::config::{DashboardConfig, RenderConfig};
use crate::error::Result;
use crate::record::{CycleList, CycleRecord, SnapshotsResponse};
use crate::stats::{
    AlertSummary, ChargingInsights, HealthStats, PerformanceStats, TemperatureStats, TrendStats,
};
use crate::synthetic::{health_series, performance_series};
use cellscope_core::{ChartHost, DrawCommand, Event, Render, Surface};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The four dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Temperature histogram
    Temperature,
    /// SOC/SOH progression
    Health,
    /// Distance and speed
    Performance,
    /// Long-term SOH trend
    Trend,
}

impl ChartKind {
    /// Every chart, in page order.
    pub const ALL: [Self; 4] = [Self::Health, Self::Performance, Self::Temperature, Self::Trend];
}

fn host<R: Render>(renderer: R, layout: &RenderConfig, animations: bool) -> ChartHost<R> {
    ChartHost::with_surface(
        renderer,
        Surface::new(layout.surface_size()).with_animations(animations),
    )
}

/// Dashboard state and its chart hosts.
#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    device: Option<String>,
    cycles: CycleList,
    cycle_number: Option<u32>,
    bin_width: BinWidth,
    temperature: ChartHost<TemperatureChart>,
    health: ChartHost<HealthChart>,
    performance: ChartHost<PerformanceChart>,
    trend: ChartHost<TrendChart>,
}

impl Dashboard {
    /// Create from a config and render the initial, empty state.
    #[must_use]
    pub fn new(config: DashboardConfig) -> Self {
        let charts = config.charts;
        let animations = config.animations;
        let mut dashboard = Self {
            device: config.startup_device().map(String::from),
            cycles: CycleList::default(),
            cycle_number: None,
            bin_width: config.temperature_bin_width,
            temperature: host(
                TemperatureChart::new(charts.temperature),
                &charts.temperature,
                animations,
            ),
            health: host(HealthChart::new(charts.health), &charts.health, animations),
            performance: host(
                PerformanceChart::new(charts.performance),
                &charts.performance,
                animations,
            ),
            trend: host(TrendChart::new(charts.trend), &charts.trend, animations),
            config,
        };
        dashboard.refresh();
        dashboard
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Selected device IMEI.
    #[must_use]
    pub fn device(&self) -> Option<&str> {
        self.device.as_deref()
    }

    /// Cycles of the selected device.
    #[must_use]
    pub const fn cycles(&self) -> &CycleList {
        &self.cycles
    }

    /// Selected cycle number, whether or not a record exists for it.
    #[must_use]
    pub const fn cycle_number(&self) -> Option<u32> {
        self.cycle_number
    }

    /// Record of the selected cycle.
    #[must_use]
    pub fn current_cycle(&self) -> Option<&CycleRecord> {
        self.cycle_number.and_then(|n| self.cycles.find(n))
    }

    /// Temperature bin width.
    #[must_use]
    pub const fn bin_width(&self) -> BinWidth {
        self.bin_width
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Select a device. Its cycle list must be loaded again.
    ///
    /// Returns false for an unauthorized or already selected device.
    pub fn select_device(&mut self, imei: &str) -> bool {
        if !self.config.is_authorized(imei) {
            warn!(imei, "device is not authorized");
            return false;
        }
        if self.device.as_deref() == Some(imei) {
            return false;
        }
        debug!(imei, "device selected");
        self.device = Some(imei.to_string());
        self.cycles = CycleList::default();
        self.cycle_number = None;
        self.refresh();
        true
    }

    /// Replace the cycle list of the selected device.
    ///
    /// Keeps the selected cycle number, or picks the first listed cycle if
    /// none is selected.
    pub fn load_cycles(&mut self, cycles: CycleList) {
        debug!(count = cycles.len(), "cycles loaded");
        if self.cycle_number.is_none() {
            self.cycle_number = cycles.records().first().map(|r| r.cycle_number);
        }
        self.cycles = cycles;
        self.refresh();
    }

    /// Load a snapshots response body. An unsuccessful response loads an
    /// empty list.
    pub fn load_snapshots_json(&mut self, json: &str) -> Result<()> {
        let response = SnapshotsResponse::from_json(json)?;
        if response.success {
            self.load_cycles(response.data);
        } else {
            warn!("snapshots request reported failure");
            self.load_cycles(CycleList::default());
        }
        Ok(())
    }

    /// Select a cycle by number.
    pub fn select_cycle(&mut self, cycle_number: u32) {
        self.cycle_number = Some(cycle_number);
        self.refresh();
    }

    /// Lowest and highest loaded cycle numbers.
    #[must_use]
    pub fn cycle_bounds(&self) -> Option<(u32, u32)> {
        let numbers = self.cycles.records().iter().map(|r| r.cycle_number);
        Some((numbers.clone().min()?, numbers.max()?))
    }

    /// Step to the previous cycle number. Returns false at the first cycle.
    pub fn previous_cycle(&mut self) -> bool {
        match (self.cycle_number, self.cycle_bounds()) {
            (Some(n), Some((lo, _))) if n > lo => {
                self.select_cycle(n - 1);
                true
            }
            _ => false,
        }
    }

    /// Step to the next cycle number. Returns false at the latest cycle.
    pub fn next_cycle(&mut self) -> bool {
        match (self.cycle_number, self.cycle_bounds()) {
            (Some(n), Some((_, hi))) if n < hi => {
                self.select_cycle(n + 1);
                true
            }
            _ => false,
        }
    }

    /// Jump to the lowest cycle number.
    pub fn first_cycle(&mut self) {
        if let Some((lo, _)) = self.cycle_bounds() {
            self.select_cycle(lo);
        }
    }

    /// Jump to the highest cycle number.
    pub fn latest_cycle(&mut self) {
        if let Some((_, hi)) = self.cycle_bounds() {
            self.select_cycle(hi);
        }
    }

    /// Change the temperature bin width.
    pub fn set_bin_width(&mut self, width: BinWidth) {
        self.bin_width = width;
        self.refresh();
    }

    fn refresh(&mut self) {
        let record = self.current_cycle();
        let bins = record.map(|r| temperature_bins(r, self.bin_width));
        let health = record.map(health_series);
        let performance = record.map(performance_series);
        let trend = self.device.is_some().then(|| trend_points(&self.cycles));

        self.temperature.update(bins);
        self.health.update(health);
        self.performance.update(performance);
        self.trend.update(trend);
    }

    // =========================================================================
    // Frames and input
    // =========================================================================

    /// Advance every chart's animations by `dt_ms`.
    pub fn tick(&mut self, dt_ms: f64) {
        self.temperature.tick(dt_ms);
        self.health.tick(dt_ms);
        self.performance.tick(dt_ms);
        self.trend.tick(dt_ms);
    }

    /// Deliver a pointer event to one chart. Returns true if it changed.
    pub fn handle_event(&mut self, chart: ChartKind, event: &Event) -> bool {
        match chart {
            ChartKind::Temperature => self.temperature.handle_event(event),
            ChartKind::Health => self.health.handle_event(event),
            ChartKind::Performance => self.performance.handle_event(event),
            ChartKind::Trend => self.trend.handle_event(event),
        }
    }

    /// Brush the trend chart to a cycle interval.
    pub fn brush_trend(&mut self, from_cycle: f64, to_cycle: f64) -> bool {
        self.trend
            .with_renderer(|chart, surface| chart.brush(surface, from_cycle, to_cycle))
    }

    /// Show the full cycle range on the trend chart.
    pub fn reset_trend_zoom(&mut self) {
        self.trend.with_renderer(|chart, surface| chart.reset_zoom(surface));
    }

    /// Surface of one chart.
    #[must_use]
    pub fn surface(&self, chart: ChartKind) -> &Surface {
        match chart {
            ChartKind::Temperature => self.temperature.surface(),
            ChartKind::Health => self.health.surface(),
            ChartKind::Performance => self.performance.surface(),
            ChartKind::Trend => self.trend.surface(),
        }
    }

    /// Paint one chart into a display list.
    #[must_use]
    pub fn display_list(&self, chart: ChartKind) -> Vec<DrawCommand> {
        self.surface(chart).display_list()
    }

    /// Number of render passes one chart has run.
    #[must_use]
    pub fn render_count(&self, chart: ChartKind) -> u64 {
        match chart {
            ChartKind::Temperature => self.temperature.render_count(),
            ChartKind::Health => self.health.render_count(),
            ChartKind::Performance => self.performance.render_count(),
            ChartKind::Trend => self.trend.render_count(),
        }
    }

    /// Trend chart host.
    #[must_use]
    pub const fn trend(&self) -> &ChartHost<TrendChart> {
        &self.trend
    }

    // =========================================================================
    // Summaries
    // =========================================================================

    /// Bins of the selected cycle at the current width.
    #[must_use]
    pub fn temperature_bins(&self) -> Vec<TemperatureBin> {
        self.current_cycle()
            .map(|r| temperature_bins(r, self.bin_width))
            .unwrap_or_default()
    }

    /// Health card figures.
    #[must_use]
    pub fn health_stats(&self) -> Option<HealthStats> {
        self.current_cycle().map(HealthStats::from_record)
    }

    /// Performance card figures.
    #[must_use]
    pub fn performance_stats(&self) -> Option<PerformanceStats> {
        self.current_cycle().map(PerformanceStats::from_record)
    }

    /// Temperature card figures.
    #[must_use]
    pub fn temperature_stats(&self) -> Option<TemperatureStats> {
        let record = self.current_cycle()?;
        let bins = temperature_bins(record, self.bin_width);
        Some(TemperatureStats::new(record, &bins, self.bin_width))
    }

    /// Charging behavior of the selected cycle.
    #[must_use]
    pub fn charging_insights(&self) -> Option<ChargingInsights> {
        self.current_cycle().map(ChargingInsights::from_record)
    }

    /// Warnings and protections of the selected cycle.
    #[must_use]
    pub fn alerts(&self) -> Option<AlertSummary> {
        self.current_cycle().map(AlertSummary::from_record)
    }

    /// Degradation across all loaded cycles.
    #[must_use]
    pub fn trend_stats(&self) -> Option<TrendStats> {
        TrendStats::from_cycles(&self.cycles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::PLACEHOLDER_LAYER;
    use crate::record::TemperatureMap;

    fn record(cycle_number: u32) -> CycleRecord {
        CycleRecord {
            imei: "865044073967657".into(),
            cycle_number,
            average_soc: 70.0,
            min_soc: 20.0,
            max_soc: 95.0,
            average_soh: 99.0 - f64::from(cycle_number) * 0.1,
            cycle_duration_hours: 4.0,
            total_distance: 50.0,
            average_speed: 20.0,
            max_speed: 45.0,
            temperature_dist_5deg: TemperatureMap::from_minutes([("20-25", 12.0), ("25-30", 18.0)]),
            temperature_dist_10deg: TemperatureMap::from_minutes([("20-30", 30.0)]),
            ..CycleRecord::default()
        }
    }

    fn dashboard() -> Dashboard {
        Dashboard::new(DashboardConfig {
            animations: false,
            ..DashboardConfig::default()
        })
    }

    // =========================================================================
    // Selection
    // =========================================================================

    #[test]
    fn test_initial_state_shows_placeholders() {
        let dashboard = dashboard();
        assert_eq!(dashboard.device(), Some("865044073967657"));
        for kind in ChartKind::ALL {
            assert_eq!(dashboard.surface(kind).scene().count_layer(PLACEHOLDER_LAYER), 1);
            assert_eq!(dashboard.render_count(kind), 1);
        }
        assert_eq!(
            dashboard.surface(ChartKind::Trend).scene().texts(PLACEHOLDER_LAYER),
            vec!["No cycle data available for long-term analysis."]
        );
    }

    #[test]
    fn test_load_selects_first_listed_cycle() {
        let mut dashboard = dashboard();
        dashboard.load_cycles(CycleList(vec![record(3), record(1), record(2)]));
        assert_eq!(dashboard.cycle_number(), Some(3));
        assert_eq!(dashboard.current_cycle().map(|r| r.cycle_number), Some(3));
        assert_eq!(dashboard.surface(ChartKind::Health).scene().count_layer(PLACEHOLDER_LAYER), 0);
    }

    #[test]
    fn test_navigation_steps_within_bounds() {
        let mut dashboard = dashboard();
        dashboard.load_cycles(CycleList((1..=3).map(record).collect()));
        assert!(!dashboard.previous_cycle());
        assert!(dashboard.next_cycle());
        assert!(dashboard.next_cycle());
        assert!(!dashboard.next_cycle());
        assert_eq!(dashboard.cycle_number(), Some(3));
        dashboard.first_cycle();
        assert_eq!(dashboard.cycle_number(), Some(1));
        dashboard.latest_cycle();
        assert_eq!(dashboard.cycle_number(), Some(3));
    }

    #[test]
    fn test_missing_cycle_shows_placeholder() {
        let mut dashboard = dashboard();
        dashboard.load_cycles(CycleList(vec![record(1), record(5)]));
        dashboard.select_cycle(3);
        assert!(dashboard.current_cycle().is_none());
        assert_eq!(
            dashboard.surface(ChartKind::Performance).scene().texts(PLACEHOLDER_LAYER),
            vec!["Select a cycle to view performance data."]
        );
    }

    #[test]
    fn test_unauthorized_device_rejected() {
        let mut dashboard = dashboard();
        assert!(!dashboard.select_device("123"));
        assert!(!dashboard.select_device("865044073967657"));
        assert!(dashboard.select_device("865044073949366"));
        assert_eq!(dashboard.device(), Some("865044073949366"));
        assert!(dashboard.cycles().is_empty());
        assert_eq!(dashboard.cycle_number(), None);
    }

    // =========================================================================
    // Re-render scoping
    // =========================================================================

    #[test]
    fn test_bin_width_only_rerenders_temperature() {
        let mut dashboard = dashboard();
        dashboard.load_cycles(CycleList(vec![record(1)]));
        let before: Vec<u64> = ChartKind::ALL.iter().map(|&k| dashboard.render_count(k)).collect();

        dashboard.set_bin_width(BinWidth::Five);
        let after: Vec<u64> = ChartKind::ALL.iter().map(|&k| dashboard.render_count(k)).collect();

        // Page order: health, performance, temperature, trend.
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1], before[1]);
        assert_eq!(after[2], before[2] + 1);
        assert_eq!(after[3], before[3]);
    }

    #[test]
    fn test_cycle_change_keeps_trend() {
        let mut dashboard = dashboard();
        dashboard.load_cycles(CycleList((1..=3).map(record).collect()));
        let trend = dashboard.render_count(ChartKind::Trend);
        dashboard.select_cycle(2);
        assert_eq!(dashboard.render_count(ChartKind::Trend), trend);
    }

    // =========================================================================
    // Summaries
    // =========================================================================

    #[test]
    fn test_summaries_follow_selection() {
        let mut dashboard = dashboard();
        assert!(dashboard.health_stats().is_none());
        dashboard.load_cycles(CycleList((1..=4).map(record).collect()));
        assert_eq!(dashboard.health_stats().unwrap().average_soc, 70.0);
        assert_eq!(dashboard.performance_stats().unwrap().total_distance, 50.0);
        assert_eq!(dashboard.trend_stats().unwrap().total_cycles, 4);
        assert_eq!(dashboard.temperature_bins().len(), 1);
        dashboard.set_bin_width(BinWidth::Five);
        assert_eq!(dashboard.temperature_stats().unwrap().range_count, 2);
        assert!(!dashboard.alerts().unwrap().has_alerts());
    }

    #[test]
    fn test_failed_snapshots_load_empty() {
        let mut dashboard = dashboard();
        dashboard.load_cycles(CycleList(vec![record(1)]));
        dashboard
            .load_snapshots_json(r#"{"success": false, "data": [], "count": 0}"#)
            .unwrap();
        assert!(dashboard.cycles().is_empty());
        assert!(dashboard.load_snapshots_json("not json").is_err());
    }
}
