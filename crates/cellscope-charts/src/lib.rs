//! Battery-cycle telemetry charts for `CellScope`.
//!
//! Decodes per-cycle aggregate records, derives the plotted series, and
//! renders the four dashboard charts onto [`cellscope_core`] surfaces:
//!
//! - temperature histogram with selectable bin width
//! - SOC/SOH progression across a cycle
//! - cumulative distance and speed
//! - long-term SOH trend with wheel zoom, pan and an overview brush
//!
//! ```
//! use cellscope_charts::{BinWidth, CycleRecord, TemperatureMap, temperature_bins};
//!
//! let record = CycleRecord {
//!     temperature_dist_10deg: TemperatureMap::from_minutes([("20-30", 42.0), ("10-20", 8.0)]),
//!     ..CycleRecord::default()
//! };
//! let bins = temperature_bins(&record, BinWidth::Ten);
//! assert_eq!(bins[0].range, "10-20");
//! ```

pub mod binning;
pub mod charts;
pub mod config;
pub mod dashboard;
mod error;
pub mod format;
pub mod interaction;
pub mod record;
pub mod stats;
pub mod synthetic;

pub use binning::{
    temperature_bins, temperature_color, BinWidth, TemperatureBin, TEMPERATURE_LEGEND,
};
pub use charts::{
    trend_points, HealthChart, PerformanceChart, TemperatureChart, TrendChart, TrendPoint,
};
pub use config::{DashboardConfig, RenderConfig, AUTHORIZED_IMEIS};
pub use dashboard::{ChartKind, Dashboard};
pub use error::{ChartError, Result};
pub use format::{format_duration, safe_number, safe_to_fixed};
pub use interaction::{ViewState, ZoomController, ZoomTransform};
pub use record::{AlertDetails, CycleList, CycleRecord, SnapshotsResponse, TemperatureMap};
pub use stats::{
    AlertSummary, ChargeStartAdvice, ChargingInsights, ChargingPattern, HealthStats,
    PerformanceStats, SeriesStats, TemperatureStats, TrendStats,
};
pub use synthetic::{
    health_series, performance_series, HealthSeries, PerformancePoint, SeriesPoint,
};
