//! Dashboard configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty file is a valid
//! config.

use crate::binning::BinWidth;
use crate::error::Result;
use cellscope_core::{Margin, Rect, Size};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Devices the dashboard is allowed to show.
pub const AUTHORIZED_IMEIS: [&str; 2] = ["865044073967657", "865044073949366"];

// =============================================================================
// RenderConfig
// =============================================================================

/// Outer size and margins of one chart.
///
/// A chart table in the config file must give every field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Size of the main chart area including margins
    pub size: Size,
    /// Space around the plot
    pub margin: Margin,
    /// Height of the overview strip below the chart, zero for none
    pub overview_height: f32,
}

impl RenderConfig {
    /// Temperature histogram layout.
    #[must_use]
    pub const fn temperature() -> Self {
        Self {
            size: Size::new(700.0, 400.0),
            margin: Margin::new(20.0, 30.0, 60.0, 60.0),
            overview_height: 0.0,
        }
    }

    /// Battery health layout.
    #[must_use]
    pub const fn health() -> Self {
        Self {
            size: Size::new(700.0, 400.0),
            margin: Margin::new(30.0, 80.0, 60.0, 60.0),
            overview_height: 0.0,
        }
    }

    /// Performance layout.
    #[must_use]
    pub const fn performance() -> Self {
        Self::health()
    }

    /// Long-term trend layout with its overview strip.
    #[must_use]
    pub const fn trend() -> Self {
        Self {
            size: Size::new(900.0, 500.0),
            margin: Margin::new(30.0, 30.0, 100.0, 60.0),
            overview_height: 50.0,
        }
    }

    /// Plot width inside the margins.
    #[must_use]
    pub fn plot_width(&self) -> f32 {
        (self.size.width - self.margin.horizontal()).max(0.0)
    }

    /// Plot height inside the margins.
    #[must_use]
    pub fn plot_height(&self) -> f32 {
        (self.size.height - self.margin.vertical()).max(0.0)
    }

    /// Plot area in surface coordinates.
    #[must_use]
    pub fn plot_rect(&self) -> Rect {
        Rect::from_size(self.size).inner(&self.margin)
    }

    /// Full surface size, overview strip included.
    #[must_use]
    pub fn surface_size(&self) -> Size {
        Size::new(self.size.width, self.size.height + self.overview_height)
    }
}

/// Layouts of all four charts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Temperature histogram
    pub temperature: RenderConfig,
    /// Battery health
    pub health: RenderConfig,
    /// Performance
    pub performance: RenderConfig,
    /// Long-term trend
    pub trend: RenderConfig,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            temperature: RenderConfig::temperature(),
            health: RenderConfig::health(),
            performance: RenderConfig::performance(),
            trend: RenderConfig::trend(),
        }
    }
}

// =============================================================================
// DashboardConfig
// =============================================================================

/// Top-level dashboard configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Device IMEIs that may be selected
    pub authorized_devices: Vec<String>,
    /// Device selected at startup; the first authorized device if unset
    pub initial_device: Option<String>,
    /// Initial temperature bin width
    pub temperature_bin_width: BinWidth,
    /// Play entry animations
    pub animations: bool,
    /// Chart layouts
    pub charts: ChartsConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            authorized_devices: AUTHORIZED_IMEIS.iter().map(ToString::to_string).collect(),
            initial_device: None,
            temperature_bin_width: BinWidth::default(),
            animations: true,
            charts: ChartsConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Default config file name.
    pub const CONFIG_FILE: &'static str = "cellscope.toml";

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    #[must_use]
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }

    /// Load from a file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Whether `imei` may be shown.
    #[must_use]
    pub fn is_authorized(&self, imei: &str) -> bool {
        self.authorized_devices.iter().any(|d| d == imei)
    }

    /// The device to select at startup.
    ///
    /// An unauthorized `initial_device` is ignored in favor of the first
    /// authorized device.
    #[must_use]
    pub fn startup_device(&self) -> Option<&str> {
        match self.initial_device.as_deref() {
            Some(imei) if self.is_authorized(imei) => Some(imei),
            Some(imei) => {
                warn!(imei, "initial device is not authorized, using the first authorized device");
                self.authorized_devices.first().map(String::as_str)
            }
            None => self.authorized_devices.first().map(String::as_str),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        let config = DashboardConfig::from_toml("").unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.temperature_bin_width, BinWidth::Ten);
        assert!(config.animations);
        assert_eq!(config.startup_device(), Some("865044073967657"));
    }

    #[test]
    fn test_parse_overrides() {
        let config = DashboardConfig::from_toml(
            r#"
            initial_device = "865044073949366"
            temperature_bin_width = 15
            animations = false

            [charts.trend]
            overview_height = 80.0
            size = { width = 900.0, height = 500.0 }
            margin = { top = 30.0, right = 30.0, bottom = 100.0, left = 60.0 }
            "#,
        )
        .unwrap();
        assert_eq!(config.startup_device(), Some("865044073949366"));
        assert_eq!(config.temperature_bin_width, BinWidth::Fifteen);
        assert!(!config.animations);
        assert_eq!(config.charts.trend.overview_height, 80.0);
        assert_eq!(config.charts.health, RenderConfig::health());
    }

    #[test]
    fn test_partial_chart_table_rejected() {
        let err = DashboardConfig::from_toml("[charts.trend]\noverview_height = 80.0").unwrap_err();
        assert!(matches!(err, crate::ChartError::Config(_)));
    }

    #[test]
    fn test_bad_bin_width_rejected() {
        let err = DashboardConfig::from_toml("temperature_bin_width = 12").unwrap_err();
        assert!(matches!(err, crate::ChartError::Config(_)));
    }

    #[test]
    fn test_unauthorized_initial_device_falls_back() {
        let config = DashboardConfig {
            initial_device: Some("000".into()),
            ..DashboardConfig::default()
        };
        assert_eq!(config.startup_device(), Some("865044073967657"));
        assert!(!config.is_authorized("000"));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = DashboardConfig::default();
        let back = DashboardConfig::from_toml(&config.to_toml()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_layout_geometry() {
        let trend = RenderConfig::trend();
        assert_eq!(trend.plot_width(), 810.0);
        assert_eq!(trend.plot_height(), 370.0);
        assert_eq!(trend.surface_size(), Size::new(900.0, 550.0));
        let plot = RenderConfig::temperature().plot_rect();
        assert_eq!(plot, Rect::new(60.0, 20.0, 610.0, 320.0));
    }

    #[test]
    fn test_load_missing_file() {
        let err = DashboardConfig::load_from_file(Path::new("/nonexistent/cellscope.toml"))
            .unwrap_err();
        assert!(matches!(err, crate::ChartError::Io(_)));
    }
}
