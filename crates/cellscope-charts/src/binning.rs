//! Temperature histogram bins.
//!
//! The four bin widths are precomputed upstream; this module only picks the
//! matching map, parses its `"<start>-<end>"` keys and sorts the result.

use crate::error::ChartError;
use crate::record::CycleRecord;
use cellscope_core::{palette, same_value, Color};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

// =============================================================================
// BinWidth
// =============================================================================

/// Supported temperature bin widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BinWidth {
    /// 5 °C bins
    Five,
    /// 10 °C bins
    #[default]
    Ten,
    /// 15 °C bins
    Fifteen,
    /// 20 °C bins
    Twenty,
}

impl BinWidth {
    /// All widths in ascending order.
    pub const ALL: [Self; 4] = [Self::Five, Self::Ten, Self::Fifteen, Self::Twenty];

    /// Width in degrees.
    #[must_use]
    pub const fn degrees(self) -> u32 {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::Fifteen => 15,
            Self::Twenty => 20,
        }
    }
}

impl TryFrom<u32> for BinWidth {
    type Error = ChartError;

    fn try_from(degrees: u32) -> Result<Self, Self::Error> {
        match degrees {
            5 => Ok(Self::Five),
            10 => Ok(Self::Ten),
            15 => Ok(Self::Fifteen),
            20 => Ok(Self::Twenty),
            other => Err(ChartError::UnsupportedBinWidth(other)),
        }
    }
}

impl From<BinWidth> for u32 {
    fn from(width: BinWidth) -> Self {
        width.degrees()
    }
}

impl fmt::Display for BinWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.degrees())
    }
}

// =============================================================================
// TemperatureBin
// =============================================================================

/// One histogram bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemperatureBin {
    /// Original key, used as the band label
    pub range: String,
    /// Lower bound, °C
    pub range_start: f64,
    /// Upper bound, °C
    pub range_end: f64,
    /// Minutes spent in the range
    pub minutes: f64,
}

impl PartialEq for TemperatureBin {
    fn eq(&self, other: &Self) -> bool {
        self.range == other.range
            && same_value(self.range_start, other.range_start)
            && same_value(self.range_end, other.range_end)
            && same_value(self.minutes, other.minutes)
    }
}

/// Parse a `"<start>-<end>"` key. Either bound may be negative.
#[must_use]
pub fn parse_range(key: &str) -> Option<(f64, f64)> {
    key.char_indices()
        .filter(|&(i, c)| c == '-' && i > 0)
        .find_map(|(i, _)| {
            let start = key[..i].trim().parse::<f64>().ok()?;
            let end = key[i + 1..].trim().parse::<f64>().ok()?;
            (start.is_finite() && end.is_finite()).then_some((start, end))
        })
}

/// Bins of `record` at `width`, ascending by range start.
///
/// Keys that do not parse and values that are not finite non-negative numbers
/// are skipped.
#[must_use]
pub fn temperature_bins(record: &CycleRecord, width: BinWidth) -> Vec<TemperatureBin> {
    let mut bins: Vec<TemperatureBin> = record
        .temperature_map(width)
        .iter()
        .filter_map(|(key, value)| {
            let Some((range_start, range_end)) = parse_range(key) else {
                debug!(key, reason = "unparseable range", "skipping temperature bin");
                return None;
            };
            let minutes = match value.as_f64() {
                Some(m) if m.is_finite() && m >= 0.0 => m,
                _ => {
                    debug!(key, reason = "non-numeric minutes", "skipping temperature bin");
                    return None;
                }
            };
            Some(TemperatureBin {
                range: key.to_string(),
                range_start,
                range_end,
                minutes,
            })
        })
        .collect();
    bins.sort_by(|a, b| a.range_start.total_cmp(&b.range_start));
    bins
}

/// Sum of minutes across bins.
#[must_use]
pub fn total_minutes(bins: &[TemperatureBin]) -> f64 {
    bins.iter().map(|b| b.minutes).sum()
}

// =============================================================================
// Colour scale
// =============================================================================

/// Bar colour for a range starting at `temp` °C.
#[must_use]
pub fn temperature_color(temp: f64) -> Color {
    if temp < 10.0 {
        palette::BLUE
    } else if temp < 20.0 {
        palette::GREEN
    } else if temp < 30.0 {
        palette::AMBER
    } else if temp < 40.0 {
        palette::ORANGE
    } else {
        palette::RED
    }
}

/// Legend entries for the colour scale.
pub const TEMPERATURE_LEGEND: [(&str, Color); 5] = [
    ("< 10°C (Cold)", palette::BLUE),
    ("10-20°C (Cool)", palette::GREEN),
    ("20-30°C (Warm)", palette::AMBER),
    ("30-40°C (Hot)", palette::ORANGE),
    ("> 40°C (Very Hot)", palette::RED),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TemperatureMap;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    fn record_with(width: BinWidth, map: TemperatureMap) -> CycleRecord {
        let mut record = CycleRecord::default();
        match width {
            BinWidth::Five => record.temperature_dist_5deg = map,
            BinWidth::Ten => record.temperature_dist_10deg = map,
            BinWidth::Fifteen => record.temperature_dist_15deg = map,
            BinWidth::Twenty => record.temperature_dist_20deg = map,
        }
        record
    }

    // =========================================================================
    // BinWidth
    // =========================================================================

    #[test]
    fn test_bin_width_conversions() {
        assert_eq!(BinWidth::try_from(15).unwrap(), BinWidth::Fifteen);
        assert!(matches!(
            BinWidth::try_from(7),
            Err(ChartError::UnsupportedBinWidth(7))
        ));
        assert_eq!(u32::from(BinWidth::Twenty), 20);
        assert_eq!(BinWidth::default(), BinWidth::Ten);
        assert_eq!(BinWidth::Five.to_string(), "5°C");
    }

    #[test]
    fn test_bin_width_serde() {
        let w: BinWidth = serde_json::from_str("20").unwrap();
        assert_eq!(w, BinWidth::Twenty);
        assert_eq!(serde_json::to_string(&BinWidth::Five).unwrap(), "5");
        assert!(serde_json::from_str::<BinWidth>("12").is_err());
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("15-20"), Some((15.0, 20.0)));
        assert_eq!(parse_range("-10--5"), Some((-10.0, -5.0)));
        assert_eq!(parse_range("-5-0"), Some((-5.0, 0.0)));
        assert_eq!(parse_range("abc-def"), None);
        assert_eq!(parse_range("20"), None);
        assert_eq!(parse_range(""), None);
        assert_eq!(parse_range("inf-5"), None);
    }

    // =========================================================================
    // Binning
    // =========================================================================

    #[test]
    fn test_malformed_entry_dropped_and_sorted() {
        let mut raw = BTreeMap::new();
        raw.insert("25-30".to_string(), serde_json::json!(5.0));
        raw.insert("15-20".to_string(), serde_json::json!(10.0));
        raw.insert("20-25".to_string(), serde_json::json!("bad"));
        let record = record_with(BinWidth::Five, TemperatureMap(raw));

        let bins = temperature_bins(&record, BinWidth::Five);
        let ranges: Vec<&str> = bins.iter().map(|b| b.range.as_str()).collect();
        assert_eq!(ranges, vec!["15-20", "25-30"]);
        assert_eq!(bins[0].minutes, 10.0);
        assert_eq!(bins[1].range_end, 30.0);
    }

    #[test]
    fn test_numeric_not_lexicographic_order() {
        let map = TemperatureMap::from_minutes([("5-10", 1.0), ("10-15", 2.0), ("-5-0", 3.0)]);
        let bins = temperature_bins(&record_with(BinWidth::Five, map), BinWidth::Five);
        let starts: Vec<f64> = bins.iter().map(|b| b.range_start).collect();
        assert_eq!(starts, vec![-5.0, 5.0, 10.0]);
    }

    #[test]
    fn test_width_switch_is_pure() {
        let mut record = record_with(
            BinWidth::Five,
            TemperatureMap::from_minutes([("20-25", 30.0), ("25-30", 30.0)]),
        );
        record.temperature_dist_10deg = TemperatureMap::from_minutes([("20-30", 60.0)]);
        let five = temperature_bins(&record, BinWidth::Five);
        let ten = temperature_bins(&record, BinWidth::Ten);
        assert_eq!(ten.len(), 1);
        assert_eq!(temperature_bins(&record, BinWidth::Five), five);
        assert_eq!(total_minutes(&five), total_minutes(&ten));
    }

    #[test]
    fn test_empty_map() {
        assert!(temperature_bins(&CycleRecord::default(), BinWidth::Twenty).is_empty());
    }

    #[test]
    fn test_temperature_colors() {
        assert_eq!(temperature_color(-5.0), palette::BLUE);
        assert_eq!(temperature_color(10.0), palette::GREEN);
        assert_eq!(temperature_color(25.0), palette::AMBER);
        assert_eq!(temperature_color(39.9), palette::ORANGE);
        assert_eq!(temperature_color(40.0), palette::RED);
    }

    proptest! {
        #[test]
        fn prop_bins_sorted_and_count_valid(
            starts in proptest::collection::btree_set(-40i32..80, 0..12),
            junk in proptest::collection::vec("[a-z]{1,4}", 0..4),
        ) {
            let mut raw = BTreeMap::new();
            for s in &starts {
                raw.insert(format!("{}-{}", s, s + 5), serde_json::json!(f64::from(*s).abs()));
            }
            for j in &junk {
                raw.insert(format!("{j}-x"), serde_json::json!(1.0));
            }
            let record = record_with(BinWidth::Five, TemperatureMap(raw));
            let bins = temperature_bins(&record, BinWidth::Five);
            prop_assert_eq!(bins.len(), starts.len());
            prop_assert!(bins.windows(2).all(|w| w[0].range_start <= w[1].range_start));
        }
    }
}
