//! Summaries shown alongside the charts.

use crate::binning::{total_minutes, BinWidth, TemperatureBin};
use crate::format::safe_number;
use crate::record::{CycleList, CycleRecord};
use serde::{Deserialize, Serialize};

// =============================================================================
// Series
// =============================================================================

/// First/last/min/max of the finite values of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    /// First finite value
    pub first: f64,
    /// Last finite value
    pub last: f64,
    /// Smallest value
    pub min: f64,
    /// Largest value
    pub max: f64,
    /// Number of finite values
    pub count: usize,
}

impl SeriesStats {
    /// Summarize `values`, ignoring NaN and infinities.
    ///
    /// Returns `None` if no finite value remains.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Option<Self> {
        let mut finite = values.into_iter().filter(|v| v.is_finite());
        let first = finite.next()?;
        let init = Self {
            first,
            last: first,
            min: first,
            max: first,
            count: 1,
        };
        Some(finite.fold(init, |acc, v| Self {
            last: v,
            min: acc.min.min(v),
            max: acc.max.max(v),
            count: acc.count + 1,
            ..acc
        }))
    }
}

// =============================================================================
// Per-cycle summaries
// =============================================================================

/// Summary under the battery health chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthStats {
    /// Average SOC, %
    pub average_soc: f64,
    /// Minimum SOC, %
    pub min_soc: f64,
    /// Maximum SOC, %
    pub max_soc: f64,
    /// Average SOH, %
    pub average_soh: f64,
    /// SOH drop, percentage points
    pub soh_drop: f64,
}

impl HealthStats {
    /// Take the health aggregates of `record`.
    #[must_use]
    pub const fn from_record(record: &CycleRecord) -> Self {
        Self {
            average_soc: record.average_soc,
            min_soc: record.min_soc,
            max_soc: record.max_soc,
            average_soh: record.average_soh,
            soh_drop: record.soh_drop,
        }
    }
}

/// Summary under the performance chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStats {
    /// Distance, km
    pub total_distance: f64,
    /// Average speed, km/h
    pub average_speed: f64,
    /// Maximum speed, km/h
    pub max_speed: f64,
    /// Cycle length, hours
    pub duration_hours: f64,
}

impl PerformanceStats {
    /// Take the performance aggregates of `record`.
    #[must_use]
    pub const fn from_record(record: &CycleRecord) -> Self {
        Self {
            total_distance: record.total_distance,
            average_speed: record.average_speed,
            max_speed: record.max_speed,
            duration_hours: record.cycle_duration_hours,
        }
    }
}

/// Summary under the temperature histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureStats {
    /// Average temperature, °C
    pub average_temperature: f64,
    /// Minutes across all valid bins
    pub total_minutes: f64,
    /// Number of valid bins
    pub range_count: usize,
    /// Bin width in use
    pub bin_width: BinWidth,
}

impl TemperatureStats {
    /// Summarize the bins derived from `record` at `bin_width`.
    #[must_use]
    pub fn new(record: &CycleRecord, bins: &[TemperatureBin], bin_width: BinWidth) -> Self {
        Self {
            average_temperature: record.average_temperature,
            total_minutes: total_minutes(bins),
            range_count: bins.len(),
            bin_width,
        }
    }
}

// =============================================================================
// Charging
// =============================================================================

/// How often the battery was charged during a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargingPattern {
    /// No charging events
    None,
    /// One charge
    Single,
    /// Two charges
    Moderate,
    /// Three to five charges
    Frequent,
    /// More than five charges
    High,
}

impl ChargingPattern {
    /// Classify a charging event count.
    #[must_use]
    pub const fn from_count(count: u32) -> Self {
        match count {
            0 => Self::None,
            1 => Self::Single,
            2 => Self::Moderate,
            3..=5 => Self::Frequent,
            _ => Self::High,
        }
    }

    /// Advice text for the pattern.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::None => "No charging events detected during this cycle.",
            Self::Single => "Single charge cycle - battery maintained well.",
            Self::Moderate => "Moderate charging - good balance between usage and recharge.",
            Self::Frequent => "Frequent charging pattern - optimal for battery longevity.",
            Self::High => "High frequency charging - ensure charger is functioning properly.",
        }
    }
}

/// Assessment of the SOC at which charging typically starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChargeStartAdvice {
    /// Below 20%
    Low,
    /// 20% up to 40%
    Good,
    /// 40% and above
    Optimal,
}

impl ChargeStartAdvice {
    /// Classify an average charge-start SOC.
    #[must_use]
    pub fn from_soc(soc: f64) -> Self {
        if soc < 20.0 {
            Self::Low
        } else if soc < 40.0 {
            Self::Good
        } else {
            Self::Optimal
        }
    }

    /// Short annotation.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Low => "Low - consider charging earlier",
            Self::Good => "Good range",
            Self::Optimal => "Optimal - prevents deep discharge",
        }
    }
}

/// Charging behavior of one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChargingInsights {
    /// Charging events
    pub charging_events: u32,
    /// Events per hour of cycle
    pub charges_per_hour: f64,
    /// Average SOC when charging started, %
    pub average_charge_start_soc: f64,
    /// Average SOC over the cycle, %
    pub average_soc: f64,
    /// Cycle length, hours
    pub duration_hours: f64,
    /// SOC recovered per charge, assuming each charge ends full
    pub soc_gain_per_charge: f64,
    /// Frequency classification
    pub pattern: ChargingPattern,
    /// Charge-start classification
    pub advice: ChargeStartAdvice,
}

impl ChargingInsights {
    /// Derive insights from `record`. Missing numbers fall back to zero,
    /// except the duration which falls back to one hour.
    #[must_use]
    pub fn from_record(record: &CycleRecord) -> Self {
        let events = record.charging_instances_count;
        let start_soc = safe_number(Some(record.average_charge_start_soc), 0.0);
        let duration = safe_number(Some(record.cycle_duration_hours), 1.0);
        let soc_gain_per_charge = if events > 0 {
            (100.0 - start_soc) / f64::from(events)
        } else {
            0.0
        };
        Self {
            charging_events: events,
            charges_per_hour: safe_number(Some(f64::from(events) / duration), 0.0),
            average_charge_start_soc: start_soc,
            average_soc: safe_number(Some(record.average_soc), 0.0),
            duration_hours: duration,
            soc_gain_per_charge,
            pattern: ChargingPattern::from_count(events),
            advice: ChargeStartAdvice::from_soc(start_soc),
        }
    }
}

// =============================================================================
// Alerts
// =============================================================================

/// Safety alerts of one cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSummary {
    /// Reported warning count
    pub warning_count: u32,
    /// Reported protection count
    pub protection_count: u32,
    /// Warning messages
    pub warnings: Vec<String>,
    /// Protection messages
    pub protections: Vec<String>,
}

impl AlertSummary {
    /// Collect the alerts of `record`.
    #[must_use]
    pub fn from_record(record: &CycleRecord) -> Self {
        Self {
            warning_count: record.warning_count,
            protection_count: record.protection_count,
            warnings: record.alert_details.warnings.clone(),
            protections: record.alert_details.protections.clone(),
        }
    }

    /// Whether any alert message is present.
    #[must_use]
    pub fn has_alerts(&self) -> bool {
        !self.warnings.is_empty() || !self.protections.is_empty()
    }
}

// =============================================================================
// Long-term trend
// =============================================================================

/// SOH degradation across all cycles of a device.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendStats {
    /// Cycles in the list
    pub total_cycles: usize,
    /// SOH of the lowest-numbered cycle
    pub first_soh: f64,
    /// SOH of the highest-numbered cycle
    pub last_soh: f64,
    /// Lowest SOH
    pub min_soh: f64,
    /// Highest SOH
    pub max_soh: f64,
    /// `first_soh - last_soh`
    pub total_degradation: f64,
    /// Degradation divided by the number of cycles
    pub avg_degradation_per_cycle: f64,
}

impl TrendStats {
    /// Summarize average SOH across `cycles` in cycle-number order.
    ///
    /// Returns `None` if no cycle has a finite SOH.
    #[must_use]
    pub fn from_cycles(cycles: &CycleList) -> Option<Self> {
        let sorted = cycles.sorted_by_cycle();
        let soh = SeriesStats::from_values(sorted.iter().map(|r| r.average_soh))?;
        let total_degradation = soh.first - soh.last;
        Some(Self {
            total_cycles: sorted.len(),
            first_soh: soh.first,
            last_soh: soh.last,
            min_soh: soh.min,
            max_soh: soh.max,
            total_degradation,
            avg_degradation_per_cycle: total_degradation / sorted.len() as f64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(n: u32, soh: f64) -> CycleRecord {
        CycleRecord {
            cycle_number: n,
            average_soh: soh,
            ..CycleRecord::default()
        }
    }

    #[test]
    fn test_series_stats_skips_non_finite() {
        let stats = SeriesStats::from_values([f64::NAN, 3.0, 1.0, f64::INFINITY, 2.0]).unwrap();
        assert_eq!(stats.first, 3.0);
        assert_eq!(stats.last, 2.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.count, 3);
        assert!(SeriesStats::from_values([f64::NAN]).is_none());
    }

    #[test]
    fn test_trend_stats_sorted_by_cycle() {
        let list: CycleList = [cycle(3, 98.0), cycle(1, 100.0), cycle(2, 99.0), cycle(4, 96.0)]
            .into_iter()
            .collect();
        let stats = TrendStats::from_cycles(&list).unwrap();
        assert_eq!(stats.total_cycles, 4);
        assert_eq!(stats.first_soh, 100.0);
        assert_eq!(stats.last_soh, 96.0);
        assert_eq!(stats.total_degradation, 4.0);
        assert_eq!(stats.avg_degradation_per_cycle, 1.0);
        assert_eq!(stats.min_soh, 96.0);
        assert_eq!(stats.max_soh, 100.0);
    }

    #[test]
    fn test_trend_stats_empty() {
        assert!(TrendStats::from_cycles(&CycleList::default()).is_none());
    }

    #[test]
    fn test_charging_insights() {
        let record = CycleRecord {
            charging_instances_count: 3,
            average_charge_start_soc: 40.0,
            cycle_duration_hours: 6.0,
            average_soc: 65.0,
            ..CycleRecord::default()
        };
        let insights = ChargingInsights::from_record(&record);
        assert_eq!(insights.soc_gain_per_charge, 20.0);
        assert_eq!(insights.charges_per_hour, 0.5);
        assert_eq!(insights.pattern, ChargingPattern::Frequent);
        assert_eq!(insights.advice, ChargeStartAdvice::Optimal);
    }

    #[test]
    fn test_charging_insights_fallbacks() {
        let record = CycleRecord {
            charging_instances_count: 2,
            average_charge_start_soc: f64::NAN,
            cycle_duration_hours: f64::NAN,
            ..CycleRecord::default()
        };
        let insights = ChargingInsights::from_record(&record);
        assert_eq!(insights.duration_hours, 1.0);
        assert_eq!(insights.charges_per_hour, 2.0);
        assert_eq!(insights.soc_gain_per_charge, 50.0);
        assert_eq!(insights.advice, ChargeStartAdvice::Low);
    }

    #[test]
    fn test_zero_duration_does_not_show_infinity() {
        let record = CycleRecord {
            charging_instances_count: 1,
            ..CycleRecord::default()
        };
        assert_eq!(ChargingInsights::from_record(&record).charges_per_hour, 0.0);
    }

    #[test]
    fn test_pattern_boundaries() {
        assert_eq!(ChargingPattern::from_count(0), ChargingPattern::None);
        assert_eq!(ChargingPattern::from_count(2), ChargingPattern::Moderate);
        assert_eq!(ChargingPattern::from_count(5), ChargingPattern::Frequent);
        assert_eq!(ChargingPattern::from_count(6), ChargingPattern::High);
        assert_eq!(ChargeStartAdvice::from_soc(20.0), ChargeStartAdvice::Good);
    }

    #[test]
    fn test_alert_summary() {
        let mut record = CycleRecord::default();
        assert!(!AlertSummary::from_record(&record).has_alerts());
        record.alert_details.protections.push("Over-current".into());
        record.protection_count = 1;
        let alerts = AlertSummary::from_record(&record);
        assert!(alerts.has_alerts());
        assert_eq!(alerts.protection_count, 1);
    }

    #[test]
    fn test_per_cycle_summaries() {
        let record = CycleRecord {
            average_soc: 70.0,
            soh_drop: 0.2,
            total_distance: 42.0,
            cycle_duration_hours: 3.0,
            average_temperature: 28.0,
            ..CycleRecord::default()
        };
        assert_eq!(HealthStats::from_record(&record).soh_drop, 0.2);
        assert_eq!(PerformanceStats::from_record(&record).duration_hours, 3.0);
        let bins = vec![TemperatureBin {
            range: "20-30".into(),
            range_start: 20.0,
            range_end: 30.0,
            minutes: 180.0,
        }];
        let temp = TemperatureStats::new(&record, &bins, BinWidth::Ten);
        assert_eq!(temp.total_minutes, 180.0);
        assert_eq!(temp.range_count, 1);
    }
}
