//! Synthetic progression series.
//!
//! Records carry only aggregates (min/avg/max/total), so the health and
//! performance charts plot shapes derived from those aggregates. These are
//! illustrative approximations of undersampled telemetry, not measured
//! curves: do not treat them as sensor data.

use crate::record::CycleRecord;
use cellscope_core::same_value;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Points in the health progression: start, 25%, 50%, 75%, end.
pub const HEALTH_POINTS: usize = 5;

/// Points in the performance progression.
pub const PERFORMANCE_POINTS: usize = 21;

/// Steepness of the cumulative-distance logistic curve.
const SIGMOID_STEEPNESS: f64 = 10.0;

/// Share of the avg-to-max speed gap reached at mid-cycle.
const SPEED_SWING: f64 = 0.7;

/// One point of a progression series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Position along the x axis
    pub x: f64,
    /// Value
    pub y: f64,
}

impl PartialEq for SeriesPoint {
    fn eq(&self, other: &Self) -> bool {
        same_value(self.x, other.x) && same_value(self.y, other.y)
    }
}

/// SOC and SOH across one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSeries {
    /// State of charge, rising from min through avg to max
    pub soc: Vec<SeriesPoint>,
    /// State of health, falling from max through avg to min
    pub soh: Vec<SeriesPoint>,
}

/// Derive the health progression of `record`.
///
/// SOC interpolates min → avg → max with midpoints between. SOH runs
/// max → avg → min, stepping down a quarter of the cycle's SOH drop on the
/// way into and out of the average.
#[must_use]
pub fn health_series(record: &CycleRecord) -> HealthSeries {
    let (soc_min, soc_avg, soc_max) = (record.min_soc, record.average_soc, record.max_soc);
    let soc = [
        soc_min,
        (soc_min + soc_avg) / 2.0,
        soc_avg,
        (soc_avg + soc_max) / 2.0,
        soc_max,
    ];

    let quarter_drop = record.soh_drop * 0.25;
    let soh = [
        record.max_soh,
        record.max_soh - quarter_drop,
        record.average_soh,
        record.average_soh - quarter_drop,
        record.min_soh,
    ];

    let points = |values: [f64; HEALTH_POINTS]| {
        values
            .iter()
            .enumerate()
            .map(|(i, &y)| SeriesPoint { x: i as f64, y })
            .collect()
    };
    HealthSeries {
        soc: points(soc),
        soh: points(soh),
    }
}

/// One sample of the performance progression.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PerformancePoint {
    /// Fraction of the cycle elapsed, 0..=1
    pub progress: f64,
    /// Hours since cycle start
    pub time: f64,
    /// Cumulative distance, km
    pub distance: f64,
    /// Speed, km/h, never negative
    pub speed: f64,
}

impl PartialEq for PerformancePoint {
    fn eq(&self, other: &Self) -> bool {
        same_value(self.progress, other.progress)
            && same_value(self.time, other.time)
            && same_value(self.distance, other.distance)
            && same_value(self.speed, other.speed)
    }
}

fn sigmoid(progress: f64) -> f64 {
    1.0 / (1.0 + (-SIGMOID_STEEPNESS * (progress - 0.5)).exp())
}

/// Cumulative share of distance at `progress`.
///
/// A logistic curve rescaled so it is exactly 0 at the start and exactly 1
/// at the end; the raw logistic misses both endpoints by about 0.7%.
#[must_use]
pub fn distance_fraction(progress: f64) -> f64 {
    let lo = sigmoid(0.0);
    let hi = sigmoid(1.0);
    ((sigmoid(progress) - lo) / (hi - lo)).clamp(0.0, 1.0)
}

/// Speed at `progress`: average at both ends, swinging toward max mid-cycle.
#[must_use]
pub fn speed_at(progress: f64, average: f64, max: f64) -> f64 {
    let speed = (max - average).mul_add((progress * PI).sin() * SPEED_SWING, average);
    speed.max(0.0)
}

/// Derive the performance progression of `record`.
#[must_use]
pub fn performance_series(record: &CycleRecord) -> Vec<PerformancePoint> {
    let last = (PERFORMANCE_POINTS - 1) as f64;
    (0..PERFORMANCE_POINTS)
        .map(|i| {
            let progress = i as f64 / last;
            PerformancePoint {
                progress,
                time: record.cycle_duration_hours * progress,
                distance: record.total_distance * distance_fraction(progress),
                speed: speed_at(progress, record.average_speed, record.max_speed),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn record() -> CycleRecord {
        CycleRecord {
            average_soc: 70.0,
            min_soc: 20.0,
            max_soc: 95.0,
            average_soh: 97.0,
            min_soh: 96.5,
            max_soh: 97.6,
            soh_drop: 0.4,
            cycle_duration_hours: 8.0,
            total_distance: 120.0,
            average_speed: 20.0,
            max_speed: 60.0,
            ..CycleRecord::default()
        }
    }

    #[test]
    fn test_soc_points() {
        let series = health_series(&record());
        let ys: Vec<f64> = series.soc.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![20.0, 45.0, 70.0, 82.5, 95.0]);
        assert_eq!(series.soc[4].x, 4.0);
    }

    #[test]
    fn test_soh_points() {
        let series = health_series(&record());
        assert_eq!(series.soh.len(), HEALTH_POINTS);
        assert_eq!(series.soh[0].y, 97.6);
        assert!((series.soh[1].y - 97.5).abs() < 1e-9);
        assert_eq!(series.soh[2].y, 97.0);
        assert!((series.soh[3].y - 96.9).abs() < 1e-9);
        assert_eq!(series.soh[4].y, 96.5);
    }

    #[test]
    fn test_health_is_deterministic() {
        assert_eq!(health_series(&record()), health_series(&record()));
    }

    #[test]
    fn test_performance_endpoints() {
        let series = performance_series(&record());
        assert_eq!(series.len(), PERFORMANCE_POINTS);
        assert!(series[0].distance.abs() < 1e-9);
        assert!((series[20].distance - 120.0).abs() < 1e-9);
        assert_eq!(series[20].time, 8.0);
        assert!((series[10].distance - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_speed_peaks_mid_cycle() {
        let series = performance_series(&record());
        assert!((series[0].speed - 20.0).abs() < 1e-9);
        assert!((series[10].speed - 48.0).abs() < 1e-9);
    }

    #[test]
    fn test_speed_clamped_at_zero() {
        assert_eq!(speed_at(0.5, 10.0, -50.0), 0.0);
    }

    proptest! {
        #[test]
        fn prop_speed_non_negative(
            p in 0.0f64..=1.0,
            avg in -50.0f64..100.0,
            max in -50.0f64..150.0,
        ) {
            prop_assert!(speed_at(p, avg, max) >= 0.0);
        }

        #[test]
        fn prop_distance_monotonic(total in 0.0f64..10_000.0) {
            let rec = CycleRecord { total_distance: total, ..CycleRecord::default() };
            let series = performance_series(&rec);
            prop_assert!(series.windows(2).all(|w| w[0].distance <= w[1].distance + 1e-9));
            prop_assert!(series[0].distance.abs() < 1e-6);
            prop_assert!((series[PERFORMANCE_POINTS - 1].distance - total).abs() < 1e-6);
        }
    }
}
