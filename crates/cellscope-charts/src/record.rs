//! Cycle records as delivered by the snapshot service.
//!
//! Records are read-only inputs. Numeric fields that arrive as `null` decode
//! to NaN so the stats helpers can substitute their fallbacks; temperature
//! maps keep raw JSON values so malformed entries reach the binning step
//! instead of failing the whole record.

use crate::binning::BinWidth;
use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Degree range key (`"20-25"`) to minutes spent in that range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemperatureMap(pub BTreeMap<String, serde_json::Value>);

impl TemperatureMap {
    /// Build from numeric entries.
    pub fn from_minutes<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        Self(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), serde_json::Value::from(v)))
                .collect(),
        )
    }

    /// Number of keys, valid or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Warning and protection messages raised during a cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertDetails {
    /// Warning messages
    pub warnings: Vec<String>,
    /// Protection trip messages
    pub protections: Vec<String>,
}

/// One charge/discharge cycle snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleRecord {
    /// Device IMEI
    pub imei: String,
    /// Cycle number, not guaranteed to arrive in order
    pub cycle_number: u32,
    /// Cycle start timestamp
    pub cycle_start_time: String,
    /// Cycle end timestamp
    pub cycle_end_time: String,
    /// Cycle length in hours
    #[serde(deserialize_with = "nullable")]
    pub cycle_duration_hours: f64,
    /// Raw telemetry samples in the cycle
    pub data_points_count: u64,

    /// SOH lost during the cycle, percentage points
    #[serde(deserialize_with = "nullable")]
    pub soh_drop: f64,
    /// Average state of charge, %
    #[serde(deserialize_with = "nullable")]
    pub average_soc: f64,
    /// Minimum state of charge, %
    #[serde(deserialize_with = "nullable")]
    pub min_soc: f64,
    /// Maximum state of charge, %
    #[serde(deserialize_with = "nullable")]
    pub max_soc: f64,
    /// Average state of health, %
    #[serde(deserialize_with = "nullable")]
    pub average_soh: f64,
    /// Minimum state of health, %
    #[serde(deserialize_with = "nullable")]
    pub min_soh: f64,
    /// Maximum state of health, %
    #[serde(deserialize_with = "nullable")]
    pub max_soh: f64,

    /// Average pack temperature, °C
    #[serde(deserialize_with = "nullable")]
    pub average_temperature: f64,
    /// Minutes per 5 °C range
    pub temperature_dist_5deg: TemperatureMap,
    /// Minutes per 10 °C range
    pub temperature_dist_10deg: TemperatureMap,
    /// Minutes per 15 °C range
    pub temperature_dist_15deg: TemperatureMap,
    /// Minutes per 20 °C range
    pub temperature_dist_20deg: TemperatureMap,

    /// Distance travelled, km
    #[serde(deserialize_with = "nullable")]
    pub total_distance: f64,
    /// Average speed, km/h
    #[serde(deserialize_with = "nullable")]
    pub average_speed: f64,
    /// Maximum speed, km/h
    #[serde(deserialize_with = "nullable")]
    pub max_speed: f64,

    /// Charging events in the cycle
    pub charging_instances_count: u32,
    /// Average SOC when charging started, %
    #[serde(deserialize_with = "nullable")]
    pub average_charge_start_soc: f64,

    /// Average pack voltage, V
    #[serde(deserialize_with = "nullable")]
    pub voltage_avg: f64,
    /// Minimum pack voltage, V
    #[serde(deserialize_with = "nullable")]
    pub voltage_min: f64,
    /// Maximum pack voltage, V
    #[serde(deserialize_with = "nullable")]
    pub voltage_max: f64,
    /// Average current, A
    #[serde(deserialize_with = "nullable")]
    pub current_avg: f64,

    /// Alert messages
    pub alert_details: AlertDetails,
    /// Number of warnings
    pub warning_count: u32,
    /// Number of protection trips
    pub protection_count: u32,

    /// Snapshot creation timestamp
    pub created_at: String,
}

fn nullable<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

impl CycleRecord {
    /// Decode one record from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The precomputed temperature map for `width`.
    #[must_use]
    pub const fn temperature_map(&self, width: BinWidth) -> &TemperatureMap {
        match width {
            BinWidth::Five => &self.temperature_dist_5deg,
            BinWidth::Ten => &self.temperature_dist_10deg,
            BinWidth::Fifteen => &self.temperature_dist_15deg,
            BinWidth::Twenty => &self.temperature_dist_20deg,
        }
    }
}

/// Cycles of one device in fetch order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CycleList(pub Vec<CycleRecord>);

impl CycleList {
    /// Decode a JSON array of records.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of cycles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Records in fetch order.
    #[must_use]
    pub fn records(&self) -> &[CycleRecord] {
        &self.0
    }

    /// Records ordered by ascending cycle number.
    #[must_use]
    pub fn sorted_by_cycle(&self) -> Vec<&CycleRecord> {
        let mut sorted: Vec<&CycleRecord> = self.0.iter().collect();
        sorted.sort_by_key(|r| r.cycle_number);
        sorted
    }

    /// Record with the given cycle number.
    #[must_use]
    pub fn find(&self, cycle_number: u32) -> Option<&CycleRecord> {
        self.0.iter().find(|r| r.cycle_number == cycle_number)
    }

    /// Highest-numbered cycle.
    #[must_use]
    pub fn latest(&self) -> Option<&CycleRecord> {
        self.0.iter().max_by_key(|r| r.cycle_number)
    }
}

impl FromIterator<CycleRecord> for CycleList {
    fn from_iter<T: IntoIterator<Item = CycleRecord>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Snapshot list envelope returned by the snapshot service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotsResponse {
    /// Whether the request succeeded
    pub success: bool,
    /// Records
    pub data: CycleList,
    /// Number of records returned
    pub count: usize,
}

impl SnapshotsResponse {
    /// Decode the envelope from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_full_record() {
        let json = r#"{
            "imei": "865044073967657",
            "cycle_number": 12,
            "cycle_start_time": "2025-01-01T00:00:00Z",
            "cycle_end_time": "2025-01-01T06:00:00Z",
            "cycle_duration_hours": 6.0,
            "data_points_count": 2160,
            "soh_drop": 0.12,
            "average_soc": 70.0, "min_soc": 20.0, "max_soc": 95.0,
            "average_soh": 97.5, "min_soh": 97.4, "max_soh": 97.6,
            "average_temperature": 27.3,
            "temperature_dist_5deg": {"20-25": 120.0, "25-30": 240.0},
            "temperature_dist_10deg": {"20-30": 360.0},
            "temperature_dist_15deg": {"15-30": 360.0},
            "temperature_dist_20deg": {"20-40": 360.0},
            "total_distance": 42.5, "average_speed": 18.0, "max_speed": 45.0,
            "charging_instances_count": 2, "average_charge_start_soc": 31.0,
            "voltage_avg": 51.2, "voltage_min": 48.0, "voltage_max": 54.6, "current_avg": 8.4,
            "alert_details": {"warnings": ["High temp"], "protections": []},
            "warning_count": 1, "protection_count": 0,
            "created_at": "2025-01-01T06:05:00Z"
        }"#;
        let record = CycleRecord::from_json(json).unwrap();
        assert_eq!(record.cycle_number, 12);
        assert_eq!(record.temperature_map(BinWidth::Five).len(), 2);
        assert_eq!(record.alert_details.warnings, vec!["High temp".to_string()]);
        assert_eq!(record.charging_instances_count, 2);
    }

    #[test]
    fn test_null_numbers_decode_as_nan() {
        let record = CycleRecord::from_json(r#"{"average_soc": null, "cycle_number": 3}"#).unwrap();
        assert!(record.average_soc.is_nan());
        assert_eq!(record.max_soc, 0.0);
    }

    #[test]
    fn test_malformed_map_value_survives_decode() {
        let record =
            CycleRecord::from_json(r#"{"temperature_dist_5deg": {"15-20": 10.0, "20-25": "bad"}}"#)
                .unwrap();
        assert_eq!(record.temperature_dist_5deg.len(), 2);
    }

    #[test]
    fn test_bad_json_is_record_error() {
        let err = CycleRecord::from_json("{").unwrap_err();
        assert!(matches!(err, crate::ChartError::Record(_)));
    }

    #[test]
    fn test_list_sorting_and_lookup() {
        let list: CycleList = [7, 2, 5]
            .into_iter()
            .map(|n| CycleRecord {
                cycle_number: n,
                ..CycleRecord::default()
            })
            .collect();
        let order: Vec<u32> = list.sorted_by_cycle().iter().map(|r| r.cycle_number).collect();
        assert_eq!(order, vec![2, 5, 7]);
        assert_eq!(list.find(5).map(|r| r.cycle_number), Some(5));
        assert_eq!(list.latest().map(|r| r.cycle_number), Some(7));
        assert!(list.find(9).is_none());
    }

    #[test]
    fn test_snapshots_envelope() {
        let resp = SnapshotsResponse::from_json(
            r#"{"success": true, "data": [{"cycle_number": 1}, {"cycle_number": 2}], "count": 2}"#,
        )
        .unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.len(), 2);
    }
}
