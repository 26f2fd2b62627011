use std::collections::BTreeMap;
use tracing::debug;

use super::base::RecordNormalizer;
use crate::normalize::coerce::{parse_float, parse_int};
use crate::normalize::dates::resolve_date;
use crate::normalize::window::latest_keys;
use crate::types::{CanonicalRecord, HealthRecord, RawTabularRow, RecordKind};

/// Canonical health field targeted by a free-text metric label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthMetric {
    Steps,
    Sleep,
    HeartRate,
    BloodPressure,
    BodyFat,
    OxygenSaturation,
}

/// Label fragments in priority order. The first entry with a fragment
/// contained in the lower-cased label wins.
const LABEL_TABLE: &[(&[&str], HealthMetric)] = &[
    (&["steps"], HealthMetric::Steps),
    (&["sleep"], HealthMetric::Sleep),
    (&["heart", "hr"], HealthMetric::HeartRate),
    (&["blood pressure", "bp"], HealthMetric::BloodPressure),
    (&["body fat"], HealthMetric::BodyFat),
    (&["oxygen", "spo2"], HealthMetric::OxygenSaturation),
];

impl HealthMetric {
    /// Match a human-entered label such as `Heart Rate (bpm)`.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.to_lowercase();
        LABEL_TABLE
            .iter()
            .find(|(fragments, _)| fragments.iter().any(|f| label.contains(f)))
            .map(|(_, metric)| *metric)
    }

    /// Write `value` into the matching field. Returns false when the value
    /// does not parse; the record is left untouched in that case.
    fn apply(self, record: &mut HealthRecord, value: &str) -> bool {
        match self {
            HealthMetric::Steps => set(&mut record.steps_count, parse_int(value)),
            HealthMetric::Sleep => set(&mut record.sleep_duration, parse_float(value)),
            HealthMetric::HeartRate => set(&mut record.heart_rate, parse_int(value)),
            HealthMetric::BodyFat => set(&mut record.body_fat, parse_float(value)),
            HealthMetric::OxygenSaturation => set(&mut record.oxygen_saturation, parse_float(value)),
            HealthMetric::BloodPressure => match parse_blood_pressure(value) {
                Some((sys, dia)) => {
                    record.blood_pressure_sys = Some(sys);
                    record.blood_pressure_dia = Some(dia);
                    true
                }
                None => false,
            },
        }
    }
}

fn set<T>(slot: &mut Option<T>, parsed: Option<T>) -> bool {
    match parsed {
        Some(v) => {
            *slot = Some(v);
            true
        }
        None => false,
    }
}

/// `"120/80"` -> `(120, 80)`. Anything other than exactly two numeric parts drops both.
pub fn parse_blood_pressure(value: &str) -> Option<(i64, i64)> {
    let parts: Vec<&str> = value.split('/').collect();
    match parts.as_slice() {
        [sys, dia] => Some((parse_int(sys)?, parse_int(dia)?)),
        _ => None,
    }
}

/// Normalizer for `date, metric, value` health tables.
/// Rows sharing a raw date string merge into one record, field by field.
pub struct HealthNormalizer;

impl HealthNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HealthNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordNormalizer for HealthNormalizer {
    fn normalize(&self, rows: &[RawTabularRow], window_days: usize) -> Vec<CanonicalRecord> {
        let mut by_date: BTreeMap<String, HealthRecord> = BTreeMap::new();

        for row in rows {
            let date = row.date().trim();
            if date.is_empty() {
                debug!("Skipping health row without a date");
                continue;
            }

            let record = by_date.entry(date.to_string()).or_insert_with(|| HealthRecord {
                recorded_at: resolve_date(date).recorded_at(),
                ..Default::default()
            });

            let Some((label, value)) = row.measurement() else {
                debug!(date, "Health row has no metric/value pair");
                continue;
            };

            match HealthMetric::from_label(label) {
                Some(metric) => {
                    if !metric.apply(record, value) {
                        debug!(date, label, value, "Dropping unparseable health value");
                    }
                }
                None => debug!(date, label, "Dropping unrecognized health metric"),
            }
        }

        let keep = latest_keys(by_date.keys().map(String::as_str), window_days);
        by_date
            .into_iter()
            .filter(|(date, _)| keep.contains(date))
            .map(|(_, record)| CanonicalRecord::Health(record))
            .collect()
    }

    fn kind(&self) -> RecordKind {
        RecordKind::Health
    }

    fn name(&self) -> &str {
        "Health Metrics Normalizer"
    }
}
