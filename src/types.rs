use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::constants::{COACH_PREFIX, NUTRITIONIST_PREFIX};
use crate::error::ClientError;

/// One uploaded table row before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTabularRow {
    /// A single measurement named by a free-text label, e.g. `Heart Rate (bpm)`.
    Labeled {
        date: String,
        metric: String,
        value: String,
    },
    /// An already-structured row keyed by column name.
    Named {
        date: String,
        fields: BTreeMap<String, String>,
    },
}

impl RawTabularRow {
    pub fn labeled(date: impl Into<String>, metric: impl Into<String>, value: impl Into<String>) -> Self {
        RawTabularRow::Labeled {
            date: date.into(),
            metric: metric.into(),
            value: value.into(),
        }
    }

    pub fn named<K, V, I>(date: impl Into<String>, fields: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        RawTabularRow::Named {
            date: date.into(),
            fields: fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    pub fn date(&self) -> &str {
        match self {
            RawTabularRow::Labeled { date, .. } | RawTabularRow::Named { date, .. } => date,
        }
    }

    /// Look up a column. Labeled rows answer for `metric` and `value`.
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            RawTabularRow::Labeled { metric, value, .. } => match name {
                "metric" => Some(metric),
                "value" => Some(value),
                _ => None,
            },
            RawTabularRow::Named { fields, .. } => fields.get(name).map(String::as_str),
        }
    }

    /// The `(metric, value)` pair, from either shape.
    pub fn measurement(&self) -> Option<(&str, &str)> {
        Some((self.field("metric")?, self.field("value")?))
    }
}

/// Target schema for a normalization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Health,
    Dietary,
    Workout,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [RecordKind::Health, RecordKind::Dietary, RecordKind::Workout];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Health => "health",
            RecordKind::Dietary => "dietary",
            RecordKind::Workout => "workout",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "health" => Ok(RecordKind::Health),
            "dietary" | "diet" => Ok(RecordKind::Dietary),
            "workout" | "workouts" => Ok(RecordKind::Workout),
            other => Err(ClientError::UnknownRecordKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub recorded_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps_count: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_duration: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure_sys: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure_dia: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_fat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxygen_saturation: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietaryRecord {
    pub recorded_at: String,
    pub meal_type: String,
    pub food_name: String,
    pub serving_size: f64,
    pub serving_unit: String,
    pub calories: f64,
    pub protein: f64,
    pub carbohydrates: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRecord {
    pub date: String,
    pub started_at: String,
    pub workout_name: String,
    pub category: String,
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<i64>,
}

/// A normalized, schema-conformant record ready for the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
// Untagged variants are tried in order; health has the fewest required fields so it goes last.
#[serde(untagged)]
pub enum CanonicalRecord {
    Dietary(DietaryRecord),
    Workout(WorkoutRecord),
    Health(HealthRecord),
}

impl CanonicalRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            CanonicalRecord::Health(_) => RecordKind::Health,
            CanonicalRecord::Dietary(_) => RecordKind::Dietary,
            CanonicalRecord::Workout(_) => RecordKind::Workout,
        }
    }

    /// Calendar-day portion of the record's timestamp.
    pub fn day(&self) -> &str {
        let stamp = match self {
            CanonicalRecord::Health(r) => &r.recorded_at,
            CanonicalRecord::Dietary(r) => &r.recorded_at,
            CanonicalRecord::Workout(r) => &r.date,
        };
        day_key(stamp)
    }

    pub fn as_health(&self) -> Option<&HealthRecord> {
        match self {
            CanonicalRecord::Health(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_dietary(&self) -> Option<&DietaryRecord> {
        match self {
            CanonicalRecord::Dietary(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_workout(&self) -> Option<&WorkoutRecord> {
        match self {
            CanonicalRecord::Workout(r) => Some(r),
            _ => None,
        }
    }
}

/// First ten characters of a date or timestamp string (`YYYY-MM-DD`).
pub fn day_key(stamp: &str) -> &str {
    match stamp.char_indices().nth(10) {
        Some((idx, _)) => &stamp[..idx],
        None => stamp,
    }
}

/// Which assistant a session talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Assistant {
    Nutritionist,
    Coach,
}

impl Assistant {
    pub fn path_prefix(&self) -> &'static str {
        match self {
            Assistant::Nutritionist => NUTRITIONIST_PREFIX,
            Assistant::Coach => COACH_PREFIX,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Assistant::Nutritionist => "nutritionist",
            Assistant::Coach => "coach",
        }
    }
}

impl fmt::Display for Assistant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Assistant {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nutritionist" => Ok(Assistant::Nutritionist),
            "coach" => Ok(Assistant::Coach),
            other => Err(ClientError::UnknownAssistant(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_kind_from_str() {
        assert_eq!("Health".parse::<RecordKind>().unwrap(), RecordKind::Health);
        assert_eq!("diet".parse::<RecordKind>().unwrap(), RecordKind::Dietary);
        assert_eq!(" workouts ".parse::<RecordKind>().unwrap(), RecordKind::Workout);
        assert!(matches!(
            "healthz".parse::<RecordKind>(),
            Err(ClientError::UnknownRecordKind(_))
        ));
    }

    #[test]
    fn test_labeled_row_answers_metric_and_value() {
        let row = RawTabularRow::labeled("2026-02-07", "Steps", "100");
        assert_eq!(row.field("metric"), Some("Steps"));
        assert_eq!(row.measurement(), Some(("Steps", "100")));
        assert_eq!(row.field("calories"), None);
    }

    #[test]
    fn test_raw_rows_deserialize_by_shape() {
        let labeled: RawTabularRow =
            serde_json::from_value(json!({"date": "2026-02-07", "metric": "Steps", "value": "1"})).unwrap();
        assert!(matches!(labeled, RawTabularRow::Labeled { .. }));

        let named: RawTabularRow = serde_json::from_value(
            json!({"date": "2026-02-07", "fields": {"workout_name": "Run"}}),
        )
        .unwrap();
        assert_eq!(named.field("workout_name"), Some("Run"));
    }

    #[test]
    fn test_health_record_omits_absent_fields() {
        let record = HealthRecord {
            recorded_at: "2026-02-07T12:00:00Z".into(),
            steps_count: Some(100),
            ..Default::default()
        };
        let value = serde_json::to_value(CanonicalRecord::Health(record)).unwrap();
        assert_eq!(value, json!({"recorded_at": "2026-02-07T12:00:00Z", "steps_count": 100}));
    }

    #[test]
    fn test_day_key_handles_short_and_multibyte_input() {
        assert_eq!(day_key("2026-02-07T12:00:00Z"), "2026-02-07");
        assert_eq!(day_key("yesterday"), "yesterday");
        assert_eq!(day_key("ééééééééééééé"), "éééééééééé");
    }
}
