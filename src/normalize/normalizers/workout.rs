use std::collections::BTreeMap;
use tracing::debug;

use super::base::RecordNormalizer;
use crate::normalize::coerce::{parse_bool, parse_float};
use crate::normalize::dates::resolve_date;
use crate::normalize::window::latest_keys;
use crate::types::{day_key, CanonicalRecord, RawTabularRow, RecordKind, WorkoutRecord};

/// Normalizer for `date, workout_name, category, duration_mins, completed` tables.
/// Rows landing on the same day merge; later rows overwrite only the fields they carry.
pub struct WorkoutNormalizer;

impl WorkoutNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WorkoutNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// `duration_mins` as seconds; zero or unparseable means no duration.
pub fn duration_seconds(duration_mins: Option<&str>) -> Option<i64> {
    duration_mins
        .and_then(parse_float)
        .filter(|mins| *mins != 0.0)
        .map(|mins| (mins * 60.0).trunc() as i64)
}

fn merge_row(record: &mut WorkoutRecord, row: &RawTabularRow) {
    if let Some(name) = row.field("workout_name") {
        record.workout_name = name.trim().to_string();
    }
    if let Some(category) = row.field("category") {
        record.category = category.trim().to_string();
    }
    if row.field("completed").is_some() {
        record.is_completed = parse_bool(row.field("completed"));
    }
    if let Some(seconds) = duration_seconds(row.field("duration_mins")) {
        record.duration_seconds = Some(seconds);
    }
}

impl RecordNormalizer for WorkoutNormalizer {
    fn normalize(&self, rows: &[RawTabularRow], window_days: usize) -> Vec<CanonicalRecord> {
        let mut by_day: BTreeMap<String, WorkoutRecord> = BTreeMap::new();

        for row in rows {
            if row.date().trim().is_empty() {
                debug!("Skipping workout row without a date");
                continue;
            }
            let resolved = resolve_date(row.date());
            let date = resolved.date_only();
            let record = by_day
                .entry(day_key(&date).to_string())
                .or_insert_with(|| WorkoutRecord {
                    started_at: resolved.started_at(),
                    date: date.clone(),
                    ..Default::default()
                });
            merge_row(record, row);
        }

        let keep = latest_keys(by_day.keys().map(String::as_str), window_days);
        by_day
            .into_iter()
            .filter(|(day, _)| keep.contains(day))
            .map(|(_, record)| CanonicalRecord::Workout(record))
            .collect()
    }

    fn kind(&self) -> RecordKind {
        RecordKind::Workout
    }

    fn name(&self) -> &str {
        "Workout History Normalizer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workout_row(date: &str, name: &str, mins: &str, completed: &str) -> RawTabularRow {
        RawTabularRow::named(
            date,
            [
                ("workout_name", name),
                ("category", "strength"),
                ("duration_mins", mins),
                ("completed", completed),
            ],
        )
    }

    #[test]
    fn test_duration_seconds() {
        assert_eq!(duration_seconds(Some("45")), Some(2700));
        assert_eq!(duration_seconds(Some("0.5")), Some(30));
        assert_eq!(duration_seconds(Some("0")), None);
        assert_eq!(duration_seconds(Some("")), None);
        assert_eq!(duration_seconds(None), None);
    }

    #[test]
    fn test_dates_are_anchored_at_midnight() {
        let rows = vec![workout_row("02/10/2026", "Full Body Strength", "45", "true")];
        let out = WorkoutNormalizer::new().normalize(&rows, 7);
        let record = out[0].as_workout().unwrap();
        assert_eq!(record.date, "2026-02-10");
        assert_eq!(record.started_at, "2026-02-10T00:00:00Z");
        assert!(record.is_completed);
        assert_eq!(record.duration_seconds, Some(2700));
    }

    #[test]
    fn test_same_day_rows_merge_by_field() {
        let rows = vec![
            workout_row("2026-02-10", "Morning Run", "30", "true"),
            RawTabularRow::named("2026-02-10", [("workout_name", "Evening Lift")]),
        ];
        let out = WorkoutNormalizer::new().normalize(&rows, 7);
        assert_eq!(out.len(), 1);
        let record = out[0].as_workout().unwrap();
        assert_eq!(record.workout_name, "Evening Lift");
        assert_eq!(record.category, "strength");
        assert_eq!(record.duration_seconds, Some(1800));
        assert!(record.is_completed);
    }

    #[test]
    fn test_equivalent_date_spellings_share_a_day() {
        let rows = vec![
            workout_row("2026-02-10", "Run", "30", "true"),
            workout_row("02/10/2026", "Lift", "", "false"),
        ];
        let out = WorkoutNormalizer::new().normalize(&rows, 7);
        assert_eq!(out.len(), 1);
        assert!(!out[0].as_workout().unwrap().is_completed);
    }
}
