//! Tolerant conversion of uploaded tables into canonical records.
//!
//! Every row's date runs through [`dates::resolve_date`]; rows are then
//! mapped into the schema for the requested [`RecordKind`], grouped by
//! calendar day, and trimmed to the latest few distinct days. Malformed
//! cells never abort a call: the offending field is dropped (health),
//! zeroed (dietary), or the raw date is passed through.

pub mod coerce;
pub mod dates;
pub mod normalizers;
pub mod window;

use tracing::debug;

use crate::constants::DEFAULT_WINDOW_DAYS;
use crate::types::{CanonicalRecord, RawTabularRow, RecordKind};
use normalizers::{DietaryNormalizer, HealthNormalizer, RecordNormalizer, WorkoutNormalizer};

pub use dates::{ensure_iso_timestamp, resolve_date, ResolvedDate};

static HEALTH: HealthNormalizer = HealthNormalizer;
static DIETARY: DietaryNormalizer = DietaryNormalizer;
static WORKOUT: WorkoutNormalizer = WorkoutNormalizer;

/// The normalizer responsible for `kind`.
pub fn normalizer_for(kind: RecordKind) -> &'static dyn RecordNormalizer {
    match kind {
        RecordKind::Health => &HEALTH,
        RecordKind::Dietary => &DIETARY,
        RecordKind::Workout => &WORKOUT,
    }
}

/// Normalize `rows` into canonical records covering at most seven distinct days.
pub fn normalize(rows: &[RawTabularRow], kind: RecordKind) -> Vec<CanonicalRecord> {
    normalize_with_window(rows, kind, DEFAULT_WINDOW_DAYS)
}

/// [`normalize`] with an explicit trailing-window size.
pub fn normalize_with_window(rows: &[RawTabularRow], kind: RecordKind, window_days: usize) -> Vec<CanonicalRecord> {
    let normalizer = normalizer_for(kind);
    let records = normalizer.normalize(rows, window_days);
    debug!(
        normalizer = normalizer.name(),
        rows = rows.len(),
        records = records.len(),
        "Normalized tabular rows"
    );
    records
}

/// Canonical records sorted ascending by day, for display.
pub fn preview(rows: &[RawTabularRow], kind: RecordKind, window_days: usize) -> Vec<CanonicalRecord> {
    let mut records = normalize_with_window(rows, kind, window_days);
    records.sort_by(|a, b| a.day().cmp(b.day()));
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizer_for_matches_kind() {
        for kind in RecordKind::ALL {
            assert_eq!(normalizer_for(kind).kind(), kind);
        }
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        for kind in RecordKind::ALL {
            assert!(normalize(&[], kind).is_empty());
        }
    }

    #[test]
    fn test_preview_sorts_dietary_by_day() {
        let rows = vec![
            RawTabularRow::named("2026-02-10", [("food_name", "Toast")]),
            RawTabularRow::named("2026-02-09", [("food_name", "Oats")]),
        ];
        let records = preview(&rows, RecordKind::Dietary, 7);
        assert_eq!(records[0].day(), "2026-02-09");
        assert_eq!(records[1].day(), "2026-02-10");
    }
}
