use tracing::debug;

use super::base::RecordNormalizer;
use crate::normalize::coerce::float_or_zero;
use crate::normalize::dates::resolve_date;
use crate::normalize::window::retain_latest;
use crate::types::{day_key, CanonicalRecord, DietaryRecord, RawTabularRow, RecordKind};

const DEFAULT_SERVING_UNIT: &str = "g";

/// Normalizer for per-meal dietary tables.
///
/// Every row becomes its own record, since one day holds several meals.
/// Numeric cells default to zero instead of being dropped.
pub struct DietaryNormalizer;

impl DietaryNormalizer {
    pub fn new() -> Self {
        Self
    }

    fn convert(row: &RawTabularRow) -> DietaryRecord {
        let text = |name: &str, default: &str| row.field(name).unwrap_or(default).trim().to_string();
        let number = |name: &str| float_or_zero(row.field(name));

        DietaryRecord {
            recorded_at: resolve_date(row.date()).recorded_at(),
            meal_type: text("meal_type", ""),
            food_name: text("food_name", ""),
            serving_size: number("serving_size"),
            serving_unit: text("unit", DEFAULT_SERVING_UNIT),
            calories: number("calories"),
            protein: number("protein"),
            carbohydrates: number("carbs"),
            fat: number("fat"),
            fiber: number("fiber"),
            sugar: number("sugar"),
            sodium: number("sodium"),
        }
    }
}

impl Default for DietaryNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordNormalizer for DietaryNormalizer {
    fn normalize(&self, rows: &[RawTabularRow], window_days: usize) -> Vec<CanonicalRecord> {
        let converted: Vec<DietaryRecord> = rows
            .iter()
            .filter(|row| {
                let has_date = !row.date().trim().is_empty();
                if !has_date {
                    debug!("Skipping dietary row without a date");
                }
                has_date
            })
            .map(Self::convert)
            .collect();

        retain_latest(converted, window_days, |r: &DietaryRecord| day_key(&r.recorded_at))
            .into_iter()
            .map(CanonicalRecord::Dietary)
            .collect()
    }

    fn kind(&self) -> RecordKind {
        RecordKind::Dietary
    }

    fn name(&self) -> &str {
        "Dietary Intake Normalizer"
    }
}
