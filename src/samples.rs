//! Example tables used for CSV templates and for `--sample` sessions.

use serde_json::{json, Value};

use crate::types::{Assistant, RawTabularRow, RecordKind};

/// Health metrics in the `date, metric, value` layout.
pub fn health_rows() -> Vec<RawTabularRow> {
    [
        ("Steps", "8234"),
        ("Sleep (hours)", "7.5"),
        ("Heart Rate (bpm)", "72"),
        ("Blood Pressure (mmHg)", "120/80"),
        ("Body Fat (%)", "22.5"),
        ("Oxygen Saturation (%)", "98"),
    ]
    .into_iter()
    .map(|(metric, value)| RawTabularRow::labeled("2026-02-10", metric, value))
    .collect()
}

/// Health metrics as the coach UI labels them, spread over two days.
pub fn coach_health_rows() -> Vec<RawTabularRow> {
    [
        ("2026-02-10", "Steps", "8500"),
        ("2026-02-10", "Sleep Duration", "7.5"),
        ("2026-02-10", "Heart Rate", "72"),
        ("2026-02-10", "Blood Pressure", "120/80"),
        ("2026-02-10", "Body Fat", "18.5"),
        ("2026-02-10", "Oxygen Saturation", "98.0"),
        ("2026-02-09", "Steps", "10200"),
        ("2026-02-09", "Sleep Duration", "8.0"),
        ("2026-02-09", "Heart Rate", "68"),
    ]
    .into_iter()
    .map(|(date, metric, value)| RawTabularRow::labeled(date, metric, value))
    .collect()
}

fn meal(
    date: &str,
    meal_type: &str,
    food_name: &str,
    serving_size: &str,
    macros: [&str; 5],
) -> RawTabularRow {
    let [calories, protein, carbs, fat, fiber] = macros;
    RawTabularRow::named(
        date,
        [
            ("meal_type", meal_type),
            ("food_name", food_name),
            ("serving_size", serving_size),
            ("unit", "g"),
            ("calories", calories),
            ("protein", protein),
            ("carbs", carbs),
            ("fat", fat),
            ("fiber", fiber),
        ],
    )
}

/// Two days of four meals each.
pub fn dietary_rows() -> Vec<RawTabularRow> {
    vec![
        meal("2026-02-09", "breakfast", "Oatmeal with berries", "50", ["180", "6", "35", "3", "4"]),
        meal("2026-02-09", "lunch", "Grilled Chicken with Brown Rice", "300", ["450", "52", "43", "7", "5"]),
        meal("2026-02-09", "dinner", "Salmon with Sweet Potato", "350", ["520", "48", "38", "18", "6"]),
        meal("2026-02-09", "snack", "Greek Yogurt with Almonds", "150", ["220", "20", "12", "10", "2"]),
        meal("2026-02-10", "breakfast", "Eggs and Toast", "200", ["320", "18", "28", "12", "3"]),
        meal("2026-02-10", "lunch", "Tuna Salad", "280", ["280", "42", "8", "9", "3"]),
        meal("2026-02-10", "dinner", "Beef Stir-fry with Vegetables", "330", ["480", "46", "32", "16", "7"]),
        meal("2026-02-10", "snack", "Apple with Peanut Butter", "120", ["240", "8", "28", "11", "4"]),
    ]
}

/// Five consecutive days of completed workouts.
pub fn workout_rows() -> Vec<RawTabularRow> {
    [
        ("2026-02-10", "Full Body Strength", "strength", "45"),
        ("2026-02-09", "Cardio Blast", "cardio", "30"),
        ("2026-02-08", "Upper Body Focus", "strength", "40"),
        ("2026-02-07", "HIIT Training", "cardio", "25"),
        ("2026-02-06", "Lower Body Strength", "strength", "50"),
    ]
    .into_iter()
    .map(|(date, name, category, mins)| {
        RawTabularRow::named(
            date,
            [
                ("workout_name", name),
                ("category", category),
                ("duration_mins", mins),
                ("completed", "true"),
            ],
        )
    })
    .collect()
}

/// Example rows for a CSV template of `kind`.
pub fn template_rows(kind: RecordKind) -> Vec<RawTabularRow> {
    match kind {
        RecordKind::Health => health_rows(),
        RecordKind::Dietary => dietary_rows(),
        RecordKind::Workout => workout_rows(),
    }
}

/// Sample health table for an assistant's session.
pub fn health_rows_for(assistant: Assistant) -> Vec<RawTabularRow> {
    match assistant {
        Assistant::Nutritionist => health_rows(),
        Assistant::Coach => coach_health_rows(),
    }
}

fn exercise(id: u32, name: &str, extra: Value) -> Value {
    let mut value = json!({ "id": id, "name": name });
    if let (Some(target), Value::Object(fields)) = (value.as_object_mut(), extra) {
        target.extend(fields);
    }
    value
}

/// Workout catalog the coach may recommend from.
pub fn available_workouts() -> Vec<Value> {
    let dumbbell = json!({"id": 1, "name": "Dumbbell"});
    let barbell = json!({"id": 2, "name": "Barbell"});
    let treadmill = json!({"id": 3, "name": "Treadmill"});

    vec![
        json!({
            "id": 1,
            "name": "Full Body Strength",
            "category": "strength",
            "duration_minutes": 45,
            "difficulty_level": "intermediate",
            "description": "A comprehensive full-body strength workout",
            "primary_muscles": "chest, back, legs",
            "secondary_muscles": "shoulders, arms",
            "sets_count": 3,
            "equipment": [dumbbell, barbell],
            "exercises": [
                exercise(1, "Bench Press", json!({"reps": 10, "sets": 3, "rest_seconds": 90, "equipment": [barbell]})),
                exercise(2, "Deadlifts", json!({"reps": 8, "sets": 3, "rest_seconds": 120, "equipment": [barbell]})),
                exercise(3, "Squats", json!({"reps": 12, "sets": 3, "rest_seconds": 90, "equipment": [barbell]})),
            ],
        }),
        json!({
            "id": 2,
            "name": "Cardio Blast",
            "category": "cardio",
            "duration_minutes": 30,
            "difficulty_level": "beginner",
            "description": "Quick cardio workout to boost your heart rate",
            "primary_muscles": "cardiovascular",
            "secondary_muscles": "legs",
            "sets_count": 1,
            "equipment": [treadmill],
            "exercises": [
                exercise(4, "Running", json!({"duration_seconds": 1800, "equipment": [treadmill]})),
            ],
        }),
        json!({
            "id": 3,
            "name": "Upper Body Focus",
            "category": "strength",
            "duration_minutes": 40,
            "difficulty_level": "intermediate",
            "description": "Focused workout for chest, back, and arms",
            "primary_muscles": "chest, back, arms",
            "secondary_muscles": "shoulders",
            "sets_count": 3,
            "equipment": [dumbbell],
            "exercises": [
                exercise(5, "Dumbbell Chest Press", json!({"reps": 12, "sets": 3, "rest_seconds": 60, "equipment": [dumbbell]})),
                exercise(6, "Lat Pulldown", json!({"reps": 10, "sets": 3, "rest_seconds": 75, "equipment": []})),
            ],
        }),
        json!({
            "id": 4,
            "name": "HIIT Training",
            "category": "cardio",
            "duration_minutes": 25,
            "difficulty_level": "advanced",
            "description": "High-intensity interval training for maximum burn",
            "primary_muscles": "full body",
            "secondary_muscles": "cardiovascular",
            "sets_count": 2,
            "equipment": [],
            "exercises": [
                exercise(7, "Burpees", json!({"reps": 20, "rest_seconds": 30})),
                exercise(8, "Mountain Climbers", json!({"duration_seconds": 60, "rest_seconds": 30})),
                exercise(9, "Jump Squats", json!({"reps": 20, "rest_seconds": 30})),
            ],
        }),
        json!({
            "id": 5,
            "name": "Yoga & Flexibility",
            "category": "flexibility",
            "duration_minutes": 30,
            "difficulty_level": "beginner",
            "description": "Relax and improve flexibility with gentle yoga",
            "primary_muscles": "full body",
            "secondary_muscles": "flexibility",
            "sets_count": 1,
            "equipment": [],
            "exercises": [
                exercise(10, "Sun Salutation", json!({"duration_seconds": 600})),
                exercise(11, "Downward Dog", json!({"duration_seconds": 300})),
                exercise(12, "Child's Pose", json!({"duration_seconds": 300})),
            ],
        }),
    ]
}
