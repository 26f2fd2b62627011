use serde::Serialize;
use serde_json::Value;

use crate::entries::FreeTextEntry;
use crate::normalize::normalize_with_window;
use crate::session::Session;
use crate::types::{Assistant, CanonicalRecord, RecordKind};

/// Body of `POST /ai-nutritionist/conversation/messages-with-data`.
/// Every field is sent, even when empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionistPayload {
    pub message: String,
    pub health_data: Vec<CanonicalRecord>,
    pub dietary_data: Vec<CanonicalRecord>,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub dietary_type: String,
    pub food_allergies: Vec<FreeTextEntry>,
    pub disliked_foods: Vec<FreeTextEntry>,
    pub diseases: Vec<FreeTextEntry>,
    pub illnesses: Vec<FreeTextEntry>,
}

/// Body of `POST /ai-coach/conversation/messages-with-data`.
/// Profile fields are omitted until the user sets them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoachPayload {
    pub message: String,
    pub health_data: Vec<CanonicalRecord>,
    pub workout_history: Vec<CanonicalRecord>,
    pub available_workouts: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MessagePayload {
    Nutritionist(NutritionistPayload),
    Coach(CoachPayload),
}

impl MessagePayload {
    pub fn message(&self) -> &str {
        match self {
            MessagePayload::Nutritionist(p) => &p.message,
            MessagePayload::Coach(p) => &p.message,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn positive(value: f64) -> Option<f64> {
    (value > 0.0).then_some(value)
}

impl NutritionistPayload {
    pub fn from_session(session: &Session, message: &str, window_days: usize) -> Self {
        let profile = &session.profile;
        Self {
            message: message.to_string(),
            health_data: normalize_with_window(&session.health_rows, RecordKind::Health, window_days),
            dietary_data: normalize_with_window(&session.dietary_rows, RecordKind::Dietary, window_days),
            name: profile.name.clone(),
            age: profile.age,
            gender: profile.gender.clone(),
            height: profile.height,
            weight: profile.weight,
            dietary_type: profile.dietary_type(),
            food_allergies: profile.food_allergy_entries(),
            disliked_foods: profile.disliked_food_entries(),
            diseases: profile.disease_entries(),
            illnesses: profile.illness_entries(),
        }
    }
}

impl CoachPayload {
    pub fn from_session(session: &Session, message: &str, window_days: usize) -> Self {
        let profile = &session.profile;
        Self {
            message: message.to_string(),
            health_data: normalize_with_window(&session.health_rows, RecordKind::Health, window_days),
            workout_history: normalize_with_window(&session.workout_rows, RecordKind::Workout, window_days),
            available_workouts: session.available_workouts.clone(),
            name: non_empty(&profile.name),
            age: (profile.age > 0).then_some(profile.age),
            gender: non_empty(&profile.gender),
            height: positive(profile.height),
            weight: positive(profile.weight),
        }
    }
}

/// Build the request body for the session's assistant.
pub fn build_payload(session: &Session, message: &str, window_days: usize) -> MessagePayload {
    match session.assistant {
        Assistant::Nutritionist => {
            MessagePayload::Nutritionist(NutritionistPayload::from_session(session, message, window_days))
        }
        Assistant::Coach => MessagePayload::Coach(CoachPayload::from_session(session, message, window_days)),
    }
}
