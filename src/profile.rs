use serde::{Deserialize, Serialize};

use crate::entries::{EntrySchema, FreeTextEntry};
use crate::error::{ClientError, Result};

/// Profile fields the user fills in before chatting.
///
/// Allergies, disliked foods, diseases and illnesses are kept as entered
/// and parsed when a request is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub gender: String,
    /// Centimetres.
    pub height: f64,
    /// Kilograms.
    pub weight: f64,
    pub dietary_types: Vec<String>,
    pub food_allergies: String,
    pub disliked_foods: String,
    pub diseases: String,
    pub illnesses: String,
}

impl UserProfile {
    /// Dietary preferences as the backend expects them, e.g. `"Halal, Vegan"`.
    pub fn dietary_type(&self) -> String {
        self.dietary_types.join(", ")
    }

    pub fn food_allergy_entries(&self) -> Vec<FreeTextEntry> {
        EntrySchema::FoodAllergy.parse(&self.food_allergies)
    }

    pub fn disliked_food_entries(&self) -> Vec<FreeTextEntry> {
        EntrySchema::DislikedFood.parse(&self.disliked_foods)
    }

    pub fn disease_entries(&self) -> Vec<FreeTextEntry> {
        EntrySchema::Disease.parse(&self.diseases)
    }

    pub fn illness_entries(&self) -> Vec<FreeTextEntry> {
        EntrySchema::Illness.parse(&self.illnesses)
    }

    /// Names of the fields that still need a value.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("Name".to_string());
        }
        if self.age == 0 {
            missing.push("Age (must be > 0)".to_string());
        }
        if self.gender.trim().is_empty() {
            missing.push("Gender".to_string());
        }
        if self.height <= 0.0 {
            missing.push("Height (must be > 0)".to_string());
        }
        if self.weight <= 0.0 {
            missing.push("Weight (must be > 0)".to_string());
        }
        missing
    }

    /// The coach refuses to answer without a complete profile.
    pub fn validate_for_coach(&self) -> Result<()> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ClientError::InvalidProfile(missing))
        }
    }
}
