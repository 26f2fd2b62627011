//! Parser for the `field:field:field` mini-language used for allergies,
//! disliked foods, diseases and illnesses.
//!
//! Entries are separated by `|` or newlines; each entry's `:`-separated
//! parts bind positionally to a field list. Missing trailing parts leave
//! their fields unbound rather than empty.

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One parsed entry: the leading fields of a schema bound to values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeTextEntry {
    bindings: Vec<(String, String)>,
}

impl FreeTextEntry {
    pub fn get(&self, field: &str) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Number of fields bound.
    pub fn bound(&self) -> usize {
        self.bindings.len()
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for FreeTextEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.bindings.len()))?;
        for (name, value) in &self.bindings {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Split `text` into entries and bind each entry's parts to `field_names`.
pub fn parse_entries(text: &str, field_names: &[&str]) -> Vec<FreeTextEntry> {
    let normalized = text.replace('\n', "|");
    normalized
        .split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| FreeTextEntry {
            bindings: field_names
                .iter()
                .zip(segment.split(':').map(str::trim))
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        })
        .collect()
}

/// The profile fields written in the mini-language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntrySchema {
    FoodAllergy,
    DislikedFood,
    Disease,
    Illness,
}

impl EntrySchema {
    pub fn fields(&self) -> &'static [&'static str] {
        match self {
            EntrySchema::FoodAllergy => &["food_item", "severity", "symptoms"],
            EntrySchema::DislikedFood => &["food_item", "reason"],
            EntrySchema::Disease => &["name", "type", "status", "medication"],
            EntrySchema::Illness => &["name", "severity", "status"],
        }
    }

    /// Example input shown to users.
    pub fn placeholder(&self) -> &'static str {
        match self {
            EntrySchema::FoodAllergy => "peanuts:severe:swelling | shellfish:mild | tree nuts",
            EntrySchema::DislikedFood => "broccoli:doesn't like texture | mushrooms",
            EntrySchema::Disease => "diabetes:chronic:active:insulin | hypertension:chronic:managed",
            EntrySchema::Illness => "flu:moderate:recovering | cold:mild:active",
        }
    }

    pub fn parse(&self, text: &str) -> Vec<FreeTextEntry> {
        parse_entries(text, self.fields())
    }
}
