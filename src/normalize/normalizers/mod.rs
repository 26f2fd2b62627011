pub mod base;
pub mod dietary;
pub mod health;
pub mod workout;

pub use base::RecordNormalizer;
pub use dietary::DietaryNormalizer;
pub use health::{HealthMetric, HealthNormalizer};
pub use workout::WorkoutNormalizer;
