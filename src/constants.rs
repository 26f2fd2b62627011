//! Backend paths and fixed values shared across the client.
//! Path constants are relative to the configured API base URL.

// Assistant path prefixes
pub const NUTRITIONIST_PREFIX: &str = "/ai-nutritionist";
pub const COACH_PREFIX: &str = "/ai-coach";

// Conversation endpoints (appended to an assistant prefix)
pub const CONVERSATION_PATH: &str = "/conversation";
pub const SEND_MESSAGE_PATH: &str = "/conversation/messages";
pub const SEND_MESSAGE_WITH_DATA_PATH: &str = "/conversation/messages-with-data";
pub const CLEAR_CONVERSATION_PATH: &str = "/conversation/clear";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

// The backend's mock auth maps this token to the shared test user
pub const DEFAULT_AUTH_TOKEN: &str = "bearer streamlit";

pub const DEFAULT_SESSION_PATH: &str = ".foodtein/session.json";

/// Number of distinct calendar days kept when trimming uploaded tables.
pub const DEFAULT_WINDOW_DAYS: usize = 7;

// Time anchors for date-only inputs
pub const RECORDED_AT_SUFFIX: &str = "T12:00:00Z";
pub const STARTED_AT_SUFFIX: &str = "T00:00:00Z";

// Message roles as encoded by the backend
pub const MESSAGE_ROLE_USER: i64 = 0;
pub const MESSAGE_ROLE_ASSISTANT: i64 = 1;

// Expected CSV columns per table
pub const HEALTH_CSV_COLUMNS: &[&str] = &["date", "metric", "value"];
pub const DIETARY_CSV_COLUMNS: &[&str] = &[
    "date",
    "meal_type",
    "food_name",
    "serving_size",
    "unit",
    "calories",
    "protein",
    "carbs",
    "fat",
    "fiber",
];
pub const WORKOUT_CSV_COLUMNS: &[&str] = &[
    "date",
    "workout_name",
    "category",
    "duration_mins",
    "completed",
];

pub const DIETARY_TYPE_OPTIONS: &[&str] = &["Halal", "Vegetarian", "Vegan", "Pescatarian", "Kosher"];
