pub mod config;
pub mod constants;
pub mod conversation;
pub mod entries;
pub mod error;
pub mod logging;
pub mod normalize;
pub mod profile;
pub mod samples;
pub mod session;
pub mod tabular;
pub mod types;

// Layered boundaries: use cases and ports in `app`, adapters in `infra`
pub mod app;
pub mod infra;

pub use entries::{parse_entries, EntrySchema, FreeTextEntry};
pub use error::{ClientError, Result};
pub use normalize::{normalize, normalize_with_window};
pub use types::{Assistant, CanonicalRecord, RawTabularRow, RecordKind};
