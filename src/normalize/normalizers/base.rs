use crate::types::{CanonicalRecord, RawTabularRow, RecordKind};

/// One target schema's row conversion.
pub trait RecordNormalizer: Send + Sync {
    /// Convert `rows`, keeping only records from the latest `window_days` distinct days.
    fn normalize(&self, rows: &[RawTabularRow], window_days: usize) -> Vec<CanonicalRecord>;

    fn kind(&self) -> RecordKind;

    /// Name used in logs.
    fn name(&self) -> &str;
}
