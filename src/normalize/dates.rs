use chrono::{Datelike, NaiveDate};

use crate::constants::{RECORDED_AT_SUFFIX, STARTED_AT_SUFFIX};

/// Date templates tried in order. `%m/%d/%Y` precedes `%d/%m/%Y`, so
/// `03/04/2026` is always March 4th.
pub const DATE_TEMPLATES: [&str; 5] = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%m-%d-%Y", "%d-%m-%Y"];

/// Outcome of resolving a human-entered date string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedDate {
    /// Already carries a time component; used verbatim.
    Qualified(String),
    /// Matched one of [`DATE_TEMPLATES`].
    Parsed(NaiveDate),
    /// Nothing matched; kept as entered.
    Opaque(String),
}

/// Resolve `raw` through the template chain.
pub fn resolve_date(raw: &str) -> ResolvedDate {
    let trimmed = raw.trim();
    if trimmed.contains('T') {
        return ResolvedDate::Qualified(trimmed.to_string());
    }

    DATE_TEMPLATES
        .iter()
        .find_map(|template| {
            NaiveDate::parse_from_str(trimmed, template)
                .ok()
                // chrono accepts short years for %Y; only four-digit years count
                .filter(|date| date.year() >= 1000)
        })
        .map(ResolvedDate::Parsed)
        .unwrap_or_else(|| ResolvedDate::Opaque(trimmed.to_string()))
}

impl ResolvedDate {
    /// Noon-UTC timestamp used for health and dietary `recorded_at`.
    pub fn recorded_at(&self) -> String {
        self.render(RECORDED_AT_SUFFIX)
    }

    /// Midnight-UTC timestamp used for workout `started_at`.
    pub fn started_at(&self) -> String {
        self.render(STARTED_AT_SUFFIX)
    }

    /// Bare `YYYY-MM-DD` used for workout `date`.
    pub fn date_only(&self) -> String {
        self.render("")
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, ResolvedDate::Parsed(_))
    }

    fn render(&self, suffix: &str) -> String {
        match self {
            ResolvedDate::Qualified(raw) => raw.clone(),
            ResolvedDate::Parsed(date) => format!("{}{}", date.format("%Y-%m-%d"), suffix),
            ResolvedDate::Opaque(raw) if looks_like_iso_date(raw) => format!("{raw}{suffix}"),
            ResolvedDate::Opaque(raw) => raw.clone(),
        }
    }
}

/// Ten characters with `-` at positions 4 and 7.
fn looks_like_iso_date(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    raw.is_ascii() && bytes.len() == 10 && bytes[4] == b'-' && bytes[7] == b'-'
}

/// Qualify a date that may already be canonical, anchoring date-only input at noon UTC.
/// Returns `None` for blank input.
pub fn ensure_iso_timestamp(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        return None;
    }
    Some(resolve_date(raw).recorded_at())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_date_is_parsed() {
        assert_eq!(
            resolve_date("2026-02-07"),
            ResolvedDate::Parsed(NaiveDate::from_ymd_opt(2026, 2, 7).unwrap())
        );
    }

    #[test]
    fn test_slash_date_prefers_month_first() {
        let resolved = resolve_date("03/04/2026");
        assert_eq!(resolved.date_only(), "2026-03-04");
    }

    #[test]
    fn test_day_first_used_when_month_first_impossible() {
        assert_eq!(resolve_date("25/12/2026").date_only(), "2026-12-25");
        assert_eq!(resolve_date("25-12-2026").date_only(), "2026-12-25");
    }

    #[test]
    fn test_dash_date_prefers_month_first() {
        assert_eq!(resolve_date("02-07-2026").date_only(), "2026-02-07");
    }

    #[test]
    fn test_unpadded_components_parse() {
        assert_eq!(resolve_date("3/4/2026").recorded_at(), "2026-03-04T12:00:00Z");
    }

    #[test]
    fn test_qualified_input_passes_through() {
        let resolved = resolve_date("2026-02-07T08:30:00Z");
        assert_eq!(resolved.recorded_at(), "2026-02-07T08:30:00Z");
        assert_eq!(resolved.started_at(), "2026-02-07T08:30:00Z");
        assert_eq!(resolved.date_only(), "2026-02-07T08:30:00Z");
    }

    #[test]
    fn test_two_digit_year_is_not_a_match() {
        assert_eq!(resolve_date("3/4/26"), ResolvedDate::Opaque("3/4/26".into()));
    }

    #[test]
    fn test_iso_shaped_invalid_date_gets_suffix() {
        let resolved = resolve_date("2026-02-30");
        assert!(!resolved.is_parsed());
        assert_eq!(resolved.recorded_at(), "2026-02-30T12:00:00Z");
        assert_eq!(resolved.started_at(), "2026-02-30T00:00:00Z");
        assert_eq!(resolved.date_only(), "2026-02-30");
    }

    #[test]
    fn test_unrecognized_text_is_left_alone() {
        assert_eq!(resolve_date("last tuesday").recorded_at(), "last tuesday");
    }

    #[test]
    fn test_ensure_iso_timestamp() {
        assert_eq!(ensure_iso_timestamp(""), None);
        assert_eq!(ensure_iso_timestamp("2026-02-03").as_deref(), Some("2026-02-03T12:00:00Z"));
        assert_eq!(
            ensure_iso_timestamp("2026-02-07T08:00:00Z").as_deref(),
            Some("2026-02-07T08:00:00Z")
        );
    }
}
