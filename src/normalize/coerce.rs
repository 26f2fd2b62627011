//! Lenient numeric and boolean coercion for hand-entered cells.

/// Parse a finite float from a trimmed cell.
pub fn parse_float(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an integer by way of a float, truncating toward zero (`"72.9"` -> 72).
pub fn parse_int(raw: &str) -> Option<i64> {
    parse_float(raw).map(|v| v.trunc() as i64)
}

/// Float with a zero default for missing or unparseable cells.
pub fn float_or_zero(raw: Option<&str>) -> f64 {
    raw.and_then(parse_float).unwrap_or(0.0)
}

/// Truthiness of a `completed`-style cell.
pub fn parse_bool(raw: Option<&str>) -> bool {
    let Some(raw) = raw else {
        return false;
    };
    let cell = raw.trim().to_lowercase();
    match cell.as_str() {
        "true" | "yes" | "y" | "t" => true,
        _ => parse_float(&cell).map(|v| v != 0.0).unwrap_or(false),
    }
}
