use std::collections::BTreeSet;
use tracing::info;

/// The `days` lexicographically greatest distinct keys, ascending.
///
/// For well-formed `YYYY-MM-DD` keys this is the latest `days` calendar days.
pub fn latest_keys<'a, I>(keys: I, days: usize) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let distinct: BTreeSet<&str> = keys.into_iter().collect();
    let skip = distinct.len().saturating_sub(days);
    distinct.into_iter().skip(skip).map(str::to_string).collect()
}

/// Keep only items whose key falls within the latest `days` distinct keys.
/// Relative order of the kept items is unchanged.
pub fn retain_latest<T, F>(items: Vec<T>, days: usize, key: F) -> Vec<T>
where
    F: Fn(&T) -> &str,
{
    let keep = latest_keys(items.iter().map(&key), days);
    let before = items.len();
    let kept: Vec<T> = items.into_iter().filter(|item| keep.contains(key(item))).collect();
    if kept.len() < before {
        info!(
            "Trimmed {} item(s) outside the latest {} day(s)",
            before - kept.len(),
            days
        );
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_keys_under_limit_keeps_all() {
        let keys = latest_keys(["2026-02-02", "2026-02-01", "2026-02-02"], 7);
        assert_eq!(keys.into_iter().collect::<Vec<_>>(), vec!["2026-02-01", "2026-02-02"]);
    }

    #[test]
    fn test_latest_keys_over_limit_keeps_greatest() {
        let days: Vec<String> = (1..=9).map(|d| format!("2026-02-{d:02}")).collect();
        let keys = latest_keys(days.iter().map(String::as_str), 7);
        assert_eq!(keys.len(), 7);
        assert!(!keys.contains("2026-02-01"));
        assert!(!keys.contains("2026-02-02"));
        assert!(keys.contains("2026-02-09"));
    }

    #[test]
    fn test_retain_latest_preserves_order_and_duplicates() {
        let items = vec![("2026-02-03", 1), ("2026-02-01", 2), ("2026-02-03", 3), ("2026-02-02", 4)];
        let kept = retain_latest(items, 2, |item| item.0);
        assert_eq!(kept, vec![("2026-02-03", 1), ("2026-02-03", 3), ("2026-02-02", 4)]);
    }

    #[test]
    fn test_retain_latest_empty() {
        let kept = retain_latest(Vec::<(&str, i32)>::new(), 7, |item| item.0);
        assert!(kept.is_empty());
    }
}
