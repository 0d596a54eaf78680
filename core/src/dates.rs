//! Date text canonicalization.
//!
//! Resume text carries dates in a handful of shapes; everything the
//! template shows is canonicalized to `YYYY-MM-DD`. Unrecognized input
//! is passed through unchanged so a reviewer still sees the source
//! text, and absent/blank input stays absent (the field writer turns
//! that into the placeholder, not an empty string).

/// Canonicalize one non-blank date string.
///
/// Recognized forms, in priority order:
/// - `YYYY-MM-DD`: returned as-is
/// - `YYYY-MM`: day defaulted to `01`
/// - `YYYY-M`: month zero-padded, day `01`
/// - `YYYY`: month and day defaulted to `01`
/// - `YYYY年M月D日` (trailing `日` optional) and `YYYY年M月`
///
/// Anything else is returned unchanged; this function never fails.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();

    if let Some(normalized) = normalize_dashed(trimmed) {
        return normalized;
    }
    if let Some(normalized) = normalize_cjk(trimmed) {
        return normalized;
    }
    raw.to_string()
}

/// Canonicalize an optional date. `None`, empty, and whitespace-only
/// input all yield `None`, kept distinct from an unrecognized string.
pub fn normalize_opt(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    if raw.trim().is_empty() {
        return None;
    }
    Some(normalize(raw))
}

fn normalize_dashed(s: &str) -> Option<String> {
    let mut parts = s.split('-');
    let year = parts.next()?;
    if !is_digits(year, 4) {
        return None;
    }

    match (parts.next(), parts.next(), parts.next()) {
        (None, _, _) => Some(format!("{year}-01-01")),
        (Some(month), None, _) if is_digits(month, 2) => Some(format!("{year}-{month}-01")),
        (Some(month), None, _) if is_digits(month, 1) => Some(format!("{year}-0{month}-01")),
        (Some(month), Some(day), None) if is_digits(month, 2) && is_digits(day, 2) => {
            Some(s.to_string())
        }
        _ => None,
    }
}

fn normalize_cjk(s: &str) -> Option<String> {
    let (year, rest) = s.split_once('年')?;
    if !is_digits(year, 4) {
        return None;
    }

    let (month, rest) = rest.split_once('月')?;
    if month.is_empty() || month.len() > 2 || !month.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let day = match rest {
        "" => None,
        rest => {
            let day = rest.strip_suffix('日').unwrap_or(rest);
            if day.is_empty() || day.len() > 2 || !day.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            Some(day)
        }
    };

    Some(format!(
        "{year}-{:0>2}-{:0>2}",
        month,
        day.unwrap_or("01")
    ))
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_iso_dates_pass_through() {
        assert_eq!(normalize("2020-01-15"), "2020-01-15");
    }

    #[test]
    fn partial_dates_get_defaults() {
        assert_eq!(normalize("2020-07"), "2020-07-01");
        assert_eq!(normalize("2020-7"), "2020-07-01");
        assert_eq!(normalize("2020"), "2020-01-01");
    }

    #[test]
    fn cjk_dates_convert() {
        assert_eq!(normalize("2020年7月3日"), "2020-07-03");
        assert_eq!(normalize("2020年07月03日"), "2020-07-03");
        assert_eq!(normalize("2020年7月3"), "2020-07-03");
        assert_eq!(normalize("2020年11月"), "2020-11-01");
    }

    #[test]
    fn unrecognized_text_is_unchanged() {
        for raw in ["约2020年", "2020/07/01", "20-07-01", "abcd", "2020年月"] {
            assert_eq!(normalize(raw), raw);
        }
    }

    #[test]
    fn whitespace_is_trimmed_before_matching() {
        assert_eq!(normalize(" 2020-07 "), "2020-07-01");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["2020-01-15", "2020-07", "2020", "2020年7月3日", "later"] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn recognized_output_is_canonical_shape() {
        for raw in ["2020-01-15", "2020-07", "2020-7", "2020", "2020年7月3日"] {
            let out = normalize(raw);
            let bytes = out.as_bytes();
            assert_eq!(out.len(), 10, "{raw} -> {out}");
            assert_eq!(bytes[4], b'-');
            assert_eq!(bytes[7], b'-');
        }
    }

    #[test]
    fn absent_and_blank_stay_absent() {
        assert_eq!(normalize_opt(None), None);
        assert_eq!(normalize_opt(Some("")), None);
        assert_eq!(normalize_opt(Some("   ")), None);
        assert_eq!(normalize_opt(Some("2020-07")).as_deref(), Some("2020-07-01"));
    }
}
