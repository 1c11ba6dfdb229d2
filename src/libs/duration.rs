//! Human duration strings and preset resolution.
//!
//! Durations are written as up to three components in canonical order,
//! `<N>h`, `<N>m` and `<N>s`, or as a bare number of seconds:
//!
//! ```rust
//! use timekit::libs::duration::parse_duration;
//!
//! assert_eq!(parse_duration("1h30m"), 5400);
//! assert_eq!(parse_duration("90"), 90);
//! assert_eq!(parse_duration("soon"), 0);
//! ```
//!
//! Parsing never fails: anything that is not a recognised duration yields
//! `0`, and callers treat a non-positive result as an invalid time format.
//! Durations longer than [`MAX_DURATION_SECONDS`] count as unrecognised too.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Longest single duration accepted, one leap year.
pub const MAX_DURATION_SECONDS: i64 = 366 * 24 * 3600;

static DURATION_RE: OnceLock<Regex> = OnceLock::new();

fn duration_re() -> &'static Regex {
    DURATION_RE.get_or_init(|| {
        Regex::new(r"(?i)^(?:(\d+)\s*h)?\s*(?:(\d+)\s*m)?\s*(?:(\d+)\s*s)?$").expect("duration pattern is valid")
    })
}

/// Converts a duration string such as `"1h20m"` or `"90s"` into seconds.
///
/// Returns `0` for empty, malformed, out-of-order or over-long input.
pub fn parse_duration(text: &str) -> i64 {
    let seconds = parse_seconds(text.trim());
    if seconds > MAX_DURATION_SECONDS {
        0
    } else {
        seconds
    }
}

fn parse_seconds(text: &str) -> i64 {
    if text.is_empty() {
        return 0;
    }

    if text.chars().all(|c| c.is_ascii_digit()) {
        return text.parse().unwrap_or(0);
    }

    let Some(caps) = duration_re().captures(text) else {
        return 0;
    };

    let component = |index: usize, factor: i64| -> i64 {
        caps.get(index)
            .and_then(|m| m.as_str().parse::<i64>().ok())
            .map(|n| n.saturating_mul(factor))
            .unwrap_or(0)
    };

    component(1, 3600).saturating_add(component(2, 60)).saturating_add(component(3, 1))
}

/// Returns true when `text` is a compact duration token (no inner spaces).
///
/// Used by the sequence tokenizer to tell durations from bare-word labels.
pub fn is_duration_token(text: &str) -> bool {
    !text.chars().any(char::is_whitespace) && parse_duration(text) > 0
}

/// Substitutes a preset pattern when the whole input names a preset.
pub fn resolve_preset<'a>(input: &'a str, presets: &'a BTreeMap<String, String>) -> &'a str {
    presets.get(input.trim()).map(String::as_str).unwrap_or(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_components() {
        assert_eq!(parse_duration("1h30m"), 5400);
        assert_eq!(parse_duration("90s"), 90);
        assert_eq!(parse_duration("10m10s"), 610);
        assert_eq!(parse_duration("2h"), 7200);
        assert_eq!(parse_duration("1h 2m 3s"), 3723);
        assert_eq!(parse_duration("1H5M"), 3900);
    }

    #[test]
    fn bare_numbers_are_seconds() {
        assert_eq!(parse_duration("45"), 45);
        assert_eq!(parse_duration(" 300 "), 300);
    }

    #[test]
    fn invalid_input_is_zero() {
        assert_eq!(parse_duration("invalid"), 0);
        assert_eq!(parse_duration(""), 0);
        assert_eq!(parse_duration("30s1m"), 0);
        assert_eq!(parse_duration("-5m"), 0);
        assert_eq!(parse_duration("0m"), 0);
    }

    #[test]
    fn over_long_durations_are_rejected() {
        assert_eq!(parse_duration("8784h"), MAX_DURATION_SECONDS);
        assert_eq!(parse_duration("8785h"), 0);
        assert_eq!(parse_duration("10000000000000"), 0);
        assert_eq!(parse_duration("99999999999999999999999"), 0);
        assert_eq!(parse_duration("2562047788015216h"), 0);
        assert!(!is_duration_token("2562047788015216h"));
    }

    #[test]
    fn duration_tokens() {
        assert!(is_duration_token("25m"));
        assert!(!is_duration_token("work"));
        assert!(!is_duration_token("1h 5m"));
    }

    #[test]
    fn presets_resolve_on_exact_match() {
        let mut presets = BTreeMap::new();
        presets.insert("pomodoro".to_string(), "(25m work, 5m break)x4".to_string());

        assert_eq!(resolve_preset("pomodoro", &presets), "(25m work, 5m break)x4");
        assert_eq!(resolve_preset(" pomodoro ", &presets), "(25m work, 5m break)x4");
        assert_eq!(resolve_preset("pomodoro, 5m", &presets), "pomodoro, 5m");
    }
}
