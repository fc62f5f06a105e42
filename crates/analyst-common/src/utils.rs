//! Free-text parsing helpers for scraped table cells and question documents.

use once_cell::sync::Lazy;
use regex::Regex;

static FOOTNOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]").expect("footnote pattern is valid"));

static DOLLAR_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\$\s*([0-9][0-9,]*(?:\.[0-9]+)?)\s*(?:(billion|bn|million|mn)\b)?")
        .expect("dollar pattern is valid")
});

static PLAIN_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9][0-9,]*(?:\.[0-9]+)?)\s*(?:(billion|bn|million|mn)\b)?")
        .expect("amount pattern is valid")
});

static YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^0-9])(1[89][0-9]{2}|20[0-9]{2})(?:[^0-9]|$)").expect("year pattern is valid")
});

static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?[0-9]+(?:\.[0-9]+)?").expect("number pattern is valid"));

/// Removes `[n]`-style footnote markers and surrounding whitespace.
pub fn strip_footnotes(input: &str) -> String {
    FOOTNOTE.replace_all(input, "").trim().to_string()
}

fn scale_amount(digits: &str, unit: Option<&str>) -> Option<f64> {
    let value: f64 = digits.replace(',', "").parse().ok()?;
    let multiplier = match unit.map(str::to_ascii_lowercase).as_deref() {
        Some("billion" | "bn") => 1e9,
        Some("million" | "mn") => 1e6,
        _ => 1.0,
    };
    Some(value * multiplier)
}

/// Parses a currency amount such as `$2,923,706,026` or `$1.5 bn`.
///
/// The first `$`-prefixed amount wins; without a dollar sign the first
/// number in the text is used. Returns `None` when no number is present.
pub fn parse_currency(input: &str) -> Option<f64> {
    let cleaned = strip_footnotes(input);
    let captures = DOLLAR_AMOUNT
        .captures(&cleaned)
        .or_else(|| PLAIN_AMOUNT.captures(&cleaned))?;

    scale_amount(
        captures.get(1)?.as_str(),
        captures.get(2).map(|m| m.as_str()),
    )
}

/// Extracts the first four-digit year between 1800 and 2099.
pub fn parse_year(input: &str) -> Option<i32> {
    YEAR.captures(input)?.get(1)?.as_str().parse().ok()
}

/// Extracts the first number in a cell, ignoring trailing annotation letters
/// (`"4TS"` parses as `4.0`).
pub fn parse_leading_number(input: &str) -> Option<f64> {
    let cleaned = strip_footnotes(input).replace(',', "");
    NUMBER.find(&cleaned)?.as_str().parse().ok()
}

/// Rounds to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Truncates a string to a maximum number of characters with ellipsis.
pub fn truncate_string(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
