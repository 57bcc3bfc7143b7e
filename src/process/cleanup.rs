use once_cell::sync::Lazy;
use regex::Regex;

/// Optional minus, digits, at most one decimal point, at least one digit.
static PLAIN_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(?:\d+\.?\d*|\.\d+)$").expect("numeric regex should compile"));

/// Trim a raw cell and undo the `="123"`-style spreadsheet escaping the report
/// export applies to numeric values.
pub fn clean_cell(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.strip_prefix('=') {
        Some(rest) if PLAIN_NUMBER.is_match(rest) => rest.to_string(),
        _ => trimmed.to_string(),
    }
}
