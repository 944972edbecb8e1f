//! Phone number normalization for the two booking entry points
//!
//! The public form and the JSON API deliberately normalize differently:
//! the form rewrites Kazakhstan-style numbers to a leading `8`, the API
//! only strips formatting. Both behaviors are load-bearing for visitor
//! deduplication, so each entry point keeps its own function.

/// Normalize a phone number submitted through the public booking form.
///
/// Strips every non-digit character, then rewrites the country prefix:
/// 10 digits get a leading `8`, an 11-digit number starting with `7` has
/// its first digit replaced by `8`, and an 11-digit number already
/// starting with `8` is kept. Anything else is returned digits-only.
pub fn normalize_form_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        10 => format!("8{}", digits),
        11 if digits.starts_with('7') => format!("8{}", &digits[1..]),
        11 if digits.starts_with('8') => digits,
        _ => digits,
    }
}

/// Normalize a phone number submitted through the JSON API.
///
/// Only strips non-digit characters; no prefix rewriting.
pub fn normalize_api_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}
