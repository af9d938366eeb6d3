// src/process/normalize.rs
//! Per-field cleaning rules. Every function here is total: malformed or
//! missing input produces an empty string, never an error.

use once_cell::sync::Lazy;
use regex::Regex;

/// Hyphen, ASCII apostrophe, right single quotation mark.
static NAME_DELIMITER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-'’]").unwrap());
static NON_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9]+").unwrap());

/// Capitalize each segment of `piece` separated by hyphens or apostrophes,
/// keeping the delimiters in place: `o’brien` → `O’Brien`, `mary-anne` → `Mary-Anne`.
pub fn smart_cap_piece(piece: &str) -> String {
    let mut out = String::with_capacity(piece.len());
    let mut last = 0;
    for delim in NAME_DELIMITER.find_iter(piece) {
        out.push_str(&cap_segment(&piece[last..delim.start()]));
        out.push_str(delim.as_str());
        last = delim.end();
    }
    out.push_str(&cap_segment(&piece[last..]));
    out
}

fn cap_segment(seg: &str) -> String {
    let mut chars = seg.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// First whitespace-separated token of a full name, capitalized.
pub fn extract_first_name(name: &str) -> String {
    name.split_whitespace()
        .next()
        .map(smart_cap_piece)
        .unwrap_or_default()
}

/// Keep ASCII digits only, dropping a leading country code `1` from numbers
/// of 11 or more digits.
pub fn normalize_phone(raw: &str) -> String {
    let digits = NON_DIGITS.replace_all(raw, "");
    match digits.strip_prefix('1') {
        Some(rest) if digits.len() >= 11 => rest.to_string(),
        _ => digits.into_owned(),
    }
}

/// Trim and lowercase. No syntax check.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smart_cap_piece() {
        assert_eq!(smart_cap_piece("o\u{2019}brien"), "O\u{2019}Brien");
        assert_eq!(smart_cap_piece("mary-anne"), "Mary-Anne");
        assert_eq!(smart_cap_piece("D'ANGELO"), "D'Angelo");
        assert_eq!(smart_cap_piece("mcDONALD"), "Mcdonald");
        assert_eq!(smart_cap_piece(""), "");
    }

    #[test]
    fn test_smart_cap_keeps_bare_delimiters() {
        assert_eq!(smart_cap_piece("-"), "-");
        assert_eq!(smart_cap_piece("a--b"), "A--B");
        assert_eq!(smart_cap_piece("'x'"), "'X'");
    }

    #[test]
    fn test_smart_cap_is_idempotent() {
        for token in [
            "o\u{2019}brien",
            "mary-anne",
            "ÉLODIE",
            "straße",
            "x'-'y",
            "123abc",
            "",
            "-",
            "jean-luc's",
        ] {
            let once = smart_cap_piece(token);
            assert_eq!(smart_cap_piece(&once), once, "token {token:?}");
        }
    }

    #[test]
    fn test_extract_first_name() {
        assert_eq!(extract_first_name("  mary jane smith "), "Mary");
        assert_eq!(extract_first_name("mary-anne o'brien"), "Mary-Anne");
        assert_eq!(extract_first_name("\tJOHN\n"), "John");
        assert_eq!(extract_first_name("   "), "");
        assert_eq!(extract_first_name(""), "");
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("+1 (555) 123-4567"), "5551234567");
        assert_eq!(normalize_phone("5551234567"), "5551234567");
        assert_eq!(normalize_phone("1-555-123-4567"), "5551234567");
        assert_eq!(normalize_phone("15551234"), "15551234");
        assert_eq!(normalize_phone("44 20 7946 0958"), "442079460958");
        assert_eq!(normalize_phone("ext. n/a"), "");
        assert_eq!(normalize_phone(""), "");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(
            normalize_email("  John.Doe@EXAMPLE.com "),
            "john.doe@example.com"
        );
        assert_eq!(normalize_email("not an email"), "not an email");
        assert_eq!(normalize_email(""), "");
    }
}
