//! Text normalization for sorting and matching.
//!
//! # Invariants
//! - Output is NFD-decomposed, free of U+0300..=U+036F marks, and lowercase.
//! - Normalization is idempotent: `normalize_text(normalize_text(s)) == normalize_text(s)`.

use unicode_normalization::UnicodeNormalization;

const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Normalizes text so that "Pérez", "PEREZ" and "perez" compare equal.
#[must_use]
pub fn normalize_text(input: &str) -> String {
    input
        .nfd()
        .filter(|ch| !COMBINING_MARKS.contains(ch))
        .collect::<String>()
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::normalize_text;

    #[test]
    fn strips_diacritics_and_case() {
        assert_eq!(normalize_text("Pérez"), "perez");
        assert_eq!(normalize_text("MUÑOZ"), "munoz");
        assert_eq!(normalize_text("Ångström"), "angstrom");
    }

    #[test]
    fn is_idempotent() {
        let once = normalize_text("Gómez-Ñandú");
        assert_eq!(normalize_text(&once), once);
    }

    #[test]
    fn keeps_non_latin_letters() {
        assert_eq!(normalize_text("ß"), "ß");
        assert_eq!(normalize_text("123 ABC"), "123 abc");
    }
}
