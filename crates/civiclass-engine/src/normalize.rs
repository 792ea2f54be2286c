//! Text normalization
//!
//! Complaint text arrives with arbitrary casing, punctuation, and symbols.
//! Scoring operates on a reduced alphabet: ASCII lowercase letters, ASCII
//! digits, and whitespace. Everything else is dropped outright, not
//! replaced by a separator, so "it's" becomes "its".

/// Normalize raw complaint text for keyword scoring
///
/// Lower-cases the input and removes every character that is not an ASCII
/// lowercase letter, ASCII digit, or whitespace. Total over all string
/// input; an empty string yields an empty string.
pub fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| c.to_ascii_lowercase())
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize("Street-Light BROKEN, near 5th Ave!"),
            "streetlight broken near 5th ave"
        );
    }

    #[test]
    fn drops_symbols_without_substitution() {
        // No separator is inserted where a character was removed
        assert_eq!(normalize("it's"), "its");
        assert_eq!(normalize("a@b#c"), "abc");
    }

    #[test]
    fn drops_accented_characters() {
        assert_eq!(normalize("café"), "caf");
    }

    #[test]
    fn empty_input_is_valid() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn output_alphabet_is_restricted() {
        let out = normalize("The pipe BURST at #12, flooding Östra street!!");
        assert!(out
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace()));
    }

    #[test]
    fn preserves_whitespace() {
        assert_eq!(normalize("no  water\tsupply\n"), "no  water\tsupply\n");
    }
}
