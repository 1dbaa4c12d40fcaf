//! Cleanup of speech transcripts before they are used as file names.

/// Whether `c` may appear in a name taken from a speech transcript.
///
/// Alphanumerics (any script), `.`, `-`, `_` and the plain space.
pub fn is_allowed(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '.' | '-' | '_' | ' ')
}

/// Drop every character of `raw` that [`is_allowed`] rejects.
///
/// Characters are removed, not replaced, so `"my file!!@@.txt"` becomes
/// `"my file.txt"`. The result may be empty.
pub fn sanitize_transcript(raw: &str) -> String {
    raw.trim().chars().filter(|&c| is_allowed(c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_symbols() {
        assert_eq!(sanitize_transcript("my file!!@@.txt"), "my file.txt");
        assert_eq!(sanitize_transcript("report_v2-final.pdf"), "report_v2-final.pdf");
    }

    #[test]
    fn only_disallowed_characters_yield_empty() {
        assert_eq!(sanitize_transcript("!!@@##$$"), "");
        assert_eq!(sanitize_transcript("/\\:*?\"<>|"), "");
    }

    #[test]
    fn keeps_non_ascii_letters_and_digits() {
        assert_eq!(sanitize_transcript("résumé №1.txt"), "résumé 1.txt");
    }

    #[test]
    fn path_separators_are_removed() {
        assert_eq!(sanitize_transcript("../etc/passwd"), "..etcpasswd");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(sanitize_transcript("  notes.md \n"), "notes.md");
    }
}
