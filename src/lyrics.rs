//! Lyric alignment.
//!
//! SW keeps the lyric for a system on its own line with no link to the notes.
//! The decoder's phrasing record supplies that link: one entry per sounding
//! event, each entry saying how many extra notes the syllable is held over.

use crate::feedback::{DiagnosticKind, Diagnostics};

/// ABC lyric line marker
const LYRIC_MARKER: &str = "w:";

/// Syllable hold marker
const CONTINUATION: &str = " _";

/// Build the `w:` line for one decoded measure line.
///
/// Each phrasing entry takes the next syllable from `lyrics` and appends one
/// `_` per unit of the entry. When the lyrics run out of delimited syllables,
/// whatever raw text is left is appended as-is and alignment stops.
pub fn align_lyrics(phrasing: &[u32], lyrics: &str, diagnostics: &mut Diagnostics) -> String {
    let mut line = String::from(LYRIC_MARKER);
    let mut rest = lyrics;

    for &held in phrasing {
        let Some((syllable, delimiter, remainder)) = split_syllable(rest) else {
            line.push(' ');
            line.push_str(rest);
            return line;
        };

        line.push(' ');
        line.push_str(syllable);
        if delimiter == '-' {
            line.push('-');
        }
        for _ in 0..held {
            line.push_str(CONTINUATION);
        }
        rest = remainder;
    }

    if !rest.trim().is_empty() {
        diagnostics.info(
            DiagnosticKind::LeftoverLyrics,
            format!("Lyrics left over after the last note: {}", rest.trim()),
        );
    }

    line
}

/// Split off the next syllable and the space or hyphen that ends it.
///
/// Leading whitespace is skipped. The first character always belongs to the
/// syllable, so a stray leading hyphen stays attached to the word after it.
/// Returns `None` when no delimiter follows the syllable.
fn split_syllable(text: &str) -> Option<(&str, char, &str)> {
    let text = text.trim_start();
    let mut chars = text.char_indices();
    chars.next()?;

    chars
        .find(|(_, c)| c.is_whitespace() || *c == '-')
        .map(|(i, c)| (&text[..i], c, &text[i + c.len_utf8()..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn align(phrasing: &[u32], lyrics: &str) -> String {
        let mut diagnostics = Diagnostics::new();
        align_lyrics(phrasing, lyrics, &mut diagnostics)
    }

    #[test]
    fn test_held_syllable() {
        assert_eq!(
            align(&[0, 2, 0], "a-men hal-le-lu-jah rest"),
            "w: a- men _ _ hal-"
        );
    }

    #[test]
    fn test_single_tie() {
        assert_eq!(align(&[1, 0], "love me "), "w: love _ me");
    }

    #[test]
    fn test_lyrics_run_out() {
        assert_eq!(align(&[0, 0, 0], "one two"), "w: one two");
    }

    #[test]
    fn test_remainder_gets_no_continuations() {
        assert_eq!(align(&[0, 3], "sing out"), "w: sing out");
    }

    #[test]
    fn test_empty_lyrics() {
        assert_eq!(align(&[0], ""), "w: ");
    }

    #[test]
    fn test_no_notes() {
        assert_eq!(align(&[], "anything"), "w:");
    }

    #[test]
    fn test_extra_spaces_collapse() {
        assert_eq!(align(&[0, 0], "  la   la "), "w: la la");
    }

    #[test]
    fn test_leading_hyphen_stays_with_word() {
        assert_eq!(align(&[0, 0], "-ing go "), "w: -ing go");
    }

    #[test]
    fn test_leftover_lyrics_reported() {
        let mut diagnostics = Diagnostics::new();
        let line = align_lyrics(&[0], "one two three", &mut diagnostics);
        assert_eq!(line, "w: one");
        assert_eq!(diagnostics.count(DiagnosticKind::LeftoverLyrics), 1);
    }

    #[test]
    fn test_split_syllable() {
        assert_eq!(split_syllable("hal-le"), Some(("hal", '-', "le")));
        assert_eq!(split_syllable("  men rest"), Some(("men", ' ', "rest")));
        assert_eq!(split_syllable("rest"), None);
        assert_eq!(split_syllable("   "), None);
    }
}
