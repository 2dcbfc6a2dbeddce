//! SW source line classification.
//!
//! Every meaningful SW line has the shape `<type><separator><data>`: a letter
//! naming what the line holds, `+` or `-`, then the payload.

/// What an SW line holds, by its type letter (case-insensitive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Title,         // N
    Composer,      // C
    Author,        // A (transcription author)
    TempoText,     // T
    Speed,         // S
    Key,           // K
    TimeSignature, // B
    Note,          // F (free text)
    Harmony,       // H
    Measure,       // M
    Lyric,         // L
}

impl LineKind {
    pub fn from_type_char(c: char) -> Option<Self> {
        let kind = match c.to_ascii_uppercase() {
            'N' => LineKind::Title,
            'C' => LineKind::Composer,
            'A' => LineKind::Author,
            'T' => LineKind::TempoText,
            'S' => LineKind::Speed,
            'K' => LineKind::Key,
            'B' => LineKind::TimeSignature,
            'F' => LineKind::Note,
            'H' => LineKind::Harmony,
            'M' => LineKind::Measure,
            'L' => LineKind::Lyric,
            _ => return None,
        };
        Some(kind)
    }
}

/// A source line split into its three parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwLine<'a> {
    /// Type letter exactly as written; measure lines keep their case for the clef
    pub type_char: char,
    pub separator: char,
    pub data: &'a str,
}

impl<'a> SwLine<'a> {
    pub fn kind(&self) -> Option<LineKind> {
        LineKind::from_type_char(self.type_char)
    }
}

/// Split a raw source line, or `None` when it is not shaped like an SW line.
///
/// The line is trimmed first; whitespace between the separator and the data
/// is dropped.
pub fn classify_line(line: &str) -> Option<SwLine<'_>> {
    let line = line.trim();
    let mut chars = line.chars();

    let type_char = chars.next().filter(|c| c.is_ascii_alphabetic())?;
    let separator = chars.next().filter(|c| matches!(c, '+' | '-'))?;
    let data = chars.as_str().trim_start();

    Some(SwLine {
        type_char,
        separator,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_line() {
        let line = classify_line("N+ Amazing Grace").unwrap();
        assert_eq!(line.type_char, 'N');
        assert_eq!(line.separator, '+');
        assert_eq!(line.data, "Amazing Grace");
        assert_eq!(line.kind(), Some(LineKind::Title));
    }

    #[test]
    fn test_measure_line_keeps_spacing_inside_data() {
        let line = classify_line("m-  4C-4 D-4  \r").unwrap();
        assert_eq!(line.type_char, 'm');
        assert_eq!(line.separator, '-');
        assert_eq!(line.data, "4C-4 D-4");
        assert_eq!(line.kind(), Some(LineKind::Measure));
    }

    #[test]
    fn test_empty_data() {
        let line = classify_line("L+").unwrap();
        assert_eq!(line.data, "");
        assert_eq!(line.kind(), Some(LineKind::Lyric));
    }

    #[test]
    fn test_lowercase_type_is_case_insensitive() {
        assert_eq!(LineKind::from_type_char('b'), Some(LineKind::TimeSignature));
        assert_eq!(LineKind::from_type_char('f'), Some(LineKind::Note));
        assert_eq!(LineKind::from_type_char('Q'), None);
    }

    #[test]
    fn test_not_sw_lines() {
        assert_eq!(classify_line(""), None);
        assert_eq!(classify_line("   "), None);
        assert_eq!(classify_line("N Amazing"), None);
        assert_eq!(classify_line("1+ data"), None);
        assert_eq!(classify_line("+- data"), None);
        assert_eq!(classify_line("N"), None);
    }

    #[test]
    fn test_unknown_letter_still_classifies() {
        let line = classify_line("Q+ something").unwrap();
        assert_eq!(line.kind(), None);
    }
}
