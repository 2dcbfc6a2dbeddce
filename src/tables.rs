//! SW symbol tables.
//!
//! Each table is a total function from one SW code character to the value it
//! stands for, or `None` when the character is not part of that table.
//! Callers branch on `None` themselves; nothing here substitutes a default.

use crate::ast::{Clef, Duration};

/// ABC pitch (with octave marks) for an SW pitch code.
///
/// SW stacks four octaves onto printable ASCII: `<`..`B` is the octave below
/// middle C, `C`..`b` and `c`..`i` the two around it, `j`..`p` the one above.
pub fn pitch(code: char) -> Option<&'static str> {
    let abc = match code {
        '<' => "C,",
        '=' => "D,",
        '>' => "E,",
        '?' => "F,",
        '@' => "G,",
        'A' => "A,",
        'B' => "B,",
        'C' => "C",
        'D' => "D",
        'E' => "E",
        'F' => "F",
        'G' => "G",
        'a' => "A",
        'b' => "B",
        'c' => "c",
        'd' => "d",
        'e' => "e",
        'f' => "f",
        'g' => "g",
        'h' => "a",
        'i' => "b",
        'j' => "c'",
        'k' => "d'",
        'l' => "e'",
        'm' => "f'",
        'n' => "g'",
        'o' => "a'",
        'p' => "b'",
        'r' | 'R' => "z", // rest
        'x' | 'X' => "y", // invisible rest
        _ => return None,
    };
    Some(abc)
}

/// ABC accidental prefix for an SW accidental code
pub fn accidental(code: char) -> Option<&'static str> {
    let abc = match code {
        ' ' | '-' => "",
        '#' => "^",
        '$' => "^^",
        '&' => "_",
        '*' => "__",
        '%' => "=",
        _ => return None,
    };
    Some(abc)
}

/// Note length for an SW duration code
pub fn duration(code: char) -> Option<Duration> {
    let (units, triplet) = match code {
        '1' => (16, false), // whole
        '2' => (8, false),  // half
        '3' => (12, false), // dotted half
        '4' => (4, false),  // quarter
        '5' => (6, false),  // dotted quarter
        '6' => (4, true),   // triplet quarter
        '7' => (2, true),   // triplet eighth
        '8' => (2, false),  // eighth
        '9' => (3, false),  // dotted eighth
        '0' => (1, false),  // sixteenth
        _ => return None,
    };
    Some(Duration { units, triplet })
}

/// Numerator/denominator value for a time-signature code.
///
/// Values past 9 are spelled with the characters following `;` in ASCII.
/// 10 and 11 have never been seen in an SW file, so they are not mapped.
pub fn time_digit(code: char) -> Option<u32> {
    match code {
        '1'..='9' => code.to_digit(10),
        '<' => Some(12),
        '=' => Some(13),
        '>' => Some(14),
        '?' => Some(15),
        '@' => Some(16),
        _ => None,
    }
}

/// Clef for the type character that introduced a measure line.
///
/// `+` and `-` are the treble/bass variants whose bar lines join the staff below.
pub fn clef(code: char) -> Option<Clef> {
    match code {
        'M' | '+' => Some(Clef::Treble),
        'm' | '-' => Some(Clef::Bass),
        _ => None,
    }
}
