//! # Measure-Code Lexer
//!
//! Classifies the next token of an SW measure-code string.
//!
//! SW token shapes overlap (`S-1` is also shaped like a note code), so the
//! rules are tried in a fixed order and the first match wins. The decoder
//! needs to slip its implicit-bar check in between the two halves of that
//! order, so classification is split in two:
//!
//! - [`MeasureLexer::next_marker`] - endings, repeat end, bar, fermata,
//!   undecoded annotations and filler
//! - [`MeasureLexer::next_event`] - meter change, repeat start, note codes and
//!   the single-character fallback
//!
//! Neither method moves the cursor; the decoder calls
//! [`MeasureLexer::advance`] with the token it acted on.

/// Accidental codes allowed in the middle of a note code
const ACCIDENTAL_CODES: &[char] = &['-', '#', '$', '&', '*', '%'];

/// Digits that follow `P-` in an accent marker
const ACCENT_CODES: &[char] = &['0', '2', '4', '5', '8', '9'];

/// Tie continuation after a note code
const TIE_CODE: char = '_';

/// One pitch-event code: pitch, accidental and duration characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteCode {
    pub pitch: char,
    pub accidental: char,
    pub duration: char,
    /// Immediately followed by a tie continuation
    pub tied: bool,
}

/// Token types for SW measure codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    FirstEnding,  // S-1
    SecondEnding, // S-2
    RepeatEnd,    // S-5
    Bar,          // S-6
    Fermata,      // S-9
    RepeatStart,  // S-4

    // Performance annotations that are not decoded yet
    Delay(char),  // W-1 .. W-5
    Accent(char), // P-0, P-2, P-4, P-5, P-8, P-9

    Filler, // space or _

    MeterChange(char, char), // STnd

    Note(NoteCode),

    Unknown(char),
}

/// A token with its position and extent in the measure code
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatedToken {
    pub token: Token,
    /// 1-based character column of the first character
    pub column: usize,
    /// Characters consumed
    pub len: usize,
    /// Bytes consumed
    pub width: usize,
}

/// Cursor over one measure-code string
pub struct MeasureLexer<'a> {
    input: &'a str,
    position: usize,
    column: usize,
}

impl<'a> MeasureLexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            column: 1,
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// 1-based character column of the cursor
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn remaining(&self) -> &'a str {
        &self.input[self.position..]
    }

    pub fn advance(&mut self, token: &LocatedToken) {
        self.position += token.width;
        self.column += token.len;
    }

    fn peek4(&self) -> [Option<char>; 4] {
        let mut chars = self.remaining().chars();
        [chars.next(), chars.next(), chars.next(), chars.next()]
    }

    fn located(&self, token: Token, len: usize) -> LocatedToken {
        let width = self.remaining().chars().take(len).map(char::len_utf8).sum();
        LocatedToken {
            token,
            column: self.column,
            len,
            width,
        }
    }

    /// Explicit markers and filler, checked before the implicit bar.
    pub fn next_marker(&self) -> Option<LocatedToken> {
        let [c0, c1, c2, _] = self.peek4();

        let token = match (c0?, c1, c2) {
            ('S', Some('-'), Some('1')) => Token::FirstEnding,
            ('S', Some('-'), Some('2')) => Token::SecondEnding,
            ('S', Some('-'), Some('5')) => Token::RepeatEnd,
            ('S', Some('-'), Some('6')) => Token::Bar,
            ('S', Some('-'), Some('9')) => Token::Fermata,
            ('W', Some('-'), Some(d @ '1'..='5')) => Token::Delay(d),
            ('P', Some('-'), Some(d)) if ACCENT_CODES.contains(&d) => Token::Accent(d),
            (' ' | TIE_CODE, _, _) => return Some(self.located(Token::Filler, 1)),
            _ => return None,
        };

        Some(self.located(token, 3))
    }

    /// Meter changes, repeat starts, note codes and the fallback.
    ///
    /// Returns `None` only at the end of the input.
    pub fn next_event(&self) -> Option<LocatedToken> {
        let [c0, c1, c2, c3] = self.peek4();
        let c0 = c0?;

        if let ('S', Some('T'), Some(n), Some(d)) = (c0, c1, c2, c3) {
            return Some(self.located(Token::MeterChange(n, d), 4));
        }

        if let ('S', Some('-'), Some('4')) = (c0, c1, c2) {
            return Some(self.located(Token::RepeatStart, 3));
        }

        if let (Some(accidental), Some(duration)) = (c1, c2) {
            if !c0.is_whitespace()
                && ACCIDENTAL_CODES.contains(&accidental)
                && !duration.is_whitespace()
            {
                let note = NoteCode {
                    pitch: c0,
                    accidental,
                    duration,
                    tied: c3 == Some(TIE_CODE),
                };
                return Some(self.located(Token::Note(note), 3));
            }
        }

        Some(self.located(Token::Unknown(c0), 1))
    }
}
