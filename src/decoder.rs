//! # Measure Decoder
//!
//! Turns one SW measure-code line into an ABC music line plus the phrasing
//! record the lyric aligner needs.
//!
//! ## State
//! While scanning, the decoder carries:
//! - a beat accumulator in sixteenth-note units, reset at every bar
//! - an open-tie counter (0 = no tie open, N = tokens folded into the open tie)
//! - an open-triplet counter that closes the `(3` group after three notes
//! - the phrasing list, one entry per sounding event
//!
//! ## Bars
//! Bars come either from explicit markers (`S-1`, `S-2`, `S-5`, `S-6`) or
//! implicitly once the accumulator reaches the measure capacity. The implicit
//! check runs after the explicit markers and filler, so a full measure
//! followed by `S-6` gets exactly one bar, and a line that ends exactly on a
//! full measure gets exactly one closing bar.
//!
//! ## Example
//! ```rust
//! use sw2abc::decoder::decode_measure;
//! use sw2abc::feedback::Diagnostics;
//!
//! let mut diagnostics = Diagnostics::new();
//! let measure = decode_measure("2C-4_C-4D-8E-8", 16, 'M', &mut diagnostics);
//! assert_eq!(measure.abc, "(C4C4)D2E2");
//! assert_eq!(measure.phrasing, vec![1, 0, 0]);
//! assert_eq!(measure.declared_bars, Some(2));
//! ```

use crate::ast::{Clef, DecodedMeasure};
use crate::feedback::{DiagnosticKind, Diagnostics};
use crate::lexer::{LocatedToken, MeasureLexer, NoteCode, Token};
use crate::tables;

/// Notes in a triplet group
const TRIPLET_SIZE: u32 = 3;

/// Decode one measure-code line.
///
/// `capacity` is the number of sixteenth-note units in a measure and
/// `clef_code` the type character that introduced the line (`M`, `m`, `+`, `-`).
pub fn decode_measure(
    code: &str,
    capacity: u32,
    clef_code: char,
    diagnostics: &mut Diagnostics,
) -> DecodedMeasure {
    let clef = resolve_clef(clef_code, diagnostics);
    let (declared_bars, body, offset) = split_bar_count(code);

    let mut decoder = Decoder::new(capacity, offset, diagnostics);
    decoder.run(body);

    DecodedMeasure {
        abc: decoder.abc,
        phrasing: decoder.phrasing,
        declared_bars,
        clef,
    }
}

fn resolve_clef(clef_code: char, diagnostics: &mut Diagnostics) -> Clef {
    match tables::clef(clef_code) {
        Some(Clef::Treble) => Clef::Treble,
        Some(other) => {
            diagnostics.warning(
                DiagnosticKind::NonTrebleClef,
                format!("Not a treble clef: {}", other),
            );
            other
        }
        None => {
            diagnostics.warning(
                DiagnosticKind::NonTrebleClef,
                format!("Unknown clef code '{}', assuming treble", clef_code),
            );
            Clef::Treble
        }
    }
}

/// Split a leading bar count off the measure codes.
///
/// Returns the count (if any), the remaining codes, and how many characters
/// were removed.
fn split_bar_count(code: &str) -> (Option<u32>, &str, usize) {
    let digits = code.len() - code.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return (None, code, 0);
    }
    let (count, body) = code.split_at(digits);
    (count.parse().ok(), body, digits)
}

struct Decoder<'d> {
    capacity: u32,
    /// Characters removed in front of the scanned codes, for diagnostic columns
    offset: usize,
    diagnostics: &'d mut Diagnostics,
    abc: String,
    beats: u32,
    open_tie: u32,
    open_triplet: u32,
    phrasing: Vec<u32>,
}

impl<'d> Decoder<'d> {
    fn new(capacity: u32, offset: usize, diagnostics: &'d mut Diagnostics) -> Self {
        Self {
            capacity,
            offset,
            diagnostics,
            abc: String::new(),
            beats: 0,
            open_tie: 0,
            open_triplet: 0,
            phrasing: Vec::new(),
        }
    }

    fn run(&mut self, body: &str) {
        let mut lexer = MeasureLexer::new(body);

        loop {
            if lexer.is_at_end() {
                self.finish(lexer.column());
                break;
            }

            if let Some(marker) = lexer.next_marker() {
                self.apply_marker(&marker);
                lexer.advance(&marker);
                continue;
            }

            if self.measure_full() {
                self.bar("|");
                continue;
            }

            let Some(event) = lexer.next_event() else {
                break;
            };
            self.apply_event(&event);
            lexer.advance(&event);
        }
    }

    /// The accumulator has reached the capacity. An empty measure never
    /// counts as full, so a zero capacity cannot emit bars forever.
    fn measure_full(&self) -> bool {
        self.beats > 0 && self.beats >= self.capacity
    }

    fn bar(&mut self, mark: &str) {
        self.abc.push_str(mark);
        self.beats = 0;
    }

    fn column(&self, token: &LocatedToken) -> usize {
        token.column + self.offset
    }

    fn apply_marker(&mut self, marker: &LocatedToken) {
        match marker.token {
            Token::FirstEnding => self.bar("|1"),
            Token::SecondEnding => self.bar("|2"),
            Token::RepeatEnd => self.bar(":|"),
            Token::Bar => self.bar("|"),
            Token::Fermata => self.abc.push('H'),
            // Delays and accents are not decoded yet
            _ => {}
        }
    }

    fn apply_event(&mut self, event: &LocatedToken) {
        let column = self.column(event);
        match event.token {
            Token::MeterChange(n, d) => self.meter_change(n, d, column),
            Token::RepeatStart => self.abc.push_str("|:"),
            Token::Note(code) => self.note(&code, column),
            Token::Unknown(c) => {
                self.diagnostics.error_at(
                    DiagnosticKind::UnrecognizedCode,
                    format!("Unrecognized measure code '{}'", c),
                    column,
                );
            }
            _ => {}
        }
    }

    fn meter_change(&mut self, n: char, d: char, column: usize) {
        match (tables::time_digit(n), tables::time_digit(d)) {
            (Some(beats), Some(beat_type)) => {
                self.abc.push_str(&format!(" [M:{}/{}] ", beats, beat_type));
            }
            _ => {
                self.diagnostics.warning_at(
                    DiagnosticKind::UnknownTimeSignatureDigit,
                    format!("Unknown meter change 'ST{}{}'", n, d),
                    column,
                );
            }
        }
    }

    fn note(&mut self, code: &NoteCode, column: usize) {
        if matches!(code.duration, '6' | '7') {
            if self.open_triplet == 0 {
                self.abc.push_str("(3 ");
            }
            self.open_triplet += 1;
        }

        match self.render(code, column) {
            Some(rendered) => self.tie(code.tied, &rendered),
            // A dropped code still ends the tie it was meant to close
            None if !code.tied => self.close_tie(),
            None => {}
        }

        if self.open_triplet == TRIPLET_SIZE {
            self.abc.push(' ');
            self.open_triplet = 0;
        }
    }

    /// Render accidental + pitch + length and count its beats, or record why
    /// the code was dropped.
    fn render(&mut self, code: &NoteCode, column: usize) -> Option<String> {
        let group = format!("{}{}{}", code.pitch, code.accidental, code.duration);

        let Some(pitch) = tables::pitch(code.pitch) else {
            self.diagnostics.error_at(
                DiagnosticKind::UnknownPitch,
                format!("Unknown pitch code '{}' in group '{}'", code.pitch, group),
                column,
            );
            return None;
        };
        let Some(duration) = tables::duration(code.duration) else {
            self.diagnostics.error_at(
                DiagnosticKind::UnknownDuration,
                format!("Unknown duration code '{}' in group '{}'", code.duration, group),
                column,
            );
            return None;
        };
        let Some(accidental) = tables::accidental(code.accidental) else {
            self.diagnostics.error_at(
                DiagnosticKind::UnrecognizedCode,
                format!("Unknown accidental code '{}' in group '{}'", code.accidental, group),
                column,
            );
            return None;
        };

        self.beats += duration.units;
        Some(format!("{}{}{}", accidental, pitch, duration.abc_suffix()))
    }

    fn tie(&mut self, continues: bool, rendered: &str) {
        match (continues, self.open_tie) {
            (true, 0) => {
                self.abc.push('(');
                self.abc.push_str(rendered);
                self.open_tie = 1;
            }
            (true, _) => {
                self.abc.push_str(rendered);
                self.open_tie += 1;
            }
            (false, 0) => {
                self.abc.push_str(rendered);
                self.phrasing.push(0);
            }
            (false, _) => {
                self.abc.push_str(rendered);
                self.close_tie();
            }
        }
    }

    /// Close the open tie, if any, and record how far it held its syllable.
    fn close_tie(&mut self) {
        if self.open_tie > 0 {
            self.abc.push(')');
            self.phrasing.push(self.open_tie);
            self.open_tie = 0;
        }
    }

    fn finish(&mut self, column: usize) {
        if self.open_tie > 0 {
            self.diagnostics.warning_at(
                DiagnosticKind::UnclosedTie,
                "Tie continues past the end of the line; closed at the line end",
                column + self.offset,
            );
            self.close_tie();
        }

        if self.measure_full() {
            self.abc.push('|');
        }
    }
}
