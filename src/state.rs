//! # Transcription State
//!
//! Everything collected while walking one SW file: header fields, the current
//! measure capacity, the measure line waiting for its lyrics, and the ABC
//! lines produced so far.
//!
//! Lines are applied strictly in source order. Header lines only update
//! fields; a measure line is held until the lyric line that follows it, and
//! the lyric line drives the decode-and-align pass for the pair.

use crate::ast::TimeSignature;
use crate::config::Config;
use crate::decoder::decode_measure;
use crate::feedback::{DiagnosticKind, Diagnostics};
use crate::lines::{classify_line, LineKind, SwLine};
use crate::lyrics::align_lyrics;
use crate::tables;

/// Capacity used when a `B` line cannot be read (4/4)
const FALLBACK_BEATS_PER_MEASURE: u32 = 16;

/// A measure line waiting for its lyric line
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMeasure {
    pub code: String,
    /// Type character that introduced the line, which selects the clef
    pub clef_code: char,
    pub separator: char,
    /// Source line holding the measure codes
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptionState {
    pub reference_number: u32,
    pub title: Option<String>,
    /// Composers and transcription authors, in source order
    pub composers: Vec<String>,
    pub speed: Option<String>,
    /// Tempo annotation text, e.g. "Slowly"
    pub tempo: Option<String>,
    pub key: Option<String>,
    pub time_signature: Option<TimeSignature>,
    /// Sixteenth-note units per measure
    pub beats_per_measure: u32,
    pub notes: Vec<String>,
    pub harmony: Option<String>,
    pub pending_measure: Option<PendingMeasure>,
    pub lyric: Option<String>,
    /// ABC music and `w:` lines, in output order
    pub output_lines: Vec<String>,
    default_capacity_reported: bool,
}

impl Default for TranscriptionState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl TranscriptionState {
    pub fn new(config: &Config) -> Self {
        Self {
            reference_number: config.reference_number,
            title: None,
            composers: Vec::new(),
            speed: None,
            tempo: None,
            key: None,
            time_signature: None,
            beats_per_measure: config.default_beats_per_measure,
            notes: Vec::new(),
            harmony: None,
            pending_measure: None,
            lyric: None,
            output_lines: Vec::new(),
            default_capacity_reported: false,
        }
    }

    /// Number of measure systems converted so far
    pub fn systems(&self) -> usize {
        self.output_lines.len() / 2
    }

    /// Apply one raw source line.
    pub fn apply_line(&mut self, line: &str, diagnostics: &mut Diagnostics) {
        let Some(sw) = classify_line(line) else {
            if !line.trim().is_empty() {
                diagnostics.info(
                    DiagnosticKind::UnrecognizedLine,
                    format!("Line unrecognized: {}", line.trim()),
                );
            }
            return;
        };

        let Some(kind) = sw.kind() else {
            diagnostics.warning(
                DiagnosticKind::UnknownLineType,
                format!("Unrecognized SW line type: {}", sw.type_char),
            );
            return;
        };

        self.apply(kind, &sw, diagnostics);
    }

    fn apply(&mut self, kind: LineKind, sw: &SwLine<'_>, diagnostics: &mut Diagnostics) {
        let data = sw.data;
        match kind {
            LineKind::Title => {
                self.harmony = None;
                self.pending_measure = None;
                self.lyric = None;
                self.title = non_empty(data);
            }
            LineKind::Composer | LineKind::Author => {
                if !data.is_empty() {
                    self.composers.push(data.to_string());
                }
            }
            LineKind::TempoText => set_if_present(&mut self.tempo, data),
            LineKind::Speed => set_if_present(&mut self.speed, data),
            LineKind::Key => set_if_present(&mut self.key, data),
            LineKind::TimeSignature => {
                if !data.is_empty() {
                    self.set_time_signature(data, diagnostics);
                }
            }
            LineKind::Note => {
                if !data.is_empty() {
                    self.notes.push(data.to_string());
                }
            }
            LineKind::Harmony => self.harmony = Some(data.to_string()),
            LineKind::Measure => {
                self.pending_measure = Some(PendingMeasure {
                    code: data.to_string(),
                    clef_code: sw.type_char,
                    separator: sw.separator,
                    line: diagnostics.current_line(),
                });
            }
            LineKind::Lyric => {
                self.lyric = Some(data.to_string());
                self.convert_system(data, diagnostics);
            }
        }
    }

    /// Read `<n>/<d>` through the time-signature digit table, falling back to
    /// 4/4 when the data does not have that shape.
    fn set_time_signature(&mut self, data: &str, diagnostics: &mut Diagnostics) {
        match parse_time_signature(data) {
            Some(ts) => {
                self.time_signature = Some(ts);
                self.beats_per_measure = ts.capacity();
            }
            None => {
                diagnostics.warning(
                    DiagnosticKind::MalformedTimeSignature,
                    format!("Cannot read time signature '{}', using 4/4", data),
                );
                self.time_signature = Some(TimeSignature::default());
                self.beats_per_measure = FALLBACK_BEATS_PER_MEASURE;
            }
        }
    }

    fn convert_system(&mut self, lyrics: &str, diagnostics: &mut Diagnostics) {
        let Some(pending) = self.pending_measure.take() else {
            diagnostics.warning(
                DiagnosticKind::LyricWithoutMeasure,
                "Lyric line without a preceding measure line, skipped",
            );
            return;
        };

        if self.time_signature.is_none() && !self.default_capacity_reported {
            diagnostics.info(
                DiagnosticKind::DefaultCapacity,
                format!(
                    "No time signature seen yet, using the default of {} sixteenths per measure",
                    self.beats_per_measure
                ),
            );
            self.default_capacity_reported = true;
        }

        // Decoder columns count within the measure line, so report it there
        let lyric_source_line = diagnostics.current_line();
        diagnostics.set_line(pending.line);
        let measure = decode_measure(
            &pending.code,
            self.beats_per_measure,
            pending.clef_code,
            diagnostics,
        );
        diagnostics.set_line(lyric_source_line);
        let lyric_line = align_lyrics(&measure.phrasing, lyrics, diagnostics);

        tracing::debug!(
            line = pending.line,
            bars = ?measure.declared_bars,
            notes = measure.phrasing.len(),
            "converted system"
        );

        self.output_lines.push(measure.abc);
        self.output_lines.push(lyric_line);
    }
}

/// Parse `B` line data: one code, `/`, one code. Anything after is ignored.
pub fn parse_time_signature(data: &str) -> Option<TimeSignature> {
    let mut chars = data.chars();
    let beats = chars.next().and_then(tables::time_digit)?;
    chars.next().filter(|c| *c == '/')?;
    let beat_type = chars.next().and_then(tables::time_digit)?;
    Some(TimeSignature { beats, beat_type })
}

fn non_empty(data: &str) -> Option<String> {
    if data.is_empty() {
        None
    } else {
        Some(data.to_string())
    }
}

fn set_if_present(field: &mut Option<String>, data: &str) {
    if !data.is_empty() {
        *field = Some(data.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply_all(lines: &[&str]) -> (TranscriptionState, Diagnostics) {
        let mut state = TranscriptionState::default();
        let mut diagnostics = Diagnostics::new();
        for (i, line) in lines.iter().enumerate() {
            diagnostics.set_line(i + 1);
            state.apply_line(line, &mut diagnostics);
        }
        (state, diagnostics)
    }

    #[test]
    fn test_time_signature_four_four() {
        let (state, diagnostics) = apply_all(&["B+ 4/4"]);
        assert_eq!(state.time_signature, Some(TimeSignature { beats: 4, beat_type: 4 }));
        assert_eq!(state.time_signature.unwrap().to_string(), "4/4");
        assert_eq!(state.beats_per_measure, 16);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_time_signature_extended_digits() {
        let (state, _) = apply_all(&["B+ </8"]);
        assert_eq!(state.time_signature.unwrap().to_string(), "12/8");
        assert_eq!(state.beats_per_measure, 24);
    }

    #[test]
    fn test_malformed_time_signature_falls_back() {
        let (state, diagnostics) = apply_all(&["B+ 3/4", "B+ common"]);
        assert_eq!(state.time_signature, Some(TimeSignature::default()));
        assert_eq!(state.beats_per_measure, 16);
        assert_eq!(diagnostics.count(DiagnosticKind::MalformedTimeSignature), 1);
    }

    #[test]
    fn test_empty_time_signature_is_ignored() {
        let (state, diagnostics) = apply_all(&["B+"]);
        assert_eq!(state.time_signature, None);
        assert_eq!(state.beats_per_measure, 40);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_header_fields() {
        let (state, _) = apply_all(&[
            "N+ Amazing Grace",
            "C+ John Newton",
            "A+ J. Transcriber",
            "c+",
            "T+ Slowly",
            "S+ 80",
            "K+ G",
            "F+ Verse 1 of 4",
            "H+ G C G D",
        ]);
        assert_eq!(state.title.as_deref(), Some("Amazing Grace"));
        assert_eq!(state.composers, vec!["John Newton", "J. Transcriber"]);
        assert_eq!(state.tempo.as_deref(), Some("Slowly"));
        assert_eq!(state.speed.as_deref(), Some("80"));
        assert_eq!(state.key.as_deref(), Some("G"));
        assert_eq!(state.notes, vec!["Verse 1 of 4"]);
        assert_eq!(state.harmony.as_deref(), Some("G C G D"));
    }

    #[test]
    fn test_measure_and_lyric_pair() {
        let (state, _) = apply_all(&["B+ 4/4", "M+ 1C-4D-4E-2", "L+ Do re mi "]);
        assert_eq!(state.output_lines, vec!["C4D4E8|", "w: Do re mi"]);
        assert_eq!(state.systems(), 1);
        assert!(state.pending_measure.is_none());
    }

    #[test]
    fn test_measure_line_records_clef_and_separator() {
        let (state, diagnostics) = apply_all(&["m- 1C-4"]);
        let pending = state.pending_measure.unwrap();
        assert_eq!(pending.clef_code, 'm');
        assert_eq!(pending.separator, '-');
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_bass_measure_is_flagged_on_decode() {
        let (state, diagnostics) = apply_all(&["B+ 4/4", "m+ C-4", "L+ la "]);
        assert_eq!(state.output_lines[0], "C4");
        assert_eq!(diagnostics.count(DiagnosticKind::NonTrebleClef), 1);
    }

    #[test]
    fn test_title_clears_pending_measure() {
        let (state, diagnostics) = apply_all(&["M+ C-4", "N+ Second Song", "L+ la "]);
        assert!(state.output_lines.is_empty());
        assert_eq!(diagnostics.count(DiagnosticKind::LyricWithoutMeasure), 1);
    }

    #[test]
    fn test_diagnostics_point_at_their_source_line() {
        let (_, diagnostics) = apply_all(&["B+ 4/4", "M+ C-4!D-4", "", "L+ one two three "]);
        let all = diagnostics.diagnostics();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].kind, DiagnosticKind::UnrecognizedCode);
        assert_eq!((all[0].line, all[0].column), (2, 4));
        assert_eq!(all[1].kind, DiagnosticKind::LeftoverLyrics);
        assert_eq!(all[1].line, 4);
        assert_eq!(diagnostics.current_line(), 4);
    }

    #[test]
    fn test_lyric_consumes_measure() {
        let (state, diagnostics) = apply_all(&["B+ 4/4", "M+ C-4", "L+ la ", "L+ again "]);
        assert_eq!(state.systems(), 1);
        assert_eq!(diagnostics.count(DiagnosticKind::LyricWithoutMeasure), 1);
        assert_eq!(diagnostics.diagnostics()[0].line, 4);
    }

    #[test]
    fn test_default_capacity_reported_once() {
        let (state, diagnostics) = apply_all(&["M+ C-1", "L+ a ", "M+ D-1", "L+ b "]);
        assert_eq!(state.systems(), 2);
        assert_eq!(diagnostics.count(DiagnosticKind::DefaultCapacity), 1);
    }

    #[test]
    fn test_unknown_and_unrecognized_lines() {
        let (state, diagnostics) = apply_all(&["Q+ what", "just text", ""]);
        assert_eq!(state, TranscriptionState::default());
        assert_eq!(diagnostics.count(DiagnosticKind::UnknownLineType), 1);
        assert_eq!(diagnostics.count(DiagnosticKind::UnrecognizedLine), 1);
    }

    #[test]
    fn test_parse_time_signature() {
        assert_eq!(
            parse_time_signature("6/8"),
            Some(TimeSignature { beats: 6, beat_type: 8 })
        );
        assert_eq!(
            parse_time_signature("3/4 waltz"),
            Some(TimeSignature { beats: 3, beat_type: 4 })
        );
        assert_eq!(parse_time_signature("0/4"), None);
        assert_eq!(parse_time_signature("34"), None);
        assert_eq!(parse_time_signature("3/"), None);
    }
}
