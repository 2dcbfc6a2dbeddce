//! # Shared Value Types
//!
//! Types passed between the symbol tables, the measure decoder, the lyric
//! aligner and the document renderer.
//!
//! ## Units
//! Every duration and capacity in this crate is counted in sixteenth notes,
//! which is also the ABC base unit the converter declares (`L: 1/16`). A
//! quarter note is therefore `4`, and a 4/4 measure holds `16`.
//!
//! ## Phrasing
//! Decoding a measure line yields one phrasing entry per sounding event:
//! - an untied note records `0`
//! - a tie group records the number of tokens that were folded into the tie
//!   before the closing token (`C-4_C-4` records `1`)
//!
//! The lyric aligner turns each entry into that many `_` continuations after
//! the syllable sung on the event.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Clef announced by the type character of a measure line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Clef {
    #[default]
    Treble,
    Bass,
}

impl fmt::Display for Clef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clef::Treble => write!(f, "treble"),
            Clef::Bass => write!(f, "bass"),
        }
    }
}

/// A note length in sixteenth-note units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration {
    pub units: u32,
    /// Written as part of a triplet (SW codes `6` and `7`)
    pub triplet: bool,
}

impl Duration {
    /// ABC length suffix relative to `L: 1/16`
    pub fn abc_suffix(&self) -> String {
        self.units.to_string()
    }
}

/// Time signature (e.g., 4/4, 3/4, 6/8)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSignature {
    pub beats: u32,
    pub beat_type: u32,
}

impl Default for TimeSignature {
    fn default() -> Self {
        Self {
            beats: 4,
            beat_type: 4,
        }
    }
}

impl TimeSignature {
    /// Sixteenth-note units that fill one measure, truncated toward zero
    pub fn capacity(&self) -> u32 {
        if self.beat_type == 0 {
            return 0;
        }
        self.beats * 16 / self.beat_type
    }
}

impl fmt::Display for TimeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.beats, self.beat_type)
    }
}

/// Lyric continuation counts, one per sounding event
pub type Phrasing = Vec<u32>;

/// Result of decoding one measure-code line
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedMeasure {
    /// ABC music line
    pub abc: String,
    pub phrasing: Phrasing,
    /// Bar count written in front of the measure codes, if any
    pub declared_bars: Option<u32>,
    pub clef: Clef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_common_meters() {
        let cases = [((4, 4), 16), ((3, 4), 12), ((6, 8), 12), ((2, 2), 16), ((12, 8), 24)];
        for ((beats, beat_type), expected) in cases {
            let ts = TimeSignature { beats, beat_type };
            assert_eq!(ts.capacity(), expected, "capacity of {}", ts);
        }
    }

    #[test]
    fn test_capacity_truncates() {
        // 5/16 * 16 = 5, 7/3 * 16 = 37.33
        assert_eq!(TimeSignature { beats: 5, beat_type: 16 }.capacity(), 5);
        assert_eq!(TimeSignature { beats: 7, beat_type: 3 }.capacity(), 37);
    }

    #[test]
    fn test_time_signature_display() {
        assert_eq!(TimeSignature::default().to_string(), "4/4");
        assert_eq!(TimeSignature { beats: 13, beat_type: 8 }.to_string(), "13/8");
    }
}
