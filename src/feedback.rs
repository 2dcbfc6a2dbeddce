//! Conversion diagnostics (errors, warnings, notes).
//!
//! The converter keeps going through anything short of an unreadable file.
//! Every anomaly it steps over is recorded here instead of being logged from
//! deep inside the decoder, so callers and tests see exactly what happened.

use serde::{Deserialize, Serialize};

/// What went wrong, independent of the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticKind {
    /// Source line does not match `<type><+|-><data>`
    UnrecognizedLine,
    /// Line type letter has no meaning
    UnknownLineType,
    /// `B` line data is not `<digit>/<digit>`
    MalformedTimeSignature,
    /// Inline `ST` meter change uses a code outside the digit table
    UnknownTimeSignatureDigit,
    NonTrebleClef,
    UnknownPitch,
    UnknownDuration,
    /// Measure code matches no token rule and was skipped
    UnrecognizedCode,
    /// Tie still open when the measure line ended
    UnclosedTie,
    /// `L` line arrived without a measure line to pair with
    LyricWithoutMeasure,
    /// A measure line was decoded before any `B` line set the meter
    DefaultCapacity,
    /// Lyric text remained after every note had its syllable
    LeftoverLyrics,
}

/// A single diagnostic from a conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub kind: DiagnosticKind,
    pub message: String,
    /// 1-based source line
    pub line: usize,
    /// 1-based character column within the line's data, 0 when not applicable
    pub column: usize,
}

impl Diagnostic {
    pub fn error(
        kind: DiagnosticKind,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Diagnostic {
            level: DiagnosticLevel::Error,
            kind,
            message: message.into(),
            line,
            column,
        }
    }

    pub fn warning(
        kind: DiagnosticKind,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Diagnostic {
            level: DiagnosticLevel::Warning,
            kind,
            message: message.into(),
            line,
            column,
        }
    }

    pub fn info(
        kind: DiagnosticKind,
        message: impl Into<String>,
        line: usize,
        column: usize,
    ) -> Self {
        Diagnostic {
            level: DiagnosticLevel::Info,
            kind,
            message: message.into(),
            line,
            column,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticLevel {
    /// Input was dropped - some of the source did not make it into the output
    Error,
    /// Converted with assumptions, may not be what the transcriber intended
    Warning,
    /// Informational only
    Info,
}

/// Collector for diagnostics during a conversion
#[derive(Debug, Default)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
    current_line: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics {
            diagnostics: Vec::new(),
            current_line: 1,
        }
    }

    /// Update the source line that subsequent diagnostics are attributed to
    pub fn set_line(&mut self, line: usize) {
        self.current_line = line;
    }

    pub fn current_line(&self) -> usize {
        self.current_line
    }

    pub fn error(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.error_at(kind, message, 0);
    }

    pub fn error_at(&mut self, kind: DiagnosticKind, message: impl Into<String>, column: usize) {
        self.diagnostics
            .push(Diagnostic::error(kind, message, self.current_line, column));
    }

    pub fn warning(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.warning_at(kind, message, 0);
    }

    pub fn warning_at(&mut self, kind: DiagnosticKind, message: impl Into<String>, column: usize) {
        self.diagnostics
            .push(Diagnostic::warning(kind, message, self.current_line, column));
    }

    pub fn info(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::info(kind, message, self.current_line, 0));
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.level == DiagnosticLevel::Error)
    }

    /// Number of diagnostics of the given kind
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}
