pub mod abc;
pub mod api;
pub mod ast;
pub mod config;
pub mod decoder;
pub mod error;
pub mod feedback;
pub mod lexer;
pub mod lines;
pub mod lyrics;
pub mod state;
pub mod tables;

pub use abc::to_abc;
pub use api::*;
pub use ast::*;
pub use config::Config;
pub use error::*;
pub use feedback::{Diagnostic, DiagnosticKind, DiagnosticLevel, Diagnostics};
pub use state::TranscriptionState;

/// Result of converting one SW source
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    /// Complete ABC text, header then one music and one `w:` line per system
    pub abc: String,
    pub diagnostics: Vec<Diagnostic>,
    /// Measure systems converted
    pub systems: usize,
}

impl Conversion {
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.level == DiagnosticLevel::Error)
    }
}

/// Convert SW source text to ABC with default settings.
/// This is the main entry point for the library.
pub fn convert(source: &str) -> Conversion {
    convert_with_config(source, &Config::default())
}

/// Convert SW source text to ABC
pub fn convert_with_config(source: &str, config: &Config) -> Conversion {
    let mut state = TranscriptionState::new(config);
    let mut diagnostics = Diagnostics::new();

    for (i, line) in source.lines().enumerate() {
        diagnostics.set_line(i + 1);
        state.apply_line(line, &mut diagnostics);
    }

    Conversion {
        abc: to_abc(&state),
        diagnostics: diagnostics.into_diagnostics(),
        systems: state.systems(),
    }
}
