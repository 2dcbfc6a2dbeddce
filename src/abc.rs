use crate::state::TranscriptionState;

/// ABC base note length; every SW duration is a whole number of sixteenths
const BASE_LENGTH: &str = "1/16";

/// Convert a finished transcription to ABC text
pub fn to_abc(state: &TranscriptionState) -> String {
    let mut lines = header_lines(state);
    lines.extend(state.output_lines.iter().cloned());
    lines.join("\n")
}

/// ABC header directives, in the order ABC readers expect them
pub fn header_lines(state: &TranscriptionState) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("X: {}", state.reference_number));

    if let Some(title) = &state.title {
        lines.push(format!("T: {}", title));
    }

    for composer in &state.composers {
        lines.push(format!("C: {}", composer));
    }

    // Tempo text alone has no ABC form; it rides along with a speed
    if let Some(speed) = &state.speed {
        match &state.tempo {
            Some(tempo) => lines.push(format!("Q: \"{}\" 1/4={}", tempo, speed)),
            None => lines.push(format!("Q: 1/4={}", speed)),
        }
    }

    if let Some(key) = &state.key {
        lines.push(format!("K: {}", key));
    }

    if let Some(time_signature) = &state.time_signature {
        lines.push(format!("M: {}", time_signature));
    }

    lines.push(format!("L: {}", BASE_LENGTH));

    for note in &state.notes {
        lines.push(format!("N: {}", note));
    }

    lines
}
