//! # Converter Configuration
//!
//! Settings are read from an optional YAML file. Every key is optional and
//! unknown keys are rejected so typos do not go unnoticed.
//!
//! ```yaml
//! output-dir: dt_abc
//! reference-number: 1
//! default-beats-per-measure: 40
//! copy: false
//! ```
//!
//! ## Default capacity
//! `default-beats-per-measure` applies to measure lines decoded before any `B`
//! line sets the meter. The historical default of 40 sixteenths does not
//! correspond to any common meter (4/4 is 16), so conversions that rely on it
//! carry a `default-capacity` diagnostic.

use crate::error::SwError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "dt_abc";
pub const DEFAULT_BEATS_PER_MEASURE: u32 = 40;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory that receives `<stem>.abc`
    pub output_dir: PathBuf,
    /// ABC `X:` reference number
    pub reference_number: u32,
    /// Measure capacity in sixteenths until a `B` line is seen
    pub default_beats_per_measure: u32,
    /// Also copy the converted text to the clipboard
    pub copy: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            reference_number: 1,
            default_beats_per_measure: DEFAULT_BEATS_PER_MEASURE,
            copy: false,
        }
    }
}

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    output_dir: Option<PathBuf>,
    reference_number: Option<u32>,
    default_beats_per_measure: Option<u32>,
    copy: Option<bool>,
}

impl Config {
    pub fn from_yaml(content: &str) -> Result<Self, SwError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| SwError::ConfigError(e.to_string()))?;
        let defaults = Self::default();

        Ok(Self {
            output_dir: raw.output_dir.unwrap_or(defaults.output_dir),
            reference_number: raw.reference_number.unwrap_or(defaults.reference_number),
            default_beats_per_measure: raw
                .default_beats_per_measure
                .unwrap_or(defaults.default_beats_per_measure),
            copy: raw.copy.unwrap_or(defaults.copy),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SwError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SwError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
        assert_eq!(Config::from_yaml("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_yaml("output-dir: out/abc\ncopy: true\n").unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out/abc"));
        assert!(config.copy);
        assert_eq!(config.reference_number, 1);
        assert_eq!(config.default_beats_per_measure, 40);
    }

    #[test]
    fn test_full_config() {
        let yaml = r#"
output-dir: abc
reference-number: 7
default-beats-per-measure: 16
copy: false
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.reference_number, 7);
        assert_eq!(config.default_beats_per_measure, 16);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Config::from_yaml("output_dir: abc\n").unwrap_err();
        assert!(matches!(err, SwError::ConfigError(_)));
        assert!(err.to_string().starts_with("Invalid configuration:"));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/nonexistent/sw2abc.yaml").unwrap_err();
        assert!(matches!(err, SwError::Io { .. }));
    }
}
