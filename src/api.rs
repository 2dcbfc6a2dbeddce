//! # File API
//!
//! Whole-file entry points around [`convert_with_config`](crate::convert_with_config).
//!
//! - [`convert_file()`] - Read an SW file and convert it
//! - [`output_path()`] - Where the ABC for an input file goes
//! - [`write_output()`] - Write ABC text, creating the output directory
//! - [`copy_to_clipboard()`] - Put ABC text on the system clipboard
//!
//! ## Typical Usage
//!
//! ```rust,no_run
//! use sw2abc::{convert_file, output_path, write_output, Config};
//!
//! let config = Config::default();
//! let input = "songs/amazing.sw";
//! let conversion = convert_file(input, &config)?;
//! write_output(&output_path(input, &config), &conversion.abc)?;
//! // dt_abc/amazing.abc now holds the tune
//! # Ok::<(), sw2abc::SwError>(())
//! ```

use crate::config::Config;
use crate::error::SwError;
use crate::{convert_with_config, Conversion};
use std::fs;
use std::path::{Path, PathBuf};

/// Read and convert one SW file.
///
/// The whole file is read before conversion starts, so an unreadable file
/// fails before anything is produced. Bytes that are not valid UTF-8 are
/// replaced rather than rejected.
///
/// # Errors
/// Returns [`SwError::Io`] if the file cannot be read.
pub fn convert_file(path: impl AsRef<Path>, config: &Config) -> Result<Conversion, SwError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| SwError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let source = String::from_utf8_lossy(&bytes);

    let conversion = convert_with_config(&source, config);
    tracing::info!(
        path = %path.display(),
        systems = conversion.systems,
        diagnostics = conversion.diagnostics.len(),
        "converted SW file"
    );
    Ok(conversion)
}

/// `<output-dir>/<input stem>.abc`
pub fn output_path(input: impl AsRef<Path>, config: &Config) -> PathBuf {
    let stem = input
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    config.output_dir.join(format!("{}.abc", stem))
}

/// Write ABC text, creating missing parent directories.
///
/// # Errors
/// Returns [`SwError::Io`] if the directory or file cannot be written.
pub fn write_output(path: impl AsRef<Path>, abc: &str) -> Result<(), SwError> {
    let path = path.as_ref();
    let io_error = |source: std::io::Error| SwError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    fs::write(path, abc).map_err(io_error)
}

/// Copy ABC text to the system clipboard.
///
/// # Errors
/// Returns [`SwError::ClipboardError`] if no clipboard is available.
#[cfg(feature = "clipboard")]
pub fn copy_to_clipboard(abc: &str) -> Result<(), SwError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| SwError::ClipboardError(e.to_string()))?;
    clipboard
        .set_text(abc)
        .map_err(|e| SwError::ClipboardError(e.to_string()))
}

#[cfg(not(feature = "clipboard"))]
pub fn copy_to_clipboard(_abc: &str) -> Result<(), SwError> {
    Err(SwError::ClipboardError(
        "sw2abc was built without the `clipboard` feature".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_uses_stem() {
        let config = Config::default();
        assert_eq!(
            output_path("songs/Amazing Grace.sw", &config),
            PathBuf::from("dt_abc/Amazing Grace.abc")
        );
    }

    #[test]
    fn test_output_path_respects_config() {
        let config = Config {
            output_dir: PathBuf::from("/tmp/out"),
            ..Config::default()
        };
        assert_eq!(output_path("hymn.SW", &config), PathBuf::from("/tmp/out/hymn.abc"));
    }

    #[test]
    fn test_write_output_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tune.abc");
        write_output(&path, "X: 1").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "X: 1");
    }

    #[test]
    fn test_convert_missing_file_is_fatal() {
        let err = convert_file("/nonexistent/song.sw", &Config::default()).unwrap_err();
        match err {
            SwError::Io { path, .. } => assert_eq!(path, PathBuf::from("/nonexistent/song.sw")),
            other => panic!("Expected Io error, got {:?}", other),
        }
    }

    #[test]
    fn test_convert_file_tolerates_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.sw");
        fs::write(&path, b"N+ Caf\xe9\nB+ 4/4\n").unwrap();
        let conversion = convert_file(&path, &Config::default()).unwrap();
        assert!(conversion.abc.contains("T: Caf\u{fffd}"));
        assert!(conversion.abc.contains("M: 4/4"));
    }
}
