//! # Error Types
//!
//! This module defines the fatal error type for the SW converter.
//!
//! Almost nothing in an SW file is fatal. Malformed meters, unknown line types,
//! unrecognized measure codes and unusual clefs are recovered locally and
//! reported as [`Diagnostic`](crate::feedback::Diagnostic) records instead.
//! `SwError` is reserved for the failures that stop a conversion outright.
//!
//! ## Error Types
//! - `Io` - The input file could not be read, or the output could not be written
//! - `ConfigError` - The YAML configuration file is invalid
//! - `ClipboardError` - Copying the converted text to the clipboard failed
//!
//! ## Usage
//! ```rust,no_run
//! use sw2abc::{convert_file, Config, SwError};
//!
//! match convert_file("songs/amazing.sw", &Config::default()) {
//!     Ok(conversion) => println!("{}", conversion.abc),
//!     Err(SwError::Io { path, source }) => {
//!         eprintln!("Cannot access {}: {}", path.display(), source);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwError {
    /// Reading the input or writing the output failed.
    ///
    /// # Example
    /// ```
    /// # use sw2abc::SwError;
    /// # use std::path::PathBuf;
    /// let err = SwError::Io {
    ///     path: PathBuf::from("missing.sw"),
    ///     source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    /// };
    /// assert_eq!(err.to_string(), "I/O error on 'missing.sw': not found");
    /// ```
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration file.
    ///
    /// # Example
    /// ```
    /// # use sw2abc::SwError;
    /// let err = SwError::ConfigError("unknown field `colour`".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: unknown field `colour`");
    /// ```
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Clipboard error: {0}")]
    ClipboardError(String),
}
