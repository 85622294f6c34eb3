//! Error types for mstp-lint-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while processing topics and scanning trees.
///
/// There is no per-file isolation: the first failing topic aborts the
/// whole scan. Files already written stay written.
#[derive(Error, Debug)]
pub enum ScanError {
    /// A topic file could not be read or written.
    #[error("failed to access {path}: {source}")]
    Io {
        /// The file or directory involved.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A topic file is not well-formed markup.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// The offending topic file.
        path: Utf8PathBuf,
        /// The underlying parser error.
        #[source]
        source: quick_xml::Error,
    },

    /// A path produced by the walker is not valid UTF-8.
    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(String),
}

impl ScanError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias using [`ScanError`].
pub type ScanResult<T> = Result<T, ScanError>;
