//! Configuration error types.

use std::io;
use std::path::PathBuf;

/// Errors that can occur when loading, saving, or parsing `config.ron`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config directory or file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file is not valid RON for [`Config`](crate::Config).
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    /// The config could not be serialized.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),
}
