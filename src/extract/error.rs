use std::path::PathBuf;

use thiserror::Error;

/// File-fatal extraction failures.
///
/// Any of these abandons the current file's extraction with no partial
/// result; the caller logs the error and moves on to the next file.
/// Item-level problems (one bad SBOM package, one odd requirement
/// token) never surface here — they are dropped or degraded in place.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid python syntax: {0}")]
    Syntax(String),

    #[error("syntax tree root is not a module")]
    NotAModule,

    #[error("malformed SBOM document: {0}")]
    Sbom(String),

    #[error("extraction cancelled")]
    Cancelled,
}

impl ExtractError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        ExtractError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
