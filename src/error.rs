use std::path::PathBuf;

use thiserror::Error;

/// Conditions that abort a run with a failure exit status.
///
/// Skips and "not found" are not errors; see [`crate::pipeline::Outcome`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to parse song info: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to write LRC file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
