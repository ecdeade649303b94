use std::path::PathBuf;

/// Errors surfaced by the capture pipeline.
///
/// Title lookups never produce one of these; a failed lookup is just "no title".
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// A vault folder could not be created. Fatal at startup.
    #[error("failed to create vault folder {path:?}: {source}")]
    Layout {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to build http client: {0}")]
    HttpClient(String),
}

pub type CaptureResult<T> = Result<T, CaptureError>;
