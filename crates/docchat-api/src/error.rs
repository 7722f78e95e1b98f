use std::path::PathBuf;

/// Failures outside the request/response flow itself.
///
/// Anything that happens while talking to the backend is reported as an
/// [`docchat_core::Outcome`] instead.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid server URL: {0:?}")]
    InvalidUrl(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
