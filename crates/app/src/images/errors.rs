//! Image store errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageStoreError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Storage returned a non-2xx response or an unexpected body.
    #[error("unexpected response from storage: {0}")]
    UnexpectedResponse(String),

    /// The configured storage URL cannot address objects.
    #[error("invalid storage url: {0}")]
    InvalidUrl(String),
}
