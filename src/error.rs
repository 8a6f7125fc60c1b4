//! Error types for document extraction.
//!
//! Only document-level failures are represented here. A single line that fails
//! filtering or matching is never an error: it is absorbed inside the pipeline
//! so one malformed line cannot prevent extraction of the rest.

use thiserror::Error;

/// Terminal errors for one document-processing invocation.
///
/// When any of these is returned, no partial output is produced for that
/// document.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The source document could not be decoded at all.
    #[error("unable to decode source document: {0}")]
    Decode(String),

    /// The rule configuration failed validation.
    #[error("invalid rule configuration: {0}")]
    InvalidConfig(String),

    /// The remote fetch failed or timed out.
    #[cfg(feature = "fetch")]
    #[error("failed to fetch remote document: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The remote server answered with a non-success status.
    #[cfg(feature = "fetch")]
    #[error("remote fetch of {url} returned HTTP status {status}")]
    FetchStatus { url: String, status: u16 },
}

impl ExtractError {
    /// Create a decode error from any displayable source-layer failure.
    pub fn decode<E: std::fmt::Display>(err: E) -> Self {
        ExtractError::Decode(err.to_string())
    }
}
