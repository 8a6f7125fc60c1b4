//! Remote fetch collaborator (feature `fetch`).
//!
//! Retrieves the raw bytes of a remote report over HTTP with a bounded
//! timeout. Any failure — connection error, timeout, non-success status — is
//! terminal for that invocation; no retries are performed here, the caller may
//! retry the whole document.

use crate::error::ExtractError;
use log::debug;
use std::time::Duration;

/// Default timeout for one fetch, covering connect and body transfer.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking HTTP fetcher with a bounded per-request timeout.
#[derive(Debug, Clone)]
pub struct RemoteFetcher {
    client: reqwest::blocking::Client,
}

impl RemoteFetcher {
    /// Creates a fetcher with the given per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::Fetch`] when the underlying client cannot be
    /// constructed.
    pub fn new(timeout: Duration) -> Result<Self, ExtractError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Creates a fetcher with [`DEFAULT_FETCH_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_default_timeout() -> Result<Self, ExtractError> {
        Self::new(DEFAULT_FETCH_TIMEOUT)
    }

    /// Downloads the raw bytes of one remote document.
    ///
    /// # Errors
    ///
    /// [`ExtractError::Fetch`] on connection failure or timeout,
    /// [`ExtractError::FetchStatus`] on any non-success HTTP status.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, ExtractError> {
        debug!("fetching remote document from {url}");
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::FetchStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_construction() {
        assert!(RemoteFetcher::new(Duration::from_secs(5)).is_ok());
        assert!(RemoteFetcher::with_default_timeout().is_ok());
    }
}
