//! Image download.
//!
//! One blocking request per image with a bounded timeout. No retries: a
//! failure is final for that image in this run.

use std::time::Duration;

use thiserror::Error;

use crate::log;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request failed")]
    Transport(#[source] reqwest::Error),

    #[error("server answered HTTP {0}")]
    Status(u16),

    #[error("failed to read response body")]
    Body(#[source] reqwest::Error),
}

/// Source of image bytes.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// [`Fetch`] over HTTP(S).
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("hotelsite/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self.client.get(url).send().map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().map_err(FetchError::Body)?;
        Ok(body.to_vec())
    }
}

/// Download `url`, logging the cause on failure.
///
/// `None` is the only failure signal callers see.
pub fn fetch_bytes(fetcher: &dyn Fetch, url: &str) -> Option<Vec<u8>> {
    match fetcher.fetch(url) {
        Ok(bytes) => Some(bytes),
        Err(err) => {
            log!("error"; "download {}: {:#}", url, anyhow::Error::new(err));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Failing;

    impl Fetch for Failing {
        fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
            Err(FetchError::Status(404))
        }
    }

    struct Echo;

    impl Fetch for Echo {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            Ok(url.as_bytes().to_vec())
        }
    }

    #[test]
    fn test_fetch_bytes_failure_is_none() {
        assert_eq!(fetch_bytes(&Failing, "https://example.com/a.jpg"), None);
    }

    #[test]
    fn test_fetch_bytes_success() {
        assert_eq!(fetch_bytes(&Echo, "abc"), Some(b"abc".to_vec()));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(FetchError::Status(503).to_string(), "server answered HTTP 503");
    }

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new(Duration::from_secs(30)).is_ok());
    }
}
