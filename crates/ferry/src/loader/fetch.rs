//! Pluggable data fetching.
//!
//! Tables are named by a source string that is either a local path or an
//! `http(s)://` URL. External crates can implement [`DataFetcher`] to pull
//! tables from anywhere else.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

use crate::models::types::{FerryError, Result};

/// Fetch raw bytes for a source identifier
pub trait DataFetcher: Send + Sync {
    fn fetch<'a>(
        &'a self,
        source: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>>;
}

fn load_error(source: &str, reason: impl ToString) -> FerryError {
    FerryError::Load {
        resource: source.to_string(),
        reason: reason.to_string(),
    }
}

// ============================================================================
// Local Files
// ============================================================================

/// Reads sources as paths on the local filesystem
#[derive(Clone, Copy, Debug, Default)]
pub struct FileFetcher;

impl DataFetcher for FileFetcher {
    fn fetch<'a>(
        &'a self,
        source: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            debug!(source, "reading table from disk");
            tokio::fs::read(source)
                .await
                .map_err(|e| load_error(source, e))
        })
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// Reads sources over HTTP(S)
#[cfg(feature = "http")]
#[derive(Clone, Debug, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "http")]
impl DataFetcher for HttpFetcher {
    fn fetch<'a>(
        &'a self,
        source: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        Box::pin(async move {
            debug!(source, "downloading table");
            let response = self
                .client
                .get(source)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| load_error(source, e))?;

            let bytes = response.bytes().await.map_err(|e| load_error(source, e))?;
            Ok(bytes.to_vec())
        })
    }
}

// ============================================================================
// Dispatch
// ============================================================================

pub(crate) fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Picks HTTP or the filesystem from the shape of the source string
#[derive(Clone, Debug, Default)]
pub struct SourceFetcher {
    files: FileFetcher,
    #[cfg(feature = "http")]
    http: HttpFetcher,
}

impl SourceFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataFetcher for SourceFetcher {
    fn fetch<'a>(
        &'a self,
        source: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        if is_url(source) {
            #[cfg(feature = "http")]
            {
                return self.http.fetch(source);
            }

            #[cfg(not(feature = "http"))]
            {
                return Box::pin(async move {
                    Err::<Vec<u8>, _>(load_error(source, "built without the `http` feature"))
                });
            }
        }

        self.files.fetch(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.org/flota.csv"));
        assert!(is_url("http://localhost:8000/horario.csv"));
        assert!(!is_url("src/flota.csv"));
        assert!(!is_url("/tmp/https.csv"));
    }

    #[tokio::test]
    async fn test_file_fetcher_reads_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"a;b\r\n1;2\r\n").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let bytes = FileFetcher.fetch(&path).await.unwrap();
        assert_eq!(bytes, b"a;b\r\n1;2\r\n");
    }

    #[tokio::test]
    async fn test_missing_file_is_load_error() {
        let err = SourceFetcher::new()
            .fetch("/definitely/not/here/flota.csv")
            .await
            .unwrap_err();

        match err {
            FerryError::Load { resource, .. } => {
                assert_eq!(resource, "/definitely/not/here/flota.csv")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
