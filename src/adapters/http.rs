use crate::domain::ports::Fetcher;
use crate::utils::error::{EtlError, Result};
use reqwest::Client;
use std::time::Duration;

const BOM: char = '\u{feff}';

/// Plain GET against the open data portal. No retries.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EtlError::ConfigError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!("Making request to: {}", url);

        let transport = |source| EtlError::TransportError {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(EtlError::HttpStatusError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(transport)?;
        Ok(decode_utf8_sig(&body, url))
    }
}

/// UTF-8 with an optional leading byte-order mark.
pub fn decode_utf8_sig(bytes: &[u8], origin: &str) -> String {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(e) => {
            tracing::warn!(
                "Invalid UTF-8 in response from {} at byte {}; replacing bad sequences",
                origin,
                e.valid_up_to()
            );
            String::from_utf8_lossy(bytes).into_owned()
        }
    };

    match text.strip_prefix(BOM) {
        Some(stripped) => stripped.to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_decode_strips_bom() {
        let bytes = "\u{feff}PLZ,Abholdatum\n".as_bytes();
        assert_eq!(decode_utf8_sig(bytes, "t"), "PLZ,Abholdatum\n");
        assert_eq!(decode_utf8_sig(b"PLZ\n", "t"), "PLZ\n");
    }

    #[test]
    fn test_decode_keeps_umlauts_and_replaces_garbage() {
        assert_eq!(decode_utf8_sig("Zürich".as_bytes(), "t"), "Zürich");
        assert_eq!(decode_utf8_sig(b"a\xffb", "t"), "a\u{fffd}b");
    }

    #[tokio::test]
    async fn test_fetch_returns_body_without_bom() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/data.csv");
                then.status(200)
                    .header("Content-Type", "text/csv")
                    .body("\u{feff}PLZ,Abholdatum\n8001,2024-01-05\n");
            })
            .await;

        let text = fetcher().fetch(&server.url("/data.csv")).await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "PLZ,Abholdatum\n8001,2024-01-05\n");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status_is_error() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/missing.csv");
                then.status(404);
            })
            .await;

        let url = server.url("/missing.csv");
        let err = fetcher().fetch(&url).await.unwrap_err();

        mock.assert_async().await;
        match err {
            EtlError::HttpStatusError { url: failed, status } => {
                assert_eq!(failed, url);
                assert_eq!(status, 404);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_transport_error() {
        let err = fetcher()
            .fetch("http://127.0.0.1:9/unreachable.csv")
            .await
            .unwrap_err();
        assert!(matches!(err, EtlError::TransportError { .. }));
    }
}
