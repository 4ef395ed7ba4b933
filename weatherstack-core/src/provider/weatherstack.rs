use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, Response, Url};
use tracing::{debug, info, warn};

use crate::{Config, LocationQuery, error::FetchError};

use super::WeatherProvider;

// Unreserved characters (RFC 3986) stay as they are; everything else is escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.').remove(b'~');

#[derive(Debug, Clone)]
pub struct WeatherstackProvider {
    config: Config,
    http: Client,
}

impl WeatherstackProvider {
    pub fn new(config: Config) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("weatherstack-core/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { config, http })
    }

    /// `<base>/current?access_key=<key>&query=<country>,<region>`, each value percent-encoded.
    pub fn current_url(&self, query: &LocationQuery) -> Result<Url, FetchError> {
        let raw = format!(
            "{}?access_key={}&query={},{}",
            self.config.current_endpoint(),
            encode(&self.config.access_key),
            encode(&query.country),
            encode(&query.region),
        );

        Url::parse(&raw).map_err(|e| FetchError::InvalidUrl(format!("{e}: {}", self.config.base_url)))
    }
}

#[async_trait]
impl WeatherProvider for WeatherstackProvider {
    async fn fetch_current(&self, query: &LocationQuery) -> Result<Vec<u8>, FetchError> {
        let url = self.current_url(query)?;
        debug!(
            endpoint = %self.config.current_endpoint(),
            country = %query.country,
            region = %query.region,
            "Requesting current conditions"
        );

        let res = self.http.get(url).send().await.map_err(FetchError::Network)?;

        let status = res.status();
        if !status.is_success() {
            let body = read_body(res, self.config.max_body_bytes)
                .await
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .unwrap_or_default();
            warn!(%status, "weatherstack returned a non-success status");
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        let body = read_body(res, self.config.max_body_bytes).await?;
        info!(bytes = body.len(), "Received weatherstack response");

        Ok(body)
    }
}

/// Drain the body until end-of-stream. The response is dropped on every return path.
async fn read_body(mut res: Response, limit: usize) -> Result<Vec<u8>, FetchError> {
    if res.content_length().is_some_and(|len| len > limit as u64) {
        return Err(FetchError::BodyTooLarge { limit });
    }

    let mut body = Vec::new();
    while let Some(chunk) = res.chunk().await.map_err(FetchError::Read)? {
        if body.len() + chunk.len() > limit {
            return Err(FetchError::BodyTooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }

    if body.is_empty() {
        return Err(FetchError::EmptyBody);
    }

    Ok(body)
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
