//! HTTP fetcher for the MediaWarp monitor endpoint.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::USER_AGENT;

use super::MonitorSnapshot;
use crate::config::MonitorConfig;
use crate::error::FetchError;

/// Something that can produce one monitor snapshot per call.
///
/// The poller calls [`Fetcher::fetch`] once per tick. Implementations must
/// not retry internally; the next tick is the only retry.
#[async_trait]
pub trait Fetcher: Send + Sync + Debug {
    /// Fetch and decode a single snapshot.
    async fn fetch(&self) -> Result<MonitorSnapshot, FetchError>;

    /// Human-readable description of where snapshots come from.
    fn description(&self) -> &str;
}

/// Fetches snapshots with a single `GET` request per call.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    url: String,
    user_agent: String,
    description: String,
}

impl HttpFetcher {
    /// Build a fetcher from the monitor configuration.
    pub fn new(config: &MonitorConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self::with_client(config, client))
    }

    /// Build a fetcher around an existing client.
    pub fn with_client(config: &MonitorConfig, client: reqwest::Client) -> Self {
        let url = config.endpoint_url();
        Self {
            client,
            description: format!("http: {}", url),
            url,
            user_agent: config.user_agent.clone(),
        }
    }

    /// The full URL being polled.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self) -> Result<MonitorSnapshot, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let snapshot = serde_json::from_slice(&body)?;
        Ok(snapshot)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
