use crate::types::{FetchConfig, ReportError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// One-shot HTTP fetcher for the plain-text casting feed. No retries, no
/// conditional headers, no caching: the report page is best-effort display.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Self {
        let redirect_policy = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(redirect_policy)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetch the feed document and return its body text.
    pub async fn fetch_report(&self, url: &str) -> Result<String> {
        debug!("Fetching casting feed: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::General(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response.text().await?;
        info!("Fetched casting feed: {} ({} bytes)", url, body.len());
        Ok(body)
    }
}
