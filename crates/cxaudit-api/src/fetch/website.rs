use async_trait::async_trait;
use cxaudit_core::{CxAuditError, FetchConfig, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Retrieves homepage markup for an allow-listed hostname. Failure is
/// fatal for the pipeline; there is no retry.
#[async_trait]
pub trait WebsiteFetcher: Send + Sync {
    /// Response body truncated to the configured character budget.
    async fn fetch_homepage(&self, website: &str) -> Result<String>;
}

pub struct HttpWebsiteFetcher {
    client: Client,
    char_budget: usize,
}

impl HttpWebsiteFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CxAuditError::Config(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            char_budget: config.html_char_budget,
        })
    }
}

#[async_trait]
impl WebsiteFetcher for HttpWebsiteFetcher {
    async fn fetch_homepage(&self, website: &str) -> Result<String> {
        let url = homepage_url(website);
        debug!(%url, "fetching homepage");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| CxAuditError::Fetch(format!("homepage fetch failed for {}: {}", url, e)))?;
        let body = response
            .text()
            .await
            .map_err(|e| CxAuditError::Fetch(format!("homepage body read failed: {}", e)))?;
        Ok(truncate_chars(&body, self.char_budget).to_string())
    }
}

/// Hostnames come from the allow-list as bare hosts; a full URL is
/// passed through untouched.
pub fn homepage_url(website: &str) -> String {
    if website.starts_with("http") {
        website.to_string()
    } else {
        format!("https://www.{}", website)
    }
}

/// Character-budget truncation that never splits a UTF-8 code point.
pub fn truncate_chars(s: &str, budget: usize) -> &str {
    match s.char_indices().nth(budget) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hostname_gets_www_prefix() {
        assert_eq!(homepage_url("geico.com"), "https://www.geico.com");
        assert_eq!(homepage_url("https://chase.com"), "https://chase.com");
    }

    #[test]
    fn truncation_respects_char_budget() {
        let body = "a".repeat(20_000);
        assert_eq!(truncate_chars(&body, 15_000).len(), 15_000);
        assert_eq!(truncate_chars("short", 15_000), "short");
    }

    #[test]
    fn truncation_is_char_boundary_safe() {
        let body = "é".repeat(10);
        let truncated = truncate_chars(&body, 5);
        assert_eq!(truncated.chars().count(), 5);
    }
}
