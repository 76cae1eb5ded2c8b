use crate::fetch::website::homepage_url;
use async_trait::async_trait;
use cxaudit_core::{CxAuditError, FetchConfig, PageSpeedResult, Result};
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

const PAGESPEED_ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";

/// Calls the public page-performance API. Total failure degrades to an
/// absent result; the synthesizer flags missing data instead of
/// fabricating it.
#[async_trait]
pub trait PageSpeedFetcher: Send + Sync {
    async fn fetch_metrics(&self, website: &str) -> Option<PageSpeedResult>;
}

pub struct HttpPageSpeedFetcher {
    client: Client,
}

impl HttpPageSpeedFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CxAuditError::Config(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn try_fetch(&self, website: &str) -> Option<PageSpeedResult> {
        let url = request_url(website);
        debug!(%url, "fetching PageSpeed metrics");
        let response = self.client.get(url).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }
        let data: PageSpeedResponse = response.json().await.ok()?;
        Some(extract(data))
    }
}

#[async_trait]
impl PageSpeedFetcher for HttpPageSpeedFetcher {
    async fn fetch_metrics(&self, website: &str) -> Option<PageSpeedResult> {
        let result = self.try_fetch(website).await;
        if result.is_none() {
            warn!(website, "PageSpeed data unavailable, continuing without it");
        }
        result
    }
}

fn request_url(website: &str) -> Url {
    let mut url = Url::parse(PAGESPEED_ENDPOINT).expect("static endpoint parses");
    url.query_pairs_mut()
        .append_pair("url", &homepage_url(website))
        .append_pair("category", "PERFORMANCE")
        .append_pair("category", "ACCESSIBILITY")
        .append_pair("strategy", "MOBILE");
    url
}

/// Mirror of the original extraction: absent fields default to zero,
/// mobile usability is a performance fraction above 0.5.
fn extract(data: PageSpeedResponse) -> PageSpeedResult {
    let lighthouse = data.lighthouse_result.unwrap_or_default();
    let categories = lighthouse.categories.unwrap_or_default();
    let audits = lighthouse.audits.unwrap_or_default();

    let perf_fraction = categories
        .performance
        .and_then(|c| c.score)
        .unwrap_or(0.0);
    let a11y_fraction = categories
        .accessibility
        .and_then(|c| c.score)
        .unwrap_or(0.0);
    let numeric = |key: &str| -> f64 {
        audits
            .get(key)
            .and_then(|a| a.numeric_value)
            .unwrap_or(0.0)
    };

    PageSpeedResult {
        performance_score: (perf_fraction * 100.0).round() as u8,
        accessibility_score: (a11y_fraction * 100.0).round() as u8,
        lcp: numeric("largest-contentful-paint"),
        cls: numeric("cumulative-layout-shift"),
        fid: numeric("max-potential-fid"),
        mobile_usability: perf_fraction > 0.5,
    }
}

// PageSpeed API wire types (the subset we read)

#[derive(Debug, Default, Deserialize)]
struct PageSpeedResponse {
    #[serde(rename = "lighthouseResult")]
    lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Default, Deserialize)]
struct LighthouseResult {
    categories: Option<Categories>,
    audits: Option<HashMap<String, AuditMetric>>,
}

#[derive(Debug, Default, Deserialize)]
struct Categories {
    performance: Option<CategoryScore>,
    accessibility: Option<CategoryScore>,
}

#[derive(Debug, Default, Deserialize)]
struct CategoryScore {
    score: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct AuditMetric {
    #[serde(rename = "numericValue")]
    numeric_value: Option<f64>,
}
