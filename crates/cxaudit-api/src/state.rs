use crate::fetch::{HttpPageSpeedFetcher, HttpWebsiteFetcher};
use crate::pipeline::AuditPipeline;
use crate::rate_limit::{FixedWindowLimiter, RateLimiter};
use cxaudit_ai::{AnthropicConfig, AnthropicProvider, AuditSynthesizer};
use cxaudit_cache::{AuditStore, MemoryAuditStore, RocksAuditStore};
use cxaudit_core::{CxConfig, Result};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<AuditPipeline>,
    pub limiter: Arc<dyn RateLimiter>,
}

impl AppState {
    /// Wire up the production components: RocksDB store (or in-memory
    /// when no path is configured), Anthropic provider, live fetchers.
    pub fn new(config: &CxConfig) -> Result<Self> {
        let store: Arc<dyn AuditStore> = if config.cache.path.is_empty() {
            Arc::new(MemoryAuditStore::new())
        } else {
            Arc::new(RocksAuditStore::open(&config.cache.path)?)
        };

        let model = Arc::new(AnthropicProvider::new(AnthropicConfig::from_model_config(
            &config.model,
        ))?);
        let synthesizer = AuditSynthesizer::new(model);

        let pipeline = Arc::new(AuditPipeline::new(
            store,
            synthesizer,
            Arc::new(HttpWebsiteFetcher::new(&config.fetch)?),
            Arc::new(HttpPageSpeedFetcher::new(&config.fetch)?),
            config.cache.ttl_days,
        ));

        let limiter = Arc::new(FixedWindowLimiter::from_config(&config.rate_limit));
        Ok(Self { pipeline, limiter })
    }

    /// Assembly seam for tests and alternative deployments.
    pub fn from_parts(pipeline: Arc<AuditPipeline>, limiter: Arc<dyn RateLimiter>) -> Self {
        Self { pipeline, limiter }
    }
}
