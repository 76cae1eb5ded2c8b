use crate::fetch::{PageSpeedFetcher, WebsiteFetcher};
use chrono::{Duration, Utc};
use cxaudit_ai::AuditSynthesizer;
use cxaudit_cache::{AuditStore, CachedAudit, RegenerationGuard};
use cxaudit_core::{Audit, CompanyInfo, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// The fetch-enrich-synthesize-cache pass, one run per cache miss.
pub struct AuditPipeline {
    store: Arc<dyn AuditStore>,
    guard: RegenerationGuard,
    synthesizer: AuditSynthesizer,
    website: Arc<dyn WebsiteFetcher>,
    page_speed: Arc<dyn PageSpeedFetcher>,
    freshness: Duration,
}

impl AuditPipeline {
    pub fn new(
        store: Arc<dyn AuditStore>,
        synthesizer: AuditSynthesizer,
        website: Arc<dyn WebsiteFetcher>,
        page_speed: Arc<dyn PageSpeedFetcher>,
        ttl_days: u64,
    ) -> Self {
        Self {
            store,
            guard: RegenerationGuard::new(),
            synthesizer,
            website,
            page_speed,
            freshness: Duration::days(ttl_days as i64),
        }
    }

    /// Serve from cache when fresh, otherwise regenerate. Concurrent
    /// misses for one company coalesce behind a per-id lock; waiters
    /// re-check the store after the winner finishes.
    pub async fn generate(&self, company: &CompanyInfo) -> Result<Audit> {
        if let Some(record) = self.read_cache(&company.id).await {
            if record.is_fresh(self.freshness, Utc::now()) {
                info!(company = %company.id, "serving fresh cached audit");
                return Ok(record.audit);
            }
        }

        let lock = self.guard.lock_for(&company.id);
        let _regenerating = lock.lock().await;

        if let Some(record) = self.read_cache(&company.id).await {
            if record.is_fresh(self.freshness, Utc::now()) {
                info!(company = %company.id, "audit regenerated while waiting, reusing");
                return Ok(record.audit);
            }
        }

        let audit = self.run(company).await?;

        // A failed upsert is logged but does not fail the request; the
        // next request for this id regenerates.
        if let Err(e) = self.store.put(CachedAudit::new(audit.clone())).await {
            warn!(company = %company.id, error = %e, "audit cache write failed");
        }

        Ok(audit)
    }

    async fn run(&self, company: &CompanyInfo) -> Result<Audit> {
        info!(company = %company.id, website = %company.website, "running audit pipeline");

        // The two fetches are independent; the pipeline's single join point.
        let (html, page_speed) = tokio::join!(
            self.website.fetch_homepage(&company.website),
            self.page_speed.fetch_metrics(&company.website),
        );
        let html = html?;

        self.synthesizer
            .synthesize(company, &html, page_speed.as_ref())
            .await
    }

    /// A store read failure is a cache miss, not a request failure.
    async fn read_cache(&self, company_id: &str) -> Option<CachedAudit> {
        match self.store.get(company_id).await {
            Ok(record) => record,
            Err(e) => {
                warn!(company = %company_id, error = %e, "audit cache read failed, treating as miss");
                None
            }
        }
    }
}
