use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use cxaudit_core::{Audit, Result};
use serde::{Deserialize, Serialize};

/// One cached audit, keyed by company id. At most one record exists per
/// id; a regeneration overwrites the prior record wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedAudit {
    pub company_id: String,
    #[serde(rename = "audit_data")]
    pub audit: Audit,
    pub created_at: DateTime<Utc>,
}

impl CachedAudit {
    pub fn new(audit: Audit) -> Self {
        Self {
            company_id: audit.id.clone(),
            created_at: audit.generated_at,
            audit,
        }
    }

    /// A record younger than the freshness window short-circuits the
    /// pipeline; anything older is regenerated.
    pub fn is_fresh(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.created_at < ttl
    }
}

/// Keyed read/upsert over the audit cache. Backed by RocksDB in the
/// server and by an in-memory map in tests.
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn get(&self, company_id: &str) -> Result<Option<CachedAudit>>;

    /// Insert-or-replace by company id.
    async fn put(&self, record: CachedAudit) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use cxaudit_core::{resolve, Tier};

    fn sample_audit(company_id: &str) -> Audit {
        let company = resolve(company_id).expect("allow-listed company").clone();
        Audit {
            id: company.id.clone(),
            company,
            overall_score: 62,
            tier: Tier::Adequate,
            categories: Vec::new(),
            recommendations: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn fresh_within_window() {
        let record = CachedAudit::new(sample_audit("geico"));
        let now = record.created_at + Duration::days(6);
        assert!(record.is_fresh(Duration::days(7), now));
    }

    #[test]
    fn stale_at_window_boundary() {
        let record = CachedAudit::new(sample_audit("geico"));
        let now = record.created_at + Duration::days(7);
        assert!(!record.is_fresh(Duration::days(7), now));
    }
}
