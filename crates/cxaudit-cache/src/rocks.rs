use crate::store::{AuditStore, CachedAudit};
use async_trait::async_trait;
use cxaudit_core::{CxAuditError, Result};
use rocksdb::{Options, DB};
use std::path::Path;
use std::sync::Arc;
use tokio::task;
use tracing::debug;

/// RocksDB-backed audit store. Values are the JSON-serialized
/// `CachedAudit`, keyed by company id.
#[derive(Clone)]
pub struct RocksAuditStore {
    db: Arc<DB>,
}

impl RocksAuditStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path.as_ref())
            .map_err(|e| CxAuditError::Storage(format!("failed to open audit store: {}", e)))?;
        debug!(path = %path.as_ref().display(), "opened audit store");
        Ok(Self { db: Arc::new(db) })
    }
}

#[async_trait]
impl AuditStore for RocksAuditStore {
    async fn get(&self, company_id: &str) -> Result<Option<CachedAudit>> {
        let db = Arc::clone(&self.db);
        let key = company_id.to_string();
        let bytes = task::spawn_blocking(move || db.get(key.as_bytes()))
            .await
            .map_err(|e| CxAuditError::Storage(format!("store task failed: {}", e)))?
            .map_err(|e| CxAuditError::Storage(format!("read failed: {}", e)))?;

        match bytes {
            Some(bytes) => {
                let record = serde_json::from_slice(&bytes).map_err(|e| {
                    CxAuditError::Storage(format!("corrupt cache record: {}", e))
                })?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, record: CachedAudit) -> Result<()> {
        let db = Arc::clone(&self.db);
        let key = record.company_id.clone();
        let value = serde_json::to_vec(&record)?;
        task::spawn_blocking(move || db.put(key.as_bytes(), value))
            .await
            .map_err(|e| CxAuditError::Storage(format!("store task failed: {}", e)))?
            .map_err(|e| CxAuditError::Storage(format!("write failed: {}", e)))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cxaudit_core::{resolve, Audit, Tier};

    fn sample_audit(company_id: &str, overall: u8) -> Audit {
        let company = resolve(company_id).expect("allow-listed company").clone();
        Audit {
            id: company.id.clone(),
            company,
            overall_score: overall,
            tier: Tier::from_score(overall),
            categories: Vec::new(),
            recommendations: Vec::new(),
            generated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn round_trips_through_rocksdb() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = RocksAuditStore::open(dir.path().join("audits.db")).unwrap();

        assert!(store.get("progressive").await.unwrap().is_none());

        store
            .put(CachedAudit::new(sample_audit("progressive", 58)))
            .await
            .unwrap();
        let record = store.get("progressive").await.unwrap().expect("record");
        assert_eq!(record.company_id, "progressive");
        assert_eq!(record.audit.tier, Tier::Adequate);
    }

    #[tokio::test]
    async fn upsert_replaces_prior_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = RocksAuditStore::open(dir.path().join("audits.db")).unwrap();

        store
            .put(CachedAudit::new(sample_audit("allstate", 45)))
            .await
            .unwrap();
        store
            .put(CachedAudit::new(sample_audit("allstate", 77)))
            .await
            .unwrap();

        let record = store.get("allstate").await.unwrap().unwrap();
        assert_eq!(record.audit.overall_score, 77);
    }
}
