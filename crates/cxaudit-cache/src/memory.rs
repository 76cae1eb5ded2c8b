use crate::store::{AuditStore, CachedAudit};
use async_trait::async_trait;
use cxaudit_core::Result;
use dashmap::DashMap;

/// In-memory audit store. Volatile; used for tests and for running the
/// server without a RocksDB path.
#[derive(Default)]
pub struct MemoryAuditStore {
    records: DashMap<String, CachedAudit>,
}

impl MemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl AuditStore for MemoryAuditStore {
    async fn get(&self, company_id: &str) -> Result<Option<CachedAudit>> {
        Ok(self.records.get(company_id).map(|r| r.clone()))
    }

    async fn put(&self, record: CachedAudit) -> Result<()> {
        self.records.insert(record.company_id.clone(), record);
        Ok(())
    }
}
