pub mod memory;
pub mod rocks;
pub mod singleflight;
pub mod store;

pub use memory::MemoryAuditStore;
pub use rocks::RocksAuditStore;
pub use singleflight::RegenerationGuard;
pub use store::{AuditStore, CachedAudit};

// Re-export common types for convenience
pub use cxaudit_core::{Audit, CxAuditError, Result};
