use crate::error::{CxAuditError, Result};
use config as cfg;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub model: String,
    pub max_tokens: usize,
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: "claude-sonnet-4-5-20250929".into(),
            max_tokens: 4096,
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// RocksDB path for the audit store. Empty selects the in-memory store.
    pub path: String,
    /// Freshness window in days; older records are regenerated.
    pub ttl_days: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: "data/audits.db".into(),
            ttl_days: 7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window_secs: 3600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub user_agent: String,
    /// Homepage HTML is truncated to this many characters before it is
    /// handed to the model.
    pub html_char_budget: usize,
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "CXAuditScanner/1.0".into(),
            html_char_budget: 15_000,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CxConfig {
    pub server: ServerConfig,
    pub model: ModelConfig,
    pub cache: CacheConfig,
    pub rate_limit: RateLimitConfig,
    pub fetch: FetchConfig,
}

impl CxConfig {
    /// Load configuration from an optional TOML file (CXAUDIT_CONFIG)
    /// layered under CXAUDIT__-prefixed environment overrides, e.g.
    /// CXAUDIT__SERVER__PORT=8080.
    pub fn load() -> Result<Self> {
        let mut builder = cfg::Config::builder();
        if let Ok(path) = std::env::var("CXAUDIT_CONFIG") {
            builder = builder.add_source(cfg::File::with_name(&path));
        }
        builder
            .add_source(
                cfg::Environment::with_prefix("CXAUDIT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| CxAuditError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_prototype_constants() {
        let config = CxConfig::default();
        assert_eq!(config.cache.ttl_days, 7);
        assert_eq!(config.rate_limit.max_requests, 10);
        assert_eq!(config.rate_limit.window_secs, 3600);
        assert_eq!(config.fetch.html_char_budget, 15_000);
        assert_eq!(config.fetch.user_agent, "CXAuditScanner/1.0");
    }

    #[test]
    fn double_underscore_env_override_is_honored() {
        std::env::set_var("CXAUDIT__RATE_LIMIT__MAX_REQUESTS", "3");
        let config = CxConfig::load().unwrap();
        std::env::remove_var("CXAUDIT__RATE_LIMIT__MAX_REQUESTS");
        assert_eq!(config.rate_limit.max_requests, 3);
        assert_eq!(config.cache.ttl_days, 7);
    }
}
