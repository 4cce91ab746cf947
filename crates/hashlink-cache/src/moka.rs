use async_trait::async_trait;
use hashlink_core::{CacheError, ShortCode, UrlCache};
use moka::future::Cache;
use std::time::Duration;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

/// Type alias for cache results.
pub type Result<T> = std::result::Result<T, CacheError>;

/// An in-memory cache implementation using Moka.
///
/// Stores long URLs in a concurrent, bounded in-process cache. Entries may
/// be evicted when the cache is full or expire when a TTL is configured,
/// which the coordinator tolerates: the durable store stays authoritative.
#[derive(Debug, Clone)]
pub struct MokaUrlCache {
    cache: Cache<String, String>,
}

const DEFAULT_MAX_CAPACITY: u64 = 10_000;

impl MokaUrlCache {
    /// Creates a new Moka URL cache with default settings.
    ///
    /// The cache will have a default maximum capacity of 10,000 entries.
    pub fn new() -> Self {
        Self::from(CacheConfig::default())
    }

    /// Creates a new Moka URL cache with a custom maximum capacity.
    pub fn with_capacity(max_capacity: u64) -> Self {
        Self::builder().max_capacity(max_capacity).build().into()
    }

    /// Returns a builder for creating a custom cache configuration.
    pub fn builder() -> CacheConfigBuilder {
        CacheConfig::builder()
    }
}

impl Default for MokaUrlCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlCache for MokaUrlCache {
    async fn get_url(&self, code: &ShortCode) -> Result<Option<String>> {
        trace!(code = %code, "Fetching long URL from Moka cache");

        match self.cache.get(code.as_str()).await {
            Some(long_url) => {
                debug!(code = %code, "Cache hit in Moka");
                Ok(Some(long_url))
            }
            None => {
                trace!(code = %code, "Cache miss in Moka");
                Ok(None)
            }
        }
    }

    async fn set_url(&self, code: &ShortCode, long_url: &str) -> Result<()> {
        trace!(code = %code, "Storing long URL in Moka cache");

        self.cache
            .insert(code.as_str().to_owned(), long_url.to_owned())
            .await;
        debug!(code = %code, "Cached long URL in Moka");
        Ok(())
    }
}

/// Configuration for creating a MokaUrlCache with custom settings.
#[derive(Debug, Clone, TypedBuilder)]
pub struct CacheConfig {
    /// Maximum number of entries the cache can hold.
    #[builder(default = DEFAULT_MAX_CAPACITY)]
    max_capacity: u64,
    /// Time-to-live for cache entries. `None` keeps entries until evicted.
    #[builder(default)]
    ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl From<CacheConfig> for MokaUrlCache {
    fn from(config: CacheConfig) -> Self {
        let mut builder = Cache::builder().max_capacity(config.max_capacity);

        if let Some(ttl) = config.ttl {
            builder = builder.time_to_live(ttl);
        }

        MokaUrlCache {
            cache: builder.build(),
        }
    }
}
