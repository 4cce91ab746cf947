use async_trait::async_trait;
use hashlink_core::{CacheError, ShortCode, UrlCache};
use redis::AsyncCommands;
use tracing::{debug, trace, warn};

/// Type alias for cache results.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Default namespace for cache keys.
pub const DEFAULT_KEY_PREFIX: &str = "hl:url:";

/// A Redis-based implementation of [`UrlCache`].
///
/// The long URL is stored as a plain string value under
/// `<key_prefix><short code>`. No expiry is set; eviction is left to the
/// server's `maxmemory` policy.
#[derive(Clone)]
pub struct RedisUrlCache {
    conn: redis::aio::ConnectionManager,
    key_prefix: String,
}

impl std::fmt::Debug for RedisUrlCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisUrlCache")
            .field("key_prefix", &self.key_prefix)
            .finish_non_exhaustive()
    }
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> CacheError {
    let message = format!("{operation}: {err}");
    if message.to_ascii_lowercase().contains("timed out") {
        CacheError::Timeout(message)
    } else if err.is_io_error() {
        CacheError::Unavailable(message)
    } else {
        CacheError::Operation(message)
    }
}

impl RedisUrlCache {
    /// Creates a new Redis URL cache over an established connection.
    pub fn new(conn: redis::aio::ConnectionManager) -> Self {
        Self::with_prefix(conn, DEFAULT_KEY_PREFIX)
    }

    /// Creates a new Redis URL cache with a custom key prefix.
    ///
    /// # Arguments
    ///
    /// * `conn` - A managed Redis connection
    /// * `key_prefix` - Custom prefix for cache keys (e.g., "myapp:url:")
    pub fn with_prefix(conn: redis::aio::ConnectionManager, key_prefix: impl Into<String>) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    /// Opens a managed connection to `redis_url` and wraps it.
    pub async fn connect(redis_url: &str) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| CacheError::Initialization(format!("invalid redis url: {e}")))?;
        let conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(|e| map_redis_error("failed to connect to Redis", e))?;
        Ok(Self::new(conn))
    }

    /// Generates the cache key for a short code.
    fn cache_key(&self, code: &ShortCode) -> String {
        format!("{}{}", self.key_prefix, code.as_str())
    }
}

#[async_trait]
impl UrlCache for RedisUrlCache {
    async fn get_url(&self, code: &ShortCode) -> Result<Option<String>> {
        let key = self.cache_key(code);
        trace!(code = %code, "Fetching long URL from Redis cache");

        let mut conn = self.conn.clone();
        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(long_url)) => {
                debug!(code = %code, "Cache hit in Redis");
                Ok(Some(long_url))
            }
            Ok(None) => {
                trace!(code = %code, "Cache miss in Redis");
                Ok(None)
            }
            Err(e) => {
                warn!(code = %code, error = %e, "Redis error on get");
                Err(map_redis_error("failed to fetch value from Redis", e))
            }
        }
    }

    async fn set_url(&self, code: &ShortCode, long_url: &str) -> Result<()> {
        let key = self.cache_key(code);
        trace!(code = %code, "Storing long URL in Redis cache");

        let mut conn = self.conn.clone();
        match conn.set::<_, _, ()>(&key, long_url).await {
            Ok(()) => {
                debug!(code = %code, "Cached long URL in Redis");
                Ok(())
            }
            Err(e) => {
                warn!(code = %code, error = %e, "Failed to cache long URL in Redis");
                Err(map_redis_error("failed to write value to Redis", e))
            }
        }
    }
}
