use crate::error::CacheError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, CacheError>;

/// The fast, possibly lossy side of the mapping store.
///
/// Entries are keyed by [`ShortCode`] and hold the long URL. Implementations
/// may evict or expire entries at any time; callers must not rely on a
/// previously written value still being present.
#[async_trait]
pub trait UrlCache: Send + Sync + 'static {
    /// Get the long URL cached for `code`.
    ///
    /// Returns `Ok(None)` on a miss. `Err` means the cache itself failed.
    async fn get_url(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Store `long_url` under `code`, replacing any previous value.
    async fn set_url(&self, code: &ShortCode, long_url: &str) -> Result<()>;
}
