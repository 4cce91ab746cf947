use crate::error::StorageError;
use crate::mapping::UrlMapping;
use crate::shortcode::ShortCode;
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of the durable mapping store.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the mapping stored under `code`.
    /// Returns `None` if the code does not exist.
    async fn find_by_short_code(&self, code: &ShortCode) -> Result<Option<UrlMapping>>;

    /// Retrieves the mapping created for `long_url`.
    /// Returns `None` if the URL has never been shortened.
    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>>;
}

/// The durable mapping store, source of truth for every short code.
#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new mapping. Returns `Err(Conflict)` if the code already exists.
    async fn insert(&self, mapping: &UrlMapping) -> Result<()>;
}
