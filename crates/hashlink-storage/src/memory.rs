use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use hashlink_core::repository::Result;
use hashlink_core::{ReadRepository, Repository, ShortCode, StorageError, UrlMapping};
use tracing::trace;

/// In-memory implementation of the Repository trait using DashMap.
///
/// Records are keyed by short code with a secondary index from long URL to
/// short code. Nothing survives a restart, so this backend is meant for
/// local runs and tests.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    by_code: DashMap<String, String>,
    by_long_url: DashMap<String, ShortCode>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            by_code: DashMap::with_capacity(capacity),
            by_long_url: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn find_by_short_code(&self, code: &ShortCode) -> Result<Option<UrlMapping>> {
        Ok(self
            .by_code
            .get(code.as_str())
            .map(|long_url| UrlMapping::new(code.clone(), long_url.value().clone())))
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>> {
        Ok(self
            .by_long_url
            .get(long_url)
            .map(|code| UrlMapping::new(code.value().clone(), long_url)))
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, mapping: &UrlMapping) -> Result<()> {
        // The entry guard holds the shard lock, so check-and-insert is atomic.
        match self.by_code.entry(mapping.short_code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(mapping.short_code.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(mapping.long_url.clone());
                self.by_long_url
                    .insert(mapping.long_url.clone(), mapping.short_code.clone());
                trace!(code = %mapping.short_code, "Inserted mapping in memory");
                Ok(())
            }
        }
    }
}
