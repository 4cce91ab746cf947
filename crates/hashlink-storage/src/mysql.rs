use async_trait::async_trait;
use hashlink_core::repository::Result;
use hashlink_core::{ReadRepository, Repository, ShortCode, StorageError, UrlMapping};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::{debug, trace};

const SCHEMA: &str = include_str!("../ddl/mysql/url_mappings.sql");

/// MySQL implementation of the repository contract.
///
/// One row per mapping in `url_mappings`. The unique key on `short_url`
/// backs the conflict check in [`Repository::insert`]; the auto-increment
/// `id` is the record identifier and is never exposed.
#[derive(Debug, Clone)]
pub struct MySqlRepository {
    pool: MySqlPool,
}

impl MySqlRepository {
    /// Creates a repository from an existing MySQL connection pool.
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Creates a repository by opening a new MySQL connection pool.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = MySqlPool::connect(database_url)
            .await
            .map_err(map_sqlx_error)?;
        Ok(Self::new(pool))
    }

    /// Creates the `url_mappings` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        debug!("url_mappings schema is in place");
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(err: sqlx::Error) -> StorageError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut => StorageError::Timeout(message),
        sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StorageError::Unavailable(message),
        sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::TypeNotFound { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::RowNotFound => StorageError::InvalidData(message),
        _ => StorageError::Query(message),
    }
}

fn row_to_mapping(row: MySqlRow) -> Result<UrlMapping> {
    let short_url: String = row.try_get("short_url").map_err(map_sqlx_error)?;
    let long_url: String = row.try_get("long_url").map_err(map_sqlx_error)?;
    Ok(UrlMapping::new(ShortCode::new_unchecked(short_url), long_url))
}

#[async_trait]
impl ReadRepository for MySqlRepository {
    async fn find_by_short_code(&self, code: &ShortCode) -> Result<Option<UrlMapping>> {
        trace!(code = %code, "Querying mapping by short code");

        let row = sqlx::query(
            r#"
            SELECT short_url, long_url
            FROM url_mappings
            WHERE short_url = ?
            LIMIT 1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(row_to_mapping).transpose()
    }

    async fn find_by_long_url(&self, long_url: &str) -> Result<Option<UrlMapping>> {
        trace!("Querying mapping by long URL");

        let row = sqlx::query(
            r#"
            SELECT short_url, long_url
            FROM url_mappings
            WHERE long_url = ?
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(long_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        row.map(row_to_mapping).transpose()
    }
}

#[async_trait]
impl Repository for MySqlRepository {
    async fn insert(&self, mapping: &UrlMapping) -> Result<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO url_mappings (short_url, long_url)
            VALUES (?, ?)
            "#,
        )
        .bind(mapping.short_code.as_str())
        .bind(mapping.long_url.as_str())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::Conflict(mapping.short_code.to_string()))
            }
            Err(err) => Err(map_sqlx_error(err)),
        }
    }
}
