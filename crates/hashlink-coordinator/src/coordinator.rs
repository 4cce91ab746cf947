use crate::config::CoordinatorConfig;
use crate::error::{CoordinatorError, Result};
use async_trait::async_trait;
use hashlink_core::{Repository, ShortCode, UrlCache, UrlMapping};
use hashlink_generator::{CodeGenerator, Sha256Generator};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, error, info, trace, warn};

/// Entry points the request layer calls into.
#[async_trait]
pub trait MappingCoordinator: Send + Sync + 'static {
    /// Returns the short code for `long_url`, creating the mapping on first use.
    ///
    /// Repeated calls with the same URL return the same code and never store
    /// a second durable record.
    async fn resolve_or_create(&self, long_url: &str) -> Result<ShortCode>;

    /// Resolves `code` to its long URL.
    /// Returns `None` if neither store knows the code.
    async fn lookup(&self, code: &ShortCode) -> Result<Option<String>>;
}

/// Coordinates a [`UrlCache`] and a durable [`Repository`].
///
/// One instance is meant to be shared by the whole process. Both
/// operations take the same lock for their full duration, which totally
/// orders them: a create can never race another create for the same URL,
/// and a lookup never observes a half-written mapping. Unrelated requests
/// are serialized too.
///
/// Each store round-trip is fanned out as two spawned tasks, one per store,
/// and both outcomes are collected before any decision is made. The tasks
/// share the caller's hold on the lock and are aborted if the caller is
/// dropped, so a cancelled call never leaks store work into the next
/// critical section.
pub struct Coordinator<C, R, G = Sha256Generator> {
    cache: Arc<C>,
    repository: Arc<R>,
    generator: G,
    config: CoordinatorConfig,
    lock: Arc<Mutex<()>>,
}

impl<C: UrlCache, R: Repository> Coordinator<C, R, Sha256Generator> {
    /// Creates a coordinator that derives codes with [`Sha256Generator`].
    pub fn new(cache: C, repository: R) -> Self {
        Self::with_generator(cache, repository, Sha256Generator::new())
    }
}

impl<C: UrlCache, R: Repository, G: CodeGenerator> Coordinator<C, R, G> {
    /// Creates a coordinator with a custom code generator.
    pub fn with_generator(cache: C, repository: R, generator: G) -> Self {
        Self {
            cache: Arc::new(cache),
            repository: Arc::new(repository),
            generator,
            config: CoordinatorConfig::default(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: CoordinatorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Returns a reference to the cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Returns a reference to the durable repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Puts the durable value back into the cache after the create path
    /// overwrote it with a colliding URL.
    ///
    /// Tried twice. Lookups trust cache hits, so a restore that still fails
    /// is returned to the caller instead of being swallowed.
    async fn restore_cache(&self, existing: &UrlMapping) -> Result<()> {
        let code = &existing.short_code;
        let Err(first) = self.cache.set_url(code, &existing.long_url).await else {
            return Ok(());
        };
        warn!(code = %code, error = %first, "Failed to restore cache entry, retrying");

        self.cache
            .set_url(code, &existing.long_url)
            .await
            .map_err(|e| {
                error!(
                    code = %code,
                    error = %e,
                    "Cache entry still holds a colliding URL"
                );
                CoordinatorError::Cache(e)
            })
    }

    async fn backfill(&self, mapping: &UrlMapping) {
        match self
            .cache
            .set_url(&mapping.short_code, &mapping.long_url)
            .await
        {
            Ok(()) => debug!(code = %mapping.short_code, "Backfilled cache from durable store"),
            Err(e) => warn!(
                code = %mapping.short_code,
                error = %e,
                "Failed to backfill cache, serving durable value anyway"
            ),
        }
    }

    /// Enters the critical section.
    ///
    /// The lock is released once the caller and every store task spawned
    /// under it have dropped their share of the guard.
    async fn enter(&self) -> Section {
        Arc::new(Arc::clone(&self.lock).lock_owned().await)
    }
}

type Section = Arc<OwnedMutexGuard<()>>;

/// A spawned store call that is aborted when dropped.
///
/// The task owns a share of the critical section until it finishes or is
/// cancelled.
struct StoreTask<T> {
    handle: JoinHandle<T>,
}

impl<T: Send + 'static> StoreTask<T> {
    fn spawn<F>(section: &Section, fut: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let handle = tokio::spawn(Scoped {
            fut: Box::pin(fut),
            _section: Arc::clone(section),
        });
        Self { handle }
    }
}

/// Holds a share of the critical section for as long as `fut` is alive.
///
/// Fields drop in declaration order, so the store call is torn down before
/// the section is released.
struct Scoped<F> {
    fut: Pin<Box<F>>,
    _section: Section,
}

impl<F: Future> Future for Scoped<F> {
    type Output = F::Output;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.fut.as_mut().poll(cx)
    }
}

impl<T> Future for StoreTask<T> {
    type Output = std::result::Result<T, JoinError>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.get_mut().handle).poll(cx)
    }
}

impl<T> Drop for StoreTask<T> {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Runs both futures as independent tasks and waits for both to finish.
async fn join_both<A, B>(section: &Section, first: A, second: B) -> Result<(A::Output, B::Output)>
where
    A: Future + Send + 'static,
    A::Output: Send + 'static,
    B: Future + Send + 'static,
    B::Output: Send + 'static,
{
    let (first, second) = tokio::join!(
        StoreTask::spawn(section, first),
        StoreTask::spawn(section, second)
    );
    Ok((first?, second?))
}

#[async_trait]
impl<C: UrlCache, R: Repository, G: CodeGenerator> MappingCoordinator for Coordinator<C, R, G> {
    async fn resolve_or_create(&self, long_url: &str) -> Result<ShortCode> {
        let section = self.enter().await;

        let code = self.generator.generate(long_url);
        trace!(code = %code, "Resolving long URL");

        let cache_write = {
            let cache = Arc::clone(&self.cache);
            let code = code.clone();
            let long_url = long_url.to_owned();
            async move { cache.set_url(&code, &long_url).await }
        };
        let durable_check = {
            let repository = Arc::clone(&self.repository);
            let code = code.clone();
            async move { repository.find_by_short_code(&code).await }
        };
        let (cached, durable) = join_both(&section, cache_write, durable_check).await?;

        if let Err(e) = cached {
            warn!(code = %code, error = %e, "Cache write failed, aborting create");
            return Err(e.into());
        }

        let existing = durable.unwrap_or_else(|e| {
            warn!(
                code = %code,
                error = %e,
                "Durable existence check failed, assuming no existing mapping"
            );
            None
        });

        if let Some(existing) = existing {
            if existing.long_url == long_url {
                debug!(code = %code, "Mapping already exists");
                return Ok(existing.short_code);
            }

            warn!(code = %code, "Short code collision between distinct long URLs");
            self.restore_cache(&existing).await?;
            return Err(CoordinatorError::Collision {
                code,
                existing: existing.long_url,
                requested: long_url.to_owned(),
            });
        }

        self.repository
            .insert(&UrlMapping::new(code.clone(), long_url))
            .await?;
        info!(code = %code, "Created mapping");

        Ok(code)
    }

    async fn lookup(&self, code: &ShortCode) -> Result<Option<String>> {
        let section = self.enter().await;
        trace!(code = %code, "Looking up short code");

        let cache_read = {
            let cache = Arc::clone(&self.cache);
            let code = code.clone();
            async move { cache.get_url(&code).await }
        };
        let durable_read = {
            let repository = Arc::clone(&self.repository);
            let code = code.clone();
            async move { repository.find_by_short_code(&code).await }
        };
        let (cached, durable) = join_both(&section, cache_read, durable_read).await?;

        match cached {
            Ok(Some(long_url)) => {
                if let Err(e) = durable {
                    warn!(code = %code, error = %e, "Durable read failed on cache hit");
                }
                debug!(code = %code, "Resolved from cache");
                return Ok(Some(long_url));
            }
            Ok(None) => trace!(code = %code, "Cache miss"),
            Err(e) => {
                warn!(code = %code, error = %e, "Cache read failed");
                return Err(e.into());
            }
        }

        match durable? {
            Some(mapping) => {
                debug!(code = %code, "Resolved from durable store");
                if self.config.backfill_cache {
                    self.backfill(&mapping).await;
                }
                Ok(Some(mapping.long_url))
            }
            None => {
                trace!(code = %code, "Short code not found");
                Ok(None)
            }
        }
    }
}
