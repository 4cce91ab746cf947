use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use hashlink_cache::{MokaUrlCache, RedisUrlCache, UrlCache};
use hashlink_coordinator::{Coordinator, CoordinatorConfig, MappingCoordinator};
use hashlink_gateway::cli::{CacheBackendArg, Cli, StorageBackendArg};
use hashlink_gateway::{telemetry, App, AppState};
use hashlink_storage::{InMemoryRepository, MySqlRepository};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.log_format)?;

    info!(
        listen_addr = %cli.listen_addr,
        cache_backend = %cli.cache,
        cache_ttl_secs = ?cli.cache_ttl,
        storage_backend = %cli.storage,
        backfill_cache = cli.backfill_cache,
        "starting hashlink gateway"
    );

    let coordinator = build_coordinator(&cli).await?;
    let app = App::router(AppState::new(coordinator));

    let listener = tokio::net::TcpListener::bind(cli.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cli.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "gateway listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

async fn build_coordinator(cli: &Cli) -> anyhow::Result<Arc<dyn MappingCoordinator>> {
    match cli.cache {
        CacheBackendArg::Moka => {
            let cache: MokaUrlCache = MokaUrlCache::builder()
                .max_capacity(cli.cache_capacity)
                .ttl(cli.cache_ttl.map(Duration::from_secs))
                .build()
                .into();
            with_storage(cli, cache).await
        }
        CacheBackendArg::Redis => {
            let redis_url = cli
                .redis_url
                .as_deref()
                .context("redis url is required when cache backend is redis")?;
            let cache = RedisUrlCache::connect(redis_url)
                .await
                .context("failed to connect to redis")?;
            with_storage(cli, cache).await
        }
    }
}

async fn with_storage<C: UrlCache>(
    cli: &Cli,
    cache: C,
) -> anyhow::Result<Arc<dyn MappingCoordinator>> {
    let config = CoordinatorConfig::builder()
        .backfill_cache(cli.backfill_cache)
        .build();

    match cli.storage {
        StorageBackendArg::InMemory => {
            let coordinator =
                Coordinator::new(cache, InMemoryRepository::new()).with_config(config);
            Ok(Arc::new(coordinator))
        }
        StorageBackendArg::Mysql => {
            let mysql_dsn = cli
                .mysql_dsn
                .as_deref()
                .context("mysql dsn is required when storage backend is mysql")?;
            let repository = MySqlRepository::connect(mysql_dsn)
                .await
                .context("failed to connect to mysql")?;
            repository
                .ensure_schema()
                .await
                .context("failed to create url_mappings schema")?;
            Ok(Arc::new(Coordinator::new(cache, repository).with_config(config)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
