use async_trait::async_trait;
use hashlink_cache::MokaUrlCache;
use hashlink_coordinator::{Coordinator, MappingCoordinator};
use hashlink_core::{ShortCode, UrlCache};
use hashlink_storage::InMemoryRepository;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Records the highest number of cache calls observed in flight at once.
#[derive(Default)]
struct GaugeCache {
    inner: MokaUrlCache,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl GaugeCache {
    async fn observe<T>(&self, fut: impl std::future::Future<Output = T>) -> T {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(2)).await;
        let out = fut.await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        out
    }
}

#[async_trait]
impl UrlCache for GaugeCache {
    async fn get_url(&self, code: &ShortCode) -> hashlink_core::cache::Result<Option<String>> {
        self.observe(self.inner.get_url(code)).await
    }

    async fn set_url(&self, code: &ShortCode, long_url: &str) -> hashlink_core::cache::Result<()> {
        self.observe(self.inner.set_url(code, long_url)).await
    }
}

/// A cache whose writes are slow, counting calls in flight even when the
/// calling task is cancelled mid-write.
struct SlowWriteCache {
    inner: MokaUrlCache,
    write_delay: Duration,
    in_flight: Arc<AtomicUsize>,
    peak: AtomicUsize,
}

impl SlowWriteCache {
    fn new(write_delay: Duration) -> Self {
        Self {
            inner: MokaUrlCache::new(),
            write_delay,
            in_flight: Arc::new(AtomicUsize::new(0)),
            peak: AtomicUsize::new(0),
        }
    }

    fn enter(&self) -> InFlight {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        InFlight(Arc::clone(&self.in_flight))
    }
}

struct InFlight(Arc<AtomicUsize>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UrlCache for SlowWriteCache {
    async fn get_url(&self, code: &ShortCode) -> hashlink_core::cache::Result<Option<String>> {
        let _in_flight = self.enter();
        self.inner.get_url(code).await
    }

    async fn set_url(&self, code: &ShortCode, long_url: &str) -> hashlink_core::cache::Result<()> {
        let _in_flight = self.enter();
        tokio::time::sleep(self.write_delay).await;
        self.inner.set_url(code, long_url).await
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_for_same_url_store_one_record() {
    let coordinator = Arc::new(Coordinator::new(
        MokaUrlCache::new(),
        InMemoryRepository::new(),
    ));

    let mut handles = vec![];
    for _ in 0..32 {
        let coordinator = Arc::clone(&coordinator);
        handles.push(tokio::spawn(async move {
            coordinator.resolve_or_create("https://example.com").await
        }));
    }

    let mut codes = vec![];
    for handle in handles {
        codes.push(handle.await.unwrap().unwrap());
    }

    assert!(codes.iter().all(|c| c.as_str() == "100680ad54"));
    assert_eq!(coordinator.repository().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_for_distinct_urls_all_succeed() {
    let coordinator = Arc::new(Coordinator::new(
        MokaUrlCache::new(),
        InMemoryRepository::new(),
    ));

    let mut handles = vec![];
    for i in 0..20 {
        let coordinator = Arc::clone(&coordinator);
        handles.push(tokio::spawn(async move {
            let url = format!("https://example.com/{i}");
            let code = coordinator.resolve_or_create(&url).await.unwrap();
            (url, code)
        }));
    }

    for handle in handles {
        let (url, code) = handle.await.unwrap();
        let resolved = coordinator.lookup(&code).await.unwrap();
        assert_eq!(resolved.as_deref(), Some(url.as_str()));
    }
    assert_eq!(coordinator.repository().len(), 20);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn critical_sections_never_overlap() {
    let coordinator = Arc::new(Coordinator::new(
        GaugeCache::default(),
        InMemoryRepository::new(),
    ));

    let mut handles = vec![];
    for i in 0..16 {
        let coordinator = Arc::clone(&coordinator);
        handles.push(tokio::spawn(async move {
            let url = format!("https://example.com/{}", i % 4);
            let code = coordinator.resolve_or_create(&url).await.unwrap();
            coordinator.lookup(&code).await.unwrap()
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap().is_some());
    }

    assert_eq!(coordinator.cache().peak.load(Ordering::SeqCst), 1);
    assert_eq!(coordinator.repository().len(), 4);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn lookups_racing_a_create_see_nothing_or_the_full_mapping() {
    let coordinator = Arc::new(Coordinator::new(
        MokaUrlCache::new(),
        InMemoryRepository::new(),
    ));
    let code = ShortCode::new_unchecked("100680ad54");

    let mut lookups = vec![];
    for _ in 0..16 {
        let coordinator = Arc::clone(&coordinator);
        let code = code.clone();
        lookups.push(tokio::spawn(async move { coordinator.lookup(&code).await }));
    }
    let created = coordinator
        .resolve_or_create("https://example.com")
        .await
        .unwrap();
    assert_eq!(created, code);

    for lookup in lookups {
        match lookup.await.unwrap().unwrap() {
            None => {}
            Some(url) => assert_eq!(url, "https://example.com"),
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn cancelled_create_leaves_no_store_work_behind() {
    let coordinator = Coordinator::new(
        SlowWriteCache::new(Duration::from_millis(200)),
        InMemoryRepository::new(),
    );
    let code = ShortCode::new_unchecked("100680ad54");

    let cancelled = tokio::time::timeout(
        Duration::from_millis(20),
        coordinator.resolve_or_create("https://example.com"),
    )
    .await;
    assert!(cancelled.is_err());

    assert_eq!(coordinator.lookup(&code).await.unwrap(), None);
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(coordinator.lookup(&code).await.unwrap(), None);

    assert_eq!(coordinator.cache().peak.load(Ordering::SeqCst), 1);
    assert_eq!(coordinator.cache().in_flight.load(Ordering::SeqCst), 0);
    assert!(coordinator.repository().is_empty());
}
