// ── Query cache ──
//
// Process-wide, key-addressed cache of server resources. Each entry is a
// small state machine (idle → loading → success | error) with subscriber
// counting, fetch deduplication, and stale-while-revalidate refetches.
// Mutations never write into the cache directly; they invalidate keys and
// let the registered fetchers repopulate.

mod entry;
mod handle;

use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use futures_util::FutureExt;
use tracing::debug;

use self::entry::{Entry, ErasedData, ErasedFetcher};
use crate::error::CoreError;
use crate::key::ResourceKey;

pub use self::entry::FetchStatus;
pub use self::handle::{Resource, ResourceHandle, ResourceStream};

/// Key-addressed cache of fetchable server resources.
///
/// Cheaply cloneable; clones share one entry map. Construct one per
/// process (or per test) and pass it to everything that reads or mutates
/// server state -- it is an injectable store, not a global.
///
/// Entries are created lazily on first subscription and never destroyed
/// (no TTL); [`reset`](Self::reset) exists for tests and reconnects.
/// Fetches run on spawned tasks, so all methods that may trigger one must
/// be called from within a tokio runtime.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<CacheShared>,
}

struct CacheShared {
    entries: DashMap<ResourceKey, Arc<Entry>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CacheShared {
                entries: DashMap::new(),
            }),
        }
    }

    /// Subscribe to `key`, registering `fetcher` as its loader.
    ///
    /// The entry is created lazily; a fetch starts only when the entry has
    /// never loaded or has been invalidated. Concurrent subscriptions to
    /// the same key share a single network call. The returned handle serves
    /// the last-known data immediately, even while a refetch is in flight.
    pub fn resource<T, F, Fut>(&self, key: ResourceKey, fetcher: F) -> ResourceHandle<T>
    where
        T: Send + Sync + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T, CoreError>> + Send + 'static,
    {
        let entry = self.entry(key);

        let erased: ErasedFetcher = Arc::new(move || {
            let fut = fetcher();
            async move { fut.await.map(|value| Arc::new(value) as ErasedData) }.boxed()
        });
        entry.set_fetcher(erased);

        if entry.add_subscriber() {
            entry.start_fetch();
        }
        ResourceHandle::new(entry)
    }

    /// Mark exactly `key` stale. If the entry has live subscribers and no
    /// fetch in flight, a refetch is scheduled before this call returns;
    /// otherwise the refetch is deferred until the next subscription.
    pub fn invalidate(&self, key: &ResourceKey) {
        let entry = self.inner.entries.get(key).map(|e| Arc::clone(e.value()));
        if let Some(entry) = entry {
            Self::invalidate_entry(&entry);
        }
    }

    /// Invalidate every entry whose key starts with `prefix`. Invalidating
    /// `/api/batches` reaches `/api/batches/5` but not `/api/students`.
    pub fn invalidate_prefix(&self, prefix: &ResourceKey) {
        let matching: Vec<Arc<Entry>> = self
            .inner
            .entries
            .iter()
            .filter(|e| e.key().starts_with(prefix))
            .map(|e| Arc::clone(e.value()))
            .collect();

        debug!(prefix = %prefix, entries = matching.len(), "invalidating");
        for entry in matching {
            Self::invalidate_entry(&entry);
        }
    }

    fn invalidate_entry(entry: &Arc<Entry>) {
        if entry.mark_stale() {
            entry.start_fetch();
        }
    }

    /// Drop every entry, cancelling in-flight fetches. Existing handles
    /// keep their last snapshot but are detached from future
    /// invalidations.
    pub fn reset(&self) {
        for item in self.inner.entries.iter() {
            item.value().abort();
        }
        self.inner.entries.clear();
    }

    /// Number of entries ever materialized.
    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }

    fn entry(&self, key: ResourceKey) -> Arc<Entry> {
        self.inner
            .entries
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Entry::new(key)))
            .clone()
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tokio::sync::Semaphore;

    use super::*;
    use crate::key::keys;
    use crate::model::RecordId;

    /// Fetcher over a mutable source value, counting calls, optionally
    /// gated on a semaphore so tests can hold a fetch open.
    fn counted_fetcher(
        source: Arc<std::sync::Mutex<i64>>,
        calls: Arc<AtomicUsize>,
        gate: Arc<Semaphore>,
    ) -> impl Fn() -> futures_util::future::BoxFuture<'static, Result<i64, CoreError>>
    + Send
    + Sync
    + 'static {
        move || {
            let source = Arc::clone(&source);
            let calls = Arc::clone(&calls);
            let gate = Arc::clone(&gate);
            Box::pin(async move {
                calls.fetch_add(1, Ordering::SeqCst);
                let permit = gate
                    .acquire()
                    .await
                    .map_err(|_| CoreError::Internal("gate closed".into()))?;
                permit.forget();
                Ok(*source.lock().unwrap())
            })
        }
    }

    struct Fixture {
        cache: QueryCache,
        source: Arc<std::sync::Mutex<i64>>,
        calls: Arc<AtomicUsize>,
        gate: Arc<Semaphore>,
    }

    impl Fixture {
        /// `permits` controls how many fetches may complete immediately.
        fn new(permits: usize) -> Self {
            Self {
                cache: QueryCache::new(),
                source: Arc::new(std::sync::Mutex::new(1)),
                calls: Arc::new(AtomicUsize::new(0)),
                gate: Arc::new(Semaphore::new(permits)),
            }
        }

        fn subscribe(&self, key: ResourceKey) -> ResourceHandle<i64> {
            self.cache.resource(
                key,
                counted_fetcher(
                    Arc::clone(&self.source),
                    Arc::clone(&self.calls),
                    Arc::clone(&self.gate),
                ),
            )
        }

        fn set_source(&self, value: i64) {
            *self.source.lock().unwrap() = value;
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    async fn yield_a_few_times() {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn first_fetch_reaches_success() {
        let fx = Fixture::new(Semaphore::MAX_PERMITS);
        let mut handle = fx.subscribe(keys::students());

        assert!(handle.is_loading());
        let snap = handle.settled().await;

        assert_eq!(snap.status, FetchStatus::Success);
        assert_eq!(*snap.data.unwrap(), 1);
        assert!(!snap.is_fetching);
        assert_eq!(fx.calls(), 1);
    }

    #[tokio::test]
    async fn concurrent_subscriptions_share_one_fetch() {
        let fx = Fixture::new(0);
        let mut h1 = fx.subscribe(keys::students());
        let mut h2 = fx.subscribe(keys::students());

        fx.gate.add_permits(1);

        let a = h1.settled().await;
        let b = h2.settled().await;

        assert_eq!(*a.data.unwrap(), 1);
        assert_eq!(*b.data.unwrap(), 1);
        assert_eq!(fx.calls(), 1, "N subscriptions must trigger 1 fetch");
    }

    #[tokio::test]
    async fn invalidation_refetches_and_updates_data() {
        let fx = Fixture::new(Semaphore::MAX_PERMITS);
        let mut handle = fx.subscribe(keys::students());
        handle.settled().await;

        fx.set_source(2);
        fx.cache.invalidate(&keys::students());

        let snap = handle.settled().await;
        assert_eq!(*snap.data.unwrap(), 2, "post-invalidation reads see the new value");
        assert_eq!(fx.calls(), 2);
    }

    #[tokio::test]
    async fn stale_data_served_during_refetch() {
        let fx = Fixture::new(1);
        let mut handle = fx.subscribe(keys::students());
        handle.settled().await;

        fx.set_source(2);
        fx.cache.invalidate(&keys::students());

        // Refetch is gated open: observe the stale window.
        let snap = handle.snapshot();
        assert_eq!(snap.status, FetchStatus::Success);
        assert_eq!(*snap.data.clone().unwrap(), 1, "stale data must stay visible");
        assert!(!snap.is_loading(), "refetch must not count as loading");
        assert!(snap.is_fetching);

        fx.gate.add_permits(1);
        let snap = handle.settled().await;
        assert_eq!(*snap.data.unwrap(), 2);
    }

    #[tokio::test]
    async fn rapid_invalidations_coalesce() {
        let fx = Fixture::new(1);
        let mut handle = fx.subscribe(keys::students());
        handle.settled().await;

        // Refetch blocks on the gate; further invalidations must not
        // stack more fetches behind it.
        fx.cache.invalidate(&keys::students());
        fx.cache.invalidate(&keys::students());
        fx.cache.invalidate(&keys::students());

        fx.gate.add_permits(1);
        handle.settled().await;
        yield_a_few_times().await;

        assert_eq!(fx.calls(), 2, "one initial fetch plus one coalesced refetch");
    }

    #[tokio::test]
    async fn invalidation_without_subscribers_defers_refetch() {
        let fx = Fixture::new(Semaphore::MAX_PERMITS);
        let mut handle = fx.subscribe(keys::students());
        handle.settled().await;
        drop(handle);

        fx.cache.invalidate(&keys::students());
        yield_a_few_times().await;
        assert_eq!(fx.calls(), 1, "no subscriber, no refetch");

        fx.set_source(2);
        let mut handle = fx.subscribe(keys::students());
        let snap = handle.settled().await;
        assert_eq!(*snap.data.unwrap(), 2);
        assert_eq!(fx.calls(), 2, "deferred refetch runs on next subscription");
    }

    #[tokio::test]
    async fn dropping_last_subscriber_cancels_initial_fetch() {
        let fx = Fixture::new(0);
        let handle = fx.subscribe(keys::students());
        yield_a_few_times().await;
        drop(handle);

        // Let the abandoned future run to wherever it would have gone.
        fx.gate.add_permits(1);
        yield_a_few_times().await;
        assert_eq!(fx.calls(), 1);

        // A fresh subscription starts over instead of reusing the orphan.
        let mut handle = fx.subscribe(keys::students());
        let snap = handle.settled().await;
        assert_eq!(snap.status, FetchStatus::Success);
        assert_eq!(fx.calls(), 2);
    }

    #[tokio::test]
    async fn fetch_error_keeps_previous_data() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let fetcher = {
            let calls = Arc::clone(&calls);
            move || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Ok(10_i64)
                    } else {
                        Err(CoreError::Api {
                            message: "server down".into(),
                            status: Some(500),
                        })
                    }
                }
            }
        };

        let mut handle = cache.resource(keys::fees(), fetcher);
        handle.settled().await;

        cache.invalidate(&keys::fees());
        let snap = handle.settled().await;

        assert_eq!(snap.status, FetchStatus::Error);
        assert_eq!(*snap.data.unwrap(), 10, "failure must not discard cached data");
        assert!(snap.error.is_some());
    }

    #[tokio::test]
    async fn failed_entry_retries_on_next_subscription() {
        let cache = QueryCache::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let fetcher = {
            let calls = Arc::clone(&calls);
            move || {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(CoreError::Timeout { timeout_secs: 30 })
                    } else {
                        Ok(7_i64)
                    }
                }
            }
        };

        let mut handle = cache.resource(keys::exams(), fetcher.clone());
        let snap = handle.settled().await;
        assert_eq!(snap.status, FetchStatus::Error);
        drop(handle);

        let mut handle = cache.resource(keys::exams(), fetcher);
        let snap = handle.settled().await;
        assert_eq!(snap.status, FetchStatus::Success);
        assert_eq!(*snap.data.unwrap(), 7);
    }

    #[tokio::test]
    async fn failing_mutation_scope_leaves_other_keys_untouched() {
        let fx = Fixture::new(Semaphore::MAX_PERMITS);
        let mut students = fx.subscribe(keys::students());
        students.settled().await;

        let failing = {
            move || async move {
                Err::<i64, _>(CoreError::Api {
                    message: "rejected".into(),
                    status: Some(422),
                })
            }
        };
        let mut fees = fx.cache.resource(keys::fees(), failing);
        let snap = fees.settled().await;
        assert_eq!(snap.status, FetchStatus::Error);

        // Unrelated entry: same status, same data, no extra fetches.
        let snap = students.snapshot();
        assert_eq!(snap.status, FetchStatus::Success);
        assert_eq!(*snap.data.unwrap(), 1);
        assert_eq!(fx.calls(), 1);
    }

    #[tokio::test]
    async fn prefix_invalidation_spares_unrelated_collections() {
        let fx = Fixture::new(Semaphore::MAX_PERMITS);
        let mut batches = fx.subscribe(keys::batches());
        let mut batch_detail = fx.subscribe(keys::batch(RecordId::new(5)));
        batches.settled().await;
        batch_detail.settled().await;

        let student_calls = Arc::new(AtomicUsize::new(0));
        let mut students = {
            let student_calls = Arc::clone(&student_calls);
            fx.cache.resource(keys::students(), move || {
                let student_calls = Arc::clone(&student_calls);
                async move {
                    student_calls.fetch_add(1, Ordering::SeqCst);
                    Ok(0_i64)
                }
            })
        };
        students.settled().await;

        fx.cache.invalidate_prefix(&keys::batches());
        batches.settled().await;
        batch_detail.settled().await;
        yield_a_few_times().await;

        assert_eq!(fx.calls(), 4, "both batch entries refetched");
        assert_eq!(student_calls.load(Ordering::SeqCst), 1, "students untouched");
    }

    #[tokio::test]
    async fn reset_starts_from_scratch() {
        let fx = Fixture::new(Semaphore::MAX_PERMITS);
        let mut handle = fx.subscribe(keys::students());
        handle.settled().await;
        assert_eq!(fx.cache.len(), 1);

        fx.cache.reset();
        assert!(fx.cache.is_empty());

        fx.set_source(3);
        let mut handle = fx.subscribe(keys::students());
        let snap = handle.settled().await;
        assert_eq!(*snap.data.unwrap(), 3);
        assert_eq!(fx.calls(), 2);
    }
}
