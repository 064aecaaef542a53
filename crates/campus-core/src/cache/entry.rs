// ── Cache entry state machine ──
//
// One entry per resource key. State lives behind a std mutex with short
// critical sections; every visible change is re-broadcast to subscribers
// through a `watch` channel. Fetches run on spawned tasks tagged with a
// generation counter so results that outlive their entry's interest are
// dropped instead of applied.

use std::any::Any;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::future::BoxFuture;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::key::ResourceKey;

/// Fetch lifecycle of a cache entry.
///
/// `Idle → Loading → Success | Error`. An entry re-enters `Loading` only
/// when it has no data to serve; refetches of populated entries keep the
/// terminal status and raise the in-flight flag instead, so consumers
/// never flash back to an empty state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Type-erased cached value. Entries store whatever the fetcher produced;
/// typed access happens at the [`ResourceHandle`](super::ResourceHandle)
/// boundary via downcast.
pub(crate) type ErasedData = Arc<dyn Any + Send + Sync>;

/// Type-erased fetcher registered by the first subscriber and reused for
/// every invalidation-triggered refetch.
pub(crate) type ErasedFetcher =
    Arc<dyn Fn() -> BoxFuture<'static, Result<ErasedData, CoreError>> + Send + Sync>;

/// What subscribers observe: the public face of the entry state.
#[derive(Clone)]
pub(crate) struct ErasedSnapshot {
    pub status: FetchStatus,
    pub data: Option<ErasedData>,
    pub error: Option<Arc<CoreError>>,
    pub is_fetching: bool,
}

struct EntryState {
    status: FetchStatus,
    data: Option<ErasedData>,
    error: Option<Arc<CoreError>>,
    /// Marked by invalidation; cleared when a fetch starts.
    stale: bool,
    in_flight: bool,
    subscribers: usize,
    /// Bumped whenever an in-flight fetch is abandoned; completions
    /// carrying an older generation are discarded.
    generation: u64,
    cancel: Option<CancellationToken>,
}

pub(crate) struct Entry {
    key: ResourceKey,
    state: Mutex<EntryState>,
    tx: watch::Sender<ErasedSnapshot>,
    fetcher: Mutex<Option<ErasedFetcher>>,
}

impl Entry {
    pub(crate) fn new(key: ResourceKey) -> Self {
        let initial = ErasedSnapshot {
            status: FetchStatus::Idle,
            data: None,
            error: None,
            is_fetching: false,
        };
        let (tx, _) = watch::channel(initial);

        Self {
            key,
            state: Mutex::new(EntryState {
                status: FetchStatus::Idle,
                data: None,
                error: None,
                stale: false,
                in_flight: false,
                subscribers: 0,
                generation: 0,
                cancel: None,
            }),
            tx,
            fetcher: Mutex::new(None),
        }
    }

    pub(crate) fn key(&self) -> &ResourceKey {
        &self.key
    }

    fn lock(&self) -> MutexGuard<'_, EntryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Rebuild the snapshot from current state and broadcast it.
    /// Sends unconditionally, even with zero receivers.
    fn publish(&self) {
        let snap = {
            let st = self.lock();
            ErasedSnapshot {
                status: st.status,
                data: st.data.clone(),
                error: st.error.clone(),
                is_fetching: st.in_flight,
            }
        };
        self.tx.send_replace(snap);
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<ErasedSnapshot> {
        self.tx.subscribe()
    }

    /// Replace the registered fetcher. The latest registration wins;
    /// refetches always use it.
    pub(crate) fn set_fetcher(&self, fetcher: ErasedFetcher) {
        *self
            .fetcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(fetcher);
    }

    /// Register a subscriber. Returns `true` if the caller should start a
    /// fetch: the entry has never fetched, or was invalidated, and no
    /// fetch is already in flight.
    pub(crate) fn add_subscriber(&self) -> bool {
        let mut st = self.lock();
        st.subscribers += 1;
        !st.in_flight && (st.status == FetchStatus::Idle || st.stale)
    }

    /// Unregister a subscriber. When the last subscriber departs while the
    /// entry's first load is still in flight, the load is cancelled -- there
    /// is no one left to render the result, and the next subscription will
    /// fetch fresh. Refetches of populated entries are left to finish.
    pub(crate) fn remove_subscriber(&self) {
        let cancelled = {
            let mut st = self.lock();
            st.subscribers = st.subscribers.saturating_sub(1);
            if st.subscribers == 0 && st.in_flight && st.data.is_none() {
                st.generation += 1;
                st.in_flight = false;
                st.status = FetchStatus::Idle;
                st.stale = true;
                st.cancel.take()
            } else {
                None
            }
        };
        if let Some(token) = cancelled {
            debug!(key = %self.key, "cancelling orphaned fetch");
            token.cancel();
            self.publish();
        }
    }

    /// Mark the entry stale. Returns `true` if a refetch should be started
    /// now (live subscribers, nothing already in flight). A fetch already
    /// in flight absorbs the invalidation: at most one refetch runs per
    /// key at any time.
    pub(crate) fn mark_stale(&self) -> bool {
        let mut st = self.lock();
        if st.in_flight {
            return false;
        }
        st.stale = true;
        st.subscribers > 0
    }

    /// Start a fetch on a spawned task if none is in flight.
    ///
    /// Must be called from within a tokio runtime. The in-flight flag and
    /// (for first loads) the `Loading` status are published synchronously,
    /// before this function returns, so callers observing the snapshot
    /// afterwards always see the fetch reflected.
    pub(crate) fn start_fetch(self: &Arc<Self>) {
        let Some(fetcher) = self
            .fetcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        else {
            return;
        };

        let (token, generation) = {
            let mut st = self.lock();
            if st.in_flight {
                return;
            }
            st.in_flight = true;
            st.stale = false;
            if st.data.is_none() {
                st.status = FetchStatus::Loading;
            }
            let token = CancellationToken::new();
            st.cancel = Some(token.clone());
            (token, st.generation)
        };
        self.publish();

        let entry = Arc::clone(self);
        tokio::spawn(async move {
            let fut = (fetcher)();
            tokio::select! {
                biased;
                () = token.cancelled() => {
                    debug!(key = %entry.key, "fetch cancelled before completion");
                }
                result = fut => {
                    entry.apply_fetch_result(generation, result);
                }
            }
        });
    }

    fn apply_fetch_result(&self, generation: u64, result: Result<ErasedData, CoreError>) {
        {
            let mut st = self.lock();
            if st.generation != generation {
                debug!(key = %self.key, "dropping late result for abandoned fetch");
                return;
            }
            st.in_flight = false;
            st.cancel = None;
            match result {
                Ok(data) => {
                    st.status = FetchStatus::Success;
                    st.data = Some(data);
                    st.error = None;
                }
                Err(e) => {
                    warn!(key = %self.key, error = %e, "resource fetch failed");
                    st.status = FetchStatus::Error;
                    st.error = Some(Arc::new(e));
                    // Keep any previous data; retry on the next subscription.
                    st.stale = true;
                }
            }
        }
        self.publish();
    }

    /// Cancel any in-flight fetch and invalidate its generation.
    /// Used by `QueryCache::reset`.
    pub(crate) fn abort(&self) {
        let cancelled = {
            let mut st = self.lock();
            st.generation += 1;
            st.in_flight = false;
            st.cancel.take()
        };
        if let Some(token) = cancelled {
            token.cancel();
        }
    }
}
