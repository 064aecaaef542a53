// ── Subscription handles ──
//
// Typed views over an entry's watch channel. A handle counts as one
// subscriber for its entry; dropping it unregisters, and dropping the
// last handle during an entry's first load cancels that load.

use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::entry::{Entry, ErasedSnapshot, FetchStatus};
use crate::error::CoreError;
use crate::key::ResourceKey;

/// Point-in-time view of one cached resource.
pub struct Resource<T> {
    pub status: FetchStatus,
    /// Last successfully fetched value, served even while a background
    /// refetch is in flight.
    pub data: Option<Arc<T>>,
    /// Last fetch failure. Never displaces `data`.
    pub error: Option<Arc<CoreError>>,
    /// `true` while any fetch for this key is in flight.
    pub is_fetching: bool,
}

impl<T> Resource<T> {
    /// `true` only when there is nothing to show yet: the first fetch for
    /// this key. Background refetches do not count as loading.
    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn is_error(&self) -> bool {
        self.status == FetchStatus::Error
    }
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status,
            data: self.data.clone(),
            error: self.error.clone(),
            is_fetching: self.is_fetching,
        }
    }
}

fn typed<T: Send + Sync + 'static>(snap: &ErasedSnapshot) -> Resource<T> {
    Resource {
        status: snap.status,
        data: snap.data.clone().and_then(|d| d.downcast::<T>().ok()),
        error: snap.error.clone(),
        is_fetching: snap.is_fetching,
    }
}

/// A live subscription to one resource key.
///
/// Holds the subscriber registration for its lifetime. One key maps to one
/// value type; registering the same key under two different types leaves
/// the mismatched handle permanently without data.
pub struct ResourceHandle<T> {
    rx: watch::Receiver<ErasedSnapshot>,
    guard: SubscriberGuard,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> ResourceHandle<T> {
    pub(crate) fn new(entry: Arc<Entry>) -> Self {
        let rx = entry.subscribe();
        Self {
            rx,
            guard: SubscriberGuard { entry },
            _marker: PhantomData,
        }
    }

    /// The key this handle is subscribed to.
    pub fn key(&self) -> &ResourceKey {
        self.guard.entry.key()
    }

    /// Current view of the resource.
    pub fn snapshot(&self) -> Resource<T> {
        typed(&self.rx.borrow())
    }

    /// Last-known data, if any fetch has ever succeeded.
    pub fn data(&self) -> Option<Arc<T>> {
        self.snapshot().data
    }

    /// See [`Resource::is_loading`].
    pub fn is_loading(&self) -> bool {
        self.snapshot().is_loading()
    }

    /// Wait for the next state change. Returns `None` once the cache that
    /// produced this handle has been reset or dropped.
    pub async fn changed(&mut self) -> Option<Resource<T>> {
        self.rx.changed().await.ok()?;
        Some(typed(&self.rx.borrow_and_update()))
    }

    /// Wait until no fetch is in flight and the entry has reached a
    /// terminal state, then return that view. Used after an invalidation
    /// to observe the refetched value rather than the stale one.
    pub async fn settled(&mut self) -> Resource<T> {
        loop {
            let snap = self.snapshot();
            if !snap.is_fetching
                && matches!(snap.status, FetchStatus::Success | FetchStatus::Error)
            {
                return snap;
            }
            if self.rx.changed().await.is_err() {
                return self.snapshot();
            }
        }
    }

    /// Wait for the first terminal state and unwrap it: data on success,
    /// the fetch error otherwise.
    pub async fn ready(&mut self) -> Result<Arc<T>, Arc<CoreError>> {
        let snap = self.settled().await;
        match (snap.status, snap.data, snap.error) {
            (FetchStatus::Success, Some(data), _) => Ok(data),
            (_, _, Some(error)) => Err(error),
            _ => Err(Arc::new(CoreError::Internal(
                format!("resource {} settled without data or error", self.key()),
            ))),
        }
    }

    /// Convert into a `Stream` of typed snapshots for `StreamExt`
    /// combinators. The current snapshot is yielded first.
    pub fn into_stream(self) -> ResourceStream<T> {
        ResourceStream {
            inner: WatchStream::new(self.rx),
            _guard: self.guard,
            _marker: PhantomData,
        }
    }
}

/// `Stream` adapter backed by the entry's `watch` channel.
pub struct ResourceStream<T> {
    inner: WatchStream<ErasedSnapshot>,
    _guard: SubscriberGuard,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> Stream for ResourceStream<T> {
    type Item = Resource<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        // WatchStream is Unpin; ErasedSnapshot is always Unpin.
        Pin::new(&mut self.inner)
            .poll_next(cx)
            .map(|opt| opt.map(|snap| typed(&snap)))
    }
}

/// Subscriber registration tied to the handle's lifetime.
struct SubscriberGuard {
    entry: Arc<Entry>,
}

impl Drop for SubscriberGuard {
    fn drop(&mut self) {
        self.entry.remove_subscriber();
    }
}
