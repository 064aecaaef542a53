// ── Mutation runner ──
//
// One create/update/delete action plus its success protocol. Every page
// follows the same convention: run the action, and on success invalidate
// the cache key prefix of every collection the action could have changed,
// in declaration order, before the caller resumes. There are no
// optimistic updates and no automatic retries; failures surface once and
// leave every cache entry untouched.

use std::future::Future;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio::sync::watch;
use tracing::debug;

use crate::cache::QueryCache;
use crate::error::CoreError;
use crate::key::ResourceKey;

/// Lifecycle of one mutation instance.
///
/// `Idle → Pending → (Success | Error)`; the next [`run`](Mutation::run)
/// implicitly returns to `Pending` from any terminal state. Concurrent
/// `run` calls on one instance are not queued -- consumers are expected
/// to gate their submit control on [`is_pending`](Mutation::is_pending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// Observable state of a mutation instance.
#[derive(Debug, Clone, Default)]
pub struct MutationState {
    pub status: MutationStatus,
    /// Rendered failure message of the last error, for notification UIs.
    pub error: Option<String>,
}

type Action<I, O> = Arc<dyn Fn(I) -> BoxFuture<'static, Result<O, CoreError>> + Send + Sync>;

/// A reusable mutation: an async action plus the cache scope it
/// invalidates on success.
pub struct Mutation<I, O> {
    cache: QueryCache,
    action: Action<I, O>,
    invalidates: Vec<ResourceKey>,
    state: watch::Sender<MutationState>,
}

impl<I, O> Mutation<I, O>
where
    I: Send + 'static,
    O: Send + 'static,
{
    pub fn new<F, Fut>(cache: QueryCache, action: F) -> Self
    where
        F: Fn(I) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<O, CoreError>> + Send + 'static,
    {
        let (state, _) = watch::channel(MutationState::default());
        Self {
            cache,
            action: Arc::new(move |input| action(input).boxed()),
            invalidates: Vec::new(),
            state,
        }
    }

    /// Declare a key prefix to invalidate after every successful run.
    /// Prefixes are invalidated in declaration order.
    pub fn invalidates(mut self, key: ResourceKey) -> Self {
        self.invalidates.push(key);
        self
    }

    /// Observe state transitions (for disabling submit controls).
    pub fn subscribe(&self) -> watch::Receiver<MutationState> {
        self.state.subscribe()
    }

    pub fn is_pending(&self) -> bool {
        self.state.borrow().status == MutationStatus::Pending
    }

    /// Return to `Idle`, clearing any recorded error.
    pub fn reset(&self) {
        self.state.send_replace(MutationState::default());
    }

    /// Run the action once.
    ///
    /// On success, every declared key prefix is invalidated -- and any
    /// subscribed entry's refetch scheduled -- before this returns, so a
    /// caller that re-reads the cache afterwards always observes the
    /// refetch in flight rather than a silently stale entry.
    pub async fn run(&self, input: I) -> Result<O, CoreError> {
        self.state.send_replace(MutationState {
            status: MutationStatus::Pending,
            error: None,
        });

        match (self.action)(input).await {
            Ok(output) => {
                for key in &self.invalidates {
                    debug!(key = %key, "mutation succeeded; invalidating");
                    self.cache.invalidate_prefix(key);
                }
                self.state.send_replace(MutationState {
                    status: MutationStatus::Success,
                    error: None,
                });
                Ok(output)
            }
            Err(e) => {
                self.state.send_replace(MutationState {
                    status: MutationStatus::Error,
                    error: Some(e.to_string()),
                });
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::key::keys;

    #[tokio::test]
    async fn success_invalidates_declared_scope_in_order() {
        let cache = QueryCache::new();

        // Subscribe two collections so invalidation triggers refetches.
        let students_fetches = Arc::new(AtomicUsize::new(0));
        let mut students = {
            let counter = Arc::clone(&students_fetches);
            cache.resource(keys::students(), move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(1_i64)
                }
            })
        };
        let metrics_fetches = Arc::new(AtomicUsize::new(0));
        let mut metrics = {
            let counter = Arc::clone(&metrics_fetches);
            cache.resource(keys::dashboard_metrics(), move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(2_i64)
                }
            })
        };
        students.settled().await;
        metrics.settled().await;

        let mutation: Mutation<i64, i64> =
            Mutation::new(cache.clone(), |input: i64| async move { Ok(input * 2) })
                .invalidates(keys::students())
                .invalidates(keys::dashboard_metrics());

        let out = mutation.run(21).await.unwrap();
        assert_eq!(out, 42);

        // Refetches were scheduled before run() returned.
        assert!(students.snapshot().is_fetching);
        assert!(metrics.snapshot().is_fetching);

        students.settled().await;
        metrics.settled().await;
        assert_eq!(students_fetches.load(Ordering::SeqCst), 2);
        assert_eq!(metrics_fetches.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failure_invalidates_nothing_and_records_error() {
        let cache = QueryCache::new();

        let fetches = Arc::new(AtomicUsize::new(0));
        let mut students = {
            let counter = Arc::clone(&fetches);
            cache.resource(keys::students(), move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(1_i64)
                }
            })
        };
        students.settled().await;

        let mutation: Mutation<(), ()> = Mutation::new(cache.clone(), |()| async {
            Err(CoreError::Api {
                message: "rejected".into(),
                status: Some(422),
            })
        })
        .invalidates(keys::students());

        let err = mutation.run(()).await.unwrap_err();
        assert!(matches!(err, CoreError::Api { .. }));

        let state = mutation.subscribe().borrow().clone();
        assert_eq!(state.status, MutationStatus::Error);
        assert_eq!(state.error.as_deref(), Some("API error: rejected"));

        // The failing mutation left the cache alone.
        assert!(!students.snapshot().is_fetching);
        students.settled().await;
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn state_machine_returns_to_pending_on_next_run() {
        let cache = QueryCache::new();
        let mutation: Mutation<bool, ()> = Mutation::new(cache, |ok: bool| async move {
            if ok {
                Ok(())
            } else {
                Err(CoreError::Internal("boom".into()))
            }
        });

        assert_eq!(
            mutation.subscribe().borrow().status,
            MutationStatus::Idle
        );

        mutation.run(false).await.unwrap_err();
        assert_eq!(
            mutation.subscribe().borrow().status,
            MutationStatus::Error
        );

        mutation.run(true).await.unwrap();
        assert_eq!(
            mutation.subscribe().borrow().status,
            MutationStatus::Success
        );

        mutation.reset();
        assert_eq!(mutation.subscribe().borrow().status, MutationStatus::Idle);
        assert!(!mutation.is_pending());
    }
}
