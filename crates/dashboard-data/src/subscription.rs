//! Fetch subscriptions with timeout, automatic retry, and refetch.
//!
//! Each subscription owns one driver task at a time. Starting a new attempt
//! sequence (initial subscribe, refetch, dependency change) bumps the
//! generation and aborts the previous driver, which drops its producer
//! future, timeout timer and retry timer. Every state commit re-checks the
//! generation under the watch channel's write lock, so a superseded driver
//! can never publish after a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use dashboard_core::{FetchConfig, FetchObserver, FetchPhase, SubscriptionId};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::dependency::DependencyTracker;
use crate::producer::Producer;
use crate::retry::RetryPolicy;
use crate::state::FetchState;
use crate::timeout::with_timeout;

/// Options for a new subscription.
#[derive(Clone, Default)]
pub struct SubscribeOptions {
    /// Timeout and retry settings.
    pub config: FetchConfig,
    /// Correlation ID; generated when absent.
    pub id: Option<SubscriptionId>,
    /// Lifecycle observer.
    pub observer: Option<Arc<dyn FetchObserver>>,
}

impl SubscribeOptions {
    /// Create options from a fetch configuration.
    pub fn new(config: FetchConfig) -> Self {
        Self {
            config,
            id: None,
            observer: None,
        }
    }

    /// Set the subscription ID.
    pub fn with_id(mut self, id: SubscriptionId) -> Self {
        self.id = Some(id);
        self
    }

    /// Attach a lifecycle observer.
    pub fn with_observer(mut self, observer: Arc<dyn FetchObserver>) -> Self {
        self.observer = Some(observer);
        self
    }
}

struct Shared<K, T> {
    id: SubscriptionId,
    producer: Box<dyn Producer<K, T>>,
    timeout: Duration,
    retry: RetryPolicy,
    observer: Option<Arc<dyn FetchObserver>>,
    state: watch::Sender<FetchState<T>>,
    generation: AtomicU64,
}

impl<K, T> Shared<K, T> {
    /// Apply `update` only if `generation` is still current.
    fn commit(&self, generation: u64, update: impl FnOnce(&mut FetchState<T>)) -> bool {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            update(state);
            true
        })
    }

    fn notify(&self, phase: FetchPhase) {
        if let Some(observer) = &self.observer {
            observer.on_phase(&self.id, &phase);
        }
    }
}

struct Control<K> {
    deps: DependencyTracker<K>,
    driver: Option<JoinHandle<()>>,
    closed: bool,
}

struct Inner<K, T> {
    shared: Arc<Shared<K, T>>,
    control: Mutex<Control<K>>,
}

impl<K, T> Inner<K, T> {
    fn lock(&self) -> MutexGuard<'_, Control<K>> {
        self.control.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn teardown(&self) {
        let mut control = self.lock();
        if control.closed {
            return;
        }
        control.closed = true;
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(driver) = control.driver.take() {
            driver.abort();
        }
        drop(control);

        debug!(subscription = %self.shared.id, "fetch subscription torn down");
        self.shared.notify(FetchPhase::TornDown);
    }
}

impl<K, T> Inner<K, T>
where
    K: PartialEq + Clone + Send + Sync + 'static,
    T: Default + Send + Sync + 'static,
{
    /// Start a fresh attempt sequence for the current dependency key.
    ///
    /// Observers are notified with the lock released, so they may call back
    /// into the subscription. The driver is only spawned if no other restart
    /// or teardown happened in the meantime.
    fn restart(&self, mut control: MutexGuard<'_, Control<K>>) {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let superseded = match control.driver.take() {
            Some(driver) if !driver.is_finished() => {
                driver.abort();
                true
            }
            _ => false,
        };
        self.shared.commit(generation, |state| state.begin_attempt(0));
        drop(control);

        if superseded {
            debug!(subscription = %self.shared.id, "outstanding fetch superseded");
            self.shared.notify(FetchPhase::Superseded);
        }
        self.shared.notify(FetchPhase::AttemptStarted { retry_count: 0 });

        let mut control = self.lock();
        if control.closed || self.shared.generation.load(Ordering::SeqCst) != generation {
            return;
        }
        let shared = Arc::clone(&self.shared);
        let key = control.deps.current().clone();
        control.driver = Some(tokio::spawn(run_attempts(shared, key, generation)));
    }

    fn refetch(&self) -> bool {
        let control = self.lock();
        if control.closed {
            return false;
        }
        debug!(subscription = %self.shared.id, "manual refetch");
        self.restart(control);
        true
    }
}

/// Run one attempt plus, on failure, the automatic retry.
async fn run_attempts<K, T>(shared: Arc<Shared<K, T>>, key: K, generation: u64)
where
    K: Send + Sync + 'static,
    T: Default + Send + Sync + 'static,
{
    let mut retry_count = 0u8;

    loop {
        let started = Instant::now();
        let outcome = with_timeout(shared.producer.produce(&key), shared.timeout).await;
        let elapsed = started.elapsed();

        let err = match outcome {
            Ok(data) => {
                if shared.commit(generation, |state| state.succeed(data)) {
                    debug!(
                        subscription = %shared.id,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "fetch succeeded"
                    );
                    shared.notify(FetchPhase::Succeeded { elapsed });
                }
                return;
            }
            Err(err) => err,
        };

        if !shared.commit(generation, |state| state.fail(&err)) {
            return;
        }
        warn!(
            subscription = %shared.id,
            kind = %err.kind(),
            retry_count,
            error = %err,
            "fetch failed"
        );
        shared.notify(FetchPhase::Failed {
            kind: err.kind(),
            message: err.to_string(),
            elapsed,
        });

        let Some(delay) = shared.retry.delay_for(retry_count) else {
            debug!(subscription = %shared.id, "no automatic retry left");
            return;
        };
        retry_count += 1;
        if !shared.commit(generation, |state| state.schedule_retry(retry_count)) {
            return;
        }
        info!(
            subscription = %shared.id,
            delay_ms = delay.as_millis() as u64,
            "automatic retry scheduled"
        );
        shared.notify(FetchPhase::RetryScheduled { delay });

        tokio::time::sleep(delay).await;

        if !shared.commit(generation, |state| state.begin_attempt(retry_count)) {
            return;
        }
        shared.notify(FetchPhase::AttemptStarted { retry_count });
    }
}

/// A live fetch subscription.
///
/// Dropping the handle (or calling [`SafeFetch::unsubscribe`]) cancels any
/// outstanding attempt and retry timer and closes the state channel.
pub struct SafeFetch<K, T> {
    inner: Arc<Inner<K, T>>,
}

impl<K, T> SafeFetch<K, T>
where
    K: PartialEq + Clone + Send + Sync + 'static,
    T: Clone + Default + Send + Sync + 'static,
{
    /// Subscribe and start the first attempt immediately.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn subscribe<P>(producer: P, key: K, config: &FetchConfig) -> Self
    where
        P: Producer<K, T>,
    {
        Self::subscribe_with(producer, key, SubscribeOptions::new(config.clone()))
    }

    /// Subscribe with explicit options.
    pub fn subscribe_with<P>(producer: P, key: K, options: SubscribeOptions) -> Self
    where
        P: Producer<K, T>,
    {
        let id = options.id.unwrap_or_else(SubscriptionId::generate);
        let (state, _) = watch::channel(FetchState::idle());

        if let Err(e) = options.config.validate() {
            warn!(subscription = %id, error = %e, "fetch config out of range");
        }

        debug!(
            subscription = %id,
            timeout_ms = options.config.timeout_ms,
            retry_delay_ms = options.config.retry_delay_ms,
            "fetch subscription created"
        );

        let shared = Arc::new(Shared {
            id,
            producer: Box::new(producer),
            timeout: options.config.timeout(),
            retry: RetryPolicy::from_config(&options.config),
            observer: options.observer,
            state,
            generation: AtomicU64::new(0),
        });
        let inner = Arc::new(Inner {
            shared,
            control: Mutex::new(Control {
                deps: DependencyTracker::new(key),
                driver: None,
                closed: false,
            }),
        });

        inner.restart(inner.lock());

        Self { inner }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> FetchState<T> {
        self.inner.shared.state.borrow().clone()
    }

    /// Observe state changes.
    pub fn watch(&self) -> watch::Receiver<FetchState<T>> {
        self.inner.shared.state.subscribe()
    }

    /// Start a new attempt now, cancelling any pending automatic retry.
    pub fn refetch(&self) {
        self.inner.refetch();
    }

    /// Switch to a new dependency key.
    ///
    /// Restarts the fetch if `key` differs from the current one; returns
    /// whether a restart happened.
    pub fn set_dependency_key(&self, key: K) -> bool {
        let mut control = self.inner.lock();
        if !control.deps.update(key) {
            return false;
        }
        debug!(
            subscription = %self.inner.shared.id,
            changes = control.deps.changes(),
            "dependency key changed"
        );
        self.inner.restart(control);
        true
    }

    /// The dependency key currently in effect.
    pub fn dependency_key(&self) -> K {
        self.inner.lock().deps.current().clone()
    }

    /// A cloneable handle that can trigger refetches without owning the
    /// subscription.
    pub fn refetch_handle(&self) -> RefetchHandle<K, T> {
        RefetchHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

impl<K, T> SafeFetch<K, T> {
    /// Get the subscription ID.
    pub fn id(&self) -> &SubscriptionId {
        &self.inner.shared.id
    }

    /// Tear the subscription down.
    pub fn unsubscribe(self) {
        self.inner.teardown();
    }
}

impl<K, T> Drop for SafeFetch<K, T> {
    fn drop(&mut self) {
        self.inner.teardown();
    }
}

/// Weak refetch trigger for a [`SafeFetch`].
pub struct RefetchHandle<K, T> {
    inner: Weak<Inner<K, T>>,
}

impl<K, T> RefetchHandle<K, T>
where
    K: PartialEq + Clone + Send + Sync + 'static,
    T: Default + Send + Sync + 'static,
{
    /// Trigger a refetch. Returns `false` once the subscription is gone.
    pub fn refetch(&self) -> bool {
        match self.inner.upgrade() {
            Some(inner) => inner.refetch(),
            None => false,
        }
    }
}

impl<K, T> RefetchHandle<K, T> {
    /// Whether the subscription is still alive.
    pub fn is_active(&self) -> bool {
        match self.inner.upgrade() {
            Some(inner) => {
                let closed = inner.lock().closed;
                !closed
            }
            None => false,
        }
    }
}

impl<K, T> Clone for RefetchHandle<K, T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use super::*;

    #[derive(Default)]
    struct Recorder {
        phases: Mutex<Vec<FetchPhase>>,
    }

    impl FetchObserver for Recorder {
        fn on_phase(&self, _subscription: &SubscriptionId, phase: &FetchPhase) {
            self.phases.lock().unwrap().push(phase.clone());
        }
    }

    impl Recorder {
        fn names(&self) -> Vec<&'static str> {
            self.phases
                .lock()
                .unwrap()
                .iter()
                .map(|phase| match phase {
                    FetchPhase::AttemptStarted { .. } => "started",
                    FetchPhase::Succeeded { .. } => "succeeded",
                    FetchPhase::Failed { .. } => "failed",
                    FetchPhase::RetryScheduled { .. } => "retry",
                    FetchPhase::Superseded => "superseded",
                    FetchPhase::TornDown => "torn_down",
                })
                .collect()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_is_set_synchronously() {
        let fetch = SafeFetch::subscribe(
            |_: ()| async { Ok::<_, String>(vec![1u32]) },
            (),
            &FetchConfig::default(),
        );
        let state = fetch.state();
        assert!(state.loading);
        assert_eq!(state.data, None);
        assert_eq!(state.retry_count, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_dependency_key_does_not_restart() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let fetch = SafeFetch::subscribe(
            move |page: u32| {
                counter.fetch_add(1, Ordering::SeqCst);
                async move { Ok::<_, String>(vec![page]) }
            },
            1,
            &FetchConfig::default(),
        );
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(!fetch.set_dependency_key(1));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        assert!(fetch.set_dependency_key(2));
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(fetch.state().data, Some(vec![2]));
        assert_eq!(fetch.dependency_key(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refetch_handle_is_noop_after_teardown() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let fetch = SafeFetch::subscribe(
            move |_: ()| {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Ok::<_, String>(Vec::<u8>::new()) }
            },
            (),
            &FetchConfig::default(),
        );
        let handle = fetch.refetch_handle();
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert!(handle.is_active());
        assert!(handle.refetch());
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        fetch.unsubscribe();
        assert!(!handle.is_active());
        assert!(!handle.refetch());
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_observer_sees_retry_sequence() {
        let recorder = Arc::new(Recorder::default());
        let options = SubscribeOptions::new(FetchConfig::default())
            .with_id(SubscriptionId::from_string("orders"))
            .with_observer(recorder.clone());
        let fetch = SafeFetch::subscribe_with(
            |_: ()| async { Err::<Vec<u8>, _>("server error") },
            (),
            options,
        );
        assert_eq!(fetch.id().as_str(), "orders");

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(
            recorder.names(),
            vec!["started", "failed", "retry", "started", "failed"]
        );

        drop(fetch);
        assert_eq!(recorder.names().last(), Some(&"torn_down"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_refetch_supersedes_outstanding_attempt() {
        let recorder = Arc::new(Recorder::default());
        let options = SubscribeOptions::default().with_observer(recorder.clone());
        let fetch = SafeFetch::subscribe_with(
            |_: ()| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, String>(vec!["slow"])
            },
            (),
            options,
        );
        tokio::time::sleep(Duration::from_secs(1)).await;
        fetch.refetch();
        tokio::time::sleep(Duration::from_secs(6)).await;

        assert_eq!(
            recorder.names(),
            vec!["started", "superseded", "started", "succeeded"]
        );
        assert_eq!(fetch.state().data, Some(vec!["slow"]));
    }

    /// Observer that calls back into its own subscription.
    #[derive(Default)]
    struct Reentrant {
        handle: Mutex<Option<RefetchHandle<(), Vec<&'static str>>>>,
        seen: Mutex<Vec<(&'static str, Option<bool>)>>,
        refetched: std::sync::atomic::AtomicBool,
    }

    impl FetchObserver for Reentrant {
        fn on_phase(&self, _subscription: &SubscriptionId, phase: &FetchPhase) {
            let handle = self.handle.lock().unwrap().clone();
            let active = handle.as_ref().map(RefetchHandle::is_active);
            let name = match phase {
                FetchPhase::AttemptStarted { .. } => "started",
                FetchPhase::Succeeded { .. } => "succeeded",
                FetchPhase::Failed { .. } => "failed",
                FetchPhase::RetryScheduled { .. } => "retry",
                FetchPhase::Superseded => "superseded",
                FetchPhase::TornDown => "torn_down",
            };
            self.seen.lock().unwrap().push((name, active));

            if matches!(phase, FetchPhase::Superseded)
                && !self.refetched.swap(true, Ordering::SeqCst)
            {
                if let Some(handle) = handle {
                    assert!(handle.refetch());
                }
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_observer_can_call_back_into_subscription() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let observer = Arc::new(Reentrant::default());
        let options = SubscribeOptions::default().with_observer(observer.clone());
        let fetch = SafeFetch::subscribe_with(
            move |_: ()| {
                counter.fetch_add(1, Ordering::SeqCst);
                async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok::<_, String>(vec!["slow"])
                }
            },
            (),
            options,
        );
        *observer.handle.lock().unwrap() = Some(fetch.refetch_handle());

        tokio::time::sleep(Duration::from_secs(1)).await;
        fetch.refetch();
        tokio::time::sleep(Duration::from_secs(6)).await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(fetch.state().data, Some(vec!["slow"]));

        drop(fetch);
        assert_eq!(
            *observer.seen.lock().unwrap(),
            vec![
                ("started", None),
                ("superseded", Some(true)),
                ("started", Some(true)),
                ("started", Some(true)),
                ("succeeded", Some(true)),
                ("torn_down", Some(false)),
            ]
        );
    }
}
