//! # Todo Form Runtime
//!
//! Runtime implementation for the todo form.
//!
//! This crate provides the Store runtime that coordinates reducer execution
//! and effect handling.
//!
//! ## Core Components
//!
//! - **Store**: Owns the state and executes effects returned by the reducer
//! - **`EffectHandle`**: Lets a caller wait until the effects of one action have finished
//! - **Feedback loop**: Actions produced by effects are sent back into the store
//!
//! ## Example
//!
//! ```ignore
//! use todo_form_runtime::Store;
//!
//! let store = Store::new(FormState::new(), TodoFormReducer::new(), environment);
//!
//! // Send an action and wait for its effects
//! let mut handle = store.send(FormAction::ChangeText { value: "buy milk".into() }).await?;
//! handle.wait().await;
//!
//! // Read state
//! let text = store.state(|s| s.text.clone()).await;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use todo_form_core::{effect::Effect, reducer::Reducer};
use tokio::sync::{RwLock, watch};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// Returned when `send()` is called after shutdown was initiated.
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// Shutdown timed out waiting for effects to complete
        #[error("Shutdown timed out with {0} effects still running")]
        ShutdownTimeout(usize),

        /// Timed out waiting for the effects of an action
        #[error("Timeout waiting for effects")]
        Timeout,
    }
}

pub use error::StoreError;

/// Handle for tracking effect completion
///
/// Returned by [`Store::send()`] so callers can wait for the effects of one
/// action to finish. When an effect feeds an action back into the store,
/// that action has been reduced by the time the handle completes.
///
/// # Example
///
/// ```ignore
/// let mut handle = store.send(FormAction::Submit { event }).await?;
/// handle.wait_with_timeout(Duration::from_secs(5)).await?;
/// // The sink has been called
/// ```
#[derive(Clone)]
pub struct EffectHandle {
    effects: Arc<AtomicUsize>,
    completion: watch::Receiver<()>,
}

impl EffectHandle {
    /// Create a handle and the tracking context that effect execution reports to
    fn new() -> (Self, EffectTracking) {
        let counter = Arc::new(AtomicUsize::new(0));
        let (tx, rx) = watch::channel(());

        let handle = Self {
            effects: Arc::clone(&counter),
            completion: rx,
        };

        let tracking = EffectTracking {
            counter,
            notifier: tx,
        };

        (handle, tracking)
    }

    /// Create a handle that's already complete
    ///
    /// Useful as the initial value when looping over sends.
    #[must_use]
    pub fn completed() -> Self {
        let (tx, rx) = watch::channel(());
        let _ = tx.send(());

        Self {
            effects: Arc::new(AtomicUsize::new(0)),
            completion: rx,
        }
    }

    /// Number of effects still running
    #[must_use]
    pub fn pending(&self) -> usize {
        self.effects.load(Ordering::SeqCst)
    }

    /// Wait for all effects to complete
    pub async fn wait(&mut self) {
        while self.effects.load(Ordering::SeqCst) > 0 {
            if self.completion.changed().await.is_err() {
                // Every tracker is gone, nothing can still be running
                break;
            }
        }
    }

    /// Wait for all effects to complete with a timeout
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Timeout`] if the timeout expires before all
    /// effects complete.
    pub async fn wait_with_timeout(&mut self, timeout: Duration) -> Result<(), StoreError> {
        tokio::time::timeout(timeout, self.wait())
            .await
            .map_err(|_| StoreError::Timeout)
    }
}

impl std::fmt::Debug for EffectHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EffectHandle")
            .field("pending_effects", &self.pending())
            .finish_non_exhaustive()
    }
}

/// Internal: tracking context passed through effect execution
#[derive(Clone)]
struct EffectTracking {
    counter: Arc<AtomicUsize>,
    notifier: watch::Sender<()>,
}

impl EffectTracking {
    fn increment(&self) {
        self.counter.fetch_add(1, Ordering::SeqCst);
    }

    fn decrement(&self) {
        if self.counter.fetch_sub(1, Ordering::SeqCst) == 1 {
            let _ = self.notifier.send(());
        }
    }
}

/// Internal: RAII guard that decrements the effect counter on drop
///
/// The counter is updated even if the effect panics.
struct DecrementGuard(EffectTracking);

impl Drop for DecrementGuard {
    fn drop(&mut self) {
        self.0.decrement();
    }
}

/// Guard that decrements an atomic counter on drop (for shutdown tracking)
struct AtomicCounterGuard(Arc<AtomicUsize>);

impl Drop for AtomicCounterGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Store runtime for coordinating reducer execution and effect handling.
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicCounterGuard, AtomicUsize, DecrementGuard, Duration, Effect,
        EffectHandle, EffectTracking, Ordering, Reducer, RwLock, StoreError,
    };
    use tokio::sync::broadcast;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock`; reductions never overlap)
    /// 2. Reducer (component logic)
    /// 3. Environment (injected capabilities)
    /// 4. Effect execution (with feedback loop)
    ///
    /// Cloning a Store yields another handle to the same state.
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
        pending_effects: Arc<AtomicUsize>,
        /// Actions produced by effects, broadcast to observers
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone + Send + Sync + 'static,
        A: Send + Clone + 'static,
        S: Send + Sync + 'static,
        E: Clone + Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// The action broadcast channel holds 16 actions; use
        /// [`Store::with_broadcast_capacity`] for more.
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_broadcast_capacity(initial_state, reducer, environment, 16)
        }

        /// Create a new store with a custom action broadcast capacity
        ///
        /// # Panics
        ///
        /// Panics if `capacity` is zero (tokio broadcast requirement).
        #[must_use]
        pub fn with_broadcast_capacity(
            initial_state: S,
            reducer: R,
            environment: E,
            capacity: usize,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(capacity);

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                pending_effects: Arc::new(AtomicUsize::new(0)),
                action_broadcast,
            }
        }

        /// Send an action to the store
        ///
        /// Runs the reducer under the state write lock, then starts the
        /// returned effects. The returned [`EffectHandle`] completes once
        /// those effects (and any actions they fed back) are done.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] once shutdown began.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<EffectHandle, StoreError> {
            if self.shutdown.load(Ordering::Acquire) {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!("Processing action");
            metrics::counter!("store.commands.total").increment(1);

            let (handle, tracking) = EffectHandle::new();

            let effects = {
                let mut state = self.state.write().await;

                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                tracing::trace!("Reducer completed, returned {} effects", effects.len());
                effects
            };

            for effect in effects {
                self.execute_effect(effect, tracking.clone());
            }

            Ok(handle)
        }

        /// Subscribe to actions produced by effects
        ///
        /// Only feedback actions are broadcast, not the actions passed to
        /// [`Store::send`].
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }

        /// Read current state via a closure
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Initiate graceful shutdown
        ///
        /// New actions are rejected from this point on. Waits for in-flight
        /// effects until `timeout` elapses. Calling it again is harmless.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownTimeout`] with the number of effects
        /// still running when the timeout elapses.
        pub async fn shutdown(&self, timeout: Duration) -> Result<(), StoreError> {
            tracing::info!("Initiating graceful shutdown");
            metrics::counter!("store.shutdown.initiated").increment(1);

            self.shutdown.store(true, Ordering::Release);

            let start = std::time::Instant::now();
            let poll_interval = Duration::from_millis(10);

            loop {
                let pending = self.pending_effects.load(Ordering::Acquire);

                if pending == 0 {
                    tracing::info!("All effects completed, shutdown successful");
                    metrics::counter!("store.shutdown.completed").increment(1);
                    return Ok(());
                }

                if start.elapsed() >= timeout {
                    tracing::error!(pending_effects = pending, "Shutdown timed out");
                    metrics::counter!("store.shutdown.timeout").increment(1);
                    return Err(StoreError::ShutdownTimeout(pending));
                }

                tokio::time::sleep(poll_interval).await;
            }
        }

        /// Start an effect, reporting to `tracking`
        ///
        /// Effect failures never halt the store: a panicking effect only
        /// takes down its own task, and [`DecrementGuard`] keeps the
        /// counters right.
        #[allow(clippy::needless_pass_by_value)] // tracking is moved into spawned tasks
        #[tracing::instrument(skip(self, effect, tracking), name = "execute_effect")]
        fn execute_effect(&self, effect: Effect<A>, tracking: EffectTracking) {
            match effect {
                Effect::None => {
                    tracing::trace!("Executing Effect::None (no-op)");
                    metrics::counter!("store.effects.executed", "type" => "none").increment(1);
                },
                Effect::Future(fut) => {
                    tracing::trace!("Executing Effect::Future");
                    metrics::counter!("store.effects.executed", "type" => "future").increment(1);
                    tracking.increment();

                    self.pending_effects.fetch_add(1, Ordering::SeqCst);
                    let pending_guard = AtomicCounterGuard(Arc::clone(&self.pending_effects));

                    let store = self.clone();

                    tokio::spawn(async move {
                        let _guard = DecrementGuard(tracking);
                        let _pending_guard = pending_guard;

                        if let Some(action) = fut.await {
                            tracing::trace!("Effect::Future produced an action, sending to store");
                            let _ = store.action_broadcast.send(action.clone());

                            if let Err(error) = store.send(action).await {
                                tracing::warn!(error = %error, "Feedback action was not processed");
                            }
                        }
                    });
                },
            }
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                shutdown: Arc::clone(&self.shutdown),
                pending_effects: Arc::clone(&self.pending_effects),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;
