//! # Tasklist Runtime
//!
//! Runtime implementation for the task list reducer architecture.
//!
//! The [`Store`] owns a feature's state, runs its reducer for every action
//! and interprets the effects the reducer returns. It is the single writer:
//! every `send` holds the write lock until the action and all the follow-up
//! actions it dispatches have been reduced.
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tasklist_core::reducer::Reducer;
use tokio::sync::RwLock;

pub use error::StoreError;
pub use store::Store;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    ///
    /// Domain rejections are not store errors: a reducer records those in its
    /// own state. These variants cover the runtime itself.
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        #[error("Store is shutting down")]
        ShutdownInProgress,

        /// An action kept dispatching follow-up actions past the configured limit
        ///
        /// The state is left as it was before the action was sent.
        #[error("Dispatch chain exceeded {0} follow-up actions")]
        DispatchLimitExceeded(usize),
    }
}

/// Configuration for Store runtime behavior
///
/// # Example
///
/// ```
/// use tasklist_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_max_dispatched_actions(8)
///     .with_broadcast_capacity(128);
/// assert_eq!(config.max_dispatched_actions, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of follow-up actions a single `send` may dispatch
    pub max_dispatched_actions: usize,
    /// Number of actions buffered for slow subscribers
    pub broadcast_capacity: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub const fn new(max_dispatched_actions: usize, broadcast_capacity: usize) -> Self {
        Self {
            max_dispatched_actions,
            broadcast_capacity,
        }
    }

    /// Set how many follow-up actions a single `send` may dispatch
    #[must_use]
    pub const fn with_max_dispatched_actions(mut self, limit: usize) -> Self {
        self.max_dispatched_actions = limit;
        self
    }

    /// Set the action broadcast capacity
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = capacity;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_dispatched_actions: 16,
            broadcast_capacity: 64,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{Arc, AtomicBool, Ordering, Reducer, RwLock, StoreConfig, StoreError};
    use std::collections::VecDeque;
    use tokio::sync::broadcast;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind `RwLock` for concurrent access)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Dispatched effects (fed back into the reducer before `send` returns)
    ///
    /// Cloning a Store yields another handle to the same state.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: Arc<R>,
        environment: Arc<E>,
        config: StoreConfig,
        shutdown: Arc<AtomicBool>,
        /// Every action reduced by a successful `send`, in reduction order.
        action_broadcast: broadcast::Sender<A>,
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: Arc::clone(&self.reducer),
                environment: Arc::clone(&self.environment),
                config: self.config.clone(),
                shutdown: Arc::clone(&self.shutdown),
                action_broadcast: self.action_broadcast.clone(),
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + Clone + std::fmt::Debug + 'static,
        S: Send + Sync + Clone + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        ///
        /// Uses [`StoreConfig::default`].
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new Store with custom configuration
        #[must_use]
        pub fn with_config(
            initial_state: S,
            reducer: R,
            environment: E,
            config: StoreConfig,
        ) -> Self {
            let (action_broadcast, _) = broadcast::channel(config.broadcast_capacity.max(1));

            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer: Arc::new(reducer),
                environment: Arc::new(environment),
                config,
                shutdown: Arc::new(AtomicBool::new(false)),
                action_broadcast,
            }
        }

        /// The configuration this store was built with
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }

        /// Stop accepting new actions
        ///
        /// Sends already holding the write lock run to completion; later
        /// sends fail with [`StoreError::ShutdownInProgress`].
        pub fn shutdown(&self) {
            tracing::info!("Store shutting down");
            self.shutdown.store(true, Ordering::Release);
        }

        /// Returns `true` once [`Store::shutdown`] has been called
        #[must_use]
        pub fn is_shut_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }

        /// Send an action to the store
        ///
        /// 1. Acquires the write lock on state
        /// 2. Reduces the action against a working copy of the state
        /// 3. Reduces every action dispatched by the returned effects, in order
        /// 4. Commits the working copy and broadcasts the reduced actions
        ///
        /// Readers never observe the intermediate states between step 2 and 4.
        ///
        /// # Errors
        ///
        /// - [`StoreError::ShutdownInProgress`] if the store is shutting down
        /// - [`StoreError::DispatchLimitExceeded`] if more than
        ///   `max_dispatched_actions` follow-up actions are dispatched in
        ///   total, however they nest; the state is left untouched
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            if self.is_shut_down() {
                tracing::warn!("Rejected action: store is shutting down");
                metrics::counter!("store.shutdown.rejected_actions").increment(1);
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!(?action, "Processing action");
            metrics::counter!("store.commands.total").increment(1);

            let mut state = self.state.write().await;
            tracing::trace!("Acquired write lock on state");

            let mut working = state.clone();
            let mut reduced = Vec::new();
            let mut queue = VecDeque::from([action]);
            let mut dispatched = 0usize;

            while let Some(action) = queue.pop_front() {
                let span = tracing::debug_span!("reducer_execution");
                let _enter = span.enter();

                let start = std::time::Instant::now();
                let effects = self
                    .reducer
                    .reduce(&mut working, action.clone(), &self.environment);
                metrics::histogram!("store.reducer.duration_seconds")
                    .record(start.elapsed().as_secs_f64());
                reduced.push(action);

                for effect in effects {
                    for follow_up in effect.into_actions() {
                        dispatched += 1;
                        if dispatched > self.config.max_dispatched_actions {
                            tracing::error!(
                                limit = self.config.max_dispatched_actions,
                                "Dispatch chain too long, discarding changes"
                            );
                            return Err(StoreError::DispatchLimitExceeded(
                                self.config.max_dispatched_actions,
                            ));
                        }
                        tracing::trace!(?follow_up, "Dispatching follow-up action");
                        metrics::counter!("store.dispatch.total").increment(1);
                        queue.push_back(follow_up);
                    }
                }
            }

            *state = working;
            drop(state);

            for action in reduced {
                // No subscribers is not an error.
                let _ = self.action_broadcast.send(action);
            }

            tracing::debug!("Action processing completed");
            Ok(())
        }

        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.items.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Subscribe to every action reduced by this store
        ///
        /// Receivers see the sent action followed by any follow-up actions
        /// it dispatched, after the resulting state has been committed.
        /// Actions from a failed `send` are never broadcast. A receiver that
        /// falls more than `broadcast_capacity` actions behind gets
        /// `RecvError::Lagged`.
        #[must_use]
        pub fn subscribe_actions(&self) -> broadcast::Receiver<A> {
            self.action_broadcast.subscribe()
        }
    }
}
