//! # Tasklist Core
//!
//! Core traits and types for the task list reducer architecture.
//!
//! A feature is described by four pieces:
//!
//! - **State**: owned domain data, mutated only by its reducer
//! - **Action**: every input the reducer accepts (commands and the events they produce)
//! - **Reducer**: `(State, Action, Environment) → (State, Effects)`
//! - **Effect**: a description of follow-up work, executed by the runtime
//! - **Environment**: injected dependencies (clock, id generation)
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_core::{effect::Effect, reducer::Reducer, SmallVec};
//!
//! impl Reducer for CounterReducer {
//!     type State = CounterState;
//!     type Action = CounterAction;
//!     type Environment = CounterEnvironment;
//!
//!     fn reduce(
//!         &self,
//!         state: &mut CounterState,
//!         action: CounterAction,
//!         env: &CounterEnvironment,
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         state.count += 1;
//!         SmallVec::new()
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use smallvec::{SmallVec, smallvec};
pub use uuid::Uuid;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
/// They hold all business logic and are deterministic given their environment.
pub mod reducer {
    use super::SmallVec;
    use super::effect::Effect;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This is a pure function that:
        /// 1. Validates the action
        /// 2. Updates state in place
        /// 3. Returns effect descriptions to be executed
        ///
        /// # Returns
        ///
        /// The effects to be executed by the runtime. Most actions return none.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects are values, not execution. The runtime interprets them after the
/// reducer returns, inside the same critical section as the action that
/// produced them.
pub mod effect {
    /// Effect type - describes follow-up work requested by a reducer
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Feed an action back into the reducer before the current send completes
        Dispatch(Box<Action>),

        /// Run effects in order
        Sequential(Vec<Effect<Action>>),
    }

    impl<Action> Effect<Action> {
        /// Dispatch a follow-up action
        #[must_use]
        pub fn dispatch(action: Action) -> Self {
            Self::Dispatch(Box::new(action))
        }

        /// Chain effects to run sequentially
        #[must_use]
        pub const fn chain(effects: Vec<Self>) -> Self {
            Self::Sequential(effects)
        }

        /// Returns `true` if this effect does nothing
        #[must_use]
        pub fn is_none(&self) -> bool {
            match self {
                Self::None => true,
                Self::Dispatch(_) => false,
                Self::Sequential(effects) => effects.iter().all(Self::is_none),
            }
        }

        /// Flattens the effect into the actions it dispatches, in order
        #[must_use]
        pub fn into_actions(self) -> Vec<Action> {
            let mut actions = Vec::new();
            self.collect_actions(&mut actions);
            actions
        }

        fn collect_actions(self, out: &mut Vec<Action>) {
            match self {
                Self::None => {},
                Self::Dispatch(action) => out.push(*action),
                Self::Sequential(effects) => {
                    for effect in effects {
                        effect.collect_actions(out);
                    }
                },
            }
        }
    }
}

/// Environment module - Dependency injection traits
///
/// External sources of nondeterminism (time, identifiers) are abstracted
/// behind traits and injected via the reducer's environment.
pub mod environment {
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Identifier generation for newly created entities
    pub trait IdGenerator: Send + Sync {
        /// Returns a fresh identifier, never returned before by this generator
        fn next_id(&self) -> Uuid;
    }

    /// Production id generator producing random (v4) UUIDs
    #[derive(Debug, Clone, Copy, Default)]
    pub struct RandomIds;

    impl IdGenerator for RandomIds {
        fn next_id(&self) -> Uuid {
            Uuid::new_v4()
        }
    }
}
