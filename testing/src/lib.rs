//! # Tasklist Testing
//!
//! Testing utilities and helpers for the task list reducer architecture.
//!
//! This crate provides:
//! - Deterministic implementations of the environment traits
//! - [`ReducerTest`], a Given-When-Then harness for reducers
//! - Assertion helpers for effects
//! - proptest strategies for names and command sequences
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_testing::{test_clock, SequentialIds, ReducerTest};
//!
//! ReducerTest::new(MyReducer)
//!     .with_env(MyEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIds::new())))
//!     .given_state(MyState::default())
//!     .when_action(MyAction::DoSomething)
//!     .then_state(|state| assert_eq!(state.count, 1))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use tasklist_core::environment::{Clock, IdGenerator};
use uuid::Uuid;


pub use reducer_test::{ReducerTest, assertions};

/// Deterministic implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, IdGenerator, Utc, Uuid};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_testing::mocks::FixedClock;
    /// use tasklist_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(20_089))
    }

    /// Id generator handing out `00000000-0000-0000-0000-000000000001`,
    /// `...0002`, and so on
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_testing::mocks::SequentialIds;
    /// use tasklist_core::environment::IdGenerator;
    /// use uuid::Uuid;
    ///
    /// let ids = SequentialIds::new();
    /// assert_eq!(ids.next_id(), Uuid::from_u128(1));
    /// assert_eq!(ids.next_id(), Uuid::from_u128(2));
    /// ```
    #[derive(Debug, Default)]
    pub struct SequentialIds {
        issued: AtomicU64,
    }

    impl SequentialIds {
        /// Create a generator whose first id is 1
        #[must_use]
        pub const fn new() -> Self {
            Self {
                issued: AtomicU64::new(0),
            }
        }

        /// Create a generator whose first id is `last + 1`
        #[must_use]
        pub const fn starting_after(last: u64) -> Self {
            Self {
                issued: AtomicU64::new(last),
            }
        }

        /// Number of ids handed out so far (plus the starting offset)
        #[must_use]
        pub fn issued(&self) -> u64 {
            self.issued.load(Ordering::SeqCst)
        }
    }

    impl IdGenerator for SequentialIds {
        fn next_id(&self) -> Uuid {
            let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
            Uuid::from_u128(u128::from(n))
        }
    }
}

/// Property-based testing utilities using proptest
pub mod properties {
    use proptest::prelude::*;

    /// Non-blank item names of up to 24 characters
    pub fn item_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9 ]{0,23}"
    }

    /// Names that are empty once trimmed
    pub fn blank_name() -> impl Strategy<Value = String> {
        "[ \t]{0,4}"
    }

    /// A batch of `1..=max` item names, duplicates allowed
    pub fn item_names(max: usize) -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(item_name(), 1..=max.max(1))
    }

    /// Positions into a collection of unknown length, resolved with `index % len`
    pub fn positions(max: usize) -> impl Strategy<Value = Vec<usize>> {
        prop::collection::vec(any::<usize>(), 0..=max)
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, SequentialIds, test_clock};
