//! In-memory task list built on the reducer architecture.
//!
//! The list is an ordered collection of items. Each item has a surrogate
//! [`ItemId`] assigned at creation, a mutable name and a status that toggles
//! between in progress and completed. All changes go through
//! [`TaskListAction`]s reduced by the [`TaskListReducer`], which records
//! the resulting [`TaskListEvent`]s in the state; a
//! [`Store`](tasklist_runtime::Store) owns the state and serialises them.
//!
//! - Add, remove, toggle and rename items
//! - Per-item edit mode with a draft name ([`EditMode`])
//! - Configurable name validation ([`NamePolicy`])
//! - Rejected commands recorded as typed errors ([`TaskListError`])
//!
//! # Quick Start
//!
//! ```no_run
//! use tasklist::{TaskListAction, TaskListEnvironment, TaskListReducer, TaskListState};
//! use tasklist_core::environment::{RandomIds, SystemClock};
//! use tasklist_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = TaskListEnvironment::new(Arc::new(SystemClock), Arc::new(RandomIds));
//! let store = Store::new(TaskListState::new(), TaskListReducer::new(), env);
//!
//! store.send(TaskListAction::Add { name: "Buy milk".to_string() }).await?;
//!
//! let id = store.state(|s| s.id_at(0)).await.ok_or("missing item")?;
//! store.send(TaskListAction::ToggleStatus { id }).await?;
//!
//! let state = store.state(Clone::clone).await;
//! println!("Completed: {}/{}", state.completed_count(), state.count());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod edit;
pub mod error;
pub mod reducer;
pub mod types;
pub mod validation;

pub use config::{ConfigError, TaskListConfig};
pub use edit::EditMode;
pub use error::TaskListError;
pub use reducer::{TaskListEnvironment, TaskListReducer, can_edit};
pub use types::{
    Item, ItemId, ItemView, Status, TaskListAction, TaskListEvent, TaskListSnapshot,
    TaskListState,
};
pub use validation::{NamePolicy, NameRules};

/// Store type used by applications of this crate
pub type TaskListStore = tasklist_runtime::Store<
    TaskListState,
    TaskListAction,
    TaskListEnvironment,
    TaskListReducer,
>;
