//! Domain types for the task list.
//!
//! The list is an ordered collection of items, each with a surrogate id, a
//! mutable name and a two-valued status. Per-item edit sessions and the
//! new-item draft sit next to the collection but are never part of an item.

use crate::edit::EditMode;
use crate::error::TaskListError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for an item
///
/// Assigned once at creation and never changed; renaming an item keeps it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Creates an `ItemId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle status of an item
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Not done yet; the initial status
    #[default]
    InProgress,
    /// Done
    Completed,
}

impl Status {
    /// The other status
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::InProgress => Self::Completed,
            Self::Completed => Self::InProgress,
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress => write!(f, "in progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// A single task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Current status
    pub status: Status,
    /// When the item was added
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Creates a new in-progress item
    #[must_use]
    pub const fn new(id: ItemId, name: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            status: Status::InProgress,
            created_at,
        }
    }

    /// Whether the item is completed
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.status, Status::Completed)
    }
}

/// State of the task list
///
/// Fields are private: the collection only changes through
/// [`TaskListAction`]s reduced by the `TaskListReducer`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskListState {
    /// Items in insertion order
    items: Vec<Item>,
    /// Text of the new-item input
    draft: String,
    /// Draft names of items in edit mode
    edits: HashMap<ItemId, String>,
    /// Reason the last command was rejected, cleared by the next accepted one
    last_error: Option<TaskListError>,
    /// Every event applied since the state was created
    events: Vec<TaskListEvent>,
}

impl TaskListState {
    /// Creates a new empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state holding `items`, in order, with nothing being edited
    ///
    /// Only the first item with a given id is kept.
    #[must_use]
    pub fn from_items(items: Vec<Item>) -> Self {
        let mut state = Self::default();
        for item in items {
            if !state.exists(item.id) {
                state.items.push(item);
            }
        }
        state
    }

    /// Items in insertion order
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the number of items
    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Returns the number of completed items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_completed()).count()
    }

    /// Returns an item by id
    #[must_use]
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Position of an item in the list
    #[must_use]
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    /// Checks if an item exists
    #[must_use]
    pub fn exists(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Id of the item at `index`
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<ItemId> {
        self.items.get(index).map(|item| item.id)
    }

    /// Text of the new-item input
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Edit mode of an item; unknown ids are `Viewing`
    #[must_use]
    pub fn edit_mode(&self, id: ItemId) -> EditMode {
        self.edits
            .get(&id)
            .map_or(EditMode::Viewing, |draft| EditMode::Editing {
                draft: draft.clone(),
            })
    }

    /// Number of items currently in edit mode
    #[must_use]
    pub fn editing_count(&self) -> usize {
        self.edits.len()
    }

    /// Reason the last command was rejected
    #[must_use]
    pub const fn last_error(&self) -> Option<&TaskListError> {
        self.last_error.as_ref()
    }

    /// Events applied to this state, oldest first
    #[must_use]
    pub fn events(&self) -> &[TaskListEvent] {
        &self.events
    }

    /// Everything a view needs to render the list
    #[must_use]
    pub fn snapshot(&self) -> TaskListSnapshot {
        TaskListSnapshot {
            items: self
                .items
                .iter()
                .map(|item| ItemView {
                    id: item.id,
                    name: item.name.clone(),
                    status: item.status,
                    edit_draft: self.edits.get(&item.id).cloned(),
                })
                .collect(),
            draft: self.draft.clone(),
            last_error: self.last_error.clone(),
        }
    }

    pub(crate) fn push(&mut self, item: Item) {
        self.items.push(item);
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub(crate) fn remove(&mut self, id: ItemId) {
        self.items.retain(|item| item.id != id);
        self.edits.remove(&id);
    }

    pub(crate) fn set_draft(&mut self, text: String) {
        self.draft = text;
    }

    pub(crate) fn set_edit_draft(&mut self, id: ItemId, draft: String) {
        self.edits.insert(id, draft);
    }

    pub(crate) fn end_edit(&mut self, id: ItemId) {
        self.edits.remove(&id);
    }

    pub(crate) fn set_last_error(&mut self, error: Option<TaskListError>) {
        self.last_error = error;
    }

    pub(crate) fn record(&mut self, event: TaskListEvent) {
        self.events.push(event);
    }
}

/// One row of a [`TaskListSnapshot`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemView {
    /// Item id
    pub id: ItemId,
    /// Current name
    pub name: String,
    /// Current status
    pub status: Status,
    /// Draft name when the item is in edit mode
    pub edit_draft: Option<String>,
}

impl ItemView {
    /// Whether the item is in edit mode
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.edit_draft.is_some()
    }
}

/// Read-only copy of the state handed to the presentation layer
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TaskListSnapshot {
    /// Items in insertion order
    pub items: Vec<ItemView>,
    /// Text of the new-item input
    pub draft: String,
    /// Reason the last command was rejected
    pub last_error: Option<TaskListError>,
}

/// Commands accepted by the task list
///
/// The reducer validates each command against the current state and turns
/// it into a [`TaskListEvent`], or rejects it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskListAction {
    /// Append a new in-progress item
    Add {
        /// Name of the new item
        name: String,
    },

    /// Remove an item
    Remove {
        /// Item to remove
        id: ItemId,
    },

    /// Flip an item between in progress and completed
    ToggleStatus {
        /// Item to toggle
        id: ItemId,
    },

    /// Replace an item's name
    Rename {
        /// Item to rename
        id: ItemId,
        /// New name
        name: String,
    },

    /// Replace the new-item draft text
    SetDraft {
        /// Draft text
        text: String,
    },

    /// Add an item named after the draft
    SubmitDraft,

    /// Enter edit mode for an item
    BeginEdit {
        /// Item to edit
        id: ItemId,
    },

    /// Replace the draft name of an item in edit mode
    EditDraft {
        /// Item being edited
        id: ItemId,
        /// Draft name
        text: String,
    },

    /// Rename the item to its draft name and leave edit mode
    SubmitEdit {
        /// Item being edited
        id: ItemId,
    },

    /// Leave edit mode without renaming
    CancelEdit {
        /// Item being edited
        id: ItemId,
    },
}

/// Facts recorded by the task list
///
/// Only the reducer produces events. Every applied event is appended to
/// [`TaskListState::events`], and replaying that log with
/// `TaskListReducer::replay` rebuilds the state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskListEvent {
    /// Item was added
    ItemAdded {
        /// New item id
        id: ItemId,
        /// Name of the item
        name: String,
        /// When the item was added
        created_at: DateTime<Utc>,
    },

    /// Item was removed
    ItemRemoved {
        /// Removed item id
        id: ItemId,
    },

    /// Item status changed
    StatusToggled {
        /// Item id
        id: ItemId,
        /// Status after the toggle
        status: Status,
    },

    /// Item was renamed
    ItemRenamed {
        /// Item id
        id: ItemId,
        /// New name
        name: String,
    },

    /// New-item draft changed
    DraftChanged {
        /// Draft text
        text: String,
    },

    /// Item entered edit mode
    EditStarted {
        /// Item id
        id: ItemId,
        /// Initial draft name
        draft: String,
    },

    /// Draft name of an item in edit mode changed
    EditDraftChanged {
        /// Item id
        id: ItemId,
        /// Draft name
        text: String,
    },

    /// Item left edit mode without being renamed
    EditEnded {
        /// Item id
        id: ItemId,
    },

    /// Command was rejected
    CommandRejected {
        /// Why
        error: TaskListError,
    },
}
