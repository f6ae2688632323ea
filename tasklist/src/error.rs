//! Rejection reasons for task list commands.

use crate::types::ItemId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a command was rejected
///
/// A rejected command leaves the collection untouched; the reducer records
/// the error in `TaskListState::last_error`.
#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskListError {
    /// No item with this id exists
    #[error("Item {0} not found")]
    ItemNotFound(ItemId),

    /// An item with this id already exists
    #[error("Item {0} already exists")]
    DuplicateId(ItemId),

    /// The name is empty after trimming
    #[error("Item name cannot be empty")]
    EmptyName,

    /// Another item already has this name
    #[error("An item named {0:?} already exists")]
    DuplicateName(String),

    /// The name is longer than the configured maximum
    #[error("Item name too long ({len} characters, max {max})")]
    NameTooLong {
        /// Length of the rejected name in characters
        len: usize,
        /// Configured maximum
        max: usize,
    },

    /// Completed items cannot enter edit mode
    #[error("Item {0} is completed and cannot be edited")]
    NotEditable(ItemId),

    /// The item has no active edit session
    #[error("Item {0} is not being edited")]
    NotEditing(ItemId),
}

impl TaskListError {
    /// Short, stable label used for metrics
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ItemNotFound(_) => "item_not_found",
            Self::DuplicateId(_) => "duplicate_id",
            Self::EmptyName => "empty_name",
            Self::DuplicateName(_) => "duplicate_name",
            Self::NameTooLong { .. } => "name_too_long",
            Self::NotEditable(_) => "not_editable",
            Self::NotEditing(_) => "not_editing",
        }
    }
}
