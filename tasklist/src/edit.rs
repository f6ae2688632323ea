//! Per-item edit mode.
//!
//! An item is either being viewed or being edited with a draft name. Only
//! in-progress items may enter edit mode, and the draft starts out as the
//! item's current name. Edit mode ends when the rename it submits is
//! accepted, when it is cancelled, or when the item is completed or removed.

use crate::error::TaskListError;
use crate::types::Item;

/// Edit mode of one item
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
    /// Showing the name
    #[default]
    Viewing,
    /// Revising the name
    Editing {
        /// Name that a submit would commit
        draft: String,
    },
}

impl EditMode {
    /// Enter edit mode for `item`
    ///
    /// An item already in edit mode keeps its draft.
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::NotEditable`] if `item` is completed.
    pub fn begin(self, item: &Item) -> Result<Self, TaskListError> {
        if item.is_completed() {
            return Err(TaskListError::NotEditable(item.id));
        }
        Ok(match self {
            Self::Viewing => Self::Editing {
                draft: item.name.clone(),
            },
            editing @ Self::Editing { .. } => editing,
        })
    }

    /// Replace the draft
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::NotEditing`] unless in edit mode.
    pub fn revise(self, item: &Item, text: String) -> Result<Self, TaskListError> {
        match self {
            Self::Viewing => Err(TaskListError::NotEditing(item.id)),
            Self::Editing { .. } => Ok(Self::Editing { draft: text }),
        }
    }

    /// The name a submit would commit
    ///
    /// # Errors
    ///
    /// Returns [`TaskListError::NotEditing`] unless in edit mode.
    pub fn submit(self, item: &Item) -> Result<String, TaskListError> {
        match self {
            Self::Viewing => Err(TaskListError::NotEditing(item.id)),
            Self::Editing { draft } => Ok(draft),
        }
    }

    /// Whether the item is in edit mode
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self, Self::Editing { .. })
    }

    /// Current draft, if editing
    #[must_use]
    pub fn draft(&self) -> Option<&str> {
        match self {
            Self::Viewing => None,
            Self::Editing { draft } => Some(draft),
        }
    }
}
