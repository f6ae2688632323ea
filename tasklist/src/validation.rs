//! Name rules applied by `Add` and `Rename`.

use crate::error::TaskListError;
use crate::types::{Item, ItemId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which names the list accepts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamePolicy {
    /// Any name, including empty and duplicate ones
    #[default]
    Permissive,
    /// Non-blank, unique names no longer than the configured maximum
    Strict,
}

impl FromStr for NamePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "permissive" | "lenient" => Ok(Self::Permissive),
            "strict" => Ok(Self::Strict),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for NamePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permissive => write!(f, "permissive"),
            Self::Strict => write!(f, "strict"),
        }
    }
}

/// A [`NamePolicy`] plus its limits
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NameRules {
    /// Active policy
    pub policy: NamePolicy,
    /// Longest accepted name in characters (strict policy only)
    pub max_length: usize,
}

impl NameRules {
    /// Default maximum name length
    pub const DEFAULT_MAX_LENGTH: usize = 500;

    /// Accept every name
    #[must_use]
    pub const fn permissive() -> Self {
        Self {
            policy: NamePolicy::Permissive,
            max_length: Self::DEFAULT_MAX_LENGTH,
        }
    }

    /// Reject blank, duplicate and over-long names
    #[must_use]
    pub const fn strict(max_length: usize) -> Self {
        Self {
            policy: NamePolicy::Strict,
            max_length,
        }
    }

    /// Check `name` for an item joining (or, with `renaming`, staying in) `items`
    ///
    /// Names are compared with surrounding whitespace trimmed. The item
    /// being renamed is ignored by the duplicate check, so keeping the
    /// current name is always accepted.
    ///
    /// # Errors
    ///
    /// Under the strict policy: [`TaskListError::EmptyName`],
    /// [`TaskListError::NameTooLong`] or [`TaskListError::DuplicateName`].
    pub fn check(
        &self,
        name: &str,
        items: &[Item],
        renaming: Option<ItemId>,
    ) -> Result<(), TaskListError> {
        if self.policy == NamePolicy::Permissive {
            return Ok(());
        }

        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TaskListError::EmptyName);
        }

        let len = name.chars().count();
        if len > self.max_length {
            return Err(TaskListError::NameTooLong {
                len,
                max: self.max_length,
            });
        }

        // Surrounding whitespace does not make a name distinct
        let taken = items
            .iter()
            .any(|item| Some(item.id) != renaming && item.name.trim() == trimmed);
        if taken {
            return Err(TaskListError::DuplicateName(trimmed.to_string()));
        }

        Ok(())
    }
}

impl Default for NameRules {
    fn default() -> Self {
        Self::permissive()
    }
}
