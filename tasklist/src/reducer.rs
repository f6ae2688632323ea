//! Reducer logic for the task list.
//!
//! Commands are validated against the current state and turned into events;
//! events are applied to state and appended to its event log. A rejected
//! command records a single `CommandRejected` event and leaves the
//! collection as it was.

use crate::edit::EditMode;
use crate::error::TaskListError;
use crate::types::{Item, ItemId, TaskListAction, TaskListEvent, TaskListState};
use crate::validation::NameRules;
use std::sync::Arc;
use tasklist_core::{
    SmallVec,
    effect::Effect,
    environment::{Clock, IdGenerator},
    reducer::Reducer,
    smallvec,
};

/// Environment dependencies for the task list reducer
#[derive(Clone)]
pub struct TaskListEnvironment {
    /// Clock for creation timestamps
    pub clock: Arc<dyn Clock>,
    /// Source of new item ids
    pub ids: Arc<dyn IdGenerator>,
    /// Rules applied to new and changed names
    pub names: NameRules,
}

impl TaskListEnvironment {
    /// Creates a new `TaskListEnvironment` with permissive name rules
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            clock,
            ids,
            names: NameRules::permissive(),
        }
    }

    /// Replace the name rules
    #[must_use]
    pub const fn with_name_rules(mut self, names: NameRules) -> Self {
        self.names = names;
        self
    }
}

impl std::fmt::Debug for TaskListEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskListEnvironment")
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

/// Reducer for the task list
#[derive(Clone, Debug)]
pub struct TaskListReducer;

impl TaskListReducer {
    /// Creates a new `TaskListReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Rebuild a state by applying `events` in order to an empty list
    ///
    /// Events that do not fit the state built so far (a second `ItemAdded`
    /// for the same id, an edit of a completed item, ...) are skipped.
    /// Replaying [`TaskListState::events`] yields a state equal to the one
    /// that recorded them.
    #[must_use]
    pub fn replay<I>(events: I) -> TaskListState
    where
        I: IntoIterator<Item = TaskListEvent>,
    {
        let mut state = TaskListState::new();
        for event in events {
            if let Err(error) = Self::apply_event(&mut state, event) {
                tracing::warn!(%error, "Skipping event during replay");
            }
        }
        state
    }

    fn find(state: &TaskListState, id: ItemId) -> Result<&Item, TaskListError> {
        state.get(id).ok_or(TaskListError::ItemNotFound(id))
    }

    /// Validates a `Rename` command
    fn validate_rename(
        state: &TaskListState,
        id: ItemId,
        name: &str,
        rules: &NameRules,
    ) -> Result<(), TaskListError> {
        Self::find(state, id)?;
        rules.check(name, state.items(), Some(id))
    }

    /// Turns a command into the event it produces, or the reason it is rejected
    ///
    /// Returns `Ok(None)` for commands whose only outcome is an effect.
    fn decide(
        state: &TaskListState,
        command: &TaskListAction,
        env: &TaskListEnvironment,
    ) -> Result<Option<TaskListEvent>, TaskListError> {
        let event = match command {
            TaskListAction::Add { name } => {
                env.names.check(name, state.items(), None)?;
                TaskListEvent::ItemAdded {
                    id: ItemId::from_uuid(env.ids.next_id()),
                    name: name.clone(),
                    created_at: env.clock.now(),
                }
            },
            TaskListAction::Remove { id } => {
                Self::find(state, *id)?;
                TaskListEvent::ItemRemoved { id: *id }
            },
            TaskListAction::ToggleStatus { id } => {
                let item = Self::find(state, *id)?;
                TaskListEvent::StatusToggled {
                    id: *id,
                    status: item.status.toggled(),
                }
            },
            TaskListAction::Rename { id, name } => {
                Self::validate_rename(state, *id, name, &env.names)?;
                TaskListEvent::ItemRenamed {
                    id: *id,
                    name: name.clone(),
                }
            },
            TaskListAction::SetDraft { text } => TaskListEvent::DraftChanged { text: text.clone() },
            TaskListAction::BeginEdit { id } => {
                let item = Self::find(state, *id)?;
                let mode = state.edit_mode(*id).begin(item)?;
                TaskListEvent::EditStarted {
                    id: *id,
                    draft: mode.draft().unwrap_or(item.name.as_str()).to_string(),
                }
            },
            TaskListAction::EditDraft { id, text } => {
                let item = Self::find(state, *id)?;
                state.edit_mode(*id).revise(item, text.clone())?;
                TaskListEvent::EditDraftChanged {
                    id: *id,
                    text: text.clone(),
                }
            },
            TaskListAction::CancelEdit { id } => {
                let item = Self::find(state, *id)?;
                if !state.edit_mode(*id).is_editing() {
                    return Err(TaskListError::NotEditing(item.id));
                }
                TaskListEvent::EditEnded { id: *id }
            },
            TaskListAction::SubmitDraft | TaskListAction::SubmitEdit { .. } => return Ok(None),
        };
        Ok(Some(event))
    }

    /// Applies an event to state and appends it to the event log
    ///
    /// The item invariants are checked again here so that replayed events
    /// cannot break them either: ids stay unique, only in-progress items
    /// enter edit mode, and only items in edit mode change their draft.
    fn apply_event(state: &mut TaskListState, event: TaskListEvent) -> Result<(), TaskListError> {
        match &event {
            TaskListEvent::ItemAdded {
                id,
                name,
                created_at,
            } => {
                if state.exists(*id) {
                    return Err(TaskListError::DuplicateId(*id));
                }
                state.push(Item::new(*id, name.clone(), *created_at));
                state.set_draft(String::new());
                state.set_last_error(None);
            },
            TaskListEvent::ItemRemoved { id } => {
                Self::find(state, *id)?;
                state.remove(*id);
                state.set_last_error(None);
            },
            TaskListEvent::StatusToggled { id, status } => {
                let item = state.get_mut(*id).ok_or(TaskListError::ItemNotFound(*id))?;
                item.status = *status;
                if item.is_completed() {
                    state.end_edit(*id);
                }
                state.set_last_error(None);
            },
            TaskListEvent::ItemRenamed { id, name } => {
                let item = state.get_mut(*id).ok_or(TaskListError::ItemNotFound(*id))?;
                item.name.clone_from(name);
                state.end_edit(*id);
                state.set_last_error(None);
            },
            TaskListEvent::DraftChanged { text } => {
                state.set_draft(text.clone());
                state.set_last_error(None);
            },
            TaskListEvent::EditStarted { id, draft } => {
                let item = Self::find(state, *id)?;
                if item.is_completed() {
                    return Err(TaskListError::NotEditable(*id));
                }
                state.set_edit_draft(*id, draft.clone());
                state.set_last_error(None);
            },
            TaskListEvent::EditDraftChanged { id, text } => {
                Self::find(state, *id)?;
                if !state.edit_mode(*id).is_editing() {
                    return Err(TaskListError::NotEditing(*id));
                }
                state.set_edit_draft(*id, text.clone());
                state.set_last_error(None);
            },
            TaskListEvent::EditEnded { id } => {
                state.end_edit(*id);
                state.set_last_error(None);
            },
            TaskListEvent::CommandRejected { error } => {
                state.set_last_error(Some(error.clone()));
            },
        }
        state.record(event);
        Ok(())
    }

    fn reject(state: &mut TaskListState, error: TaskListError) {
        tracing::warn!(%error, "Command rejected");
        metrics::counter!("tasklist.commands.rejected", "reason" => error.kind()).increment(1);
        state.set_last_error(Some(error.clone()));
        state.record(TaskListEvent::CommandRejected { error });
    }
}

impl Default for TaskListReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl Reducer for TaskListReducer {
    type State = TaskListState;
    type Action = TaskListAction;
    type Environment = TaskListEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ========== Effect-only commands ==========
            TaskListAction::SubmitDraft => {
                let name = state.draft().to_string();
                tracing::debug!(%name, "Submitting new-item draft");
                smallvec![Effect::dispatch(TaskListAction::Add { name })]
            },

            TaskListAction::SubmitEdit { id } => {
                let draft = Self::find(state, id)
                    .and_then(|item| state.edit_mode(id).submit(item));
                match draft {
                    Ok(name) => {
                        tracing::debug!(%id, %name, "Submitting edit");
                        smallvec![Effect::dispatch(TaskListAction::Rename { id, name })]
                    },
                    Err(error) => {
                        Self::reject(state, error);
                        SmallVec::new()
                    },
                }
            },

            // ========== Commands producing events ==========
            command => {
                let outcome = Self::decide(state, &command, env).and_then(|event| match event {
                    Some(event) => {
                        tracing::debug!(?event, "Command accepted");
                        Self::apply_event(state, event)
                    },
                    None => Ok(()),
                });
                if let Err(error) = outcome {
                    Self::reject(state, error);
                }
                SmallVec::new()
            },
        }
    }
}

/// Convenience check used by views: can this item enter edit mode?
#[must_use]
pub fn can_edit(state: &TaskListState, id: ItemId) -> bool {
    state
        .get(id)
        .is_some_and(|item| EditMode::Viewing.begin(item).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;
    use chrono::Utc;
    use tasklist_testing::{ReducerTest, SequentialIds, assertions, test_clock};
    use uuid::Uuid;

    fn create_test_env() -> TaskListEnvironment {
        TaskListEnvironment::new(Arc::new(test_clock()), Arc::new(SequentialIds::new()))
    }

    fn strict_env() -> TaskListEnvironment {
        create_test_env().with_name_rules(NameRules::strict(20))
    }

    fn id(n: u128) -> ItemId {
        ItemId::from_uuid(Uuid::from_u128(n))
    }

    fn state_with(names: &[&str]) -> TaskListState {
        let items = names
            .iter()
            .zip(1..)
            .map(|(name, n)| Item::new(id(n), (*name).to_string(), Utc::now()))
            .collect();
        TaskListState::from_items(items)
    }

    fn names(state: &TaskListState) -> Vec<&str> {
        state.items().iter().map(|item| item.name.as_str()).collect()
    }

    #[test]
    fn test_add_appends_in_progress_item() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&["a"]))
            .when_action(TaskListAction::Add {
                name: "buy milk".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.count(), 2);
                let item = &state.items()[1];
                assert_eq!(item.id, id(1));
                assert_eq!(item.name, "buy milk");
                assert_eq!(item.status, Status::InProgress);
                assert_eq!(item.created_at, test_clock().now());
                assert!(state.last_error().is_none());
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_add_clears_draft() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(TaskListState::new())
            .when_action(TaskListAction::SetDraft {
                text: "walk dog".to_string(),
            })
            .when_action(TaskListAction::Add {
                name: "walk dog".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.draft(), "");
                assert_eq!(names(state), vec!["walk dog"]);
            })
            .run();
    }

    #[test]
    fn test_permissive_add_accepts_empty_and_duplicate_names() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&["a"]))
            .when_actions([
                TaskListAction::Add {
                    name: String::new(),
                },
                TaskListAction::Add {
                    name: "a".to_string(),
                },
            ])
            .then_state(|state| {
                assert_eq!(names(state), vec!["a", "", "a"]);
                assert!(state.last_error().is_none());
            })
            .run();
    }

    #[test]
    fn test_strict_add_rejects_duplicate() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(strict_env())
            .given_state(state_with(&["a"]))
            .when_action(TaskListAction::Add {
                name: "a".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.count(), 1);
                assert_eq!(
                    state.last_error(),
                    Some(&TaskListError::DuplicateName("a".to_string()))
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_strict_add_rejects_blank_name_and_keeps_draft() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(strict_env())
            .given_state(TaskListState::new())
            .when_actions([
                TaskListAction::SetDraft {
                    text: "   ".to_string(),
                },
                TaskListAction::Add {
                    name: "   ".to_string(),
                },
            ])
            .then_state(|state| {
                assert_eq!(state.count(), 0);
                assert_eq!(state.draft(), "   ");
                assert_eq!(state.last_error(), Some(&TaskListError::EmptyName));
            })
            .run();
    }

    #[test]
    fn test_remove_removes_only_the_target() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&["a", "a", "b"]))
            .when_action(TaskListAction::Remove { id: id(1) })
            .then_state(|state| {
                assert_eq!(names(state), vec!["a", "b"]);
                assert!(!state.exists(id(1)));
                assert!(state.exists(id(2)));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_remove_unknown_item() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&["a"]))
            .when_action(TaskListAction::Remove { id: id(9) })
            .then_state(|state| {
                assert_eq!(state.count(), 1);
                assert_eq!(state.last_error(), Some(&TaskListError::ItemNotFound(id(9))));
            })
            .run();
    }

    #[test]
    fn test_toggle_flips_only_the_target() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&["a", "a"]))
            .when_action(TaskListAction::ToggleStatus { id: id(2) })
            .then_state(|state| {
                assert_eq!(state.get(id(1)).unwrap().status, Status::InProgress);
                assert_eq!(state.get(id(2)).unwrap().status, Status::Completed);
            })
            .run();
    }

    #[test]
    fn test_toggle_twice_restores_status() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&["a"]))
            .when_actions([
                TaskListAction::ToggleStatus { id: id(1) },
                TaskListAction::ToggleStatus { id: id(1) },
            ])
            .then_state(|state| {
                assert_eq!(state.get(id(1)).unwrap().status, Status::InProgress);
            })
            .run();
    }

    #[test]
    fn test_completing_ends_edit_session() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&["a"]))
            .when_actions([
                TaskListAction::BeginEdit { id: id(1) },
                TaskListAction::ToggleStatus { id: id(1) },
            ])
            .then_state(|state| {
                assert_eq!(state.edit_mode(id(1)), EditMode::Viewing);
                assert!(!can_edit(state, id(1)));
            })
            .run();
    }

    #[test]
    fn test_rename_keeps_status_and_position() {
        let mut given = state_with(&["a", "b", "c"]);
        given.get_mut(id(2)).unwrap().status = Status::Completed;

        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(given)
            .when_action(TaskListAction::Rename {
                id: id(2),
                name: "B".to_string(),
            })
            .then_state(|state| {
                assert_eq!(names(state), vec!["a", "B", "c"]);
                assert_eq!(state.get(id(2)).unwrap().status, Status::Completed);
            })
            .run();
    }

    #[test]
    fn test_strict_rename_to_own_name_is_accepted() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(strict_env())
            .given_state(state_with(&["a", "b"]))
            .when_action(TaskListAction::Rename {
                id: id(1),
                name: "a".to_string(),
            })
            .then_state(|state| assert!(state.last_error().is_none()))
            .run();
    }

    #[test]
    fn test_strict_rename_rejects_taken_name() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(strict_env())
            .given_state(state_with(&["a", "b"]))
            .when_action(TaskListAction::Rename {
                id: id(1),
                name: "b".to_string(),
            })
            .then_state(|state| {
                assert_eq!(names(state), vec!["a", "b"]);
                assert_eq!(
                    state.last_error(),
                    Some(&TaskListError::DuplicateName("b".to_string()))
                );
            })
            .run();
    }

    #[test]
    fn test_submit_draft_dispatches_add() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(TaskListState::new())
            .when_actions([
                TaskListAction::SetDraft {
                    text: "buy milk".to_string(),
                },
                TaskListAction::SubmitDraft,
            ])
            .then_state(|state| {
                assert_eq!(state.count(), 0);
                assert_eq!(state.draft(), "buy milk");
            })
            .then_effects(|effects| {
                assertions::assert_dispatches(
                    effects,
                    &[TaskListAction::Add {
                        name: "buy milk".to_string(),
                    }],
                );
            })
            .run();
    }

    #[test]
    fn test_begin_edit_seeds_draft() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&["a"]))
            .when_action(TaskListAction::BeginEdit { id: id(1) })
            .then_state(|state| {
                assert_eq!(
                    state.edit_mode(id(1)),
                    EditMode::Editing {
                        draft: "a".to_string()
                    }
                );
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_begin_edit_on_completed_item_is_rejected() {
        let mut given = state_with(&["a"]);
        given.get_mut(id(1)).unwrap().status = Status::Completed;

        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(given)
            .when_action(TaskListAction::BeginEdit { id: id(1) })
            .then_state(|state| {
                assert_eq!(state.editing_count(), 0);
                assert_eq!(state.last_error(), Some(&TaskListError::NotEditable(id(1))));
            })
            .run();
    }

    #[test]
    fn test_submit_edit_dispatches_rename_with_draft() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&["a"]))
            .when_actions([
                TaskListAction::BeginEdit { id: id(1) },
                TaskListAction::EditDraft {
                    id: id(1),
                    text: "a2".to_string(),
                },
                TaskListAction::SubmitEdit { id: id(1) },
            ])
            .then_state(|state| {
                // Still editing until the dispatched rename is reduced
                assert!(state.edit_mode(id(1)).is_editing());
            })
            .then_effects(|effects| {
                assertions::assert_dispatches(
                    effects,
                    &[TaskListAction::Rename {
                        id: id(1),
                        name: "a2".to_string(),
                    }],
                );
            })
            .run();
    }

    #[test]
    fn test_rename_ends_edit_session() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&["a"]))
            .when_actions([
                TaskListAction::BeginEdit { id: id(1) },
                TaskListAction::Rename {
                    id: id(1),
                    name: "a2".to_string(),
                },
            ])
            .then_state(|state| {
                assert_eq!(state.edit_mode(id(1)), EditMode::Viewing);
                assert_eq!(names(state), vec!["a2"]);
            })
            .run();
    }

    #[test]
    fn test_edit_commands_outside_edit_mode_are_rejected() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&["a"]))
            .when_action(TaskListAction::SubmitEdit { id: id(1) })
            .then_state(|state| {
                assert_eq!(state.last_error(), Some(&TaskListError::NotEditing(id(1))));
            })
            .then_effects(assertions::assert_no_effects)
            .run();

        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&["a"]))
            .when_action(TaskListAction::CancelEdit { id: id(1) })
            .then_state(|state| {
                assert_eq!(state.last_error(), Some(&TaskListError::NotEditing(id(1))));
            })
            .run();
    }

    #[test]
    fn test_cancel_edit_discards_draft() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&["a"]))
            .when_actions([
                TaskListAction::BeginEdit { id: id(1) },
                TaskListAction::EditDraft {
                    id: id(1),
                    text: "zzz".to_string(),
                },
                TaskListAction::CancelEdit { id: id(1) },
            ])
            .then_state(|state| {
                assert_eq!(state.edit_mode(id(1)), EditMode::Viewing);
                assert_eq!(names(state), vec!["a"]);
            })
            .run();
    }

    #[test]
    fn test_accepted_command_clears_last_error() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(state_with(&["a"]))
            .when_actions([
                TaskListAction::Remove { id: id(5) },
                TaskListAction::ToggleStatus { id: id(1) },
            ])
            .then_state(|state| assert!(state.last_error().is_none()))
            .run();
    }

    #[test]
    fn test_replay_rebuilds_state() {
        let created_at = test_clock().now();
        let events = vec![
            TaskListEvent::ItemAdded {
                id: id(1),
                name: "a".to_string(),
                created_at,
            },
            TaskListEvent::ItemAdded {
                id: id(2),
                name: "b".to_string(),
                created_at,
            },
            TaskListEvent::StatusToggled {
                id: id(1),
                status: Status::Completed,
            },
            TaskListEvent::ItemRenamed {
                id: id(2),
                name: "c".to_string(),
            },
            TaskListEvent::ItemRemoved { id: id(1) },
        ];

        let state = TaskListReducer::replay(events.clone());

        assert_eq!(names(&state), vec!["c"]);
        assert_eq!(state.items()[0].id, id(2));
        assert_eq!(state.events(), events.as_slice());
    }

    #[test]
    fn test_event_log_replays_to_equal_state() {
        let mut state = TaskListState::new();
        let env = strict_env();
        let reducer = TaskListReducer::new();
        for action in [
            TaskListAction::Add {
                name: "a".to_string(),
            },
            TaskListAction::Add {
                name: "a".to_string(),
            },
            TaskListAction::Add {
                name: "b".to_string(),
            },
            TaskListAction::BeginEdit { id: id(2) },
            TaskListAction::EditDraft {
                id: id(2),
                text: "b2".to_string(),
            },
            TaskListAction::ToggleStatus { id: id(1) },
            TaskListAction::Remove { id: id(7) },
        ] {
            let _ = reducer.reduce(&mut state, action, &env);
        }

        assert_eq!(state.events().len(), 7);
        assert_eq!(TaskListReducer::replay(state.events().to_vec()), state);
    }

    #[test]
    fn test_replay_keeps_item_ids_unique() {
        let created_at = test_clock().now();
        let state = TaskListReducer::replay([
            TaskListEvent::ItemAdded {
                id: id(1),
                name: "a".to_string(),
                created_at,
            },
            TaskListEvent::ItemAdded {
                id: id(1),
                name: "b".to_string(),
                created_at,
            },
            TaskListEvent::StatusToggled {
                id: id(1),
                status: Status::Completed,
            },
        ]);

        assert_eq!(names(&state), vec!["a"]);
        assert_eq!(state.completed_count(), 1);
        assert_eq!(state.events().len(), 2);
    }

    #[test]
    fn test_replay_never_edits_completed_items() {
        let created_at = test_clock().now();
        let state = TaskListReducer::replay([
            TaskListEvent::ItemAdded {
                id: id(1),
                name: "a".to_string(),
                created_at,
            },
            TaskListEvent::StatusToggled {
                id: id(1),
                status: Status::Completed,
            },
            TaskListEvent::EditStarted {
                id: id(1),
                draft: "x".to_string(),
            },
            TaskListEvent::EditDraftChanged {
                id: id(1),
                text: "y".to_string(),
            },
        ]);

        assert_eq!(state.edit_mode(id(1)), EditMode::Viewing);
        assert_eq!(state.get(id(1)).unwrap().status, Status::Completed);
    }

    #[test]
    fn test_rejected_submit_edit_on_completed_item() {
        let mut given = state_with(&["a"]);
        given.get_mut(id(1)).unwrap().status = Status::Completed;

        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(given)
            .when_actions([
                TaskListAction::BeginEdit { id: id(1) },
                TaskListAction::SubmitEdit { id: id(1) },
            ])
            .then_state(|state| {
                assert_eq!(names(state), vec!["a"]);
                assert_eq!(state.last_error(), Some(&TaskListError::NotEditing(id(1))));
            })
            .then_effects(assertions::assert_no_effects)
            .run();
    }

    #[test]
    fn test_rejections_are_logged_as_events() {
        ReducerTest::new(TaskListReducer::new())
            .with_env(create_test_env())
            .given_state(TaskListState::new())
            .when_action(TaskListAction::Remove { id: id(3) })
            .then_state(|state| {
                assert_eq!(
                    state.events(),
                    &[TaskListEvent::CommandRejected {
                        error: TaskListError::ItemNotFound(id(3))
                    }]
                );
            })
            .run();
    }
}
