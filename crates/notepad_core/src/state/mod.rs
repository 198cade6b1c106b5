//! Application state and its explicit transitions.
//!
//! # Responsibility
//! - Hold the ordered notes list and the single active operation.
//! - Express every mutation as a `Patch` applied by a pure update function.
//!
//! # Invariants
//! - At most one of {add, edit target, delete target} is active, enforced by
//!   `Operation` being a single enum.
//! - Edit/delete targets are identifiers; a target whose note is gone simply
//!   fails lookup.
//! - Notes keep insertion order.

mod filter;
mod store;

pub use filter::filter_notes;
pub use store::Store;

use crate::model::note::{Note, NoteId};
use serde::Serialize;

/// Currently active form or modal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "note_id", rename_all = "snake_case")]
pub enum Operation {
    #[default]
    Idle,
    Adding,
    Editing(NoteId),
    ConfirmingDelete(NoteId),
}

impl Operation {
    pub fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Canonical widget state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppState {
    pub notes: Vec<Note>,
    pub operation: Operation,
    /// Active search term; empty shows every note.
    pub search_term: String,
}

/// One described state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch {
    SetOperation(Operation),
    AppendNote(Note),
    /// Replaces title/content of the matching note; unknown ids are ignored.
    UpdateNote {
        id: NoteId,
        title: String,
        content: String,
    },
    /// Removes the matching note; unknown ids are ignored.
    RemoveNote(NoteId),
    SetSearchTerm(String),
}

/// Result of applying patches: the next state plus a render instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: AppState,
    /// Whether the caller must run a render pass.
    pub render: bool,
}

impl AppState {
    /// Looks up one note by identifier.
    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.note(id).is_some()
    }

    /// Notes matching the active search term, in insertion order.
    pub fn visible_notes(&self) -> Vec<&Note> {
        filter_notes(&self.notes, &self.search_term)
    }

    /// Applies `patches` in order and returns the next state.
    ///
    /// Every non-empty patch list requests a render; whether anything
    /// actually changed does not gate rendering.
    pub fn apply(&self, patches: &[Patch]) -> Transition {
        let mut state = self.clone();
        for patch in patches {
            state.apply_one(patch);
        }
        Transition {
            state,
            render: !patches.is_empty(),
        }
    }

    fn apply_one(&mut self, patch: &Patch) {
        match patch {
            Patch::SetOperation(operation) => self.operation = *operation,
            Patch::AppendNote(note) => self.notes.push(note.clone()),
            Patch::UpdateNote { id, title, content } => {
                if let Some(note) = self.notes.iter_mut().find(|note| note.id == *id) {
                    note.title = title.clone();
                    note.content = content.clone();
                }
            }
            Patch::RemoveNote(id) => self.notes.retain(|note| note.id != *id),
            Patch::SetSearchTerm(term) => self.search_term = term.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppState, Operation, Patch};
    use crate::model::note::Note;
    use chrono::Utc;
    use uuid::Uuid;

    fn note(title: &str) -> Note {
        Note::new(title, "body", Utc::now()).unwrap()
    }

    #[test]
    fn apply_is_pure_and_requests_render() {
        let state = AppState::default();
        let first = note("a");
        let transition = state.apply(&[
            Patch::AppendNote(first.clone()),
            Patch::SetOperation(Operation::Adding),
        ]);

        assert!(state.notes.is_empty());
        assert!(transition.render);
        assert_eq!(transition.state.notes, vec![first]);
        assert_eq!(transition.state.operation, Operation::Adding);
    }

    #[test]
    fn empty_patch_list_does_not_render() {
        let transition = AppState::default().apply(&[]);
        assert!(!transition.render);
    }

    #[test]
    fn remove_and_update_of_unknown_id_leave_notes_unchanged() {
        let state = AppState::default()
            .apply(&[Patch::AppendNote(note("a"))])
            .state;
        let missing = Uuid::new_v4();
        let next = state
            .apply(&[
                Patch::RemoveNote(missing),
                Patch::UpdateNote {
                    id: missing,
                    title: "x".into(),
                    content: "y".into(),
                },
            ])
            .state;
        assert_eq!(next.notes, state.notes);
    }

    #[test]
    fn operation_serializes_as_kind_with_optional_note_id() {
        let id = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
        assert_eq!(
            serde_json::to_value(Operation::Idle).unwrap(),
            serde_json::json!({ "kind": "idle" })
        );
        assert_eq!(
            serde_json::to_value(Operation::ConfirmingDelete(id)).unwrap(),
            serde_json::json!({
                "kind": "confirming_delete",
                "note_id": "11111111-2222-4333-8444-555555555555"
            })
        );
        assert!(Operation::default().is_idle());
    }

    #[test]
    fn state_snapshot_exposes_notes_and_operation() {
        let state = AppState::default()
            .apply(&[
                Patch::AppendNote(note("a")),
                Patch::SetOperation(Operation::Adding),
                Patch::SetSearchTerm("a".into()),
            ])
            .state;
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["notes"][0]["title"], "a");
        assert_eq!(json["notes"][0]["content"], "body");
        assert_eq!(json["operation"]["kind"], "adding");
        assert_eq!(json["search_term"], "a");
    }
}
