//! State holder with previous-snapshot change detection.

use super::{AppState, Patch, Transition};
use log::debug;

/// Owns the current state and the snapshot taken after the last render.
#[derive(Debug, Clone, Default)]
pub struct Store {
    current: AppState,
    previous: AppState,
}

impl Store {
    pub fn new(initial: AppState) -> Self {
        Self {
            previous: initial.clone(),
            current: initial,
        }
    }

    pub fn current(&self) -> &AppState {
        &self.current
    }

    /// Applies `patches` and commits the resulting state.
    ///
    /// Returns whether the caller must render.
    pub fn commit(&mut self, patches: &[Patch]) -> bool {
        let Transition { state, render } = self.current.apply(patches);
        self.current = state;
        debug!(
            "event=store_commit module=state status=ok patches={} render={} notes={} operation={:?}",
            patches.len(),
            render,
            self.current.notes.len(),
            self.current.operation
        );
        render
    }

    /// Copies the current state into the previous snapshot.
    pub fn snapshot(&mut self) {
        self.previous = self.current.clone();
    }

    /// Whether the notes list differs from the previous snapshot.
    pub fn notes_changed(&self) -> bool {
        self.previous.notes != self.current.notes
    }
}

#[cfg(test)]
mod tests {
    use super::Store;
    use crate::model::note::Note;
    use crate::state::{AppState, Operation, Patch};
    use chrono::Utc;

    #[test]
    fn change_detection_compares_against_snapshot() {
        let mut store = Store::new(AppState::default());
        assert!(!store.notes_changed());

        let note = Note::new("a", "b", Utc::now()).unwrap();
        assert!(store.commit(&[Patch::AppendNote(note)]));
        assert!(store.notes_changed());

        store.snapshot();
        assert!(!store.notes_changed());

        assert!(store.commit(&[Patch::SetOperation(Operation::Adding)]));
        assert!(!store.notes_changed());
        assert!(!store.commit(&[]));
    }
}
