//! Region visibility policy.
//!
//! # Responsibility
//! - Derive which regions are shown from state alone.
//!
//! # Invariants
//! - Add form, edit modal and delete modal are mutually exclusive.
//! - The empty-state message only shows with no notes and no operation.

use crate::state::{AppState, Operation};
use serde::Serialize;

/// Visibility of every toggled region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegionVisibility {
    pub empty_info: bool,
    pub add_button: bool,
    pub add_form: bool,
    pub edit_modal: bool,
    pub delete_modal: bool,
    pub modals_container: bool,
}

impl RegionVisibility {
    /// Pure function of state to region visibility.
    pub fn derive(state: &AppState) -> Self {
        let is_empty = state.notes.is_empty();
        let (add_form, edit_modal, delete_modal) = match state.operation {
            Operation::Idle => (false, false, false),
            Operation::Adding => (true, false, false),
            Operation::Editing(_) => (false, true, false),
            Operation::ConfirmingDelete(_) => (false, false, true),
        };
        Self {
            empty_info: is_empty && state.operation.is_idle(),
            add_button: !is_empty && !add_form,
            add_form,
            edit_modal,
            delete_modal,
            modals_container: edit_modal || delete_modal,
        }
    }
}
