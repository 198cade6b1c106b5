//! Startup resolution of the widget's DOM targets.

use super::error::AppError;
use crate::dom::{Action, Dom, NodeId, Role};
use std::collections::HashMap;

/// Resolved role nodes under the widget root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elements {
    pub root: NodeId,
    pub add_button: NodeId,
    pub add_note_form: NodeId,
    pub new_note_title: NodeId,
    pub new_note_content: NodeId,
    pub edit_note_title: NodeId,
    pub edit_note_content: NodeId,
    pub notes_container: NodeId,
    pub info_notes_empty: NodeId,
    pub edit_modal: NodeId,
    pub delete_modal: NodeId,
    pub modals_container: NodeId,
    pub search_input: NodeId,
}

impl Elements {
    /// Locates the root and every role below it.
    pub fn resolve(dom: &impl Dom, root_selector: &str) -> Result<Self, AppError> {
        let root = dom
            .query_selector(root_selector)
            .ok_or_else(|| AppError::MissingElement(format!("root `{root_selector}`")))?;
        let lookup = |role: Role| {
            dom.query_role(root, role)
                .ok_or_else(|| AppError::MissingElement(format!("role `{}`", role.label())))
        };
        Ok(Self {
            root,
            add_button: lookup(Role::AddButton)?,
            add_note_form: lookup(Role::AddNoteForm)?,
            new_note_title: lookup(Role::NewNoteTitle)?,
            new_note_content: lookup(Role::NewNoteContent)?,
            edit_note_title: lookup(Role::EditNoteTitle)?,
            edit_note_content: lookup(Role::EditNoteContent)?,
            notes_container: lookup(Role::NotesContainer)?,
            info_notes_empty: lookup(Role::InfoNotesEmpty)?,
            edit_modal: lookup(Role::EditModal)?,
            delete_modal: lookup(Role::DeleteModal)?,
            modals_container: lookup(Role::ModalsContainer)?,
            search_input: lookup(Role::SearchInput)?,
        })
    }
}

/// Maps every action control to its action.
///
/// Each action needs at least one control.
pub fn bind_actions(dom: &impl Dom, root: NodeId) -> Result<HashMap<NodeId, Action>, AppError> {
    let mut bindings = HashMap::new();
    for action in Action::ALL {
        let nodes = dom.query_actions(root, action);
        if nodes.is_empty() {
            return Err(AppError::MissingElement(format!(
                "action `{}`",
                action.label()
            )));
        }
        for node in nodes {
            bindings.insert(node, action);
        }
    }
    Ok(bindings)
}
