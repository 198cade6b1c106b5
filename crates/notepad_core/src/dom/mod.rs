//! DOM contract consumed by the app controller.
//!
//! # Responsibility
//! - Name the logical roles and actions the widget expects under its root.
//! - Abstract the document behind the `Dom` trait so the controller only
//!   consumes node handles and emits visibility toggles and child lists.
//!
//! # Invariants
//! - Roles and actions are exposed as `data-role` / `data-action` attributes.
//! - Visibility is expressed by the `is-hidden` class only.

mod memory;
mod selector;

pub use memory::MemoryDom;
pub use selector::Selector;

use crate::element::note_element::NoteMarkup;

/// Attribute carrying a role label.
pub const ROLE_ATTRIBUTE: &str = "data-role";
/// Attribute carrying an action label.
pub const ACTION_ATTRIBUTE: &str = "data-action";
/// Class toggled to hide a region.
pub const HIDDEN_CLASS: &str = "is-hidden";

/// Opaque handle to one document node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u64);

impl NodeId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Logical role of a region or field under the widget root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    AddButton,
    AddNoteForm,
    NewNoteTitle,
    NewNoteContent,
    EditNoteTitle,
    EditNoteContent,
    NotesContainer,
    InfoNotesEmpty,
    EditModal,
    DeleteModal,
    ModalsContainer,
    SearchInput,
}

impl Role {
    /// Every role the controller resolves at startup.
    pub const ALL: [Role; 12] = [
        Role::AddButton,
        Role::AddNoteForm,
        Role::NewNoteTitle,
        Role::NewNoteContent,
        Role::EditNoteTitle,
        Role::EditNoteContent,
        Role::NotesContainer,
        Role::InfoNotesEmpty,
        Role::EditModal,
        Role::DeleteModal,
        Role::ModalsContainer,
        Role::SearchInput,
    ];

    /// Stable label used as `data-role` value.
    pub fn label(self) -> &'static str {
        match self {
            Self::AddButton => "add-note",
            Self::AddNoteForm => "add-note-form",
            Self::NewNoteTitle => "new-note-title",
            Self::NewNoteContent => "new-note-content",
            Self::EditNoteTitle => "edit-note-title",
            Self::EditNoteContent => "edit-note-content",
            Self::NotesContainer => "notes-container",
            Self::InfoNotesEmpty => "info-notes-empty",
            Self::EditModal => "edit-modal",
            Self::DeleteModal => "delete-modal",
            Self::ModalsContainer => "modals-container",
            Self::SearchInput => "search-input",
        }
    }
}

/// User action bound to one or more controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    AddNewNote,
    CancelNewNote,
    SubmitNewNote,
    HideModals,
    ConfirmEditNote,
    ConfirmDeleteNote,
    SearchNotes,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::AddNewNote,
        Action::CancelNewNote,
        Action::SubmitNewNote,
        Action::HideModals,
        Action::ConfirmEditNote,
        Action::ConfirmDeleteNote,
        Action::SearchNotes,
    ];

    /// Stable label used as `data-action` value.
    pub fn label(self) -> &'static str {
        match self {
            Self::AddNewNote => "add-new-note",
            Self::CancelNewNote => "cancel-new-note",
            Self::SubmitNewNote => "submit-new-note",
            Self::HideModals => "hide-modals",
            Self::ConfirmEditNote => "confirm-edit-note",
            Self::ConfirmDeleteNote => "confirm-delete-note",
            Self::SearchNotes => "search-notes",
        }
    }
}

/// Document operations the controller depends on.
///
/// Implementations must be lenient: operations on unknown nodes are no-ops
/// and reads on unknown nodes return empty values.
pub trait Dom {
    /// First node in document order matching `selector`.
    fn query_selector(&self, selector: &str) -> Option<NodeId>;
    /// First descendant of `root` carrying `role`.
    fn query_role(&self, root: NodeId, role: Role) -> Option<NodeId>;
    /// All descendants of `root` bound to `action`, in document order.
    fn query_actions(&self, root: NodeId, action: Action) -> Vec<NodeId>;
    fn set_visible(&mut self, node: NodeId, visible: bool);
    fn is_visible(&self, node: NodeId) -> bool;
    /// Detaches every child of `container` and inserts `children` in order.
    fn replace_children(&mut self, container: NodeId, children: Vec<NoteMarkup>);
    fn input_value(&self, node: NodeId) -> String;
    fn set_input_value(&mut self, node: NodeId, value: &str);
    /// Blocking user-facing message.
    fn alert(&mut self, message: &str);
    /// Visible, non-fatal notification.
    fn notify(&mut self, message: &str);
}

impl<T: Dom + ?Sized> Dom for &mut T {
    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        (**self).query_selector(selector)
    }

    fn query_role(&self, root: NodeId, role: Role) -> Option<NodeId> {
        (**self).query_role(root, role)
    }

    fn query_actions(&self, root: NodeId, action: Action) -> Vec<NodeId> {
        (**self).query_actions(root, action)
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        (**self).set_visible(node, visible)
    }

    fn is_visible(&self, node: NodeId) -> bool {
        (**self).is_visible(node)
    }

    fn replace_children(&mut self, container: NodeId, children: Vec<NoteMarkup>) {
        (**self).replace_children(container, children)
    }

    fn input_value(&self, node: NodeId) -> String {
        (**self).input_value(node)
    }

    fn set_input_value(&mut self, node: NodeId, value: &str) {
        (**self).set_input_value(node, value)
    }

    fn alert(&mut self, message: &str) {
        (**self).alert(message)
    }

    fn notify(&mut self, message: &str) {
        (**self).notify(message)
    }
}
