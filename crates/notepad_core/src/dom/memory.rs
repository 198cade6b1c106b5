//! Arena-backed in-memory document.
//!
//! # Responsibility
//! - Provide a `Dom` implementation usable without a browser (tests, CLI).
//! - Build the canonical notes page layout with every role and action.
//! - Record alerts and notifications so callers can inspect user feedback.
//!
//! # Invariants
//! - Node 0 is the document root and is never detached.
//! - Detached nodes keep their id but are unreachable from queries.

use super::{Action, Dom, NodeId, Role, Selector, ACTION_ATTRIBUTE, HIDDEN_CLASS, ROLE_ATTRIBUTE};
use crate::element::note_element::NoteMarkup;
use log::warn;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    text: String,
    value: String,
    parent: Option<usize>,
    children: Vec<usize>,
    mounted: Vec<NoteMarkup>,
}

/// In-memory document implementing [`Dom`].
#[derive(Debug, Clone)]
pub struct MemoryDom {
    nodes: Vec<Node>,
    alerts: Vec<String>,
    notifications: Vec<String>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Creates an empty document holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                tag: "body".to_string(),
                ..Node::default()
            }],
            alerts: Vec::new(),
            notifications: Vec::new(),
        }
    }

    /// Builds the canonical notes page rooted at `#app`.
    pub fn notes_page() -> Self {
        let mut dom = Self::new();
        let body = dom.document();
        let app = dom.append_element(body, "main");
        dom.set_attribute(app, "id", "app");

        let empty = dom.append_element(app, "p");
        dom.set_role(empty, Role::InfoNotesEmpty);
        dom.set_text(empty, "No notes yet.");
        let empty_add = dom.append_element(empty, "button");
        dom.set_action(empty_add, Action::AddNewNote);

        let add_button = dom.append_element(app, "button");
        dom.set_role(add_button, Role::AddButton);
        dom.set_action(add_button, Action::AddNewNote);

        let form = dom.append_element(app, "form");
        dom.set_role(form, Role::AddNoteForm);
        let title = dom.append_element(form, "input");
        dom.set_role(title, Role::NewNoteTitle);
        let content = dom.append_element(form, "textarea");
        dom.set_role(content, Role::NewNoteContent);
        let submit = dom.append_element(form, "button");
        dom.set_action(submit, Action::SubmitNewNote);
        let cancel = dom.append_element(form, "button");
        dom.set_action(cancel, Action::CancelNewNote);

        let search = dom.append_element(app, "input");
        dom.set_role(search, Role::SearchInput);
        dom.set_action(search, Action::SearchNotes);

        let container = dom.append_element(app, "div");
        dom.set_role(container, Role::NotesContainer);

        let modals = dom.append_element(app, "div");
        dom.set_role(modals, Role::ModalsContainer);

        let edit_modal = dom.append_element(modals, "div");
        dom.set_role(edit_modal, Role::EditModal);
        let edit_title = dom.append_element(edit_modal, "input");
        dom.set_role(edit_title, Role::EditNoteTitle);
        let edit_content = dom.append_element(edit_modal, "textarea");
        dom.set_role(edit_content, Role::EditNoteContent);
        let confirm_edit = dom.append_element(edit_modal, "button");
        dom.set_action(confirm_edit, Action::ConfirmEditNote);
        let hide_edit = dom.append_element(edit_modal, "button");
        dom.set_action(hide_edit, Action::HideModals);

        let delete_modal = dom.append_element(modals, "div");
        dom.set_role(delete_modal, Role::DeleteModal);
        let confirm_delete = dom.append_element(delete_modal, "button");
        dom.set_action(confirm_delete, Action::ConfirmDeleteNote);
        let hide_delete = dom.append_element(delete_modal, "button");
        dom.set_action(hide_delete, Action::HideModals);

        dom
    }

    /// Document root handle.
    pub fn document(&self) -> NodeId {
        NodeId::from_raw(0)
    }

    /// Creates an element and appends it under `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let index = self.nodes.len();
        let parent_index = self.index(parent);
        self.nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            parent: parent_index,
            ..Node::default()
        });
        if let Some(parent_index) = parent_index {
            self.nodes[parent_index].children.push(index);
        } else {
            warn!("event=dom_append module=dom status=detached parent={}", parent.raw());
        }
        NodeId::from_raw(index as u64)
    }

    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(node) {
            if name == "class" {
                node.classes = value.split_whitespace().map(str::to_string).collect();
            } else {
                node.attributes.insert(name.to_string(), value.to_string());
            }
        }
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node)
            .and_then(|node| node.attributes.get(name))
            .map(String::as_str)
    }

    pub fn set_role(&mut self, node: NodeId, role: Role) {
        self.set_attribute(node, ROLE_ATTRIBUTE, role.label());
    }

    pub fn set_action(&mut self, node: NodeId, action: Action) {
        self.set_attribute(node, ACTION_ATTRIBUTE, action.label());
    }

    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(node) = self.node_mut(node) {
            node.text = text.to_string();
        }
    }

    pub fn text(&self, node: NodeId) -> &str {
        self.node(node).map(|node| node.text.as_str()).unwrap_or("")
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node)
            .is_some_and(|node| node.classes.iter().any(|c| c == class))
    }

    /// Detaches `node` (and its subtree) from the document.
    pub fn remove_node(&mut self, node: NodeId) {
        let Some(index) = self.index(node) else {
            return;
        };
        if index == 0 {
            return;
        }
        if let Some(parent) = self.nodes[index].parent.take() {
            self.nodes[parent].children.retain(|child| *child != index);
        }
    }

    /// Element children of `node`.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.node(node)
            .map(|node| {
                node.children
                    .iter()
                    .map(|index| NodeId::from_raw(*index as u64))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Note markup currently mounted under `container`, in order.
    pub fn mounted_notes(&self, container: NodeId) -> &[NoteMarkup] {
        self.node(container)
            .map(|node| node.mounted.as_slice())
            .unwrap_or(&[])
    }

    /// Alerts shown so far, oldest first.
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    /// Non-fatal notifications shown so far, oldest first.
    pub fn notifications(&self) -> &[String] {
        &self.notifications
    }

    /// Convenience lookup from the document root.
    pub fn find_role(&self, role: Role) -> Option<NodeId> {
        self.query_role(self.document(), role)
    }

    /// First control bound to `action`, searched from the document root.
    pub fn find_action(&self, action: Action) -> Option<NodeId> {
        self.query_actions(self.document(), action).into_iter().next()
    }

    fn index(&self, node: NodeId) -> Option<usize> {
        let index = usize::try_from(node.raw()).ok()?;
        (index < self.nodes.len()).then_some(index)
    }

    fn node(&self, node: NodeId) -> Option<&Node> {
        self.index(node).map(|index| &self.nodes[index])
    }

    fn node_mut(&mut self, node: NodeId) -> Option<&mut Node> {
        let index = self.index(node)?;
        Some(&mut self.nodes[index])
    }

    fn matches(&self, index: usize, selector: &Selector) -> bool {
        let node = &self.nodes[index];
        match selector {
            Selector::Id(id) => node.attributes.get("id") == Some(id),
            Selector::Class(class) => node.classes.iter().any(|c| c == class),
            Selector::Tag(tag) => &node.tag == tag,
            Selector::Attribute { name, value } => match (node.attributes.get(name), value) {
                (Some(actual), Some(expected)) => actual == expected,
                (Some(_), None) => true,
                (None, _) => false,
            },
        }
    }

    /// Pre-order descendants of `root`, excluding `root` itself.
    fn descendants(&self, root: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.nodes[root].children.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            out.push(index);
            stack.extend(self.nodes[index].children.iter().rev().copied());
        }
        out
    }

    fn select_all(&self, root: NodeId, selector: &Selector) -> Vec<NodeId> {
        let Some(root) = self.index(root) else {
            return Vec::new();
        };
        self.descendants(root)
            .into_iter()
            .filter(|index| self.matches(*index, selector))
            .map(|index| NodeId::from_raw(index as u64))
            .collect()
    }
}

impl Dom for MemoryDom {
    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        let Some(parsed) = Selector::parse(selector) else {
            warn!("event=dom_query module=dom status=unsupported_selector selector={selector}");
            return None;
        };
        self.select_all(self.document(), &parsed).into_iter().next()
    }

    fn query_role(&self, root: NodeId, role: Role) -> Option<NodeId> {
        self.select_all(root, &Selector::role(role.label()))
            .into_iter()
            .next()
    }

    fn query_actions(&self, root: NodeId, action: Action) -> Vec<NodeId> {
        self.select_all(root, &Selector::action(action.label()))
    }

    fn set_visible(&mut self, node: NodeId, visible: bool) {
        if let Some(node) = self.node_mut(node) {
            let hidden = node.classes.iter().any(|c| c == HIDDEN_CLASS);
            if visible && hidden {
                node.classes.retain(|c| c != HIDDEN_CLASS);
            } else if !visible && !hidden {
                node.classes.push(HIDDEN_CLASS.to_string());
            }
        }
    }

    fn is_visible(&self, node: NodeId) -> bool {
        self.node(node).is_some() && !self.has_class(node, HIDDEN_CLASS)
    }

    fn replace_children(&mut self, container: NodeId, children: Vec<NoteMarkup>) {
        let Some(index) = self.index(container) else {
            return;
        };
        let detached = std::mem::take(&mut self.nodes[index].children);
        for child in detached {
            self.nodes[child].parent = None;
        }
        self.nodes[index].mounted = children;
    }

    fn input_value(&self, node: NodeId) -> String {
        self.node(node)
            .map(|node| node.value.clone())
            .unwrap_or_default()
    }

    fn set_input_value(&mut self, node: NodeId, value: &str) {
        if let Some(node) = self.node_mut(node) {
            node.value = value.to_string();
        }
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryDom;
    use crate::dom::{Action, Dom, Role};

    #[test]
    fn notes_page_exposes_every_role_and_action() {
        let dom = MemoryDom::notes_page();
        let root = dom.query_selector("#app").unwrap();
        for role in Role::ALL {
            assert!(dom.query_role(root, role).is_some(), "missing {role:?}");
        }
        for action in Action::ALL {
            assert!(
                !dom.query_actions(root, action).is_empty(),
                "missing {action:?}"
            );
        }
        assert_eq!(dom.query_actions(root, Action::AddNewNote).len(), 2);
        assert_eq!(dom.query_actions(root, Action::HideModals).len(), 2);
    }

    #[test]
    fn set_visible_toggles_hidden_class_once() {
        let mut dom = MemoryDom::notes_page();
        let node = dom.find_role(Role::AddButton).unwrap();
        dom.set_visible(node, false);
        dom.set_visible(node, false);
        assert!(!dom.is_visible(node));
        dom.set_visible(node, true);
        assert!(dom.is_visible(node));
        assert!(!dom.has_class(node, "is-hidden"));
    }

    #[test]
    fn removed_nodes_are_not_queryable() {
        let mut dom = MemoryDom::notes_page();
        let node = dom.find_role(Role::DeleteModal).unwrap();
        dom.remove_node(node);
        assert!(dom.find_role(Role::DeleteModal).is_none());
        assert!(dom.find_action(Action::ConfirmDeleteNote).is_none());
    }

    #[test]
    fn query_selector_matches_class_and_tag() {
        let mut dom = MemoryDom::notes_page();
        let root = dom.query_selector("#app").unwrap();
        dom.set_attribute(root, "class", "app  notes-app");
        assert_eq!(dom.query_selector(".notes-app"), Some(root));
        assert_eq!(dom.query_selector("main"), Some(root));
        assert_eq!(dom.query_selector("#missing"), None);
    }
}
