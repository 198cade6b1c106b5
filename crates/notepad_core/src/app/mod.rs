//! App controller: state store plus renderer.
//!
//! # Responsibility
//! - Own the canonical state and route UI events into explicit transitions.
//! - Re-render visibility and the notes container synchronously after every
//!   committed transition.
//! - Keep one note element per note alive across renders.
//!
//! # Invariants
//! - State changes only through `Patch` transitions; a failed operation
//!   leaves the notes list untouched.
//! - Render is a full wipe-and-reinsert of the container children.
//! - Change detection against the previous snapshot is logged, never used to
//!   skip a render.

mod elements;
mod error;

pub use elements::Elements;
pub use error::AppError;

use crate::config::AppConfig;
use crate::debounce::Debouncer;
use crate::dom::{Action, Dom, NodeId};
use crate::element::note_element::{Affordance, NoteElement, NoteSignal};
use crate::model::note::{validate_fields, Note, NoteId, NoteValidationError};
use crate::state::{AppState, Operation, Patch, Store};
use crate::view::RegionVisibility;
use chrono::{DateTime, Utc};
use log::{debug, error, info, log_enabled, trace, warn, Level};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Instant;

const NOTE_NOT_FOUND_MESSAGE: &str = "The selected note no longer exists.";

// Why: element listeners cannot borrow the app mutably while it is
// dispatching a click, so signals are queued here and drained afterwards.
type Mailbox = Rc<RefCell<VecDeque<NoteSignal>>>;

/// Notes widget controller bound to one document.
pub struct App<D: Dom> {
    dom: D,
    elements: Elements,
    bindings: HashMap<NodeId, Action>,
    store: Store,
    mounted: HashMap<NoteId, NoteElement>,
    mailbox: Mailbox,
    search: Debouncer<String>,
    render_passes: u64,
}

impl<D: Dom> App<D> {
    /// Resolves DOM targets, renders once and binds action controls.
    ///
    /// # Errors
    /// - `Config` when `config` fails validation.
    /// - `MissingElement` when the root, a role or an action control is
    ///   absent. The message is also shown through `Dom::alert`.
    pub fn initialize(mut dom: D, config: &AppConfig) -> Result<Self, AppError> {
        config.validate()?;

        let resolved = Elements::resolve(&dom, &config.root_selector).and_then(|targets| {
            let bindings = elements::bind_actions(&dom, targets.root)?;
            Ok((targets, bindings))
        });
        let (elements, bindings) = match resolved {
            Ok(resolved) => resolved,
            Err(err) => {
                error!(
                    "event=app_init module=app status=error error_code=missing_element error={err}"
                );
                dom.alert(&format!("Notes widget failed to start: {err}"));
                return Err(err);
            }
        };

        let mut app = Self {
            dom,
            elements,
            bindings,
            store: Store::new(AppState::default()),
            mounted: HashMap::new(),
            mailbox: Rc::new(RefCell::new(VecDeque::new())),
            search: Debouncer::new(config.search_debounce()),
            render_passes: 0,
        };
        app.render();
        info!(
            "event=app_init module=app status=ok root={} bindings={} debounce_ms={}",
            config.root_selector,
            app.bindings.len(),
            config.search_debounce_ms
        );
        Ok(app)
    }

    /// Commits one field write and renders once.
    pub fn set_field(&mut self, patch: Patch) {
        self.transition(vec![patch]);
    }

    /// Commits several writes as one transition with a single render.
    pub fn apply_batch(&mut self, patches: Vec<Patch>) {
        self.transition(patches);
    }

    /// Opens the add form.
    pub fn open_add_form(&mut self) {
        self.set_field(Patch::SetOperation(Operation::Adding));
    }

    /// Closes any form or modal and clears its target.
    pub fn cancel(&mut self) {
        self.set_field(Patch::SetOperation(Operation::Idle));
    }

    /// Validates and appends a new note, closing the add form.
    ///
    /// On validation failure an alert is shown and nothing changes.
    pub fn submit_new_note(
        &mut self,
        title: &str,
        content: &str,
        date: DateTime<Utc>,
    ) -> Result<NoteId, AppError> {
        // Why: the form stays open on rejection so the user can fix the
        // input instead of retyping it.
        let note = match Note::new(title, content, date) {
            Ok(note) => note,
            Err(err) => return Err(self.reject_invalid("add", err)),
        };
        let id = note.id;
        self.dom.set_input_value(self.elements.new_note_title, "");
        self.dom.set_input_value(self.elements.new_note_content, "");
        self.apply_batch(vec![
            Patch::AppendNote(note),
            Patch::SetOperation(Operation::Idle),
        ]);
        info!("event=note_add module=app status=ok note_id={id}");
        Ok(id)
    }

    /// Replaces title/content of `id` in place.
    ///
    /// The edit modal is closed whatever the outcome.
    pub fn submit_edited_note(
        &mut self,
        id: NoteId,
        title: &str,
        content: &str,
    ) -> Result<(), AppError> {
        if !self.store.current().contains(id) {
            self.cancel();
            return Err(self.report_missing("edit", id));
        }
        let (title, content) = match validate_fields(title, content) {
            Ok(fields) => fields,
            Err(err) => {
                self.cancel();
                return Err(self.reject_invalid("edit", err));
            }
        };
        self.apply_batch(vec![
            Patch::UpdateNote { id, title, content },
            Patch::SetOperation(Operation::Idle),
        ]);
        info!("event=note_edit module=app status=ok note_id={id}");
        Ok(())
    }

    /// Opens the edit modal for `id` with its fields pre-filled.
    pub fn request_edit(&mut self, id: NoteId) -> Result<(), AppError> {
        let Some(note) = self.store.current().note(id) else {
            return Err(self.report_missing("edit", id));
        };
        let (title, content) = (note.title.clone(), note.content.clone());
        self.dom.set_input_value(self.elements.edit_note_title, &title);
        self.dom.set_input_value(self.elements.edit_note_content, &content);
        self.set_field(Patch::SetOperation(Operation::Editing(id)));
        Ok(())
    }

    /// Records `id` as delete target and opens the confirmation modal.
    pub fn request_delete(&mut self, id: NoteId) -> Result<(), AppError> {
        if !self.store.current().contains(id) {
            return Err(self.report_missing("delete", id));
        }
        self.set_field(Patch::SetOperation(Operation::ConfirmingDelete(id)));
        Ok(())
    }

    /// Removes the pending delete target and closes the modal.
    ///
    /// Returns whether a note was removed. Without a pending target, or when
    /// the target is already gone, the notes list is left unchanged.
    pub fn confirm_delete(&mut self) -> bool {
        let Operation::ConfirmingDelete(id) = self.store.current().operation else {
            debug!("event=note_delete module=app status=skipped reason=no_pending_target");
            return false;
        };
        let existed = self.store.current().contains(id);
        self.apply_batch(vec![
            Patch::RemoveNote(id),
            Patch::SetOperation(Operation::Idle),
        ]);
        info!("event=note_delete module=app status=ok note_id={id} removed={existed}");
        existed
    }

    /// Shows only notes whose title or content contains `term`.
    ///
    /// The canonical notes list is not modified.
    pub fn filter_notes(&mut self, term: &str) -> Vec<&Note> {
        self.search.cancel();
        self.set_field(Patch::SetSearchTerm(term.to_string()));
        self.store.current().visible_notes()
    }

    /// Handles a click on a bound action control.
    pub fn click(&mut self, node: NodeId) -> Result<(), AppError> {
        let Some(action) = self.bindings.get(&node).copied() else {
            debug!("event=ui_click module=app status=unbound node={}", node.raw());
            return Ok(());
        };
        debug!("event=ui_click module=app status=dispatch action={}", action.label());
        match action {
            Action::AddNewNote => self.open_add_form(),
            Action::CancelNewNote | Action::HideModals => self.cancel(),
            Action::SubmitNewNote => {
                let title = self.dom.input_value(self.elements.new_note_title);
                let content = self.dom.input_value(self.elements.new_note_content);
                self.submit_new_note(&title, &content, Utc::now())?;
            }
            Action::ConfirmEditNote => {
                if let Operation::Editing(id) = self.store.current().operation {
                    let title = self.dom.input_value(self.elements.edit_note_title);
                    let content = self.dom.input_value(self.elements.edit_note_content);
                    self.submit_edited_note(id, &title, &content)?;
                }
            }
            Action::ConfirmDeleteNote => {
                self.confirm_delete();
            }
            Action::SearchNotes => {}
        }
        Ok(())
    }

    /// Handles typing into a search control; applied after the quiet window.
    ///
    /// Returns whether the node is a search control.
    pub fn input(&mut self, node: NodeId, value: &str, now: Instant) -> bool {
        if self.bindings.get(&node) != Some(&Action::SearchNotes) {
            return false;
        }
        self.dom.set_input_value(node, value);
        // Why: no timer thread exists in the single-threaded model; the host
        // loop calls `tick` and the debouncer decides when the term is due.
        self.search.schedule(value.to_string(), now);
        true
    }

    /// Fires a due debounced search. Returns whether a filter pass ran.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(term) = self.search.poll(now) else {
            return false;
        };
        debug!("event=search_debounce module=app status=fired term_len={}", term.len());
        self.set_field(Patch::SetSearchTerm(term));
        true
    }

    /// Deadline of the pending debounced search, if any.
    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Forwards a click on a note's header affordance and routes the
    /// resulting signals.
    pub fn click_note(&mut self, id: NoteId, affordance: Affordance) -> Result<(), AppError> {
        let Some(element) = self.mounted.get_mut(&id) else {
            return Err(self.report_missing("click", id));
        };
        element.click(affordance);

        let signals: Vec<NoteSignal> = self.mailbox.borrow_mut().drain(..).collect();
        for signal in signals {
            match signal {
                NoteSignal::EditRequested(id) => self.request_edit(id)?,
                NoteSignal::DeleteRequested(id) => self.request_delete(id)?,
            }
        }
        Ok(())
    }

    /// Applies state to the document.
    ///
    /// Sets every region's visibility, then replaces the container children
    /// with the visible notes' elements in order.
    pub fn render(&mut self) {
        let state = self.store.current();
        let visibility = RegionVisibility::derive(state);
        let elements = &self.elements;
        let regions = [
            (elements.info_notes_empty, visibility.empty_info),
            (elements.add_button, visibility.add_button),
            (elements.add_note_form, visibility.add_form),
            (elements.edit_modal, visibility.edit_modal),
            (elements.delete_modal, visibility.delete_modal),
            (elements.modals_container, visibility.modals_container),
        ];
        for (node, visible) in regions {
            self.dom.set_visible(node, visible);
        }

        let children: Vec<_> = state
            .visible_notes()
            .into_iter()
            .filter_map(|note| self.mounted.get(&note.id))
            .map(|element| element.markup().clone())
            .collect();
        let child_count = children.len();
        self.dom.replace_children(elements.notes_container, children);

        self.render_passes += 1;
        debug!(
            "event=render module=app status=ok pass={} notes={} visible={} operation={:?}",
            self.render_passes,
            state.notes.len(),
            child_count,
            state.operation
        );
        if log_enabled!(Level::Trace) {
            match render_snapshot(state, &visibility) {
                Ok(snapshot) => trace!("event=render_snapshot module=app status=ok state={snapshot}"),
                Err(err) => warn!("event=render_snapshot module=app status=error error={err}"),
            }
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.current()
    }

    pub fn notes(&self) -> &[Note] {
        &self.store.current().notes
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.store.current().note(id)
    }

    pub fn operation(&self) -> Operation {
        self.store.current().operation
    }

    /// Notes currently rendered, honoring the active search term.
    pub fn visible_notes(&self) -> Vec<&Note> {
        self.store.current().visible_notes()
    }

    /// Mounted element for `id`.
    pub fn element(&self, id: NoteId) -> Option<&NoteElement> {
        self.mounted.get(&id)
    }

    pub fn elements(&self) -> &Elements {
        &self.elements
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    /// Number of completed render passes, including the initial one.
    pub fn render_passes(&self) -> u64 {
        self.render_passes
    }

    fn transition(&mut self, patches: Vec<Patch>) {
        if !self.store.commit(&patches) {
            return;
        }
        self.reconcile_elements();
        self.render();
        debug!(
            "event=change_detect module=app status=ok notes_changed={}",
            self.store.notes_changed()
        );
        self.store.snapshot();
    }

    /// Keeps exactly one element per note, updating survivors in place.
    fn reconcile_elements(&mut self) {
        let notes = &self.store.current().notes;
        self.mounted
            .retain(|id, _| notes.iter().any(|note| note.id == *id));
        for note in notes {
            match self.mounted.get_mut(&note.id) {
                Some(element) => {
                    if element.title() != note.title {
                        element.set_title(note.title.as_str());
                    }
                    if element.content() != note.content {
                        element.set_content(note.content.as_str());
                    }
                    if element.date() != note.date {
                        element.set_date(note.date);
                    }
                }
                None => {
                    let mut element = NoteElement::from_note(note);
                    let mailbox = Rc::clone(&self.mailbox);
                    element.add_listener(Box::new(move |signal| {
                        mailbox.borrow_mut().push_back(*signal);
                    }));
                    self.mounted.insert(note.id, element);
                }
            }
        }
    }

    fn reject_invalid(&mut self, operation: &str, err: NoteValidationError) -> AppError {
        warn!("event=note_{operation} module=app status=rejected error_code=validation error={err}");
        self.dom.alert(err.user_message());
        AppError::Validation(err)
    }

    fn report_missing(&mut self, operation: &str, id: NoteId) -> AppError {
        warn!("event=note_{operation} module=app status=rejected error_code=not_found note_id={id}");
        self.dom.notify(NOTE_NOT_FOUND_MESSAGE);
        AppError::NoteNotFound(id)
    }
}

/// Diagnostic view of one render pass.
#[derive(Serialize)]
struct RenderSnapshot<'a> {
    state: &'a AppState,
    visibility: &'a RegionVisibility,
}

fn render_snapshot(state: &AppState, visibility: &RegionVisibility) -> serde_json::Result<String> {
    serde_json::to_string(&RenderSnapshot { state, visibility })
}

#[cfg(test)]
mod tests {
    use super::{render_snapshot, App};
    use crate::config::AppConfig;
    use crate::dom::{Dom, MemoryDom};
    use crate::state::{Operation, Patch};
    use crate::view::RegionVisibility;
    use chrono::Utc;

    fn app() -> App<MemoryDom> {
        App::initialize(MemoryDom::notes_page(), &AppConfig::default()).unwrap()
    }

    #[test]
    fn initialize_renders_once() {
        let app = app();
        assert_eq!(app.render_passes(), 1);
        assert!(app.dom().is_visible(app.elements().info_notes_empty));
        assert!(!app.dom().is_visible(app.elements().add_button));
    }

    #[test]
    fn set_field_renders_once_per_write_and_batch_renders_once() {
        let mut app = app();
        app.set_field(Patch::SetOperation(Operation::Adding));
        app.set_field(Patch::SetOperation(Operation::Idle));
        assert_eq!(app.render_passes(), 3);

        app.apply_batch(vec![
            Patch::SetOperation(Operation::Adding),
            Patch::SetSearchTerm("x".into()),
        ]);
        assert_eq!(app.render_passes(), 4);
        app.apply_batch(Vec::new());
        assert_eq!(app.render_passes(), 4);
    }

    #[test]
    fn elements_are_kept_across_renders_and_updated_in_place() {
        let mut app = app();
        let id = app.submit_new_note("a", "b", Utc::now()).unwrap();
        let renders_before = app.element(id).unwrap().render_count();

        app.open_add_form();
        app.cancel();
        assert_eq!(app.element(id).unwrap().render_count(), renders_before);

        app.request_edit(id).unwrap();
        app.submit_edited_note(id, "a2", "b").unwrap();
        let element = app.element(id).unwrap();
        assert_eq!(element.title(), "a2");
        assert_eq!(element.render_count(), renders_before + 1);
    }

    #[test]
    fn render_snapshot_carries_state_and_visibility() {
        let mut app = app();
        let id = app.submit_new_note("a", "b", Utc::now()).unwrap();
        app.request_delete(id).unwrap();

        let visibility = RegionVisibility::derive(app.state());
        let json: serde_json::Value =
            serde_json::from_str(&render_snapshot(app.state(), &visibility).unwrap()).unwrap();
        assert_eq!(json["state"]["operation"]["kind"], "confirming_delete");
        assert_eq!(json["state"]["operation"]["note_id"], id.to_string());
        assert_eq!(json["state"]["notes"][0]["title"], "a");
        assert_eq!(json["visibility"]["delete_modal"], true);
        assert_eq!(json["visibility"]["add_form"], false);
    }
}
