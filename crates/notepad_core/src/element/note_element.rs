//! Note element: the visual projection of one note.
//!
//! # Responsibility
//! - Hold title/content/date/identifier and derive markup from them.
//! - Translate affordance clicks into outward `NoteSignal`s.
//!
//! # Invariants
//! - Every setter re-derives markup immediately (`render_count` increments).
//! - An element without identifier emits no signals.

use crate::model::note::{Note, NoteId};
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, warn};
use std::fmt::{Debug, Formatter};

/// Human-readable month/day label, e.g. `May 22`.
const DATE_LABEL_FORMAT: &str = "%b %-d";
/// Machine-readable date stamp used in `<time datetime>`.
const DATE_STAMP_FORMAT: &str = "%Y-%m-%d";

/// Clickable affordance in the note header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    Edit,
    Delete,
}

/// Outward signal emitted by a note element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteSignal {
    EditRequested(NoteId),
    DeleteRequested(NoteId),
}

/// Listener invoked for every emitted signal.
pub type SignalListener = Box<dyn FnMut(&NoteSignal)>;

/// Derived markup of one note element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteMarkup {
    pub id: Option<NoteId>,
    pub title: String,
    pub content: String,
    pub date_label: String,
    pub date_stamp: String,
}

impl NoteMarkup {
    fn derive(id: Option<NoteId>, title: &str, content: &str, date: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.to_string(),
            content: content.to_string(),
            date_label: date.format(DATE_LABEL_FORMAT).to_string(),
            date_stamp: date.format(DATE_STAMP_FORMAT).to_string(),
        }
    }

    /// Serializes the markup as escaped HTML.
    pub fn to_html(&self) -> String {
        let id_attr = self
            .id
            .map(|id| format!(" data-note-id=\"{id}\""))
            .unwrap_or_default();
        format!(
            "<note-item class=\"note\"{id_attr}>\
<div class=\"note__header\"><h6 class=\"note-title\">{title}</h6>\
<div class=\"note__header__buttons\"><i class=\"icon icon--edit\"></i><i class=\"icon icon--trash-can\"></i></div></div>\
<div class=\"note__body\"><p class=\"note-content\">{content}</p></div>\
<time datetime=\"{stamp}\" class=\"note__date\">{label}</time>\
</note-item>",
            title = escape_html(&self.title),
            content = escape_html(&self.content),
            stamp = escape_html(&self.date_stamp),
            label = escape_html(&self.date_label),
        )
    }
}

/// Self-rendering unit bound to one note.
pub struct NoteElement {
    id: Option<NoteId>,
    title: String,
    content: String,
    date: DateTime<Utc>,
    markup: NoteMarkup,
    render_count: u64,
    listeners: Vec<SignalListener>,
}

impl Debug for NoteElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteElement")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("date", &self.date)
            .field("render_count", &self.render_count)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for NoteElement {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteElement {
    /// Creates an empty element dated now.
    pub fn new() -> Self {
        Self::with_fields(None, String::new(), String::new(), Utc::now())
    }

    /// Creates an element from optional `title`, `content`, `date`, `id`
    /// attributes. Unknown attributes are ignored.
    ///
    /// `date` accepts RFC 3339 or `YYYY-MM-DD`; anything else falls back to now.
    pub fn from_attributes<'a>(attributes: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut id = None;
        let mut title = String::new();
        let mut content = String::new();
        let mut date = None;
        for (name, value) in attributes {
            match name {
                "title" => title = value.to_string(),
                "content" => content = value.to_string(),
                "date" => date = parse_date_attribute(value),
                "id" => match NoteId::parse_str(value.trim()) {
                    Ok(parsed) => id = Some(parsed),
                    Err(err) => warn!(
                        "event=note_element_attr module=element status=invalid attr=id error={err}"
                    ),
                },
                _ => {}
            }
        }
        Self::with_fields(id, title, content, date.unwrap_or_else(Utc::now))
    }

    /// Creates an element projecting `note`.
    pub fn from_note(note: &Note) -> Self {
        Self::with_fields(
            Some(note.id),
            note.title.clone(),
            note.content.clone(),
            note.date,
        )
    }

    fn with_fields(
        id: Option<NoteId>,
        title: String,
        content: String,
        date: DateTime<Utc>,
    ) -> Self {
        let mut element = Self {
            markup: NoteMarkup::derive(id, &title, &content, date),
            id,
            title,
            content,
            date,
            render_count: 0,
            listeners: Vec::new(),
        };
        element.render();
        element
    }

    pub fn id(&self) -> Option<NoteId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn set_id(&mut self, id: NoteId) {
        self.id = Some(id);
        self.render();
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.render();
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.render();
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) {
        self.date = date;
        self.render();
    }

    /// Current derived markup.
    pub fn markup(&self) -> &NoteMarkup {
        &self.markup
    }

    /// Number of times markup has been derived.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Attaches a listener for edit/delete signals.
    pub fn add_listener(&mut self, listener: SignalListener) {
        self.listeners.push(listener);
    }

    /// Handles a click on one header affordance.
    ///
    /// Returns the emitted signal, if any, after dispatching it to listeners.
    pub fn click(&mut self, affordance: Affordance) -> Option<NoteSignal> {
        let Some(id) = self.id else {
            warn!("event=note_signal module=element status=skipped reason=missing_id");
            return None;
        };
        let signal = match affordance {
            Affordance::Edit => NoteSignal::EditRequested(id),
            Affordance::Delete => NoteSignal::DeleteRequested(id),
        };
        debug!(
            "event=note_signal module=element status=emitted signal={signal:?} listeners={}",
            self.listeners.len()
        );
        for listener in &mut self.listeners {
            listener(&signal);
        }
        Some(signal)
    }

    fn render(&mut self) {
        self.markup = NoteMarkup::derive(self.id, &self.title, &self.content, self.date);
        self.render_count += 1;
    }
}

fn parse_date_attribute(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Some(midnight) = NaiveDate::parse_from_str(value, DATE_STAMP_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Some(midnight.and_utc());
    }
    warn!("event=note_element_attr module=element status=invalid attr=date");
    None
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{Affordance, NoteElement, NoteSignal};
    use chrono::{TimeZone, Utc};
    use std::cell::RefCell;
    use std::rc::Rc;
    use uuid::Uuid;

    #[test]
    fn every_setter_rerenders_markup() {
        let mut element = NoteElement::new();
        let initial = element.render_count();

        element.set_title("Dynamic Note");
        element.set_content("This is dynamic content");
        element.set_date(Utc.with_ymd_and_hms(2024, 5, 22, 9, 0, 0).unwrap());

        assert_eq!(element.render_count(), initial + 3);
        let markup = element.markup();
        assert_eq!(markup.title, "Dynamic Note");
        assert_eq!(markup.date_label, "May 22");
        assert_eq!(markup.date_stamp, "2024-05-22");
    }

    #[test]
    fn from_attributes_parses_known_fields() {
        let id = Uuid::new_v4();
        let id_text = id.to_string();
        let element = NoteElement::from_attributes([
            ("title", "Hello"),
            ("content", "World"),
            ("date", "2024-01-05"),
            ("id", id_text.as_str()),
            ("ignored", "x"),
        ]);
        assert_eq!(element.id(), Some(id));
        assert_eq!(element.title(), "Hello");
        assert_eq!(element.markup().date_label, "Jan 5");
    }

    #[test]
    fn click_emits_signals_to_listeners() {
        let id = Uuid::new_v4();
        let mut element = NoteElement::new();
        element.set_id(id);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        element.add_listener(Box::new(move |signal| sink.borrow_mut().push(*signal)));

        assert_eq!(
            element.click(Affordance::Edit),
            Some(NoteSignal::EditRequested(id))
        );
        element.click(Affordance::Delete);
        assert_eq!(
            *seen.borrow(),
            vec![NoteSignal::EditRequested(id), NoteSignal::DeleteRequested(id)]
        );
    }

    #[test]
    fn click_without_id_emits_nothing() {
        let mut element = NoteElement::new();
        assert_eq!(element.click(Affordance::Delete), None);
    }

    #[test]
    fn html_escapes_user_text() {
        let mut element = NoteElement::new();
        element.set_title("<b>bold</b>");
        let html = element.markup().to_html();
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains("icon--trash-can"));
    }
}
