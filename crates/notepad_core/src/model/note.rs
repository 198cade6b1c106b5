//! Note domain model.
//!
//! # Responsibility
//! - Define the user-authored record rendered by note elements.
//! - Validate title/content at construction and on edit.
//!
//! # Invariants
//! - `id` is generated once and never changes for the note lifetime.
//! - `title` and `content` are trimmed and never empty.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one note.
///
/// Generated as a random v4 uuid so two notes created within the same
/// instant never collide.
pub type NoteId = Uuid;

/// Validation failure for user-provided note fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Title is empty after trimming.
    EmptyTitle,
    /// Content is empty after trimming.
    EmptyContent,
}

impl NoteValidationError {
    /// Message shown to the user in the blocking alert.
    pub fn user_message(self) -> &'static str {
        "Make sure title and content is not empty."
    }
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "note title must not be empty"),
            Self::EmptyContent => write!(f, "note content must not be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// One user-authored note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Creation/display date.
    pub date: DateTime<Utc>,
}

impl Note {
    /// Creates a note with a freshly generated identifier.
    ///
    /// # Errors
    /// - `EmptyTitle` / `EmptyContent` when a field is blank after trimming.
    pub fn new(
        title: impl AsRef<str>,
        content: impl AsRef<str>,
        date: DateTime<Utc>,
    ) -> Result<Self, NoteValidationError> {
        let (title, content) = validate_fields(title.as_ref(), content.as_ref())?;
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            content,
            date,
        })
    }

    /// Case-insensitive substring match against title or content.
    ///
    /// An empty term matches every note. The term is used verbatim, so
    /// surrounding whitespace is part of what must match.
    pub fn matches(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let needle = term.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.content.to_lowercase().contains(&needle)
    }
}

/// Trims and validates title/content input.
pub fn validate_fields(
    title: &str,
    content: &str,
) -> Result<(String, String), NoteValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(NoteValidationError::EmptyTitle);
    }
    let content = content.trim();
    if content.is_empty() {
        return Err(NoteValidationError::EmptyContent);
    }
    Ok((title.to_string(), content.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteValidationError};
    use chrono::Utc;

    #[test]
    fn new_trims_fields_and_generates_id() {
        let note = Note::new("  Groceries ", "\tmilk\n", Utc::now()).unwrap();
        assert!(!note.id.is_nil());
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk");
    }

    #[test]
    fn new_rejects_blank_fields() {
        assert_eq!(
            Note::new("   ", "body", Utc::now()).unwrap_err(),
            NoteValidationError::EmptyTitle
        );
        assert_eq!(
            Note::new("title", "", Utc::now()).unwrap_err(),
            NoteValidationError::EmptyContent
        );
    }

    #[test]
    fn matches_is_case_insensitive_over_title_and_content() {
        let note = Note::new("Meeting notes", "Discuss Q3 roadmap", Utc::now()).unwrap();
        assert!(note.matches("meet"));
        assert!(note.matches("ROADMAP"));
        assert!(note.matches(""));
        assert!(!note.matches("zzz"));
    }

    #[test]
    fn matches_keeps_surrounding_whitespace_in_term() {
        let meeting = Note::new("Meeting", "agenda", Utc::now()).unwrap();
        let groceries = Note::new("Groceries", "milk eggs", Utc::now()).unwrap();

        assert!(!meeting.matches("meeting "));
        assert!(!meeting.matches(" "));
        assert!(groceries.matches(" "));
        assert!(groceries.matches("K E"));
    }
}
