//! Search filtering over the canonical notes list.

use crate::model::note::Note;

/// Returns the notes whose title or content contains `term`
/// case-insensitively, preserving relative order.
///
/// An empty term returns every note. The input list is never modified.
pub fn filter_notes<'a>(notes: &'a [Note], term: &str) -> Vec<&'a Note> {
    notes.iter().filter(|note| note.matches(term)).collect()
}

#[cfg(test)]
mod tests {
    use super::filter_notes;
    use crate::model::note::Note;
    use chrono::Utc;

    fn notes() -> Vec<Note> {
        vec![
            Note::new("Groceries", "milk, eggs", Utc::now()).unwrap(),
            Note::new("Meeting notes", "agenda", Utc::now()).unwrap(),
            Note::new("Ideas", "a better MEETING format", Utc::now()).unwrap(),
        ]
    }

    #[test]
    fn empty_term_returns_full_list_in_order() {
        let notes = notes();
        let titles: Vec<_> = filter_notes(&notes, "")
            .iter()
            .map(|note| note.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Groceries", "Meeting notes", "Ideas"]);
    }

    #[test]
    fn term_matches_title_or_content_preserving_order() {
        let notes = notes();
        let titles: Vec<_> = filter_notes(&notes, "meet")
            .iter()
            .map(|note| note.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Meeting notes", "Ideas"]);
        assert_eq!(filter_notes(&notes, "meet"), filter_notes(&notes, "meet"));
        assert!(filter_notes(&notes, "zzz").is_empty());
        assert_eq!(notes.len(), 3);
    }
}
