use chrono::Utc;
use notepad_core::{App, AppConfig, Dom, MemoryDom, Role};
use std::time::{Duration, Instant};

fn app_with_notes() -> App<MemoryDom> {
    let mut app = App::initialize(MemoryDom::notes_page(), &AppConfig::default()).unwrap();
    app.submit_new_note("Groceries", "milk, eggs", Utc::now())
        .unwrap();
    app.submit_new_note("Meeting notes", "agenda", Utc::now())
        .unwrap();
    app
}

fn rendered_titles(app: &App<MemoryDom>) -> Vec<String> {
    app.dom()
        .mounted_notes(app.elements().notes_container)
        .iter()
        .map(|markup| markup.title.clone())
        .collect()
}

#[test]
fn filter_shows_matching_subset_without_mutating_notes() {
    let mut app = app_with_notes();

    let titles: Vec<_> = app
        .filter_notes("meet")
        .iter()
        .map(|note| note.title.clone())
        .collect();
    assert_eq!(titles, vec!["Meeting notes".to_string()]);
    assert_eq!(rendered_titles(&app), vec!["Meeting notes".to_string()]);

    assert!(app.filter_notes("zzz").is_empty());
    assert!(rendered_titles(&app).is_empty());
    assert_eq!(app.notes().len(), 2);
}

#[test]
fn empty_term_restores_full_list_in_order() {
    let mut app = app_with_notes();
    app.filter_notes("GROC");
    assert_eq!(app.filter_notes("").len(), 2);
    assert_eq!(
        rendered_titles(&app),
        vec!["Groceries".to_string(), "Meeting notes".to_string()]
    );
}

#[test]
fn filter_is_idempotent() {
    let mut app = app_with_notes();
    let first: Vec<_> = app.filter_notes("e").iter().map(|note| note.id).collect();
    let second: Vec<_> = app.filter_notes("e").iter().map(|note| note.id).collect();
    assert_eq!(first, second);
}

#[test]
fn debounced_input_runs_one_filter_pass_after_quiet_window() {
    let mut app = app_with_notes();
    let search = app.dom().find_role(Role::SearchInput).unwrap();
    let start = Instant::now();
    let passes_before = app.render_passes();

    assert!(app.input(search, "m", start));
    assert!(app.input(search, "me", start + Duration::from_millis(10)));
    assert!(app.input(search, "mee", start + Duration::from_millis(30)));
    assert!(!app.tick(start + Duration::from_millis(60)));
    assert_eq!(app.render_passes(), passes_before);

    assert!(app.tick(start + Duration::from_millis(80)));
    assert_eq!(app.render_passes(), passes_before + 1);
    assert_eq!(app.state().search_term, "mee");
    assert_eq!(rendered_titles(&app), vec!["Meeting notes".to_string()]);
    assert_eq!(app.dom().input_value(search), "mee");

    assert!(!app.tick(start + Duration::from_secs(5)));
}

#[test]
fn input_on_non_search_control_is_ignored() {
    let mut app = app_with_notes();
    let title = app.dom().find_role(Role::NewNoteTitle).unwrap();
    assert!(!app.input(title, "x", Instant::now()));
    assert!(app.search_deadline().is_none());
}

#[test]
fn added_notes_respect_active_filter() {
    let mut app = app_with_notes();
    app.filter_notes("meeting");
    app.submit_new_note("Shopping", "list", Utc::now()).unwrap();
    assert_eq!(rendered_titles(&app), vec!["Meeting notes".to_string()]);
    assert_eq!(app.notes().len(), 3);
}
