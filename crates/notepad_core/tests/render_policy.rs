use chrono::Utc;
use notepad_core::{App, AppConfig, Dom, MemoryDom, Operation, Patch, RegionVisibility, Role};

fn snapshot(app: &App<MemoryDom>) -> Vec<bool> {
    [
        Role::InfoNotesEmpty,
        Role::AddButton,
        Role::AddNoteForm,
        Role::EditModal,
        Role::DeleteModal,
        Role::ModalsContainer,
    ]
    .into_iter()
    .map(|role| app.dom().is_visible(app.dom().find_role(role).unwrap()))
    .collect()
}

#[test]
fn render_is_idempotent() {
    let mut app = App::initialize(MemoryDom::notes_page(), &AppConfig::default()).unwrap();
    app.submit_new_note("a", "b", Utc::now()).unwrap();
    let container = app.elements().notes_container;

    app.render();
    let first = (snapshot(&app), app.dom().mounted_notes(container).to_vec());
    app.render();
    let second = (snapshot(&app), app.dom().mounted_notes(container).to_vec());
    assert_eq!(first, second);
}

#[test]
fn dom_matches_derived_visibility_for_every_operation() {
    let mut app = App::initialize(MemoryDom::notes_page(), &AppConfig::default()).unwrap();
    let id = app.submit_new_note("a", "b", Utc::now()).unwrap();

    for operation in [
        Operation::Idle,
        Operation::Adding,
        Operation::Editing(id),
        Operation::ConfirmingDelete(id),
    ] {
        app.set_field(Patch::SetOperation(operation));
        let expected = RegionVisibility::derive(app.state());
        assert_eq!(
            snapshot(&app),
            vec![
                expected.empty_info,
                expected.add_button,
                expected.add_form,
                expected.edit_modal,
                expected.delete_modal,
                expected.modals_container,
            ],
            "operation {operation:?}"
        );
    }
}

#[test]
fn container_preserves_insertion_order() {
    let mut app = App::initialize(MemoryDom::notes_page(), &AppConfig::default()).unwrap();
    for title in ["one", "two", "three"] {
        app.submit_new_note(title, "body", Utc::now()).unwrap();
    }
    let titles: Vec<_> = app
        .dom()
        .mounted_notes(app.elements().notes_container)
        .iter()
        .map(|markup| markup.title.as_str())
        .collect();
    assert_eq!(titles, vec!["one", "two", "three"]);
}
