//! Scripted driver for the notes widget.
//!
//! # Responsibility
//! - Wire config, logging and an in-memory document into one `App`.
//! - Replay line commands from stdin and print the rendered regions.
//!
//! Commands: `add <title> | <content>`, `edit <n> <title> | <content>`,
//! `delete <n>`, `confirm`, `cancel`, `search <term>`, `list`.

use chrono::Utc;
use notepad_core::{App, AppConfig, Dom, MemoryDom, NoteId, Role};
use std::io::{self, BufRead};
use std::process::ExitCode;
use std::time::Instant;

const CONFIG_PATH_ENV: &str = "NOTEPAD_CONFIG";

fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(message) => {
            eprintln!("notepad: {message}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(dir) = &config.log_dir {
        if let Err(err) = notepad_core::init_logging(&config.log_level, dir) {
            eprintln!("notepad: {err}");
            return ExitCode::FAILURE;
        }
    }

    let mut app = match App::initialize(MemoryDom::notes_page(), &config) {
        Ok(app) => app,
        Err(err) => {
            eprintln!("notepad: {err}");
            return ExitCode::FAILURE;
        }
    };
    println!("notepad_core version={}", notepad_core::core_version());
    print_view(&app);

    for line in io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                eprintln!("notepad: failed to read stdin: {err}");
                return ExitCode::FAILURE;
            }
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Err(err) = run_command(&mut app, line) {
            println!("! {err}");
        }
        print_view(&app);
    }
    ExitCode::SUCCESS
}

fn load_config() -> Result<AppConfig, String> {
    let base = match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) => {
            let json = std::fs::read_to_string(&path)
                .map_err(|err| format!("cannot read config `{path}`: {err}"))?;
            AppConfig::from_json_str(&json).map_err(|err| err.to_string())?
        }
        Err(_) => AppConfig::default(),
    };
    base.with_overrides(|key| std::env::var(key).ok())
        .map_err(|err| err.to_string())
}

fn run_command(app: &mut App<MemoryDom>, line: &str) -> Result<(), String> {
    let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
    match command {
        "add" => {
            let (title, content) = split_fields(rest);
            app.open_add_form();
            app.submit_new_note(title, content, Utc::now())
                .map_err(|err| err.to_string())?;
        }
        "edit" => {
            let (index, fields) = rest.split_once(' ').unwrap_or((rest, ""));
            let id = note_at(app, index)?;
            let (title, content) = split_fields(fields);
            app.request_edit(id).map_err(|err| err.to_string())?;
            app.submit_edited_note(id, title, content)
                .map_err(|err| err.to_string())?;
        }
        "delete" => {
            let id = note_at(app, rest)?;
            app.request_delete(id).map_err(|err| err.to_string())?;
        }
        "confirm" => {
            app.confirm_delete();
        }
        "cancel" => app.cancel(),
        "search" => {
            let Some(search) = app.dom().find_role(Role::SearchInput) else {
                return Ok(());
            };
            app.input(search, rest, Instant::now());
            if let Some(deadline) = app.search_deadline() {
                app.tick(deadline);
            }
        }
        "list" => {}
        other => return Err(format!("unknown command `{other}`")),
    }
    Ok(())
}

fn split_fields(input: &str) -> (&str, &str) {
    input.split_once('|').unwrap_or((input, ""))
}

/// Resolves a 1-based position in the rendered list.
fn note_at(app: &App<MemoryDom>, index: &str) -> Result<NoteId, String> {
    index
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|position| app.visible_notes().get(position).map(|note| note.id))
        .ok_or_else(|| format!("no note at position `{}`", index.trim()))
}

fn print_view(app: &App<MemoryDom>) {
    let dom = app.dom();
    let regions: Vec<&str> = [
        Role::InfoNotesEmpty,
        Role::AddButton,
        Role::AddNoteForm,
        Role::EditModal,
        Role::DeleteModal,
    ]
    .into_iter()
    .filter(|role| dom.find_role(*role).is_some_and(|node| dom.is_visible(node)))
    .map(Role::label)
    .collect();
    println!("visible: [{}]", regions.join(", "));
    for (position, markup) in dom
        .mounted_notes(app.elements().notes_container)
        .iter()
        .enumerate()
    {
        println!(
            "  {}. {} ({}) - {}",
            position + 1,
            markup.title,
            markup.date_label,
            markup.content
        );
    }
}
