//! State machine tests for the TUI App.
//!
//! Each test builds an App around a fresh in-memory screen and
//! simulates key events to check mode transitions and the resulting
//! screen state.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ticklist_tui::app::{App, Mode};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn char_key(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

fn type_str(app: &mut App, s: &str) {
    for c in s.chars() {
        app.handle_key(char_key(c));
    }
}

/// Create an app and add one task per entry, leaving it in Normal mode
/// with the cursor on the first task.
fn make_app_with_tasks(texts: &[&str]) -> App {
    let mut app = App::new();
    for text in texts {
        app.handle_key(char_key('a'));
        type_str(&mut app, text);
        app.handle_key(key(KeyCode::Enter));
    }
    app.handle_key(char_key('g'));
    app
}

fn task_texts(app: &App) -> Vec<String> {
    app.screen().tasks().iter().map(|t| t.text.clone()).collect()
}

// ---- Mode transitions ----

#[test]
fn app_starts_normal() {
    let app = App::new();
    assert!(matches!(app.mode(), Mode::Normal));
    assert!(!app.is_input_mode());
}

#[test]
fn a_enters_input() {
    let mut app = App::new();
    app.handle_key(char_key('a'));
    assert!(matches!(app.mode(), Mode::Input));
    assert!(app.is_input_mode());
}

#[test]
fn i_enters_input() {
    let mut app = App::new();
    app.handle_key(char_key('i'));
    assert!(matches!(app.mode(), Mode::Input));
}

#[test]
fn input_esc_returns_and_keeps_draft() {
    let mut app = App::new();
    app.handle_key(char_key('a'));
    type_str(&mut app, "half-written");
    app.handle_key(key(KeyCode::Esc));
    assert!(matches!(app.mode(), Mode::Normal));
    assert_eq!(app.screen().draft(), "half-written");
}

// ---- Add ----

#[test]
fn typing_and_submit_adds_task() {
    let mut app = App::new();
    app.handle_key(char_key('a'));
    type_str(&mut app, "Buy milk");
    assert_eq!(app.screen().draft(), "Buy milk");
    app.handle_key(key(KeyCode::Enter));
    assert!(matches!(app.mode(), Mode::Normal));
    assert_eq!(task_texts(&app), ["Buy milk"]);
    assert!(app.screen().draft().is_empty());
}

#[test]
fn backspace_edits_draft() {
    let mut app = App::new();
    app.handle_key(char_key('a'));
    type_str(&mut app, "ab");
    app.handle_key(key(KeyCode::Backspace));
    assert_eq!(app.screen().draft(), "a");
    assert!(matches!(app.mode(), Mode::Input));
}

#[test]
fn blank_submit_never_changes_list() {
    let mut app = App::new();
    app.handle_key(char_key('a'));
    type_str(&mut app, "   ");
    app.handle_key(key(KeyCode::Enter));
    // A blank submit is a pure no-op: still typing, nothing added.
    assert!(matches!(app.mode(), Mode::Input));
    assert!(app.screen().tasks().is_empty());
}

// ---- Edit ----

#[test]
fn e_begins_edit_of_selected_task() {
    let mut app = make_app_with_tasks(&["A", "B"]);
    app.handle_key(char_key('e'));
    assert!(matches!(app.mode(), Mode::Input));
    assert_eq!(app.screen().draft(), "A");
    assert_eq!(app.screen().editing(), Some(app.screen().tasks()[0].id));
}

#[test]
fn e_on_empty_list_stays_normal() {
    let mut app = App::new();
    app.handle_key(char_key('e'));
    assert!(matches!(app.mode(), Mode::Normal));
}

#[test]
fn edit_submit_opens_save_dialog() {
    let mut app = make_app_with_tasks(&["A"]);
    app.handle_key(char_key('e'));
    type_str(&mut app, "2");
    app.handle_key(key(KeyCode::Enter));
    assert!(matches!(app.mode(), Mode::ConfirmSave { .. }));
    // Nothing saved until the dialog is confirmed.
    assert_eq!(task_texts(&app), ["A"]);
}

#[test]
fn save_dialog_confirm_replaces_text_in_place() {
    let mut app = make_app_with_tasks(&["A", "B"]);
    let id = app.screen().tasks()[0].id;
    app.handle_key(char_key('e'));
    type_str(&mut app, "2");
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(char_key('y'));

    assert!(matches!(app.mode(), Mode::Normal));
    assert_eq!(task_texts(&app), ["A2", "B"]);
    assert_eq!(app.screen().tasks()[0].id, id);
    assert_eq!(app.screen().editing(), None);
}

#[test]
fn save_dialog_cancel_returns_to_input_with_draft() {
    let mut app = make_app_with_tasks(&["A"]);
    app.handle_key(char_key('e'));
    type_str(&mut app, "2");
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(char_key('n'));

    assert!(matches!(app.mode(), Mode::Input));
    assert_eq!(task_texts(&app), ["A"]);
    assert_eq!(app.screen().editing(), None);
    assert_eq!(app.screen().draft(), "A2");
}

#[test]
fn esc_during_edit_clears_marker() {
    let mut app = make_app_with_tasks(&["A"]);
    app.handle_key(char_key('e'));
    app.handle_key(key(KeyCode::Esc));
    assert!(matches!(app.mode(), Mode::Normal));
    assert_eq!(app.screen().editing(), None);
    assert_eq!(app.screen().draft(), "A");
}

#[test]
fn j_then_e_edits_second_task() {
    let mut app = make_app_with_tasks(&["A", "B"]);
    app.handle_key(char_key('j'));
    app.handle_key(char_key('e'));
    assert_eq!(app.screen().draft(), "B");
}

// ---- Completion ----

#[test]
fn space_toggles_completion_twice() {
    let mut app = make_app_with_tasks(&["A"]);
    let id = app.screen().tasks()[0].id;
    app.handle_key(char_key(' '));
    assert!(app.screen().is_completed(id));
    app.handle_key(char_key(' '));
    assert!(!app.screen().is_completed(id));
}

#[test]
fn c_toggles_completion() {
    let mut app = make_app_with_tasks(&["A"]);
    let id = app.screen().tasks()[0].id;
    app.handle_key(char_key('c'));
    assert!(app.screen().is_completed(id));
}

// ---- Delete ----

#[test]
fn d_opens_delete_dialog() {
    let mut app = make_app_with_tasks(&["A"]);
    let id = app.screen().tasks()[0].id;
    app.handle_key(char_key('d'));
    assert_eq!(*app.mode(), Mode::ConfirmDelete { id });
    assert!(app.is_input_mode());
}

#[test]
fn d_on_empty_list_stays_normal() {
    let mut app = App::new();
    app.handle_key(char_key('d'));
    assert!(matches!(app.mode(), Mode::Normal));
}

#[test]
fn delete_dialog_confirm_removes_task_and_completion() {
    let mut app = make_app_with_tasks(&["A", "B"]);
    let b = app.screen().tasks()[1].id;
    app.handle_key(char_key(' '));
    app.handle_key(char_key('d'));
    app.handle_key(char_key('y'));

    assert!(matches!(app.mode(), Mode::Normal));
    assert_eq!(task_texts(&app), ["B"]);
    assert_eq!(app.screen().completed_count(), 0);
    assert!(!app.screen().is_completed(b));
}

#[test]
fn delete_dialog_cancel_changes_nothing() {
    let mut app = make_app_with_tasks(&["A", "B"]);
    app.handle_key(char_key('d'));
    app.handle_key(char_key('n'));
    assert!(matches!(app.mode(), Mode::Normal));
    assert_eq!(task_texts(&app), ["A", "B"]);
}

// ---- Search ----

#[test]
fn slash_enters_search() {
    let mut app = App::new();
    app.handle_key(char_key('/'));
    assert!(matches!(app.mode(), Mode::Search));
    assert!(app.is_input_mode());
}

#[test]
fn search_filters_live() {
    let mut app = make_app_with_tasks(&["Buy milk", "Walk dog"]);
    app.handle_key(char_key('/'));
    type_str(&mut app, "milk");
    assert_eq!(app.screen().query(), "milk");
    let visible: Vec<&str> = app
        .screen()
        .visible()
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(visible, ["Buy milk"]);
}

#[test]
fn search_enter_keeps_filter() {
    let mut app = make_app_with_tasks(&["Buy milk", "Walk dog"]);
    app.handle_key(char_key('/'));
    type_str(&mut app, "dog");
    app.handle_key(key(KeyCode::Enter));
    assert!(matches!(app.mode(), Mode::Normal));
    assert_eq!(app.screen().query(), "dog");
}

#[test]
fn search_esc_clears_filter() {
    let mut app = make_app_with_tasks(&["Buy milk"]);
    app.handle_key(char_key('/'));
    type_str(&mut app, "xyz");
    assert!(app.screen().visible().is_empty());
    app.handle_key(key(KeyCode::Esc));
    assert!(matches!(app.mode(), Mode::Normal));
    assert!(app.screen().query().is_empty());
    assert_eq!(app.screen().visible().len(), 1);
}

#[test]
fn actions_target_the_filtered_selection() {
    let mut app = make_app_with_tasks(&["Buy milk", "Walk dog"]);
    let dog = app.screen().tasks()[1].id;
    app.handle_key(char_key('/'));
    type_str(&mut app, "dog");
    app.handle_key(key(KeyCode::Enter));

    app.handle_key(char_key(' '));
    assert!(app.screen().is_completed(dog));
}

// ---- Full scenario ----

#[test]
fn add_edit_check_delete_scenario() {
    let mut app = App::new();

    app.handle_key(char_key('a'));
    type_str(&mut app, "A");
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(char_key('a'));
    type_str(&mut app, "B");
    app.handle_key(key(KeyCode::Enter));
    assert_eq!(task_texts(&app), ["A", "B"]);

    // edit "A" to "A2", confirm
    app.handle_key(char_key('g'));
    app.handle_key(char_key('e'));
    type_str(&mut app, "2");
    app.handle_key(key(KeyCode::Enter));
    app.handle_key(char_key('y'));
    assert_eq!(task_texts(&app), ["A2", "B"]);

    // check "B"
    let b = app.screen().tasks()[1].id;
    app.handle_key(char_key('j'));
    app.handle_key(char_key(' '));
    assert!(app.screen().is_completed(b));

    // delete "A2", confirm
    app.handle_key(char_key('k'));
    app.handle_key(char_key('d'));
    app.handle_key(char_key('y'));
    assert_eq!(task_texts(&app), ["B"]);
    assert!(app.screen().is_completed(b));
    assert_eq!(app.screen().completed_count(), 1);
}
