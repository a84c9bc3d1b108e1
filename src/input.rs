use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, ViewMode};
use crate::form::{FormField, TaskForm};
use crate::task::Status;

/// What a key did to a form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormAction {
    Continue,
    Submit,
    Cancel,
}

/// Route a key press to the modal, the selected card's edit draft, or the
/// board, in that order.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    if app.is_modal_open() {
        let action = match app.modal.as_mut() {
            Some(form) => handle_form_key(form, key),
            None => FormAction::Continue,
        };
        match action {
            FormAction::Submit => {
                app.submit_modal();
            }
            // Esc stands in for clicking the overlay
            FormAction::Cancel => app.close_modal(),
            FormAction::Continue => {}
        }
        return;
    }

    if app.selection_visible() && app.selected_is_editing() {
        let action = match app.active_form_mut() {
            Some(form) => handle_form_key(form, key),
            None => FormAction::Continue,
        };
        match action {
            FormAction::Submit => {
                app.save_selected_edit();
            }
            FormAction::Cancel => app.cancel_selected_edit(),
            FormAction::Continue => {}
        }
        return;
    }

    handle_navigate_key(app, key);
}

fn handle_form_key(form: &mut TaskForm, key: KeyEvent) -> FormAction {
    match key.code {
        KeyCode::Esc => return FormAction::Cancel,
        KeyCode::Enter => return FormAction::Submit,
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Left if form.focus == FormField::Category => form.cycle_category(false),
        KeyCode::Right if form.focus == FormField::Category => form.cycle_category(true),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) => form.insert_char(c),
        _ => {}
    }
    FormAction::Continue
}

fn handle_navigate_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('b') => app.show_board(),
        KeyCode::Char('l') => app.show_list(),
        KeyCode::Char('c') => app.open_modal(),
        KeyCode::Left => app.focus_status(-1),
        KeyCode::Right => app.focus_status(1),
        KeyCode::Char(' ') | KeyCode::Enter if app.view_mode == ViewMode::List => {
            app.toggle_section(app.selected_status);
        }
        _ if !app.selection_visible() => {}
        KeyCode::Up => app.select_task(-1),
        KeyCode::Down => app.select_task(1),
        KeyCode::Char('1') => app.set_selected_status(Status::Todo),
        KeyCode::Char('2') => app.set_selected_status(Status::InProgress),
        KeyCode::Char('3') => app.set_selected_status(Status::Done),
        KeyCode::Char('d') => app.delete_selected(),
        KeyCode::Char('e') => {
            app.edit_selected();
        }
        _ => {}
    }
}
