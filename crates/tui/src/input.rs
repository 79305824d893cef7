//! Maps key events to [`App`] mutations.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // Ctrl-C quits everywhere, including while typing credentials.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit = true;
        return;
    }

    if app.session.is_resolving() {
        if key.code == KeyCode::Esc {
            app.quit = true;
        }
        return;
    }

    if !app.session.is_authenticated() {
        handle_login_key(app, key);
        return;
    }

    if app.modal.is_some() {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => app.close_modal(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit = true,
        KeyCode::Tab => app.next_panel(),
        KeyCode::BackTab => app.prev_panel(),
        KeyCode::Up => app.select_previous(),
        KeyCode::Down => app.select_next(),
        KeyCode::Char('g') | KeyCode::Enter => app.generate_summary(),
        KeyCode::Char('l') => app.toggle_locale(),
        KeyCode::Char('x') => app.logout(),
        _ => {}
    }
}

fn handle_login_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.quit = true,
        KeyCode::Tab | KeyCode::BackTab => {
            app.login.editing_password = !app.login.editing_password;
        }
        KeyCode::Enter => app.submit_login(),
        KeyCode::Backspace => {
            app.login.active_field_mut().pop();
        }
        KeyCode::Char(c) => {
            app.login.active_field_mut().push(c);
        }
        _ => {}
    }
}
