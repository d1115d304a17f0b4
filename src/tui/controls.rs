//! Keyboard input handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::runtime::App;

/// Maps a key event to an application action.
///
/// Guards on [`KeyEventKind::Press`] to avoid double-fire on some terminals.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.quit = true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit = true,
        KeyCode::Down | KeyCode::Char('j') => app.next_plant(),
        KeyCode::Up | KeyCode::Char('k') => app.prev_plant(),
        KeyCode::Char('[') => app.first_year_down(),
        KeyCode::Char(']') => app.first_year_up(),
        KeyCode::Char('{') => app.last_year_down(),
        KeyCode::Char('}') => app.last_year_up(),
        // Failures land in the status line.
        KeyCode::Char('s') => {
            let _ = app.save();
        }
        _ => {}
    }
}
