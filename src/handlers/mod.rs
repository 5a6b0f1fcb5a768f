pub mod auth;

use crate::app::App;
use crossterm::event::{self, KeyCode, KeyEvent, KeyModifiers};

/// Main input handler dispatcher
pub fn handle_key_event(key: KeyEvent, app: &mut App) {
    if key.kind != event::KeyEventKind::Press {
        return;
    }

    if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
        app.should_quit = true;
        return;
    }

    auth::handle_auth_input(key, app);
}
