use crate::app::App;
use crate::state::{AppMode, AuthFocus, LoginField, SignupField};
use crossterm::event::{KeyCode, KeyEvent};

fn focus_order(mode: AppMode) -> &'static [AuthFocus] {
    match mode {
        AppMode::Login => &[
            AuthFocus::LoginUsername,
            AuthFocus::LoginPassword,
            AuthFocus::Submit,
            AuthFocus::Switch,
        ],
        AppMode::Signup => &[
            AuthFocus::SignupDisplayName,
            AuthFocus::SignupUsername,
            AuthFocus::SignupPassword,
            AuthFocus::SignupRepeatPassword,
            AuthFocus::Submit,
            AuthFocus::Switch,
        ],
    }
}

/// Handle input on the login/signup screens.
pub fn handle_auth_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char(c) => edit_focused(app, |value| value.push(c)),
        KeyCode::Backspace => edit_focused(app, |value| {
            value.pop();
        }),
        KeyCode::Tab => cycle_focus(app, 1),
        KeyCode::BackTab => cycle_focus(app, -1),
        KeyCode::Enter => match app.focus {
            AuthFocus::Submit => app.submit_active(),
            AuthFocus::Switch => {
                let next = match app.mode {
                    AppMode::Login => AppMode::Signup,
                    AppMode::Signup => AppMode::Login,
                };
                app.go_to(next);
            }
            // Enter on a field walks down towards the submit control.
            _ => cycle_focus(app, 1),
        },
        KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}

fn cycle_focus(app: &mut App, step: isize) {
    let order = focus_order(app.mode);
    let current = order.iter().position(|f| *f == app.focus).unwrap_or(0);
    let next = (current as isize + step).rem_euclid(order.len() as isize) as usize;
    app.focus = order[next];
}

/// Route an edit to whichever field owns the focus. Edits go through the
/// controller so error clearing and the password rule run.
fn edit_focused(app: &mut App, edit: impl FnOnce(&mut String)) {
    match app.mode {
        AppMode::Login => {
            let Some(field) = login_field(app.focus) else {
                return;
            };
            let mut value = app.login.value(field).to_string();
            edit(&mut value);
            app.login.set_field(field, value);
        }
        AppMode::Signup => {
            let Some(field) = signup_field(app.focus) else {
                return;
            };
            let mut value = app.signup.value(field).to_string();
            edit(&mut value);
            app.signup.set_field(field, value);
        }
    }
}

fn login_field(focus: AuthFocus) -> Option<LoginField> {
    match focus {
        AuthFocus::LoginUsername => Some(LoginField::Username),
        AuthFocus::LoginPassword => Some(LoginField::Password),
        _ => None,
    }
}

fn signup_field(focus: AuthFocus) -> Option<SignupField> {
    match focus {
        AuthFocus::SignupDisplayName => Some(SignupField::DisplayName),
        AuthFocus::SignupUsername => Some(SignupField::Username),
        AuthFocus::SignupPassword => Some(SignupField::Password),
        AuthFocus::SignupRepeatPassword => Some(SignupField::RepeatPassword),
        _ => None,
    }
}
