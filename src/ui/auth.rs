//! Login and signup screens.

use crate::app::App;
use crate::state::{AuthFocus, LoginField, SignupField};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

struct FieldView<'a> {
    label: &'a str,
    display: String,
    cursor_col: u16,
    focused: bool,
    error: Option<&'a str>,
}

/// One bordered input box plus the error line beneath it. Errored fields
/// get a red border; the focused field gets the yellow highlight and the
/// cursor.
fn draw_field(f: &mut Frame, input_area: Rect, error_area: Rect, view: FieldView) {
    let mut block = Block::default().borders(Borders::ALL).title(view.label);
    if view.error.is_some() {
        block = block.border_style(Style::default().fg(Color::Red));
    }
    let style = if view.focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    f.render_widget(
        Paragraph::new(view.display).block(block).style(style),
        input_area,
    );

    if let Some(message) = view.error {
        f.render_widget(
            Paragraph::new(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Red),
            )),
            error_area,
        );
    }

    if view.focused {
        f.set_cursor_position((input_area.x + view.cursor_col + 1, input_area.y + 1));
    }
}

fn draw_buttons(
    f: &mut Frame,
    area: Rect,
    app: &App,
    submit_label: &str,
    switch_label: &str,
    can_submit: bool,
) {
    let button_area = Layout::default()
        .margin(1)
        .constraints([Constraint::Length(3)])
        .split(area)[0];
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(button_area);

    let submit_style = if app.focus == AuthFocus::Submit {
        Style::default().bg(Color::Cyan).fg(Color::Black)
    } else if !can_submit {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    f.render_widget(
        Paragraph::new(Span::styled(submit_label.to_string(), submit_style))
            .alignment(Alignment::Center),
        halves[0],
    );

    let switch_style = if app.focus == AuthFocus::Switch {
        Style::default().bg(Color::Magenta).fg(Color::Black)
    } else {
        Style::default()
    };
    f.render_widget(
        Paragraph::new(Span::styled(switch_label.to_string(), switch_style))
            .alignment(Alignment::Center),
        halves[1],
    );
}

fn masked(value: &str) -> String {
    "*".repeat(value.chars().count())
}

pub fn draw_login(f: &mut Frame, app: &App, area: Rect) {
    let outer_block = Block::default().title("Login").borders(Borders::ALL);
    f.render_widget(outer_block, area);
    let chunks = Layout::default()
        .margin(2)
        .constraints([
            Constraint::Length(3), // username
            Constraint::Length(1),
            Constraint::Length(3), // password
            Constraint::Length(1),
            Constraint::Length(1), // form-level banner
            Constraint::Min(1),    // buttons
        ])
        .split(area);

    let username = app.login.value(LoginField::Username);
    draw_field(
        f,
        chunks[0],
        chunks[1],
        FieldView {
            label: "Username",
            display: username.to_string(),
            cursor_col: username.chars().count() as u16,
            focused: app.focus == AuthFocus::LoginUsername,
            error: app.login.error(LoginField::Username),
        },
    );

    let password = app.login.value(LoginField::Password);
    draw_field(
        f,
        chunks[2],
        chunks[3],
        FieldView {
            label: "Password",
            display: masked(password),
            cursor_col: password.chars().count() as u16,
            focused: app.focus == AuthFocus::LoginPassword,
            error: app.login.error(LoginField::Password),
        },
    );

    if let Some(banner) = app.login.form_error() {
        f.render_widget(
            Paragraph::new(Span::styled(
                banner.to_string(),
                Style::default().fg(Color::Red),
            ))
            .alignment(Alignment::Center),
            chunks[4],
        );
    }

    let submit_label = if app.login.is_submitting() {
        "[ SIGNING IN... ]"
    } else {
        "[ LOGIN ]"
    };
    draw_buttons(
        f,
        chunks[5],
        app,
        submit_label,
        "[ To Sign Up ]",
        app.login.can_submit(),
    );
}

pub fn draw_signup(f: &mut Frame, app: &App, area: Rect) {
    let outer_block = Block::default().title("Sign Up").borders(Borders::ALL);
    f.render_widget(outer_block, area);
    let chunks = Layout::default()
        .margin(2)
        .constraints([
            Constraint::Length(3), // display name
            Constraint::Length(1),
            Constraint::Length(3), // username
            Constraint::Length(1),
            Constraint::Length(3), // password
            Constraint::Length(1),
            Constraint::Length(3), // repeat password
            Constraint::Length(1),
            Constraint::Min(1), // buttons
        ])
        .split(area);

    let fields = [
        (
            SignupField::DisplayName,
            AuthFocus::SignupDisplayName,
            "Your display name",
            false,
        ),
        (
            SignupField::Username,
            AuthFocus::SignupUsername,
            "Your username",
            false,
        ),
        (
            SignupField::Password,
            AuthFocus::SignupPassword,
            "Your password",
            true,
        ),
        (
            SignupField::RepeatPassword,
            AuthFocus::SignupRepeatPassword,
            "Repeat your password",
            true,
        ),
    ];

    for (i, (field, focus, label, mask)) in fields.into_iter().enumerate() {
        let value = app.signup.value(field);
        draw_field(
            f,
            chunks[i * 2],
            chunks[i * 2 + 1],
            FieldView {
                label,
                display: if mask {
                    masked(value)
                } else {
                    value.to_string()
                },
                cursor_col: value.chars().count() as u16,
                focused: app.focus == focus,
                error: app.signup.error(field),
            },
        );
    }

    let submit_label = if app.signup.is_submitting() {
        "[ CREATING ACCOUNT... ]"
    } else {
        "[ CREATE ACCOUNT ]"
    };
    draw_buttons(
        f,
        chunks[8],
        app,
        submit_label,
        "[ To Login ]",
        app.signup.can_submit(),
    );
}
