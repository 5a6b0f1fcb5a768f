//! Main UI module. Re-exports submodules and provides the main entry point.

pub mod auth;
pub mod banner;

use crate::app::App;
use crate::state::AppMode;
use ratatui::Frame;

pub fn ui(f: &mut Frame, app: &App) {
    let size = f.area();
    let chunks = ratatui::layout::Layout::default()
        .constraints([
            ratatui::layout::Constraint::Length(7), // Banner
            ratatui::layout::Constraint::Min(0),    // Main content
            ratatui::layout::Constraint::Length(2), // Footer
        ])
        .split(size);

    banner::draw_banner(f, chunks[0]);

    match app.mode {
        AppMode::Login => auth::draw_login(f, app, chunks[1]),
        AppMode::Signup => auth::draw_signup(f, app, chunks[1]),
    }

    let help_text = "[Esc] Quit | [Tab]/[Shift+Tab] Change Focus | [Enter] Select/Submit";
    f.render_widget(
        ratatui::widgets::Paragraph::new(help_text)
            .block(ratatui::widgets::Block::default().borders(ratatui::widgets::Borders::TOP)),
        chunks[2],
    );
}
