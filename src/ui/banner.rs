use figlet_rs::FIGfont;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Figlet title across the top of both screens. Falls back to plain text
/// if the standard font fails to load.
pub fn draw_banner(f: &mut Frame, area: Rect) {
    let rendered = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("WAYPOINT").map(|fig| fig.to_string()))
        .unwrap_or_else(|| "W A Y P O I N T".to_string());

    let lines: Vec<Line> = rendered
        .lines()
        .map(|line| {
            Line::from(Span::styled(
                line.to_string(),
                Style::default().fg(Color::Magenta),
            ))
        })
        .collect();

    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}
