use crate::app::App;
use crate::ui::screens::hints_for;
use crate::ui::widgets::popup::{centered_rect, ClearWidget};
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const GLOBAL_KEYS: [(&str, &str); 6] = [
    ("1-9, 0", "Switch screen"),
    ("F5 / R", "Reload data"),
    ("PgUp/PgDn", "Jump 5 rows"),
    ("Home/End", "First/last row"),
    ("F1 / ?", "Toggle this help"),
    ("q / Ctrl+C", "Quit"),
];

fn key_line(key: &str, action: &str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(
            format!("  {key:<14}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(action.to_string()),
    ])
}

fn section(title: &str) -> TextLine<'static> {
    TextLine::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

pub fn render_help(app: &App, f: &mut Frame<'_>, area: Rect) {
    let popup = centered_rect(60, 70, area);

    let mut lines = vec![section("Everywhere")];
    lines.extend(GLOBAL_KEYS.iter().map(|(key, action)| key_line(key, action)));
    lines.push(TextLine::from(""));
    lines.push(section(app.screen.title()));
    lines.extend(
        hints_for(app)
            .iter()
            .map(|(key, action)| key_line(key, action)),
    );
    lines.push(TextLine::from(""));
    let role = if app.is_admin() {
        "Signed in as admin: approvals, deletions and user changes are enabled."
    } else {
        "Signed in as client: only your own vessels are listed."
    };
    lines.push(TextLine::from(Span::styled(
        role,
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Help · ESC to close ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(ClearWidget, popup);
    f.render_widget(paragraph, popup);
}
