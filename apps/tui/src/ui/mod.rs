// Rendering for every screen plus the shared frame around them

pub mod screens;
pub mod widgets;

use crate::app::state::{AppScreen, LoadState};
use crate::app::App;
use crate::ui::widgets::hints::key_hints;
use crate::ui::widgets::toast::render_toast;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;
use throbber_widgets_tui::Throbber;

const TAB_KEYS: &str = "1234567890";

/// Splits the terminal into tab bar, screen body and key hint footer.
pub fn frame_chunks(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(5),    // Screen
            Constraint::Length(2), // Key hints
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let (header, body, footer) = frame_chunks(f.area());

    render_tabs(app, f, header);
    match &app.data {
        LoadState::NotLoaded => render_loading(app, f, body),
        LoadState::Loaded(data) => screens::render_screen(app, data, f, body),
    }
    render_footer(app, f, footer);

    if app.show_help {
        screens::help::render_help(app, f, f.area());
    }
    if let Some(toast) = &app.toast {
        render_toast(f, f.area(), toast);
    }
}

fn render_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = AppScreen::TABS
        .iter()
        .zip(TAB_KEYS.chars())
        .map(|(screen, key)| TextLine::from(format!("{key} {}", screen.title())))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" Fleetwatch ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .select(app.screen.tab_index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Rgb(0, 0, 238))
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

fn render_loading(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!(" {} ", app.screen.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let line = Rect {
        x: inner.x + inner.width.saturating_sub(24) / 2,
        y: inner.y + inner.height / 2,
        width: 24.min(inner.width),
        height: 1.min(inner.height),
    };
    let throbber = Throbber::default()
        .label("Loading fleet data...")
        .style(Style::default().fg(Color::Cyan))
        .throbber_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(throbber, line, &mut app.throbber.clone());
}

fn render_footer(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default().borders(Borders::TOP);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(32)])
        .split(inner);

    let hints = Paragraph::new(key_hints(screens::hints_for(app))).alignment(Alignment::Left);
    f.render_widget(hints, columns[0]);

    let user = &app.config.current_user;
    let mut spans = Vec::new();
    if app.pending_actions > 0 {
        spans.push(Span::styled("saving… ", Style::default().fg(Color::Yellow)));
    }
    spans.extend([
        Span::styled(user.name.clone(), Style::default().fg(Color::White)),
        Span::styled(
            format!(" ({})", user.role.label()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let who = Paragraph::new(TextLine::from(spans)).alignment(Alignment::Right);
    f.render_widget(who, columns[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_keeps_header_and_footer_heights() {
        let (header, body, footer) = frame_chunks(Rect::new(0, 0, 100, 40));
        assert_eq!(header.height, 3);
        assert_eq!(footer.height, 2);
        assert_eq!(body.height, 35);
        assert_eq!(body.y, 3);
    }
}
