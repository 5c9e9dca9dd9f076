use crate::app::state::{Toast, ToastKind};
use crate::ui::widgets::popup::ClearWidget;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

const TOAST_WIDTH: u16 = 44;
const TOAST_HEIGHT: u16 = 4;

const fn toast_color(kind: ToastKind) -> Color {
    match kind {
        ToastKind::Success => Color::Green,
        ToastKind::Destructive => Color::Red,
    }
}

/// Top-right corner of `area`, one cell in from the edges.
pub fn toast_area(area: Rect) -> Rect {
    let width = TOAST_WIDTH.min(area.width.saturating_sub(2));
    let height = TOAST_HEIGHT.min(area.height);
    Rect {
        x: area.x + area.width.saturating_sub(width + 1),
        y: area.y + 1.min(area.height.saturating_sub(height)),
        width,
        height,
    }
}

pub fn render_toast(f: &mut Frame<'_>, area: Rect, toast: &Toast) {
    let color = toast_color(toast.kind);
    let popup = toast_area(area);
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", toast.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let paragraph = Paragraph::new(TextLine::from(toast.message.clone()))
        .block(block)
        .wrap(Wrap { trim: true });

    f.render_widget(ClearWidget, popup);
    f.render_widget(paragraph, popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_sits_in_the_top_right_corner() {
        let area = toast_area(Rect::new(0, 0, 120, 40));
        assert_eq!(area, Rect::new(75, 1, 44, 4));
    }

    #[test]
    fn toast_shrinks_on_tiny_terminals() {
        let area = toast_area(Rect::new(0, 0, 20, 3));
        assert_eq!(area.width, 18);
        assert_eq!(area.height, 3);
        assert_eq!(area.y, 0);
    }
}
