use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};

/// Footer hint line: each key in bold yellow followed by what it does.
pub fn key_hints(hints: &[(&'static str, &'static str)]) -> TextLine<'static> {
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (index, (key, action)) in hints.iter().enumerate() {
        spans.push(Span::styled(*key, key_style));
        let gap = if index + 1 == hints.len() { "" } else { "   " };
        spans.push(Span::raw(format!(": {action}{gap}")));
    }
    TextLine::from(spans)
}
