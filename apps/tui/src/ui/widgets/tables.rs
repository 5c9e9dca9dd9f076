use ratatui::style::{Color, Modifier, Style};

/// First row to draw so `selected_index` stays inside a window of
/// `max_visible_rows`.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows || selected_index < max_visible_rows {
        return 0;
    }

    selected_index + 1 - max_visible_rows
}

/// Style for a row, highlighted when it is the selection.
pub fn row_style(is_selected: bool, normal: Style) -> Style {
    if is_selected {
        Style::default()
            .bg(Color::Rgb(0, 0, 238))
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        normal
    }
}

pub fn header_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lists_never_scroll() {
        assert_eq!(scroll_offset(5, 10, 4), 0);
    }

    #[test]
    fn selection_past_the_window_scrolls_it_into_view() {
        assert_eq!(scroll_offset(30, 10, 3), 0);
        assert_eq!(scroll_offset(30, 10, 10), 1);
        assert_eq!(scroll_offset(30, 10, 29), 20);
    }
}
