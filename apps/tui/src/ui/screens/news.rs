use crate::app::App;
use crate::ui::screens::{empty_panel, short_date, visible_rows};
use crate::ui::widgets::tables::{header_style, row_style, scroll_offset};
use fleetwatch::db::queries::regions::region_name;
use fleetwatch::domain::NewsCategory;
use fleetwatch::fleet::FleetData;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

pub fn render_news(app: &App, data: &FleetData, f: &mut Frame<'_>, area: Rect) {
    if data.news.is_empty() {
        empty_panel(f, area, "News", "No news.");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(7)])
        .split(area);

    let unread = data.news.iter().filter(|item| !item.is_read).count();
    let max_visible_rows = visible_rows(chunks[0]);
    let offset = scroll_offset(data.news.len(), max_visible_rows, app.selected_index);
    let rows = data
        .news
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, item)| {
            let mut normal = if item.category == NewsCategory::Warning {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::White)
            };
            if !item.is_read {
                normal = normal.add_modifier(Modifier::BOLD);
            }
            Row::new(vec![
                Cell::from(if item.is_read { " " } else { "●" }),
                Cell::from(item.title.clone()),
                Cell::from(item.category.label()),
                Cell::from(
                    item.region_id
                        .as_deref()
                        .map(|id| region_name(&data.regions, id).to_string())
                        .unwrap_or_default(),
                ),
                Cell::from(short_date(&item.published_at)),
            ])
            .style(row_style(index == app.selected_index, normal))
        });

    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Min(24),
            Constraint::Length(13),
            Constraint::Length(18),
            Constraint::Length(16),
        ],
    )
    .header(
        Row::new(vec!["", "Title", "Category", "Region", "Published"]).style(header_style()),
    )
    .block(
        Block::default()
            .title(format!(" News ({unread} unread) "))
            .borders(Borders::ALL),
    )
    .column_spacing(1);
    f.render_widget(table, chunks[0]);

    let content = data
        .news
        .get(app.selected_index)
        .map(|item| item.content.clone())
        .unwrap_or_default();
    let paragraph = Paragraph::new(content)
        .block(Block::default().title(" Article ").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, chunks[1]);
}
