use crate::app::App;
use crate::ui::screens::{empty_panel, short_date, visible_rows};
use crate::ui::widgets::tables::{header_style, row_style, scroll_offset};
use fleetwatch::db::models::Event;
use fleetwatch::fleet::FleetData;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

fn seats(event: &Event) -> String {
    event.max_participants.map_or_else(
        || event.registered_count.to_string(),
        |max| format!("{}/{max}", event.registered_count),
    )
}

pub fn render_events(app: &App, data: &FleetData, f: &mut Frame<'_>, area: Rect) {
    if data.events.is_empty() {
        empty_panel(f, area, "Events", "No events scheduled.");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(6)])
        .split(area);

    let now = chrono::Utc::now();
    let max_visible_rows = visible_rows(chunks[0]);
    let offset = scroll_offset(data.events.len(), max_visible_rows, app.selected_index);
    let rows = data
        .events
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, event)| {
            let normal = if event.is_full() {
                Style::default().fg(Color::Red)
            } else if event.start_date < now {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            Row::new(vec![
                Cell::from(event.title.clone()),
                Cell::from(event.category.label()),
                Cell::from(short_date(&event.start_date)),
                Cell::from(event.location.name.clone()),
                Cell::from(seats(event)),
            ])
            .style(row_style(index == app.selected_index, normal))
        });

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(12),
            Constraint::Length(16),
            Constraint::Length(20),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new(vec!["Title", "Category", "Starts", "Location", "Seats"]).style(header_style()),
    )
    .block(
        Block::default()
            .title(format!(" Events ({}) ", data.events.len()))
            .borders(Borders::ALL),
    )
    .column_spacing(1);
    f.render_widget(table, chunks[0]);

    let description = data
        .events
        .get(app.selected_index)
        .map(|event| {
            let ends = event
                .end_date
                .map(|end| format!(" until {}", short_date(&end)))
                .unwrap_or_default();
            format!("{}{ends}\n{}", short_date(&event.start_date), event.description)
        })
        .unwrap_or_default();
    let paragraph = Paragraph::new(description)
        .block(Block::default().title(" Details ").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fleetwatch::db::models::EventLocation;
    use fleetwatch::domain::EventCategory;

    fn event(max_participants: Option<u32>) -> Event {
        Event {
            id: "e1".into(),
            title: "Port safety drill".into(),
            description: String::new(),
            start_date: Utc::now(),
            end_date: None,
            location: EventLocation {
                name: "Bandar Abbas".into(),
                lat: 27.18,
                lng: 56.28,
            },
            category: EventCategory::Training,
            max_participants,
            registered_count: 12,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn seats_show_capacity_when_capped() {
        assert_eq!(seats(&event(Some(40))), "12/40");
        assert_eq!(seats(&event(None)), "12");
    }
}
