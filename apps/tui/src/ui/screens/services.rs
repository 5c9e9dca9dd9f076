use crate::app::App;
use crate::ui::screens::{empty_panel, visible_rows};
use crate::ui::widgets::tables::{header_style, row_style, scroll_offset};
use fleetwatch::db::models::Service;
use fleetwatch::domain::ServiceStatus;
use fleetwatch::fleet::FleetData;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line as TextLine;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

const fn service_color(status: ServiceStatus) -> Color {
    match status {
        ServiceStatus::Approved => Color::Green,
        ServiceStatus::Pending => Color::Yellow,
        ServiceStatus::Rejected => Color::Red,
    }
}

pub fn render_services(app: &App, data: &FleetData, f: &mut Frame<'_>, area: Rect) {
    if data.services.is_empty() {
        empty_panel(f, area, "Services", "No services listed.");
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(7)])
        .split(area);

    let max_visible_rows = visible_rows(chunks[0]);
    let offset = scroll_offset(data.services.len(), max_visible_rows, app.selected_index);
    let rows = data
        .services
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, service)| {
            Row::new(vec![
                Cell::from(service.name.clone()),
                Cell::from(service.category.label()),
                Cell::from(service.status.label()),
                Cell::from(
                    service
                        .rating
                        .map_or_else(|| "-".to_string(), |rating| format!("{rating:.1}")),
                ),
            ])
            .style(row_style(
                index == app.selected_index,
                Style::default().fg(service_color(service.status)),
            ))
        });

    let table = Table::new(
        rows,
        [
            Constraint::Min(20),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(6),
        ],
    )
    .header(Row::new(vec!["Name", "Category", "Status", "Rating"]).style(header_style()))
    .block(
        Block::default()
            .title(format!(" Services ({}) ", data.services.len()))
            .borders(Borders::ALL),
    )
    .column_spacing(1);
    f.render_widget(table, chunks[0]);

    if let Some(service) = data.services.get(app.selected_index) {
        render_service_details(service, f, chunks[1]);
    }
}

fn render_service_details(service: &Service, f: &mut Frame<'_>, area: Rect) {
    let contact = [
        service.contact.phone.as_deref(),
        service.contact.email.as_deref(),
        service.contact.website.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" · ");

    let lines = vec![
        TextLine::from(service.description.clone()),
        TextLine::from(format!(
            "Location: {:.4}, {:.4}",
            service.location.lat, service.location.lng
        )),
        TextLine::from(format!("Contact: {contact}")),
    ];
    let paragraph = Paragraph::new(lines)
        .block(Block::default().title(" Details ").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
