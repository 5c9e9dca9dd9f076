use crate::app::App;
use crate::ui::screens::{empty_panel, short_date, visible_rows};
use crate::ui::widgets::charts::status_color;
use crate::ui::widgets::tables::{header_style, row_style, scroll_offset};
use fleetwatch::db::models::Vessel;
use fleetwatch::domain::{ReminderPriority, ReminderStatus};
use fleetwatch::fleet::FleetData;
use fleetwatch::geo::{bearing_deg, compass_point, distance_nm, Position};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

pub fn render_vessel_details(app: &App, data: &FleetData, f: &mut Frame<'_>, area: Rect) {
    let Some(vessel) = app.detail_vessel() else {
        empty_panel(f, area, "Vessel Details", "Vessel not found.");
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_summary(vessel, app.config.radar_center, f, columns[0]);
    render_reminders(app, data, &vessel.id, f, columns[1]);
}

fn detail_line(label: &'static str, value: String) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(format!("{label:<12}"), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn optional(value: Option<&String>) -> String {
    value.cloned().unwrap_or_else(|| "-".to_string())
}

fn optional_metres(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |metres| format!("{metres:.1} m"))
}

fn render_summary(vessel: &Vessel, center: Position, f: &mut Frame<'_>, area: Rect) {
    let distance = distance_nm(center, vessel.position);
    let bearing = bearing_deg(center, vessel.position);

    let lines = vec![
        TextLine::from(Span::styled(
            vessel.name.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        detail_line("Type", vessel.vessel_type.label().to_string()),
        TextLine::from(vec![
            Span::styled(format!("{:<12}", "Status"), Style::default().fg(Color::Gray)),
            Span::styled(
                vessel.status.label(),
                Style::default().fg(status_color(vessel.status)),
            ),
        ]),
        detail_line("Owner", vessel.owner_name.clone()),
        detail_line("Speed", format!("{:.1} kn", vessel.speed)),
        detail_line(
            "Heading",
            format!("{:.0}° {}", vessel.heading, compass_point(vessel.heading)),
        ),
        detail_line(
            "Position",
            format!("{:.4}, {:.4}", vessel.position.lat, vessel.position.lng),
        ),
        detail_line(
            "From center",
            format!("{distance:.1} NM at {bearing:.0}° {}", compass_point(bearing)),
        ),
        detail_line("MMSI", optional(vessel.mmsi.as_ref())),
        detail_line("IMO", optional(vessel.imo.as_ref())),
        detail_line("Call sign", optional(vessel.call_sign.as_ref())),
        detail_line("Flag", optional(vessel.flag.as_ref())),
        detail_line(
            "Dimensions",
            format!(
                "{} × {}, draft {}",
                optional_metres(vessel.length),
                optional_metres(vessel.beam),
                optional_metres(vessel.draft)
            ),
        ),
        detail_line("Updated", short_date(&vessel.last_update)),
    ];

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(" Vessel ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

const fn priority_color(priority: ReminderPriority) -> Color {
    match priority {
        ReminderPriority::High => Color::Red,
        ReminderPriority::Medium => Color::Yellow,
        ReminderPriority::Low => Color::Gray,
    }
}

fn render_reminders(app: &App, data: &FleetData, vessel_id: &str, f: &mut Frame<'_>, area: Rect) {
    let reminders = data.reminders_for(vessel_id).collect::<Vec<_>>();
    if reminders.is_empty() {
        empty_panel(f, area, "Reminders", "No reminders for this vessel.");
        return;
    }

    let rows_area = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(5)])
        .split(area);

    let max_visible_rows = visible_rows(rows_area[0]);
    let offset = scroll_offset(reminders.len(), max_visible_rows, app.reminder_index);
    let rows = reminders
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, reminder)| {
            let normal = if reminder.status == ReminderStatus::Completed {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(priority_color(reminder.priority))
            };
            Row::new(vec![
                Cell::from(reminder.title.clone()),
                Cell::from(reminder.category.label()),
                Cell::from(reminder.priority.label()),
                Cell::from(reminder.status.label()),
                Cell::from(reminder.due_date.format("%Y-%m-%d").to_string()),
            ])
            .style(row_style(index == app.reminder_index, normal))
        });

    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(11),
            Constraint::Length(8),
            Constraint::Length(11),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["Title", "Category", "Priority", "Status", "Due"]).style(header_style()),
    )
    .block(
        Block::default()
            .title(format!(" Reminders ({}) ", reminders.len()))
            .borders(Borders::ALL),
    )
    .column_spacing(1);
    f.render_widget(table, rows_area[0]);

    let description = reminders
        .get(app.reminder_index)
        .map(|reminder| reminder.description.clone())
        .unwrap_or_default();
    let paragraph = Paragraph::new(description)
        .block(Block::default().title(" Description ").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, rows_area[1]);
}
