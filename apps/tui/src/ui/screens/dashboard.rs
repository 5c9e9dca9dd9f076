use crate::app::App;
use crate::ui::screens::{empty_panel, short_date, visible_rows};
use crate::ui::widgets::charts::{render_status_chart, status_color};
use crate::ui::widgets::radar::render_mini_radar;
use crate::ui::widgets::tables::{header_style, row_style, scroll_offset};
use fleetwatch::domain::{ServiceStatus, VesselStatus};
use fleetwatch::fleet::FleetData;
use fleetwatch::radar::RadarScope;
use fleetwatch::snapshot::{self, FleetSnapshot};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

pub fn render_dashboard(app: &App, data: &FleetData, f: &mut Frame<'_>, area: Rect) {
    let stats = snapshot::compute(&data.snapshot_input(), chrono::Utc::now());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Min(8)])
        .split(area);
    render_counters(f, rows[0], &stats);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[1]);

    let scope = RadarScope::new(app.config.radar_center, app.config.radar_range_nm);
    render_mini_radar(f, columns[0], &scope, &data.vessels);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(5)])
        .split(columns[1]);
    render_status_chart(f, right[0], &stats.vessels);
    render_vessel_list(app, data, f, right[1]);
}

fn counter<'a>(label: &'a str, value: String, color: Color) -> [Span<'a>; 2] {
    [
        Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
        Span::styled(
            format!("{value:<8}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ]
}

fn render_counters(f: &mut Frame<'_>, area: Rect, stats: &FleetSnapshot) {
    let fleet_line = [
        counter("Vessels", stats.vessels.total.to_string(), Color::White),
        counter(
            "Active",
            stats.vessels.status(VesselStatus::Active).to_string(),
            Color::Green,
        ),
        counter(
            "Pending",
            stats.vessels.status(VesselStatus::Pending).to_string(),
            Color::Yellow,
        ),
        counter("Open reminders", stats.open_reminders.to_string(), Color::Magenta),
    ];
    let ocean_line = [
        counter("Wave", format!("{:.1} m", stats.ocean.wave_height), Color::Cyan),
        counter("Wind", format!("{:.1} kn", stats.ocean.wind_speed), Color::Cyan),
        counter("Sea", format!("{:.1} °C", stats.ocean.sea_temperature), Color::Cyan),
        counter("Air", format!("{:.1} °C", stats.ocean.air_temperature), Color::Cyan),
    ];
    let activity_line = [
        counter("Upcoming events", stats.events.upcoming.to_string(), Color::White),
        counter(
            "Pending services",
            stats.services.status(ServiceStatus::Pending).to_string(),
            Color::Yellow,
        ),
        counter("Unread alerts", stats.unread_alerts.to_string(), Color::Red),
        counter("Unread news", stats.unread_news.to_string(), Color::White),
    ];

    let lines = [fleet_line, ocean_line, activity_line]
        .into_iter()
        .map(|counters| TextLine::from(counters.into_iter().flatten().collect::<Vec<_>>()))
        .collect::<Vec<_>>();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Fleet Overview ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}

fn render_vessel_list(app: &App, data: &FleetData, f: &mut Frame<'_>, area: Rect) {
    if data.vessels.is_empty() {
        empty_panel(f, area, "Vessels", "No vessels to show.");
        return;
    }

    let max_visible_rows = visible_rows(area);
    let offset = scroll_offset(data.vessels.len(), max_visible_rows, app.selected_index);
    let rows = data
        .vessels
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, vessel)| {
            let style = row_style(
                index == app.selected_index,
                Style::default().fg(status_color(vessel.status)),
            );
            Row::new(vec![
                Cell::from(vessel.name.clone()),
                Cell::from(vessel.status.label()),
                Cell::from(format!("{:.1} kn", vessel.speed)),
                Cell::from(short_date(&vessel.last_update)),
            ])
            .style(style)
        });

    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(17),
        ],
    )
    .header(
        Row::new(vec!["Name", "Status", "Speed", "Updated"]).style(header_style()),
    )
    .block(
        Block::default()
            .title(format!(" Vessels ({}) ", data.vessels.len()))
            .borders(Borders::ALL),
    )
    .column_spacing(1);

    f.render_widget(table, area);
}
