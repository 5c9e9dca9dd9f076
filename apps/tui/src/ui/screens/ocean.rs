use crate::app::App;
use crate::ui::screens::{empty_panel, short_date, visible_rows};
use crate::ui::widgets::tables::{header_style, row_style, scroll_offset};
use fleetwatch::db::models::OceanReading;
use fleetwatch::fleet::FleetData;
use fleetwatch::geo::compass_point;
use fleetwatch::snapshot::{ocean_averages, OceanAverages};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

pub fn render_ocean(app: &App, data: &FleetData, f: &mut Frame<'_>, area: Rect) {
    let Some(latest) = data.latest_reading() else {
        empty_panel(f, area, "Ocean", "No ocean readings recorded.");
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(5)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[0]);

    render_latest(latest, f, top[0]);
    render_averages(&ocean_averages(&data.readings), data.alert_rules.len(), f, top[1]);
    render_readings(app, &data.readings, f, rows[1]);
}

fn reading_line(label: &'static str, value: String) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(format!("{label:<12}"), Style::default().fg(Color::Gray)),
        Span::raw(value),
    ])
}

fn period(seconds: Option<f64>) -> String {
    seconds.map_or_else(String::new, |seconds| format!(", {seconds:.0} s"))
}

fn render_latest(reading: &OceanReading, f: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        reading_line(
            "Wind",
            format!(
                "{:.1} kn from {}",
                reading.wind.speed,
                compass_point(reading.wind.direction)
            ),
        ),
        reading_line(
            "Waves",
            format!("{:.1} m{}", reading.wave.height, period(reading.wave.period)),
        ),
        reading_line(
            "Swell",
            format!(
                "{:.1} m from {}{}",
                reading.swell.height,
                compass_point(reading.swell.direction),
                period(reading.swell.period)
            ),
        ),
        reading_line(
            "Current",
            format!(
                "{:.1} kn toward {}",
                reading.current.speed,
                compass_point(reading.current.direction)
            ),
        ),
        reading_line(
            "Temperature",
            format!(
                "air {:.1} °C, sea {:.1} °C",
                reading.temperature.air, reading.temperature.sea
            ),
        ),
        reading_line(
            "Visibility",
            format!("{:.1} NM, Beaufort {}", reading.visibility, reading.beaufort),
        ),
        reading_line(
            "Position",
            format!("{:.3}, {:.3}", reading.position.lat, reading.position.lng),
        ),
        reading_line("Observed", short_date(&reading.timestamp)),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Latest Reading ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}

fn render_averages(averages: &OceanAverages, rules: usize, f: &mut Frame<'_>, area: Rect) {
    let lines = vec![
        reading_line("Readings", averages.readings.to_string()),
        reading_line("Wave height", format!("{:.2} m", averages.wave_height)),
        reading_line("Wind speed", format!("{:.2} kn", averages.wind_speed)),
        reading_line("Sea temp", format!("{:.2} °C", averages.sea_temperature)),
        reading_line("Air temp", format!("{:.2} °C", averages.air_temperature)),
        TextLine::from(""),
        TextLine::from(Span::styled(
            format!("e: check latest against {rules} alert rules"),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Averages ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}

fn render_readings(app: &App, readings: &[OceanReading], f: &mut Frame<'_>, area: Rect) {
    let max_visible_rows = visible_rows(area);
    let offset = scroll_offset(readings.len(), max_visible_rows, app.selected_index);

    let rows = readings
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, reading)| {
            Row::new(vec![
                Cell::from(short_date(&reading.timestamp)),
                Cell::from(format!(
                    "{:>4.1} {:<3}",
                    reading.wind.speed,
                    compass_point(reading.wind.direction)
                )),
                Cell::from(format!("{:.1}", reading.wave.height)),
                Cell::from(format!("{:.1}", reading.temperature.sea)),
                Cell::from(format!("{:.1}", reading.visibility)),
                Cell::from(reading.beaufort.to_string()),
                Cell::from(reading.vessel_id.clone().unwrap_or_default()),
            ])
            .style(row_style(index == app.selected_index, Style::default()))
        });

    let table = Table::new(
        rows,
        [
            Constraint::Length(16),
            Constraint::Length(9),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(4),
            Constraint::Min(6),
        ],
    )
    .header(
        Row::new(vec!["Time", "Wind kn", "Wave", "Sea", "Vis", "Bft", "Vessel"])
            .style(header_style()),
    )
    .block(
        Block::default()
            .title(format!(" Readings ({}) ", readings.len()))
            .borders(Borders::ALL),
    )
    .column_spacing(1);
    f.render_widget(table, area);
}
