mod animation;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::rc::Rc;

use animation::{advance_sweep, AnimationMode, SweepState};
use ratzilla::ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{
        canvas::{Canvas, Circle, Line as CanvasLine, Points},
        Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Scrollbar,
        ScrollbarOrientation, ScrollbarState, Table, Tabs, Wrap,
    },
    Frame, Terminal,
};
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Request, RequestInit, RequestMode, Response};

const EXPORT_FILE: &str = "fleet.json";
const STATUSES: [&str; 5] = ["active", "approved", "pending", "inactive", "rejected"];
const TABLE_ROWS: usize = 10;
const FOOTER_HEIGHT: u16 = 14;
/// Degrees of fading trail drawn behind the sweep line.
const SWEEP_TRAIL_DEG: f64 = 30.0;

#[derive(serde::Deserialize)]
struct FleetExport {
    generated_at: String,
    center: Position,
    range_nm: f64,
    snapshot: Snapshot,
    vessels: Vec<Vessel>,
    targets: Vec<Target>,
    latest_reading: Option<Reading>,
}

#[derive(serde::Deserialize, Clone, Copy)]
struct Position {
    lat: f64,
    lng: f64,
}

#[derive(serde::Deserialize, Default)]
#[serde(default)]
struct Snapshot {
    vessels: VesselCounts,
    ocean: OceanAverages,
    events: EventCounts,
    unread_alerts: u64,
    unread_news: u64,
    open_reminders: u64,
}

#[derive(serde::Deserialize, Default)]
#[serde(default)]
struct VesselCounts {
    total: u64,
    by_status: BTreeMap<String, u64>,
}

#[derive(serde::Deserialize, Default)]
#[serde(default)]
struct OceanAverages {
    wave_height: f64,
    wind_speed: f64,
    sea_temperature: f64,
}

#[derive(serde::Deserialize, Default)]
#[serde(default)]
struct EventCounts {
    upcoming: u64,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct Vessel {
    name: String,
    #[serde(rename = "type")]
    vessel_type: String,
    status: String,
    #[serde(default)]
    owner_name: String,
    speed: f64,
    heading: f64,
    position: Position,
    #[serde(default)]
    mmsi: Option<String>,
}

#[derive(serde::Deserialize)]
struct Target {
    name: String,
    status: String,
    distance_nm: f64,
    bearing_deg: f64,
}

#[derive(serde::Deserialize)]
struct Reading {
    timestamp: String,
    wind: Directional,
    wave: Wave,
    temperature: Temperature,
}

#[derive(serde::Deserialize)]
struct Directional {
    speed: f64,
    direction: f64,
}

#[derive(serde::Deserialize)]
struct Wave {
    height: f64,
}

#[derive(serde::Deserialize)]
struct Temperature {
    sea: f64,
}

fn main() -> io::Result<()> {
    let data = Rc::new(RefCell::new(None::<FleetExport>));
    let tab_index = Rc::new(RefCell::new(0_usize));
    let row_offset = Rc::new(RefCell::new(0_usize));
    let mode = Rc::new(RefCell::new(AnimationMode::Running));
    let sweep = Rc::new(RefCell::new(SweepState::default()));

    spawn_local(fetch_fleet(data.clone()));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let tab_index = tab_index.clone();
        let row_offset = row_offset.clone();
        let mode = mode.clone();
        move |event| match event.code {
            ratzilla::event::KeyCode::Left | ratzilla::event::KeyCode::Right => {
                let mut index = tab_index.borrow_mut();
                *index = 1 - *index;
                *row_offset.borrow_mut() = 0;
            }
            ratzilla::event::KeyCode::Up => {
                let mut offset = row_offset.borrow_mut();
                *offset = offset.saturating_sub(1);
            }
            ratzilla::event::KeyCode::Down => {
                let mut offset = row_offset.borrow_mut();
                *offset = (*offset + 1).min(2000);
            }
            ratzilla::event::KeyCode::Char(key @ ('1' | '2')) => {
                *tab_index.borrow_mut() = usize::from(key == '2');
                *row_offset.borrow_mut() = 0;
            }
            ratzilla::event::KeyCode::Char(' ') => {
                let mut mode = mode.borrow_mut();
                *mode = match *mode {
                    AnimationMode::Running => AnimationMode::Paused,
                    AnimationMode::Paused => AnimationMode::Running,
                };
            }
            _ => {}
        }
    });

    terminal.draw_web(move |f| {
        let next = advance_sweep(*sweep.borrow(), js_sys::Date::now(), *mode.borrow());
        *sweep.borrow_mut() = next;

        let area = f.area();
        let block = Block::default()
            .title("Fleetwatch")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray));
        let inner = block.inner(area).inner(Margin::new(1, 1));
        f.render_widget(block, area);

        let data = data.borrow();
        if let Some(export) = data.as_ref() {
            let index = *tab_index.borrow();
            let row_offset = *row_offset.borrow();
            render_dashboard(export, next.angle_deg, index, row_offset, f, inner);
        } else {
            let paragraph =
                Paragraph::new(Text::from(TextLine::from(format!("Loading {EXPORT_FILE}..."))))
                    .alignment(Alignment::Center);
            f.render_widget(paragraph, inner);
        }
    });

    Ok(())
}

fn render_dashboard(
    export: &FleetExport,
    sweep_deg: f64,
    tab_index: usize,
    row_offset: usize,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    render_header(export, f, main_layout[0]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(main_layout[1]);

    render_radar_panel(export, sweep_deg, f, content[0]);
    render_status_chart(export, f, content[1]);
    render_footer(export, tab_index, row_offset, f, main_layout[2]);
}

fn render_header(export: &FleetExport, f: &mut Frame<'_>, area: Rect) {
    let stats = &export.snapshot;
    let label = Style::default().fg(Color::Gray);
    let value = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

    let fleet_line = TextLine::from(vec![
        Span::styled("Vessels ", label),
        Span::styled(stats.vessels.total.to_string(), value),
        Span::styled("  In range ", label),
        Span::styled(export.targets.len().to_string(), value),
        Span::styled("  Upcoming events ", label),
        Span::styled(stats.events.upcoming.to_string(), value),
        Span::styled("  Unread alerts ", label),
        Span::styled(stats.unread_alerts.to_string(), value),
        Span::styled("  Unread news ", label),
        Span::styled(stats.unread_news.to_string(), value),
        Span::styled("  Open reminders ", label),
        Span::styled(stats.open_reminders.to_string(), value),
    ]);

    let ocean = export.latest_reading.as_ref().map_or_else(
        || {
            format!(
                "Averages: wave {:.1} m, wind {:.1} kn, sea {:.1} °C",
                stats.ocean.wave_height, stats.ocean.wind_speed, stats.ocean.sea_temperature
            )
        },
        |reading| {
            format!(
                "Latest {}: wind {:.1} kn from {:.0}°, wave {:.1} m, sea {:.1} °C",
                reading.timestamp.get(..16).unwrap_or(&reading.timestamp),
                reading.wind.speed,
                reading.wind.direction,
                reading.wave.height,
                reading.temperature.sea
            )
        },
    );

    let block = Block::default()
        .title(format!(
            "Overview · generated {}",
            export.generated_at.get(..16).unwrap_or(&export.generated_at)
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(Text::from(vec![
        fleet_line,
        TextLine::from(Span::styled(ocean, label)),
    ]))
    .block(block)
    .alignment(Alignment::Left)
    .wrap(Wrap { trim: true });

    f.render_widget(paragraph, area);
}

/// Canvas offset for a point `distance` out along `bearing_deg`, north up.
fn polar(bearing_deg: f64, distance: f64) -> (f64, f64) {
    let (sin, cos) = bearing_deg.to_radians().sin_cos();
    (sin * distance, cos * distance)
}

fn render_radar_panel(export: &FleetExport, sweep_deg: f64, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(format!(
            "Radar · {:.0} NM · {:.3}, {:.3}",
            export.range_nm, export.center.lat, export.center.lng
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Cells are about twice as tall as wide.
    let width = inner.width.min(inner.height.saturating_mul(2));
    let height = width / 2;
    let square = Rect {
        x: inner.x + (inner.width - width) / 2,
        y: inner.y + (inner.height - height) / 2,
        width,
        height,
    };

    let blips = export
        .targets
        .iter()
        .map(|target| {
            let ratio = target.distance_nm / export.range_nm;
            (polar(target.bearing_deg, ratio), status_color(&target.status))
        })
        .collect::<Vec<_>>();

    let canvas = Canvas::default()
        .background_color(Color::Rgb(0, 20, 0))
        .x_bounds([-1.1, 1.1])
        .y_bounds([-1.1, 1.1])
        .paint(move |ctx| {
            for ring in 1..=4 {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: f64::from(ring) / 4.0,
                    color: Color::Rgb(0, 90, 0),
                });
            }
            ctx.draw(&CanvasLine {
                x1: 0.0,
                y1: -1.0,
                x2: 0.0,
                y2: 1.0,
                color: Color::Rgb(0, 70, 0),
            });
            ctx.draw(&CanvasLine {
                x1: -1.0,
                y1: 0.0,
                x2: 1.0,
                y2: 0.0,
                color: Color::Rgb(0, 70, 0),
            });

            let mut trail = 0.0;
            while trail < SWEEP_TRAIL_DEG {
                let fade = 1.0 - trail / SWEEP_TRAIL_DEG;
                let (x, y) = polar(sweep_deg - trail, 1.0);
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: 0.0,
                    x2: x,
                    y2: y,
                    color: Color::Rgb(0, (60.0 + 195.0 * fade) as u8, 0),
                });
                trail += 2.0;
            }

            ctx.layer();
            for ((x, y), color) in &blips {
                ctx.draw(&Points {
                    coords: &[(*x, *y)],
                    color: *color,
                });
            }
            ctx.print(-0.03, 1.05, Span::styled("N", Style::default().fg(Color::White)));
        });
    f.render_widget(canvas, square);
}

fn status_color(status: &str) -> Color {
    match status {
        "active" => Color::Green,
        "approved" => Color::Cyan,
        "pending" => Color::Yellow,
        "rejected" => Color::Red,
        _ => Color::Gray,
    }
}

fn render_status_chart(export: &FleetExport, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title("Vessel Status")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let counts = STATUSES.map(|status| {
        export
            .snapshot
            .vessels
            .by_status
            .get(status)
            .copied()
            .unwrap_or(0)
    });

    let bars: Vec<Bar<'_>> = STATUSES
        .iter()
        .zip(counts)
        .map(|(status, count)| {
            Bar::default()
                .value(count)
                .label(TextLine::from(*status))
                .style(Style::default().fg(status_color(status)))
                .value_style(Style::default().fg(Color::White))
        })
        .collect();

    let max_value = counts.iter().copied().max().unwrap_or(0).max(1);
    let chart = BarChart::default()
        .block(Block::default())
        .data(BarGroup::default().bars(&bars))
        .max(max_value)
        .bar_gap(1)
        .bar_width(8);
    f.render_widget(chart, inner.inner(Margin::new(1, 1)));
}

fn render_footer(
    export: &FleetExport,
    tab_index: usize,
    row_offset: usize,
    f: &mut Frame<'_>,
    area: Rect,
) {
    let titles = ["Vessels", "Radar targets"]
        .iter()
        .map(|title| TextLine::from(*title))
        .collect::<Vec<_>>();
    let info = TextLine::from(vec![
        Span::styled("1-2/←→", Style::default().fg(Color::Gray)),
        Span::raw(" tables  "),
        Span::styled("↑↓", Style::default().fg(Color::Gray)),
        Span::raw(" scroll  "),
        Span::styled("Space", Style::default().fg(Color::Gray)),
        Span::raw(" pause sweep"),
    ]);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let tabs = Tabs::new(titles)
        .select(tab_index)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(0, 0, 238))
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(Paragraph::new(info).alignment(Alignment::Center), layout[0]);
    f.render_widget(tabs, layout[1]);

    if tab_index == 0 {
        render_vessel_rows(&export.vessels, row_offset, f, layout[2]);
    } else {
        render_target_rows(&export.targets, row_offset, f, layout[2]);
    }
}

fn table_header(titles: &[&'static str]) -> Row<'static> {
    Row::new(titles.iter().map(|title| Cell::from(*title))).style(
        Style::default()
            .fg(Color::Rgb(0, 0, 238))
            .bg(Color::Rgb(200, 200, 200))
            .add_modifier(Modifier::BOLD),
    )
}

fn render_scrollbar(total: usize, row_offset: usize, f: &mut Frame<'_>, area: Rect) {
    let mut scrollbar_state = ScrollbarState::new(total)
        .position(row_offset)
        .viewport_content_length(TABLE_ROWS.min(usize::from(area.height.saturating_sub(1))));
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .thumb_style(Style::default().fg(Color::Rgb(0, 0, 238)));
    let scroll_area = Rect {
        x: area.x,
        y: area.y.saturating_add(1),
        width: area.width,
        height: area.height.saturating_sub(1),
    };
    f.render_stateful_widget(scrollbar, scroll_area, &mut scrollbar_state);
}

fn empty_table(message: &str, f: &mut Frame<'_>, area: Rect) {
    let paragraph = Paragraph::new(message.to_string())
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Gray));
    f.render_widget(paragraph, area);
}

fn render_vessel_rows(vessels: &[Vessel], row_offset: usize, f: &mut Frame<'_>, area: Rect) {
    if vessels.is_empty() {
        empty_table("No vessels in this export", f, area);
        return;
    }

    let rows = vessels.iter().skip(row_offset).take(TABLE_ROWS).map(|vessel| {
        Row::new(vec![
            Cell::from(vessel.name.clone()),
            Cell::from(vessel.vessel_type.clone()),
            Cell::from(vessel.status.clone()),
            Cell::from(vessel.owner_name.clone()),
            Cell::from(format!("{:.1} kn", vessel.speed)),
            Cell::from(format!("{:03.0}°", vessel.heading)),
            Cell::from(format!(
                "{:.3}, {:.3}",
                vessel.position.lat, vessel.position.lng
            )),
            Cell::from(vessel.mmsi.clone().unwrap_or_default()),
        ])
        .style(Style::default().fg(status_color(&vessel.status)))
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(22),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(16),
            Constraint::Length(8),
            Constraint::Length(5),
            Constraint::Length(16),
            Constraint::Length(10),
        ],
    )
    .header(table_header(&[
        "Name", "Type", "Status", "Owner", "Speed", "HDG", "Position", "MMSI",
    ]))
    .column_spacing(1);

    f.render_widget(table, area);
    render_scrollbar(vessels.len(), row_offset, f, area);
}

fn render_target_rows(targets: &[Target], row_offset: usize, f: &mut Frame<'_>, area: Rect) {
    if targets.is_empty() {
        empty_table("No vessels inside the radar range", f, area);
        return;
    }

    let rows = targets.iter().skip(row_offset).take(TABLE_ROWS).map(|target| {
        Row::new(vec![
            Cell::from(target.name.clone()),
            Cell::from(target.status.clone()),
            Cell::from(format!("{:.1} NM", target.distance_nm)),
            Cell::from(format!("{:03.0}°", target.bearing_deg)),
        ])
        .style(Style::default().fg(status_color(&target.status)))
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(22),
            Constraint::Length(10),
            Constraint::Length(10),
            Constraint::Length(8),
        ],
    )
    .header(table_header(&["Name", "Status", "Distance", "Bearing"]))
    .column_spacing(1);

    f.render_widget(table, area);
    render_scrollbar(targets.len(), row_offset, f, area);
}

async fn fetch_fleet(store: Rc<RefCell<Option<FleetExport>>>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let Ok(request) = Request::new_with_str_and_init(EXPORT_FILE, &opts) else {
        return;
    };

    let Ok(response_value) =
        wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request)).await
    else {
        return;
    };

    let Ok(response) = response_value.dyn_into::<Response>() else {
        web_sys::console::error_1(&"Failed to read response".into());
        return;
    };

    let Ok(body) = response.json() else {
        web_sys::console::error_1(&format!("{EXPORT_FILE} has no JSON body").into());
        return;
    };
    let Ok(json) = wasm_bindgen_futures::JsFuture::from(body).await else {
        web_sys::console::error_1(&format!("Failed to read {EXPORT_FILE} body").into());
        return;
    };

    let data = match serde_wasm_bindgen::from_value::<FleetExport>(json) {
        Ok(data) => data,
        Err(error) => {
            web_sys::console::error_1(&format!("Failed to parse {EXPORT_FILE}: {error}").into());
            return;
        }
    };

    *store.borrow_mut() = Some(data);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polar_is_north_up_and_clockwise() {
        let (x, y) = polar(0.0, 1.0);
        assert!(x.abs() < 1e-9 && (y - 1.0).abs() < 1e-9);
        let (x, y) = polar(90.0, 0.5);
        assert!((x - 0.5).abs() < 1e-9 && y.abs() < 1e-9);
    }

    #[test]
    fn export_document_parses() -> Result<(), serde_json::Error> {
        let json = r#"{
            "generated_at": "2026-10-19T08:00:00Z",
            "center": {"lat": 27.1865, "lng": 56.2808},
            "range_nm": 50.0,
            "snapshot": {"vessels": {"total": 1, "by_status": {"active": 1}, "by_type": {}}},
            "vessels": [{
                "id": "v1", "name": "Azadi", "type": "cargo", "status": "active",
                "ownerId": "u2", "ownerName": "Reza Karimi", "speed": 12.5, "heading": 45.0,
                "position": {"lat": 27.2, "lng": 56.3}, "lastUpdate": "2026-10-19T07:59:00Z"
            }],
            "targets": [{
                "vessel_id": "v1", "name": "Azadi", "status": "active",
                "distance_nm": 1.4, "bearing_deg": 33.0
            }],
            "latest_reading": null
        }"#;
        let export: FleetExport = serde_json::from_str(json)?;
        assert_eq!(export.snapshot.vessels.by_status.get("active"), Some(&1));
        assert_eq!(export.vessels[0].owner_name, "Reza Karimi");
        assert_eq!(export.targets.len(), 1);
        Ok(())
    }
}
