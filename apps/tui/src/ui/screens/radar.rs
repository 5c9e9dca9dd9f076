use crate::app::radar_view::RadarView;
use crate::app::App;
use crate::ui::frame_chunks;
use crate::ui::screens::empty_panel;
use crate::ui::widgets::charts::type_color;
use crate::ui::widgets::radar::{render_scope, square_cells};
use crate::ui::widgets::tables::{header_style, row_style, scroll_offset};
use fleetwatch::db::models::Vessel;
use fleetwatch::fleet::FleetData;
use fleetwatch::geo::compass_point;
use fleetwatch::radar::{ControlKind, RadarTarget, SURFACE_PX};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

fn scope_block(range_nm: f64) -> Block<'static> {
    Block::default()
        .title(format!(" Radar · {range_nm:.0} NM "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
}

/// Scope column and side panel of the radar screen body.
fn radar_columns(body: Rect) -> (Rect, Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(body);
    (columns[0], columns[1])
}

/// Cells the scope occupies for a terminal of size `frame`. Mouse clicks
/// are mapped through the same rect the scope is drawn into.
pub fn scope_area(frame: Rect) -> Rect {
    let (_, body, _) = frame_chunks(frame);
    let (scope, _) = radar_columns(body);
    square_cells(scope_block(0.0).inner(scope))
}

pub fn render_radar(app: &App, data: &FleetData, f: &mut Frame<'_>, area: Rect) {
    let Some(radar) = app.radar.as_ref() else {
        empty_panel(f, area, "Radar", "Radar is not running.");
        return;
    };
    let shown = radar.shown(&data.vessels);
    let (scope_column, panel) = radar_columns(area);

    let block = scope_block(radar.scope.range_nm());
    let inner = block.inner(scope_column);
    f.render_widget(block, scope_column);
    render_scope(f, square_cells(inner), &radar.scope, &shown);

    render_side_panel(radar, &shown, f, panel);
}

fn render_side_panel(radar: &RadarView, shown: &[Vessel], f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Controls
            Constraint::Length(5), // Scan state
            Constraint::Length(9), // Selected target
            Constraint::Min(4),    // Target list
        ])
        .split(area);

    let targets = radar.scope.targets(SURFACE_PX, SURFACE_PX, shown);
    render_controls(radar, f, rows[0]);
    render_scan_state(radar, targets.len(), f, rows[1]);
    render_selected(radar, &targets, f, rows[2]);
    render_target_list(radar, &targets, f, rows[3]);
}

fn render_controls(radar: &RadarView, f: &mut Frame<'_>, area: Rect) {
    let lines = ControlKind::ALL
        .iter()
        .enumerate()
        .map(|(index, kind)| {
            let is_selected = index == radar.control_index;
            let style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let prefix = if is_selected { ">" } else { " " };
            TextLine::from(vec![
                Span::styled(format!("{prefix} {:<13}", kind.label()), style),
                Span::styled(
                    radar.scope.controls.value_label(*kind),
                    Style::default().fg(Color::Cyan),
                ),
            ])
        })
        .collect::<Vec<_>>();

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Controls ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}

fn render_scan_state(radar: &RadarView, in_range: usize, f: &mut Frame<'_>, area: Rect) {
    let sweep = if radar.scope.sweep.is_paused() {
        Span::styled("paused", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            format!("{:>3.0}°", radar.scope.sweep.angle_deg()),
            Style::default().fg(Color::Green),
        )
    };
    let search = if radar.searching {
        format!("/{}_", radar.search)
    } else {
        radar.filter_label()
    };

    let lines = vec![
        TextLine::from(vec![Span::raw("Sweep:  "), sweep]),
        TextLine::from(format!("Range:  {:.0} NM", radar.scope.range_nm())),
        TextLine::from(format!("Filter: {search} ({in_range} in range)")),
    ];
    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Scan ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(paragraph, area);
}

fn render_selected(
    radar: &RadarView,
    targets: &[(&Vessel, RadarTarget)],
    f: &mut Frame<'_>,
    area: Rect,
) {
    let block = Block::default()
        .title(" Target ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let selected = radar
        .scope
        .selected()
        .and_then(|id| targets.iter().find(|(vessel, _)| vessel.id == id));
    let Some((vessel, target)) = selected else {
        let paragraph = Paragraph::new("Click a blip or press Tab.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    };

    let label = Style::default().fg(Color::Gray);
    let lines = vec![
        TextLine::from(Span::styled(
            vessel.name.clone(),
            Style::default()
                .fg(type_color(vessel.vessel_type))
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(vec![
            Span::styled("Distance: ", label),
            Span::raw(format!("{:.1} NM", target.distance_nm)),
        ]),
        TextLine::from(vec![
            Span::styled("Bearing:  ", label),
            Span::raw(format!(
                "{:.0}° {}",
                target.bearing_deg,
                compass_point(target.bearing_deg)
            )),
        ]),
        TextLine::from(vec![
            Span::styled("Speed:    ", label),
            Span::raw(format!(
                "{:.1} kn, heading {:.0}°",
                vessel.speed, vessel.heading
            )),
        ]),
        TextLine::from(vec![
            Span::styled("Position: ", label),
            Span::raw(format!(
                "{:.4}, {:.4}",
                vessel.position.lat, vessel.position.lng
            )),
        ]),
        TextLine::from(vec![
            Span::styled("Type:     ", label),
            Span::raw(vessel.vessel_type.label()),
        ]),
        TextLine::from(Span::styled(
            "i: open details",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_target_list(
    radar: &RadarView,
    targets: &[(&Vessel, RadarTarget)],
    f: &mut Frame<'_>,
    area: Rect,
) {
    if targets.is_empty() {
        empty_panel(f, area, "Targets", "No targets in range.");
        return;
    }

    let max_visible_rows = usize::from(area.height.saturating_sub(3));
    let selected_index = radar
        .scope
        .selected()
        .and_then(|id| targets.iter().position(|(vessel, _)| vessel.id == id));
    let offset = scroll_offset(
        targets.len(),
        max_visible_rows,
        selected_index.unwrap_or_default(),
    );

    let rows = targets
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, (vessel, target))| {
            Row::new(vec![
                Cell::from(vessel.name.clone()),
                Cell::from(format!("{:.1}", target.distance_nm)),
                Cell::from(format!("{:03.0}", target.bearing_deg)),
            ])
            .style(row_style(
                Some(index) == selected_index,
                Style::default().fg(type_color(vessel.vessel_type)),
            ))
        });

    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(6),
            Constraint::Length(4),
        ],
    )
    .header(Row::new(vec!["Name", "NM", "BRG"]).style(header_style()))
    .block(
        Block::default()
            .title(format!(" Targets ({}) ", targets.len()))
            .borders(Borders::ALL),
    );
    f.render_widget(table, area);
}
