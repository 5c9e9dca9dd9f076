use crate::app::App;
use crate::ui::screens::{empty_panel, short_date, visible_rows};
use crate::ui::widgets::charts::status_color;
use crate::ui::widgets::popup::{centered_box, ClearWidget};
use crate::ui::widgets::tables::{header_style, row_style, scroll_offset};
use fleetwatch::fleet::FleetData;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

pub fn render_vessels(app: &App, data: &FleetData, f: &mut Frame<'_>, area: Rect) {
    if data.vessels.is_empty() {
        let message = if app.is_admin() {
            "No vessels registered. Press n to add one."
        } else {
            "You have no vessels yet. Press n to register one."
        };
        empty_panel(f, area, "Vessels", message);
        return;
    }

    let total_rows = data.vessels.len();
    let max_visible_rows = visible_rows(area);
    let offset = scroll_offset(total_rows, max_visible_rows, app.selected_index);

    let rows = data
        .vessels
        .iter()
        .enumerate()
        .skip(offset)
        .take(max_visible_rows)
        .map(|(index, vessel)| {
            Row::new(vec![
                Cell::from(vessel.name.clone()),
                Cell::from(vessel.vessel_type.label()),
                Cell::from(vessel.status.label()),
                Cell::from(vessel.owner_name.clone()),
                Cell::from(format!("{:.1}", vessel.speed)),
                Cell::from(format!("{:03.0}°", vessel.heading)),
                Cell::from(format!(
                    "{:.3}, {:.3}",
                    vessel.position.lat, vessel.position.lng
                )),
                Cell::from(vessel.mmsi.clone().unwrap_or_default()),
                Cell::from(short_date(&vessel.last_update)),
            ])
            .style(row_style(
                index == app.selected_index,
                Style::default().fg(status_color(vessel.status)),
            ))
        });

    let widths = [
        Constraint::Min(18),
        Constraint::Length(10),
        Constraint::Length(9),
        Constraint::Length(16),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(16),
        Constraint::Length(10),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec![
                Cell::from("Name"),
                Cell::from("Type"),
                Cell::from("Status"),
                Cell::from("Owner"),
                Cell::from("Knots"),
                Cell::from("HDG"),
                Cell::from("Position"),
                Cell::from("MMSI"),
                Cell::from("Updated"),
            ])
            .style(header_style()),
        )
        .block(
            Block::default()
                .title(format!(
                    " Vessels ({} of {}) ",
                    app.selected_index + 1,
                    total_rows
                ))
                .borders(Borders::ALL),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

pub fn render_vessel_actions(app: &App, f: &mut Frame<'_>, area: Rect) {
    let Some(vessel) = app.selected_vessel() else {
        return;
    };
    let actions = app.vessel_actions();

    let popup = centered_box(44, u16::try_from(actions.len()).unwrap_or(8) + 2, area);
    let block = Block::default()
        .title(format!(" Actions for {} ", vessel.name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let lines = actions
        .iter()
        .enumerate()
        .map(|(index, action)| {
            let is_selected = index == app.action_index;
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
                Span::styled(format!("{prefix} "), style),
                Span::styled(action.label(), style),
            ])
        })
        .collect::<Vec<_>>();

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    f.render_widget(ClearWidget, popup);
    f.render_widget(paragraph, popup);
}
