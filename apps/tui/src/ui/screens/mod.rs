pub mod alerts;
pub mod dashboard;
pub mod events;
pub mod help;
pub mod map;
pub mod news;
pub mod ocean;
pub mod radar;
pub mod regions;
pub mod services;
pub mod users;
pub mod vessel_details;
pub mod vessel_form;
pub mod vessels;

use crate::app::state::AppScreen;
use crate::app::App;
use chrono::{DateTime, Utc};
use fleetwatch::fleet::FleetData;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub fn render_screen(app: &App, data: &FleetData, f: &mut Frame<'_>, area: Rect) {
    match app.screen {
        AppScreen::Dashboard => dashboard::render_dashboard(app, data, f, area),
        AppScreen::Radar => radar::render_radar(app, data, f, area),
        AppScreen::Map => map::render_map(app, data, f, area),
        AppScreen::Vessels => vessels::render_vessels(app, data, f, area),
        AppScreen::VesselActions => {
            vessels::render_vessels(app, data, f, area);
            vessels::render_vessel_actions(app, f, area);
        }
        AppScreen::VesselForm => vessel_form::render_vessel_form(app, f, area),
        AppScreen::VesselDetails => vessel_details::render_vessel_details(app, data, f, area),
        AppScreen::Ocean => ocean::render_ocean(app, data, f, area),
        AppScreen::Events => events::render_events(app, data, f, area),
        AppScreen::Regions => regions::render_regions(app, data, f, area),
        AppScreen::Services => services::render_services(app, data, f, area),
        AppScreen::News => news::render_news(app, data, f, area),
        AppScreen::Users => users::render_users(app, data, f, area),
        AppScreen::Alerts => alerts::render_alerts(app, data, f, area),
    }
}

/// Footer key hints for the current screen.
pub fn hints_for(app: &App) -> &'static [(&'static str, &'static str)] {
    if app.radar.as_ref().is_some_and(|radar| radar.searching) {
        return &[("Type", "Search"), ("Enter/ESC", "Done")];
    }
    if app.vessel_form.as_ref().is_some_and(|form| form.editing) {
        return &[("Type", "Edit field"), ("Enter/ESC", "Done")];
    }
    match app.screen {
        AppScreen::Dashboard => &[
            ("1-0", "Screens"),
            ("↑/↓", "Vessels"),
            ("Enter", "Details"),
            ("x", "Export"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
        AppScreen::Radar => &[
            ("↑/↓", "Control"),
            ("←/→", "Adjust"),
            ("Tab", "Next target"),
            ("+/-", "Zoom"),
            ("t", "Type"),
            ("/", "Search"),
            ("Space", "Pause"),
            ("m", "Map"),
            ("?", "Help"),
        ],
        AppScreen::Map => &[
            ("Arrows", "Pan"),
            ("+/-", "Zoom"),
            ("v/r/p", "Layers"),
            ("Tab", "Next vessel"),
            ("Enter", "Details"),
            ("c", "Recenter"),
            ("m/ESC", "Radar"),
        ],
        AppScreen::Vessels => &[
            ("↑/↓", "Navigate"),
            ("Enter", "Actions"),
            ("n", "New vessel"),
            ("ESC", "Dashboard"),
            ("q", "Quit"),
        ],
        AppScreen::VesselActions => &[
            ("↑/↓", "Select action"),
            ("Enter", "Confirm"),
            ("ESC", "Back to list"),
        ],
        AppScreen::VesselForm => &[
            ("↑/↓", "Field"),
            ("Enter", "Edit"),
            ("←/→", "Choose"),
            ("s", "Save"),
            ("ESC", "Cancel"),
        ],
        AppScreen::VesselDetails => &[
            ("↑/↓", "Reminder"),
            ("Enter", "Advance status"),
            ("e", "Edit vessel"),
            ("ESC", "Back"),
        ],
        AppScreen::Ocean => &[
            ("↑/↓", "Readings"),
            ("e", "Evaluate latest"),
            ("ESC", "Dashboard"),
        ],
        AppScreen::Events => &[
            ("↑/↓", "Navigate"),
            ("Enter", "Register"),
            ("d", "Delete"),
            ("ESC", "Dashboard"),
        ],
        AppScreen::Regions => &[("↑/↓", "Navigate"), ("ESC", "Dashboard")],
        AppScreen::Services => &[
            ("↑/↓", "Navigate"),
            ("a", "Approve"),
            ("x", "Reject"),
            ("ESC", "Dashboard"),
        ],
        AppScreen::News | AppScreen::Alerts => &[
            ("↑/↓", "Navigate"),
            ("Enter", "Mark read"),
            ("ESC", "Dashboard"),
        ],
        AppScreen::Users => &[
            ("↑/↓", "Navigate"),
            ("s", "Suspend/activate"),
            ("ESC", "Dashboard"),
        ],
    }
}

/// Rows a bordered table with a header can show in `area`.
pub(crate) fn visible_rows(area: Rect) -> usize {
    usize::from(area.height.saturating_sub(3))
}

pub(crate) fn short_date(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M").to_string()
}

pub(crate) fn empty_panel(f: &mut Frame<'_>, area: Rect, title: &str, message: &str) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let paragraph = Paragraph::new(message.to_string())
        .block(block)
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}
