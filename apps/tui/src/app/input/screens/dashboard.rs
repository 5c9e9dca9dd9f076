use std::path::Path;

use crate::app::input::helpers::navigate_list;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;
use fleetwatch::export::DEFAULT_EXPORT_FILE;
use fleetwatch::radar::RadarScope;

pub fn handle_dashboard_input(app: &mut App, key: KeyCode) {
    let len = app.list_len();
    if navigate_list(&mut app.selected_index, len, key) {
        return;
    }

    match key {
        KeyCode::Enter => {
            if let Some(vessel) = app.selected_vessel() {
                app.detail_vessel_id = Some(vessel.id.clone());
                app.navigate(AppScreen::VesselDetails);
            }
        }
        KeyCode::Char('x') => export_fleet(app),
        _ => {}
    }
}

fn export_fleet(app: &mut App) {
    let Some(data) = app.fleet() else {
        app.notify_error("Export failed", &"Fleet data is still loading");
        return;
    };
    let scope = RadarScope::new(app.config.radar_center, app.config.radar_range_nm);
    match app.actions.export(data, &scope, Path::new(DEFAULT_EXPORT_FILE)) {
        Ok(export) => app.notify_success(
            "Exported",
            format!("{} vessels written to {DEFAULT_EXPORT_FILE}", export.vessels.len()),
        ),
        Err(e) => app.notify_error("Export failed", &e),
    }
}
