use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

mod alerts;
mod dashboard;
mod events;
mod help;
mod map;
mod news;
mod ocean;
pub mod radar;
mod regions;
mod services;
mod users;
mod vessel_actions;
mod vessel_details;
mod vessel_form;
mod vessels;

pub fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_help_toggle(app, key) {
        return;
    }

    if !app.is_typing() && handle_global_keys(app, key) {
        return;
    }

    match app.screen {
        AppScreen::Dashboard => dashboard::handle_dashboard_input(app, key),
        AppScreen::Radar => radar::handle_radar_input(app, key),
        AppScreen::Map => map::handle_map_input(app, key),
        AppScreen::Vessels => vessels::handle_vessels_input(app, key),
        AppScreen::VesselActions => vessel_actions::handle_vessel_actions_input(app, key),
        AppScreen::VesselForm => vessel_form::handle_vessel_form_input(app, key),
        AppScreen::VesselDetails => vessel_details::handle_vessel_details_input(app, key),
        AppScreen::Ocean => ocean::handle_ocean_input(app, key),
        AppScreen::Events => events::handle_events_input(app, key),
        AppScreen::Regions => regions::handle_regions_input(app, key),
        AppScreen::Services => services::handle_services_input(app, key),
        AppScreen::News => news::handle_news_input(app, key),
        AppScreen::Users => users::handle_users_input(app, key),
        AppScreen::Alerts => alerts::handle_alerts_input(app, key),
    }
}

/// Quit, tab switching and reload. Returns `true` when the key was consumed.
fn handle_global_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Char('q') => {
            app.running = false;
            true
        }
        KeyCode::Char(digit @ '0'..='9') => {
            if let Some(screen) = AppScreen::from_digit(digit) {
                app.navigate(screen);
            }
            true
        }
        KeyCode::F(5) | KeyCode::Char('R') => {
            app.reload();
            true
        }
        _ => false,
    }
}

/// Shows an admin-only refusal. Returns `true` when the user may proceed.
fn require_admin(app: &mut App) -> bool {
    if app.is_admin() {
        return true;
    }
    app.notify_error("Not allowed", &"This action needs an admin account");
    false
}
