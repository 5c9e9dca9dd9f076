use crate::app::input::helpers::navigate_list;
use crate::app::state::{App, AppScreen, VesselFormState};
use crossterm::event::KeyCode;

pub fn handle_vessels_input(app: &mut App, key: KeyCode) {
    let len = app.list_len();
    if navigate_list(&mut app.selected_index, len, key) {
        return;
    }

    match key {
        KeyCode::Esc => app.navigate(AppScreen::Dashboard),
        KeyCode::Enter => {
            if app.selected_vessel().is_some() {
                app.navigate(AppScreen::VesselActions);
            }
        }
        KeyCode::Char('n') => {
            let form = VesselFormState::blank(app.config.radar_center, app.is_admin());
            app.navigate(AppScreen::VesselForm);
            app.vessel_form = Some(form);
        }
        _ => {}
    }
}
