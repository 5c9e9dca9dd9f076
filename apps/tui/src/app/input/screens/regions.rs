use crate::app::input::helpers::navigate_list;
use crate::app::state::{App, AppScreen};
use crossterm::event::KeyCode;

pub fn handle_regions_input(app: &mut App, key: KeyCode) {
    let len = app.list_len();
    if navigate_list(&mut app.selected_index, len, key) {
        return;
    }

    if key == KeyCode::Esc {
        app.navigate(AppScreen::Dashboard);
    }
}
